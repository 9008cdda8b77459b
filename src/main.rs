use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use miette::{IntoDiagnostic, Result};

use latch::ops::Opcode;
use latch::{loader, RunState};

/// Latch is a convenient emulator toolchain for the LS-8 8-bit CPU.
#[derive(Parser)]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Quickly provide a `.ls8` source listing to run
    path: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Run a `.ls8` source listing and print program output
    Run {
        /// `.ls8` file to run
        name: PathBuf,
        /// Emit a trace line to stderr before every instruction
        #[arg(short, long)]
        trace: bool,
        /// Produce minimal output, suited for blackbox tests
        #[arg(short, long)]
        minimal: bool,
    },
    /// Load a `.ls8` source listing without running it
    Check {
        /// File to check
        name: PathBuf,
    },
    /// Show the loaded image without running it
    Dump {
        /// `.ls8` file to inspect
        name: PathBuf,
    },
}

fn main() -> miette::Result<()> {
    use MsgColor::*;
    let args = Args::parse();

    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new() //
                .context_lines(latch::DIAGNOSTIC_CONTEXT_LINES)
                .build(),
        )
    }))?;

    if let Some(command) = args.command {
        match command {
            Command::Run {
                name,
                trace,
                minimal,
            } => run(&name, trace, minimal),
            Command::Check { name } => {
                file_message(Green, "Checking", &name);
                let image = load(&name)?;
                message(
                    Green,
                    "Success",
                    &format!("{} instruction bytes, no errors found!", image.len()),
                );
                Ok(())
            }
            Command::Dump { name } => {
                file_message(Green, "Loading", &name);
                let image = load(&name)?;
                // A raw view: operand bytes can also decode as mnemonics
                for (addr, byte) in image.iter().enumerate() {
                    let mnemonic = Opcode::decode(*byte).map_or("", Opcode::mnemonic);
                    println!("0x{addr:02x}  {byte:08b}  0x{byte:02x}  {mnemonic}");
                }
                Ok(())
            }
        }
    } else if let Some(path) = args.path {
        run(&path, false, false)
    } else {
        println!("\n~ latch v{VERSION} ~");
        println!("{}", LOGO.cyan().bold());
        println!("{SHORT_INFO}");
        Ok(())
    }
}

#[allow(unused)]
enum MsgColor {
    Green,
    Cyan,
    Red,
}

fn file_message(color: MsgColor, left: &str, right: &Path) {
    let right = format!("target {}", right.display());
    message(color, left, &right);
}

fn message(color: MsgColor, left: &str, right: &str) {
    let left = match color {
        MsgColor::Green => left.green(),
        MsgColor::Cyan => left.cyan(),
        MsgColor::Red => left.red(),
    };
    println!("{left:>12} {right}");
}

fn run(name: &Path, trace: bool, minimal: bool) -> Result<()> {
    if !minimal {
        file_message(MsgColor::Green, "Loading", name);
    }
    let image = load(name)?;

    if !minimal {
        message(MsgColor::Green, "Running", "loaded image");
    }
    let mut machine = RunState::new(&image, io::stdout().lock());
    machine.set_trace(trace);
    machine.run().into_diagnostic()?;

    if !minimal {
        file_message(MsgColor::Green, "Completed", name);
    }
    Ok(())
}

fn load(name: &Path) -> Result<Vec<u8>> {
    let src = fs::read_to_string(name).into_diagnostic()?;
    loader::parse_image(&src)
}

const LOGO: &str = r"
 |  _. _|_  _ |_
 | (_|  |_ (_ | |";

const SHORT_INFO: &str = r"
Welcome to latch, an emulator toolchain for the LS-8 8-bit CPU.
Please use `-h` or `--help` to access the usage instructions and documentation.
";

const VERSION: &str = env!("CARGO_PKG_VERSION");
