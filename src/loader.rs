use miette::Result;

use crate::error;

/// LS-8 memory is 256 bytes; an image can never exceed it.
pub const IMAGE_MAX: usize = 256;

/// Parse a line-oriented LS-8 source listing into the byte image that the
/// runtime places at address 0.
///
/// `#` introduces a comment for the rest of the line. After comment
/// stripping and trimming, a line whose first character is `0` or `1` must
/// be an 8-character binary literal for one instruction byte. Blank lines
/// and lines starting with any other character are skipped, matching the
/// listing format.
pub fn parse_image(src: &str) -> Result<Vec<u8>> {
    let mut image = Vec::new();
    let mut offs = 0;

    for line in src.lines() {
        let code = match line.find('#') {
            Some(idx) => &line[..idx],
            None => line,
        };
        let word = code.trim();
        if word.starts_with(&['0', '1'][..]) {
            // Literal position within the whole source, for the diagnostic
            let start = offs + (word.as_ptr() as usize - line.as_ptr() as usize);
            let span = start..start + word.len();

            if word.len() != 8 {
                return Err(error::load_wrong_width(span, src, word.len()));
            }
            let byte =
                u8::from_str_radix(word, 2).map_err(|e| error::load_bad_literal(span.clone(), src, e))?;
            if image.len() == IMAGE_MAX {
                return Err(error::load_image_too_long(span, src));
            }
            image.push(byte);
        }
        offs += line.len() + 1;
    }

    Ok(image)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn strips_comments_and_blank_lines() {
        let src = "\
# print8.ls8
10000010 # LDI R0,8
00000000

00001000
01000111 # PRN R0
00000000
00000001 # HLT
";
        let image = parse_image(src).unwrap();
        assert_eq!(
            image,
            vec![0b10000010, 0b00000000, 0b00001000, 0b01000111, 0b00000000, 0b00000001]
        );
    }

    #[test]
    fn ignores_lines_not_starting_with_a_binary_digit() {
        let src = "start:\n00000001\nend of program\n";
        assert_eq!(parse_image(src).unwrap(), vec![0b00000001]);
    }

    #[test]
    fn empty_source_is_an_empty_image() {
        assert!(parse_image("").unwrap().is_empty());
        assert!(parse_image("# only comments\n\n").unwrap().is_empty());
    }

    #[test]
    fn rejects_short_and_long_literals() {
        assert!(parse_image("0101\n").is_err());
        assert!(parse_image("000000001\n").is_err());
    }

    #[test]
    fn rejects_non_binary_digits() {
        assert!(parse_image("0000000b\n").is_err());
        assert!(parse_image("10x00010\n").is_err());
    }

    #[test]
    fn rejects_image_longer_than_memory() {
        let mut src = String::new();
        for _ in 0..IMAGE_MAX + 1 {
            src.push_str("00000001\n");
        }
        assert!(parse_image(&src).is_err());

        let src = &src[..IMAGE_MAX * 9];
        assert_eq!(parse_image(src).unwrap().len(), IMAGE_MAX);
    }
}
