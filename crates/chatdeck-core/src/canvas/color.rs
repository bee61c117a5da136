use crate::error::{DeckError, Result};

pub type Rgba = image::Rgba<u8>;

/// Parse `#rgb` or `#rrggbb` into an opaque colour.
pub fn parse_hex_color(input: &str) -> Result<Rgba> {
    let invalid = || DeckError::InvalidColor(input.to_string());

    let hex = input.trim().strip_prefix('#').ok_or_else(invalid)?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());

    let (r, g, b) = match hex.len() {
        3 => {
            let expand = |i: usize| channel(&hex[i..i + 1].repeat(2));
            (expand(0)?, expand(1)?, expand(2)?)
        }
        6 => (channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?),
        _ => return Err(invalid()),
    };

    Ok(image::Rgba([r, g, b, 255]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_and_long_forms() {
        assert_eq!(parse_hex_color("#eee").unwrap(), image::Rgba([0xee, 0xee, 0xee, 255]));
        assert_eq!(parse_hex_color("#1a2B3c").unwrap(), image::Rgba([0x1a, 0x2b, 0x3c, 255]));
    }

    #[test]
    fn test_rejects_malformed() {
        for bad in ["eee", "#ee", "#eeee", "#ggg", "", "#", "#12345z"] {
            assert!(
                matches!(parse_hex_color(bad), Err(DeckError::InvalidColor(_))),
                "{bad:?} should be rejected"
            );
        }
    }
}
