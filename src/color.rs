use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorError {
    #[error("color '{0}' must start with '#'")]
    MissingHash(String),
    #[error("color '{0}' must have 3, 6 or 8 hex digits")]
    BadLength(String),
    #[error("color '{0}' contains a non-hex digit")]
    BadDigit(String),
}

/// Parse a CSS-style hex color (`#rgb`, `#rrggbb`, `#rrggbbaa`) into
/// straight sRGB components in `0.0..=1.0`.
pub fn parse_hex(input: &str) -> Result<[f32; 4], ColorError> {
    let digits = input
        .trim()
        .strip_prefix('#')
        .ok_or_else(|| ColorError::MissingHash(input.to_string()))?;

    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ColorError::BadDigit(input.to_string()));
    }

    let channel = |s: &str| u8::from_str_radix(s, 16).map(|v| v as f32 / 255.0);
    let bad = |_| ColorError::BadDigit(input.to_string());

    match digits.len() {
        3 => {
            let mut rgb = [0.0; 3];
            for (i, c) in digits.chars().enumerate() {
                let doubled = format!("{c}{c}");
                rgb[i] = channel(&doubled).map_err(bad)?;
            }
            Ok([rgb[0], rgb[1], rgb[2], 1.0])
        }
        6 | 8 => {
            let r = channel(&digits[0..2]).map_err(bad)?;
            let g = channel(&digits[2..4]).map_err(bad)?;
            let b = channel(&digits[4..6]).map_err(bad)?;
            let a = if digits.len() == 8 {
                channel(&digits[6..8]).map_err(bad)?
            } else {
                1.0
            };
            Ok([r, g, b, a])
        }
        _ => Err(ColorError::BadLength(input.to_string())),
    }
}

/// sRGB transfer function, alpha left untouched.
/// Colors go to an sRGB surface, so the shader works in linear space.
pub fn srgb_to_linear(color: [f32; 4]) -> [f32; 4] {
    let convert = |c: f32| {
        if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    [convert(color[0]), convert(color[1]), convert(color[2]), color[3]]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_six_digit_palette_entry() {
        let c = parse_hex("#6366f1").unwrap();
        assert!((c[0] - 99.0 / 255.0).abs() < 1e-6);
        assert!((c[1] - 102.0 / 255.0).abs() < 1e-6);
        assert!((c[2] - 241.0 / 255.0).abs() < 1e-6);
        assert_eq!(c[3], 1.0);
    }

    #[test]
    fn short_form_doubles_digits() {
        assert_eq!(parse_hex("#fff").unwrap(), [1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn eight_digits_carry_alpha() {
        let c = parse_hex("#00000080").unwrap();
        assert!((c[3] - 128.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(matches!(parse_hex("6366f1"), Err(ColorError::MissingHash(_))));
        assert!(matches!(parse_hex("#12345"), Err(ColorError::BadLength(_))));
        assert!(matches!(parse_hex("#zzzzzz"), Err(ColorError::BadDigit(_))));
    }

    #[test]
    fn linear_conversion_keeps_endpoints() {
        assert_eq!(srgb_to_linear([0.0, 1.0, 0.0, 0.5]), [0.0, 1.0, 0.0, 0.5]);
        let mid = srgb_to_linear([0.5, 0.5, 0.5, 1.0]);
        assert!(mid[0] < 0.5 && mid[0] > 0.2);
    }
}
