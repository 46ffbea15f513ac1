use glam::Vec4;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid hex color '{0}', expected RRGGBB")]
pub struct ParseColorError(pub String);

/// Parses `RRGGBB` (optionally prefixed with `#`) into an opaque RGBA color.
pub fn parse_hexcode(code: &str) -> Result<Vec4, ParseColorError> {
    let digits = code.strip_prefix('#').unwrap_or(code);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ParseColorError(code.to_owned()));
    }

    let channel = |i: usize| {
        u8::from_str_radix(&digits[i..i + 2], 16)
            .map(|v| v as f32 / 255.0)
            .map_err(|_| ParseColorError(code.to_owned()))
    };

    Ok(Vec4::new(channel(0)?, channel(2)?, channel(4)?, 1.0))
}
