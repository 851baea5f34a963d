use serde::{Deserialize, Serialize};

use crate::error::StyleError;

/// Color representation.
///
/// Colors are written to a style document as `#RRGGBBAA` strings. When reading, HEX6, HEX8 and the CSS
/// `rgb(...)`/`rgba(...)` functional notations are accepted.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    r: u8,
    g: u8,
    b: u8,
    a: u8,
}

impl TryFrom<String> for Color {
    type Error = StyleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Color> for String {
    fn from(val: Color) -> Self {
        val.to_hex()
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Color {
    /// White color: `#FFFFFFFF`
    pub const WHITE: Color = Color::rgba(255, 255, 255, 255);
    /// Black color: `#000000FF`
    pub const BLACK: Color = Color::rgba(0, 0, 0, 255);

    /// Constructs color from its RGBA channels.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Converts the color into HEX8 string: `#RRGGBBAA`.
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
    }

    /// Parses any of the supported color notations.
    pub fn parse(value: &str) -> Result<Self, StyleError> {
        let trimmed = value.trim();
        let parsed = if trimmed.starts_with('#') {
            Self::try_from_hex(trimmed)
        } else {
            Self::try_from_css_function(trimmed)
        };

        parsed.ok_or_else(|| StyleError::InvalidColor(value.to_string()))
    }

    /// Parses a color from the hex string. Hex string can be either HEX6 (`#RRGGBB`) or HEX8 (`#RRGGBBAA`).
    pub fn try_from_hex(hex_string: &str) -> Option<Self> {
        if hex_string.len() != 7 && hex_string.len() != 9 || hex_string.chars().next()? != '#' {
            return None;
        }

        let r = u8::from_str_radix(hex_string.get(1..3)?, 16).ok()?;
        let g = u8::from_str_radix(hex_string.get(3..5)?, 16).ok()?;
        let b = u8::from_str_radix(hex_string.get(5..7)?, 16).ok()?;
        let a = if hex_string.len() == 9 {
            u8::from_str_radix(hex_string.get(7..9)?, 16).ok()?
        } else {
            255
        };

        Some(Self { r, g, b, a })
    }

    /// Parses `rgb(r, g, b)` or `rgba(r, g, b, a)` where `a` is in `0..=1`.
    pub fn try_from_css_function(value: &str) -> Option<Self> {
        let (name, rest) = value.split_once('(')?;
        let args = rest.strip_suffix(')')?;
        let parts: Vec<&str> = args.split(',').map(str::trim).collect();

        let channel = |s: &str| s.parse::<u8>().ok();
        match (name.trim(), parts.as_slice()) {
            ("rgb", [r, g, b]) => Some(Self::rgba(channel(r)?, channel(g)?, channel(b)?, 255)),
            ("rgba", [r, g, b, a]) => {
                let alpha = a.parse::<f64>().ok()?;
                if !(0.0..=1.0).contains(&alpha) {
                    return None;
                }

                Some(Self::rgba(
                    channel(r)?,
                    channel(g)?,
                    channel(b)?,
                    (alpha * 255.0).round() as u8,
                ))
            }
            _ => None,
        }
    }

    /// Parses a color from the hex string. Hex string can be either HEX6 (`#RRGGBB`) or HEX8 (`#RRGGBBAA`).
    ///
    /// # Panics
    ///
    /// Panics if the parsing fails.
    pub const fn from_hex(hex_string: &'static str) -> Self {
        let bytes = hex_string.as_bytes();
        if bytes.len() != 7 && bytes.len() != 9 || bytes[0] != b'#' {
            panic!("Invalid color hex string");
        }

        let r = decode_byte(bytes[1], bytes[2]);
        let g = decode_byte(bytes[3], bytes[4]);
        let b = decode_byte(bytes[5], bytes[6]);
        let a = if bytes.len() == 9 {
            decode_byte(bytes[7], bytes[8])
        } else {
            255
        };

        Self { r, g, b, a }
    }
}

const fn decode_byte(high: u8, low: u8) -> u8 {
    decode_char(high) * 16 + decode_char(low)
}

const fn decode_char(byte: u8) -> u8 {
    match byte {
        b'0'..=b'9' => byte - b'0',
        b'a'..=b'f' => byte - b'a' + 10,
        b'A'..=b'F' => byte - b'A' + 10,
        _ => panic!("Invalid hex character"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_serialization() {
        let hex = "#43BCFDFF";
        let color = Color::try_from_hex(hex).unwrap();
        assert_eq!(&color.to_hex(), hex);

        assert_eq!(Color::from_hex(hex), color);
    }

    #[test]
    fn hex6_gets_opaque_alpha() {
        let color = Color::parse("#e3e3e3").unwrap();
        assert_eq!(color, Color::rgba(0xe3, 0xe3, 0xe3, 255));
        assert_eq!(color.to_hex(), "#E3E3E3FF");
    }

    #[test]
    fn css_functions() {
        assert_eq!(
            Color::parse("rgba(195, 175, 165, 1)").unwrap(),
            Color::rgba(195, 175, 165, 255)
        );
        assert_eq!(
            Color::parse("rgba(0,0,0,0.5)").unwrap(),
            Color::rgba(0, 0, 0, 128)
        );
        assert_eq!(
            Color::parse("rgb(1, 2, 3)").unwrap(),
            Color::rgba(1, 2, 3, 255)
        );
    }

    #[test]
    fn invalid_colors() {
        assert!(Color::parse("").is_err());
        assert!(Color::parse("#12345").is_err());
        assert!(Color::parse("#GGGGGG").is_err());
        assert!(Color::parse("rgba(1, 2, 3)").is_err());
        assert!(Color::parse("rgba(1, 2, 3, 2)").is_err());
        assert!(Color::parse("rgb(256, 0, 0)").is_err());
    }

    #[test]
    fn serde_uses_hex_strings() {
        let color: Color = serde_json::from_str("\"rgba(195, 175, 165, 1)\"").unwrap();
        assert_eq!(
            serde_json::to_string(&color).unwrap(),
            "\"#C3AFA5FF\""
        );
        assert!(serde_json::from_str::<Color>("\"teal\"").is_err());
    }
}
