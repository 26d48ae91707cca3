use std::fmt;
use std::str::FromStr;

use crate::error::AssemblyError;

/// ARGB colour, written as `$aarrggbb`.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Color {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::argb(0xff, 0x00, 0x00, 0x00);

    pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    /// Lowercase `aarrggbb`.
    pub fn hex(&self) -> String {
        format!("{:02x}{:02x}{:02x}{:02x}", self.a, self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.hex())
    }
}

/// Accepts `aarrggbb` or `$aarrggbb`.
impl FromStr for Color {
    type Err = AssemblyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let digits = value.strip_prefix('$').unwrap_or(value);
        if digits.len() != 8 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(AssemblyError::InvalidColor(value.to_string()));
        }

        let channel = |index: usize| {
            u8::from_str_radix(&digits[index * 2..index * 2 + 2], 16)
                .map_err(|_| AssemblyError::InvalidColor(value.to_string()))
        };
        Ok(Color::argb(channel(0)?, channel(1)?, channel(2)?, channel(3)?))
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct HeaderBackground {
    pub color: Color,
    pub use_black_text_color: bool,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct IconBackground {
    pub color: Color,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Colors {
    pub header_background: HeaderBackground,
    pub icon_background: IconBackground,
}

impl Default for Colors {
    fn default() -> Self {
        Self {
            header_background: HeaderBackground {
                color: Color::BLACK,
                use_black_text_color: false,
            },
            icon_background: IconBackground {
                color: Color::BLACK,
            },
        }
    }
}
