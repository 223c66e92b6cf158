//! Ring colors. Index 0 is the origin marker, index `r` colors ring `r`.

use crate::error::{Error, Result};

pub type Color = [f32; 4];

pub const DEFAULT_COLORS: [&str; 8] = [
    "#f8f8f2", "#ff5555", "#ffb86c", "#f1fa8c", "#50fa7b", "#8be9fd", "#bd93f9", "#ff79c6",
];

pub const MIN_COLORS: usize = 8;

#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    pub fn new(colors: Vec<Color>) -> Result<Self> {
        if colors.len() < MIN_COLORS {
            return Err(Error::invalid(format!(
                "palette needs at least {MIN_COLORS} colors, got {}",
                colors.len()
            )));
        }
        Ok(Self { colors })
    }

    pub fn from_hex<S: AsRef<str>>(entries: &[S]) -> Result<Self> {
        let colors = entries
            .iter()
            .map(|entry| parse_hex(entry.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Self::new(colors)
    }

    /// Color for ring `index`, wrapping around for rings past the table.
    pub fn get(&self, index: usize) -> Color {
        self.colors[index % self.colors.len()]
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl Default for Palette {
    fn default() -> Self {
        let colors = DEFAULT_COLORS
            .iter()
            .map(|hex| parse_hex(hex).unwrap_or([1.0, 1.0, 1.0, 1.0]))
            .collect();
        Self { colors }
    }
}

/// Parses `#rrggbb` or `#rrggbbaa`.
pub fn parse_hex(hex: &str) -> Result<Color> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if !(digits.len() == 6 || digits.len() == 8) || !digits.is_ascii() {
        return Err(Error::invalid(format!("bad color {hex:?}")));
    }

    let channel = |i: usize| {
        u8::from_str_radix(&digits[i..i + 2], 16)
            .map(|v| v as f32 / 255.0)
            .map_err(|_| Error::invalid(format!("bad color {hex:?}")))
    };

    let alpha = if digits.len() == 8 { channel(6)? } else { 1.0 };
    Ok([channel(0)?, channel(2)?, channel(4)?, alpha])
}
