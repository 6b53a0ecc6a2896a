use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const WHITE: Rgb = Rgb::new(0xff, 0xff, 0xff);
    pub const BLACK: Rgb = Rgb::new(0x00, 0x00, 0x00);

    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// CSS functional notation, the form browsers report for interpolated colours.
    pub fn css(&self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }

    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        Rgb {
            r: lerp_channel(self.r, other.r, t),
            g: lerp_channel(self.g, other.g, t),
            b: lerp_channel(self.b, other.b, t),
        }
    }
}

fn lerp_channel(a: u8, b: u8, t: f64) -> u8 {
    let v = a as f64 + (b as f64 - a as f64) * t;
    v.round().clamp(0.0, 255.0) as u8
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid colour {0:?} (expected #rgb, #rrggbb or a basic colour name)")]
pub struct ColorParseError(pub String);

impl FromStr for Rgb {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "white" => return Ok(Rgb::WHITE),
            "black" => return Ok(Rgb::BLACK),
            "cyan" | "aqua" => return Ok(Rgb::new(0x00, 0xff, 0xff)),
            "orange" => return Ok(Rgb::new(0xff, 0xa5, 0x00)),
            _ => {}
        }
        let hex = trimmed
            .strip_prefix('#')
            .filter(|hex| hex.is_ascii())
            .ok_or_else(|| ColorParseError(s.to_string()))?;
        let parse = |digits: &str| {
            u8::from_str_radix(digits, 16).map_err(|_| ColorParseError(s.to_string()))
        };
        match hex.len() {
            6 => Ok(Rgb::new(
                parse(&hex[0..2])?,
                parse(&hex[2..4])?,
                parse(&hex[4..6])?,
            )),
            3 => {
                let expand = |i: usize| parse(&hex[i..i + 1]).map(|v| v * 17);
                Ok(Rgb::new(expand(0)?, expand(1)?, expand(2)?))
            }
            _ => Err(ColorParseError(s.to_string())),
        }
    }
}

impl TryFrom<String> for Rgb {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.hex()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex())
    }
}

/// Two-stop linear colour ramp; `low` paints the minimum of a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorRamp {
    pub low: Rgb,
    pub high: Rgb,
}

impl ColorRamp {
    pub const fn new(low: Rgb, high: Rgb) -> Self {
        Self { low, high }
    }

    pub fn table_v1() -> Self {
        Self::new(Rgb::new(0x81, 0x81, 0xdf), Rgb::new(0x33, 0x33, 0x99))
    }

    pub fn heatmap_v1() -> Self {
        Self::new(Rgb::new(0x31, 0x2e, 0x2b), Rgb::new(0x00, 0xff, 0xff))
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/color.rs"]
mod tests;
