//! Colors as the renderer sees them.
//!
//! Hex colors are parsed so the face gradient can use a lightened stop; any
//! other CSS color string is carried through verbatim and only interpreted by
//! the surface that paints it.

use crate::constants::{FEATURE_HEX, LIGHTEN_OFFSET, SCLERA_HEX};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ColorError {
    #[error("color {0:?} does not start with '#'")]
    MissingHash(String),
    #[error("expected 6 hex digits, got {0}")]
    BadLength(usize),
    #[error("invalid hex digits in {0:?}")]
    BadDigit(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` (case-insensitive).
    pub fn from_hex(s: &str) -> Result<Self, ColorError> {
        let digits = s
            .strip_prefix('#')
            .ok_or_else(|| ColorError::MissingHash(s.to_string()))?;
        if digits.len() != 6 {
            return Err(ColorError::BadLength(digits.len()));
        }
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorError::BadDigit(s.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| ColorError::BadDigit(s.to_string()))
        };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Add `amount` to every channel, saturating at 255.
    pub fn lighten(self, amount: u8) -> Self {
        Self::new(
            self.r.saturating_add(amount),
            self.g.saturating_add(amount),
            self.b.saturating_add(amount),
        )
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Straight (non-premultiplied) color with a fractional alpha.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub rgb: Rgb,
    pub a: f64,
}

impl Rgba {
    pub const fn opaque(rgb: Rgb) -> Self {
        Self { rgb, a: 1.0 }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a >= 1.0 {
            return self.rgb.fmt(f);
        }
        write!(
            f,
            "rgba({}, {}, {}, {})",
            self.rgb.r, self.rgb.g, self.rgb.b, self.a
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Color {
    Rgba(Rgba),
    /// Any CSS color the caller handed us that we did not parse.
    Css(String),
}

impl Color {
    pub fn rgb(rgb: Rgb) -> Self {
        Color::Rgba(Rgba::opaque(rgb))
    }

    pub fn to_css(&self) -> String {
        match self {
            Color::Rgba(c) => c.to_string(),
            Color::Css(s) => s.clone(),
        }
    }

    /// Best-effort conversion to a concrete color for software surfaces.
    pub fn resolve(&self) -> Option<Rgba> {
        match self {
            Color::Rgba(c) => Some(*c),
            Color::Css(s) => parse_css(s),
        }
    }
}

// Handles hex, rgb()/rgba() and a handful of named colors; enough for what a
// face color is realistically set to.
fn parse_css(s: &str) -> Option<Rgba> {
    let s = s.trim();
    if s.starts_with('#') {
        return Rgb::from_hex(s).ok().map(Rgba::opaque);
    }
    let lower = s.to_ascii_lowercase();
    if let Some(args) = lower
        .strip_prefix("rgba(")
        .or_else(|| lower.strip_prefix("rgb("))
        .and_then(|rest| rest.strip_suffix(')'))
    {
        let parts: Vec<&str> = args.split(',').map(str::trim).collect();
        if parts.len() != 3 && parts.len() != 4 {
            return None;
        }
        let channel = |p: &str| p.parse::<f64>().ok().map(|v| v.clamp(0.0, 255.0) as u8);
        let rgb = Rgb::new(channel(parts[0])?, channel(parts[1])?, channel(parts[2])?);
        let a = match parts.get(3) {
            Some(p) => p.parse::<f64>().ok()?.clamp(0.0, 1.0),
            None => 1.0,
        };
        return Some(Rgba { rgb, a });
    }
    let rgb = match lower.as_str() {
        "white" => Rgb::WHITE,
        "black" => Rgb::new(0, 0, 0),
        "red" => Rgb::new(255, 0, 0),
        "green" => Rgb::new(0, 128, 0),
        "blue" => Rgb::new(0, 0, 255),
        "yellow" => Rgb::new(255, 255, 0),
        "orange" => Rgb::new(255, 165, 0),
        "pink" => Rgb::new(255, 192, 203),
        "purple" => Rgb::new(128, 0, 128),
        "gray" | "grey" => Rgb::new(128, 128, 128),
        _ => return None,
    };
    Some(Rgba::opaque(rgb))
}

/// Fills derived from the caller's face color.
#[derive(Clone, Debug, PartialEq)]
pub struct FacePalette {
    /// Gradient stop at half the face radius.
    pub inner: Color,
    /// Gradient stop at the face edge; also the eyelid fill.
    pub skin: Color,
    pub sclera: Color,
    pub feature: Color,
    pub glint: Color,
}

impl FacePalette {
    pub fn from_color(color: Option<&str>) -> Self {
        let (inner, skin) = match color.filter(|c| !c.is_empty()) {
            None => (Color::rgb(Rgb::WHITE), Color::rgb(Rgb::WHITE)),
            Some(c) if c.starts_with('#') => match Rgb::from_hex(c) {
                Ok(rgb) => (Color::rgb(lighten(rgb)), Color::rgb(rgb)),
                Err(e) => {
                    log::debug!("face color {c:?} not lightened: {e}");
                    (Color::Css(c.to_string()), Color::Css(c.to_string()))
                }
            },
            Some(c) => (Color::Css(c.to_string()), Color::Css(c.to_string())),
        };
        Self {
            inner,
            skin,
            sclera: Color::Css(SCLERA_HEX.to_string()),
            feature: Color::Css(FEATURE_HEX.to_string()),
            glint: Color::Rgba(Rgba {
                rgb: Rgb::WHITE,
                a: crate::constants::GLINT_ALPHA,
            }),
        }
    }
}

/// The lighter gradient stop for a hex face color.
pub fn lighten(rgb: Rgb) -> Rgb {
    rgb.lighten(LIGHTEN_OFFSET)
}
