//! Domain-specific types shared by the leveler and the stack host

use crate::error::LevelError;
use image::ColorType;
use std::fmt;
use std::str::FromStr;

/// Sample encoding of a slice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    Gray8,
    Gray16,
    Gray32,
    Rgb,
}

impl Encoding {
    /// Bytes per pixel in the raw little-endian layout
    #[inline]
    #[must_use]
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Gray8 => 1,
            Self::Gray16 => 2,
            Self::Gray32 => 4,
            Self::Rgb => 3,
        }
    }

    /// White level of a single channel
    #[inline]
    #[must_use]
    pub fn white_level(self) -> f64 {
        match self {
            Self::Gray8 | Self::Rgb => f64::from(u8::MAX),
            Self::Gray16 => f64::from(u16::MAX),
            Self::Gray32 => 1.0,
        }
    }
}

impl FromStr for Encoding {
    type Err = LevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gray8" | "8" => Ok(Self::Gray8),
            "gray16" | "16" => Ok(Self::Gray16),
            "gray32" | "32" | "float" => Ok(Self::Gray32),
            "rgb" | "rgb24" => Ok(Self::Rgb),
            other => Err(LevelError::UnsupportedEncoding(other.to_string())),
        }
    }
}

impl TryFrom<ColorType> for Encoding {
    type Error = LevelError;

    fn try_from(color: ColorType) -> Result<Self, Self::Error> {
        match color {
            ColorType::L8 => Ok(Self::Gray8),
            ColorType::L16 => Ok(Self::Gray16),
            ColorType::Rgb8 | ColorType::Rgba8 => Ok(Self::Rgb),
            other => Err(LevelError::UnsupportedEncoding(format!("{other:?}"))),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gray8 => write!(f, "gray8"),
            Self::Gray16 => write!(f, "gray16"),
            Self::Gray32 => write!(f, "gray32"),
            Self::Rgb => write!(f, "rgb"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[inline]
    #[must_use]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    #[inline]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

impl FromStr for Dimensions {
    type Err = String;

    /// Parses `WIDTHxHEIGHT`, e.g. `512x512`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s
            .split_once(['x', 'X'])
            .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
        let width = w.trim().parse::<u32>().map_err(|e| format!("invalid width '{w}': {e}"))?;
        let height = h.trim().parse::<u32>().map_err(|e| format!("invalid height '{h}': {e}"))?;

        let dimensions = Self::new(width, height);
        if !dimensions.is_valid() {
            return Err(format!("dimensions must be non-zero, got '{s}'"));
        }
        Ok(dimensions)
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{width}x{height}", width = self.width, height = self.height)
    }
}

/// Observed (min, max) of one channel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleRange {
    pub min: f64,
    pub max: f64,
}

impl SampleRange {
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    #[inline]
    #[must_use]
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Scale factor mapping this range onto `[0, white]`
    #[inline]
    #[must_use]
    pub fn gradient(&self, white: f64) -> f64 {
        white / self.span()
    }
}

impl fmt::Display for SampleRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{min}, {max}]", min = self.min, max = self.max)
    }
}
