//! Palette generation for ledger activities.
//!
//! Every derivation steps the base hue by the golden ratio conjugate, so consecutive palettes
//! start from well spread hues. The rest of the palette is spread evenly around the wheel from
//! that base.

use std::{fmt::Display, str::FromStr};

use anyhow::anyhow;
use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

const GOLDEN_RATIO_CONJUGATE: f64 = 0.618033988749895;

/// Color of the "remaining hours" row. Not part of any palette.
pub const CAPACITY_COLOR: Color = Color::rgb(0xDC, 0xDC, 0xDC);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Converts a hue (degrees, any range) at full saturation and value.
    pub fn from_hue(hue: f64) -> Self {
        Self::from_hsv(hue, 1., 1.)
    }

    pub fn from_hsv(hue: f64, saturation: f64, value: f64) -> Self {
        let hue = hue.rem_euclid(360.);
        let chroma = value * saturation;
        let sector = hue / 60.;
        let x = chroma * (1. - (sector.rem_euclid(2.) - 1.).abs());
        let (r, g, b) = match sector as u32 {
            0 => (chroma, x, 0.),
            1 => (x, chroma, 0.),
            2 => (0., chroma, x),
            3 => (0., x, chroma),
            4 => (x, 0., chroma),
            _ => (chroma, 0., x),
        };
        let m = value - chroma;
        let channel = |v: f64| ((v + m) * 255.).round().clamp(0., 255.) as u8;
        Self::rgb(channel(r), channel(g), channel(b))
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .strip_prefix('#')
            .filter(|v| v.len() == 6 && v.is_ascii())
            .ok_or_else(|| anyhow!("Can't parse {s} into a color"))?;
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16);
        Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Produces analogous palettes. Copying the assigner copies its position in the hue sequence, so
/// a ledger snapshot carries everything needed to derive its next palette.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorAssigner {
    position: f64,
}

impl ColorAssigner {
    /// Starts the hue sequence at a random point.
    pub fn random() -> Self {
        Self::seeded(rand::thread_rng().gen::<f64>())
    }

    /// Starts the hue sequence at `seed`, taken modulo 1.
    pub fn seeded(seed: f64) -> Self {
        let position = if seed.is_finite() {
            seed.rem_euclid(1.)
        } else {
            0.
        };
        Self { position }
    }

    /// Advances the sequence and returns the new base hue in degrees.
    pub fn next_base_hue(&mut self) -> f64 {
        self.position = (self.position + GOLDEN_RATIO_CONJUGATE) % 1.;
        self.position * 360.
    }

    /// Returns `count` colors starting from a freshly chosen base hue.
    pub fn palette(&mut self, count: usize) -> Vec<Color> {
        let base = self.next_base_hue();
        analogous_scheme(base, count)
    }
}

/// `count` hues equally spaced around the wheel, excluding the base itself.
pub fn analogous_scheme(base_hue: f64, count: usize) -> Vec<Color> {
    let step = 360. / (count as f64 + 1.);
    (1..=count)
        .map(|k| Color::from_hue(base_hue + step * k as f64))
        .collect()
}
