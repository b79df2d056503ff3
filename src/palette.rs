//! Series color assignment.
//!
//! An explicit color hint always wins; otherwise colors cycle through an ordered
//! palette by index. The palette is a value handed in by the caller, so tests and
//! embedders can swap it without touching shared state.

use crate::models::RawDataset;
use thiserror::Error;

/// Default widget palette, in assignment order.
pub const DEFAULT_PALETTE: [&str; 6] = [
    "#05abf3", // sky blue
    "#f3b4b7", // blush
    "#fdbf16", // amber
    "#4db3e5", // light blue
    "#756fd7", // violet
    "#e189b5", // pink
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaletteError {
    #[error("palette must contain at least one color")]
    Empty,
}

/// Ordered, non-empty list of color tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<String>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl Palette {
    /// Build a palette from tokens; blank tokens are dropped.
    pub fn new<I, S>(tokens: I) -> Result<Self, PaletteError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let colors: Vec<String> = tokens
            .into_iter()
            .map(Into::into)
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect();
        if colors.is_empty() {
            return Err(PaletteError::Empty);
        }
        Ok(Self { colors })
    }

    /// Parse a `#a,#b;#c` style list.
    pub fn parse(list: &str) -> Result<Self, PaletteError> {
        Self::new(list.split([',', ';']))
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Palette entry at `idx`, cycling past the end.
    #[inline]
    pub fn color_at(&self, idx: usize) -> &str {
        &self.colors[idx % self.colors.len()]
    }

    /// `hint` if it is non-blank, else the palette entry at `idx`.
    pub fn resolve(&self, hint: Option<&str>, idx: usize) -> String {
        match hint {
            Some(h) if !h.trim().is_empty() => h.to_string(),
            _ => self.color_at(idx).to_string(),
        }
    }

    /// Color for the `idx`-th dataset of a chart.
    pub fn color_for(&self, dataset: &RawDataset, idx: usize) -> String {
        self.resolve(dataset.color_hint.as_ref().and_then(|h| h.series()), idx)
    }
}

/// Parse `#rrggbb` or `#rgb` into components.
pub fn parse_hex(token: &str) -> Option<(u8, u8, u8)> {
    let hex = token.trim().strip_prefix('#').filter(|h| h.is_ascii())?;
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        6 => Some((channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?)),
        3 => {
            let mut out = [0u8; 3];
            for (slot, ch) in out.iter_mut().zip(hex.chars()) {
                let v = ch.to_digit(16)? as u8;
                *slot = v * 16 + v;
            }
            Some((out[0], out[1], out[2]))
        }
        _ => None,
    }
}
