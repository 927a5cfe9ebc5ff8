use std::collections::BTreeMap;

use crate::foundation::{
    core::Rgba8,
    error::{HeartwaveError, HeartwaveResult},
};

/// Palette key of the background fill.
pub const BG_KEY: &str = "bg";
/// Palette key of the default primary stroke.
pub const STROKE_KEY: &str = "stroke";
/// Palette key of the default secondary stroke.
pub const STROKE2_KEY: &str = "stroke2";

const DEFAULT_BG: Rgba8 = Rgba8::opaque(0xff, 0xff, 0xff);
const DEFAULT_STROKE: Rgba8 = Rgba8::opaque(0x34, 0x55, 0x3c);
const DEFAULT_STROKE2: Rgba8 = Rgba8::opaque(0x5b, 0xd4, 0x4c);

/// Named colors referenced by wave types through `color_key`.
///
/// Deserializing a partial map keeps the default entries for keys it does not mention.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(from = "BTreeMap<String, String>", into = "BTreeMap<String, String>")]
pub struct Palette {
    colors: BTreeMap<String, String>,
}

impl Default for Palette {
    fn default() -> Self {
        let colors = [
            (BG_KEY, DEFAULT_BG),
            (STROKE_KEY, DEFAULT_STROKE),
            (STROKE2_KEY, DEFAULT_STROKE2),
        ]
        .into_iter()
        .map(|(k, c)| (k.to_owned(), c.to_hex_rgb()))
        .collect();
        Self { colors }
    }
}

impl From<BTreeMap<String, String>> for Palette {
    fn from(entries: BTreeMap<String, String>) -> Self {
        let mut p = Self::default();
        p.colors.extend(entries);
        p
    }
}

impl From<Palette> for BTreeMap<String, String> {
    fn from(p: Palette) -> Self {
        p.colors
    }
}

impl Palette {
    /// Raw color string for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.colors.get(key).map(String::as_str)
    }

    /// Parsed color for `key`; `None` when missing or malformed.
    pub fn color(&self, key: &str) -> Option<Rgba8> {
        self.get(key).and_then(|s| parse_hex_color(s).ok())
    }

    /// Insert or replace `key`, rejecting malformed colors.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> HeartwaveResult<()> {
        let value = value.into();
        parse_hex_color(&value).map_err(HeartwaveError::validation)?;
        self.colors.insert(key.into(), value);
        Ok(())
    }

    /// Background fill.
    pub fn background(&self) -> Rgba8 {
        self.color(BG_KEY).unwrap_or(DEFAULT_BG)
    }

    /// Stroke color for a wave type, falling back to the default stroke for unknown keys.
    pub fn stroke_color(&self, key: &str) -> Rgba8 {
        match self.color(key) {
            Some(c) => c,
            None => {
                tracing::trace!(key, "palette has no usable color; using default stroke");
                DEFAULT_STROKE
            }
        }
    }

    /// Keys from `keys` that have no usable color here, in input order.
    pub fn missing_keys<'a>(&self, keys: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
        keys.into_iter()
            .filter(|k| self.color(k).is_none())
            .collect()
    }

    /// Every key in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.colors.keys().map(String::as_str)
    }

    /// Reject entries that are not `#rrggbb` / `#rrggbbaa`.
    pub fn validate(&self) -> HeartwaveResult<()> {
        for (k, v) in &self.colors {
            parse_hex_color(v)
                .map_err(|e| HeartwaveError::validation(format!("palette '{k}': {e}")))?;
        }
        Ok(())
    }
}

/// Parse `#rrggbb` or `#rrggbbaa` (leading `#` optional, case-insensitive).
pub fn parse_hex_color(s: &str) -> Result<Rgba8, String> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);

    fn hex_byte(pair: &str) -> Result<u8, String> {
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }

    if !s.is_ascii() {
        return Err("hex color must be ASCII".to_owned());
    }
    match s.len() {
        6 => Ok(Rgba8::opaque(
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
        )),
        8 => Ok(Rgba8 {
            r: hex_byte(&s[0..2])?,
            g: hex_byte(&s[2..4])?,
            b: hex_byte(&s[4..6])?,
            a: hex_byte(&s[6..8])?,
        }),
        _ => Err("hex color must be #RRGGBB or #RRGGBBAA (case-insensitive)".to_owned()),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/palette.rs"]
mod tests;
