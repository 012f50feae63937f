use std::{path::Path, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::IconFontError;

// Written unescaped into `id`, `font-family` and `glyph-name` attributes
static FONT_ID_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)] // Safe because the regex is valid
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_.-]*$").unwrap()
});

static GLYPH_PREFIX_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)] // Safe because the regex is valid
    Regex::new(r"^[A-Za-z0-9_.-]*$").unwrap()
});

/// How a glyph's advance width is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AdvanceMode {
    /// Fixed advance from the code point's width class; glyphs are centred
    /// and shrunk if they are too wide
    #[default]
    WidthClass,
    /// Advance is the glyph's ink width plus a margin on each side
    Proportional,
}

/// Settings for one font build
///
/// Can be read from a JSON file; missing keys take their default values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FontOptions {
    /// Font `id` and `font-family`
    pub font_id: String,
    /// Units per em; also the ascent and the full-width advance
    pub units_per_em: u16,
    pub descent: i16,
    /// Units kept free on either side of a glyph's ink
    pub margin: f64,
    /// Fraction of glyphs ignored at each end of each axis when sizing the
    /// shared frame
    pub trim: f64,
    pub advance_mode: AdvanceMode,
    /// Prefix for generated glyph names
    pub glyph_prefix: String,
}

impl Default for FontOptions {
    fn default() -> Self {
        FontOptions {
            font_id: "MyFont".to_string(),
            units_per_em: 300,
            descent: 0,
            margin: 15.0,
            trim: 0.05,
            advance_mode: AdvanceMode::default(),
            glyph_prefix: "icon_".to_string(),
        }
    }
}

impl FontOptions {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, IconFontError> {
        let buffered = std::io::BufReader::new(std::fs::File::open(path.as_ref())?);
        let options: FontOptions = serde_json::from_reader(buffered)?;
        options.validate()?;
        Ok(options)
    }

    pub fn canvas_size(&self) -> f64 {
        f64::from(self.units_per_em)
    }

    pub fn validate(&self) -> Result<(), IconFontError> {
        if self.units_per_em == 0 {
            return Err(IconFontError::InvalidOptions(
                "units-per-em must be positive".to_string(),
            ));
        }
        if !(0.0..0.5).contains(&self.trim) {
            return Err(IconFontError::InvalidOptions(format!(
                "trim must be in [0, 0.5), got {}",
                self.trim
            )));
        }
        // The narrowest advance box still needs room for some ink
        let half_width = self.canvas_size() / 2.0;
        if !self.margin.is_finite() || self.margin < 0.0 || 2.0 * self.margin >= half_width {
            return Err(IconFontError::InvalidOptions(format!(
                "margin {} leaves no usable width in a {} unit half-width advance",
                self.margin, half_width
            )));
        }
        if !FONT_ID_REGEX.is_match(&self.font_id) {
            return Err(IconFontError::InvalidOptions(format!(
                "font id {:?} must be a letter or '_' followed by letters, digits, '_', '.' or '-'",
                self.font_id
            )));
        }
        if !GLYPH_PREFIX_REGEX.is_match(&self.glyph_prefix) {
            return Err(IconFontError::InvalidOptions(format!(
                "glyph prefix {:?} may only contain letters, digits, '_', '.' or '-'",
                self.glyph_prefix
            )));
        }
        Ok(())
    }
}
