//! Discovering and reading the SVG icon files of a corpus.
use std::{
    fs,
    path::{Path, PathBuf},
    sync::LazyLock,
};

use regex::Regex;
use roxmltree::{Document, ParsingOptions};

use crate::{
    path::{tokenize, Token},
    IconFontError,
};

static CODE_POINT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    // Expected format: anything containing U+<hex>, e.g. "U+4E00.svg" or "u+41-2.svg"
    #[allow(clippy::unwrap_used)] // Safe because the regex is valid
    Regex::new(r"[Uu]\+(?P<hex>[0-9A-Fa-f]+)").unwrap()
});

/// A file in the input directory whose name encodes a code point
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphSource {
    pub path: PathBuf,
    pub file_name: String,
    pub code_point: u32,
}

/// A tokenized glyph, ready to be measured and placed
#[derive(Debug, Clone)]
pub struct Glyph {
    pub code_point: u32,
    pub tokens: Vec<Token>,
    /// The file the glyph was read from
    pub source: String,
}

/// The code point named by a file name, if any.
///
/// Only the first `U+` group counts. Names whose hex digits overflow a
/// `u32` are treated as not matching.
pub fn code_point_from_name(file_name: &str) -> Option<u32> {
    let caps = CODE_POINT_REGEX.captures(file_name)?;
    u32::from_str_radix(&caps["hex"], 16).ok()
}

/// Every code-point-named `.svg` file directly inside `dir`, in file name
/// order.
pub fn scan_directory(dir: &Path) -> Result<Vec<GlyphSource>, IconFontError> {
    if !dir.is_dir() {
        return Err(IconFontError::NotADirectory {
            path: dir.to_path_buf(),
        });
    }
    let mut sources = vec![];
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() || path.extension().is_none_or(|ext| ext != "svg") {
            continue;
        }
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let Some(code_point) = code_point_from_name(file_name) else {
            log::debug!("Skipping {}: no code point in file name", file_name);
            continue;
        };
        if char::from_u32(code_point).is_none() {
            log::warn!(
                "Skipping {}: U+{:04X} is not a Unicode scalar value",
                file_name,
                code_point
            );
            continue;
        }
        sources.push(GlyphSource {
            file_name: file_name.to_string(),
            path,
            code_point,
        });
    }
    sources.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    Ok(sources)
}

/// The `d` attributes of every `<path>` element, space-joined.
///
/// Paths are matched by local name, so both namespaced and bare SVG
/// documents work.
pub fn path_data(svg: &str) -> Result<String, roxmltree::Error> {
    let doc = Document::parse_with_options(
        svg,
        ParsingOptions {
            allow_dtd: true,
            ..ParsingOptions::default()
        },
    )?;
    let data = doc
        .descendants()
        .filter(|node| node.is_element() && node.tag_name().name() == "path")
        .map(|node| node.attribute("d").unwrap_or_default())
        .collect::<Vec<_>>()
        .join(" ");
    Ok(data)
}

impl GlyphSource {
    /// Read and tokenize the file.
    ///
    /// Returns `Ok(None)` if the file has no path data at all.
    pub fn load(&self) -> Result<Option<Glyph>, IconFontError> {
        let svg = fs::read_to_string(&self.path)?;
        let data = path_data(&svg).map_err(|source| IconFontError::Xml {
            path: self.path.clone(),
            source,
        })?;
        if data.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(Glyph {
            code_point: self.code_point,
            tokens: tokenize(&data),
            source: self.file_name.clone(),
        }))
    }
}
