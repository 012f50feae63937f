//! Copying arbitrarily named icon files to code-point file names.
//!
//! `A.svg` becomes `U+0041.svg`, `%22.svg` becomes `U+0022.svg`, `ab.svg`
//! becomes `U+0061_U+0062.svg`, and a duplicate such as `一-1.svg` keeps its
//! numeric suffix: `U+4E00-1.svg`.
use std::{fs, path::Path, sync::LazyLock};

use percent_encoding::percent_decode_str;
use regex::Regex;

use crate::IconFontError;

static SUFFIX_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)] // Safe because the regex is valid
    Regex::new(r"^(?P<name>.+?)(?P<suffix>-\d+)$").unwrap()
});

static CANONICAL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)] // Safe because the regex is valid
    Regex::new(r"^U\+[0-9A-Fa-f]{4,}(?:_[Uu]\+[0-9A-Fa-f]{4,})*$").unwrap()
});

/// The canonical form of a file stem (the name without `.svg`).
///
/// Returns `None` if nothing is left to name once the suffix is removed.
pub fn canonical_stem(stem: &str) -> Option<String> {
    let (name, suffix) = match SUFFIX_REGEX.captures(stem) {
        Some(caps) => (
            caps.name("name").map_or("", |m| m.as_str()),
            caps.name("suffix").map_or("", |m| m.as_str()),
        ),
        None => (stem, ""),
    };
    if CANONICAL_REGEX.is_match(name) {
        return Some(format!("{}{}", name, suffix));
    }
    let decoded = percent_decode_str(name).decode_utf8_lossy();
    if decoded.is_empty() {
        return None;
    }
    let parts = decoded
        .chars()
        .map(|c| format!("U+{:04X}", u32::from(c)))
        .collect::<Vec<_>>();
    Some(format!("{}{}", parts.join("_"), suffix))
}

/// Outcome of [`rename_directory`]
#[derive(Debug, Default)]
pub struct RenameReport {
    pub copied: usize,
    /// File name and reason for every file that was not copied
    pub failures: Vec<(String, String)>,
}

/// Copy every `.svg` file directly inside `input` into `output` under its
/// canonical name. `output` is created if needed. Per-file problems are
/// collected in the report rather than aborting the run.
pub fn rename_directory(input: &Path, output: &Path) -> Result<RenameReport, IconFontError> {
    if !input.is_dir() {
        return Err(IconFontError::NotADirectory {
            path: input.to_path_buf(),
        });
    }
    fs::create_dir_all(output)?;

    let mut files = vec![];
    for entry in fs::read_dir(input)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            if name.ends_with(".svg") {
                files.push(name.to_string());
            }
        }
    }
    files.sort();
    log::info!("Found {} SVG files in {}", files.len(), input.display());

    let mut report = RenameReport::default();
    for file_name in files {
        let stem = file_name.strip_suffix(".svg").unwrap_or(&file_name);
        let Some(new_stem) = canonical_stem(stem) else {
            report
                .failures
                .push((file_name, "cannot derive a code point name".to_string()));
            continue;
        };
        let target = output.join(format!("{}.svg", new_stem));
        match fs::copy(input.join(&file_name), &target) {
            Ok(_) => {
                log::debug!("Copied {} -> {}", file_name, target.display());
                report.copied += 1;
                if report.copied % 100 == 0 {
                    log::info!("Copied {} files...", report.copied);
                }
            }
            Err(e) => report.failures.push((file_name, e.to_string())),
        }
    }
    Ok(report)
}
