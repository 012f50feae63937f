use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IconFontError {
    #[error("No glyph in the corpus has usable path data; cannot derive a normalization frame")]
    EmptyCorpus,

    #[error("Input path {path:?} is not a directory")]
    NotADirectory { path: PathBuf },

    #[error("Error parsing SVG file {path:?}: {source}")]
    Xml {
        path: PathBuf,
        #[source]
        source: roxmltree::Error,
    },

    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    #[error("Error reading options file: {0}")]
    Options(#[from] serde_json::Error),

    #[error("IO Error: {0}")]
    IO(#[from] io::Error),
}
