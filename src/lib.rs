//! # iconfont
//!
//! Turns a directory of single-glyph SVG icons into one SVG font.
//!
//! Each input file is named after the code point it draws (`U+4E00.svg`).
//! The `d` attributes of its paths are tokenized, and every glyph is moved
//! into one shared coordinate frame so the whole set keeps consistent
//! relative sizes:
//!
//! 1. **Measure.** Each glyph's bounding box is computed from its operands.
//! 2. **Frame.** The boxes of all glyphs are trimmed at the 5th/95th
//!    percentile per axis, and the larger side of the result becomes the
//!    square that is mapped onto the em.
//! 3. **Fit.** Each glyph is centred in an advance box chosen by its width
//!    class (full width for CJK, kana and Hangul, half width otherwise) and
//!    shrunk only if it would not fit.
//! 4. **Emit.** Operands are rewritten, y flipped, and the glyphs are written
//!    as an SVG `<font>` in file name order.
//!
//! ```no_run
//! use iconfont::{build_font, FontOptions, IconFontError};
//!
//! fn main() -> Result<(), IconFontError> {
//!     let options = FontOptions::default();
//!     let font = build_font("unicode_svgs", &options)?;
//!     font.save("final_font/icons.svg")?;
//!     Ok(())
//! }
//! ```
//!
//! Path commands are never interpreted: relative commands, arcs and
//! single-operand commands such as `H` are passed through with their
//! operands treated as alternating x/y coordinates.
#![deny(clippy::unwrap_used, clippy::expect_used)]

mod error;
pub mod fit;
mod font;
pub mod frame;
mod options;
pub mod path;
pub mod pipeline;
pub mod rename;
pub mod source;
mod width;

pub use crate::{
    error::IconFontError,
    fit::{GlyphFitPlan, GlyphFitter},
    font::{FontRecord, SvgFont},
    frame::{CorpusStatistics, NormalizationFrame},
    options::{AdvanceMode, FontOptions},
    path::Token,
    pipeline::build_font,
    source::Glyph,
    width::WidthClass,
};
