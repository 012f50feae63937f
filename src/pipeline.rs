//! The two-pass build: measure every glyph, then place every glyph.
use std::path::Path;

use kurbo::Rect;
#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::{
    fit::GlyphFitter,
    font::{FontRecord, SvgFont},
    frame::{CorpusStatistics, NormalizationFrame},
    path,
    source::{scan_directory, Glyph, GlyphSource},
    width::WidthClass,
    FontOptions, IconFontError,
};

/// A glyph together with its source-space bounding box
#[derive(Debug, Clone)]
pub struct MeasuredGlyph {
    pub glyph: Glyph,
    pub bbox: Rect,
}

/// Read and measure every source, dropping the ones that cannot take part.
///
/// Unreadable or malformed files are logged and skipped; they never fail the
/// batch.
pub fn measure(sources: &[GlyphSource]) -> Vec<MeasuredGlyph> {
    let mut measured = Vec::with_capacity(sources.len());
    for source in sources {
        let glyph = match source.load() {
            Ok(Some(glyph)) => glyph,
            Ok(None) => {
                log::info!("Skipping {}: no path data", source.file_name);
                continue;
            }
            Err(e) => {
                log::warn!("Failed to process {}: {}", source.file_name, e);
                continue;
            }
        };
        match path::bounding_box(&glyph.tokens) {
            Some(bbox) => measured.push(MeasuredGlyph { glyph, bbox }),
            None => log::info!("Skipping {}: no coordinates", source.file_name),
        }
    }
    measured
}

/// Derive the shared frame from every measured glyph.
pub fn normalization_frame(
    glyphs: &[MeasuredGlyph],
    options: &FontOptions,
) -> Result<NormalizationFrame, IconFontError> {
    let crop = glyphs
        .iter()
        .map(|g| g.bbox)
        .collect::<CorpusStatistics>()
        .crop_box(options.trim)?;
    let frame = NormalizationFrame::from_crop_box(crop, options.canvas_size());
    log::info!(
        "Crop box X=[{:.2}, {:.2}] Y=[{:.2}, {:.2}], square side {:.2}",
        crop.x0,
        crop.x1,
        crop.y0,
        crop.y1,
        frame.square_size
    );
    Ok(frame)
}

/// Fit one glyph into its advance box and rewrite its path.
pub fn place(
    measured: &MeasuredGlyph,
    fitter: &GlyphFitter,
    frame: &NormalizationFrame,
    options: &FontOptions,
) -> FontRecord {
    let class = WidthClass::of(measured.glyph.code_point);
    let plan = fitter.plan(measured.bbox, class);
    if plan.scale_factor < 1.0 {
        let placed = plan.apply(frame, measured.bbox);
        log::debug!(
            "Shrinking {} by {:.3} to fit its advance: X=[{:.2}, {:.2}] of {}",
            measured.glyph.source,
            plan.scale_factor,
            placed.x0,
            placed.x1,
            plan.advance_width
        );
    }
    FontRecord {
        glyph_name: format!("{}{:04X}", options.glyph_prefix, measured.glyph.code_point),
        code_point: measured.glyph.code_point,
        advance_width: plan.advance_width,
        path_data: path::emit(&measured.glyph.tokens, frame, &plan),
    }
}

/// Build a font from already measured glyphs.
///
/// Records keep the order of `glyphs` whether or not placement runs in
/// parallel.
pub fn assemble(
    glyphs: &[MeasuredGlyph],
    options: &FontOptions,
) -> Result<SvgFont, IconFontError> {
    let frame = normalization_frame(glyphs, options)?;
    let fitter = GlyphFitter::new(&frame, options.margin, options.advance_mode);

    #[cfg(feature = "rayon")]
    let records: Vec<FontRecord> = glyphs
        .par_iter()
        .map(|g| place(g, &fitter, &frame, options))
        .collect();
    #[cfg(not(feature = "rayon"))]
    let records: Vec<FontRecord> = glyphs
        .iter()
        .map(|g| place(g, &fitter, &frame, options))
        .collect();

    let mut font = SvgFont::new(options);
    for record in records {
        font.push(record);
    }
    Ok(font)
}

/// Build a font from every code-point-named SVG file in `input_dir`.
pub fn build_font(
    input_dir: impl AsRef<Path>,
    options: &FontOptions,
) -> Result<SvgFont, IconFontError> {
    options.validate()?;
    let sources = scan_directory(input_dir.as_ref())?;
    log::info!(
        "Found {} glyph files in {}",
        sources.len(),
        input_dir.as_ref().display()
    );
    let measured = measure(&sources);
    assemble(&measured, options)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::path::tokenize;

    fn measured(code_point: u32, data: &str) -> MeasuredGlyph {
        let tokens = tokenize(data);
        let bbox = path::bounding_box(&tokens).unwrap();
        MeasuredGlyph {
            glyph: Glyph {
                code_point,
                tokens,
                source: format!("U+{:04X}.svg", code_point),
            },
            bbox,
        }
    }

    #[test]
    fn test_assemble_empty_corpus() {
        assert!(matches!(
            assemble(&[], &FontOptions::default()),
            Err(IconFontError::EmptyCorpus)
        ));
    }

    #[test]
    fn test_assemble_keeps_order_and_classes() {
        let glyphs = vec![
            measured(0x4E00, "M 0 0 L 100 100 Z"),
            measured(0x41, "M 0 0 L 40 100 Z"),
            measured(0x4E01, "M 10 10 L 90 90 Z"),
        ];
        let font = assemble(&glyphs, &FontOptions::default()).unwrap();
        let names: Vec<&str> = font.records.iter().map(|r| r.glyph_name.as_str()).collect();
        assert_eq!(names, vec!["icon_4E00", "icon_0041", "icon_4E01"]);
        assert_eq!(font.records[0].advance_width, 300.0);
        assert_eq!(font.records[1].advance_width, 150.0);
    }

    #[test]
    fn test_single_wide_glyph_path() {
        // Frame: square 100, origin (0, -25), scale 3. The glyph is 300
        // units wide, more than the 270 usable, so it is shrunk by 0.9.
        let font = assemble(&[measured(0x4E00, "M 0 0 L 100 50 Z")], &FontOptions::default())
            .unwrap();
        assert_eq!(font.records[0].path_data, "M 15.00 217.50 L 285.00 82.50 Z");
        assert_eq!(font.records[0].advance_width, 300.0);
    }

    #[test]
    fn test_emitted_path_matches_planned_box() {
        let glyphs = vec![
            measured(0x4E00, "M 0 0 L 100 100"),
            measured(0x41, "M 10 20 L 60 90"),
            measured(0x4E02, "M 0 0 L 400 10"),
        ];
        let options = FontOptions::default();
        let frame = normalization_frame(&glyphs, &options).unwrap();
        let fitter = GlyphFitter::new(&frame, options.margin, options.advance_mode);
        for g in &glyphs {
            let plan = fitter.plan(g.bbox, WidthClass::of(g.glyph.code_point));
            let expected = plan.apply(&frame, g.bbox);
            let record = place(g, &fitter, &frame, &options);
            let operands: Vec<f64> = tokenize(&record.path_data)
                .iter()
                .filter_map(|t| match t {
                    path::Token::Operand(v) => Some(*v),
                    path::Token::Command(_) => None,
                })
                .collect();
            let xs: Vec<f64> = operands.iter().step_by(2).cloned().collect();
            let ys: Vec<f64> = operands.iter().skip(1).step_by(2).cloned().collect();
            let min = |v: &[f64]| v.iter().cloned().fold(f64::MAX, f64::min);
            let max = |v: &[f64]| v.iter().cloned().fold(f64::MIN, f64::max);
            assert!((min(&xs) - expected.x0).abs() < 0.01, "{}", record.glyph_name);
            assert!((max(&xs) - expected.x1).abs() < 0.01, "{}", record.glyph_name);
            assert!((min(&ys) - expected.y0).abs() < 0.01, "{}", record.glyph_name);
            assert!((max(&ys) - expected.y1).abs() < 0.01, "{}", record.glyph_name);
        }
    }

    #[test]
    fn test_outlier_is_shrunk_into_advance() {
        let glyphs = vec![
            measured(0x4E00, "M 0 0 L 100 100"),
            measured(0x4E01, "M 0 0 L 100 100"),
            measured(0x4E02, "M 0 0 L 1000 10"),
        ];
        let font = assemble(&glyphs, &FontOptions::default()).unwrap();
        let xs: Vec<f64> = tokenize(&font.records[2].path_data)
            .iter()
            .filter_map(|t| match t {
                path::Token::Operand(v) => Some(*v),
                path::Token::Command(_) => None,
            })
            .step_by(2)
            .collect();
        let width = xs.iter().cloned().fold(f64::MIN, f64::max)
            - xs.iter().cloned().fold(f64::MAX, f64::min);
        assert!(width <= 270.0 + 0.01);
    }
}
