//! Corpus-wide statistics and the shared normalization frame.
use kurbo::{Point, Rect};
use ordered_float::OrderedFloat;

use crate::IconFontError;

/// Per-axis extents of every glyph in the corpus, kept sorted so that
/// percentile cut points can be read off directly.
///
/// Each axis is sorted independently: the fifth-smallest `min_x` and the
/// fifth-smallest `min_y` need not come from the same glyph.
#[derive(Debug, Default)]
pub struct CorpusStatistics {
    min_x: Vec<OrderedFloat<f64>>,
    max_x: Vec<OrderedFloat<f64>>,
    min_y: Vec<OrderedFloat<f64>>,
    max_y: Vec<OrderedFloat<f64>>,
}

impl CorpusStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one glyph's bounding box
    pub fn add(&mut self, bbox: Rect) {
        self.min_x.push(OrderedFloat(bbox.x0));
        self.max_x.push(OrderedFloat(bbox.x1));
        self.min_y.push(OrderedFloat(bbox.y0));
        self.max_y.push(OrderedFloat(bbox.y1));
    }

    pub fn len(&self) -> usize {
        self.min_x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.min_x.is_empty()
    }

    /// The percentile-trimmed crop box.
    ///
    /// `trim` is the fraction of glyphs ignored at each extremity of each
    /// axis. Consumes the samples, which are not needed afterwards.
    pub fn crop_box(mut self, trim: f64) -> Result<Rect, IconFontError> {
        let n = self.len();
        if n == 0 {
            return Err(IconFontError::EmptyCorpus);
        }
        for axis in [
            &mut self.min_x,
            &mut self.max_x,
            &mut self.min_y,
            &mut self.max_y,
        ] {
            axis.sort_unstable();
        }
        let last = n - 1;
        let lo = ((n as f64 * trim).floor() as usize).min(last);
        let hi = ((n as f64 * (1.0 - trim)).floor() as usize).min(last);
        log::debug!("Trimming corpus of {} glyphs at indices {}..={}", n, lo, hi);
        Ok(Rect::new(
            self.min_x[lo].0,
            self.min_y[lo].0,
            self.max_x[hi].0,
            self.max_y[hi].0,
        ))
    }
}

impl FromIterator<Rect> for CorpusStatistics {
    fn from_iter<I: IntoIterator<Item = Rect>>(iter: I) -> Self {
        let mut stats = CorpusStatistics::new();
        for bbox in iter {
            stats.add(bbox);
        }
        stats
    }
}

/// The single origin and scale shared by every glyph in a font.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizationFrame {
    /// Source-space point that maps to (0, canvas_size) before fitting
    pub origin: Point,
    /// Side of the square source region mapped onto the canvas
    pub square_size: f64,
    /// Units per em of the output font
    pub canvas_size: f64,
}

impl NormalizationFrame {
    /// Derive the frame from a crop box.
    ///
    /// The square side is the longer of the crop box's sides. The longer axis
    /// keeps the crop minimum as its origin; the shorter axis is centred on
    /// the crop box's midpoint.
    pub fn from_crop_box(crop: Rect, canvas_size: f64) -> Self {
        let width = crop.width();
        let height = crop.height();
        let square_size = width.max(height);
        let center = crop.center();
        let origin = if width >= height {
            Point::new(crop.x0, center.y - square_size / 2.0)
        } else {
            Point::new(center.x - square_size / 2.0, crop.y0)
        };
        NormalizationFrame {
            origin,
            square_size,
            canvas_size,
        }
    }

    /// Source units to font units.
    ///
    /// A degenerate corpus (every glyph a single point) gets a neutral scale.
    pub fn scale(&self) -> f64 {
        if self.square_size > 0.0 {
            self.canvas_size / self.square_size
        } else {
            1.0
        }
    }

    /// Map a source bounding box into font space, y flipped, without any
    /// per-glyph fitting.
    pub fn transform_box(&self, bbox: Rect) -> Rect {
        let scale = self.scale();
        let x0 = (bbox.x0 - self.origin.x) * scale;
        let x1 = (bbox.x1 - self.origin.x) * scale;
        // The flip swaps which source edge becomes the minimum
        let y0 = self.canvas_size - (bbox.y1 - self.origin.y) * scale;
        let y1 = self.canvas_size - (bbox.y0 - self.origin.y) * scale;
        Rect::new(x0, y0, x1, y1)
    }
}
