//! Per-glyph placement inside the advance box.
//!
//! The shared [`NormalizationFrame`] decides the scale of every glyph; this
//! module only moves a glyph into its advance box, and shrinks it when it
//! would not otherwise fit horizontally.
use kurbo::Rect;

use crate::{frame::NormalizationFrame, options::AdvanceMode, width::WidthClass};

/// How one glyph is placed on top of the shared frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphFitPlan {
    /// Added to every x after scaling
    pub shift_x: f64,
    /// Added to every y after scaling and flipping
    pub shift_y: f64,
    /// Extra uniform scale in (0, 1]; below 1 only when the glyph was shrunk
    pub scale_factor: f64,
    /// Horizontal advance of the glyph in font units
    pub advance_width: f64,
}

impl GlyphFitPlan {
    /// A plan that leaves the frame-transformed glyph where it is.
    pub fn identity(advance_width: f64) -> Self {
        GlyphFitPlan {
            shift_x: 0.0,
            shift_y: 0.0,
            scale_factor: 1.0,
            advance_width,
        }
    }

    /// Where a source-space box ends up once both the frame and this plan
    /// are applied.
    pub fn apply(&self, frame: &NormalizationFrame, bbox: Rect) -> Rect {
        let ink = frame.transform_box(bbox);
        let k = self.scale_factor;
        let c = frame.canvas_size;
        Rect::new(
            k * ink.x0 + self.shift_x,
            c * (1.0 - k) + k * ink.y0 + self.shift_y,
            k * ink.x1 + self.shift_x,
            c * (1.0 - k) + k * ink.y1 + self.shift_y,
        )
    }
}

/// Everything a strategy needs to know about one glyph
#[derive(Debug, Clone, Copy)]
pub struct FitContext {
    /// The glyph's bounding box after the shared frame, y flipped
    pub ink: Rect,
    pub canvas_size: f64,
    pub advance_width: f64,
    /// Space reserved on each side of the ink
    pub margin: f64,
}

impl FitContext {
    pub fn usable_width(&self) -> f64 {
        self.advance_width - 2.0 * self.margin
    }

    /// Smallest vertical move bringing one overflowing edge back onto the
    /// canvas. Only the top edge is corrected if both overflow.
    fn vertical_correction(&self) -> f64 {
        if self.ink.y0 < 0.0 {
            -self.ink.y0
        } else if self.ink.y1 > self.canvas_size {
            self.canvas_size - self.ink.y1
        } else {
            0.0
        }
    }
}

/// A way of turning a [`FitContext`] into a [`GlyphFitPlan`]
pub trait FitStrategy {
    fn plan(&self, ctx: &FitContext) -> GlyphFitPlan;
}

/// Centre the glyph horizontally at its natural size.
pub struct ShiftOnly;

impl FitStrategy for ShiftOnly {
    fn plan(&self, ctx: &FitContext) -> GlyphFitPlan {
        GlyphFitPlan {
            shift_x: (ctx.advance_width - ctx.ink.width()) / 2.0 - ctx.ink.x0,
            shift_y: ctx.vertical_correction(),
            scale_factor: 1.0,
            advance_width: ctx.advance_width,
        }
    }
}

/// Shrink the glyph until its ink fits the usable width (and the canvas
/// height), then centre it in the advance box.
pub struct ShrinkToFit;

impl FitStrategy for ShrinkToFit {
    fn plan(&self, ctx: &FitContext) -> GlyphFitPlan {
        let ink_width = ctx.ink.width();
        let ink_height = ctx.ink.height();
        let mut k = if ink_width > 0.0 {
            (ctx.usable_width() / ink_width).min(1.0)
        } else {
            1.0
        };
        if ink_height > 0.0 && ink_height * k > ctx.canvas_size {
            k = ctx.canvas_size / ink_height;
        }
        let center = ctx.ink.center();
        let c = ctx.canvas_size;
        GlyphFitPlan {
            shift_x: ctx.advance_width / 2.0 - k * center.x,
            shift_y: c / 2.0 - c * (1.0 - k) - k * center.y,
            scale_factor: k,
            advance_width: ctx.advance_width,
        }
    }
}

/// Let the advance follow the ink: one margin, the glyph, another margin.
pub struct Proportional;

impl FitStrategy for Proportional {
    fn plan(&self, ctx: &FitContext) -> GlyphFitPlan {
        GlyphFitPlan {
            shift_x: ctx.margin - ctx.ink.x0,
            shift_y: ctx.vertical_correction(),
            scale_factor: 1.0,
            advance_width: (ctx.ink.width() + 2.0 * ctx.margin).round(),
        }
    }
}

/// Chooses and runs a strategy for each glyph against one shared frame.
#[derive(Debug, Clone, Copy)]
pub struct GlyphFitter<'a> {
    frame: &'a NormalizationFrame,
    margin: f64,
    mode: AdvanceMode,
}

impl<'a> GlyphFitter<'a> {
    pub fn new(frame: &'a NormalizationFrame, margin: f64, mode: AdvanceMode) -> Self {
        GlyphFitter {
            frame,
            margin,
            mode,
        }
    }

    pub fn context(&self, bbox: Rect, class: WidthClass) -> FitContext {
        FitContext {
            ink: self.frame.transform_box(bbox),
            canvas_size: self.frame.canvas_size,
            advance_width: class.advance_width(self.frame.canvas_size),
            margin: self.margin,
        }
    }

    pub fn strategy(&self, ctx: &FitContext) -> &'static dyn FitStrategy {
        match self.mode {
            AdvanceMode::Proportional => &Proportional,
            AdvanceMode::WidthClass => {
                let ink_width = ctx.ink.width();
                if ink_width > 0.0 && ink_width > ctx.usable_width() {
                    &ShrinkToFit
                } else {
                    &ShiftOnly
                }
            }
        }
    }

    pub fn plan(&self, bbox: Rect, class: WidthClass) -> GlyphFitPlan {
        let ctx = self.context(bbox, class);
        self.strategy(&ctx).plan(&ctx)
    }
}
