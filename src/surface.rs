//! Drawing-surface seam between the simulations and the browser canvas.
//!
//! Renderers only talk to [`Surface`]; the browser build implements it for
//! `CanvasRenderingContext2d` (see `web::canvas`) and [`CommandBuffer`] records
//! draw calls for headless hosts and tests.

/// Canvas compositing modes the renderers switch between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Composite {
    /// Normal painting (`source-over`).
    SourceOver,
    /// Additive blending (`lighter`).
    Lighter,
}

impl Composite {
    pub fn as_css(self) -> &'static str {
        match self {
            Composite::SourceOver => "source-over",
            Composite::Lighter => "lighter",
        }
    }
}

/// Immediate-mode 2D drawing target.
pub trait Surface {
    fn set_fill_style(&mut self, css: &str);
    fn set_stroke_style(&mut self, css: &str);
    fn set_line_width(&mut self, width: f64);
    fn set_global_alpha(&mut self, alpha: f64);
    fn set_composite(&mut self, mode: Composite);
    /// Glow behind subsequent fills; `blur == 0.0` disables it.
    fn set_shadow(&mut self, blur: f64, color: &str);
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    fn fill_circle(&mut self, x: f64, y: f64, radius: f64);
    fn stroke_circle(&mut self, x: f64, y: f64, radius: f64);
}

/// Drawable area in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    /// Backing-buffer pixels per CSS pixel.
    pub pixel_ratio: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { width: 800.0, height: 600.0, pixel_ratio: 1.0 }
    }
}

impl Viewport {
    /// Degenerate sizes clamp to 1 px; non-finite values fall back to the default.
    pub fn new(width: f64, height: f64, pixel_ratio: f64) -> Self {
        let fallback = Self::default();
        let sane = |v: f64, d: f64| if v.is_finite() { v.max(1.0) } else { d };
        Self {
            width: sane(width, fallback.width),
            height: sane(height, fallback.height),
            pixel_ratio: if pixel_ratio.is_finite() && pixel_ratio > 0.0 {
                pixel_ratio
            } else {
                1.0
            },
        }
    }

    #[inline]
    pub fn center(&self) -> (f64, f64) {
        (self.width * 0.5, self.height * 0.5)
    }

    /// Backing-buffer size in device pixels.
    pub fn buffer_size(&self) -> (u32, u32) {
        (
            (self.width * self.pixel_ratio).round().max(1.0) as u32,
            (self.height * self.pixel_ratio).round().max(1.0) as u32,
        )
    }
}

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    FillStyle(String),
    StrokeStyle(String),
    LineWidth(f64),
    GlobalAlpha(f64),
    Composite(Composite),
    Shadow { blur: f64, color: String },
    FillRect { x: f64, y: f64, w: f64, h: f64 },
    FillCircle { x: f64, y: f64, radius: f64 },
    StrokeCircle { x: f64, y: f64, radius: f64 },
}

/// Surface that records every call instead of painting.
#[derive(Debug, Clone, Default)]
pub struct CommandBuffer {
    pub ops: Vec<DrawOp>,
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.ops.clear();
    }

    pub fn fill_circles(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::FillCircle { x, y, radius } => Some((*x, *y, *radius)),
            _ => None,
        })
    }
}

impl Surface for CommandBuffer {
    fn set_fill_style(&mut self, css: &str) {
        self.ops.push(DrawOp::FillStyle(css.to_owned()));
    }
    fn set_stroke_style(&mut self, css: &str) {
        self.ops.push(DrawOp::StrokeStyle(css.to_owned()));
    }
    fn set_line_width(&mut self, width: f64) {
        self.ops.push(DrawOp::LineWidth(width));
    }
    fn set_global_alpha(&mut self, alpha: f64) {
        self.ops.push(DrawOp::GlobalAlpha(alpha));
    }
    fn set_composite(&mut self, mode: Composite) {
        self.ops.push(DrawOp::Composite(mode));
    }
    fn set_shadow(&mut self, blur: f64, color: &str) {
        self.ops.push(DrawOp::Shadow { blur, color: color.to_owned() });
    }
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.ops.push(DrawOp::FillRect { x, y, w, h });
    }
    fn fill_circle(&mut self, x: f64, y: f64, radius: f64) {
        self.ops.push(DrawOp::FillCircle { x, y, radius });
    }
    fn stroke_circle(&mut self, x: f64, y: f64, radius: f64) {
        self.ops.push(DrawOp::StrokeCircle { x, y, radius });
    }
}
