use cairo::{Context, FillRule, Format, ImageSurface};
use pango::FontDescription;
use std::f64::consts::{FRAC_PI_2, PI, TAU};

use crate::error::{GlobeError, GlobeResult};
use crate::render::{
    CirclePrimitive, Color, FontWeight, PathPrimitive, RectPrimitive, RenderFrame, Renderer,
    TextHAlign,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub circles_drawn: usize,
    pub paths_drawn: usize,
    pub rects_drawn: usize,
    pub texts_drawn: usize,
}

/// Optional extension trait for renderers that can draw into an external Cairo
/// context (for example a widget draw callback owned by the host).
pub trait CairoContextRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> GlobeResult<()>;
}

/// Cairo + Pango + PangoCairo renderer backend.
///
/// Renders either into its own offscreen image surface through
/// `Renderer::render`, or onto a host-provided context through
/// `CairoContextRenderer`.
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    clear_color: Color,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> GlobeResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(GlobeError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            clear_color: Color::rgba(1.0, 1.0, 1.0, 0.0),
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    pub fn set_clear_color(&mut self, color: Color) -> GlobeResult<()> {
        color.validate()?;
        self.clear_color = color;
        Ok(())
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    /// Writes the offscreen surface as PNG, e.g. for host snapshot/export.
    pub fn write_png(&self, target: &mut impl std::io::Write) -> GlobeResult<()> {
        self.surface
            .write_to_png(target)
            .map_err(|err| GlobeError::InvalidData(format!("failed to encode png: {err}")))
    }

    fn render_with_context(&mut self, context: &Context, frame: &RenderFrame) -> GlobeResult<()> {
        frame.validate()?;

        apply_color(context, self.clear_color);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;

        let mut stats = CairoRenderStats::default();

        if let Some(ocean) = frame.ocean {
            draw_circle(context, ocean)?;
            stats.circles_drawn += 1;
        }

        context.set_fill_rule(FillRule::EvenOdd);
        for path in &frame.paths {
            draw_path(context, path)?;
            stats.paths_drawn += 1;
        }

        if let Some(outline) = frame.outline {
            draw_circle(context, outline)?;
            stats.circles_drawn += 1;
        }

        for rect in &frame.rects {
            append_rect_path(context, *rect);
            apply_color(context, rect.fill_color);
            if rect.border_width > 0.0 {
                context
                    .fill_preserve()
                    .map_err(|err| map_backend_error("failed to fill rectangle", err))?;
                apply_color(context, rect.border_color);
                context.set_line_width(rect.border_width);
                context
                    .stroke()
                    .map_err(|err| map_backend_error("failed to stroke rectangle border", err))?;
            } else {
                context
                    .fill()
                    .map_err(|err| map_backend_error("failed to fill rectangle", err))?;
            }
            stats.rects_drawn += 1;
        }

        for text in &frame.texts {
            let layout = pangocairo::functions::create_layout(context);
            let weight = match text.font_weight {
                FontWeight::Normal => "",
                FontWeight::Bold => " Bold",
            };
            let font_description =
                FontDescription::from_string(&format!("Sans{weight} {}", text.font_size_px));
            layout.set_font_description(Some(&font_description));
            layout.set_text(&text.text);

            let (text_width, _text_height) = layout.pixel_size();
            let x = match text.h_align {
                TextHAlign::Left => text.x,
                TextHAlign::Center => text.x - f64::from(text_width) / 2.0,
            };

            apply_color(context, text.color);
            context.move_to(x, text.y);
            pangocairo::functions::show_layout(context, &layout);
            stats.texts_drawn += 1;
        }

        self.last_stats = stats;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> GlobeResult<()> {
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.render_with_context(&context, frame)
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> GlobeResult<()> {
        self.render_with_context(context, frame)
    }
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn draw_circle(context: &Context, circle: CirclePrimitive) -> GlobeResult<()> {
    context.new_path();
    context.arc(circle.cx, circle.cy, circle.radius, 0.0, TAU);
    if let Some(fill) = circle.fill {
        apply_color(context, fill);
        context
            .fill_preserve()
            .map_err(|err| map_backend_error("failed to fill circle", err))?;
    }
    if let Some((color, width)) = circle.stroke {
        apply_color(context, color);
        context.set_line_width(width);
        context
            .stroke_preserve()
            .map_err(|err| map_backend_error("failed to stroke circle", err))?;
    }
    context.new_path();
    Ok(())
}

fn draw_path(context: &Context, path: &PathPrimitive) -> GlobeResult<()> {
    context.new_path();
    for ring in path.rings.iter() {
        let mut points = ring.iter();
        let Some(&(x, y)) = points.next() else {
            continue;
        };
        context.move_to(x, y);
        for &(x, y) in points {
            context.line_to(x, y);
        }
        context.close_path();
    }
    apply_color(context, path.fill);
    context
        .fill_preserve()
        .map_err(|err| map_backend_error("failed to fill country", err))?;
    apply_color(context, path.stroke);
    context.set_line_width(path.stroke_width);
    context
        .stroke()
        .map_err(|err| map_backend_error("failed to stroke country", err))
}

fn append_rect_path(context: &Context, rect: RectPrimitive) {
    if rect.corner_radius <= 0.0 {
        context.rectangle(rect.x, rect.y, rect.width, rect.height);
        return;
    }

    let radius = rect
        .corner_radius
        .min(rect.width * 0.5)
        .min(rect.height * 0.5);
    let left = rect.x;
    let top = rect.y;
    let right = rect.x + rect.width;
    let bottom = rect.y + rect.height;

    context.new_sub_path();
    context.arc(right - radius, top + radius, radius, -FRAC_PI_2, 0.0);
    context.arc(right - radius, bottom - radius, radius, 0.0, FRAC_PI_2);
    context.arc(left + radius, bottom - radius, radius, FRAC_PI_2, PI);
    context.arc(left + radius, top + radius, radius, PI, PI + FRAC_PI_2);
    context.close_path();
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> GlobeError {
    GlobeError::InvalidData(format!("{prefix}: {err}"))
}
