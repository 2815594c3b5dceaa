//! Raster Surface
//! Paints draw commands into an RGBA image buffer.
//!
//! - Lines: imageproc segments, thick strokes as parallel offsets
//! - Rects: filled rects, rounded to whole pixels
//! - Wedges: filled polygons approximating the arc
//! - Text: rusttype glyph coverage alpha-blended onto the image (needs a font)

use super::{Surface, SurfaceSize};
use crate::charts::{Color, DrawCommand, Point, Rect, Stroke, TextAlign, TextBaseline};
use crate::error::{ChartError, Result};
use image::codecs::png::PngEncoder;
use image::{ImageBuffer, ImageEncoder, ImageFormat, Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_line_segment_mut, draw_polygon_mut};
use imageproc::point::Point as PixelPoint;
use imageproc::rect::Rect as PixelRect;
use rusttype::{Font, Scale};
use std::path::Path;
use tracing::debug;

/// Largest angle covered by one polygon edge when approximating an arc (2 degrees).
const MAX_ARC_STEP: f64 = std::f64::consts::PI / 90.0;

/// Line endpoints are clamped to this magnitude so that segment deltas stay finite.
const COORD_LIMIT: f64 = 1e150;

pub struct RasterSurface {
    image: RgbaImage,
    font: Option<Font<'static>>,
}

impl RasterSurface {
    /// Transparent surface with no font; text commands are skipped.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: ImageBuffer::from_pixel(width, height, to_rgba(Color::TRANSPARENT)),
            font: None,
        }
    }

    pub fn with_font_bytes(mut self, bytes: Vec<u8>) -> Result<Self> {
        let font = Font::try_from_vec(bytes)
            .ok_or_else(|| ChartError::configuration("font data is not a valid TrueType font"))?;
        self.font = Some(font);
        Ok(self)
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        self.image.save_with_format(path, ImageFormat::Png)?;
        Ok(())
    }

    /// Encode the current pixels as PNG bytes.
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        let mut png = Vec::new();
        PngEncoder::new(&mut png).write_image(
            self.image.as_raw(),
            self.image.width(),
            self.image.height(),
            image::ExtendedColorType::Rgba8,
        )?;
        Ok(png)
    }

    fn fill(&mut self, color: Color) {
        let rgba = to_rgba(color);
        for pixel in self.image.pixels_mut() {
            *pixel = rgba;
        }
    }

    fn draw_polyline(&mut self, points: &[Point], stroke: &Stroke) {
        let color = to_rgba(stroke.color);
        let passes = stroke.width.max(1.0).round() as usize;
        // One pixel of slack so strokes ending on the border keep their end pixels
        let min = Point::new(-1.0, -1.0);
        let max = Point::new(self.image.width() as f64, self.image.height() as f64);

        for segment in points.windows(2) {
            let (a, b) = (clamp_point(segment[0]), clamp_point(segment[1]));
            let (dx, dy) = (b.x - a.x, b.y - a.y);
            let len = (dx * dx + dy * dy).sqrt();
            // Unit normal; zero-length segments still paint their single pixel
            let (nx, ny) = if len > 0.0 {
                (-dy / len, dx / len)
            } else {
                (0.0, 0.0)
            };

            for pass in 0..passes {
                let offset = pass as f64 - (passes - 1) as f64 / 2.0;
                let (ox, oy) = (nx * offset, ny * offset);
                // imageproc walks every point of the segment, on canvas or not
                let Some((start, end)) = clip_segment(
                    Point::new(a.x + ox, a.y + oy),
                    Point::new(b.x + ox, b.y + oy),
                    min,
                    max,
                ) else {
                    continue;
                };
                draw_line_segment_mut(
                    &mut self.image,
                    (start.x as f32, start.y as f32),
                    (end.x as f32, end.y as f32),
                    color,
                );
            }
        }
    }

    fn draw_rect(&mut self, rect: &Rect, color: Color) {
        let r = rect.normalized();
        let x0 = r.x.round() as i32;
        let y0 = r.y.round() as i32;
        let x1 = (r.x + r.width).round() as i32;
        let y1 = (r.y + r.height).round() as i32;
        if x1 <= x0 || y1 <= y0 {
            return;
        }
        draw_filled_rect_mut(
            &mut self.image,
            PixelRect::at(x0, y0).of_size((x1 - x0) as u32, (y1 - y0) as u32),
            to_rgba(color),
        );
    }

    fn draw_wedge(
        &mut self,
        center: Point,
        radius: f64,
        start_angle: f64,
        sweep: f64,
        color: Color,
    ) {
        if sweep <= 0.0 || radius <= 0.0 {
            return;
        }

        let steps = ((sweep / MAX_ARC_STEP).ceil() as usize).max(1);
        let mut poly = Vec::with_capacity(steps + 2);
        poly.push(pixel_point(center.x, center.y));
        for step in 0..=steps {
            let angle = start_angle + sweep * step as f64 / steps as f64;
            poly.push(pixel_point(
                center.x + radius * angle.cos(),
                center.y + radius * angle.sin(),
            ));
        }

        // imageproc rejects closed or degenerate polygons
        poly.dedup();
        if poly.len() > 1 && poly.first() == poly.last() {
            poly.pop();
        }
        if poly.len() < 3 {
            return;
        }
        draw_polygon_mut(&mut self.image, &poly, to_rgba(color));
    }

    fn draw_text(
        &mut self,
        text: &str,
        position: Point,
        align: TextAlign,
        baseline: TextBaseline,
        size: f32,
        color: Color,
    ) {
        let Some(font) = self.font.as_ref() else {
            debug!(text, "No font loaded, skipping label");
            return;
        };

        let scale = Scale::uniform(size);
        let width = measure_text(font, scale, text);
        let x = match align {
            TextAlign::Left => position.x as f32,
            TextAlign::Center => position.x as f32 - width / 2.0,
            TextAlign::Right => position.x as f32 - width,
        };
        let y = match baseline {
            TextBaseline::Alphabetic => position.y as f32,
            TextBaseline::Middle => {
                let v_metrics = font.v_metrics(scale);
                // descent is negative
                position.y as f32 + (v_metrics.ascent + v_metrics.descent) / 2.0
            }
        };

        let (img_w, img_h) = (self.image.width() as i32, self.image.height() as i32);
        // Glyphs stay within `size` of the baseline; farther out nothing is
        // visible and glyph pixel bounds would saturate i32
        let visible = x.is_finite()
            && y.is_finite()
            && x < img_w as f32
            && x + width > 0.0
            && y + size > 0.0
            && y - size < img_h as f32;
        if !visible {
            return;
        }
        let image = &mut self.image;
        for glyph in font.layout(text, scale, rusttype::point(x, y)) {
            if let Some(bb) = glyph.pixel_bounding_box() {
                glyph.draw(|gx, gy, v| {
                    let px = bb.min.x + gx as i32;
                    let py = bb.min.y + gy as i32;
                    if px < 0 || py < 0 || px >= img_w || py >= img_h {
                        return;
                    }
                    let alpha = (v * color.a as f32).round() as u16;
                    if alpha == 0 {
                        return;
                    }
                    // Simple alpha blend
                    let pixel = image.get_pixel_mut(px as u32, py as u32);
                    let bg = *pixel;
                    let blend = |fg: u8, bg: u8| {
                        ((fg as u16 * alpha + bg as u16 * (255 - alpha)) / 255) as u8
                    };
                    *pixel = Rgba([
                        blend(color.r, bg[0]),
                        blend(color.g, bg[1]),
                        blend(color.b, bg[2]),
                        bg[3].max(alpha as u8),
                    ]);
                });
            }
        }
    }
}

impl Surface for RasterSurface {
    fn size(&self) -> SurfaceSize {
        SurfaceSize::new(self.image.width(), self.image.height())
    }

    fn draw(&mut self, command: &DrawCommand) {
        match command {
            DrawCommand::Clear { color } => self.fill(*color),
            DrawCommand::Polyline { points, stroke } => self.draw_polyline(points, stroke),
            DrawCommand::FillRect { rect, color } => self.draw_rect(rect, *color),
            DrawCommand::FillWedge {
                center,
                radius,
                start_angle,
                sweep,
                color,
            } => self.draw_wedge(*center, *radius, *start_angle, *sweep, *color),
            DrawCommand::Text {
                text,
                position,
                align,
                baseline,
                size,
                color,
            } => self.draw_text(text, *position, *align, *baseline, *size, *color),
        }
    }
}

fn to_rgba(color: Color) -> Rgba<u8> {
    Rgba([color.r, color.g, color.b, color.a])
}

fn pixel_point(x: f64, y: f64) -> PixelPoint<i32> {
    PixelPoint::new(x.round() as i32, y.round() as i32)
}

fn clamp_point(p: Point) -> Point {
    Point::new(
        p.x.clamp(-COORD_LIMIT, COORD_LIMIT),
        p.y.clamp(-COORD_LIMIT, COORD_LIMIT),
    )
}

/// Liang-Barsky: the part of segment `a`-`b` inside the box `min`..`max`.
/// `None` when the segment misses the box or has a NaN coordinate.
fn clip_segment(a: Point, b: Point, min: Point, max: Point) -> Option<(Point, Point)> {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    if !(a.x.is_finite() && a.y.is_finite() && dx.is_finite() && dy.is_finite()) {
        return None;
    }

    let (mut t0, mut t1) = (0.0f64, 1.0f64);
    for (p, q) in [
        (-dx, a.x - min.x),
        (dx, max.x - a.x),
        (-dy, a.y - min.y),
        (dy, max.y - a.y),
    ] {
        if p == 0.0 {
            // parallel to this edge
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    Some((
        Point::new(a.x + t0 * dx, a.y + t0 * dy),
        Point::new(a.x + t1 * dx, a.y + t1 * dy),
    ))
}

/// Advance width of `text` laid out at `scale`.
fn measure_text(font: &Font, scale: Scale, text: &str) -> f32 {
    font.layout(text, scale, rusttype::point(0.0, 0.0))
        .last()
        .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
        .unwrap_or(0.0)
}
