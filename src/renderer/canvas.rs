//! Canvas 2D painter

use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::shapes::{Align, Color, Shape};
use crate::consts::{VIRTUAL_H, VIRTUAL_W};

fn css(c: &Color) -> String {
    format!(
        "rgba({},{},{},{})",
        (c[0] * 255.0).round() as u8,
        (c[1] * 255.0).round() as u8,
        (c[2] * 255.0).round() as u8,
        c[3]
    )
}

/// Draws shape lists onto a canvas, scaled from the virtual playfield
pub struct CanvasPainter {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasPainter {
    pub fn new(canvas: HtmlCanvasElement, ctx: CanvasRenderingContext2d) -> Self {
        ctx.set_image_smoothing_enabled(false);
        Self { canvas, ctx }
    }

    /// Match the backing store to the displayed size
    pub fn resize(&self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.ctx.set_image_smoothing_enabled(false);
    }

    pub fn paint(&self, shapes: &[Shape]) {
        let ctx = &self.ctx;
        let w = self.canvas.width() as f64;
        let h = self.canvas.height() as f64;

        // Letterbox: uniform scale, centered
        let scale = (w / VIRTUAL_W as f64).min(h / VIRTUAL_H as f64);
        let ox = (w - VIRTUAL_W as f64 * scale) / 2.0;
        let oy = (h - VIRTUAL_H as f64 * scale) / 2.0;

        ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0).ok();
        ctx.set_fill_style_str("#060912");
        ctx.fill_rect(0.0, 0.0, w, h);
        ctx.set_transform(scale, 0.0, 0.0, scale, ox, oy).ok();

        for shape in shapes {
            self.draw(shape);
        }
    }

    fn draw(&self, shape: &Shape) {
        let ctx = &self.ctx;
        match shape {
            Shape::Rect { x, y, w, h, color } => {
                ctx.set_fill_style_str(&css(color));
                ctx.fill_rect(*x as f64, *y as f64, *w as f64, *h as f64);
            }
            Shape::Quad { points, color } => {
                ctx.set_fill_style_str(&css(color));
                ctx.begin_path();
                ctx.move_to(points[0].x as f64, points[0].y as f64);
                for p in &points[1..] {
                    ctx.line_to(p.x as f64, p.y as f64);
                }
                ctx.close_path();
                ctx.fill();
            }
            Shape::Ellipse {
                center,
                rx,
                ry,
                rotation,
                color,
            } => {
                ctx.set_fill_style_str(&css(color));
                ctx.begin_path();
                if ctx
                    .ellipse(
                        center.x as f64,
                        center.y as f64,
                        *rx as f64,
                        *ry as f64,
                        *rotation as f64,
                        0.0,
                        std::f64::consts::TAU,
                    )
                    .is_ok()
                {
                    ctx.fill();
                }
            }
            Shape::Line {
                from,
                to,
                width,
                color,
            } => {
                ctx.set_stroke_style_str(&css(color));
                ctx.set_line_width(*width as f64);
                ctx.begin_path();
                ctx.move_to(from.x as f64, from.y as f64);
                ctx.line_to(to.x as f64, to.y as f64);
                ctx.stroke();
            }
            Shape::Text {
                pos,
                text,
                size,
                align,
                color,
            } => {
                ctx.set_fill_style_str(&css(color));
                ctx.set_font(&format!("{}px monospace", size));
                ctx.set_text_align(match align {
                    Align::Left => "left",
                    Align::Center => "center",
                    Align::Right => "right",
                });
                ctx.set_text_baseline("top");
                ctx.fill_text(text, pos.x as f64, pos.y as f64).ok();
            }
        }
    }
}
