//! Canvas 2D backend
//!
//! Replays draw commands on a `CanvasRenderingContext2d`.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::scene::{Align, DrawCmd};

/// A canvas and its 2D context
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Look up a canvas by element id
    ///
    /// `None` when the element is missing (e.g. the game panel is closed)
    /// or the browser refuses a 2D context.
    pub fn acquire(canvas_id: &str) -> Option<Self> {
        let canvas: HtmlCanvasElement = web_sys::window()?
            .document()?
            .get_element_by_id(canvas_id)?
            .dyn_into()
            .ok()?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into()
            .ok()?;
        Some(Self { canvas, ctx })
    }

    pub fn draw(&self, cmds: &[DrawCmd]) {
        let ctx = &self.ctx;
        for cmd in cmds {
            match cmd {
                DrawCmd::Clear { color } => {
                    ctx.set_shadow_blur(0.0);
                    ctx.set_fill_style_str(color);
                    ctx.fill_rect(
                        0.0,
                        0.0,
                        self.canvas.width() as f64,
                        self.canvas.height() as f64,
                    );
                }
                DrawCmd::FillRect {
                    x,
                    y,
                    w,
                    h,
                    color,
                    glow,
                } => {
                    ctx.set_fill_style_str(color);
                    match glow {
                        Some(blur) => {
                            ctx.set_shadow_color(color);
                            ctx.set_shadow_blur(*blur as f64);
                        }
                        None => ctx.set_shadow_blur(0.0),
                    }
                    ctx.fill_rect(*x as f64, *y as f64, *w as f64, *h as f64);
                }
                DrawCmd::Text {
                    x,
                    y,
                    text,
                    font,
                    color,
                    align,
                } => {
                    ctx.set_shadow_blur(0.0);
                    ctx.set_fill_style_str(color);
                    ctx.set_font(font);
                    ctx.set_text_align(match align {
                        Align::Left => "left",
                        Align::Center => "center",
                    });
                    if let Err(e) = ctx.fill_text(text, *x as f64, *y as f64) {
                        log::warn!("fill_text failed: {:?}", e);
                    }
                }
            }
        }
        ctx.set_shadow_blur(0.0);
    }
}
