//! Browser glue (WASM only)
//!
//! Canvas 2D painter, LocalStorage and event listeners that unregister
//! themselves when dropped.

use glam::Vec2;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, Event, EventTarget, HtmlCanvasElement, Storage};

use crate::ArcadeError;
use crate::persistence::KeyValueStore;
use crate::render::{Painter, TextAlign};

pub fn window() -> Result<web_sys::Window, ArcadeError> {
    web_sys::window().ok_or(ArcadeError::NoWindow)
}

pub fn document() -> Result<Document, ArcadeError> {
    window()?.document().ok_or(ArcadeError::NoDocument)
}

fn js_err(e: JsValue) -> String {
    e.as_string().unwrap_or_else(|| format!("{:?}", e))
}

/// Look up a `<canvas>` by element id
pub fn canvas_by_id(id: &str) -> Result<HtmlCanvasElement, ArcadeError> {
    document()?
        .get_element_by_id(id)
        .ok_or_else(|| ArcadeError::CanvasNotFound(id.to_string()))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| ArcadeError::NotACanvas(id.to_string()))
}

/// `Painter` over a canvas's 2D context
pub struct CanvasPainter {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasPainter {
    /// Fails if the canvas cannot give a 2D context
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, ArcadeError> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|_| ArcadeError::NoContext2d)?
            .ok_or(ArcadeError::NoContext2d)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| ArcadeError::NoContext2d)?;
        Ok(Self { canvas, ctx })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Size of the canvas as laid out by CSS
    pub fn css_size(&self) -> Vec2 {
        let rect = self.canvas.get_bounding_client_rect();
        Vec2::new(rect.width() as f32, rect.height() as f32)
    }

    /// Match the backing store to a logical size at the device pixel ratio,
    /// so drawing stays in logical pixels
    pub fn fit(&self, width: f32, height: f32) -> Result<(), ArcadeError> {
        let dpr = window()?.device_pixel_ratio().max(1.0);
        self.canvas.set_width(((width as f64 * dpr).floor() as u32).max(1));
        self.canvas.set_height(((height as f64 * dpr).floor() as u32).max(1));

        let style = self.canvas.style();
        style
            .set_property("width", &format!("{}px", width))
            .map_err(|e| ArcadeError::Dom(js_err(e)))?;
        style
            .set_property("height", &format!("{}px", height))
            .map_err(|e| ArcadeError::Dom(js_err(e)))?;

        self.ctx
            .set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)
            .map_err(|e| ArcadeError::Dom(js_err(e)))
    }
}

impl Painter for CanvasPainter {
    fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx
            .fill_rect(pos.x as f64, pos.y as f64, size.x as f64, size.y as f64);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.begin_path();
        let _ = self.ctx.arc(
            center.x as f64,
            center.y as f64,
            radius as f64,
            0.0,
            std::f64::consts::TAU,
        );
        self.ctx.fill();
    }

    fn fill_round_rect(&mut self, pos: Vec2, size: Vec2, radius: f32, color: &str) {
        let (x, y) = (pos.x as f64, pos.y as f64);
        let (w, h, r) = (size.x as f64, size.y as f64, radius as f64);
        self.ctx.set_fill_style_str(color);
        self.ctx.begin_path();
        self.ctx.move_to(x + r, y);
        let _ = self.ctx.arc_to(x + w, y, x + w, y + h, r);
        let _ = self.ctx.arc_to(x + w, y + h, x, y + h, r);
        let _ = self.ctx.arc_to(x, y + h, x, y, r);
        let _ = self.ctx.arc_to(x, y, x + w, y, r);
        self.ctx.close_path();
        self.ctx.fill();
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, dash: &[f32], color: &str) {
        let pattern: js_sys::Array = dash.iter().map(|d| JsValue::from_f64(*d as f64)).collect();
        self.ctx.set_stroke_style_str(color);
        self.ctx.set_line_width(width as f64);
        let _ = self.ctx.set_line_dash(&pattern);
        self.ctx.begin_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.ctx.stroke();
        if !dash.is_empty() {
            let _ = self.ctx.set_line_dash(&js_sys::Array::new());
        }
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, font: &str, align: TextAlign, color: &str) {
        self.ctx.set_font(font);
        self.ctx.set_text_align(match align {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        });
        self.ctx.set_fill_style_str(color);
        let _ = self.ctx.fill_text(text, pos.x as f64, pos.y as f64);
    }
}

/// `KeyValueStore` over `window.localStorage`
pub struct LocalStore {
    storage: Storage,
}

impl LocalStore {
    pub fn open() -> Result<Self, ArcadeError> {
        let storage = window()?
            .local_storage()
            .map_err(|e| ArcadeError::Storage(js_err(e)))?
            .ok_or_else(|| ArcadeError::Storage("localStorage unavailable".to_string()))?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), ArcadeError> {
        self.storage
            .set_item(key, value)
            .map_err(|e| ArcadeError::Storage(js_err(e)))
    }
}

/// A registered DOM event listener; dropping it removes the listener
pub struct ListenerHandle {
    target: EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl ListenerHandle {
    pub fn new(
        target: &EventTarget,
        kind: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, ArcadeError> {
        let closure = Closure::<dyn FnMut(Event)>::new(handler);
        target
            .add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
            .map_err(|e| ArcadeError::Dom(js_err(e)))?;
        Ok(Self {
            target: target.clone(),
            kind,
            closure,
        })
    }
}

impl Drop for ListenerHandle {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref());
    }
}
