use wasm_bindgen::prelude::*;

use picture_pdf_core::picture::{
    Color, Path as CorePath, Picture as CorePicture, PictureRecorder as CoreRecorder, Rect,
    Transform,
};

/// JS handle to an immutable recording of drawing commands.
#[wasm_bindgen]
pub struct Picture {
    inner: CorePicture,
}

#[wasm_bindgen]
impl Picture {
    #[wasm_bindgen(js_name = commandCount)]
    pub fn command_count(&self) -> usize {
        self.inner.command_count()
    }

    #[wasm_bindgen(js_name = isEmpty)]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

/// JS handle to a path under construction.
#[wasm_bindgen]
pub struct Path {
    inner: CorePath,
}

#[wasm_bindgen]
impl Path {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Path {
        Path {
            inner: CorePath::new(),
        }
    }

    #[wasm_bindgen(js_name = moveTo)]
    pub fn move_to(&mut self, x: f64, y: f64) {
        self.inner.move_to(x, y);
    }

    #[wasm_bindgen(js_name = lineTo)]
    pub fn line_to(&mut self, x: f64, y: f64) {
        self.inner.line_to(x, y);
    }

    #[wasm_bindgen(js_name = cubicTo)]
    pub fn cubic_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, x: f64, y: f64) {
        self.inner.cubic_to(x1, y1, x2, y2, x, y);
    }

    pub fn close(&mut self) {
        self.inner.close();
    }
}

impl Default for Path {
    fn default() -> Self {
        Path::new()
    }
}

/// JS handle to the command recorder. Mirrors the capture side of the host
/// canvas; `finish()` freezes the recording into a [`Picture`].
#[wasm_bindgen]
pub struct PictureRecorder {
    inner: CoreRecorder,
}

#[wasm_bindgen]
impl PictureRecorder {
    #[wasm_bindgen(constructor)]
    pub fn new() -> PictureRecorder {
        PictureRecorder {
            inner: CoreRecorder::new(),
        }
    }

    pub fn save(&mut self) {
        self.inner.save();
    }

    pub fn restore(&mut self) {
        self.inner.restore();
    }

    pub fn transform(&mut self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) {
        self.inner.concat(Transform { a, b, c, d, e, f });
    }

    #[wasm_bindgen(js_name = setFillColor)]
    pub fn set_fill_color(&mut self, r: f64, g: f64, b: f64) {
        self.inner.set_fill_color(Color::rgb(r, g, b));
    }

    #[wasm_bindgen(js_name = setStrokeColor)]
    pub fn set_stroke_color(&mut self, r: f64, g: f64, b: f64) {
        self.inner.set_stroke_color(Color::rgb(r, g, b));
    }

    #[wasm_bindgen(js_name = setLineWidth)]
    pub fn set_line_width(&mut self, width: f64) {
        self.inner.set_line_width(width);
    }

    #[wasm_bindgen(js_name = fillRect)]
    pub fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.inner.fill_rect(Rect {
            x,
            y,
            width,
            height,
        });
    }

    #[wasm_bindgen(js_name = strokeRect)]
    pub fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.inner.stroke_rect(Rect {
            x,
            y,
            width,
            height,
        });
    }

    #[wasm_bindgen(js_name = fillPath)]
    pub fn fill_path(&mut self, path: &Path) {
        self.inner.fill_path(path.inner.clone());
    }

    #[wasm_bindgen(js_name = strokePath)]
    pub fn stroke_path(&mut self, path: &Path) {
        self.inner.stroke_path(path.inner.clone());
    }

    #[wasm_bindgen(js_name = drawText)]
    pub fn draw_text(&mut self, text: &str, x: f64, y: f64, size: f64) {
        self.inner.draw_text(text, x, y, size);
    }

    /// Record encoded PNG or JPEG bytes to be drawn into the given rect.
    #[wasm_bindgen(js_name = drawImage)]
    pub fn draw_image(&mut self, data: &[u8], x: f64, y: f64, width: f64, height: f64) {
        self.inner.draw_image(
            data.to_vec(),
            Rect {
                x,
                y,
                width,
                height,
            },
        );
    }

    pub fn finish(self) -> Picture {
        Picture {
            inner: self.inner.finish(),
        }
    }
}

impl Default for PictureRecorder {
    fn default() -> Self {
        PictureRecorder::new()
    }
}

/// Convert a recorded picture into a single-page PDF document sized
/// `width` x `height` points. The buffer surfaces in JavaScript as a
/// `Uint8Array`; a missing picture raises the precondition diagnostic.
#[wasm_bindgen(js_name = exportToPdf)]
pub fn export_to_pdf(
    picture: Option<Picture>,
    width: f64,
    height: f64,
) -> Result<js_sys::Uint8Array, JsError> {
    picture_pdf_core::export_to_pdf(picture.as_ref().map(|p| &p.inner), width, height)
        .map(|bytes| js_sys::Uint8Array::from(bytes.as_slice()))
        .map_err(|e| JsError::new(&e.to_string()))
}
