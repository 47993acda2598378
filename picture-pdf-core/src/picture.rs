use std::sync::Arc;

/// RGB color with components in 0.0-1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Color { r, g, b }
    }

    /// Grayscale color (r = g = b = level).
    pub fn gray(level: f64) -> Self {
        Color {
            r: level,
            g: level,
            b: level,
        }
    }
}

/// Axis-aligned rectangle. Coordinates use PDF's bottom-left origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// 2x3 affine matrix, applied as the PDF `cm` operator
/// `[a b c d e f]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Transform {
    pub fn identity() -> Self {
        Transform {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }

    pub fn translate(tx: f64, ty: f64) -> Self {
        Transform {
            e: tx,
            f: ty,
            ..Self::identity()
        }
    }

    pub fn scale(sx: f64, sy: f64) -> Self {
        Transform {
            a: sx,
            d: sy,
            ..Self::identity()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    CubicTo { x1: f64, y1: f64, x2: f64, y2: f64, x: f64, y: f64 },
    Close,
}

/// A sequence of path segments, built up move/line/curve at a time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    pub(crate) segments: Vec<PathSegment>,
}

impl Path {
    pub fn new() -> Self {
        Path::default()
    }

    pub fn move_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.segments.push(PathSegment::MoveTo { x, y });
        self
    }

    pub fn line_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.segments.push(PathSegment::LineTo { x, y });
        self
    }

    pub fn cubic_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, x: f64, y: f64) -> &mut Self {
        self.segments.push(PathSegment::CubicTo { x1, y1, x2, y2, x, y });
        self
    }

    pub fn close(&mut self) -> &mut Self {
        self.segments.push(PathSegment::Close);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// One recorded drawing operation. Raster content is referenced by index
/// into the picture's image table rather than stored inline.
#[derive(Debug, Clone)]
pub enum DrawCommand {
    Save,
    Restore,
    Concat(Transform),
    SetFillColor(Color),
    SetStrokeColor(Color),
    SetLineWidth(f64),
    FillPath(Path),
    StrokePath(Path),
    FillRect(Rect),
    StrokeRect(Rect),
    DrawText { text: String, x: f64, y: f64, size: f64 },
    DrawImage { image: usize, rect: Rect },
}

/// An immutable recording of drawing commands. Cloning shares the recording;
/// no command data is copied.
#[derive(Debug, Clone)]
pub struct Picture {
    commands: Arc<[DrawCommand]>,
    images: Arc<[Arc<[u8]>]>,
}

impl Picture {
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub(crate) fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Encoded bytes of a recorded image. Indices recorded by
    /// `PictureRecorder` are always in range.
    pub(crate) fn image_data(&self, index: usize) -> &[u8] {
        &self.images[index]
    }
}

/// Captures drawing operations in order; `finish` freezes them into a
/// shareable [`Picture`].
#[derive(Debug, Default)]
pub struct PictureRecorder {
    commands: Vec<DrawCommand>,
    images: Vec<Arc<[u8]>>,
}

impl PictureRecorder {
    pub fn new() -> Self {
        PictureRecorder::default()
    }

    pub fn save(&mut self) -> &mut Self {
        self.commands.push(DrawCommand::Save);
        self
    }

    pub fn restore(&mut self) -> &mut Self {
        self.commands.push(DrawCommand::Restore);
        self
    }

    pub fn concat(&mut self, transform: Transform) -> &mut Self {
        self.commands.push(DrawCommand::Concat(transform));
        self
    }

    pub fn set_fill_color(&mut self, color: Color) -> &mut Self {
        self.commands.push(DrawCommand::SetFillColor(color));
        self
    }

    pub fn set_stroke_color(&mut self, color: Color) -> &mut Self {
        self.commands.push(DrawCommand::SetStrokeColor(color));
        self
    }

    pub fn set_line_width(&mut self, width: f64) -> &mut Self {
        self.commands.push(DrawCommand::SetLineWidth(width));
        self
    }

    pub fn fill_path(&mut self, path: Path) -> &mut Self {
        self.commands.push(DrawCommand::FillPath(path));
        self
    }

    pub fn stroke_path(&mut self, path: Path) -> &mut Self {
        self.commands.push(DrawCommand::StrokePath(path));
        self
    }

    pub fn fill_rect(&mut self, rect: Rect) -> &mut Self {
        self.commands.push(DrawCommand::FillRect(rect));
        self
    }

    pub fn stroke_rect(&mut self, rect: Rect) -> &mut Self {
        self.commands.push(DrawCommand::StrokeRect(rect));
        self
    }

    /// Record a text run in the builtin font at the given baseline origin.
    pub fn draw_text(&mut self, text: &str, x: f64, y: f64, size: f64) -> &mut Self {
        self.commands.push(DrawCommand::DrawText {
            text: text.to_string(),
            x,
            y,
            size,
        });
        self
    }

    /// Record encoded raster content (PNG or JPEG bytes) to be drawn into
    /// `rect`. The data is not decoded until the picture is replayed.
    pub fn draw_image(&mut self, data: Vec<u8>, rect: Rect) -> &mut Self {
        let index = self.images.len();
        self.images.push(Arc::from(data));
        self.commands.push(DrawCommand::DrawImage { image: index, rect });
        self
    }

    pub fn finish(self) -> Picture {
        Picture {
            commands: self.commands.into(),
            images: self.images.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_recording_is_a_valid_picture() {
        let picture = PictureRecorder::new().finish();
        assert!(picture.is_empty());
        assert_eq!(picture.command_count(), 0);
    }

    #[test]
    fn recorder_keeps_command_order() {
        let mut rec = PictureRecorder::new();
        rec.set_fill_color(Color::gray(0.5))
            .fill_rect(Rect {
                x: 0.0,
                y: 0.0,
                width: 10.0,
                height: 10.0,
            })
            .draw_text("hi", 1.0, 2.0, 12.0);
        let picture = rec.finish();
        assert_eq!(picture.command_count(), 3);
        assert!(matches!(picture.commands()[0], DrawCommand::SetFillColor(_)));
        assert!(matches!(picture.commands()[2], DrawCommand::DrawText { .. }));
    }

    #[test]
    fn images_are_indexed_in_recording_order() {
        let mut rec = PictureRecorder::new();
        let rect = Rect {
            x: 0.0,
            y: 0.0,
            width: 1.0,
            height: 1.0,
        };
        rec.draw_image(vec![1], rect).draw_image(vec![2], rect);
        let picture = rec.finish();
        assert_eq!(picture.image_data(0), &[1]);
        assert_eq!(picture.image_data(1), &[2]);
    }

    #[test]
    fn clone_shares_the_recording() {
        let mut rec = PictureRecorder::new();
        rec.fill_rect(Rect {
            x: 0.0,
            y: 0.0,
            width: 5.0,
            height: 5.0,
        });
        let a = rec.finish();
        let b = a.clone();
        assert_eq!(a.command_count(), b.command_count());
    }
}
