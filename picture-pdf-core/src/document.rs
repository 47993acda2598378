use std::collections::HashMap;
use std::io::{self, Write};

use flate2::write::ZlibEncoder;
use flate2::Compression;

use crate::error::EngineError;
use crate::images::{self, RasterFormat};
use crate::metadata::DocumentInfo;
use crate::objects::{Dict, ObjId, Object};
use crate::picture::{Color, DrawCommand, Path, PathSegment, Picture, Rect, Transform};
use crate::writer::{escape_text, format_number, PdfWriter};

const CATALOG_ID: ObjId = ObjId(1);
const PAGE_TREE_ID: ObjId = ObjId(2);
const FONT_ID: ObjId = ObjId(3);
const FIRST_DYNAMIC_ID: u32 = 4;

/// Document engine: replays recorded pictures onto pages and serializes a
/// complete PDF to the backing writer.
///
/// Generic over `Write`; the exporter backs it with `Vec<u8>` so the whole
/// document accumulates in memory. Page content is flushed by `end_page`,
/// document-level structures by `close`.
pub struct PdfDocument<W: Write> {
    writer: PdfWriter<W>,
    info: DocumentInfo,
    compress: bool,
    page_ids: Vec<ObjId>,
    surface: Option<PageSurface>,
    images_embedded: u32,
    next_id: u32,
}

/// Content target for the page being built: accumulated operators plus the
/// image resources they reference. Owned by the document.
struct PageSurface {
    width: f64,
    height: f64,
    ops: Vec<u8>,
    /// (resource name number, XObject id) pairs used by the operators.
    images: Vec<(u32, ObjId)>,
}

impl<W: Write> PdfDocument<W> {
    /// Open a document against the given writer with its metadata fixed up
    /// front. Writes the header and the shared builtin font immediately.
    pub fn new(writer: W, info: DocumentInfo) -> io::Result<Self> {
        let mut pdf_writer = PdfWriter::new(writer);
        pdf_writer.header()?;

        // Single shared font for recorded text runs.
        let font = Dict::new()
            .entry("Type", Object::name("Font"))
            .entry("Subtype", Object::name("Type1"))
            .entry("BaseFont", Object::name("Helvetica"));
        pdf_writer.object(FONT_ID, &Object::Dict(font))?;

        Ok(PdfDocument {
            writer: pdf_writer,
            info,
            compress: false,
            page_ids: Vec::new(),
            surface: None,
            images_embedded: 0,
            next_id: FIRST_DYNAMIC_ID,
        })
    }

    /// Flate-compress content and image streams. Off by default so repeated
    /// runs produce identical bytes.
    pub fn set_compression(&mut self, on: bool) -> &mut Self {
        self.compress = on;
        self
    }

    fn alloc_id(&mut self) -> ObjId {
        let id = ObjId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Begin a page with the given dimensions in points. A page left open is
    /// closed first; its write errors resurface at `close`.
    pub fn begin_page(&mut self, width: f64, height: f64) -> &mut Self {
        if self.surface.is_some() {
            let _ = self.end_page();
        }
        self.surface = Some(PageSurface {
            width,
            height,
            ops: Vec::new(),
            images: Vec::new(),
        });
        self
    }

    /// Replay every recorded command of `picture` onto the open page, in
    /// recording order. Vector commands become content-stream operators;
    /// raster commands embed their data as image XObjects.
    pub fn draw_picture(&mut self, picture: &Picture) -> Result<(), EngineError> {
        assert!(
            self.surface.is_some(),
            "draw_picture called with no open page"
        );

        // Embed raster resources first so replay below is pure operator
        // emission. Each picture-local image is embedded once even when
        // drawn repeatedly.
        let mut resource_names: HashMap<usize, u32> = HashMap::new();
        let mut new_refs = Vec::new();
        for command in picture.commands() {
            if let DrawCommand::DrawImage { image, .. } = command {
                if !resource_names.contains_key(image) {
                    let obj_id = self.embed_image(picture.image_data(*image))?;
                    self.images_embedded += 1;
                    resource_names.insert(*image, self.images_embedded);
                    new_refs.push((self.images_embedded, obj_id));
                }
            }
        }

        let surface = self
            .surface
            .as_mut()
            .expect("draw_picture called with no open page");
        surface.images.extend(new_refs);

        for command in picture.commands() {
            match command {
                DrawCommand::Save => surface.raw_op("q\n"),
                DrawCommand::Restore => surface.raw_op("Q\n"),
                DrawCommand::Concat(t) => surface.concat(t),
                DrawCommand::SetFillColor(c) => surface.fill_color(c),
                DrawCommand::SetStrokeColor(c) => surface.stroke_color(c),
                DrawCommand::SetLineWidth(w) => surface.line_width(*w),
                DrawCommand::FillPath(path) => {
                    surface.path_segments(path);
                    surface.raw_op("f\n");
                }
                DrawCommand::StrokePath(path) => {
                    surface.path_segments(path);
                    surface.raw_op("S\n");
                }
                DrawCommand::FillRect(rect) => {
                    surface.rect_op(rect);
                    surface.raw_op("f\n");
                }
                DrawCommand::StrokeRect(rect) => {
                    surface.rect_op(rect);
                    surface.raw_op("S\n");
                }
                DrawCommand::DrawText { text, x, y, size } => {
                    surface.text_run(text, *x, *y, *size);
                }
                DrawCommand::DrawImage { image, rect } => {
                    surface.image_op(resource_names[image], rect);
                }
            }
        }
        Ok(())
    }

    /// Decode and write one recorded raster as an image XObject, returning
    /// its object id. An alpha channel becomes a separate SMask object.
    fn embed_image(&mut self, data: &[u8]) -> Result<ObjId, EngineError> {
        let raster = images::decode(data)?;

        let smask_id = match raster.alpha {
            Some(alpha) => {
                let id = self.alloc_id();
                let dict = Dict::new()
                    .entry("Type", Object::name("XObject"))
                    .entry("Subtype", Object::name("Image"))
                    .entry("Width", Object::Integer(raster.width as i64))
                    .entry("Height", Object::Integer(raster.height as i64))
                    .entry("ColorSpace", Object::name("DeviceGray"))
                    .entry("BitsPerComponent", Object::Integer(8));
                let stream = build_stream(self.compress, dict, alpha)?;
                self.writer.object(id, &stream)?;
                Some(id)
            }
            None => None,
        };

        let id = self.alloc_id();
        let mut dict = Dict::new()
            .entry("Type", Object::name("XObject"))
            .entry("Subtype", Object::name("Image"))
            .entry("Width", Object::Integer(raster.width as i64))
            .entry("Height", Object::Integer(raster.height as i64))
            .entry("ColorSpace", Object::name(raster.color_space.pdf_name()))
            .entry("BitsPerComponent", Object::Integer(8));
        if let Some(smask) = smask_id {
            dict.push("SMask", Object::Ref(smask));
        }

        let stream = match raster.format {
            // JPEG data is already compressed; embed untouched.
            RasterFormat::Jpeg => {
                dict.push("Filter", Object::name("DCTDecode"));
                Object::Stream {
                    dict,
                    data: raster.data,
                }
            }
            RasterFormat::Png => build_stream(self.compress, dict, raster.data)?,
        };
        self.writer.object(id, &stream)?;
        Ok(id)
    }

    /// End the open page: writes its content stream and page dictionary,
    /// freeing the page content from memory.
    pub fn end_page(&mut self) -> io::Result<()> {
        let surface = self
            .surface
            .take()
            .expect("end_page called with no open page");

        let content_id = self.alloc_id();
        let content = build_stream(self.compress, Dict::new(), surface.ops)?;
        self.writer.object(content_id, &content)?;

        let mut resources = Dict::new().entry(
            "Font",
            Object::Dict(Dict::new().entry("F1", Object::Ref(FONT_ID))),
        );
        if !surface.images.is_empty() {
            let mut xobjects = Dict::new();
            for (name, id) in &surface.images {
                xobjects.push(format!("Im{name}"), Object::Ref(*id));
            }
            resources.push("XObject", Object::Dict(xobjects));
        }

        let page_id = self.alloc_id();
        let page = Dict::new()
            .entry("Type", Object::name("Page"))
            .entry("Parent", Object::Ref(PAGE_TREE_ID))
            .entry(
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Real(surface.width),
                    Object::Real(surface.height),
                ]),
            )
            .entry("Contents", Object::Ref(content_id))
            .entry("Resources", Object::Dict(resources));
        self.writer.object(page_id, &Object::Dict(page))?;
        self.page_ids.push(page_id);
        Ok(())
    }

    /// Finalize the document: info dictionary, page tree, catalog, xref and
    /// trailer. Consumes self and returns the backing writer with the
    /// complete document flushed into it.
    pub fn close(mut self) -> io::Result<W> {
        if self.surface.is_some() {
            self.end_page()?;
        }

        let info_id = self.alloc_id();
        let info = self.info.to_dict();
        self.writer.object(info_id, &Object::Dict(info))?;

        let kids: Vec<Object> = self.page_ids.iter().map(|id| Object::Ref(*id)).collect();
        let pages = Dict::new()
            .entry("Type", Object::name("Pages"))
            .entry("Count", Object::Integer(kids.len() as i64))
            .entry("Kids", Object::Array(kids));
        self.writer.object(PAGE_TREE_ID, &Object::Dict(pages))?;

        let catalog = Dict::new()
            .entry("Type", Object::name("Catalog"))
            .entry("Pages", Object::Ref(PAGE_TREE_ID));
        self.writer.object(CATALOG_ID, &Object::Dict(catalog))?;

        self.writer.finish(CATALOG_ID, Some(info_id))?;
        Ok(self.writer.into_inner())
    }
}

/// Wrap raw bytes in a stream object, Flate-compressing them when enabled.
fn build_stream(compress: bool, dict: Dict, data: Vec<u8>) -> io::Result<Object> {
    if !compress {
        return Ok(Object::Stream { dict, data });
    }
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&data)?;
    let compressed = encoder.finish()?;
    Ok(Object::Stream {
        dict: dict.entry("Filter", Object::name("FlateDecode")),
        data: compressed,
    })
}

impl PageSurface {
    fn raw_op(&mut self, op: &str) {
        self.ops.extend_from_slice(op.as_bytes());
    }

    fn concat(&mut self, t: &Transform) {
        self.raw_op(&format!(
            "{} {} {} {} {} {} cm\n",
            format_number(t.a),
            format_number(t.b),
            format_number(t.c),
            format_number(t.d),
            format_number(t.e),
            format_number(t.f),
        ));
    }

    fn fill_color(&mut self, c: &Color) {
        self.raw_op(&format!(
            "{} {} {} rg\n",
            format_number(c.r),
            format_number(c.g),
            format_number(c.b),
        ));
    }

    fn stroke_color(&mut self, c: &Color) {
        self.raw_op(&format!(
            "{} {} {} RG\n",
            format_number(c.r),
            format_number(c.g),
            format_number(c.b),
        ));
    }

    fn line_width(&mut self, width: f64) {
        self.raw_op(&format!("{} w\n", format_number(width)));
    }

    fn path_segments(&mut self, path: &Path) {
        for segment in &path.segments {
            let op = match segment {
                PathSegment::MoveTo { x, y } => {
                    format!("{} {} m\n", format_number(*x), format_number(*y))
                }
                PathSegment::LineTo { x, y } => {
                    format!("{} {} l\n", format_number(*x), format_number(*y))
                }
                PathSegment::CubicTo { x1, y1, x2, y2, x, y } => format!(
                    "{} {} {} {} {} {} c\n",
                    format_number(*x1),
                    format_number(*y1),
                    format_number(*x2),
                    format_number(*y2),
                    format_number(*x),
                    format_number(*y),
                ),
                PathSegment::Close => "h\n".to_string(),
            };
            self.raw_op(&op);
        }
    }

    fn rect_op(&mut self, rect: &Rect) {
        self.raw_op(&format!(
            "{} {} {} {} re\n",
            format_number(rect.x),
            format_number(rect.y),
            format_number(rect.width),
            format_number(rect.height),
        ));
    }

    fn text_run(&mut self, text: &str, x: f64, y: f64, size: f64) {
        self.raw_op(&format!(
            "BT\n/F1 {} Tf\n{} {} Td\n({}) Tj\nET\n",
            format_number(size),
            format_number(x),
            format_number(y),
            escape_text(text),
        ));
    }

    fn image_op(&mut self, name: u32, rect: &Rect) {
        self.raw_op(&format!(
            "q\n{} 0 0 {} {} {} cm\n/Im{} Do\nQ\n",
            format_number(rect.width),
            format_number(rect.height),
            format_number(rect.x),
            format_number(rect.y),
            name,
        ));
    }
}
