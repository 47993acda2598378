use log::{debug, error};

use crate::document::PdfDocument;
use crate::error::{ExportError, ExportStage};
use crate::metadata::{Clock, DocumentInfo, SystemClock};
use crate::picture::Picture;

/// Title stamped into every exported document.
pub const DOCUMENT_TITLE: &str = "Canvas Picture";
/// Creator stamped into every exported document.
pub const DOCUMENT_CREATOR: &str = "picture-pdf Canvas Export";

/// Converts recorded pictures into single-page PDF buffers.
///
/// Carries the clock used for the metadata timestamps; [`PdfExporter::new`]
/// uses the system clock, tests inject a fixed one.
pub struct PdfExporter<C = SystemClock> {
    clock: C,
}

impl PdfExporter<SystemClock> {
    pub fn new() -> Self {
        PdfExporter { clock: SystemClock }
    }
}

impl Default for PdfExporter<SystemClock> {
    fn default() -> Self {
        PdfExporter::new()
    }
}

impl<C: Clock> PdfExporter<C> {
    pub fn with_clock(clock: C) -> Self {
        PdfExporter { clock }
    }

    /// Export `picture` as a complete single-page PDF document sized
    /// `width` x `height` points.
    ///
    /// The picture is only read; the returned buffer is exactly the
    /// document's bytes and is owned by the caller. Either a complete valid
    /// document is returned or an error naming the failed stage — there is
    /// no partial output.
    pub fn export(
        &self,
        picture: Option<&Picture>,
        width: f64,
        height: f64,
    ) -> Result<Vec<u8>, ExportError> {
        let Some(picture) = picture else {
            error!("export requested without a picture");
            return Err(ExportError::NullPicture);
        };
        debug!(
            "exporting picture ({} commands) to a {width}x{height}pt page",
            picture.command_count()
        );

        let now = self.clock.now();
        let info = DocumentInfo::new(DOCUMENT_TITLE, DOCUMENT_CREATOR, now);

        let mut doc = PdfDocument::new(Vec::new(), info)
            .map_err(|e| ExportError::engine(ExportStage::OpenDocument, e))?;
        doc.begin_page(width, height);
        doc.draw_picture(picture)
            .map_err(|e| ExportError::engine(ExportStage::RenderPage, e))?;
        doc.end_page()
            .map_err(|e| ExportError::engine(ExportStage::RenderPage, e))?;
        let buffer = doc
            .close()
            .map_err(|e| ExportError::engine(ExportStage::CloseDocument, e))?;

        debug!("export finished: {} bytes", buffer.len());
        Ok(buffer)
    }
}

/// Export with the system clock. See [`PdfExporter::export`].
pub fn export_to_pdf(
    picture: Option<&Picture>,
    width: f64,
    height: f64,
) -> Result<Vec<u8>, ExportError> {
    PdfExporter::new().export(picture, width, height)
}
