pub mod document;
pub mod error;
pub mod exporter;
pub mod images;
pub mod metadata;
pub mod objects;
pub mod picture;
pub mod writer;

pub use document::PdfDocument;
pub use error::{EngineError, ExportError, ExportStage};
pub use exporter::{export_to_pdf, PdfExporter, DOCUMENT_CREATOR, DOCUMENT_TITLE};
pub use images::ImageError;
pub use metadata::{Clock, DocumentInfo, SystemClock, Timestamp};
pub use picture::{Color, Path, Picture, PictureRecorder, Rect, Transform};
