use std::fmt;
use std::io;

use thiserror::Error;

use crate::images::ImageError;

/// Pipeline stage in which the engine failed, for the caller's diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportStage {
    OpenDocument,
    RenderPage,
    CloseDocument,
}

impl fmt::Display for ExportStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ExportStage::OpenDocument => "opening the document",
            ExportStage::RenderPage => "rendering the page",
            ExportStage::CloseDocument => "closing the document",
        })
    }
}

/// Failure inside the document engine: either the output stream or the
/// decoding of recorded raster content.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Image(#[from] ImageError),
}

#[derive(Debug, Error)]
pub enum ExportError {
    /// The caller supplied no picture. Nothing is written in this case.
    #[error("no picture was supplied for export")]
    NullPicture,
    #[error("pdf engine failed while {stage}: {source}")]
    Engine {
        stage: ExportStage,
        source: EngineError,
    },
}

impl ExportError {
    pub(crate) fn engine(stage: ExportStage, source: impl Into<EngineError>) -> Self {
        ExportError::Engine {
            stage,
            source: source.into(),
        }
    }
}
