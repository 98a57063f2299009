//! Session-level failure surface.

use thiserror::Error;

use kinema_controller_core::ControllerError;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    /// A data-model operation declined or a stream failed to parse.
    #[error(transparent)]
    Controller(#[from] ControllerError),

    /// Reading or writing the controller file failed.
    #[error("file i/o failed: {0}")]
    Io(#[from] std::io::Error),

    /// Save was requested before any path was chosen.
    #[error("no file path set; use save_as")]
    NoPath,

    /// No selected entity exposes an animation controller.
    #[error("no selected entity with an animation controller")]
    NoSelection,
}
