//! Kinema Controller Editor (session layer)
//!
//! Thin orchestration over `kinema-controller-core`: the current
//! controller resource, its file path, graph navigation, and the
//! event-type catalog, plus the traits the hosting engine implements
//! so the session can follow its entity selection.

pub mod error;
pub mod host;
pub mod session;

pub use error::SessionError;
pub use host::SelectionHost;
pub use session::EditorSession;
