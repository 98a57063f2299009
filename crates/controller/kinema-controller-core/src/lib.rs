//! Kinema Controller Core (engine-agnostic)
//!
//! Data model behind the animation-controller editor: a typed schema of
//! runtime inputs and author-time constants, a hash-keyed slot/set clip
//! mapping, an event-type catalog, an opaque state-graph tree, and the
//! versioned binary protocol that persists them together.

pub mod buffer;
pub mod clips;
pub mod codec;
pub mod config;
pub mod error;
pub mod events;
pub mod graph;
pub mod hash;
pub mod mapping;
pub mod resource;
pub mod schema;

// Re-exports for consumers (editor/session layers)
pub use buffer::InputValue;
pub use clips::{ClipHandle, ClipLoader};
pub use codec::{CodecError, Reader, Writer};
pub use config::Config;
pub use error::ControllerError;
pub use events::{EventEditor, EventTypeCatalog, EventTypeDescriptor, SetInputPayload, SET_INPUT};
pub use graph::{Container, GraphNode, LeafNode};
pub use hash::HashId;
pub use mapping::{MatrixEntry, Set, Slot, SlotSetMap, DEFAULT_SET_NAME};
pub use resource::{ControllerResource, FORMAT_MAGIC, FORMAT_VERSION};
pub use schema::{ConstantField, InputField, InputSchema, InputType};
