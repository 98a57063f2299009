//! External clip-resource interface.
//!
//! Animation clips are opaque to the core. A handle pairs the host
//! resource system's id with the path that keys the clip's identity;
//! loading and decoding stay on the host side of the seam.

use serde::{Deserialize, Serialize};

/// Reference to a loaded clip. Identity is the path: two handles to
/// the same asset compare equal even if the host assigned fresh ids.
#[derive(Clone, Debug, Eq, Serialize, Deserialize)]
pub struct ClipHandle {
    /// Host-side bookkeeping id; not part of identity.
    pub id: u64,
    /// Asset path the clip was loaded from.
    pub path: String,
}

impl PartialEq for ClipHandle {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

/// The host resource system, passed `&mut dyn` into the operations
/// that bind or release clips.
pub trait ClipLoader {
    /// Request a clip; `None` means the asset is missing or unreadable.
    fn load(&mut self, path: &str) -> Option<ClipHandle>;

    /// Release a handle previously returned by `load`.
    fn unload(&mut self, clip: &ClipHandle);
}
