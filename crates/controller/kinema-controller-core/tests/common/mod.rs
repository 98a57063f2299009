#![allow(dead_code)]
//! Shared test doubles for the core integration tests.

use kinema_controller_core::{ClipHandle, ClipLoader};

/// In-memory loader: paths listed in `missing` fail to load; every
/// load and unload is recorded for assertions.
#[derive(Default)]
pub struct RecordingClips {
    next_id: u64,
    pub missing: Vec<String>,
    pub loaded: Vec<String>,
    pub unloaded: Vec<String>,
}

impl RecordingClips {
    pub fn with_missing(paths: &[&str]) -> Self {
        Self {
            missing: paths.iter().map(|p| (*p).to_string()).collect(),
            ..Self::default()
        }
    }

    /// Loads minus unloads; zero means nothing leaked.
    pub fn live(&self) -> usize {
        self.loaded.len() - self.unloaded.len()
    }
}

impl ClipLoader for RecordingClips {
    fn load(&mut self, path: &str) -> Option<ClipHandle> {
        if self.missing.iter().any(|m| m == path) {
            return None;
        }
        self.next_id += 1;
        self.loaded.push(path.to_string());
        Some(ClipHandle {
            id: self.next_id,
            path: path.to_string(),
        })
    }

    fn unload(&mut self, clip: &ClipHandle) {
        self.unloaded.push(clip.path.clone());
    }
}
