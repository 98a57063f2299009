//! Slot/set matrix: named rows and columns over loaded clip handles.
//!
//! Rows (slots) are keyed by the hash of their name so persisted
//! entries survive renames; columns (sets) are keyed by insertion
//! index and renaming one is display-only. Entries are sparse: an
//! unbound cell simply has no entry, which is a valid state.

use serde::{Deserialize, Serialize};

use crate::clips::{ClipHandle, ClipLoader};
use crate::config::Config;
use crate::error::ControllerError;
use crate::hash::HashId;

/// A named row; identity for matrix lookups is the name's hash.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    name: String,
}

impl Slot {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hash(&self) -> HashId {
        HashId::of_name(&self.name)
    }
}

/// Display name given to sets created from the editor's "add set"
/// button before the user types one.
pub const DEFAULT_SET_NAME: &str = "new set";

/// A named column; referenced by index, so its name is free to change.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Set {
    name: String,
}

impl Set {
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// One populated cell. `path` is what gets persisted; `clip` is the
/// live handle, absent when the asset failed to load.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatrixEntry {
    pub set: usize,
    pub slot: HashId,
    pub path: String,
    pub clip: Option<ClipHandle>,
}

/// The slot/set mapping of one controller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SlotSetMap {
    slots: Vec<Slot>,
    sets: Vec<Set>,
    entries: Vec<MatrixEntry>,
    config: Config,
}

impl SlotSetMap {
    pub fn new(config: Config) -> Self {
        Self {
            slots: Vec::new(),
            sets: Vec::new(),
            entries: Vec::new(),
            config,
        }
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn sets(&self) -> &[Set] {
        &self.sets
    }

    /// Populated cells in insertion order; nothing sorts them.
    pub fn entries(&self) -> &[MatrixEntry] {
        &self.entries
    }

    /// Find the populated cell for (set, slot hash), if any.
    pub fn entry(&self, set: usize, slot: HashId) -> Option<&MatrixEntry> {
        self.entries.iter().find(|e| e.set == set && e.slot == slot)
    }

    /// Append a row. Declined when an existing slot hashes the same,
    /// which also covers the plain duplicate-name case.
    pub fn add_slot(&mut self, name: &str) -> Result<(), ControllerError> {
        self.check_name(name)?;
        let hash = HashId::of_name(name);
        if self.slots.iter().any(|s| s.hash() == hash) {
            return Err(ControllerError::DuplicateName {
                name: name.to_string(),
            });
        }
        self.slots.push(Slot {
            name: name.to_string(),
        });
        Ok(())
    }

    /// Rename a row and re-key every matrix entry from the old hash to
    /// the new one in the same call, so no reader ever sees an entry
    /// referencing neither. Renaming to a hash held by a different
    /// slot is declined with the mapping untouched.
    pub fn rename_slot(&mut self, index: usize, new_name: &str) -> Result<(), ControllerError> {
        self.check_name(new_name)?;
        let old_hash = self.slots[index].hash();
        let new_hash = HashId::of_name(new_name);
        if new_hash != old_hash {
            if self.slots.iter().any(|s| s.hash() == new_hash) {
                return Err(ControllerError::DuplicateName {
                    name: new_name.to_string(),
                });
            }
            for entry in &mut self.entries {
                if entry.slot == old_hash {
                    entry.slot = new_hash;
                }
            }
        }
        self.slots[index].name = new_name.to_string();
        Ok(())
    }

    /// Remove a row and every cell keyed by its hash, releasing each
    /// bound clip through the loader.
    pub fn remove_slot(&mut self, index: usize, loader: &mut dyn ClipLoader) {
        let hash = self.slots[index].hash();
        self.slots.remove(index);
        self.entries.retain(|entry| {
            if entry.slot != hash {
                return true;
            }
            if let Some(clip) = &entry.clip {
                loader.unload(clip);
            }
            false
        });
    }

    /// Append a column. Existing entries keep their set indices; new
    /// columns never renumber old ones.
    pub fn add_set(&mut self, name: &str) -> Result<(), ControllerError> {
        self.check_name(name)?;
        self.sets.push(Set {
            name: name.to_string(),
        });
        Ok(())
    }

    /// Display-only: entries reference sets by index, not name.
    pub fn rename_set(&mut self, index: usize, name: &str) -> Result<(), ControllerError> {
        self.check_name(name)?;
        self.sets[index].name = name.to_string();
        Ok(())
    }

    /// Bind, rebind, or clear the cell (set, slot). An existing bound
    /// clip is released first; a path that fails to load leaves the
    /// cell populated but clip-less. Clearing removes the entry, so an
    /// unbound cell always looks the same; clearing an absent cell is
    /// a no-op.
    pub fn bind_clip(
        &mut self,
        set: usize,
        slot_index: usize,
        path: Option<&str>,
        loader: &mut dyn ClipLoader,
    ) -> Result<(), ControllerError> {
        if let Some(p) = path {
            self.check_path(p)?;
        }
        let slot = self.slots[slot_index].hash();
        let pos = self
            .entries
            .iter()
            .position(|e| e.set == set && e.slot == slot);
        match (pos, path) {
            (Some(i), Some(p)) => {
                let entry = &mut self.entries[i];
                if let Some(old) = entry.clip.take() {
                    loader.unload(&old);
                }
                entry.path = p.to_string();
                entry.clip = loader.load(p);
            }
            (Some(i), None) => {
                if let Some(old) = self.entries[i].clip.take() {
                    loader.unload(&old);
                }
                self.entries.remove(i);
            }
            (None, Some(p)) => {
                self.entries.push(MatrixEntry {
                    set,
                    slot,
                    path: p.to_string(),
                    clip: loader.load(p),
                });
            }
            (None, None) => {}
        }
        Ok(())
    }

    /// Release every bound clip. Called before the owning resource is
    /// replaced so no loaded clip leaks across the swap.
    pub fn release_clips(&mut self, loader: &mut dyn ClipLoader) {
        for entry in &mut self.entries {
            if let Some(clip) = entry.clip.take() {
                loader.unload(&clip);
            }
        }
    }

    /// Load the clip behind every entry that has a path but no live
    /// handle yet. Assets that cannot be loaded stay unresolved; the
    /// cell keeps its path and the miss is logged.
    pub fn resolve_clips(&mut self, loader: &mut dyn ClipLoader) {
        for entry in &mut self.entries {
            if entry.path.is_empty() || entry.clip.is_some() {
                continue;
            }
            entry.clip = loader.load(&entry.path);
            if entry.clip.is_none() {
                log::warn!("failed to load animation clip '{}'", entry.path);
            }
        }
    }

    pub(crate) fn push_entry_raw(&mut self, entry: MatrixEntry) {
        self.entries.push(entry);
    }

    pub(crate) fn push_slot_raw(&mut self, name: String) {
        self.slots.push(Slot { name });
    }

    pub(crate) fn push_set_raw(&mut self, name: String) {
        self.sets.push(Set { name });
    }

    fn check_name(&self, name: &str) -> Result<(), ControllerError> {
        if name.len() > self.config.max_name_len {
            return Err(ControllerError::NameTooLong {
                len: name.len(),
                max: self.config.max_name_len,
            });
        }
        Ok(())
    }

    fn check_path(&self, path: &str) -> Result<(), ControllerError> {
        if path.len() > self.config.max_path_len {
            return Err(ControllerError::NameTooLong {
                len: path.len(),
                max: self.config.max_path_len,
            });
        }
        Ok(())
    }
}
