//! The editor session: one controller, one path, one catalog.
//!
//! All operations run synchronously on the GUI thread; there is no
//! background work and no partial completion. Replacing the resource
//! (new/load) always releases the outgoing resource's clips first so
//! the swap never leaks loads.

use std::fs;
use std::path::{Path, PathBuf};

use kinema_controller_core::{
    buffer, ClipLoader, Config, Container, ControllerError, ControllerResource, EventEditor,
    EventTypeCatalog, GraphNode, HashId, InputValue, SetInputPayload, SET_INPUT,
};

use crate::error::SessionError;
use crate::host::SelectionHost;

/// Editor-side owner of the current controller resource.
pub struct EditorSession {
    resource: ControllerResource,
    path: Option<PathBuf>,
    /// Index path from the graph root to the navigated container.
    nav: Vec<usize>,
    events: EventTypeCatalog,
    config: Config,
}

impl EditorSession {
    /// Start with an empty controller. The built-in `set_input` event
    /// type is registered immediately; the host attaches its editor
    /// widget via [`EditorSession::set_event_editor`].
    pub fn new(config: Config) -> Self {
        let mut events = EventTypeCatalog::default();
        let set_input = events.register(SET_INPUT);
        set_input.label = "Set Input".to_string();
        set_input.payload_size = SetInputPayload::SIZE;

        Self {
            resource: ControllerResource::new(config),
            path: None,
            nav: Vec::new(),
            events,
            config,
        }
    }

    pub fn resource(&self) -> &ControllerResource {
        &self.resource
    }

    pub fn resource_mut(&mut self) -> &mut ControllerResource {
        &mut self.resource
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn config(&self) -> Config {
        self.config
    }

    pub fn events(&self) -> &EventTypeCatalog {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut EventTypeCatalog {
        &mut self.events
    }

    /// Attach an editor behavior to a registered event kind.
    pub fn set_event_editor(&mut self, kind: HashId, editor: EventEditor) -> bool {
        match self.events.find_mut(kind) {
            Some(descriptor) => {
                descriptor.editor = Some(editor);
                true
            }
            None => false,
        }
    }

    /// Discard the current controller for a fresh empty one.
    pub fn new_controller(&mut self, loader: &mut dyn ClipLoader) {
        self.resource.release_clips(loader);
        self.resource = ControllerResource::new(self.config);
        self.path = None;
        self.nav.clear();
    }

    /// Serialize to the current path. Declines with `NoPath` when no
    /// path was ever chosen; a failed write leaves the in-memory
    /// resource untouched.
    pub fn save(&self) -> Result<(), SessionError> {
        let path = self.path.as_ref().ok_or(SessionError::NoPath)?;
        let bytes = self.resource.to_bytes().map_err(ControllerError::from)?;
        fs::write(path, bytes)?;
        Ok(())
    }

    /// Adopt `path` (the host's save dialog already ran) and save.
    pub fn save_as(&mut self, path: impl Into<PathBuf>) -> Result<(), SessionError> {
        self.path = Some(path.into());
        self.save()
    }

    /// Open a controller file. On any failure — unreadable file,
    /// foreign or corrupt stream — the previous resource is still
    /// torn down and a brand-new empty one takes its place; a
    /// half-populated controller is never observable.
    pub fn load(
        &mut self,
        path: impl Into<PathBuf>,
        loader: &mut dyn ClipLoader,
    ) -> Result<(), SessionError> {
        let path = path.into();
        let outcome = fs::read(&path).map_err(SessionError::from).and_then(|bytes| {
            ControllerResource::deserialize(&bytes, self.config, loader)
                .map_err(SessionError::from)
        });
        self.path = Some(path);
        self.nav.clear();
        self.resource.release_clips(loader);
        match outcome {
            Ok(candidate) => {
                self.resource = candidate;
                Ok(())
            }
            Err(err) => {
                log::error!("failed to open controller: {err}; starting from an empty one");
                self.resource = ControllerResource::new(self.config);
                Err(err)
            }
        }
    }

    /// Open the controller assigned to the host's selected entity.
    pub fn load_from_selection(
        &mut self,
        host: &dyn SelectionHost,
        loader: &mut dyn ClipLoader,
    ) -> Result<(), SessionError> {
        let path = host
            .selected_controller_path()
            .ok_or(SessionError::NoSelection)?;
        self.load(path, loader)
    }

    /// The container the editor is currently drawing into. `None`
    /// only when the graph root is not a container; a navigation path
    /// that no longer resolves falls back to the root.
    pub fn current_container(&self) -> Option<&Container> {
        let root = self.resource.graph.as_container()?;
        let mut container = root;
        for &index in &self.nav {
            match container.children.get(index).and_then(GraphNode::as_container) {
                Some(next) => container = next,
                None => return Some(root),
            }
        }
        Some(container)
    }

    pub fn current_container_mut(&mut self) -> Option<&mut Container> {
        let depth = if self.nav_resolves() { self.nav.len() } else { 0 };
        let mut container = self.resource.graph.as_container_mut()?;
        for &index in &self.nav[..depth] {
            match container
                .children
                .get_mut(index)
                .and_then(GraphNode::as_container_mut)
            {
                Some(next) => container = next,
                // Unreachable after nav_resolves; stay total anyway.
                None => return None,
            }
        }
        Some(container)
    }

    /// Navigate into a child container. Returns false when the child
    /// is absent or a leaf.
    pub fn enter_child(&mut self, index: usize) -> bool {
        if !self.nav_resolves() {
            self.nav.clear();
        }
        let ok = self
            .current_container()
            .and_then(|c| c.children.get(index))
            .and_then(GraphNode::as_container)
            .is_some();
        if ok {
            self.nav.push(index);
        }
        ok
    }

    /// Navigate back towards the root. False when already there.
    pub fn go_up(&mut self) -> bool {
        self.nav.pop().is_some()
    }

    /// Read an input's live value from the selected entity's runtime
    /// buffer, if the host has one.
    pub fn read_live_input(
        &self,
        host: &mut dyn SelectionHost,
        index: usize,
    ) -> Option<InputValue> {
        let field = self.resource.schema.inputs().get(index)?;
        let buf = host.live_input_buffer()?;
        buffer::read(buf, field).ok()
    }

    /// Write an input's live value into the selected entity's runtime
    /// buffer. `NoSelection` when the host has no buffer to offer.
    pub fn write_live_input(
        &self,
        host: &mut dyn SelectionHost,
        index: usize,
        value: InputValue,
    ) -> Result<(), SessionError> {
        let field = &self.resource.schema.inputs()[index];
        let buf = host.live_input_buffer().ok_or(SessionError::NoSelection)?;
        buffer::write(buf, field, value).map_err(SessionError::from)
    }

    fn nav_resolves(&self) -> bool {
        let Some(mut container) = self.resource.graph.as_container() else {
            return false;
        };
        for &index in &self.nav {
            match container.children.get(index).and_then(GraphNode::as_container) {
                Some(next) => container = next,
                None => return false,
            }
        }
        true
    }
}
