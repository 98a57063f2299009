//! Host-engine seam consumed by the editor session.

use std::path::PathBuf;

/// What the session needs from the hosting engine's selection state.
/// The engine owns entities, running controller instances, and the
/// flat input buffer; the session only peeks through this trait.
pub trait SelectionHost {
    /// Controller source path of the currently selected entity, if
    /// one is selected and carries a controller.
    fn selected_controller_path(&self) -> Option<PathBuf>;

    /// Live runtime input buffer of the selected entity, for the
    /// input overlay. Sized by the running controller instance, not
    /// by this editor.
    fn live_input_buffer(&mut self) -> Option<&mut [u8]>;
}
