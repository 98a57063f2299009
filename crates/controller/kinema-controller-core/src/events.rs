//! Event-type catalog: hash-identified kinds with fixed payloads.
//!
//! Graph transitions carry fixed-size event payloads. The catalog maps
//! a kind hash to the payload's byte size, a display label, and a
//! host-supplied editor behavior that mutates the payload in place.
//! Registration is append-only for the life of a session.

use std::fmt;

use crate::buffer::InputValue;
use crate::graph::GraphNode;
use crate::hash::HashId;
use crate::schema::InputType;

/// Name of the built-in event kind that forces a runtime input to a
/// value when a transition fires.
pub const SET_INPUT: &str = "set_input";

/// Host-supplied editor behavior. Receives exactly `payload_size`
/// bytes plus the node that owns the event.
pub type EventEditor = Box<dyn FnMut(&mut [u8], &mut GraphNode)>;

/// One registered event kind.
pub struct EventTypeDescriptor {
    pub kind: HashId,
    pub label: String,
    /// Fixed payload length in bytes; set by the registrant.
    pub payload_size: usize,
    pub editor: Option<EventEditor>,
}

impl EventTypeDescriptor {
    /// Run the editor behavior on a payload. A kind registered without
    /// a behavior is displayable but not editable; this is a no-op.
    pub fn edit(&mut self, payload: &mut [u8], node: &mut GraphNode) {
        debug_assert_eq!(payload.len(), self.payload_size);
        if let Some(editor) = &mut self.editor {
            editor(payload, node);
        }
    }
}

impl fmt::Debug for EventTypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventTypeDescriptor")
            .field("kind", &self.kind)
            .field("label", &self.label)
            .field("payload_size", &self.payload_size)
            .field("editor", &self.editor.is_some())
            .finish()
    }
}

/// Append-only registry of event kinds.
#[derive(Debug, Default)]
pub struct EventTypeCatalog {
    types: Vec<EventTypeDescriptor>,
}

impl EventTypeCatalog {
    /// Register a kind under `hash(name)` with an empty payload; the
    /// caller fills in label, size, and behavior. Duplicate names are
    /// not detected: lookup returns the first registration.
    pub fn register(&mut self, name: &str) -> &mut EventTypeDescriptor {
        self.types.push(EventTypeDescriptor {
            kind: HashId::of_name(name),
            label: String::new(),
            payload_size: 0,
            editor: None,
        });
        let last = self.types.len() - 1;
        &mut self.types[last]
    }

    /// First descriptor registered under `kind`, if any. Callers must
    /// treat `None` as a recoverable state (skip or show raw bytes),
    /// never a crash.
    pub fn find(&self, kind: HashId) -> Option<&EventTypeDescriptor> {
        self.types.iter().find(|t| t.kind == kind)
    }

    pub fn find_mut(&mut self, kind: HashId) -> Option<&mut EventTypeDescriptor> {
        self.types.iter_mut().find(|t| t.kind == kind)
    }

    /// Indexed access for GUI enumeration, in registration order.
    pub fn get(&self, index: usize) -> Option<&EventTypeDescriptor> {
        self.types.get(index)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EventTypeDescriptor> {
        self.types.iter()
    }
}

/// Payload of the built-in `set_input` event: an input index plus four
/// value bytes whose meaning follows the selected input's declared
/// type. Eight bytes on the wire, little-endian.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SetInputPayload {
    pub input: i32,
    raw: [u8; 4],
}

impl SetInputPayload {
    pub const SIZE: usize = 8;

    pub fn new(input: i32, value: InputValue) -> Self {
        let mut payload = Self {
            input,
            raw: [0; 4],
        };
        payload.set_value(value);
        payload
    }

    pub fn to_bytes(self) -> [u8; Self::SIZE] {
        let mut out = [0u8; Self::SIZE];
        out[..4].copy_from_slice(&self.input.to_le_bytes());
        out[4..].copy_from_slice(&self.raw);
        out
    }

    /// `None` when the slice is not exactly `SIZE` bytes long.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() != Self::SIZE {
            return None;
        }
        Some(Self {
            input: i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
            raw: [bytes[4], bytes[5], bytes[6], bytes[7]],
        })
    }

    /// Interpret the value bytes under the given input type.
    pub fn value(&self, ty: InputType) -> InputValue {
        match ty {
            InputType::Bool => InputValue::Bool(self.raw[0] != 0),
            InputType::Int => InputValue::Int(i32::from_le_bytes(self.raw)),
            InputType::Float => InputValue::Float(f32::from_le_bytes(self.raw)),
        }
    }

    pub fn set_value(&mut self, value: InputValue) {
        self.raw = match value {
            InputValue::Bool(b) => [u8::from(b), 0, 0, 0],
            InputValue::Int(i) => i.to_le_bytes(),
            InputValue::Float(f) => f.to_le_bytes(),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_keys_by_name_hash() {
        let mut catalog = EventTypeCatalog::default();
        let descriptor = catalog.register("set_input");
        descriptor.payload_size = SetInputPayload::SIZE;
        assert_eq!(descriptor.kind, HashId::of_name("set_input"));
        assert!(catalog.find(HashId::of_name("set_input")).is_some());
        assert!(catalog.find(HashId::of_name("missing")).is_none());
    }

    #[test]
    fn duplicate_registration_resolves_to_first() {
        let mut catalog = EventTypeCatalog::default();
        catalog.register("fire").label = "first".into();
        catalog.register("fire").label = "second".into();
        assert_eq!(catalog.len(), 2);
        let found = catalog.find(HashId::of_name("fire")).unwrap();
        assert_eq!(found.label, "first");
    }

    #[test]
    fn set_input_payload_round_trips() {
        let payload = SetInputPayload::new(3, InputValue::Float(0.5));
        let back = SetInputPayload::from_bytes(&payload.to_bytes()).unwrap();
        assert_eq!(back, payload);
        assert_eq!(back.value(InputType::Float), InputValue::Float(0.5));

        let payload = SetInputPayload::new(0, InputValue::Bool(true));
        assert_eq!(
            SetInputPayload::from_bytes(&payload.to_bytes())
                .unwrap()
                .value(InputType::Bool),
            InputValue::Bool(true)
        );

        assert!(SetInputPayload::from_bytes(&[0; 3]).is_none());
    }

    #[test]
    fn edit_runs_the_registered_behavior() {
        let mut catalog = EventTypeCatalog::default();
        let descriptor = catalog.register("set_input");
        descriptor.payload_size = SetInputPayload::SIZE;
        descriptor.editor = Some(Box::new(|payload, _node| {
            let mut decoded = SetInputPayload::from_bytes(payload).unwrap();
            decoded.input = 7;
            payload.copy_from_slice(&decoded.to_bytes());
        }));

        let mut node = GraphNode::empty_root();
        let mut payload = SetInputPayload::new(0, InputValue::Int(1)).to_bytes();
        catalog
            .find_mut(HashId::of_name("set_input"))
            .unwrap()
            .edit(&mut payload, &mut node);
        assert_eq!(SetInputPayload::from_bytes(&payload).unwrap().input, 7);
    }
}
