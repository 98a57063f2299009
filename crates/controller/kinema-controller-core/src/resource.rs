//! Controller resource: the persisted aggregate and its wire protocol.
//!
//! Layout, in order: magic + version, input schema, slot/set mapping,
//! then the graph's own bytes. No compression; the stream must
//! round-trip exactly. Deserialization builds a fresh candidate and
//! fails without side effects, so a caller can always fall back to an
//! empty resource on corrupt input.

use crate::buffer::InputValue;
use crate::clips::ClipLoader;
use crate::codec::{CodecError, Reader, Writer};
use crate::config::Config;
use crate::error::ControllerError;
use crate::graph::GraphNode;
use crate::hash::HashId;
use crate::mapping::{MatrixEntry, SlotSetMap};
use crate::schema::{InputSchema, InputType};

pub const FORMAT_MAGIC: [u8; 4] = *b"KCTL";
pub const FORMAT_VERSION: u32 = 1;

/// One controller: schema + mapping + opaque graph.
#[derive(Clone, Debug, PartialEq)]
pub struct ControllerResource {
    pub schema: InputSchema,
    pub mapping: SlotSetMap,
    pub graph: GraphNode,
    config: Config,
}

impl ControllerResource {
    /// A fresh, empty controller.
    pub fn new(config: Config) -> Self {
        Self {
            schema: InputSchema::new(config),
            mapping: SlotSetMap::new(config),
            graph: GraphNode::empty_root(),
            config,
        }
    }

    pub fn config(&self) -> Config {
        self.config
    }

    /// Write the whole controller to `w`.
    pub fn serialize(&self, w: &mut Writer) -> Result<(), CodecError> {
        let max_name = self.config.max_name_len;

        w.write_bytes(&FORMAT_MAGIC);
        w.write_u32(FORMAT_VERSION);

        w.write_u32(self.schema.inputs().len() as u32);
        for input in self.schema.inputs() {
            w.write_string(input.name(), max_name)?;
            w.write_u8(input.ty().tag());
            w.write_u32(input.offset() as u32);
        }
        w.write_u32(self.schema.constants().len() as u32);
        for constant in self.schema.constants() {
            w.write_string(constant.name(), max_name)?;
            w.write_u8(constant.ty().tag());
            match constant.value() {
                InputValue::Bool(b) => w.write_bool(b),
                InputValue::Int(i) => w.write_i32(i),
                InputValue::Float(f) => w.write_f32(f),
            }
        }

        w.write_u32(self.mapping.sets().len() as u32);
        for set in self.mapping.sets() {
            w.write_string(set.name(), max_name)?;
        }
        w.write_u32(self.mapping.slots().len() as u32);
        for slot in self.mapping.slots() {
            w.write_string(slot.name(), max_name)?;
        }
        w.write_u32(self.mapping.entries().len() as u32);
        for entry in self.mapping.entries() {
            w.write_u32(entry.set as u32);
            w.write_u32(entry.slot.0);
            w.write_string(&entry.path, self.config.max_path_len)?;
        }

        self.graph.encode(w)
    }

    /// Serialize into a fresh byte buffer.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CodecError> {
        let mut w = Writer::with_capacity(512);
        self.serialize(&mut w)?;
        Ok(w.into_vec())
    }

    /// Parse a controller out of `bytes`, then resolve its clips
    /// through `loader`. A clip that fails to load leaves its entry
    /// unresolved (missing art never blocks opening a controller);
    /// anything structurally wrong with the stream fails the whole
    /// parse with nothing loaded and nothing mutated.
    pub fn deserialize(
        bytes: &[u8],
        config: Config,
        loader: &mut dyn ClipLoader,
    ) -> Result<Self, ControllerError> {
        let mut r = Reader::new(bytes);
        let mut out = Self::read_from(&mut r, config)?;
        if !r.is_at_end() {
            return Err(CodecError::OutOfRange.into());
        }
        out.resolve_clips(loader);
        Ok(out)
    }

    /// Release every clip this controller holds. Callers replacing a
    /// resource do this first so the swap never leaks loaded clips.
    pub fn release_clips(&mut self, loader: &mut dyn ClipLoader) {
        self.mapping.release_clips(loader);
    }

    /// Load the clip behind every populated entry that has a path but
    /// no live handle yet, warning on assets that cannot be loaded.
    pub fn resolve_clips(&mut self, loader: &mut dyn ClipLoader) {
        self.mapping.resolve_clips(loader);
    }

    fn read_from(r: &mut Reader, config: Config) -> Result<Self, ControllerError> {
        let magic: [u8; 4] = r.read_array()?;
        if magic != FORMAT_MAGIC {
            return Err(ControllerError::UnsupportedFormat);
        }
        if r.read_u32()? != FORMAT_VERSION {
            return Err(ControllerError::UnsupportedFormat);
        }

        let input_count = r.read_u32()? as usize;
        if input_count > config.max_inputs {
            return Err(CodecError::OutOfRange.into());
        }
        let mut inputs = Vec::with_capacity(input_count);
        for _ in 0..input_count {
            let name = r.read_string(config.max_name_len)?;
            let ty = InputType::from_tag(r.read_u8()?)?;
            let offset = r.read_u32()? as usize;
            inputs.push((name, ty, offset));
        }
        let constant_count = r.read_u32()? as usize;
        if constant_count > config.max_constants {
            return Err(CodecError::OutOfRange.into());
        }
        let mut constants = Vec::with_capacity(constant_count);
        for _ in 0..constant_count {
            let name = r.read_string(config.max_name_len)?;
            let ty = InputType::from_tag(r.read_u8()?)?;
            let value = match ty {
                InputType::Bool => InputValue::Bool(r.read_bool()?),
                InputType::Int => InputValue::Int(r.read_i32()?),
                InputType::Float => InputValue::Float(r.read_f32()?),
            };
            constants.push((name, ty, value));
        }
        let schema = InputSchema::from_parts(config, inputs, constants)?;

        let mut mapping = SlotSetMap::new(config);
        let set_count = r.read_u32()? as usize;
        for _ in 0..set_count {
            mapping.push_set_raw(r.read_string(config.max_name_len)?);
        }
        let slot_count = r.read_u32()? as usize;
        for _ in 0..slot_count {
            let name = r.read_string(config.max_name_len)?;
            let hash = HashId::of_name(&name);
            if mapping.slots().iter().any(|s| s.hash() == hash) {
                return Err(CodecError::OutOfRange.into());
            }
            mapping.push_slot_raw(name);
        }
        let entry_count = r.read_u32()? as usize;
        for _ in 0..entry_count {
            let set = r.read_u32()? as usize;
            if set >= mapping.sets().len() {
                return Err(CodecError::OutOfRange.into());
            }
            let slot = HashId(r.read_u32()?);
            if mapping.entry(set, slot).is_some() {
                return Err(CodecError::OutOfRange.into());
            }
            let path = r.read_string(config.max_path_len)?;
            mapping.push_entry_raw(MatrixEntry {
                set,
                slot,
                path,
                clip: None,
            });
        }

        let graph = GraphNode::decode(r)?;

        Ok(Self {
            schema,
            mapping,
            graph,
            config,
        })
    }
}
