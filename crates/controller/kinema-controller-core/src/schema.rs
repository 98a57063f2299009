//! Typed input/constant declaration with derived buffer offsets.
//!
//! Inputs live in a flat runtime buffer owned by the host; each field's
//! byte offset is the cumulative width of the fields declared before
//! it. Constants are author-time literals and have no offset.

use serde::{Deserialize, Serialize};

use crate::buffer::InputValue;
use crate::codec::CodecError;
use crate::config::Config;
use crate::error::ControllerError;

/// Width-bearing type tag for inputs and constants.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum InputType {
    Bool,
    Int,
    Float,
}

impl InputType {
    /// Byte width inside the runtime buffer: Bool=1, Int=4, Float=4.
    pub fn width(self) -> usize {
        match self {
            InputType::Bool => 1,
            InputType::Int | InputType::Float => 4,
        }
    }

    /// Value a freshly typed constant starts from.
    pub fn default_value(self) -> InputValue {
        match self {
            InputType::Bool => InputValue::Bool(true),
            InputType::Int => InputValue::Int(0),
            InputType::Float => InputValue::Float(0.0),
        }
    }

    pub(crate) fn tag(self) -> u8 {
        match self {
            InputType::Bool => 0,
            InputType::Int => 1,
            InputType::Float => 2,
        }
    }

    pub(crate) fn from_tag(tag: u8) -> Result<Self, CodecError> {
        match tag {
            0 => Ok(InputType::Bool),
            1 => Ok(InputType::Int),
            2 => Ok(InputType::Float),
            other => Err(CodecError::InvalidTag(other)),
        }
    }
}

/// A named runtime input at a derived byte offset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InputField {
    name: String,
    ty: InputType,
    /// Derived; recomputed whenever a type changes or a field is added.
    offset: usize,
}

impl InputField {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> InputType {
        self.ty
    }

    pub fn offset(&self) -> usize {
        self.offset
    }
}

/// A named author-time literal; not part of the runtime buffer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConstantField {
    name: String,
    ty: InputType,
    value: InputValue,
}

impl ConstantField {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> InputType {
        self.ty
    }

    pub fn value(&self) -> InputValue {
        self.value
    }
}

/// Ordered input and constant declarations plus their layout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InputSchema {
    inputs: Vec<InputField>,
    constants: Vec<ConstantField>,
    config: Config,
}

impl InputSchema {
    pub fn new(config: Config) -> Self {
        Self {
            inputs: Vec::new(),
            constants: Vec::new(),
            config,
        }
    }

    pub fn inputs(&self) -> &[InputField] {
        &self.inputs
    }

    pub fn constants(&self) -> &[ConstantField] {
        &self.constants
    }

    /// Append a new Bool input with an empty name at the end of the
    /// buffer; returns its index. The host's runtime buffer becomes
    /// stale until resized to `total_size()`.
    pub fn add_input(&mut self) -> Result<usize, ControllerError> {
        if self.inputs.len() >= self.config.max_inputs {
            return Err(ControllerError::CapacityExceeded {
                what: "input",
                cap: self.config.max_inputs,
            });
        }
        self.inputs.push(InputField {
            name: String::new(),
            ty: InputType::Bool,
            offset: self.total_size(),
        });
        Ok(self.inputs.len() - 1)
    }

    /// Append a new Bool constant (value `true`); returns its index.
    pub fn add_constant(&mut self) -> Result<usize, ControllerError> {
        if self.constants.len() >= self.config.max_constants {
            return Err(ControllerError::CapacityExceeded {
                what: "constant",
                cap: self.config.max_constants,
            });
        }
        self.constants.push(ConstantField {
            name: String::new(),
            ty: InputType::Bool,
            value: InputValue::Bool(true),
        });
        Ok(self.constants.len() - 1)
    }

    pub fn set_input_name(&mut self, index: usize, name: &str) -> Result<(), ControllerError> {
        self.check_name(name)?;
        self.inputs[index].name = name.to_string();
        Ok(())
    }

    pub fn set_constant_name(&mut self, index: usize, name: &str) -> Result<(), ControllerError> {
        self.check_name(name)?;
        self.constants[index].name = name.to_string();
        Ok(())
    }

    /// Retag an input and rederive every offset.
    pub fn set_input_type(&mut self, index: usize, ty: InputType) {
        self.inputs[index].ty = ty;
        self.recalculate_offsets();
    }

    /// Retag a constant; its value resets to the new type's default.
    pub fn set_constant_type(&mut self, index: usize, ty: InputType) {
        let constant = &mut self.constants[index];
        if constant.ty != ty {
            constant.ty = ty;
            constant.value = ty.default_value();
        }
    }

    /// Overwrite a constant's literal; the type must already match.
    pub fn set_constant_value(
        &mut self,
        index: usize,
        value: InputValue,
    ) -> Result<(), ControllerError> {
        if self.constants[index].ty != value.ty() {
            return Err(ControllerError::TypeMismatch);
        }
        self.constants[index].value = value;
        Ok(())
    }

    /// Rederive offsets: each field starts where the previous one ends.
    /// Idempotent for an unchanged declaration list.
    pub fn recalculate_offsets(&mut self) {
        let mut offset = 0;
        for input in &mut self.inputs {
            input.offset = offset;
            offset += input.ty.width();
        }
    }

    /// Required runtime buffer length in bytes.
    pub fn total_size(&self) -> usize {
        self.inputs.iter().map(|i| i.ty.width()).sum()
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

    /// Rebuild a schema from decoded parts, validating caps and that
    /// stored offsets agree with recomputation. A disagreement means a
    /// malformed or hand-edited stream, not data to repair.
    pub(crate) fn from_parts(
        config: Config,
        inputs: Vec<(String, InputType, usize)>,
        constants: Vec<(String, InputType, InputValue)>,
    ) -> Result<Self, CodecError> {
        if inputs.len() > config.max_inputs || constants.len() > config.max_constants {
            return Err(CodecError::OutOfRange);
        }
        let mut offset = 0;
        let mut schema = Self::new(config);
        for (name, ty, stored_offset) in inputs {
            if name.len() > config.max_name_len || stored_offset != offset {
                return Err(CodecError::OutOfRange);
            }
            offset += ty.width();
            schema.inputs.push(InputField {
                name,
                ty,
                offset: stored_offset,
            });
        }
        for (name, ty, value) in constants {
            if name.len() > config.max_name_len || value.ty() != ty {
                return Err(CodecError::OutOfRange);
            }
            schema.constants.push(ConstantField { name, ty, value });
        }
        Ok(schema)
    }
}
