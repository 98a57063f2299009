//! Bounds-checked access to the external runtime input buffer.
//!
//! The flat buffer belongs to the host runtime; the schema only knows
//! the layout. Reads and writes go through these helpers instead of
//! reinterpreting raw memory.

use serde::{Deserialize, Serialize};

use crate::error::ControllerError;
use crate::schema::{InputField, InputType};

/// A single typed input or constant value.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum InputValue {
    Bool(bool),
    Int(i32),
    Float(f32),
}

impl InputValue {
    pub fn ty(self) -> InputType {
        match self {
            InputValue::Bool(_) => InputType::Bool,
            InputValue::Int(_) => InputType::Int,
            InputValue::Float(_) => InputType::Float,
        }
    }
}

fn check_span(buf: &[u8], field: &InputField) -> Result<usize, ControllerError> {
    let offset = field.offset();
    let end = offset + field.ty().width();
    if end > buf.len() {
        return Err(ControllerError::BufferOutOfRange {
            offset,
            len: buf.len(),
        });
    }
    Ok(offset)
}

/// Read the live value of `field` out of the runtime buffer.
pub fn read(buf: &[u8], field: &InputField) -> Result<InputValue, ControllerError> {
    let at = check_span(buf, field)?;
    Ok(match field.ty() {
        InputType::Bool => InputValue::Bool(buf[at] != 0),
        InputType::Int => InputValue::Int(i32::from_le_bytes([
            buf[at],
            buf[at + 1],
            buf[at + 2],
            buf[at + 3],
        ])),
        InputType::Float => InputValue::Float(f32::from_le_bytes([
            buf[at],
            buf[at + 1],
            buf[at + 2],
            buf[at + 3],
        ])),
    })
}

/// Write a live value into the runtime buffer. The value's type must
/// match the field's declared type.
pub fn write(buf: &mut [u8], field: &InputField, value: InputValue) -> Result<(), ControllerError> {
    if value.ty() != field.ty() {
        return Err(ControllerError::TypeMismatch);
    }
    let at = check_span(buf, field)?;
    match value {
        InputValue::Bool(b) => buf[at] = u8::from(b),
        InputValue::Int(i) => buf[at..at + 4].copy_from_slice(&i.to_le_bytes()),
        InputValue::Float(f) => buf[at..at + 4].copy_from_slice(&f.to_le_bytes()),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::schema::InputSchema;

    fn schema_with(types: &[InputType]) -> InputSchema {
        let mut schema = InputSchema::new(Config::default());
        for &ty in types {
            let i = schema.add_input().unwrap();
            schema.set_input_type(i, ty);
        }
        schema
    }

    #[test]
    fn typed_round_trip() {
        let schema = schema_with(&[InputType::Bool, InputType::Int, InputType::Float]);
        let mut buf = vec![0u8; schema.total_size()];

        write(&mut buf, &schema.inputs()[0], InputValue::Bool(true)).unwrap();
        write(&mut buf, &schema.inputs()[1], InputValue::Int(-7)).unwrap();
        write(&mut buf, &schema.inputs()[2], InputValue::Float(0.25)).unwrap();

        assert_eq!(
            read(&buf, &schema.inputs()[0]).unwrap(),
            InputValue::Bool(true)
        );
        assert_eq!(read(&buf, &schema.inputs()[1]).unwrap(), InputValue::Int(-7));
        assert_eq!(
            read(&buf, &schema.inputs()[2]).unwrap(),
            InputValue::Float(0.25)
        );
    }

    #[test]
    fn short_buffer_is_rejected() {
        let schema = schema_with(&[InputType::Int]);
        let buf = vec![0u8; 2];
        assert_eq!(
            read(&buf, &schema.inputs()[0]),
            Err(ControllerError::BufferOutOfRange { offset: 0, len: 2 })
        );
    }

    #[test]
    fn mismatched_write_is_rejected() {
        let schema = schema_with(&[InputType::Float]);
        let mut buf = vec![0u8; schema.total_size()];
        assert_eq!(
            write(&mut buf, &schema.inputs()[0], InputValue::Int(1)),
            Err(ControllerError::TypeMismatch)
        );
    }
}
