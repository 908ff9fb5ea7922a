//! JSON wire codec for [`TurnInstruction`] (std only).
//!
//! Messages look like:
//!
//! ```json
//! { "TurnInstruction": { "command": 2, "rotation": 1, "direction": 0 } }
//! ```
//!
//! All three fields must be present and integer-typed. `rotation` must fit a
//! `u32`.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::DecodeError;

use super::{Direction, TurnInstruction};

/// Name of the object wrapping the instruction fields.
pub const OBJECT_NAME: &str = "TurnInstruction";

#[derive(Serialize)]
struct Envelope {
    #[serde(rename = "TurnInstruction")]
    instruction: WireInstruction,
}

#[derive(Serialize)]
struct WireInstruction {
    command: i64,
    rotation: u32,
    direction: i64,
}

/// Decode a wire message.
///
/// # Errors
///
/// Returns a [`DecodeError`] naming the offending field when the message is
/// malformed, the object is missing, or a field is missing or not an integer.
pub fn decode(message: &[u8]) -> Result<TurnInstruction, DecodeError> {
    let root: Value = serde_json::from_slice(message).map_err(|e| DecodeError::Syntax {
        line: e.line(),
        column: e.column(),
    })?;

    let fields = match root.get(OBJECT_NAME) {
        None => return Err(DecodeError::MissingObject),
        Some(Value::Object(fields)) => fields,
        Some(_) => return Err(DecodeError::NotAnObject),
    };

    let command = integer(fields, "command")?;
    let rotation = integer(fields, "rotation")?;
    let direction = integer(fields, "direction")?;

    let rotation = u32::try_from(rotation).map_err(|_| DecodeError::OutOfRange {
        field: "rotation",
    })?;

    Ok(TurnInstruction::from_code(
        command,
        rotation,
        Direction::from_wire(direction),
    ))
}

/// Decode a wire message held in a string.
///
/// # Errors
///
/// Same as [`decode`].
pub fn decode_str(message: &str) -> Result<TurnInstruction, DecodeError> {
    decode(message.as_bytes())
}

/// Encode an instruction as a wire message.
pub fn encode(instruction: &TurnInstruction) -> String {
    let envelope = Envelope {
        instruction: WireInstruction {
            command: instruction.command_code(),
            rotation: instruction.rotation(),
            direction: instruction.direction().to_wire(),
        },
    };
    // Only integer fields; serializing to a string cannot fail
    serde_json::to_string(&envelope).unwrap_or_default()
}

fn integer(fields: &Map<String, Value>, field: &'static str) -> Result<i64, DecodeError> {
    let value = fields.get(field).ok_or(DecodeError::MissingField(field))?;
    match value {
        Value::Number(n) if n.is_i64() => n.as_i64().ok_or(DecodeError::OutOfRange { field }),
        Value::Number(n) if n.is_u64() => Err(DecodeError::OutOfRange { field }),
        _ => Err(DecodeError::WrongType {
            field,
            expected: "integer",
        }),
    }
}
