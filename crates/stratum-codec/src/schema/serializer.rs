//! Byte serializers for property values and vertex identities.
//!
//! A [`ByteSerializer`] turns a [`Value`] into bytes and back. Serializers
//! are bound to type definitions when the schema is built, so by the time
//! the codec runs there is no dispatch left to do; handing a serializer the
//! wrong value variant is a [`SerializationError`].
//!
//! Two families are provided:
//!
//! - **Ordered** serializers produce bytes whose lexicographic order matches
//!   the natural order of the values. The vertex serializer must come from
//!   this family, because the backing store's key order mirrors vertex
//!   order.
//! - **Raw** serializers write the machine representation big-endian. They
//!   are compact and cheap but do not sort across the sign boundary, which
//!   is fine for property slots.
//!
//! Null handling: a property absent from the element map is serialized via
//! [`ByteSerializer::serialize_null`] (empty by default). On decode, a
//! zero-length frame is materialized via [`ByteSerializer::deserialize_empty`],
//! which defaults to `None` so the property stays absent.

use std::fmt;

use crate::error::SerializationError;
use crate::types::Value;

/// Constant for flipping the sign bit of a 64-bit two's complement value.
const SIGN_FLIP_I64: u64 = 0x8000_0000_0000_0000;
/// Constant for flipping the sign bit of a 32-bit two's complement value.
const SIGN_FLIP_I32: u32 = 0x8000_0000;

/// Serializes one kind of [`Value`] to bytes and back.
pub trait ByteSerializer: fmt::Debug + Send + Sync {
    /// Serialize a value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is a variant this serializer is not
    /// bound to, or cannot be represented in its byte format.
    fn serialize(&self, value: &Value) -> Result<Vec<u8>, SerializationError>;

    /// Deserialize a value from bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not a valid encoding.
    fn deserialize(&self, bytes: &[u8]) -> Result<Value, SerializationError>;

    /// The byte form written for a null (absent) value.
    fn serialize_null(&self) -> Vec<u8> {
        Vec::new()
    }

    /// The value materialized for a zero-length frame, or `None` to leave
    /// the property absent.
    fn deserialize_empty(&self) -> Option<Value> {
        None
    }

    /// Whether byte order of serialized values matches their natural order.
    fn preserves_order(&self) -> bool {
        false
    }
}

fn wrong_type(expected: &'static str, value: &Value) -> SerializationError {
    SerializationError::WrongType { expected, actual: value.type_name() }
}

fn fixed_width<const N: usize>(bytes: &[u8], what: &str) -> Result<[u8; N], SerializationError> {
    bytes.try_into().map_err(|_| {
        SerializationError::Malformed(format!("{what} requires {N} bytes, got {}", bytes.len()))
    })
}

/// UTF-8 string serializer. Order-preserving.
#[derive(Debug, Default, Clone, Copy)]
pub struct StringSerializer;

impl ByteSerializer for StringSerializer {
    fn serialize(&self, value: &Value) -> Result<Vec<u8>, SerializationError> {
        match value {
            Value::String(s) => Ok(s.as_bytes().to_vec()),
            other => Err(wrong_type("string", other)),
        }
    }

    fn deserialize(&self, bytes: &[u8]) -> Result<Value, SerializationError> {
        let s = std::str::from_utf8(bytes)
            .map_err(|e| SerializationError::Malformed(format!("invalid UTF-8: {e}")))?;
        Ok(Value::String(s.to_owned()))
    }

    fn preserves_order(&self) -> bool {
        true
    }
}

/// Identity serializer for raw byte values. Order-preserving.
#[derive(Debug, Default, Clone, Copy)]
pub struct BytesSerializer;

impl ByteSerializer for BytesSerializer {
    fn serialize(&self, value: &Value) -> Result<Vec<u8>, SerializationError> {
        match value {
            Value::Bytes(b) => Ok(b.clone()),
            other => Err(wrong_type("bytes", other)),
        }
    }

    fn deserialize(&self, bytes: &[u8]) -> Result<Value, SerializationError> {
        Ok(Value::Bytes(bytes.to_vec()))
    }

    fn preserves_order(&self) -> bool {
        true
    }
}

/// i64 serializer: big-endian with the sign bit flipped, so byte order
/// matches numeric order. Order-preserving.
#[derive(Debug, Default, Clone, Copy)]
pub struct OrderedLongSerializer;

impl ByteSerializer for OrderedLongSerializer {
    fn serialize(&self, value: &Value) -> Result<Vec<u8>, SerializationError> {
        match value {
            Value::Int(i) => Ok(((*i as u64) ^ SIGN_FLIP_I64).to_be_bytes().to_vec()),
            other => Err(wrong_type("int", other)),
        }
    }

    fn deserialize(&self, bytes: &[u8]) -> Result<Value, SerializationError> {
        let raw = fixed_width::<8>(bytes, "ordered long")?;
        Ok(Value::Int((u64::from_be_bytes(raw) ^ SIGN_FLIP_I64) as i64))
    }

    fn preserves_order(&self) -> bool {
        true
    }
}

/// i32 serializer with the same sign-flip scheme as
/// [`OrderedLongSerializer`]. Values outside the i32 range are rejected.
#[derive(Debug, Default, Clone, Copy)]
pub struct OrderedIntegerSerializer;

impl ByteSerializer for OrderedIntegerSerializer {
    fn serialize(&self, value: &Value) -> Result<Vec<u8>, SerializationError> {
        match value {
            Value::Int(i) => {
                let narrow = i32::try_from(*i).map_err(|_| {
                    SerializationError::OutOfRange(format!("{i} does not fit in 32 bits"))
                })?;
                Ok(((narrow as u32) ^ SIGN_FLIP_I32).to_be_bytes().to_vec())
            }
            other => Err(wrong_type("int", other)),
        }
    }

    fn deserialize(&self, bytes: &[u8]) -> Result<Value, SerializationError> {
        let raw = fixed_width::<4>(bytes, "ordered integer")?;
        Ok(Value::Int(i64::from((u32::from_be_bytes(raw) ^ SIGN_FLIP_I32) as i32)))
    }

    fn preserves_order(&self) -> bool {
        true
    }
}

/// i32 serializer: plain big-endian two's complement. Not order-preserving
/// across the sign boundary.
#[derive(Debug, Default, Clone, Copy)]
pub struct RawIntegerSerializer;

impl ByteSerializer for RawIntegerSerializer {
    fn serialize(&self, value: &Value) -> Result<Vec<u8>, SerializationError> {
        match value {
            Value::Int(i) => {
                let narrow = i32::try_from(*i).map_err(|_| {
                    SerializationError::OutOfRange(format!("{i} does not fit in 32 bits"))
                })?;
                Ok(narrow.to_be_bytes().to_vec())
            }
            other => Err(wrong_type("int", other)),
        }
    }

    fn deserialize(&self, bytes: &[u8]) -> Result<Value, SerializationError> {
        let raw = fixed_width::<4>(bytes, "raw integer")?;
        Ok(Value::Int(i64::from(i32::from_be_bytes(raw))))
    }
}

/// f64 serializer: IEEE-754 bits, big-endian. Not order-preserving.
#[derive(Debug, Default, Clone, Copy)]
pub struct RawDoubleSerializer;

impl ByteSerializer for RawDoubleSerializer {
    fn serialize(&self, value: &Value) -> Result<Vec<u8>, SerializationError> {
        match value {
            Value::Float(f) => Ok(f.to_be_bytes().to_vec()),
            other => Err(wrong_type("float", other)),
        }
    }

    fn deserialize(&self, bytes: &[u8]) -> Result<Value, SerializationError> {
        let raw = fixed_width::<8>(bytes, "raw double")?;
        Ok(Value::Float(f64::from_be_bytes(raw)))
    }
}

/// Single-byte boolean serializer.
#[derive(Debug, Default, Clone, Copy)]
pub struct BooleanSerializer;

impl ByteSerializer for BooleanSerializer {
    fn serialize(&self, value: &Value) -> Result<Vec<u8>, SerializationError> {
        match value {
            Value::Bool(b) => Ok(vec![u8::from(*b)]),
            other => Err(wrong_type("bool", other)),
        }
    }

    fn deserialize(&self, bytes: &[u8]) -> Result<Value, SerializationError> {
        let [byte] = fixed_width::<1>(bytes, "boolean")?;
        match byte {
            0 => Ok(Value::Bool(false)),
            1 => Ok(Value::Bool(true)),
            other => Err(SerializationError::Malformed(format!("invalid boolean byte {other:#x}"))),
        }
    }

    fn preserves_order(&self) -> bool {
        true
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn roundtrip(serializer: &dyn ByteSerializer, value: Value) {
        let bytes = serializer.serialize(&value).unwrap();
        assert_eq!(serializer.deserialize(&bytes).unwrap(), value, "failed for {value:?}");
    }

    #[test]
    fn string_roundtrip() {
        for s in ["", "a", "hello world", "日本語"] {
            roundtrip(&StringSerializer, Value::String(s.to_owned()));
        }
    }

    #[test]
    fn string_rejects_invalid_utf8() {
        assert!(StringSerializer.deserialize(&[0xFF, 0xFE]).is_err());
    }

    #[test]
    fn bytes_roundtrip() {
        for b in [vec![], vec![0u8], vec![0, 1, 2, 255]] {
            roundtrip(&BytesSerializer, Value::Bytes(b));
        }
    }

    #[test]
    fn ordered_long_roundtrip() {
        for i in [i64::MIN, -1000, -1, 0, 1, 1000, i64::MAX] {
            roundtrip(&OrderedLongSerializer, Value::Int(i));
        }
    }

    #[test]
    fn ordered_long_preserves_order() {
        let values = [i64::MIN, i64::MIN + 1, -2, -1, 0, 1, 2, i64::MAX - 1, i64::MAX];
        for pair in values.windows(2) {
            let a = OrderedLongSerializer.serialize(&Value::Int(pair[0])).unwrap();
            let b = OrderedLongSerializer.serialize(&Value::Int(pair[1])).unwrap();
            assert!(a < b, "{} should sort before {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn ordered_integer_roundtrip_and_range() {
        for i in [i64::from(i32::MIN), -1, 0, 1, i64::from(i32::MAX)] {
            roundtrip(&OrderedIntegerSerializer, Value::Int(i));
        }
        assert!(matches!(
            OrderedIntegerSerializer.serialize(&Value::Int(i64::from(i32::MAX) + 1)),
            Err(SerializationError::OutOfRange(_))
        ));
    }

    #[test]
    fn raw_integer_is_plain_big_endian() {
        let bytes = RawIntegerSerializer.serialize(&Value::Int(3)).unwrap();
        assert_eq!(bytes, vec![0x00, 0x00, 0x00, 0x03]);
        roundtrip(&RawIntegerSerializer, Value::Int(-3));
    }

    #[test]
    fn raw_double_is_ieee_bits_big_endian() {
        let bytes = RawDoubleSerializer.serialize(&Value::Float(1.0)).unwrap();
        assert_eq!(bytes, vec![0x3F, 0xF0, 0, 0, 0, 0, 0, 0]);
        for f in [0.0, -0.0, 1.5, f64::MAX, f64::MIN_POSITIVE, f64::INFINITY] {
            roundtrip(&RawDoubleSerializer, Value::Float(f));
        }
    }

    #[test]
    fn boolean_roundtrip_and_rejects_garbage() {
        roundtrip(&BooleanSerializer, Value::Bool(false));
        roundtrip(&BooleanSerializer, Value::Bool(true));
        assert!(BooleanSerializer.deserialize(&[2]).is_err());
        assert!(BooleanSerializer.deserialize(&[]).is_err());
    }

    #[test]
    fn type_mismatch_is_reported() {
        let err = OrderedLongSerializer.serialize(&Value::String("x".to_owned())).unwrap_err();
        assert!(matches!(err, SerializationError::WrongType { expected: "int", actual: "string" }));
    }

    #[test]
    fn null_defaults_are_empty_and_absent() {
        assert!(StringSerializer.serialize_null().is_empty());
        assert!(StringSerializer.deserialize_empty().is_none());
    }
}
