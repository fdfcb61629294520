//! Serialization of ordered property lists.
//!
//! The column qualifier and the value slot are both concatenations of
//! `length ∥ bytes` frames, one frame per property name, in the schema's
//! declared order. There is no count or total length: the decoder walks
//! frames until it runs out of names or bytes. A record whose trailing
//! properties are missing is legal and decodes to the properties that are
//! present; a record that ends mid-frame is corrupt.
//!
//! A property with no bound serializer is written as an empty frame and
//! skipped on decode; both sides report the event on the warning channel.

use tracing::warn;

use crate::error::CodecError;
use crate::schema::ElementDefinition;
use crate::types::Properties;

use super::varint;

/// Serialize the named properties into `buf`, one frame per name in the
/// order given.
///
/// Absent values are written via the serializer's null sentinel; names with
/// no bound serializer produce an empty frame.
///
/// # Errors
///
/// Returns [`CodecError::Serialization`] if a serializer rejects a value.
pub fn serialize_properties<'a>(
    group: &str,
    def: &ElementDefinition,
    names: impl IntoIterator<Item = &'a str>,
    props: &Properties,
    buf: &mut Vec<u8>,
) -> Result<(), CodecError> {
    for name in names {
        let Some(serializer) = def.serializer(name) else {
            warn!(group, property = name, "no serializer bound for property, writing empty frame");
            varint::write_length(0, buf);
            continue;
        };
        let bytes = match props.get(name) {
            Some(value) => serializer
                .serialize(value)
                .map_err(|source| CodecError::serialization(name, source))?,
            None => serializer.serialize_null(),
        };
        varint::write_length(bytes.len(), buf);
        buf.extend_from_slice(&bytes);
    }
    Ok(())
}

/// Decode framed properties from `bytes` into `props`, walking `names` in
/// order.
///
/// Stops early when the names or the bytes run out. A non-empty frame is
/// handed to the serializer's `deserialize`; an empty frame materializes
/// `deserialize_empty()` only when that returns a value, so absent stays
/// absent for serializers without an empty form.
///
/// # Errors
///
/// Returns [`CodecError::CorruptRecord`] for truncated framing and
/// [`CodecError::Serialization`] if a serializer rejects its bytes.
pub fn deserialize_properties<'a>(
    group: &str,
    def: &ElementDefinition,
    names: impl IntoIterator<Item = &'a str>,
    bytes: &[u8],
    props: &mut Properties,
) -> Result<(), CodecError> {
    let mut cursor = 0;
    for name in names {
        if cursor >= bytes.len() {
            break;
        }
        let (start, end) = varint::read_length(bytes, cursor)?;
        cursor = end;
        let Some(serializer) = def.serializer(name) else {
            warn!(group, property = name, "no serializer bound for property, skipping frame");
            continue;
        };
        if start < end {
            let value = serializer
                .deserialize(&bytes[start..end])
                .map_err(|source| CodecError::serialization(name, source))?;
            props.insert(name.to_owned(), value);
        } else if let Some(value) = serializer.deserialize_empty() {
            props.insert(name.to_owned(), value);
        }
    }
    Ok(())
}

/// The byte prefix of `bytes` covering its first `count` frames.
///
/// The returned slice borrows from the input; when the input holds `count`
/// frames or fewer it is returned whole, so projecting every property is
/// free.
///
/// # Errors
///
/// Returns [`CodecError::CorruptRecord`] if a frame inside the prefix is
/// truncated.
pub fn prefix_for_first_k(bytes: &[u8], count: usize) -> Result<&[u8], CodecError> {
    let mut cursor = 0;
    let mut seen = 0;
    while seen < count && cursor < bytes.len() {
        let (_, end) = varint::read_length(bytes, cursor)?;
        cursor = end;
        seen += 1;
    }
    Ok(&bytes[..cursor])
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::schema::{
        OrderedLongSerializer, RawDoubleSerializer, StringSerializer, TypeDefinition,
    };
    use crate::types::Value;

    fn def() -> ElementDefinition {
        ElementDefinition::new()
            .with_property("name", TypeDefinition::new(StringSerializer))
            .with_property("count", TypeDefinition::new(OrderedLongSerializer))
            .with_property("score", TypeDefinition::new(RawDoubleSerializer))
    }

    fn names(def: &ElementDefinition) -> impl Iterator<Item = &str> {
        def.properties().iter().map(String::as_str)
    }

    fn props(entries: &[(&str, Value)]) -> Properties {
        entries.iter().map(|(name, value)| ((*name).to_owned(), value.clone())).collect()
    }

    fn serialize(def: &ElementDefinition, props: &Properties) -> Vec<u8> {
        let mut buf = Vec::new();
        serialize_properties("g", def, names(def), props, &mut buf).unwrap();
        buf
    }

    #[test]
    fn roundtrip_full_list() {
        let def = def();
        let input = props(&[
            ("name", Value::String("alice".to_owned())),
            ("count", Value::Int(-3)),
            ("score", Value::Float(0.25)),
        ]);
        let bytes = serialize(&def, &input);

        let mut output = Properties::new();
        deserialize_properties("g", &def, names(&def), &bytes, &mut output).unwrap();
        assert_eq!(output, input);
    }

    #[test]
    fn absent_value_roundtrips_as_absent() {
        let def = def();
        let input = props(&[("count", Value::Int(9))]);
        let bytes = serialize(&def, &input);

        let mut output = Properties::new();
        deserialize_properties("g", &def, names(&def), &bytes, &mut output).unwrap();
        assert_eq!(output, input);
    }

    #[test]
    fn empty_input_decodes_to_nothing() {
        let def = def();
        let mut output = Properties::new();
        deserialize_properties("g", &def, names(&def), &[], &mut output).unwrap();
        assert!(output.is_empty());
    }

    #[test]
    fn tail_truncation_yields_a_prefix() {
        let def = def();
        let input = props(&[
            ("name", Value::String("bob".to_owned())),
            ("count", Value::Int(1)),
            ("score", Value::Float(2.0)),
        ]);
        let bytes = serialize(&def, &input);

        // Keep only the first two frames.
        let cut = prefix_for_first_k(&bytes, 2).unwrap();
        let mut output = Properties::new();
        deserialize_properties("g", &def, names(&def), cut, &mut output).unwrap();
        assert_eq!(
            output,
            props(&[("name", Value::String("bob".to_owned())), ("count", Value::Int(1))])
        );
    }

    #[test]
    fn prefix_covers_exactly_k_frames() {
        let def = def();
        let all = props(&[
            ("name", Value::String("carol".to_owned())),
            ("count", Value::Int(7)),
            ("score", Value::Float(1.5)),
        ]);
        let bytes = serialize(&def, &all);

        let mut first_two = Vec::new();
        serialize_properties("g", &def, ["name", "count"], &all, &mut first_two).unwrap();
        assert_eq!(prefix_for_first_k(&bytes, 2).unwrap(), first_two.as_slice());
        assert_eq!(prefix_for_first_k(&bytes, 0).unwrap(), &[] as &[u8]);
    }

    #[test]
    fn prefix_of_everything_is_the_input() {
        let def = def();
        let bytes = serialize(&def, &props(&[("count", Value::Int(2))]));
        let whole = prefix_for_first_k(&bytes, 3).unwrap();
        assert_eq!(whole.as_ptr(), bytes.as_ptr());
        assert_eq!(whole.len(), bytes.len());
    }

    #[test]
    fn unknown_type_writes_an_empty_frame() {
        let def = ElementDefinition::new()
            .with_property("ghost", TypeDefinition::unserialized())
            .with_property("count", TypeDefinition::new(OrderedLongSerializer));
        let input = props(&[("ghost", Value::Int(1)), ("count", Value::Int(5))]);

        let mut buf = Vec::new();
        serialize_properties("g", &def, names(&def), &input, &mut buf).unwrap();
        // One empty frame, then the framed long.
        assert_eq!(buf[0], 0);
        assert_eq!(buf[1], 8);

        let mut output = Properties::new();
        deserialize_properties("g", &def, names(&def), &buf, &mut output).unwrap();
        assert_eq!(output, props(&[("count", Value::Int(5))]));
    }

    #[test]
    fn corrupt_frame_length_is_an_error() {
        let def = def();
        let mut bytes = serialize(&def, &props(&[("name", Value::String("d".to_owned()))]));
        // Declare more bytes than remain.
        *bytes.first_mut().unwrap() = 100;
        let mut output = Properties::new();
        let err =
            deserialize_properties("g", &def, names(&def), &bytes, &mut output).unwrap_err();
        assert!(matches!(err, CodecError::CorruptRecord(_)));
        assert!(matches!(prefix_for_first_k(&bytes, 1), Err(CodecError::CorruptRecord(_))));
    }
}
