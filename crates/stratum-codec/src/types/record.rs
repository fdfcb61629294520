//! Encoded record types.
//!
//! A [`Record`] is what the codec hands to the backing store: a sortable
//! row key, three auxiliary key slots, a timestamp, and an opaque value.
//! Records are plain immutable values; the store compares them purely by
//! bytes.

/// The key half of an encoded record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordKey {
    /// The row key. Records sort by byte comparison of this field.
    pub row: Vec<u8>,
    /// The element's group name, UTF-8 encoded.
    pub column_family: Vec<u8>,
    /// The group-by properties, framed in schema order.
    pub column_qualifier: Vec<u8>,
    /// The serialized visibility property, or empty.
    pub visibility: Vec<u8>,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

impl RecordKey {
    /// A copy of this key under a different row, sharing every other slot.
    ///
    /// An edge's primary and reverse records differ only in their rows.
    #[must_use]
    pub fn with_row(&self, row: Vec<u8>) -> Self {
        Self {
            row,
            column_family: self.column_family.clone(),
            column_qualifier: self.column_qualifier.clone(),
            visibility: self.visibility.clone(),
            timestamp: self.timestamp,
        }
    }
}

/// A complete encoded record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// The sortable key.
    pub key: RecordKey,
    /// The value slot: non-group-by properties, framed in schema order.
    pub value: Vec<u8>,
}
