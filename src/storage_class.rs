//! SQLite storage classes and the mapping from field types onto them.

use core::fmt::{self, Display};

/// SQLite fundamental datatypes.
///
/// The discriminants are SQLite's own datatype codes (`SQLITE_INTEGER`
/// through `SQLITE_NULL`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum StorageClass {
    /// Signed integer.
    Integer = 1,
    /// IEEE 754 double.
    Real = 2,
    /// Text string.
    Text = 3,
    /// Binary blob.
    Blob = 4,
    /// SQL NULL.
    Null = 5,
}

impl StorageClass {
    /// Returns the SQLite datatype code.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Returns the storage class for a SQLite datatype code.
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::Integer),
            2 => Some(Self::Real),
            3 => Some(Self::Text),
            4 => Some(Self::Blob),
            5 => Some(Self::Null),
            _ => None,
        }
    }
}

impl Display for StorageClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StorageClass::Integer => "INTEGER",
            StorageClass::Real => "REAL",
            StorageClass::Text => "TEXT",
            StorageClass::Blob => "BLOB",
            StorageClass::Null => "NULL",
        })
    }
}

#[cfg(feature = "rusqlite")]
impl From<StorageClass> for rusqlite::types::Type {
    fn from(class: StorageClass) -> Self {
        match class {
            StorageClass::Integer => rusqlite::types::Type::Integer,
            StorageClass::Real => rusqlite::types::Type::Real,
            StorageClass::Text => rusqlite::types::Type::Text,
            StorageClass::Blob => rusqlite::types::Type::Blob,
            StorageClass::Null => rusqlite::types::Type::Null,
        }
    }
}

/// Types of in-memory field values stored in SQLite columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FieldType {
    /// 32-bit integer.
    Integer,
    /// 64-bit integer.
    Integer64,
    /// Double precision float.
    Real,
    /// Character string.
    String,
    /// Raw bytes.
    Binary,
    /// Calendar date.
    Date,
    /// Time of day.
    Time,
    /// Date and time.
    DateTime,
}

impl FieldType {
    /// Storage class used for columns holding this field type.
    ///
    /// Temporal values are stored as ISO 8601 text.
    #[must_use]
    pub const fn storage_class(self) -> StorageClass {
        match self {
            FieldType::Integer | FieldType::Integer64 => StorageClass::Integer,
            FieldType::Real => StorageClass::Real,
            FieldType::Binary => StorageClass::Blob,
            FieldType::String | FieldType::Date | FieldType::Time | FieldType::DateTime => {
                StorageClass::Text
            }
        }
    }
}

impl From<FieldType> for StorageClass {
    fn from(field_type: FieldType) -> Self {
        field_type.storage_class()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_codes_match_sqlite() {
        assert_eq!(StorageClass::Integer.code(), 1);
        assert_eq!(StorageClass::Real.code(), 2);
        assert_eq!(StorageClass::Text.code(), 3);
        assert_eq!(StorageClass::Blob.code(), 4);
        assert_eq!(StorageClass::Null.code(), 5);
    }

    #[test]
    fn test_from_code() {
        for class in [
            StorageClass::Integer,
            StorageClass::Real,
            StorageClass::Text,
            StorageClass::Blob,
            StorageClass::Null,
        ] {
            assert_eq!(StorageClass::from_code(class.code()), Some(class));
        }
        assert_eq!(StorageClass::from_code(0), None);
        assert_eq!(StorageClass::from_code(6), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(StorageClass::Integer.to_string(), "INTEGER");
        assert_eq!(StorageClass::Blob.to_string(), "BLOB");
    }

    #[test]
    fn test_field_type_mapping() {
        assert_eq!(FieldType::Integer.storage_class(), StorageClass::Integer);
        assert_eq!(FieldType::Integer64.storage_class(), StorageClass::Integer);
        assert_eq!(FieldType::Real.storage_class(), StorageClass::Real);
        assert_eq!(FieldType::String.storage_class(), StorageClass::Text);
        assert_eq!(FieldType::Binary.storage_class(), StorageClass::Blob);
        assert_eq!(StorageClass::from(FieldType::Date), StorageClass::Text);
        assert_eq!(StorageClass::from(FieldType::Time), StorageClass::Text);
        assert_eq!(StorageClass::from(FieldType::DateTime), StorageClass::Text);
    }
}
