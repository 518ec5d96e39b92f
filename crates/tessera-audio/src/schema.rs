//! Physical storage schema of an audio column.

use std::fmt;

use serde::Serialize;

/// Column data type of a stored field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    /// UTF-8 string.
    #[serde(rename = "string")]
    Utf8,
    /// Opaque bytes.
    Binary,
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Utf8 => f.write_str("string"),
            Self::Binary => f.write_str("binary"),
        }
    }
}

/// Named field of a struct schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Field {
    pub name: &'static str,
    pub data_type: DataType,
}

impl Field {
    const fn new(name: &'static str, data_type: DataType) -> Self {
        Self { name, data_type }
    }
}

const ARCHIVED_FIELDS: &[Field] = &[
    Field::new("path", DataType::Utf8),
    Field::new("bytes", DataType::Binary),
];

/// Storage layout of one audio column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum StorageSchema {
    /// A single field holding the path.
    Scalar(DataType),
    /// A record of named fields.
    Struct(&'static [Field]),
}

impl StorageSchema {
    /// Named fields of a struct schema; empty for a scalar.
    pub fn fields(&self) -> &'static [Field] {
        match self {
            Self::Scalar(_) => &[],
            Self::Struct(fields) => *fields,
        }
    }

    pub fn is_struct(&self) -> bool {
        matches!(self, Self::Struct(_))
    }
}

impl fmt::Display for StorageSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(dt) => write!(f, "{dt}"),
            Self::Struct(fields) => {
                f.write_str("struct<")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", field.name, field.data_type)?;
                }
                f.write_str(">")
            }
        }
    }
}

/// Storage schema for a column with the given `archived` flag.
pub fn schema(archived: bool) -> StorageSchema {
    if archived {
        StorageSchema::Struct(ARCHIVED_FIELDS)
    } else {
        StorageSchema::Scalar(DataType::Utf8)
    }
}
