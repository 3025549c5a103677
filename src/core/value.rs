// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Flat file value type system.
//!
//! Provides a unified value representation for fields decoded from delimited
//! and fixed-length records. All variants are serde-serializable.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Type alias for a decoded record as an ordered list of field values.
///
/// Flat file records are positional; the schema carries the column names.
pub type DecodedRecord = Vec<FieldValue>;

/// Unified value type for decoded flat file fields.
///
/// This enum represents values that can be parsed out of delimited or
/// fixed-length records by the column conversion pipeline. It is
/// serde-serializable and designed for easy conversion to other value types.
///
/// # Design Principles
///
/// - **Serde support**: All variants are serializable for downstream processing
/// - **Owned types**: Uses owned `String` for clarity and simplicity
/// - **Null-aware**: Empty or sentinel fields decode to `Null`, not `""`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    // Boolean
    Bool(bool),

    // Signed integers
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),

    // Unsigned integers
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),

    // Floating point
    Float32(f32),
    Float64(f64),

    // String (UTF-8)
    String(String),

    // Calendar date without a time component
    Date(NaiveDate),

    // Date and time without a timezone
    DateTime(NaiveDateTime),

    // Globally unique identifier
    Guid(Uuid),

    // Null value for empty or sentinel fields
    Null,
}

impl FieldValue {
    // ========================================================================
    // Type Checking Predicates
    // ========================================================================

    /// Check if this value is a numeric type (integers or floats).
    pub fn is_numeric(&self) -> bool {
        self.is_integer() || self.is_float()
    }

    /// Check if this value is an integer type (signed or unsigned).
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            FieldValue::Int8(_)
                | FieldValue::Int16(_)
                | FieldValue::Int32(_)
                | FieldValue::Int64(_)
                | FieldValue::UInt8(_)
                | FieldValue::UInt16(_)
                | FieldValue::UInt32(_)
                | FieldValue::UInt64(_)
        )
    }

    /// Check if this value is a floating-point type.
    pub fn is_float(&self) -> bool {
        matches!(self, FieldValue::Float32(_) | FieldValue::Float64(_))
    }

    /// Check if this value is a temporal type (date or datetime).
    pub fn is_temporal(&self) -> bool {
        matches!(self, FieldValue::Date(_) | FieldValue::DateTime(_))
    }

    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    // ========================================================================
    // Type Conversion Methods
    // ========================================================================

    /// Try to convert this value to f64 (for numeric values only).
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Int8(v) => Some(*v as f64),
            FieldValue::Int16(v) => Some(*v as f64),
            FieldValue::Int32(v) => Some(*v as f64),
            FieldValue::Int64(v) => Some(*v as f64),
            FieldValue::UInt8(v) => Some(*v as f64),
            FieldValue::UInt16(v) => Some(*v as f64),
            FieldValue::UInt32(v) => Some(*v as f64),
            FieldValue::UInt64(v) => Some(*v as f64),
            FieldValue::Float32(v) => Some(*v as f64),
            FieldValue::Float64(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to convert this value to i64 (for integer types only).
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Int8(v) => Some(*v as i64),
            FieldValue::Int16(v) => Some(*v as i64),
            FieldValue::Int32(v) => Some(*v as i64),
            FieldValue::Int64(v) => Some(*v),
            FieldValue::UInt8(v) => Some(*v as i64),
            FieldValue::UInt16(v) => Some(*v as i64),
            FieldValue::UInt32(v) => Some(*v as i64),
            FieldValue::UInt64(v) => {
                if *v <= i64::MAX as u64 {
                    Some(*v as i64)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Try to convert this value to u64 (for non-negative integers only).
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            FieldValue::UInt8(v) => Some(*v as u64),
            FieldValue::UInt16(v) => Some(*v as u64),
            FieldValue::UInt32(v) => Some(*v as u64),
            FieldValue::UInt64(v) => Some(*v),
            FieldValue::Int8(v) if *v >= 0 => Some(*v as u64),
            FieldValue::Int16(v) if *v >= 0 => Some(*v as u64),
            FieldValue::Int32(v) if *v >= 0 => Some(*v as u64),
            FieldValue::Int64(v) if *v >= 0 => Some(*v as u64),
            _ => None,
        }
    }

    /// Try to get the inner boolean value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get the inner string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get the inner date value.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            FieldValue::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Try to get the inner datetime value.
    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            FieldValue::DateTime(dt) => Some(*dt),
            _ => None,
        }
    }

    /// Try to get the inner guid value.
    pub fn as_guid(&self) -> Option<Uuid> {
        match self {
            FieldValue::Guid(g) => Some(*g),
            _ => None,
        }
    }

    // ========================================================================
    // Schema Helpers
    // ========================================================================

    /// Convert this value to plain field text, with no quoting.
    ///
    /// This is the schema-less fallback used when no column definition is
    /// available to format the value; null becomes the empty string.
    pub fn to_text(&self) -> String {
        match self {
            FieldValue::String(s) => s.clone(),
            FieldValue::Null => String::new(),
            FieldValue::Date(d) => d.format("%Y-%m-%d").to_string(),
            FieldValue::DateTime(dt) => dt.format("%Y-%m-%dT%H:%M:%S").to_string(),
            other => other.to_string(),
        }
    }

    /// Get the type name of this value as a string.
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValue::Bool(_) => "bool",
            FieldValue::Int8(_) => "int8",
            FieldValue::Int16(_) => "int16",
            FieldValue::Int32(_) => "int32",
            FieldValue::Int64(_) => "int64",
            FieldValue::UInt8(_) => "uint8",
            FieldValue::UInt16(_) => "uint16",
            FieldValue::UInt32(_) => "uint32",
            FieldValue::UInt64(_) => "uint64",
            FieldValue::Float32(_) => "float32",
            FieldValue::Float64(_) => "float64",
            FieldValue::String(_) => "string",
            FieldValue::Date(_) => "date",
            FieldValue::DateTime(_) => "datetime",
            FieldValue::Guid(_) => "guid",
            FieldValue::Null => "null",
        }
    }

    /// Get the field type of this value, if it has one.
    ///
    /// Returns `None` for `Null`, which carries no type of its own.
    pub fn field_type(&self) -> Option<FieldType> {
        match self {
            FieldValue::Bool(_) => Some(FieldType::Bool),
            FieldValue::Int8(_) => Some(FieldType::Int8),
            FieldValue::Int16(_) => Some(FieldType::Int16),
            FieldValue::Int32(_) => Some(FieldType::Int32),
            FieldValue::Int64(_) => Some(FieldType::Int64),
            FieldValue::UInt8(_) => Some(FieldType::UInt8),
            FieldValue::UInt16(_) => Some(FieldType::UInt16),
            FieldValue::UInt32(_) => Some(FieldType::UInt32),
            FieldValue::UInt64(_) => Some(FieldType::UInt64),
            FieldValue::Float32(_) => Some(FieldType::Float32),
            FieldValue::Float64(_) => Some(FieldType::Float64),
            FieldValue::String(_) => Some(FieldType::String),
            FieldValue::Date(_) => Some(FieldType::Date),
            FieldValue::DateTime(_) => Some(FieldType::DateTime),
            FieldValue::Guid(_) => Some(FieldType::Guid),
            FieldValue::Null => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Bool(v) => write!(f, "{v}"),
            FieldValue::Int8(v) => write!(f, "{v}"),
            FieldValue::Int16(v) => write!(f, "{v}"),
            FieldValue::Int32(v) => write!(f, "{v}"),
            FieldValue::Int64(v) => write!(f, "{v}"),
            FieldValue::UInt8(v) => write!(f, "{v}"),
            FieldValue::UInt16(v) => write!(f, "{v}"),
            FieldValue::UInt32(v) => write!(f, "{v}"),
            FieldValue::UInt64(v) => write!(f, "{v}"),
            FieldValue::Float32(v) => write!(f, "{v}"),
            FieldValue::Float64(v) => write!(f, "{v}"),
            FieldValue::String(v) => write!(f, "\"{v}\""),
            FieldValue::Date(v) => write!(f, "{v}"),
            FieldValue::DateTime(v) => write!(f, "{v}"),
            FieldValue::Guid(v) => write!(f, "{v}"),
            FieldValue::Null => write!(f, "null"),
        }
    }
}

use std::fmt;

/// Convert a decoded record into a name -> value map using column names.
///
/// Extra values beyond the name list are dropped; missing values are not
/// padded. Callers that need strict arity should validate against the schema
/// before mapping.
pub fn record_to_map(names: &[String], record: &DecodedRecord) -> HashMap<String, FieldValue> {
    names
        .iter()
        .zip(record.iter())
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect()
}

// =============================================================================
// Field Type Enum
// =============================================================================

/// Field type identifiers for flat file schemas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Boolean
    Bool,
    /// 8-bit signed integer
    Int8,
    /// 16-bit signed integer
    Int16,
    /// 32-bit signed integer
    Int32,
    /// 64-bit signed integer
    Int64,
    /// 8-bit unsigned integer
    UInt8,
    /// 16-bit unsigned integer
    UInt16,
    /// 32-bit unsigned integer
    UInt32,
    /// 64-bit unsigned integer
    UInt64,
    /// 32-bit float
    Float32,
    /// 64-bit float
    Float64,
    /// String
    String,
    /// Calendar date
    Date,
    /// Date and time
    DateTime,
    /// Globally unique identifier
    Guid,
}

impl FieldType {
    /// Parse a field type from a string.
    pub fn try_from_str(s: &str) -> Option<Self> {
        match s {
            "bool" => Some(FieldType::Bool),
            "int8" => Some(FieldType::Int8),
            "int16" => Some(FieldType::Int16),
            "int32" => Some(FieldType::Int32),
            "int64" => Some(FieldType::Int64),
            "uint8" => Some(FieldType::UInt8),
            "uint16" => Some(FieldType::UInt16),
            "uint32" => Some(FieldType::UInt32),
            "uint64" => Some(FieldType::UInt64),
            "float32" => Some(FieldType::Float32),
            "float64" => Some(FieldType::Float64),
            "string" => Some(FieldType::String),
            "date" => Some(FieldType::Date),
            "datetime" => Some(FieldType::DateTime),
            "guid" | "uuid" => Some(FieldType::Guid),
            _ => None,
        }
    }

    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Bool => "bool",
            FieldType::Int8 => "int8",
            FieldType::Int16 => "int16",
            FieldType::Int32 => "int32",
            FieldType::Int64 => "int64",
            FieldType::UInt8 => "uint8",
            FieldType::UInt16 => "uint16",
            FieldType::UInt32 => "uint32",
            FieldType::UInt64 => "uint64",
            FieldType::Float32 => "float32",
            FieldType::Float64 => "float64",
            FieldType::String => "string",
            FieldType::Date => "date",
            FieldType::DateTime => "datetime",
            FieldType::Guid => "guid",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
