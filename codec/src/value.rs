//! The decoded-value model.
//!
//! A [`Value`] is the dynamically typed tree produced by the decoder and
//! consumed by the encoder. One variant exists per wire kind, so a decoded
//! integer remembers the width the producer chose for it; re-encoding always
//! selects the most compact width for the magnitude, whatever the variant.
//!
//! Containers own their children: dropping an [`Value::Array`] or
//! [`Value::Map`] releases the entire subtree. A decoded tree is a pure tree,
//! never shared between decode results.

use crate::{
    encode::{container_size, int_size, raw_size, uint_size, Encode, Encoder},
    error::Error,
};
use bytes::Bytes;
use std::fmt;
use std::io::Write;

/// The kind of a [`Value`], used for type checks and error reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    Nil,
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
    Raw,
    Array,
    Map,
}

impl Kind {
    /// A short lowercase name for error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Kind::Nil => "nil",
            Kind::Bool => "bool",
            Kind::Int8 => "int8",
            Kind::Int16 => "int16",
            Kind::Int32 => "int32",
            Kind::Int64 => "int64",
            Kind::UInt8 => "uint8",
            Kind::UInt16 => "uint16",
            Kind::UInt32 => "uint32",
            Kind::UInt64 => "uint64",
            Kind::Float32 => "float32",
            Kind::Float64 => "float64",
            Kind::Raw => "raw",
            Kind::Array => "array",
            Kind::Map => "map",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A decoded MessagePack value.
///
/// Scalar variants hold an inline copy of their native value. `Raw` owns its
/// byte buffer. `Array` holds children in decode order. `Map` holds key/value
/// pairs in decode order; duplicate keys are preserved (multimap semantics).
///
/// Equality is structural with IEEE-754 float semantics (`NaN != NaN`).
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Nil,
    Bool(bool),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    Float32(f32),
    Float64(f64),
    Raw(Bytes),
    Array(Vec<Value>),
    Map(Vec<(Value, Value)>),
}

// Generates a typed accessor for a scalar variant: the payload on a kind
// match, `TypeMismatch(requested, actual)` otherwise.
macro_rules! scalar_accessor {
    ($fn:ident, $variant:ident, $type:ty) => {
        /// Returns the payload if this value is of the matching kind.
        pub fn $fn(&self) -> Result<$type, Error> {
            match self {
                Value::$variant(value) => Ok(*value),
                other => Err(Error::TypeMismatch(Kind::$variant, other.kind())),
            }
        }
    };
}

impl Value {
    /// The kind tag of this value. Never changes after construction.
    pub fn kind(&self) -> Kind {
        match self {
            Value::Nil => Kind::Nil,
            Value::Bool(_) => Kind::Bool,
            Value::Int8(_) => Kind::Int8,
            Value::Int16(_) => Kind::Int16,
            Value::Int32(_) => Kind::Int32,
            Value::Int64(_) => Kind::Int64,
            Value::UInt8(_) => Kind::UInt8,
            Value::UInt16(_) => Kind::UInt16,
            Value::UInt32(_) => Kind::UInt32,
            Value::UInt64(_) => Kind::UInt64,
            Value::Float32(_) => Kind::Float32,
            Value::Float64(_) => Kind::Float64,
            Value::Raw(_) => Kind::Raw,
            Value::Array(_) => Kind::Array,
            Value::Map(_) => Kind::Map,
        }
    }

    /// True for [`Value::Nil`].
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    scalar_accessor!(as_bool, Bool, bool);
    scalar_accessor!(as_i8, Int8, i8);
    scalar_accessor!(as_i16, Int16, i16);
    scalar_accessor!(as_i32, Int32, i32);
    scalar_accessor!(as_i64, Int64, i64);
    scalar_accessor!(as_u8, UInt8, u8);
    scalar_accessor!(as_u16, UInt16, u16);
    scalar_accessor!(as_u32, UInt32, u32);
    scalar_accessor!(as_u64, UInt64, u64);
    scalar_accessor!(as_f32, Float32, f32);
    scalar_accessor!(as_f64, Float64, f64);

    /// Borrows the byte payload of a [`Value::Raw`]. No copy.
    pub fn as_raw(&self) -> Result<&[u8], Error> {
        match self {
            Value::Raw(bytes) => Ok(bytes),
            other => Err(Error::TypeMismatch(Kind::Raw, other.kind())),
        }
    }

    /// Borrows the elements of a [`Value::Array`], in decode order. No copy.
    pub fn as_array(&self) -> Result<&[Value], Error> {
        match self {
            Value::Array(items) => Ok(items),
            other => Err(Error::TypeMismatch(Kind::Array, other.kind())),
        }
    }

    /// Borrows the key/value pairs of a [`Value::Map`], in decode order,
    /// duplicates included. No copy.
    pub fn as_map(&self) -> Result<&[(Value, Value)], Error> {
        match self {
            Value::Map(pairs) => Ok(pairs),
            other => Err(Error::TypeMismatch(Kind::Map, other.kind())),
        }
    }
}

macro_rules! impl_from_scalar {
    ($type:ty, $variant:ident) => {
        impl From<$type> for Value {
            fn from(value: $type) -> Self {
                Value::$variant(value)
            }
        }
    };
}

impl_from_scalar!(bool, Bool);
impl_from_scalar!(i8, Int8);
impl_from_scalar!(i16, Int16);
impl_from_scalar!(i32, Int32);
impl_from_scalar!(i64, Int64);
impl_from_scalar!(u8, UInt8);
impl_from_scalar!(u16, UInt16);
impl_from_scalar!(u32, UInt32);
impl_from_scalar!(u64, UInt64);
impl_from_scalar!(f32, Float32);
impl_from_scalar!(f64, Float64);

impl From<Bytes> for Value {
    fn from(bytes: Bytes) -> Self {
        Value::Raw(bytes)
    }
}

impl From<Vec<u8>> for Value {
    fn from(bytes: Vec<u8>) -> Self {
        Value::Raw(Bytes::from(bytes))
    }
}

impl From<&[u8]> for Value {
    fn from(bytes: &[u8]) -> Self {
        Value::Raw(Bytes::copy_from_slice(bytes))
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Raw(Bytes::copy_from_slice(text.as_bytes()))
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Raw(Bytes::from(text.into_bytes()))
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Vec<(Value, Value)>> for Value {
    fn from(pairs: Vec<(Value, Value)>) -> Self {
        Value::Map(pairs)
    }
}

// A decoded tree is re-encodable. Integer variants re-encode at the minimal
// width for their magnitude, not the width they were decoded from.
impl Encode for Value {
    fn encode_size(&self) -> usize {
        match self {
            Value::Nil | Value::Bool(_) => 1,
            Value::Int8(value) => int_size(i64::from(*value)),
            Value::Int16(value) => int_size(i64::from(*value)),
            Value::Int32(value) => int_size(i64::from(*value)),
            Value::Int64(value) => int_size(*value),
            Value::UInt8(value) => uint_size(u64::from(*value)),
            Value::UInt16(value) => uint_size(u64::from(*value)),
            Value::UInt32(value) => uint_size(u64::from(*value)),
            Value::UInt64(value) => uint_size(*value),
            Value::Float32(_) => 5,
            Value::Float64(_) => 9,
            Value::Raw(bytes) => raw_size(bytes.len()),
            Value::Array(items) => {
                container_size(items.len()) + items.iter().map(Encode::encode_size).sum::<usize>()
            }
            Value::Map(pairs) => {
                container_size(pairs.len())
                    + pairs
                        .iter()
                        .map(|(key, value)| key.encode_size() + value.encode_size())
                        .sum::<usize>()
            }
        }
    }

    fn encode_to<W: Write>(&self, enc: &mut Encoder<W>) -> Result<(), Error> {
        match self {
            Value::Nil => enc.encode_nil(),
            Value::Bool(value) => enc.encode_bool(*value),
            Value::Int8(value) => enc.encode_int(i64::from(*value)),
            Value::Int16(value) => enc.encode_int(i64::from(*value)),
            Value::Int32(value) => enc.encode_int(i64::from(*value)),
            Value::Int64(value) => enc.encode_int(*value),
            Value::UInt8(value) => enc.encode_uint(u64::from(*value)),
            Value::UInt16(value) => enc.encode_uint(u64::from(*value)),
            Value::UInt32(value) => enc.encode_uint(u64::from(*value)),
            Value::UInt64(value) => enc.encode_uint(*value),
            Value::Float32(value) => enc.encode_f32(*value),
            Value::Float64(value) => enc.encode_f64(*value),
            Value::Raw(bytes) => enc.encode_raw(bytes),
            Value::Array(items) => {
                enc.encode_array_len(items.len())?;
                for item in items {
                    item.encode_to(enc)?;
                }
                Ok(())
            }
            Value::Map(pairs) => {
                enc.encode_map_len(pairs.len())?;
                for (key, value) in pairs {
                    key.encode_to(enc)?;
                    value.encode_to(enc)?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode_from_slice;

    #[test]
    fn test_accessor_match() {
        assert!(Value::Bool(true).as_bool().unwrap());
        assert_eq!(Value::Int16(-300).as_i16().unwrap(), -300);
        assert_eq!(Value::UInt64(u64::MAX).as_u64().unwrap(), u64::MAX);
        assert_eq!(Value::Float64(1.5).as_f64().unwrap(), 1.5);
        assert_eq!(
            Value::Raw(Bytes::from_static(b"abc")).as_raw().unwrap(),
            b"abc"
        );
        let array = Value::Array(vec![Value::Nil, Value::Bool(false)]);
        assert_eq!(array.as_array().unwrap().len(), 2);
        let map = Value::Map(vec![(Value::UInt8(1), Value::Bool(true))]);
        assert_eq!(map.as_map().unwrap().len(), 1);
    }

    #[test]
    fn test_accessor_mismatch() {
        // The requested kind and the actual kind both surface in the error.
        let value = Value::UInt8(7);
        assert!(matches!(
            value.as_i8(),
            Err(Error::TypeMismatch(Kind::Int8, Kind::UInt8))
        ));
        assert!(matches!(
            value.as_array(),
            Err(Error::TypeMismatch(Kind::Array, Kind::UInt8))
        ));
        assert!(matches!(
            Value::Nil.as_bool(),
            Err(Error::TypeMismatch(Kind::Bool, Kind::Nil))
        ));
        // Width-distinct integer variants do not cross-match.
        assert!(matches!(
            Value::UInt16(7).as_u8(),
            Err(Error::TypeMismatch(Kind::UInt8, Kind::UInt16))
        ));
    }

    #[test]
    fn test_kind_is_stable() {
        let values = [
            Value::Nil,
            Value::Bool(true),
            Value::Int64(-1),
            Value::UInt32(1),
            Value::Float32(0.0),
            Value::Raw(Bytes::new()),
            Value::Array(Vec::new()),
            Value::Map(Vec::new()),
        ];
        for value in values {
            let kind = value.kind();
            assert_eq!(value.clone().kind(), kind);
            assert_eq!(kind.name(), format!("{kind}"));
        }
    }

    #[test]
    fn test_from_conversions() {
        assert_eq!(Value::from(true), Value::Bool(true));
        assert_eq!(Value::from(-3i32), Value::Int32(-3));
        assert_eq!(Value::from(3u16), Value::UInt16(3));
        assert_eq!(Value::from("abc"), Value::Raw(Bytes::from_static(b"abc")));
        assert_eq!(
            Value::from(vec![0x01u8, 0x02]),
            Value::Raw(Bytes::from_static(&[0x01, 0x02]))
        );
        assert_eq!(
            Value::from(vec![Value::Nil]),
            Value::Array(vec![Value::Nil])
        );
    }

    #[test]
    fn test_float_equality_is_ieee() {
        assert_ne!(Value::Float64(f64::NAN), Value::Float64(f64::NAN));
        assert_eq!(Value::Float64(0.0), Value::Float64(-0.0));
        assert_ne!(Value::Float32(1.0), Value::Float64(1.0));
    }

    #[test]
    fn test_reencode_is_minimal_width() {
        // A value decoded from a wide representation re-encodes compactly.
        let wide = [crate::marker::UINT64, 0, 0, 0, 0, 0, 0, 0, 5];
        let value = decode_from_slice(&wide).unwrap();
        assert_eq!(value, Value::UInt64(5));
        assert_eq!(value.encode().as_ref(), &[0x05]);
    }

    #[test]
    fn test_encode_size_matches() {
        let values = [
            Value::Nil,
            Value::Bool(false),
            Value::Int64(-70000),
            Value::UInt64(70000),
            Value::Float32(1.0),
            Value::Float64(-1.0),
            Value::Raw(Bytes::from(vec![0xAA; 40])),
            Value::Array(vec![Value::UInt8(200), Value::Nil]),
            Value::Map(vec![(Value::from("k"), Value::from("v"))]),
        ];
        for value in values {
            assert_eq!(value.encode().len(), value.encode_size());
        }
    }
}
