//! Decoding half of the codec: the [`Decoder`] over a byte source.
//!
//! Each [`Decoder::decode`] call reads exactly one complete value and returns
//! an owned [`Value`] tree. Back-to-back values are drained by calling
//! `decode` in a loop until [`Error::EndOfStream`]:
//!
//! ```
//! use mpack::{Decoder, Encode, Error};
//!
//! let mut stream = Vec::new();
//! for value in ["one", "two", "three"] {
//!     stream.extend_from_slice(value.encode().as_ref());
//! }
//!
//! let mut dec = Decoder::new(&stream[..]);
//! let mut seen = Vec::new();
//! loop {
//!     match dec.decode() {
//!         Ok(value) => seen.push(value),
//!         Err(Error::EndOfStream) => break,
//!         Err(err) => panic!("decode failed: {err}"),
//!     }
//! }
//! assert_eq!(seen.len(), 3);
//! ```
//!
//! Decoding accepts any width a producer chose: the variant of a decoded
//! integer reflects the wire width, not the minimal width for the value.

use crate::{
    error::Error,
    marker::Marker,
    value::Value,
};
use bytes::Bytes;
use std::io::Read;

// A hostile count header should not allocate far ahead of the bytes that
// back it; preallocation is capped and the vector grows normally beyond.
const MAX_PREALLOC: usize = 1 << 16;

/// Decodes one value from an in-memory byte slice.
pub fn decode_from_slice(bytes: &[u8]) -> Result<Value, Error> {
    Decoder::new(bytes).decode()
}

/// Deserializes values from an owned byte source.
///
/// The source is read synchronously and is assumed to block until bytes are
/// available; no partial value is ever returned. After a failed decode the
/// source is positioned at an undefined offset.
pub struct Decoder<R: Read> {
    source: R,
}

impl<R: Read> Decoder<R> {
    /// Creates a decoder that exclusively owns `source` for its lifetime.
    pub fn new(source: R) -> Self {
        Self { source }
    }

    /// Releases the source.
    pub fn into_inner(self) -> R {
        self.source
    }

    /// Reads exactly one encoded value and returns the owned tree.
    ///
    /// Running out of bytes at any point, header or payload, at any nesting
    /// depth, fails the whole call with [`Error::EndOfStream`]; a header byte
    /// outside the format fails with [`Error::InvalidHeader`]. Nothing
    /// partially built survives a failure.
    pub fn decode(&mut self) -> Result<Value, Error> {
        let header = self.read_fixed::<1>()?[0];
        let marker = Marker::from_u8(header).ok_or(Error::InvalidHeader(header))?;
        match marker {
            Marker::Nil => Ok(Value::Nil),
            Marker::False => Ok(Value::Bool(false)),
            Marker::True => Ok(Value::Bool(true)),
            Marker::Float32 => Ok(Value::Float32(f32::from_be_bytes(self.read_fixed()?))),
            Marker::Float64 => Ok(Value::Float64(f64::from_be_bytes(self.read_fixed()?))),
            Marker::UInt8 => Ok(Value::UInt8(self.read_fixed::<1>()?[0])),
            Marker::UInt16 => Ok(Value::UInt16(u16::from_be_bytes(self.read_fixed()?))),
            Marker::UInt32 => Ok(Value::UInt32(u32::from_be_bytes(self.read_fixed()?))),
            Marker::UInt64 => Ok(Value::UInt64(u64::from_be_bytes(self.read_fixed()?))),
            Marker::Int8 => Ok(Value::Int8(self.read_fixed::<1>()?[0] as i8)),
            Marker::Int16 => Ok(Value::Int16(i16::from_be_bytes(self.read_fixed()?))),
            Marker::Int32 => Ok(Value::Int32(i32::from_be_bytes(self.read_fixed()?))),
            Marker::Int64 => Ok(Value::Int64(i64::from_be_bytes(self.read_fixed()?))),
            Marker::FixPos(value) => Ok(Value::UInt8(value)),
            Marker::FixNeg(value) => Ok(Value::Int8(value)),
            Marker::FixRaw(len) => self.decode_raw(usize::from(len)),
            Marker::Raw16 => {
                let len = u16::from_be_bytes(self.read_fixed()?);
                self.decode_raw(usize::from(len))
            }
            Marker::Raw32 => {
                let len = u32::from_be_bytes(self.read_fixed()?);
                self.decode_raw(len as usize)
            }
            Marker::FixArray(count) => self.decode_array(usize::from(count)),
            Marker::Array16 => {
                let count = u16::from_be_bytes(self.read_fixed()?);
                self.decode_array(usize::from(count))
            }
            Marker::Array32 => {
                let count = u32::from_be_bytes(self.read_fixed()?);
                self.decode_array(count as usize)
            }
            Marker::FixMap(count) => self.decode_map(usize::from(count)),
            Marker::Map16 => {
                let count = u16::from_be_bytes(self.read_fixed()?);
                self.decode_map(usize::from(count))
            }
            Marker::Map32 => {
                let count = u32::from_be_bytes(self.read_fixed()?);
                self.decode_map(count as usize)
            }
        }
    }

    fn decode_raw(&mut self, len: usize) -> Result<Value, Error> {
        // take() bounds the allocation by the bytes actually available, so a
        // declared length larger than the stream fails without reserving it.
        let mut bytes = Vec::with_capacity(len.min(MAX_PREALLOC));
        let read = (&mut self.source)
            .take(len as u64)
            .read_to_end(&mut bytes)
            .map_err(Error::Io)?;
        if read < len {
            return Err(Error::EndOfStream);
        }
        Ok(Value::Raw(Bytes::from(bytes)))
    }

    fn decode_array(&mut self, count: usize) -> Result<Value, Error> {
        let mut items = Vec::with_capacity(count.min(MAX_PREALLOC));
        for _ in 0..count {
            items.push(self.decode()?);
        }
        Ok(Value::Array(items))
    }

    fn decode_map(&mut self, count: usize) -> Result<Value, Error> {
        let mut pairs = Vec::with_capacity(count.min(MAX_PREALLOC));
        for _ in 0..count {
            let key = self.decode()?;
            let value = self.decode()?;
            pairs.push((key, value));
        }
        Ok(Value::Map(pairs))
    }

    fn read_fixed<const N: usize>(&mut self) -> Result<[u8; N], Error> {
        let mut bytes = [0u8; N];
        self.source.read_exact(&mut bytes).map_err(|err| {
            if err.kind() == std::io::ErrorKind::UnexpectedEof {
                Error::EndOfStream
            } else {
                Error::Io(err)
            }
        })?;
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_scalars() {
        assert_eq!(decode_from_slice(&[0xC0]).unwrap(), Value::Nil);
        assert_eq!(decode_from_slice(&[0xC2]).unwrap(), Value::Bool(false));
        assert_eq!(decode_from_slice(&[0xC3]).unwrap(), Value::Bool(true));
        assert_eq!(decode_from_slice(&[0x00]).unwrap(), Value::UInt8(0));
        assert_eq!(decode_from_slice(&[0x7F]).unwrap(), Value::UInt8(127));
        assert_eq!(decode_from_slice(&[0xE0]).unwrap(), Value::Int8(-32));
        assert_eq!(decode_from_slice(&[0xFF]).unwrap(), Value::Int8(-1));
        assert_eq!(
            decode_from_slice(&[0xCA, 0x3F, 0x80, 0x00, 0x00]).unwrap(),
            Value::Float32(1.0)
        );
        assert_eq!(
            decode_from_slice(&[0xCB, 0xBF, 0xF0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]).unwrap(),
            Value::Float64(-1.0)
        );
    }

    #[test]
    fn test_decode_is_width_agnostic() {
        // A producer may pick any width; the decoded variant records it.
        assert_eq!(decode_from_slice(&[0xCC, 0x05]).unwrap(), Value::UInt8(5));
        assert_eq!(
            decode_from_slice(&[0xCD, 0x00, 0x05]).unwrap(),
            Value::UInt16(5)
        );
        assert_eq!(
            decode_from_slice(&[0xCE, 0x00, 0x00, 0x00, 0x05]).unwrap(),
            Value::UInt32(5)
        );
        assert_eq!(
            decode_from_slice(&[0xCF, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x05]).unwrap(),
            Value::UInt64(5)
        );
        assert_eq!(decode_from_slice(&[0xD0, 0xFB]).unwrap(), Value::Int8(-5));
        assert_eq!(
            decode_from_slice(&[0xD1, 0xFF, 0xFB]).unwrap(),
            Value::Int16(-5)
        );
        assert_eq!(
            decode_from_slice(&[0xD2, 0xFF, 0xFF, 0xFF, 0xFB]).unwrap(),
            Value::Int32(-5)
        );
        assert_eq!(
            decode_from_slice(&[0xD3, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFB]).unwrap(),
            Value::Int64(-5)
        );
    }

    #[test]
    fn test_decode_raw() {
        assert_eq!(
            decode_from_slice(b"\xA0").unwrap(),
            Value::Raw(Bytes::new())
        );
        assert_eq!(
            decode_from_slice(b"\xA3abc").unwrap(),
            Value::Raw(Bytes::from_static(b"abc"))
        );

        let mut raw16 = vec![0xDA, 0x00, 0x20];
        raw16.extend_from_slice(&[0x55; 32]);
        assert_eq!(
            decode_from_slice(&raw16).unwrap(),
            Value::Raw(Bytes::from(vec![0x55; 32]))
        );
    }

    #[test]
    fn test_decode_containers() {
        assert_eq!(
            decode_from_slice(&[0x90]).unwrap(),
            Value::Array(Vec::new())
        );
        assert_eq!(
            decode_from_slice(&[0x92, 0x01, 0xA1, 0x61]).unwrap(),
            Value::Array(vec![
                Value::UInt8(1),
                Value::Raw(Bytes::from_static(b"a"))
            ])
        );
        assert_eq!(decode_from_slice(&[0x80]).unwrap(), Value::Map(Vec::new()));
        // Duplicate keys survive, in decode order.
        assert_eq!(
            decode_from_slice(&[0x82, 0x01, 0xC2, 0x01, 0xC3]).unwrap(),
            Value::Map(vec![
                (Value::UInt8(1), Value::Bool(false)),
                (Value::UInt8(1), Value::Bool(true)),
            ])
        );
    }

    #[test]
    fn test_decode_nested() {
        // {[1, 2]: {nil: -1}}
        let bytes = [0x81, 0x92, 0x01, 0x02, 0x81, 0xC0, 0xFF];
        let value = decode_from_slice(&bytes).unwrap();
        let pairs = value.as_map().unwrap();
        assert_eq!(
            pairs[0].0,
            Value::Array(vec![Value::UInt8(1), Value::UInt8(2)])
        );
        assert_eq!(
            pairs[0].1,
            Value::Map(vec![(Value::Nil, Value::Int8(-1))])
        );
    }

    #[test]
    fn test_reserved_headers_rejected() {
        let reserved = [
            0xC1, 0xC4, 0xC5, 0xC6, 0xC7, 0xC8, 0xC9, 0xD4, 0xD5, 0xD6, 0xD7, 0xD8, 0xD9,
        ];
        for byte in reserved {
            assert!(
                matches!(
                    decode_from_slice(&[byte, 0x00]),
                    Err(Error::InvalidHeader(b)) if b == byte
                ),
                "byte {byte:#04x}"
            );
        }
    }

    #[test]
    fn test_empty_source_is_end_of_stream() {
        assert!(matches!(decode_from_slice(&[]), Err(Error::EndOfStream)));
    }

    #[test]
    fn test_truncated_payload_is_end_of_stream() {
        assert!(matches!(
            decode_from_slice(&[0xCD, 0x01]),
            Err(Error::EndOfStream)
        ));
        assert!(matches!(
            decode_from_slice(&[0xDA, 0x00, 0x05, b'a']),
            Err(Error::EndOfStream)
        ));
        // An array that promises more elements than the stream holds.
        assert!(matches!(
            decode_from_slice(&[0x93, 0x01, 0x02]),
            Err(Error::EndOfStream)
        ));
    }

    #[test]
    fn test_hostile_length_does_not_reserve() {
        // Declares a 4 GiB raw but provides 3 bytes.
        let bytes = [0xDB, 0xFF, 0xFF, 0xFF, 0xFF, 0x01, 0x02, 0x03];
        assert!(matches!(
            decode_from_slice(&bytes),
            Err(Error::EndOfStream)
        ));
    }

    #[test]
    fn test_source_error_passes_through() {
        struct FailingSource;
        impl Read for FailingSource {
            fn read(&mut self, _: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("source failed"))
            }
        }

        let mut dec = Decoder::new(FailingSource);
        assert!(matches!(dec.decode(), Err(Error::Io(_))));
    }
}
