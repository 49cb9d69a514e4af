//! Encoding half of the codec: the [`Encoder`] over a byte sink and the
//! [`Encode`] trait for typed inputs.
//!
//! Every write picks the most compact wire representation that can hold the
//! value. Width selection for integers is centralized in
//! [`Encoder::encode_uint`] and [`Encoder::encode_int`]; every integer type
//! funnels through them, so no other code path chooses widths.
//!
//! Writes are issued synchronously and in order. The encoder buffers nothing
//! and cannot roll back: a sink failure mid-value leaves the sink at an
//! undefined position and aborts the encode call.

use crate::{error::Error, marker};
use bytes::{BufMut, Bytes, BytesMut};
use std::io::Write;

/// Serializes typed values to an owned byte sink in their most compact wire
/// representation.
pub struct Encoder<W: Write> {
    sink: W,
}

impl<W: Write> Encoder<W> {
    /// Creates an encoder that exclusively owns `sink` for its lifetime.
    pub fn new(sink: W) -> Self {
        Self { sink }
    }

    /// Releases the sink.
    pub fn into_inner(self) -> W {
        self.sink
    }

    /// Encodes any [`Encode`] value.
    pub fn encode<T: Encode + ?Sized>(&mut self, value: &T) -> Result<(), Error> {
        value.encode_to(self)
    }

    /// Writes the nil tag.
    pub fn encode_nil(&mut self) -> Result<(), Error> {
        self.put(&[marker::NIL])
    }

    /// Writes a boolean as its one-byte tag.
    pub fn encode_bool(&mut self, value: bool) -> Result<(), Error> {
        self.put(&[if value { marker::TRUE } else { marker::FALSE }])
    }

    /// Writes an unsigned integer at the smallest width that holds it.
    pub fn encode_uint(&mut self, value: u64) -> Result<(), Error> {
        if value <= marker::FIXPOS_MAX {
            self.put(&[value as u8])
        } else if value <= u64::from(u8::MAX) {
            self.put(&[marker::UINT8, value as u8])
        } else if value <= u64::from(u16::MAX) {
            self.put_tagged(marker::UINT16, &(value as u16).to_be_bytes())
        } else if value <= u64::from(u32::MAX) {
            self.put_tagged(marker::UINT32, &(value as u32).to_be_bytes())
        } else {
            self.put_tagged(marker::UINT64, &value.to_be_bytes())
        }
    }

    /// Writes a signed integer at the smallest width that holds it.
    /// Non-negative values take the unsigned representations.
    pub fn encode_int(&mut self, value: i64) -> Result<(), Error> {
        if value >= 0 {
            self.encode_uint(value as u64)
        } else if value >= marker::FIXNEG_MIN {
            // -32..=-1 is the negative fixnum range, 0xE0..=0xFF.
            self.put(&[value as u8])
        } else if value >= i64::from(i8::MIN) {
            self.put(&[marker::INT8, value as u8])
        } else if value >= i64::from(i16::MIN) {
            self.put_tagged(marker::INT16, &(value as i16).to_be_bytes())
        } else if value >= i64::from(i32::MIN) {
            self.put_tagged(marker::INT32, &(value as i32).to_be_bytes())
        } else {
            self.put_tagged(marker::INT64, &value.to_be_bytes())
        }
    }

    /// Writes a single-precision float. No narrowing between float widths.
    pub fn encode_f32(&mut self, value: f32) -> Result<(), Error> {
        self.put_tagged(marker::FLOAT32, &value.to_be_bytes())
    }

    /// Writes a double-precision float. No narrowing between float widths.
    pub fn encode_f64(&mut self, value: f64) -> Result<(), Error> {
        self.put_tagged(marker::FLOAT64, &value.to_be_bytes())
    }

    /// Writes a raw byte string: length-prefixed tag, then the bytes
    /// verbatim. Text is bytes on this wire.
    ///
    /// Panics if the length exceeds `u32::MAX`, which cannot be represented.
    pub fn encode_raw(&mut self, bytes: &[u8]) -> Result<(), Error> {
        let len = bytes.len();
        if len <= marker::FIXRAW_MAX {
            self.put(&[marker::FIXRAW | len as u8])?;
        } else if len <= usize::from(u16::MAX) {
            self.put_tagged(marker::RAW16, &(len as u16).to_be_bytes())?;
        } else {
            let len = u32::try_from(len).expect("raw length exceeds u32");
            self.put_tagged(marker::RAW32, &len.to_be_bytes())?;
        }
        self.put(bytes)
    }

    /// Writes an array header for `len` elements. The caller then encodes
    /// each element, in order.
    ///
    /// Panics if the count exceeds `u32::MAX`, which cannot be represented.
    pub fn encode_array_len(&mut self, len: usize) -> Result<(), Error> {
        if len <= marker::FIXLEN_MAX {
            self.put(&[marker::FIXARRAY | len as u8])
        } else if len <= usize::from(u16::MAX) {
            self.put_tagged(marker::ARRAY16, &(len as u16).to_be_bytes())
        } else {
            let len = u32::try_from(len).expect("array length exceeds u32");
            self.put_tagged(marker::ARRAY32, &len.to_be_bytes())
        }
    }

    /// Writes a map header for `len` key/value pairs. The caller then
    /// encodes each pair, key before value, in its own iteration order; the
    /// encoder never reorders or deduplicates.
    ///
    /// Panics if the count exceeds `u32::MAX`, which cannot be represented.
    pub fn encode_map_len(&mut self, len: usize) -> Result<(), Error> {
        if len <= marker::FIXLEN_MAX {
            self.put(&[marker::FIXMAP | len as u8])
        } else if len <= usize::from(u16::MAX) {
            self.put_tagged(marker::MAP16, &(len as u16).to_be_bytes())
        } else {
            let len = u32::try_from(len).expect("map length exceeds u32");
            self.put_tagged(marker::MAP32, &len.to_be_bytes())
        }
    }

    fn put_tagged(&mut self, tag: u8, payload: &[u8]) -> Result<(), Error> {
        self.put(&[tag])?;
        self.put(payload)
    }

    fn put(&mut self, bytes: &[u8]) -> Result<(), Error> {
        self.sink.write_all(bytes)?;
        Ok(())
    }
}

/// Trait for types that can be encoded to the wire.
pub trait Encode {
    /// The exact number of bytes [`Encode::encode_to`] will write.
    fn encode_size(&self) -> usize;

    /// Encodes this value through `enc` in its most compact representation.
    fn encode_to<W: Write>(&self, enc: &mut Encoder<W>) -> Result<(), Error>;

    /// Encodes this value to an in-memory buffer with exact capacity.
    ///
    /// Panics if the `encode_to` implementation does not write the number of
    /// bytes promised by `encode_size`.
    ///
    /// (Provided method).
    fn encode(&self) -> Bytes {
        let size = self.encode_size();
        let mut enc = Encoder::new(BytesMut::with_capacity(size).writer());
        self.encode_to(&mut enc)
            .expect("writing to an in-memory buffer cannot fail");
        let buf = enc.into_inner().into_inner();
        assert_eq!(
            buf.len(),
            size,
            "encode_to() did not write expected bytes"
        );
        buf.freeze()
    }
}

impl<T: Encode + ?Sized> Encode for &T {
    fn encode_size(&self) -> usize {
        (**self).encode_size()
    }

    fn encode_to<W: Write>(&self, enc: &mut Encoder<W>) -> Result<(), Error> {
        (**self).encode_to(enc)
    }
}

/// Wire size of an unsigned integer, header included.
pub(crate) fn uint_size(value: u64) -> usize {
    if value <= marker::FIXPOS_MAX {
        1
    } else if value <= u64::from(u8::MAX) {
        2
    } else if value <= u64::from(u16::MAX) {
        3
    } else if value <= u64::from(u32::MAX) {
        5
    } else {
        9
    }
}

/// Wire size of a signed integer, header included.
pub(crate) fn int_size(value: i64) -> usize {
    if value >= 0 {
        uint_size(value as u64)
    } else if value >= marker::FIXNEG_MIN {
        1
    } else if value >= i64::from(i8::MIN) {
        2
    } else if value >= i64::from(i16::MIN) {
        3
    } else if value >= i64::from(i32::MIN) {
        5
    } else {
        9
    }
}

/// Wire size of a raw byte string of length `len`, header included.
pub(crate) fn raw_size(len: usize) -> usize {
    let header = if len <= marker::FIXRAW_MAX {
        1
    } else if len <= usize::from(u16::MAX) {
        3
    } else {
        5
    };
    header + len
}

/// Wire size of an array or map header for `len` elements or pairs.
pub(crate) fn container_size(len: usize) -> usize {
    if len <= marker::FIXLEN_MAX {
        1
    } else if len <= usize::from(u16::MAX) {
        3
    } else {
        5
    }
}
