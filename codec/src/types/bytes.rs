//! [`Encode`] implementations for byte-string types.
//!
//! Text is bytes on this wire: `str` and `String` encode their UTF-8 bytes as
//! raw byte strings, indistinguishable from a [`Bytes`] of the same content.

use crate::{
    encode::{raw_size, Encode, Encoder},
    error::Error,
};
use bytes::Bytes;
use std::io::Write;

impl Encode for Bytes {
    #[inline]
    fn encode_size(&self) -> usize {
        raw_size(self.len())
    }

    #[inline]
    fn encode_to<W: Write>(&self, enc: &mut Encoder<W>) -> Result<(), Error> {
        enc.encode_raw(self)
    }
}

impl Encode for str {
    #[inline]
    fn encode_size(&self) -> usize {
        raw_size(self.len())
    }

    #[inline]
    fn encode_to<W: Write>(&self, enc: &mut Encoder<W>) -> Result<(), Error> {
        enc.encode_raw(self.as_bytes())
    }
}

impl Encode for String {
    #[inline]
    fn encode_size(&self) -> usize {
        raw_size(self.len())
    }

    #[inline]
    fn encode_to<W: Write>(&self, enc: &mut Encoder<W>) -> Result<(), Error> {
        enc.encode_raw(self.as_bytes())
    }
}
