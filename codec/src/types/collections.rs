//! [`Encode`] implementations for sequences and associations.
//!
//! Sequences encode as arrays, elements in iteration order. Associations
//! encode as maps in the caller's iteration order, each key before its value;
//! the encoder never reorders or deduplicates, so a `HashMap` produces a
//! valid but non-deterministic pair order while a `BTreeMap` is stable.
//!
//! `Vec<u8>` encodes as an array of integers through the generic sequence
//! implementation; a byte string is spelled [`bytes::Bytes`], `str`, or
//! `String`.

use crate::{
    encode::{container_size, Encode, Encoder},
    error::Error,
};
use std::{
    collections::{BTreeMap, HashMap},
    io::Write,
};

impl<T: Encode> Encode for [T] {
    #[inline]
    fn encode_size(&self) -> usize {
        container_size(self.len()) + self.iter().map(Encode::encode_size).sum::<usize>()
    }

    fn encode_to<W: Write>(&self, enc: &mut Encoder<W>) -> Result<(), Error> {
        enc.encode_array_len(self.len())?;
        for item in self {
            item.encode_to(enc)?;
        }
        Ok(())
    }
}

impl<T: Encode> Encode for Vec<T> {
    #[inline]
    fn encode_size(&self) -> usize {
        self.as_slice().encode_size()
    }

    #[inline]
    fn encode_to<W: Write>(&self, enc: &mut Encoder<W>) -> Result<(), Error> {
        self.as_slice().encode_to(enc)
    }
}

impl<T: Encode, const N: usize> Encode for [T; N] {
    #[inline]
    fn encode_size(&self) -> usize {
        self[..].encode_size()
    }

    #[inline]
    fn encode_to<W: Write>(&self, enc: &mut Encoder<W>) -> Result<(), Error> {
        self[..].encode_to(enc)
    }
}

impl<K: Encode, V: Encode> Encode for BTreeMap<K, V> {
    fn encode_size(&self) -> usize {
        container_size(self.len())
            + self
                .iter()
                .map(|(key, value)| key.encode_size() + value.encode_size())
                .sum::<usize>()
    }

    fn encode_to<W: Write>(&self, enc: &mut Encoder<W>) -> Result<(), Error> {
        enc.encode_map_len(self.len())?;
        for (key, value) in self {
            key.encode_to(enc)?;
            value.encode_to(enc)?;
        }
        Ok(())
    }
}

impl<K: Encode, V: Encode, S> Encode for HashMap<K, V, S> {
    fn encode_size(&self) -> usize {
        container_size(self.len())
            + self
                .iter()
                .map(|(key, value)| key.encode_size() + value.encode_size())
                .sum::<usize>()
    }

    fn encode_to<W: Write>(&self, enc: &mut Encoder<W>) -> Result<(), Error> {
        enc.encode_map_len(self.len())?;
        for (key, value) in self {
            key.encode_to(enc)?;
            value.encode_to(enc)?;
        }
        Ok(())
    }
}
