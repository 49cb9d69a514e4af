//! [`Encode`] implementations for Rust primitive types.
//!
//! All integers funnel through the encoder's shared width selection, so a
//! `u64` holding 5 encodes to the same single byte as a `u8` holding 5.
//! Floats encode at their own precision and are never narrowed. `Option`
//! maps `None` to nil with no wrapper byte; the wire is self-describing, so
//! none is needed.

use crate::{
    encode::{int_size, uint_size, Encode, Encoder},
    error::Error,
};
use std::io::Write;

macro_rules! impl_unsigned {
    ($($type:ty),+ $(,)?) => {$(
        impl Encode for $type {
            #[inline]
            fn encode_size(&self) -> usize {
                uint_size(u64::from(*self))
            }

            #[inline]
            fn encode_to<W: Write>(&self, enc: &mut Encoder<W>) -> Result<(), Error> {
                enc.encode_uint(u64::from(*self))
            }
        }
    )+};
}

impl_unsigned!(u8, u16, u32, u64);

macro_rules! impl_signed {
    ($($type:ty),+ $(,)?) => {$(
        impl Encode for $type {
            #[inline]
            fn encode_size(&self) -> usize {
                int_size(i64::from(*self))
            }

            #[inline]
            fn encode_to<W: Write>(&self, enc: &mut Encoder<W>) -> Result<(), Error> {
                enc.encode_int(i64::from(*self))
            }
        }
    )+};
}

impl_signed!(i8, i16, i32, i64);

impl Encode for bool {
    #[inline]
    fn encode_size(&self) -> usize {
        1
    }

    #[inline]
    fn encode_to<W: Write>(&self, enc: &mut Encoder<W>) -> Result<(), Error> {
        enc.encode_bool(*self)
    }
}

impl Encode for f32 {
    #[inline]
    fn encode_size(&self) -> usize {
        5
    }

    #[inline]
    fn encode_to<W: Write>(&self, enc: &mut Encoder<W>) -> Result<(), Error> {
        enc.encode_f32(*self)
    }
}

impl Encode for f64 {
    #[inline]
    fn encode_size(&self) -> usize {
        9
    }

    #[inline]
    fn encode_to<W: Write>(&self, enc: &mut Encoder<W>) -> Result<(), Error> {
        enc.encode_f64(*self)
    }
}

impl<T: Encode> Encode for Option<T> {
    #[inline]
    fn encode_size(&self) -> usize {
        match self {
            Some(inner) => inner.encode_size(),
            None => 1,
        }
    }

    #[inline]
    fn encode_to<W: Write>(&self, enc: &mut Encoder<W>) -> Result<(), Error> {
        match self {
            Some(inner) => inner.encode_to(enc),
            None => enc.encode_nil(),
        }
    }
}
