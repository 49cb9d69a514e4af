//! Serialize values with the classic MessagePack wire format.
//!
//! # Overview
//!
//! A compact, self-describing binary codec designed to be embedded inside
//! larger systems (RPC layers, storage engines, IPC) that need
//! language-agnostic data interchange:
//! - [`Encoder`] writes typed values to a byte sink, always choosing the most
//!   compact wire representation that can hold the value.
//! - [`Decoder`] reads one value at a time from a byte source into an owned,
//!   dynamically typed [`Value`] tree, accepting any width the producer chose.
//! - [`Value`] exposes type-checked accessors that fail with
//!   [`Error::TypeMismatch`] instead of reinterpreting the payload.
//!
//! A stream is zero or more back-to-back encoded values with no outer
//! framing; [`Error::EndOfStream`] is the terminal condition of a drain loop.
//!
//! # Supported Types
//!
//! Natively encodes:
//! - Primitives: `bool`, `u8`..`u64`, `i8`..`i64`, `f32`, `f64`
//! - Byte strings: [`bytes::Bytes`], `str`, `String` (text is bytes on this
//!   wire)
//! - Sequences: `Vec<T>`, `&[T]`, `[T; N]`
//! - Associations: `BTreeMap<K, V>`, `HashMap<K, V>` (caller iteration order,
//!   no reordering or deduplication)
//! - `Option<T>` (`None` is nil, no wrapper byte) and decoded [`Value`] trees
//!
//! User-defined types encode by implementing the [`Encode`] trait.
//!
//! The classic tag set only: no extension, timestamp, bin8, or str8 tags.
//!
//! # Example
//!
//! ```
//! use mpack::{decode_from_slice, Encode};
//!
//! // Every encoding is minimal: an array of three zeros takes four bytes.
//! let encoded = vec![0u8, 0, 0].encode();
//! assert_eq!(encoded.as_ref(), &[0x93, 0x00, 0x00, 0x00]);
//!
//! // Decoding produces a dynamically typed tree, read back through
//! // type-checked accessors.
//! let value = decode_from_slice(&encoded)?;
//! for item in value.as_array()? {
//!     assert_eq!(item.as_u8()?, 0);
//! }
//! # Ok::<(), mpack::Error>(())
//! ```
//!
//! # Example (Streaming)
//!
//! ```
//! use mpack::{Decoder, Encoder, Error};
//! use std::collections::BTreeMap;
//!
//! // An encoder exclusively owns its sink; back-to-back values need no
//! // framing between them.
//! let mut enc = Encoder::new(Vec::new());
//! enc.encode(&"status")?;
//! enc.encode(&BTreeMap::from([("code", 70000u32)]))?;
//! let stream = enc.into_inner();
//!
//! // A decoder exclusively owns its source and yields one value per call.
//! let mut dec = Decoder::new(&stream[..]);
//! assert_eq!(dec.decode()?.as_raw()?, b"status");
//! let map = dec.decode()?;
//! assert_eq!(map.as_map()?[0].1.as_u32()?, 70000);
//! assert!(matches!(dec.decode(), Err(Error::EndOfStream)));
//! # Ok::<(), mpack::Error>(())
//! ```

pub mod decode;
pub mod encode;
pub mod error;
pub mod marker;
pub mod types;
pub mod value;

// Re-export main types and traits
pub use decode::{decode_from_slice, Decoder};
pub use encode::{Encode, Encoder};
pub use error::Error;
pub use value::{Kind, Value};
