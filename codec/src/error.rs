//! Error types for codec operations

use crate::value::Kind;
use thiserror::Error;

/// Error type for codec operations
#[derive(Error, Debug)]
pub enum Error {
    /// The byte source ran out before a complete value was read.
    ///
    /// This is the expected terminal condition when draining a stream of
    /// back-to-back values with repeated [`crate::Decoder::decode`] calls.
    #[error("unexpected end of stream")]
    EndOfStream,
    /// The header byte matches no tag in the wire-format table.
    #[error("invalid header byte {0:#04x}")]
    InvalidHeader(u8),
    /// A typed accessor was invoked against a value of a different kind.
    #[error("type mismatch: requested {0}, found {1}")]
    TypeMismatch(Kind, Kind), // requested, actual
    /// An opaque failure of the underlying byte source or sink.
    #[error("i/o failure")]
    Io(#[from] std::io::Error),
}
