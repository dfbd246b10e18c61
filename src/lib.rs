//! LEB128 variable-length integers for `u64` and `i64`.
//!
//! Each encoded byte carries seven payload bits, least significant group
//! first, with the high bit set on every byte except the last.
//!
//! ```
//! use leb128_codec::{decode_signed, encode_signed, encode_unsigned, read_unsigned};
//!
//! assert_eq!(encode_unsigned(12857), [0xB9, 0x64]);
//! assert_eq!(decode_signed(&encode_signed(-129)).unwrap(), -129);
//!
//! let mut stream: &[u8] = &[0x80, 0x01, 0x7F];
//! assert_eq!(read_unsigned(&mut stream).unwrap(), 128);
//! assert_eq!(read_unsigned(&mut stream).unwrap(), 127);
//! assert!(read_unsigned(&mut stream).is_err());
//! ```
//!
//! Decoders accept overlong encodings without complaint and stop at a
//! per-width group cap; see [`DecodeOptions`] for the caps and what happens
//! when one is hit.

pub mod codec;
pub mod source;

pub use codec::*;
pub use source::{ByteSource, IterSource, ReaderSource, SliceSource};
