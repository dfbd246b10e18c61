pub mod constants;
pub mod error;
pub mod options;
pub mod signed;
pub mod unsigned;
mod groups;

pub use error::*;
pub use options::*;
pub use signed::*;
pub use unsigned::*;

use crate::source::ByteSource;

/// Method-call form of the streaming decoders for any [`ByteSource`]
pub trait ReadLeb128: ByteSource {
    fn read_unsigned(&mut self) -> Result<u64> {
        unsigned::read_unsigned(self)
    }

    fn read_signed(&mut self) -> Result<i64> {
        signed::read_signed(self)
    }

    fn read_unsigned_with(&mut self, opts: &DecodeOptions) -> Result<u64> {
        unsigned::read_unsigned_with(self, opts)
    }

    fn read_signed_with(&mut self, opts: &DecodeOptions) -> Result<i64> {
        signed::read_signed_with(self, opts)
    }
}

impl<S: ByteSource + ?Sized> ReadLeb128 for S {}
