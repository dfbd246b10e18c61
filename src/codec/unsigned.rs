use tracing::trace;

use super::constants::{CONTINUATION_BIT, GROUP_BITS, PAYLOAD_MASK};
use super::error::Result;
use super::groups::{accumulate, accumulate_slice};
use super::options::DecodeOptions;
use crate::source::ByteSource;

/// Append the unsigned LEB128 encoding of `value` to `out`
pub fn encode_unsigned_into(mut value: u64, out: &mut Vec<u8>) {
    let mut remaining = value >> GROUP_BITS;
    while remaining != 0 {
        out.push((value as u8 & PAYLOAD_MASK) | CONTINUATION_BIT);
        value = remaining;
        remaining >>= GROUP_BITS;
    }
    out.push(value as u8 & PAYLOAD_MASK);
}

/// Encode `value` as a minimal unsigned LEB128 varint
pub fn encode_unsigned(value: u64) -> Vec<u8> {
    let mut out = Vec::with_capacity(unsigned_len(value));
    encode_unsigned_into(value, &mut out);
    out
}

/// Length of [`encode_unsigned`]'s output, without encoding
pub fn unsigned_len(value: u64) -> usize {
    let bits = u64::BITS - value.leading_zeros();
    bits.div_ceil(GROUP_BITS).max(1) as usize
}

/// Decode an unsigned varint from the start of `buf`; trailing bytes are ignored
pub fn decode_unsigned(buf: &[u8]) -> Result<u64> {
    decode_unsigned_prefix(buf).map(|(value, _)| value)
}

/// Like [`decode_unsigned`], also returning how many bytes the varint used
pub fn decode_unsigned_prefix(buf: &[u8]) -> Result<(u64, usize)> {
    decode_unsigned_prefix_with(buf, &DecodeOptions::default())
}

pub fn decode_unsigned_with(buf: &[u8], opts: &DecodeOptions) -> Result<u64> {
    decode_unsigned_prefix_with(buf, opts).map(|(value, _)| value)
}

pub fn decode_unsigned_prefix_with(buf: &[u8], opts: &DecodeOptions) -> Result<(u64, usize)> {
    opts.validate()?;
    let (groups, used) = accumulate_slice(buf, opts.unsigned_group_cap, opts.cap_policy)?;
    Ok((groups.bits, used))
}

/// Read one unsigned varint from `source`, pulling a byte at a time
pub fn read_unsigned<S: ByteSource + ?Sized>(source: &mut S) -> Result<u64> {
    read_unsigned_with(source, &DecodeOptions::default())
}

pub fn read_unsigned_with<S: ByteSource + ?Sized>(source: &mut S, opts: &DecodeOptions) -> Result<u64> {
    opts.validate()?;
    let groups = accumulate(source, opts.unsigned_group_cap, opts.cap_policy)?;
    trace!(value = groups.bits, groups = groups.count, "read unsigned varint");
    Ok(groups.bits)
}
