use tracing::trace;

use super::constants::{CONTINUATION_BIT, GROUP_BITS, PAYLOAD_MASK};
use super::error::Result;
use super::groups::{accumulate, accumulate_slice, Groups};
use super::options::DecodeOptions;
use crate::source::ByteSource;

/// Append the signed LEB128 encoding of `value` to `out`
pub fn encode_signed_into(mut value: i64, out: &mut Vec<u8>) {
    // Terminal value of the arithmetic shift: all zeros or all ones
    let end = if value & i64::MIN == 0 { 0 } else { -1 };
    let mut remaining = value >> GROUP_BITS;
    let mut more = true;

    while more {
        // Stop once the remainder is pure sign and the group's bit 6 already carries it
        more = remaining != end || (remaining & 1) != ((value >> 6) & 1);
        let byte = (value as u8) & PAYLOAD_MASK;
        out.push(if more { byte | CONTINUATION_BIT } else { byte });
        value = remaining;
        remaining >>= GROUP_BITS;
    }
}

/// Encode `value` as a minimal two's-complement LEB128 varint
pub fn encode_signed(value: i64) -> Vec<u8> {
    let mut out = Vec::with_capacity(signed_len(value));
    encode_signed_into(value, &mut out);
    out
}

/// Length of [`encode_signed`]'s output, without encoding
pub fn signed_len(value: i64) -> usize {
    let magnitude = if value < 0 { !value } else { value };
    // One extra bit for the sign
    let bits = i64::BITS - magnitude.leading_zeros() + 1;
    bits.div_ceil(GROUP_BITS) as usize
}

fn sign_extend(groups: Groups) -> i64 {
    let mut result = groups.bits as i64;
    let shift = groups.shift();
    if shift < i64::BITS {
        let sign_bits = -1i64 << shift;
        if (sign_bits >> 1) & result != 0 {
            result |= sign_bits;
        }
    }
    result
}

/// Decode a signed varint from the start of `buf`; trailing bytes are ignored
pub fn decode_signed(buf: &[u8]) -> Result<i64> {
    decode_signed_prefix(buf).map(|(value, _)| value)
}

pub fn decode_signed_prefix(buf: &[u8]) -> Result<(i64, usize)> {
    decode_signed_prefix_with(buf, &DecodeOptions::default())
}

pub fn decode_signed_with(buf: &[u8], opts: &DecodeOptions) -> Result<i64> {
    decode_signed_prefix_with(buf, opts).map(|(value, _)| value)
}

pub fn decode_signed_prefix_with(buf: &[u8], opts: &DecodeOptions) -> Result<(i64, usize)> {
    opts.validate()?;
    let (groups, used) = accumulate_slice(buf, opts.signed_group_cap, opts.cap_policy)?;
    Ok((sign_extend(groups), used))
}

/// Read one signed varint from `source`.
///
/// Running out of input is reported as [`Leb128Error::UnexpectedEof`],
/// the same as [`read_unsigned`](super::read_unsigned).
///
/// [`Leb128Error::UnexpectedEof`]: super::Leb128Error::UnexpectedEof
pub fn read_signed<S: ByteSource + ?Sized>(source: &mut S) -> Result<i64> {
    read_signed_with(source, &DecodeOptions::default())
}

pub fn read_signed_with<S: ByteSource + ?Sized>(source: &mut S, opts: &DecodeOptions) -> Result<i64> {
    opts.validate()?;
    let groups = accumulate(source, opts.signed_group_cap, opts.cap_policy)?;
    let value = sign_extend(groups);
    trace!(value, groups = groups.count, "read signed varint");
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::error::Leb128Error;

    const VECTORS: &[(i64, &[u8])] = &[
        (0, &[0x00]),
        (1, &[0x01]),
        (2, &[0x02]),
        (-1, &[0x7F]),
        (-2, &[0x7E]),
        (63, &[0x3F]),
        (64, &[0xC0, 0x00]),
        (-64, &[0x40]),
        (-65, &[0xBF, 0x7F]),
        (127, &[0xFF, 0x00]),
        (128, &[0x80, 0x01]),
        (129, &[0x81, 0x01]),
        (-127, &[0x81, 0x7F]),
        (-128, &[0x80, 0x7F]),
        (-129, &[0xFF, 0x7E]),
        (624485, &[0xE5, 0x8E, 0x26]),
        (-123456, &[0xC0, 0xBB, 0x78]),
        (i64::MAX, &[0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x00]),
        (i64::MIN, &[0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x7F]),
    ];

    #[test]
    fn encodes_known_vectors() {
        for &(value, bytes) in VECTORS {
            assert_eq!(encode_signed(value), bytes, "value: {}", value);
            assert_eq!(signed_len(value), bytes.len(), "value: {}", value);
        }
    }

    #[test]
    fn decodes_known_vectors() {
        for &(value, bytes) in VECTORS {
            assert_eq!(decode_signed(bytes).unwrap(), value, "bytes: {:02x?}", bytes);
            let mut source = bytes;
            assert_eq!(read_signed(&mut source).unwrap(), value);
            assert!(source.is_empty());
        }
    }

    #[test]
    fn sign_comes_from_bit_six_of_last_group() {
        assert_eq!(decode_signed(&[0x40]).unwrap(), -64);
        assert_eq!(decode_signed(&[0x3F]).unwrap(), 63);
        assert_eq!(decode_signed(&[0xC0, 0x00]).unwrap(), 64);
    }

    #[test]
    fn overlong_encodings_are_accepted() {
        assert_eq!(decode_signed(&[0xFF, 0x7F]).unwrap(), -1);
        assert_eq!(decode_signed(&[0x80, 0x00]).unwrap(), 0);
    }

    #[test]
    fn eof_is_recoverable() {
        let mut source: &[u8] = &[0x80, 0x80];
        assert!(matches!(read_signed(&mut source), Err(Leb128Error::UnexpectedEof)));

        let mut empty: &[u8] = &[];
        assert!(matches!(read_signed(&mut empty), Err(Leb128Error::UnexpectedEof)));
    }

    #[test]
    fn truncated_slice_is_an_error() {
        assert!(matches!(
            decode_signed(&[0xFF]),
            Err(Leb128Error::Truncated { needed: 2, available: 1 })
        ));
    }

    #[test]
    fn legacy_cap_reads_five_groups() {
        let encoded = encode_signed(1 << 40);
        assert_eq!(encoded.len(), 6);
        assert_eq!(decode_signed_prefix_with(&encoded, &DecodeOptions::LEGACY).unwrap(), (0, 5));

        let small = -123456;
        assert_eq!(decode_signed_with(&encode_signed(small), &DecodeOptions::LEGACY).unwrap(), small);
    }

    #[test]
    fn legacy_strict_flags_wide_values() {
        let encoded = encode_signed(i64::MIN);
        assert!(matches!(
            decode_signed_with(&encoded, &DecodeOptions::LEGACY.strict()),
            Err(Leb128Error::Malformed { groups: 5 })
        ));
    }
}
