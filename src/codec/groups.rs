use tracing::debug;

use super::constants::{CONTINUATION_BIT, GROUP_BITS, PAYLOAD_MASK};
use super::error::{Leb128Error, Result};
use super::options::CapPolicy;
use crate::source::{ByteSource, SliceSource};

/// Raw payload bits gathered from one varint, before any sign handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Groups {
    pub bits: u64,
    pub count: usize,
}

impl Groups {
    /// Bit offset one past the last group read
    pub fn shift(&self) -> u32 {
        self.count as u32 * GROUP_BITS
    }
}

/// Pulls groups until one arrives without the continuation bit or `cap`
/// groups have been read. Payload bits that land past bit 63 are dropped.
pub(crate) fn accumulate<S: ByteSource + ?Sized>(
    source: &mut S,
    cap: usize,
    policy: CapPolicy,
) -> Result<Groups> {
    let mut bits = 0u64;
    let mut count = 0usize;
    let mut byte = CONTINUATION_BIT;

    while byte & CONTINUATION_BIT != 0 && count < cap {
        byte = source.next_byte()?.ok_or(Leb128Error::UnexpectedEof)?;
        let shift = count as u32 * GROUP_BITS;
        bits |= u64::from(byte & PAYLOAD_MASK).checked_shl(shift).unwrap_or(0);
        count += 1;
    }

    if byte & CONTINUATION_BIT != 0 {
        debug!(groups = count, ?policy, "varint hit group cap with continuation bit set");
        if policy == CapPolicy::Reject {
            return Err(Leb128Error::Malformed { groups: count });
        }
    }

    Ok(Groups { bits, count })
}

/// Slice flavor of [`accumulate`]: also reports bytes consumed, and turns
/// running off the end into [`Leb128Error::Truncated`].
pub(crate) fn accumulate_slice(buf: &[u8], cap: usize, policy: CapPolicy) -> Result<(Groups, usize)> {
    let mut source = SliceSource::new(buf);
    match accumulate(&mut source, cap, policy) {
        Ok(groups) => Ok((groups, source.position())),
        Err(Leb128Error::UnexpectedEof) => Err(Leb128Error::Truncated {
            needed: buf.len() + 1,
            available: buf.len(),
        }),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stops_at_first_terminal_byte() {
        let mut input: &[u8] = &[0x80, 0x01, 0x55];
        let groups = accumulate(&mut input, 10, CapPolicy::Truncate).unwrap();
        assert_eq!(groups, Groups { bits: 128, count: 2 });
        assert_eq!(groups.shift(), 14);
        assert_eq!(input, &[0x55]);
    }

    #[test]
    fn truncates_or_rejects_at_cap() {
        let data = [0xFFu8; 4];

        let mut input = &data[..];
        let groups = accumulate(&mut input, 3, CapPolicy::Truncate).unwrap();
        assert_eq!(groups.count, 3);
        assert_eq!(groups.bits, (1 << 21) - 1);
        assert_eq!(input.len(), 1);

        let mut input = &data[..];
        assert!(matches!(
            accumulate(&mut input, 3, CapPolicy::Reject),
            Err(Leb128Error::Malformed { groups: 3 })
        ));
    }

    #[test]
    fn terminal_byte_at_cap_is_not_malformed() {
        let mut input: &[u8] = &[0x80, 0x80, 0x01];
        let groups = accumulate(&mut input, 3, CapPolicy::Reject).unwrap();
        assert_eq!(groups.bits, 1 << 14);
    }

    #[test]
    fn slice_reports_consumed_and_truncation() {
        let (groups, used) = accumulate_slice(&[0xB9, 0x64, 0x00], 10, CapPolicy::Truncate).unwrap();
        assert_eq!(groups.bits, 12857);
        assert_eq!(used, 2);

        assert!(matches!(
            accumulate_slice(&[0x80, 0x80], 10, CapPolicy::Truncate),
            Err(Leb128Error::Truncated { needed: 3, available: 2 })
        ));
    }

    #[test]
    fn exhausted_source_is_eof() {
        let mut input: &[u8] = &[0x80];
        assert!(matches!(
            accumulate(&mut input, 10, CapPolicy::Truncate),
            Err(Leb128Error::UnexpectedEof)
        ));
    }
}
