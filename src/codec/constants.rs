//! Wire-level constants for LEB128 varints

/// Payload bits carried by each encoded byte
pub const GROUP_BITS: u32 = 7;

/// Mask selecting the payload bits of a byte
pub const PAYLOAD_MASK: u8 = 0x7F;

/// High bit set on every byte except the last
pub const CONTINUATION_BIT: u8 = 0x80;

/// Groups needed to cover every bit of a `u64`: ceil(64 / 7)
pub const U64_MAX_GROUPS: usize = (u64::BITS as usize + GROUP_BITS as usize - 1) / GROUP_BITS as usize;

/// Groups needed to cover every bit of an `i64`: ceil(64 / 7)
pub const I64_MAX_GROUPS: usize = (i64::BITS as usize + GROUP_BITS as usize - 1) / GROUP_BITS as usize;

/// Legacy unsigned cap: 9 groups give 63 bits of shift room below a 64-bit word
pub const LEGACY_UNSIGNED_GROUPS: usize = 9;

/// Legacy signed cap: 5 groups give 35 bits, sized for 32-bit signed payloads
pub const LEGACY_SIGNED_GROUPS: usize = 5;
