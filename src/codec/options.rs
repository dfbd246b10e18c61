use serde::{Deserialize, Serialize};

use super::constants::{I64_MAX_GROUPS, LEGACY_SIGNED_GROUPS, LEGACY_UNSIGNED_GROUPS, U64_MAX_GROUPS};
use super::error::{Leb128Error, Result};

/// What a decoder does when it reaches its group cap mid-value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapPolicy {
    /// Stop reading and return whatever was accumulated
    #[default]
    Truncate,
    /// Fail with [`Leb128Error::Malformed`]
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeOptions {
    pub unsigned_group_cap: usize,
    pub signed_group_cap: usize,
    pub cap_policy: CapPolicy,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self::FULL_WIDTH
    }
}

impl DecodeOptions {
    /// Caps wide enough for every `u64` and `i64`
    pub const FULL_WIDTH: Self = Self {
        unsigned_group_cap: U64_MAX_GROUPS,
        signed_group_cap: I64_MAX_GROUPS,
        cap_policy: CapPolicy::Truncate,
    };

    /// 9 unsigned / 5 signed groups, silently truncating past the cap.
    ///
    /// Signed values outside roughly ±2^34 and unsigned values at or above
    /// 2^63 do not survive a round trip under these caps.
    pub const LEGACY: Self = Self {
        unsigned_group_cap: LEGACY_UNSIGNED_GROUPS,
        signed_group_cap: LEGACY_SIGNED_GROUPS,
        cap_policy: CapPolicy::Truncate,
    };

    pub fn strict(mut self) -> Self {
        self.cap_policy = CapPolicy::Reject;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.unsigned_group_cap == 0 || self.signed_group_cap == 0 {
            return Err(Leb128Error::InvalidOptions("group cap must be at least 1"));
        }
        if self.unsigned_group_cap > U64_MAX_GROUPS {
            return Err(Leb128Error::InvalidOptions("unsigned group cap exceeds 64-bit width"));
        }
        if self.signed_group_cap > I64_MAX_GROUPS {
            return Err(Leb128Error::InvalidOptions("signed group cap exceeds 64-bit width"));
        }
        Ok(())
    }
}
