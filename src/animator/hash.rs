//! Identity of animation-graph states.

use serde::{Deserialize, Serialize};
use std::fmt;

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// Hash of an animation-graph state name.
///
/// Notifications from the host graph are keyed by this value. Hosts either
/// compute it with [`StateHash::of`] or supply their own hashes through
/// [`StateHash::from_raw`] together with
/// `AnimatorMachine::register_state_hashed`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateHash(i32);

impl StateHash {
    /// Hash a state name with 32-bit FNV-1a over its UTF-8 bytes.
    ///
    /// The value is fixed across builds and platforms, so it can be stored
    /// or shared with a host that computes the same function.
    pub fn of(name: &str) -> Self {
        let hash = name.bytes().fold(FNV_OFFSET_BASIS, |hash, byte| {
            (hash ^ u32::from(byte)).wrapping_mul(FNV_PRIME)
        });
        StateHash(hash as i32)
    }

    pub fn from_raw(value: i32) -> Self {
        StateHash(value)
    }

    pub fn value(self) -> i32 {
        self.0
    }
}

impl fmt::Display for StateHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0 as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_name_same_hash() {
        assert_eq!(StateHash::of("Base.Idle"), StateHash::of("Base.Idle"));
    }

    #[test]
    fn different_names_differ() {
        assert_ne!(StateHash::of("Base.Idle"), StateHash::of("Base.Run"));
    }

    #[test]
    fn hashes_match_fnv1a_reference_values() {
        assert_eq!(StateHash::of("").value() as u32, 0x811c_9dc5);
        assert_eq!(StateHash::of("a").value() as u32, 0xe40c_292c);
        assert_eq!(StateHash::of("foobar").value() as u32, 0xbf9c_f968);
    }

    #[test]
    fn raw_hashes_round_trip() {
        assert_eq!(StateHash::from_raw(-17).value(), -17);
        assert_eq!(StateHash::from_raw(255).to_string(), "0x000000ff");
    }
}
