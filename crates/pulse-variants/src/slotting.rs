//! Deterministic slot derivation for traffic splitting.

use pulse_core::constants::{SLOT_COUNT, SLOT_HASH_MODULUS};
use pulse_core::types::MemberId;

/// Map a member id to a stable 0–99 slot.
///
/// Rolling hash over the decimal id string:
/// `h = (h*31 + byte) mod 1_000_003`, then `|h| mod 100`.
///
/// The polynomial is frozen: changing it reshuffles every sticky
/// assignment in production.
pub fn slot_for(member_id: MemberId) -> u32 {
    let digits = member_id.to_string();
    let mut hash: i64 = 0;
    for byte in digits.bytes() {
        hash = (hash * 31 + i64::from(byte)) % SLOT_HASH_MODULUS;
    }
    (hash.abs() % i64::from(SLOT_COUNT)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_is_deterministic() {
        for id in [0i64, 1, 42, 999_999, 123_456_789] {
            assert_eq!(slot_for(id), slot_for(id));
        }
    }

    #[test]
    fn slot_matches_hand_rolled_hash() {
        // "1" → 49 → slot 49; "42" → (52*31 + 50) = 1662 → slot 62.
        assert_eq!(slot_for(1), 49);
        assert_eq!(slot_for(42), 62);
    }

    #[test]
    fn slots_stay_in_range() {
        for id in 0..5_000i64 {
            assert!(slot_for(id) < SLOT_COUNT);
        }
    }

    #[test]
    fn slots_spread_over_all_buckets() {
        let mut hits = [0u32; 100];
        for id in 0..10_000i64 {
            hits[slot_for(id) as usize] += 1;
        }
        assert!(
            hits.iter().all(|&h| h > 0),
            "10k sequential ids must touch every slot"
        );
    }
}
