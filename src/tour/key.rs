use super::types::{CanonicalKey, UsageVector, SEGMENT_COUNT};

/// Folds the flags into an integer, first flag ending up as the most
/// significant bit. Only meaningful for up to 32 flags.
pub fn to_key(usage: &[bool]) -> CanonicalKey {
    debug_assert!(usage.len() <= CanonicalKey::BITS as usize);
    usage
        .iter()
        .fold(0, |acc, &used| (acc << 1) | CanonicalKey::from(used))
}

/// Inverse of `to_key` for six-segment vectors. Bits above the low six are ignored.
pub fn from_key(key: CanonicalKey) -> UsageVector {
    let mut usage = [false; SEGMENT_COUNT];
    for (i, slot) in usage.iter_mut().enumerate() {
        let shift = SEGMENT_COUNT - 1 - i;
        *slot = (key >> shift) & 1 == 1;
    }
    usage
}

/// Zero-padded binary rendering, e.g. `43` -> `101011` for width 6.
pub fn key_to_binary(key: CanonicalKey, width: usize) -> String {
    format!("{:0width$b}", key, width = width)
}
