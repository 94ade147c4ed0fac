//! FNV-1a digests over the shared output buffers.
//!
//! Not cryptographic; used for fast bit-exact comparison of runs.

use fourrooms_core::OwnedBuffers;

/// FNV-1a offset basis for 64-bit.
pub const FNV_OFFSET: u64 = 0xcbf29ce484222325;
/// FNV-1a prime for 64-bit.
const FNV_PRIME: u64 = 0x00000100000001B3;

#[inline]
pub(crate) fn fnv1a_byte(hash: u64, byte: u8) -> u64 {
    (hash ^ byte as u64).wrapping_mul(FNV_PRIME)
}

#[inline]
pub(crate) fn fnv1a_bytes(mut hash: u64, bytes: &[u8]) -> u64 {
    for &b in bytes {
        hash = fnv1a_byte(hash, b);
    }
    hash
}

#[inline]
pub(crate) fn fnv1a_u32(hash: u64, v: u32) -> u64 {
    fnv1a_bytes(hash, &v.to_le_bytes())
}

/// Fold `buffers` into `hash`: observations, reward bits, then both
/// flag arrays. Actions are inputs and are not hashed.
pub fn fold_buffers(mut hash: u64, buffers: &OwnedBuffers) -> u64 {
    hash = fnv1a_bytes(hash, buffers.observations());
    for &r in buffers.rewards() {
        hash = fnv1a_u32(hash, r.to_bits());
    }
    hash = fnv1a_bytes(hash, buffers.terminals());
    fnv1a_bytes(hash, buffers.truncations())
}

/// Digest of the current contents of `buffers`.
pub fn buffers_hash(buffers: &OwnedBuffers) -> u64 {
    fold_buffers(FNV_OFFSET, buffers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_contents_same_hash() {
        let a = OwnedBuffers::new(2);
        let b = OwnedBuffers::new(2);
        assert_eq!(buffers_hash(&a), buffers_hash(&b));
    }

    #[test]
    fn actions_are_not_hashed() {
        let a = OwnedBuffers::new(2);
        let mut b = OwnedBuffers::new(2);
        b.actions_mut()[1] = 3;
        assert_eq!(buffers_hash(&a), buffers_hash(&b));
    }

    #[test]
    fn batch_size_changes_hash() {
        assert_ne!(
            buffers_hash(&OwnedBuffers::new(1)),
            buffers_hash(&OwnedBuffers::new(2))
        );
    }

    #[test]
    fn empty_input_is_offset() {
        assert_eq!(fnv1a_bytes(FNV_OFFSET, &[]), FNV_OFFSET);
    }
}
