//! FNV-1a, shared by `Environment`'s open-addressed bucket table and by
//! `Object::String`'s `HashKey` derivation — one implementation, not two.

const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const PRIME: u64 = 0x0000_0100_0000_01b3;

pub fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash = OFFSET_BASIS;
    for &byte in bytes {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(PRIME);
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_hashes_to_offset_basis() {
        assert_eq!(fnv1a(b""), OFFSET_BASIS);
    }

    #[test]
    fn distinct_inputs_hash_differently() {
        assert_ne!(fnv1a(b"one"), fnv1a(b"two"));
    }

    #[test]
    fn same_bytes_hash_identically() {
        assert_eq!(fnv1a(b"hello"), fnv1a(b"hello"));
    }
}
