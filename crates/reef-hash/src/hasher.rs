//! The hasher contract and the three reference implementations.

use md5::{Digest, Md5};
use sha1::Sha1;

/// A position on the ring: a 64-bit ordered key.
///
/// Every hasher maps into this single numeric type, so ring order is the
/// same no matter which hasher a ring was configured with. Digest-based
/// hashers truncate to a `u64` rather than comparing hex prefixes as
/// strings; for a fixed-width big-endian read the two orders coincide.
pub type Position = u64;

/// A deterministic function from a byte string to a ring position.
///
/// Implementations must return the same position for the same input for as
/// long as a ring holds them. The ring injects its hasher at construction
/// and never swaps it afterwards, so all positions within one ring are
/// mutually comparable.
pub trait RingHasher {
    /// Hash `input` to its position on the ring.
    fn position(&self, input: &[u8]) -> Position;
}

/// CRC32 checksum hasher, the ring's default.
///
/// Occupies only the low 32 bits of the position space, which is plenty for
/// placement and cheap to compute.
#[derive(Debug, Clone, Copy, Default)]
pub struct Crc32Hasher;

impl RingHasher for Crc32Hasher {
    fn position(&self, input: &[u8]) -> Position {
        u64::from(crc32fast::hash(input))
    }
}

/// MD5 hasher truncated to the first 8 digest bytes, read big-endian.
#[derive(Debug, Clone, Copy, Default)]
pub struct Md5Hasher;

impl RingHasher for Md5Hasher {
    fn position(&self, input: &[u8]) -> Position {
        let digest = Md5::digest(input);
        let prefix: [u8; 8] = digest[..8].try_into().expect("md5 digest is 16 bytes");
        u64::from_be_bytes(prefix)
    }
}

/// SHA-1 hasher truncated to the first 8 digest bytes, read big-endian.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha1Hasher;

impl RingHasher for Sha1Hasher {
    fn position(&self, input: &[u8]) -> Position {
        let digest = Sha1::digest(input);
        let prefix: [u8; 8] = digest[..8].try_into().expect("sha1 digest is 20 bytes");
        u64::from_be_bytes(prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crc32_deterministic() {
        let h = Crc32Hasher;
        assert_eq!(h.position(b"alpha"), h.position(b"alpha"));
        assert_ne!(h.position(b"alpha"), h.position(b"beta"));
    }

    #[test]
    fn test_crc32_check_value() {
        // Standard CRC-32 (IEEE) check value.
        assert_eq!(Crc32Hasher.position(b"123456789"), 0xCBF4_3926);
    }

    #[test]
    fn test_crc32_fits_in_32_bits() {
        for input in [&b"a"[..], b"node-1", b"some longer input string"] {
            assert!(Crc32Hasher.position(input) <= u64::from(u32::MAX));
        }
    }

    #[test]
    fn test_md5_truncates_digest_prefix() {
        // md5("") = d41d8cd98f00b204e9800998ecf8427e
        assert_eq!(Md5Hasher.position(b""), 0xD41D_8CD9_8F00_B204);
    }

    #[test]
    fn test_sha1_truncates_digest_prefix() {
        // sha1("") = da39a3ee5e6b4b0d3255bfef95601890afd80709
        assert_eq!(Sha1Hasher.position(b""), 0xDA39_A3EE_5E6B_4B0D);
    }

    #[test]
    fn test_digest_hashers_deterministic() {
        let input = b"node-7";
        assert_eq!(Md5Hasher.position(input), Md5Hasher.position(input));
        assert_eq!(Sha1Hasher.position(input), Sha1Hasher.position(input));
    }

    #[test]
    fn test_hashers_disagree_on_common_input() {
        let input = b"shared-key";
        let crc = Crc32Hasher.position(input);
        let md5 = Md5Hasher.position(input);
        let sha1 = Sha1Hasher.position(input);
        assert_ne!(crc, md5);
        assert_ne!(crc, sha1);
        assert_ne!(md5, sha1);
    }
}
