//! Hash capability for the reef consistent-hashing ring.
//!
//! The ring places targets and resources by hashing byte strings to ordered
//! positions. This crate defines that contract ([`RingHasher`] and the
//! canonical [`Position`] key type) together with three reference hashers:
//! [`Crc32Hasher`] (the default), [`Md5Hasher`], and [`Sha1Hasher`].
//!
//! Any deterministic byte-string hash with totally ordered output satisfies
//! the contract; the ring never depends on which implementation it was
//! given beyond determinism and ordering.

mod hasher;

pub use hasher::{Crc32Hasher, Md5Hasher, Position, RingHasher, Sha1Hasher};
