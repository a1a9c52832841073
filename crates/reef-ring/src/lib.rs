//! Consistent-hashing ring mapping resource keys to named targets.
//!
//! A [`HashRing`] maps an unbounded set of resource keys onto a dynamic set
//! of named targets (cache nodes, storage shards, ...) such that adding or
//! removing a target relocates only a small fraction of keys.
//!
//! Each target occupies multiple virtual-node positions on the ring,
//! computed by the configured [`RingHasher`]. A resource is owned by the
//! target whose position follows the resource's own position, walking the
//! ring in ascending order and wrapping at the top; [`HashRing::lookup_list`]
//! continues the walk to produce an ordered set of distinct fallback owners.
//!
//! The ring is a synchronous, memory-resident structure: no operation
//! blocks or performs I/O, and membership is driven entirely by explicit
//! [`add_target`](HashRing::add_target) / [`remove_target`](HashRing::remove_target)
//! calls from its owner.

mod error;
mod ring;

pub use error::RingError;
pub use ring::{HashRing, DEFAULT_REPLICAS};

pub use reef_hash::{Crc32Hasher, Md5Hasher, Position, RingHasher, Sha1Hasher};
