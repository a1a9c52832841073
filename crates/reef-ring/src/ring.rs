//! Consistent hashing ring implementation.

use std::cell::OnceCell;
use std::collections::{HashMap, HashSet};
use std::fmt;

use indexmap::IndexMap;
use reef_hash::{Crc32Hasher, Position, RingHasher};
use tracing::debug;

use crate::error::RingError;

/// Number of virtual nodes per target when none is configured.
pub const DEFAULT_REPLICAS: u32 = 32;

/// Consistent hashing ring mapping resource keys to named targets.
///
/// Each target is placed on the ring at `replicas` virtual-node positions,
/// computed as `hash(target ++ index)` over the configured hasher. A
/// resource is owned by the target at the first position above the
/// resource's own position, wrapping at the top of the ring; collecting
/// further distinct targets along the walk yields a fallback owner list.
///
/// The sorted view of the ring is rebuilt lazily on the first lookup after
/// a mutation, so lookups take `&self` but the ring is `Send` and not
/// `Sync`. Callers sharing one across threads must either serialize access
/// or clone the ring, apply the mutation to the clone, and publish it as
/// the new snapshot.
#[derive(Debug, Clone)]
pub struct HashRing<H = Crc32Hasher> {
    hasher: H,
    replicas: u32,
    /// Ring position -> owning target. Colliding inserts overwrite.
    positions: HashMap<Position, String>,
    /// Target -> the exact positions inserted for it, in registration order.
    registry: IndexMap<String, Vec<Position>>,
    /// Ascending positions, taken by mutations and rebuilt on read.
    sorted: OnceCell<Vec<Position>>,
}

impl HashRing {
    /// Create a ring with the CRC32 hasher and [`DEFAULT_REPLICAS`]
    /// virtual nodes per target.
    pub fn new() -> Self {
        Self::with_config(Crc32Hasher, DEFAULT_REPLICAS)
    }
}

impl Default for HashRing {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: RingHasher> HashRing<H> {
    /// Create a ring with a custom hasher and the default replica count.
    pub fn with_hasher(hasher: H) -> Self {
        Self::with_config(hasher, DEFAULT_REPLICAS)
    }

    /// Create a ring with a custom hasher and replica count.
    ///
    /// `replicas` is the number of virtual nodes placed per target and must
    /// be at least 1. More replicas smooth the key distribution across
    /// targets at the cost of a larger ring.
    pub fn with_config(hasher: H, replicas: u32) -> Self {
        Self {
            hasher,
            replicas,
            positions: HashMap::new(),
            registry: IndexMap::new(),
            sorted: OnceCell::new(),
        }
    }

    /// Register a target, placing its virtual nodes on the ring.
    ///
    /// Virtual node `i` lands at `hash(target ++ i)` with `i` rendered in
    /// decimal. If a virtual node collides with an occupied position the
    /// new entry overwrites the old occupant; on a 64-bit ring this is a
    /// vanishingly rare artifact, accepted rather than corrected.
    ///
    /// Returns `&mut Self` for chaining. Fails with
    /// [`RingError::DuplicateTarget`] if the target is already registered,
    /// without touching the ring.
    pub fn add_target(&mut self, target: impl Into<String>) -> Result<&mut Self, RingError> {
        let target = target.into();
        if self.registry.contains_key(&target) {
            return Err(RingError::DuplicateTarget(target));
        }

        let mut placed = Vec::with_capacity(self.replicas as usize);
        for i in 0..self.replicas {
            let position = self.hasher.position(format!("{target}{i}").as_bytes());
            self.positions.insert(position, target.clone());
            placed.push(position);
        }

        debug!(%target, replicas = self.replicas, "added target to ring");
        self.registry.insert(target, placed);
        self.sorted.take();
        Ok(self)
    }

    /// Register every target in `targets`, in order.
    ///
    /// Stops at the first failure and propagates it; targets registered
    /// before the failure stay registered. Callers needing all-or-nothing
    /// batches must pre-validate uniqueness themselves.
    pub fn add_targets<I, T>(&mut self, targets: I) -> Result<&mut Self, RingError>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        for target in targets {
            self.add_target(target)?;
        }
        Ok(self)
    }

    /// Remove a target and every virtual node it placed on the ring.
    ///
    /// Positions are removed exactly as recorded at registration; if a
    /// later colliding insert overwrote one of them, that occupant is
    /// evicted along with it (the same accepted collision artifact as on
    /// insertion). Remaining targets keep their registration order.
    ///
    /// Fails with [`RingError::UnknownTarget`] if the target is not
    /// registered, without touching the ring.
    pub fn remove_target(&mut self, target: &str) -> Result<&mut Self, RingError> {
        let Some(placed) = self.registry.shift_remove(target) else {
            return Err(RingError::UnknownTarget(target.to_string()));
        };

        for position in placed {
            self.positions.remove(&position);
        }

        debug!(%target, "removed target from ring");
        self.sorted.take();
        Ok(self)
    }

    /// Registered targets in the order they were added.
    pub fn targets(&self) -> Vec<&str> {
        self.registry.keys().map(String::as_str).collect()
    }

    /// Number of registered targets.
    pub fn target_count(&self) -> usize {
        self.registry.len()
    }

    /// Number of occupied ring positions across all targets.
    ///
    /// Equals `target_count() * replicas` unless virtual nodes collided.
    pub fn position_count(&self) -> usize {
        self.positions.len()
    }

    /// Whether the ring has no registered targets.
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Map a resource to its owning target.
    ///
    /// Fails with [`RingError::NoTargets`] if the ring is empty.
    pub fn lookup(&self, resource: &str) -> Result<&str, RingError> {
        self.lookup_list(resource, 1)?
            .into_iter()
            .next()
            .ok_or(RingError::NoTargets)
    }

    /// Map a resource to an ordered list of up to `count` distinct targets.
    ///
    /// The first entry is the resource's owner; the rest are the next
    /// distinct targets encountered walking the ring, usable as fallback or
    /// replica destinations. Returns `min(count, target_count())` entries,
    /// or an empty list on an empty ring. The result depends only on the
    /// current membership, never on lookup history.
    ///
    /// Fails with [`RingError::InvalidCount`] if `count` is zero.
    pub fn lookup_list(&self, resource: &str, count: usize) -> Result<Vec<&str>, RingError> {
        if count == 0 {
            return Err(RingError::InvalidCount);
        }
        if self.positions.is_empty() {
            return Ok(Vec::new());
        }
        // A single target owns every key; skip the position walk.
        if self.registry.len() == 1 {
            if let Some((only, _)) = self.registry.first() {
                return Ok(vec![only.as_str()]);
            }
        }

        let resource_position = self.hasher.position(resource.as_bytes());
        let sorted = self.sorted_positions();

        // First position strictly above the resource; everything at or
        // below it is reached through the wrap-around.
        let start = sorted.partition_point(|&p| p <= resource_position);

        let wanted = count.min(self.registry.len());
        let mut found = Vec::with_capacity(wanted);
        let mut seen = HashSet::with_capacity(wanted);

        for position in sorted[start..].iter().chain(sorted[..start].iter()) {
            let target = self.positions[position].as_str();
            if seen.insert(target) {
                found.push(target);
                if found.len() == wanted {
                    break;
                }
            }
        }

        Ok(found)
    }

    /// Ascending ring positions, rebuilt if a mutation invalidated them.
    fn sorted_positions(&self) -> &[Position] {
        self.sorted.get_or_init(|| {
            let mut all: Vec<Position> = self.positions.keys().copied().collect();
            all.sort_unstable();
            all
        })
    }
}

impl<H> fmt::Display for HashRing<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HashRing{{targets:[")?;
        for (i, target) in self.registry.keys().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{target}")?;
        }
        write!(f, "]}}")
    }
}
