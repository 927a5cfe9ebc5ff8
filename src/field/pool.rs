use crate::foundation::core::Point;

/// Default number of points retained by a [`VectorPool`].
pub const DEFAULT_POOL_CAPACITY: usize = 500;

/// A point checked out of a [`VectorPool`].
///
/// Neither `Clone` nor `Copy`: a pooled point has exactly one owner until it is moved back
/// into the pool with [`VectorPool::release`].
#[derive(Debug, PartialEq)]
pub struct PooledPoint(Point);

impl PooledPoint {
    /// Current coordinates.
    pub fn get(&self) -> Point {
        self.0
    }

    fn set(&mut self, p: Point) {
        self.0 = p;
    }
}

/// Counters describing pool traffic.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct VectorPoolStats {
    /// Points currently sitting in the free list.
    pub retained: usize,
    /// Points currently checked out.
    pub outstanding: usize,
    /// Points created because the free list was empty.
    pub allocated: u64,
    /// Acquires served from the free list.
    pub reused: u64,
    /// Points handed back through `release`.
    pub released: u64,
    /// Released points discarded because the free list was full.
    pub dropped_on_release: u64,
}

/// Bounded free-list of reusable points backing image-source positions.
///
/// Overflow on release is discarded, never retained past `capacity`.
#[derive(Debug)]
pub struct VectorPool {
    capacity: usize,
    free: Vec<PooledPoint>,
    stats: VectorPoolStats,
}

impl Default for VectorPool {
    fn default() -> Self {
        Self::new(DEFAULT_POOL_CAPACITY)
    }
}

impl VectorPool {
    /// Pool retaining at most `capacity` free points.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            free: Vec::new(),
            stats: VectorPoolStats::default(),
        }
    }

    /// Maximum number of retained points.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Change the retention cap, discarding free points beyond it.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
        self.free.truncate(capacity);
        self.free.shrink_to(capacity);
        self.stats.retained = self.free.len();
    }

    /// Points ready for reuse.
    pub fn available(&self) -> usize {
        self.free.len()
    }

    /// Snapshot of the traffic counters.
    pub fn stats(&self) -> VectorPoolStats {
        self.stats
    }

    /// Check out a point set to `p`, reusing a free one when possible.
    pub fn acquire(&mut self, p: Point) -> PooledPoint {
        self.stats.outstanding = self.stats.outstanding.saturating_add(1);
        match self.free.pop() {
            Some(mut v) => {
                self.stats.reused = self.stats.reused.saturating_add(1);
                self.stats.retained = self.free.len();
                v.set(p);
                v
            }
            None => {
                self.stats.allocated = self.stats.allocated.saturating_add(1);
                PooledPoint(p)
            }
        }
    }

    /// Return a point. Returns `false` when the pool was full and the point was discarded.
    pub fn release(&mut self, v: PooledPoint) -> bool {
        self.stats.outstanding = self.stats.outstanding.saturating_sub(1);
        self.stats.released = self.stats.released.saturating_add(1);
        if self.free.len() >= self.capacity {
            self.stats.dropped_on_release = self.stats.dropped_on_release.saturating_add(1);
            return false;
        }
        self.free.push(v);
        self.stats.retained = self.free.len();
        true
    }
}

#[cfg(test)]
#[path = "../../tests/unit/field/pool.rs"]
mod tests;
