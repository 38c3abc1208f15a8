//! Capacity policies: when eviction fires and how many victims to drain.
//!
//! A capacity policy never sees keys or values; it answers two questions
//! about a size `s`:
//!
//! - `needs_eviction(s)`: would inserting one more entry violate the limit?
//! - `eviction_count(s)`: the minimum number of victims such that, after
//!   removing them and inserting one entry, the limit holds.
//!
//! ## Key Components
//!
//! - [`FixedCapacity`]: hard entry-count limit.
//! - [`DynamicCapacity`]: entry-count limit that grows and shrinks between
//!   bounds based on observed utilization.
//! - [`SoftCapacity`]: target with a bounded overshoot tolerance; bursts are
//!   absorbed and then drained back to the target.
//! - [`MemoryCapacity`]: byte budget divided by a per-entry size estimate.

use crate::error::ConfigError;
use crate::traits::{check_range, CapacityPolicy};

// =============================================================================
// FixedCapacity
// =============================================================================

/// Hard limit on the number of entries.
///
/// # Example
///
/// ```
/// use evictkit::capacity::FixedCapacity;
/// use evictkit::traits::CapacityPolicy;
///
/// let policy = FixedCapacity::new(100);
/// assert_eq!(policy.capacity(), 100);
/// assert!(policy.needs_eviction(100));
/// assert_eq!(policy.eviction_count(100), 1);
/// ```
#[derive(Debug, Clone)]
pub struct FixedCapacity {
    capacity: usize,
}

impl FixedCapacity {
    /// Creates a fixed limit of `capacity` entries. Capacity 0 is legal and
    /// disables caching.
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }
}

impl CapacityPolicy for FixedCapacity {
    fn capacity(&self) -> usize {
        self.capacity
    }

    fn set_capacity(&mut self, new_capacity: usize) {
        self.capacity = new_capacity;
    }

    fn needs_eviction(&self, current_size: usize) -> bool {
        current_size >= self.capacity
    }

    fn eviction_count(&self, current_size: usize) -> usize {
        if current_size >= self.capacity {
            current_size - self.capacity + 1
        } else {
            0
        }
    }
}

// =============================================================================
// DynamicCapacity
// =============================================================================

const DEFAULT_MIN_CAPACITY: usize = 10;
const DEFAULT_MAX_CAPACITY: usize = 1000;
const DEFAULT_GROWTH_FACTOR: f64 = 1.5;
const DEFAULT_SHRINK_FACTOR: f64 = 0.75;
const DEFAULT_ADJUSTMENT_INTERVAL: usize = 100;
const MIN_SHRINK_FACTOR: f64 = 0.1;
const HIGH_UTILIZATION: f64 = 0.9;
const LOW_UTILIZATION: f64 = 0.5;

/// Entry-count limit that adapts to utilization.
///
/// The current limit stays within `[min, max]`. Call
/// [`consider_capacity_adjustment`](Self::consider_capacity_adjustment)
/// periodically (typically once per cache operation); every
/// `adjustment_interval` calls the policy compares size against the current
/// limit and grows by `growth_factor` above 90% utilization or shrinks by
/// `shrink_factor` below 50%. Shrinking never goes below the current size.
#[derive(Debug, Clone)]
pub struct DynamicCapacity {
    base: usize,
    current: usize,
    min: usize,
    max: usize,
    growth_factor: f64,
    shrink_factor: f64,
    adjustment_counter: usize,
    adjustment_interval: usize,
}

impl DynamicCapacity {
    /// Creates an adaptive limit starting at `base` with default bounds and
    /// factors. The default bounds are widened to include `base`.
    pub fn new(base: usize) -> Self {
        Self {
            base,
            current: base,
            min: DEFAULT_MIN_CAPACITY.min(base),
            max: DEFAULT_MAX_CAPACITY.max(base),
            growth_factor: DEFAULT_GROWTH_FACTOR,
            shrink_factor: DEFAULT_SHRINK_FACTOR,
            adjustment_counter: 0,
            adjustment_interval: DEFAULT_ADJUSTMENT_INTERVAL,
        }
    }

    /// Creates a fully configured adaptive limit.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] unless `min <= base <= max`,
    /// `growth_factor >= 1`, and `0 < shrink_factor <= 1`.
    pub fn try_new(
        base: usize,
        min: usize,
        max: usize,
        growth_factor: f64,
        shrink_factor: f64,
        adjustment_interval: usize,
    ) -> Result<Self, ConfigError> {
        if min > max {
            return Err(ConfigError::new(format!(
                "min capacity {min} must not exceed max capacity {max}"
            )));
        }
        if base < min || base > max {
            return Err(ConfigError::new(format!(
                "base capacity {base} must lie within [{min}, {max}]"
            )));
        }
        check_range("growth factor", growth_factor, 1.0, f64::MAX)?;
        if !(shrink_factor.is_finite() && shrink_factor > 0.0 && shrink_factor <= 1.0) {
            return Err(ConfigError::new(format!(
                "shrink factor must be within (0, 1], got {shrink_factor}"
            )));
        }

        Ok(Self {
            base,
            current: base,
            min,
            max,
            growth_factor,
            shrink_factor,
            adjustment_counter: 0,
            adjustment_interval: adjustment_interval.max(1),
        })
    }

    /// Counts one operation toward the adjustment interval; at each interval
    /// boundary, grows or shrinks the current limit based on utilization.
    pub fn consider_capacity_adjustment(&mut self, current_size: usize) {
        self.adjustment_counter += 1;
        if self.adjustment_counter < self.adjustment_interval {
            return;
        }
        self.adjustment_counter = 0;

        let utilization = if self.current == 0 {
            f64::INFINITY
        } else {
            current_size as f64 / self.current as f64
        };

        if utilization > HIGH_UTILIZATION && self.current < self.max {
            let grown = (self.current as f64 * self.growth_factor) as usize;
            self.current = grown.min(self.max);
        } else if utilization < LOW_UTILIZATION && self.current > self.min {
            let shrunk = (self.current as f64 * self.shrink_factor) as usize;
            self.current = shrunk.max(self.min).max(current_size);
        }
    }

    /// Reconfigures the growth and shrink factors, clamping them into their
    /// valid ranges.
    pub fn set_growth_parameters(&mut self, growth_factor: f64, shrink_factor: f64) {
        self.growth_factor = growth_factor.max(1.0);
        self.shrink_factor = shrink_factor.clamp(MIN_SHRINK_FACTOR, 1.0);
    }

    /// Reconfigures the bounds and clamps the current limit into them.
    /// `min` is raised to at least 1 and `max` to at least `min`.
    pub fn set_capacity_bounds(&mut self, min: usize, max: usize) {
        self.min = min.max(1);
        self.max = max.max(self.min);
        self.current = self.current.clamp(self.min, self.max);
    }

    /// Returns the capacity requested by the last `set_capacity` (or the
    /// constructor), before clamping.
    pub fn base_capacity(&self) -> usize {
        self.base
    }

    /// Returns the lower capacity bound.
    pub fn min_capacity(&self) -> usize {
        self.min
    }

    /// Returns the upper capacity bound.
    pub fn max_capacity(&self) -> usize {
        self.max
    }

    /// Returns the number of calls between adjustment decisions.
    pub fn adjustment_interval(&self) -> usize {
        self.adjustment_interval
    }
}

impl CapacityPolicy for DynamicCapacity {
    fn capacity(&self) -> usize {
        self.current
    }

    fn set_capacity(&mut self, new_capacity: usize) {
        self.base = new_capacity;
        self.current = new_capacity.clamp(self.min, self.max);
    }

    fn needs_eviction(&self, current_size: usize) -> bool {
        current_size >= self.current
    }

    fn eviction_count(&self, current_size: usize) -> usize {
        if current_size >= self.current {
            current_size - self.current + 1
        } else {
            0
        }
    }
}

// =============================================================================
// SoftCapacity
// =============================================================================

const DEFAULT_OVERAGE_TOLERANCE: f64 = 0.2;

/// Target capacity with a bounded overshoot.
///
/// Holds a target `t` and tolerance `τ`, giving a hard maximum
/// `m = ⌊t·(1+τ)⌋`. Eviction only becomes mandatory at `m`; the count then
/// drains all the way back to the target, so bursts are absorbed and paid
/// off at once. Between `t` and `m`, `eviction_count` reports a single
/// victim for callers that drain gradually.
#[derive(Debug, Clone)]
pub struct SoftCapacity {
    target: usize,
    hard_max: usize,
    tolerance: f64,
}

impl SoftCapacity {
    /// Creates a soft limit with the default 20% tolerance.
    pub fn new(target: usize) -> Self {
        Self {
            target,
            hard_max: Self::hard_max_for(target, DEFAULT_OVERAGE_TOLERANCE),
            tolerance: DEFAULT_OVERAGE_TOLERANCE,
        }
    }

    /// Creates a soft limit with an explicit tolerance.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] unless `tolerance` lies in `[0, 1]`.
    pub fn try_with_tolerance(target: usize, tolerance: f64) -> Result<Self, ConfigError> {
        check_range("overage tolerance", tolerance, 0.0, 1.0)?;
        Ok(Self {
            target,
            hard_max: Self::hard_max_for(target, tolerance),
            tolerance,
        })
    }

    /// Returns the overage tolerance as a fraction.
    pub fn overage_tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Reconfigures the tolerance, clamped into `[0, 1]`.
    pub fn set_overage_tolerance(&mut self, tolerance: f64) {
        self.tolerance = if tolerance.is_finite() {
            tolerance.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.hard_max = Self::hard_max_for(self.target, self.tolerance);
    }

    /// Returns the hard maximum `⌊target·(1+tolerance)⌋`.
    pub fn hard_capacity(&self) -> usize {
        self.hard_max
    }

    /// Returns `true` if `current_size` exceeds the target (the overshoot
    /// region in which gradual draining applies).
    pub fn is_over_target(&self, current_size: usize) -> bool {
        current_size > self.target
    }

    fn hard_max_for(target: usize, tolerance: f64) -> usize {
        (target as f64 * (1.0 + tolerance)) as usize
    }
}

impl CapacityPolicy for SoftCapacity {
    fn capacity(&self) -> usize {
        self.target
    }

    fn set_capacity(&mut self, new_capacity: usize) {
        self.target = new_capacity;
        self.hard_max = Self::hard_max_for(self.target, self.tolerance);
    }

    fn needs_eviction(&self, current_size: usize) -> bool {
        current_size >= self.hard_max
    }

    fn eviction_count(&self, current_size: usize) -> usize {
        if current_size >= self.hard_max {
            current_size - self.target + 1
        } else if current_size > self.target {
            1
        } else {
            0
        }
    }
}

// =============================================================================
// MemoryCapacity
// =============================================================================

/// Byte budget divided by a per-entry size estimate.
///
/// Useful when entries are roughly uniform in size and the deployment limit
/// is expressed in bytes rather than entries. The estimate is a constant:
/// the policy never inspects actual values.
#[derive(Debug, Clone)]
pub struct MemoryCapacity {
    budget: usize,
    item_estimate: usize,
}

impl MemoryCapacity {
    /// Creates a budget of `budget` bytes at `item_estimate` bytes per
    /// entry. An estimate of 0 is coerced to 1.
    pub fn new(budget: usize, item_estimate: usize) -> Self {
        Self {
            budget,
            item_estimate: item_estimate.max(1),
        }
    }

    /// Returns the byte budget.
    pub fn budget(&self) -> usize {
        self.budget
    }

    /// Reconfigures the byte budget.
    pub fn set_budget(&mut self, budget: usize) {
        self.budget = budget;
    }

    /// Returns the per-entry byte estimate.
    pub fn item_estimate(&self) -> usize {
        self.item_estimate
    }

    /// Reconfigures the per-entry byte estimate (0 is coerced to 1).
    pub fn set_item_estimate(&mut self, item_estimate: usize) {
        self.item_estimate = item_estimate.max(1);
    }

    /// Returns the estimated byte usage at `current_size` entries.
    pub fn estimated_usage(&self, current_size: usize) -> usize {
        current_size * self.item_estimate
    }
}

impl CapacityPolicy for MemoryCapacity {
    fn capacity(&self) -> usize {
        self.budget / self.item_estimate
    }

    fn set_capacity(&mut self, new_capacity: usize) {
        self.budget = new_capacity * self.item_estimate;
    }

    fn needs_eviction(&self, current_size: usize) -> bool {
        self.estimated_usage(current_size) >= self.budget
    }

    fn eviction_count(&self, current_size: usize) -> usize {
        let usage = self.estimated_usage(current_size);
        if usage >= self.budget {
            let excess = usage - self.budget + self.item_estimate;
            excess.div_ceil(self.item_estimate)
        } else {
            0
        }
    }
}
