//! Ordered Breakpoint Tables
//!
//! A table of `n` ascending bounds splits the real line into `n + 1`
//! contiguous half-open buckets: `(-inf, b0)`, `[b0, b1)`, ..., `[bn-1, +inf)`.
//! Every finite value lands in exactly one bucket.

/// Classification table mapping a numeric value to a category
#[derive(Debug, Clone, Copy)]
pub struct BreakpointTable<T: 'static> {
    bounds: &'static [f64],
    classes: &'static [T],
}

impl<T: Copy> BreakpointTable<T> {
    /// Build a table; `classes` must have exactly one more entry than `bounds`
    pub const fn new(bounds: &'static [f64], classes: &'static [T]) -> Self {
        assert!(
            classes.len() == bounds.len() + 1,
            "breakpoint table needs one more class than bounds"
        );
        Self { bounds, classes }
    }

    /// Category of `value` (lower bound inclusive, upper bound exclusive)
    pub fn classify(&self, value: f64) -> T {
        let idx = self
            .bounds
            .iter()
            .position(|&bound| value < bound)
            .unwrap_or(self.bounds.len());
        self.classes[idx]
    }

    /// Bucket edges for the category at `index`
    pub fn bucket(&self, index: usize) -> Option<(f64, f64)> {
        if index >= self.classes.len() {
            return None;
        }
        let lo = if index == 0 {
            f64::NEG_INFINITY
        } else {
            self.bounds[index - 1]
        };
        let hi = self.bounds.get(index).copied().unwrap_or(f64::INFINITY);
        Some((lo, hi))
    }

    /// Whether bounds are strictly ascending and finite
    pub fn is_ordered(&self) -> bool {
        self.bounds.iter().all(|b| b.is_finite())
            && self.bounds.windows(2).all(|w| w[0] < w[1])
    }

    pub fn bounds(&self) -> &'static [f64] {
        self.bounds
    }

    pub fn classes(&self) -> &'static [T] {
        self.classes
    }
}
