use rand::Rng;

/// Chooses which canned message to show out of a pool.
pub trait MessagePicker {
    /// Returns an index in `0..len`. `len` is never zero.
    fn pick(&self, len: usize) -> usize;
}

/// Uniform choice backed by the thread-local RNG, seeded once per thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomPicker;

impl MessagePicker for RandomPicker {
    fn pick(&self, len: usize) -> usize {
        rand::rng().random_range(0..len)
    }
}

/// Always picks the same index, clamped to the pool. Makes message selection
/// predictable in tests.
#[cfg(test)]
#[derive(Debug, Clone, Copy)]
pub struct FixedPicker(pub usize);

#[cfg(test)]
impl MessagePicker for FixedPicker {
    fn pick(&self, len: usize) -> usize {
        self.0.min(len - 1)
    }
}
