use rand::RngCore;

/// Small deterministic RNG (splitmix64) used for reproducible subsampling.
///
/// Instances are constructed locally and seeded per call so every draw
/// sequence is a pure function of the seed, independent of process state.
#[derive(Debug, Clone)]
pub struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    /// Create a generator seeded with `seed`.
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Current internal state, usable to resume an identical sequence.
    pub fn state(&self) -> u64 {
        self.state
    }

    fn next_u64_internal(&mut self) -> u64 {
        let mut z = self.state.wrapping_add(0x9E3779B97F4A7C15);
        self.state = z;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
        z ^ (z >> 31)
    }
}

impl RngCore for DeterministicRng {
    fn next_u32(&mut self) -> u32 {
        self.next_u64_internal() as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.next_u64_internal()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        let mut offset = 0;
        while offset < dest.len() {
            let value = self.next_u64_internal();
            let bytes = value.to_le_bytes();
            let remaining = dest.len() - offset;
            let copy_len = remaining.min(bytes.len());
            dest[offset..offset + copy_len].copy_from_slice(&bytes[..copy_len]);
            offset += copy_len;
        }
    }
}

/// Seed assigned to the fraction at `index` in a fraction list.
///
/// Documented contract: `base + stride * index`. With the default base 1000
/// and stride 100 this reproduces the historical seed sequence
/// 1000, 1100, 1200, ... and extends it deterministically for fraction lists
/// of any length.
pub fn seed_for_index(base: u64, stride: u64, index: usize) -> u64 {
    base.wrapping_add(stride.wrapping_mul(index as u64))
}
