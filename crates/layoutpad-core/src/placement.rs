//! Placement of newly added rectangles.

use uuid::Uuid;

/// Source of top-left positions for new rectangles.
pub trait Placement {
    /// Return an `(x, y)` pair with both coordinates integral and in `[0, range)`.
    fn next_position(&mut self, range: f64) -> (f64, f64);
}

/// Uniform random placement backed by a splitmix64 generator.
///
/// Seeded from a v4 UUID so it works everywhere `uuid` can draw randomness,
/// WASM included.
#[derive(Debug, Clone)]
pub struct RandomPlacement {
    state: u64,
}

impl RandomPlacement {
    /// Create a generator with a random seed.
    pub fn new() -> Self {
        Self::with_seed(Uuid::new_v4().as_u128() as u64)
    }

    /// Create a generator with a fixed seed (reproducible sequences).
    pub fn with_seed(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform float in `[0, 1)`.
    fn next_unit(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn next_coordinate(&mut self, range: f64) -> f64 {
        (self.next_unit() * range).floor()
    }
}

impl Default for RandomPlacement {
    fn default() -> Self {
        Self::new()
    }
}

impl Placement for RandomPlacement {
    fn next_position(&mut self, range: f64) -> (f64, f64) {
        let x = self.next_coordinate(range);
        let y = self.next_coordinate(range);
        (x, y)
    }
}
