/// Small deterministic PRNG (SplitMix64).
///
/// Every random decision in the pipeline (camera move, mood, grain, dissolve texture) draws from
/// one of these, seeded explicitly, so a fixed seed reproduces a render bit for bit.
#[derive(Clone, Copy, Debug)]
pub struct Rng64 {
    state: u64,
}

impl Rng64 {
    /// Seed a new generator.
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Next raw 64-bit value.
    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        mix64(self.state)
    }

    /// Uniform `f64` in `[0, 1)` with 53 bits of precision.
    pub fn next_f64_01(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) * (1.0 / ((1u64 << 53) as f64))
    }

    /// Uniform index in `0..n`. `n` must be non-zero.
    pub fn next_index(&mut self, n: usize) -> usize {
        debug_assert!(n > 0);
        ((self.next_f64_01() * n as f64) as usize).min(n - 1)
    }

    /// A pair of independent standard normal samples (Box-Muller).
    pub fn next_gaussian_pair(&mut self) -> (f64, f64) {
        // Keep u1 away from 0 so ln() stays finite.
        let u1 = self.next_f64_01().max(f64::MIN_POSITIVE);
        let u2 = self.next_f64_01();
        let r = (-2.0 * u1.ln()).sqrt();
        let theta = std::f64::consts::TAU * u2;
        (r * theta.cos(), r * theta.sin())
    }
}

/// SplitMix64 finalizer.
pub fn mix64(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Derive an independent stream seed from a base seed and a salt (scene index, frame index...).
pub fn derive_seed(base: u64, salt: u64) -> u64 {
    mix64(base ^ salt.wrapping_mul(0xD6E8_FEB8_6659_FD93))
}

/// Linear interpolation.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
