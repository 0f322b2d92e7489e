use crate::foundation::frame::FrameRGBA;
use crate::foundation::math::Rng64;

/// Standard deviation of the grain at intensity 1, in channel units.
pub const MAX_GRAIN_SIGMA: f64 = 32.0;

/// Add monochrome zero-mean Gaussian noise, sampled per pixel from `seed`.
pub fn apply_grain(frame: &mut FrameRGBA, intensity: f32, seed: u64) {
    if intensity <= 0.0 {
        return;
    }
    let sigma = f64::from(intensity.min(1.0)) * MAX_GRAIN_SIGMA;
    let mut rng = Rng64::new(seed);
    let mut spare: Option<f64> = None;

    for px in frame.data.chunks_exact_mut(4) {
        let n = match spare.take() {
            Some(n) => n,
            None => {
                let (a, b) = rng.next_gaussian_pair();
                spare = Some(b);
                a
            }
        };
        let delta = (n * sigma) as f32;
        for c in &mut px[..3] {
            *c = (f32::from(*c) + delta).round().clamp(0.0, 255.0) as u8;
        }
    }
}
