use crate::foundation::frame::FrameRGBA;

/// Darken toward the corners: factor `1` at the center falling linearly to `1 - intensity` at
/// the corners, applied equally to R, G and B.
pub fn apply_vignette(frame: &mut FrameRGBA, intensity: f32) {
    if intensity <= 0.0 || frame.width == 0 || frame.height == 0 {
        return;
    }
    let intensity = intensity.min(1.0);
    let cx = frame.width as f32 / 2.0;
    let cy = frame.height as f32 / 2.0;
    let corner = (cx * cx + cy * cy).sqrt();
    let width = frame.width as usize;

    for (i, px) in frame.data.chunks_exact_mut(4).enumerate() {
        let x = (i % width) as f32 + 0.5 - cx;
        let y = (i / width) as f32 + 0.5 - cy;
        let r = ((x * x + y * y).sqrt() / corner).min(1.0);
        let k = 1.0 - intensity * r;
        for c in &mut px[..3] {
            *c = (f32::from(*c) * k).round().clamp(0.0, 255.0) as u8;
        }
    }
}
