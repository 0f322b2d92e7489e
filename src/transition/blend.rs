use crate::effects::composite::crossfade_in_place;
use crate::effects::grain::apply_grain;
use crate::foundation::error::{ReelError, ReelResult};
use crate::foundation::frame::FrameRGBA;
use crate::transition::plan::{TransitionKind, TransitionSpec};

/// Peak grain intensity of the dissolve texture, reached mid-transition.
pub const DISSOLVE_GRAIN: f32 = 0.25;
/// Extra magnification at the zoom transition's seam.
pub const ZOOM_AMOUNT: f64 = 0.3;

/// Normalized progress `t / overlap`, clamped to `[0, 1]`.
pub fn progress(spec: &TransitionSpec, t: f64) -> f64 {
    if spec.overlap <= 0.0 {
        return 1.0;
    }
    (t / spec.overlap).clamp(0.0, 1.0)
}

/// Narration gains `(outgoing, incoming)` at `t` seconds into the overlap.
///
/// Linear for every kind, wipe included.
pub fn audio_weights(spec: &TransitionSpec, t: f64) -> (f32, f32) {
    let p = progress(spec, t) as f32;
    (1.0 - p, p)
}

/// Frame `t` seconds into the overlap, from A's frame at `da - d + t` and B's at `t`.
pub fn blend_frames(
    spec: &TransitionSpec,
    a: &FrameRGBA,
    b: &FrameRGBA,
    t: f64,
    seed: u64,
) -> ReelResult<FrameRGBA> {
    if a.width != b.width || a.height != b.height {
        return Err(ReelError::validation(format!(
            "transition frames differ in size: {}x{} vs {}x{}",
            a.width, a.height, b.width, b.height
        )));
    }
    let p = progress(spec, t);

    match spec.kind {
        TransitionKind::Fade => {
            let mut out = a.clone();
            crossfade_in_place(&mut out, b, p as f32)?;
            Ok(out)
        }
        TransitionKind::Dissolve => {
            let mut out = a.clone();
            crossfade_in_place(&mut out, b, p as f32)?;
            let texture = DISSOLVE_GRAIN * (4.0 * p * (1.0 - p)) as f32;
            apply_grain(&mut out, texture, seed);
            Ok(out)
        }
        TransitionKind::Wipe => Ok(wipe(a, b, p)),
        TransitionKind::Zoom => {
            let mut out = a.zoomed_about_center(1.0 + ZOOM_AMOUNT * p);
            let incoming = b.zoomed_about_center(1.0 + ZOOM_AMOUNT * (1.0 - p));
            crossfade_in_place(&mut out, &incoming, p as f32)?;
            Ok(out)
        }
    }
}

// Columns left of the edge already show B; the rest still show A.
fn wipe(a: &FrameRGBA, b: &FrameRGBA, p: f64) -> FrameRGBA {
    let edge = ((p * f64::from(a.width)).round() as usize).min(a.width as usize);
    let mut out = a.clone();
    let stride = a.width as usize * 4;
    for (dst, src) in out
        .data
        .chunks_exact_mut(stride)
        .zip(b.data.chunks_exact(stride))
    {
        dst[..edge * 4].copy_from_slice(&src[..edge * 4]);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/transition/blend.rs"]
mod tests;
