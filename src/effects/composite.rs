use crate::foundation::error::{ReelError, ReelResult};
use crate::foundation::frame::FrameRGBA;
use crate::foundation::math::mul_div255_u16;

/// One premultiplied RGBA8 pixel.
pub type PremulRgba8 = [u8; 4];

/// Source-over of a premultiplied pixel onto `dst`, scaled by `opacity`.
pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = sa.saturating_add(mul_div255(u16::from(dst[3]), inv));
    for i in 0..3 {
        let sc = mul_div255(u16::from(src[i]), op);
        let dc = mul_div255(u16::from(dst[i]), inv);
        out[i] = sc.saturating_add(dc);
    }
    out
}

/// Linear blend `a * (1 - t) + b * t` of two pixels.
pub fn crossfade(a: PremulRgba8, b: PremulRgba8, t: f32) -> PremulRgba8 {
    let t = t.clamp(0.0, 1.0);
    let tt = ((t * 255.0).round() as i32).clamp(0, 255) as u16;
    let it = 255u16 - tt;

    let mut out = [0u8; 4];
    for i in 0..4 {
        let av = mul_div255(u16::from(a[i]), it);
        let bv = mul_div255(u16::from(b[i]), tt);
        out[i] = av.saturating_add(bv);
    }
    out
}

/// Blend `b` into `a` in place with weight `t` for `b`.
pub fn crossfade_in_place(a: &mut FrameRGBA, b: &FrameRGBA, t: f32) -> ReelResult<()> {
    if a.width != b.width || a.height != b.height {
        return Err(ReelError::validation(
            "crossfade expects frames of equal size",
        ));
    }
    for (d, s) in a.data.chunks_exact_mut(4).zip(b.data.chunks_exact(4)) {
        let out = crossfade([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]], t);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// A premultiplied RGBA8 bitmap placed over a frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sprite {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Premultiplied RGBA8 bytes.
    pub data: Vec<u8>,
}

/// Composite `sprite` onto `dst` with its top-left corner at `(x, y)`; off-frame parts clip.
pub fn over_sprite(dst: &mut FrameRGBA, sprite: &Sprite, x: i32, y: i32, opacity: f32) {
    if opacity <= 0.0 {
        return;
    }
    let (dw, dh) = (dst.width as i32, dst.height as i32);
    for sy in 0..sprite.height as i32 {
        let ty = y + sy;
        if ty < 0 || ty >= dh {
            continue;
        }
        for sx in 0..sprite.width as i32 {
            let tx = x + sx;
            if tx < 0 || tx >= dw {
                continue;
            }
            let si = (sy as usize * sprite.width as usize + sx as usize) * 4;
            let src = &sprite.data[si..si + 4];
            if src[3] == 0 {
                continue;
            }
            let di = (ty as usize * dst.width as usize + tx as usize) * 4;
            let d = &mut dst.data[di..di + 4];
            let out = over([d[0], d[1], d[2], d[3]], [src[0], src[1], src[2], src[3]], opacity);
            d.copy_from_slice(&out);
        }
    }
}

/// Blend a solid `rgb` rectangle with coverage `alpha` over `dst`, clipped to the frame.
pub fn fill_rect(dst: &mut FrameRGBA, x0: i32, y0: i32, w: u32, h: u32, rgb: [u8; 3], alpha: f32) {
    let a = ((alpha.clamp(0.0, 1.0) * 255.0).round()) as u16;
    if a == 0 {
        return;
    }
    let src = [
        mul_div255(u16::from(rgb[0]), a),
        mul_div255(u16::from(rgb[1]), a),
        mul_div255(u16::from(rgb[2]), a),
        a as u8,
    ];
    let x_start = x0.max(0) as u32;
    let y_start = y0.max(0) as u32;
    let x_end = ((x0 + w as i32).max(0) as u32).min(dst.width);
    let y_end = ((y0 + h as i32).max(0) as u32).min(dst.height);
    for ty in y_start..y_end {
        for tx in x_start..x_end {
            let di = (ty as usize * dst.width as usize + tx as usize) * 4;
            let d = &mut dst.data[di..di + 4];
            let out = over([d[0], d[1], d[2], d[3]], src, 1.0);
            d.copy_from_slice(&out);
        }
    }
}

fn mul_div255(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/effects/composite.rs"]
mod tests;
