use image::imageops::{self, FilterType};

use crate::foundation::core::Resolution;
use crate::foundation::error::{ReelError, ReelResult};
use crate::foundation::frame::{FrameRGBA, sample_bilinear};
use crate::motion::camera::{CropWindow, canvas_size};

/// A source still, cropped to the output aspect and scaled to 1.5x the output size.
///
/// Camera moves crop this canvas (virtually magnified by the window's zoom), so every sampled
/// pixel comes from real image data. Sources smaller than the canvas are upscaled here.
#[derive(Clone, Debug)]
pub struct WorkingCanvas {
    width: u32,
    height: u32,
    data: Vec<u8>,
    output: Resolution,
}

impl WorkingCanvas {
    /// Fill-crop `source` to the aspect of `output` and resample it to the working size.
    pub fn prepare(source: &image::DynamicImage, output: Resolution) -> ReelResult<Self> {
        output.validate()?;
        let rgba = source.to_rgba8();
        let (sw, sh) = rgba.dimensions();
        if sw == 0 || sh == 0 {
            return Err(ReelError::media("source image is empty"));
        }

        let (cx, cy, cw, ch) = aspect_crop(sw, sh, output.aspect());
        let cropped = imageops::crop_imm(&rgba, cx, cy, cw, ch).to_image();
        let (width, height) = canvas_size(output);
        let resized = imageops::resize(&cropped, width, height, FilterType::CatmullRom);

        let mut data = resized.into_raw();
        // Flatten any transparency onto black so frames stay opaque.
        for px in data.chunks_exact_mut(4) {
            let a = u16::from(px[3]);
            if a != 255 {
                for c in &mut px[..3] {
                    *c = crate::foundation::math::mul_div255_u16(u16::from(*c), a) as u8;
                }
                px[3] = 255;
            }
        }

        tracing::debug!(
            source = %format!("{sw}x{sh}"),
            crop = %format!("{cw}x{ch}+{cx}+{cy}"),
            canvas = %format!("{width}x{height}"),
            "working canvas prepared"
        );
        Ok(Self {
            width,
            height,
            data,
            output,
        })
    }

    /// Base canvas size (before any zoom).
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Output frame size this canvas was prepared for.
    pub fn output(&self) -> Resolution {
        self.output
    }

    /// Render the crop `window` into an output-sized frame.
    pub fn render(&self, window: &CropWindow) -> FrameRGBA {
        let zoom = window.zoom.max(1.0);
        let mut data = Vec::with_capacity(self.output.rgba_len());
        for oy in 0..self.output.height {
            let v = (window.y + f64::from(oy) + 0.5) / zoom - 0.5;
            for ox in 0..self.output.width {
                let u = (window.x + f64::from(ox) + 0.5) / zoom - 0.5;
                let rgb = sample_bilinear(&self.data, self.width, self.height, u, v);
                data.extend_from_slice(&[rgb[0], rgb[1], rgb[2], 255]);
            }
        }
        FrameRGBA {
            width: self.output.width,
            height: self.output.height,
            data,
        }
    }
}

/// Largest centered `(x, y, w, h)` region of a `sw x sh` image with aspect `target`.
pub(crate) fn aspect_crop(sw: u32, sh: u32, target: f64) -> (u32, u32, u32, u32) {
    let src_aspect = f64::from(sw) / f64::from(sh);
    if src_aspect > target {
        let w = ((f64::from(sh) * target).round() as u32).clamp(1, sw);
        ((sw - w) / 2, 0, w, sh)
    } else {
        let h = ((f64::from(sw) / target).round() as u32).clamp(1, sh);
        (0, (sh - h) / 2, sw, h)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/motion/canvas.rs"]
mod tests;
