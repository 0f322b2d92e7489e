use crate::foundation::core::Resolution;
use crate::foundation::error::{ReelError, ReelResult};

/// One rendered video frame.
///
/// Pixels are straight-alpha RGBA8 in R, G, B, A byte order, row-major and tightly packed.
/// Every frame produced by the pipeline is fully opaque.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// RGBA8 bytes, `width * height * 4` long.
    pub data: Vec<u8>,
}

impl FrameRGBA {
    /// A frame filled with a single opaque color.
    pub fn filled(res: Resolution, rgb: [u8; 3]) -> Self {
        let mut data = Vec::with_capacity(res.rgba_len());
        for _ in 0..(res.width as usize * res.height as usize) {
            data.extend_from_slice(&[rgb[0], rgb[1], rgb[2], 255]);
        }
        Self {
            width: res.width,
            height: res.height,
            data,
        }
    }

    /// An opaque black frame.
    pub fn black(res: Resolution) -> Self {
        Self::filled(res, [0, 0, 0])
    }

    /// Wrap raw RGBA8 bytes, checking the length.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> ReelResult<Self> {
        if data.len() != width as usize * height as usize * 4 {
            return Err(ReelError::validation(format!(
                "frame data length {} does not match {width}x{height}x4",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Frame dimensions.
    pub fn resolution(&self) -> Resolution {
        Resolution::new(self.width, self.height)
    }

    /// RGB of the pixel at `(x, y)`.
    pub fn rgb_at(&self, x: u32, y: u32) -> [u8; 3] {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    /// Multiply RGB by `k` (used for fades to black). Alpha stays opaque.
    pub fn scale_rgb(&mut self, k: f32) {
        let k = k.clamp(0.0, 1.0);
        if k >= 1.0 {
            return;
        }
        for px in self.data.chunks_exact_mut(4) {
            px[0] = to_u8(f32::from(px[0]) * k);
            px[1] = to_u8(f32::from(px[1]) * k);
            px[2] = to_u8(f32::from(px[2]) * k);
        }
    }

    /// Resample this frame magnified by `scale` around its center, keeping the frame size.
    ///
    /// `scale >= 1` never samples outside the source.
    pub fn zoomed_about_center(&self, scale: f64) -> FrameRGBA {
        let scale = scale.max(1.0);
        if (scale - 1.0).abs() < 1e-9 {
            return self.clone();
        }
        let (w, h) = (f64::from(self.width), f64::from(self.height));
        let mut out = Vec::with_capacity(self.data.len());
        for oy in 0..self.height {
            let v = (f64::from(oy) + 0.5 - h / 2.0) / scale + h / 2.0 - 0.5;
            for ox in 0..self.width {
                let u = (f64::from(ox) + 0.5 - w / 2.0) / scale + w / 2.0 - 0.5;
                let rgb = sample_bilinear(&self.data, self.width, self.height, u, v);
                out.extend_from_slice(&[rgb[0], rgb[1], rgb[2], 255]);
            }
        }
        FrameRGBA {
            width: self.width,
            height: self.height,
            data: out,
        }
    }

    /// Save as PNG (debugging and the `frame` CLI command).
    pub fn save_png(&self, path: &std::path::Path) -> ReelResult<()> {
        use anyhow::Context as _;
        image::save_buffer_with_format(
            path,
            &self.data,
            self.width,
            self.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }
}

/// Bilinear sample of an RGBA8 buffer at continuous pixel coordinates `(u, v)`.
///
/// Pixel centers sit at integer coordinates. Coordinates are clamped to the buffer edge, so the
/// sampler never reads undefined pixels.
pub(crate) fn sample_bilinear(data: &[u8], width: u32, height: u32, u: f64, v: f64) -> [u8; 3] {
    let max_x = f64::from(width.saturating_sub(1));
    let max_y = f64::from(height.saturating_sub(1));
    let u = u.clamp(0.0, max_x);
    let v = v.clamp(0.0, max_y);

    let x0 = u.floor() as usize;
    let y0 = v.floor() as usize;
    let x1 = (x0 + 1).min(width as usize - 1);
    let y1 = (y0 + 1).min(height as usize - 1);
    let fx = (u - x0 as f64) as f32;
    let fy = (v - y0 as f64) as f32;

    let stride = width as usize * 4;
    let p00 = y0 * stride + x0 * 4;
    let p10 = y0 * stride + x1 * 4;
    let p01 = y1 * stride + x0 * 4;
    let p11 = y1 * stride + x1 * 4;

    let mut out = [0u8; 3];
    for (c, o) in out.iter_mut().enumerate() {
        let top = f32::from(data[p00 + c]) * (1.0 - fx) + f32::from(data[p10 + c]) * fx;
        let bottom = f32::from(data[p01 + c]) * (1.0 - fx) + f32::from(data[p11 + c]) * fx;
        *o = to_u8(top * (1.0 - fy) + bottom * fy);
    }
    out
}

/// Round and clamp a channel value into `0..=255`.
pub(crate) fn to_u8(v: f32) -> u8 {
    if v.is_nan() {
        return 0;
    }
    v.round().clamp(0.0, 255.0) as u8
}
