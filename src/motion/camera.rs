use std::f64::consts::{PI, TAU};

use crate::animation::ease::Ease;
use crate::foundation::core::{Resolution, Vec2};
use crate::foundation::error::ReelError;
use crate::foundation::math::lerp;

/// Working canvas size relative to the output resolution.
pub const CANVAS_SCALE: f64 = 1.5;

/// The five simulated camera movements.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveKind {
    /// Linear zoom toward the center.
    Dolly,
    /// Horizontal sweep.
    Pan,
    /// Vertical sweep.
    Tilt,
    /// Circular drift.
    Arc,
    /// Eased forward zoom.
    Push,
}

impl MoveKind {
    /// Every movement kind.
    pub const ALL: [MoveKind; 5] = [
        MoveKind::Dolly,
        MoveKind::Pan,
        MoveKind::Tilt,
        MoveKind::Arc,
        MoveKind::Push,
    ];
}

impl std::str::FromStr for MoveKind {
    type Err = ReelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dolly" => Ok(Self::Dolly),
            "pan" => Ok(Self::Pan),
            "tilt" => Ok(Self::Tilt),
            "arc" => Ok(Self::Arc),
            "push" => Ok(Self::Push),
            other => Err(ReelError::validation(format!("unknown camera move '{other}'"))),
        }
    }
}

/// A camera move with its parameters.
///
/// Offsets are fractions of the output frame size; zooms are magnifications of the working
/// canvas.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CameraMove {
    /// Zoom from `zoom_from` to `zoom_to` linearly, always centered.
    Dolly {
        /// Magnification at t = 0.
        zoom_from: f64,
        /// Magnification at the end.
        zoom_to: f64,
    },
    /// Horizontal displacement `-amplitude * cos(pi * p)`: half a cycle over the clip.
    Pan {
        /// Fraction of output width.
        amplitude: f64,
    },
    /// Vertical counterpart of [`CameraMove::Pan`].
    Tilt {
        /// Fraction of output height.
        amplitude: f64,
    },
    /// One full circle around the center.
    Arc {
        /// Fraction of output width.
        radius_x: f64,
        /// Fraction of output height.
        radius_y: f64,
    },
    /// Forward zoom by `1 + zoom * ease(p)`.
    Push {
        /// Zoom amplitude.
        zoom: f64,
        /// Progress curve.
        ease: Ease,
    },
}

impl CameraMove {
    /// Default parameters for `kind`.
    pub fn for_kind(kind: MoveKind) -> Self {
        match kind {
            MoveKind::Dolly => Self::Dolly {
                zoom_from: 1.0,
                zoom_to: 1.2,
            },
            MoveKind::Pan => Self::Pan { amplitude: 0.15 },
            MoveKind::Tilt => Self::Tilt { amplitude: 0.15 },
            MoveKind::Arc => Self::Arc {
                radius_x: 0.1,
                radius_y: 0.1,
            },
            MoveKind::Push => Self::Push {
                zoom: 0.2,
                ease: Ease::InOutCubic,
            },
        }
    }

    /// Which movement this is.
    pub fn kind(&self) -> MoveKind {
        match self {
            Self::Dolly { .. } => MoveKind::Dolly,
            Self::Pan { .. } => MoveKind::Pan,
            Self::Tilt { .. } => MoveKind::Tilt,
            Self::Arc { .. } => MoveKind::Arc,
            Self::Push { .. } => MoveKind::Push,
        }
    }

    /// Canvas magnification at progress `p` in `[0, 1]`. Never below 1.
    pub fn zoom_at(&self, p: f64) -> f64 {
        let z = match *self {
            Self::Dolly { zoom_from, zoom_to } => lerp(zoom_from, zoom_to, p),
            Self::Push { zoom, ease } => 1.0 + zoom * ease.apply(p),
            Self::Pan { .. } | Self::Tilt { .. } | Self::Arc { .. } => 1.0,
        };
        z.max(1.0)
    }

    /// Displacement of the crop center from the canvas center, in output pixels.
    pub fn offset_at(&self, p: f64, output: Resolution) -> Vec2 {
        let (w, h) = (f64::from(output.width), f64::from(output.height));
        match *self {
            Self::Pan { amplitude } => Vec2::new(-amplitude * w * (PI * p).cos(), 0.0),
            Self::Tilt { amplitude } => Vec2::new(0.0, -amplitude * h * (PI * p).cos()),
            Self::Arc { radius_x, radius_y } => {
                let theta = TAU * p;
                Vec2::new(radius_x * w * theta.cos(), radius_y * h * theta.sin())
            }
            Self::Dolly { .. } | Self::Push { .. } => Vec2::ZERO,
        }
    }
}

/// Where to crop the (virtually zoomed) working canvas at one instant.
///
/// `x`/`y` are the top-left corner inside a canvas of `canvas_width x canvas_height`, which is
/// the base working canvas magnified by `zoom`. The window is always exactly the output size.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct CropWindow {
    /// Left edge in zoomed canvas pixels.
    pub x: f64,
    /// Top edge in zoomed canvas pixels.
    pub y: f64,
    /// Equals the output width.
    pub width: u32,
    /// Equals the output height.
    pub height: u32,
    /// Magnification of the base canvas.
    pub zoom: f64,
    /// Width of the zoomed canvas.
    pub canvas_width: f64,
    /// Height of the zoomed canvas.
    pub canvas_height: f64,
}

impl CropWindow {
    /// Whether the window lies inside its canvas.
    pub fn is_within_canvas(&self) -> bool {
        const EPS: f64 = 1e-6;
        self.x >= -EPS
            && self.y >= -EPS
            && self.x + f64::from(self.width) <= self.canvas_width + EPS
            && self.y + f64::from(self.height) <= self.canvas_height + EPS
    }
}

/// Base working canvas size for an output resolution.
pub fn canvas_size(output: Resolution) -> (u32, u32) {
    let w = (f64::from(output.width) * CANVAS_SCALE).round() as u32;
    let h = (f64::from(output.height) * CANVAS_SCALE).round() as u32;
    (w, h)
}

/// A camera move bound to a clip duration and output size: `elapsed -> CropWindow`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct CameraPath {
    /// The move.
    pub movement: CameraMove,
    /// Clip length in seconds.
    pub duration: f64,
    /// Output frame size.
    pub output: Resolution,
}

impl CameraPath {
    /// Bind `movement` to a clip.
    pub fn new(movement: CameraMove, duration: f64, output: Resolution) -> Self {
        Self {
            movement,
            duration,
            output,
        }
    }

    /// Crop window at `t` seconds into the clip. `t` is clamped to `[0, duration]`.
    pub fn window_at(&self, t: f64) -> CropWindow {
        let p = if self.duration > 0.0 {
            (t / self.duration).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let (base_w, base_h) = canvas_size(self.output);
        let zoom = self.movement.zoom_at(p);
        let canvas_width = f64::from(base_w) * zoom;
        let canvas_height = f64::from(base_h) * zoom;
        let (w, h) = (f64::from(self.output.width), f64::from(self.output.height));

        let offset = self.movement.offset_at(p, self.output);
        let x = ((canvas_width - w) / 2.0 + offset.x).clamp(0.0, canvas_width - w);
        let y = ((canvas_height - h) / 2.0 + offset.y).clamp(0.0, canvas_height - h);

        CropWindow {
            x,
            y,
            width: self.output.width,
            height: self.output.height,
            zoom,
            canvas_width,
            canvas_height,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/motion/camera.rs"]
mod tests;
