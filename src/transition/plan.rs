use crate::foundation::error::{ReelError, ReelResult};

/// Visual style of a scene junction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    /// Linear crossfade.
    Fade,
    /// Crossfade with a film-grain texture on top.
    Dissolve,
    /// Hard edge sweeping left to right.
    Wipe,
    /// Crossfade while A zooms out and B zooms in.
    Zoom,
}

impl TransitionKind {
    /// Every transition kind.
    pub const ALL: [TransitionKind; 4] = [
        TransitionKind::Fade,
        TransitionKind::Dissolve,
        TransitionKind::Wipe,
        TransitionKind::Zoom,
    ];

    /// Canonical lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fade => "fade",
            Self::Dissolve => "dissolve",
            Self::Wipe => "wipe",
            Self::Zoom => "zoom",
        }
    }
}

impl std::str::FromStr for TransitionKind {
    type Err = ReelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fade" | "crossfade" => Ok(Self::Fade),
            "dissolve" => Ok(Self::Dissolve),
            "wipe" => Ok(Self::Wipe),
            "zoom" => Ok(Self::Zoom),
            other => Err(ReelError::validation(format!(
                "unknown transition kind '{other}'"
            ))),
        }
    }
}

/// A transition between two adjacent clips.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TransitionSpec {
    /// Visual style.
    pub kind: TransitionKind,
    /// Overlap length in seconds.
    pub overlap: f64,
}

impl TransitionSpec {
    /// Check the overlap is finite and positive.
    pub fn validate(&self) -> ReelResult<()> {
        if !self.overlap.is_finite() || self.overlap <= 0.0 {
            return Err(ReelError::validation(format!(
                "transition overlap must be finite and > 0, got {}",
                self.overlap
            )));
        }
        Ok(())
    }
}

/// Why a junction was planned as a straight cut.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CutReason {
    /// No transition requested.
    NotRequested,
    /// An adjacent clip is shorter than twice the overlap.
    DegenerateTransition,
}

/// What happens at one junction.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "plan", rename_all = "snake_case")]
pub enum JunctionPlan {
    /// Blend over `spec.overlap` seconds.
    Blend {
        /// The transition applied.
        spec: TransitionSpec,
    },
    /// Straight cut, no overlap.
    Cut {
        /// Why.
        reason: CutReason,
    },
}

impl JunctionPlan {
    /// Seconds the two clips share on the timeline.
    pub fn overlap(&self) -> f64 {
        match self {
            Self::Blend { spec } => spec.overlap,
            Self::Cut { .. } => 0.0,
        }
    }

    /// The transition, when the junction blends.
    pub fn blend_spec(&self) -> Option<TransitionSpec> {
        match self {
            Self::Blend { spec } => Some(*spec),
            Self::Cut { .. } => None,
        }
    }
}

/// Decide how clips of lengths `da` and `db` are joined.
///
/// A blend needs both clips to be at least twice the overlap long; otherwise the junction
/// falls back to a straight cut. This never fails.
pub fn plan_junction(requested: Option<TransitionSpec>, da: f64, db: f64) -> JunctionPlan {
    let Some(spec) = requested else {
        return JunctionPlan::Cut {
            reason: CutReason::NotRequested,
        };
    };
    if spec.validate().is_err() || da < 2.0 * spec.overlap || db < 2.0 * spec.overlap {
        tracing::debug!(
            kind = spec.kind.as_str(),
            overlap = spec.overlap,
            da,
            db,
            "transition does not fit, cutting"
        );
        return JunctionPlan::Cut {
            reason: CutReason::DegenerateTransition,
        };
    }
    JunctionPlan::Blend { spec }
}

#[cfg(test)]
#[path = "../../tests/unit/transition/plan.rs"]
mod tests;
