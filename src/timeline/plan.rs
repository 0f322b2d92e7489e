use crate::foundation::error::{ReelError, ReelResult};
use crate::transition::plan::{JunctionPlan, TransitionSpec, plan_junction};

/// Scene placement on the timeline: windows, junction decisions and total length.
///
/// Built by folding over the ordered scene durations; every junction overlap merges time,
/// so `total = sum(durations) - sum(overlaps)`.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TimelinePlan {
    /// Scene lengths in seconds.
    pub durations: Vec<f64>,
    /// Timeline start of each scene.
    pub starts: Vec<f64>,
    /// `junctions[i]` joins scene `i` and `i + 1`.
    pub junctions: Vec<JunctionPlan>,
    /// Total timeline length in seconds.
    pub total: f64,
}

/// What the timeline shows at one instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Placement {
    /// One scene, at `local` seconds into it.
    Single {
        /// Scene index.
        scene: usize,
        /// Seconds into the scene.
        local: f64,
    },
    /// A blended junction between `junction` and `junction + 1`.
    Overlap {
        /// Index of the outgoing scene.
        junction: usize,
        /// The transition.
        spec: TransitionSpec,
        /// Seconds into the outgoing scene (`da - d + t`).
        outgoing_local: f64,
        /// Seconds into the incoming scene, equal to the time into the overlap.
        incoming_local: f64,
    },
}

#[derive(Default)]
struct Acc {
    starts: Vec<f64>,
    junctions: Vec<JunctionPlan>,
    cursor: f64,
}

impl TimelinePlan {
    /// Place scenes of the given durations, asking `request` for the transition wanted at each
    /// junction. Junctions too short for their transition become cuts.
    pub fn build(
        durations: &[f64],
        mut request: impl FnMut(usize) -> Option<TransitionSpec>,
    ) -> ReelResult<Self> {
        if durations.is_empty() {
            return Err(ReelError::malformed("timeline needs at least one scene"));
        }
        if let Some(bad) = durations.iter().find(|d| !d.is_finite() || **d <= 0.0) {
            return Err(ReelError::validation(format!(
                "scene durations must be finite and > 0, got {bad}"
            )));
        }

        let acc = durations
            .iter()
            .enumerate()
            .fold(Acc::default(), |mut acc, (i, &dur)| {
                acc.starts.push(acc.cursor);
                match durations.get(i + 1) {
                    Some(&next) => {
                        let plan = plan_junction(request(i), dur, next);
                        acc.cursor += dur - plan.overlap();
                        acc.junctions.push(plan);
                    }
                    None => acc.cursor += dur,
                }
                acc
            });

        Ok(Self {
            durations: durations.to_vec(),
            starts: acc.starts,
            junctions: acc.junctions,
            total: acc.cursor,
        })
    }

    /// Number of scenes.
    pub fn scene_count(&self) -> usize {
        self.durations.len()
    }

    /// `[start, end)` of scene `i` on the timeline.
    pub fn scene_window(&self, i: usize) -> (f64, f64) {
        (self.starts[i], self.starts[i] + self.durations[i])
    }

    /// Overlap shared with the previous scene.
    pub fn overlap_in(&self, i: usize) -> f64 {
        if i == 0 {
            0.0
        } else {
            self.junctions[i - 1].overlap()
        }
    }

    /// Overlap shared with the next scene.
    pub fn overlap_out(&self, i: usize) -> f64 {
        self.junctions.get(i).map_or(0.0, JunctionPlan::overlap)
    }

    /// What is on screen at timeline time `t`, clamped into `[0, total)`.
    pub fn locate(&self, t: f64) -> Placement {
        let last = self.scene_count() - 1;
        let t = t.clamp(0.0, self.total);
        for i in 0..=last {
            let (start, end) = self.scene_window(i);
            if t >= end && i < last {
                continue;
            }
            if let Some(JunctionPlan::Blend { spec }) = self.junctions.get(i) {
                let next_start = self.starts[i + 1];
                if t >= next_start {
                    return Placement::Overlap {
                        junction: i,
                        spec: *spec,
                        outgoing_local: t - start,
                        incoming_local: t - next_start,
                    };
                }
            }
            return Placement::Single {
                scene: i,
                local: (t - start).min(self.durations[i]),
            };
        }
        Placement::Single {
            scene: last,
            local: self.durations[last],
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/plan.rs"]
mod tests;
