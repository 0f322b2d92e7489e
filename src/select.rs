use crate::foundation::math::{Rng64, derive_seed};
use crate::motion::MoveKind;
use crate::scene::model::Mood;
use crate::transition::TransitionKind;

/// Source of every per-scene random choice in a render.
///
/// The default is [`UniformRandom`]; tests and reproducible renders pin choices with
/// [`Fixed`] or a seeded [`UniformRandom`].
pub trait SelectionPolicy {
    /// Camera move for scene `scene_index`.
    fn pick_move(&mut self, scene_index: usize) -> MoveKind;
    /// Mood for scene `scene_index` when the descriptor leaves it unset.
    fn pick_mood(&mut self, scene_index: usize) -> Mood;
    /// Transition kind for the junction between scene `junction` and `junction + 1`.
    fn pick_transition(&mut self, junction: usize) -> TransitionKind;
}

/// Uniform choice over every variant, driven by a [`Rng64`].
#[derive(Clone, Debug)]
pub struct UniformRandom {
    seed: u64,
}

impl UniformRandom {
    /// Deterministic policy: the same seed always yields the same choices.
    pub fn seeded(seed: u64) -> Self {
        Self { seed }
    }

    /// Policy seeded from the wall clock.
    pub fn from_entropy() -> Self {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0x5EED);
        Self::seeded(nanos)
    }

    /// Seed the policy was built with.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    // Each (stream, index) pair gets its own generator so choices do not depend on call order.
    fn rng(&self, stream: u64, index: usize) -> Rng64 {
        Rng64::new(derive_seed(derive_seed(self.seed, stream), index as u64))
    }
}

impl SelectionPolicy for UniformRandom {
    fn pick_move(&mut self, scene_index: usize) -> MoveKind {
        let mut rng = self.rng(1, scene_index);
        MoveKind::ALL[rng.next_index(MoveKind::ALL.len())]
    }

    fn pick_mood(&mut self, scene_index: usize) -> Mood {
        let mut rng = self.rng(2, scene_index);
        Mood::ALL[rng.next_index(Mood::ALL.len())]
    }

    fn pick_transition(&mut self, junction: usize) -> TransitionKind {
        let mut rng = self.rng(3, junction);
        TransitionKind::ALL[rng.next_index(TransitionKind::ALL.len())]
    }
}

/// Always returns the same choices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fixed {
    /// Camera move for every scene.
    pub motion: MoveKind,
    /// Mood for every scene without one.
    pub mood: Mood,
    /// Transition for every junction.
    pub transition: TransitionKind,
}

impl Default for Fixed {
    fn default() -> Self {
        Self {
            motion: MoveKind::Dolly,
            mood: Mood::Drama,
            transition: TransitionKind::Fade,
        }
    }
}

impl SelectionPolicy for Fixed {
    fn pick_move(&mut self, _scene_index: usize) -> MoveKind {
        self.motion
    }

    fn pick_mood(&mut self, _scene_index: usize) -> Mood {
        self.mood
    }

    fn pick_transition(&mut self, _junction: usize) -> TransitionKind {
        self.transition
    }
}
