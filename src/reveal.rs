//! One-shot reveal animation state, one entry per page block.
//!
//! Pure types, zero effects. The update layer reports visibility fractions
//! after every scroll/resize; the tracker arms a block the first time it
//! crosses the threshold and tick events advance its fade. Arming is
//! one-way: once a block is animating or shown, further reports change
//! nothing, whether in or out of view.

use std::time::Duration;

/// Visible fraction at which a block starts animating.
pub const REVEAL_THRESHOLD: f32 = 0.1;

/// How long the fade/slide takes.
pub const REVEAL_DURATION: Duration = Duration::from_millis(600);

/// Rows a hidden block sits below its resting position.
pub const HIDDEN_OFFSET: usize = 1;

// ============================================================================
// PHASES
// ============================================================================

/// Where a block is in its reveal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RevealPhase {
    /// Not yet seen: invisible, offset down.
    Hidden,
    /// Crossed the threshold; fading in. Progress runs 0..1.
    Animating { progress: f32 },
    /// Fully revealed. Terminal state.
    Shown,
}

/// Ease-out curve mapping linear progress to visual progress.
///
/// Cubic: fast start, gentle landing.
pub fn ease(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

// ============================================================================
// TRACKER
// ============================================================================

/// Reveal state for every block on the page.
///
/// Blocks that don't animate (the contact form) are pinned Shown from the
/// start, so callers can index uniformly.
#[derive(Debug, Clone)]
pub struct RevealTracker {
    phases: Vec<RevealPhase>,
}

impl RevealTracker {
    /// One entry per block; `animates[i]` says whether block `i` reveals.
    pub fn new(animates: &[bool]) -> Self {
        RevealTracker {
            phases: animates
                .iter()
                .map(|&a| if a { RevealPhase::Hidden } else { RevealPhase::Shown })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.phases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    pub fn phase(&self, index: usize) -> RevealPhase {
        self.phases[index]
    }

    /// Report a block's current visible fraction.
    ///
    /// Only a Hidden block at or above the threshold reacts; everything
    /// else ignores the report, including fraction 0 on a revealed block.
    pub fn observe(&mut self, index: usize, fraction: f32) {
        if self.phases[index] == RevealPhase::Hidden && fraction >= REVEAL_THRESHOLD {
            self.phases[index] = RevealPhase::Animating { progress: 0.0 };
        }
    }

    /// Advance all running animations by `dt`.
    pub fn tick(&mut self, dt: Duration) {
        let step = dt.as_secs_f32() / REVEAL_DURATION.as_secs_f32();
        for phase in &mut self.phases {
            if let RevealPhase::Animating { progress } = phase {
                let next = *progress + step;
                *phase = if next >= 1.0 {
                    RevealPhase::Shown
                } else {
                    RevealPhase::Animating { progress: next }
                };
            }
        }
    }

    /// Whether any block is mid-animation.
    pub fn any_animating(&self) -> bool {
        self.phases
            .iter()
            .any(|p| matches!(p, RevealPhase::Animating { .. }))
    }

    /// Current opacity of a block, eased.
    pub fn opacity(&self, index: usize) -> f32 {
        match self.phases[index] {
            RevealPhase::Hidden => 0.0,
            RevealPhase::Animating { progress } => ease(progress),
            RevealPhase::Shown => 1.0,
        }
    }

    /// Rows the block currently sits below its resting position.
    pub fn offset(&self, index: usize) -> usize {
        match self.phases[index] {
            RevealPhase::Hidden => HIDDEN_OFFSET,
            RevealPhase::Animating { progress } => {
                if ease(progress) < 0.5 {
                    HIDDEN_OFFSET
                } else {
                    0
                }
            }
            RevealPhase::Shown => 0,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
