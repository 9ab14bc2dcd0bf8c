#![forbid(unsafe_code)]

//! Overlay fade in/out.
//!
//! State machine: `Hidden → FadingIn → Shown → FadingOut → Hidden`.
//! Reversing mid-fade keeps the current alpha instead of jumping.
//!
//! # Invariants
//!
//! - Progress is always in `[0.0, 1.0]`.
//! - Alpha is a deterministic function of the time ticked so far; elapsed
//!   time is kept as a `Duration`, so completion is exact.
//! - A zero duration completes on the next tick.

use std::time::Duration;

/// Easing applied to fade progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FadeEasing {
    Linear,
    /// Smooth S-curve.
    #[default]
    EaseInOut,
}

impl FadeEasing {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let inv = -2.0 * t + 2.0;
                    1.0 - inv * inv * inv / 2.0
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FadePhase {
    #[default]
    Hidden,
    FadingIn,
    Shown,
    FadingOut,
}

/// Overlay opacity driver.
#[derive(Debug, Clone)]
pub struct OverlayFade {
    phase: FadePhase,
    elapsed: Duration,
    duration: Duration,
    easing: FadeEasing,
}

impl OverlayFade {
    pub fn new(duration: Duration) -> Self {
        Self {
            phase: FadePhase::Hidden,
            elapsed: Duration::ZERO,
            duration,
            easing: FadeEasing::default(),
        }
    }

    #[must_use]
    pub fn easing(mut self, easing: FadeEasing) -> Self {
        self.easing = easing;
        self
    }

    pub fn phase(&self) -> FadePhase {
        self.phase
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Begin fading in. No-op when already in or shown.
    pub fn show(&mut self) {
        match self.phase {
            FadePhase::Hidden => {
                self.phase = FadePhase::FadingIn;
                self.elapsed = Duration::ZERO;
            }
            FadePhase::FadingOut => {
                self.phase = FadePhase::FadingIn;
                self.elapsed = self.duration.saturating_sub(self.elapsed);
            }
            FadePhase::FadingIn | FadePhase::Shown => {}
        }
    }

    /// Begin fading out. No-op when already out or hidden.
    pub fn hide(&mut self) {
        match self.phase {
            FadePhase::Shown => {
                self.phase = FadePhase::FadingOut;
                self.elapsed = Duration::ZERO;
            }
            FadePhase::FadingIn => {
                self.phase = FadePhase::FadingOut;
                self.elapsed = self.duration.saturating_sub(self.elapsed);
            }
            FadePhase::FadingOut | FadePhase::Hidden => {}
        }
    }

    /// Follow a visibility flag.
    pub fn sync(&mut self, visible: bool) {
        if visible { self.show() } else { self.hide() }
    }

    /// Advance by `delta`. Returns `true` when a fade completed.
    pub fn tick(&mut self, delta: Duration) -> bool {
        if !matches!(self.phase, FadePhase::FadingIn | FadePhase::FadingOut) {
            return false;
        }
        self.elapsed = (self.elapsed + delta).min(self.duration);
        if self.elapsed < self.duration {
            return false;
        }
        self.phase = match self.phase {
            FadePhase::FadingIn => FadePhase::Shown,
            _ => FadePhase::Hidden,
        };
        self.elapsed = Duration::ZERO;
        true
    }

    /// Raw progress of the running fade in `[0.0, 1.0]`.
    pub fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    /// Current opacity multiplier in `[0.0, 1.0]`.
    pub fn alpha(&self) -> f32 {
        match self.phase {
            FadePhase::Hidden => 0.0,
            FadePhase::Shown => 1.0,
            FadePhase::FadingIn => self.easing.apply(self.progress()),
            FadePhase::FadingOut => 1.0 - self.easing.apply(self.progress()),
        }
    }

    /// Whether anything should be drawn.
    pub fn is_rendered(&self) -> bool {
        self.phase != FadePhase::Hidden
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.phase, FadePhase::FadingIn | FadePhase::FadingOut)
    }
}
