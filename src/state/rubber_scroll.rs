//! Three-stage rubber-band scroll.
//!
//! Forward scrolling first moves the inner list, then reveals more of the
//! page, then stretches past the end. Each stage must saturate before the
//! next one moves, and the hand-offs are debounced by a damping counter so a
//! single inertial burst cannot blow through all three. Overscroll springs
//! back with friction once input goes quiet.

use super::timers::{Generation, Timer, TimerKind, TimerQueue};
use crate::config::RubberConfig;
use crate::model::{Effect, Target};

/// Transition hint while the page is stretched.
pub const RUBBERBAND_TRANSITION_MS: u32 = 100;

/// Transition hint otherwise.
pub const SETTLED_TRANSITION_MS: u32 = 300;

/// Whether the stage used a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageResponse {
    /// Offsets or damping changed, or the gesture was swallowed at a limit.
    Consumed,
    /// Backward gesture at the floor; the caller should treat it as a
    /// regular page gesture.
    Unhandled,
}

/// Direction of a damped hand-off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Forward,
    Backward,
}

/// Observable stage state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RubberState {
    /// Inner list offset, `0..=inner_max`.
    pub inner: f64,
    /// Page reveal offset, `0..=reveal_max`.
    pub reveal: f64,
    /// Elastic overscroll, `0..=overscroll_max`.
    pub overscroll: f64,
    /// Consecutive qualifying hand-off gestures so far.
    pub damping: u32,
    /// True while overscroll is non-zero.
    pub rubberbanding: bool,
}

impl RubberState {
    /// All three offsets at zero.
    pub fn is_at_floor(&self) -> bool {
        self.inner == 0.0 && self.reveal == 0.0 && self.overscroll == 0.0
    }
}

/// Element positions derived from the state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RubberOffsets {
    /// `translateY` of the inner list.
    pub inner_translate: f64,
    /// `translateY` of the page.
    pub page_translate: f64,
    /// Transition hint for the page.
    pub page_transition_ms: u32,
}

/// The stage itself. Only this type mutates [`RubberState`].
#[derive(Debug, Clone)]
pub struct RubberScrollStage {
    config: RubberConfig,
    state: RubberState,
    damping_direction: Option<Direction>,
    generation: Generation,
}

impl RubberScrollStage {
    /// Stage at rest.
    pub fn new(config: &RubberConfig) -> Self {
        Self {
            config: config.clone(),
            state: RubberState::default(),
            damping_direction: None,
            generation: Generation::default(),
        }
    }

    /// Current state.
    pub fn state(&self) -> RubberState {
        self.state
    }

    /// All offsets at zero.
    pub fn is_at_floor(&self) -> bool {
        self.state.is_at_floor()
    }

    /// Feed one gesture.
    pub fn apply(&mut self, magnitude: f64, now: u64, timers: &mut TimerQueue) -> StageResponse {
        if magnitude < 0.0 && self.state.is_at_floor() {
            self.clear_damping();
            tracing::trace!(magnitude, "rubber stage at floor, passing gesture on");
            return StageResponse::Unhandled;
        }

        // Any new input stops an in-flight decay.
        let generation = self.generation.bump();

        let step = magnitude * self.config.step_scale;
        if magnitude > 0.0 {
            self.forward(step);
        } else if magnitude < 0.0 {
            self.backward(step);
        }

        timers.schedule_in(now, self.config.quiet_ms, TimerKind::RubberQuiet, generation);
        tracing::trace!(state = ?self.state, "rubber stage consumed gesture");
        StageResponse::Consumed
    }

    fn forward(&mut self, step: f64) {
        let cfg = &self.config;
        let s = &mut self.state;

        if s.inner < cfg.inner_max {
            s.inner = (s.inner + step).min(cfg.inner_max);
            self.clear_damping();
        } else if s.reveal == 0.0 && cfg.reveal_max > 0.0 {
            if self.damp(Direction::Forward) {
                self.state.reveal = step.min(self.config.reveal_max);
                tracing::debug!(reveal = self.state.reveal, "rubber stage entered reveal");
            }
        } else if s.reveal < cfg.reveal_max {
            s.reveal = (s.reveal + step).min(cfg.reveal_max);
            self.clear_damping();
        } else if s.overscroll == 0.0 && cfg.overscroll_max > 0.0 {
            if self.damp(Direction::Forward) {
                let gain = self.config.overscroll_gain;
                self.state.overscroll = (step * gain).min(self.config.overscroll_max);
                self.state.rubberbanding = self.state.overscroll > 0.0;
                tracing::debug!(overscroll = self.state.overscroll, "rubber stage stretching");
            }
        } else {
            s.overscroll = (s.overscroll + step * cfg.overscroll_gain).min(cfg.overscroll_max);
            s.rubberbanding = s.overscroll > 0.0;
            self.clear_damping();
        }
    }

    fn backward(&mut self, step: f64) {
        let cfg = &self.config;
        let s = &mut self.state;

        if s.overscroll > 0.0 {
            s.overscroll = (s.overscroll + step * cfg.unwind_gain).max(0.0);
            if s.overscroll == 0.0 {
                s.rubberbanding = false;
            }
            self.clear_damping();
        } else if s.reveal > 0.0 {
            s.reveal = (s.reveal + step).max(0.0);
            self.clear_damping();
        } else if s.inner >= cfg.inner_max {
            if self.damp(Direction::Backward) {
                self.state.inner = (self.state.inner + step).max(0.0);
                tracing::debug!(inner = self.state.inner, "rubber stage back to inner list");
            }
        } else {
            s.inner = (s.inner + step).max(0.0);
            self.clear_damping();
        }
    }

    /// Count one qualifying hand-off gesture. Returns true when the
    /// threshold is reached, clearing the counter.
    fn damp(&mut self, direction: Direction) -> bool {
        if self.damping_direction == Some(direction) {
            self.state.damping += 1;
        } else {
            self.damping_direction = Some(direction);
            self.state.damping = 1;
        }

        if self.state.damping >= self.config.damping_threshold {
            self.clear_damping();
            true
        } else {
            tracing::trace!(
                damping = self.state.damping,
                threshold = self.config.damping_threshold,
                "rubber stage damping"
            );
            false
        }
    }

    fn clear_damping(&mut self) {
        self.state.damping = 0;
        self.damping_direction = None;
    }

    /// Handle a quiet or frame timer. Returns true when the offsets changed.
    pub fn on_timer(&mut self, timer: &Timer, timers: &mut TimerQueue) -> bool {
        if timer.generation != self.generation {
            tracing::trace!(kind = ?timer.kind, "stale rubber timer ignored");
            return false;
        }

        match timer.kind {
            TimerKind::RubberQuiet => {
                if self.state.overscroll > 0.0 {
                    timers.schedule_in(
                        timer.due_ms,
                        self.config.frame_ms,
                        TimerKind::RubberFrame,
                        self.generation,
                    );
                }
                false
            }
            TimerKind::RubberFrame => {
                if self.state.overscroll <= 0.0 {
                    return false;
                }
                self.state.overscroll -= self.state.overscroll * self.config.decay_fraction;
                if self.state.overscroll < self.config.settle_epsilon {
                    self.state.overscroll = 0.0;
                    self.state.rubberbanding = false;
                    tracing::debug!("rubber stage settled");
                } else {
                    timers.schedule_in(
                        timer.due_ms,
                        self.config.frame_ms,
                        TimerKind::RubberFrame,
                        self.generation,
                    );
                }
                true
            }
            _ => false,
        }
    }

    /// Element positions for the current state.
    pub fn offsets(&self) -> RubberOffsets {
        let s = &self.state;
        RubberOffsets {
            inner_translate: -s.inner,
            page_translate: -(s.reveal + s.overscroll),
            page_transition_ms: if s.rubberbanding && s.overscroll > 0.0 {
                RUBBERBAND_TRANSITION_MS
            } else {
                SETTLED_TRANSITION_MS
            },
        }
    }

    /// Transform effects for both elements.
    pub fn effects(&self) -> [Effect; 2] {
        let offsets = self.offsets();
        [
            Effect::translate(Target::RubberInner, offsets.inner_translate),
            Effect::Transform {
                target: Target::RubberPage,
                translate_y: offsets.page_translate,
                transition_ms: Some(offsets.page_transition_ms),
            },
        ]
    }

    /// Zero everything and invalidate pending timers.
    pub fn reset(&mut self) {
        self.state = RubberState::default();
        self.damping_direction = None;
        self.generation.bump();
    }
}

#[cfg(test)]
#[path = "rubber_scroll_tests.rs"]
mod tests;
