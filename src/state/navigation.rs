//! Page navigation state machine.
//!
//! The [`Navigator`] owns where the visitor is (Hero, a content page, or a
//! detail overlay), the transition lock, the page-switch cooldown and the
//! scroll accumulator. It also owns the two sub-engines it consults: the
//! hero [`TextFillEngine`] and the [`RubberScrollStage`] of the rubber page.
//!
//! Every transition takes the lock for `transition_ms`. The lock is released
//! by a timer carrying the transition's generation, so an unlock scheduled
//! by an earlier transition can never release a later one. Requests while
//! locked are rejected, never queued.

use super::rubber_scroll::{RubberScrollStage, StageResponse};
use super::text_fill::TextFillEngine;
use super::timers::{Generation, Outbox, Timer, TimerKind, TimerQueue};
use crate::config::{ConfigError, GestureConfig, NavConfig, PageConfig};
use crate::gesture::is_fling;
use crate::model::{
    Class, DetailKind, Effect, FlingEvent, GestureEvent, NavIntent, NavOutcome, NavigationState,
    Rejection, SiteEvent, Target,
};

/// Internal location; [`NavigationState`] is derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Location {
    Hero,
    Page(usize),
    Overlay { parent: usize, kind: DetailKind },
}

/// Gesture energy collected on a content page.
#[derive(Debug, Clone, Default)]
pub struct ScrollAccumulator {
    value: f64,
    last_reset_at: Option<u64>,
    generation: Generation,
}

impl ScrollAccumulator {
    /// Accumulated signed magnitude.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// When the accumulator was last zeroed.
    pub fn last_reset_at(&self) -> Option<u64> {
        self.last_reset_at
    }

    /// Add a gesture and arm the silence timer.
    fn add(&mut self, magnitude: f64, timeout_ms: u64, out: &mut Outbox<'_>) -> f64 {
        self.value += magnitude;
        let generation = self.generation.bump();
        out.schedule_in(timeout_ms, TimerKind::AccumulatorReset, generation);
        self.value
    }

    fn reset(&mut self, now: u64) {
        self.value = 0.0;
        self.last_reset_at = Some(now);
        self.generation.bump();
    }

    fn on_timer(&mut self, timer: &Timer) {
        if timer.generation == self.generation {
            tracing::trace!(value = self.value, "scroll accumulator timed out");
            self.reset(timer.due_ms);
        }
    }
}

/// Outcome of a gesture plus whether the host should suppress default
/// scrolling for it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputResponse {
    /// What the navigator did.
    pub outcome: NavOutcome,
    /// False only when the rubber stage passed a gesture on at its floor.
    pub suppress_default: bool,
}

impl InputResponse {
    /// Response with default scrolling suppressed.
    pub fn suppressed(outcome: NavOutcome) -> Self {
        Self {
            outcome,
            suppress_default: true,
        }
    }
}

/// The navigation state machine. The only writer of the navigation state.
#[derive(Debug, Clone)]
pub struct Navigator {
    pages: PageConfig,
    gesture: GestureConfig,
    hero_min_delta: f64,
    hero_throttle_ms: u64,
    location: Location,
    fill: TextFillEngine,
    headline_enabled: bool,
    rubber: Option<(usize, RubberScrollStage)>,
    accumulator: ScrollAccumulator,
    transitioning: bool,
    transition_generation: Generation,
    reveal_generation: Generation,
    last_switch_at: Option<u64>,
    last_hero_input_at: Option<u64>,
}

impl Navigator {
    /// Navigator in Hero with an empty headline.
    ///
    /// # Errors
    ///
    /// Fails when the configuration does not validate.
    pub fn new(config: &NavConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            pages: config.pages.clone(),
            gesture: config.gesture.clone(),
            hero_min_delta: config.text_fill.min_delta,
            hero_throttle_ms: config.text_fill.throttle_ms,
            location: Location::Hero,
            fill: TextFillEngine::new(&config.text_fill)?,
            headline_enabled: true,
            rubber: config
                .rubber_page()
                .map(|page| (page, RubberScrollStage::new(&config.rubber))),
            accumulator: ScrollAccumulator::default(),
            transitioning: false,
            transition_generation: Generation::default(),
            reveal_generation: Generation::default(),
            last_switch_at: None,
            last_hero_input_at: None,
        })
    }

    /// Stop emitting headline mask effects. Fill progress is still tracked.
    pub fn without_headline(mut self) -> Self {
        self.headline_enabled = false;
        self
    }

    /// Treat the rubber page like any other page.
    pub fn without_rubber(mut self) -> Self {
        self.rubber = None;
        self
    }

    /// Current state.
    pub fn state(&self) -> NavigationState {
        match self.location {
            Location::Hero => NavigationState::Hero {
                fill_progress: self.fill.progress(),
            },
            Location::Page(index) => NavigationState::ContentPage { index },
            Location::Overlay { parent, kind } => NavigationState::DetailOverlay {
                parent_index: parent,
                kind,
            },
        }
    }

    /// True while the transition lock is held.
    pub fn is_transitioning(&self) -> bool {
        self.transitioning
    }

    /// Number of content pages.
    pub fn page_count(&self) -> usize {
        self.pages.count
    }

    /// Page height in pixels.
    pub fn page_height(&self) -> f64 {
        self.pages.height_px
    }

    /// Hero headline fill.
    pub fn fill(&self) -> &TextFillEngine {
        &self.fill
    }

    /// Rubber stage, when enabled.
    pub fn rubber(&self) -> Option<&RubberScrollStage> {
        self.rubber.as_ref().map(|(_, stage)| stage)
    }

    /// Page owning the rubber stage, when enabled.
    pub fn rubber_page(&self) -> Option<usize> {
        self.rubber.as_ref().map(|(page, _)| *page)
    }

    /// Scroll accumulator.
    pub fn accumulator(&self) -> &ScrollAccumulator {
        &self.accumulator
    }

    /// Effects that put a fresh host surface in the Hero layout.
    pub fn initial_effects(&self) -> Vec<Effect> {
        let mut effects = vec![Effect::translate(Target::PageStrip, 0.0)];
        if self.headline_enabled {
            effects.extend(self.fill.mask_effects());
        }
        if let Some((_, stage)) = &self.rubber {
            effects.extend(stage.effects());
        }
        effects
    }

    /// Common gate: overlays own the input, and nothing moves mid-transition.
    fn gate(&self) -> Result<(), Rejection> {
        if matches!(self.location, Location::Overlay { .. }) {
            Err(Rejection::OverlayOpen)
        } else if self.transitioning {
            Err(Rejection::Transitioning)
        } else {
            Ok(())
        }
    }

    fn cooled_down(&self, now: u64) -> bool {
        self.last_switch_at
            .map_or(true, |at| now.saturating_sub(at) >= self.pages.cooldown_ms)
    }

    fn hero_gap_elapsed(&self, now: u64) -> bool {
        self.last_switch_at
            .map_or(true, |at| now.saturating_sub(at) > self.pages.hero_exit_gap_ms)
    }

    /// Feed a continuous gesture.
    pub fn handle_gesture(&mut self, gesture: GestureEvent, out: &mut Outbox<'_>) -> InputResponse {
        if let Err(rejection) = self.gate() {
            return InputResponse::suppressed(NavOutcome::Rejected(rejection));
        }

        let index = match self.location {
            Location::Hero => return InputResponse::suppressed(self.hero_gesture(gesture, out)),
            Location::Page(index) => index,
            Location::Overlay { .. } => {
                return InputResponse::suppressed(NavOutcome::Rejected(Rejection::OverlayOpen))
            }
        };

        if let Some((page, stage)) = self.rubber.as_mut() {
            if *page == index {
                match stage.apply(gesture.magnitude, out.now, out.timers) {
                    StageResponse::Consumed => {
                        out.effects.extend(stage.effects());
                        return InputResponse::suppressed(NavOutcome::Absorbed);
                    }
                    StageResponse::Unhandled => {
                        return InputResponse {
                            outcome: self.accumulate(index, gesture.magnitude, out),
                            suppress_default: false,
                        };
                    }
                }
            }
        }

        InputResponse::suppressed(self.accumulate(index, gesture.magnitude, out))
    }

    fn hero_gesture(&mut self, gesture: GestureEvent, out: &mut Outbox<'_>) -> NavOutcome {
        let now = out.now;
        if gesture.magnitude.abs() < self.hero_min_delta {
            return NavOutcome::Rejected(Rejection::Throttled);
        }
        if let Some(last) = self.last_hero_input_at {
            if now.saturating_sub(last) < self.hero_throttle_ms {
                return NavOutcome::Rejected(Rejection::Throttled);
            }
        }
        self.last_hero_input_at = Some(now);

        let saturated = self.fill.handle_delta(gesture.magnitude);
        self.emit_masks(out);

        if saturated && gesture.is_forward() {
            if !self.hero_gap_elapsed(now) {
                return NavOutcome::Rejected(Rejection::CoolingDown);
            }
            return self.enter_content(0, out);
        }
        NavOutcome::Absorbed
    }

    fn accumulate(&mut self, index: usize, magnitude: f64, out: &mut Outbox<'_>) -> NavOutcome {
        let value = self
            .accumulator
            .add(magnitude, self.pages.accumulator_timeout_ms, out);
        if value.abs() < self.pages.switch_threshold {
            return NavOutcome::Absorbed;
        }
        if !self.cooled_down(out.now) {
            return NavOutcome::Rejected(Rejection::CoolingDown);
        }

        self.accumulator.reset(out.now);
        self.step(index, value > 0.0, out)
    }

    /// One page forward or back from `index`; back from the first page
    /// leaves for Hero.
    fn step(&mut self, index: usize, forward: bool, out: &mut Outbox<'_>) -> NavOutcome {
        if forward {
            if index + 1 < self.pages.count {
                self.switch_page(index, index + 1, out)
            } else {
                self.accumulator.reset(out.now);
                NavOutcome::Rejected(Rejection::AtBoundary)
            }
        } else if index > 0 {
            self.switch_page(index, index - 1, out)
        } else {
            self.exit_to_hero(index, out)
        }
    }

    /// Feed the end of a touch gesture.
    pub fn handle_fling(&mut self, fling: FlingEvent, out: &mut Outbox<'_>) -> NavOutcome {
        if let Err(rejection) = self.gate() {
            return NavOutcome::Rejected(rejection);
        }
        let Location::Page(index) = self.location else {
            return NavOutcome::Absorbed;
        };
        if !is_fling(&self.gesture, &fling) {
            return NavOutcome::Absorbed;
        }
        if let Some((page, stage)) = &self.rubber {
            // On the rubber page only a backward fling at the floor navigates.
            if *page == index && !(stage.is_at_floor() && fling.displacement < 0.0) {
                return NavOutcome::Absorbed;
            }
        }
        if !self.cooled_down(out.now) {
            return NavOutcome::Rejected(Rejection::CoolingDown);
        }

        self.accumulator.reset(out.now);
        self.step(index, fling.displacement > 0.0, out)
    }

    /// Feed a keyboard intent.
    pub fn handle_intent(&mut self, intent: NavIntent, out: &mut Outbox<'_>) -> NavOutcome {
        if let Err(rejection) = self.gate() {
            return NavOutcome::Rejected(rejection);
        }
        match (intent, self.location) {
            (NavIntent::Jump(n), _) => match n.checked_sub(1) {
                Some(index) => self.go_to_page(index, out),
                None => NavOutcome::Rejected(Rejection::OutOfRange),
            },
            (NavIntent::Next, Location::Hero) => self.enter_content(0, out),
            (NavIntent::Next, Location::Page(index)) => self.step(index, true, out),
            (NavIntent::Previous, Location::Hero) => NavOutcome::Rejected(Rejection::AtBoundary),
            (NavIntent::Previous, Location::Page(index)) => self.step(index, false, out),
            (NavIntent::Escape, Location::Hero) => NavOutcome::Absorbed,
            (NavIntent::Escape, Location::Page(index)) => self.exit_to_hero(index, out),
            (_, Location::Overlay { .. }) => NavOutcome::Rejected(Rejection::OverlayOpen),
        }
    }

    /// Jump to a zero-based page, entering content mode from Hero in one
    /// transition.
    pub fn go_to_page(&mut self, index: usize, out: &mut Outbox<'_>) -> NavOutcome {
        if let Err(rejection) = self.gate() {
            return NavOutcome::Rejected(rejection);
        }
        if index >= self.pages.count {
            return NavOutcome::Rejected(Rejection::OutOfRange);
        }
        match self.location {
            Location::Hero => self.enter_content(index, out),
            Location::Page(current) if current == index => NavOutcome::Absorbed,
            Location::Page(current) => self.switch_page(current, index, out),
            Location::Overlay { .. } => NavOutcome::Rejected(Rejection::OverlayOpen),
        }
    }

    /// Back control or `Escape`: return to Hero from any content page.
    pub fn back_to_hero(&mut self, out: &mut Outbox<'_>) -> NavOutcome {
        if let Err(rejection) = self.gate() {
            return NavOutcome::Rejected(rejection);
        }
        match self.location {
            Location::Hero => NavOutcome::Absorbed,
            Location::Page(index) => self.exit_to_hero(index, out),
            Location::Overlay { .. } => NavOutcome::Rejected(Rejection::OverlayOpen),
        }
    }

    /// Enter the detail overlay of `page`. Only valid while resting on it.
    pub fn open_overlay(&mut self, kind: DetailKind, page: usize, out: &mut Outbox<'_>) -> NavOutcome {
        if let Err(rejection) = self.gate() {
            return NavOutcome::Rejected(rejection);
        }
        match self.location {
            Location::Page(index) if index == page => {
                let from = self.state();
                self.accumulator.reset(out.now);
                self.location = Location::Overlay {
                    parent: index,
                    kind,
                };
                tracing::debug!(%kind, page, "detail overlay opened");
                NavOutcome::Transitioned {
                    from,
                    to: self.state(),
                }
            }
            _ => NavOutcome::Rejected(Rejection::Unavailable),
        }
    }

    /// Leave the open overlay for its parent page.
    pub fn close_overlay(&mut self) -> NavOutcome {
        match self.location {
            Location::Overlay { parent, kind } => {
                let from = self.state();
                self.location = Location::Page(parent);
                tracing::debug!(%kind, page = parent, "detail overlay closed");
                NavOutcome::Transitioned {
                    from,
                    to: self.state(),
                }
            }
            _ => NavOutcome::Absorbed,
        }
    }

    fn enter_content(&mut self, index: usize, out: &mut Outbox<'_>) -> NavOutcome {
        let from = self.state();
        self.fill.set_complete();
        self.emit_masks(out);
        self.location = Location::Page(index);

        out.push(Effect::add(Target::PageContainer, Class::Active));
        out.push(Effect::add(Target::PageContainer, Class::Revealed));
        out.push(Effect::add(Target::Sections, Class::Visible));
        out.push(Effect::add(Target::BackControl, Class::Visible));
        out.push(self.strip_effect(index));

        let reveal = self.reveal_generation.bump();
        out.schedule_in(self.pages.reveal_notify_ms, TimerKind::ContentRevealed, reveal);

        self.begin_transition(from, out)
    }

    fn switch_page(&mut self, from_index: usize, to_index: usize, out: &mut Outbox<'_>) -> NavOutcome {
        let from = self.state();
        self.leave_page(from_index, out);
        self.location = Location::Page(to_index);
        out.push(self.strip_effect(to_index));
        self.begin_transition(from, out)
    }

    fn exit_to_hero(&mut self, from_index: usize, out: &mut Outbox<'_>) -> NavOutcome {
        let from = self.state();
        self.leave_page(from_index, out);
        // Returning keeps the headline full so the fill does not replay.
        self.fill.set_complete();
        self.emit_masks(out);
        self.location = Location::Hero;

        out.push(Effect::remove(Target::PageContainer, Class::Active));
        out.push(Effect::remove(Target::PageContainer, Class::Revealed));
        out.push(Effect::remove(Target::PageContainer, Class::SnapEnabled));
        out.push(Effect::remove(Target::Sections, Class::Visible));
        out.push(Effect::remove(Target::BackControl, Class::Visible));

        let reveal = self.reveal_generation.bump();
        out.schedule_in(self.pages.transition_ms, TimerKind::StripReset, reveal);

        self.begin_transition(from, out)
    }

    fn leave_page(&mut self, index: usize, out: &mut Outbox<'_>) {
        if let Some((page, stage)) = self.rubber.as_mut() {
            if *page == index {
                stage.reset();
                out.effects.extend(stage.effects());
            }
        }
    }

    fn begin_transition(&mut self, from: NavigationState, out: &mut Outbox<'_>) -> NavOutcome {
        self.transitioning = true;
        let generation = self.transition_generation.bump();
        out.schedule_in(self.pages.transition_ms, TimerKind::TransitionUnlock, generation);
        self.last_switch_at = Some(out.now);
        self.accumulator.reset(out.now);

        let to = self.state();
        tracing::debug!(?from, ?to, now = out.now, "navigation transition");
        NavOutcome::Transitioned { from, to }
    }

    fn strip_effect(&self, index: usize) -> Effect {
        Effect::translate(Target::PageStrip, -(index as f64) * self.pages.height_px)
    }

    fn emit_masks(&self, out: &mut Outbox<'_>) {
        if self.headline_enabled {
            out.effects.extend(self.fill.mask_effects());
        }
    }

    /// Handle a navigation or rubber timer. Stale timers are no-ops.
    pub fn on_timer(&mut self, timer: &Timer, timers: &mut TimerQueue, effects: &mut Vec<Effect>) {
        match timer.kind {
            TimerKind::TransitionUnlock => {
                if timer.generation == self.transition_generation {
                    self.transitioning = false;
                    tracing::debug!(now = timer.due_ms, "transition lock released");
                } else {
                    tracing::trace!("stale transition unlock ignored");
                }
            }
            TimerKind::AccumulatorReset => self.accumulator.on_timer(timer),
            TimerKind::ContentRevealed => {
                if timer.generation == self.reveal_generation && !self.state().is_hero() {
                    effects.push(Effect::Dispatch(SiteEvent::ContentRevealed));
                    effects.push(Effect::add(Target::PageContainer, Class::SnapEnabled));
                    tracing::debug!("content revealed");
                } else {
                    tracing::trace!("stale content reveal ignored");
                }
            }
            TimerKind::StripReset => {
                if timer.generation == self.reveal_generation && self.state().is_hero() {
                    effects.push(Effect::translate(Target::PageStrip, 0.0));
                } else {
                    tracing::trace!("stale strip reset ignored");
                }
            }
            TimerKind::RubberQuiet | TimerKind::RubberFrame => {
                if let Some((_, stage)) = self.rubber.as_mut() {
                    if stage.on_timer(timer, timers) {
                        effects.extend(stage.effects());
                    }
                }
            }
            TimerKind::TypewriterStep(_) => {}
        }
    }
}

#[cfg(test)]
#[path = "navigation_tests.rs"]
mod tests;
