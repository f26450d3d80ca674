//! Top-level coordinator.
//!
//! A [`Site`] is built once per page load from an injected [`NavConfig`].
//! It owns every component, routes raw input through [`GestureInput`] to
//! the [`Navigator`], fires due timers in order, and collects the effects
//! the host drains.
//!
//! All mutation happens synchronously inside [`Site::handle_input`],
//! [`Site::tick`] and the explicit control methods. Time never goes
//! backwards: an input stamped earlier than the last seen time is handled
//! at the last seen time.

use super::detail_overlay::DetailOverlayController;
use super::navigation::{InputResponse, Navigator};
use super::rubber_scroll::RubberScrollStage;
use super::text_fill::TextFillEngine;
use super::timers::{Outbox, Timer, TimerKind, TimerQueue};
use super::typewriter::Typewriter;
use crate::config::{ConfigError, NavConfig};
use crate::content;
use crate::gesture::GestureInput;
use crate::media::{MediaControl, NoopMedia};
use crate::model::{
    AllAnchors, Anchor, AnchorSet, Classified, Component, DetailKind, Effect, InitError, Language,
    LanguageStore, NavOutcome, NavigationState, RawInput, Rejection, TypewriterSlot,
};

/// Builder for [`Site`].
pub struct SiteBuilder<'a> {
    config: NavConfig,
    language: Language,
    media: Box<dyn MediaControl>,
    anchors: &'a dyn AnchorSet,
    now: u64,
}

impl<'a> SiteBuilder<'a> {
    /// Initial language.
    pub fn language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Background media collaborator.
    pub fn media(mut self, media: Box<dyn MediaControl>) -> Self {
        self.media = media;
        self
    }

    /// Anchors the host surface provides.
    pub fn anchors(mut self, anchors: &'a dyn AnchorSet) -> Self {
        self.anchors = anchors;
        self
    }

    /// Load time.
    pub fn started_at(mut self, now: u64) -> Self {
        self.now = now;
        self
    }

    /// Initialize every component. Components whose anchors are missing are
    /// disabled and recorded in [`Site::init_errors`].
    ///
    /// # Errors
    ///
    /// Fails only when the configuration does not validate.
    pub fn build(self) -> Result<Site, ConfigError> {
        let SiteBuilder {
            config,
            language,
            media,
            anchors,
            now,
        } = self;
        let mut init_errors = Vec::new();

        let navigator = match require(anchors, Component::Navigator, &NAVIGATOR_ANCHORS) {
            Ok(()) => {
                let mut navigator = Navigator::new(&config)?;
                let headline: Vec<Anchor> =
                    (0..navigator.fill().line_count()).map(Anchor::Headline).collect();
                if let Err(err) = require(anchors, Component::Headline, &headline) {
                    init_errors.push(err);
                    navigator = navigator.without_headline();
                }
                if navigator.rubber_page().is_some() {
                    if let Err(err) = require(anchors, Component::RubberStage, &RUBBER_ANCHORS) {
                        init_errors.push(err);
                        navigator = navigator.without_rubber();
                    }
                }
                Some(navigator)
            }
            Err(err) => {
                config.validate()?;
                init_errors.push(err);
                None
            }
        };

        let mut overlays = Vec::new();
        for binding in &config.pages.overlays {
            let kind = binding.kind;
            let needed = [
                Anchor::Overlay(kind),
                Anchor::OverlayTrigger(kind),
                Anchor::OverlayClose(kind),
            ];
            match require(anchors, Component::DetailOverlay(kind), &needed) {
                Ok(()) => {
                    let mut overlay = DetailOverlayController::new(kind, binding.page);
                    if kind == DetailKind::Design {
                        overlay = overlay.with_typewriter(Typewriter::new(
                            TypewriterSlot::DesignDetail,
                            content::DESIGN_PROMPT,
                            config.typewriter.cadence(TypewriterSlot::DesignDetail),
                        ));
                    }
                    overlays.push(overlay);
                }
                Err(err) => init_errors.push(err),
            }
        }

        let indicator = match require(anchors, Component::Indicator, &[Anchor::IndicatorText]) {
            Ok(()) => Some(Typewriter::new(
                TypewriterSlot::HeroIndicator,
                content::SCROLL_INDICATOR,
                config.typewriter.cadence(TypewriterSlot::HeroIndicator),
            )),
            Err(err) => {
                init_errors.push(err);
                None
            }
        };

        let mut site = Site {
            gesture: GestureInput::new(config.gesture.clone()),
            config,
            navigator,
            overlays,
            indicator,
            language: LanguageStore::new(language),
            media,
            timers: TimerQueue::new(),
            effects: Vec::new(),
            init_errors,
            now,
        };
        site.start();
        Ok(site)
    }
}

const NAVIGATOR_ANCHORS: [Anchor; 3] = [Anchor::PageContainer, Anchor::PageStrip, Anchor::BackControl];
const RUBBER_ANCHORS: [Anchor; 2] = [Anchor::RubberInner, Anchor::RubberPage];

/// First missing anchor of `component`, logged at warn.
fn require(anchors: &dyn AnchorSet, component: Component, needed: &[Anchor]) -> Result<(), InitError> {
    match needed.iter().find(|anchor| !anchors.contains(**anchor)) {
        Some(&anchor) => {
            let err = InitError::MissingAnchor { component, anchor };
            tracing::warn!(%component, %anchor, "component disabled at startup");
            Err(err)
        }
        None => Ok(()),
    }
}

/// The site: navigation, overlays, typewriters, language and media.
#[derive(Debug)]
pub struct Site {
    config: NavConfig,
    gesture: GestureInput,
    navigator: Option<Navigator>,
    overlays: Vec<DetailOverlayController>,
    indicator: Option<Typewriter>,
    language: LanguageStore,
    media: Box<dyn MediaControl>,
    timers: TimerQueue,
    effects: Vec<Effect>,
    init_errors: Vec<InitError>,
    now: u64,
}

impl Site {
    /// Builder with every anchor present, English and no media.
    pub fn builder<'a>(config: NavConfig) -> SiteBuilder<'a> {
        SiteBuilder {
            config,
            language: Language::default(),
            media: Box::new(NoopMedia),
            anchors: &AllAnchors,
            now: 0,
        }
    }

    /// Site with default components.
    ///
    /// # Errors
    ///
    /// Fails when the configuration does not validate.
    pub fn new(config: NavConfig) -> Result<Self, ConfigError> {
        Self::builder(config).build()
    }

    fn start(&mut self) {
        let lang = self.language.current();
        if let Some(navigator) = &self.navigator {
            self.effects.extend(navigator.initial_effects());
        }
        self.effects.push(Effect::LanguageChanged(lang));
        let mut out = Outbox {
            now: self.now,
            timers: &mut self.timers,
            effects: &mut self.effects,
        };
        if let Some(indicator) = self.indicator.as_mut() {
            indicator.start(lang, &mut out);
        }
        tracing::info!(
            pages = self.config.pages.count,
            %lang,
            disabled = self.init_errors.len(),
            "site initialized"
        );
    }

    /// Feed one raw input. Due timers up to the input's time fire first.
    pub fn handle_input(&mut self, raw: RawInput) -> InputResponse {
        self.tick(raw.timestamp_ms());
        let Some(navigator) = self.navigator.as_mut() else {
            return InputResponse {
                outcome: NavOutcome::Rejected(Rejection::Unavailable),
                suppress_default: false,
            };
        };

        let mut out = Outbox {
            now: self.now,
            timers: &mut self.timers,
            effects: &mut self.effects,
        };
        let response = match self.gesture.classify(&raw) {
            Some(Classified::Gesture(gesture)) => navigator.handle_gesture(gesture, &mut out),
            Some(Classified::Fling(fling)) => {
                InputResponse::suppressed(navigator.handle_fling(fling, &mut out))
            }
            Some(Classified::Intent(intent)) => {
                InputResponse::suppressed(navigator.handle_intent(intent, &mut out))
            }
            None => InputResponse::suppressed(NavOutcome::Absorbed),
        };
        if let NavOutcome::Rejected(reason) = response.outcome {
            tracing::trace!(?raw, ?reason, "input rejected");
        }
        response
    }

    /// Advance time to `now` and fire every due timer in due order.
    pub fn tick(&mut self, now: u64) {
        self.now = self.now.max(now);
        self.media.tick(self.now);
        while let Some(timer) = self.timers.pop_due(self.now) {
            self.fire(&timer);
        }
    }

    fn fire(&mut self, timer: &Timer) {
        let lang = self.language.current();
        match timer.kind {
            TimerKind::TypewriterStep(TypewriterSlot::HeroIndicator) => {
                let mut out = Outbox {
                    now: timer.due_ms,
                    timers: &mut self.timers,
                    effects: &mut self.effects,
                };
                if let Some(indicator) = self.indicator.as_mut() {
                    indicator.on_timer(timer, lang, &mut out);
                }
            }
            TimerKind::TypewriterStep(TypewriterSlot::DesignDetail) => {
                let mut out = Outbox {
                    now: timer.due_ms,
                    timers: &mut self.timers,
                    effects: &mut self.effects,
                };
                for overlay in &mut self.overlays {
                    overlay.on_timer(timer, lang, &mut out);
                }
            }
            _ => {
                if let Some(navigator) = self.navigator.as_mut() {
                    navigator.on_timer(timer, &mut self.timers, &mut self.effects);
                }
            }
        }
    }

    /// Click on the detail trigger of `page`.
    pub fn click_detail_trigger(&mut self, page: usize) -> NavOutcome {
        let lang = self.language.current();
        let (Some(navigator), Some(overlay)) = (
            self.navigator.as_mut(),
            self.overlays.iter_mut().find(|o| o.parent_index() == page),
        ) else {
            return NavOutcome::Rejected(Rejection::Unavailable);
        };

        let mut out = Outbox {
            now: self.now,
            timers: &mut self.timers,
            effects: &mut self.effects,
        };
        let outcome = navigator.open_overlay(overlay.kind(), page, &mut out);
        if outcome.is_transition() {
            overlay.open(lang, &mut out);
            self.media.pause_background_media(page, self.now);
        }
        outcome
    }

    /// Close control of the open overlay.
    pub fn close_detail(&mut self) -> NavOutcome {
        let Some(navigator) = self.navigator.as_mut() else {
            return NavOutcome::Rejected(Rejection::Unavailable);
        };
        let outcome = navigator.close_overlay();
        if let NavOutcome::Transitioned {
            from: NavigationState::DetailOverlay { parent_index, kind },
            ..
        } = outcome
        {
            let mut out = Outbox {
                now: self.now,
                timers: &mut self.timers,
                effects: &mut self.effects,
            };
            if let Some(overlay) = self.overlays.iter_mut().find(|o| o.kind() == kind) {
                overlay.close(&mut out);
            }
            self.media.resume_background_media(parent_index, self.now);
        }
        outcome
    }

    /// Back-to-hero control.
    pub fn back_control(&mut self) -> NavOutcome {
        let Some(navigator) = self.navigator.as_mut() else {
            return NavOutcome::Rejected(Rejection::Unavailable);
        };
        let mut out = Outbox {
            now: self.now,
            timers: &mut self.timers,
            effects: &mut self.effects,
        };
        navigator.back_to_hero(&mut out)
    }

    /// Jump to a zero-based page.
    pub fn go_to_page(&mut self, index: usize) -> NavOutcome {
        let Some(navigator) = self.navigator.as_mut() else {
            return NavOutcome::Rejected(Rejection::Unavailable);
        };
        let mut out = Outbox {
            now: self.now,
            timers: &mut self.timers,
            effects: &mut self.effects,
        };
        navigator.go_to_page(index, &mut out)
    }

    /// Switch language and restart running typewriters in it.
    pub fn toggle_language(&mut self) -> Language {
        let lang = self.language.toggle();
        self.effects.push(Effect::LanguageChanged(lang));
        let mut out = Outbox {
            now: self.now,
            timers: &mut self.timers,
            effects: &mut self.effects,
        };
        if let Some(indicator) = self.indicator.as_mut().filter(|tw| tw.is_running()) {
            indicator.start(lang, &mut out);
        }
        for overlay in &mut self.overlays {
            overlay.restart_typewriter(lang, &mut out);
        }
        tracing::debug!(%lang, "language toggled");
        lang
    }

    /// Where the visitor is. A disabled navigator reports an empty Hero.
    pub fn current_state(&self) -> NavigationState {
        self.navigator
            .as_ref()
            .map_or(NavigationState::Hero { fill_progress: 0.0 }, Navigator::state)
    }

    /// True while a transition holds the lock.
    pub fn is_transitioning(&self) -> bool {
        self.navigator
            .as_ref()
            .is_some_and(Navigator::is_transitioning)
    }

    /// True when the overlay of `page` is open.
    pub fn is_detail_overlay_open(&self, page: usize) -> bool {
        self.overlays
            .iter()
            .any(|o| o.parent_index() == page && o.is_open())
    }

    /// Current language.
    pub fn current_language(&self) -> Language {
        self.language.current()
    }

    /// Take every effect produced since the last drain.
    pub fn drain_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    /// Earliest pending timer, for hosts that sleep between ticks.
    pub fn next_deadline(&self) -> Option<u64> {
        self.timers.next_deadline()
    }

    /// Last seen time.
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Components disabled at startup.
    pub fn init_errors(&self) -> &[InitError] {
        &self.init_errors
    }

    /// Configuration the site was built with.
    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    /// Navigator, unless disabled.
    pub fn navigator(&self) -> Option<&Navigator> {
        self.navigator.as_ref()
    }

    /// Hero headline fill, unless the navigator is disabled.
    pub fn fill(&self) -> Option<&TextFillEngine> {
        self.navigator.as_ref().map(Navigator::fill)
    }

    /// Rubber stage, unless disabled.
    pub fn rubber(&self) -> Option<&RubberScrollStage> {
        self.navigator.as_ref().and_then(Navigator::rubber)
    }

    /// Overlay of `kind`, unless disabled or unbound.
    pub fn overlay(&self, kind: DetailKind) -> Option<&DetailOverlayController> {
        self.overlays.iter().find(|o| o.kind() == kind)
    }

    /// Text shown by the hero scroll indicator.
    pub fn indicator_text(&self) -> Option<&str> {
        self.indicator.as_ref().map(Typewriter::displayed)
    }

    /// Background media collaborator.
    pub fn media(&self) -> &dyn MediaControl {
        self.media.as_ref()
    }
}

#[cfg(test)]
#[path = "site_tests.rs"]
mod tests;
