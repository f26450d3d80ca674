//! Tests for the site coordinator.

use super::*;
use crate::media::{Carousel, MediaStatus};
use crate::model::{Key, MissingAnchors, Target};

fn site() -> Site {
    Site::new(NavConfig::default()).unwrap()
}

fn wheel(delta_y: f64, timestamp_ms: u64) -> RawInput {
    RawInput::Wheel {
        delta_y,
        timestamp_ms,
    }
}

fn key(key: Key, timestamp_ms: u64) -> RawInput {
    RawInput::Key { key, timestamp_ms }
}

fn missing(anchors: &[Anchor]) -> MissingAnchors {
    MissingAnchors(anchors.iter().copied().collect())
}

fn page(index: usize) -> NavigationState {
    NavigationState::ContentPage { index }
}

#[test]
fn starts_in_hero_with_indicator_typing() {
    let mut site = site();
    assert_eq!(site.current_state(), NavigationState::Hero { fill_progress: 0.0 });
    assert!(site.init_errors().is_empty());
    assert_eq!(site.indicator_text(), Some("S"));

    let effects = site.drain_effects();
    assert!(effects.contains(&Effect::LanguageChanged(Language::En)));
    assert!(effects.contains(&Effect::translate(Target::PageStrip, 0.0)));
    assert!(site.drain_effects().is_empty());
}

#[test]
fn hero_to_last_page_and_back() {
    let mut site = site();
    assert_eq!(site.handle_input(wheel(1000.0, 0)).outcome, NavOutcome::Absorbed);
    assert_eq!(
        site.handle_input(wheel(1000.0, 20)).outcome,
        NavOutcome::Transitioned {
            from: NavigationState::Hero {
                fill_progress: 100.0
            },
            to: page(0)
        }
    );

    assert!(site.handle_input(key(Key::Digit(4), 1_020)).outcome.is_transition());
    assert_eq!(site.current_state(), page(3));

    assert!(site.handle_input(key(Key::Escape, 2_020)).outcome.is_transition());
    assert_eq!(
        site.current_state(),
        NavigationState::Hero {
            fill_progress: 100.0
        }
    );
}

#[test]
fn saturation_in_one_tick_transitions_once() {
    let mut site = site();
    site.handle_input(wheel(1000.0, 0));
    let outcomes: Vec<NavOutcome> = (0..5)
        .map(|_| site.handle_input(wheel(1000.0, 20)).outcome)
        .collect();
    assert_eq!(outcomes.iter().filter(|o| o.is_transition()).count(), 1);
    assert_eq!(site.current_state(), page(0));
}

#[test]
fn requests_during_lock_are_rejected() {
    let mut site = site();
    assert!(site.go_to_page(1).is_transition());
    assert_eq!(site.go_to_page(2), NavOutcome::Rejected(Rejection::Transitioning));
    assert_eq!(site.back_control(), NavOutcome::Rejected(Rejection::Transitioning));
    assert_eq!(site.current_state(), page(1));
    assert!(site.is_transitioning());

    site.tick(1_000);
    assert!(!site.is_transitioning());
}

#[test]
fn overlay_ignores_wheel_until_closed() {
    let mut site = site();
    site.go_to_page(1);
    site.tick(1_000);

    assert!(site.click_detail_trigger(1).is_transition());
    assert!(site.is_detail_overlay_open(1));
    assert_eq!(
        site.handle_input(wheel(500.0, 1_010)).outcome,
        NavOutcome::Rejected(Rejection::OverlayOpen)
    );
    assert_eq!(
        site.current_state(),
        NavigationState::DetailOverlay {
            parent_index: 1,
            kind: DetailKind::AiCoding
        }
    );

    assert!(site.close_detail().is_transition());
    assert!(!site.is_detail_overlay_open(1));
    assert_eq!(site.current_state(), page(1));
    assert_eq!(site.close_detail(), NavOutcome::Absorbed);
}

#[test]
fn trigger_needs_overlay_and_matching_page() {
    let mut site = site();
    site.go_to_page(3);
    site.tick(1_000);
    assert_eq!(
        site.click_detail_trigger(3),
        NavOutcome::Rejected(Rejection::Unavailable)
    );
    assert_eq!(
        site.click_detail_trigger(1),
        NavOutcome::Rejected(Rejection::Unavailable)
    );
    assert!(!site.is_detail_overlay_open(1));
}

#[test]
fn design_overlay_pauses_carousel_and_types_prompt() {
    let config = NavConfig::default();
    let carousel = Carousel::new(&config.media, 0);
    let mut site = Site::builder(config)
        .media(Box::new(carousel))
        .build()
        .unwrap();
    site.go_to_page(2);
    site.tick(1_000);
    assert_eq!(site.media().status(2), MediaStatus::Playing { clip: Some(0) });

    assert!(site.click_detail_trigger(2).is_transition());
    assert_eq!(site.media().status(2), MediaStatus::Paused);
    let prompt = site
        .overlay(DetailKind::Design)
        .and_then(DetailOverlayController::typewriter)
        .map(|tw| tw.displayed().to_string());
    assert_eq!(prompt.as_deref(), Some("s"));

    site.tick(1_100);
    let prompt = site
        .overlay(DetailKind::Design)
        .and_then(DetailOverlayController::typewriter)
        .map(|tw| tw.displayed().to_string());
    assert_eq!(prompt.as_deref(), Some("sc"));

    site.close_detail();
    assert_eq!(site.media().status(2), MediaStatus::Playing { clip: Some(0) });
    let running = site
        .overlay(DetailKind::Design)
        .and_then(DetailOverlayController::typewriter)
        .is_some_and(Typewriter::is_running);
    assert!(!running);
}

#[test]
fn toggle_language_restarts_indicator() {
    let mut site = site();
    site.tick(300);
    assert_eq!(site.indicator_text(), Some("Scr"));
    site.drain_effects();

    assert_eq!(site.toggle_language(), Language::Zh);
    assert_eq!(site.current_language(), Language::Zh);
    assert_eq!(site.indicator_text(), Some("向"));
    assert!(site
        .drain_effects()
        .contains(&Effect::LanguageChanged(Language::Zh)));
}

#[test]
fn content_revealed_fires_on_tick() {
    let mut site = site();
    site.go_to_page(0);
    site.drain_effects();
    site.tick(799);
    assert!(!site
        .drain_effects()
        .contains(&Effect::Dispatch(crate::model::SiteEvent::ContentRevealed)));
    site.tick(800);
    assert!(site
        .drain_effects()
        .contains(&Effect::Dispatch(crate::model::SiteEvent::ContentRevealed)));
}

#[test]
fn time_never_goes_backwards() {
    let mut site = site();
    site.tick(500);
    site.handle_input(wheel(100.0, 100));
    assert_eq!(site.now(), 500);
    site.tick(200);
    assert_eq!(site.now(), 500);
}

#[test]
fn touch_moves_fill_hero_and_fling_switches_pages() {
    let mut site = site();
    let start = site.handle_input(RawInput::TouchStart {
        y: 500.0,
        timestamp_ms: 0,
    });
    assert_eq!(start, InputResponse::suppressed(NavOutcome::Absorbed));
    site.handle_input(RawInput::TouchMove {
        y: 400.0,
        timestamp_ms: 10,
    });
    assert_eq!(site.fill().map(TextFillEngine::progress), Some(10.0));
    assert_eq!(
        site.handle_input(RawInput::TouchEnd {
            y: 400.0,
            timestamp_ms: 20
        })
        .outcome,
        NavOutcome::Absorbed
    );

    site.go_to_page(1);
    site.handle_input(RawInput::TouchStart {
        y: 500.0,
        timestamp_ms: 1_000,
    });
    let release = site.handle_input(RawInput::TouchEnd {
        y: 300.0,
        timestamp_ms: 1_100,
    });
    assert_eq!(
        release.outcome,
        NavOutcome::Transitioned {
            from: page(1),
            to: page(2)
        }
    );
}

#[test]
fn cancelled_touch_does_not_fling() {
    let mut site = site();
    site.go_to_page(1);
    site.handle_input(RawInput::TouchStart {
        y: 500.0,
        timestamp_ms: 1_000,
    });
    site.handle_input(RawInput::TouchCancel {
        timestamp_ms: 1_050,
    });
    let release = site.handle_input(RawInput::TouchEnd {
        y: 300.0,
        timestamp_ms: 1_100,
    });
    assert_eq!(release.outcome, NavOutcome::Absorbed);
    assert_eq!(site.current_state(), page(1));
}

#[test]
fn unknown_keys_are_absorbed() {
    let mut site = site();
    assert_eq!(
        site.handle_input(key(Key::Other, 0)),
        InputResponse::suppressed(NavOutcome::Absorbed)
    );
}

#[test]
fn missing_navigator_anchor_disables_navigation_only() {
    let anchors = missing(&[Anchor::PageStrip]);
    let mut site = Site::builder(NavConfig::default())
        .anchors(&anchors)
        .build()
        .unwrap();

    assert_eq!(
        site.init_errors(),
        &[InitError::MissingAnchor {
            component: Component::Navigator,
            anchor: Anchor::PageStrip
        }]
    );
    let response = site.handle_input(wheel(1000.0, 0));
    assert_eq!(response.outcome, NavOutcome::Rejected(Rejection::Unavailable));
    assert!(!response.suppress_default);
    assert_eq!(site.go_to_page(1), NavOutcome::Rejected(Rejection::Unavailable));
    assert_eq!(
        site.click_detail_trigger(0),
        NavOutcome::Rejected(Rejection::Unavailable)
    );
    assert_eq!(site.indicator_text(), Some("S"), "siblings still start");
}

#[test]
fn missing_rubber_anchor_makes_last_page_ordinary() {
    let anchors = missing(&[Anchor::RubberPage]);
    let mut site = Site::builder(NavConfig::default())
        .anchors(&anchors)
        .build()
        .unwrap();
    assert!(site.rubber().is_none());
    assert_eq!(site.init_errors()[0].component(), Component::RubberStage);

    site.go_to_page(3);
    assert_eq!(
        site.handle_input(wheel(100.0, 1_000)).outcome,
        NavOutcome::Rejected(Rejection::AtBoundary)
    );
}

#[test]
fn rubber_page_absorbs_forward_scroll() {
    let mut site = site();
    site.go_to_page(3);
    let response = site.handle_input(wheel(100.0, 1_000));
    assert_eq!(response, InputResponse::suppressed(NavOutcome::Absorbed));
    assert_eq!(site.rubber().map(|s| s.state().inner), Some(50.0));
}

#[test]
fn missing_headline_anchor_suppresses_masks() {
    let anchors = missing(&[Anchor::Headline(1)]);
    let mut site = Site::builder(NavConfig::default())
        .anchors(&anchors)
        .build()
        .unwrap();
    site.drain_effects();
    site.handle_input(wheel(500.0, 0));
    assert!(!site
        .drain_effects()
        .iter()
        .any(|e| matches!(e, Effect::HeadlineMask { .. })));
    assert_eq!(site.fill().map(TextFillEngine::progress), Some(25.0));
}

#[test]
fn missing_overlay_anchor_disables_that_overlay() {
    let anchors = missing(&[Anchor::OverlayClose(DetailKind::AiCoding)]);
    let mut site = Site::builder(NavConfig::default())
        .anchors(&anchors)
        .build()
        .unwrap();
    assert!(site.overlay(DetailKind::AiCoding).is_none());
    assert!(site.overlay(DetailKind::Apple).is_some());

    site.go_to_page(1);
    site.tick(1_000);
    assert_eq!(
        site.click_detail_trigger(1),
        NavOutcome::Rejected(Rejection::Unavailable)
    );
}

#[test]
fn missing_indicator_anchor_leaves_no_text() {
    let anchors = missing(&[Anchor::IndicatorText]);
    let site = Site::builder(NavConfig::default())
        .anchors(&anchors)
        .language(Language::Zh)
        .build()
        .unwrap();
    assert_eq!(site.indicator_text(), None);
    assert_eq!(site.current_language(), Language::Zh);
    assert_eq!(site.init_errors()[0].component(), Component::Indicator);
}

#[test]
fn invalid_config_fails_to_build() {
    let mut config = NavConfig::default();
    config.pages.height_px = 0.0;
    assert!(Site::new(config).is_err());
}
