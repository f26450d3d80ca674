//! Configuration module.
//!
//! [`NavConfig`] carries every tunable of the engine. Each section
//! deserializes with per-field defaults so a config file only needs the
//! values it changes.

pub mod keybindings;
pub mod loader;

pub use keybindings::KeyBindings;
pub use loader::{
    apply_cli_overrides, apply_env_overrides, default_config_path, default_log_path,
    load_config_file, load_config_with_precedence, merge_config, CliOverrides, ConfigError,
    ConfigFile, ResolvedConfig,
};

use crate::model::{DetailKind, TypewriterSlot};
use serde::Deserialize;

/// Input device scaling and touch thresholds.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GestureConfig {
    /// Multiplier applied to wheel `deltaY`.
    pub wheel_multiplier: f64,
    /// Multiplier applied to touch displacement.
    pub touch_multiplier: f64,
    /// Minimum finger travel (px) before a touch move is emitted.
    pub touch_dead_zone: f64,
    /// Release displacement (px) that counts as a fling.
    pub fling_distance: f64,
    /// Release velocity (px/ms) that counts as a fling.
    pub fling_velocity: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            wheel_multiplier: 1.0,
            touch_multiplier: 2.0,
            touch_dead_zone: 4.0,
            fling_distance: 50.0,
            fling_velocity: 0.5,
        }
    }
}

/// Hero headline fill.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TextFillConfig {
    /// Progress points per unit of gesture magnitude.
    pub sensitivity: f64,
    /// Per-line `[start, end]` sub-ranges of the 0..=100 scale.
    pub line_ranges: Vec<[f64; 2]>,
    /// Hero gestures smaller than this are ignored.
    pub min_delta: f64,
    /// Minimum spacing between applied hero gestures.
    pub throttle_ms: u64,
}

impl Default for TextFillConfig {
    fn default() -> Self {
        Self {
            sensitivity: 0.05,
            line_ranges: vec![[0.0, 50.0], [50.0, 100.0]],
            min_delta: 1.0,
            throttle_ms: 16,
        }
    }
}

/// Binds a detail overlay to the page that opens it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OverlayBinding {
    /// Overlay kind.
    pub kind: DetailKind,
    /// Zero-based parent page.
    pub page: usize,
}

/// Content pages and transition timing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageConfig {
    /// Number of content pages.
    pub count: usize,
    /// Height of one page in pixels; the strip moves by this per page.
    pub height_px: f64,
    /// Accumulated magnitude needed for one page switch.
    pub switch_threshold: f64,
    /// Minimum time between page switches.
    pub cooldown_ms: u64,
    /// Silence after which the accumulator drops back to zero.
    pub accumulator_timeout_ms: u64,
    /// Length of the CSS transition; the lock is held this long.
    pub transition_ms: u64,
    /// Minimum time since the last switch before Hero may be left.
    pub hero_exit_gap_ms: u64,
    /// Delay before `contentRevealed` is dispatched.
    pub reveal_notify_ms: u64,
    /// Overlay → parent page bindings.
    pub overlays: Vec<OverlayBinding>,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            count: 4,
            height_px: 919.0,
            switch_threshold: 50.0,
            cooldown_ms: 300,
            accumulator_timeout_ms: 500,
            transition_ms: 1000,
            hero_exit_gap_ms: 100,
            reveal_notify_ms: 800,
            overlays: DetailKind::ALL
                .iter()
                .map(|&kind| OverlayBinding {
                    kind,
                    page: kind.default_parent(),
                })
                .collect(),
        }
    }
}

/// Three-stage rubber-band scroll.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RubberConfig {
    /// Whether any page uses the stage.
    pub enabled: bool,
    /// Page that owns the stage.
    pub page: usize,
    /// Scroll range of the inner list.
    pub inner_max: f64,
    /// Page reveal range.
    pub reveal_max: f64,
    /// Elastic overscroll limit.
    pub overscroll_max: f64,
    /// Gesture magnitude → offset scale.
    pub step_scale: f64,
    /// Extra scale while pulling into overscroll.
    pub overscroll_gain: f64,
    /// Extra scale while pushing overscroll back.
    pub unwind_gain: f64,
    /// Consecutive same-direction gestures needed to cross a stage boundary.
    pub damping_threshold: u32,
    /// Quiet period before overscroll starts decaying.
    pub quiet_ms: u64,
    /// Animation frame interval of the decay.
    pub frame_ms: u64,
    /// Fraction of overscroll removed per frame.
    pub decay_fraction: f64,
    /// Overscroll below this snaps to zero.
    pub settle_epsilon: f64,
}

impl Default for RubberConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            page: 3,
            inner_max: 459.0,
            reveal_max: 200.0,
            overscroll_max: 100.0,
            step_scale: 0.5,
            overscroll_gain: 0.3,
            unwind_gain: 0.5,
            damping_threshold: 3,
            quiet_ms: 150,
            frame_ms: 16,
            decay_fraction: 0.15,
            settle_epsilon: 1.0,
        }
    }
}

/// Typewriter cadence.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TypewriterConfig {
    /// Delay between typed characters.
    pub typing_ms: u64,
    /// Delay between deleted characters.
    pub deleting_ms: u64,
    /// Pause once the text is complete.
    pub pause_after_complete_ms: u64,
    /// Pause once the text is empty.
    pub pause_after_delete_ms: u64,
    /// Typing delay of the design detail prompt.
    pub detail_typing_ms: u64,
    /// Deleting delay of the design detail prompt.
    pub detail_deleting_ms: u64,
}

impl TypewriterConfig {
    /// Step delays for one typewriter.
    pub fn cadence(&self, slot: TypewriterSlot) -> Cadence {
        let (typing_ms, deleting_ms) = match slot {
            TypewriterSlot::HeroIndicator => (self.typing_ms, self.deleting_ms),
            TypewriterSlot::DesignDetail => (self.detail_typing_ms, self.detail_deleting_ms),
        };
        Cadence {
            typing_ms,
            deleting_ms,
            pause_after_complete_ms: self.pause_after_complete_ms,
            pause_after_delete_ms: self.pause_after_delete_ms,
        }
    }
}

impl Default for TypewriterConfig {
    fn default() -> Self {
        Self {
            typing_ms: 150,
            deleting_ms: 100,
            pause_after_complete_ms: 2000,
            pause_after_delete_ms: 500,
            detail_typing_ms: 100,
            detail_deleting_ms: 50,
        }
    }
}

/// Resolved step delays of a single typewriter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cadence {
    /// Delay after typing a character.
    pub typing_ms: u64,
    /// Delay after deleting a character.
    pub deleting_ms: u64,
    /// Pause at full text.
    pub pause_after_complete_ms: u64,
    /// Pause at empty text.
    pub pause_after_delete_ms: u64,
}

/// Background media used by the preview.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MediaConfig {
    /// Page whose carousel is paused by its overlay.
    pub carousel_page: usize,
    /// Number of clips in the carousel.
    pub carousel_clips: usize,
    /// Time each clip stays on screen.
    pub carousel_interval_ms: u64,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            carousel_page: 2,
            carousel_clips: 4,
            carousel_interval_ms: 4000,
        }
    }
}

/// Every tunable of the engine, injectable at construction.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavConfig {
    /// Input scaling.
    pub gesture: GestureConfig,
    /// Headline fill.
    pub text_fill: TextFillConfig,
    /// Pages and timing.
    pub pages: PageConfig,
    /// Rubber-band stage.
    pub rubber: RubberConfig,
    /// Typewriters.
    pub typewriter: TypewriterConfig,
    /// Background media.
    pub media: MediaConfig,
}

impl NavConfig {
    /// Check cross-field constraints that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
            ConfigError::Invalid {
                field,
                reason: reason.into(),
            }
        }

        if self.pages.count == 0 {
            return Err(invalid("pages.count", "at least one page is required"));
        }
        if !(self.pages.height_px.is_finite() && self.pages.height_px > 0.0) {
            return Err(invalid("pages.height_px", "must be a positive number"));
        }
        if !(self.pages.switch_threshold > 0.0) {
            return Err(invalid("pages.switch_threshold", "must be positive"));
        }
        for binding in &self.pages.overlays {
            if binding.page >= self.pages.count {
                return Err(invalid(
                    "pages.overlays",
                    format!("{} overlay bound to missing page {}", binding.kind, binding.page),
                ));
            }
        }
        for (i, a) in self.pages.overlays.iter().enumerate() {
            if self.pages.overlays[..i].iter().any(|b| b.kind == a.kind || b.page == a.page) {
                return Err(invalid(
                    "pages.overlays",
                    format!("{} overlay or page {} bound twice", a.kind, a.page),
                ));
            }
        }

        crate::state::text_fill::LineRanges::new(&self.text_fill.line_ranges)?;
        for (field, value) in [
            ("text_fill.sensitivity", self.text_fill.sensitivity),
            ("text_fill.min_delta", self.text_fill.min_delta),
            ("gesture.fling_distance", self.gesture.fling_distance),
            ("gesture.fling_velocity", self.gesture.fling_velocity),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(field, "must be a positive number"));
            }
        }

        for (field, value) in [
            ("gesture.wheel_multiplier", self.gesture.wheel_multiplier),
            ("gesture.touch_multiplier", self.gesture.touch_multiplier),
        ] {
            if !value.is_finite() {
                return Err(invalid(field, "must be finite"));
            }
        }
        if self.gesture.touch_dead_zone < 0.0 {
            return Err(invalid("gesture.touch_dead_zone", "must not be negative"));
        }

        let rubber = &self.rubber;
        if rubber.enabled {
            if rubber.page >= self.pages.count {
                return Err(invalid("rubber.page", "page does not exist"));
            }
            if self.pages.overlays.iter().any(|b| b.page == rubber.page) {
                return Err(invalid("rubber.page", "page already hosts a detail overlay"));
            }
        }
        for (field, value) in [
            ("rubber.inner_max", rubber.inner_max),
            ("rubber.reveal_max", rubber.reveal_max),
            ("rubber.overscroll_max", rubber.overscroll_max),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(invalid(field, "must be a non-negative number"));
            }
        }
        for (field, value) in [
            ("rubber.step_scale", rubber.step_scale),
            ("rubber.overscroll_gain", rubber.overscroll_gain),
            ("rubber.unwind_gain", rubber.unwind_gain),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(field, "must be a positive number"));
            }
        }
        if rubber.damping_threshold == 0 {
            return Err(invalid("rubber.damping_threshold", "must be at least 1"));
        }
        if !(rubber.decay_fraction > 0.0 && rubber.decay_fraction < 1.0) {
            return Err(invalid("rubber.decay_fraction", "must lie strictly between 0 and 1"));
        }
        if rubber.frame_ms == 0 {
            return Err(invalid("rubber.frame_ms", "must be at least 1"));
        }
        if !(rubber.settle_epsilon > 0.0) {
            return Err(invalid("rubber.settle_epsilon", "must be positive"));
        }

        if self.media.carousel_clips == 0 {
            return Err(invalid("media.carousel_clips", "must be at least 1"));
        }
        if self.media.carousel_interval_ms == 0 {
            return Err(invalid("media.carousel_interval_ms", "must be at least 1"));
        }

        Ok(())
    }

    /// Parent page of an overlay kind, if bound.
    pub fn overlay_page(&self, kind: DetailKind) -> Option<usize> {
        self.pages
            .overlays
            .iter()
            .find(|b| b.kind == kind)
            .map(|b| b.page)
    }

    /// Overlay kind bound to `page`, if any.
    pub fn overlay_for_page(&self, page: usize) -> Option<DetailKind> {
        self.pages
            .overlays
            .iter()
            .find(|b| b.page == page)
            .map(|b| b.kind)
    }

    /// Page owning the rubber stage when enabled.
    pub fn rubber_page(&self) -> Option<usize> {
        self.rubber.enabled.then_some(self.rubber.page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(NavConfig::default().validate(), Ok(()));
    }

    #[test]
    fn default_overlays_sit_on_first_three_pages() {
        let config = NavConfig::default();
        assert_eq!(config.overlay_page(DetailKind::Apple), Some(0));
        assert_eq!(config.overlay_for_page(1), Some(DetailKind::AiCoding));
        assert_eq!(config.overlay_for_page(3), None);
        assert_eq!(config.rubber_page(), Some(3));
    }

    #[test]
    fn zero_pages_is_rejected() {
        let mut config = NavConfig::default();
        config.pages.count = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "pages.count", .. })
        ));
    }

    #[test]
    fn rubber_page_outside_range_is_rejected() {
        let mut config = NavConfig::default();
        config.rubber.page = 7;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "rubber.page", .. })
        ));
    }

    #[test]
    fn rubber_gains_must_be_positive() {
        for (field, value) in [
            ("rubber.step_scale", -0.5),
            ("rubber.step_scale", f64::NAN),
            ("rubber.overscroll_gain", 0.0),
            ("rubber.unwind_gain", f64::INFINITY),
        ] {
            let mut config = NavConfig::default();
            match field {
                "rubber.step_scale" => config.rubber.step_scale = value,
                "rubber.overscroll_gain" => config.rubber.overscroll_gain = value,
                _ => config.rubber.unwind_gain = value,
            }
            assert_eq!(
                config.validate(),
                Err(ConfigError::Invalid {
                    field,
                    reason: "must be a positive number".to_string(),
                }),
                "{field} = {value}"
            );
        }
    }

    #[test]
    fn fling_and_hero_thresholds_must_be_positive() {
        let mut config = NavConfig::default();
        config.gesture.fling_distance = -1.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "gesture.fling_distance", .. })
        ));

        let mut config = NavConfig::default();
        config.gesture.fling_velocity = f64::NAN;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "gesture.fling_velocity", .. })
        ));

        let mut config = NavConfig::default();
        config.text_fill.min_delta = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "text_fill.min_delta", .. })
        ));
    }

    #[test]
    fn disabled_rubber_page_is_not_checked() {
        let mut config = NavConfig::default();
        config.rubber.enabled = false;
        config.rubber.page = 7;
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.rubber_page(), None);
    }

    #[test]
    fn decay_fraction_must_be_a_fraction() {
        let mut config = NavConfig::default();
        config.rubber.decay_fraction = 1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn gapped_line_ranges_are_rejected() {
        let mut config = NavConfig::default();
        config.text_fill.line_ranges = vec![[0.0, 40.0], [50.0, 100.0]];
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "text_fill.line_ranges", .. })
        ));
    }

    #[test]
    fn overlay_on_missing_page_is_rejected() {
        let mut config = NavConfig::default();
        config.pages.count = 2;
        config.rubber.enabled = false;
        assert!(config.validate().is_err());
    }

    #[test]
    fn overlay_bound_twice_is_rejected() {
        let mut config = NavConfig::default();
        config.pages.overlays.push(OverlayBinding {
            kind: DetailKind::Apple,
            page: 1,
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config: NavConfig = toml::from_str(
            r#"
[rubber]
damping_threshold = 5
"#,
        )
        .unwrap();
        assert_eq!(config.rubber.damping_threshold, 5);
        assert_eq!(config.rubber.inner_max, 459.0);
        assert_eq!(config.pages, PageConfig::default());
    }

    #[test]
    fn detail_typewriter_runs_faster_than_indicator() {
        let config = TypewriterConfig::default();
        let hero = config.cadence(TypewriterSlot::HeroIndicator);
        let detail = config.cadence(TypewriterSlot::DesignDetail);
        assert_eq!((hero.typing_ms, hero.deleting_ms), (150, 100));
        assert_eq!((detail.typing_ms, detail.deleting_ms), (100, 50));
        assert_eq!(detail.pause_after_complete_ms, 2000);
    }

    #[test]
    fn empty_carousel_is_rejected() {
        let mut config = NavConfig::default();
        config.media.carousel_clips = 0;
        assert!(config.validate().is_err());
    }
}
