//! Navigation state and transition outcomes.

use serde::Deserialize;
use std::fmt;

/// The three sections that carry a full-screen detail view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailKind {
    /// "Green Apple's Thousand and One Nights" feature page.
    Apple,
    /// AI coding showcase.
    AiCoding,
    /// Graphic design showcase with the video carousel.
    Design,
}

impl DetailKind {
    /// All kinds, in page order.
    pub const ALL: [DetailKind; 3] = [DetailKind::Apple, DetailKind::AiCoding, DetailKind::Design];

    /// Page the overlay is anchored to in the default layout.
    pub fn default_parent(self) -> usize {
        match self {
            DetailKind::Apple => 0,
            DetailKind::AiCoding => 1,
            DetailKind::Design => 2,
        }
    }
}

impl fmt::Display for DetailKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DetailKind::Apple => "apple",
            DetailKind::AiCoding => "ai-coding",
            DetailKind::Design => "design",
        };
        f.write_str(name)
    }
}

/// Snapshot of where the visitor currently is.
///
/// Exactly one variant is active at a time. Whether a transition animation is
/// still running is tracked separately (see `Navigator::is_transitioning`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NavigationState {
    /// Landing view; the headline fill is driven by scrolling.
    Hero {
        /// Total headline fill, 0..=100.
        fill_progress: f64,
    },
    /// One of the snapped content pages.
    ContentPage {
        /// Zero-based page index.
        index: usize,
    },
    /// A detail overlay opened from a content page.
    DetailOverlay {
        /// Page the overlay was opened from.
        parent_index: usize,
        /// Which overlay is open.
        kind: DetailKind,
    },
}

impl NavigationState {
    /// Page index for content pages and overlays, `None` in Hero.
    pub fn page_index(&self) -> Option<usize> {
        match *self {
            NavigationState::Hero { .. } => None,
            NavigationState::ContentPage { index } => Some(index),
            NavigationState::DetailOverlay { parent_index, .. } => Some(parent_index),
        }
    }

    /// True when in Hero.
    pub fn is_hero(&self) -> bool {
        matches!(self, NavigationState::Hero { .. })
    }
}

/// Why a navigation request did not change the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// A transition is still holding the animation lock.
    Transitioning,
    /// The page-switch cooldown has not elapsed.
    CoolingDown,
    /// Jump target outside `1..=page_count`.
    OutOfRange,
    /// A detail overlay owns the input.
    OverlayOpen,
    /// Nothing lies in that direction.
    AtBoundary,
    /// Hero input arrived faster than the throttle allows, or was too small.
    Throttled,
    /// The responsible component failed to initialize.
    Unavailable,
}

/// Result of feeding one input or control request to the navigator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NavOutcome {
    /// The state changed.
    Transitioned {
        /// State before the transition.
        from: NavigationState,
        /// State after the transition.
        to: NavigationState,
    },
    /// Input was consumed without a transition (fill progress, accumulation,
    /// rubber scrolling).
    Absorbed,
    /// Input was dropped.
    Rejected(Rejection),
}

impl NavOutcome {
    /// True for [`NavOutcome::Transitioned`].
    pub fn is_transition(&self) -> bool {
        matches!(self, NavOutcome::Transitioned { .. })
    }

    /// True for [`NavOutcome::Rejected`].
    pub fn is_rejected(&self) -> bool {
        matches!(self, NavOutcome::Rejected(_))
    }
}
