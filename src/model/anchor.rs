//! Host anchors required by each component at startup.

use super::state::DetailKind;
use std::collections::HashSet;
use std::fmt;

/// An element the host must provide for a component to work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Anchor {
    /// `#pageContainer`
    PageContainer,
    /// `#pageInner`
    PageStrip,
    /// `#fill1`, `#fill2`, ...
    Headline(usize),
    /// Back-to-hero control.
    BackControl,
    /// Overlay root of a detail view.
    Overlay(DetailKind),
    /// Click region that opens the overlay.
    OverlayTrigger(DetailKind),
    /// Close control inside the overlay.
    OverlayClose(DetailKind),
    /// Scrollable list of the rubber page.
    RubberInner,
    /// The rubber page element.
    RubberPage,
    /// Hero scroll indicator text.
    IndicatorText,
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Anchor::PageContainer => f.write_str("page container"),
            Anchor::PageStrip => f.write_str("page strip"),
            Anchor::Headline(line) => write!(f, "headline line {}", line + 1),
            Anchor::BackControl => f.write_str("back control"),
            Anchor::Overlay(kind) => write!(f, "{kind} overlay"),
            Anchor::OverlayTrigger(kind) => write!(f, "{kind} overlay trigger"),
            Anchor::OverlayClose(kind) => write!(f, "{kind} overlay close control"),
            Anchor::RubberInner => f.write_str("rubber inner list"),
            Anchor::RubberPage => f.write_str("rubber page"),
            Anchor::IndicatorText => f.write_str("scroll indicator text"),
        }
    }
}

/// Components that initialize independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    /// Page navigation.
    Navigator,
    /// Headline fill rendering.
    Headline,
    /// Rubber-band scroll stage.
    RubberStage,
    /// One detail overlay.
    DetailOverlay(DetailKind),
    /// Hero indicator typewriter.
    Indicator,
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Component::Navigator => f.write_str("navigator"),
            Component::Headline => f.write_str("headline"),
            Component::RubberStage => f.write_str("rubber stage"),
            Component::DetailOverlay(kind) => write!(f, "{kind} detail overlay"),
            Component::Indicator => f.write_str("scroll indicator"),
        }
    }
}

/// Answers whether the host surface has an anchor.
pub trait AnchorSet {
    /// True when `anchor` exists.
    fn contains(&self, anchor: Anchor) -> bool;
}

/// A surface that has every anchor. Used by tests and the terminal preview.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllAnchors;

impl AnchorSet for AllAnchors {
    fn contains(&self, _anchor: Anchor) -> bool {
        true
    }
}

impl AnchorSet for HashSet<Anchor> {
    fn contains(&self, anchor: Anchor) -> bool {
        HashSet::contains(self, &anchor)
    }
}

/// Every anchor except the listed ones.
#[derive(Debug, Clone, Default)]
pub struct MissingAnchors(pub HashSet<Anchor>);

impl AnchorSet for MissingAnchors {
    fn contains(&self, anchor: Anchor) -> bool {
        !self.0.contains(&anchor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_anchors_inverts_membership() {
        let missing = MissingAnchors([Anchor::RubberPage].into_iter().collect());
        assert!(!missing.contains(Anchor::RubberPage));
        assert!(missing.contains(Anchor::PageStrip));
    }

    #[test]
    fn display_names_are_human_readable() {
        assert_eq!(Anchor::Headline(0).to_string(), "headline line 1");
        assert_eq!(
            Component::DetailOverlay(DetailKind::AiCoding).to_string(),
            "ai-coding detail overlay"
        );
    }
}
