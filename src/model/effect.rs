//! Surface mutations requested by the engine.
//!
//! The engine never touches a document directly. It appends [`Effect`]s
//! which the host drains and applies; a DOM host maps them to class list and
//! inline style changes, the terminal preview folds them into its own model.

use super::language::Language;
use super::state::DetailKind;

/// Which typewriter a text effect belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypewriterSlot {
    /// "Scroll to explore" indicator under the hero headline.
    HeroIndicator,
    /// Prompt inside the design detail overlay.
    DesignDetail,
}

/// Addressable element on the host surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    /// Container that slides up over the hero.
    PageContainer,
    /// Inner strip translated by `-index × page_height`.
    PageStrip,
    /// All content sections.
    Sections,
    /// Back-to-hero control.
    BackControl,
    /// Headline line mask, zero-based.
    Headline(usize),
    /// Detail overlay root.
    Overlay(DetailKind),
    /// Scrollable list inside the rubber page.
    RubberInner,
    /// The rubber page itself.
    RubberPage,
    /// Typewriter text node.
    Typewriter(TypewriterSlot),
}

/// CSS classes the engine toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Class {
    /// `active`
    Active,
    /// `revealed`
    Revealed,
    /// `visible`
    Visible,
    /// `snap-enabled`
    SnapEnabled,
}

impl Class {
    /// Class name as written in the stylesheet.
    pub fn as_str(self) -> &'static str {
        match self {
            Class::Active => "active",
            Class::Revealed => "revealed",
            Class::Visible => "visible",
            Class::SnapEnabled => "snap-enabled",
        }
    }
}

/// Coarse-grained notifications other subsystems may observe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteEvent {
    /// Content pages finished sliding in (`contentRevealed`).
    ContentRevealed,
}

/// One requested surface mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Add a class.
    AddClass {
        /// Element.
        target: Target,
        /// Class.
        class: Class,
    },
    /// Remove a class.
    RemoveClass {
        /// Element.
        target: Target,
        /// Class.
        class: Class,
    },
    /// Set `transform: translateY(px)`.
    Transform {
        /// Element.
        target: Target,
        /// Offset in pixels.
        translate_y: f64,
        /// Suggested CSS transition length, if it differs from the stylesheet.
        transition_ms: Option<u32>,
    },
    /// Set a headline line mask to `percent` filled.
    HeadlineMask {
        /// Line index.
        line: usize,
        /// 0..=100.
        percent: f64,
    },
    /// Replace the text content of an element.
    SetText {
        /// Element.
        target: Target,
        /// New text.
        text: String,
    },
    /// Dispatch a custom event.
    Dispatch(SiteEvent),
    /// Language switched; bilingual text nodes should swap.
    LanguageChanged(Language),
}

impl Effect {
    /// Shorthand for [`Effect::AddClass`].
    pub fn add(target: Target, class: Class) -> Self {
        Effect::AddClass { target, class }
    }

    /// Shorthand for [`Effect::RemoveClass`].
    pub fn remove(target: Target, class: Class) -> Self {
        Effect::RemoveClass { target, class }
    }

    /// Shorthand for a transform without a transition hint.
    pub fn translate(target: Target, translate_y: f64) -> Self {
        Effect::Transform {
            target,
            translate_y,
            transition_ms: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_names_match_stylesheet() {
        assert_eq!(Class::Active.as_str(), "active");
        assert_eq!(Class::Revealed.as_str(), "revealed");
        assert_eq!(Class::Visible.as_str(), "visible");
        assert_eq!(Class::SnapEnabled.as_str(), "snap-enabled");
    }

    #[test]
    fn translate_has_no_transition_hint() {
        assert_eq!(
            Effect::translate(Target::PageStrip, -900.0),
            Effect::Transform {
                target: Target::PageStrip,
                translate_y: -900.0,
                transition_ms: None
            }
        );
    }
}
