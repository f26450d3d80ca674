//! Domain model types (pure).
//!
//! Plain data shared by the engine, the configuration layer and the preview.

pub mod anchor;
pub mod effect;
pub mod error;
pub mod input;
pub mod key_action;
pub mod language;
pub mod state;

// Re-export for convenience
pub use anchor::{AllAnchors, Anchor, AnchorSet, Component, MissingAnchors};
pub use effect::{Class, Effect, SiteEvent, Target, TypewriterSlot};
pub use error::{AppError, InitError};
pub use input::{
    Classified, FlingEvent, GestureEvent, GestureSource, Key, NavIntent, RawInput,
};
pub use key_action::KeyAction;
pub use language::{Bilingual, Language, LanguageStore, UnknownLanguage};
pub use state::{DetailKind, NavOutcome, NavigationState, Rejection};
