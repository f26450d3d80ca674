//! folio
//!
//! Page-navigation and scroll-gesture engine for an animated portfolio
//! site: a hero headline filled by scrolling, snapped content pages driven
//! by wheel, touch and keyboard, per-section detail overlays, a three-stage
//! rubber-band scroll and a bilingual text layer.
//!
//! The engine ([`state::Site`]) is pure: hosts feed it timestamped input
//! and `tick(now)` calls and apply the [`model::Effect`]s it emits. The
//! [`view`] module is a terminal host used by the `folio` binary.

pub mod config;
pub mod content;
pub mod gesture;
pub mod logging;
pub mod media;
pub mod model;
pub mod state;
pub mod view;
