//! Navigation engine state (pure).
//!
//! All transitions are synchronous functions of input, injected time and
//! the timer queue, so everything here is testable without a host.

pub mod detail_overlay;
pub mod navigation;
pub mod rubber_scroll;
pub mod site;
pub mod text_fill;
pub mod timers;
pub mod typewriter;

// Re-export for convenience
pub use detail_overlay::DetailOverlayController;
pub use navigation::{InputResponse, Navigator, ScrollAccumulator};
pub use rubber_scroll::{RubberOffsets, RubberScrollStage, RubberState, StageResponse};
pub use site::{Site, SiteBuilder};
pub use text_fill::{LineRanges, TextFillEngine};
pub use timers::{Generation, Outbox, Timer, TimerKind, TimerQueue};
pub use typewriter::Typewriter;
