//! Raw host input and the normalized events derived from it.

/// Keys the navigator reacts to, parsed from DOM `KeyboardEvent.key` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// `1`..`9`.
    Digit(u8),
    /// `ArrowUp`.
    ArrowUp,
    /// `ArrowDown`.
    ArrowDown,
    /// `Escape`.
    Escape,
    /// Anything else.
    Other,
}

impl Key {
    /// Parse a DOM key string.
    pub fn from_dom(key: &str) -> Key {
        match key {
            "ArrowUp" => Key::ArrowUp,
            "ArrowDown" => Key::ArrowDown,
            "Escape" | "Esc" => Key::Escape,
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c @ '1'..='9'), None) => Key::Digit(c as u8 - b'0'),
                    _ => Key::Other,
                }
            }
        }
    }
}

/// One raw input as delivered by the host. Timestamps are milliseconds on a
/// monotonic clock shared with [`crate::state::Site::tick`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawInput {
    /// Mouse wheel or trackpad scroll. Positive `delta_y` scrolls forward.
    Wheel {
        /// Vertical delta as reported by the device.
        delta_y: f64,
        /// Event time.
        timestamp_ms: u64,
    },
    /// Finger down.
    TouchStart {
        /// Client Y coordinate.
        y: f64,
        /// Event time.
        timestamp_ms: u64,
    },
    /// Finger moved.
    TouchMove {
        /// Client Y coordinate.
        y: f64,
        /// Event time.
        timestamp_ms: u64,
    },
    /// Finger lifted.
    TouchEnd {
        /// Client Y coordinate at release.
        y: f64,
        /// Event time.
        timestamp_ms: u64,
    },
    /// Touch interrupted by the platform (`touchcancel`).
    TouchCancel {
        /// Event time.
        timestamp_ms: u64,
    },
    /// Key pressed.
    Key {
        /// Parsed key.
        key: Key,
        /// Event time.
        timestamp_ms: u64,
    },
}

impl RawInput {
    /// Event time of any variant.
    pub fn timestamp_ms(&self) -> u64 {
        match *self {
            RawInput::Wheel { timestamp_ms, .. }
            | RawInput::TouchStart { timestamp_ms, .. }
            | RawInput::TouchMove { timestamp_ms, .. }
            | RawInput::TouchEnd { timestamp_ms, .. }
            | RawInput::TouchCancel { timestamp_ms }
            | RawInput::Key { timestamp_ms, .. } => timestamp_ms,
        }
    }
}

/// Device that produced a [`GestureEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureSource {
    /// Wheel or trackpad.
    Wheel,
    /// Touch move.
    Touch,
}

/// A vertical scroll gesture with device scaling applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureEvent {
    /// Signed, scaled magnitude. Positive is forward (towards later pages).
    pub magnitude: f64,
    /// Producing device.
    pub source: GestureSource,
    /// Event time.
    pub timestamp_ms: u64,
}

impl GestureEvent {
    /// Convenience constructor for wheel gestures.
    pub fn wheel(magnitude: f64, timestamp_ms: u64) -> Self {
        Self {
            magnitude,
            source: GestureSource::Wheel,
            timestamp_ms,
        }
    }

    /// True when the gesture points towards later pages.
    pub fn is_forward(&self) -> bool {
        self.magnitude > 0.0
    }
}

/// End of a touch gesture, used for fling detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlingEvent {
    /// Total displacement since touch start (start − end), positive forward.
    pub displacement: f64,
    /// `|displacement|` per millisecond.
    pub velocity: f64,
    /// Release time.
    pub timestamp_ms: u64,
}

/// Discrete keyboard intents that bypass gesture magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavIntent {
    /// Next page (`ArrowDown`).
    Next,
    /// Previous page or Hero (`ArrowUp`).
    Previous,
    /// Jump to page `n`, 1-based.
    Jump(usize),
    /// Back to Hero.
    Escape,
}

/// What [`crate::gesture::GestureInput::classify`] produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Classified {
    /// Continuous scroll.
    Gesture(GestureEvent),
    /// Touch release.
    Fling(FlingEvent),
    /// Keyboard intent.
    Intent(NavIntent),
}
