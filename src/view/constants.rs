//! Layout and timing constants for the terminal preview.

use std::time::Duration;

/// Wheel `deltaY` sent for one mouse wheel notch.
///
/// Browsers report roughly 100 px per notch in pixel delta mode.
pub const WHEEL_NOTCH_PX: f64 = 100.0;

/// Longest sleep between two frames.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Height of the header line.
pub const HEADER_HEIGHT: u16 = 1;

/// Height of the status bar in lines.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Width percentage of the detail overlay popup.
pub const OVERLAY_POPUP_WIDTH_PERCENT: u16 = 70;

/// Height percentage of the detail overlay popup.
pub const OVERLAY_POPUP_HEIGHT_PERCENT: u16 = 60;
