//! Input normalization.
//!
//! Turns raw wheel, touch and keyboard input into device-independent
//! [`GestureEvent`]s, [`FlingEvent`]s and [`NavIntent`]s. The only state kept
//! is the active touch track.

use crate::config::GestureConfig;
use crate::model::{
    Classified, FlingEvent, GestureEvent, GestureSource, Key, NavIntent, RawInput,
};

/// Finger currently on the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
struct TouchTrack {
    /// Y of the last emitted move (or the start).
    anchor_y: f64,
    /// Y at touch start.
    origin_y: f64,
    /// Time of touch start.
    started_at: u64,
}

/// Classifies raw input.
#[derive(Debug, Clone)]
pub struct GestureInput {
    config: GestureConfig,
    touch: Option<TouchTrack>,
}

impl GestureInput {
    /// Classifier with the given scaling.
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            touch: None,
        }
    }

    /// True while a finger is down.
    pub fn is_touching(&self) -> bool {
        self.touch.is_some()
    }

    /// Forget the active touch track. A later move or end is ignored.
    pub fn cancel_touch(&mut self) {
        self.touch = None;
    }

    /// Classify one raw input. `None` means the input carries nothing the
    /// navigator acts on.
    pub fn classify(&mut self, raw: &RawInput) -> Option<Classified> {
        match *raw {
            RawInput::Wheel {
                delta_y,
                timestamp_ms,
            } => {
                let magnitude = delta_y * self.config.wheel_multiplier;
                (magnitude != 0.0 && magnitude.is_finite()).then_some(Classified::Gesture(
                    GestureEvent {
                        magnitude,
                        source: GestureSource::Wheel,
                        timestamp_ms,
                    },
                ))
            }
            RawInput::TouchStart { y, timestamp_ms } => {
                if y.is_finite() {
                    self.touch = Some(TouchTrack {
                        anchor_y: y,
                        origin_y: y,
                        started_at: timestamp_ms,
                    });
                }
                None
            }
            RawInput::TouchMove { y, timestamp_ms } => {
                let track = self.touch.as_mut()?;
                let travel = track.anchor_y - y;
                if !travel.is_finite() || travel.abs() < self.config.touch_dead_zone {
                    return None;
                }
                track.anchor_y = y;
                let magnitude = travel * self.config.touch_multiplier;
                (magnitude != 0.0).then_some(Classified::Gesture(GestureEvent {
                    magnitude,
                    source: GestureSource::Touch,
                    timestamp_ms,
                }))
            }
            RawInput::TouchEnd { y, timestamp_ms } => {
                let track = self.touch.take()?;
                let displacement = track.origin_y - y;
                if !displacement.is_finite() {
                    return None;
                }
                let duration = timestamp_ms.saturating_sub(track.started_at).max(1);
                Some(Classified::Fling(FlingEvent {
                    displacement,
                    velocity: displacement.abs() / duration as f64,
                    timestamp_ms,
                }))
            }
            RawInput::TouchCancel { .. } => {
                self.cancel_touch();
                None
            }
            RawInput::Key { key, .. } => intent_for_key(key).map(Classified::Intent),
        }
    }

    /// True when a release is strong enough to count as a fling.
    pub fn is_fling(&self, fling: &FlingEvent) -> bool {
        is_fling(&self.config, fling)
    }
}

/// Fling test: far enough or fast enough.
pub fn is_fling(config: &GestureConfig, fling: &FlingEvent) -> bool {
    fling.displacement.abs() > config.fling_distance || fling.velocity > config.fling_velocity
}

/// Keyboard mapping: digits jump, arrows step, Escape leaves.
pub fn intent_for_key(key: Key) -> Option<NavIntent> {
    match key {
        Key::Digit(n @ 1..=9) => Some(NavIntent::Jump(usize::from(n))),
        Key::ArrowDown => Some(NavIntent::Next),
        Key::ArrowUp => Some(NavIntent::Previous),
        Key::Escape => Some(NavIntent::Escape),
        Key::Digit(_) | Key::Other => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> GestureInput {
        GestureInput::new(GestureConfig::default())
    }

    fn gesture(c: Option<Classified>) -> GestureEvent {
        match c {
            Some(Classified::Gesture(g)) => g,
            other => panic!("expected gesture, got {other:?}"),
        }
    }

    #[test]
    fn wheel_is_scaled_by_multiplier() {
        let mut gi = GestureInput::new(GestureConfig {
            wheel_multiplier: 2.0,
            ..GestureConfig::default()
        });
        let g = gesture(gi.classify(&RawInput::Wheel {
            delta_y: 30.0,
            timestamp_ms: 5,
        }));
        assert_eq!(g.magnitude, 60.0);
        assert_eq!(g.source, GestureSource::Wheel);
        assert_eq!(g.timestamp_ms, 5);
    }

    #[test]
    fn zero_wheel_delta_produces_nothing() {
        assert_eq!(
            input().classify(&RawInput::Wheel {
                delta_y: 0.0,
                timestamp_ms: 0
            }),
            None
        );
    }

    #[test]
    fn touch_move_inside_dead_zone_is_ignored() {
        let mut gi = input();
        gi.classify(&RawInput::TouchStart {
            y: 500.0,
            timestamp_ms: 0,
        });
        assert_eq!(
            gi.classify(&RawInput::TouchMove {
                y: 498.0,
                timestamp_ms: 10
            }),
            None
        );
    }

    #[test]
    fn touch_move_up_is_forward_and_moves_anchor() {
        let mut gi = input();
        gi.classify(&RawInput::TouchStart {
            y: 500.0,
            timestamp_ms: 0,
        });
        let first = gesture(gi.classify(&RawInput::TouchMove {
            y: 480.0,
            timestamp_ms: 10,
        }));
        assert_eq!(first.magnitude, 40.0);
        assert_eq!(first.source, GestureSource::Touch);

        let second = gesture(gi.classify(&RawInput::TouchMove {
            y: 490.0,
            timestamp_ms: 20,
        }));
        assert_eq!(second.magnitude, -20.0);
    }

    #[test]
    fn touch_end_reports_total_displacement_and_velocity() {
        let mut gi = input();
        gi.classify(&RawInput::TouchStart {
            y: 500.0,
            timestamp_ms: 100,
        });
        gi.classify(&RawInput::TouchMove {
            y: 450.0,
            timestamp_ms: 150,
        });
        let fling = match gi.classify(&RawInput::TouchEnd {
            y: 400.0,
            timestamp_ms: 300,
        }) {
            Some(Classified::Fling(f)) => f,
            other => panic!("expected fling, got {other:?}"),
        };
        assert_eq!(fling.displacement, 100.0);
        assert_eq!(fling.velocity, 0.5);
        assert!(gi.is_fling(&fling));
        assert!(!gi.is_touching());
    }

    #[test]
    fn instantaneous_release_uses_one_millisecond() {
        let mut gi = input();
        gi.classify(&RawInput::TouchStart {
            y: 10.0,
            timestamp_ms: 50,
        });
        match gi.classify(&RawInput::TouchEnd {
            y: 0.0,
            timestamp_ms: 50,
        }) {
            Some(Classified::Fling(f)) => assert_eq!(f.velocity, 10.0),
            other => panic!("expected fling, got {other:?}"),
        }
    }

    #[test]
    fn slow_short_release_is_not_a_fling() {
        let gi = input();
        let fling = FlingEvent {
            displacement: -30.0,
            velocity: 0.1,
            timestamp_ms: 0,
        };
        assert!(!gi.is_fling(&fling));
    }

    #[test]
    fn move_or_end_without_start_is_ignored() {
        let mut gi = input();
        assert_eq!(
            gi.classify(&RawInput::TouchMove {
                y: 0.0,
                timestamp_ms: 0
            }),
            None
        );
        assert_eq!(
            gi.classify(&RawInput::TouchEnd {
                y: 0.0,
                timestamp_ms: 0
            }),
            None
        );
    }

    #[test]
    fn cancel_drops_the_touch_track() {
        let mut gi = input();
        gi.classify(&RawInput::TouchStart {
            y: 500.0,
            timestamp_ms: 0,
        });
        assert!(gi.is_touching());
        assert_eq!(gi.classify(&RawInput::TouchCancel { timestamp_ms: 10 }), None);
        assert!(!gi.is_touching());
        assert_eq!(
            gi.classify(&RawInput::TouchEnd {
                y: 100.0,
                timestamp_ms: 20
            }),
            None
        );
    }

    #[test]
    fn keys_map_to_intents() {
        assert_eq!(intent_for_key(Key::Digit(2)), Some(NavIntent::Jump(2)));
        assert_eq!(intent_for_key(Key::ArrowDown), Some(NavIntent::Next));
        assert_eq!(intent_for_key(Key::ArrowUp), Some(NavIntent::Previous));
        assert_eq!(intent_for_key(Key::Escape), Some(NavIntent::Escape));
        assert_eq!(intent_for_key(Key::Other), None);
        assert_eq!(intent_for_key(Key::Digit(0)), None);
    }
}
