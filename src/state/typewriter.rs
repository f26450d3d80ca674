//! Typing/deleting text loop.
//!
//! Types the current-language text one character at a time, holds the full
//! text, deletes it, holds the empty text and starts over. The language is
//! read at every step, so a toggle takes effect on the next character even
//! before the owner restarts the loop.

use super::timers::{Generation, Outbox, Timer, TimerKind};
use crate::config::Cadence;
use crate::model::{Bilingual, Effect, Language, Target, TypewriterSlot};

/// A looping typewriter bound to one text node.
#[derive(Debug, Clone)]
pub struct Typewriter {
    slot: TypewriterSlot,
    cadence: Cadence,
    text: Bilingual,
    char_index: usize,
    deleting: bool,
    running: bool,
    generation: Generation,
    displayed: String,
}

impl Typewriter {
    /// Idle typewriter for `slot` showing nothing.
    pub fn new(slot: TypewriterSlot, text: Bilingual, cadence: Cadence) -> Self {
        Self {
            slot,
            cadence,
            text,
            char_index: 0,
            deleting: false,
            running: false,
            generation: Generation::default(),
            displayed: String::new(),
        }
    }

    /// Which text node this typewriter drives.
    pub fn slot(&self) -> TypewriterSlot {
        self.slot
    }

    /// True between `start` and `stop`.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// True while characters are being removed.
    pub fn is_deleting(&self) -> bool {
        self.deleting
    }

    /// Text currently shown.
    pub fn displayed(&self) -> &str {
        &self.displayed
    }

    /// Start from an empty text. The first character appears immediately.
    /// Restarting a running typewriter drops its pending step.
    pub fn start(&mut self, lang: Language, out: &mut Outbox<'_>) {
        self.generation.bump();
        self.running = true;
        self.char_index = 0;
        self.deleting = false;
        self.step(lang, out);
    }

    /// Stop and clear the text.
    pub fn stop(&mut self, out: &mut Outbox<'_>) {
        if !self.running && self.displayed.is_empty() {
            return;
        }
        self.generation.bump();
        self.running = false;
        self.char_index = 0;
        self.deleting = false;
        self.displayed.clear();
        out.push(self.text_effect());
    }

    /// Advance on a step timer. Timers of other slots or older generations
    /// are ignored.
    pub fn on_timer(&mut self, timer: &Timer, lang: Language, out: &mut Outbox<'_>) {
        if timer.kind != TimerKind::TypewriterStep(self.slot) {
            return;
        }
        if !self.running || timer.generation != self.generation {
            tracing::trace!(slot = ?self.slot, "stale typewriter step ignored");
            return;
        }
        self.step(lang, out);
    }

    fn step(&mut self, lang: Language, out: &mut Outbox<'_>) {
        let full = self.text.get(lang);
        let len = full.chars().count();

        if self.deleting {
            self.char_index = self.char_index.saturating_sub(1);
        } else {
            self.char_index = (self.char_index + 1).min(len);
        }
        self.displayed = full.chars().take(self.char_index).collect();
        out.push(self.text_effect());

        let delay = if !self.deleting && self.char_index == len {
            self.deleting = true;
            self.cadence.pause_after_complete_ms
        } else if self.deleting && self.char_index == 0 {
            self.deleting = false;
            self.cadence.pause_after_delete_ms
        } else if self.deleting {
            self.cadence.deleting_ms
        } else {
            self.cadence.typing_ms
        };
        out.schedule_in(delay, TimerKind::TypewriterStep(self.slot), self.generation);
    }

    fn text_effect(&self) -> Effect {
        Effect::SetText {
            target: Target::Typewriter(self.slot),
            text: self.displayed.clone(),
        }
    }
}
