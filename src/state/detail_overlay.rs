//! Visibility of one section's detail overlay.

use super::timers::{Outbox, Timer};
use super::typewriter::Typewriter;
use crate::model::{Class, DetailKind, Effect, Language, Target};

/// Detail overlay of one section.
///
/// Only tracks visibility and its own typewriter; the navigator decides
/// whether opening is allowed.
#[derive(Debug, Clone)]
pub struct DetailOverlayController {
    kind: DetailKind,
    parent_index: usize,
    open: bool,
    typewriter: Option<Typewriter>,
}

impl DetailOverlayController {
    /// Closed overlay anchored to `parent_index`.
    pub fn new(kind: DetailKind, parent_index: usize) -> Self {
        Self {
            kind,
            parent_index,
            open: false,
            typewriter: None,
        }
    }

    /// Attach a typewriter that runs while the overlay is open.
    pub fn with_typewriter(mut self, typewriter: Typewriter) -> Self {
        self.typewriter = Some(typewriter);
        self
    }

    /// Which overlay this is.
    pub fn kind(&self) -> DetailKind {
        self.kind
    }

    /// Page the overlay belongs to.
    pub fn parent_index(&self) -> usize {
        self.parent_index
    }

    /// True while visible.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// The overlay's typewriter, if it has one.
    pub fn typewriter(&self) -> Option<&Typewriter> {
        self.typewriter.as_ref()
    }

    /// Show the overlay. Returns whether visibility changed.
    pub fn open(&mut self, lang: Language, out: &mut Outbox<'_>) -> bool {
        if self.open {
            return false;
        }
        self.open = true;
        out.push(Effect::add(Target::Overlay(self.kind), Class::Active));
        if let Some(tw) = self.typewriter.as_mut() {
            tw.start(lang, out);
        }
        true
    }

    /// Hide the overlay. Returns whether visibility changed.
    pub fn close(&mut self, out: &mut Outbox<'_>) -> bool {
        if !self.open {
            return false;
        }
        self.open = false;
        out.push(Effect::remove(Target::Overlay(self.kind), Class::Active));
        if let Some(tw) = self.typewriter.as_mut() {
            tw.stop(out);
        }
        true
    }

    /// Restart the typewriter in a new language if it is running.
    pub fn restart_typewriter(&mut self, lang: Language, out: &mut Outbox<'_>) {
        if let Some(tw) = self.typewriter.as_mut().filter(|tw| tw.is_running()) {
            tw.start(lang, out);
        }
    }

    /// Forward a typewriter step timer.
    pub fn on_timer(&mut self, timer: &Timer, lang: Language, out: &mut Outbox<'_>) {
        if let Some(tw) = self.typewriter.as_mut() {
            tw.on_timer(timer, lang, out);
        }
    }
}
