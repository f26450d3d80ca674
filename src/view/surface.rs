//! The preview's stand-in for the host document.
//!
//! Folds drained [`Effect`]s into plain state the renderer reads, the same
//! way a DOM host would apply them to class lists and inline styles.

use crate::model::{Class, Effect, Language, SiteEvent, Target};
use std::collections::{HashMap, HashSet};

/// Applied effects.
#[derive(Debug, Clone, Default)]
pub struct Surface {
    classes: HashSet<(Target, Class)>,
    transforms: HashMap<Target, f64>,
    transitions: HashMap<Target, u32>,
    masks: Vec<f64>,
    texts: HashMap<Target, String>,
    language: Language,
    revealed_events: usize,
}

impl Surface {
    /// Empty surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one effect.
    pub fn apply(&mut self, effect: &Effect) {
        match effect {
            Effect::AddClass { target, class } => {
                self.classes.insert((*target, *class));
            }
            Effect::RemoveClass { target, class } => {
                self.classes.remove(&(*target, *class));
            }
            Effect::Transform {
                target,
                translate_y,
                transition_ms,
            } => {
                self.transforms.insert(*target, *translate_y);
                match transition_ms {
                    Some(ms) => self.transitions.insert(*target, *ms),
                    None => self.transitions.remove(target),
                };
            }
            Effect::HeadlineMask { line, percent } => {
                if self.masks.len() <= *line {
                    self.masks.resize(line + 1, 0.0);
                }
                self.masks[*line] = *percent;
            }
            Effect::SetText { target, text } => {
                self.texts.insert(*target, text.clone());
            }
            Effect::Dispatch(SiteEvent::ContentRevealed) => self.revealed_events += 1,
            Effect::LanguageChanged(lang) => self.language = *lang,
        }
    }

    /// Apply every effect in order.
    pub fn apply_all<'a>(&mut self, effects: impl IntoIterator<Item = &'a Effect>) {
        for effect in effects {
            self.apply(effect);
        }
    }

    /// True when `target` carries `class`.
    pub fn has_class(&self, target: Target, class: Class) -> bool {
        self.classes.contains(&(target, class))
    }

    /// Last `translateY` set on `target`, 0 when never set.
    pub fn translate(&self, target: Target) -> f64 {
        self.transforms.get(&target).copied().unwrap_or(0.0)
    }

    /// Transition hint of the last transform on `target`.
    pub fn transition_ms(&self, target: Target) -> Option<u32> {
        self.transitions.get(&target).copied()
    }

    /// Mask of headline `line`, 0 when never set.
    pub fn mask(&self, line: usize) -> f64 {
        self.masks.get(line).copied().unwrap_or(0.0)
    }

    /// Text of `target`, empty when never set.
    pub fn text(&self, target: Target) -> &str {
        self.texts.get(&target).map_or("", String::as_str)
    }

    /// Language of bilingual text nodes.
    pub fn language(&self) -> Language {
        self.language
    }

    /// Number of `contentRevealed` events seen.
    pub fn revealed_events(&self) -> usize {
        self.revealed_events
    }
}
