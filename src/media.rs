//! Background media collaborators.
//!
//! The navigator pauses a page's background media while that page's detail
//! overlay is open and resumes it on close. What "media" means is up to the
//! host; [`Carousel`] is the rotating clip carousel of the design page.

use crate::config::MediaConfig;
use std::fmt;

/// What a page's background media is doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaStatus {
    /// Playing; `clip` is the visible clip when the media has several.
    Playing {
        /// Visible clip, zero-based.
        clip: Option<usize>,
    },
    /// Paused by an open overlay.
    Paused,
}

/// Host media the site pauses and resumes.
pub trait MediaControl: fmt::Debug {
    /// Pause the background media of `page`.
    fn pause_background_media(&mut self, page: usize, now: u64);

    /// Resume the background media of `page`.
    fn resume_background_media(&mut self, page: usize, now: u64);

    /// Advance time-driven media.
    fn tick(&mut self, _now: u64) {}

    /// Status of `page`'s media.
    fn status(&self, _page: usize) -> MediaStatus {
        MediaStatus::Playing { clip: None }
    }
}

/// Media that ignores every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMedia;

impl MediaControl for NoopMedia {
    fn pause_background_media(&mut self, _page: usize, _now: u64) {}

    fn resume_background_media(&mut self, _page: usize, _now: u64) {}
}

/// Clip carousel on one page: shows each clip for `interval_ms`, wrapping.
#[derive(Debug, Clone)]
pub struct Carousel {
    page: usize,
    count: usize,
    interval_ms: u64,
    current: usize,
    next_switch_at: Option<u64>,
}

impl Carousel {
    /// Running carousel showing the first clip from `now`.
    pub fn new(config: &MediaConfig, now: u64) -> Self {
        Self {
            page: config.carousel_page,
            count: config.carousel_clips.max(1),
            interval_ms: config.carousel_interval_ms.max(1),
            current: 0,
            next_switch_at: Some(now.saturating_add(config.carousel_interval_ms.max(1))),
        }
    }

    /// Visible clip.
    pub fn current(&self) -> usize {
        self.current
    }

    /// True unless paused.
    pub fn is_running(&self) -> bool {
        self.next_switch_at.is_some()
    }

    fn advance(&mut self) {
        self.current = (self.current + 1) % self.count;
        tracing::trace!(clip = self.current, count = self.count, "carousel advanced");
    }
}

impl MediaControl for Carousel {
    fn pause_background_media(&mut self, page: usize, _now: u64) {
        if page == self.page && self.next_switch_at.take().is_some() {
            tracing::debug!(page, "carousel stopped");
        }
    }

    fn resume_background_media(&mut self, page: usize, now: u64) {
        if page == self.page {
            self.next_switch_at = Some(now.saturating_add(self.interval_ms));
            tracing::debug!(page, "carousel restarted");
        }
    }

    fn tick(&mut self, now: u64) {
        while let Some(due) = self.next_switch_at.filter(|due| *due <= now) {
            self.advance();
            self.next_switch_at = Some(due + self.interval_ms);
        }
    }

    fn status(&self, page: usize) -> MediaStatus {
        if page != self.page {
            MediaStatus::Playing { clip: None }
        } else if self.is_running() {
            MediaStatus::Playing {
                clip: Some(self.current),
            }
        } else {
            MediaStatus::Paused
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn carousel() -> Carousel {
        Carousel::new(&MediaConfig::default(), 0)
    }

    #[test]
    fn advances_every_interval_and_wraps() {
        let mut c = carousel();
        c.tick(3_999);
        assert_eq!(c.current(), 0);
        c.tick(4_000);
        assert_eq!(c.current(), 1);
        c.tick(16_000);
        assert_eq!(c.current(), 0, "four clips wrap back to the first");
    }

    #[test]
    fn pause_stops_and_resume_restarts_interval() {
        let mut c = carousel();
        c.pause_background_media(2, 1_000);
        assert_eq!(c.status(2), MediaStatus::Paused);
        c.tick(20_000);
        assert_eq!(c.current(), 0);

        c.resume_background_media(2, 20_000);
        c.tick(23_999);
        assert_eq!(c.current(), 0);
        c.tick(24_000);
        assert_eq!(c.status(2), MediaStatus::Playing { clip: Some(1) });
    }

    #[test]
    fn other_pages_are_ignored() {
        let mut c = carousel();
        c.pause_background_media(1, 0);
        assert!(c.is_running());
        assert_eq!(c.status(1), MediaStatus::Playing { clip: None });
    }

    #[test]
    fn noop_media_reports_playing() {
        let mut media = NoopMedia;
        media.pause_background_media(0, 0);
        assert_eq!(media.status(0), MediaStatus::Playing { clip: None });
    }
}
