//! Terminal preview (impure shell).
//!
//! Drives a [`Site`] from crossterm events and renders it with ratatui.
//! Mouse wheel notches become wheel deltas, keys go through [`KeyBindings`],
//! and the wall clock since startup is the site's time base.

pub mod constants;
pub mod render;
pub mod surface;

pub use render::render;
pub use surface::Surface;

use crate::config::KeyBindings;
use crate::model::{AppError, KeyAction, NavOutcome, RawInput};
use crate::state::Site;
use constants::{FRAME_INTERVAL, WHEEL_NOTCH_PX};
use crossterm::{
    event::{self, Event, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};
use tracing::debug;

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    terminal: Terminal<B>,
    site: Site,
    surface: Surface,
    key_bindings: KeyBindings,
    wheel_notch_px: f64,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Put the terminal in raw mode with mouse capture and wrap `site`.
    pub fn new(site: Site) -> Result<Self, AppError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(crossterm::event::EnableMouseCapture)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self::with_terminal(terminal, site))
    }

    /// Run the event loop until the user quits.
    ///
    /// Sleeps until the next input, the next site timer, or one frame,
    /// whichever comes first.
    pub fn run(&mut self) -> Result<(), AppError> {
        let started = Instant::now();
        let now_ms = || u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        self.draw()?;
        loop {
            let now = now_ms();
            let timeout = self
                .site
                .next_deadline()
                .map_or(FRAME_INTERVAL, |due| {
                    Duration::from_millis(due.saturating_sub(now)).min(FRAME_INTERVAL)
                });

            if event::poll(timeout)? {
                let now = now_ms();
                match event::read()? {
                    Event::Key(key) if key.kind != KeyEventKind::Release => {
                        if self.handle_key(key, now) {
                            return Ok(());
                        }
                    }
                    Event::Mouse(mouse) => self.handle_mouse(mouse, now),
                    Event::Resize(width, height) => debug!(width, height, "terminal resized"),
                    _ => {}
                }
            }

            self.tick(now_ms());
            self.draw()?;
        }
    }
}

impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// App over an existing terminal.
    pub fn with_terminal(terminal: Terminal<B>, mut site: Site) -> Self {
        let mut surface = Surface::new();
        surface.apply_all(&site.drain_effects());
        Self {
            terminal,
            site,
            surface,
            key_bindings: KeyBindings::default(),
            wheel_notch_px: WHEEL_NOTCH_PX,
        }
    }

    /// The driven site.
    pub fn site(&self) -> &Site {
        &self.site
    }

    /// Surface with every drained effect applied.
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Terminal, for inspecting a test backend.
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// Advance the site clock and fold new effects.
    pub fn tick(&mut self, now: u64) {
        self.site.tick(now);
        self.flush_effects();
    }

    fn flush_effects(&mut self) {
        let effects = self.site.drain_effects();
        self.surface.apply_all(&effects);
    }

    /// Handle a single keyboard event at `now`.
    ///
    /// Returns true if app should quit
    pub fn handle_key(&mut self, key: KeyEvent, now: u64) -> bool {
        let Some(action) = self.key_bindings.get(key) else {
            return false;
        };

        let outcome = match action {
            KeyAction::Quit => return true,
            KeyAction::Site(key) => {
                self.site
                    .handle_input(RawInput::Key {
                        key,
                        timestamp_ms: now,
                    })
                    .outcome
            }
            KeyAction::OpenDetail => {
                self.site.tick(now);
                match self.site.current_state().page_index() {
                    Some(page) => self.site.click_detail_trigger(page),
                    None => NavOutcome::Absorbed,
                }
            }
            KeyAction::CloseDetail => {
                self.site.tick(now);
                self.site.close_detail()
            }
            KeyAction::BackToHero => {
                self.site.tick(now);
                self.site.back_control()
            }
            KeyAction::ToggleLanguage => {
                self.site.tick(now);
                self.site.toggle_language();
                NavOutcome::Absorbed
            }
        };
        debug!(?action, ?outcome, "key handled");
        self.flush_effects();
        false
    }

    /// Handle a mouse event at `now`. Only the wheel is used.
    pub fn handle_mouse(&mut self, mouse: MouseEvent, now: u64) {
        let delta_y = match mouse.kind {
            MouseEventKind::ScrollDown => self.wheel_notch_px,
            MouseEventKind::ScrollUp => -self.wheel_notch_px,
            _ => return,
        };
        self.site.handle_input(RawInput::Wheel {
            delta_y,
            timestamp_ms: now,
        });
        self.flush_effects();
    }

    /// Render the current frame
    pub fn draw(&mut self) -> Result<(), AppError> {
        let site = &self.site;
        let surface = &self.surface;
        self.terminal.draw(|frame| render(frame, site, surface))?;
        Ok(())
    }
}

/// Run the preview over the real terminal, restoring it afterwards.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run_with_site(site: Site) -> Result<(), AppError> {
    let mut app = TuiApp::new(site)?;

    // Run the app and ensure cleanup happens even on error
    let result = app.run();

    // Always restore terminal state
    restore_terminal()?;

    result
}

/// Restore terminal to normal state
///
/// Disables raw mode, mouse capture, and leaves alternate screen
fn restore_terminal() -> Result<(), AppError> {
    disable_raw_mode()?;
    io::stdout().execute(crossterm::event::DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NavConfig;
    use crate::model::{Language, NavigationState, Target, TypewriterSlot};
    use crossterm::event::{KeyCode, KeyModifiers};
    use ratatui::backend::TestBackend;

    fn create_test_app() -> TuiApp<TestBackend> {
        let terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        TuiApp::with_terminal(terminal, Site::new(NavConfig::default()).unwrap())
    }

    fn press(app: &mut TuiApp<TestBackend>, code: KeyCode, now: u64) -> bool {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE), now)
    }

    fn scroll(kind: MouseEventKind) -> MouseEvent {
        MouseEvent {
            kind,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn handle_key_q_returns_true() {
        let mut app = create_test_app();
        assert!(press(&mut app, KeyCode::Char('q'), 0));
    }

    #[test]
    fn handle_key_ctrl_c_returns_true() {
        let mut app = create_test_app();
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(app.handle_key(key, 0));
    }

    #[test]
    fn unbound_key_is_ignored() {
        let mut app = create_test_app();
        assert!(!press(&mut app, KeyCode::Char('z'), 0));
        assert!(app.site().current_state().is_hero());
    }

    #[test]
    fn digit_jumps_and_escape_returns() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Char('3'), 0);
        assert_eq!(
            app.site().current_state(),
            NavigationState::ContentPage { index: 2 }
        );
        assert_eq!(app.surface().translate(Target::PageStrip), -1838.0);

        press(&mut app, KeyCode::Esc, 1_000);
        assert!(app.site().current_state().is_hero());
    }

    #[test]
    fn wheel_notches_fill_the_headline() {
        let mut app = create_test_app();
        app.handle_mouse(scroll(MouseEventKind::ScrollDown), 0);
        assert_eq!(app.surface().mask(0), 10.0);
        app.handle_mouse(scroll(MouseEventKind::ScrollUp), 20);
        assert_eq!(app.surface().mask(0), 0.0);
    }

    #[test]
    fn enter_opens_and_backspace_closes_detail() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Char('3'), 0);
        press(&mut app, KeyCode::Enter, 1_000);
        assert!(app.site().is_detail_overlay_open(2));
        assert_eq!(
            app.surface()
                .text(Target::Typewriter(TypewriterSlot::DesignDetail)),
            "s"
        );

        press(&mut app, KeyCode::Backspace, 1_050);
        assert!(!app.site().is_detail_overlay_open(2));
        assert_eq!(
            app.surface()
                .text(Target::Typewriter(TypewriterSlot::DesignDetail)),
            ""
        );
    }

    #[test]
    fn enter_in_hero_does_nothing() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Enter, 0);
        assert!(app.site().current_state().is_hero());
    }

    #[test]
    fn l_toggles_language() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Char('l'), 0);
        assert_eq!(app.surface().language(), Language::Zh);
        assert_eq!(
            app.surface()
                .text(Target::Typewriter(TypewriterSlot::HeroIndicator)),
            "向"
        );
    }

    #[test]
    fn b_returns_to_hero() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Down, 0);
        press(&mut app, KeyCode::Char('b'), 1_000);
        assert!(app.site().current_state().is_hero());
    }

    #[test]
    fn tick_folds_timer_effects() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Char('1'), 0);
        app.tick(800);
        assert_eq!(app.surface().revealed_events(), 1);
    }

    #[test]
    fn draw_renders_without_error() {
        let mut app = create_test_app();
        assert!(app.draw().is_ok());
    }
}
