//! Preview-level keyboard actions independent of key bindings.

use super::input::Key;

/// Actions the terminal preview can perform.
///
/// These represent user intent, not specific keys. The mapping from
/// `crossterm::event::KeyEvent` to `KeyAction` is handled by `KeyBindings`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Feed a site key (digits, arrows, Escape) to the engine.
    Site(Key),
    /// Click the detail trigger of the current page. Default: Enter
    OpenDetail,
    /// Click the close control of the open overlay. Default: Backspace
    CloseDetail,
    /// Click the back-to-hero control. Default: b
    BackToHero,
    /// Switch between English and Chinese. Default: l
    ToggleLanguage,
    /// Exit the preview. Default: q / Ctrl+C
    Quit,
}
