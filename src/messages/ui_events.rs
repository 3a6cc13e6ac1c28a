//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Top-level screens. `StatsModal` is a transient overlay; the screen
/// beneath it is kept in `AppState::previous_screen` for restore.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Screen {
    #[default]
    EndpointList,
    RequestBuilder,
    History,
    Settings,
    MakeCommands,
    StatsModal,
}

/// Events generated from user input in the UI layer
#[derive(Debug, Clone)]
pub enum UiEvent {
    // Navigation
    Back,
    MoveUp,
    MoveDown,
    FocusBuilder,
    FocusList,
    NextField,
    PrevField,

    // Field editing
    FieldChar(char),
    FieldBackspace,

    // Search
    EnterSearch,
    SearchChar(char),
    SearchBackspace,
    LeaveSearch,

    // Actions
    Confirm,
    RunTarget,
    ScrollUp,
    ScrollDown,

    // Global screen jumps
    GotoEndpointList,
    GotoMakeCommands,
    GotoHistory,
    GotoSettings,
    OpenStats,
    DismissModal,

    // System
    Quit,
}

/// Convert a key event to a UiEvent based on the active screen and search
/// sub-mode.
pub fn key_to_ui_event(key: KeyEvent, screen: Screen, search_mode: bool) -> Option<UiEvent> {
    use crossterm::event::KeyEventKind;

    if key.kind != KeyEventKind::Press {
        return None;
    }

    // The stats overlay swallows every key and restores the screen below.
    if screen == Screen::StatsModal {
        return Some(UiEvent::DismissModal);
    }

    // Global Ctrl shortcuts
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') => return Some(UiEvent::Quit),
            KeyCode::Char('l') => return Some(UiEvent::GotoEndpointList),
            KeyCode::Char('k') => return Some(UiEvent::GotoMakeCommands),
            KeyCode::Char('r') => return Some(UiEvent::GotoHistory),
            KeyCode::Char('g') => return Some(UiEvent::GotoSettings),
            KeyCode::Char('t') => return Some(UiEvent::OpenStats),
            // Unbound Ctrl chords must not leak into text fields.
            KeyCode::Char(_) => return None,
            _ => {}
        }
    }

    // Search is a local sub-mode of the endpoint list; it never captures
    // keys on any other screen.
    if search_mode && screen == Screen::EndpointList {
        return match key.code {
            KeyCode::Esc | KeyCode::Enter => Some(UiEvent::LeaveSearch),
            KeyCode::Backspace => Some(UiEvent::SearchBackspace),
            KeyCode::Char(c) => Some(UiEvent::SearchChar(c)),
            KeyCode::Up => Some(UiEvent::MoveUp),
            KeyCode::Down => Some(UiEvent::MoveDown),
            _ => None,
        };
    }

    match screen {
        Screen::EndpointList => handle_list_keys(key),
        Screen::RequestBuilder => handle_builder_keys(key),
        Screen::History => handle_history_keys(key),
        Screen::Settings => handle_settings_keys(key),
        Screen::MakeCommands => handle_make_keys(key),
        Screen::StatsModal => Some(UiEvent::DismissModal),
    }
}

fn handle_list_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(UiEvent::Back),
        KeyCode::Up => Some(UiEvent::MoveUp),
        KeyCode::Down => Some(UiEvent::MoveDown),
        KeyCode::Char('/') => Some(UiEvent::EnterSearch),
        KeyCode::Enter | KeyCode::Tab => Some(UiEvent::FocusBuilder),
        _ => None,
    }
}

fn handle_builder_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Esc => Some(UiEvent::Back),
        KeyCode::Tab | KeyCode::Down => Some(UiEvent::NextField),
        KeyCode::BackTab | KeyCode::Up => Some(UiEvent::PrevField),
        KeyCode::Enter => Some(UiEvent::Confirm),
        KeyCode::Backspace => Some(UiEvent::FieldBackspace),
        KeyCode::Char(c) => Some(UiEvent::FieldChar(c)),
        KeyCode::Left => Some(UiEvent::FocusList),
        _ => None,
    }
}

fn handle_history_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => Some(UiEvent::Back),
        KeyCode::Up => Some(UiEvent::ScrollUp),
        KeyCode::Down => Some(UiEvent::ScrollDown),
        _ => None,
    }
}

fn handle_settings_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => Some(UiEvent::Back),
        _ => None,
    }
}

fn handle_make_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(UiEvent::Back),
        KeyCode::Up => Some(UiEvent::MoveUp),
        KeyCode::Down => Some(UiEvent::MoveDown),
        KeyCode::Enter => Some(UiEvent::RunTarget),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventKind;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: crossterm::event::KeyEventState::NONE,
        }
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            state: crossterm::event::KeyEventState::NONE,
        }
    }

    #[test]
    fn test_modal_swallows_everything() {
        let ev = key_to_ui_event(press(KeyCode::Char('x')), Screen::StatsModal, false);
        assert!(matches!(ev, Some(UiEvent::DismissModal)));
        // Even global shortcuts are consumed by the overlay.
        let ev = key_to_ui_event(ctrl('l'), Screen::StatsModal, false);
        assert!(matches!(ev, Some(UiEvent::DismissModal)));
    }

    #[test]
    fn test_global_jumps_from_any_screen() {
        for screen in [
            Screen::EndpointList,
            Screen::RequestBuilder,
            Screen::History,
            Screen::Settings,
            Screen::MakeCommands,
        ] {
            let ev = key_to_ui_event(ctrl('k'), screen, false);
            assert!(matches!(ev, Some(UiEvent::GotoMakeCommands)), "{screen:?}");
        }
    }

    #[test]
    fn test_search_mode_captures_chars() {
        let ev = key_to_ui_event(press(KeyCode::Char('q')), Screen::EndpointList, true);
        assert!(matches!(ev, Some(UiEvent::SearchChar('q'))));
        let ev = key_to_ui_event(press(KeyCode::Esc), Screen::EndpointList, true);
        assert!(matches!(ev, Some(UiEvent::LeaveSearch)));
    }

    #[test]
    fn test_search_mode_is_local_to_endpoint_list() {
        // A lingering search flag must not swallow keys on other screens.
        let ev = key_to_ui_event(press(KeyCode::Char('q')), Screen::MakeCommands, true);
        assert!(matches!(ev, Some(UiEvent::Back)));
        let ev = key_to_ui_event(press(KeyCode::Esc), Screen::History, true);
        assert!(matches!(ev, Some(UiEvent::Back)));
        let ev = key_to_ui_event(press(KeyCode::Enter), Screen::MakeCommands, true);
        assert!(matches!(ev, Some(UiEvent::RunTarget)));
    }

    #[test]
    fn test_builder_chars_edit_fields() {
        let ev = key_to_ui_event(press(KeyCode::Char('q')), Screen::RequestBuilder, false);
        assert!(matches!(ev, Some(UiEvent::FieldChar('q'))));
    }
}
