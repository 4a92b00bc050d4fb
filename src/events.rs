//! Terminal event polling and key handling.

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};

use crate::app::App;

/// Poll for a terminal event with a timeout.
///
/// The short timeout doubles as the dashboard's suspension point: the
/// inter-tick wait is a sequence of these polls, so a quit key or
/// Ctrl-C interrupts it immediately.
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event. Only stop keys are meaningful; the dashboard is
/// display-only otherwise.
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.request_stop(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.request_stop();
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cloud::JsonLinesUploader;
    use crate::config::Settings;
    use crate::source::SimulatedSource;
    use crossterm::event::KeyEventKind;

    fn demo_app() -> App {
        let settings = Settings::demo();
        let mut source = SimulatedSource::with_seed(1);
        for m in &settings.metrics {
            source.register(&m.id, m.range.normal_min(), m.range.normal_max());
        }
        App::new(
            &settings,
            Box::new(source),
            Box::new(JsonLinesUploader::new(Vec::<u8>::new(), "memory")),
        )
    }

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: crossterm::event::KeyEventState::NONE,
        }
    }

    #[test]
    fn test_quit_keys_stop_the_app() {
        for event in [
            key(KeyCode::Char('q'), KeyModifiers::NONE),
            key(KeyCode::Esc, KeyModifiers::NONE),
            key(KeyCode::Char('c'), KeyModifiers::CONTROL),
        ] {
            let mut app = demo_app();
            app.start();
            handle_key_event(&mut app, event);
            assert!(app.is_stopped());
        }
    }

    #[test]
    fn test_other_keys_are_ignored() {
        let mut app = demo_app();
        app.start();
        handle_key_event(&mut app, key(KeyCode::Char('x'), KeyModifiers::NONE));
        handle_key_event(&mut app, key(KeyCode::Char('c'), KeyModifiers::NONE));
        assert!(!app.is_stopped());
    }
}
