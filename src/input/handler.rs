use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::trace;

use crate::game::{Direction, GameEngine};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Request a turn; the engine decides whether it is a reversal
    Turn(Direction),
    Restart,
    Quit,
    None,
}

/// Maps terminal key events to game controls. Unknown keys map to `KeyAction::None`.
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            KeyCode::Up => KeyAction::Turn(Direction::Up),
            KeyCode::Down => KeyAction::Turn(Direction::Down),
            KeyCode::Left => KeyAction::Turn(Direction::Left),
            KeyCode::Right => KeyAction::Turn(Direction::Right),
            KeyCode::Esc => KeyAction::Quit,
            KeyCode::Char(c) => match c.to_ascii_lowercase() {
                'w' => KeyAction::Turn(Direction::Up),
                's' => KeyAction::Turn(Direction::Down),
                'a' => KeyAction::Turn(Direction::Left),
                'd' => KeyAction::Turn(Direction::Right),
                'q' => KeyAction::Quit,
                'r' => KeyAction::Restart,
                _ => KeyAction::None,
            },
            _ => KeyAction::None,
        }
    }

    /// Translate a key and forward turns to the engine.
    ///
    /// The reversal guard runs inside `GameEngine::set_direction` against the
    /// direction of the last tick, so two presses between ticks are both
    /// checked against the same committed direction. Restart and quit are
    /// returned for the caller to act on.
    pub fn dispatch(&self, key: KeyEvent, engine: &mut GameEngine) -> KeyAction {
        let action = self.handle_key_event(key);
        if let KeyAction::Turn(direction) = action {
            if !engine.set_direction(direction) {
                trace!("Key {:?} rejected as a reversal", key.code);
            }
        }
        action
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameConfig;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_arrow_keys() {
        let handler = InputHandler::new();

        for (code, dir) in [
            (KeyCode::Up, Direction::Up),
            (KeyCode::Down, Direction::Down),
            (KeyCode::Left, Direction::Left),
            (KeyCode::Right, Direction::Right),
        ] {
            assert_eq!(handler.handle_key_event(press(code)), KeyAction::Turn(dir));
        }
    }

    #[test]
    fn test_wasd_keys() {
        let handler = InputHandler::new();

        for (c, dir) in [
            ('w', Direction::Up),
            ('a', Direction::Left),
            ('s', Direction::Down),
            ('d', Direction::Right),
        ] {
            assert_eq!(handler.handle_key_event(press(KeyCode::Char(c))), KeyAction::Turn(dir));
        }

        let w_upper = KeyEvent::new(KeyCode::Char('W'), KeyModifiers::SHIFT);
        assert_eq!(handler.handle_key_event(w_upper), KeyAction::Turn(Direction::Up));
    }

    #[test]
    fn test_control_keys() {
        let handler = InputHandler::new();

        assert_eq!(handler.handle_key_event(press(KeyCode::Char('q'))), KeyAction::Quit);
        assert_eq!(handler.handle_key_event(press(KeyCode::Esc)), KeyAction::Quit);
        assert_eq!(
            handler.handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            KeyAction::Quit
        );
        assert_eq!(
            handler.handle_key_event(KeyEvent::new(KeyCode::Char('R'), KeyModifiers::SHIFT)),
            KeyAction::Restart
        );
    }

    #[test]
    fn test_unknown_key() {
        let handler = InputHandler::new();

        assert_eq!(handler.handle_key_event(press(KeyCode::Char('x'))), KeyAction::None);
        assert_eq!(handler.handle_key_event(press(KeyCode::Tab)), KeyAction::None);
        // Plain 'c' is not a control key
        assert_eq!(handler.handle_key_event(press(KeyCode::Char('c'))), KeyAction::None);
    }

    #[test]
    fn test_dispatch_forwards_turns() {
        let handler = InputHandler::new();
        let mut engine = GameEngine::with_seed(GameConfig::default(), 9);

        let action = handler.dispatch(press(KeyCode::Up), &mut engine);
        assert_eq!(action, KeyAction::Turn(Direction::Up));
        assert_eq!(engine.pending_direction(), Direction::Up);
    }

    #[test]
    fn test_dispatch_two_presses_between_ticks() {
        let handler = InputHandler::new();
        let mut engine = GameEngine::with_seed(GameConfig::default(), 9);

        // Committed Right: Up is accepted, Left is still a reversal of Right
        handler.dispatch(press(KeyCode::Up), &mut engine);
        handler.dispatch(press(KeyCode::Left), &mut engine);
        assert_eq!(engine.pending_direction(), Direction::Up);

        engine.tick();
        assert_eq!(engine.direction(), Direction::Up);

        // Committed Up: Left is accepted now
        handler.dispatch(press(KeyCode::Left), &mut engine);
        assert_eq!(engine.pending_direction(), Direction::Left);
    }

    #[test]
    fn test_dispatch_ignores_unknown_key() {
        let handler = InputHandler::new();
        let mut engine = GameEngine::with_seed(GameConfig::default(), 9);
        let before = engine.state().clone();

        assert_eq!(handler.dispatch(press(KeyCode::Char('x')), &mut engine), KeyAction::None);
        assert_eq!(engine.state(), &before);
        assert_eq!(engine.pending_direction(), Direction::Right);
    }
}
