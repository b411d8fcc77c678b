//! Keyboard state consumed by the simulation
//!
//! The frontend feeds raw key events in; the simulation only asks the
//! logical questions (left / right / jump / double tap). One `Input` lives
//! per frontend and is handed to `sim::tick` every frame.

use std::collections::HashSet;

use crate::consts::DOUBLE_TAP_WINDOW_MS;

/// Logical actions and the keys that trigger them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Left,
    Right,
    Jump,
}

impl Action {
    /// Key aliases (lowercased `KeyboardEvent.key` values)
    pub fn keys(self) -> &'static [&'static str] {
        match self {
            Action::Left => &["a", "arrowleft"],
            Action::Right => &["d", "arrowright"],
            Action::Jump => &["w", "arrowup", " "],
        }
    }
}

/// Key whose quick double press fires the double-tap edge
pub const DOUBLE_TAP_KEY: &str = " ";

#[derive(Debug, Clone, Default)]
pub struct Input {
    held: HashSet<String>,
    last_tap_ms: Option<f64>,
    double_tap: bool,
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press. Auto-repeat (press while already held) is ignored
    /// for double-tap detection.
    pub fn key_down(&mut self, key: &str, now_ms: f64) {
        let key = key.to_lowercase();
        if !self.held.contains(&key) && key == DOUBLE_TAP_KEY {
            if self
                .last_tap_ms
                .is_some_and(|last| now_ms - last < DOUBLE_TAP_WINDOW_MS)
            {
                self.double_tap = true;
            }
            self.last_tap_ms = Some(now_ms);
        }
        self.held.insert(key);
    }

    pub fn key_up(&mut self, key: &str) {
        self.held.remove(&key.to_lowercase());
    }

    /// Drop all held keys (focus loss)
    pub fn release_all(&mut self) {
        self.held.clear();
    }

    pub fn active(&self, action: Action) -> bool {
        action.keys().iter().any(|k| self.held.contains(*k))
    }

    pub fn left(&self) -> bool {
        self.active(Action::Left)
    }

    pub fn right(&self) -> bool {
        self.active(Action::Right)
    }

    pub fn jump(&self) -> bool {
        self.active(Action::Jump)
    }

    /// True at most once per qualifying double press
    pub fn consume_double_tap(&mut self) -> bool {
        std::mem::take(&mut self.double_tap)
    }

    /// Drive an action directly, bypassing key events (autopilot)
    pub fn set_action(&mut self, action: Action, down: bool) {
        let key = action.keys()[0];
        if down {
            self.held.insert(key.to_string());
        } else {
            for k in action.keys() {
                self.held.remove(*k);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aliases() {
        let mut input = Input::new();
        input.key_down("ArrowLeft", 0.0);
        assert!(input.left());
        assert!(!input.right());

        input.key_down("D", 0.0);
        assert!(input.right());

        input.key_down("w", 0.0);
        assert!(input.jump());
        input.key_up("W");
        assert!(!input.jump());
    }

    #[test]
    fn test_double_tap_fires_once() {
        let mut input = Input::new();
        input.key_down(" ", 1000.0);
        input.key_up(" ");
        input.key_down(" ", 1200.0);

        assert!(input.consume_double_tap());
        assert!(!input.consume_double_tap());
    }

    #[test]
    fn test_double_tap_window() {
        let mut input = Input::new();
        input.key_down(" ", 1000.0);
        input.key_up(" ");
        input.key_down(" ", 1300.0);
        assert!(!input.consume_double_tap());
    }

    #[test]
    fn test_key_repeat_is_not_a_tap() {
        let mut input = Input::new();
        input.key_down(" ", 1000.0);
        // OS auto-repeat while held
        input.key_down(" ", 1050.0);
        assert!(!input.consume_double_tap());
    }

    #[test]
    fn test_other_keys_do_not_tap() {
        let mut input = Input::new();
        input.key_down("w", 0.0);
        input.key_up("w");
        input.key_down("w", 100.0);
        assert!(!input.consume_double_tap());
    }

    #[test]
    fn test_set_action() {
        let mut input = Input::new();
        input.set_action(Action::Right, true);
        assert!(input.right());
        input.set_action(Action::Right, false);
        assert!(!input.right());
    }
}
