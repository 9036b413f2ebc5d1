mod debounce;
mod wheel;

pub use debounce::{DEFAULT_DEBOUNCE_WINDOW, Debouncer};
pub use wheel::{WheelDeltaMode, WheelInput, WheelSettings, resolve_wheel_zoom_factor};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InteractionMode {
    #[default]
    Idle,
    Panning,
}

/// Drag state machine shared by the pannable views.
///
/// `Idle -> Panning` on drag start, `Panning -> Idle` on drag end. The
/// `moved` flag tells a committed pan apart from a plain click.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InteractionState {
    mode: InteractionMode,
    moved: bool,
}

impl InteractionState {
    #[must_use]
    pub fn mode(self) -> InteractionMode {
        self.mode
    }

    #[must_use]
    pub fn is_panning(self) -> bool {
        self.mode == InteractionMode::Panning
    }

    pub fn on_pan_start(&mut self) {
        self.mode = InteractionMode::Panning;
        self.moved = false;
    }

    /// Records movement; ignored while idle.
    pub fn on_pan_move(&mut self) -> bool {
        if !self.is_panning() {
            return false;
        }
        self.moved = true;
        true
    }

    /// Returns `true` when the finished drag actually moved.
    pub fn on_pan_end(&mut self) -> bool {
        let committed = self.is_panning() && self.moved;
        self.mode = InteractionMode::Idle;
        self.moved = false;
        committed
    }
}

#[cfg(test)]
mod tests {
    use super::{InteractionMode, InteractionState};

    #[test]
    fn click_without_movement_does_not_commit() {
        let mut state = InteractionState::default();
        state.on_pan_start();
        assert_eq!(state.mode(), InteractionMode::Panning);
        assert!(!state.on_pan_end());
        assert_eq!(state.mode(), InteractionMode::Idle);
    }

    #[test]
    fn drag_with_movement_commits_once() {
        let mut state = InteractionState::default();
        assert!(!state.on_pan_move());
        state.on_pan_start();
        assert!(state.on_pan_move());
        assert!(state.on_pan_end());
        assert!(!state.on_pan_end());
    }
}
