//! Session state and phases
//!
//! Everything that describes "where the player is" lives here and is
//! serializable; scene lines and timers live with the controller.

use serde::{Deserialize, Serialize};

use super::shape::Shape;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Main menu, no session yet
    Idle,
    /// Task shown, waiting for a gesture
    Playing,
    /// Gesture finished, scored on the next tick
    Evaluating,
    /// "Correct!" is showing; next level follows
    Advancing,
    /// "Wrong" is showing; same level follows
    Retrying,
    /// Time ran out (or the player quit the round)
    Ended,
}

impl GamePhase {
    /// Round timer counts down in this phase.
    ///
    /// Only a passed level freezes it: the next level resets it anyway. A
    /// wrong answer costs the player the time its message is on screen.
    pub fn timer_running(self) -> bool {
        matches!(self, GamePhase::Playing | GamePhase::Evaluating | GamePhase::Retrying)
    }

    /// Pointer gestures are accepted
    pub fn accepts_input(self) -> bool {
        self == GamePhase::Playing
    }
}

/// Complete session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Seed the template order was drawn from
    pub seed: u64,
    pub phase: GamePhase,
    /// Levels completed this session
    pub score: u32,
    /// Remaining round time (ms)
    pub time_remaining_ms: u32,
    /// Template index of the current level (never repeated back to back)
    pub last_shape_index: Option<usize>,
    /// Bumped on start, advance and end; stale continuations carry an older value
    pub round: u64,
    /// The fitted reference outline of the current level
    pub task_shape: Option<Shape>,
    /// Finished gesture waiting for the evaluation tick
    #[serde(skip)]
    pub pending_trace: Option<Shape>,
    /// Sub-millisecond time not yet taken off the timer
    #[serde(skip)]
    pub carry_ms: f32,
}

impl GameState {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            phase: GamePhase::Idle,
            score: 0,
            time_remaining_ms: 0,
            last_shape_index: None,
            round: 0,
            task_shape: None,
            pending_trace: None,
            carry_ms: 0.0,
        }
    }

    /// Take `dt` seconds off the timer. Returns true once it hits zero.
    pub fn drain_timer(&mut self, dt: f32) -> bool {
        let elapsed = dt.max(0.0) * 1000.0 + self.carry_ms;
        let whole = elapsed.floor();
        self.carry_ms = elapsed - whole;
        let whole = if whole >= u32::MAX as f32 { u32::MAX } else { whole as u32 };
        self.time_remaining_ms = self.time_remaining_ms.saturating_sub(whole);
        self.time_remaining_ms == 0
    }

    /// Fresh session values for a new game
    pub fn reset(&mut self, start_time_ms: u32) {
        self.score = 0;
        self.time_remaining_ms = start_time_ms;
        self.carry_ms = 0.0;
        self.pending_trace = None;
        self.round += 1;
    }
}
