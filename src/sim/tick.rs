//! Per-frame update
//!
//! The host calls `tick` once per frame with the real elapsed time. Order
//! matters: the timer is checked first so that running out of time always
//! beats an evaluation or message that is still in flight.

use super::game::Game;
use super::state::GamePhase;
use crate::presenter::Presenter;

impl<P: Presenter> Game<P> {
    /// Advance the game by `dt` seconds of wall-clock time
    pub fn tick(&mut self, dt: f32) {
        if self.state.phase.timer_running() && self.state.drain_timer(dt) {
            self.end_game();
        }

        if self.state.phase == GamePhase::Evaluating {
            self.evaluate_pending();
        }

        for action in self.scheduler.advance(dt) {
            self.run_continuation(action);
        }

        if self.state.phase.timer_running() {
            self.presenter
                .set_counters(self.state.score, self.state.time_remaining_ms);
        }
    }
}
