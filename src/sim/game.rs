//! Level controller
//!
//! Owns the session and drives it from host callbacks: lifecycle calls
//! (`start_game`, `end_game`, `quit`), pointer gestures and `tick`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::input::InputCapture;
use super::matcher::{self, MatchRules, Verdict};
use super::scene::{Layer, Scene};
use super::schedule::{Continuation, Scheduler};
use super::segment::LineStyle;
use super::shape::{Shape, Template, pick_template};
use super::state::{GamePhase, GameState};
use crate::consts::{MESSAGE_CORRECT, MESSAGE_WRONG};
use crate::geometry::{Camera, Region, pointer_to_local};
use crate::{Color, palette};
use crate::presenter::{Panel, Presenter};
use crate::settings::Settings;

/// The game: session state, rendered lines and the presenter they feed
pub struct Game<P: Presenter> {
    pub(super) settings: Settings,
    pub(super) state: GameState,
    pub(super) scene: Scene,
    pub(super) input: InputCapture,
    pub(super) scheduler: Scheduler,
    pub(super) presenter: P,
    camera: Camera,
    rng: Pcg32,
}

impl<P: Presenter> Game<P> {
    /// Create the game at the main menu
    pub fn new(settings: Settings, camera: Camera, presenter: P) -> Self {
        let settings = settings.sanitized();
        let seed = settings.seed.unwrap_or_else(time_seed);
        let mut game = Self {
            settings,
            state: GameState::new(seed),
            scene: Scene::new(),
            input: InputCapture::new(),
            scheduler: Scheduler::new(),
            presenter,
            camera,
            rng: Pcg32::seed_from_u64(seed),
        };
        game.presenter.set_panel_visible(Panel::MainMenu, true);
        game.presenter.set_panel_visible(Panel::GameMenu, false);
        game.presenter.set_panel_visible(Panel::MessageBox, false);
        game.presenter.set_panel_visible(Panel::EndMenu, false);
        log::info!("Shape tracer ready (seed {seed})");
        game
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Viewport changed (resize)
    pub fn set_camera(&mut self, camera: Camera) {
        self.camera = camera;
    }

    /// The drawing area gestures are captured in
    pub fn draw_region(&self) -> Region {
        Region::new(self.settings.draw_origin, self.settings.draw_area)
    }

    /// The fitted outline of the current level
    pub fn task_shape(&self) -> Option<&Shape> {
        self.state.task_shape.as_ref()
    }

    /// Begin a new session from any phase
    pub fn start_game(&mut self) {
        self.scene.clear_all(&mut self.presenter);
        self.input.reset();
        self.presenter.set_panel_visible(Panel::MainMenu, false);
        self.presenter.set_panel_visible(Panel::EndMenu, false);
        self.presenter.set_panel_visible(Panel::MessageBox, false);
        self.presenter.set_panel_visible(Panel::GameMenu, true);

        self.state.reset(self.settings.start_time_ms);
        self.select_and_create_shape();
        self.state.phase = GamePhase::Playing;
        self.presenter.set_counters(self.state.score, self.state.time_remaining_ms);
        log::info!("Game started");
    }

    /// Stop the session and show the final score
    pub fn end_game(&mut self) {
        if matches!(self.state.phase, GamePhase::Idle | GamePhase::Ended) {
            return;
        }
        self.state.phase = GamePhase::Ended;
        self.state.round += 1;
        self.state.pending_trace = None;
        self.input.reset();
        self.scene.clear_all(&mut self.presenter);
        self.presenter.set_panel_visible(Panel::MessageBox, false);
        self.presenter.set_panel_visible(Panel::GameMenu, false);
        self.presenter.set_panel_visible(Panel::EndMenu, true);
        self.presenter.set_end_score(self.state.score);
        log::info!("Game ended with score {}", self.state.score);
    }

    /// Leave the application
    pub fn quit(&mut self) {
        log::info!("Quitting");
        self.presenter.request_quit();
    }

    /// Pointer pressed inside the drawing area
    pub fn pointer_down(&mut self, screen: Vec2) {
        if !self.state.phase.accepts_input() {
            return;
        }
        let Some(local) = self.project(screen) else {
            return;
        };
        self.presenter.set_trail(false, local);
        self.presenter.set_trail(true, local);
        self.input.begin(local, &mut self.scene, &mut self.presenter);
    }

    /// Pointer moved while pressed
    pub fn pointer_drag(&mut self, screen: Vec2) {
        if !self.state.phase.accepts_input() || !self.input.is_active() {
            return;
        }
        let Some(local) = self.project(screen) else {
            return;
        };
        self.presenter.set_trail(true, local);
        let style = self.input_style();
        self.input
            .drag(local, &self.settings.draw_area, &style, &mut self.scene, &mut self.presenter);
    }

    /// Pointer released: finish the trace and queue it for scoring
    pub fn pointer_up(&mut self, screen: Vec2) {
        if !self.state.phase.accepts_input() || !self.input.is_active() {
            return;
        }
        let Some(local) = self.project(screen) else {
            return;
        };
        self.presenter.set_trail(true, local);
        self.scheduler.schedule(
            self.settings.trail_off_secs,
            Continuation::TrailOff {
                gesture: self.input.gesture(),
            },
        );

        let style = self.input_style();
        if let Some(shape) =
            self.input
                .end(local, &self.settings.draw_area, &style, &mut self.scene, &mut self.presenter)
        {
            log::debug!("Trace finished with {} vertices", shape.len());
            self.state.pending_trace = Some(shape);
            self.state.phase = GamePhase::Evaluating;
        }
    }

    /// Screen to drawing-area coordinates; a failure drops the gesture
    fn project(&mut self, screen: Vec2) -> Option<Vec2> {
        match pointer_to_local(screen, &self.draw_region(), &self.camera) {
            Ok(local) => Some(local),
            Err(err) => {
                log::warn!("Pointer conversion failed, gesture dropped: {err}");
                if self.input.is_active() {
                    self.input.abort(&mut self.scene, &mut self.presenter);
                    self.presenter.set_trail(false, Vec2::ZERO);
                }
                None
            }
        }
    }

    /// Score the pending trace (the evaluation tick)
    pub(super) fn evaluate_pending(&mut self) {
        let Some(mut traced) = self.state.pending_trace.take() else {
            self.state.phase = GamePhase::Playing;
            return;
        };
        let rules = self.match_rules();
        let verdict = match matcher::evaluate(
            &mut self.scene,
            &mut traced,
            self.settings.task_box,
            &rules,
            &mut self.presenter,
        ) {
            Ok(report) => report.verdict(),
            Err(err) => {
                log::debug!("Trace rejected: {err}");
                Verdict::Fail
            }
        };

        let round = self.state.round;
        match verdict {
            Verdict::Pass => {
                self.state.phase = GamePhase::Advancing;
                self.show_message(MESSAGE_CORRECT, palette::MESSAGE_CORRECT);
                self.scheduler
                    .schedule(self.settings.message_time_secs, Continuation::FinishAdvance { round });
            }
            Verdict::Fail => {
                self.state.phase = GamePhase::Retrying;
                self.show_message(MESSAGE_WRONG, palette::MESSAGE_WRONG);
                self.scheduler
                    .schedule(self.settings.message_time_secs, Continuation::FinishRetry { round });
            }
        }
    }

    /// Run a due continuation; stale ones are dropped
    pub(super) fn run_continuation(&mut self, action: Continuation) {
        match action {
            Continuation::FinishAdvance { round }
                if round == self.state.round && self.state.phase == GamePhase::Advancing =>
            {
                self.next_level();
            }
            Continuation::FinishRetry { round }
                if round == self.state.round && self.state.phase == GamePhase::Retrying =>
            {
                self.next_try();
            }
            Continuation::TrailOff { gesture } if gesture == self.input.gesture() && !self.input.is_active() => {
                self.presenter.set_trail(false, Vec2::ZERO);
            }
            stale => log::trace!("Dropping stale {stale:?}"),
        }
    }

    fn next_level(&mut self) {
        self.presenter.set_panel_visible(Panel::MessageBox, false);
        self.scene.clear_all(&mut self.presenter);

        self.state.score += 1;
        self.state.time_remaining_ms = self.settings.level_time(self.state.score);
        self.state.round += 1;
        self.select_and_create_shape();
        self.state.phase = GamePhase::Playing;
        self.presenter.set_counters(self.state.score, self.state.time_remaining_ms);
        log::info!(
            "Level {} - {} ms on the clock",
            self.state.score + 1,
            self.state.time_remaining_ms
        );
    }

    fn next_try(&mut self) {
        self.presenter.set_panel_visible(Panel::MessageBox, false);
        self.scene.clear(Layer::UserInput, &mut self.presenter);
        self.scene.clear(Layer::Comparison, &mut self.presenter);
        self.scene.restore(
            Layer::Task,
            palette::TASK_LINE,
            self.settings.line_thickness,
            &mut self.presenter,
        );
        self.state.phase = GamePhase::Playing;
    }

    fn select_and_create_shape(&mut self) {
        let Some(index) = pick_template(&mut self.rng, self.state.last_shape_index, Template::ALL.len()) else {
            log::warn!("No templates to pick from");
            return;
        };
        self.state.last_shape_index = Some(index);
        let template = Template::ALL[index];

        let mut shape = template.shape();
        let task_box = self.settings.task_box;
        if let Err(err) = shape.fit(task_box.x, task_box.y) {
            log::warn!("Could not fit {}: {err}", template.as_str());
        }
        let style = LineStyle::new(palette::TASK_LINE, self.settings.line_thickness);
        shape.create_lines(&mut self.scene, Layer::Task, &style, &mut self.presenter);
        log::debug!("Task shape: {}", template.as_str());
        self.state.task_shape = Some(shape);
    }

    fn show_message(&mut self, text: &str, color: Color) {
        self.presenter.set_message(text, color);
        self.presenter.set_panel_visible(Panel::MessageBox, true);
    }

    fn input_style(&self) -> LineStyle {
        LineStyle::new(palette::INPUT_LINE, self.settings.line_thickness)
    }

    fn match_rules(&self) -> MatchRules {
        MatchRules {
            closing_tolerance: self.settings.closing_tolerance,
            marker_min_thickness: self.settings.marker_min_thickness,
            trace_style: LineStyle::new(palette::TRACE_LINE, self.settings.line_thickness),
        }
    }
}

fn time_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
