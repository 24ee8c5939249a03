//! Game simulation module
//!
//! All gameplay logic lives here. Nothing in this module draws or reads the
//! platform directly:
//! - Lines go through the scene and are mirrored to a `Presenter`
//! - Time only moves through `Game::tick`
//! - Template order comes from a seeded RNG

pub mod game;
pub mod input;
pub mod matcher;
pub mod scene;
pub mod schedule;
pub mod segment;
pub mod shape;
pub mod state;
pub mod tick;

pub use game::Game;
pub use input::InputCapture;
pub use matcher::{MatchReport, MatchRules, Verdict, closes_loop, evaluate};
pub use scene::{Layer, Scene, SegmentHandle};
pub use schedule::{Continuation, Scheduler};
pub use segment::{LineSegment, LineStyle};
pub use shape::{Shape, Template, create_line, pick_template};
pub use state::{GamePhase, GameState};
