//! Shape Tracer entry point
//!
//! The native build has no window: it runs a demo session where an autopilot
//! traces each task outline, then lets the clock run out. Pass a settings
//! JSON path as the first argument to override the defaults.

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use std::path::PathBuf;

    use glam::Vec2;
    use shape_tracer::geometry::{Camera, local_to_screen};
    use shape_tracer::sim::{Game, GamePhase};
    use shape_tracer::{LogPresenter, Settings};

    const FRAME: f32 = 1.0 / 60.0;
    const SCREEN: Vec2 = Vec2::new(800.0, 600.0);
    /// Levels the autopilot clears before it stops drawing
    const AUTOPLAY_LEVELS: u32 = 5;
    /// Frames spent per traced vertex
    const FRAMES_PER_VERTEX: usize = 6;

    pub fn run() {
        let settings = match std::env::args_os().nth(1).map(PathBuf::from) {
            Some(path) => Settings::load(&path),
            None => Settings::default(),
        };

        let mut game = Game::new(settings, Camera::new(SCREEN), LogPresenter::new());
        game.start_game();

        // Cap the loop in case a custom config stops the clock from reaching zero
        let max_frames = 60 * 60 * 10;
        for _ in 0..max_frames {
            if game.phase() == GamePhase::Ended {
                break;
            }
            if game.phase() == GamePhase::Playing && game.state().score < AUTOPLAY_LEVELS {
                autopilot_trace(&mut game);
            }
            game.tick(FRAME);
        }

        log::info!("Final score: {}", game.state().score);
        if let Some(text) = &game.presenter().end_score {
            println!("{text}");
        }
    }

    /// Trace the task outline vertex by vertex, ticking as a player would
    fn autopilot_trace(game: &mut Game<LogPresenter>) {
        let Some(task) = game.task_shape() else {
            return;
        };
        let region = game.draw_region();
        let points: Vec<Vec2> = task
            .vertices
            .iter()
            .filter_map(|&p| local_to_screen(p, &region, game.camera()).ok())
            .collect();
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        let Some((last, middle)) = rest.split_last() else {
            return;
        };

        game.pointer_down(*first);
        for &p in middle {
            for _ in 0..FRAMES_PER_VERTEX {
                game.tick(FRAME);
            }
            game.pointer_drag(p);
        }
        game.tick(FRAME);
        game.pointer_up(*last);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Shape Tracer (native demo) starting...");
    demo::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The web host drives `Game` directly through its own presenter
}
