//! Kaboom headless demo
//!
//! Runs a session with an autopilot steering the paddle and logs the
//! outcome of every turn. Set `RUST_LOG=debug` to see individual events.

use kaboom::Settings;
use kaboom::audio::AudioManager;
use kaboom::consts::SIM_DT;
use kaboom::input::{Direction, SharedInput};
use kaboom::renderer::{Drawable, FrameRecorder, Updatable};
use kaboom::sim::{BombState, Session, SessionPhase};

const SETTINGS_PATH: &str = "kaboom.json";
/// Five simulated minutes
const MAX_FRAMES: u32 = 60 * 60 * 5;
/// Dead zone around the paddle center before the autopilot steers
const STEER_DEAD_ZONE: f32 = 4.0;

/// Steer toward the alive bomb closest to the target line
fn autopilot(session: &Session<AudioManager>) -> Direction {
    let paddle = session.paddle();
    let paddle_center = paddle.position().x + paddle.width() / 2.0;

    let target = session
        .manager()
        .bombs()
        .iter()
        .filter(|b| b.state() == BombState::Alive)
        .max_by(|a, b| {
            a.position()
                .y
                .partial_cmp(&b.position().y)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|b| b.hit_box().x + b.hit_box().width / 2.0);

    match target {
        Some(x) if x < paddle_center - STEER_DEAD_ZONE => Direction::Left,
        Some(x) if x > paddle_center + STEER_DEAD_ZONE => Direction::Right,
        _ => Direction::None,
    }
}

fn main() {
    env_logger::init();
    log::info!("Kaboom (headless) starting...");

    let settings = Settings::load_or_default(SETTINGS_PATH);
    let input = SharedInput::new();
    let audio = AudioManager::from_settings(&settings);
    let mut session = Session::new(&settings, audio, Box::new(input.clone()));
    let mut recorder = FrameRecorder::new();

    let mut frames = 0;
    while frames < MAX_FRAMES && session.phase() == SessionPhase::Playing {
        input.set(autopilot(&session));
        session.update(SIM_DT);

        recorder.clear();
        session.draw(&mut recorder);
        log::trace!("Frame {}: {} draw calls", frames, recorder.calls().len());

        frames += 1;
    }

    println!(
        "Finished after {:.1}s: {:?}, turn {}, {} turns cleared, score {}, {} lives left",
        frames as f32 * SIM_DT,
        session.phase(),
        session.turn_index() + 1,
        session.turns_cleared(),
        session.score(),
        session.paddle().lives()
    );
}
