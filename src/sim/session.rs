//! Turn driver wiring the paddle, the bomber and the bomb manager
//!
//! Manager events are queued by the registered handlers and consumed at the
//! end of each [`Session::update`], after collisions are resolved.

use std::cell::RefCell;
use std::rc::Rc;

use crate::audio::SoundService;
use crate::input::InputSource;
use crate::renderer::{Drawable, Renderer, Updatable};
use crate::settings::{Settings, Tuning};

use super::bomb_manager::BombManager;
use super::bomber::Bomber;
use super::events::BombEvent;
use super::paddle::Paddle;
use super::turn::TurnTable;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Playing,
    /// Paddle ran out of lives
    GameOver,
}

pub struct Session<S: SoundService> {
    paddle: Paddle,
    manager: BombManager<S>,
    bomber: Bomber,
    turns: TurnTable,
    tuning: Tuning,
    turn_index: usize,
    turns_cleared: u32,
    score: u64,
    phase: SessionPhase,
    pending: Rc<RefCell<Vec<BombEvent>>>,
}

impl<S: SoundService> Session<S> {
    pub fn new(settings: &Settings, sound: S, input: Box<dyn InputSource>) -> Self {
        let tuning = settings.tuning.clone();

        let mut paddle = Paddle::new(&tuning, input);
        let (min_x, max_x) = tuning.paddle_bounds();
        paddle.set_movement_bounds(min_x, max_x);
        paddle.set_initial_position((min_x + max_x) / 2.0, tuning.paddle_y);

        let mut manager = BombManager::new(&tuning, sound);
        manager.set_bomb_movement_bounds(tuning.max_bomb_y());

        let pending = Rc::new(RefCell::new(Vec::new()));
        for event in BombEvent::ALL {
            let pending = pending.clone();
            manager.on(event, move || pending.borrow_mut().push(event));
        }

        let mut session = Self {
            paddle,
            manager,
            bomber: Bomber::new(&tuning, settings.seed),
            turns: settings.turns.clone(),
            tuning,
            turn_index: 0,
            turns_cleared: 0,
            score: 0,
            phase: SessionPhase::Playing,
            pending,
        };
        session.start_turn();
        session
    }

    /// Start a fresh game from the first turn with full lives
    pub fn restart(&mut self) {
        self.turn_index = 0;
        self.turns_cleared = 0;
        self.score = 0;
        self.phase = SessionPhase::Playing;
        self.paddle.revive(self.tuning.paddle_lives);
        self.start_turn();
    }

    fn start_turn(&mut self) {
        let turn_info = self.turns.get(self.turn_index);
        self.pending.borrow_mut().clear();
        self.manager.reset(turn_info);
        self.bomber.reset(&turn_info);
        log::info!(
            "Turn {} started ({} bombs, speed {})",
            self.turn_index + 1,
            turn_info.bombs_count,
            turn_info.bomb_speed
        );
    }

    fn clear_turn(&mut self) {
        log::info!("Turn {} cleared, score {}", self.turn_index + 1, self.score);
        self.turns_cleared += 1;
        self.turn_index += 1;
        self.start_turn();
    }

    fn process_events(&mut self) {
        let events: Vec<BombEvent> = self.pending.borrow_mut().drain(..).collect();
        for event in events {
            match event {
                BombEvent::BombCaught => {
                    self.score += self.turn_index as u64 + 1;
                }
                BombEvent::AllBombsCaught => {
                    self.clear_turn();
                    return;
                }
                BombEvent::BombReachTarget => {
                    self.bomber.stop();
                }
                BombEvent::BombExplode => {}
                BombEvent::AllBombsExploded => {
                    self.paddle.kill();
                    if self.paddle.lives() == 0 {
                        log::info!("Game over, final score {}", self.score);
                        self.phase = SessionPhase::GameOver;
                    } else {
                        log::info!(
                            "Turn {} lost, {} lives left",
                            self.turn_index + 1,
                            self.paddle.lives()
                        );
                        self.start_turn();
                    }
                    return;
                }
            }
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn turn_index(&self) -> usize {
        self.turn_index
    }

    pub fn turns_cleared(&self) -> u32 {
        self.turns_cleared
    }

    pub fn paddle(&self) -> &Paddle {
        &self.paddle
    }

    pub fn manager(&self) -> &BombManager<S> {
        &self.manager
    }

    pub fn bomber(&self) -> &Bomber {
        &self.bomber
    }
}

impl<S: SoundService> Updatable for Session<S> {
    fn update(&mut self, dt: f32) {
        if self.phase == SessionPhase::GameOver {
            return;
        }

        self.paddle.update(dt);
        if let Some(pos) = self.bomber.update(dt) {
            self.manager.drop_bomb_at(pos);
        }
        self.manager.update(dt);
        self.manager.check_collision(&self.paddle);

        self.process_events();

        // Nothing to catch, so nothing can end the turn
        if self.phase == SessionPhase::Playing && self.manager.turn_info().bombs_count == 0 {
            self.clear_turn();
        }
    }
}

impl<S: SoundService> Drawable for Session<S> {
    fn draw(&self, renderer: &mut dyn Renderer) {
        self.paddle.draw(renderer);
        self.manager.draw(renderer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::AudioManager;
    use crate::input::SharedInput;
    use crate::renderer::{FrameRecorder, SpriteId};
    use crate::sim::TurnInfo;

    fn quick_settings() -> Settings {
        let mut settings = Settings::default();
        settings.turns = TurnTable(vec![
            TurnInfo {
                bombs_count: 2,
                bomb_speed: 200.0,
                drop_interval: 0.2,
            },
            TurnInfo {
                bombs_count: 3,
                bomb_speed: 250.0,
                drop_interval: 0.2,
            },
        ]);
        settings
    }

    fn new_session(settings: &Settings) -> Session<AudioManager> {
        Session::new(settings, AudioManager::new(), Box::new(SharedInput::new()))
    }

    fn run(session: &mut Session<AudioManager>, seconds: f32) {
        let frames = (seconds / 0.02) as usize;
        for _ in 0..frames {
            session.update(0.02);
        }
    }

    #[test]
    fn test_missed_bombs_cost_lives_until_game_over() {
        let mut settings = quick_settings();
        // Paddle sits below the target line and can never catch
        settings.tuning.paddle_y = settings.tuning.field_height;
        let mut session = new_session(&settings);

        run(&mut session, 60.0);

        assert_eq!(session.phase(), SessionPhase::GameOver);
        assert_eq!(session.paddle().lives(), 0);
        assert_eq!(session.score(), 0);
        assert_eq!(session.turn_index(), 0);

        // Frozen once the game is over
        let before = session.manager().bombs_caught();
        run(&mut session, 1.0);
        assert_eq!(session.manager().bombs_caught(), before);
    }

    #[test]
    fn test_full_width_paddle_clears_turns() {
        let mut settings = quick_settings();
        // Paddle as wide as the field catches every bomb
        settings.tuning.paddle_width = settings.tuning.field_width;
        let mut session = new_session(&settings);

        run(&mut session, 10.0);

        assert_eq!(session.phase(), SessionPhase::Playing);
        assert_eq!(session.paddle().lives(), settings.tuning.paddle_lives);
        assert!(session.turns_cleared() >= 2);
        // 2 bombs at 1 point, then 3 bombs at 2 points
        assert!(session.score() >= 2 + 3 * 2);
    }

    #[test]
    fn test_reach_target_stops_bomber() {
        let mut settings = quick_settings();
        settings.tuning.paddle_y = settings.tuning.field_height;
        settings.turns = TurnTable(vec![TurnInfo {
            bombs_count: 50,
            bomb_speed: 400.0,
            drop_interval: 0.1,
        }]);
        let mut session = new_session(&settings);

        while !session.manager().is_exploding_bombs() {
            session.update(0.02);
        }
        assert!(!session.bomber().is_active());
        assert!(session.bomber().drops_left() > 0);
    }

    #[test]
    fn test_restart_restores_lives() {
        let mut settings = quick_settings();
        settings.tuning.paddle_y = settings.tuning.field_height;
        let mut session = new_session(&settings);
        run(&mut session, 60.0);
        assert_eq!(session.phase(), SessionPhase::GameOver);

        session.restart();
        assert_eq!(session.phase(), SessionPhase::Playing);
        assert_eq!(session.paddle().lives(), settings.tuning.paddle_lives);
        assert!(session.bomber().is_active());
    }

    #[test]
    fn test_empty_turn_is_cleared() {
        let mut settings = quick_settings();
        settings.turns.0.insert(0, TurnInfo::with_bombs(0));
        let mut session = new_session(&settings);
        assert_eq!(session.manager().turn_info().bombs_count, 0);

        session.update(0.02);
        assert_eq!(session.turn_index(), 1);
        assert_eq!(session.turns_cleared(), 1);
        assert_eq!(session.score(), 0);
        assert_eq!(session.bomber().drops_left(), 2);
    }

    #[test]
    fn test_frameless_explosions_still_end_the_turn() {
        let mut settings =
            Settings::from_json(r#"{ "tuning": { "bomb_explode_frames": 0 } }"#).unwrap();
        settings.turns = quick_settings().turns;
        settings.tuning.paddle_y = settings.tuning.field_height;
        let mut session = new_session(&settings);

        run(&mut session, 60.0);

        assert_eq!(session.phase(), SessionPhase::GameOver);
        assert_eq!(session.paddle().lives(), 0);
    }

    #[test]
    fn test_draw_includes_paddle_layers() {
        let settings = quick_settings();
        let session = new_session(&settings);
        let mut recorder = FrameRecorder::new();
        session.draw(&mut recorder);
        assert_eq!(recorder.count(SpriteId::Paddle), settings.tuning.paddle_lives as usize);
    }
}
