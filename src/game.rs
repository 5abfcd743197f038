//! Simulation core service
//!
//! `Game` owns the deterministic `GameState` and the outside collaborators.
//! Each step runs one tick and then forwards the tick's events: cues to audio
//! and the final score to the reporter.

use crate::assets::AssetCatalog;
use crate::audio::{AudioCues, SoundCue};
use crate::highscores::ScoreReporter;
use crate::sim::{GameEvent, GameState, TickInput, tick};
use crate::tuning::{Tuning, TuningError};

pub struct Game {
    state: GameState,
    tuning: Tuning,
    assets: AssetCatalog,
    audio: Box<dyn AudioCues>,
    scores: Box<dyn ScoreReporter>,
    player_name: String,
}

impl Game {
    pub fn new(
        seed: u64,
        tuning: Tuning,
        assets: AssetCatalog,
        audio: Box<dyn AudioCues>,
        scores: Box<dyn ScoreReporter>,
        player_name: impl Into<String>,
    ) -> Result<Self, TuningError> {
        let state = GameState::with_assets(seed, tuning.clone(), &assets)?;
        Ok(Self {
            state,
            tuning,
            assets,
            audio,
            scores,
            player_name: player_name.into(),
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    pub fn set_player_name(&mut self, name: impl Into<String>) {
        self.player_name = name.into();
    }

    /// Run one tick and dispatch its events. Returns them for the caller too.
    pub fn step(&mut self, input: &TickInput) -> Vec<GameEvent> {
        tick(&mut self.state, input);
        let events = self.state.drain_events();
        for event in &events {
            self.dispatch(event);
        }
        events
    }

    fn dispatch(&mut self, event: &GameEvent) {
        match event {
            GameEvent::Jumped => self.cue(SoundCue::Jump),
            GameEvent::Hurt { .. } => self.cue(SoundCue::Hurt),
            GameEvent::Died { score } => {
                self.audio.set_music_paused(true);
                self.cue(SoundCue::Death);
                self.scores.report(*score, &self.player_name);
            }
            GameEvent::ObstacleDestroyed { .. } => self.cue(SoundCue::Destroy),
            GameEvent::ObstacleSpawned { .. }
            | GameEvent::DeathPhaseChanged(_)
            | GameEvent::SpeedIncreased { .. }
            | GameEvent::DeathSequenceFinished => {}
        }
    }

    fn cue(&mut self, cue: SoundCue) {
        self.audio.play_cue(cue, cue.category());
    }

    /// Throw away the current run and start a fresh one in a single step.
    /// On error the current run is left untouched.
    pub fn restart(&mut self, seed: u64) -> Result<(), TuningError> {
        self.state = GameState::with_assets(seed, self.tuning.clone(), &self.assets)?;
        self.audio.set_music_paused(false);
        log::info!("Restarted with seed {seed}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::audio::{CueCategory, RecordingAudio, SilentAudio};
    use crate::highscores::NoScores;
    use crate::sim::{GamePhase, Obstacle, ObstacleKind};

    #[derive(Default, Clone)]
    struct SharedScores(Rc<RefCell<Vec<(u64, String)>>>);

    impl ScoreReporter for SharedScores {
        fn report(&mut self, score: u64, player_name: &str) {
            self.0.borrow_mut().push((score, player_name.to_string()));
        }
    }

    fn hazard(game: &mut Game) {
        let kind = ObstacleKind::Boulder;
        let x = game.state.player.rect.x - 20.0;
        let ground = game.state.tuning.ground_y;
        let obstacle = Obstacle::spawn(7, kind, kind.art_size(), x, ground, 0.0, &mut game.state.rng);
        game.state.obstacles.push(obstacle);
    }

    #[test]
    fn test_events_reach_collaborators() {
        let audio = RecordingAudio::default();
        let scores = SharedScores::default();
        let tuning = Tuning {
            max_health: 1,
            ..Default::default()
        };
        let mut game = Game::new(
            9,
            tuning,
            AssetCatalog::placeholder(),
            Box::new(audio.clone()),
            Box::new(scores.clone()),
            "tester",
        )
        .unwrap();

        game.step(&TickInput {
            jump: true,
            pause: false,
        });
        assert_eq!(audio.cues()[0], (SoundCue::Jump, CueCategory::Player));
        assert!(game.state().events.is_empty());

        // Land, then die
        while game.state().player.rect.bottom() < game.state().tuning.ground_y {
            game.step(&TickInput::default());
        }
        game.step(&TickInput::default());
        let score = game.state().score;
        hazard(&mut game);
        game.step(&TickInput::default());

        assert_eq!(game.state().phase, GamePhase::GameOver);
        assert!(audio.cues().contains(&(SoundCue::Death, CueCategory::Game)));
        assert!(!audio.cues().iter().any(|(c, _)| *c == SoundCue::Hurt));
        assert!(audio.music_paused());
        assert_eq!(*scores.0.borrow(), vec![(score, "tester".to_string())]);
    }

    #[test]
    fn test_step_leaves_no_pending_events() {
        let mut game = Game::new(
            4,
            Tuning::default(),
            AssetCatalog::placeholder(),
            Box::new(SilentAudio),
            Box::new(NoScores),
            "p",
        )
        .unwrap();
        let mut seen = 0;
        for _ in 0..2000 {
            seen += game.step(&TickInput::default()).len();
            assert!(game.state().events.is_empty());
        }
        assert!(seen > 0);
    }

    #[test]
    fn test_restart_after_death_resumes_music() {
        let audio = RecordingAudio::default();
        let tuning = Tuning {
            max_health: 1,
            ..Default::default()
        };
        let mut game = Game::new(
            3,
            tuning,
            AssetCatalog::placeholder(),
            Box::new(audio.clone()),
            Box::new(NoScores),
            "p",
        )
        .unwrap();
        hazard(&mut game);
        game.step(&TickInput::default());
        assert!(game.state().is_game_over());
        assert!(audio.music_paused());

        game.restart(8).unwrap();
        assert!(!audio.music_paused());
        assert_eq!(game.state().phase, GamePhase::Playing);
        assert_eq!(game.state().seed, 8);
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut game = Game::new(
            1,
            Tuning::default(),
            AssetCatalog::placeholder(),
            Box::new(RecordingAudio::default()),
            Box::new(NoScores),
            "p",
        )
        .unwrap();
        for _ in 0..50 {
            game.step(&TickInput::default());
        }
        game.restart(1).unwrap();
        assert_eq!(game.state().score, 0);
        assert_eq!(game.state().time_ticks, 0);
        assert_eq!(
            serde_json::to_string(game.state()).unwrap(),
            serde_json::to_string(&GameState::new(1)).unwrap()
        );
    }
}
