//! Tomb Bound headless runner
//!
//! Plays one seeded run with a simple autopilot and reports the score.
//!
//! Usage: `tomb-bound [--mute] [--volume=<0-1>] [seed] [tuning.json]`
//! `RUST_LOG=debug` shows spawns, death phases and audio cues.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use tomb_bound::assets::AssetCatalog;
    use tomb_bound::audio::LogAudio;
    use tomb_bound::consts::SIM_HZ;
    use tomb_bound::highscores::{HighScores, ScoreReporter};
    use tomb_bound::sim::{GameState, TickInput};
    use tomb_bound::{Game, Tuning};

    /// Ten minutes of play at the reference rate
    const MAX_TICKS: u64 = 10 * 60 * SIM_HZ as u64;
    const SCORES_FILE: &str = "tomb_bound_scores.json";

    /// Leaderboard that writes itself back after every report
    struct ScoreFile {
        scores: HighScores,
        path: PathBuf,
    }

    impl ScoreReporter for ScoreFile {
        fn report(&mut self, score: u64, player_name: &str) {
            self.scores.report(score, player_name);
            if let Err(e) = self.scores.save_to(&self.path) {
                log::warn!("Could not save high scores: {e}");
            }
        }
    }

    /// Jump when the nearest obstacle ahead is about to reach the player
    fn autopilot(state: &GameState) -> TickInput {
        let player = &state.player.rect;
        let lead = state.speed * 14.0;
        let jump = state.obstacles.iter().any(|o| {
            let gap = o.rect.left() - player.right();
            gap > 0.0 && gap < lead
        });
        TickInput { jump, pause: false }
    }

    pub fn run() -> Result<(), Box<dyn std::error::Error>> {
        let mut audio = LogAudio::new();
        let (flags, positional): (Vec<String>, Vec<String>) =
            std::env::args().skip(1).partition(|a| a.starts_with("--"));
        for flag in &flags {
            match flag.split_once('=') {
                Some(("--volume", vol)) => audio.set_volume(vol.parse()?),
                None if flag == "--mute" => audio.set_muted(true),
                _ => return Err(format!("unknown option {flag}").into()),
            }
        }

        let mut args = positional.into_iter();
        let seed = match args.next() {
            Some(arg) => arg.parse()?,
            None => 0x7b,
        };
        let tuning = match args.next() {
            Some(path) => Tuning::load(path)?,
            None => Tuning::default(),
        };

        let path = PathBuf::from(SCORES_FILE);
        let scores = ScoreFile {
            scores: HighScores::load_or_default(&path),
            path,
        };

        let mut game = Game::new(
            seed,
            tuning,
            AssetCatalog::placeholder(),
            Box::new(audio),
            Box::new(scores),
            "autopilot",
        )?;

        log::info!("Tomb Bound (headless) starting with seed {seed}");
        while !game.state().player.is_removed() && game.state().time_ticks < MAX_TICKS {
            let input = autopilot(game.state());
            game.step(&input);
        }

        let state = game.state();
        println!(
            "seed {seed}: score {} after {} ticks ({} health left)",
            state.score,
            state.time_ticks,
            state.player.health()
        );
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(e) = native::run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {}
