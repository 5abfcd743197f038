//! Audio cues
//!
//! The simulation never plays sound itself. `Game` maps events to cues and
//! hands them to whatever `AudioCues` backend is plugged in; having no audio
//! at all never changes the run.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    /// Player left the ground
    Jump,
    /// Player took damage and survived
    Hurt,
    /// Player died
    Death,
    /// Obstacle shattered on contact
    Destroy,
}

impl SoundCue {
    /// Asset name of the cue
    pub fn as_str(self) -> &'static str {
        match self {
            SoundCue::Jump => "jump",
            SoundCue::Hurt => "hurt",
            SoundCue::Death => "death",
            SoundCue::Destroy => "destroy",
        }
    }

    /// Mixer group the cue plays in
    pub fn category(self) -> CueCategory {
        match self {
            SoundCue::Jump => CueCategory::Player,
            SoundCue::Hurt | SoundCue::Death | SoundCue::Destroy => CueCategory::Game,
        }
    }
}

/// Mixer group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CueCategory {
    Player,
    Game,
}

impl CueCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            CueCategory::Player => "player",
            CueCategory::Game => "game",
        }
    }
}

/// Audio collaborator
pub trait AudioCues {
    fn play_cue(&mut self, cue: SoundCue, category: CueCategory);

    /// Background music pauses on death and resumes on restart
    fn set_music_paused(&mut self, _paused: bool) {}
}

/// Backend that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentAudio;

impl AudioCues for SilentAudio {
    fn play_cue(&mut self, _cue: SoundCue, _category: CueCategory) {}
}

/// Backend that logs cues instead of playing them (headless runs)
#[derive(Debug, Clone)]
pub struct LogAudio {
    volume: f32,
    muted: bool,
}

impl Default for LogAudio {
    fn default() -> Self {
        Self::new()
    }
}

impl LogAudio {
    pub fn new() -> Self {
        Self {
            volume: 0.8,
            muted: false,
        }
    }

    /// Set volume (0.0 - 1.0)
    pub fn set_volume(&mut self, vol: f32) {
        self.volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.volume }
    }
}

impl AudioCues for LogAudio {
    fn play_cue(&mut self, cue: SoundCue, category: CueCategory) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        log::debug!("Cue {}/{} at volume {vol:.2}", category.as_str(), cue.as_str());
    }

    fn set_music_paused(&mut self, paused: bool) {
        log::debug!("Music {}", if paused { "paused" } else { "resumed" });
    }
}

/// Backend that records cues, for tests and replays.
/// Clones share one log, so a handle kept outside still sees what a boxed
/// copy received.
#[derive(Debug, Clone, Default)]
pub struct RecordingAudio {
    cues: Rc<RefCell<Vec<(SoundCue, CueCategory)>>>,
    music_paused: Rc<Cell<bool>>,
}

impl RecordingAudio {
    pub fn cues(&self) -> Vec<(SoundCue, CueCategory)> {
        self.cues.borrow().clone()
    }

    pub fn music_paused(&self) -> bool {
        self.music_paused.get()
    }
}

impl AudioCues for RecordingAudio {
    fn play_cue(&mut self, cue: SoundCue, category: CueCategory) {
        self.cues.borrow_mut().push((cue, category));
    }

    fn set_music_paused(&mut self, paused: bool) {
        self.music_paused.set(paused);
    }
}
