//! Audio cues.  The simulation only emits `Cue` values; a sink decides how
//! (and whether) to play them.  Playback is fire-and-forget: nothing in the
//! game waits on a cue finishing.

use std::io::Write;

use crate::config::AudioConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cue {
    /// A laser was fired.
    Laser,
    /// A meteor was destroyed or the player was hit.
    Explosion,
    /// Background music (re)starts from the beginning and loops.
    MusicStart,
}

pub trait AudioSink {
    fn play(&mut self, cue: Cue);
}

impl<A: AudioSink + ?Sized> AudioSink for Box<A> {
    fn play(&mut self, cue: Cue) {
        (**self).play(cue);
    }
}

/// Discards every cue (`--mute`).
pub struct NullSink;

impl AudioSink for NullSink {
    fn play(&mut self, cue: Cue) {
        log::trace!("muted cue {cue:?}");
    }
}

/// Terminal stand-in for the sound effects: rings the bell on cues whose
/// configured volume is audible.  A terminal cannot loop music, so music
/// cues are only logged.
pub struct BellSink<W: Write> {
    out: W,
    settings: AudioConfig,
}

impl<W: Write> BellSink<W> {
    pub fn new(out: W, settings: AudioConfig) -> Self {
        Self { out, settings }
    }

    fn volume(&self, cue: Cue) -> f32 {
        match cue {
            Cue::Laser => self.settings.laser_volume,
            Cue::Explosion => self.settings.explosion_volume,
            Cue::MusicStart => self.settings.music_volume,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> AudioSink for BellSink<W> {
    fn play(&mut self, cue: Cue) {
        if !self.settings.enabled {
            return;
        }
        let volume = self.volume(cue);
        match cue {
            Cue::MusicStart => log::debug!("music restarted (volume {volume})"),
            // The laser is the quieter effect; only the explosion rings.
            Cue::Explosion if volume > 0.5 => {
                // Bell failures are logged, never propagated.
                if let Err(e) = self.out.write_all(b"\x07").and_then(|_| self.out.flush()) {
                    log::warn!("bell failed: {e}");
                }
            }
            _ => log::trace!("cue {cue:?} below bell volume"),
        }
    }
}

/// Collects cues in order; useful for inspecting what a frame emitted.
#[derive(Debug, Default)]
pub struct CueRecorder {
    pub cues: Vec<Cue>,
}

impl AudioSink for CueRecorder {
    fn play(&mut self, cue: Cue) {
        self.cues.push(cue);
    }
}
