//! One play session: the game state plus everything a frame needs to move
//! it forward (clock, spawn timer, RNG, audio sink).
//!
//! Frame order: clock tick → fire / restart actions → spawn triggers →
//! simulation step.  Rendering is left to the caller so the session can be
//! driven headless in tests.

use std::time::Duration;

use rand::Rng;

use crate::audio::{AudioSink, Cue};
use crate::clock::{FrameClock, SpawnTimer, TimeSource};
use crate::compute::{self, Rules, Transition};
use crate::config::{ConfigError, GameConfig};
use crate::entities::GameState;
use crate::input::FrameInput;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Session<T: TimeSource, R: Rng, A: AudioSink> {
    state: GameState,
    rules: Rules,
    clock: FrameClock<T>,
    spawner: SpawnTimer,
    rng: R,
    audio: A,
}

impl<T: TimeSource, R: Rng, A: AudioSink> Session<T, R, A> {
    /// Build a session and start the background music.  The config is
    /// validated first; nothing is played if it is rejected.
    pub fn new(
        config: &GameConfig,
        time: T,
        mut rng: R,
        mut audio: A,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let rules = Rules::from(config);
        let state = compute::init_state(&rules, &mut rng);
        audio.play(Cue::MusicStart);
        log::info!(
            "session started: {}x{} world, {} stars",
            rules.width,
            rules.height,
            state.stars.len()
        );
        Ok(Self {
            state,
            rules,
            clock: FrameClock::new(time, config.max_frame_dt()),
            spawner: SpawnTimer::new(config.spawn_interval()),
            rng,
            audio,
        })
    }

    /// Run one frame with the input sampled for it.
    pub fn frame(&mut self, input: &FrameInput) -> Flow {
        let dt = self.clock.tick();
        if input.quit {
            log::info!("quit requested");
            return Flow::Quit;
        }

        for _ in 0..input.fire {
            let t = compute::fire_laser(&self.state, &self.rules);
            self.apply(t);
        }
        if input.restart && self.state.is_game_over() {
            self.restart();
        }

        // The timer keeps running through game over; its triggers are
        // simply dropped until the next round.
        let triggers = self.spawner.advance(Duration::from_secs_f32(dt));
        for _ in 0..triggers {
            self.state = compute::spawn_meteors(&self.state, &self.rules, &mut self.rng);
        }

        let t = compute::tick(&self.state, &self.rules, input.direction, dt);
        self.apply(t);
        Flow::Continue
    }

    /// Full reset to a fresh round, music included.
    pub fn restart(&mut self) {
        let t = compute::reset(&self.state, &self.rules);
        self.apply(t);
    }

    fn apply(&mut self, transition: Transition) {
        for cue in transition.cues {
            self.audio.play(cue);
        }
        self.state = transition.state;
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for scripted scenarios.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }
}
