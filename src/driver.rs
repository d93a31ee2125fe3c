/// The terminal-independent half of the frame driver.
///
/// Owns the world, the save store, the audio sink and the RNG, and carries
/// out the effects the simulation asks for.  The binary adds terminal setup,
/// input polling, drawing and frame pacing on top.

use rand::Rng;
use tracing::warn;

use crate::audio::{AudioSink, Cue};
use crate::compute::{handle_input, init_state, tick};
use crate::config::GameConfig;
use crate::entities::{Effect, FrameCounts, GameWorld, Input};
use crate::persistence::SaveStore;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

pub struct Driver<A: AudioSink, R: Rng> {
    pub world: GameWorld,
    store: SaveStore,
    audio: A,
    rng: R,
}

impl<A: AudioSink, R: Rng> Driver<A, R> {
    /// Load progress, build the first session and start the music.
    pub fn new(config: GameConfig, frames: FrameCounts, store: SaveStore, mut audio: A, mut rng: R) -> Self {
        let progress = store.load();
        let world = init_state(config, frames, progress, &mut rng);
        audio.play(Cue::MusicStart);
        Driver {
            world,
            store,
            audio,
            rng,
        }
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    /// Save progress outside the normal effect flow, e.g. before bailing
    /// out on a terminal failure.
    pub fn persist(&mut self) {
        self.apply(vec![Effect::Persist]);
    }

    /// Apply this frame's inputs in arrival order, then advance one tick.
    /// Stops at the first quit without ticking.
    pub fn frame(&mut self, inputs: &[Input]) -> Control {
        for &input in inputs {
            let effects = handle_input(&mut self.world, input, &mut self.rng);
            if self.apply(effects) == Control::Quit {
                return Control::Quit;
            }
        }
        let effects = tick(&mut self.world, &mut self.rng);
        self.apply(effects)
    }

    fn apply(&mut self, effects: Vec<Effect>) -> Control {
        for effect in effects {
            match effect {
                Effect::Play(cue) => self.audio.play(cue),
                Effect::Persist => {
                    if let Err(e) = self.store.save(&self.world.progress) {
                        warn!(error = %e, path = %self.store.path().display(), "could not save progress");
                    }
                }
                Effect::Quit => return Control::Quit,
            }
        }
        Control::Continue
    }
}
