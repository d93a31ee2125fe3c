/// Audio collaborator seam.
///
/// The simulation only names cues; what a cue sounds like is up to the sink.
/// Playback is fire-and-forget: sinks must not block and nothing waits on them.

use std::io::Write;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::trace;

/// Game-over stingers; one is picked at random when the game-over screen opens.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stinger {
    ToBeContinued,
    EmotionalDamage,
    Aun,
}

impl Stinger {
    pub const ALL: [Stinger; 3] = [Stinger::ToBeContinued, Stinger::EmotionalDamage, Stinger::Aun];

    pub fn pick(rng: &mut impl Rng) -> Stinger {
        *Self::ALL.choose(rng).unwrap_or(&Stinger::ToBeContinued)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cue {
    Jump,
    Score,
    Coin,
    Hit,
    Explosion,
    MusicStart,
    MusicStop,
    GameOver(Stinger),
}

impl Cue {
    /// Preset playback volume in `0.0..=1.0`.
    pub fn volume(&self) -> f32 {
        match self {
            Cue::Jump | Cue::Score => 0.03,
            Cue::Coin => 0.15,
            Cue::Hit => 0.3,
            Cue::Explosion => 0.05,
            Cue::GameOver(_) => 0.3,
            Cue::MusicStart | Cue::MusicStop => 0.3,
        }
    }
}

pub trait AudioSink {
    fn play(&mut self, cue: Cue);
}

/// Used when no audio device is available.
#[derive(Debug, Default)]
pub struct SilentAudio;

impl AudioSink for SilentAudio {
    fn play(&mut self, cue: Cue) {
        trace!(?cue, "silent cue");
    }
}

/// Rings the terminal bell for cues loud enough to matter.
/// Background music has no terminal rendition.
pub struct BellAudio<W: Write> {
    out: W,
    threshold: f32,
}

impl<W: Write> BellAudio<W> {
    pub fn new(out: W) -> Self {
        BellAudio {
            out,
            threshold: 0.15,
        }
    }
}

impl<W: Write> AudioSink for BellAudio<W> {
    fn play(&mut self, cue: Cue) {
        match cue {
            Cue::MusicStart | Cue::MusicStop => {}
            _ if cue.volume() >= self.threshold => {
                // A failed bell is not worth interrupting the frame for.
                let _ = self.out.write_all(b"\x07").and_then(|_| self.out.flush());
            }
            _ => {}
        }
        trace!(?cue, "cue");
    }
}
