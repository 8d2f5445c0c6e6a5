//! Procedural sound cues.
//!
//! The simulation never plays audio itself. Each tick it appends [`Tone`] commands to a
//! queue; the game loop drains the queue into an [`AudioSink`] once the tick is done.
//! Tones are fire-and-forget and may overlap.

mod engine;
mod synth;

pub use engine::AudioEngine;
pub use synth::ToneVoice;

use crate::game::PhysicsEvents;

/// Oscillator shape of a tone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
}

/// One scheduled tone
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    /// Hz
    pub frequency: f32,
    /// Seconds
    pub duration: f32,
    pub waveform: Waveform,
    /// Seconds from the moment the tone is handed to the sink
    pub delay: f32,
    /// Linear gain, 0..1
    pub volume: f32,
}

impl Tone {
    pub const fn new(frequency: f32, duration: f32, waveform: Waveform, delay: f32, volume: f32) -> Self {
        Self {
            frequency,
            duration,
            waveform,
            delay,
            volume,
        }
    }
}

/// Anything that can play tones. Implementations must never block the caller.
pub trait AudioSink {
    fn play(&mut self, tone: Tone);
}

/// Sink used when sound is turned off
pub struct Silent;

impl AudioSink for Silent {
    fn play(&mut self, _tone: Tone) {}
}

pub const HIT: Tone = Tone::new(900.0, 0.06, Waveform::Square, 0.0, 0.06);
pub const SCORE: Tone = Tone::new(220.0, 0.18, Waveform::Sine, 0.0, 0.12);

// C5, E5, G5, C6
const VICTORY_NOTES: [f32; 4] = [523.25, 659.25, 783.99, 1046.5];
const VICTORY_NOTE_SPACING: f32 = 0.3;

/// Rising arpeggio followed by a short sawtooth flourish
pub fn victory() -> Vec<Tone> {
    let mut tones: Vec<Tone> = VICTORY_NOTES
        .iter()
        .enumerate()
        .map(|(i, &freq)| {
            Tone::new(freq, 0.25, Waveform::Sine, i as f32 * VICTORY_NOTE_SPACING, 0.12)
        })
        .collect();
    let flourish_at = VICTORY_NOTES.len() as f32 * VICTORY_NOTE_SPACING + 0.05;
    tones.push(Tone::new(880.0, 0.18, Waveform::Sawtooth, flourish_at, 0.14));
    tones
}

/// Tones triggered by one physics step
pub fn cues_for(events: &PhysicsEvents) -> Vec<Tone> {
    let mut tones = Vec::new();
    if events.paddle_hit.is_some() {
        tones.push(HIT);
    }
    if events.point.is_some() {
        tones.push(SCORE);
    }
    if events.winner.is_some() {
        tones.extend(victory());
    }
    tones
}
