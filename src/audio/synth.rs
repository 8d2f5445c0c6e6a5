//! Oscillator voice rendering one [`Tone`] sample by sample.

use std::f32::consts::TAU;

use super::{Tone, Waveform};

// Short linear ramps at both ends keep the square and sawtooth cues from clicking
const RAMP_SECONDS: f32 = 0.004;

pub struct ToneVoice {
    tone: Tone,
    phase: f32,
    /// Samples still to wait before the tone starts
    delay_left: u32,
    /// Samples rendered since the tone started
    played: u32,
    length: u32,
    ramp: u32,
    step: f32,
}

impl ToneVoice {
    pub fn new(tone: Tone, sample_rate: f32) -> Self {
        let length = (tone.duration.max(0.0) * sample_rate) as u32;
        Self {
            tone,
            phase: 0.0,
            delay_left: (tone.delay.max(0.0) * sample_rate) as u32,
            played: 0,
            length,
            ramp: ((RAMP_SECONDS * sample_rate) as u32).min(length / 2).max(1),
            step: tone.frequency / sample_rate,
        }
    }

    pub fn is_done(&self) -> bool {
        self.delay_left == 0 && self.played >= self.length
    }

    /// Next mono sample, silence while delayed, `None` once finished
    pub fn next_sample(&mut self) -> Option<f32> {
        if self.delay_left > 0 {
            self.delay_left -= 1;
            return Some(0.0);
        }
        if self.played >= self.length {
            return None;
        }

        let value = oscillate(self.tone.waveform, self.phase);
        self.phase = (self.phase + self.step).fract();

        let from_end = self.length - self.played;
        let envelope = (self.played.min(from_end) as f32 / self.ramp as f32).min(1.0);
        self.played += 1;

        Some(value * envelope * self.tone.volume)
    }
}

/// One period of `waveform`, phase in [0, 1)
fn oscillate(waveform: Waveform, phase: f32) -> f32 {
    match waveform {
        Waveform::Sine => (phase * TAU).sin(),
        Waveform::Square => {
            if phase < 0.5 {
                1.0
            } else {
                -1.0
            }
        }
        Waveform::Sawtooth => 2.0 * phase - 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delay_then_tone_then_done() {
        let tone = Tone::new(100.0, 0.5, Waveform::Square, 0.25, 0.5);
        let mut voice = ToneVoice::new(tone, 1000.0);

        for _ in 0..250 {
            assert_eq!(voice.next_sample(), Some(0.0));
        }
        let audible: Vec<f32> = std::iter::from_fn(|| voice.next_sample()).collect();

        assert_eq!(audible.len(), 500);
        assert!(voice.is_done());
        assert!(audible.iter().all(|s| s.abs() <= 0.5));
        assert!(audible.iter().any(|s| s.abs() > 0.4));
    }

    #[test]
    fn test_zero_duration_finishes_immediately() {
        let tone = Tone::new(440.0, 0.0, Waveform::Sine, 0.0, 1.0);
        let mut voice = ToneVoice::new(tone, 44100.0);
        assert!(voice.is_done());
        assert_eq!(voice.next_sample(), None);
    }

    #[test]
    fn test_waveform_ranges() {
        for waveform in [
            Waveform::Sine,
            Waveform::Square,
            Waveform::Sawtooth,
        ] {
            for i in 0..100 {
                let v = oscillate(waveform, i as f32 / 100.0);
                assert!((-1.0..=1.0).contains(&v), "{:?} produced {}", waveform, v);
            }
        }
    }
}
