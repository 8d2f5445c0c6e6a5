//! cpal output stream mixing the active tone voices.
//!
//! The stream is opened lazily on the first tone, so a game that never makes a sound
//! never touches the audio device. If opening fails the engine stays silent for the
//! rest of the session.

use std::sync::{Arc, Mutex};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use tracing::{info, warn};

use super::{AudioSink, Tone, ToneVoice};

/// Maximum number of simultaneous voices.
const MAX_VOICES: usize = 16;

/// Shared between the game thread (adding voices) and the audio thread (mixing).
struct Mixer {
    voices: Vec<ToneVoice>,
    sample_rate: f32,
    master_volume: f32,
}

enum Backend {
    Uninitialized,
    Running {
        mixer: Arc<Mutex<Mixer>>,
        _stream: cpal::Stream,
    },
    Unavailable,
}

pub struct AudioEngine {
    backend: Backend,
    master_volume: f32,
}

impl AudioEngine {
    pub fn new(master_volume: f32) -> Self {
        Self {
            backend: Backend::Uninitialized,
            master_volume: master_volume.clamp(0.0, 1.0),
        }
    }

    fn ensure_started(&mut self) {
        if !matches!(self.backend, Backend::Uninitialized) {
            return;
        }
        self.backend = match open_stream(self.master_volume) {
            Ok((mixer, stream)) => Backend::Running {
                mixer,
                _stream: stream,
            },
            Err(e) => {
                warn!("audio unavailable, continuing without sound: {}", e);
                Backend::Unavailable
            }
        };
    }
}

impl AudioSink for AudioEngine {
    fn play(&mut self, tone: Tone) {
        self.ensure_started();
        let Backend::Running { mixer, .. } = &self.backend else {
            return;
        };
        if let Ok(mut mixer) = mixer.lock() {
            mixer.voices.retain(|v| !v.is_done());
            // Drop oldest if at capacity
            if mixer.voices.len() >= MAX_VOICES {
                mixer.voices.remove(0);
            }
            let voice = ToneVoice::new(tone, mixer.sample_rate);
            mixer.voices.push(voice);
        }
    }
}

fn open_stream(master_volume: f32) -> Result<(Arc<Mutex<Mixer>>, cpal::Stream), String> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or("No audio output device found")?;

    let config = device
        .default_output_config()
        .map_err(|e| format!("No default output config: {e}"))?;

    let sample_rate = config.sample_rate().0 as f32;
    let channels = config.channels() as usize;

    let mixer = Arc::new(Mutex::new(Mixer {
        voices: Vec::new(),
        sample_rate,
        master_volume,
    }));
    let mixer_clone = Arc::clone(&mixer);

    let stream = match config.sample_format() {
        cpal::SampleFormat::F32 => device
            .build_output_stream(
                &config.into(),
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    fill_buffer_f32(data, channels, &mixer_clone);
                },
                |err| warn!("audio stream error: {err}"),
                None,
            )
            .map_err(|e| format!("Failed to build f32 stream: {e}"))?,
        cpal::SampleFormat::I16 => device
            .build_output_stream(
                &config.into(),
                move |data: &mut [i16], _: &cpal::OutputCallbackInfo| {
                    fill_buffer_i16(data, channels, &mixer_clone);
                },
                |err| warn!("audio stream error: {err}"),
                None,
            )
            .map_err(|e| format!("Failed to build i16 stream: {e}"))?,
        format => return Err(format!("Unsupported sample format: {format:?}")),
    };

    stream.play().map_err(|e| format!("Failed to play stream: {e}"))?;
    info!(sample_rate, channels, "audio stream started");

    Ok((mixer, stream))
}

/// Mix every active voice into an interleaved f32 buffer.
fn fill_buffer_f32(data: &mut [f32], channels: usize, mixer: &Arc<Mutex<Mixer>>) {
    data.fill(0.0);

    let Ok(mut mixer) = mixer.lock() else {
        return;
    };
    let master = mixer.master_volume;

    for frame in data.chunks_mut(channels.max(1)) {
        let mut sample = 0.0_f32;
        for voice in mixer.voices.iter_mut() {
            if let Some(s) = voice.next_sample() {
                sample += s;
            }
        }
        let sample = (sample * master).clamp(-1.0, 1.0);
        frame.fill(sample);
    }

    mixer.voices.retain(|v| !v.is_done());
}

fn fill_buffer_i16(data: &mut [i16], channels: usize, mixer: &Arc<Mutex<Mixer>>) {
    let mut f32_buf = vec![0.0f32; data.len()];
    fill_buffer_f32(&mut f32_buf, channels, mixer);

    for (out, &sample) in data.iter_mut().zip(f32_buf.iter()) {
        *out = (sample * 32767.0) as i16;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::Waveform;

    fn mixer_with(tones: &[Tone], sample_rate: f32) -> Arc<Mutex<Mixer>> {
        Arc::new(Mutex::new(Mixer {
            voices: tones.iter().map(|t| ToneVoice::new(*t, sample_rate)).collect(),
            sample_rate,
            master_volume: 1.0,
        }))
    }

    #[test]
    fn test_stereo_frames_carry_same_sample() {
        let mixer = mixer_with(&[Tone::new(100.0, 1.0, Waveform::Square, 0.0, 0.5)], 1000.0);
        let mut data = vec![0.0f32; 64];

        fill_buffer_f32(&mut data, 2, &mixer);

        for frame in data.chunks(2) {
            assert_eq!(frame[0], frame[1]);
        }
        assert!(data.iter().any(|s| *s != 0.0));
    }

    #[test]
    fn test_overlapping_voices_are_clamped() {
        let loud = Tone::new(100.0, 1.0, Waveform::Square, 0.0, 0.9);
        let mixer = mixer_with(&[loud, loud, loud], 1000.0);
        let mut data = vec![0i16; 200];

        fill_buffer_i16(&mut data, 1, &mixer);

        assert!(data.iter().any(|s| *s == 32767 || *s == -32767));
    }

    #[test]
    fn test_finished_voices_are_removed() {
        let short = Tone::new(100.0, 0.01, Waveform::Sine, 0.0, 0.5);
        let mixer = mixer_with(&[short], 1000.0);
        let mut data = vec![0.0f32; 50];

        fill_buffer_f32(&mut data, 1, &mixer);

        assert!(mixer.lock().unwrap().voices.is_empty());
    }
}
