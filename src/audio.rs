//! Audio capability layer for the speaker and microphone tests
//!
//! Owns at most one cpal output stream and one input stream at a time.
//! Starting a new stream drops the previous handle first, which stops
//! playback/capture; dropping the engine stops everything. Streams are
//! not Send, so the engine lives on the UI thread.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, SampleRate, Stream, StreamConfig};
use thiserror::Error;
use tracing::warn;

/// Tone generator range in Hz
pub const MIN_TONE_HZ: u32 = 20;
pub const MAX_TONE_HZ: u32 = 20_000;

/// Duration of a stereo channel burst in seconds
const BURST_SECS: f32 = 0.5;
/// Frequency of the channel burst tone
const BURST_HZ: f32 = 440.0;
/// Peak amplitude for generated tones
const TONE_AMPLITUDE: f32 = 0.4;

/// Samples retained from the microphone for the waveform view
const CAPTURE_BUFFER_SAMPLES: usize = 8192;

/// Audio device and stream failures
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("no audio output device available")]
    NoOutputDevice,
    #[error("no audio input device available")]
    NoInputDevice,
    #[error("unsupported sample format: {0}")]
    UnsupportedFormat(SampleFormat),
    #[error("failed to query stream config: {0}")]
    Config(#[from] cpal::DefaultStreamConfigError),
    #[error("failed to build stream: {0}")]
    Build(#[from] cpal::BuildStreamError),
    #[error("failed to start stream: {0}")]
    Play(#[from] cpal::PlayStreamError),
}

/// Which stereo channel a burst targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StereoSide {
    Left,
    Right,
}

impl StereoSide {
    /// Interleaved channel index within a frame
    pub fn channel_index(self) -> usize {
        match self {
            StereoSide::Left => 0,
            StereoSide::Right => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StereoSide::Left => "Left",
            StereoSide::Right => "Right",
        }
    }
}

struct InputCapture {
    _stream: Stream,
    buffer: Arc<Mutex<VecDeque<f32>>>,
}

/// Owns the active audio streams for the test screen
pub struct AudioEngine {
    host: cpal::Host,
    output: Option<Stream>,
    /// Shared with the tone callback so frequency changes apply live
    tone_hz: Arc<AtomicU32>,
    tone_playing: bool,
    input: Option<InputCapture>,
}

impl Default for AudioEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioEngine {
    pub fn new() -> Self {
        AudioEngine {
            host: cpal::default_host(),
            output: None,
            tone_hz: Arc::new(AtomicU32::new(440)),
            tone_playing: false,
            input: None,
        }
    }

    /// Play a decaying burst into one stereo channel only.
    ///
    /// Replaces any active output stream.
    pub fn play_channel_burst(&mut self, side: StereoSide) -> Result<(), AudioError> {
        // Drop first so two rapid presses never hold two streams
        self.stop_output();

        let (device, config, sample_rate) = self.output_device()?;
        let channels = config.channels as usize;
        let target = side.channel_index().min(channels.saturating_sub(1));

        let mut sample_clock = 0u64;
        let stream = device.build_output_stream(
            &config,
            move |data: &mut [f32], _| {
                for frame in data.chunks_mut(channels) {
                    let t = sample_clock as f32 / sample_rate;
                    let value =
                        burst_envelope(t) * (t * BURST_HZ * 2.0 * std::f32::consts::PI).sin();
                    for (ch, sample) in frame.iter_mut().enumerate() {
                        *sample = if ch == target { value } else { 0.0 };
                    }
                    sample_clock += 1;
                }
            },
            |err| warn!("output stream error: {err}"),
            None,
        )?;
        stream.play()?;

        self.output = Some(stream);
        Ok(())
    }

    /// Start the continuous tone generator at `hz` (clamped to the
    /// audible range). Replaces any active output stream.
    pub fn play_tone(&mut self, hz: u32) -> Result<(), AudioError> {
        self.stop_output();

        let hz = clamp_tone_hz(hz);
        self.tone_hz.store(hz, Ordering::Relaxed);

        let (device, config, sample_rate) = self.output_device()?;
        let channels = config.channels as usize;
        let tone_hz = Arc::clone(&self.tone_hz);

        let mut phase = 0f32;
        let stream = device.build_output_stream(
            &config,
            move |data: &mut [f32], _| {
                let hz = tone_hz.load(Ordering::Relaxed) as f32;
                let step = hz * 2.0 * std::f32::consts::PI / sample_rate;
                for frame in data.chunks_mut(channels) {
                    let value = TONE_AMPLITUDE * phase.sin();
                    for sample in frame.iter_mut() {
                        *sample = value;
                    }
                    phase += step;
                    if phase > 2.0 * std::f32::consts::PI {
                        phase -= 2.0 * std::f32::consts::PI;
                    }
                }
            },
            |err| warn!("output stream error: {err}"),
            None,
        )?;
        stream.play()?;

        self.output = Some(stream);
        self.tone_playing = true;
        Ok(())
    }

    /// Adjust the tone frequency; takes effect immediately if the tone
    /// is playing, otherwise just updates the stored value.
    pub fn set_tone_hz(&mut self, hz: u32) {
        self.tone_hz.store(clamp_tone_hz(hz), Ordering::Relaxed);
    }

    pub fn tone_hz(&self) -> u32 {
        self.tone_hz.load(Ordering::Relaxed)
    }

    pub fn tone_playing(&self) -> bool {
        self.tone_playing
    }

    /// Drop the output stream, stopping playback
    pub fn stop_output(&mut self) {
        self.output = None;
        self.tone_playing = false;
    }

    /// Start capturing microphone samples into a bounded ring buffer.
    ///
    /// Replaces any active capture.
    pub fn start_capture(&mut self) -> Result<(), AudioError> {
        self.stop_capture();

        let device = self
            .host
            .default_input_device()
            .ok_or(AudioError::NoInputDevice)?;
        let supported = device.default_input_config()?;
        if supported.sample_format() != SampleFormat::F32 {
            return Err(AudioError::UnsupportedFormat(supported.sample_format()));
        }
        let config: StreamConfig = supported.into();
        let channels = config.channels as usize;

        let buffer = Arc::new(Mutex::new(VecDeque::with_capacity(CAPTURE_BUFFER_SAMPLES)));
        let writer = Arc::clone(&buffer);

        let stream = device.build_input_stream(
            &config,
            move |data: &[f32], _| {
                if let Ok(mut buf) = writer.lock() {
                    // Keep channel 0 only; the waveform view is mono
                    for frame in data.chunks(channels) {
                        if buf.len() == CAPTURE_BUFFER_SAMPLES {
                            buf.pop_front();
                        }
                        buf.push_back(frame[0]);
                    }
                }
            },
            |err| warn!("input stream error: {err}"),
            None,
        )?;
        stream.play()?;

        self.input = Some(InputCapture {
            _stream: stream,
            buffer,
        });
        Ok(())
    }

    pub fn capturing(&self) -> bool {
        self.input.is_some()
    }

    /// Downsampled copy of the recent capture buffer, or None when no
    /// capture is active.
    pub fn capture_waveform(&self, points: usize) -> Option<Vec<f32>> {
        let capture = self.input.as_ref()?;
        let buf = capture.buffer.lock().ok()?;
        let samples: Vec<f32> = buf.iter().copied().collect();
        Some(downsample(&samples, points))
    }

    /// Peak absolute level of the recent capture buffer, 0.0 to 1.0
    pub fn capture_level(&self) -> Option<f32> {
        let capture = self.input.as_ref()?;
        let buf = capture.buffer.lock().ok()?;
        let peak = buf.iter().fold(0f32, |acc, s| acc.max(s.abs()));
        Some(peak.min(1.0))
    }

    /// Drop the input stream, stopping capture
    pub fn stop_capture(&mut self) {
        self.input = None;
    }

    /// Drop all streams. Called when the audio screen is left.
    pub fn stop_all(&mut self) {
        self.stop_output();
        self.stop_capture();
    }

    fn output_device(&self) -> Result<(cpal::Device, StreamConfig, f32), AudioError> {
        let device = self
            .host
            .default_output_device()
            .ok_or(AudioError::NoOutputDevice)?;
        let supported = device.default_output_config()?;
        if supported.sample_format() != SampleFormat::F32 {
            return Err(AudioError::UnsupportedFormat(supported.sample_format()));
        }
        let config: StreamConfig = supported.into();
        let SampleRate(rate) = config.sample_rate;
        Ok((device, config, rate as f32))
    }
}

/// Clamp a frequency to the audible tone generator range
pub fn clamp_tone_hz(hz: u32) -> u32 {
    hz.clamp(MIN_TONE_HZ, MAX_TONE_HZ)
}

/// Linear decay envelope for the channel burst: full at t=0, silent
/// from t=0.5s on.
pub fn burst_envelope(t: f32) -> f32 {
    if t < 0.0 || t >= BURST_SECS {
        return 0.0;
    }
    TONE_AMPLITUDE * (1.0 - t / BURST_SECS)
}

/// Reduce a sample buffer to `points` evenly spaced samples.
///
/// Shorter inputs are returned as-is; an empty input or zero points
/// yields an empty vec.
pub fn downsample(samples: &[f32], points: usize) -> Vec<f32> {
    if points == 0 || samples.is_empty() {
        return Vec::new();
    }
    if samples.len() <= points {
        return samples.to_vec();
    }

    let step = samples.len() as f64 / points as f64;
    (0..points)
        .map(|i| samples[(i as f64 * step) as usize])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_tone_hz() {
        assert_eq!(clamp_tone_hz(0), 20);
        assert_eq!(clamp_tone_hz(19), 20);
        assert_eq!(clamp_tone_hz(20), 20);
        assert_eq!(clamp_tone_hz(440), 440);
        assert_eq!(clamp_tone_hz(20_000), 20_000);
        assert_eq!(clamp_tone_hz(25_000), 20_000);
    }

    #[test]
    fn test_burst_envelope_decays_to_silence() {
        assert!((burst_envelope(0.0) - TONE_AMPLITUDE).abs() < 1e-6);
        assert!(burst_envelope(0.25) < burst_envelope(0.1));
        assert_eq!(burst_envelope(0.5), 0.0);
        assert_eq!(burst_envelope(2.0), 0.0);
        assert_eq!(burst_envelope(-0.1), 0.0);
    }

    #[test]
    fn test_downsample_lengths() {
        let samples: Vec<f32> = (0..1000).map(|i| i as f32).collect();
        assert_eq!(downsample(&samples, 100).len(), 100);
        assert_eq!(downsample(&samples, 1000).len(), 1000);
        assert_eq!(downsample(&samples, 2000).len(), 1000);
        assert!(downsample(&samples, 0).is_empty());
        assert!(downsample(&[], 100).is_empty());
    }

    #[test]
    fn test_downsample_preserves_order_and_range() {
        let samples: Vec<f32> = (0..1000).map(|i| i as f32).collect();
        let out = downsample(&samples, 10);
        assert_eq!(out[0], 0.0);
        for pair in out.windows(2) {
            assert!(pair[0] < pair[1]);
        }
        assert!(*out.last().unwrap() < 1000.0);
    }

    #[test]
    fn test_channel_index() {
        assert_eq!(StereoSide::Left.channel_index(), 0);
        assert_eq!(StereoSide::Right.channel_index(), 1);
    }
}
