/*
    Copyright (C) 2026  PICONSOLE contributors

    This file is part of PICONSOLE, a Rust library for building fantasy consoles.

    For the full copyright notice, see the lib.rs file.
*/
//! The command scheduler and the mixer.
use core::time::Duration;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[allow(unused_imports)]
use log::{error, warn, info, debug, trace};

#[cfg(feature = "snapshot")]
use serde::{Serialize, Deserialize};

use crate::channel::{Chan, ChannelState, Loop, LoopType, CHANNELS};
use crate::command::{Command, CommandKind, CommandQueue};
use crate::sample::{Sample, SampleHandle, SampleTable};

/// The default output sample rate in Hz.
pub const DEFAULT_SAMPLE_RATE: u32 = 44100;
/// The default time the commands are scheduled ahead of the mixer.
pub const DEFAULT_BUFFER_LATENCY: Duration = Duration::from_millis(50);
/// The number of bytes of a single interleaved 16-bit stereo frame.
pub const FRAME_BYTES: usize = 4;

/// The parameters of a [Player].
#[cfg_attr(feature = "snapshot", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayerConfig {
    /// The output sample rate in Hz.
    pub sample_rate: u32,
    /// How far into the future each command is pushed. Should cover at least one buffer
    /// of the audio host.
    pub buffer_latency: Duration
}

impl Default for PlayerConfig {
    fn default() -> Self {
        PlayerConfig {
            sample_rate: DEFAULT_SAMPLE_RATE,
            buffer_latency: DEFAULT_BUFFER_LATENCY
        }
    }
}

impl PlayerConfig {
    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub fn with_buffer_latency(mut self, buffer_latency: Duration) -> Self {
        self.buffer_latency = buffer_latency;
        self
    }

    /// Returns the buffer latency in whole output samples.
    pub fn latency_samples(&self) -> u64 {
        (self.buffer_latency.as_secs_f64() * self.sample_rate as f64).round() as u64
    }
}

/// The scheduling interface used by the game loop.
///
/// Each command is addressed to all channels in the `chan` mask and takes effect `delay` seconds
/// from now, plus the buffer latency of the implementation.
pub trait AudioSystem {
    /// Schedules playing the `sample` from the `offset`.
    fn set_sample(&self, chan: Chan, sample: SampleHandle, offset: usize, delay: f64);
    /// Schedules setting the loop window `[start, start+length-1]`.
    fn set_loop(&self, chan: Chan, start: usize, length: usize, kind: LoopType, delay: f64);
    /// Schedules setting the playback rate multiplier, negative values are clamped to 0.
    fn set_pitch(&self, chan: Chan, pitch: f64, delay: f64);
    /// Schedules setting the volume, clamped to `[0, 1]`.
    fn set_volume(&self, chan: Chan, volume: f64, delay: f64);
    /// Schedules silencing channels. Commands already scheduled at the same time or later are discarded.
    fn clear_chan(&self, chan: Chan, delay: f64);
    /// Plays the whole `sample` once, as soon as possible.
    fn play(&self, chan: Chan, sample: SampleHandle, pitch: f64, volume: f64) {
        self.clear_chan(chan, 0.0);
        self.set_sample(chan, sample, 0, 0.0);
        self.set_loop(chan, 0, usize::MAX, LoopType::None, 0.0);
        self.set_pitch(chan, pitch, 0.0);
        self.set_volume(chan, volume, 0.0);
    }
}

/// The audio command scheduler and 4 channel mixer.
///
/// The `Player` is shared between the game loop thread, which schedules commands with
/// the [AudioSystem] methods, and the audio thread, which pulls the output with [Player::read]
/// or [Player::read_frames]. Usually wrapped in an [Arc][std::sync::Arc].
#[derive(Debug)]
pub struct Player {
    config: PlayerConfig,
    latency: u64,
    state: Mutex<PlayerState>
}

#[derive(Debug, Default)]
struct PlayerState {
    tick: u64,
    channels: [ChannelState; CHANNELS],
    queues: [CommandQueue; CHANNELS],
    samples: SampleTable
}

impl Default for Player {
    fn default() -> Self {
        Player::new(PlayerConfig::default())
    }
}

impl Player {
    pub fn new(config: PlayerConfig) -> Self {
        let latency = config.latency_samples();
        debug!("player: {} Hz, latency: {} samples", config.sample_rate, latency);
        Player { config, latency, state: Mutex::default() }
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// Returns the number of output frames mixed so far.
    pub fn current_tick(&self) -> u64 {
        self.lock().tick
    }

    /// Returns the mixer time in seconds.
    pub fn time(&self) -> f64 {
        self.current_tick() as f64 / self.config.sample_rate as f64
    }

    /// Returns a copy of the state of the channel at `index`.
    pub fn channel_state(&self, index: usize) -> Option<ChannelState> {
        self.lock().channels.get(index).cloned()
    }

    /// Returns the number of commands waiting for the channel at `index`.
    pub fn pending_commands(&self, index: usize) -> usize {
        self.lock().queues.get(index).map_or(0, |queue| queue.len())
    }

    /// Makes the `sample` available to the scheduled commands.
    pub fn load_sample(&self, sample: Sample) -> SampleHandle {
        let len = sample.len();
        let handle = self.lock().samples.insert(sample);
        debug!("loaded sample {:?}, length: {}", handle, len);
        handle
    }

    /// Removes the sample from the player. Returns `None` if the `handle` is stale.
    ///
    /// Channels already playing the sample keep playing it.
    pub fn unload_sample(&self, handle: SampleHandle) -> Option<Sample> {
        let sample = self.lock().samples.remove(handle);
        debug!("unloaded sample {:?}: {}", handle, sample.is_some());
        sample
    }

    /// Pushes the `command` to every channel in the `chan` mask.
    ///
    /// The command time is absolute. A command found by the mixer after its time has passed is dropped.
    pub fn schedule(&self, chan: Chan, command: Command) {
        let mut state = self.lock();
        for index in chan.indexes() {
            state.queues[index].push(command);
        }
    }

    /// Fills the `buffer` with interleaved little-endian 16-bit stereo frames.
    ///
    /// Only whole frames are written. Returns the number of bytes written.
    pub fn read(&self, buffer: &mut [u8]) -> usize {
        let mut state = self.lock();
        let mut written = 0;
        for chunk in buffer.chunks_exact_mut(FRAME_BYTES) {
            let [left, right] = state.mix_frame(self.config.sample_rate);
            chunk[..2].copy_from_slice(&left.to_le_bytes());
            chunk[2..].copy_from_slice(&right.to_le_bytes());
            written += FRAME_BYTES;
        }
        written
    }

    /// Fills the `frames` with the `[left, right]` output samples.
    pub fn read_frames(&self, frames: &mut [[i16; 2]]) {
        let mut state = self.lock();
        for frame in frames.iter_mut() {
            *frame = state.mix_frame(self.config.sample_rate);
        }
    }

    fn lock(&self) -> MutexGuard<'_, PlayerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn target_time(&self, tick: u64, delay: f64) -> u64 {
        let delay = (delay.max(0.0) * self.config.sample_rate as f64).round() as u64;
        tick.saturating_add(delay).saturating_add(self.latency)
    }

    fn schedule_delayed(&self, chan: Chan, kind: CommandKind, delay: f64) {
        let mut state = self.lock();
        let time = self.target_time(state.tick, delay);
        for index in chan.indexes() {
            state.queues[index].push(Command::new(time, kind));
        }
    }
}

impl AudioSystem for Player {
    fn set_sample(&self, chan: Chan, handle: SampleHandle, offset: usize, delay: f64) {
        self.schedule_delayed(chan, CommandKind::Sample { handle, offset }, delay)
    }

    fn set_loop(&self, chan: Chan, start: usize, length: usize, kind: LoopType, delay: f64) {
        self.schedule_delayed(chan, CommandKind::Loop(Loop::new(start, length, kind)), delay)
    }

    fn set_pitch(&self, chan: Chan, pitch: f64, delay: f64) {
        let pitch = if pitch > 0.0 { pitch } else { 0.0 };
        self.schedule_delayed(chan, CommandKind::Pitch(pitch), delay)
    }

    fn set_volume(&self, chan: Chan, volume: f64, delay: f64) {
        let volume = if volume.is_nan() { 0.0 } else { volume.clamp(0.0, 1.0) };
        self.schedule_delayed(chan, CommandKind::Volume(volume), delay)
    }

    fn clear_chan(&self, chan: Chan, delay: f64) {
        let mut state = self.lock();
        let time = self.target_time(state.tick, delay);
        for index in chan.indexes() {
            let queue = &mut state.queues[index];
            let discarded = queue.discard_from(time);
            if discarded != 0 {
                debug!("channel {}: discarded {} commands at {}", index, discarded, time);
            }
            queue.push(Command::new(time, CommandKind::Clear));
        }
    }
}

impl PlayerState {
    /// Applies due commands, mixes one output frame and advances the time.
    fn mix_frame(&mut self, mixer_rate: u32) -> [i16; 2] {
        let tick = self.tick;
        let PlayerState { channels, queues, samples, .. } = self;
        let mut values = [0.0f64; CHANNELS];
        for (index, ((channel, queue), value)) in channels.iter_mut()
                                                          .zip(queues.iter_mut())
                                                          .zip(values.iter_mut())
                                                          .enumerate() {
            while let Some(command) = queue.pop_due(tick) {
                if command.time < tick {
                    warn!("channel {}: dropped late command {:?} at {}", index, command, tick);
                    continue
                }
                trace!("channel {}: {:?}", index, command.kind);
                apply_command(channel, samples, index, command.kind);
            }
            *value = channel.next_sample(mixer_rate);
        }
        self.tick += 1;
        [output_sample(values[0] + values[3]), output_sample(values[1] + values[2])]
    }
}

fn apply_command(channel: &mut ChannelState, samples: &SampleTable, index: usize, kind: CommandKind) {
    match kind {
        CommandKind::Sample { handle, offset } => match samples.get(handle) {
            Some(sample) => channel.set_sample(sample, offset),
            None => {
                warn!("channel {}: missing sample {:?}", index, handle);
                channel.silence();
            }
        }
        CommandKind::Loop(lp) => channel.set_loop(lp),
        CommandKind::Pitch(pitch) => channel.set_pitch(pitch),
        CommandKind::Volume(volume) => channel.set_volume(volume),
        CommandKind::Clear => channel.reset()
    }
}

/// Scales the sum of 8-bit channel values to the 16-bit range.
#[inline]
fn output_sample(value: f64) -> i16 {
    (value * 256.0).clamp(i16::MIN as f64, i16::MAX as f64) as i16
}

#[cfg(test)]
mod tests {
    use super::*;

    const RATE: u32 = 1000;

    fn player(latency_ms: u64) -> Player {
        Player::new(PlayerConfig::default()
                    .with_sample_rate(RATE)
                    .with_buffer_latency(Duration::from_millis(latency_ms)))
    }

    fn frames(player: &Player, count: usize) -> Vec<[i16; 2]> {
        let mut frames = vec![[0; 2]; count];
        player.read_frames(&mut frames);
        frames
    }

    #[test]
    fn config_works() {
        let config = PlayerConfig::default();
        assert_eq!(config.sample_rate, 44100);
        assert_eq!(config.latency_samples(), 2205);
        let config = config.with_sample_rate(8000).with_buffer_latency(Duration::from_millis(10));
        assert_eq!(config.latency_samples(), 80);
        assert_eq!(Player::new(config).config(), &config);
    }

    #[test]
    fn commands_wait_for_the_latency() {
        let player = player(5);
        let sample = player.load_sample(Sample::new(vec![1; 16], RATE as u16));
        player.play(Chan::CHAN0, sample, 1.0, 1.0);
        assert_eq!(player.pending_commands(0), 5);
        assert_eq!(player.pending_commands(1), 0);
        let out = frames(&player, 7);
        assert_eq!(out[..5], [[0, 0]; 5]);
        assert_eq!(out[5..], [[256, 0]; 2]);
        assert_eq!(player.pending_commands(0), 0);
        assert_eq!(player.current_tick(), 7);
        assert_eq!(player.time(), 0.007);
    }

    #[test]
    fn delays_are_measured_from_mixer_time() {
        let player = player(0);
        let sample = player.load_sample(Sample::new(vec![2; 16], RATE as u16));
        frames(&player, 10);
        player.set_sample(Chan::CHAN1, sample, 0, 0.003);
        let out = frames(&player, 4);
        assert_eq!(out, [[0, 0], [0, 0], [0, 0], [0, 512]]);
    }

    #[test]
    fn later_command_wins() {
        let player = player(0);
        player.set_volume(Chan::CHAN2, 0.25, 0.002);
        player.set_volume(Chan::CHAN2, 0.75, 0.001);
        frames(&player, 3);
        assert_eq!(player.channel_state(2).unwrap().volume(), 0.25);
        // ties resolve by enqueue order
        player.set_pitch(Chan::CHAN2, 3.0, 0.0);
        player.set_pitch(Chan::CHAN2, 2.0, 0.0);
        frames(&player, 1);
        assert_eq!(player.channel_state(2).unwrap().pitch(), 2.0);
    }

    #[test]
    fn clear_discards_pending_commands() {
        let player = player(0);
        player.set_volume(Chan::ALL, 0.5, 0.001);
        player.set_volume(Chan::CHAN0|Chan::CHAN1, 0.25, 0.005);
        player.set_pitch(Chan::CHAN0, 4.0, 0.002);
        player.clear_chan(Chan::CHAN0, 0.002);
        assert_eq!(player.pending_commands(0), 2);
        assert_eq!(player.pending_commands(1), 2);
        frames(&player, 10);
        let chan0 = player.channel_state(0).unwrap();
        assert_eq!((chan0.volume(), chan0.pitch()), (1.0, 1.0));
        assert_eq!(player.channel_state(1).unwrap().volume(), 0.25);
        assert_eq!(player.channel_state(3).unwrap().volume(), 0.5);
    }

    #[test]
    fn late_commands_are_dropped() {
        let player = player(0);
        frames(&player, 10);
        player.schedule(Chan::CHAN3, Command::new(4, CommandKind::Volume(0.5)));
        player.schedule(Chan::CHAN3, Command::new(10, CommandKind::Pitch(0.5)));
        frames(&player, 1);
        let chan3 = player.channel_state(3).unwrap();
        assert_eq!((chan3.volume(), chan3.pitch()), (1.0, 0.5));
        assert_eq!(player.pending_commands(3), 0);
    }

    #[test]
    fn missing_samples_silence_channel() {
        let player = player(0);
        let sample = player.load_sample(Sample::new(vec![3; 8], RATE as u16));
        player.set_sample(Chan::CHAN0, sample, 0, 0.0);
        assert_eq!(frames(&player, 1), [[768, 0]]);
        assert_eq!(player.unload_sample(sample).unwrap().len(), 8);
        assert!(player.unload_sample(sample).is_none());
        // the playing channel keeps its data
        assert_eq!(frames(&player, 1), [[768, 0]]);
        player.set_sample(Chan::CHAN0, sample, 0, 0.0);
        assert_eq!(frames(&player, 1), [[0, 0]]);
        assert!(!player.channel_state(0).unwrap().is_active());
    }

    #[test]
    fn routes_channels_to_stereo_outputs() {
        let player = player(0);
        let sample = player.load_sample(Sample::new(vec![10, -20], RATE as u16));
        player.play(Chan::CHAN0|Chan::CHAN3, sample, 1.0, 1.0);
        player.play(Chan::CHAN1, sample, 1.0, 0.5);
        assert_eq!(frames(&player, 3), [[5120, 1280], [-10240, -2560], [0, 0]]);
        player.play(Chan::ALL, sample, 1.0, 1.0);
        assert_eq!(frames(&player, 1), [[5120, 5120]]);
    }

    #[test]
    fn output_is_clamped_and_little_endian() {
        let player = player(0);
        let sample = player.load_sample(Sample::new(vec![127, -128], RATE as u16));
        player.play(Chan::CHAN0|Chan::CHAN3, sample, 1.0, 1.0);
        player.play(Chan::CHAN1, sample, 1.0, 1.0);
        let mut buffer = [0u8; 10];
        assert_eq!(player.read(&mut buffer), 8);
        assert_eq!(buffer, [0xFF, 0x7F, 0x00, 0x7F,  0x00, 0x80, 0x00, 0x80,  0, 0]);
        assert_eq!(player.current_tick(), 2);
    }

    #[test]
    fn loop_scenario_works() {
        let player = player(0);
        let sample = player.load_sample(Sample::new((0..8).collect::<Vec<i8>>(), RATE as u16));
        player.set_sample(Chan::CHAN0, sample, 0, 0.0);
        player.set_loop(Chan::CHAN0, 2, 4, LoopType::Forward, 0.0);
        let left: Vec<i16> = frames(&player, 10).iter().map(|[l, _]| l / 256).collect();
        assert_eq!(left, [0, 1, 2, 3, 4, 5, 2, 3, 4, 5]);
        assert!(player.channel_state(0).unwrap().is_active());
    }

    #[cfg(feature = "snapshot")]
    #[test]
    fn config_serde_works() {
        let config = PlayerConfig::default().with_sample_rate(22050);
        let ser = serde_json::to_string(&config).unwrap();
        let config_de: PlayerConfig = serde_json::from_str(&ser).unwrap();
        assert_eq!(config, config_de);
        let lp: Loop = serde_json::from_str(r#"{"start":2,"length":4,"kind":"Forward"}"#).unwrap();
        assert_eq!(lp, Loop::new(2, 4, LoopType::Forward));
    }
}
