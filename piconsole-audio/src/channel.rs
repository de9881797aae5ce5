/*
    Copyright (C) 2026  PICONSOLE contributors

    This file is part of PICONSOLE, a Rust library for building fantasy consoles.

    For the full copyright notice, see the lib.rs file.
*/
//! Logical playback channels.
use std::sync::Arc;

use bitflags::bitflags;

#[cfg(feature = "snapshot")]
use serde::{Serialize, Deserialize};

use crate::sample::Sample;

/// The number of logical channels.
pub const CHANNELS: usize = 4;

bitflags! {
    /// A mask addressing logical channels.
    ///
    /// Channels 0 and 3 are mixed into the left output, channels 1 and 2 into the right one.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Chan: u8 {
        const CHAN0 = 0b0001;
        const CHAN1 = 0b0010;
        const CHAN2 = 0b0100;
        const CHAN3 = 0b1000;
        const ALL   = 0b1111;
    }
}

impl Chan {
    /// Returns a mask of a single channel or `None` if `index` is not a valid channel index.
    pub fn from_index(index: usize) -> Option<Chan> {
        if index < CHANNELS {
            Some(Chan::from_bits_truncate(1 << index))
        }
        else {
            None
        }
    }

    /// Returns an iterator of channel indexes present in the mask in ascending order.
    pub fn indexes(self) -> impl Iterator<Item=usize> {
        (0..CHANNELS).filter(move |index| self.bits() & (1 << index) != 0)
    }
}

/// What happens when the playback position reaches the end of a loop.
#[cfg_attr(feature = "snapshot", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LoopType {
    /// The channel stops playing.
    #[default]
    None,
    /// The playback continues from the loop start.
    Forward
}

/// A loop window covering sample positions from `start` to `start + length - 1`.
#[cfg_attr(feature = "snapshot", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Loop {
    pub start: usize,
    pub length: usize,
    pub kind: LoopType
}

impl Default for Loop {
    /// A non-repeating loop covering the whole sample.
    fn default() -> Self {
        Loop { start: 0, length: usize::MAX, kind: LoopType::None }
    }
}

impl Loop {
    pub const fn new(start: usize, length: usize, kind: LoopType) -> Self {
        Loop { start, length, kind }
    }
    /// Returns the position just past the last sample of the loop.
    #[inline]
    pub fn stop(&self) -> usize {
        self.start.saturating_add(self.length)
    }
}

/// The state of a single logical channel.
#[derive(Clone, Debug, PartialEq)]
pub struct ChannelState {
    active: bool,
    data: Option<Arc<[i8]>>,
    sample_rate: u16,
    position: f64,
    pitch: f64,
    volume: f64,
    lp: Loop
}

impl Default for ChannelState {
    fn default() -> Self {
        ChannelState {
            active: false,
            data: None,
            sample_rate: 0,
            position: 0.0,
            pitch: 1.0,
            volume: 1.0,
            lp: Loop::default()
        }
    }
}

impl ChannelState {
    /// Returns `true` if the channel is playing a sample.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }
    /// Returns the fractional playback position.
    #[inline]
    pub fn position(&self) -> f64 {
        self.position
    }
    #[inline]
    pub fn pitch(&self) -> f64 {
        self.pitch
    }
    #[inline]
    pub fn volume(&self) -> f64 {
        self.volume
    }
    #[inline]
    pub fn sample_rate(&self) -> u16 {
        self.sample_rate
    }
    #[inline]
    pub fn sample_len(&self) -> usize {
        self.data.as_ref().map_or(0, |data| data.len())
    }
    #[inline]
    pub fn loop_window(&self) -> Loop {
        self.lp
    }

    /// Silences the channel and restores its default parameters.
    pub fn reset(&mut self) {
        *self = ChannelState::default();
    }

    /// Starts playing `sample` from `offset`.
    pub fn set_sample(&mut self, sample: &Sample, offset: usize) {
        self.data = Some(sample.shared_data());
        self.sample_rate = sample.sample_rate();
        self.position = offset as f64;
        self.active = true;
    }

    /// Stops playing and forgets the current sample.
    pub fn silence(&mut self) {
        self.active = false;
        self.data = None;
    }

    pub fn set_loop(&mut self, lp: Loop) {
        self.lp = lp;
    }

    /// Negative and non-finite values are clamped to 0.
    pub fn set_pitch(&mut self, pitch: f64) {
        self.pitch = if pitch > 0.0 && pitch.is_finite() { pitch } else { 0.0 };
    }

    /// The `volume` is clamped to `[0, 1]`.
    pub fn set_volume(&mut self, volume: f64) {
        self.volume = if volume.is_nan() { 0.0 } else { volume.clamp(0.0, 1.0) };
    }

    /// Returns the next sample value scaled by the volume and advances the playback position
    /// by the sample rate to `mixer_rate` ratio multiplied by the pitch.
    pub fn next_sample(&mut self, mixer_rate: u32) -> f64 {
        if !self.active || self.volume <= 0.0 {
            return 0.0
        }
        let len = match self.data.as_deref() {
            Some(data) if !data.is_empty() => data.len(),
            _ => return 0.0
        };
        let stop = len.min(self.lp.stop());
        if !self.wrap(stop) {
            return 0.0
        }
        let sample = match self.data.as_deref() {
            Some(data) => data[self.position as usize],
            None => return 0.0
        };
        self.position += self.sample_rate as f64 / mixer_rate as f64 * self.pitch;
        self.wrap(stop);
        sample as f64 * self.volume
    }

    /// Applies the loop policy when the position has reached `stop`.
    ///
    /// Returns `false` if the channel has been deactivated.
    fn wrap(&mut self, stop: usize) -> bool {
        if self.position < stop as f64 {
            return true
        }
        if self.lp.kind == LoopType::Forward && self.lp.start < stop {
            self.position = self.lp.start as f64;
            true
        }
        else {
            self.active = false;
            false
        }
    }
}
