/*
    Copyright (C) 2026  PICONSOLE contributors

    This file is part of PICONSOLE, a Rust library for building fantasy consoles.

    For the full copyright notice, see the lib.rs file.
*/
//! Platform dependent audio device streaming implementations.
//!
//! To make use of this module enable one of the available features to the `piconsole-audio` entry in `[dependencies]`
//! section of the Cargo configuration file.
use core::fmt;
use std::error::Error;

use crate::player::Player;
use crate::sample::{AudioSample, FromSample};

/// The number of frames mixed at once by [fill_from_player].
pub const MIX_CHUNK_FRAMES: usize = 512;

#[cfg(feature = "cpal")]
pub mod cpal;

/// A list specifying categories of [AudioHandleError] error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioHandleErrorKind {
    /// This error occurs when the audio subsystem host or device is not available.
    AudioSubsystem,
    /// This error occurs while trying to create or modify an audio stream.
    AudioStream,
    /// This error occurs due to the invalid specification of the desired audio parameters or other arguments.
    InvalidArguments,
}

/// A common error type returned by all audio handle implementation methods in this module.
#[derive(Debug, Clone)]
pub struct AudioHandleError {
    description: String,
    kind: AudioHandleErrorKind
}

impl fmt::Display for AudioHandleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.description.fmt(f)
    }
}

impl Error for AudioHandleError {}

impl AudioHandleError {
    /// Returns the corresponding category for this error.
    pub fn kind(&self) -> AudioHandleErrorKind {
        self.kind
    }
}

impl From<(String, AudioHandleErrorKind)> for AudioHandleError {
    fn from((description, kind): (String, AudioHandleErrorKind)) -> Self {
        AudioHandleError { description, kind }
    }
}

/// Spreads stereo `frames` over the interleaved `output` buffer with `channels` per frame.
///
/// A single channel output receives the average of both sides. Channels beyond the second one
/// are silent.
pub fn write_interleaved<T>(frames: &[[i16; 2]], output: &mut [T], channels: usize)
    where T: AudioSample + FromSample<i16>
{
    if channels == 0 {
        return
    }
    for (frame, out) in frames.iter().zip(output.chunks_mut(channels)) {
        let [left, right] = *frame;
        match out {
            [mono] => *mono = T::from_sample(((left as i32 + right as i32) / 2) as i16),
            [l, r, rest @ ..] => {
                *l = T::from_sample(left);
                *r = T::from_sample(right);
                for t in rest {
                    *t = T::silence();
                }
            }
            [] => {}
        }
    }
}

/// Fills the interleaved `output` buffer with frames mixed by the `player`.
///
/// The frames are mixed in chunks through the `frames` scratch buffer, so no allocation happens
/// regardless of the `output` size. A trailing partial frame is left silent.
pub fn fill_from_player<T>(player: &Player, frames: &mut [[i16; 2]], output: &mut [T], channels: usize)
    where T: AudioSample + FromSample<i16>
{
    if channels == 0 || frames.is_empty() {
        for t in output.iter_mut() {
            *t = T::silence();
        }
        return
    }
    let whole = output.len() - output.len() % channels;
    let (output, rest) = output.split_at_mut(whole);
    for t in rest {
        *t = T::silence();
    }
    for chunk in output.chunks_mut(frames.len() * channels) {
        let frames = &mut frames[..chunk.len() / channels];
        player.read_frames(frames);
        write_interleaved(frames, chunk, channels);
    }
}
