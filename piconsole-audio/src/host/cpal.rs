/*
    Copyright (C) 2026  PICONSOLE contributors

    This file is part of PICONSOLE, a Rust library for building fantasy consoles.

    For the full copyright notice, see the lib.rs file.
*/
//! Audio device streaming implementation for [cpal](https://crates.io/crates/cpal).
//!
//! The output stream pulls frames from a shared [Player] in the **cpal** audio thread.
//!
//! Requires "cpal" feature to be enabled.
use core::time::Duration;
use std::sync::Arc;

#[allow(unused_imports)]
use log::{error, warn, info, debug, trace};

use cpal::{
    Stream,
    PlayStreamError, PauseStreamError, DefaultStreamConfigError, BuildStreamError,
    traits::{DeviceTrait, HostTrait, StreamTrait}
};

pub use cpal::SampleFormat;

use crate::player::{Player, PlayerConfig};
use crate::sample::{AudioSample, FromSample};
pub use super::{AudioHandleError, AudioHandleErrorKind, MIX_CHUNK_FRAMES, fill_from_player};

/// The struct for controlling the audio playback of a [Player].
pub struct AudioHandle {
    /// The audio sample frequency of the output stream.
    pub sample_rate: u32,
    /// The number of audio channels in the output stream.
    pub channels: u8,
    /// The sample format of the output stream.
    pub sample_format: SampleFormat,
    /// The player mixing the output, shared with the audio thread.
    pub player: Arc<Player>,
    stream: Stream
}

impl AudioHandle {
    /// Starts playback of the audio device.
    pub fn play(&self) -> Result<(), AudioHandleError> {
        self.stream.play().map_err(From::from)
    }
    /// Pauses playback of the audio device.
    pub fn pause(&self) -> Result<(), AudioHandleError> {
        self.stream.pause().map_err(From::from)
    }
    /// Closes audio playback and frees underlying resources.
    pub fn close(self) {}
    /// Creates an instance of the [AudioHandle] from the provided **cpal** `host` with
    /// the default output device and the default audio parameters.
    ///
    /// * `buffer_latency` is passed to the [PlayerConfig] of the created [Player].
    pub fn create(
            host: &cpal::Host,
            buffer_latency: Duration
        ) -> Result<Self, AudioHandleError>
    {
        let device = host.default_output_device()
                     .ok_or_else(|| ("no default output device".to_string(),
                                     AudioHandleErrorKind::AudioSubsystem))?;
        Self::create_with_device(&device, buffer_latency)
    }
    /// Creates an instance of the [AudioHandle] from the provided **cpal** `device` with
    /// the default audio parameters.
    pub fn create_with_device(
            device: &cpal::Device,
            buffer_latency: Duration
        ) -> Result<Self, AudioHandleError>
    {
        let supported = device.default_output_config()?;
        let sample_format = supported.sample_format();
        let config = supported.config();
        let player = Arc::new(Player::new(PlayerConfig::default()
                                          .with_sample_rate(config.sample_rate.0)
                                          .with_buffer_latency(buffer_latency)));
        let stream = match sample_format {
            SampleFormat::I8  => build_stream::<i8>(device, &config, &player)?,
            SampleFormat::I16 => build_stream::<i16>(device, &config, &player)?,
            SampleFormat::I32 => build_stream::<i32>(device, &config, &player)?,
            SampleFormat::I64 => build_stream::<i64>(device, &config, &player)?,
            SampleFormat::U8  => build_stream::<u8>(device, &config, &player)?,
            SampleFormat::U16 => build_stream::<u16>(device, &config, &player)?,
            SampleFormat::U32 => build_stream::<u32>(device, &config, &player)?,
            SampleFormat::U64 => build_stream::<u64>(device, &config, &player)?,
            SampleFormat::F32 => build_stream::<f32>(device, &config, &player)?,
            SampleFormat::F64 => build_stream::<f64>(device, &config, &player)?,
            sf => return Err((format!("unsupported sample format: {sf:?}"), AudioHandleErrorKind::InvalidArguments).into())
        };
        let channels: u8 = config.channels.try_into()
                           .map_err(|_| (format!("number of channels: {} exceed the maximum value of 255", config.channels),
                                         AudioHandleErrorKind::InvalidArguments))?;
        Ok(AudioHandle {
            sample_rate: config.sample_rate.0,
            channels,
            sample_format,
            player,
            stream
        })
    }
}

fn build_stream<T>(
        device: &cpal::Device,
        config: &cpal::StreamConfig,
        player: &Arc<Player>
    ) -> Result<Stream, AudioHandleError>
    where T: cpal::SizedSample + AudioSample + FromSample<i16>
{
    let channels = config.channels as usize;
    if channels == 0 {
        return Err(("no output channels".to_string(), AudioHandleErrorKind::InvalidArguments).into())
    }
    debug!("audio specs: {:?}", config);
    let player = Arc::clone(player);
    let mut frames = [[0i16; 2]; MIX_CHUNK_FRAMES];
    let data_fn = move |out: &mut [T], _: &_| {
        fill_from_player(&player, &mut frames, out, channels);
    };

    let err_fn = |err| error!("an error occurred on stream: {}", err);

    device.build_output_stream(config, data_fn, err_fn, None).map_err(From::from)
}

impl From<PlayStreamError> for AudioHandleError {
    fn from(e: PlayStreamError) -> Self {
        let kind = match e {
            PlayStreamError::DeviceNotAvailable => AudioHandleErrorKind::AudioSubsystem,
            _ => AudioHandleErrorKind::AudioStream
        };
        (e.to_string(), kind).into()
    }
}

impl From<PauseStreamError> for AudioHandleError {
    fn from(e: PauseStreamError) -> Self {
        let kind = match e {
            PauseStreamError::DeviceNotAvailable => AudioHandleErrorKind::AudioSubsystem,
            _ => AudioHandleErrorKind::AudioStream
        };
        (e.to_string(), kind).into()
    }
}

impl From<DefaultStreamConfigError> for AudioHandleError {
    fn from(e: DefaultStreamConfigError) -> Self {
        let kind = match e {
            DefaultStreamConfigError::StreamTypeNotSupported => AudioHandleErrorKind::InvalidArguments,
            _ => AudioHandleErrorKind::AudioSubsystem
        };
        (e.to_string(), kind).into()
    }
}

impl From<BuildStreamError> for AudioHandleError {
    fn from(e: BuildStreamError) -> Self {
        let kind = match e {
            BuildStreamError::DeviceNotAvailable => AudioHandleErrorKind::AudioSubsystem,
            BuildStreamError::StreamConfigNotSupported|
            BuildStreamError::InvalidArgument => AudioHandleErrorKind::InvalidArguments,
            _ => AudioHandleErrorKind::AudioStream
        };
        (e.to_string(), kind).into()
    }
}
