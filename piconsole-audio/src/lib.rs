/*
    Copyright (C) 2026  PICONSOLE contributors

    This file is part of PICONSOLE, a Rust library for building fantasy consoles.

    PICONSOLE is free software: you can redistribute it and/or modify it under
    the terms of the GNU Lesser General Public License (LGPL) as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.

    PICONSOLE is distributed in the hope that it will be useful,
    but WITHOUT ANY WARRANTY; without even the implied warranty of
    MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
    GNU Lesser General Public License for more details.

    You should have received a copy of the GNU Lesser General Public License
    along with this program.  If not, see <https://www.gnu.org/licenses/>.

    Author contact information: see Cargo.toml file, section [package.authors].
*/
//! Audio components of the PICONSOLE library.
//!
//! A [Player] keeps four logical channels, each one playing an 8-bit PCM [Sample].
//! The game loop schedules commands through the [AudioSystem] trait, while the audio host
//! pulls interleaved 16-bit stereo frames from the same [Player] on its own thread.
//!
//! The commands are always scheduled at least the configured buffer latency into the future,
//! so the mixer, which runs ahead of the game loop, applies them at the exact sample tick.
//!
//! The [host] module contains native audio playback implementations.
pub mod channel;
pub mod command;
pub mod host;
pub mod player;
pub mod sample;

pub use channel::{Chan, ChannelState, Loop, LoopType, CHANNELS};
pub use command::{Command, CommandKind, CommandQueue};
pub use player::{AudioSystem, Player, PlayerConfig};
pub use sample::{AudioSample, FromSample, Sample, SampleHandle};
