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
//! # PICONSOLE
//!
//! A library for building fantasy consoles: a palette based software renderer and a scheduled
//! 4 channel sample player.
//!
//! ## Rendering
//!
//! A [RenderContext] owns the drawing state: the draw target [Canvas], the [Palette], the
//! [PaletteMapping], the [ColorTables], the clip area and the camera offset. Every drawing
//! operation passes the color being drawn and the color already present in the target through
//! the color tables to compute the resulting pixel.
//!
//! ```
//! use piconsole::{RenderContext, Sprite};
//!
//! let mut ctx = RenderContext::new(128, 128);
//! ctx.cls(1);
//! ctx.line(0, 0, 127, 127, 7);
//! ctx.circ_fill(64, 64, 10, 8);
//! let sheet = ctx.target().clone_area(piconsole::Area::new(54, 54, 21, 21));
//! ctx.stretch(Sprite::whole(&sheet), 0, 0, 42, 42);
//! assert_eq!(ctx.pget(21, 21), 8);
//! ```
//!
//! A finished frame is converted to RGB pixels with [render_frame].
//!
//! ## Audio
//!
//! Requires "audio" feature to be enabled (default).
//!
//! ```
//! # #[cfg(feature = "audio")] {
//! use piconsole::audio::{AudioSystem, Chan, Player, PlayerConfig, Sample};
//!
//! let player = Player::new(PlayerConfig::default());
//! let beep = player.load_sample(Sample::new(vec![64, -64, 64, -64], 22050));
//! player.play(Chan::CHAN0, beep, 1.0, 0.5);
//! let mut buffer = vec![0u8; 4096];
//! assert_eq!(player.read(&mut buffer), 4096);
//! # }
//! ```
pub use piconsole_core as core;

pub use piconsole_core::{
    Area, Position,
    Canvas, Surface,
    Color, Palette, PaletteMapping, Rgb,
    ColorTable, ColorTables,
    RenderContext,
    Sprite
};
pub use piconsole_core::palette::{render_frame, pixel};

#[cfg(feature = "png")]
pub use piconsole_core::decode::{
    DecodeError,
    decode_png, decode_palette, must_decode_png, must_decode_palette
};

#[cfg(feature = "audio")]
pub use piconsole_audio as audio;
