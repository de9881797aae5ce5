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
//! The core components of the PICONSOLE library.
//!
//! Everything here is single threaded and synchronous. The drawing state which a fantasy
//! console would normally keep in globals lives in a [RenderContext] that the caller owns.
pub mod area;
pub mod color_table;
#[cfg(feature = "png")]
pub mod decode;
pub mod draw;
pub mod palette;
pub mod render;
pub mod sprite;
pub mod surface;

pub use area::{Area, Position};
pub use color_table::{ColorTable, ColorTables, READ_MASK, TARGET_MASK};
pub use palette::{Color, Palette, PaletteMapping, Rgb};
pub use render::RenderContext;
pub use sprite::Sprite;
pub use surface::{Canvas, Surface};
