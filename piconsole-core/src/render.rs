/*
    Copyright (C) 2026  PICONSOLE contributors

    This file is part of PICONSOLE, a Rust library for building fantasy consoles.

    For the full copyright notice, see the lib.rs file.
*/
//! The drawing state.
use core::mem;

use crate::area::{Area, Position};
use crate::color_table::ColorTables;
use crate::palette::{Color, Palette, PaletteMapping};
use crate::surface::Canvas;

/// Holds everything the drawing operations read: the draw target, palettes, color tables,
/// the clipping region and the camera offset.
///
/// The state is read on every call, so it may be freely modified between the calls, e.g.
/// by developer tools running between frames.
#[derive(Clone, Debug)]
pub struct RenderContext {
    /// Maps palette indexes to displayed colors.
    pub palette: Palette,
    /// A display palette swap applied when the frame is presented.
    pub palette_mapping: PaletteMapping,
    /// Blending tables used by every drawing operation.
    pub color_tables: ColorTables,
    pub(crate) target: Canvas,
    clip: Area<i32>,
    camera: Position
}

impl RenderContext {
    /// Creates a context with a blank `width` x `height` screen as the draw target.
    pub fn new(width: i32, height: i32) -> Self {
        Self::with_target(Canvas::new(width, height))
    }
    /// Creates a context drawing onto `target`.
    pub fn with_target(target: Canvas) -> Self {
        let clip = target.area();
        RenderContext {
            palette: Palette::default(),
            palette_mapping: PaletteMapping::default(),
            color_tables: ColorTables::new(),
            target,
            clip,
            camera: Position::default()
        }
    }
    /// Returns the current draw target.
    #[inline]
    pub fn target(&self) -> &Canvas {
        &self.target
    }
    #[inline]
    pub fn target_mut(&mut self) -> &mut Canvas {
        &mut self.target
    }
    /// Replaces the draw target, returning the previous one.
    ///
    /// The clipping region is reset to cover the whole new target.
    pub fn set_draw_target(&mut self, target: Canvas) -> Canvas {
        self.clip = target.area();
        mem::replace(&mut self.target, target)
    }
    /// Sets the clipping region in target coordinates, returning the previous one.
    ///
    /// The camera offset does not apply to the clipping region.
    pub fn clip(&mut self, area: Area<i32>) -> Area<i32> {
        mem::replace(&mut self.clip, area)
    }
    /// Resets the clipping region to the whole target, returning the previous one.
    pub fn clip_reset(&mut self) -> Area<i32> {
        let area = self.target.area();
        self.clip(area)
    }
    /// Returns the clipping region as set by the last call to [RenderContext::clip].
    #[inline]
    pub fn clip_area(&self) -> Area<i32> {
        self.clip
    }
    /// Sets the camera offset, returning the previous one.
    ///
    /// Everything is drawn moved by `(-x, -y)`.
    pub fn camera(&mut self, x: i32, y: i32) -> Position {
        mem::replace(&mut self.camera, Position::new(x, y))
    }
    /// Resets the camera offset to `(0, 0)`, returning the previous one.
    pub fn camera_reset(&mut self) -> Position {
        self.camera(0, 0)
    }
    #[inline]
    pub fn camera_position(&self) -> Position {
        self.camera
    }
    /// Restores palettes, color tables, clipping region and camera to their initial state.
    ///
    /// The content of the draw target is kept.
    pub fn reset(&mut self) {
        self.palette = Palette::default();
        self.palette_mapping.reset();
        self.color_tables.reset();
        self.clip_reset();
        self.camera_reset();
    }
    /// Makes `from` render as `to` in the draw table.
    pub fn pal(&mut self, from: Color, to: Color) {
        self.color_tables.pal(from, to)
    }
    /// Makes `color` transparent or opaque in the draw table.
    pub fn palt(&mut self, color: Color, transparent: bool) {
        self.color_tables.palt(color, transparent)
    }
    /// Undoes all [RenderContext::pal] and [RenderContext::palt] substitutions.
    pub fn pal_reset(&mut self) {
        self.color_tables.pal_reset()
    }
    /// The clipping region limited to the draw target bounds.
    #[inline]
    pub(crate) fn effective_clip(&self) -> Area<i32> {
        self.clip.clipped_by(self.target.area()).0
    }
}
