/*
    Copyright (C) 2026  PICONSOLE contributors

    This file is part of PICONSOLE, a Rust library for building fantasy consoles.

    For the full copyright notice, see the lib.rs file.
*/
//! Sprites and the stretching compositor.
use crate::area::Area;
use crate::render::RenderContext;
use crate::surface::Canvas;

/// A read-only view into a region of a [Canvas].
#[derive(Clone, Copy, Debug)]
pub struct Sprite<'a> {
    /// The region of the `source` canvas.
    pub area: Area<i32>,
    pub source: &'a Canvas,
    pub flip_x: bool,
    pub flip_y: bool
}

impl<'a> Sprite<'a> {
    pub fn new(source: &'a Canvas, area: Area<i32>) -> Self {
        Sprite { area, source, flip_x: false, flip_y: false }
    }
    /// Returns a sprite covering the whole `source` canvas.
    pub fn whole(source: &'a Canvas) -> Self {
        Self::new(source, source.area())
    }
    pub fn flipped(self, flip_x: bool, flip_y: bool) -> Self {
        Sprite { flip_x, flip_y, ..self }
    }
}

/// Mirrors the horizontal and vertical extent of an area around 0.
///
/// Clipping a flipped sprite in the mirrored space trims the correct edges, e.g.
/// the destination clipped on the left trims the source on the right.
#[inline]
fn mirrored(area: Area<f64>, flip_x: bool, flip_y: bool) -> Area<f64> {
    Area {
        x: if flip_x { -(area.x + area.w) } else { area.x },
        y: if flip_y { -(area.y + area.h) } else { area.y },
        ..area
    }
}

/// Absorbs float rounding of positions that should land exactly on a cell edge.
const EDGE_EPSILON: f64 = 1e-9;

/// Returns the first whole cell at or after `position`.
#[inline]
fn ceil_cell(position: f64) -> f64 {
    (position - EDGE_EPSILON).ceil()
}

/// Converts a (possibly mirrored) sampling position to a cell index.
#[inline(always)]
fn source_index(position: f64, flip: bool, len: i32) -> usize {
    let cell = (position + EDGE_EPSILON).floor() as i32;
    let index = if flip { -cell - 1 } else { cell };
    index.max(0).min(len - 1) as usize
}

impl RenderContext {
    /// Draws a sprite 1:1 with its top-left corner at `(dx, dy)`.
    pub fn spr(&mut self, sprite: Sprite<'_>, dx: i32, dy: i32) {
        self.stretch(sprite, dx, dy, sprite.area.w, sprite.area.h)
    }

    /// Draws a sprite scaled to fit the `dw` x `dh` rectangle at `(dx, dy)`.
    ///
    /// Pixels are picked with the nearest-neighbor method and blended with the draw target
    /// through the color tables. Parts of the sprite outside of its source canvas and parts
    /// of the destination outside of the clipping region are skipped while both regions are
    /// kept in sync.
    pub fn stretch(&mut self, sprite: Sprite<'_>, dx: i32, dy: i32, dw: i32, dh: i32) {
        let Sprite { area, source, flip_x, flip_y } = sprite;
        if area.w <= 0 || area.h <= 0 || dw <= 0 || dh <= 0 {
            return
        }
        let step_x = area.w as f64 / dw as f64;
        let step_y = area.h as f64 / dh as f64;

        let bounds = mirrored(source.area().into(), flip_x, flip_y);
        let (src, sdx, sdy) = mirrored(area.into(), flip_x, flip_y).clipped_by(bounds);

        let camera = self.camera_position();
        let dst = Area::new(
            (dx as f64 - camera.x as f64) + sdx / step_x,
            (dy as f64 - camera.y as f64) + sdy / step_y,
            src.w / step_x,
            src.h / step_y
        );
        let (dst, ddx, ddy) = dst.clipped_by(self.effective_clip().into());

        let src = Area::new(src.x + ddx * step_x, src.y + ddy * step_y, dst.w * step_x, dst.h * step_y);
        let (src, ..) = src.clipped_by(bounds);
        if src.is_empty() || dst.is_empty() {
            return
        }

        // whole destination pixels whose left/top edges lie inside of the clipped destination
        let x0 = ceil_cell(dst.x);
        let y0 = ceil_cell(dst.y);
        let x1 = ceil_cell(dst.x + src.w / step_x);
        let y1 = ceil_cell(dst.y + src.h / step_y);
        if x0 >= x1 || y0 >= y1 {
            return
        }
        let target_area = Area::new(x0 as i32, y0 as i32, (x1 - x0) as i32, (y1 - y0) as i32);
        let src_x0 = src.x + (x0 - dst.x) * step_x;
        let mut src_y = src.y + (y0 - dst.y) * step_y;

        let width = source.width();
        let height = source.height();
        let data = source.data();
        let tables = &self.color_tables;
        for (_, line) in self.target.lines_mut(target_area) {
            let row = source_index(src_y, flip_y, height) * width as usize;
            let row = &data[row..row + width as usize];
            let mut src_x = src_x0;
            for pixel in line.iter_mut() {
                let color = row[source_index(src_x, flip_x, width)];
                *pixel = tables.blend(color, *pixel);
                src_x += step_x;
            }
            src_y += step_y;
        }
    }
}
