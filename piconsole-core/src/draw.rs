/*
    Copyright (C) 2026  PICONSOLE contributors

    This file is part of PICONSOLE, a Rust library for building fantasy consoles.

    For the full copyright notice, see the lib.rs file.
*/
//! Shape drawing primitives.
//!
//! All coordinates are in world space: the camera offset is subtracted before a pixel is
//! clipped and blended with the draw target through the [ColorTables][crate::ColorTables].
//! Rectangle and line end points are inclusive.
use core::mem::swap;

use crate::area::Area;
use crate::palette::Color;
use crate::render::RenderContext;

impl RenderContext {
    /// Fills the whole draw target with `color`, ignoring the clipping region, the camera
    /// and the color tables.
    pub fn cls(&mut self, color: Color) {
        self.target_mut().fill(color)
    }

    /// Draws a single pixel.
    pub fn pset(&mut self, x: i32, y: i32, color: Color) {
        let clip = self.effective_clip();
        self.plot(clip, x, y, color)
    }

    /// Returns the color of a pixel of the draw target or 0 if it's outside of the target.
    ///
    /// The camera offset applies, the clipping region doesn't.
    pub fn pget(&self, x: i32, y: i32) -> Color {
        let camera = self.camera_position();
        self.target().get(x.saturating_sub(camera.x), y.saturating_sub(camera.y))
    }

    /// Draws a line from `(x0, y0)` to `(x1, y1)`, both ends included.
    pub fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
        let clip = self.effective_clip();
        let dx = (x1 as i64 - x0 as i64).abs();
        let dy = (y1 as i64 - y0 as i64).abs();
        if dx >= dy {
            let (x0, y0, x1, y1) = if x0 > x1 { (x1, y1, x0, y0) } else { (x0, y0, x1, y1) };
            let step = if y1 < y0 { -1 } else { 1 };
            let slope = if dx == 0 { 0.0 } else { dy as f64 / dx as f64 };
            let mut offset = 0.0;
            let mut threshold = 0.5;
            let mut y = y0;
            for x in x0..=x1 {
                self.plot(clip, x, y, color);
                offset += slope;
                if offset >= threshold {
                    y += step;
                    threshold += 1.0;
                }
            }
        }
        else {
            let (x0, y0, x1, y1) = if y0 > y1 { (x1, y1, x0, y0) } else { (x0, y0, x1, y1) };
            let step = if x1 < x0 { -1 } else { 1 };
            let slope = dx as f64 / dy as f64;
            let mut offset = 0.0;
            let mut threshold = 0.5;
            let mut x = x0;
            for y in y0..=y1 {
                self.plot(clip, x, y, color);
                offset += slope;
                if offset >= threshold {
                    x += step;
                    threshold += 1.0;
                }
            }
        }
    }

    /// Draws the border of a rectangle with opposite corners at `(x0, y0)` and `(x1, y1)`.
    pub fn rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
        self.line(x0, y0, x1, y0, color);
        self.line(x1, y0, x1, y1, color);
        self.line(x1, y1, x0, y1, color);
        self.line(x0, y1, x0, y0, color);
    }

    /// Fills a rectangle with opposite corners at `(x0, y0)` and `(x1, y1)`.
    pub fn rect_fill(&mut self, mut x0: i32, mut y0: i32, mut x1: i32, mut y1: i32, color: Color) {
        if x0 > x1 {
            swap(&mut x0, &mut x1);
        }
        if y0 > y1 {
            swap(&mut y0, &mut y1);
        }
        let camera = self.camera_position();
        // computed wide, so no coordinate can overflow before being clipped
        let area = Area::new(x0 as i64 - camera.x as i64,
                             y0 as i64 - camera.y as i64,
                             x1 as i64 - x0 as i64 + 1,
                             y1 as i64 - y0 as i64 + 1);
        let (area, ..) = area.clipped_by(self.effective_clip().into());
        if area.is_empty() {
            return
        }
        let area = Area::new(area.x as i32, area.y as i32, area.w as i32, area.h as i32);
        let tables = &self.color_tables;
        for (_, line) in self.target.lines_mut(area) {
            for pixel in line.iter_mut() {
                *pixel = tables.blend(color, *pixel);
            }
        }
    }

    /// Draws the outline of a circle with the center at `(cx, cy)`.
    ///
    /// Each outline pixel is blended exactly once. A circle with the radius 0 is a single pixel.
    pub fn circ(&mut self, cx: i32, cy: i32, radius: i32, color: Color) {
        if radius < 0 {
            return
        }
        let clip = self.effective_clip();
        let mut x = 0;
        let mut y = radius;
        let mut d = 1 - radius as i64;
        while x <= y {
            if x == 0 {
                if y == 0 {
                    self.plot(clip, cx, cy, color);
                }
                else {
                    self.plot_offset(clip, cx, cy, 0, y, color);
                    self.plot_offset(clip, cx, cy, 0, -y, color);
                    self.plot_offset(clip, cx, cy, y, 0, color);
                    self.plot_offset(clip, cx, cy, -y, 0, color);
                }
            }
            else if x == y {
                self.plot_offset(clip, cx, cy, x, y, color);
                self.plot_offset(clip, cx, cy, -x, y, color);
                self.plot_offset(clip, cx, cy, x, -y, color);
                self.plot_offset(clip, cx, cy, -x, -y, color);
            }
            else {
                self.plot_offset(clip, cx, cy, x, y, color);
                self.plot_offset(clip, cx, cy, -x, y, color);
                self.plot_offset(clip, cx, cy, x, -y, color);
                self.plot_offset(clip, cx, cy, -x, -y, color);
                self.plot_offset(clip, cx, cy, y, x, color);
                self.plot_offset(clip, cx, cy, -y, x, color);
                self.plot_offset(clip, cx, cy, y, -x, color);
                self.plot_offset(clip, cx, cy, -y, -x, color);
            }
            midpoint_step(&mut x, &mut y, &mut d);
        }
    }

    /// Fills a circle with the center at `(cx, cy)`.
    ///
    /// The circle is drawn as pairs of horizontal spans mirrored around the center row,
    /// walking the same staircase as [RenderContext::circ]. Every row is drawn once.
    pub fn circ_fill(&mut self, cx: i32, cy: i32, radius: i32, color: Color) {
        if radius < 0 {
            return
        }
        let mut x = 0;
        let mut y = radius;
        let mut d = 1 - radius as i64;
        while x <= y {
            // the row `x` away from the center is as wide as the outline's current `y`
            self.span_pair(cx, cy, x, y, color);
            let (last_x, last_y) = (x, y);
            // the row `last_y` away is complete once the staircase steps down
            if midpoint_step(&mut x, &mut y, &mut d) && last_y != last_x {
                self.span_pair(cx, cy, last_y, last_x, color);
            }
        }
    }

    fn span_pair(&mut self, cx: i32, cy: i32, dy: i32, half_width: i32, color: Color) {
        let (x0, x1) = (cx.saturating_sub(half_width), cx.saturating_add(half_width));
        if let Ok(y) = i32::try_from(cy as i64 - dy as i64) {
            self.horizontal_line(y, x0, x1, color);
        }
        if dy != 0 {
            if let Ok(y) = i32::try_from(cy as i64 + dy as i64) {
                self.horizontal_line(y, x0, x1, color);
            }
        }
    }

    /// Plots a pixel at `(cx + dx, cy + dy)` unless the sum leaves the coordinate range.
    #[inline]
    fn plot_offset(&mut self, clip: Area<i32>, cx: i32, cy: i32, dx: i32, dy: i32, color: Color) {
        if let (Ok(x), Ok(y)) = (i32::try_from(cx as i64 + dx as i64),
                                 i32::try_from(cy as i64 + dy as i64)) {
            self.plot(clip, x, y, color)
        }
    }

    #[inline]
    fn horizontal_line(&mut self, y: i32, x0: i32, x1: i32, color: Color) {
        self.rect_fill(x0, y, x1, y, color)
    }

    #[inline]
    fn plot(&mut self, clip: Area<i32>, x: i32, y: i32, color: Color) {
        let camera = self.camera_position();
        let x = x.saturating_sub(camera.x);
        let y = y.saturating_sub(camera.y);
        if !clip.contains(x, y) {
            return
        }
        let target = self.target.get(x, y);
        let output = self.color_tables.blend(color, target);
        self.target.set(x, y, output);
    }
}

/// Advances the midpoint circle walk by one column.
///
/// Returns `true` if the walk stepped down a row.
#[inline]
fn midpoint_step(x: &mut i32, y: &mut i32, d: &mut i64) -> bool {
    *x += 1;
    if *d < 0 {
        *d += 2 * *x as i64 + 1;
        false
    }
    else {
        *y -= 1;
        *d += 2 * (*x as i64 - *y as i64) + 1;
        true
    }
}
