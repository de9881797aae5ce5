/*
    Copyright (C) 2026  PICONSOLE contributors

    This file is part of PICONSOLE, a Rust library for building fantasy consoles.

    For the full copyright notice, see the lib.rs file.
*/
//! Rectangle geometry with the clipping arithmetic shared by every drawing operation.
use core::ops::{Add, Sub};

#[cfg(feature = "snapshot")]
use serde::{Serialize, Deserialize};

/// A point on a surface.
#[cfg_attr(feature = "snapshot", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32
}

/// A rectangle over a numeric type, usually `i32` or `f64`.
///
/// `w` and `h` may become negative in the middle of a computation, but [Area::clipped_by]
/// always returns an area with non-negative dimensions.
#[cfg_attr(feature = "snapshot", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Area<T> {
    pub x: T,
    pub y: T,
    pub w: T,
    pub h: T
}

impl Eq for Area<i32> {}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }
}

impl<T> Area<T> {
    pub const fn new(x: T, y: T, w: T, h: T) -> Self {
        Area { x, y, w, h }
    }
}

impl<T> Area<T>
    where T: Copy + Default + PartialOrd + Add<Output=T> + Sub<Output=T>
{
    /// Returns `true` if the area covers no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        let zero = T::default();
        !(self.w > zero && self.h > zero)
    }

    /// Checks if the point lies inside of the half-open ranges `[x, x+w)` and `[y, y+h)`.
    #[inline]
    pub fn contains(&self, x: T, y: T) -> bool {
        x >= self.x && x < self.x + self.w &&
        y >= self.y && y < self.y + self.h
    }

    /// Returns a copy translated by the given offset.
    #[inline]
    pub fn moved_by(self, dx: T, dy: T) -> Self {
        Area { x: self.x + dx, y: self.y + dy, ..self }
    }

    /// Returns this area clipped so it fits inside of `clip`.
    ///
    /// Along with the clipped area the amounts `(dx, dy)` by which the left and top edges
    /// have moved are returned. Both are never negative. A source region paired with this
    /// area should be shifted by the same amounts to stay in sync.
    ///
    /// If nothing is left, the returned area has `w` or `h` equal to 0.
    pub fn clipped_by(self, clip: Area<T>) -> (Self, T, T) {
        let zero = T::default();
        let Area { mut x, mut y, mut w, mut h } = self;
        let mut dx = zero;
        let mut dy = zero;

        if x < clip.x {
            dx = clip.x - x;
            w = w - dx;
            x = clip.x;
        }
        if y < clip.y {
            dy = clip.y - y;
            h = h - dy;
            y = clip.y;
        }

        let clip_right = clip.x + clip.w;
        if x + w > clip_right {
            w = clip_right - x;
        }
        let clip_bottom = clip.y + clip.h;
        if y + h > clip_bottom {
            h = clip_bottom - y;
        }

        if w < zero {
            w = zero;
        }
        if h < zero {
            h = zero;
        }

        (Area { x, y, w, h }, dx, dy)
    }
}

impl From<Area<i32>> for Area<f64> {
    fn from(area: Area<i32>) -> Self {
        Area {
            x: area.x.into(),
            y: area.y.into(),
            w: area.w.into(),
            h: area.h.into()
        }
    }
}

impl From<Area<i32>> for Area<i64> {
    fn from(area: Area<i32>) -> Self {
        Area {
            x: area.x.into(),
            y: area.y.into(),
            w: area.w.into(),
            h: area.h.into()
        }
    }
}
