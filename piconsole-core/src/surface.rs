/*
    Copyright (C) 2026  PICONSOLE contributors

    This file is part of PICONSOLE, a Rust library for building fantasy consoles.

    For the full copyright notice, see the lib.rs file.
*/
//! A generic two dimensional grid of cells.
use core::iter::{Skip, StepBy, Take};
use core::slice::ChunksExact;

use crate::area::{Area, Position};
use crate::palette::Color;

/// A rectangular grid of `T` cells stored row by row.
///
/// Reading or writing outside of the grid is never an error: [Surface::get] returns the
/// default value and [Surface::set] does nothing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Surface<T> {
    width: i32,
    height: i32,
    data: Vec<T>
}

/// A surface of palette indexes.
pub type Canvas = Surface<Color>;

/// An iterator over the lines of a [Surface] region, created by [Surface::lines].
///
/// Yields the position of the first cell of each line together with a slice of its cells.
#[derive(Clone, Debug)]
pub struct Lines<'a, T> {
    rows: Take<Skip<ChunksExact<'a, T>>>,
    area: Area<i32>,
    line: i32
}

impl<T: Copy + Default> Surface<T> {
    /// Creates a new surface with all cells set to the default value.
    ///
    /// Negative dimensions are treated as 0.
    ///
    /// # Panics
    /// Panics if the number of cells overflows `usize`.
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        let size = (width as usize).checked_mul(height as usize)
                   .expect("surface size overflows usize");
        Surface { width, height, data: vec![T::default(); size] }
    }

    /// Returns the value of a cell or the default value if `(x, y)` is outside of the surface.
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> T {
        match self.index(x, y) {
            Some(index) => self.data[index],
            None => T::default()
        }
    }

    /// Sets the value of a cell. Does nothing if `(x, y)` is outside of the surface.
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, value: T) {
        if let Some(index) = self.index(x, y) {
            self.data[index] = value;
        }
    }

    /// Sets all cells to `value`.
    pub fn fill(&mut self, value: T) {
        for cell in self.data.iter_mut() {
            *cell = value;
        }
    }

    /// Sets all cells to the default value.
    pub fn clear(&mut self) {
        self.fill(T::default())
    }

    /// Copies `values` into the surface row by row starting at the top-left cell.
    ///
    /// Extra values are ignored. Returns the number of cells copied.
    pub fn set_all(&mut self, values: &[T]) -> usize {
        let len = values.len().min(self.data.len());
        self.data[..len].copy_from_slice(&values[..len]);
        len
    }

    /// Returns a new surface with a copy of the given region.
    ///
    /// The region is clipped to the surface first, so the result may be smaller than `area`.
    pub fn clone_area(&self, area: Area<i32>) -> Self {
        let (area, ..) = area.clipped_by(self.area());
        let mut target = Surface::new(area.w, area.h);
        let width = area.w as usize;
        if width != 0 {
            for ((_, line), target_line) in self.lines(area).zip(target.data.chunks_exact_mut(width)) {
                target_line.copy_from_slice(line);
            }
        }
        target
    }

    /// Copies the `area` of `source` to this surface with its top-left corner at `target`.
    ///
    /// Parts of the region which fall outside of either surface are skipped.
    pub fn copy_area(&mut self, source: &Surface<T>, area: Area<i32>, target: Position) {
        let (area, sdx, sdy) = area.clipped_by(source.area());
        let dst = Area::new(target.x + sdx, target.y + sdy, area.w, area.h);
        let (dst, ddx, ddy) = dst.clipped_by(self.area());
        if dst.is_empty() {
            return
        }
        let src = Area::new(area.x + ddx, area.y + ddy, dst.w, dst.h);
        for ((_, line), (_, target_line)) in source.lines(src).zip(self.lines_mut(dst)) {
            target_line.copy_from_slice(line);
        }
    }
}

impl<T> Surface<T> {
    /// Creates a surface from existing cells.
    ///
    /// Returns `None` if `data` does not hold exactly `width * height` cells.
    pub fn try_from_data(width: i32, height: i32, data: Vec<T>) -> Option<Self> {
        if width < 0 || height < 0 {
            return None
        }
        if (width as usize).checked_mul(height as usize)? != data.len() {
            return None
        }
        Some(Surface { width, height, data })
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Returns the whole surface as an area at `(0, 0)`.
    #[inline]
    pub fn area(&self) -> Area<i32> {
        Area::new(0, 0, self.width, self.height)
    }

    /// Returns all cells, row by row.
    #[inline]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    #[inline]
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && y >= 0 && x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        }
        else {
            None
        }
    }

    /// Returns an iterator over the lines of the given region, clipped to the surface.
    pub fn lines(&self, area: Area<i32>) -> Lines<'_, T> {
        let (area, ..) = area.clipped_by(self.area());
        // ChunksExact does not accept a chunk size of 0
        let width = (self.width as usize).max(1);
        let rows = if area.is_empty() { 0 } else { area.h as usize };
        Lines {
            rows: self.data.chunks_exact(width).skip(area.y as usize).take(rows),
            area,
            line: 0
        }
    }

    /// Returns an iterator over the mutable lines of the given region, clipped to the surface.
    pub fn lines_mut(&mut self, area: Area<i32>) -> impl Iterator<Item=(Position, &mut [T])> {
        let (area, ..) = area.clipped_by(self.area());
        let width = (self.width as usize).max(1);
        let rows = if area.is_empty() { 0 } else { area.h as usize };
        let x0 = area.x as usize;
        let x1 = x0 + area.w as usize;
        self.data.chunks_exact_mut(width)
                 .skip(area.y as usize)
                 .take(rows)
                 .zip(area.y..)
                 .map(move |(row, y)| (Position::new(area.x, y), &mut row[x0..x1]))
    }

    /// Returns an iterator over every n-th cell of a single column.
    pub fn column(&self, x: i32) -> StepBy<Skip<core::slice::Iter<'_, T>>> {
        let (skip, step) = if x >= 0 && x < self.width {
            (x as usize, self.width as usize)
        }
        else {
            (self.data.len(), 1)
        };
        self.data.iter().skip(skip).step_by(step)
    }
}

impl<'a, T> Iterator for Lines<'a, T> {
    type Item = (Position, &'a [T]);

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.rows.next()?;
        let Area { x, y, w, .. } = self.area;
        let position = Position::new(x, y + self.line);
        self.line += 1;
        let x = x as usize;
        Some((position, &row[x..x + w as usize]))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.rows.size_hint()
    }
}
