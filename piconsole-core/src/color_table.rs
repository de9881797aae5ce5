/*
    Copyright (C) 2026  PICONSOLE contributors

    This file is part of PICONSOLE, a Rust library for building fantasy consoles.

    For the full copyright notice, see the lib.rs file.
*/
//! Color tables used to blend a drawn color with the color already on the target.
//!
//! ```text
//!   source color  s: HH CCCCCC     target color t: HH CCCCCC
//!
//!   output = tables[(s | t) >> 6][s & READ_MASK][t & TARGET_MASK]
//! ```
//! The two top bits of either color select one of 4 tables, the remaining 6 bits index
//! the table. A single lookup covers opaque drawing, transparency and per-color substitution:
//!
//! * table 0 is the draw table, initially opaque (`[s][t] = s`), rewritten by
//!   [ColorTables::pal] and [ColorTables::palt],
//! * table 1 is the identity table (`[s][t] = t`), drawing through it changes nothing,
//! * tables 2 and 3 are free for the application, initially identity.
use crate::palette::Color;

/// Masks the source color before it is used as the table row index.
pub const READ_MASK: Color = 0x3F;
/// Masks the target color before it is used as the table column index.
pub const TARGET_MASK: Color = 0x3F;
/// The number of color tables.
pub const COLOR_TABLES_COUNT: usize = 4;

/// A table of output colors indexed by `[source][target]`.
pub type ColorTable = [[Color; 256]; 256];

/// The set of [ColorTable]s selected by the top bits of blended colors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColorTables(Box<[ColorTable; COLOR_TABLES_COUNT]>);

const fn opaque_row(color: Color) -> [Color; 256] {
    [color; 256]
}

const fn identity_row() -> [Color; 256] {
    let mut row = [0; 256];
    let mut i = 0;
    while i < 256 {
        row[i] = i as Color;
        i += 1;
    }
    row
}

const IDENTITY_ROW: [Color; 256] = identity_row();

impl Default for ColorTables {
    fn default() -> Self {
        let tables: Box<[ColorTable]> = vec![[IDENTITY_ROW; 256]; COLOR_TABLES_COUNT].into_boxed_slice();
        let tables = match tables.try_into() {
            Ok(tables) => tables,
            Err(_) => unreachable!()
        };
        let mut tables = ColorTables(tables);
        tables.reset();
        tables
    }
}

impl ColorTables {
    /// Creates tables in their reset state.
    pub fn new() -> Self {
        Self::default()
    }
    /// Restores table 0 to fully opaque and table 1 to identity.
    ///
    /// Tables 2 and 3 are left untouched.
    pub fn reset(&mut self) {
        self.pal_reset();
        for row in self.0[1].iter_mut() {
            *row = IDENTITY_ROW;
        }
    }
    /// Restores the draw table (table 0) to fully opaque, undoing all [ColorTables::pal]
    /// and [ColorTables::palt] calls.
    pub fn pal_reset(&mut self) {
        for (source, row) in self.0[0].iter_mut().enumerate() {
            *row = opaque_row(source as Color);
        }
    }
    /// Makes the draw table render color `from` as if `to` was drawn.
    pub fn pal(&mut self, from: Color, to: Color) {
        self.0[0][from as usize] = opaque_row(to);
    }
    /// Makes `color` either transparent (the target is kept) or opaque in the draw table.
    pub fn palt(&mut self, color: Color, transparent: bool) {
        self.0[0][color as usize] = if transparent {
            IDENTITY_ROW
        }
        else {
            opaque_row(color)
        };
    }
    /// Returns the output color of drawing `source` over `target`.
    #[inline(always)]
    pub fn blend(&self, source: Color, target: Color) -> Color {
        let table = ((source | target) >> 6) as usize;
        self.0[table][(source & READ_MASK) as usize][(target & TARGET_MASK) as usize]
    }
    /// Returns a table by its index.
    ///
    /// # Panics
    /// Panics if `index` >= [COLOR_TABLES_COUNT].
    pub fn table(&self, index: usize) -> &ColorTable {
        &self.0[index]
    }
    /// Returns a mutable table by its index.
    ///
    /// # Panics
    /// Panics if `index` >= [COLOR_TABLES_COUNT].
    pub fn table_mut(&mut self, index: usize) -> &mut ColorTable {
        &mut self.0[index]
    }
}
