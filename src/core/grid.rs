//! Uniform spatial hash grid for neighbor queries.
//!
//! Linked-cell layout: one `head` slot per cell and one `next` slot per
//! particle, both plain index arrays. Insertion is O(1) (prepend onto the
//! cell's chain) and a neighborhood query walks at most the 3x3 block of
//! cells around a position. The grid is rebuilt from scratch every
//! sub-step, so it carries no state that survives a `clear()`.

use crate::math::{Real, Vector};

/// Empty-bucket / end-of-chain sentinel.
pub const NIL: u32 = u32::MAX;

/// Cells scanned around a query position, per axis.
pub const NEIGHBORHOOD: i32 = 1;

#[derive(Clone, Debug, Default)]
pub struct SpatialGrid {
    cell_size: Real,
    cols: usize,
    rows: usize,
    head: Vec<u32>,
    next: Vec<u32>,
}

impl SpatialGrid {
    /// Build a grid covering `area_width x area_height` with the given cell
    /// size. Equivalent to `configure` on a fresh value.
    pub fn new(area_width: Real, area_height: Real, cell_size: Real) -> Self {
        let mut grid = Self::default();
        grid.configure(area_width, area_height, cell_size);
        grid
    }

    /// Recompute the grid geometry and reset every bucket.
    ///
    /// Must be called whenever the cell size changes (i.e. whenever the
    /// global particle radius changes), not just at startup. One padding
    /// cell is kept on each side of the area so border positions land in
    /// interior cells.
    pub fn configure(&mut self, area_width: Real, area_height: Real, cell_size: Real) {
        debug_assert!(cell_size > 0.0, "grid cell size must be positive");
        self.cell_size = cell_size;
        self.cols = (area_width / cell_size).ceil() as usize + 2;
        self.rows = (area_height / cell_size).ceil() as usize + 2;
        self.head.clear();
        self.head.resize(self.cols * self.rows, NIL);
    }

    pub fn cell_size(&self) -> Real {
        self.cell_size
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Reset every bucket to empty. O(cols * rows); called once per
    /// sub-step before re-inserting all particles.
    pub fn clear(&mut self) {
        self.head.fill(NIL);
    }

    /// Grow or shrink the per-particle chain array in lockstep with the
    /// particle store.
    pub fn resize_particles(&mut self, count: usize) {
        self.next.resize(count, NIL);
    }

    pub fn tracked_particles(&self) -> usize {
        self.next.len()
    }

    /// Cell coordinates of a position, unclamped. May fall outside the
    /// grid for particles that overshot the area.
    #[inline(always)]
    fn cell_coords(&self, position: Vector) -> (i32, i32) {
        (
            (position.x / self.cell_size).floor() as i32,
            (position.y / self.cell_size).floor() as i32,
        )
    }

    /// Insert a particle index at a position.
    ///
    /// Out-of-range positions are clamped into the border cells rather
    /// than rejected, keeping insertion total for particles that have
    /// transiently overshot the area.
    pub fn insert(&mut self, index: usize, position: Vector) {
        debug_assert!(index < self.next.len(), "grid not resized for particle");
        let (gx, gy) = self.cell_coords(position);
        let gx = (gx.max(0) as usize).min(self.cols - 1);
        let gy = (gy.max(0) as usize).min(self.rows - 1);
        let cell = gy * self.cols + gx;
        self.next[index] = self.head[cell];
        self.head[cell] = index as u32;
    }

    /// Iterate the indices of every particle stored in the 3x3 block of
    /// cells centered on `position`'s cell, skipping cells outside the
    /// grid. With `cell_size` at least the contact distance, this scan is
    /// exhaustive for contact detection.
    pub fn neighbors(&self, position: Vector) -> Neighbors<'_> {
        let (gx, gy) = self.cell_coords(position);
        let mut cells = [0usize; 9];
        let mut count = 0;
        for ny in (gy - NEIGHBORHOOD)..=(gy + NEIGHBORHOOD) {
            for nx in (gx - NEIGHBORHOOD)..=(gx + NEIGHBORHOOD) {
                if nx < 0 || nx >= self.cols as i32 || ny < 0 || ny >= self.rows as i32 {
                    continue;
                }
                cells[count] = ny as usize * self.cols + nx as usize;
                count += 1;
            }
        }
        Neighbors {
            grid: self,
            cells,
            count,
            cursor: 0,
            current: NIL,
        }
    }
}

/// Lazy walk over the occupant chains of up to nine cells.
pub struct Neighbors<'a> {
    grid: &'a SpatialGrid,
    cells: [usize; 9],
    count: usize,
    cursor: usize,
    current: u32,
}

impl Iterator for Neighbors<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        while self.current == NIL {
            if self.cursor >= self.count {
                return None;
            }
            self.current = self.grid.head[self.cells[self.cursor]];
            self.cursor += 1;
        }
        let index = self.current as usize;
        self.current = self.grid.next[index];
        Some(index)
    }
}
