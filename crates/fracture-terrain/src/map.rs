//! Generated map: a fixed-size grid of classified cells.

use std::sync::Arc;

use crate::biome::{Biome, BiomeCategory, BiomeId, BiomeTable};

/// One grid node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    /// Column.
    pub x: usize,
    /// Row.
    pub y: usize,
    /// Final height after shaping and falloff, in `[0, 1]`.
    pub noise_value: f64,
    /// Final temperature after shaping and falloff, in `[0, 1]`.
    pub temperature: f64,
    /// Assigned biome, absent on a classification gap.
    pub biome: Option<BiomeId>,
    /// Whether units can walk on this cell.
    pub walkable: bool,
}

/// Why a cell was left without a biome.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GapKind {
    /// The height fell outside every category.
    NoCategory {
        /// Final height of the cell.
        height: f64,
    },
    /// The temperature fell outside every biome of the matched category.
    NoBiome {
        /// Index of the matched category.
        category: usize,
        /// Final temperature of the cell.
        temperature: f64,
    },
}

/// A cell the biome table did not cover.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClassificationGap {
    /// Column.
    pub x: usize,
    /// Row.
    pub y: usize,
    /// Which lookup missed.
    pub kind: GapKind,
}

/// The complete result of one generation run.
///
/// Immutable once built. Cells are stored row-major (`index = y * width + x`).
#[derive(Clone, Debug)]
pub struct MapData {
    width: usize,
    height: usize,
    seed: u64,
    cells: Vec<Cell>,
    gaps: Vec<ClassificationGap>,
    table: Arc<BiomeTable>,
}

impl MapData {
    pub(crate) fn new(
        size: usize,
        seed: u64,
        cells: Vec<Cell>,
        gaps: Vec<ClassificationGap>,
        table: Arc<BiomeTable>,
    ) -> Self {
        debug_assert_eq!(cells.len(), size * size);
        Self {
            width: size,
            height: size,
            seed,
            cells,
            gaps,
            table,
        }
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Seed the map was generated from (height field; temperature used `seed + 1`).
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Cell at `(x, y)`, or `None` outside the grid.
    pub fn get(&self, x: usize, y: usize) -> Option<&Cell> {
        if x < self.width && y < self.height {
            Some(&self.cells[y * self.width + x])
        } else {
            None
        }
    }

    /// Whether `(x, y)` is inside the grid and walkable.
    pub fn is_walkable(&self, x: usize, y: usize) -> bool {
        self.get(x, y).is_some_and(|c| c.walkable)
    }

    /// All cells, row-major.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Cells grouped by row.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width.max(1))
    }

    /// Cells the biome table did not cover, in row-major order.
    pub fn gaps(&self) -> &[ClassificationGap] {
        &self.gaps
    }

    /// The biome table the map was classified against.
    pub fn biome_table(&self) -> &BiomeTable {
        &self.table
    }

    /// Biome assigned to a cell.
    pub fn biome_of(&self, cell: &Cell) -> Option<&Biome> {
        cell.biome.and_then(|id| self.table.biome(id))
    }

    /// Category of the biome assigned to a cell.
    pub fn category_of(&self, cell: &Cell) -> Option<&BiomeCategory> {
        cell.biome.and_then(|id| self.table.category(id.category))
    }

    /// Number of walkable cells.
    pub fn walkable_count(&self) -> usize {
        self.cells.iter().filter(|c| c.walkable).count()
    }
}
