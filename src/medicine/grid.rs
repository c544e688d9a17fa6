/// Number of pill columns on a sheet
pub const GRID_COLUMNS: usize = 4;

/// Display state of a single pill on the sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    Consumed,
    NextUp,
    Remaining,
}

/// Position of a cell in snake order. Even columns read top-to-bottom,
/// odd columns bottom-to-top.
pub fn snake_index(row: usize, col: usize, rows: usize) -> usize {
    if col % 2 == 0 {
        col * rows + row
    } else {
        col * rows + (rows - 1 - row)
    }
}

/// Classified pill sheet shared by the SVG and text renderers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PillGrid {
    rows: usize,
    cols: usize,
    // indexed by snake index
    cells: Vec<CellState>,
}

impl PillGrid {
    pub fn new(remaining: i64, taken_today: bool, max: i64) -> Self {
        let max = usize::try_from(max).unwrap_or(0);
        let cols = GRID_COLUMNS;
        let rows = max.div_ceil(cols);

        let remaining = usize::try_from(remaining).unwrap_or(0).min(max);
        let taken = max - remaining;
        let next_up = (!taken_today && taken < max).then_some(taken);

        let cells = (0..rows * cols)
            .map(|index| {
                if index < taken {
                    CellState::Consumed
                } else if Some(index) == next_up {
                    CellState::NextUp
                } else {
                    CellState::Remaining
                }
            })
            .collect();

        Self { rows, cols, cells }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cell(&self, row: usize, col: usize) -> CellState {
        self.cells[snake_index(row, col, self.rows)]
    }

    /// Cells in raster order (row by row), with their coordinates
    pub fn iter_raster(&self) -> impl Iterator<Item = (usize, usize, CellState)> + '_ {
        (0..self.rows)
            .flat_map(move |row| (0..self.cols).map(move |col| (row, col, self.cell(row, col))))
    }

    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|&&cell| cell == state).count()
    }
}
