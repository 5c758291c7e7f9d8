//! Arena-indexed slot grid.
//!
//! Days and periods are addressed by their position in the [`TimeGrid`],
//! and occupancy is a flat `days × periods` array of occupant lists, so
//! the placement loops never hash labels.
//!
//! Break periods keep an index (so adjacency can see them) but are
//! excluded from the placeable set and never hold occupants.
//!
//! Single-occupant use treats a non-empty cell as taken; multi-occupant
//! use appends to the cell's list.

use crate::models::TimeGrid;

/// Position of a cell: day index and period index (break-inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRef {
    /// Index into the day list.
    pub day: usize,
    /// Index into the full period sequence.
    pub period: usize,
}

impl CellRef {
    /// Creates a cell reference.
    pub fn new(day: usize, period: usize) -> Self {
        Self { day, period }
    }
}

/// Occupancy grid over one [`TimeGrid`].
#[derive(Debug, Clone)]
pub struct SlotGrid<'g, T> {
    grid: &'g TimeGrid,
    placeable: Vec<usize>,
    cells: Vec<Vec<T>>,
}

impl<'g, T> SlotGrid<'g, T> {
    /// Creates an empty grid.
    pub fn new(grid: &'g TimeGrid) -> Self {
        let placeable = grid
            .periods
            .iter()
            .enumerate()
            .filter(|(_, p)| !p.is_break)
            .map(|(i, _)| i)
            .collect();
        let size = grid.days.len() * grid.periods.len();
        let mut cells = Vec::with_capacity(size);
        cells.resize_with(size, Vec::new);
        Self {
            grid,
            placeable,
            cells,
        }
    }

    /// Number of days.
    pub fn day_count(&self) -> usize {
        self.grid.days.len()
    }

    /// Indices of teaching periods in canonical order.
    pub fn placeable_periods(&self) -> &[usize] {
        &self.placeable
    }

    /// Number of placeable cells.
    pub fn placeable_cell_count(&self) -> usize {
        self.day_count() * self.placeable.len()
    }

    /// Placeable cells in canonical order (day-major, then period).
    pub fn placeable_cells(&self) -> impl Iterator<Item = CellRef> + '_ {
        (0..self.day_count()).flat_map(move |day| {
            self.placeable
                .iter()
                .map(move |&period| CellRef::new(day, period))
        })
    }

    /// Day label at `day`.
    pub fn day_label(&self, day: usize) -> &'g str {
        &self.grid.days[day]
    }

    /// Period label at `period`.
    pub fn period_label(&self, period: usize) -> &'g str {
        &self.grid.periods[period].label
    }

    /// The period immediately before `period` in the break-inclusive
    /// sequence, or `None` if `period` is first or follows a break.
    pub fn previous_period(&self, period: usize) -> Option<usize> {
        let prev = period.checked_sub(1)?;
        (!self.grid.periods[prev].is_break).then_some(prev)
    }

    fn index(&self, cell: CellRef) -> usize {
        cell.day * self.grid.periods.len() + cell.period
    }

    /// Whether the cell holds at least one occupant.
    pub fn is_occupied(&self, cell: CellRef) -> bool {
        !self.cells[self.index(cell)].is_empty()
    }

    /// First occupant of the cell.
    pub fn occupant(&self, cell: CellRef) -> Option<&T> {
        self.cells[self.index(cell)].first()
    }

    /// All occupants of the cell.
    pub fn occupants(&self, cell: CellRef) -> &[T] {
        &self.cells[self.index(cell)]
    }

    /// Single-occupant placement. Returns `false` if the cell is taken.
    pub fn occupy(&mut self, cell: CellRef, value: T) -> bool {
        let idx = self.index(cell);
        if !self.cells[idx].is_empty() {
            return false;
        }
        self.cells[idx].push(value);
        true
    }

    /// Multi-occupant placement.
    pub fn push(&mut self, cell: CellRef, value: T) {
        let idx = self.index(cell);
        self.cells[idx].push(value);
    }
}
