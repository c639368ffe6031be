//! Mutation types

use bytes::Bytes;

/// A single encoded cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub family: Bytes,
    pub qualifier: Bytes,
    pub value: Bytes,
}

/// A put against one row
///
/// Cells are kept in the order they were added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mutation {
    row: Bytes,
    cells: Vec<Cell>,
}

impl Mutation {
    /// Create an empty mutation for a row
    pub fn new(row: impl Into<Bytes>) -> Self {
        Self {
            row: row.into(),
            cells: Vec::new(),
        }
    }

    /// Add a cell to the row
    pub fn add(
        &mut self,
        family: impl Into<Bytes>,
        qualifier: impl Into<Bytes>,
        value: impl Into<Bytes>,
    ) -> &mut Self {
        self.cells.push(Cell {
            family: family.into(),
            qualifier: qualifier.into(),
            value: value.into(),
        });
        self
    }

    /// Row key
    pub fn row(&self) -> &Bytes {
        &self.row
    }

    /// Cells in insertion order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the mutation has no cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
