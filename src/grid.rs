use crate::Position;
use ndarray::Array2;

/// Fixed-size two-dimensional container addressed by `(x, y)`.
///
/// Pure storage with no game semantics: every cell starts at `T::default()`
/// and `reset` restores that state. Callers are responsible for passing
/// in-bounds positions; indexing out of bounds panics.
#[derive(Debug, Clone)]
pub struct Grid<T> {
    cells: Array2<T>,
}

impl<T: Copy + Default> Grid<T> {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            cells: Array2::default((width as usize, height as usize)),
        }
    }

    pub fn width(&self) -> u32 {
        self.cells.nrows() as u32
    }

    pub fn height(&self) -> u32 {
        self.cells.ncols() as u32
    }

    pub fn get(&self, pos: Position) -> T {
        self.cells[[pos.x as usize, pos.y as usize]]
    }

    pub fn set(&mut self, pos: Position, value: T) {
        self.cells[[pos.x as usize, pos.y as usize]] = value;
    }

    pub fn reset(&mut self) {
        self.cells.fill(T::default());
    }
}
