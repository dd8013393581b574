/// A single `(x, y)` cell coordinate. Signed so that neighbor arithmetic can
/// step outside the board; the board filters out-of-bounds positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Iterates the 8-neighborhood in row-major order (top row first),
    /// skipping the center cell. Bounds are not checked here.
    pub fn neighbors(&self) -> impl Iterator<Item = Position> + '_ {
        (-1..=1).flat_map(move |dy| {
            (-1..=1).filter_map(move |dx| {
                if dx == 0 && dy == 0 {
                    None
                } else {
                    Some(Position::new(self.x + dx, self.y + dy))
                }
            })
        })
    }

    /// Like [`Position::neighbors`], but keeps only positions inside a
    /// `width x height` board.
    pub fn neighbors_within(&self, width: u32, height: u32) -> impl Iterator<Item = Position> + '_ {
        self.neighbors()
            .filter(move |p| p.x >= 0 && p.x < width as i32 && p.y >= 0 && p.y < height as i32)
    }
}
