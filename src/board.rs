use crate::{GameError, Grid, Position};
use itertools::iproduct;
use rand::prelude::*;

/// Mine marker in the value grid; non-negative values are adjacency counts.
const MINE: i8 = -1;

/// Covering state of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cover {
    #[default]
    Hidden,
    Revealed,
    Flagged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Playing,
    Won,
    Lost,
}

/// A single-cell display update produced by a move. Moves return an ordered
/// list of these, parent cell before any neighbors opened through it, so a
/// renderer can apply them as a diff instead of redrawing the whole board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Change {
    pub pos: Position,
    pub glyph: char,
}

impl Change {
    fn new(pos: Position, glyph: char) -> Self {
        Self { pos, glyph }
    }
}

fn digit(value: i8) -> char {
    char::from(b'0' + value as u8)
}

/// Minesweeper board engine.
///
/// Owns a value grid (mines and adjacency counts) and a cover grid (hidden,
/// revealed, flagged), plus the counters the win condition is computed from.
/// Mines are placed lazily on the first `open` so the first-opened cell and
/// its neighbors can be kept mine-free. Once the state reaches `Won` or
/// `Lost` every further move is rejected with `GameError::GameOver`; a new
/// game is a wholesale replacement of the board.
#[derive(Debug)]
pub struct Board {
    mines: Grid<i8>,
    cover: Grid<Cover>,
    width: u32,
    height: u32,
    mine_count: u32,
    opened_count: u32,
    flagged_count: u32,
    mines_placed: bool,
    state: GameState,
    rng: StdRng,
}

impl Board {
    pub fn new(width: u32, height: u32, mine_count: u32) -> Result<Self, GameError> {
        Self::with_rng(width, height, mine_count, StdRng::from_entropy())
    }

    /// Same as [`Board::new`] but with a fixed rng seed, for deterministic
    /// mine placement and hints in tests.
    pub fn with_seed(
        width: u32,
        height: u32,
        mine_count: u32,
        seed: u64,
    ) -> Result<Self, GameError> {
        Self::with_rng(width, height, mine_count, StdRng::seed_from_u64(seed))
    }

    fn with_rng(
        width: u32,
        height: u32,
        mine_count: u32,
        rng: StdRng,
    ) -> Result<Self, GameError> {
        if width == 0 || height == 0 {
            return Err(GameError::InvalidDimensions { width, height });
        }
        if mine_count >= width * height {
            return Err(GameError::TooManyMines {
                width,
                height,
                mines: mine_count,
            });
        }

        Ok(Self {
            mines: Grid::new(width, height),
            cover: Grid::new(width, height),
            width,
            height,
            mine_count,
            opened_count: 0,
            flagged_count: 0,
            mines_placed: false,
            state: GameState::Playing,
            rng,
        })
    }

    /// Builds a board with an explicit mine layout, skipping lazy placement.
    #[cfg(any(test, feature = "test-utils"))]
    pub fn with_mines(
        width: u32,
        height: u32,
        mines: &[Position],
    ) -> Result<Self, GameError> {
        let mut board = Self::with_rng(width, height, mines.len() as u32, StdRng::seed_from_u64(0))?;
        for &pos in mines {
            board.check_bounds(pos)?;
            board.mines.set(pos, MINE);
        }
        board.count_adjacent();
        board.mines_placed = true;
        Ok(board)
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn mines_count(&self) -> u32 {
        self.mine_count
    }

    pub fn opened_count(&self) -> u32 {
        self.opened_count
    }

    /// Mine counter for display: flags are trusted, so this goes negative
    /// when the player over-flags.
    pub fn mines_left(&self) -> i32 {
        self.mine_count as i32 - self.flagged_count as i32
    }

    pub fn is_within_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width as i32 && pos.y >= 0 && pos.y < self.height as i32
    }

    /// Whether the value grid holds a mine at `pos`. Before the first `open`
    /// no mines exist yet and this is `false` everywhere.
    pub fn has_mine(&self, pos: Position) -> Result<bool, GameError> {
        self.check_bounds(pos)?;
        Ok(self.mines.get(pos) == MINE)
    }

    /// Display mapping for one cell: 'O' flagged, ' ' hidden, 'M' revealed
    /// mine, '0'..'8' revealed adjacency count.
    pub fn render(&self, pos: Position) -> Result<char, GameError> {
        self.check_bounds(pos)?;
        Ok(self.glyph(pos))
    }

    /// All board positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let (width, height) = (self.width as i32, self.height as i32);
        iproduct!(0..height, 0..width).map(|(y, x)| Position::new(x, y))
    }

    /// Opens a cell. On the first open of the game this also places the
    /// mines, keeping the 3x3 zone around `pos` clear. Opening a flagged
    /// cell is a no-op, opening a revealed cell is a chord request, and
    /// opening a hidden zero cell flood-fills its connected region.
    pub fn open(&mut self, pos: Position) -> Result<(GameState, Vec<Change>), GameError> {
        self.check_bounds(pos)?;
        self.check_playing()?;

        if !self.mines_placed {
            self.place_mines(pos);
        }

        let mut changes = Vec::new();
        let state = self.open_cell(pos, &mut changes);
        self.finish_move(state);
        Ok((state, changes))
    }

    /// Toggles the flag on a hidden or flagged cell; on a revealed cell this
    /// delegates to [`Board::open`] and behaves as a chord request.
    pub fn mark(&mut self, pos: Position) -> Result<(GameState, Vec<Change>), GameError> {
        self.check_bounds(pos)?;
        self.check_playing()?;

        if self.cover.get(pos) == Cover::Revealed {
            return self.open(pos);
        }

        let mut changes = Vec::new();
        let state = self.mark_cell(pos, &mut changes);
        self.finish_move(state);
        Ok((state, changes))
    }

    /// Plays one automatic move on a uniformly random hidden cell: flags it
    /// if it is a mine, opens it otherwise.
    pub fn hint(&mut self) -> Result<(GameState, Vec<Change>), GameError> {
        self.check_playing()?;

        let hidden: Vec<Position> = self
            .positions()
            .filter(|&pos| self.cover.get(pos) == Cover::Hidden)
            .collect();
        let pos = *hidden.choose(&mut self.rng).ok_or(GameError::NoHiddenCells)?;

        if self.mines.get(pos) == MINE {
            self.mark(pos)
        } else {
            self.open(pos)
        }
    }

    fn glyph(&self, pos: Position) -> char {
        match self.cover.get(pos) {
            Cover::Flagged => 'O',
            Cover::Hidden => ' ',
            Cover::Revealed => {
                let value = self.mines.get(pos);
                if value == MINE {
                    'M'
                } else {
                    digit(value)
                }
            }
        }
    }

    fn is_win(&self) -> bool {
        self.mine_count + self.opened_count == self.width * self.height
    }

    fn check_bounds(&self, pos: Position) -> Result<(), GameError> {
        if self.is_within_bounds(pos) {
            Ok(())
        } else {
            Err(GameError::OutOfBounds(pos))
        }
    }

    fn check_playing(&self) -> Result<(), GameError> {
        if self.state == GameState::Playing {
            Ok(())
        } else {
            Err(GameError::GameOver)
        }
    }

    fn finish_move(&mut self, state: GameState) {
        self.state = state;
        if state != GameState::Playing {
            log::debug!("game finished: {state:?}");
        }
    }

    fn open_cell(&mut self, pos: Position, changes: &mut Vec<Change>) -> GameState {
        match self.cover.get(pos) {
            Cover::Flagged => {
                changes.push(Change::new(pos, 'O'));
                GameState::Playing
            }
            Cover::Revealed => {
                changes.push(Change::new(pos, self.glyph(pos)));
                if self.flagged_neighbors(pos) == self.mines.get(pos) {
                    self.open_adjacent(pos, changes)
                } else {
                    GameState::Playing
                }
            }
            Cover::Hidden => {
                self.cover.set(pos, Cover::Revealed);
                self.opened_count += 1;

                let value = self.mines.get(pos);
                if value == MINE {
                    changes.push(Change::new(pos, 'M'));
                    GameState::Lost
                } else if self.is_win() {
                    changes.push(Change::new(pos, digit(value)));
                    GameState::Won
                } else {
                    changes.push(Change::new(pos, digit(value)));
                    if value == 0 {
                        self.open_adjacent(pos, changes)
                    } else {
                        GameState::Playing
                    }
                }
            }
        }
    }

    /// Opens every hidden neighbor of `pos`, short-circuiting as soon as one
    /// of the recursive opens ends the game. Recursion depth is bounded by
    /// the number of cells, since each step reveals a hidden cell first.
    fn open_adjacent(&mut self, pos: Position, changes: &mut Vec<Change>) -> GameState {
        for neighbor in pos.neighbors_within(self.width, self.height) {
            if self.cover.get(neighbor) != Cover::Hidden {
                continue;
            }
            let state = self.open_cell(neighbor, changes);
            if state != GameState::Playing {
                return state;
            }
        }
        GameState::Playing
    }

    fn mark_cell(&mut self, pos: Position, changes: &mut Vec<Change>) -> GameState {
        match self.cover.get(pos) {
            Cover::Flagged => {
                self.cover.set(pos, Cover::Hidden);
                self.flagged_count -= 1;
                changes.push(Change::new(pos, ' '));
                GameState::Playing
            }
            _ => {
                self.cover.set(pos, Cover::Flagged);
                self.flagged_count += 1;
                changes.push(Change::new(pos, 'O'));
                if self.is_win() {
                    GameState::Won
                } else {
                    GameState::Playing
                }
            }
        }
    }

    fn flagged_neighbors(&self, pos: Position) -> i8 {
        pos.neighbors_within(self.width, self.height)
            .filter(|&p| self.cover.get(p) == Cover::Flagged)
            .count() as i8
    }

    /// Rejection-samples `mine_count` mines, keeping the 3x3 zone around the
    /// first-opened cell clear. When the board is too full for that zone the
    /// exclusion degrades to the first cell only, so placement always
    /// terminates.
    fn place_mines(&mut self, safe: Position) {
        let safe_radius = if self.mine_count + 9 <= self.width * self.height {
            1
        } else {
            log::warn!("board too full for a safe opening zone, only the first cell is kept clear");
            0
        };

        let mut placed = 0;
        while placed < self.mine_count {
            let x = self.rng.gen_range(0..self.width) as i32;
            let y = self.rng.gen_range(0..self.height) as i32;
            let pos = Position::new(x, y);

            if (pos.x - safe.x).abs() <= safe_radius && (pos.y - safe.y).abs() <= safe_radius {
                continue;
            }
            if self.mines.get(pos) == MINE {
                continue;
            }
            self.mines.set(pos, MINE);
            placed += 1;
        }

        self.count_adjacent();
        self.mines_placed = true;
        log::debug!(
            "placed {} mines on {}x{} board, first open at {:?}",
            self.mine_count,
            self.width,
            self.height,
            safe
        );
    }

    fn count_adjacent(&mut self) {
        for pos in self.positions().collect::<Vec<_>>() {
            if self.mines.get(pos) == MINE {
                continue;
            }
            let count = pos
                .neighbors_within(self.width, self.height)
                .filter(|&p| self.mines.get(p) == MINE)
                .count() as i8;
            self.mines.set(pos, count);
        }
    }
}
