use super::config::{GameConfig, INITIAL_DIRECTION, INITIAL_SNAKE};
use super::direction::Direction;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    body: Vec<Position>,
}

impl Snake {
    /// Create a snake from its cells, head first.
    ///
    /// # Panics
    ///
    /// Panics if `body` is empty.
    pub fn from_cells(body: Vec<Position>) -> Self {
        assert!(!body.is_empty(), "a snake needs at least one cell");
        Self { body }
    }

    /// The fixed starting snake
    pub fn initial() -> Self {
        Self::from_cells(INITIAL_SNAKE.iter().copied().map(Position::from).collect())
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// All segments, head first
    pub fn cells(&self) -> &[Position] {
        &self.body
    }

    /// Check if any segment, head and tail included, sits on `pos`
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Push a new head, dropping the tail unless `should_grow`
    pub fn advance(&mut self, new_head: Position, should_grow: bool) {
        self.body.insert(0, new_head);

        if !should_grow {
            self.body.pop();
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; a snake keeps at least its head
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake left the board
    Wall,
    /// Snake ran into one of its own cells
    SelfCollision,
}

/// What a single board cell shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Head,
    Body,
    Food,
    Empty,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    /// Direction applied on the last tick
    pub direction: Direction,
    pub food: Position,
    pub board_size: usize,
    pub game_over: bool,
}

impl GameState {
    /// Create a running game state
    pub fn new(snake: Snake, direction: Direction, food: Position, board_size: usize) -> Self {
        Self {
            snake,
            direction,
            food,
            board_size,
            game_over: false,
        }
    }

    /// The starting layout for `config`, with food at `food`
    pub fn initial(config: &GameConfig, food: Position) -> Self {
        Self::new(Snake::initial(), INITIAL_DIRECTION, food, config.board_size)
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        let size = i32::try_from(self.board_size).unwrap_or(i32::MAX);
        pos.x >= 0 && pos.x < size && pos.y >= 0 && pos.y < size
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.occupies(pos)
    }

    /// Classify a cell for drawing
    pub fn cell_kind(&self, pos: Position) -> CellKind {
        if pos == self.snake.head() {
            CellKind::Head
        } else if self.snake.occupies(pos) {
            CellKind::Body
        } else if pos == self.food {
            CellKind::Food
        } else {
            CellKind::Empty
        }
    }
}
