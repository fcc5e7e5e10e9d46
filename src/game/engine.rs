use super::{
    config::GameConfig,
    direction::Direction,
    state::{CollisionType, GameState, Position, Snake},
};
use log::{debug, info, trace};
use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};

/// Result of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Snake moved one cell, length unchanged
    Moved,
    /// Snake ate the food and grew by one cell
    Grew,
    /// Snake hit a wall or itself; the game is over
    Collided(CollisionType),
    /// Snake covers every cell, no food can be placed; the game is over
    BoardFilled,
    /// Game was already over, nothing changed
    Frozen,
}

impl TickOutcome {
    /// Whether this tick left the game over
    pub fn is_terminal(&self) -> bool {
        !matches!(self, TickOutcome::Moved | TickOutcome::Grew)
    }
}

/// The game engine that owns the single game instance and handles all game logic
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
    state: GameState,
    /// Last accepted direction request, applied on the next tick
    pending_direction: Direction,
}

impl GameEngine {
    /// Create a new game engine with an entropy-seeded RNG
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create a new game engine whose food placement is reproducible
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    /// Resume from an arbitrary state. The pending direction starts as the
    /// state's committed direction.
    pub fn from_state(config: GameConfig, state: GameState, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
            pending_direction: state.direction,
            state,
        }
    }

    fn with_rng(config: GameConfig, mut rng: StdRng) -> Self {
        let state = initial_state(&config, &mut rng);
        Self {
            pending_direction: state.direction,
            config,
            rng,
            state,
        }
    }

    /// Reset to the initial layout with freshly placed food
    pub fn restart(&mut self) {
        self.state = initial_state(&self.config, &mut self.rng);
        self.pending_direction = self.state.direction;
        info!("Game restarted, food at {:?}", self.state.food);
    }

    /// Request a turn for the next tick.
    ///
    /// The request is checked against the direction applied on the last tick,
    /// not against earlier pending requests. Returns false when the request
    /// would reverse the snake and was ignored.
    pub fn set_direction(&mut self, requested: Direction) -> bool {
        if self.state.direction.is_opposite(requested) {
            trace!(
                "Ignoring reversal to {:?} while moving {:?}",
                requested, self.state.direction
            );
            return false;
        }

        if requested != self.pending_direction {
            debug!("Next direction: {:?}", requested);
        }
        self.pending_direction = requested;
        true
    }

    /// Advance the game by one step
    pub fn tick(&mut self) -> TickOutcome {
        if self.state.game_over {
            return TickOutcome::Frozen;
        }

        self.state.direction = self.pending_direction;
        let new_head = self
            .state
            .snake
            .head()
            .moved_in_direction(self.state.direction);

        if let Some(collision_type) = check_collision(&self.state, new_head) {
            self.state.game_over = true;
            info!(
                "Game over: {:?} at {:?}, snake length {}",
                collision_type,
                new_head,
                self.state.snake.len()
            );
            return TickOutcome::Collided(collision_type);
        }

        let ate_food = new_head == self.state.food;
        self.state.snake.advance(new_head, ate_food);

        if !ate_food {
            return TickOutcome::Moved;
        }

        match spawn_food(&mut self.rng, &self.state.snake, self.state.board_size) {
            Some(food) => {
                debug!("Food eaten, new food at {:?}", food);
                self.state.food = food;
                TickOutcome::Grew
            }
            None => {
                self.state.game_over = true;
                info!("Board filled, snake length {}", self.state.snake.len());
                TickOutcome::BoardFilled
            }
        }
    }

    /// Read-only snapshot for rendering
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn snake(&self) -> &Snake {
        &self.state.snake
    }

    pub fn food(&self) -> Position {
        self.state.food
    }

    /// Direction applied on the last tick
    pub fn direction(&self) -> Direction {
        self.state.direction
    }

    /// Direction the next tick will apply
    pub fn pending_direction(&self) -> Direction {
        self.pending_direction
    }

    pub fn is_game_over(&self) -> bool {
        self.state.game_over
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}

fn initial_state(config: &GameConfig, rng: &mut StdRng) -> GameState {
    let mut state = GameState::initial(config, Position::new(0, 0));
    match spawn_food(rng, &state.snake, state.board_size) {
        Some(food) => state.food = food,
        None => state.game_over = true,
    }
    state
}

/// Check the new head against the board edges and the whole pre-tick body.
/// The tail counts even though a plain move would vacate it.
fn check_collision(state: &GameState, pos: Position) -> Option<CollisionType> {
    if !state.is_in_bounds(pos) {
        return Some(CollisionType::Wall);
    }

    if state.is_occupied_by_snake(pos) {
        return Some(CollisionType::SelfCollision);
    }

    None
}

/// Pick a uniformly random free cell.
///
/// Rejection sampling first; after one board's worth of misses the free
/// cells are listed and one is chosen directly. Returns None when the snake
/// covers the board.
fn spawn_food(rng: &mut StdRng, snake: &Snake, board_size: usize) -> Option<Position> {
    let area = board_size * board_size;

    for _ in 0..area {
        let x = rng.gen_range(0..board_size) as i32;
        let y = rng.gen_range(0..board_size) as i32;
        let pos = Position::new(x, y);

        if !snake.occupies(pos) {
            return Some(pos);
        }
    }

    let free: Vec<Position> = (0..board_size as i32)
        .flat_map(|y| (0..board_size as i32).map(move |x| Position::new(x, y)))
        .filter(|pos| !snake.occupies(*pos))
        .collect();
    free.choose(rng).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(cells: &[(i32, i32)], direction: Direction, food: (i32, i32)) -> GameState {
        GameState::new(
            Snake::from_cells(cells.iter().copied().map(Position::from).collect()),
            direction,
            Position::from(food),
            30,
        )
    }

    #[test]
    fn test_new_game() {
        let engine = GameEngine::with_seed(GameConfig::default(), 7);

        assert!(!engine.is_game_over());
        assert_eq!(engine.snake(), &Snake::initial());
        assert_eq!(engine.direction(), Direction::Right);
        assert_eq!(engine.pending_direction(), Direction::Right);
        assert!(!engine.snake().occupies(engine.food()));
    }

    #[test]
    fn test_basic_movement() {
        let state = state_with(&[(8, 10), (7, 10), (6, 10)], Direction::Right, (0, 0));
        let mut engine = GameEngine::from_state(GameConfig::default(), state, 1);

        assert_eq!(engine.tick(), TickOutcome::Moved);
        assert_eq!(
            engine.snake().cells(),
            &[Position::new(9, 10), Position::new(8, 10), Position::new(7, 10)]
        );
    }

    #[test]
    fn test_food_consumption() {
        let state = state_with(&[(8, 10), (7, 10), (6, 10)], Direction::Right, (9, 10));
        let mut engine = GameEngine::from_state(GameConfig::default(), state, 1);

        assert_eq!(engine.tick(), TickOutcome::Grew);
        assert_eq!(engine.snake().len(), 4);
        assert_eq!(engine.snake().tail(), Position::new(6, 10));
        assert!(!engine.snake().occupies(engine.food()));
    }

    #[test]
    fn test_wall_collision() {
        let state = state_with(&[(0, 10), (1, 10), (2, 10)], Direction::Left, (5, 5));
        let mut engine = GameEngine::from_state(GameConfig::default(), state.clone(), 1);

        assert_eq!(engine.tick(), TickOutcome::Collided(CollisionType::Wall));
        assert!(engine.is_game_over());
        assert_eq!(engine.snake(), &state.snake);
        assert_eq!(engine.food(), state.food);
    }

    #[test]
    fn test_self_collision() {
        // Body: (5,5), (4,5), (3,5), (2,5), (1,5) heading Right
        let cells = [(5, 5), (4, 5), (3, 5), (2, 5), (1, 5)];
        let state = state_with(&cells, Direction::Right, (20, 20));
        let mut engine = GameEngine::from_state(GameConfig::default(), state, 1);

        engine.set_direction(Direction::Down);
        assert_eq!(engine.tick(), TickOutcome::Moved);
        engine.set_direction(Direction::Left);
        assert_eq!(engine.tick(), TickOutcome::Moved);
        engine.set_direction(Direction::Up);
        // (4,6) -> (4,5), still part of the body
        assert_eq!(engine.tick(), TickOutcome::Collided(CollisionType::SelfCollision));
    }

    #[test]
    fn test_prevent_180_degree_turn() {
        let mut engine = GameEngine::with_seed(GameConfig::default(), 3);

        assert!(!engine.set_direction(Direction::Left));
        assert_eq!(engine.pending_direction(), Direction::Right);
        engine.tick();
        assert_eq!(engine.direction(), Direction::Right);
    }

    #[test]
    fn test_guard_uses_committed_direction() {
        let mut engine = GameEngine::with_seed(GameConfig::default(), 3);

        // Up is pending, but Down is still only perpendicular to Right
        assert!(engine.set_direction(Direction::Up));
        assert!(engine.set_direction(Direction::Down));
        assert_eq!(engine.pending_direction(), Direction::Down);

        // Left is rejected regardless of the pending Up
        assert!(engine.set_direction(Direction::Up));
        assert!(!engine.set_direction(Direction::Left));
        assert_eq!(engine.pending_direction(), Direction::Up);

        engine.tick();
        assert_eq!(engine.direction(), Direction::Up);
        assert_eq!(engine.snake().head(), Position::new(8, 9));
    }

    #[test]
    fn test_terminated_game_no_update() {
        let state = state_with(&[(0, 10), (1, 10), (2, 10)], Direction::Left, (5, 5));
        let mut engine = GameEngine::from_state(GameConfig::default(), state, 1);
        engine.tick();
        let frozen = engine.state().clone();

        engine.set_direction(Direction::Up);
        assert_eq!(engine.tick(), TickOutcome::Frozen);
        assert_eq!(engine.state(), &frozen);
    }

    #[test]
    fn test_restart_after_game_over() {
        let state = state_with(&[(0, 10), (1, 10), (2, 10)], Direction::Left, (5, 5));
        let mut engine = GameEngine::from_state(GameConfig::default(), state, 1);
        engine.tick();
        assert!(engine.is_game_over());

        engine.restart();
        assert!(!engine.is_game_over());
        assert_eq!(engine.snake(), &Snake::initial());
        assert_eq!(engine.direction(), Direction::Right);
        assert_eq!(engine.pending_direction(), Direction::Right);
        assert!(!engine.snake().occupies(engine.food()));
    }

    #[test]
    fn test_spawn_food_falls_back_to_free_cells() {
        // Every cell but (2,2) is taken on a 3x3 board
        let mut cells = Vec::new();
        for y in 0..3 {
            for x in 0..3 {
                if (x, y) != (2, 2) {
                    cells.push(Position::new(x, y));
                }
            }
        }
        let snake = Snake::from_cells(cells);
        let mut rng = StdRng::seed_from_u64(11);

        assert_eq!(spawn_food(&mut rng, &snake, 3), Some(Position::new(2, 2)));
    }

    #[test]
    fn test_food_stays_on_the_state_board() {
        // A 3x3 game resumed with a config for the default 30x30 board
        for seed in 0..50 {
            let state = GameState::new(
                Snake::from_cells(vec![Position::new(1, 1), Position::new(0, 1)]),
                Direction::Right,
                Position::new(2, 1),
                3,
            );
            let mut engine = GameEngine::from_state(GameConfig::default(), state, seed);

            assert_eq!(engine.tick(), TickOutcome::Grew);
            assert!(engine.state().is_in_bounds(engine.food()));
            assert!(!engine.snake().occupies(engine.food()));
        }
    }

    #[test]
    fn test_board_filled() {
        // Snake covers every cell of a 3x3 board except the food
        let cells = [
            (1, 2),
            (0, 2),
            (0, 1),
            (1, 1),
            (2, 1),
            (2, 0),
            (1, 0),
            (0, 0),
        ];
        let state = GameState::new(
            Snake::from_cells(cells.iter().copied().map(Position::from).collect()),
            Direction::Right,
            Position::new(2, 2),
            3,
        );
        let mut engine = GameEngine::from_state(GameConfig::new(3), state, 5);

        assert_eq!(engine.tick(), TickOutcome::BoardFilled);
        assert!(engine.is_game_over());
        assert_eq!(engine.snake().len(), 9);
        assert!(TickOutcome::BoardFilled.is_terminal());
    }
}
