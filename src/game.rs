use log::{debug, trace};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::apple::Apple;
use crate::config::GridSize;
use crate::input::Direction;
use crate::snake::{Position, Snake};

/// What a single [`GridState::step`] did to the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum StepOutcome {
    /// The snake moved and kept its length.
    Moved,
    /// The snake ate the apple and grew by one.
    Ate,
    /// The head ran into the body and the board was reset.
    Collided,
    /// The snake covered every cell and the board was reset.
    Filled,
}

/// Complete board state for one game: snake, apple, score and RNG.
#[derive(Debug, Clone)]
pub struct GridState {
    pub snake: Snake,
    pub apple: Apple,
    pub score: u32,
    bounds: GridSize,
    rng: StdRng,
}

impl GridState {
    /// Creates a fresh board with an entropy-seeded RNG.
    #[must_use]
    pub fn new(bounds: GridSize) -> Self {
        Self::with_rng(bounds, StdRng::from_entropy())
    }

    /// Creates a deterministic board for tests and reproducible runs.
    #[must_use]
    pub fn new_with_seed(bounds: GridSize, seed: u64) -> Self {
        Self::with_rng(bounds, StdRng::seed_from_u64(seed))
    }

    fn with_rng(bounds: GridSize, rng: StdRng) -> Self {
        let snake = initial_snake(bounds);
        let mut state = Self {
            apple: Apple::at(snake.head()),
            snake,
            score: 0,
            bounds,
            rng,
        };
        state.reset();
        state
    }

    /// Restores the starting snake, heading, score and a fresh apple.
    pub fn reset(&mut self) {
        self.snake = initial_snake(self.bounds);
        self.score = 0;
        self.place_apple();
        debug!("board reset, apple at {:?}", self.apple.position);
    }

    /// Queues a turn for the next step; illegal turns are dropped.
    pub fn buffer_direction(&mut self, direction: Direction) {
        if !self.snake.buffer_direction(direction) {
            trace!(
                "dropped turn {direction:?} while heading {:?}",
                self.snake.direction()
            );
        }
    }

    /// Advances the board by one fixed step.
    pub fn step(&mut self) -> StepOutcome {
        let head = self.snake.commit_direction(self.bounds);

        if self.snake.occupies(head) {
            debug!("self-collision at {head:?} with score {}", self.score);
            self.reset();
            return StepOutcome::Collided;
        }

        let ate = head == self.apple.position;
        self.snake.advance_to(head, ate);
        if !ate {
            return StepOutcome::Moved;
        }

        self.score += 1;
        if !self.place_apple() {
            debug!("board filled with score {}", self.score);
            self.reset();
            return StepOutcome::Filled;
        }

        trace!("ate apple, score {}, next apple at {:?}", self.score, self.apple.position);
        StepOutcome::Ate
    }

    /// Returns logical grid bounds.
    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.bounds
    }

    fn place_apple(&mut self) -> bool {
        match Apple::spawn(&mut self.rng, self.bounds, &self.snake) {
            Some(apple) => {
                self.apple = apple;
                true
            }
            None => false,
        }
    }
}

fn initial_snake(bounds: GridSize) -> Snake {
    let start = Position {
        x: i32::from(bounds.width / 2),
        y: i32::from(bounds.height / 2),
    };
    Snake::new(start, Direction::Right)
}

#[cfg(test)]
mod tests {
    use crate::apple::Apple;
    use crate::config::GridSize;
    use crate::input::Direction;
    use crate::snake::{Position, Snake};

    use super::{GridState, StepOutcome};

    fn board(seed: u64) -> GridState {
        GridState::new_with_seed(GridSize::square(20), seed)
    }

    #[test]
    fn fresh_board_starts_centered_heading_right() {
        let state = board(1);

        assert_eq!(state.snake.head(), Position { x: 10, y: 10 });
        assert_eq!(state.snake.len(), 1);
        assert_eq!(state.snake.direction(), Direction::Right);
        assert_eq!(state.score, 0);
        assert!(!state.snake.occupies(state.apple.position));
    }

    #[test]
    fn step_moves_then_eats_apple() {
        let mut state = board(2);
        state.apple = Apple::at(Position { x: 12, y: 10 });

        assert_eq!(state.step(), StepOutcome::Moved);
        assert_eq!(state.snake.head(), Position { x: 11, y: 10 });
        assert_eq!(state.snake.len(), 1);

        assert_eq!(state.step(), StepOutcome::Ate);
        assert_eq!(state.snake.head(), Position { x: 12, y: 10 });
        assert_eq!(state.snake.len(), 2);
        assert_eq!(state.score, 1);
        assert!(!state.snake.occupies(state.apple.position));
    }

    #[test]
    fn head_wraps_across_right_edge() {
        let mut state = board(3);
        state.snake = Snake::new(Position { x: 19, y: 10 }, Direction::Right);
        state.apple = Apple::at(Position { x: 5, y: 5 });

        state.step();

        assert_eq!(state.snake.head(), Position { x: 0, y: 10 });
    }

    #[test]
    fn reversal_into_neck_is_rejected() {
        let mut state = board(4);
        state.snake = Snake::from_segments(
            vec![
                Position { x: 5, y: 5 },
                Position { x: 4, y: 5 },
                Position { x: 3, y: 5 },
            ],
            Direction::Right,
        );
        state.apple = Apple::at(Position { x: 15, y: 15 });

        state.buffer_direction(Direction::Left);
        let outcome = state.step();

        assert_eq!(outcome, StepOutcome::Moved);
        assert_eq!(state.snake.head(), Position { x: 6, y: 5 });
        assert_eq!(state.snake.len(), 3);
    }

    #[test]
    fn self_collision_resets_board() {
        let mut state = board(5);
        state.snake = Snake::from_segments(
            vec![
                Position { x: 2, y: 2 },
                Position { x: 1, y: 2 },
                Position { x: 1, y: 3 },
                Position { x: 2, y: 3 },
                Position { x: 3, y: 3 },
                Position { x: 3, y: 2 },
            ],
            Direction::Up,
        );
        state.score = 5;
        state.apple = Apple::at(Position { x: 15, y: 15 });

        state.buffer_direction(Direction::Left);
        state.buffer_direction(Direction::Down);
        let outcome = state.step();

        assert_eq!(outcome, StepOutcome::Collided);
        assert_eq!(state.score, 0);
        assert_eq!(state.snake.len(), 1);
        assert_eq!(state.snake.head(), Position { x: 10, y: 10 });
        assert_eq!(state.snake.direction(), Direction::Right);
    }

    #[test]
    fn filling_the_board_resets() {
        let mut state = GridState::new_with_seed(GridSize::square(2), 6);
        state.snake = Snake::from_segments(
            vec![
                Position { x: 0, y: 1 },
                Position { x: 0, y: 0 },
                Position { x: 1, y: 0 },
            ],
            Direction::Right,
        );
        state.apple = Apple::at(Position { x: 1, y: 1 });

        assert_eq!(state.step(), StepOutcome::Filled);
        assert_eq!(state.snake.len(), 1);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn length_tracks_apples_eaten() {
        let mut state = board(7);
        let mut previous_len = state.snake.len();
        let turns = [Direction::Down, Direction::Left, Direction::Up, Direction::Right];

        for tick in 0..2_000 {
            if tick % 7 == 0 {
                state.buffer_direction(turns[(tick / 7) % turns.len()]);
            }

            let outcome = state.step();
            let head = state.snake.head();
            assert!(head.is_within_bounds(state.bounds()));
            assert!(!state.snake.occupies(state.apple.position));

            match outcome {
                StepOutcome::Collided | StepOutcome::Filled => {
                    assert_eq!(state.snake.len(), 1);
                }
                StepOutcome::Ate | StepOutcome::Moved => {
                    assert!(state.snake.len() >= previous_len);
                    assert_eq!(state.snake.len(), 1 + state.score as usize);
                }
            }
            previous_len = state.snake.len();
        }
    }
}
