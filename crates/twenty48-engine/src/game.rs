use arrayvec::ArrayVec;
use rand::{Rng, seq::IndexedRandom as _};

use crate::{
    action::{Action, DIRECTIONS},
    board::Board,
};

/// Probability that a spawned tile is a "4" instead of a "2".
const FOUR_TILE_CHANCE: f64 = 0.1;

/// A single game of 2048.
///
/// The game holds a [`Board`] plus its derived bookkeeping: the running
/// score, the highest tile value currently on the board, and the
/// terminal flag. All randomness (spawned tile value and position) is
/// drawn from the random source passed to [`Game::new`] and
/// [`Game::apply_move`]; the engine keeps no hidden random state.
///
/// Illegal moves are documented no-ops: board, score, and highest tile
/// stay byte-for-byte unchanged. Once `game_over` is set, the state
/// never transitions again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    board: Board,
    score: u32,
    highest_tile: u32,
    game_over: bool,
}

impl Game {
    /// Starts a fresh game with two spawned tiles.
    pub fn new<R>(rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let mut game = Self::from_board(Board::EMPTY);
        game.spawn_tile(rng);
        game.spawn_tile(rng);
        game.highest_tile = 1 << game.board.max_exponent();
        game
    }

    /// Builds a game around an arbitrary board position.
    ///
    /// Score starts at zero and the highest tile is recomputed from the
    /// board. Useful for tests and tooling that replay mid-game states.
    #[must_use]
    pub fn from_board(board: Board) -> Self {
        Self {
            highest_tile: 1 << board.max_exponent(),
            board,
            score: 0,
            game_over: false,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn highest_tile(&self) -> u32 {
        self.highest_tile
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// The legal moves from the current position, in [`DIRECTIONS`] order.
    ///
    /// A direction is legal iff sliding the board that way changes it.
    /// Returns the empty set on a finished game. Never mutates state.
    #[must_use]
    pub fn legal_moves(&self) -> ArrayVec<Action, 4> {
        let mut legal = ArrayVec::new();
        if self.game_over {
            return legal;
        }
        for &direction in &DIRECTIONS {
            if self.simulate_move(direction).is_some() {
                legal.push(direction);
            }
        }
        legal
    }

    /// Previews a move without committing it.
    ///
    /// Returns the post-slide board (before any tile spawn) and the
    /// points the merges would earn, or `None` when the move is illegal,
    /// the action is not a direction, or the game is over.
    #[must_use]
    pub fn simulate_move(&self, direction: Action) -> Option<(Board, u32)> {
        if self.game_over {
            return None;
        }
        let (board, points) = self.board.pushed(direction)?;
        if board == self.board {
            return None;
        }
        Some((board, points))
    }

    /// Executes a move, spawning one tile and updating score, highest
    /// tile, and the terminal flag. Illegal input leaves the game
    /// untouched.
    pub fn apply_move<R>(&mut self, direction: Action, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        let Some((board, points)) = self.simulate_move(direction) else {
            return;
        };
        self.board = board;
        self.spawn_tile(rng);
        self.highest_tile = 1 << self.board.max_exponent();
        self.score += points;
        if self.board.is_full() && self.legal_moves().is_empty() {
            self.game_over = true;
        }
    }

    /// Places a new tile on a uniformly chosen empty cell: exponent 1
    /// with probability 0.9, exponent 2 otherwise.
    fn spawn_tile<R>(&mut self, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        let empty = self.board.empty_cells();
        let &(row, col) = empty.choose(rng).expect("tiles spawn on a non-full board");
        let exponent = if rng.random_bool(FOUR_TILE_CHANCE) { 2 } else { 1 };
        self.board.place(row, col, exponent);
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg64Mcg;

    use super::*;
    use crate::board::{BOARD_SIZE, CELL_COUNT};

    fn rng(seed: u64) -> Pcg64Mcg {
        Pcg64Mcg::seed_from_u64(seed)
    }

    #[test]
    fn new_game_starts_with_two_tiles() {
        let game = Game::new(&mut rng(0));
        assert!(!game.is_game_over());
        assert_eq!(game.score(), 0);
        // The game may start with a "4" tile.
        assert!([2, 4].contains(&game.highest_tile()));
        assert_eq!(game.board().occupied_count(), 2);
    }

    #[test]
    fn legal_moves_single_tile_positions() {
        let center = Game::from_board(Board::from_exponents([
            [0, 1, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 1, 0],
        ]));
        assert_eq!(center.legal_moves().as_slice(), &DIRECTIONS);

        let bottom = Game::from_board(Board::from_exponents([
            [0, 0, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 1, 0],
        ]));
        assert_eq!(
            bottom.legal_moves().as_slice(),
            &[Action::Left, Action::Right, Action::Up]
        );

        let top = Game::from_board(Board::from_exponents([
            [0, 0, 1, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
        ]));
        assert_eq!(
            top.legal_moves().as_slice(),
            &[Action::Left, Action::Right, Action::Down]
        );

        let right_edge = Game::from_board(Board::from_exponents([
            [0, 0, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 1],
            [0, 0, 0, 0],
        ]));
        assert_eq!(
            right_edge.legal_moves().as_slice(),
            &[Action::Left, Action::Up, Action::Down]
        );

        let stacked = Game::from_board(Board::from_exponents([
            [0, 0, 0, 0],
            [0, 0, 1, 2],
            [0, 0, 0, 1],
            [0, 0, 0, 1],
        ]));
        assert_eq!(
            stacked.legal_moves().as_slice(),
            &[Action::Left, Action::Up, Action::Down]
        );
    }

    #[test]
    fn legal_moves_empty_when_game_over() {
        let mut game = Game::new(&mut rng(0));
        game.game_over = true;
        assert!(game.legal_moves().is_empty());
    }

    #[test]
    fn legal_moves_do_not_mutate_state() {
        let game = Game::from_board(Board::from_exponents([[4; BOARD_SIZE]; BOARD_SIZE]));
        let snapshot = game.clone();
        let _ = game.legal_moves();
        assert_eq!(game, snapshot);
    }

    /// The shared fixture from the directional move tests.
    fn fixture() -> Game {
        Game::from_board(Board::from_exponents([
            [0, 1, 0, 0],
            [2, 2, 0, 2],
            [1, 2, 0, 0],
            [1, 0, 1, 0],
        ]))
    }

    /// Applies `direction` to the fixture and checks the outcome against
    /// the expected pre-spawn board: every cell matches except exactly
    /// one previously-empty cell now holding the spawned tile.
    fn check_fixture_move(direction: Action, expected_before_spawn: Board) {
        let mut game = fixture();
        game.apply_move(direction, &mut rng(2112));

        let mut spawned = Vec::new();
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let actual = game.board().exponent(row, col);
                let expected = expected_before_spawn.exponent(row, col);
                if actual != expected {
                    spawned.push((row, col, expected, actual));
                }
            }
        }
        let &[(_, _, before, after)] = spawned.as_slice() else {
            panic!("expected exactly one spawned tile, found {spawned:?}");
        };
        assert_eq!(before, 0);
        assert!([1, 2].contains(&after));

        assert_eq!(game.score(), 12);
        assert_eq!(game.highest_tile(), 8);
        assert!(!game.is_game_over());
    }

    #[test]
    fn move_left() {
        check_fixture_move(
            Action::Left,
            Board::from_exponents([
                [1, 0, 0, 0],
                [3, 2, 0, 0],
                [1, 2, 0, 0],
                [2, 0, 0, 0],
            ]),
        );
    }

    #[test]
    fn move_right() {
        check_fixture_move(
            Action::Right,
            Board::from_exponents([
                [0, 0, 0, 1],
                [0, 0, 2, 3],
                [0, 0, 1, 2],
                [0, 0, 0, 2],
            ]),
        );
    }

    #[test]
    fn move_up() {
        check_fixture_move(
            Action::Up,
            Board::from_exponents([
                [2, 1, 1, 2],
                [2, 3, 0, 0],
                [0, 0, 0, 0],
                [0, 0, 0, 0],
            ]),
        );
    }

    #[test]
    fn move_down() {
        check_fixture_move(
            Action::Down,
            Board::from_exponents([
                [0, 0, 0, 0],
                [0, 0, 0, 0],
                [2, 1, 0, 0],
                [2, 3, 1, 2],
            ]),
        );
    }

    /// A full board of strictly increasing exponents has no legal move
    /// in any orientation.
    fn gridlocked_board() -> Board {
        let mut cells = [[0; BOARD_SIZE]; BOARD_SIZE];
        for (i, cell) in cells.iter_mut().flatten().enumerate() {
            *cell = u8::try_from(i + 1).unwrap();
        }
        Board::from_exponents(cells)
    }

    #[test]
    fn illegal_moves_leave_state_unchanged() {
        let game = Game::from_board(gridlocked_board());
        assert!(game.legal_moves().is_empty());

        let mut moved = game.clone();
        for direction in DIRECTIONS {
            moved.apply_move(direction, &mut rng(0));
            assert_eq!(moved, game);
        }
    }

    #[test]
    fn moves_after_game_over_are_no_ops() {
        let mut game = Game::new(&mut rng(1));
        game.game_over = true;
        let snapshot = game.clone();
        for direction in DIRECTIONS {
            game.apply_move(direction, &mut rng(1));
            assert_eq!(game, snapshot);
        }
    }

    #[test]
    fn move_into_game_over() {
        // Exponents 0..16 row-major: sliding left packs the first row and
        // the spawned tile fills the last empty cell with no merge
        // available anywhere.
        let mut cells = [[0; BOARD_SIZE]; BOARD_SIZE];
        for (i, cell) in cells.iter_mut().flatten().enumerate() {
            *cell = u8::try_from(i).unwrap();
        }
        let mut game = Game::from_board(Board::from_exponents(cells));
        game.apply_move(Action::Left, &mut rng(3));
        assert!(game.is_game_over());
        assert_eq!(game.score(), 0);
        assert_eq!(game.highest_tile(), 1 << 15);
        assert!(game.legal_moves().is_empty());
    }

    #[test]
    fn score_increments_match_simulated_points() {
        let mut game = Game::new(&mut rng(42));
        let mut moves: u32 = 0;
        while !game.is_game_over() && moves < 500 {
            let direction = game.legal_moves()[0];
            let (board, points) = game.simulate_move(direction).unwrap();
            let score_before = game.score();
            let occupied_before = game.board().occupied_count();

            game.apply_move(direction, &mut rng(u64::from(moves)));

            assert_eq!(game.score(), score_before + points);
            // Merges only ever remove tiles; the spawn adds one back.
            assert!(board.occupied_count() <= occupied_before);
            assert_eq!(game.board().occupied_count(), board.occupied_count() + 1);
            moves += 1;
        }
    }

    #[test]
    fn game_over_iff_no_legal_moves() {
        let mut play_rng = rng(7);
        let mut game = Game::new(&mut play_rng);
        for _ in 0..2000 {
            assert_eq!(game.is_game_over(), game.legal_moves().is_empty());
            if game.is_game_over() {
                assert!(game.board().is_full());
                break;
            }
            let direction = game.legal_moves()[0];
            game.apply_move(direction, &mut play_rng);
        }
        assert!(game.board().occupied_count() <= CELL_COUNT);
    }

    #[test]
    fn identical_seeds_produce_identical_games() {
        let mut first_rng = rng(2112);
        let mut second_rng = rng(2112);
        let mut first = Game::new(&mut first_rng);
        let mut second = Game::new(&mut second_rng);
        assert_eq!(first, second);

        while !first.is_game_over() {
            let direction = first.legal_moves()[0];
            first.apply_move(direction, &mut first_rng);
            second.apply_move(direction, &mut second_rng);
            assert_eq!(first, second);
        }
        assert!(second.is_game_over());
    }
}
