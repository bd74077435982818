// Move selection engine
//
// Stateless: every call is a pure function of the snapshot it receives.
// Picks the first direction, in a turn-dependent preference order, whose
// wrapped target cell is empty. Anything it cannot interpret resolves to RIGHT.

use log::debug;

use crate::types::{Board, Cell, Coord, Direction, GameState, MoveCommand, Player};

/// Answer used for a degenerate board and when every neighbour is blocked
pub const FALLBACK: Direction = Direction::Right;

/// Preference orders indexed by `turn_count mod 4`.
/// Rotating the order keeps the trail from drawing a straight line; it has
/// no bearing on safety.
pub const PREFERENCE_ORDERS: [[Direction; 4]; 4] = [
    [Direction::Right, Direction::Down, Direction::Up, Direction::Left],
    [Direction::Down, Direction::Left, Direction::Right, Direction::Up],
    [Direction::Left, Direction::Up, Direction::Down, Direction::Right],
    [Direction::Up, Direction::Right, Direction::Left, Direction::Down],
];

/// One tested neighbour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub direction: Direction,
    /// Target cell, already normalized into board bounds
    pub target: Coord,
    pub cell: Cell,
}

/// Full account of a single decision
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub command: MoveCommand,
    pub head: Coord,
    pub pattern: usize,
    /// Candidates in the order they were tested, up to and including the chosen one
    pub candidates: Vec<Candidate>,
    /// True when no neighbour was safe or the board was degenerate
    pub fallback: bool,
}

/// Maps the shared turn counter onto one of the four patterns.
/// Euclidean remainder so negative counters still cycle with period 4.
pub fn pattern_for_turn(turn_count: i64) -> usize {
    turn_count.rem_euclid(4) as usize
}

/// Direction preference order for the given turn
pub fn preference_order(turn_count: i64) -> [Direction; 4] {
    PREFERENCE_ORDERS[pattern_for_turn(turn_count)]
}

/// Chooses a move for `player_number`.
///
/// Never fails: a missing board or a fully enclosed head both yield RIGHT.
/// `boosts_remaining` is accepted for interface parity but never spent.
pub fn decide(state: &GameState, boosts_remaining: i64, player_number: i64) -> MoveCommand {
    evaluate(state, boosts_remaining, player_number).command
}

/// Same pass as [`decide`], also reporting what was tested along the way
pub fn evaluate(state: &GameState, _boosts_remaining: i64, player_number: i64) -> Decision {
    let player = Player::from_number(player_number);
    let head = state.head(player);
    let pattern = pattern_for_turn(state.turn_count);

    if state.board.is_degenerate() {
        debug!("Degenerate board, falling back to {}", FALLBACK);
        return Decision {
            command: MoveCommand::new(FALLBACK),
            head,
            pattern,
            candidates: Vec::new(),
            fallback: true,
        };
    }

    let (direction, candidates) = choose_safe_direction(&state.board, head, &PREFERENCE_ORDERS[pattern]);
    let fallback = direction.is_none();
    let direction = direction.unwrap_or(FALLBACK);

    debug!(
        "turn={} pattern={} head=({},{}) move={} fallback={}",
        state.turn_count, pattern, head.x, head.y, direction, fallback
    );

    Decision {
        command: MoveCommand::new(direction),
        head,
        pattern,
        candidates,
        fallback,
    }
}

/// Walks `order` and returns the first direction whose wrapped target is empty,
/// together with every candidate tested. None when all are blocked.
fn choose_safe_direction(
    board: &Board,
    head: Coord,
    order: &[Direction],
) -> (Option<Direction>, Vec<Candidate>) {
    let mut tested = Vec::with_capacity(order.len());

    for &direction in order {
        let Some(target) = direction.apply(&head, board) else {
            break;
        };
        let cell = board.cell(target);
        tested.push(Candidate {
            direction,
            target,
            cell,
        });

        if cell == Cell::Empty {
            return (Some(direction), tested);
        }
    }

    (None, tested)
}
