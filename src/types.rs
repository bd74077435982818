// Tron game snapshot types
// Wire format mirrors the judge's JSON state: a grid of integers plus one
// trail of [x, y] pairs per agent.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Suffix appended to a direction token to request a boost
pub const BOOST_SUFFIX: &str = "BOOST";

/// 2D coordinate on the board (x = column, y = row)
/// Serialized as a two-element array to match the judge's trail format.
#[derive(Deserialize, Serialize, Debug, PartialEq, Eq, Clone, Copy, Hash, Default)]
#[serde(from = "[i64; 2]", into = "[i64; 2]")]
pub struct Coord {
    pub x: i64,
    pub y: i64,
}

impl Coord {
    pub fn new(x: i64, y: i64) -> Self {
        Coord { x, y }
    }
}

impl From<[i64; 2]> for Coord {
    fn from(pair: [i64; 2]) -> Self {
        Coord { x: pair[0], y: pair[1] }
    }
}

impl From<Coord> for [i64; 2] {
    fn from(coord: Coord) -> Self {
        [coord.x, coord.y]
    }
}

/// Occupancy of a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Occupied,
}

impl Cell {
    /// Classifies a raw board marker. Zero is empty, every other value blocks,
    /// regardless of which trail produced it.
    pub fn from_marker(marker: i64) -> Self {
        if marker == 0 {
            Cell::Empty
        } else {
            Cell::Occupied
        }
    }
}

/// Toroidal board: rows of raw occupancy markers
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct Board {
    pub cells: Vec<Vec<i64>>,
}

impl Board {
    pub fn new(cells: Vec<Vec<i64>>) -> Self {
        Board { cells }
    }

    /// Creates a `width` x `height` board with every cell empty
    pub fn empty(width: usize, height: usize) -> Self {
        Board {
            cells: vec![vec![0; width]; height],
        }
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.cells.len()
    }

    /// Length of the first row; 0 when there are no rows
    pub fn width(&self) -> usize {
        self.cells.first().map_or(0, |row| row.len())
    }

    /// True for the "no board" case: zero rows or an empty first row
    pub fn is_degenerate(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Normalizes a coordinate into `[0, width) x [0, height)`.
    /// Returns None on a degenerate board.
    pub fn wrap(&self, coord: Coord) -> Option<Coord> {
        if self.is_degenerate() {
            return None;
        }
        let width = self.width() as i64;
        let height = self.height() as i64;
        Some(Coord {
            x: coord.x.rem_euclid(width),
            y: coord.y.rem_euclid(height),
        })
    }

    /// Occupancy at a (wrapped) coordinate.
    /// Cells that do not exist (degenerate board, short row) count as occupied.
    pub fn cell(&self, coord: Coord) -> Cell {
        self.wrap(coord)
            .and_then(|c| self.cells.get(c.y as usize)?.get(c.x as usize).copied())
            .map_or(Cell::Occupied, Cell::from_marker)
    }

    /// Marks a cell with the given marker, wrapping the coordinate.
    /// No-op on a degenerate board or a short row.
    pub fn set(&mut self, coord: Coord, marker: i64) {
        if let Some(c) = self.wrap(coord) {
            if let Some(slot) = self
                .cells
                .get_mut(c.y as usize)
                .and_then(|row| row.get_mut(c.x as usize))
            {
                *slot = marker;
            }
        }
    }
}

/// Represents the four possible movement directions on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four directions
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Converts direction to its command token
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "UP",
            Direction::Down => "DOWN",
            Direction::Left => "LEFT",
            Direction::Right => "RIGHT",
        }
    }

    /// Unit vector (dx, dy); y grows downward
    pub const fn vector(self) -> (i64, i64) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Calculates the neighbouring coordinate on a toroidal board.
    /// The origin is normalized first so the addition cannot overflow.
    pub fn apply(&self, coord: &Coord, board: &Board) -> Option<Coord> {
        let origin = board.wrap(*coord)?;
        let (dx, dy) = self.vector();
        board.wrap(Coord {
            x: origin.x + dx,
            y: origin.y + dy,
        })
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "UP" => Ok(Direction::Up),
            "DOWN" => Ok(Direction::Down),
            "LEFT" => Ok(Direction::Left),
            "RIGHT" => Ok(Direction::Right),
            _ => Err(format!("Invalid direction: {}", s)),
        }
    }
}

/// A movement command: a direction, optionally suffixed with ":BOOST"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveCommand {
    pub direction: Direction,
    pub boost: bool,
}

impl MoveCommand {
    pub fn new(direction: Direction) -> Self {
        MoveCommand {
            direction,
            boost: false,
        }
    }

    pub fn boosted(direction: Direction) -> Self {
        MoveCommand {
            direction,
            boost: true,
        }
    }
}

impl From<Direction> for MoveCommand {
    fn from(direction: Direction) -> Self {
        MoveCommand::new(direction)
    }
}

impl fmt::Display for MoveCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.boost {
            write!(f, "{}:{}", self.direction, BOOST_SUFFIX)
        } else {
            write!(f, "{}", self.direction)
        }
    }
}

impl FromStr for MoveCommand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            None => Ok(MoveCommand::new(s.parse()?)),
            Some((dir, suffix)) if suffix.trim().eq_ignore_ascii_case(BOOST_SUFFIX) => {
                Ok(MoveCommand::boosted(dir.parse()?))
            }
            Some(_) => Err(format!("Invalid move command: {}", s)),
        }
    }
}

impl Serialize for MoveCommand {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MoveCommand {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Which agent a decision is being made for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// 1 selects the first agent; any other number selects the second
    pub fn from_number(number: i64) -> Self {
        if number == 1 {
            Player::One
        } else {
            Player::Two
        }
    }
}

/// Treats an explicit `null` the same as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Reads an auxiliary field, dropping it to None when it has an unexpected type
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Complete game snapshot received from the judge
/// Every field is optional on the wire. Fields the engine reads accept `null`;
/// the rest are tolerated whatever their type.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct GameState {
    #[serde(deserialize_with = "null_as_default")]
    pub board: Board,
    #[serde(deserialize_with = "null_as_default")]
    pub agent1_trail: Vec<Coord>,
    #[serde(deserialize_with = "null_as_default")]
    pub agent2_trail: Vec<Coord>,
    #[serde(deserialize_with = "lenient")]
    pub agent1_length: Option<i64>,
    #[serde(deserialize_with = "lenient")]
    pub agent2_length: Option<i64>,
    #[serde(deserialize_with = "lenient")]
    pub agent1_alive: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub agent2_alive: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub agent1_boosts: Option<i64>,
    #[serde(deserialize_with = "lenient")]
    pub agent2_boosts: Option<i64>,
    #[serde(deserialize_with = "null_as_default")]
    pub turn_count: i64,
    #[serde(deserialize_with = "lenient")]
    pub player_number: Option<i64>,
}

impl GameState {
    /// Trail belonging to the given player
    pub fn trail(&self, player: Player) -> &[Coord] {
        match player {
            Player::One => &self.agent1_trail,
            Player::Two => &self.agent2_trail,
        }
    }

    /// Head of the player's trail, or the origin when the trail is empty
    pub fn head(&self, player: Player) -> Coord {
        self.trail(player).last().copied().unwrap_or_default()
    }

    /// Boosts the snapshot reports for the player; 0 when absent
    pub fn boosts(&self, player: Player) -> i64 {
        match player {
            Player::One => self.agent1_boosts,
            Player::Two => self.agent2_boosts,
        }
        .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_board_dimensions_come_from_grid() {
        let board = Board::empty(4, 3);
        assert_eq!(board.width(), 4);
        assert_eq!(board.height(), 3);
        assert!(!board.is_degenerate());
    }

    #[test]
    fn test_degenerate_boards() {
        assert!(Board::default().is_degenerate());
        assert!(Board::new(vec![vec![]]).is_degenerate());
        assert_eq!(Board::default().wrap(Coord::new(1, 1)), None);
    }

    #[test]
    fn test_wrap_handles_negative_and_large_coordinates() {
        let board = Board::empty(5, 3);
        assert_eq!(board.wrap(Coord::new(-1, -1)), Some(Coord::new(4, 2)));
        assert_eq!(board.wrap(Coord::new(5, 3)), Some(Coord::new(0, 0)));
        assert_eq!(board.wrap(Coord::new(12, -7)), Some(Coord::new(2, 2)));
    }

    #[test]
    fn test_direction_apply_wraps_edges() {
        let board = Board::empty(4, 3);
        let origin = Coord::new(0, 0);
        assert_eq!(Direction::Up.apply(&origin, &board), Some(Coord::new(0, 2)));
        assert_eq!(Direction::Left.apply(&origin, &board), Some(Coord::new(3, 0)));
        assert_eq!(Direction::Right.apply(&Coord::new(3, 0), &board), Some(Coord::new(0, 0)));
        assert_eq!(Direction::Down.apply(&Coord::new(0, 2), &board), Some(Coord::new(0, 0)));
    }

    #[test]
    fn test_apply_does_not_overflow_on_extreme_coordinates() {
        let board = Board::empty(3, 3);
        let far = Coord::new(i64::MAX, i64::MIN);
        assert!(Direction::Right.apply(&far, &board).is_some());
        assert!(Direction::Up.apply(&far, &board).is_some());
    }

    #[test]
    fn test_cell_classification() {
        let board = Board::new(vec![vec![0, 1], vec![2, -3]]);
        assert_eq!(board.cell(Coord::new(0, 0)), Cell::Empty);
        assert_eq!(board.cell(Coord::new(1, 0)), Cell::Occupied);
        assert_eq!(board.cell(Coord::new(0, 1)), Cell::Occupied);
        assert_eq!(board.cell(Coord::new(1, 1)), Cell::Occupied);
        // wraps back onto (0, 0)
        assert_eq!(board.cell(Coord::new(2, 2)), Cell::Empty);
    }

    #[test]
    fn test_short_row_cells_are_occupied() {
        let board = Board::new(vec![vec![0, 0, 0], vec![0]]);
        assert_eq!(board.cell(Coord::new(2, 1)), Cell::Occupied);
        assert_eq!(board.cell(Coord::new(0, 1)), Cell::Empty);
    }

    #[test]
    fn test_set_wraps() {
        let mut board = Board::empty(3, 3);
        board.set(Coord::new(-1, 0), 1);
        assert_eq!(board.cells[0][2], 1);
    }

    #[test]
    fn test_parse_direction() {
        assert_eq!("up".parse::<Direction>().unwrap(), Direction::Up);
        assert_eq!("DOWN".parse::<Direction>().unwrap(), Direction::Down);
        assert_eq!("Left".parse::<Direction>().unwrap(), Direction::Left);
        assert_eq!(" right ".parse::<Direction>().unwrap(), Direction::Right);
        assert!("north".parse::<Direction>().is_err());
    }

    #[test]
    fn test_move_command_grammar() {
        assert_eq!(MoveCommand::new(Direction::Left).to_string(), "LEFT");
        assert_eq!(MoveCommand::boosted(Direction::Up).to_string(), "UP:BOOST");

        let cmd: MoveCommand = "down:boost".parse().unwrap();
        assert_eq!(cmd, MoveCommand::boosted(Direction::Down));

        let cmd: MoveCommand = "RIGHT".parse().unwrap();
        assert_eq!(cmd, MoveCommand::new(Direction::Right));

        assert!("RIGHT:TURBO".parse::<MoveCommand>().is_err());
        assert!("SIDEWAYS:BOOST".parse::<MoveCommand>().is_err());
    }

    #[test]
    fn test_game_state_tolerates_missing_fields() {
        let state: GameState = serde_json::from_value(json!({})).unwrap();
        assert!(state.board.is_degenerate());
        assert!(state.agent1_trail.is_empty());
        assert_eq!(state.turn_count, 0);
        assert_eq!(state.head(Player::One), Coord::new(0, 0));
    }

    #[test]
    fn test_game_state_parses_judge_payload() {
        let state: GameState = serde_json::from_value(json!({
            "board": [[0, 1, 0], [0, 0, 0]],
            "agent1_trail": [[0, 0], [1, 0]],
            "agent2_trail": [[2, 1]],
            "agent1_length": 2,
            "agent2_length": 1,
            "agent1_alive": true,
            "agent2_alive": true,
            "agent1_boosts": 3,
            "agent2_boosts": 2,
            "turn_count": 7,
            "player_number": 2,
            "some_future_field": "ignored"
        }))
        .unwrap();

        assert_eq!(state.board.width(), 3);
        assert_eq!(state.board.height(), 2);
        assert_eq!(state.head(Player::One), Coord::new(1, 0));
        assert_eq!(state.head(Player::Two), Coord::new(2, 1));
        assert_eq!(state.boosts(Player::Two), 2);
        assert_eq!(state.turn_count, 7);
    }

    #[test]
    fn test_game_state_null_fields_fall_back_to_defaults() {
        let state: GameState = serde_json::from_value(json!({
            "board": null,
            "agent1_trail": null,
            "agent2_trail": null,
            "turn_count": null,
            "player_number": null
        }))
        .unwrap();

        assert!(state.board.is_degenerate());
        assert!(state.agent1_trail.is_empty());
        assert!(state.agent2_trail.is_empty());
        assert_eq!(state.turn_count, 0);
        assert_eq!(state.player_number, None);
    }

    #[test]
    fn test_game_state_tolerates_odd_auxiliary_types() {
        let state: GameState = serde_json::from_value(json!({
            "board": [[0, 0], [0, 0]],
            "agent1_trail": [[1, 1]],
            "agent1_alive": 1,
            "agent2_alive": "yes",
            "agent1_length": 2.0,
            "agent2_length": [3],
            "agent1_boosts": "three",
            "agent2_boosts": 2,
            "turn_count": 4
        }))
        .unwrap();

        assert_eq!(state.agent1_alive, None);
        assert_eq!(state.agent2_alive, None);
        assert_eq!(state.agent1_length, None);
        assert_eq!(state.agent2_length, None);
        assert_eq!(state.boosts(Player::One), 0);
        assert_eq!(state.boosts(Player::Two), 2);
        assert_eq!(state.head(Player::One), Coord::new(1, 1));
        assert_eq!(state.turn_count, 4);
    }

    #[test]
    fn test_coord_serializes_as_pair() {
        let value = serde_json::to_value(Coord::new(3, 4)).unwrap();
        assert_eq!(value, json!([3, 4]));
    }

    #[test]
    fn test_player_from_number() {
        assert_eq!(Player::from_number(1), Player::One);
        assert_eq!(Player::from_number(2), Player::Two);
        // unvalidated: anything but 1 is the second agent
        assert_eq!(Player::from_number(7), Player::Two);
    }
}
