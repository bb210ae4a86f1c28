//! Board snapshots.
//!
//! A board serializes as a JSON array of 81 cells in cell-major order. Each
//! cell is `null` or `[tag, owner, grid]`, where `grid` is the unit's learned
//! skills as a 5x5 array of 0/1 indexed `[dx + 2][dy + 2]`:
//!
//! ```text
//! [null, ["SLD", 1, [[0,0,0,0,0],[0,0,0,0,0],[0,1,0,1,0],[0,0,0,0,0],[0,0,0,0,0]]], ...]
//! ```

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::board::{Board, Player, Position, SkillSet, Unit, UnitKind, CELL_COUNT, SKILL_SPAN};

/// Errors from decoding a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected 81 cells, got {0}")]
    WrongCellCount(usize),

    #[error("unknown unit tag '{0}'")]
    UnknownTag(String),

    #[error("invalid owner {0}")]
    InvalidOwner(u8),

    #[error("invalid skill grid value {0}")]
    InvalidGridValue(u8),
}

type Grid = [[u8; SKILL_SPAN]; SKILL_SPAN];

#[derive(Debug, Serialize, Deserialize)]
struct UnitRecord(String, u8, Grid);

impl From<&Unit> for UnitRecord {
    fn from(unit: &Unit) -> Self {
        let grid: Grid = (*unit.skillset.grid()).map(|column| column.map(u8::from));
        UnitRecord(unit.kind.tag().to_string(), unit.owner.number(), grid)
    }
}

impl TryFrom<UnitRecord> for Unit {
    type Error = SnapshotError;

    fn try_from(UnitRecord(tag, owner, grid): UnitRecord) -> Result<Self, Self::Error> {
        let kind = UnitKind::from_tag(&tag).ok_or(SnapshotError::UnknownTag(tag))?;
        let owner = Player::from_number(owner).ok_or(SnapshotError::InvalidOwner(owner))?;
        let mut map = [[false; SKILL_SPAN]; SKILL_SPAN];
        for (column, values) in map.iter_mut().zip(grid) {
            for (cell, value) in column.iter_mut().zip(values) {
                *cell = match value {
                    0 => false,
                    1 => true,
                    other => return Err(SnapshotError::InvalidGridValue(other)),
                };
            }
        }
        Ok(Unit::with_skillset(kind, owner, SkillSet::from_grid(map)))
    }
}

fn to_records(board: &Board) -> Vec<Option<UnitRecord>> {
    Position::all()
        .map(|p| board.at(p).map(UnitRecord::from))
        .collect()
}

fn from_records(records: Vec<Option<UnitRecord>>) -> Result<Board, SnapshotError> {
    if records.len() != CELL_COUNT {
        return Err(SnapshotError::WrongCellCount(records.len()));
    }
    let mut board = Board::empty();
    for (idx, record) in records.into_iter().enumerate() {
        if let Some(record) = record {
            board.put(Position::from_index(idx), Unit::try_from(record)?);
        }
    }
    Ok(board)
}

impl Serialize for Board {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        to_records(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let records = Vec::<Option<UnitRecord>>::deserialize(deserializer)?;
        from_records(records).map_err(D::Error::custom)
    }
}

/// Encodes a board as a JSON snapshot.
pub fn encode_board(board: &Board) -> Result<String, SnapshotError> {
    Ok(serde_json::to_string(board)?)
}

/// Decodes a JSON snapshot, reporting exactly what is wrong with it.
pub fn parse_board(s: &str) -> Result<Board, SnapshotError> {
    let records: Vec<Option<UnitRecord>> = serde_json::from_str(s)?;
    from_records(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{PositionDelta, Skill};

    fn pos(x: i32, y: i32) -> Position {
        Position::new(x, y).unwrap()
    }

    #[test]
    fn roundtrip_keeps_learned_skills() {
        let mut board = Board::standard();
        let skill = Skill::new(PositionDelta::new(1, 0)).unwrap();
        assert!(board.at_mut(pos(1, 1)).unwrap().endow(skill));
        board.put(pos(4, 4), Unit::perfect(UnitKind::Knight, Player::Two));

        let decoded = parse_board(&encode_board(&board).unwrap()).unwrap();
        assert_eq!(decoded, board);
        assert!(decoded.at(pos(1, 1)).unwrap().has_skill(skill));
    }

    #[test]
    fn decodes_through_serde() {
        let board = Board::standard();
        let decoded: Board = serde_json::from_str(&encode_board(&board).unwrap()).unwrap();
        assert_eq!(decoded, board);
    }

    #[test]
    fn cell_layout() {
        let mut board = Board::empty();
        board.put(pos(0, 1), Unit::new(UnitKind::Soldier, Player::One));
        let value: serde_json::Value = serde_json::from_str(&encode_board(&board).unwrap()).unwrap();
        let cells = value.as_array().unwrap();
        assert_eq!(cells.len(), CELL_COUNT);
        assert!(cells[0].is_null());
        assert_eq!(
            cells[1],
            serde_json::json!([
                "SLD",
                1,
                [[0, 0, 0, 0, 0], [0, 0, 0, 0, 0], [0, 1, 0, 1, 0], [0, 0, 0, 0, 0], [0, 0, 0, 0, 0]]
            ])
        );
    }

    fn with_cell(cell: serde_json::Value) -> String {
        let mut cells = vec![serde_json::Value::Null; CELL_COUNT];
        cells[10] = cell;
        serde_json::Value::from(cells).to_string()
    }

    #[test]
    fn rejects_bad_snapshots() {
        let zero = [0u8; 5];
        let grid = serde_json::json!([zero, zero, zero, zero, zero]);
        assert!(matches!(parse_board("[null, null]"), Err(SnapshotError::WrongCellCount(2))));
        assert!(matches!(parse_board("{}"), Err(SnapshotError::Json(_))));
        assert!(matches!(
            parse_board(&with_cell(serde_json::json!(["DRG", 1, grid.clone()]))),
            Err(SnapshotError::UnknownTag(t)) if t == "DRG"
        ));
        assert!(matches!(
            parse_board(&with_cell(serde_json::json!(["SLD", 3, grid]))),
            Err(SnapshotError::InvalidOwner(3))
        ));
        let bad_grid = serde_json::json!([zero, zero, [0, 0, 2, 0, 0], zero, zero]);
        assert!(matches!(
            parse_board(&with_cell(serde_json::json!(["SLD", 1, bad_grid]))),
            Err(SnapshotError::InvalidGridValue(2))
        ));
        assert!(serde_json::from_str::<Board>("[]").is_err());
    }
}
