//! Result tables and layouts

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DiceError;
use crate::face::Face;

/// Index label of a roll
pub const ROLL_COLUMN: &str = "roll number";
/// Column label of the die index in the narrow layout
pub const DIE_COLUMN: &str = "die number";
/// Column label of the rolled face in the narrow layout
pub const FACE_COLUMN: &str = "face";

/// Shape of a result table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    /// One row per roll, one column per die
    #[default]
    Wide,
    /// One row per (roll, die) pair
    Narrow,
}

impl Layout {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wide => "wide",
            Self::Narrow => "narrow",
        }
    }
}

impl FromStr for Layout {
    type Err = DiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "wide" => Ok(Self::Wide),
            "narrow" => Ok(Self::Narrow),
            other => Err(DiceError::validation(format!(
                "layout must be either 'wide' or 'narrow', got '{other}'"
            ))),
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wide results: `rows[roll][die]` is the face die `die` showed on roll `roll`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WideTable {
    die_count: usize,
    rows: Vec<Vec<Face>>,
}

impl WideTable {
    /// Build from per-die columns of equal length
    pub(crate) fn from_columns(columns: Vec<Vec<Face>>) -> Self {
        let die_count = columns.len();
        let roll_count = columns.first().map_or(0, Vec::len);
        let mut rows: Vec<Vec<Face>> = (0..roll_count).map(|_| Vec::with_capacity(die_count)).collect();
        for column in columns {
            for (row, face) in rows.iter_mut().zip(column) {
                row.push(face);
            }
        }
        Self { die_count, rows }
    }

    /// Number of rolls (rows)
    pub fn roll_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of dice (columns)
    pub fn die_count(&self) -> usize {
        self.die_count
    }

    pub fn rows(&self) -> &[Vec<Face>] {
        &self.rows
    }

    pub fn row(&self, roll: usize) -> Option<&[Face]> {
        self.rows.get(roll).map(Vec::as_slice)
    }

    pub fn cell(&self, roll: usize, die: usize) -> Option<&Face> {
        self.rows.get(roll).and_then(|r| r.get(die))
    }

    /// Every face one die showed, in roll order
    pub fn column(&self, die: usize) -> Option<Vec<Face>> {
        if die >= self.die_count {
            return None;
        }
        self.rows.iter().map(|r| r.get(die).cloned()).collect()
    }

    /// Melt into one record per cell, roll-major then die order
    pub fn to_narrow(&self) -> Vec<NarrowRecord> {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(roll, row)| {
                row.iter().enumerate().map(move |(die, face)| NarrowRecord {
                    roll,
                    die,
                    face: face.clone(),
                })
            })
            .collect()
    }
}

/// One row of the narrow layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NarrowRecord {
    #[serde(rename = "roll number")]
    pub roll: usize,
    #[serde(rename = "die number")]
    pub die: usize,
    pub face: Face,
}

/// A copy of a game's results in the requested layout
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "layout", content = "data", rename_all = "snake_case")]
pub enum ResultTable {
    Wide(WideTable),
    Narrow(Vec<NarrowRecord>),
}

impl ResultTable {
    pub fn layout(&self) -> Layout {
        match self {
            Self::Wide(_) => Layout::Wide,
            Self::Narrow(_) => Layout::Narrow,
        }
    }

    /// Row count in this layout
    pub fn len(&self) -> usize {
        match self {
            Self::Wide(t) => t.roll_count(),
            Self::Narrow(records) => records.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_wide(&self) -> Option<&WideTable> {
        match self {
            Self::Wide(t) => Some(t),
            Self::Narrow(_) => None,
        }
    }

    pub fn as_narrow(&self) -> Option<&[NarrowRecord]> {
        match self {
            Self::Narrow(records) => Some(records),
            Self::Wide(_) => None,
        }
    }

    /// Export as pretty JSON
    pub fn to_json(&self) -> crate::error::DiceResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
