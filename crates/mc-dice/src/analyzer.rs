//! Descriptive statistics over a game's last play

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::error::DiceResult;
use crate::face::Face;
use crate::game::Game;
use crate::table::WideTable;

/// Distinct roll keys and how often each occurred
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrequencyTable {
    /// Rows sorted ascending by key
    rows: Vec<FrequencyRow>,
}

/// One distinct combination or permutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrequencyRow {
    pub key: Vec<Face>,
    pub count: usize,
}

impl FrequencyTable {
    fn from_keys(keys: impl Iterator<Item = Vec<Face>>) -> Self {
        let mut counts: BTreeMap<Vec<Face>, usize> = BTreeMap::new();
        for key in keys {
            *counts.entry(key).or_default() += 1;
        }
        let rows = counts
            .into_iter()
            .map(|(key, count)| FrequencyRow { key, count })
            .collect();
        Self { rows }
    }

    pub fn rows(&self) -> &[FrequencyRow] {
        &self.rows
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sum of all counts (the number of rolls)
    pub fn total(&self) -> usize {
        self.rows.iter().map(|r| r.count).sum()
    }

    /// Occurrences of a key, zero if never seen
    pub fn count_of(&self, key: &[Face]) -> usize {
        self.rows
            .binary_search_by(|r| r.key.as_slice().cmp(key))
            .map_or(0, |i| self.rows[i].count)
    }

    /// Rows by descending count, ties broken by key
    pub fn most_common(&self) -> Vec<FrequencyRow> {
        let mut rows = self.rows.clone();
        rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.key.cmp(&b.key)));
        rows
    }
}

/// Per-roll face tallies: `counts[roll][i]` is how many dice showed `faces[i]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FaceCountTable {
    faces: Vec<Face>,
    counts: Vec<Vec<usize>>,
}

impl FaceCountTable {
    /// Column faces, sorted
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn roll_count(&self) -> usize {
        self.counts.len()
    }

    pub fn row(&self, roll: usize) -> Option<&[usize]> {
        self.counts.get(roll).map(Vec::as_slice)
    }

    pub fn rows(&self) -> &[Vec<usize>] {
        &self.counts
    }

    /// Tally of one face on one roll; `None` for an unknown roll or face
    pub fn count(&self, roll: usize, face: &Face) -> Option<usize> {
        let col = self.faces.binary_search(face).ok()?;
        self.counts.get(roll).and_then(|r| r.get(col).copied())
    }
}

/// Statistics over one play of a game
///
/// The analyzer owns a copy of the results taken at construction, so later
/// plays of the game are not reflected here.
#[derive(Debug, Clone)]
pub struct Analyzer {
    results: WideTable,
    /// Shared face set of the game's dice, sorted
    faces: Vec<Face>,
}

impl Analyzer {
    /// Snapshot a played game; fails if the game has not been played
    pub fn new(game: &Game) -> DiceResult<Self> {
        let results = game.wide()?.clone();
        let mut faces = game.faces().to_vec();
        faces.sort();
        log::debug!(
            "Analyzing {} rolls of {} dice",
            results.roll_count(),
            results.die_count()
        );
        Ok(Self { results, faces })
    }

    /// The snapshot being analyzed
    pub fn results(&self) -> &WideTable {
        &self.results
    }

    pub fn roll_count(&self) -> usize {
        self.results.roll_count()
    }

    /// Number of rolls where every die showed the same face
    pub fn jackpot(&self) -> usize {
        self.jackpot_rolls().len()
    }

    /// Roll indices of the jackpots
    pub fn jackpot_rolls(&self) -> Vec<usize> {
        self.results
            .rows()
            .iter()
            .enumerate()
            .filter(|(_, row)| match row.split_first() {
                Some((first, rest)) => rest.iter().all(|f| f == first),
                None => false,
            })
            .map(|(i, _)| i)
            .collect()
    }

    /// Distinct unordered combinations: (1, 2, 3) and (3, 2, 1) are one key
    ///
    /// Keys are the sorted faces of each roll; repeated faces are kept.
    pub fn combinations(&self) -> FrequencyTable {
        FrequencyTable::from_keys(self.results.rows().iter().map(|row| {
            let mut key = row.clone();
            key.sort();
            key
        }))
    }

    /// Distinct ordered permutations, keyed by faces in die order
    pub fn permutations(&self) -> FrequencyTable {
        FrequencyTable::from_keys(self.results.rows().iter().cloned())
    }

    /// How many dice showed each face on each roll, zeros included
    pub fn face_counts_per_roll(&self) -> FaceCountTable {
        let column: HashMap<&Face, usize> = self.faces.iter().enumerate().map(|(i, f)| (f, i)).collect();
        let counts = self
            .results
            .rows()
            .iter()
            .map(|row| {
                let mut tally = vec![0usize; self.faces.len()];
                for face in row {
                    if let Some(&col) = column.get(face) {
                        tally[col] += 1;
                    }
                }
                tally
            })
            .collect();
        FaceCountTable {
            faces: self.faces.clone(),
            counts,
        }
    }
}
