//! Weighted die

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::RwLock;
use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use serde::{Deserialize, Serialize};

use crate::error::{DiceError, DiceResult};
use crate::face::Face;

/// Weight every face starts with
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// A die shared between its owner and the games that roll it
///
/// Weight changes made through any handle apply to the next roll, never to
/// results that were already produced.
pub type SharedDie = Arc<RwLock<Die>>;

/// One row of a die snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceWeight {
    pub face: Face,
    pub weight: f64,
}

/// A die with a fixed set of unique faces and a mutable weight per face
///
/// Faces are drawn with probability proportional to their weight. All
/// weights start at [`DEFAULT_WEIGHT`], making a new die fair.
#[derive(Debug, Clone)]
pub struct Die {
    /// Faces in construction order
    faces: Vec<Face>,
    /// Weight per face, same order as `faces`
    weights: Vec<f64>,
}

impl Die {
    /// Create a fair die from distinct faces
    pub fn new<I, T>(faces: I) -> DiceResult<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<Face>,
    {
        let faces: Vec<Face> = faces.into_iter().map(Into::into).collect();

        if faces.is_empty() {
            return Err(DiceError::validation("a die needs at least one face"));
        }
        if let Some(face) = faces.iter().find(|f| f.is_nan()) {
            return Err(DiceError::validation(format!("face {face} is not a valid symbol")));
        }

        let mut seen = HashSet::with_capacity(faces.len());
        for face in &faces {
            if !seen.insert(face) {
                return Err(DiceError::validation(format!("faces must be unique, '{face}' repeats")));
            }
        }

        let weights = vec![DEFAULT_WEIGHT; faces.len()];
        Ok(Self { faces, weights })
    }

    /// Wrap into a shared handle for use in one or more games
    pub fn shared(self) -> SharedDie {
        Arc::new(RwLock::new(self))
    }

    /// Faces in construction order
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Number of faces
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    /// Always false for a constructed die
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Does the die carry this face?
    pub fn contains(&self, face: &Face) -> bool {
        self.position(face).is_some()
    }

    /// Current weight of a face
    pub fn weight(&self, face: &Face) -> Option<f64> {
        self.position(face).map(|i| self.weights[i])
    }

    /// Sum of all weights
    pub fn total_weight(&self) -> f64 {
        self.weights.iter().sum()
    }

    fn position(&self, face: &Face) -> Option<usize> {
        self.faces.iter().position(|f| f == face)
    }

    /// Change the weight of a single face
    ///
    /// Fails with a lookup error for an unknown face, a type error for a
    /// non-finite weight and a validation error for a negative one.
    pub fn set_weight(&mut self, face: impl Into<Face>, weight: f64) -> DiceResult<()> {
        let face = face.into();
        let idx = self
            .position(&face)
            .ok_or_else(|| DiceError::Lookup(format!("'{face}' is not a face of this die")))?;

        if !weight.is_finite() {
            return Err(DiceError::Type(format!("weight {weight} is not a finite number")));
        }
        if weight < 0.0 {
            return Err(DiceError::validation(format!("weight must be non-negative, got {weight}")));
        }

        log::trace!("weight of '{}' {} -> {}", face, self.weights[idx], weight);
        self.weights[idx] = weight;
        Ok(())
    }

    /// Change a weight given as text, e.g. from a config file or prompt
    pub fn set_weight_str(&mut self, face: impl Into<Face>, weight: &str) -> DiceResult<()> {
        let face = face.into();
        if !self.contains(&face) {
            return Err(DiceError::Lookup(format!("'{face}' is not a face of this die")));
        }
        let parsed: f64 = weight
            .trim()
            .parse()
            .map_err(|_| DiceError::Type(format!("weight '{weight}' is not numeric")))?;
        self.set_weight(face, parsed)
    }

    /// Roll `count` times with the thread-local generator
    pub fn roll(&self, count: usize) -> DiceResult<Vec<Face>> {
        self.roll_with(&mut rand::rng(), count)
    }

    /// Roll `count` times drawing from `rng`
    ///
    /// Draws are independent and with replacement. Fails if `count` is zero
    /// or every weight is zero.
    pub fn roll_with<R: Rng + ?Sized>(&self, rng: &mut R, count: usize) -> DiceResult<Vec<Face>> {
        if count == 0 {
            return Err(DiceError::validation("number of rolls must be a positive integer"));
        }
        let dist = self.distribution()?;
        Ok((0..count).map(|_| self.faces[dist.sample(rng)].clone()).collect())
    }

    fn distribution(&self) -> DiceResult<WeightedIndex<f64>> {
        if self.total_weight() <= 0.0 {
            return Err(DiceError::validation("all face weights are zero"));
        }
        if !self.total_weight().is_finite() {
            return Err(DiceError::validation("sum of face weights is not finite"));
        }
        WeightedIndex::new(&self.weights)
            .map_err(|e| DiceError::validation(format!("cannot sample face weights: {e}")))
    }

    /// Faces and weights, sorted by face
    pub fn snapshot(&self) -> Vec<FaceWeight> {
        let mut rows: Vec<FaceWeight> = self
            .faces
            .iter()
            .zip(&self.weights)
            .map(|(face, &weight)| FaceWeight { face: face.clone(), weight })
            .collect();
        rows.sort_by(|a, b| a.face.cmp(&b.face));
        rows
    }

    /// Faces sorted, for set comparison between dice
    pub(crate) fn sorted_faces(&self) -> Vec<Face> {
        let mut faces = self.faces.clone();
        faces.sort();
        faces
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn d6() -> Die {
        Die::new(1..=6).unwrap()
    }

    #[test]
    fn test_new_die_is_fair() {
        let die = d6();
        assert_eq!(die.len(), 6);
        for row in die.snapshot() {
            assert_relative_eq!(row.weight, 1.0);
        }
    }

    #[test]
    fn test_duplicate_faces_rejected() {
        let err = Die::new(["H", "T", "H"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        let err = Die::new([Face::Int(2), Face::Float(2.0)]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_empty_and_nan_rejected() {
        assert_eq!(Die::new(Vec::<Face>::new()).unwrap_err().kind(), ErrorKind::Validation);
        assert_eq!(Die::new([1.0, f64::NAN]).unwrap_err().kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_set_weight() {
        let mut die = d6();
        die.set_weight(2, 5.0).unwrap();
        assert_eq!(die.weight(&Face::Int(2)), Some(5.0));
        assert_eq!(die.weight(&Face::Int(3)), Some(1.0));
        assert_relative_eq!(die.total_weight(), 10.0);
    }

    #[test]
    fn test_set_weight_errors() {
        let mut die = d6();
        assert_eq!(die.set_weight(7, 1.0).unwrap_err().kind(), ErrorKind::Lookup);
        assert_eq!(die.set_weight(1, f64::NAN).unwrap_err().kind(), ErrorKind::Type);
        assert_eq!(die.set_weight(1, f64::INFINITY).unwrap_err().kind(), ErrorKind::Type);
        assert_eq!(die.set_weight(1, -0.5).unwrap_err().kind(), ErrorKind::Validation);
        // Failed updates leave the die untouched
        assert_eq!(die.weight(&Face::Int(1)), Some(1.0));
    }

    #[test]
    fn test_set_weight_str() {
        let mut die = d6();
        die.set_weight_str(4, " 2.5 ").unwrap();
        assert_eq!(die.weight(&Face::Int(4)), Some(2.5));
        assert_eq!(die.set_weight_str(4, "heavy").unwrap_err().kind(), ErrorKind::Type);
        assert_eq!(die.set_weight_str(9, "1").unwrap_err().kind(), ErrorKind::Lookup);
    }

    #[test]
    fn test_roll_count_and_membership() {
        let die = d6();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let rolls = die.roll_with(&mut rng, 50).unwrap();
        assert_eq!(rolls.len(), 50);
        assert!(rolls.iter().all(|f| die.contains(f)));
        assert_eq!(die.roll(1).unwrap().len(), 1);
    }

    #[test]
    fn test_roll_zero_rejected() {
        assert_eq!(d6().roll(0).unwrap_err().kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_single_nonzero_weight_is_deterministic() {
        let mut die = d6();
        for face in 1..=6 {
            die.set_weight(face, if face == 4 { 2.0 } else { 0.0 }).unwrap();
        }
        let rolls = die.roll(25).unwrap();
        assert!(rolls.iter().all(|f| *f == Face::Int(4)));
    }

    #[test]
    fn test_all_zero_weights_rejected() {
        let mut die = Die::new(["H", "T"]).unwrap();
        die.set_weight("H", 0.0).unwrap();
        die.set_weight("T", 0.0).unwrap();
        assert_eq!(die.roll(3).unwrap_err().kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_overflowing_weight_sum_rejected() {
        let mut die = Die::new(["a", "b"]).unwrap();
        die.set_weight("a", 1e308).unwrap();
        die.set_weight("b", 1e308).unwrap();
        assert_eq!(die.roll(3).unwrap_err().kind(), ErrorKind::Validation);

        die.set_weight("b", 1.0).unwrap();
        assert_eq!(die.roll(3).unwrap().len(), 3);
    }

    #[test]
    fn test_weighted_roll_frequency() {
        let mut die = Die::new(["H", "T"]).unwrap();
        die.set_weight("H", 3.0).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let rolls = die.roll_with(&mut rng, 4000).unwrap();
        let heads = rolls.iter().filter(|f| **f == Face::text("H")).count();
        let ratio = heads as f64 / rolls.len() as f64;
        assert!((0.70..0.80).contains(&ratio), "ratio was {ratio}");
    }

    #[test]
    fn test_snapshot_sorted_and_detached() {
        let mut die = Die::new([3, 1, 2]).unwrap();
        let snap = die.snapshot();
        assert_eq!(
            snap.iter().map(|r| r.face.clone()).collect::<Vec<_>>(),
            vec![Face::Int(1), Face::Int(2), Face::Int(3)]
        );
        die.set_weight(1, 9.0).unwrap();
        assert_eq!(snap[0].weight, 1.0);
        assert_eq!(die.snapshot()[0].weight, 9.0);
        // Construction order is kept for faces()
        assert_eq!(die.faces()[0], Face::Int(3));
    }
}
