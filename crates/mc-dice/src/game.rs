//! Game: rolling several dice together
//!
//! A game rolls every one of its dice once per roll and keeps only the
//! results of the most recent [`Game::play`].

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::die::SharedDie;
use crate::error::{DiceError, DiceResult};
use crate::face::{Face, format_face_set};
use crate::table::{Layout, ResultTable, WideTable};

/// A set of similar dice rolled together
///
/// Dice are similar when they carry the same faces; their weights may
/// differ. The dice are shared, not copied.
#[derive(Debug)]
pub struct Game {
    /// Dice in column order
    dice: Vec<SharedDie>,
    /// Face set of the first die, in its construction order
    faces: Vec<Face>,
    /// Random number generator
    rng: StdRng,
    /// Results of the last play
    results: Option<WideTable>,
}

impl Game {
    /// Create a game from one or more dice with identical face sets
    pub fn new(dice: Vec<SharedDie>) -> DiceResult<Self> {
        let first = dice
            .first()
            .ok_or_else(|| DiceError::validation("a game needs at least one die"))?;
        let (faces, reference) = {
            let die = first.read();
            (die.faces().to_vec(), die.sorted_faces())
        };

        for (idx, die) in dice.iter().enumerate().skip(1) {
            let other = die.read().sorted_faces();
            if other != reference {
                return Err(DiceError::validation(format!(
                    "all dice must have the same faces: die {idx} has {} but die 0 has {}",
                    format_face_set(&other),
                    format_face_set(&reference),
                )));
            }
        }

        Ok(Self {
            dice,
            faces,
            rng: StdRng::from_os_rng(),
            results: None,
        })
    }

    /// Reseed the generator for a reproducible sequence of plays
    pub fn seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Builder-style [`Game::seed`]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed(seed);
        self
    }

    /// Dice in column order
    pub fn dice(&self) -> &[SharedDie] {
        &self.dice
    }

    /// Number of dice (result columns)
    pub fn die_count(&self) -> usize {
        self.dice.len()
    }

    /// The face set every die shares
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Has at least one play completed?
    pub fn has_played(&self) -> bool {
        self.results.is_some()
    }

    /// Roll every die `rolls` times and replace the stored results
    ///
    /// Each die is rolled with its weights as of this call. On error the
    /// previous results are kept.
    pub fn play(&mut self, rolls: usize) -> DiceResult<()> {
        if rolls == 0 {
            return Err(DiceError::validation("number of rolls must be a positive integer"));
        }

        let mut columns = Vec::with_capacity(self.dice.len());
        for die in &self.dice {
            columns.push(die.read().roll_with(&mut self.rng, rolls)?);
        }

        self.results = Some(WideTable::from_columns(columns));
        log::debug!("Played {} rolls of {} dice", rolls, self.dice.len());
        Ok(())
    }

    /// Copy of the last results in the given layout
    pub fn result(&self, layout: Layout) -> DiceResult<ResultTable> {
        let table = self.wide()?;
        Ok(match layout {
            Layout::Wide => ResultTable::Wide(table.clone()),
            Layout::Narrow => ResultTable::Narrow(table.to_narrow()),
        })
    }

    /// [`Game::result`] with the layout given by name ("wide" or "narrow")
    pub fn show(&self, layout: &str) -> DiceResult<ResultTable> {
        self.result(layout.parse()?)
    }

    pub(crate) fn wide(&self) -> DiceResult<&WideTable> {
        self.results.as_ref().ok_or_else(DiceError::not_played)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::die::Die;
    use crate::error::ErrorKind;

    fn coin() -> SharedDie {
        Die::new(["H", "T"]).unwrap().shared()
    }

    #[test]
    fn test_empty_game_rejected() {
        assert_eq!(Game::new(Vec::new()).unwrap_err().kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_mismatched_faces_rejected() {
        let ab = Die::new(["A", "B"]).unwrap().shared();
        let abc = Die::new(["A", "B", "C"]).unwrap().shared();
        let err = Game::new(vec![ab, abc]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.to_string().contains("die 1"));
        assert!(err.to_string().contains("{A, B, C}"));
    }

    #[test]
    fn test_face_order_and_weights_ignored_for_similarity() {
        let a = Die::new([1, 2, 3]).unwrap();
        let mut b = Die::new([3, 1, 2]).unwrap();
        b.set_weight(3, 10.0).unwrap();
        let game = Game::new(vec![a.shared(), b.shared()]).unwrap();
        assert_eq!(game.die_count(), 2);
        assert_eq!(game.faces(), &[Face::Int(1), Face::Int(2), Face::Int(3)][..]);
    }

    #[test]
    fn test_play_shape() {
        let mut game = Game::new(vec![coin(), coin()]).unwrap().with_seed(1);
        game.play(10).unwrap();
        let wide = game.result(Layout::Wide).unwrap();
        let t = wide.as_wide().unwrap();
        assert_eq!(t.roll_count(), 10);
        assert_eq!(t.die_count(), 2);
        assert_eq!(game.result(Layout::Narrow).unwrap().len(), 20);
    }

    #[test]
    fn test_play_zero_rejected() {
        let mut game = Game::new(vec![coin()]).unwrap();
        assert_eq!(game.play(0).unwrap_err().kind(), ErrorKind::Validation);
        assert!(!game.has_played());
    }

    #[test]
    fn test_results_before_play() {
        let game = Game::new(vec![coin()]).unwrap();
        assert_eq!(game.result(Layout::Wide).unwrap_err().kind(), ErrorKind::State);
        assert_eq!(game.show("narrow").unwrap_err().kind(), ErrorKind::State);
    }

    #[test]
    fn test_unknown_layout() {
        let mut game = Game::new(vec![coin()]).unwrap();
        game.play(2).unwrap();
        assert_eq!(game.show("tall").unwrap_err().kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_play_replaces_results() {
        let mut game = Game::new(vec![coin(), coin()]).unwrap();
        game.play(5).unwrap();
        game.play(3).unwrap();
        assert_eq!(game.result(Layout::Wide).unwrap().len(), 3);
    }

    #[test]
    fn test_failed_play_keeps_previous_results() {
        let die = coin();
        let mut game = Game::new(vec![die.clone()]).unwrap();
        game.play(4).unwrap();
        {
            let mut d = die.write();
            d.set_weight("H", 0.0).unwrap();
            d.set_weight("T", 0.0).unwrap();
        }
        assert_eq!(game.play(6).unwrap_err().kind(), ErrorKind::Validation);
        assert_eq!(game.result(Layout::Wide).unwrap().len(), 4);
    }

    #[test]
    fn test_shared_weights_apply_to_future_plays() {
        let die = coin();
        let mut game = Game::new(vec![die.clone(), die.clone()]).unwrap().with_seed(9);
        game.play(20).unwrap();
        let before = game.result(Layout::Wide).unwrap();

        die.write().set_weight("T", 0.0).unwrap();
        // Stored results are unaffected by the weight change
        assert_eq!(game.result(Layout::Wide).unwrap(), before);

        game.play(20).unwrap();
        let after = game.result(Layout::Narrow).unwrap();
        assert!(after.as_narrow().unwrap().iter().all(|r| r.face == Face::text("H")));
    }

    #[test]
    fn test_overflowing_weights_fail_play() {
        let die = Die::new(["a", "b"]).unwrap().shared();
        {
            let mut d = die.write();
            d.set_weight("a", 1e308).unwrap();
            d.set_weight("b", 1e308).unwrap();
        }
        let mut game = Game::new(vec![die]).unwrap();
        assert_eq!(game.play(5).unwrap_err().kind(), ErrorKind::Validation);
        assert!(!game.has_played());
    }

    #[test]
    fn test_seeded_games_repeat() {
        let mut a = Game::new(vec![coin(), coin()]).unwrap().with_seed(77);
        let mut b = Game::new(vec![coin(), coin()]).unwrap().with_seed(77);
        a.play(15).unwrap();
        b.play(15).unwrap();
        assert_eq!(a.result(Layout::Wide).unwrap(), b.result(Layout::Wide).unwrap());
    }

    #[test]
    fn test_result_is_a_copy() {
        let mut game = Game::new(vec![coin()]).unwrap();
        game.play(3).unwrap();
        let copy = game.result(Layout::Wide).unwrap();
        game.play(3).unwrap();
        assert_eq!(copy.len(), 3);
    }
}
