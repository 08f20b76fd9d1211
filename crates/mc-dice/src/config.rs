//! Declarative game setup (JSON / YAML)

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::die::{Die, SharedDie};
use crate::error::{DiceError, DiceResult};
use crate::face::{Face, faces};
use crate::game::Game;

/// One die, optionally repeated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DieConfig {
    /// Distinct faces
    pub faces: Vec<Face>,
    /// Weight overrides keyed by face text; unlisted faces keep 1.0
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub weights: BTreeMap<String, f64>,
    /// How many handles to the same die the game gets
    #[serde(default = "default_count")]
    pub count: usize,
}

fn default_count() -> usize {
    1
}

fn default_rolls() -> usize {
    1000
}

impl DieConfig {
    /// Fair die with the given faces
    pub fn fair<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Face>,
    {
        Self {
            faces: faces(values),
            weights: BTreeMap::new(),
            count: 1,
        }
    }

    /// Six-sided die with pips 1-6
    pub fn standard_d6() -> Self {
        Self::fair(1..=6)
    }

    /// Two-faced coin, "H" and "T"
    pub fn coin() -> Self {
        Self::fair(["H", "T"])
    }

    /// Override one face's weight
    pub fn with_weight(mut self, face: impl Into<Face>, weight: f64) -> Self {
        self.weights.insert(face.into().to_string(), weight);
        self
    }

    /// Repeat this die `count` times in the game
    pub fn times(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    /// Construct the die and apply the weight overrides
    pub fn build(&self) -> DiceResult<Die> {
        let mut die = Die::new(self.faces.iter().cloned())?;
        for (label, &weight) in &self.weights {
            let mut matches = self.faces.iter().filter(|f| f.to_string() == *label);
            let face = matches
                .next()
                .cloned()
                .ok_or_else(|| DiceError::Lookup(format!("'{label}' is not a face of this die")))?;
            if matches.next().is_some() {
                return Err(DiceError::validation(format!(
                    "weight key '{label}' matches more than one face"
                )));
            }
            die.set_weight(face, weight)?;
        }
        Ok(die)
    }
}

/// A complete game description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub dice: Vec<DieConfig>,
    /// Rolls performed by [`GameConfig::run`]
    #[serde(default = "default_rolls")]
    pub rolls: usize,
    /// Fixed seed for reproducible runs (None = OS entropy)
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            dice: vec![DieConfig::standard_d6().times(2)],
            rolls: default_rolls(),
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn from_json(text: &str) -> DiceResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_yaml(text: &str) -> DiceResult<Self> {
        Ok(serde_yml::from_str(text)?)
    }

    pub fn to_json(&self) -> DiceResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Dice in column order, repeats sharing one die
    pub fn build_dice(&self) -> DiceResult<Vec<SharedDie>> {
        let mut dice = Vec::new();
        for spec in &self.dice {
            if spec.count == 0 {
                return Err(DiceError::validation("die count must be a positive integer"));
            }
            let die = spec.build()?.shared();
            dice.extend(std::iter::repeat_n(die, spec.count));
        }
        Ok(dice)
    }

    /// Construct the game, seeded if a seed is configured
    pub fn build(&self) -> DiceResult<Game> {
        let mut game = Game::new(self.build_dice()?)?;
        if let Some(seed) = self.seed {
            game.seed(seed);
        }
        Ok(game)
    }

    /// Construct the game and play the configured number of rolls
    pub fn run(&self) -> DiceResult<Game> {
        let mut game = self.build()?;
        game.play(self.rolls)?;
        Ok(game)
    }
}
