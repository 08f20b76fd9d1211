//! # mc-dice — Weighted dice for Monte Carlo experiments
//!
//! Define dice with custom face weights, roll them together in a game, and
//! analyze the last play.
//!
//! ## Architecture
//!
//! ```text
//! Die (faces + weights)
//!     │  shared as SharedDie
//!     v
//! Game (dice with identical face sets)
//!     │  play(n) → WideTable (last play only)
//!     v
//! Analyzer (owned snapshot)
//!     ├── jackpot()
//!     ├── combinations() / permutations()
//!     └── face_counts_per_roll()
//! ```
//!
//! ## Example
//!
//! ```
//! use mc_dice::{Analyzer, Die, Game, Layout};
//!
//! let mut die = Die::new(1..=6)?;
//! die.set_weight(1, 3.0)?;
//! let die = die.shared();
//!
//! let mut game = Game::new(vec![die.clone(), die.clone(), die])?;
//! game.play(10)?;
//! assert_eq!(game.result(Layout::Wide)?.len(), 10);
//!
//! let analyzer = Analyzer::new(&game)?;
//! assert!(analyzer.jackpot() <= 10);
//! assert_eq!(analyzer.combinations().total(), 10);
//! # Ok::<(), mc_dice::DiceError>(())
//! ```

pub mod analyzer;
pub mod config;
pub mod die;
pub mod error;
pub mod face;
pub mod game;
pub mod table;

pub use analyzer::*;
pub use config::*;
pub use die::*;
pub use error::*;
pub use face::*;
pub use game::*;
pub use table::*;
