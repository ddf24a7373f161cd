//! A concurrent engine for the real-time card game Set.
//!
//! One dealer thread owns the deck and the countdown; one thread per player
//! races to mark three cards and claim a set. Claims are judged strictly in
//! arrival order, a correct claim freezes the player briefly and scores a
//! point, and a wrong one freezes it for longer.
//!
//! The crate provides a [`Game`] type holding the shared state, a step API to
//! drive it by hand, and [`Game::start`] to run it on threads.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use setrs::{Game, GameOptions};
//!
//! let options = GameOptions::default().with_computer_players(3);
//! let game = Arc::new(Game::new(options, 42).unwrap());
//! let handle = game.start().unwrap();
//! let report = handle.join().unwrap();
//! println!("winners: {:?}", report.winners);
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod card;
pub mod error;
pub mod game;
pub mod options;
pub mod oracle;
pub mod reporter;
pub mod result;
mod sync;
pub mod table;

// Re-export main types
pub use card::{Card, DECK_SIZE, FEATURE_COUNT, FEATURE_SIZE, TABLE_SIZE, full_deck};
pub use error::{ConfigError, GameError, TableError};
pub use game::{DealerPhase, Game, GameHandle, Judgement, Verdict};
pub use options::{GameOptions, MAX_PLAYERS};
pub use oracle::{FeatureOracle, Oracle};
pub use reporter::{LogReporter, NullReporter, Reporter};
pub use result::{GameReport, winners};
pub use table::{PlayerId, RemovedCard, Table, Toggle};
