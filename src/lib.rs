//! Rules engine for Italian draughts (Dama Italiana).
//!
//! The engine models the playable squares of an N×N board as a dense index,
//! derives single-step moves and captures, aggregates legal actions for a
//! side under the mandatory-capture rule, and enumerates every maximal
//! multi-jump capture sequence a piece can play in one turn.

pub mod config;
pub mod engine;
