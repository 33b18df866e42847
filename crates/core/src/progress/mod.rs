//! Quiz progress state machine.
//!
//! `reduce` is the only way state changes; it also reports what the durable
//! mirror must do so callers can keep storage in lockstep.

mod reducer;
mod state;

pub use reducer::{PersistEffect, ProgressAction, reduce};
pub use state::{
    FIXED_TOTAL_QUESTIONS, ParseDenominatorError, ProgressDenominator, ProgressError,
    ProgressState,
};
