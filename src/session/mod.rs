// src/session/mod.rs
// =============================================================================
// This module holds the human-in-the-loop part of the tool.
//
// Submodules:
// - state: the Session value (current code, version, feedback history)
// - input: parsing of lines typed at the review prompt
// - review: the loop that ties the two to the model
// =============================================================================

mod input;
mod review;
mod state;

pub use review::{run_review, ReviewContext};
pub use state::Session;
