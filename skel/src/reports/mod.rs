//! Report data structures for commands.
//!
//! Commands build reports, then render them to an Output target.

mod generation;
mod output;

pub use generation::GenerationReport;
pub use output::{Report, TerminalOutput};
