//! Command-line front end for `retireplan_core`
//!
//! Loads `UserData` documents, runs projections and prints JSON. All business
//! rules live in the core crate.

pub mod input;
pub mod logging;

pub use input::{InputFormat, load_user_data, parse_user_data};
pub use logging::init_logging;
