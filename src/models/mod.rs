pub mod loaders;
pub mod outcome;

pub use loaders::load_roll_numbers;
pub use outcome::{FetchStatus, FormTokens, Outcome, StudentRecord, NOT_AVAILABLE};
