pub mod processor;

pub use processor::{CompletionOutcome, complete_transaction, spawn_completion};
