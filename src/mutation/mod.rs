pub mod engine;

pub use engine::{MutationEngine, next_id};
