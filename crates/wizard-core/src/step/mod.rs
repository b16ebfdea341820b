pub mod definition;
pub mod filter;

pub use definition::{StepCondition, StepDefinition};
pub use filter::compute_active;
