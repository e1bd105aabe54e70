pub mod submission;

pub use submission::{submit, validate};
