pub mod evaluation;
pub mod extraction;
pub mod handlers;
pub mod prompts;
pub mod questions;
pub mod wizard;
