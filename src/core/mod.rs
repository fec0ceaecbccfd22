pub mod engine;
pub mod pipeline;

pub use crate::domain::model::{Record, ReviewTable, ScoreTable};
pub use crate::domain::ports::{CompletionClient, Pipeline};
pub use crate::utils::error::Result;
