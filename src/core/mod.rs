pub mod etl;
pub mod pipeline;
pub mod ranking;
pub mod scorer;

pub use crate::domain::model::{Corpus, MatchRun};
pub use crate::domain::ports::{
    AttributeExtractor, ConfigProvider, MatchRepository, Notifier, Pipeline, Storage,
};
pub use crate::utils::error::Result;
