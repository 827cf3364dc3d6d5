pub mod etl;
pub mod pipeline;

pub use crate::domain::model::{ForecastResult, RenderedEmail};
pub use crate::domain::ports::{Mailer, PageFetcher, Pipeline};
pub use crate::utils::error::Result;
