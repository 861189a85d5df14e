pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{RecordingSink, TracingSink};
pub use app::WalkthroughSequence;
pub use config::{AppConfig, FetchConfig};
pub use crate::core::simulator::{run_as_future, run_as_future_failing, run_with_callback};
pub use crate::core::{Deferred, DeferredState, DelaySimulator, RelatedArticlesClient};
pub use domain::model::{LogLevel, LogLine, RelatedArticles};
pub use domain::ports::{LogSink, SharedSink};
pub use utils::error::{ErrorKind, PrimerError, Result, SimulatedFailure};
