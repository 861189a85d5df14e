pub mod deferred;
pub mod fetch;
pub mod simulator;

pub use deferred::{deferred, Deferred, DeferredState, Resolver, Settlement};
pub use fetch::{related_articles_url, RawResponse, RelatedArticlesClient};
pub use simulator::{DelaySimulator, SIMULATED_DELAY};
