use crate::core::deferred::{deferred, Deferred};
use crate::utils::error::SimulatedFailure;
use std::convert::Infallible;
use std::time::Duration;

pub const SIMULATED_DELAY: Duration = Duration::from_millis(1000);

/// 用計時器模擬一段需要時間的工作
///
/// 每次呼叫都會在目前的 tokio runtime 上排一個計時器任務，
/// 所以必須在 runtime 裡面呼叫。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelaySimulator {
    delay: Duration,
}

impl Default for DelaySimulator {
    fn default() -> Self {
        Self::new(SIMULATED_DELAY)
    }
}

impl DelaySimulator {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// 呼叫前就要決定拿到資料後做什麼
    pub fn run_with_callback<F>(&self, input: impl Into<String>, on_complete: F)
    where
        F: FnOnce(String) + Send + 'static,
    {
        let input = input.into();
        let delay = self.delay;

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            on_complete(format!("No Promise: {}", input));
        });
    }

    /// 先拿到 handle，之後再決定怎麼處理結果
    pub fn run_as_future(&self, input: impl Into<String>) -> Deferred<String, Infallible> {
        let input = input.into();
        let delay = self.delay;
        let (resolver, handle) = deferred();

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Err(e) = resolver.fulfill(format!("Promise: {}", input)) {
                tracing::warn!("Simulated future could not be fulfilled: {}", e);
            }
        });

        handle
    }

    /// 和 `run_as_future` 一樣，只是最後會 reject
    pub fn run_as_future_failing(
        &self,
        input: impl Into<String>,
    ) -> Deferred<String, SimulatedFailure> {
        let input = input.into();
        let delay = self.delay;
        let (resolver, handle) = deferred();

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Err(e) = resolver.reject(SimulatedFailure::new(input)) {
                tracing::warn!("Simulated future could not be rejected: {}", e);
            }
        });

        handle
    }
}

pub fn run_with_callback<F>(input: impl Into<String>, on_complete: F)
where
    F: FnOnce(String) + Send + 'static,
{
    DelaySimulator::default().run_with_callback(input, on_complete)
}

pub fn run_as_future(input: impl Into<String>) -> Deferred<String, Infallible> {
    DelaySimulator::default().run_as_future(input)
}

pub fn run_as_future_failing(input: impl Into<String>) -> Deferred<String, SimulatedFailure> {
    DelaySimulator::default().run_as_future_failing(input)
}
