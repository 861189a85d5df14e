use crate::core::simulator::DelaySimulator;
use crate::domain::ports::SharedSink;
use crate::utils::error::SimulatedFailure;
use async_trait::async_trait;
use futures::{FutureExt, TryFutureExt};
use std::future::IntoFuture;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;

pub const FIRST_INPUT: &str = "Hello World";
pub const SECOND_INPUT: &str = "Hello World 2";

/// 一段可以執行的示範，所有輸出都寫到 sink
#[async_trait]
pub trait Walkthrough: Send + Sync {
    fn name(&self) -> &str;

    async fn run(&self, simulator: &DelaySimulator, sink: SharedSink);
}

/// 不用 promise：每個呼叫各自排計時器，幾乎同時完成
pub struct ConcurrentCallbacks {
    inputs: Vec<String>,
}

impl ConcurrentCallbacks {
    pub fn new(inputs: Vec<String>) -> Self {
        Self { inputs }
    }
}

impl Default for ConcurrentCallbacks {
    fn default() -> Self {
        Self::new(vec![FIRST_INPUT.to_string(); 4])
    }
}

#[async_trait]
impl Walkthrough for ConcurrentCallbacks {
    fn name(&self) -> &str {
        "concurrent-callbacks"
    }

    async fn run(&self, simulator: &DelaySimulator, sink: SharedSink) {
        let (tx, mut rx) = mpsc::unbounded_channel();

        for input in &self.inputs {
            let sink = sink.clone();
            let tx = tx.clone();
            simulator.run_with_callback(input.clone(), move |message| {
                sink.log(&message);
                let _ = tx.send(());
            });
        }
        drop(tx);

        // 等所有回呼都跑完
        while rx.recv().await.is_some() {}
    }
}

/// 不 await 的 continuation 鏈，"test" 會先印出來
pub struct ChainedContinuations;

#[async_trait]
impl Walkthrough for ChainedContinuations {
    fn name(&self) -> &str {
        "chained-continuations"
    }

    async fn run(&self, simulator: &DelaySimulator, sink: SharedSink) {
        let simulator = *simulator;
        let on_first = sink.clone();
        let on_second = sink.clone();
        let on_done = sink.clone();
        let on_error = sink.clone();

        let chain = simulator
            .run_as_future(FIRST_INPUT)
            .into_future()
            .map_ok(move |data| on_first.log(&data))
            .and_then(move |()| {
                simulator
                    .run_as_future(SECOND_INPUT)
                    .into_future()
                    .map_ok(move |data| on_second.log(&data))
            })
            .then(move |outcome| async move {
                on_done.log("Done!");
                outcome
            })
            .inspect_err(move |e| on_error.error(&e.to_string()))
            .map(|_| ());

        let handle = tokio::spawn(chain);
        sink.log("test");

        if let Err(e) = handle.await {
            tracing::error!("Continuation chain task failed: {}", e);
        }
    }
}

/// 依序 await，"test" 要等兩個 future 都完成才會印
pub struct AwaitedSequence;

#[async_trait]
impl Walkthrough for AwaitedSequence {
    fn name(&self) -> &str {
        "awaited-sequence"
    }

    async fn run(&self, simulator: &DelaySimulator, sink: SharedSink) {
        let data = simulator.run_as_future(FIRST_INPUT).value().await;
        sink.log(&data);
        let data2 = simulator.run_as_future(SECOND_INPUT).value().await;
        sink.log(&data2);

        sink.log("Done!");
        sink.log("test");
    }
}

/// 第一個 future 被 reject 後，第二個不會執行
pub struct AwaitedRejection;

impl AwaitedRejection {
    async fn both(
        simulator: &DelaySimulator,
        sink: &SharedSink,
    ) -> Result<(), SimulatedFailure> {
        let data = simulator.run_as_future_failing(FIRST_INPUT).await?;
        sink.log(&data);

        let data2 = simulator.run_as_future_failing(SECOND_INPUT).await?;
        sink.log(&data2);

        Ok(())
    }
}

#[async_trait]
impl Walkthrough for AwaitedRejection {
    fn name(&self) -> &str {
        "awaited-rejection"
    }

    async fn run(&self, simulator: &DelaySimulator, sink: SharedSink) {
        if let Err(e) = Self::both(simulator, &sink).await {
            sink.error(&e.to_string());
        }
        sink.log("Done!");
    }
}

/// 沒有 await：印出來的是還在 pending 的 handle
pub struct UnawaitedHandle;

#[async_trait]
impl Walkthrough for UnawaitedHandle {
    fn name(&self) -> &str {
        "unawaited-handle"
    }

    async fn run(&self, simulator: &DelaySimulator, sink: SharedSink) {
        let data = simulator.run_as_future(FIRST_INPUT);
        sink.log(&data.to_string());
        sink.log("Done!");

        // 計時器還在跑，等它結束才算整段示範結束
        let _resolved = data.value().await;
    }
}

#[derive(Debug, Clone)]
pub struct WalkthroughResult {
    pub name: String,
    pub duration: Duration,
}

/// 依序執行所有示範，前一個結束後才開始下一個
pub struct WalkthroughSequence {
    simulator: DelaySimulator,
    walkthroughs: Vec<Box<dyn Walkthrough>>,
}

impl WalkthroughSequence {
    pub fn new(simulator: DelaySimulator) -> Self {
        Self {
            simulator,
            walkthroughs: Vec::new(),
        }
    }

    /// 依原本範例的順序放入全部示範
    pub fn with_defaults(simulator: DelaySimulator) -> Self {
        let mut sequence = Self::new(simulator);
        sequence.add(Box::new(ConcurrentCallbacks::default()));
        sequence.add(Box::new(ChainedContinuations));
        sequence.add(Box::new(AwaitedSequence));
        sequence.add(Box::new(AwaitedRejection));
        sequence.add(Box::new(UnawaitedHandle));
        sequence
    }

    pub fn add(&mut self, walkthrough: Box<dyn Walkthrough>) {
        self.walkthroughs.push(walkthrough);
    }

    pub fn len(&self) -> usize {
        self.walkthroughs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.walkthroughs.is_empty()
    }

    pub async fn run_all(&self, sink: SharedSink) -> Vec<WalkthroughResult> {
        let mut results = Vec::new();

        for walkthrough in &self.walkthroughs {
            tracing::info!("▶️ Running walkthrough: {}", walkthrough.name());
            let start_time = Instant::now();

            walkthrough.run(&self.simulator, sink.clone()).await;

            let result = WalkthroughResult {
                name: walkthrough.name().to_string(),
                duration: start_time.elapsed(),
            };
            tracing::info!(
                "✅ Walkthrough finished: {} (duration: {:?})",
                result.name,
                result.duration
            );
            results.push(result);
        }

        results
    }
}
