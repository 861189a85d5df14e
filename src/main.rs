use anyhow::Context;
use deferred_fetch::config::DEFAULT_CONFIG_FILE;
use deferred_fetch::utils::{logger, validation::Validate};
use deferred_fetch::{
    AppConfig, DelaySimulator, RelatedArticlesClient, SharedSink, TracingSink, WalkthroughSequence,
};
use std::sync::Arc;

const DEMO_TITLE: &str = "JavaScript";

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    logger::init_logger(false);

    let config = AppConfig::load_or_default(DEFAULT_CONFIG_FILE)
        .with_context(|| format!("failed to load {}", DEFAULT_CONFIG_FILE))?;
    config.validate().context("invalid configuration")?;
    tracing::debug!("Config: {:?}", config);

    let sink: SharedSink = Arc::new(TracingSink);

    // 先跑計時器示範
    let simulator = DelaySimulator::new(config.deferred.delay());
    tracing::info!("⏱️ Simulated delay: {:?}", simulator.delay());
    let sequence = WalkthroughSequence::with_defaults(simulator);
    let results = sequence.run_all(sink.clone()).await;
    tracing::info!("🎉 {} walkthroughs completed", results.len());

    // 再跑三種 fetch 寫法
    let client = RelatedArticlesClient::new(config.fetch.clone(), sink.clone())
        .context("failed to build HTTP client")?;

    if let Some(data) = client.fetch_related_articles(DEMO_TITLE).await {
        println!("{}", serde_json::to_string_pretty(&data)?);
    }

    if let Some(data) = client.fetch_related_articles_chaining(DEMO_TITLE).await {
        println!("{}", serde_json::to_string_pretty(&data)?);
    }

    let data = client.fetch_related_articles_exception(DEMO_TITLE).await;
    println!("{:?}", data);

    match client.try_fetch_related_articles(DEMO_TITLE).await {
        Ok(_) => tracing::info!("✅ Related articles fetched for {}", DEMO_TITLE),
        Err(e) => tracing::error!("❌ Fetch failed ({:?}): {}", e.kind(), e),
    }

    Ok(())
}
