use crate::config::FetchConfig;
use crate::domain::model::RelatedArticles;
use crate::domain::ports::SharedSink;
use crate::utils::error::{PrimerError, Result};
use crate::utils::validation::Validate;
use futures::TryFutureExt;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use url::Url;

/// 刻意呼叫的不存在 accessor，用來走到錯誤處理路徑
pub const MISSING_ACCESSOR: &str = "noMethodLikeThis";

/// 把標題當成單一 path segment 接在 endpoint 後面
///
/// `/`、空白等保留字元都會被 percent-encode。空字串與 `.`、`..`
/// 沒辦法當成單一 segment 送出（會被 URL 正規化吃掉），直接拒絕。
pub fn related_articles_url(endpoint: &str, title: &str) -> Result<Url> {
    if matches!(title, "" | "." | "..") {
        return Err(PrimerError::InvalidTitle {
            title: title.to_string(),
        });
    }

    let mut url = Url::parse(endpoint)?;
    url.path_segments_mut()
        .map_err(|_| PrimerError::UnsupportedEndpoint {
            endpoint: endpoint.to_string(),
        })?
        .pop_if_empty()
        .push(title);
    Ok(url)
}

/// 還沒讀取 body 的回應
#[derive(Debug)]
pub struct RawResponse {
    inner: reqwest::Response,
}

impl RawResponse {
    pub fn status(&self) -> StatusCode {
        self.inner.status()
    }

    pub async fn json(self) -> Result<RelatedArticles> {
        let body = self.inner.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// 依名稱呼叫 body accessor，目前只有 `json`
    pub async fn invoke(self, accessor: &str) -> Result<RelatedArticles> {
        match accessor {
            "json" => self.json().await,
            name => Err(PrimerError::UnknownAccessor {
                name: name.to_string(),
            }),
        }
    }
}

pub struct RelatedArticlesClient {
    client: Client,
    config: FetchConfig,
    sink: SharedSink,
}

impl RelatedArticlesClient {
    pub fn new(config: FetchConfig, sink: SharedSink) -> Result<Self> {
        config.validate()?;

        let mut builder = Client::builder();
        if let Some(seconds) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }
        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }

        Ok(Self {
            client: builder.build()?,
            config,
            sink,
        })
    }

    async fn get(&self, title: &str) -> Result<RawResponse> {
        let url = related_articles_url(&self.config.endpoint, title)?;

        tracing::debug!("Making API request to: {}", url);
        let response = self.client.get(url).send().await?;
        tracing::debug!("API response status: {}", response.status());

        if self.config.require_success_status && !response.status().is_success() {
            return Err(PrimerError::HttpStatusError {
                status: response.status().as_u16(),
            });
        }

        Ok(RawResponse { inner: response })
    }

    /// 把錯誤原樣交給呼叫端，`kind()` 可以分辨失敗來源
    pub async fn try_fetch_related_articles(&self, title: &str) -> Result<RelatedArticles> {
        let response = self.get(title).await?;
        response.json().await
    }

    /// 依序 await；任何失敗都只寫一行錯誤並回傳 `None`
    pub async fn fetch_related_articles(&self, title: &str) -> Option<RelatedArticles> {
        match self.try_fetch_related_articles(title).await {
            Ok(articles) => Some(articles),
            Err(e) => {
                self.sink.error(&e.to_string());
                None
            }
        }
    }

    /// 用 combinator 串起 request、解析與單一的錯誤處理步驟
    pub async fn fetch_related_articles_chaining(&self, title: &str) -> Option<RelatedArticles> {
        self.get(title)
            .and_then(RawResponse::json)
            .inspect_err(|e| self.sink.error(&e.to_string()))
            .await
            .ok()
    }

    /// 一定會失敗：先寫 "Error caught!" 再寫錯誤內容
    pub async fn fetch_related_articles_exception(&self, title: &str) -> Option<RelatedArticles> {
        match self.fetch_with_missing_accessor(title).await {
            Ok(articles) => Some(articles),
            Err(e) => {
                self.sink.log("Error caught!");
                self.sink.error(&e.to_string());
                None
            }
        }
    }

    async fn fetch_with_missing_accessor(&self, title: &str) -> Result<RelatedArticles> {
        let response = self.get(title).await?;
        response.invoke(MISSING_ACCESSOR).await
    }
}
