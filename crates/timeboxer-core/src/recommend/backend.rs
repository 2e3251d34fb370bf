//! Remote-delegating recommendation strategy.
//!
//! Posts the full context to `{base}/api/recommend` and returns the service's
//! answer. Every failure mode -- unreachable host, timeout, non-2xx status,
//! undecodable body -- degrades to [`LocalStrategy`] without surfacing an
//! error: callers always get a recommendation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use super::{LocalStrategy, RecommendContext, RecommendStrategy, TimeBoxRecommendation};
use crate::error::RecommendError;

/// Delegating strategy over the remote recommendation service.
#[derive(Debug, Clone)]
pub struct BackendStrategy {
    base: Url,
    client: reqwest::Client,
    timeout: Duration,
    fallback: LocalStrategy,
}

#[derive(Serialize)]
struct RecommendRequest<'a> {
    context: &'a RecommendContext,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecommendResponse {
    task_id: String,
    duration_minutes: u32,
    #[serde(default)]
    reason: Option<String>,
    #[serde(default)]
    prefer_low_cognitive_load: Option<bool>,
}

impl From<RecommendResponse> for TimeBoxRecommendation {
    fn from(response: RecommendResponse) -> Self {
        Self {
            task_id: response.task_id,
            duration_minutes: response.duration_minutes,
            reason: response.reason,
            prefer_low_cognitive_load: response.prefer_low_cognitive_load,
        }
    }
}

impl BackendStrategy {
    pub fn new(base: Url, timeout: Duration) -> Self {
        Self {
            base,
            client: reqwest::Client::new(),
            timeout,
            fallback: LocalStrategy::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/api/recommend", self.base.as_str().trim_end_matches('/'))
    }

    async fn request(&self, context: &RecommendContext) -> Result<TimeBoxRecommendation, RecommendError> {
        let payload = RecommendRequest { context };
        let response = tokio::time::timeout(self.timeout, async {
            self.client
                .post(self.endpoint())
                .json(&payload)
                .send()
                .await?
                .error_for_status()?
                .json::<RecommendResponse>()
                .await
        })
        .await??;
        Ok(response.into())
    }
}

#[async_trait]
impl RecommendStrategy for BackendStrategy {
    async fn recommend(&self, context: &RecommendContext) -> Result<TimeBoxRecommendation, RecommendError> {
        match self.request(context).await {
            Ok(recommendation) => {
                debug!(task_id = %recommendation.task_id, "remote recommendation accepted");
                Ok(recommendation)
            }
            Err(err) => {
                warn!(error = %err, "remote recommendation failed, falling back to local strategy");
                Ok(self.fallback.evaluate(context))
            }
        }
    }
}
