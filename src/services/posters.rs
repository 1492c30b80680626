use std::{sync::Arc, time::Duration};

use tokio::sync::Semaphore;

use crate::{
    models::{Recommendation, ScoredTitle},
    services::providers::PosterProvider,
};

/// Limits applied to poster lookups for one request
#[derive(Debug, Clone, Copy)]
pub struct PosterSettings {
    /// Upper bound on a single title's lookup
    ///
    /// The clock starts once the lookup holds a concurrency permit, so time
    /// spent queued is not counted. A whole request can therefore take up to
    /// `ceil(titles / concurrency) * timeout`.
    pub timeout: Duration,
    /// Maximum lookups in flight at once
    pub concurrency: usize,
}

/// Attaches a poster URL to each ranked title
///
/// Each title is looked up in its own task with its own timeout. A lookup
/// that errors, times out or panics leaves that title without a poster and
/// never affects the others. Output order matches input order.
pub async fn enrich_with_posters(
    provider: Arc<dyn PosterProvider>,
    titles: Vec<ScoredTitle>,
    settings: PosterSettings,
) -> Vec<Recommendation> {
    let permits = Arc::new(Semaphore::new(settings.concurrency.max(1)));

    let tasks: Vec<_> = titles
        .iter()
        .map(|scored| {
            let provider = provider.clone();
            let permits = permits.clone();
            let title = scored.title.clone();
            tokio::spawn(async move {
                let _permit = permits.acquire_owned().await.ok()?;
                match tokio::time::timeout(settings.timeout, provider.resolve_poster_url(&title))
                    .await
                {
                    Ok(Ok(poster)) => poster,
                    Ok(Err(e)) => {
                        tracing::warn!(title = %title, error = %e, "Poster lookup failed");
                        None
                    }
                    Err(_) => {
                        tracing::warn!(
                            title = %title,
                            timeout_ms = settings.timeout.as_millis() as u64,
                            "Poster lookup timed out"
                        );
                        None
                    }
                }
            })
        })
        .collect();

    let mut recommendations = Vec::with_capacity(titles.len());
    let mut missing = 0;

    for (scored, task) in titles.into_iter().zip(tasks) {
        let poster_url = match task.await {
            Ok(poster) => poster,
            Err(e) => {
                tracing::error!(title = %scored.title, error = %e, "Poster task join error");
                None
            }
        };

        if poster_url.is_none() {
            missing += 1;
        }

        recommendations.push(Recommendation {
            title: scored.title,
            score: scored.score,
            poster_url,
        });
    }

    if missing > 0 {
        tracing::debug!(
            total = recommendations.len(),
            missing,
            "Recommendations enriched with partial posters"
        );
    }

    recommendations
}

/// Recommendations without posters, for callers that skip enrichment
pub fn without_posters(titles: Vec<ScoredTitle>) -> Vec<Recommendation> {
    titles
        .into_iter()
        .map(|scored| Recommendation {
            title: scored.title,
            score: scored.score,
            poster_url: None,
        })
        .collect()
}
