use std::path::Path;

use anyhow::Context;
use reqwest::Client as HttpClient;

/// Makes sure a dataset artifact exists on disk before loading
///
/// Files already present are reused. A missing file is downloaded from
/// `source_url` when one is configured, otherwise this fails.
pub async fn ensure_artifact(
    http_client: &HttpClient,
    path: &Path,
    source_url: Option<&str>,
) -> anyhow::Result<()> {
    if tokio::fs::try_exists(path).await.unwrap_or(false) {
        tracing::debug!(path = %path.display(), "Artifact present, skipping download");
        return Ok(());
    }

    let Some(source_url) = source_url else {
        anyhow::bail!(
            "Artifact {} is missing and no download URL is configured",
            path.display()
        );
    };

    let url = direct_download_url(source_url);
    tracing::info!(path = %path.display(), url = %url, "Downloading artifact");

    let response = http_client
        .get(&url)
        .send()
        .await
        .with_context(|| format!("Failed to download {}", url))?;

    if !response.status().is_success() {
        anyhow::bail!("Download of {} returned status {}", url, response.status());
    }

    // Drive serves an HTML interstitial instead of the file when it can't virus-scan it
    let is_html = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.trim_start().starts_with("text/html"));
    if is_html {
        anyhow::bail!(
            "Download of {} returned an HTML page instead of the artifact; \
             make the file publicly downloadable or host it elsewhere",
            url
        );
    }

    let bytes = response
        .bytes()
        .await
        .with_context(|| format!("Failed to read body of {}", url))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    // Only a complete download ever lands at `path`
    let partial = path.with_extension("part");
    tokio::fs::write(&partial, &bytes)
        .await
        .with_context(|| format!("Failed to write {}", partial.display()))?;
    tokio::fs::rename(&partial, path)
        .await
        .with_context(|| format!("Failed to move {} into place", partial.display()))?;

    tracing::info!(path = %path.display(), bytes = bytes.len(), "Artifact downloaded");

    Ok(())
}

/// Rewrites Google Drive share links to their direct-download form
///
/// `https://drive.google.com/file/d/<id>/view?usp=sharing` becomes
/// `https://drive.google.com/uc?export=download&id=<id>`. Other URLs pass through.
pub fn direct_download_url(url: &str) -> String {
    if !url.contains("drive.google.com") {
        return url.to_string();
    }

    url.split_once("/d/")
        .and_then(|(_, rest)| rest.split(['/', '?']).next())
        .filter(|id| !id.is_empty())
        .map(|id| format!("https://drive.google.com/uc?export=download&id={}", id))
        .unwrap_or_else(|| url.to_string())
}
