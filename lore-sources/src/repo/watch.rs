//! Background repository watch loop.
//!
//! Polls the upstream remote on an interval; when HEAD moves, the whole
//! index is rebuilt (a blocking, non-incremental operation run off the
//! async worker). Errors never end the loop: log, back off, continue.

use std::path::Path;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info};

use lore_core::errors::{SourceError, SourceResult};

use super::indexer;
use super::RepoInner;

/// Current HEAD commit id, fetching origin first when one exists.
pub(crate) fn poll_upstream(repo_root: &Path) -> SourceResult<String> {
    let repo = git2::Repository::open(repo_root).map_err(|e| SourceError::Git {
        reason: e.to_string(),
    })?;

    if let Ok(mut remote) = repo.find_remote("origin") {
        if let Err(e) = remote.fetch(&[] as &[&str], None, None) {
            debug!(error = %e, "origin fetch failed, comparing local HEAD only");
        }
    }

    head_commit_id(&repo)
}

pub(crate) fn head_commit_id(repo: &git2::Repository) -> SourceResult<String> {
    let head = repo
        .head()
        .and_then(|h| h.peel_to_commit())
        .map_err(|e| SourceError::Git {
            reason: e.to_string(),
        })?;
    Ok(head.id().to_string())
}

pub(crate) async fn watch_loop(inner: Arc<RepoInner>) {
    let interval = Duration::from_secs(inner.config.update_interval_secs.max(1));
    let backoff = Duration::from_secs(inner.config.error_backoff_secs);

    loop {
        tokio::time::sleep(interval).await;
        if inner.stop.load(Ordering::Relaxed) {
            break;
        }
        if !inner.config.auto_update {
            continue;
        }

        let repo_path = inner.config.repo_path.clone();
        let polled = tokio::task::spawn_blocking(move || poll_upstream(&repo_path)).await;

        match polled {
            Ok(Ok(head)) => {
                let changed = {
                    let mut last = inner.lock_last_commit();
                    if last.as_deref() != Some(head.as_str()) {
                        *last = Some(head);
                        true
                    } else {
                        false
                    }
                };

                if changed {
                    info!("repository updated, rebuilding index");
                    let repo_path = inner.config.repo_path.clone();
                    match tokio::task::spawn_blocking(move || indexer::build_index(&repo_path))
                        .await
                    {
                        Ok(index) => inner.replace_index(index),
                        Err(e) => error!(error = %e, "index rebuild task failed"),
                    }
                }
            }
            Ok(Err(e)) => {
                error!(error = %e, "repository poll failed");
                tokio::time::sleep(backoff).await;
            }
            Err(e) => {
                error!(error = %e, "repository poll task failed");
                tokio::time::sleep(backoff).await;
            }
        }
    }

    debug!("repository watch loop stopped");
}
