//! Local annotated-repository adapter.

mod indexer;
mod persist;
mod relevance;
mod watch;

pub use indexer::{build_index, index_file, Category, IndexEntry, KnowledgeIndex};
pub use persist::render_markdown;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, RwLock};

use chrono::Utc;
use tracing::{debug, error, info};

use lore_core::config::LocalRepoConfig;
use lore_core::constants::MAX_REPO_RESULTS;
use lore_core::errors::{SourceError, SourceResult};
use lore_core::knowledge::Pattern;
use lore_core::models::{QueryContext, RepoHit};
use lore_core::traits::AnnotatedRepo;

/// Shared state between the adapter and its watch loop.
pub(crate) struct RepoInner {
    pub(crate) config: LocalRepoConfig,
    index: RwLock<KnowledgeIndex>,
    last_commit: Mutex<Option<String>>,
    pub(crate) stop: AtomicBool,
}

impl RepoInner {
    pub(crate) fn lock_last_commit(&self) -> MutexGuard<'_, Option<String>> {
        self.last_commit.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub(crate) fn replace_index(&self, index: KnowledgeIndex) {
        let mut guard = self.index.write().unwrap_or_else(|e| e.into_inner());
        *guard = index;
    }

    fn with_index<T>(&self, f: impl FnOnce(&KnowledgeIndex) -> T) -> T {
        let guard = self.index.read().unwrap_or_else(|e| e.into_inner());
        f(&guard)
    }
}

/// The locally maintained annotated repository.
///
/// The searchable index lives in memory and is rebuilt by the background
/// watch loop when upstream HEAD moves. New patterns are persisted as
/// markdown documents and committed.
pub struct LocalRepoSource {
    inner: Arc<RepoInner>,
    watch: Mutex<Option<tokio::task::JoinHandle<()>>>,
}

impl LocalRepoSource {
    pub fn new(config: LocalRepoConfig) -> Self {
        Self {
            inner: Arc::new(RepoInner {
                config,
                index: RwLock::new(KnowledgeIndex::default()),
                last_commit: Mutex::new(None),
                stop: AtomicBool::new(false),
            }),
            watch: Mutex::new(None),
        }
    }

    /// Number of indexed entries. Mostly useful in tests and diagnostics.
    pub fn index_len(&self) -> usize {
        self.inner.with_index(KnowledgeIndex::len)
    }

    fn hit_from(entry: &IndexEntry, score: f64) -> RepoHit {
        let mut metadata = std::collections::HashMap::new();
        metadata.insert(
            "category".to_string(),
            serde_json::Value::String(entry.category.as_str().to_string()),
        );
        metadata.insert(
            "modified".to_string(),
            serde_json::Value::String(entry.modified.to_rfc3339()),
        );
        if !entry.patterns.is_empty() {
            metadata.insert("patterns".to_string(), serde_json::json!(entry.patterns));
        }
        if !entry.functions.is_empty() {
            metadata.insert("functions".to_string(), serde_json::json!(entry.functions));
        }
        if entry.code_example_count > 0 {
            metadata.insert(
                "code_examples".to_string(),
                serde_json::json!(entry.code_example_count),
            );
        }
        if let Some(preview) = &entry.preview {
            metadata.insert(
                "preview".to_string(),
                serde_json::Value::String(preview.clone()),
            );
        }

        RepoHit {
            file_path: entry.file_path.clone(),
            kind: entry.kind,
            name: entry.name.clone(),
            description: entry.description.clone(),
            tags: entry.tags.clone(),
            relevance: score,
            object_name: None,
            pattern_name: (entry.category == Category::Patterns).then(|| entry.name.clone()),
            object_counts: entry.object_counts.clone(),
            metadata,
        }
    }
}

impl AnnotatedRepo for LocalRepoSource {
    async fn initialize(&self) -> SourceResult<()> {
        let repo_path = self.inner.config.repo_path.clone();

        // An unopenable repository is an unrecoverable setup failure.
        let head = tokio::task::spawn_blocking({
            let repo_path = repo_path.clone();
            move || -> SourceResult<String> {
                let repo = git2::Repository::open(&repo_path).map_err(|_| {
                    SourceError::RepoUnavailable {
                        path: repo_path.display().to_string(),
                    }
                })?;
                watch::head_commit_id(&repo)
            }
        })
        .await
        .map_err(|e| SourceError::Git {
            reason: e.to_string(),
        })??;

        *self.inner.lock_last_commit() = Some(head);

        let index = tokio::task::spawn_blocking({
            let repo_path = repo_path.clone();
            move || build_index(&repo_path)
        })
        .await
        .map_err(|e| SourceError::Io {
            path: repo_path.display().to_string(),
            reason: e.to_string(),
        })?;

        info!(entries = index.len(), "local repository indexed");
        self.inner.replace_index(index);

        if self.inner.config.watch_for_changes {
            let handle = tokio::spawn(watch::watch_loop(Arc::clone(&self.inner)));
            *self.watch.lock().unwrap_or_else(|e| e.into_inner()) = Some(handle);
        }

        Ok(())
    }

    async fn search(
        &self,
        query: &str,
        context: Option<&QueryContext>,
    ) -> SourceResult<Vec<RepoHit>> {
        let query_lower = query.to_lowercase();
        let tokens: Vec<String> = query_lower.split_whitespace().map(String::from).collect();
        let now = Utc::now();
        let min_relevance = self.inner.config.min_relevance;

        let mut hits = self.inner.with_index(|index| {
            index
                .entries
                .iter()
                .filter_map(|entry| {
                    let mut score = relevance::relevance(entry, &query_lower, &tokens, now);
                    if let Some(context) = context {
                        score = relevance::context_boost(entry, score, context);
                    }
                    (score > min_relevance).then(|| Self::hit_from(entry, score))
                })
                .collect::<Vec<_>>()
        });

        hits.sort_by(|a, b| {
            b.relevance
                .partial_cmp(&a.relevance)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        hits.truncate(MAX_REPO_RESULTS);

        debug!(query, hits = hits.len(), "local repository searched");
        Ok(hits)
    }

    async fn add_pattern(&self, pattern: &Pattern) -> SourceResult<bool> {
        let repo_path = self.inner.config.repo_path.clone();
        let pattern = pattern.clone();

        let written = tokio::task::spawn_blocking({
            let repo_path = repo_path.clone();
            move || -> SourceResult<std::path::PathBuf> {
                let rel = persist::write_pattern(&repo_path, &pattern)?;
                persist::commit_pattern(&repo_path, &rel, &pattern)?;
                Ok(rel)
            }
        })
        .await;

        let rel_path = match written {
            Ok(Ok(rel)) => rel,
            Ok(Err(e)) => {
                error!(error = %e, "pattern persistence failed");
                return Ok(false);
            }
            Err(e) => {
                error!(error = %e, "pattern persistence task failed");
                return Ok(false);
            }
        };

        // Make the new document searchable without waiting for a rebuild.
        if let Some(entry) = index_file(&repo_path, &repo_path.join(&rel_path)) {
            let mut guard = self
                .inner
                .index
                .write()
                .unwrap_or_else(|e| e.into_inner());
            guard.entries.push(entry);
        }

        Ok(true)
    }

    async fn close(&self) {
        self.inner.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.watch.lock().unwrap_or_else(|e| e.into_inner()).take() {
            handle.abort();
        }
        debug!("local repository source closed");
    }
}
