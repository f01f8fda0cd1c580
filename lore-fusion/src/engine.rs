//! FusionEngine: orchestrates the full query and enrichment pipeline.
//!
//! Query path: cache check → concurrent three-way fan-out with per-source
//! failure isolation → normalize → rank → suggestions → cache insert →
//! fire-and-forget learning record.
//!
//! Enrichment path: validate discovery → merge-or-create pattern →
//! threshold-gated persistence to the local repository → queue on
//! failure or low confidence.

use std::sync::Mutex;
use std::time::Instant;

use chrono::Utc;
use tracing::{debug, error, info, warn};

use lore_core::config::FusionConfig;
use lore_core::errors::{FusionError, LoreResult};
use lore_core::knowledge::{KnowledgeEntry, SearchResult};
use lore_core::models::{QueryContext, QueryRecord};
use lore_core::traits::{AnnotatedRepo, PatternExtractor, ReferenceSource};
use lore_core::KnowledgeSource;

use crate::analyze::DocumentAnalysis;
use crate::discovery;
use crate::learn::LearningHook;
use crate::normalize;
use crate::pattern_store::PatternStore;
use crate::rank;
use crate::result_cache::ResultCache;
use crate::suggest;

/// The central engine fusing the three knowledge sources.
///
/// Safe to share across concurrent callers: the cache and pattern store
/// are concurrent structures, and the discovery queue sits behind a
/// mutex. Construction requires a running tokio runtime (the learning
/// worker is spawned eagerly).
pub struct FusionEngine<D, R> {
    config: FusionConfig,
    docs: D,
    repo: R,
    patterns: PatternStore,
    cache: ResultCache,
    discovery_queue: Mutex<Vec<serde_json::Value>>,
    learning: LearningHook,
}

impl<D: ReferenceSource, R: AnnotatedRepo> FusionEngine<D, R> {
    pub fn new(config: FusionConfig, docs: D, repo: R) -> Self {
        let cache = ResultCache::new(
            config.cache_capacity,
            std::time::Duration::from_secs(config.cache_duration_secs),
        );
        let learning = LearningHook::spawn(config.learning_queue_size, config.query_log_capacity);

        info!("fusion engine initialized");
        Self {
            config,
            docs,
            repo,
            patterns: PatternStore::new(),
            cache,
            discovery_queue: Mutex::new(Vec::new()),
            learning,
        }
    }

    /// Initialize both source adapters concurrently.
    pub async fn initialize(&self) -> LoreResult<()> {
        let (docs_ready, repo_ready) = tokio::join!(self.docs.initialize(), self.repo.initialize());
        docs_ready?;
        repo_ready?;
        info!("all knowledge sources initialized");
        Ok(())
    }

    /// Shut down sources and background work.
    pub async fn close(&self) {
        self.docs.close().await;
        self.repo.close().await;
        self.learning.shutdown();
    }

    /// Fused query across all three sources.
    ///
    /// A failing source contributes nothing and is left out of
    /// `sources_queried`; the query itself only fails on empty input.
    pub async fn query(
        &self,
        query: &str,
        context: Option<&QueryContext>,
    ) -> LoreResult<SearchResult> {
        if query.is_empty() {
            return Err(FusionError::EmptyQuery.into());
        }

        let started = Instant::now();

        if let Some(cached) = self.cache.get(query) {
            debug!(query, "cache hit");
            return Ok((*cached).clone());
        }

        let (docs_result, repo_result, pattern_hits) = tokio::join!(
            self.docs.search(query),
            self.repo.search(query, context),
            async { self.patterns.matches(query) },
        );

        let now = Utc::now();
        let mut entries: Vec<KnowledgeEntry> = Vec::new();
        let mut sources_queried: Vec<String> = Vec::new();

        match docs_result {
            Ok(docs) => {
                sources_queried.push(KnowledgeSource::RemoteDocs.as_str().to_string());
                entries.extend(docs.into_iter().map(|d| normalize::from_raw_doc(d, now)));
            }
            Err(e) => error!(query, error = %e, "remote docs search failed"),
        }

        match repo_result {
            Ok(hits) => {
                sources_queried.push(KnowledgeSource::LocalRepository.as_str().to_string());
                entries.extend(hits.into_iter().map(|h| normalize::from_repo_hit(h, now)));
            }
            Err(e) => error!(query, error = %e, "local repository search failed"),
        }

        // The pattern store is in-process and cannot fail.
        sources_queried.push(KnowledgeSource::DiscoveredPattern.as_str().to_string());
        entries.extend(
            pattern_hits
                .iter()
                .map(|(pattern, relevance)| normalize::from_pattern(pattern, *relevance)),
        );

        rank::rank(&mut entries, context, now);
        let suggestions = suggest::suggestions(&entries, query);

        let result = SearchResult {
            query: query.to_string(),
            total_results: entries.len(),
            entries,
            sources_queried,
            query_time_ms: started.elapsed().as_secs_f64() * 1000.0,
            suggestions,
        };

        self.cache.insert(query.to_string(), result.clone());

        if self.config.auto_enhance_knowledge {
            self.learning.record(QueryRecord::new(
                query,
                result.total_results,
                result.sources_queried.clone(),
                result.query_time_ms,
            ));
        }

        Ok(result)
    }

    /// Feed a new discovery into the knowledge base.
    ///
    /// Returns `false` only for structurally invalid payloads (or an
    /// unexpected internal error); a persistence failure still counts as
    /// accepted, with the raw discovery queued for future validation.
    pub async fn enhance_knowledge(&self, payload: &serde_json::Value) -> bool {
        match self.enhance_inner(payload).await {
            Ok(accepted) => accepted,
            Err(e) => {
                error!(error = %e, "discovery enhancement failed");
                false
            }
        }
    }

    async fn enhance_inner(&self, payload: &serde_json::Value) -> LoreResult<bool> {
        let parsed = match discovery::parse_discovery(payload) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(error = %e, "discovery validation failed");
                return Ok(false);
            }
        };

        // Similarity rule: case-insensitive exact name match. A duplicate
        // merges instead of creating a new entity.
        let pattern = match self
            .patterns
            .merge_examples(&parsed.name, parsed.examples.clone())
        {
            Some(merged) => {
                info!(pattern = %merged.name, "merged with existing pattern");
                merged
            }
            None => {
                let fresh = discovery::build_pattern(&parsed);
                self.patterns.insert(fresh.clone());
                fresh
            }
        };

        if pattern.confidence >= self.config.pattern_confidence_threshold {
            match self.repo.add_pattern(&pattern).await {
                Ok(true) => {
                    self.patterns.set_validated(&pattern.name);
                    info!(pattern = %pattern.name, "pattern persisted to knowledge base");
                    return Ok(true);
                }
                Ok(false) => {
                    warn!(pattern = %pattern.name, "pattern persistence declined");
                }
                Err(e) => {
                    error!(pattern = %pattern.name, error = %e, "pattern persistence failed");
                }
            }
        }

        // Below threshold, or persistence failed: park the raw discovery
        // for future validation. The pattern stays queryable either way.
        self.queue_discovery(payload.clone());
        Ok(true)
    }

    fn queue_discovery(&self, payload: serde_json::Value) {
        if let Ok(mut queue) = self.discovery_queue.lock() {
            queue.push(payload);
        }
    }

    /// Analyze a document with the given extractor, splitting candidates
    /// into already-known patterns and potential discoveries.
    pub fn analyze_document(
        &self,
        document: &serde_json::Value,
        extractor: &dyn PatternExtractor,
    ) -> DocumentAnalysis {
        let mut analysis = DocumentAnalysis::default();

        for candidate in extractor.extract_patterns(document) {
            match self.patterns.covers(&candidate.objects) {
                Some(name) => analysis.known_patterns.push(name),
                None => analysis.novel_candidates.push(candidate),
            }
        }

        analysis
    }

    /// The pattern store, for inspection.
    pub fn patterns(&self) -> &PatternStore {
        &self.patterns
    }

    /// Number of discoveries parked for future validation.
    pub fn queued_discoveries(&self) -> usize {
        self.discovery_queue
            .lock()
            .map(|q| q.len())
            .unwrap_or_default()
    }

    /// Snapshot of the background query log.
    pub fn query_log(&self) -> Vec<QueryRecord> {
        self.learning.log_snapshot()
    }
}
