//! Remote reference-corpus adapter.

mod disk_cache;
mod fetch;
mod listing;
mod refpage;

pub use listing::{default_index, parse_listing, IndexedObject, ObjectIndex};

use std::sync::RwLock;
use std::time::Duration;

use tracing::{debug, info, warn};

use lore_core::config::RemoteDocsConfig;
use lore_core::constants::MAX_REMOTE_RESULTS;
use lore_core::errors::SourceResult;
use lore_core::models::RawDoc;
use lore_core::traits::ReferenceSource;

use disk_cache::DiskCache;
use fetch::Fetcher;

const INDEX_KEY: &str = "object_index";

/// Relevance above which the full reference page is fetched for a hit.
const FULL_DOC_RELEVANCE: f64 = 0.5;

/// The official reference corpus, reached over HTTP.
///
/// Holds an in-memory object index (from the consolidated listing, the
/// disk cache, or the built-in fallback) and fetches full reference pages
/// only for strong matches.
pub struct RemoteDocsSource {
    config: RemoteDocsConfig,
    fetcher: Fetcher,
    cache: DiskCache,
    index: RwLock<ObjectIndex>,
}

impl RemoteDocsSource {
    pub fn new(config: RemoteDocsConfig) -> SourceResult<Self> {
        let fetcher = Fetcher::new(&config)?;
        let cache = DiskCache::new(
            config.cache_dir.clone(),
            Duration::from_secs(config.cache_duration_secs),
        );
        Ok(Self {
            config,
            fetcher,
            cache,
            index: RwLock::new(ObjectIndex::new()),
        })
    }

    fn load_index(&self) -> ObjectIndex {
        if let Some(cached) = self.cache.get(INDEX_KEY) {
            if let Ok(index) = serde_json::from_value::<ObjectIndex>(cached) {
                if !index.is_empty() {
                    debug!(objects = index.len(), "object index loaded from disk cache");
                    return index;
                }
            }
        }

        if let Some(path) = &self.config.listing_path {
            match std::fs::read_to_string(path) {
                Ok(content) => {
                    let index = parse_listing(&content);
                    if !index.is_empty() {
                        return index;
                    }
                    warn!(path = %path.display(), "listing yielded no objects, using built-in index");
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "listing unavailable, using built-in index");
                }
            }
        }

        default_index(&self.config.base_url)
    }

    fn set_index(&self, index: ObjectIndex) {
        let mut guard = self.index.write().unwrap_or_else(|e| e.into_inner());
        *guard = index;
    }

    /// Score an indexed object against the query. Name match dominates,
    /// then description, then tags.
    fn score(name: &str, info: &IndexedObject, query_lower: &str) -> f64 {
        let mut relevance = 0.0;
        if name.to_lowercase().contains(query_lower) {
            relevance += 0.5;
        }
        if info.description.to_lowercase().contains(query_lower) {
            relevance += 0.3;
        }
        for tag in &info.tags {
            if tag.to_lowercase().contains(query_lower) {
                relevance += 0.2;
            }
        }
        relevance
    }

    fn index_only_doc(name: &str, info: &IndexedObject, relevance: f64) -> RawDoc {
        RawDoc {
            object_name: name.to_string(),
            description: info.description.clone(),
            category: info.category.clone(),
            tags: info.tags.clone(),
            urls: info.urls.clone(),
            relevance,
            ..RawDoc::default()
        }
    }

    /// Fetch and parse the full reference page for an object, consulting
    /// the disk cache first. `None` when the page cannot be retrieved.
    async fn object_doc(
        &self,
        name: &str,
        info: &IndexedObject,
        relevance: f64,
    ) -> Option<RawDoc> {
        let cache_key = format!("objects/{name}");
        if let Some(cached) = self.cache.get(&cache_key) {
            if let Ok(doc) = serde_json::from_value::<RawDoc>(cached) {
                return Some(RawDoc { relevance, ..doc });
            }
        }

        let url = info
            .urls
            .first()
            .cloned()
            .unwrap_or_else(|| {
                format!(
                    "{}/refpages/{}",
                    self.config.base_url,
                    name.replace(' ', "%20")
                )
            });

        let html = match self.fetcher.fetch(&url).await {
            Ok(Some(html)) => html,
            Ok(None) => return None,
            Err(e) => {
                warn!(object = name, error = %e, "reference page fetch failed");
                return None;
            }
        };

        let page = refpage::parse(&html);
        let doc = RawDoc {
            object_name: name.to_string(),
            description: if page.description.is_empty() {
                info.description.clone()
            } else {
                page.description
            },
            category: info.category.clone(),
            tags: info.tags.clone(),
            urls: info.urls.clone(),
            relevance,
            inlets: page.inlets,
            outlets: page.outlets,
            related_objects: page.related_objects,
        };

        if let Ok(value) = serde_json::to_value(&doc) {
            self.cache.put(&cache_key, &value);
        }
        Some(doc)
    }
}

impl ReferenceSource for RemoteDocsSource {
    async fn initialize(&self) -> SourceResult<()> {
        let index = self.load_index();
        info!(objects = index.len(), "remote object index ready");

        if let Ok(value) = serde_json::to_value(&index) {
            self.cache.put(INDEX_KEY, &value);
        }
        self.set_index(index);
        Ok(())
    }

    async fn search(&self, query: &str) -> SourceResult<Vec<RawDoc>> {
        let query_lower = query.to_lowercase();

        // Score under the read lock, fetch full pages after releasing it.
        let mut scored: Vec<(String, IndexedObject, f64)> = {
            let index = self.index.read().unwrap_or_else(|e| e.into_inner());
            index
                .iter()
                .filter_map(|(name, info)| {
                    let relevance = Self::score(name, info, &query_lower);
                    (relevance > 0.0).then(|| (name.clone(), info.clone(), relevance))
                })
                .collect()
        };

        scored.sort_by(|a, b| b.2.partial_cmp(&a.2).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(MAX_REMOTE_RESULTS);

        let mut docs = Vec::with_capacity(scored.len());
        for (name, info, relevance) in scored {
            if relevance > FULL_DOC_RELEVANCE {
                if let Some(doc) = self.object_doc(&name, &info, relevance).await {
                    docs.push(doc);
                    continue;
                }
            }
            docs.push(Self::index_only_doc(&name, &info, relevance));
        }

        debug!(query, hits = docs.len(), "remote corpus searched");
        Ok(docs)
    }

    async fn close(&self) {
        debug!("remote docs source closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source_with_default_index() -> RemoteDocsSource {
        let dir = tempfile::tempdir().unwrap();
        let config = RemoteDocsConfig {
            cache_dir: dir.into_path(),
            ..RemoteDocsConfig::default()
        };
        let source = RemoteDocsSource::new(config).unwrap();
        source.set_index(default_index("https://example.test/max8"));
        source
    }

    #[tokio::test]
    async fn name_match_scores_highest() {
        let source = source_with_default_index();
        let docs = source.search("pattrhub").await.unwrap();
        assert_eq!(docs[0].object_name, "pattrhub");
    }

    #[tokio::test]
    async fn tag_only_match_is_index_only() {
        let source = source_with_default_index();
        // "oscillator" appears only in cycle~'s tags.
        let docs = source.search("oscillator").await.unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].object_name, "cycle~");
        assert!(docs[0].inlets.is_empty());
    }

    #[tokio::test]
    async fn no_match_yields_empty() {
        let source = source_with_default_index();
        let docs = source.search("zzz-no-such-object").await.unwrap();
        assert!(docs.is_empty());
    }

    #[tokio::test]
    async fn results_are_capped() {
        let source = source_with_default_index();
        let mut index = ObjectIndex::new();
        for i in 0..40 {
            index.insert(
                format!("metro{i}"),
                IndexedObject {
                    description: String::new(),
                    category: "timing".to_string(),
                    tags: vec![],
                    urls: vec![],
                },
            );
        }
        source.set_index(index);

        let docs = source.search("metro").await.unwrap();
        assert_eq!(docs.len(), MAX_REMOTE_RESULTS);
    }
}
