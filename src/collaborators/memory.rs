//! In-memory collaborator implementations.
//!
//! Self-contained implementations of the catalog store and search index,
//! backing tests and embedders that want a directory without external
//! services. The catalog keeps entries in a vector behind an `RwLock`; the
//! search index fuzzy-matches over a shared catalog using tokenized queries.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

use crate::domain::entry::{AppEntry, EntryPage};
use crate::domain::error::{DirectoryError, Result};
use crate::view::resolver::SortOrder;

use super::{CatalogStore, SearchIndex};

/// In-memory catalog store.
///
/// Entries are held unsorted; each `list` call sorts a snapshot by the
/// requested order. `create_or_update` is keyed on the manifest URL, matching
/// the submission flow's upsert semantics.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    entries: RwLock<Vec<AppEntry>>,
    next_id: AtomicU64,
}

impl InMemoryCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog pre-populated with `entries`.
    #[must_use]
    pub fn with_entries(entries: Vec<AppEntry>) -> Self {
        let next_id = AtomicU64::new(entries.len() as u64 + 1);
        Self {
            entries: RwLock::new(entries),
            next_id,
        }
    }

    fn snapshot(&self) -> Result<Vec<AppEntry>> {
        self.entries
            .read()
            .map(|guard| guard.clone())
            .map_err(|_| DirectoryError::Catalog("catalog lock poisoned".to_string()))
    }

    fn sorted(&self, sort: SortOrder) -> Result<Vec<AppEntry>> {
        let mut entries = self.snapshot()?;
        match sort {
            SortOrder::Newest => entries.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            // Unaudited entries sort last.
            SortOrder::Score => entries.sort_by(|a, b| b.score.cmp(&a.score)),
        }
        Ok(entries)
    }
}

#[async_trait::async_trait]
impl CatalogStore for InMemoryCatalog {
    async fn list(&self, start: usize, limit: usize, sort: SortOrder) -> Result<EntryPage> {
        let entries = self.sorted(sort)?;
        let total = entries.len();
        let window: Vec<AppEntry> = entries.into_iter().skip(start).take(limit).collect();

        Ok(EntryPage {
            has_more: start + window.len() < total,
            entries: window,
        })
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.snapshot()?.len())
    }

    async fn find(&self, id: &str) -> Result<AppEntry> {
        self.snapshot()?
            .into_iter()
            .find(|entry| entry.id == id)
            .ok_or_else(|| DirectoryError::NotFound(id.to_string()))
    }

    async fn create_or_update(&self, mut entry: AppEntry) -> Result<AppEntry> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| DirectoryError::Catalog("catalog lock poisoned".to_string()))?;

        if let Some(existing) = entries
            .iter_mut()
            .find(|e| e.manifest_url == entry.manifest_url)
        {
            entry.id = existing.id.clone();
            *existing = entry.clone();
        } else {
            entry.id = self.next_id.fetch_add(1, Ordering::Relaxed).to_string();
            entries.push(entry.clone());
        }

        Ok(entry)
    }
}

/// In-memory fuzzy search index over a shared catalog.
///
/// Queries are split into whitespace tokens; an entry matches when every
/// token fuzzy-matches its name or description.
pub struct InMemorySearchIndex {
    catalog: Arc<InMemoryCatalog>,
    matcher: SkimMatcherV2,
}

impl InMemorySearchIndex {
    /// Creates an index over the given catalog.
    #[must_use]
    pub fn new(catalog: Arc<InMemoryCatalog>) -> Self {
        Self {
            catalog,
            matcher: SkimMatcherV2::default(),
        }
    }
}

#[async_trait::async_trait]
impl SearchIndex for InMemorySearchIndex {
    async fn search(&self, query: &str) -> Result<EntryPage> {
        let tokens: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();
        let snapshot = self
            .catalog
            .entries
            .read()
            .map(|guard| guard.clone())
            .map_err(|_| DirectoryError::Search("search index lock poisoned".to_string()))?;
        let entries: Vec<AppEntry> = snapshot
            .into_iter()
            .filter(|entry| {
                let haystack = format!("{} {}", entry.name, entry.description).to_lowercase();
                tokens
                    .iter()
                    .all(|token| self.matcher.fuzzy_match(&haystack, token).is_some())
            })
            .collect();

        tracing::debug!(query, matches = entries.len(), "search index queried");

        Ok(EntryPage {
            entries,
            has_more: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn entry(id: &str, name: &str, day: u32, score: Option<u32>) -> AppEntry {
        AppEntry {
            id: id.to_string(),
            name: name.to_string(),
            description: format!("{name} description"),
            manifest_url: format!("https://{id}.example.com/manifest.json"),
            created_at: Utc.with_ymd_and_hms(2024, 3, day, 0, 0, 0).unwrap(),
            score,
            submitted_by: None,
        }
    }

    fn seeded_catalog() -> InMemoryCatalog {
        InMemoryCatalog::with_entries(vec![
            entry("a", "Alpha Notes", 1, Some(40)),
            entry("b", "Beta Mail", 5, Some(90)),
            entry("c", "Gamma Maps", 3, None),
        ])
    }

    #[tokio::test]
    async fn newest_sort_puts_latest_first() {
        let page = seeded_catalog().list(0, 10, SortOrder::Newest).await.unwrap();
        let ids: Vec<&str> = page.entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
        assert!(!page.has_more);
    }

    #[tokio::test]
    async fn score_sort_puts_unaudited_last() {
        let page = seeded_catalog().list(0, 10, SortOrder::Score).await.unwrap();
        let ids: Vec<&str> = page.entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[tokio::test]
    async fn windowing_reports_has_more() {
        let catalog = seeded_catalog();
        let first = catalog.list(0, 2, SortOrder::Newest).await.unwrap();
        assert_eq!(first.entries.len(), 2);
        assert!(first.has_more);

        let last = catalog.list(2, 2, SortOrder::Newest).await.unwrap();
        assert_eq!(last.entries.len(), 1);
        assert!(!last.has_more);
    }

    #[tokio::test]
    async fn find_distinguishes_missing_entries() {
        let catalog = seeded_catalog();
        assert!(catalog.find("b").await.is_ok());
        assert!(matches!(
            catalog.find("nope").await,
            Err(DirectoryError::NotFound(id)) if id == "nope"
        ));
    }

    #[tokio::test]
    async fn create_or_update_upserts_on_manifest_url() {
        let catalog = seeded_catalog();
        let mut updated = entry("ignored", "Alpha Notes v2", 9, Some(55));
        updated.manifest_url = "https://a.example.com/manifest.json".to_string();

        let stored = catalog.create_or_update(updated).await.unwrap();
        assert_eq!(stored.id, "a");
        assert_eq!(catalog.count().await.unwrap(), 3);

        let fresh = catalog.create_or_update(entry("x", "Delta Chat", 9, None)).await.unwrap();
        assert_ne!(fresh.id, "x");
        assert_eq!(catalog.count().await.unwrap(), 4);
    }

    #[tokio::test]
    async fn search_matches_all_tokens() {
        let index = InMemorySearchIndex::new(Arc::new(seeded_catalog()));
        let page = index.search("beta mail").await.unwrap();
        assert_eq!(page.entries.len(), 1);
        assert_eq!(page.entries[0].id, "b");

        let none = index.search("beta gamma").await.unwrap();
        assert!(none.entries.is_empty());
    }

    #[tokio::test]
    async fn poisoned_catalog_surfaces_a_search_error() {
        let catalog = Arc::new(InMemoryCatalog::new());
        let index = InMemorySearchIndex::new(Arc::clone(&catalog));

        let poisoner = Arc::clone(&catalog);
        std::thread::spawn(move || {
            let _guard = poisoner.entries.write().unwrap();
            panic!("poisoning the catalog lock");
        })
        .join()
        .unwrap_err();

        assert!(matches!(
            index.search("anything").await,
            Err(DirectoryError::Search(_))
        ));
    }
}
