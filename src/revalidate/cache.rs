//! Cached content snapshots
//!
//! Each API resource is rendered to JSON once and served from memory until a
//! revalidation evicts it. The next request rebuilds it from the content
//! source.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use super::{DEFAULT_PATH, RevalidateError, Revalidator};
use crate::content::{ContentError, ContentFacade};

/// Content served by the JSON API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentResource {
    SiteSettings,
    HomePage,
    Speakers,
    Team,
    Partners,
    Supporters,
}

impl ContentResource {
    pub const ALL: [ContentResource; 6] = [
        ContentResource::SiteSettings,
        ContentResource::HomePage,
        ContentResource::Speakers,
        ContentResource::Team,
        ContentResource::Partners,
        ContentResource::Supporters,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            ContentResource::SiteSettings => "/api/site-settings",
            ContentResource::HomePage => "/api/home",
            ContentResource::Speakers => "/api/speakers",
            ContentResource::Team => "/api/team",
            ContentResource::Partners => "/api/partners",
            ContentResource::Supporters => "/api/supporters",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.path() == path)
    }
}

pub struct ContentCache {
    content: ContentFacade,
    snapshots: RwLock<Snapshots>,
}

/// Cached entries plus eviction counters. A render only lands in the cache
/// when no eviction touched its path while it ran.
#[derive(Default)]
struct Snapshots {
    entries: HashMap<String, Arc<Value>>,
    /// Bumped by every eviction of the path
    generations: HashMap<String, u64>,
    /// Bumped by every eviction of `/`
    epoch: u64,
}

impl Snapshots {
    fn generation(&self, path: &str) -> (u64, u64) {
        (self.epoch, self.generations.get(path).copied().unwrap_or(0))
    }
}

impl ContentCache {
    pub fn new(content: ContentFacade) -> Self {
        Self {
            content,
            snapshots: RwLock::new(Snapshots::default()),
        }
    }

    pub fn content(&self) -> &ContentFacade {
        &self.content
    }

    /// Snapshot of `resource`, built from the content source on a miss
    ///
    /// A render that overlaps an eviction of its path is returned to the
    /// caller but not cached, so the next read renders again.
    pub async fn get(&self, resource: ContentResource) -> Result<Arc<Value>, ContentError> {
        let path = resource.path();
        let generation = {
            let snapshots = self.snapshots.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(snapshot) = snapshots.entries.get(path) {
                return Ok(Arc::clone(snapshot));
            }
            snapshots.generation(path)
        };

        debug!("Cache miss for {}", path);
        let snapshot = Arc::new(self.render(resource).await?);

        let mut snapshots = self.snapshots.write().unwrap_or_else(PoisonError::into_inner);
        if snapshots.generation(path) == generation {
            snapshots
                .entries
                .insert(path.to_string(), Arc::clone(&snapshot));
        } else {
            debug!("Discarding render of {}, evicted while rendering", path);
        }
        Ok(snapshot)
    }

    /// Render every resource ahead of the first request
    pub async fn warm(&self) -> Result<(), ContentError> {
        for resource in ContentResource::ALL {
            self.get(resource).await?;
        }
        info!("Cached {} content snapshots", self.len());
        Ok(())
    }

    pub fn cached(&self, path: &str) -> Option<Arc<Value>> {
        self.snapshots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .get(path)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.snapshots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop the snapshot for `path`; `/` drops all of them. Returns the number
    /// of snapshots removed.
    pub fn evict(&self, path: &str) -> usize {
        let mut snapshots = self.snapshots.write().unwrap_or_else(PoisonError::into_inner);
        if path == DEFAULT_PATH {
            snapshots.epoch += 1;
            let removed = snapshots.entries.len();
            snapshots.entries.clear();
            removed
        } else {
            *snapshots.generations.entry(path.to_string()).or_default() += 1;
            usize::from(snapshots.entries.remove(path).is_some())
        }
    }

    async fn render(&self, resource: ContentResource) -> Result<Value, ContentError> {
        match resource {
            ContentResource::SiteSettings => to_json(&self.content.site_settings().await?),
            ContentResource::HomePage => to_json(&self.content.home_page().await?),
            ContentResource::Speakers => to_json(&self.content.all_speakers().await?),
            ContentResource::Team => to_json(&self.content.all_team_members().await?),
            ContentResource::Partners => to_json(&self.content.all_partners().await?),
            ContentResource::Supporters => to_json(&self.content.all_supporters().await?),
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<Value, ContentError> {
    serde_json::to_value(value).map_err(|e| ContentError::SerializationError(e.to_string()))
}

#[async_trait]
impl Revalidator for ContentCache {
    async fn revalidate(&self, path: &str) -> Result<(), RevalidateError> {
        let removed = self.evict(path);
        info!("Revalidated {} ({} snapshots evicted)", path, removed);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContentBackend, ContentSource, StaticContentSource};
    use crate::models::{Company, HomePage, Person, SiteSettings};
    use tokio::sync::Notify;

    fn cache() -> ContentCache {
        ContentCache::new(ContentFacade::new(ContentBackend::Static, None).unwrap())
    }

    #[test]
    fn test_resource_paths() {
        for resource in ContentResource::ALL {
            assert_eq!(ContentResource::from_path(resource.path()), Some(resource));
        }
        assert_eq!(ContentResource::from_path("/api/unknown"), None);
    }

    #[tokio::test]
    async fn test_snapshot_reused_until_evicted() {
        let cache = cache();
        let first = cache.get(ContentResource::Speakers).await.unwrap();
        let second = cache.get(ContentResource::Speakers).await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first[0]["id"], "speaker-catherine-gu");

        assert_eq!(cache.evict("/api/speakers"), 1);
        let third = cache.get(ContentResource::Speakers).await.unwrap();
        assert!(!Arc::ptr_eq(&first, &third));
        assert_eq!(first, third);
    }

    #[tokio::test]
    async fn test_root_evicts_everything() {
        let cache = cache();
        cache.warm().await.unwrap();
        assert_eq!(cache.len(), ContentResource::ALL.len());

        cache.revalidate("/").await.unwrap();
        assert!(cache.is_empty());
    }

    /// Holds `all_speakers` open until released
    struct GatedSource {
        inner: StaticContentSource,
        started: Notify,
        release: Notify,
    }

    #[async_trait]
    impl ContentSource for GatedSource {
        fn name(&self) -> &'static str {
            "Gated"
        }

        async fn site_settings(&self) -> Result<SiteSettings, ContentError> {
            ContentSource::site_settings(&self.inner).await
        }

        async fn home_page(&self) -> Result<HomePage, ContentError> {
            ContentSource::home_page(&self.inner).await
        }

        async fn all_speakers(&self) -> Result<Vec<Person>, ContentError> {
            self.started.notify_one();
            self.release.notified().await;
            ContentSource::all_speakers(&self.inner).await
        }

        async fn all_team_members(&self) -> Result<Vec<Person>, ContentError> {
            ContentSource::all_team_members(&self.inner).await
        }

        async fn all_partners(&self) -> Result<Vec<Company>, ContentError> {
            ContentSource::all_partners(&self.inner).await
        }

        async fn all_supporters(&self) -> Result<Vec<Company>, ContentError> {
            ContentSource::all_supporters(&self.inner).await
        }
    }

    async fn evict_during_render(path: &'static str) {
        let source = Arc::new(GatedSource {
            inner: StaticContentSource::new().unwrap(),
            started: Notify::new(),
            release: Notify::new(),
        });
        let facade = ContentFacade::from_source(ContentBackend::Static, source.clone());
        let cache = Arc::new(ContentCache::new(facade));

        let pending = tokio::spawn({
            let cache = Arc::clone(&cache);
            async move { cache.get(ContentResource::Speakers).await }
        });
        source.started.notified().await;
        cache.evict(path);
        source.release.notify_one();

        let rendered = pending.await.unwrap().unwrap();
        assert!(rendered.as_array().is_some_and(|s| !s.is_empty()));
        assert!(cache.cached("/api/speakers").is_none(), "evicted via {}", path);
    }

    #[tokio::test]
    async fn test_render_overlapping_eviction_not_cached() {
        evict_during_render("/api/speakers").await;
        evict_during_render("/").await;
    }

    #[tokio::test]
    async fn test_unrelated_eviction_keeps_render() {
        let cache = cache();
        cache.evict("/api/team");
        cache.get(ContentResource::Speakers).await.unwrap();
        assert!(cache.cached("/api/speakers").is_some());
    }

    #[tokio::test]
    async fn test_unknown_path_is_noop() {
        let cache = cache();
        cache.get(ContentResource::Team).await.unwrap();
        assert_eq!(cache.evict("/blog"), 0);
        assert!(cache.cached("/api/team").is_some());
    }
}
