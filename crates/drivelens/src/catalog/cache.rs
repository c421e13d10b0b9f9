use super::loader::CatalogShape;
use super::{CatalogError, VehicleCatalog};
use chrono::{DateTime, Duration, Utc};
use std::fmt::Debug;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

/// Anything able to produce a fresh catalog: the compiled-in data, a file
/// export, or a remote vehicle-data feed.
pub trait CatalogSource: Debug + Send + Sync {
    fn load(&self) -> Result<VehicleCatalog, CatalogError>;
}

impl<T: CatalogSource + ?Sized> CatalogSource for Arc<T> {
    fn load(&self) -> Result<VehicleCatalog, CatalogError> {
        (**self).load()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BundledCatalog {
    shape: CatalogShape,
}

impl BundledCatalog {
    pub fn new(shape: CatalogShape) -> Self {
        Self { shape }
    }
}

impl CatalogSource for BundledCatalog {
    fn load(&self) -> Result<VehicleCatalog, CatalogError> {
        VehicleCatalog::bundled(self.shape)
    }
}

/// Catalog exported to disk as JSON (array of models) or CSV.
#[derive(Debug, Clone)]
pub struct FileCatalog {
    path: PathBuf,
}

impl FileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CatalogSource for FileCatalog {
    fn load(&self) -> Result<VehicleCatalog, CatalogError> {
        let reader = BufReader::new(File::open(&self.path)?);
        let is_csv = self
            .path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("csv"))
            .unwrap_or(false);

        if is_csv {
            VehicleCatalog::from_csv_reader(reader)
        } else {
            VehicleCatalog::from_json_reader(reader)
        }
    }
}

#[derive(Debug)]
struct CachedCatalog {
    loaded_at: DateTime<Utc>,
    catalog: Arc<VehicleCatalog>,
}

/// Read-through cache in front of a [`CatalogSource`].
///
/// Entries expire after `ttl`. A failing source never fails the caller: the
/// bundled catalog for `fallback` is served instead and is not cached, so the
/// next call retries the source.
#[derive(Debug)]
pub struct CatalogCache<S> {
    source: S,
    ttl: Duration,
    fallback: CatalogShape,
    entry: Mutex<Option<CachedCatalog>>,
}

impl<S: CatalogSource> CatalogCache<S> {
    pub fn new(source: S, ttl: Duration, fallback: CatalogShape) -> Self {
        Self {
            source,
            ttl,
            fallback,
            entry: Mutex::new(None),
        }
    }

    pub fn get(&self) -> Arc<VehicleCatalog> {
        self.get_at(Utc::now())
    }

    /// The source is loaded without holding the lock, so concurrent misses
    /// may each load once; the last one stored wins.
    pub fn get_at(&self, now: DateTime<Utc>) -> Arc<VehicleCatalog> {
        if let Some(catalog) = self.fresh(now) {
            return catalog;
        }

        match self.source.load() {
            Ok(catalog) if !catalog.is_empty() => {
                debug!(vehicles = catalog.len(), "catalog refreshed from source");
                let catalog = Arc::new(catalog);
                let mut guard = self.entry.lock().expect("catalog cache mutex poisoned");
                *guard = Some(CachedCatalog {
                    loaded_at: now,
                    catalog: catalog.clone(),
                });
                catalog
            }
            Ok(_) => {
                warn!("catalog source returned no vehicles; serving bundled catalog");
                self.fallback_catalog()
            }
            Err(err) => {
                warn!(error = %err, "catalog source unavailable; serving bundled catalog");
                self.fallback_catalog()
            }
        }
    }

    fn fresh(&self, now: DateTime<Utc>) -> Option<Arc<VehicleCatalog>> {
        let guard = self.entry.lock().expect("catalog cache mutex poisoned");
        guard
            .as_ref()
            .filter(|cached| now - cached.loaded_at < self.ttl)
            .map(|cached| cached.catalog.clone())
    }

    pub fn invalidate(&self) {
        let mut guard = self.entry.lock().expect("catalog cache mutex poisoned");
        *guard = None;
    }

    fn fallback_catalog(&self) -> Arc<VehicleCatalog> {
        match VehicleCatalog::bundled(self.fallback) {
            Ok(catalog) => Arc::new(catalog),
            Err(err) => {
                warn!(error = %err, "bundled catalog failed to parse");
                Arc::new(VehicleCatalog {
                    vehicles: Vec::new(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::OnceLock;

    #[derive(Debug, Default)]
    struct CountingSource {
        loads: AtomicUsize,
        fail: bool,
    }

    impl CatalogSource for CountingSource {
        fn load(&self) -> Result<VehicleCatalog, CatalogError> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(CatalogError::Unavailable("feed offline".to_string()));
            }
            VehicleCatalog::bundled(CatalogShape::Basic)
        }
    }

    /// Runs a hook from inside `load`, standing in for slow file I/O that
    /// other callers must not wait behind.
    #[derive(Default)]
    struct HookedSource {
        hook: OnceLock<Box<dyn Fn() + Send + Sync>>,
    }

    impl Debug for HookedSource {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("HookedSource")
        }
    }

    impl CatalogSource for HookedSource {
        fn load(&self) -> Result<VehicleCatalog, CatalogError> {
            if let Some(hook) = self.hook.get() {
                hook();
            }
            VehicleCatalog::bundled(CatalogShape::Basic)
        }
    }

    fn start() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-06-01T12:00:00Z")
            .expect("valid timestamp")
            .with_timezone(&Utc)
    }

    #[test]
    fn serves_cached_catalog_within_ttl() {
        let cache = CatalogCache::new(
            CountingSource::default(),
            Duration::hours(6),
            CatalogShape::Basic,
        );

        cache.get_at(start());
        cache.get_at(start() + Duration::hours(5));
        assert_eq!(cache.source.loads.load(Ordering::SeqCst), 1);

        cache.get_at(start() + Duration::hours(7));
        assert_eq!(cache.source.loads.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn invalidate_forces_reload() {
        let cache = CatalogCache::new(
            CountingSource::default(),
            Duration::hours(6),
            CatalogShape::Basic,
        );
        cache.get_at(start());
        cache.invalidate();
        cache.get_at(start());
        assert_eq!(cache.source.loads.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn failing_source_falls_back_without_caching() {
        let cache = CatalogCache::new(
            CountingSource {
                loads: AtomicUsize::new(0),
                fail: true,
            },
            Duration::hours(6),
            CatalogShape::Inventory,
        );

        let catalog = cache.get_at(start());
        assert!(!catalog.is_empty());
        cache.get_at(start());
        assert_eq!(cache.source.loads.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn source_loads_without_holding_the_lock() {
        let source = Arc::new(HookedSource::default());
        let cache = Arc::new(CatalogCache::new(
            source.clone(),
            Duration::hours(6),
            CatalogShape::Basic,
        ));

        let weak = Arc::downgrade(&cache);
        let hook: Box<dyn Fn() + Send + Sync> = Box::new(move || {
            if let Some(cache) = weak.upgrade() {
                assert!(cache.fresh(start()).is_none());
                cache.invalidate();
            }
        });
        assert!(source.hook.set(hook).is_ok());

        let catalog = cache.get_at(start());
        assert!(!catalog.is_empty());
        assert!(cache.fresh(start()).is_some());
    }
}
