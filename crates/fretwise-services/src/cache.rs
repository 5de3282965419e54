//! Memoized triad and box tables for one configuration
//!
//! Results depend only on (key, family) once the tuning and options are
//! fixed, so entries never need invalidating. Enharmonic spellings of a key
//! share one entry.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use fretwise_core::{
    normalize_major_key_name, BoxGenerator, BoxShapePattern, ScaleFamily, TriadEngine, TriadsData,
    SHARP_NAMES,
};
use tracing::{debug, info};

use crate::config::FretwiseConfig;
use crate::error::Result;

type BoxKey = (&'static str, ScaleFamily);

pub struct PatternCache {
    triad_engine: TriadEngine,
    box_generator: BoxGenerator,
    triads: Mutex<HashMap<&'static str, Arc<TriadsData>>>,
    boxes: Mutex<HashMap<BoxKey, Arc<Vec<BoxShapePattern>>>>,
}

impl PatternCache {
    pub fn new(config: &FretwiseConfig) -> Result<Self> {
        Ok(Self::with_engines(config.triad_engine()?, config.box_generator()?))
    }

    pub fn with_engines(triad_engine: TriadEngine, box_generator: BoxGenerator) -> Self {
        Self {
            triad_engine,
            box_generator,
            triads: Mutex::new(HashMap::new()),
            boxes: Mutex::new(HashMap::new()),
        }
    }

    /// Major triad voicings for `key`, computed on first request.
    pub fn triads(&self, key: &str) -> Result<Arc<TriadsData>> {
        let key = normalize_major_key_name(key)?;
        if let Some(hit) = self.triads.lock().unwrap_or_else(PoisonError::into_inner).get(key) {
            return Ok(Arc::clone(hit));
        }

        // Computed outside the lock; a racing thread produces an identical value
        let data = Arc::new(self.triad_engine.generate(key)?);
        debug!("Cached triads for {key}");
        let mut triads = self.triads.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(Arc::clone(triads.entry(key).or_insert(data)))
    }

    /// Boxes for `key` in shape-number order, computed on first request.
    pub fn boxes(&self, key: &str, family: ScaleFamily) -> Result<Arc<Vec<BoxShapePattern>>> {
        let cache_key = (normalize_major_key_name(key)?, family);
        if let Some(hit) = self.boxes.lock().unwrap_or_else(PoisonError::into_inner).get(&cache_key) {
            return Ok(Arc::clone(hit));
        }

        let patterns = Arc::new(self.box_generator.generate(cache_key.0, family)?);
        debug!("Cached {family} boxes for {}", cache_key.0);
        let mut boxes = self.boxes.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(Arc::clone(boxes.entry(cache_key).or_insert(patterns)))
    }

    /// Precompute triads and every box family for all twelve keys.
    ///
    /// Returns the number of cached tables.
    pub fn warm(&self) -> Result<usize> {
        for key in SHARP_NAMES {
            self.triads(key)?;
            for family in ScaleFamily::ALL {
                self.boxes(key, family)?;
            }
        }
        let entries = self.len();
        info!("Pattern cache warmed with {entries} tables");
        Ok(entries)
    }

    pub fn len(&self) -> usize {
        let triads = self.triads.lock().unwrap_or_else(PoisonError::into_inner).len();
        let boxes = self.boxes.lock().unwrap_or_else(PoisonError::into_inner).len();
        triads + boxes
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServiceError;
    use fretwise_core::{BoxOptions, FretwiseError};

    fn cache() -> PatternCache {
        PatternCache::new(&FretwiseConfig::default()).unwrap()
    }

    #[test]
    fn test_enharmonic_keys_share_entries() {
        let cache = cache();
        let sharp = cache.triads("C#").unwrap();
        let flat = cache.triads("Db").unwrap();
        assert!(Arc::ptr_eq(&sharp, &flat));

        let a = cache.boxes("A#", ScaleFamily::Blues).unwrap();
        let b = cache.boxes("Bb", ScaleFamily::Blues).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_families_are_separate_entries() {
        let cache = cache();
        assert_eq!(cache.boxes("E", ScaleFamily::Major).unwrap().len(), 7);
        assert_eq!(cache.boxes("E", ScaleFamily::Pentatonic).unwrap().len(), 5);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_warm_fills_every_key() {
        let cache = cache();
        assert!(cache.is_empty());
        assert_eq!(cache.warm().unwrap(), 12 * (1 + ScaleFamily::ALL.len()));
        assert_eq!(cache.warm().unwrap(), 48);
    }

    #[test]
    fn test_options_reach_the_generator() {
        let config = FretwiseConfig {
            boxes: BoxOptions {
                experimental_blues_box: true,
                ..BoxOptions::default()
            },
            ..FretwiseConfig::default()
        };
        let cache = PatternCache::new(&config).unwrap();
        assert_eq!(cache.boxes("A", ScaleFamily::Blues).unwrap().len(), 6);
    }

    #[test]
    fn test_errors_are_not_cached() {
        let cache = cache();
        assert!(matches!(
            cache.triads("H"),
            Err(ServiceError::Engine(FretwiseError::UnknownNote(_)))
        ));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_shared_across_threads() {
        let cache = Arc::new(cache());
        let handles: Vec<_> = ["C", "G", "D", "A"]
            .into_iter()
            .map(|key| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || cache.triads(key).map(|d| d.groups.len()))
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap().unwrap(), 4);
        }
        assert_eq!(cache.len(), 4);
    }
}
