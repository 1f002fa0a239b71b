//! In-memory embedding memoization keyed by blake3 content hash.
//!
//! The cache is consulted before delegating to the wrapped provider and
//! written through on misses. Only successes are stored, so a transient
//! provider failure is retried the next time the same text comes up.

use anyhow::{anyhow, Result};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use passage_core::traits::EmbedProvider;

/// Wraps a provider for the duration of one corpus search so repeated
/// text units (re-scored parents, identical sentences, the whole-body
/// pass vs. the recursion's base case) cost one external call each.
pub struct CachedProvider<'a> {
    inner: &'a dyn EmbedProvider,
    memo: Mutex<HashMap<String, Vec<f32>>>,
}

impl<'a> CachedProvider<'a> {
    pub fn new(inner: &'a dyn EmbedProvider) -> Self {
        Self { inner, memo: Mutex::new(HashMap::new()) }
    }

    fn key(text: &str) -> String {
        blake3::hash(text.as_bytes()).to_hex().to_string()
    }

    fn memo(&self) -> MutexGuard<'_, HashMap<String, Vec<f32>>> {
        match self.memo.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

enum Slot {
    Hit(Vec<f32>),
    Miss(usize),
}

impl EmbedProvider for CachedProvider<'_> {
    fn embedder_id(&self) -> &str {
        self.inner.embedder_id()
    }

    fn dim(&self) -> usize {
        self.inner.dim()
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let key = Self::key(text);
        if let Some(v) = self.memo().get(&key) {
            tracing::trace!(%key, "embedding cache hit");
            return Ok(v.clone());
        }
        let v = self.inner.embed(text)?;
        self.memo().insert(key, v.clone());
        Ok(v)
    }

    /// Batch lookup: hits come from the memo, misses (deduplicated
    /// within the batch) go to the inner provider in one call, and
    /// successes are written back. Output order matches input order.
    fn embed_many(&self, texts: &[String]) -> Vec<Result<Vec<f32>>> {
        let keys: Vec<String> = texts.iter().map(|t| Self::key(t)).collect();
        let mut slots: Vec<Slot> = Vec::with_capacity(texts.len());
        let mut miss_texts: Vec<String> = Vec::new();
        let mut miss_keys: Vec<String> = Vec::new();
        {
            let memo = self.memo();
            let mut pending: HashMap<&str, usize> = HashMap::new();
            for (i, key) in keys.iter().enumerate() {
                if let Some(v) = memo.get(key) {
                    slots.push(Slot::Hit(v.clone()));
                } else if let Some(&j) = pending.get(key.as_str()) {
                    slots.push(Slot::Miss(j));
                } else {
                    let j = miss_texts.len();
                    pending.insert(key.as_str(), j);
                    miss_texts.push(texts[i].clone());
                    miss_keys.push(key.clone());
                    slots.push(Slot::Miss(j));
                }
            }
        }

        let miss_results = if miss_texts.is_empty() {
            Vec::new()
        } else {
            self.inner.embed_many(&miss_texts)
        };
        {
            let mut memo = self.memo();
            for (j, res) in miss_results.iter().enumerate() {
                if let Ok(v) = res {
                    memo.insert(miss_keys[j].clone(), v.clone());
                }
            }
        }

        slots
            .into_iter()
            .map(|slot| match slot {
                Slot::Hit(v) => Ok(v),
                Slot::Miss(j) => match &miss_results[j] {
                    Ok(v) => Ok(v.clone()),
                    // anyhow errors are not Clone; keep the message chain.
                    Err(e) => Err(anyhow!("{e:#}")),
                },
            })
            .collect()
    }
}
