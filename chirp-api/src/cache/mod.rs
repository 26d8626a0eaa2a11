//! Rendered pages keyed by request path.
//!
//! Mutations call [`PageCache::revalidate`] for every path whose content they
//! changed; the next request for that path renders it again. Every
//! revalidation bumps the path's generation, and a render started under an
//! older generation is refused by [`PageCache::insert_if_current`].

use std::collections::HashMap;

use thiserror::Error;

type CacheResult<T> = Result<T, CacheError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CacheError {
    #[error("Page at path `{path}` is already present in the cache")]
    AlreadyPresent { path: String },
    #[error("Page at path `{path}` was revalidated while it was rendered")]
    Outdated { path: String },
}

/// Outcome of a cache lookup. A miss carries the generation the caller has to
/// hand back when storing its render.
#[derive(Debug, PartialEq, Eq)]
pub enum Lookup {
    Hit(String),
    Miss { generation: u64 },
}

pub struct PageCache {
    pages: HashMap<String, String>,
    generations: HashMap<String, u64>,
    epoch: u64,
}

impl PageCache {
    pub fn new() -> Self {
        Self {
            pages: HashMap::new(),
            generations: HashMap::new(),
            epoch: 0,
        }
    }
    /// Stores a freshly rendered page. Fails when another request already
    /// stored one for the same path.
    pub fn insert(&mut self, path: &str, page: String) -> CacheResult<()> {
        if self.pages.contains_key(path) {
            return Err(CacheError::AlreadyPresent {
                path: path.to_owned(),
            });
        };
        self.pages.insert(path.to_owned(), page);
        Ok(())
    }
    /// Like [`PageCache::insert`], but only while `path` is still at the
    /// generation observed when its render started.
    pub fn insert_if_current(
        &mut self,
        path: &str,
        generation: u64,
        page: String,
    ) -> CacheResult<()> {
        if self.generation(path) != generation {
            return Err(CacheError::Outdated {
                path: path.to_owned(),
            });
        }
        self.insert(path, page)
    }
    pub fn get(&self, path: &str) -> Option<String> {
        self.pages.get(path).map(|s| s.to_owned())
    }
    pub fn lookup(&self, path: &str) -> Lookup {
        match self.get(path) {
            Some(page) => Lookup::Hit(page),
            None => Lookup::Miss {
                generation: self.generation(path),
            },
        }
    }
    pub fn generation(&self, path: &str) -> u64 {
        self.epoch + self.generations.get(path).copied().unwrap_or(0)
    }
    pub fn contains(&self, path: &str) -> bool {
        self.pages.contains_key(path)
    }
    pub fn revalidate(&mut self, path: &str) -> Option<String> {
        *self.generations.entry(path.to_owned()).or_default() += 1;
        self.pages.remove(path)
    }
    pub fn clear(&mut self) {
        self.epoch += 1;
        self.pages.clear();
    }
    pub fn len(&self) -> usize {
        self.pages.len()
    }
}
