//! Testing utilities for the gallery.
//!
//! This module provides in-memory stand-ins for the two remote resources:
//! - `MemoryBackend` for the catalog and comment collection
//! - `MockEncyclopedia` for scripted search/extract responses
//!
//! Both count calls and can be told to fail, so controller behavior can be
//! checked without a network.

use crate::data::{CommentIdGenerator, CommentStore, KnightSource};
use crate::error::RetrievalError;
use crate::model::{Catalog, Comment};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

/// An in-memory mock data server.
pub struct MemoryBackend {
    catalog: Mutex<Catalog>,
    comments: Mutex<Vec<Comment>>,
    ids: CommentIdGenerator,
    create_calls: AtomicUsize,
    fail_knights: AtomicBool,
    fail_comments: AtomicBool,
}

impl MemoryBackend {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: Mutex::new(catalog),
            comments: Mutex::new(Vec::new()),
            ids: CommentIdGenerator::new(),
            create_calls: AtomicUsize::new(0),
            fail_knights: AtomicBool::new(false),
            fail_comments: AtomicBool::new(false),
        }
    }

    /// Replace the served catalog.
    pub fn set_catalog(&self, catalog: Catalog) {
        *self.catalog.lock().unwrap() = catalog;
    }

    /// Insert a comment directly, bypassing the create counter.
    pub fn seed_comment(&self, category: &str, text: &str) -> Comment {
        let comment = Comment {
            id: self.ids.next_id(),
            category: category.to_string(),
            comment: text.to_string(),
        };
        self.comments.lock().unwrap().push(comment.clone());
        comment
    }

    /// Every stored comment, unfiltered.
    pub fn stored_comments(&self) -> Vec<Comment> {
        self.comments.lock().unwrap().clone()
    }

    /// Number of `create_comment` calls received.
    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    /// Make `list_knights` fail until reset.
    pub fn fail_knights(&self, fail: bool) {
        self.fail_knights.store(fail, Ordering::SeqCst);
    }

    /// Make every comment operation fail until reset.
    pub fn fail_comments(&self, fail: bool) {
        self.fail_comments.store(fail, Ordering::SeqCst);
    }

    fn check(&self, flag: &AtomicBool, path: &str) -> Result<(), RetrievalError> {
        if flag.load(Ordering::SeqCst) {
            Err(RetrievalError::Status {
                url: format!("memory:///{path}"),
                status: 500,
            })
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl KnightSource for MemoryBackend {
    async fn list_knights(&self) -> Result<Catalog, RetrievalError> {
        self.check(&self.fail_knights, "knights")?;
        Ok(self.catalog.lock().unwrap().clone())
    }
}

#[async_trait]
impl CommentStore for MemoryBackend {
    async fn list_comments(&self) -> Result<Vec<Comment>, RetrievalError> {
        self.check(&self.fail_comments, "comments")?;
        Ok(self.stored_comments())
    }

    async fn create_comment(&self, category: &str, text: &str) -> Result<Comment, RetrievalError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        self.check(&self.fail_comments, "comments")?;
        Ok(self.seed_comment(category, text))
    }

    async fn delete_comment(&self, id: &str) -> Result<(), RetrievalError> {
        self.check(&self.fail_comments, &format!("comments/{id}"))?;
        self.comments.lock().unwrap().retain(|c| c.id != id);
        Ok(())
    }
}

/// A scripted encyclopedia.
///
/// Search terms map to page titles; titles map to extracts.
#[derive(Default)]
pub struct MockEncyclopedia {
    titles: HashMap<String, String>,
    extracts: HashMap<String, String>,
    fail_search: bool,
    fail_extract: bool,
    search_calls: AtomicUsize,
    extract_calls: AtomicUsize,
}

impl MockEncyclopedia {
    pub fn new() -> Self {
        Self::default()
    }

    /// Searching `term` finds `title`, whose extract is `extract`.
    pub fn with_page(mut self, term: &str, title: &str, extract: &str) -> Self {
        self.titles.insert(term.to_string(), title.to_string());
        self.extracts.insert(title.to_string(), extract.to_string());
        self
    }

    /// Searching `term` finds `title`, which has no extract.
    pub fn with_title_only(mut self, term: &str, title: &str) -> Self {
        self.titles.insert(term.to_string(), title.to_string());
        self
    }

    pub fn failing_search(mut self) -> Self {
        self.fail_search = true;
        self
    }

    pub fn failing_extract(mut self) -> Self {
        self.fail_extract = true;
        self
    }

    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub fn extract_calls(&self) -> usize {
        self.extract_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl crate::summary::Encyclopedia for MockEncyclopedia {
    async fn first_title(&self, term: &str) -> Result<Option<String>, wiki::Error> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_search {
            return Err(wiki::Error::Network("connection refused".to_string()));
        }
        Ok(self.titles.get(term).cloned())
    }

    async fn extract(&self, title: &str) -> Result<Option<String>, wiki::Error> {
        self.extract_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_extract {
            return Err(wiki::Error::Api {
                status: 503,
                message: "unavailable".to_string(),
            });
        }
        Ok(self.extracts.get(title).cloned())
    }
}
