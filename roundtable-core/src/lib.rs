//! Knight gallery client.
//!
//! This crate provides:
//! - A Data Client for the knight catalog and per-category comments
//! - A Summary Client backed by the MediaWiki search API
//! - A pure Filter Engine over the catalog
//! - Display regions and a Controller that keeps them consistent with the
//!   last selected category, discarding superseded responses
//!
//! # Quick Start
//!
//! ```ignore
//! use roundtable_core::{ClientConfig, Controller, DataClient, Selection};
//! use wiki::Wiki;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::from_env()?;
//!     let mut controller = Controller::new(DataClient::new(&config), Wiki::new());
//!
//!     controller.load().await;
//!     controller.category_changed(Selection::parse("Legendary")).await;
//!     for card in controller.page().gallery.cards() {
//!         println!("{} - {}", card.name, card.title);
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod filter;
pub mod headless;
pub mod model;
pub mod summary;
pub mod testing;
pub mod view;

// Primary public API
pub use config::ClientConfig;
pub use controller::{Controller, Page, PageState, Submission};
pub use data::{CommentStore, DataClient, KnightSource};
pub use error::{ConfigError, RetrievalError, SummaryError};
pub use filter::{filter_comments, select_by_category};
pub use headless::{HeadlessCommand, HeadlessGallery};
pub use model::{Catalog, Category, Comment, Knight, Selection, Summary, ALL_LABEL};
pub use summary::{lookup_summary, Encyclopedia, SummaryOutcome};
pub use testing::{MemoryBackend, MockEncyclopedia};
pub use view::{not_found_message, CommentPanel, Details, Gallery, NO_COMMENTS};
