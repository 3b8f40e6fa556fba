//! Integration tests that call a running mock data server and Wikipedia.
//!
//! These tests expect a json-server instance serving `/knights` and
//! `/comments` at ROUNDTABLE_DATA_URL (default http://localhost:3000).
//! Run with: `cargo test -p roundtable-core --test live_server -- --ignored`
//!
//! These are marked #[ignore] by default to avoid:
//! - Test failures when no mock server is running
//! - Network access in CI

use roundtable_core::{
    lookup_summary, ClientConfig, CommentStore, DataClient, KnightSource, SummaryOutcome,
};
use wiki::Wiki;

/// Load environment variables from .env file
fn setup() -> ClientConfig {
    let _ = dotenvy::dotenv();
    ClientConfig::from_env().expect("Invalid ROUNDTABLE_* configuration")
}

#[tokio::test]
#[ignore] // Run with: cargo test -p roundtable-core --test live_server -- --ignored
async fn test_catalog_has_fixed_categories() {
    let config = setup();
    let client = DataClient::new(&config);

    let catalog = client.list_knights().await.expect("catalog should load");
    for group in ["Historical", "Legendary", "Fictional"] {
        assert!(catalog.group(group).is_some(), "missing group {group}");
    }
}

#[tokio::test]
#[ignore]
async fn test_comment_create_and_delete() {
    let config = setup();
    let client = DataClient::new(&config);

    let created = client
        .create_comment("Legendary", "live test comment")
        .await
        .expect("create should succeed");

    let comments = client.list_comments().await.expect("list should succeed");
    assert!(comments.iter().any(|c| c.id == created.id));

    client
        .delete_comment(&created.id)
        .await
        .expect("delete should succeed");
    let comments = client.list_comments().await.expect("list should succeed");
    assert!(comments.iter().all(|c| c.id != created.id));

    // Second delete of the same id is still Ok
    client
        .delete_comment(&created.id)
        .await
        .expect("repeat delete should succeed");
}

#[tokio::test]
#[ignore]
async fn test_wikipedia_lookup() {
    let config = setup();
    let wiki = Wiki::with_timeout(config.timeout).with_base_url(config.wiki_url);

    match lookup_summary(&wiki, "Lancelot").await.expect("lookup should succeed") {
        SummaryOutcome::Found(summary) => {
            assert!(!summary.title.is_empty());
            println!("{}: {}", summary.title, summary.extract);
        }
        SummaryOutcome::NotFound => panic!("Lancelot should have an article"),
    }

    let outcome = lookup_summary(&wiki, "zzqxjvkwpq knight nonexistent")
        .await
        .expect("lookup should succeed");
    assert_eq!(outcome, SummaryOutcome::NotFound);
}
