//! Summary Client: two-step encyclopedia lookup for a knight's name.

use crate::error::SummaryError;
use crate::model::Summary;
use async_trait::async_trait;
use std::sync::Arc;
use wiki::Wiki;

/// The two encyclopedia queries a lookup needs.
#[async_trait]
pub trait Encyclopedia: Send + Sync {
    /// Title of the best matching page, or `None` for zero results.
    async fn first_title(&self, term: &str) -> Result<Option<String>, wiki::Error>;

    /// Introductory plain-text extract for an exact title, `None` if the source has none.
    async fn extract(&self, title: &str) -> Result<Option<String>, wiki::Error>;
}

#[async_trait]
impl Encyclopedia for Wiki {
    async fn first_title(&self, term: &str) -> Result<Option<String>, wiki::Error> {
        Wiki::first_title(self, term).await
    }

    async fn extract(&self, title: &str) -> Result<Option<String>, wiki::Error> {
        Ok(Wiki::extract(self, title).await?.map(|extract| extract.text))
    }
}

#[async_trait]
impl<T: Encyclopedia + ?Sized> Encyclopedia for Arc<T> {
    async fn first_title(&self, term: &str) -> Result<Option<String>, wiki::Error> {
        (**self).first_title(term).await
    }

    async fn extract(&self, title: &str) -> Result<Option<String>, wiki::Error> {
        (**self).extract(title).await
    }
}

/// Result of a lookup that reached the encyclopedia.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryOutcome {
    Found(Summary),
    /// The search returned zero results.
    NotFound,
}

/// Search for `name`, then fetch the extract of the first hit.
///
/// The returned summary keeps the searched title even if the extract source
/// is empty. Failures report which of the two stages failed.
pub async fn lookup_summary<E>(encyclopedia: &E, name: &str) -> Result<SummaryOutcome, SummaryError>
where
    E: Encyclopedia + ?Sized,
{
    let Some(title) = encyclopedia
        .first_title(name)
        .await
        .map_err(SummaryError::Search)?
    else {
        tracing::debug!(%name, "no encyclopedia match");
        return Ok(SummaryOutcome::NotFound);
    };

    let extract = encyclopedia
        .extract(&title)
        .await
        .map_err(|source| SummaryError::Extract {
            title: title.clone(),
            source,
        })?
        .unwrap_or_default();

    Ok(SummaryOutcome::Found(Summary { title, extract }))
}
