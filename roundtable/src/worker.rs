//! Background network worker.
//!
//! The UI thread never awaits the network. It sends a [`WorkerRequest`]
//! carrying a ticket, and the worker answers with a [`WorkerResponse`] once
//! the round trip finishes. Each request runs in its own task, so responses
//! can arrive out of order; the page's generation checks sort that out.

use std::sync::Arc;

use roundtable_core::controller::{
    fetch_refresh, lookup, post_comment, remove_comment, CommentsResult, CommentsTicket,
    LookupResult, LookupTicket, PendingComment, RefreshResult, RefreshTicket,
};
use roundtable_core::{CommentStore, Encyclopedia, KnightSource};
use tokio::sync::mpsc;

const CHANNEL_CAPACITY: usize = 32;

/// Work for the background worker.
#[derive(Debug, Clone)]
pub enum WorkerRequest {
    Refresh(RefreshTicket),
    PostComment(PendingComment),
    DeleteComment { ticket: CommentsTicket, id: String },
    Lookup(LookupTicket),
}

/// Finished round trips.
#[derive(Debug)]
pub enum WorkerResponse {
    Refreshed(RefreshResult),
    Comments(CommentsResult),
    Details(LookupResult),
}

/// Start the worker and return its channel endpoints.
///
/// The worker stops when the request sender is dropped.
pub fn spawn_worker<D, E>(
    data: Arc<D>,
    encyclopedia: Arc<E>,
) -> (mpsc::Sender<WorkerRequest>, mpsc::Receiver<WorkerResponse>)
where
    D: KnightSource + CommentStore + 'static,
    E: Encyclopedia + 'static,
{
    let (request_tx, mut request_rx) = mpsc::channel::<WorkerRequest>(CHANNEL_CAPACITY);
    let (response_tx, response_rx) = mpsc::channel::<WorkerResponse>(CHANNEL_CAPACITY);

    tokio::spawn(async move {
        while let Some(request) = request_rx.recv().await {
            let data = Arc::clone(&data);
            let encyclopedia = Arc::clone(&encyclopedia);
            let response_tx = response_tx.clone();

            tokio::spawn(async move {
                let response = handle_request(&*data, &*encyclopedia, request).await;
                if response_tx.send(response).await.is_err() {
                    tracing::debug!("UI gone, dropping worker response");
                }
            });
        }
        tracing::debug!("worker shutting down");
    });

    (request_tx, response_rx)
}

async fn handle_request<D, E>(data: &D, encyclopedia: &E, request: WorkerRequest) -> WorkerResponse
where
    D: KnightSource + CommentStore + ?Sized,
    E: Encyclopedia + ?Sized,
{
    match request {
        WorkerRequest::Refresh(ticket) => {
            WorkerResponse::Refreshed(fetch_refresh(data, ticket).await)
        }
        WorkerRequest::PostComment(pending) => {
            WorkerResponse::Comments(post_comment(data, pending).await)
        }
        WorkerRequest::DeleteComment { ticket, id } => {
            WorkerResponse::Comments(remove_comment(data, ticket, &id).await)
        }
        WorkerRequest::Lookup(ticket) => WorkerResponse::Details(lookup(encyclopedia, ticket).await),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roundtable_core::{Catalog, Knight, MemoryBackend, MockEncyclopedia, Page};

    #[tokio::test]
    async fn test_worker_answers_refresh() {
        let backend = Arc::new(MemoryBackend::new(
            Catalog::new().with_knight("Historical", "a", Knight::new("Arthur", "King")),
        ));
        let (tx, mut rx) = spawn_worker(backend, Arc::new(MockEncyclopedia::new()));

        let mut page = Page::new();
        tx.send(WorkerRequest::Refresh(page.begin_refresh()))
            .await
            .unwrap();

        match rx.recv().await {
            Some(WorkerResponse::Refreshed(result)) => {
                assert!(page.apply_refresh(result));
                assert_eq!(page.gallery.cards()[0].name, "Arthur");
            }
            other => panic!("expected refresh, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_worker_answers_lookup() {
        let backend = Arc::new(MemoryBackend::new(Catalog::new()));
        let wiki = Arc::new(MockEncyclopedia::new().with_page("Kay", "Sir Kay", "Foster brother."));
        let (tx, mut rx) = spawn_worker(backend, wiki);

        let mut page = Page::new();
        tx.send(WorkerRequest::Lookup(page.begin_lookup("Kay")))
            .await
            .unwrap();

        let Some(WorkerResponse::Details(result)) = rx.recv().await else {
            panic!("expected details");
        };
        assert!(page.apply_lookup(result));
        assert_eq!(page.details.text().0.as_deref(), Some("Sir Kay"));
    }
}
