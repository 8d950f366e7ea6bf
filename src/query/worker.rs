use crate::client::QueryTransport;
use crate::render::protocol::{QueryCommand, QueryResponse, RequestId};
use crate::response::normalize;
use std::sync::Arc;
use tokio::sync::mpsc::{Receiver, Sender};

/// Run the query worker, answering commands from the coordinator one at a time.
pub async fn query_worker_loop(
    mut rx: Receiver<QueryCommand>,
    tx: Sender<QueryResponse>,
    transport: Arc<dyn QueryTransport>,
) {
    while let Some(cmd) = rx.recv().await {
        let response = match cmd {
            QueryCommand::Submit { request_id, query } => {
                execute_query(transport.as_ref(), request_id, &query).await
            }
            QueryCommand::Shutdown => break,
        };

        if tx.send(response).await.is_err() {
            break;
        }
    }
    log::debug!("query worker stopped");
}

async fn execute_query(
    transport: &dyn QueryTransport,
    request_id: RequestId,
    query: &str,
) -> QueryResponse {
    match transport.submit_query(query).await {
        Ok(payload) => QueryResponse::Completed {
            request_id,
            display: normalize(&payload),
        },
        Err(error) => {
            log::debug!("query {request_id} returned an error");
            QueryResponse::Failed { request_id, error }
        }
    }
}
