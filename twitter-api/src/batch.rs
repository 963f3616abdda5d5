//! Chunked member batches.
//!
//! The service caps how many users one `create_all`/`destroy_all` request may
//! name. Larger batches are split into ordered chunks, dispatched
//! concurrently, and the outcome of the last chunk in input order becomes the
//! outcome of the whole call. Failures of earlier chunks are logged.

use crate::args::Arg;
use crate::error::{ApiError, ApiResult};
use crate::merge;
use crate::transport::Params;
use futures::future::join_all;
use std::future::Future;
use tracing::{debug, warn};

/// Splits `members` into chunks of at most `chunk_size`, merging each chunk
/// into a copy of `params`.
pub fn chunk_params(params: &Params, members: &[Arg], chunk_size: usize) -> ApiResult<Vec<Params>> {
    members
        .chunks(chunk_size.max(1))
        .map(|chunk| merge::merge_users(params, chunk))
        .collect()
}

/// Sends one request per chunk and returns the last chunk's result.
pub async fn dispatch<T, F, Fut>(
    params: &Params,
    members: &[Arg],
    chunk_size: usize,
    send: F,
) -> ApiResult<T>
where
    F: Fn(Params) -> Fut,
    Fut: Future<Output = ApiResult<T>>,
{
    let chunks = chunk_params(params, members, chunk_size)?;
    debug!(members = members.len(), chunks = chunks.len(), "dispatching member batch");

    let mut results = join_all(chunks.into_iter().map(&send)).await;
    let last = results
        .pop()
        .ok_or_else(|| ApiError::InvalidArguments("no members given".into()))?;
    for (index, result) in results.iter().enumerate() {
        if let Err(err) = result {
            warn!(chunk = index, error = %err, "member batch chunk failed");
        }
    }
    last
}
