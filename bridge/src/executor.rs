//! Runs a batch of per-document jobs, one at a time or all at once.

use std::future::Future;

use tokio::task::JoinSet;

use crate::{Error, Result};

/// Strategy for running one job per document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchExecutor {
    /// Jobs run in input order; each completes before the next starts.
    Sequential,
    /// Jobs are spawned together and joined; completion order is unspecified.
    Parallel,
}

impl BatchExecutor {
    /// Picks the strategy for the `parallel` configuration switch.
    pub fn new(parallel: bool) -> Self {
        if parallel {
            Self::Parallel
        } else {
            Self::Sequential
        }
    }

    /// Runs `job(index)` for every index in `0..count`.
    ///
    /// Results are returned in index order for both strategies. The first
    /// failure is returned; in parallel mode the still-running jobs are
    /// aborted when the join set is dropped.
    ///
    /// # Errors
    ///
    /// Returns the first job error, or [`Error::Task`] if a spawned job panicked.
    pub async fn run<R, F, Fut>(self, count: usize, job: F) -> Result<Vec<R>>
    where
        R: Send + 'static,
        F: Fn(usize) -> Fut,
        Fut: Future<Output = Result<R>> + Send + 'static,
    {
        match self {
            Self::Sequential => {
                let mut results = Vec::with_capacity(count);
                for index in 0..count {
                    results.push(job(index).await?);
                }
                Ok(results)
            }
            Self::Parallel => {
                let mut set = JoinSet::new();
                for index in 0..count {
                    let fut = job(index);
                    set.spawn(async move { fut.await.map(|value| (index, value)) });
                }
                let mut results = Vec::with_capacity(count);
                while let Some(joined) = set.join_next().await {
                    results.push(joined.map_err(|e| Error::Task(e.to_string()))??);
                }
                results.sort_by_key(|(index, _)| *index);
                Ok(results.into_iter().map(|(_, value)| value).collect())
            }
        }
    }
}
