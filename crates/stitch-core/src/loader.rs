//! Content loader: one fetch per mount, three view states.
//!
//! ```text
//!            ┌──────────► Failed(LoadFailure)
//!  Loading ──┤
//!            └──────────► Loaded { records }
//! ```
//!
//! `Loading` is published before the fetch starts. The two terminal states
//! are never left; a fresh fetch needs a fresh [`ContentLoader::mount`].

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, info, info_span, warn};

use crate::Result;
use crate::error::Error;
use crate::record::Record;
use crate::traits::ContentSource;

/// View state of a mounted loader.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    /// The fetch has not resolved yet.
    Loading,
    /// The fetch failed; terminal for this mount.
    Failed(LoadFailure),
    /// The fetch succeeded; terminal for this mount. May hold zero records.
    Loaded { records: Vec<Record> },
}

impl LoadState {
    /// Map a fetch result onto its terminal state.
    pub fn from_result(result: Result<Vec<Record>>) -> Self {
        match result {
            Ok(records) => LoadState::Loaded { records },
            Err(err) => LoadState::Failed(LoadFailure::from(&err)),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    /// Returns true once a terminal state has been reached.
    pub fn is_settled(&self) -> bool {
        !self.is_loading()
    }

    /// Move from `Loading` into `next`.
    ///
    /// Returns false and leaves the state untouched if it is already
    /// terminal or if `next` is `Loading`.
    pub fn settle(&mut self, next: LoadState) -> bool {
        if self.is_settled() || next.is_loading() {
            return false;
        }
        *self = next;
        true
    }
}

/// Why a load failed, reduced to what a view needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadFailure {
    /// Human-readable message.
    pub message: String,
    pub kind: FailureKind,
    /// Whether issuing the request again might help.
    pub retryable: bool,
    /// Whether the service rejected the access token or its permissions.
    pub auth: bool,
}

/// Failure classes, one per error taxonomy entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Non-success HTTP status.
    Status(u16),
    /// Error payload in a successful response.
    Service,
    /// The request never completed.
    Network,
    /// The body was not the expected JSON.
    Decode,
    /// Bad configuration caught before or while building the request.
    Configuration,
    /// Local snapshot could not be read.
    Storage,
}

impl From<&Error> for LoadFailure {
    fn from(err: &Error) -> Self {
        let kind = match err {
            Error::Status(e) => FailureKind::Status(e.status),
            Error::Service(_) => FailureKind::Service,
            Error::Transport(_) => FailureKind::Network,
            Error::Decode { .. } => FailureKind::Decode,
            Error::InvalidInput(_) => FailureKind::Configuration,
            Error::Storage { .. } => FailureKind::Storage,
        };

        Self {
            message: err.to_string(),
            kind,
            retryable: err.is_retryable(),
            auth: err.is_auth_error(),
        }
    }
}

/// Loads a table snapshot from a [`ContentSource`] once per mount.
#[derive(Debug)]
pub struct ContentLoader<S> {
    source: Arc<S>,
}

impl<S> Clone for ContentLoader<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
        }
    }
}

impl<S: ContentSource + 'static> ContentLoader<S> {
    pub fn new(source: S) -> Self {
        Self::from_arc(Arc::new(source))
    }

    pub fn from_arc(source: Arc<S>) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Mount the loader: publish `Loading` and start the one fetch.
    ///
    /// Must be called from within a tokio runtime. The returned handle
    /// owns the fetch; dropping it cancels the fetch and discards any late
    /// result.
    pub fn mount(&self) -> Mounted {
        let (tx, rx) = watch::channel(LoadState::Loading);
        let cancel = CancellationToken::new();

        let source = Arc::clone(&self.source);
        let token = cancel.clone();
        let span = info_span!("load", table = %source.table());

        let task = tokio::spawn(
            async move {
                let result = tokio::select! {
                    biased;
                    _ = token.cancelled() => {
                        debug!("Unmounted before the fetch resolved");
                        return;
                    }
                    result = source.fetch_records() => result,
                };

                match &result {
                    Ok(records) => info!(count = records.len(), "Records loaded"),
                    Err(e) => warn!(error = %e, "Failed to load records"),
                }

                if !publish(&tx, &token, LoadState::from_result(result)) {
                    debug!("Discarding result for unmounted loader");
                }
            }
            .instrument(span),
        );

        Mounted {
            state: rx,
            cancel,
            task: Some(task),
        }
    }
}

/// Settle the published state unless the mount was cancelled.
///
/// Cancellation is checked under the channel's write lock, in the same step
/// as the transition.
fn publish(tx: &watch::Sender<LoadState>, cancel: &CancellationToken, next: LoadState) -> bool {
    tx.send_if_modified(|state| !cancel.is_cancelled() && state.settle(next))
}

/// A mounted loader instance.
#[derive(Debug)]
pub struct Mounted {
    state: watch::Receiver<LoadState>,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl Mounted {
    /// Returns a snapshot of the current state.
    pub fn state(&self) -> LoadState {
        self.state.borrow().clone()
    }

    /// Returns a receiver that observes every state change.
    pub fn watch(&self) -> watch::Receiver<LoadState> {
        self.state.clone()
    }

    /// Wait until the state is terminal and return it.
    ///
    /// If the fetch task ends without settling (it panicked), the last
    /// published state is returned, which is `Loading`.
    pub async fn settled(&mut self) -> LoadState {
        if let Ok(state) = self.state.wait_for(LoadState::is_settled).await {
            return state.clone();
        }
        self.state.borrow().clone()
    }

    /// Tear down: cancel the fetch and wait for its task to finish.
    pub async fn unmount(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take()
            && let Err(e) = task.await
            && e.is_panic()
        {
            warn!("Loader task panicked during unmount");
        }
    }
}

impl Drop for Mounted {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ServiceError, StatusError};
    use crate::record::Fields;
    use crate::types::{BaseId, ServiceUrl, TableName, TableRef};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Notify;

    struct FakeSource {
        table: TableRef,
        respond: fn() -> Result<Vec<Record>>,
        gate: Option<Arc<Notify>>,
        calls: AtomicUsize,
    }

    impl FakeSource {
        fn new(respond: fn() -> Result<Vec<Record>>) -> Self {
            Self {
                table: TableRef::new(
                    ServiceUrl::default(),
                    BaseId::new("appTest").unwrap(),
                    TableName::new("Table 1").unwrap(),
                ),
                respond,
                gate: None,
                calls: AtomicUsize::new(0),
            }
        }

        fn gated(respond: fn() -> Result<Vec<Record>>, gate: Arc<Notify>) -> Self {
            Self {
                gate: Some(gate),
                ..Self::new(respond)
            }
        }
    }

    #[async_trait]
    impl ContentSource for FakeSource {
        fn table(&self) -> &TableRef {
            &self.table
        }

        async fn fetch_records(&self) -> Result<Vec<Record>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            (self.respond)()
        }
    }

    fn two_records() -> Result<Vec<Record>> {
        Ok(vec![
            Record {
                id: "rec1".to_string(),
                created_time: None,
                fields: Fields::default(),
            },
            Record {
                id: "rec2".to_string(),
                created_time: None,
                fields: Fields::default(),
            },
        ])
    }

    fn not_found() -> Result<Vec<Record>> {
        Err(StatusError::new(404, None, None).into())
    }

    fn invalid_key() -> Result<Vec<Record>> {
        Err(ServiceError::new(None, "INVALID_API_KEY").into())
    }

    #[tokio::test]
    async fn loading_is_published_before_fetch_resolves() {
        let gate = Arc::new(Notify::new());
        let loader = ContentLoader::new(FakeSource::gated(two_records, gate.clone()));

        let mut mounted = loader.mount();
        assert_eq!(mounted.state(), LoadState::Loading);

        gate.notify_one();
        let state = mounted.settled().await;
        assert!(matches!(state, LoadState::Loaded { ref records } if records.len() == 2));
    }

    #[tokio::test]
    async fn fetches_exactly_once_per_mount() {
        let loader = ContentLoader::new(FakeSource::new(two_records));

        let mut first = loader.mount();
        first.settled().await;
        assert_eq!(loader.source().calls.load(Ordering::SeqCst), 1);

        let mut second = loader.mount();
        second.settled().await;
        assert_eq!(loader.source().calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn status_failure_is_terminal() {
        let loader = ContentLoader::new(FakeSource::new(not_found));
        let mut mounted = loader.mount();

        match mounted.settled().await {
            LoadState::Failed(failure) => {
                assert!(failure.message.contains("404"));
                assert_eq!(failure.kind, FailureKind::Status(404));
                assert!(!failure.retryable);
                assert!(!failure.auth);
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn service_failure_keeps_message() {
        let loader = ContentLoader::new(FakeSource::new(invalid_key));
        let mut mounted = loader.mount();

        match mounted.settled().await {
            LoadState::Failed(failure) => {
                assert_eq!(failure.message, "INVALID_API_KEY");
                assert_eq!(failure.kind, FailureKind::Service);
                assert!(failure.auth);
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn unmount_discards_late_result() {
        let gate = Arc::new(Notify::new());
        let loader = ContentLoader::new(FakeSource::gated(two_records, gate.clone()));

        let mounted = loader.mount();
        let mut observer = mounted.watch();
        tokio::task::yield_now().await;

        gate.notify_one();
        mounted.unmount().await;

        assert_eq!(*observer.borrow_and_update(), LoadState::Loading);
        assert!(observer.changed().await.is_err());
    }

    #[tokio::test]
    async fn drop_cancels_pending_fetch() {
        let gate = Arc::new(Notify::new());
        let loader = ContentLoader::new(FakeSource::gated(two_records, gate));

        let mounted = loader.mount();
        let mut observer = mounted.watch();
        drop(mounted);

        // The sender goes away without ever publishing a terminal state.
        assert!(observer.changed().await.is_err());
        assert_eq!(*observer.borrow(), LoadState::Loading);
    }

    #[test]
    fn result_after_cancel_is_not_published() {
        let (tx, rx) = watch::channel(LoadState::Loading);
        let cancel = CancellationToken::new();
        cancel.cancel();

        assert!(!publish(&tx, &cancel, LoadState::Loaded { records: vec![] }));
        assert_eq!(*rx.borrow(), LoadState::Loading);
    }

    #[test]
    fn result_before_cancel_is_published() {
        let (tx, rx) = watch::channel(LoadState::Loading);
        let cancel = CancellationToken::new();

        assert!(publish(&tx, &cancel, LoadState::from_result(not_found())));
        cancel.cancel();
        assert!(matches!(*rx.borrow(), LoadState::Failed(_)));
    }

    #[test]
    fn terminal_states_are_never_left() {
        let mut state = LoadState::Loading;
        assert!(!state.settle(LoadState::Loading));
        assert!(state.settle(LoadState::Loaded { records: vec![] }));
        assert!(!state.settle(LoadState::from_result(not_found())));
        assert_eq!(state, LoadState::Loaded { records: vec![] });
    }
}
