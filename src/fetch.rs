//! Loading/error/data tri-state over an asynchronous loader.
//!
//! [`AsyncData`] owns a zero-argument async loader and the state of its most
//! recent invocation. Route handlers share one instance per data source and
//! pick a render branch from [`AsyncData::snapshot`].
//!
//! Every fetch is tagged with a generation number. A fetch that completes
//! after a newer fetch (or a [`AsyncData::reset`]) started is discarded, so a
//! slow, superseded response can never overwrite newer state.

use std::collections::hash_map::DefaultHasher;
use std::collections::{BTreeMap, HashMap};
use std::future::Future;
use std::hash::{Hash, Hasher};
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use thiserror::Error;

/// Failure of a loader invocation, normalised to a message.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct FetchError {
    message: String,
}

impl FetchError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<String> for FetchError {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for FetchError {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<std::io::Error> for FetchError {
    fn from(value: std::io::Error) -> Self {
        Self::new(value.to_string())
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(value: serde_json::Error) -> Self {
        Self::new(value.to_string())
    }
}

/// Emptiness as understood by the empty-state render branch.
pub trait Emptiness {
    /// True for "no data": an empty sequence or an object with zero keys.
    fn is_empty_value(&self) -> bool;

    /// True only for sequences of length zero.
    fn is_empty_sequence(&self) -> bool {
        false
    }
}

impl<T> Emptiness for Vec<T> {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }

    fn is_empty_sequence(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Emptiness for [T] {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }

    fn is_empty_sequence(&self) -> bool {
        self.is_empty()
    }
}

impl<K, V, S> Emptiness for HashMap<K, V, S> {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<K, V> Emptiness for BTreeMap<K, V> {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<T: Emptiness> Emptiness for Option<T> {
    fn is_empty_value(&self) -> bool {
        self.as_ref().is_none_or(Emptiness::is_empty_value)
    }

    fn is_empty_sequence(&self) -> bool {
        self.as_ref().is_some_and(Emptiness::is_empty_sequence)
    }
}

impl Emptiness for serde_json::Value {
    fn is_empty_value(&self) -> bool {
        match self {
            serde_json::Value::Null => true,
            serde_json::Value::Array(items) => items.is_empty(),
            serde_json::Value::Object(map) => map.is_empty(),
            _ => false,
        }
    }

    fn is_empty_sequence(&self) -> bool {
        matches!(self, serde_json::Value::Array(items) if items.is_empty())
    }
}

/// Boxed future returned by a loader.
pub type LoadFuture<T> = Pin<Box<dyn Future<Output = Result<T, FetchError>> + 'static>>;

type Loader<T> = Arc<dyn Fn() -> LoadFuture<T> + Send + Sync>;
type SuccessHook<T> = Arc<dyn Fn(&T) + Send + Sync>;
type ErrorHook = Arc<dyn Fn(&FetchError) + Send + Sync>;

/// Point-in-time copy of an [`AsyncData`] state.
#[derive(Debug)]
pub struct Snapshot<T> {
    pub data: Option<Arc<T>>,
    pub is_loading: bool,
    pub error: Option<FetchError>,
    pub is_empty: bool,
}

impl<T> Clone for Snapshot<T> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            is_loading: self.is_loading,
            error: self.error.clone(),
            is_empty: self.is_empty,
        }
    }
}

struct State<T> {
    data: Option<Arc<T>>,
    is_loading: bool,
    error: Option<FetchError>,
    generation: u64,
    deps: Option<u64>,
}

/// Shared tri-state wrapper around an async loader.
pub struct AsyncData<T> {
    loader: Loader<T>,
    initial: Option<Arc<T>>,
    state: Mutex<State<T>>,
    on_success: Option<SuccessHook<T>>,
    on_error: Option<ErrorHook>,
}

impl<T: Emptiness + 'static> AsyncData<T> {
    /// Wrap `loader`; nothing is fetched until [`Self::fetch`] or
    /// [`Self::fetch_on_change`] is called.
    pub fn new<F, Fut>(loader: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, FetchError>> + 'static,
    {
        Self {
            loader: Arc::new(move || Box::pin(loader()) as LoadFuture<T>),
            initial: None,
            state: Mutex::new(State {
                data: None,
                is_loading: false,
                error: None,
                generation: 0,
                deps: None,
            }),
            on_success: None,
            on_error: None,
        }
    }

    /// Data exposed before the first fetch and restored by [`Self::reset`].
    pub fn with_initial_data(mut self, data: T) -> Self {
        let data = Arc::new(data);
        self.initial = Some(data.clone());
        self.lock().data = Some(data);
        self
    }

    pub fn on_success(mut self, hook: impl Fn(&T) + Send + Sync + 'static) -> Self {
        self.on_success = Some(Arc::new(hook));
        self
    }

    pub fn on_error(mut self, hook: impl Fn(&FetchError) + Send + Sync + 'static) -> Self {
        self.on_error = Some(Arc::new(hook));
        self
    }

    fn lock(&self) -> MutexGuard<'_, State<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn snapshot_of(state: &State<T>) -> Snapshot<T> {
        let is_empty = !state.is_loading
            && state.error.is_none()
            && state.data.as_deref().is_none_or(Emptiness::is_empty_value);
        Snapshot {
            data: state.data.clone(),
            is_loading: state.is_loading,
            error: state.error.clone(),
            is_empty,
        }
    }

    /// Current state without triggering a fetch.
    pub fn snapshot(&self) -> Snapshot<T> {
        Self::snapshot_of(&self.lock())
    }

    /// Invoke the loader and store its outcome.
    ///
    /// Returns the state after this fetch settled. When a newer fetch or a
    /// reset happened meanwhile, the outcome is dropped and the returned
    /// snapshot reflects the newer state.
    pub async fn fetch(&self) -> Snapshot<T> {
        let generation = {
            let mut state = self.lock();
            state.generation += 1;
            state.is_loading = true;
            state.error = None;
            state.generation
        };

        let outcome = (self.loader)().await;

        let mut state = self.lock();
        if state.generation != generation {
            log::debug!("Discarding superseded fetch #{generation}");
            return Self::snapshot_of(&state);
        }
        state.is_loading = false;
        match outcome {
            Ok(data) => {
                let data = Arc::new(data);
                state.data = Some(data.clone());
                let snapshot = Self::snapshot_of(&state);
                drop(state);
                if let Some(hook) = &self.on_success {
                    hook(&data);
                }
                snapshot
            }
            Err(error) => {
                state.error = Some(error.clone());
                let snapshot = Self::snapshot_of(&state);
                drop(state);
                if let Some(hook) = &self.on_error {
                    hook(&error);
                }
                snapshot
            }
        }
    }

    /// Re-invoke the loader regardless of dependencies.
    pub async fn refetch(&self) -> Snapshot<T> {
        self.fetch().await
    }

    /// Fetch only when `deps` differs from the value seen by the previous
    /// call, or when nothing was fetched yet.
    pub async fn fetch_on_change<D: Hash + ?Sized>(&self, deps: &D) -> Snapshot<T> {
        let mut hasher = DefaultHasher::new();
        deps.hash(&mut hasher);
        let key = hasher.finish();

        {
            let mut state = self.lock();
            if state.deps == Some(key) {
                return Self::snapshot_of(&state);
            }
            state.deps = Some(key);
        }
        self.fetch().await
    }

    /// Restore the initial data and clear loading and error.
    ///
    /// In-flight fetches are invalidated, and the next
    /// [`Self::fetch_on_change`] fetches unconditionally.
    pub fn reset(&self) {
        let mut state = self.lock();
        state.generation += 1;
        state.data = self.initial.clone();
        state.error = None;
        state.is_loading = false;
        state.deps = None;
    }
}

#[cfg(all(test, feature = "server"))]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use actix_web::rt::time::sleep;

    use super::*;

    #[test]
    fn empty_values() {
        assert!(Vec::<u8>::new().is_empty_value());
        assert!(!vec![1].is_empty_value());
        assert!(serde_json::json!(null).is_empty_value());
        assert!(serde_json::json!({}).is_empty_value());
        assert!(!serde_json::json!({}).is_empty_sequence());
        assert!(serde_json::json!([]).is_empty_sequence());
        assert!(!serde_json::json!(0).is_empty_value());
        assert!(HashMap::<String, u8>::new().is_empty_value());
        assert!(None::<Vec<u8>>.is_empty_value());
    }

    #[actix_web::test]
    async fn fetch_stores_data_and_clears_loading() {
        let data = AsyncData::new(|| async { Ok(vec!["a".to_string()]) });
        assert!(!data.snapshot().is_loading);

        let snapshot = data.fetch().await;

        assert!(!snapshot.is_loading);
        assert!(snapshot.error.is_none());
        assert!(!snapshot.is_empty);
        assert_eq!(snapshot.data.unwrap().as_slice(), ["a".to_string()]);
    }

    #[actix_web::test]
    async fn loading_flag_is_set_while_loader_runs() {
        let data = Arc::new(AsyncData::new(|| async {
            sleep(Duration::from_millis(30)).await;
            Ok(vec![1u8])
        }));

        let background = data.clone();
        let handle = actix_web::rt::spawn(async move { background.fetch().await });
        sleep(Duration::from_millis(5)).await;
        assert!(data.snapshot().is_loading);

        handle.await.unwrap();
        assert!(!data.snapshot().is_loading);
    }

    #[actix_web::test]
    async fn empty_result_is_reported_as_empty() {
        let data = AsyncData::new(|| async { Ok(Vec::<u8>::new()) });
        assert!(data.fetch().await.is_empty);
    }

    #[actix_web::test]
    async fn loader_errors_are_captured() {
        let failures = Arc::new(AtomicUsize::new(0));
        let counter = failures.clone();
        let data = AsyncData::new(|| async { Err::<Vec<u8>, _>(FetchError::from("network down")) })
            .on_error(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            });

        let snapshot = data.fetch().await;

        assert_eq!(snapshot.error.unwrap().message(), "network down");
        assert!(!snapshot.is_loading);
        assert!(!snapshot.is_empty);
        assert_eq!(failures.load(Ordering::SeqCst), 1);
    }

    #[actix_web::test]
    async fn refetch_after_error_recovers() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let data = AsyncData::new(move || {
            let call = counter.fetch_add(1, Ordering::SeqCst);
            async move {
                if call == 0 {
                    Err(FetchError::from("500 server error"))
                } else {
                    Ok(vec![call])
                }
            }
        });

        assert!(data.fetch().await.error.is_some());
        let snapshot = data.refetch().await;
        assert!(snapshot.error.is_none());
        assert_eq!(snapshot.data.unwrap().as_slice(), [1]);
    }

    #[actix_web::test]
    async fn superseded_fetch_does_not_overwrite_newer_data() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let data = Arc::new(AsyncData::new(move || {
            let call = counter.fetch_add(1, Ordering::SeqCst);
            async move {
                if call == 0 {
                    sleep(Duration::from_millis(50)).await;
                    Ok(vec!["stale"])
                } else {
                    Ok(vec!["fresh"])
                }
            }
        }));

        let slow = data.clone();
        let handle = actix_web::rt::spawn(async move { slow.fetch().await });
        sleep(Duration::from_millis(5)).await;

        data.fetch().await;
        handle.await.unwrap();

        let snapshot = data.snapshot();
        assert_eq!(snapshot.data.unwrap().as_slice(), ["fresh"]);
        assert!(!snapshot.is_loading);
    }

    #[actix_web::test]
    async fn fetch_on_change_only_fetches_for_new_dependencies() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let data = AsyncData::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            async { Ok(vec![0u8]) }
        });

        data.fetch_on_change(&("th", 1)).await;
        data.fetch_on_change(&("th", 1)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        data.fetch_on_change(&("en", 1)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[actix_web::test]
    async fn reset_restores_initial_data_and_discards_in_flight_fetch() {
        let data = Arc::new(
            AsyncData::new(|| async {
                sleep(Duration::from_millis(30)).await;
                Ok(vec![9u8])
            })
            .with_initial_data(vec![1u8]),
        );

        let background = data.clone();
        let handle = actix_web::rt::spawn(async move { background.fetch().await });
        sleep(Duration::from_millis(5)).await;
        data.reset();
        handle.await.unwrap();

        let snapshot = data.snapshot();
        assert_eq!(snapshot.data.unwrap().as_slice(), [1]);
        assert!(!snapshot.is_loading);
        assert!(snapshot.error.is_none());
    }
}
