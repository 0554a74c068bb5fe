use crate::api::client::{GymClient, RequestSpec};
use crate::error::ApiError;
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Observable outcome of one request binding: at most one of `data` and
/// `error` is fresh at a time, and `is_loading` brackets every attempt.
#[derive(Debug, Clone)]
pub struct FetchState<T> {
    data: Option<T>,
    is_loading: bool,
    error: Option<ApiError>,
}

/// Binds one request spec to fetch state for the lifetime of its owner.
/// Construction with `immediate` mirrors a page that loads its data on
/// mount; a deferred fetcher stays idle until `execute` is called.
pub struct Fetcher<T> {
    client: Arc<GymClient>,
    spec: RequestSpec,
    immediate: bool,
    mounted: bool,
    state: FetchState<T>,
}

impl<T> Fetcher<T>
where
    T: DeserializeOwned + Clone,
{
    pub fn new(client: Arc<GymClient>, spec: RequestSpec) -> Self {
        Self::with_immediate(client, spec, true)
    }

    pub fn with_immediate(client: Arc<GymClient>, spec: RequestSpec, immediate: bool) -> Self {
        Self {
            client,
            spec,
            immediate,
            mounted: false,
            state: FetchState {
                data: None,
                is_loading: immediate,
                error: None,
            },
        }
    }

    /// Runs the initial fetch. Only the first mount of an immediate fetcher
    /// issues a request; every later call is a no-op, and deferred fetchers
    /// never fetch here at all.
    pub async fn mount(&mut self) -> Result<(), ApiError> {
        if self.immediate && !self.mounted {
            self.mounted = true;
            self.execute().await?;
        } else {
            self.mounted = true;
        }
        Ok(())
    }

    /// Issues the bound request. The sequencing is fixed: loading on, stale
    /// error cleared, one send, outcome stored, loading off — also on the
    /// failure path.
    pub async fn execute(&mut self) -> Result<T, ApiError> {
        self.state.is_loading = true;
        self.state.error = None;

        let result = self.client.send::<T>(&self.spec).await;
        match &result {
            Ok(value) => self.state.data = Some(value.clone()),
            Err(error) => self.state.error = Some(error.clone()),
        }

        self.state.is_loading = false;
        result
    }

    pub fn data(&self) -> Option<&T> {
        self.state.data.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading
    }

    pub fn error(&self) -> Option<&ApiError> {
        self.state.error.as_ref()
    }
}
