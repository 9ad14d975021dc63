use std::future::Future;

use tokio::sync::watch;

use crate::client::model::error::ApiError;

/// Loading flag, last error and last data of one request.
///
/// A failed run keeps the previous data so a list does not blank out on a transient error.
pub struct Query<T> {
    loading: watch::Sender<bool>,
    error: watch::Sender<Option<ApiError>>,
    data: watch::Sender<Option<T>>,
}

impl<T: Clone> Query<T> {
    pub fn new() -> Self {
        Self {
            loading: watch::Sender::new(false),
            error: watch::Sender::new(None),
            data: watch::Sender::new(None),
        }
    }

    pub fn is_loading(&self) -> bool {
        *self.loading.borrow()
    }

    pub fn error(&self) -> Option<ApiError> {
        self.error.borrow().clone()
    }

    pub fn data(&self) -> Option<T> {
        self.data.borrow().clone()
    }

    pub fn subscribe_loading(&self) -> watch::Receiver<bool> {
        self.loading.subscribe()
    }

    pub fn subscribe_error(&self) -> watch::Receiver<Option<ApiError>> {
        self.error.subscribe()
    }

    pub fn subscribe_data(&self) -> watch::Receiver<Option<T>> {
        self.data.subscribe()
    }

    /// Runs `request`, publishing the loading flag around it and its outcome afterwards.
    pub async fn run<F, Fut>(&self, request: F) -> Result<T, ApiError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        self.loading.send_replace(true);
        self.error.send_replace(None);

        let result = request().await;
        match &result {
            Ok(data) => {
                self.data.send_replace(Some(data.clone()));
            }
            Err(e) => {
                self.error.send_replace(Some(e.clone()));
            }
        }

        self.loading.send_replace(false);
        result
    }

    /// Replaces the data without a request, e.g. with a mutation's response.
    pub fn set(&self, data: T) {
        self.data.send_replace(Some(data));
    }

    /// Forgets data and error.
    pub fn clear(&self) {
        self.data.send_replace(None);
        self.error.send_replace(None);
    }
}

impl<T: Clone> Default for Query<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn publishes_data_and_keeps_it_on_error() {
        let query = Query::<Vec<i32>>::new();
        let mut data = query.subscribe_data();

        let result = query.run(|| async { Ok(vec![1, 2]) }).await;

        assert_eq!(result, Ok(vec![1, 2]));
        assert!(data.has_changed().unwrap());
        assert_eq!(*data.borrow_and_update(), Some(vec![1, 2]));
        assert!(!query.is_loading());

        let result = query
            .run(|| async { Err(ApiError::new(404, "找不到此比賽")) })
            .await;

        assert!(result.is_err());
        assert_eq!(query.error().map(|e| e.status), Some(404));
        assert_eq!(query.data(), Some(vec![1, 2]));
    }

    #[tokio::test]
    async fn loading_flag_is_set_while_running() {
        let query = Query::<u8>::new();
        let loading = query.subscribe_loading();
        let probe = loading.clone();

        query
            .run(move || async move {
                assert!(*probe.borrow());
                Ok(1)
            })
            .await
            .unwrap();

        assert!(!*loading.borrow());
    }

    #[tokio::test]
    async fn new_run_clears_previous_error() {
        let query = Query::<u8>::new();

        let _ = query.run(|| async { Err(ApiError::new(500, "boom")) }).await;
        assert!(query.error().is_some());

        query.run(|| async { Ok(3) }).await.unwrap();

        assert_eq!(query.error(), None);
        assert_eq!(query.data(), Some(3));
    }
}
