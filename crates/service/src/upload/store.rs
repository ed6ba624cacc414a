use async_trait::async_trait;

/// Destination for uploaded objects.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Stores `body` under `key`. Errors carry a human readable reason.
    async fn put_object(&self, key: &str, body: Vec<u8>, content_type: &str) -> Result<(), String>;

    /// Public URL of an object previously stored under `key`.
    fn public_url(&self, key: &str) -> String;
}
