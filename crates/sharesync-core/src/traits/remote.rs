//! Remote file client capability traits.

use std::path::Path;

use async_trait::async_trait;

use crate::result::AppResult;

/// A session against one remote file endpoint.
///
/// Paths are relative to the endpoint the client was connected to. One
/// client is reused for every record of an account within a run.
#[async_trait]
pub trait RemoteClient: Send + Sync {
    /// Create a directory and any missing parents.
    ///
    /// Must succeed when the directory already exists.
    async fn create_dir(&self, path: &str) -> AppResult<()>;

    /// Upload a local file to the given remote path, replacing any existing object.
    async fn upload(&self, local_path: &Path, remote_path: &str) -> AppResult<()>;

    /// Delete the object at the given remote path.
    async fn delete(&self, remote_path: &str) -> AppResult<()>;
}

/// Factory producing [`RemoteClient`]s bound to an endpoint and credentials.
#[async_trait]
pub trait RemoteConnector: Send + Sync {
    /// Connect to `endpoint` using the given credentials.
    async fn connect(
        &self,
        endpoint: &str,
        user: &str,
        secret: &str,
    ) -> AppResult<Box<dyn RemoteClient>>;
}
