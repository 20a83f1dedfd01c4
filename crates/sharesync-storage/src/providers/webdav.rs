//! WebDAV remote client.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_LENGTH;
use reqwest::{Body, Client, Method, RequestBuilder, StatusCode, Url};
use tokio_util::io::ReaderStream;

use sharesync_core::config::RemoteConfig;
use sharesync_core::error::{AppError, ErrorKind};
use sharesync_core::result::AppResult;
use sharesync_core::traits::remote::{RemoteClient, RemoteConnector};

/// A WebDAV session bound to one endpoint and one set of credentials.
#[derive(Debug, Clone)]
pub struct WebDavClient {
    http: Client,
    base_url: Url,
    username: String,
    password: String,
}

impl WebDavClient {
    /// Create a new client for `base_url`.
    pub fn new(http: Client, base_url: &str, username: &str, password: &str) -> AppResult<Self> {
        let mut base_url = Url::parse(base_url).map_err(|e| {
            AppError::with_source(
                ErrorKind::Validation,
                format!("Invalid WebDAV URL '{base_url}'"),
                e,
            )
        })?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::validation(format!(
                "WebDAV URL '{base_url}' cannot be used as a base"
            )));
        }
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            http,
            base_url,
            username: username.to_string(),
            password: password.to_string(),
        })
    }

    /// Resolve an endpoint-relative path to an absolute URL.
    fn resource_url(&self, path: &str, collection: bool) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty();
            segments.extend(path_segments(path));
            if collection {
                segments.push("");
            }
        }
        url
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.http
            .request(method, url)
            .basic_auth(&self.username, Some(&self.password))
    }

    async fn send(&self, request: RequestBuilder, verb: &str, path: &str) -> AppResult<StatusCode> {
        let response = request.send().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::ExternalService,
                format!("WebDAV {verb} {path} failed: {e}"),
                e,
            )
        })?;
        Ok(response.status())
    }

    async fn mkcol(&self, path: &str) -> AppResult<()> {
        let method = Method::from_bytes(b"MKCOL")
            .map_err(|e| AppError::with_source(ErrorKind::Internal, "Invalid WebDAV method", e))?;
        let url = self.resource_url(path, true);
        let status = self.send(self.request(method, url), "MKCOL", path).await?;

        if mkcol_succeeded(status) {
            Ok(())
        } else {
            Err(AppError::external(format!(
                "WebDAV MKCOL {path}: unexpected status {status}"
            )))
        }
    }
}

#[async_trait]
impl RemoteClient for WebDavClient {
    async fn create_dir(&self, path: &str) -> AppResult<()> {
        let segments: Vec<&str> = path_segments(path).collect();
        for depth in 1..=segments.len() {
            let partial = segments[..depth].join("/");
            self.mkcol(&partial).await?;
        }
        tracing::debug!(dir = path, "WebDAV directory ensured");
        Ok(())
    }

    async fn upload(&self, local_path: &Path, remote_path: &str) -> AppResult<()> {
        let file = tokio::fs::File::open(local_path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to open {}: {e}", local_path.display()),
                e,
            )
        })?;
        let length = file.metadata().await?.len();
        let body = Body::wrap_stream(ReaderStream::new(file));

        // Explicit length keeps the body from being sent chunked.
        let url = self.resource_url(remote_path, false);
        let request = self
            .request(Method::PUT, url)
            .header(CONTENT_LENGTH, length)
            .body(body);
        let status = self.send(request, "PUT", remote_path).await?;

        if status.is_success() {
            tracing::debug!(remote_name = remote_path, %status, "WebDAV upload complete");
            Ok(())
        } else {
            Err(AppError::external(format!(
                "WebDAV PUT {remote_path}: unexpected status {status}"
            )))
        }
    }

    async fn delete(&self, remote_path: &str) -> AppResult<()> {
        let url = self.resource_url(remote_path, false);
        let request = self.request(Method::DELETE, url);
        let status = self.send(request, "DELETE", remote_path).await?;

        if delete_succeeded(status) {
            Ok(())
        } else {
            Err(AppError::external(format!(
                "WebDAV DELETE {remote_path}: unexpected status {status}"
            )))
        }
    }
}

/// Creates [`WebDavClient`]s sharing one HTTP connection pool.
#[derive(Debug, Clone)]
pub struct WebDavConnector {
    http: Client,
}

impl WebDavConnector {
    /// Create a new connector from remote client settings.
    pub fn new(config: &RemoteConfig) -> AppResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .user_agent(concat!("sharesync/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Internal, "Failed to build HTTP client", e)
            })?;
        Ok(Self { http })
    }
}

#[async_trait]
impl RemoteConnector for WebDavConnector {
    async fn connect(
        &self,
        endpoint: &str,
        user: &str,
        secret: &str,
    ) -> AppResult<Box<dyn RemoteClient>> {
        let client = WebDavClient::new(self.http.clone(), endpoint, user, secret)?;
        Ok(Box::new(client))
    }
}

/// 201 = created; 405 and 301 = the collection already exists.
fn mkcol_succeeded(status: StatusCode) -> bool {
    status.is_success()
        || status == StatusCode::METHOD_NOT_ALLOWED
        || status == StatusCode::MOVED_PERMANENTLY
}

/// A missing resource counts as deleted.
fn delete_succeeded(status: StatusCode) -> bool {
    status.is_success() || status == StatusCode::NOT_FOUND
}

fn path_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty() && *s != ".")
}
