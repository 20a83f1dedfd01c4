//! In-memory stores and remotes for share worker tests.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use uuid::Uuid;

use sharesync_core::error::AppError;
use sharesync_core::events::EventBus;
use sharesync_core::result::AppResult;
use sharesync_core::traits::remote::{RemoteClient, RemoteConnector};
use sharesync_database::store::{AccountStore, FileShareStore};
use sharesync_entity::account::{Account, AccountType};
use sharesync_entity::file::FileRef;
use sharesync_entity::share::{FileShare, FileShareStatus};
use sharesync_storage::thumbnail::{ThumbSize, ThumbnailDeriver};
use sharesync_worker::{ExecutionGate, ShareWorker};

pub const ORIGINALS: &str = "/srv/originals";

/// One day in `share_expires` units.
pub const DAY: i32 = 86_400;

/// A remote operation as observed by the fake remote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteCall {
    Connect(String),
    CreateDir(String),
    Upload(PathBuf, String),
    Delete(String),
}

pub fn webdav_account(name: &str) -> Account {
    Account {
        id: Uuid::new_v4(),
        acc_name: name.to_string(),
        acc_type: AccountType::Webdav,
        acc_url: format!("https://{name}.example.com/dav/"),
        acc_user: "alice".to_string(),
        acc_pass: "secret".to_string(),
        acc_share: true,
        share_size: None,
        share_expires: 0,
        retry_limit: 3,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn new_share(account: &Account, remote_name: &str, file_name: &str) -> FileShare {
    FileShare {
        id: Uuid::new_v4(),
        file_id: Uuid::new_v4(),
        account_id: account.id,
        remote_name: remote_name.to_string(),
        status: FileShareStatus::New,
        error: None,
        errors: 0,
        file: FileRef {
            file_name: file_name.to_string(),
            file_hash: format!("{:x}", Uuid::new_v4().as_u128()),
        },
        shared_at: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn shared_share(account: &Account, remote_name: &str, days_ago: i64) -> FileShare {
    let mut share = new_share(account, remote_name, "photo.jpg");
    share.status = FileShareStatus::Shared;
    share.shared_at = Some(Utc::now() - Duration::days(days_ago));
    share
}

/// Account table.
#[derive(Default)]
pub struct FakeAccounts {
    pub accounts: Vec<Account>,
    pub fail: bool,
}

#[async_trait]
impl AccountStore for FakeAccounts {
    async fn find_share_enabled(&self) -> AppResult<Vec<Account>> {
        if self.fail {
            return Err(AppError::database("accounts unavailable"));
        }
        Ok(self.accounts.iter().filter(|a| a.acc_share).cloned().collect())
    }
}

/// Share table applying the expiration rule of the SQL repository.
#[derive(Default)]
pub struct FakeShares {
    pub records: Mutex<Vec<FileShare>>,
    pub saves: Mutex<Vec<FileShare>>,
    pub fail_find_new: Mutex<HashSet<Uuid>>,
    pub fail_find_expired: Mutex<HashSet<Uuid>>,
    pub fail_save: Mutex<HashSet<Uuid>>,
}

impl FakeShares {
    pub fn with(records: Vec<FileShare>) -> Self {
        Self {
            records: Mutex::new(records),
            ..Self::default()
        }
    }

    pub fn get(&self, id: Uuid) -> FileShare {
        self.records
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .unwrap()
    }

    pub fn set(&self, share: FileShare) {
        let mut records = self.records.lock().unwrap();
        if let Some(existing) = records.iter_mut().find(|s| s.id == share.id) {
            *existing = share;
        }
    }

    pub fn save_count(&self) -> usize {
        self.saves.lock().unwrap().len()
    }
}

#[async_trait]
impl FileShareStore for FakeShares {
    async fn find_new(&self, account_id: Uuid) -> AppResult<Vec<FileShare>> {
        if self.fail_find_new.lock().unwrap().contains(&account_id) {
            return Err(AppError::database("file_shares unavailable"));
        }
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.account_id == account_id && s.status == FileShareStatus::New)
            .cloned()
            .collect())
    }

    async fn find_expired(&self, account: &Account) -> AppResult<Vec<FileShare>> {
        if self.fail_find_expired.lock().unwrap().contains(&account.id) {
            return Err(AppError::database("file_shares unavailable"));
        }
        if account.share_expires <= 0 {
            return Ok(Vec::new());
        }
        let cutoff = Utc::now() - Duration::seconds(i64::from(account.share_expires));
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|s| {
                s.account_id == account.id
                    && s.status.is_removable()
                    && s.shared_at.unwrap_or(s.created_at) < cutoff
            })
            .cloned()
            .collect())
    }

    async fn save(&self, share: &FileShare) -> AppResult<()> {
        self.saves.lock().unwrap().push(share.clone());
        if self.fail_save.lock().unwrap().contains(&share.id) {
            return Err(AppError::database("write rejected"));
        }
        self.set(share.clone());
        Ok(())
    }
}

type Hook = Arc<dyn Fn(&RemoteCall) + Send + Sync>;

/// Shared behavior and call log of the fake remote.
#[derive(Default)]
pub struct RemoteState {
    pub calls: Mutex<Vec<RemoteCall>>,
    pub fail_connect: Mutex<HashSet<String>>,
    pub fail_dirs: Mutex<HashSet<String>>,
    pub fail_uploads: Mutex<HashSet<String>>,
    pub fail_deletes: Mutex<HashSet<String>>,
    pub hook: Mutex<Option<Hook>>,
}

impl RemoteState {
    pub fn calls(&self) -> Vec<RemoteCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, pred: impl Fn(&RemoteCall) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| pred(c)).count()
    }

    fn record(&self, call: RemoteCall) {
        self.calls.lock().unwrap().push(call.clone());
        let hook = self.hook.lock().unwrap().clone();
        if let Some(hook) = hook {
            hook(&call);
        }
    }
}

pub struct FakeConnector {
    pub state: Arc<RemoteState>,
}

#[async_trait]
impl RemoteConnector for FakeConnector {
    async fn connect(
        &self,
        endpoint: &str,
        _user: &str,
        _secret: &str,
    ) -> AppResult<Box<dyn RemoteClient>> {
        self.state.record(RemoteCall::Connect(endpoint.to_string()));
        if self.state.fail_connect.lock().unwrap().contains(endpoint) {
            return Err(AppError::external("connection refused"));
        }
        Ok(Box::new(FakeClient {
            state: Arc::clone(&self.state),
        }))
    }
}

pub struct FakeClient {
    state: Arc<RemoteState>,
}

#[async_trait]
impl RemoteClient for FakeClient {
    async fn create_dir(&self, path: &str) -> AppResult<()> {
        self.state.record(RemoteCall::CreateDir(path.to_string()));
        if self.state.fail_dirs.lock().unwrap().contains(path) {
            return Err(AppError::external(format!("MKCOL {path}: 403 Forbidden")));
        }
        Ok(())
    }

    async fn upload(&self, local_path: &Path, remote_path: &str) -> AppResult<()> {
        self.state.record(RemoteCall::Upload(
            local_path.to_path_buf(),
            remote_path.to_string(),
        ));
        if self.state.fail_uploads.lock().unwrap().contains(remote_path) {
            return Err(AppError::external(format!("PUT {remote_path}: 507 Insufficient Storage")));
        }
        Ok(())
    }

    async fn delete(&self, remote_path: &str) -> AppResult<()> {
        self.state.record(RemoteCall::Delete(remote_path.to_string()));
        if self.state.fail_deletes.lock().unwrap().contains(remote_path) {
            return Err(AppError::external(format!("DELETE {remote_path}: 423 Locked")));
        }
        Ok(())
    }
}

/// Thumbnail deriver returning a predictable cache path.
#[derive(Default)]
pub struct FakeThumbs {
    pub derived: Mutex<Vec<(PathBuf, String, ThumbSize)>>,
    pub fail: bool,
}

#[async_trait]
impl ThumbnailDeriver for FakeThumbs {
    async fn derive(&self, source: &Path, hash: &str, size: ThumbSize) -> AppResult<PathBuf> {
        self.derived
            .lock()
            .unwrap()
            .push((source.to_path_buf(), hash.to_string(), size));
        if self.fail {
            return Err(AppError::storage(format!("Failed to decode {}", source.display())));
        }
        Ok(PathBuf::from(format!("/cache/{hash}_{size}.jpg")))
    }
}

/// Worker wired to fakes.
pub struct Harness {
    pub worker: Arc<ShareWorker>,
    pub shares: Arc<FakeShares>,
    pub remote: Arc<RemoteState>,
    pub thumbs: Arc<FakeThumbs>,
    pub gate: Arc<ExecutionGate>,
    pub events: EventBus,
}

impl Harness {
    pub fn new(accounts: FakeAccounts, shares: FakeShares) -> Self {
        Self::with_thumbs(accounts, shares, FakeThumbs::default())
    }

    pub fn with_thumbs(accounts: FakeAccounts, shares: FakeShares, thumbs: FakeThumbs) -> Self {
        let gate = Arc::new(ExecutionGate::new("share"));
        let shares = Arc::new(shares);
        let remote = Arc::new(RemoteState::default());
        let thumbs = Arc::new(thumbs);
        let events = EventBus::new(64);

        let worker = Arc::new(ShareWorker::new(
            Arc::clone(&gate),
            Arc::new(accounts),
            shares.clone(),
            Arc::new(FakeConnector {
                state: Arc::clone(&remote),
            }),
            thumbs.clone(),
            events.clone(),
            ORIGINALS,
        ));

        Self {
            worker,
            shares,
            remote,
            thumbs,
            gate,
            events,
        }
    }
}

/// Index of uploads by remote name.
pub fn uploads(calls: &[RemoteCall]) -> HashMap<String, PathBuf> {
    calls
        .iter()
        .filter_map(|c| match c {
            RemoteCall::Upload(local, remote) => Some((remote.clone(), local.clone())),
            _ => None,
        })
        .collect()
}
