//! File share entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use sharesync_core::types::RetryLimit;

use super::status::FileShareStatus;
use crate::file::FileRef;

/// One local file queued for replication to one remote account.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FileShare {
    /// Unique share record identifier.
    pub id: Uuid,
    /// The shared file.
    pub file_id: Uuid,
    /// The target account.
    pub account_id: Uuid,
    /// Target path on the remote account.
    pub remote_name: String,
    /// Current status.
    pub status: FileShareStatus,
    /// Last transfer error message.
    pub error: Option<String>,
    /// Consecutive transfer failures.
    pub errors: i32,
    /// Name and hash of the shared file (joined from `files`).
    #[sqlx(flatten)]
    pub file: FileRef,
    /// When the file was last uploaded; the share period counts from here.
    pub shared_at: Option<DateTime<Utc>>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}

impl FileShare {
    /// Record a successful upload.
    pub fn mark_shared(&mut self) {
        self.clear_errors();
        self.status = FileShareStatus::Shared;
        self.shared_at = Some(Utc::now());
    }

    /// Record a successful remote deletion.
    pub fn mark_removed(&mut self) {
        self.clear_errors();
        self.status = FileShareStatus::Removed;
    }

    /// Count a failed transfer. The status is left untouched.
    pub fn record_failure(&mut self, message: impl Into<String>) {
        self.errors = self.errors.saturating_add(1);
        self.error = Some(message.into());
    }

    /// Demote the record to [`FileShareStatus::Error`] once `limit` is exceeded.
    ///
    /// Returns `true` if the record is in the error state afterwards because of this check.
    pub fn apply_retry_limit(&mut self, limit: RetryLimit) -> bool {
        let errors = u32::try_from(self.errors).unwrap_or(0);
        if limit.is_exceeded_by(errors) {
            self.status = FileShareStatus::Error;
            true
        } else {
            false
        }
    }

    /// Parent directory of the remote target, or `None` for the endpoint root.
    pub fn remote_dir(&self) -> Option<&str> {
        let trimmed = self.remote_name.trim_end_matches('/');
        let dir = match trimmed.rfind('/') {
            Some(idx) => &trimmed[..idx],
            None => return None,
        };
        if dir.is_empty() || dir == "." {
            None
        } else {
            Some(dir)
        }
    }

    fn clear_errors(&mut self) {
        self.errors = 0;
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn share(remote_name: &str) -> FileShare {
        FileShare {
            id: Uuid::new_v4(),
            file_id: Uuid::new_v4(),
            account_id: Uuid::new_v4(),
            remote_name: remote_name.to_string(),
            status: FileShareStatus::New,
            error: None,
            errors: 0,
            file: FileRef {
                file_name: "2024/06/IMG_0001.jpg".to_string(),
                file_hash: "a1b2c3d4".to_string(),
            },
            shared_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_failures_demote_after_limit() {
        let mut s = share("/shared/album1/a.jpg");
        let limit = RetryLimit::Max(2);

        for attempt in 1..=2 {
            s.record_failure(format!("timeout {attempt}"));
            assert!(!s.apply_retry_limit(limit));
            assert_eq!(s.status, FileShareStatus::New);
        }

        s.record_failure("timeout 3");
        assert!(s.apply_retry_limit(limit));
        assert_eq!(s.status, FileShareStatus::Error);
        assert_eq!(s.errors, 3);
        assert_eq!(s.error.as_deref(), Some("timeout 3"));
    }

    #[test]
    fn test_unbounded_never_demotes() {
        let mut s = share("a.jpg");
        for _ in 0..50 {
            s.record_failure("refused");
            assert!(!s.apply_retry_limit(RetryLimit::Unbounded));
        }
        assert_eq!(s.status, FileShareStatus::New);
        assert_eq!(s.errors, 50);
    }

    #[test]
    fn test_success_resets_counters() {
        let mut s = share("/a/b.jpg");
        s.record_failure("boom");
        s.record_failure("boom");
        s.mark_shared();
        assert_eq!(s.status, FileShareStatus::Shared);
        assert_eq!(s.errors, 0);
        assert!(s.error.is_none());
        assert!(s.shared_at.is_some());

        s.status = FileShareStatus::Error;
        s.record_failure("gone");
        s.mark_removed();
        assert_eq!(s.status, FileShareStatus::Removed);
        assert_eq!(s.errors, 0);
        assert!(s.error.is_none());
    }

    #[test]
    fn test_remote_dir() {
        assert_eq!(share("/shared/album1/a.jpg").remote_dir(), Some("/shared/album1"));
        assert_eq!(share("shared/a.jpg").remote_dir(), Some("shared"));
        assert_eq!(share("/a.jpg").remote_dir(), None);
        assert_eq!(share("a.jpg").remote_dir(), None);
        assert_eq!(share("./a.jpg").remote_dir(), None);
    }

    #[test]
    fn test_removable_states() {
        assert!(FileShareStatus::Shared.is_removable());
        assert!(FileShareStatus::Error.is_removable());
        assert!(!FileShareStatus::New.is_removable());
        assert!(!FileShareStatus::Removed.is_removable());
    }
}
