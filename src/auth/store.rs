use async_trait::async_trait;
use serde::Serialize;
use time::OffsetDateTime;
use tokio::sync::RwLock;

use crate::error::AppError;

/// Filename recorded when a signup supplies no profile image.
pub const DEFAULT_PROFILE_IMAGE: &str = "default.jpg";

/// A registered user. Records live only as long as the process; there is no
/// persistence behind the in-memory store.
#[derive(Debug, Clone, Serialize)]
pub struct UserRecord {
    pub first_name: String,
    pub last_name: String,
    pub email: String, // unique identifier among records
    #[serde(skip_serializing)]
    pub password_hash: String, // Argon2 hash, never the plaintext
    pub profile_image: String, // filename under the upload area, or the default
    pub created_at: OffsetDateTime,
}

impl UserRecord {
    /// True when the record points at an uploaded file rather than the default.
    pub fn has_custom_image(&self) -> bool {
        self.profile_image != DEFAULT_PROFILE_IMAGE
    }
}

/// Storage seam for user records. The memory-backed implementation below is
/// the only one wired in; a document-store-backed one could slot in here
/// without touching the flows.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn exists(&self, email: &str) -> bool;
    /// Append a record. Rejects an email that is already present, so two
    /// concurrent signups for the same email cannot both land.
    async fn insert(&self, record: UserRecord) -> Result<(), AppError>;
    async fn find_by_email(&self, email: &str) -> Option<UserRecord>;
    /// Remove and return in one step so the caller can inspect
    /// `profile_image` for cleanup.
    async fn remove_by_email(&self, email: &str) -> Option<UserRecord>;
    async fn list(&self) -> Vec<UserRecord>;
}

/// Ordered, process-lifetime collection of user records. Lookup is a
/// case-sensitive exact scan; emails are stored as submitted.
#[derive(Default)]
pub struct MemoryUserStore {
    records: RwLock<Vec<UserRecord>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn exists(&self, email: &str) -> bool {
        self.records.read().await.iter().any(|u| u.email == email)
    }

    async fn insert(&self, record: UserRecord) -> Result<(), AppError> {
        let mut records = self.records.write().await;
        if records.iter().any(|u| u.email == record.email) {
            return Err(AppError::DuplicateUser);
        }
        records.push(record);
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Option<UserRecord> {
        self.records
            .read()
            .await
            .iter()
            .find(|u| u.email == email)
            .cloned()
    }

    async fn remove_by_email(&self, email: &str) -> Option<UserRecord> {
        let mut records = self.records.write().await;
        let idx = records.iter().position(|u| u.email == email)?;
        Some(records.remove(idx))
    }

    async fn list(&self) -> Vec<UserRecord> {
        self.records.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(email: &str) -> UserRecord {
        UserRecord {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: email.into(),
            password_hash: "$argon2id$fake".into(),
            profile_image: DEFAULT_PROFILE_IMAGE.into(),
            created_at: OffsetDateTime::now_utc(),
        }
    }

    #[tokio::test]
    async fn insert_then_find_returns_record() {
        let store = MemoryUserStore::new();
        store.insert(record("ada@example.com")).await.expect("insert");

        assert!(store.exists("ada@example.com").await);
        let found = store
            .find_by_email("ada@example.com")
            .await
            .expect("should be found");
        assert_eq!(found.first_name, "Ada");
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_email() {
        let store = MemoryUserStore::new();
        store.insert(record("ada@example.com")).await.expect("insert");

        let err = store
            .insert(record("ada@example.com"))
            .await
            .expect_err("duplicate must be rejected");
        assert!(matches!(err, AppError::DuplicateUser));
        assert_eq!(store.list().await.len(), 1);
    }

    #[tokio::test]
    async fn lookup_is_case_sensitive() {
        let store = MemoryUserStore::new();
        store.insert(record("Ada@example.com")).await.expect("insert");

        assert!(!store.exists("ada@example.com").await);
        assert!(store.find_by_email("ada@example.com").await.is_none());
    }

    #[tokio::test]
    async fn remove_returns_record_exactly_once() {
        let store = MemoryUserStore::new();
        store.insert(record("ada@example.com")).await.expect("insert");

        let removed = store
            .remove_by_email("ada@example.com")
            .await
            .expect("first removal returns the record");
        assert_eq!(removed.email, "ada@example.com");
        assert!(store.remove_by_email("ada@example.com").await.is_none());
        assert!(store.list().await.is_empty());
    }

    #[tokio::test]
    async fn list_preserves_insertion_order() {
        let store = MemoryUserStore::new();
        store.insert(record("first@example.com")).await.expect("insert");
        store.insert(record("second@example.com")).await.expect("insert");

        let emails: Vec<String> = store.list().await.into_iter().map(|u| u.email).collect();
        assert_eq!(emails, vec!["first@example.com", "second@example.com"]);
    }

    #[test]
    fn password_hash_is_never_serialized() {
        let json = serde_json::to_string(&record("ada@example.com")).expect("serialize");
        assert!(json.contains("ada@example.com"));
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("argon2"));
    }
}
