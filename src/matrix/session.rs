//! On-disk persistence of the Matrix session.
//!
//! The data directory holds two entries:
//! - `session`: JSON file with the access tokens and the last sync token
//! - `sqlite`: Matrix SDK state store

use std::path::{Path, PathBuf};

use log::{debug, trace};
use matrix_sdk::authentication::matrix::MatrixSession;
use serde::{Deserialize, Serialize};
use tokio::fs;

/// Content of the `session` file.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedSession {
    user_session: MatrixSession,
    #[serde(skip_serializing_if = "Option::is_none")]
    sync_token: Option<String>,
}

/// Session file and SDK store locations, with the session loaded at startup.
#[derive(Debug, Clone)]
pub struct SessionStore {
    /// Session found on disk when the store was opened
    session: Option<PersistedSession>,
    sqlite_path: PathBuf,
    session_path: PathBuf,
}

impl SessionStore {
    /// Opens the store in `dir_path`, creating the directory if needed.
    ///
    /// A missing or unreadable session file is not an error: the bot then
    /// logs in with its password.
    pub async fn open(dir_path: impl AsRef<Path>) -> Result<Self, anyhow::Error> {
        let dir_path = dir_path.as_ref();
        fs::create_dir_all(dir_path).await?;

        let sqlite_path = dir_path.join("sqlite");
        let session_path = dir_path.join("session");
        debug!(
            "session store at {}, sqlite store at {}",
            session_path.display(),
            sqlite_path.display()
        );

        let session = match read_session(&session_path).await {
            Ok(session) => Some(session),
            Err(e) => {
                debug!("no usable session: {}", e);
                None
            }
        };

        Ok(SessionStore {
            session,
            sqlite_path,
            session_path,
        })
    }

    pub fn sqlite_path(&self) -> &Path {
        &self.sqlite_path
    }

    /// Access tokens of the persisted session, if any.
    pub fn user_session(&self) -> Option<&MatrixSession> {
        self.session.as_ref().map(|s| &s.user_session)
    }

    /// Sync token persisted by the last run, if any.
    pub fn sync_token(&self) -> Option<String> {
        self.session.as_ref().and_then(|s| s.sync_token.clone())
    }

    /// Writes a fresh session file, without sync token.
    pub async fn save_user_session(&self, user_session: &MatrixSession) -> anyhow::Result<()> {
        trace!("save user session");

        let session = PersistedSession {
            user_session: user_session.clone(),
            sync_token: None,
        };
        fs::write(&self.session_path, serde_json::to_string(&session)?).await?;

        Ok(())
    }

    /// Updates the sync token of the session file.
    ///
    /// # Errors
    ///
    /// Fails if no session file was saved before.
    pub async fn save_sync_token(&self, sync_token: String) -> anyhow::Result<()> {
        trace!("save sync token {}", sync_token);

        let mut session = read_session(&self.session_path).await?;
        session.sync_token = Some(sync_token);
        fs::write(&self.session_path, serde_json::to_string(&session)?).await?;

        Ok(())
    }
}

async fn read_session(session_path: &Path) -> anyhow::Result<PersistedSession> {
    let content = fs::read_to_string(session_path).await?;
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use matrix_sdk::{SessionMeta, SessionTokens};
    use tempfile::TempDir;

    use super::*;

    fn user_session() -> MatrixSession {
        MatrixSession {
            meta: SessionMeta {
                user_id: "@alphabot:example.com".try_into().unwrap(),
                device_id: "DEVICEID".into(),
            },
            tokens: SessionTokens {
                access_token: "access_token".to_string(),
                refresh_token: None,
            },
        }
    }

    #[tokio::test]
    async fn test_open_empty_directory() {
        let temp_dir = TempDir::new().unwrap();

        let store = SessionStore::open(temp_dir.path()).await.unwrap();

        assert!(store.user_session().is_none());
        assert!(store.sync_token().is_none());
        assert_eq!(store.sqlite_path(), temp_dir.path().join("sqlite"));
    }

    #[tokio::test]
    async fn test_open_creates_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let data_dir = temp_dir.path().join("nested").join("data");

        SessionStore::open(&data_dir).await.unwrap();

        assert!(data_dir.is_dir());
    }

    #[tokio::test]
    async fn test_open_ignores_corrupted_session() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("session"), "not json")
            .await
            .unwrap();

        let store = SessionStore::open(temp_dir.path()).await.unwrap();
        assert!(store.user_session().is_none());
    }

    #[tokio::test]
    async fn test_saved_session_is_restored() {
        let temp_dir = TempDir::new().unwrap();

        let store = SessionStore::open(temp_dir.path()).await.unwrap();
        store.save_user_session(&user_session()).await.unwrap();
        store.save_sync_token("s123".to_owned()).await.unwrap();

        let reopened = SessionStore::open(temp_dir.path()).await.unwrap();
        assert_eq!(
            reopened.user_session().unwrap().meta.user_id.to_string(),
            "@alphabot:example.com"
        );
        assert_eq!(reopened.sync_token(), Some("s123".to_owned()));
    }

    #[tokio::test]
    async fn test_new_user_session_drops_sync_token() {
        let temp_dir = TempDir::new().unwrap();

        let store = SessionStore::open(temp_dir.path()).await.unwrap();
        store.save_user_session(&user_session()).await.unwrap();
        store.save_sync_token("s123".to_owned()).await.unwrap();
        store.save_user_session(&user_session()).await.unwrap();

        let content = fs::read_to_string(temp_dir.path().join("session"))
            .await
            .unwrap();
        assert!(!content.contains("sync_token"));
    }

    #[tokio::test]
    async fn test_save_sync_token_without_session() {
        let temp_dir = TempDir::new().unwrap();
        let store = SessionStore::open(temp_dir.path()).await.unwrap();

        assert!(store.save_sync_token("s1".to_owned()).await.is_err());
    }
}
