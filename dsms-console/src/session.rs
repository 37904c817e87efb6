//! Session store
//!
//! 会话持久化：当前用户 + token 对 + 已解析的权限码。
//! The store is constructed explicitly with its storage path and handed
//! to the application shell; nothing here is process-global. Hydrating
//! a session whose token has expired deletes the file and reports no
//! session.

use std::path::{Path, PathBuf};

use thiserror::Error;

use shared::client::{CurrentUser, TokenPair};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// An authenticated session
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Session {
    pub username: String,
    pub tokens: TokenPair,
    pub user: CurrentUser,
    /// Unix timestamp (seconds) when the access token expires, if the
    /// token carries an `exp` claim
    pub expires_at: Option<u64>,
    /// Milliseconds since the epoch
    pub logged_in_at: i64,
}

impl Session {
    /// 从 JWT token 中解析过期时间 (Unix timestamp)
    ///
    /// Tolerant: a malformed token yields `None`, never an error. The
    /// signature is not verified client-side.
    pub fn parse_jwt_exp(token: &str) -> Option<u64> {
        // JWT 格式: header.payload.signature
        let parts: Vec<&str> = token.split('.').collect();
        if parts.len() != 3 {
            return None;
        }

        use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
        let payload_bytes = URL_SAFE_NO_PAD.decode(parts[1]).ok()?;
        let payload: serde_json::Value = serde_json::from_slice(&payload_bytes).ok()?;
        payload.get("exp")?.as_u64()
    }

    /// Resolved backend privilege codes of the session user
    pub fn privileges(&self) -> &[String] {
        &self.user.privileges
    }

    fn is_expired(&self, now_secs: u64) -> bool {
        matches!(self.expires_at, Some(expires_at) if now_secs > expires_at)
    }
}

/// File-backed session store
pub struct SessionStore {
    file_path: PathBuf,
    current: Option<Session>,
}

impl SessionStore {
    /// Create an empty store persisting to `file_path`
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
            current: None,
        }
    }

    /// Hydrate from disk; an expired persisted session is cleared
    pub fn load(file_path: impl Into<PathBuf>) -> Result<Self, SessionError> {
        let file_path: PathBuf = file_path.into();

        let current = if file_path.exists() {
            let content = std::fs::read_to_string(&file_path)?;
            let session: Session = serde_json::from_str(&content)?;
            if session.is_expired(now_secs()) {
                let _ = std::fs::remove_file(&file_path);
                tracing::info!(username = %session.username, "Cached session expired, cleared");
                None
            } else {
                tracing::info!(username = %session.username, "Loaded cached session");
                Some(session)
            }
        } else {
            None
        };

        Ok(Self { file_path, current })
    }

    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Install a session and persist it
    pub fn set_current(&mut self, session: Session) -> Result<(), SessionError> {
        if let Some(parent) = self.file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&session)?;
        std::fs::write(&self.file_path, content)?;
        tracing::debug!(username = %session.username, "Session saved");
        self.current = Some(session);
        Ok(())
    }

    /// Logout: wipe memory and disk
    pub fn clear(&mut self) -> Result<(), SessionError> {
        self.current = None;
        if self.file_path.exists() {
            std::fs::remove_file(&self.file_path)?;
            tracing::debug!("Session cleared");
        }
        Ok(())
    }
}

fn now_secs() -> u64 {
    chrono::Utc::now().timestamp().max(0) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_session(expires_at: Option<u64>) -> Session {
        Session {
            username: "ops".to_string(),
            tokens: TokenPair {
                access_token: "a".to_string(),
                refresh_token: "r".to_string(),
                token_type: "bearer".to_string(),
            },
            user: CurrentUser {
                id: 1,
                username: "ops".to_string(),
                full_name: None,
                roles: vec!["storekeeper".to_string()],
                privileges: vec!["ITEM_VIEW".to_string()],
            },
            expires_at,
            logged_in_at: shared::util::now_millis(),
        }
    }

    #[test]
    fn test_save_load_clear_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("auth/session.json");

        let mut store = SessionStore::new(&path);
        store.set_current(sample_session(None)).unwrap();

        let reloaded = SessionStore::load(&path).unwrap();
        let session = reloaded.current().unwrap();
        assert_eq!(session.username, "ops");
        assert_eq!(session.privileges(), ["ITEM_VIEW".to_string()]);

        let mut store = reloaded;
        store.clear().unwrap();
        assert!(store.current().is_none());
        assert!(!path.exists());
    }

    #[test]
    fn test_expired_session_is_discarded_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let mut store = SessionStore::new(&path);
        // expired a long time ago
        store.set_current(sample_session(Some(1_000))).unwrap();

        let reloaded = SessionStore::load(&path).unwrap();
        assert!(reloaded.current().is_none());
        assert!(!path.exists());
    }

    #[test]
    fn test_missing_file_is_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::load(dir.path().join("nope.json")).unwrap();
        assert!(store.current().is_none());
    }

    #[test]
    fn test_parse_jwt_exp() {
        use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
        let payload = URL_SAFE_NO_PAD.encode(br#"{"sub":"ops","exp":1900000000}"#);
        let token = format!("eyJhbGciOiJIUzI1NiJ9.{}.sig", payload);
        assert_eq!(Session::parse_jwt_exp(&token), Some(1_900_000_000));

        assert_eq!(Session::parse_jwt_exp("not-a-jwt"), None);
        assert_eq!(Session::parse_jwt_exp("a.b.c"), None);
        let no_exp = URL_SAFE_NO_PAD.encode(br#"{"sub":"ops"}"#);
        assert_eq!(Session::parse_jwt_exp(&format!("h.{}.s", no_exp)), None);
    }
}
