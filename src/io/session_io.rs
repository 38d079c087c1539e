use std::fs;
use std::path::{Path, PathBuf};

use crate::api::{ApiError, ContentApi};
use crate::model::{Credentials, Session};

use super::atomic_write;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("login failed: {}", .0.user_message())]
    Login(#[from] ApiError),
    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not encode session: {0}")]
    Encode(#[from] serde_json::Error),
}

pub fn session_path(config_dir: &Path) -> PathBuf {
    config_dir.join("session.json")
}

/// Read a stored session. A missing or unreadable file means logged out.
pub fn read_session(path: &Path) -> Option<Session> {
    let content = fs::read_to_string(path).ok()?;
    match serde_json::from_str(&content) {
        Ok(session) => Some(session),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring malformed session file");
            None
        }
    }
}

pub fn write_session(path: &Path, session: &Session) -> Result<(), SessionError> {
    let content = serde_json::to_string_pretty(session)?;
    atomic_write(path, content.as_bytes()).map_err(|e| SessionError::Write {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Who is logged in, if anyone, shared by every screen and command.
///
/// The session changes only through [`AuthContext::login`] and
/// [`AuthContext::logout`], and each change is written through to disk.
#[derive(Debug, Clone)]
pub struct AuthContext {
    path: PathBuf,
    session: Option<Session>,
}

impl AuthContext {
    pub fn load(path: PathBuf) -> Self {
        let session = read_session(&path);
        AuthContext { path, session }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.token.as_str())
    }

    pub fn is_admin(&self) -> bool {
        self.session.as_ref().is_some_and(Session::is_admin)
    }

    pub fn login(
        &mut self,
        api: &dyn ContentApi,
        credentials: &Credentials,
    ) -> Result<&Session, SessionError> {
        let session = api.login(credentials).inspect_err(|e| {
            tracing::warn!(email = %credentials.email, error = %e, "login rejected");
        })?;
        write_session(&self.path, &session)?;
        tracing::info!(email = %session.user.email, role = %session.user.role, "logged in");
        Ok(&*self.session.insert(session))
    }

    /// Forget the session and remove the stored file.
    pub fn logout(&mut self) -> Result<(), SessionError> {
        self.session = None;
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SessionError::Write {
                path: self.path.clone(),
                source: e,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MemoryApi;
    use tempfile::TempDir;

    fn creds(password: &str) -> Credentials {
        Credentials {
            email: "admin@ods.org".into(),
            password: password.into(),
        }
    }

    #[test]
    fn login_persists_and_reloads() {
        let tmp = TempDir::new().unwrap();
        let path = session_path(tmp.path());
        let api = MemoryApi::new();
        api.add_account("admin@ods.org", "pw", "admin");

        let mut auth = AuthContext::load(path.clone());
        assert!(auth.token().is_none());
        auth.login(&api, &creds("pw")).unwrap();
        assert!(auth.is_admin());

        let reloaded = AuthContext::load(path);
        assert_eq!(reloaded.session(), auth.session());
    }

    #[test]
    fn failed_login_keeps_previous_state() {
        let tmp = TempDir::new().unwrap();
        let path = session_path(tmp.path());
        let api = MemoryApi::new();
        api.add_account("admin@ods.org", "pw", "admin");

        let mut auth = AuthContext::load(path.clone());
        let err = auth.login(&api, &creds("wrong")).unwrap_err();
        assert!(matches!(err, SessionError::Login(_)));
        assert!(auth.session().is_none());
        assert!(!path.exists());
    }

    #[test]
    fn logout_removes_file_and_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let path = session_path(tmp.path());
        let api = MemoryApi::new();
        api.add_account("admin@ods.org", "pw", "user");

        let mut auth = AuthContext::load(path.clone());
        auth.login(&api, &creds("pw")).unwrap();
        assert!(!auth.is_admin());
        auth.logout().unwrap();
        auth.logout().unwrap();
        assert!(!path.exists());
        assert!(auth.token().is_none());
    }

    #[test]
    fn malformed_file_reads_as_logged_out() {
        let tmp = TempDir::new().unwrap();
        let path = session_path(tmp.path());
        fs::write(&path, "{not json").unwrap();
        assert!(read_session(&path).is_none());
    }
}
