// src/session.rs
//! Mock login sessions.
//!
//! Login never checks credentials: it only requires a user type plus a
//! non-empty username and password. The session id doubles as the bearer
//! token, and each session owns the dashboard state of its user.

use actix_web::dev::ServiceRequest;
use actix_web::{web, HttpMessage, HttpRequest};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use uuid::Uuid;

use crate::dashboard::DashboardState;
use crate::error::{is_filled, ApiError, ApiResult};
use crate::filter::empty_as_none;
use crate::navigation::UserType;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub user_type: Option<UserType>,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl LoginRequest {
    /// Returns the chosen user type once every field is present.
    pub fn check(&self) -> ApiResult<UserType> {
        let user_type = self
            .user_type
            .ok_or_else(|| ApiError::BadRequest("Παρακαλώ επιλέξτε τύπο χρήστη".to_string()))?;

        if !is_filled(&self.username) || !is_filled(&self.password) {
            return Err(ApiError::BadRequest(
                "Παρακαλώ συμπληρώστε όλα τα πεδία".to_string(),
            ));
        }

        Ok(user_type)
    }
}

pub struct Session {
    pub id: Uuid,
    pub user_type: UserType,
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
    pub dashboard: DashboardState,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionInfo {
    pub token: Uuid,
    pub user_type: UserType,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn info(&self) -> SessionInfo {
        SessionInfo {
            token: self.id,
            user_type: self.user_type,
            username: self.username.clone(),
            created_at: self.created_at,
        }
    }
}

pub type SharedSession = Arc<Mutex<Session>>;

/// Locks a session, recovering the guard if a handler panicked while holding it.
pub fn lock_session(session: &SharedSession) -> MutexGuard<'_, Session> {
    session.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, SharedSession>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&self, user_type: UserType, username: &str) -> SharedSession {
        let now = Utc::now();
        let session = Session {
            id: Uuid::new_v4(),
            user_type,
            username: username.trim().to_string(),
            created_at: now,
            last_seen: now,
            dashboard: DashboardState::for_user(user_type),
        };
        let id = session.id;
        let shared = Arc::new(Mutex::new(session));

        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, shared.clone());
        shared
    }

    /// Looks a session up and marks it as seen.
    pub fn touch(&self, id: &Uuid) -> Option<SharedSession> {
        let session = self
            .sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()?;
        lock_session(&session).last_seen = Utc::now();
        Some(session)
    }

    /// Dropping the session drops its dashboard and any armed timers.
    pub fn remove(&self, id: &Uuid) -> bool {
        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id)
            .is_some()
    }

    pub fn len(&self) -> usize {
        self.sessions.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes sessions idle for longer than `idle`. Returns how many went.
    pub fn sweep(&self, idle: chrono::Duration) -> usize {
        let cutoff = Utc::now() - idle;
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        let before = sessions.len();
        sessions.retain(|_, session| lock_session(session).last_seen >= cutoff);
        before - sessions.len()
    }
}

// ======== BEARER MIDDLEWARE ========

/// Session attached to an authenticated request.
#[derive(Clone)]
pub struct CurrentSession(pub SharedSession);

pub async fn session_middleware(
    req: ServiceRequest,
    credentials: BearerAuth,
) -> Result<ServiceRequest, (actix_web::Error, ServiceRequest)> {
    let app_state = match req.app_data::<web::Data<Arc<AppState>>>() {
        Some(state) => state.clone(),
        None => {
            log::error!("AppState not found in app data");
            return Err((
                ApiError::InternalServerError("Session store not available".to_string()).into(),
                req,
            ));
        }
    };

    let session = Uuid::parse_str(credentials.token())
        .ok()
        .and_then(|id| app_state.sessions.touch(&id));

    match session {
        Some(session) => {
            req.extensions_mut().insert(CurrentSession(session));
            Ok(req)
        }
        None => {
            log::warn!("Rejected request with unknown session token");
            Err((ApiError::session_expired().into(), req))
        }
    }
}

pub fn current_session(req: &HttpRequest) -> ApiResult<SharedSession> {
    req.extensions()
        .get::<CurrentSession>()
        .map(|current| current.0.clone())
        .ok_or_else(ApiError::session_expired)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn login(user_type: Option<UserType>, username: &str, password: &str) -> LoginRequest {
        LoginRequest {
            user_type,
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_login_checks() {
        let missing_type = login(None, "maria", "secret").check().unwrap_err();
        assert_eq!(missing_type.message(), "Παρακαλώ επιλέξτε τύπο χρήστη");

        let missing_field = login(Some(UserType::Admin), "maria", " ").check().unwrap_err();
        assert_eq!(missing_field.message(), "Παρακαλώ συμπληρώστε όλα τα πεδία");

        assert_eq!(
            login(Some(UserType::Citizen), "maria", "any").check().unwrap(),
            UserType::Citizen
        );
    }

    #[test]
    fn test_store_lifecycle() {
        let store = SessionStore::new();
        let session = store.create(UserType::Employee, " nikos ");
        let id = lock_session(&session).id;
        assert_eq!(lock_session(&session).username, "nikos");
        assert_eq!(store.len(), 1);

        assert!(store.touch(&id).is_some());
        assert!(store.touch(&Uuid::new_v4()).is_none());

        assert!(store.remove(&id));
        assert!(!store.remove(&id));
        assert!(store.is_empty());
    }

    #[test]
    fn test_sweep_drops_idle_sessions() {
        let store = SessionStore::new();
        let stale = store.create(UserType::Citizen, "old");
        store.create(UserType::Admin, "fresh");
        lock_session(&stale).last_seen = Utc::now() - chrono::Duration::minutes(90);

        assert_eq!(store.sweep(chrono::Duration::minutes(60)), 1);
        assert_eq!(store.len(), 1);
    }
}
