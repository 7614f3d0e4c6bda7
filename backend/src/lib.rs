//! WellnessTrack: daily wellness check-ins, scoring and dashboard metrics.
//!
//! All state is held in an [`AppState`] owned by the caller; nothing is
//! persisted.

pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;

use config::Config;
use error::{AppError, AppResult};
use models::user::UserRecord;
use services::store::{Session, UserStore};

#[derive(Debug)]
pub struct AppState {
    pub config: Config,
    pub users: UserStore,
    pub session: Session,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            users: UserStore::new(),
            session: Session::default(),
        }
    }

    /// Email of the signed-in user.
    pub fn current_email(&self) -> AppResult<String> {
        self.session
            .user_email()
            .map(str::to_string)
            .ok_or_else(|| AppError::NotFound("No active session".into()))
    }

    pub fn current_user(&self) -> AppResult<&UserRecord> {
        let email = self.current_email()?;
        self.users
            .get(&email)
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", email)))
    }
}
