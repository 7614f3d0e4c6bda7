use std::collections::HashMap;

use crate::error::{AppError, AppResult};
use crate::models::user::UserRecord;
use crate::services::checkin::CheckInWorkflow;

/// In-memory user table keyed by email.
#[derive(Debug, Default)]
pub struct UserStore {
    users: HashMap<String, UserRecord>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, record: UserRecord) -> AppResult<&UserRecord> {
        if self.users.contains_key(&record.email) {
            return Err(AppError::Conflict(
                "An account with this email already exists".into(),
            ));
        }
        let email = record.email.clone();
        Ok(self.users.entry(email).or_insert(record))
    }

    /// Plaintext comparison; credentials here are demo-grade only.
    pub fn authenticate(&self, email: &str, password: &str) -> AppResult<&UserRecord> {
        self.users
            .get(email)
            .filter(|u| u.password == password)
            .ok_or(AppError::Unauthorized)
    }

    pub fn get(&self, email: &str) -> Option<&UserRecord> {
        self.users.get(email)
    }

    pub fn get_mut(&mut self, email: &str) -> Option<&mut UserRecord> {
        self.users.get_mut(email)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

/// The single signed-in user, if any, plus their uncommitted check-in.
#[derive(Debug, Default)]
pub struct Session {
    user_email: Option<String>,
    workflow: CheckInWorkflow,
}

impl Session {
    /// Replaces any existing session and starts a fresh check-in.
    pub fn start(&mut self, email: &str) {
        self.user_email = Some(email.to_string());
        self.workflow.reset();
    }

    /// Clears the session and discards any uncommitted check-in.
    pub fn end(&mut self) -> Option<String> {
        self.workflow.reset();
        self.user_email.take()
    }

    pub fn user_email(&self) -> Option<&str> {
        self.user_email.as_deref()
    }

    pub fn is_active(&self) -> bool {
        self.user_email.is_some()
    }

    pub fn workflow(&self) -> &CheckInWorkflow {
        &self.workflow
    }

    pub fn workflow_mut(&mut self) -> &mut CheckInWorkflow {
        &mut self.workflow
    }
}
