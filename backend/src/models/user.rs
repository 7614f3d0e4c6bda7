use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::daily_entry::DailyEntry;
use crate::services::metrics::compute_wellness_score;

#[derive(Debug, Clone, Serialize)]
pub struct UserRecord {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub name: String,
    pub department: String,
    #[serde(skip_serializing)]
    entries: HashMap<NaiveDate, DailyEntry>,
    pub created_at: DateTime<Utc>,
}

impl UserRecord {
    pub fn new(email: &str, password: &str, name: &str, department: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password: password.to_string(),
            name: name.to_string(),
            department: department.to_string(),
            entries: HashMap::new(),
            created_at: Utc::now(),
        }
    }

    /// All entries, newest first.
    pub fn history(&self) -> Vec<DailyEntry> {
        let mut entries: Vec<DailyEntry> = self.entries.values().cloned().collect();
        entries.sort_by(|a, b| b.date.cmp(&a.date));
        entries
    }

    pub fn entry(&self, date: NaiveDate) -> Option<&DailyEntry> {
        self.entries.get(&date)
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Stores `entry` under its date, returning the entry it replaced. The
    /// stored score is always recomputed from the entry's own values.
    pub fn commit(&mut self, mut entry: DailyEntry) -> Option<DailyEntry> {
        entry.wellness_score = compute_wellness_score(&entry);
        self.entries.insert(entry.date, entry)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub department: String,
    pub total_check_ins: usize,
    pub created_at: DateTime<Utc>,
}

impl From<&UserRecord> for UserProfile {
    fn from(u: &UserRecord) -> Self {
        Self {
            id: u.id,
            email: u.email.clone(),
            name: u.name.clone(),
            department: u.department.clone(),
            total_check_ins: u.entry_count(),
            created_at: u.created_at,
        }
    }
}
