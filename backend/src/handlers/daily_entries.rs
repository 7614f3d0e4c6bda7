use chrono::NaiveDate;

use crate::error::{AppError, AppResult};
use crate::models::daily_entry::DailyEntry;
use crate::AppState;

/// Signed-in user's entries, newest first.
pub fn list_entries(state: &AppState) -> AppResult<Vec<DailyEntry>> {
    Ok(state.current_user()?.history())
}

pub fn get_entry(state: &AppState, date: NaiveDate) -> AppResult<DailyEntry> {
    state
        .current_user()?
        .entry(date)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("No check-in recorded for {}", date)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::models::daily_entry::CheckInInputs;
    use crate::models::rating::Ratings;
    use crate::models::user::UserRecord;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 4, d).unwrap()
    }

    fn state_with_entries(days: &[u32]) -> AppState {
        let mut state = AppState::new(Config::default());
        let mut user = UserRecord::new("jo@company.com", "secret", "Jo", "Finance");
        for &d in days {
            user.commit(DailyEntry::from_check_in(
                day(d),
                &CheckInInputs::from_raw("6000", "", "7", "2"),
                &Ratings::default(),
            ));
        }
        state.users.register(user).unwrap();
        state.session.start("jo@company.com");
        state
    }

    #[test]
    fn test_list_entries_newest_first() {
        let state = state_with_entries(&[3, 9, 5]);
        let dates: Vec<NaiveDate> = list_entries(&state).unwrap().iter().map(|e| e.date).collect();
        assert_eq!(dates, vec![day(9), day(5), day(3)]);
    }

    #[test]
    fn test_list_entries_empty_history() {
        let state = state_with_entries(&[]);
        assert!(list_entries(&state).unwrap().is_empty());
    }

    #[test]
    fn test_get_entry() {
        let state = state_with_entries(&[3]);
        assert_eq!(get_entry(&state, day(3)).unwrap().steps, 6000);
        assert!(matches!(
            get_entry(&state, day(4)),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_history_requires_session() {
        let state = AppState::new(Config::default());
        assert!(list_entries(&state).is_err());
    }
}
