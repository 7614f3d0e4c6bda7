use chrono::{Days, NaiveDate};
use rand::Rng;

use crate::error::{AppError, AppResult};
use crate::models::daily_entry::{CheckInInputs, DailyEntry};
use crate::models::rating::Ratings;
use crate::models::user::UserRecord;
use crate::AppState;

/// Ensures the configured demo account exists and has a run of sample
/// check-ins ending at `today`. Returns how many entries were seeded.
pub fn seed_demo_account(state: &mut AppState, today: NaiveDate) -> AppResult<usize> {
    seed_demo_account_with(state, today, &mut rand::thread_rng())
}

pub fn seed_demo_account_with<R: Rng + ?Sized>(
    state: &mut AppState,
    today: NaiveDate,
    rng: &mut R,
) -> AppResult<usize> {
    let config = &state.config;
    let email = config.demo_email.clone();
    let days = config.demo_seed_days;

    if state.users.get(&email).is_none() {
        let record = UserRecord::new(
            &email,
            &config.demo_password,
            &config.demo_name,
            &config.demo_department,
        );
        state.users.register(record)?;
    }

    let user = state
        .users
        .get_mut(&email)
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", email)))?;
    if user.entry_count() > 0 {
        tracing::debug!(email = %email, "Demo account already has history");
        return Ok(0);
    }

    let mut seeded = 0;
    for days_ago in 0..days {
        let Some(date) = today.checked_sub_days(Days::new(u64::from(days_ago))) else {
            break;
        };
        user.commit(sample_entry(date, days_ago, rng));
        seeded += 1;
    }

    tracing::info!(email = %email, seeded, "Demo account seeded");
    Ok(seeded)
}

/// Plausible values with a better final week, so trends and achievements show.
fn sample_entry<R: Rng + ?Sized>(date: NaiveDate, days_ago: u32, rng: &mut R) -> DailyEntry {
    let recent_week = days_ago < 7;

    let steps = 7_000 + rng.gen_range(0..4_000) + if recent_week { 1_000 } else { 0 };
    let calories = 2_000 + rng.gen_range(0..600);
    let sleep_hours = round_tenth(7.0 + rng.gen::<f64>() * 2.0);
    let water_liters = round_tenth(2.0 + rng.gen::<f64>());

    let inputs = CheckInInputs {
        steps: f64::from(steps),
        calories: f64::from(calories),
        sleep_hours,
        water_liters,
    };
    let ratings = Ratings {
        sleep_quality: Some(3 + rng.gen_range(0..2) + u8::from(recent_week)),
        hydration_level: Some(3 + rng.gen_range(0..2)),
        energy_level: Some(3 + rng.gen_range(0..2) + u8::from(days_ago < 3)),
    };

    DailyEntry::from_check_in(date, &inputs, &ratings)
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
