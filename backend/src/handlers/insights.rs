use chrono::NaiveDate;

use crate::dto::{Aggregates, DashboardResponse, InsightResponse};
use crate::error::AppResult;
use crate::services::insights;
use crate::AppState;

pub fn get_aggregates(state: &AppState, today: NaiveDate) -> AppResult<Aggregates> {
    let entries = state.current_user()?.history();
    Ok(insights::aggregates(&entries, today))
}

pub fn get_dashboard(state: &AppState, today: NaiveDate) -> AppResult<DashboardResponse> {
    let entries = state.current_user()?.history();
    Ok(insights::dashboard(
        &entries,
        today,
        state.config.chart_window_days,
        state.config.analytics_window_days,
    ))
}

pub fn get_insights(state: &AppState, today: NaiveDate) -> AppResult<InsightResponse> {
    let entries = state.current_user()?.history();
    let insight = insights::generate_insight(&entries, today);

    tracing::debug!(
        entries = entries.len(),
        tip_category = ?insight.tip_category,
        "Generated insight"
    );
    Ok(insight)
}
