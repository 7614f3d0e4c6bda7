use std::io::{self, IsTerminal, Read};

use tracing_subscriber::EnvFilter;

use wellnesstrack::config::Config;
use wellnesstrack::dto::{CheckInRequest, LoginRequest};
use wellnesstrack::error::AppResult;
use wellnesstrack::handlers;
use wellnesstrack::AppState;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env();

    // Logs go to stderr; stdout carries JSON responses only
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .with_writer(io::stderr)
        .json()
        .init();

    let today = chrono::Local::now().date_naive();
    let mut state = AppState::new(config);

    if state.config.demo_enabled {
        handlers::demo::seed_demo_account(&mut state, today)?;
        let login = LoginRequest {
            email: state.config.demo_email.clone(),
            password: state.config.demo_password.clone(),
        };
        handlers::auth::login(&mut state, login)?;
    }

    // A check-in piped on stdin is submitted before the dashboard is shown
    let stdin = io::stdin();
    if !stdin.is_terminal() {
        let mut raw = String::new();
        stdin.lock().read_to_string(&mut raw)?;
        if !raw.trim().is_empty() {
            let body: CheckInRequest = serde_json::from_str(&raw)?;
            emit(handlers::checkin::submit_check_in(&mut state, body, today))?;
        }
    }

    emit(handlers::insights::get_dashboard(&state, today))?;
    Ok(())
}

fn emit<T: serde::Serialize>(result: AppResult<T>) -> anyhow::Result<()> {
    let body = match result {
        Ok(value) => serde_json::to_value(value)?,
        Err(e) => e.to_body(),
    };
    println!("{}", serde_json::to_string_pretty(&body)?);
    Ok(())
}
