use std::path::PathBuf;

/// Runtime configuration, read from the environment with defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the web server binds to.
    pub bind: String,
    /// Path of the contact ledger CSV file.
    pub ledger_path: PathBuf,
    /// Lower bound of the budget range offered on the contact form.
    pub budget_floor: i64,
    /// Upper bound of the budget range offered on the contact form.
    pub budget_ceiling: i64,
}

impl Config {
    pub fn from_env() -> Self {
        let bind = std::env::var("LISTING_DESK_BIND").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
        let ledger_path = std::env::var("LISTING_DESK_LEDGER")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("contacts.csv"));
        let budget_floor = env_i64("LISTING_DESK_BUDGET_MIN", 100_000);
        let budget_ceiling = env_i64("LISTING_DESK_BUDGET_MAX", 5_000_000);

        Self {
            bind,
            ledger_path,
            budget_floor,
            budget_ceiling,
        }
    }
}

fn env_i64(key: &str, default: i64) -> i64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
