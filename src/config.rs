//! Runtime configuration read from the environment (and `.env`, if present).

use anyhow::{anyhow, Context};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Default log filter when `RUST_LOG` is unset.
    pub log_level: String,
    /// Start with the demo subjects, teachers, classrooms and survey.
    pub seed_demo: bool,
    /// Simulated latency of the login stub.
    pub login_delay: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".into(),
            seed_demo: true,
            login_delay: Duration::from_millis(1000),
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(v) = lookup("SURVEYD_LOG_LEVEL") {
            let v = v.trim();
            if !v.is_empty() {
                cfg.log_level = v.to_string();
            }
        }
        if let Some(v) = lookup("SURVEYD_SEED_DEMO") {
            cfg.seed_demo = parse_bool(&v).context("SURVEYD_SEED_DEMO")?;
        }
        if let Some(v) = lookup("SURVEYD_LOGIN_DELAY_MS") {
            let ms: u64 = v
                .trim()
                .parse()
                .with_context(|| format!("SURVEYD_LOGIN_DELAY_MS: not a number: {v:?}"))?;
            cfg.login_delay = Duration::from_millis(ms);
        }
        Ok(cfg)
    }
}

fn parse_bool(raw: &str) -> anyhow::Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(anyhow!("expected a boolean, got {other:?}")),
    }
}
