mod analysis;
mod auth;
mod config;
mod error;
mod ipc;
mod model;
mod seed;
mod store;
mod timetable;
mod view;

use anyhow::Context;
use log::{info, warn};
use std::io::{self, BufRead, Write};

fn main() -> anyhow::Result<()> {
    let config = config::Config::from_env().context("load configuration")?;

    // stdout carries the protocol; logs go to stderr.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .target(env_logger::Target::Stderr)
        .init();

    let mut state = ipc::AppState::new(&config);
    info!(
        "surveyd {} ready (demo data: {})",
        env!("CARGO_PKG_VERSION"),
        config.seed_demo
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(v) => v,
            Err(_) => break,
        };
        if line.trim().is_empty() {
            continue;
        }

        let req: ipc::Request = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                // Can't reply without id; report without one.
                warn!("unparsable request: {}", e);
                let resp = serde_json::json!({
                    "ok": false,
                    "error": { "code": "bad_json", "message": e.to_string() }
                });
                let _ = writeln!(stdout, "{}", resp);
                let _ = stdout.flush();
                continue;
            }
        };

        let resp = ipc::handle_request(&mut state, req);
        let _ = writeln!(
            stdout,
            "{}",
            serde_json::to_string(&resp).unwrap_or_else(|_| "{\"ok\":false}".to_string())
        );
        let _ = stdout.flush();
    }

    info!("stdin closed, exiting");
    Ok(())
}
