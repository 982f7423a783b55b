//! Process performance report
//!
//! Memory and thread count come from `/proc/self/status`; on platforms without
//! procfs memory is reported as `"unknown"` and threads as 1.

use std::sync::Arc;
use std::time::Duration;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

const PROC_STATUS: &str = "/proc/self/status";

#[derive(Debug, Serialize)]
pub struct PerformanceReport {
    /// Uptime as `HH:MM:SS.mmm`
    pub time: String,
    /// Resident memory as `<n>.<nn> MB`
    pub memory: String,
    pub threads: usize,
}

/// GET /api/performance - Uptime, resident memory and thread count
pub async fn performance(State(state): State<Arc<AppState>>) -> Json<PerformanceReport> {
    let status = std::fs::read_to_string(PROC_STATUS).ok();
    let status = status.as_deref();

    Json(PerformanceReport {
        time: format_uptime(state.started_at.elapsed()),
        memory: status
            .and_then(parse_vm_rss_kb)
            .map(format_memory)
            .unwrap_or_else(|| "unknown".to_string()),
        threads: status.and_then(parse_threads).unwrap_or(1),
    })
}

fn format_uptime(elapsed: Duration) -> String {
    let millis = elapsed.as_millis();
    let hours = millis / 3_600_000;
    let minutes = (millis / 60_000) % 60;
    let seconds = (millis / 1000) % 60;
    format!(
        "{:02}:{:02}:{:02}.{:03}",
        hours,
        minutes,
        seconds,
        millis % 1000
    )
}

fn format_memory(rss_kb: u64) -> String {
    format!("{:.2} MB", rss_kb as f64 / 1024.0)
}

/// Value of a `Key:   <n> ...` line in procfs status output
fn status_field(status: &str, key: &str) -> Option<u64> {
    status
        .lines()
        .find_map(|line| line.strip_prefix(key)?.strip_prefix(':'))
        .and_then(|rest| rest.split_whitespace().next())
        .and_then(|n| n.parse().ok())
}

fn parse_vm_rss_kb(status: &str) -> Option<u64> {
    status_field(status, "VmRSS")
}

fn parse_threads(status: &str) -> Option<usize> {
    status_field(status, "Threads").map(|n| n as usize)
}
