//! Doctor command - validate configuration and show status

use anyhow::Result;
use serde::Serialize;
use silverwork_adapters::RestTableFetcher;
use silverwork_domain::{FetchError, TableFetcher};
use std::path::PathBuf;

use crate::args::DoctorArgs;
use crate::commands::load_api_key;
use crate::config::AppConfig;

#[derive(Debug, Serialize)]
struct DoctorReport {
    config: CheckResult,
    backend: CheckResult,
    tables: CheckResult,
    overall: String,
}

#[derive(Debug, Serialize)]
struct CheckResult {
    status: String,
    message: String,
    details: Option<serde_json::Value>,
}

impl CheckResult {
    fn ok(message: impl Into<String>) -> Self {
        Self {
            status: "ok".to_string(),
            message: message.into(),
            details: None,
        }
    }

    fn warn(message: impl Into<String>) -> Self {
        Self {
            status: "warn".to_string(),
            message: message.into(),
            details: None,
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
            details: None,
        }
    }

    fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    fn is_ok(&self) -> bool {
        self.status == "ok"
    }

    fn is_error(&self) -> bool {
        self.status == "error"
    }
}

pub async fn execute(args: DoctorArgs, config_path: Option<PathBuf>) -> Result<()> {
    let mut report = DoctorReport {
        config: CheckResult::error("Not checked"),
        backend: CheckResult::error("Not checked"),
        tables: CheckResult::error("Not checked"),
        overall: "error".to_string(),
    };

    // Check config
    let config = match AppConfig::load(config_path.as_deref()) {
        Ok(c) => {
            report.config = CheckResult::ok("Configuration loaded successfully");
            Some(c)
        }
        Err(e) => {
            report.config = CheckResult::error(format!("Failed to load config: {}", e));
            None
        }
    };

    if let Some(ref config) = config {
        report.backend = check_backend(config).await;
        report.tables = check_tables(config);
    }

    // Determine overall status
    let checks = [&report.config, &report.backend, &report.tables];
    let has_error = checks.iter().any(|c| c.is_error());
    let all_ok = checks.iter().all(|c| c.is_ok());

    report.overall = if has_error {
        "error".to_string()
    } else if all_ok {
        "ok".to_string()
    } else {
        "warn".to_string()
    };

    // Output report
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    if report.overall == "error" {
        std::process::exit(1);
    }

    Ok(())
}

async fn check_backend(config: &AppConfig) -> CheckResult {
    if config.backend.base_url.trim().is_empty() {
        return CheckResult::error("Backend base_url is empty");
    }

    let env_var = &config.backend.api_key_env;
    if env_var.trim().is_empty() {
        return CheckResult::error("No API key env var configured");
    }

    let Ok(api_key) = load_api_key(env_var) else {
        return CheckResult::warn(format!(
            "Base URL: {}, API key: {} (not set), backend not probed",
            config.backend.base_url, env_var
        ));
    };

    let fetcher = RestTableFetcher::new(api_key, config.backend.base_url.clone());
    probe_backend(&fetcher, &config.tables.jobs)
        .await
        .with_details(serde_json::json!({
            "base_url": config.backend.base_url,
            "probe_table": config.tables.jobs,
        }))
}

/// Issue one id-projection fetch against the configured jobs table and
/// grade the backend on the outcome.
async fn probe_backend(fetcher: &dyn TableFetcher, table: &str) -> CheckResult {
    match fetcher.fetch(table, &[], &["id"]).await {
        Ok(rows) => CheckResult::ok(format!(
            "Backend reachable, table '{}' returned {} rows",
            table,
            rows.len()
        )),
        Err(FetchError::Auth(_)) => CheckResult::error("Backend rejected the API key"),
        Err(FetchError::RateLimited(_)) => {
            CheckResult::warn("Backend rate-limited the probe; try again later")
        }
        Err(error) => CheckResult::error(format!("Backend probe failed: {}", error)),
    }
}

fn check_tables(config: &AppConfig) -> CheckResult {
    let tables = [
        ("jobs", &config.tables.jobs),
        ("courses", &config.tables.courses),
        ("applications", &config.tables.applications),
        ("profiles", &config.tables.profiles),
        ("careers", &config.tables.careers),
    ];

    if let Some((role, _)) = tables.iter().find(|(_, name)| name.trim().is_empty()) {
        return CheckResult::error(format!("Table name for '{}' is empty", role));
    }

    CheckResult::ok("All table names configured").with_details(serde_json::json!({
        "jobs": config.tables.jobs,
        "courses": config.tables.courses,
        "applications": config.tables.applications,
        "profiles": config.tables.profiles,
        "careers": config.tables.careers,
    }))
}

fn print_report(report: &DoctorReport) {
    println!("silverwork Doctor Report");
    println!("========================");
    println!();

    print_check("Config", &report.config);
    print_check("Backend", &report.backend);
    print_check("Tables", &report.tables);

    println!();
    let symbol = match report.overall.as_str() {
        "ok" => "✓",
        "warn" => "⚠",
        _ => "✗",
    };
    println!("{} Overall: {}", symbol, report.overall.to_uppercase());

    if report.overall == "ok" {
        println!();
        println!("Ready to run! Try: silverwork recommend --flags talent=1010000000");
    }
}

fn print_check(name: &str, result: &CheckResult) {
    let symbol = match result.status.as_str() {
        "ok" => "✓",
        "warn" => "⚠",
        _ => "✗",
    };
    println!("{} {}: {}", symbol, name, result.message);
}
