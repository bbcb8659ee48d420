//! Dashboard command - build the employer's applicant dashboard

use anyhow::{Context, Result};
use silverwork_adapters::CareerExperienceSource;
use silverwork_domain::SystemClock;
use silverwork_domain::usecases::{DashboardConfig, DashboardUseCase};
use std::path::PathBuf;
use std::sync::Arc;

use crate::args::DashboardArgs;
use crate::commands::build_fetcher;
use crate::config::AppConfig;

pub async fn execute(args: DashboardArgs, config_path: Option<PathBuf>) -> Result<()> {
    let config = AppConfig::load(config_path.as_deref()).unwrap_or_default();

    let fetcher = build_fetcher(&config, args.fixtures.as_deref())?;
    let clock = Arc::new(SystemClock);
    let experience = Arc::new(CareerExperienceSource::with_table(
        Arc::clone(&fetcher),
        Arc::clone(&clock),
        config.tables.careers.clone(),
    ));

    let dashboard_config = DashboardConfig {
        postings_table: config.tables.jobs.clone(),
        applications_table: config.tables.applications.clone(),
        profiles_table: config.tables.profiles.clone(),
    };

    let usecase = DashboardUseCase::new(fetcher, experience, clock, dashboard_config);
    let summaries = usecase.build_applicant_summaries(&args.employer).await;

    if args.json {
        let json =
            serde_json::to_string_pretty(&summaries).context("Failed to serialize output")?;
        println!("{}", json);
    } else {
        println!("Applicants for {}", args.employer);
        println!("======================");
        println!();

        if summaries.is_empty() {
            println!("No applicants.");
        } else {
            for summary in &summaries {
                println!(
                    "  {} ({}세, {}) / {}",
                    summary.name,
                    summary.age,
                    summary.experience_label,
                    summary.region.as_deref().unwrap_or("지역 미등록"),
                );
                println!(
                    "    지원 {}시간 전, badge: {}",
                    summary.hours_since_applied,
                    summary.badge.asset_id()
                );
            }
        }
    }

    Ok(())
}
