//! Recommend command - rank the catalog against a user's interest flags

use anyhow::{Context, Result, bail};
use silverwork_domain::usecases::{InterestVectorBuilder, RecommendConfig, RecommendUseCase};
use silverwork_domain::{Category, SystemClock};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use crate::args::{CatalogChoice, RecommendArgs};
use crate::commands::build_fetcher;
use crate::config::AppConfig;

pub async fn execute(args: RecommendArgs, config_path: Option<PathBuf>) -> Result<()> {
    let config = AppConfig::load(config_path.as_deref()).unwrap_or_default();

    let flags = parse_flags(&args.flags)?;
    if flags.values().all(Option::is_none) {
        bail!("No interest flags provided; pass at least one --flags category=bits");
    }

    let builder = InterestVectorBuilder::default();
    let vector = builder
        .build(&flags)
        .context("Failed to build interest vector")?;

    tracing::info!(
        labels = vector.labels.len(),
        tags = vector.tags.len(),
        "Decoded interest flags"
    );

    let fetcher = build_fetcher(&config, args.fixtures.as_deref())?;
    let recommend_config = match args.catalog {
        CatalogChoice::Jobs => RecommendConfig {
            table: config.tables.jobs.clone(),
            top_n: args.top_n.unwrap_or(config.general.top_n),
            attach_dday: true,
        },
        CatalogChoice::Courses => RecommendConfig {
            table: config.tables.courses.clone(),
            top_n: args.top_n.unwrap_or(config.general.top_n),
            attach_dday: false,
        },
    };

    let usecase = RecommendUseCase::new(fetcher, Arc::new(SystemClock), recommend_config);
    let recommendations = usecase.recommend(&vector).await;

    if args.json {
        let json = serde_json::to_string_pretty(&recommendations)
            .context("Failed to serialize output")?;
        println!("{}", json);
    } else {
        println!("Recommendations");
        println!("===============");
        println!();

        if recommendations.is_empty() {
            println!("No recommendations.");
        } else {
            for rec in &recommendations {
                match &rec.dday {
                    Some(dday) => {
                        println!("  [{}] {} (score: {})", dday, rec.item.title, rec.score)
                    }
                    None => println!("  {} (score: {})", rec.item.title, rec.score),
                }
                if let Some(tag) = &rec.item.tag {
                    println!("    Tag: {}", tag);
                }
            }
        }
    }

    Ok(())
}

/// Parse `--flags category=bits` pairs into the builder's input map
fn parse_flags(raw: &[String]) -> Result<BTreeMap<Category, Option<String>>> {
    let mut flags: BTreeMap<Category, Option<String>> = BTreeMap::new();

    for entry in raw {
        let Some((name, bits)) = entry.split_once('=') else {
            bail!("Invalid --flags entry '{}': expected category=bits", entry);
        };

        let Some(category) = Category::parse(name) else {
            bail!(
                "Unknown category '{}' (expected one of: job, education, talent)",
                name
            );
        };

        let bits = bits.trim();
        if !bits.chars().all(|c| c == '0' || c == '1') {
            bail!("Invalid flag string for '{}': only 0 and 1 allowed", name);
        }

        flags.insert(category, Some(bits.to_string()));
    }

    Ok(flags)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_flags_accepts_valid_pairs() {
        let flags = parse_flags(&[
            "talent=1010000000".to_string(),
            "job=01".to_string(),
        ])
        .unwrap();

        assert_eq!(
            flags.get(&Category::Talent),
            Some(&Some("1010000000".to_string()))
        );
        assert_eq!(flags.get(&Category::Job), Some(&Some("01".to_string())));
    }

    #[test]
    fn parse_flags_rejects_unknown_category() {
        assert!(parse_flags(&["hobby=10".to_string()]).is_err());
    }

    #[test]
    fn parse_flags_rejects_non_binary_strings() {
        assert!(parse_flags(&["job=10x".to_string()]).is_err());
    }

    #[test]
    fn parse_flags_rejects_missing_separator() {
        assert!(parse_flags(&["job".to_string()]).is_err());
    }
}
