//! Assess command - full architecture assessment of a snapshot

use super::snapshot::Snapshot;
use anyhow::Result;
use archgraph::models::{ArchitectureAssessment, Severity};
use archgraph::{ArchConfig, ArchitectureAnalyzer};
use console::style;
use std::path::Path;

pub fn run(snapshot_path: &Path, format: &str, config: ArchConfig) -> Result<()> {
    let snapshot = Snapshot::load(snapshot_path)?;
    let repository = snapshot.repository.clone();
    let input = snapshot.into_input();

    let assessment = ArchitectureAnalyzer::new(config).assess(&input);

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&assessment)?),
        _ => print_text(&repository, &assessment),
    }
    Ok(())
}

fn print_text(repository: &str, assessment: &ArchitectureAssessment) {
    let score = assessment.score;
    let styled_score = match score {
        80..=100 => style(score).green().bold(),
        50..=79 => style(score).yellow().bold(),
        _ => style(score).red().bold(),
    };
    println!("\n{} {}", style("Architecture assessment:").bold(), repository);
    println!("   Score: {}/100\n", styled_score);

    if assessment.issues.is_empty() {
        println!("{}", style("No architecture issues found.").green());
    } else {
        println!("{}", style("Issues").bold());
        for issue in &assessment.issues {
            let sev = match issue.severity {
                Severity::High => style("high  ").red(),
                Severity::Medium => style("medium").yellow(),
                Severity::Low => style("low   ").dim(),
            };
            println!("   {} [{}] {}", sev, issue.kind, issue.title);
            println!("          {}", style(issue.affected_files.join(", ")).dim());
        }
    }

    if !assessment.patterns.is_empty() {
        println!("\n{}", style("Patterns").bold());
        for pattern in &assessment.patterns {
            println!(
                "   {} ({:.0}% confidence, {} files)",
                pattern.name,
                pattern.confidence * 100.0,
                pattern.files.len()
            );
        }
    }

    if !assessment.anti_patterns.is_empty() {
        println!("\n{}", style("Anti-patterns").bold());
        for anti in &assessment.anti_patterns {
            println!("   {} ({}): {}", anti.name, anti.severity, anti.recommendation);
        }
    }

    if !assessment.diagnostics.is_empty() {
        println!("\n{}", style("Diagnostics").bold());
        for d in &assessment.diagnostics {
            println!("   {} {}: {}", style("!").yellow(), d.source, d.message);
        }
    }
    println!();
}
