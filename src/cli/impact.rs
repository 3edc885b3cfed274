//! Impact command - project the blast radius of a change request

use super::snapshot::Snapshot;
use anyhow::{Context, Result};
use archgraph::impact::{ChangeRequest, ImpactAnalysis, ImpactLevel};
use archgraph::{ArchConfig, ImpactAnalyzer};
use console::style;
use std::path::Path;

pub fn run(snapshot_path: &Path, change_path: &Path, format: &str, config: ArchConfig) -> Result<()> {
    let snapshot = Snapshot::load(snapshot_path)?;
    let graph = match snapshot.dependency {
        Some(graph) => graph.with_context(|| {
            format!("Dependency graph in {} is malformed", snapshot_path.display())
        })?,
        None => anyhow::bail!(
            "Snapshot {} has no dependencyGraph; impact analysis needs one",
            snapshot_path.display()
        ),
    };

    let content = std::fs::read_to_string(change_path)
        .with_context(|| format!("Failed to read change request {}", change_path.display()))?;
    let request: ChangeRequest = serde_json::from_str(&content)
        .with_context(|| format!("Invalid change request JSON in {}", change_path.display()))?;

    let analysis = ImpactAnalyzer::new(snapshot.repository, &graph, config.impact)
        .analyze(&request)
        .with_context(|| format!("Impact analysis of {} failed", request.id))?;

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&analysis)?),
        _ => print_text(&analysis),
    }
    Ok(())
}

fn print_text(analysis: &ImpactAnalysis) {
    let summary = &analysis.summary;
    println!(
        "\n{} {} ({})",
        style("Impact of").bold(),
        analysis.change_request.id,
        analysis.change_request.change_type
    );
    println!(
        "   {} files / {} nodes affected, complexity {}\n",
        summary.total_affected_files, summary.total_affected_nodes, summary.estimated_complexity
    );

    for node in &analysis.affected_nodes {
        let level = match node.impact {
            ImpactLevel::Critical => style("critical").red().bold(),
            ImpactLevel::High => style("high    ").red(),
            ImpactLevel::Medium => style("medium  ").yellow(),
            ImpactLevel::Low => style("low     ").dim(),
        };
        println!("   {} {} (depth {})", level, node.file, node.depth);
    }

    if !analysis.breaking_changes.is_empty() {
        println!("\n{}", style("Breaking changes").bold());
        for b in &analysis.breaking_changes {
            println!(
                "   {}: {} ({} consumers)",
                b.file,
                b.reason,
                b.affected_consumers.len()
            );
        }
    }

    println!("\n{}", style("Recommendations").bold());
    for rec in &analysis.recommendations {
        println!("   - {}", rec);
    }
    println!();
}
