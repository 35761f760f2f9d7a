//! Plain console rendering of a lifecycle state.
//!
//! Used when stdout is not a terminal or `--plain` is given. Prints every
//! section of a result instead of one tab.

use console::{style, Style};

use pluto::presenters::{ClusterCard, StatsStrip, SummaryView, WeightedTerm};
use pluto::services::{CompletedAnalysis, LifecycleState};
use pluto::view::{
    select, ResultTab, ResultView, StageStatus, NO_CLUSTERS, NO_SUMMARY, NO_TERMS,
};

use super::helpers::{format_number, truncate_string};

/// Console style for a term level, strongest first.
pub fn level_style(level: usize) -> Style {
    match level {
        0 => Style::new().cyan().bold(),
        1 => Style::new().cyan(),
        2 => Style::new().green(),
        3 => Style::new().yellow(),
        _ => Style::new().dim(),
    }
}

/// Nearest 256-color index for a palette RGB triple.
fn ansi256(rgb: (u8, u8, u8)) -> u8 {
    let scale = |c: u8| (u16::from(c) * 5 / 255) as u8;
    16 + 36 * scale(rgb.0) + 6 * scale(rgb.1) + scale(rgb.2)
}

pub fn print_state(state: &LifecycleState, service_url: &str) {
    let separator = "─".repeat(70);
    println!();

    match select(state, ResultTab::Terms, service_url) {
        ResultView::Loading { stages, .. } => {
            println!("{}", style("NLP Pipeline Running…").bold());
            println!("{}", separator);
            for row in stages {
                let marker = match row.status {
                    StageStatus::Done => style("✓").green(),
                    StageStatus::Active => style("⚙").yellow(),
                    StageStatus::Pending => style("○").dim(),
                };
                println!("  {} {}", marker, row.label);
            }
        }
        ResultView::Error { message, guidance } => {
            println!("{}", style("Analysis Failed").red().bold());
            println!("{}", separator);
            println!("  {} {}", style("✗").red(), message);
            println!("  {}", style(guidance).dim());
        }
        ResultView::Empty { steps } => {
            println!("{}", style("Ready to Analyze").bold());
            println!("{}", separator);
            for (i, step) in steps.iter().enumerate() {
                println!("  {} {}", style(i + 1).cyan(), step);
            }
        }
        ResultView::Success { analysis, .. } => print_analysis(analysis, &separator),
    }

    println!("{}", separator);
}

fn print_analysis(analysis: &CompletedAnalysis, separator: &str) {
    if analysis.fallback {
        println!(
            "{} Analysis service unreachable, showing demo data",
            style("!").yellow()
        );
    }

    print_stats(&analysis.view.stats);
    println!("{}", separator);

    println!("{}", style("KEY TERMS").cyan().bold());
    print_terms(&analysis.view.terms);
    println!();

    println!("{}", style("TOPIC CLUSTERS").cyan().bold());
    print_clusters(&analysis.view.clusters);
    println!();

    println!("{}", style("SUMMARY").cyan().bold());
    print_summary(&analysis.view.summary);
}

fn print_stats(stats: &StatsStrip) {
    let line = stats
        .items()
        .iter()
        .map(|(label, value)| format!("{} {}", style(value).bold(), style(label).dim()))
        .collect::<Vec<_>>()
        .join("   ");
    println!("{}", line);
}

fn print_terms(terms: &[WeightedTerm]) {
    if terms.is_empty() {
        println!("  {}", style(NO_TERMS).dim());
        return;
    }
    for term in terms {
        let name = format!("{:<42}", truncate_string(&term.term, 40));
        let badge = term.badge().unwrap_or_default();
        println!(
            "  {:>3}. {} {}",
            term.rank + 1,
            level_style(term.level).apply_to(name),
            style(badge).dim()
        );
    }
}

fn print_clusters(clusters: &[ClusterCard]) {
    if clusters.is_empty() {
        println!("  {}", style(NO_CLUSTERS).dim());
        return;
    }
    for card in clusters {
        let color = ansi256(card.color().rgb);
        println!(
            "  {} {} {}",
            style("■").color256(color),
            style(&card.label).bold(),
            style(card.doc_badge()).dim()
        );
        if !card.keywords.is_empty() {
            println!("      {}", card.keywords.join(" · "));
        }
    }
}

fn print_summary(summary: &SummaryView) {
    if summary.is_empty() {
        println!("  {}", style(NO_SUMMARY).dim());
        return;
    }
    for sentence in &summary.sentences {
        println!("  {} {}", style(format!("{}.", sentence.ordinal)).dim(), sentence.text);
    }
    println!();
    println!(
        "  {} {}   {} {}   {} {}",
        style(summary.stats.extracted_sentences).bold(),
        style("extracted").dim(),
        style(format!("~{}", format_number(summary.stats.approx_words))).bold(),
        style("words").dim(),
        style(summary.stats.source_sentences).bold(),
        style("source sentences").dim(),
    );
}
