//! Configuration display command.

use console::style;

use pluto::config::{Config, Settings};

/// Print the effective settings, or the merged config as JSON.
pub fn cmd_config_show(settings: &Settings, config: &Config, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(config)?);
        return Ok(());
    }

    let client = settings.client_config();
    let source = settings
        .config_path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "none (defaults)".to_string());
    let connect_timeout = settings
        .connect_timeout
        .map(|t| format!("{}s", t.as_secs()))
        .unwrap_or_else(|| "none".to_string());
    let separator = "─".repeat(50);

    println!();
    println!("{}", style("pluto configuration").bold());
    println!("{}", separator);
    println!("  {:<20} {}", "Config file:", source);
    println!("  {:<20} {}", "Service URL:", client.service_url());
    println!("  {:<20} {}", "Endpoint:", client.endpoint());
    println!(
        "  {:<20} {}",
        "Development:",
        if client.is_development {
            style("yes (demo data when unreachable)").yellow()
        } else {
            style("no").dim()
        }
    );
    println!(
        "  {:<20} {} ms",
        "Progress interval:",
        settings.progress_interval.as_millis()
    );
    println!("  {:<20} {}", "Connect timeout:", connect_timeout);
    println!("  {:<20} {}", "User agent:", client.user_agent);
    println!();

    println!("{}", style("DEFAULTS").cyan().bold());
    println!("  {:<20} {}", "Topics:", settings.num_topics);
    println!("  {:<20} {}", "Summary sentences:", settings.summary_sentences);
    println!(
        "  {:<20} {}",
        "Features:",
        if settings.use_bow {
            "bag-of-words"
        } else {
            "TF-IDF"
        }
    );
    println!("{}", separator);

    Ok(())
}
