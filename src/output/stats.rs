//! Statistics reporting.

use console::style;

use crate::crawl::RunStats;
use crate::media::MediaKind;

/// Print statistics for a finished run.
pub fn print_run_stats(stats: &RunStats) {
    println!();
    println!("{}", style("═".repeat(50)).dim());
    println!(
        "{}",
        style(format!("Statistics for {}:", stats.username)).bold()
    );

    if stats.profile_unavailable {
        println!("  {}", style("Profile could not be loaded").red());
    }
    if stats.enumeration_failed {
        println!("  {}", style("Post enumeration stopped early").yellow());
    }

    println!("  Posts:    {} processed", stats.posts_processed);
    if stats.posts_failed > 0 {
        println!("  Failed:   {} posts", style(stats.posts_failed).red());
    }

    for kind in MediaKind::ALL {
        let sorted = stats.sorted_for(kind);
        println!(
            "  {:<9} {} moved, {} skipped, {} failed",
            format!("{}:", capitalize(&kind.to_string())),
            style(sorted.moved).green(),
            style(sorted.skipped).yellow(),
            sorted.failed
        );
    }
    println!("{}", style("═".repeat(50)).dim());
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
