use std::fmt::Write;
use std::time::Duration;

use chrono::{DateTime, TimeZone};

const BANNER_WIDTH: usize = 40;

/// Renders one report block.
pub fn format_report<Tz>(
    total_cost: f64,
    elapsed: Duration,
    errors: &[String],
    run_at: &DateTime<Tz>,
) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let banner = "=".repeat(BANNER_WIDTH);
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(out);
    let _ = writeln!(out, "{banner}");
    let _ = writeln!(
        out,
        "Sales Report - Run on {}",
        run_at.format("%Y-%m-%d %H:%M:%S")
    );
    let _ = writeln!(out, "{banner}");
    let _ = writeln!(out, "Total Sales Cost: ${total_cost:.2}");
    let _ = writeln!(out, "Elapsed Time: {:.4} seconds", elapsed.as_secs_f64());

    if !errors.is_empty() {
        let _ = write!(out, "\nErrors:\n{}", errors.join("\n"));
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", "-".repeat(BANNER_WIDTH));
    out
}
