//! Timeline rendering, optionally refreshed as the clock moves.

use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime};
use clap::Args;
use dayboard_core::stats::format_minutes;
use dayboard_core::{Clock, MinuteRefresh, Planner, SqliteStore, SystemClock, TimelineLayout};
use serde_json::json;

use super::{open_planner, print_json, CmdResult};

#[derive(Args)]
pub struct TimelineArgs {
    /// Day to show (default: today)
    #[arg(long)]
    date: Option<NaiveDate>,
    /// Print rows as JSON
    #[arg(long)]
    json: bool,
    /// Keep redrawing until interrupted
    #[arg(long, conflicts_with = "json")]
    watch: bool,
}

pub fn run(args: TimelineArgs) -> CmdResult {
    if args.watch {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        return runtime.block_on(watch(args.date));
    }

    let planner = open_planner(args.date)?;
    let now = SystemClock.now();
    if args.json {
        render_json(&planner, now)
    } else {
        print!("{}", render_text(&planner, now));
        Ok(())
    }
}

async fn watch(date: Option<NaiveDate>) -> CmdResult {
    let refresh_secs = open_planner(date)?.config().clock.refresh_secs;
    let mut refresh = MinuteRefresh::new(refresh_secs);
    let mut ticker = tokio::time::interval(Duration::from_secs(1));

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let now = SystemClock.now();
                if refresh.poll(now) {
                    tracing::debug!(%now, "redrawing timeline");
                    // Reload so edits from other invocations show up.
                    let planner = open_planner(date)?;
                    print!("\x1b[2J\x1b[H{}", render_text(&planner, now));
                }
            }
            _ = tokio::signal::ctrl_c() => {
                println!();
                return Ok(());
            }
        }
    }
}

fn render_json(planner: &Planner<SqliteStore>, now: NaiveDateTime) -> CmdResult {
    let date = planner.state().selected_date();
    let layout = TimelineLayout::new(&planner.config().timeline);
    let marker = (now.date() == date).then(|| layout.current_time_marker(now.time()));
    print_json(&json!({
        "date": date,
        "rows": planner.layout(date),
        "marker": marker,
    }))
}

fn render_text(planner: &Planner<SqliteStore>, now: NaiveDateTime) -> String {
    let date = planner.state().selected_date();
    let stats = planner.state().stats(date);
    let layout = TimelineLayout::new(&planner.config().timeline);
    let marker = (now.date() == date).then(|| layout.current_time_marker(now.time()));

    let mut out = format!(
        "{}  {}/{} done, {} planned, {} points\n",
        date.format("%a %Y-%m-%d"),
        stats.completed,
        stats.total,
        format_minutes(stats.total_minutes),
        planner.state().points(),
    );

    for row in planner.layout(date) {
        if row.is_empty() {
            out.push_str(&format!("{:>6} |\n", row.label));
        }
        for (index, placed) in row.tasks.iter().enumerate() {
            let label = if index == 0 { row.label.as_str() } else { "" };
            let check = if placed.task.completed { "x" } else { " " };
            if placed.placement.starts_here {
                let start = placed
                    .task
                    .start_time
                    .map(|s| s.to_string())
                    .unwrap_or_default();
                out.push_str(&format!(
                    "{label:>6} | [{check}] {start} {} ({})\n",
                    placed.task.title,
                    format_minutes(placed.task.effective_estimate()),
                ));
            } else {
                out.push_str(&format!("{label:>6} |  ..  {}\n", placed.task.title));
            }
        }
        if let Some(marker) = marker.filter(|m| m.shown_in(row.hour)) {
            out.push_str(&format!("{:>6} +-- now {}\n", "", marker.label()));
        }
    }

    let day = planner.partition(date);
    if !day.unscheduled.is_empty() {
        out.push_str("\nQuick tasks:\n");
        for task in &day.unscheduled {
            let check = if task.completed { "x" } else { " " };
            out.push_str(&format!(
                "  [{check}] {} ({})\n",
                task.title,
                format_minutes(task.effective_estimate())
            ));
        }
    }
    if !day.unplaced.is_empty() {
        out.push_str("\nUnplaced:\n");
        for task in &day.unplaced {
            out.push_str(&format!("  {}  {}\n", task.id, task.title));
        }
    }
    out
}
