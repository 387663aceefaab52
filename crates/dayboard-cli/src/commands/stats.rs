use chrono::NaiveDate;
use clap::Subcommand;
use dayboard_core::stats::format_minutes;
use dayboard_core::{Clock, SystemClock};
use serde_json::json;

use super::{open_planner, print_json, CmdResult};

#[derive(Subcommand)]
pub enum StatsAction {
    /// Counts, minutes and progress for one day
    Day {
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Month grid with per-day stats
    Month {
        /// Any day in the month (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Shift by whole months, e.g. -1 for the previous month
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        shift: i32,
    },
}

pub fn run(action: StatsAction) -> CmdResult {
    match action {
        StatsAction::Day { date } => {
            let planner = open_planner(date)?;
            let date = planner.state().selected_date();
            let stats = planner.state().stats(date);
            print_json(&json!({
                "date": date,
                "stats": stats,
                "band": stats.band(),
                "planned": format_minutes(stats.total_minutes),
                "invested": format_minutes(stats.invested_minutes),
            }))?;
        }
        StatsAction::Month { date, shift } => {
            let mut planner = open_planner(date)?;
            planner.shift_month(shift);
            let grid = planner.state().month(SystemClock.today());
            print_json(&grid)?;
        }
    }
    Ok(())
}
