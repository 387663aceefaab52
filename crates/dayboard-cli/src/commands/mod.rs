pub mod config;
pub mod points;
pub mod stats;
pub mod task;
pub mod timeline;

use chrono::NaiveDate;
use dayboard_core::{Clock, Config, Planner, SqliteStore, SystemClock};

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Open the planner over the default database, selecting `date` or today.
pub fn open_planner(
    date: Option<NaiveDate>,
) -> Result<Planner<SqliteStore>, Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let store = SqliteStore::open()?;
    let today = date.unwrap_or_else(|| SystemClock.today());
    Ok(Planner::open(store, config, today)?)
}

pub fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
