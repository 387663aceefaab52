use serde_json::json;

use super::{open_planner, print_json, CmdResult};

pub fn run() -> CmdResult {
    let planner = open_planner(None)?;
    print_json(&json!({ "points": planner.state().points() }))
}
