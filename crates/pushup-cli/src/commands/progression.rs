use pushup_core::progression::{progression_table, Band};

use super::CmdResult;

fn band_label(band: Band) -> &'static str {
    match band {
        Band::Ramp => "+2/day",
        Band::Steady => "+1/day",
        Band::Slow => "+1/2 days",
        Band::Capped => "capped",
    }
}

pub fn run(days: u32, json: bool) -> CmdResult {
    let table = progression_table(days);
    if json {
        println!("{}", serde_json::to_string_pretty(&table)?);
        return Ok(());
    }

    println!("{:>5}  {:>6}  band", "day", "target");
    for step in table {
        println!("{:>5}  {:>6}  {}", step.day, step.target, band_label(step.band));
    }
    Ok(())
}
