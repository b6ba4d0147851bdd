use chrono::NaiveDate;
use pushup_core::{DailyRecord, StreakState};

use super::{CmdResult, Context};

fn print_record(record: &DailyRecord, json: bool) -> CmdResult {
    if json {
        println!("{}", serde_json::to_string_pretty(record)?);
    } else {
        let state = if record.completed { "done" } else { "pending" };
        println!("{}  target {}  {state}", record.date, record.target);
    }
    Ok(())
}

/// "day N since <origin>", counting the origin itself as day 1.
fn describe_origin(record: &DailyRecord, origin: Option<NaiveDate>) -> Option<String> {
    let origin = origin?;
    let day = (record.date - origin).num_days() + 1;
    Some(format!("day {day} since {origin}"))
}

pub fn today(ctx: &Context, json: bool) -> CmdResult {
    let tracker = ctx.open_tracker()?;
    let record = tracker.today()?;
    print_record(&record, json)?;
    if !json {
        if let Some(line) = describe_origin(&record, tracker.origin()?) {
            println!("{line}");
        }
    }
    Ok(())
}

pub fn complete(ctx: &Context, json: bool) -> CmdResult {
    let tracker = ctx.open_tracker()?;
    let record = tracker.complete_today()?;
    print_record(&record, json)
}

fn describe_streak(streak: &StreakState) -> String {
    match streak.last_date {
        Some(last) => format!(
            "current {}  longest {}  last {last}",
            streak.current, streak.longest
        ),
        None => "no completions yet".to_string(),
    }
}

pub fn streak(ctx: &Context, json: bool) -> CmdResult {
    let tracker = ctx.open_tracker()?;
    let streak = tracker.streak()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&streak)?);
    } else {
        println!("{}", describe_streak(&streak));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_streak_has_friendly_text() {
        assert_eq!(describe_streak(&StreakState::default()), "no completions yet");
    }

    #[test]
    fn streak_text_lists_counters() {
        let streak = StreakState {
            current: 2,
            longest: 5,
            last_date: NaiveDate::from_ymd_opt(2026, 10, 19),
        };
        assert_eq!(
            describe_streak(&streak),
            "current 2  longest 5  last 2026-10-19"
        );
    }

    #[test]
    fn origin_line_counts_from_day_one() {
        let origin = NaiveDate::from_ymd_opt(2026, 10, 1).unwrap();
        let record = DailyRecord::new(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(), 44);
        assert_eq!(
            describe_origin(&record, Some(origin)).as_deref(),
            Some("day 19 since 2026-10-01")
        );
        assert_eq!(describe_origin(&record, None), None);
    }
}
