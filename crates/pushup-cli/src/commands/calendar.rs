use chrono::{Datelike, NaiveDate};
use pushup_core::{parse_year_param, CalendarView, MonthStatus};

use super::{CmdResult, Context};

const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

pub fn run(ctx: &Context, year: Option<&str>, json: bool) -> CmdResult {
    let tracker = ctx.open_tracker()?;
    let today = tracker.today_date();
    let view = tracker.calendar(parse_year_param(year, today))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{}", render(&view, today));
    }
    Ok(())
}

/// Marker for one day cell.
///
/// `#` done, `x` missed, `o` today and not yet done, `.` anything else.
fn cell(view: &CalendarView, date: NaiveDate, today: NaiveDate) -> char {
    match view.day(date) {
        Some(record) if record.completed => '#',
        Some(_) if date == today => 'o',
        Some(_) => 'x',
        None if date < today => '.',
        None => ' ',
    }
}

fn days_in_month(year: i32, month0: u32) -> u32 {
    let (next_year, next_month) = if month0 == 11 {
        (year + 1, 1)
    } else {
        (year, month0 + 2)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map_or(31, |d| d.day())
}

/// Text rendering of the months from the origin onward.
pub fn render(view: &CalendarView, today: NaiveDate) -> String {
    let mut out = String::new();

    for month0 in 0..12u32 {
        let status = match view.month_status(month0, today) {
            Ok(MonthStatus::BeforeOrigin) | Err(_) => continue,
            Ok(status) => status,
        };
        let label = match status {
            MonthStatus::Previous => " (previous)",
            MonthStatus::Current => " (current)",
            _ => "",
        };
        out.push_str(&format!("{} {}{label}\n", MONTH_NAMES[month0 as usize], view.year));

        let mut row = String::new();
        for day in 1..=days_in_month(view.year, month0) {
            let Some(date) = NaiveDate::from_ymd_opt(view.year, month0 + 1, day) else {
                continue;
            };
            row.push(cell(view, date, today));
            if day % 7 == 0 {
                out.push_str(&format!("  {row}\n"));
                row.clear();
            }
        }
        if !row.is_empty() {
            out.push_str(&format!("  {row}\n"));
        }
    }

    out
}
