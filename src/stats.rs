use crate::models::{History, SeriesPoint, SummaryResponse, Task};
use crate::progress::{
    completed_count, compute_today_percent, logo_stage, percent_for, qualifies, reminder_due,
    status_for,
};
use crate::store::date_key;
use crate::streak::compute_streak;
use chrono::{Datelike, Duration, NaiveDate, Weekday};

pub const DEFAULT_WINDOW: usize = 7;

/// `window` days ending at `today`, oldest first. Days without a record are 0%.
pub fn build_series(
    tasks: &[Task],
    history: &History,
    today: NaiveDate,
    window: usize,
) -> Vec<SeriesPoint> {
    let mut series = Vec::with_capacity(window);
    for offset in (0..window).rev() {
        let date = today - Duration::days(offset as i64);
        let key = date_key(date);
        let percent = history
            .get(&key)
            .map(|record| percent_for(tasks, record))
            .unwrap_or(0);
        series.push(SeriesPoint {
            date: key,
            percent,
            label: weekday_label(date.weekday()).to_string(),
            qualifies: qualifies(percent),
        });
    }
    series
}

pub fn build_summary_at(today: NaiveDate, tasks: &[Task], history: &History) -> SummaryResponse {
    let key = date_key(today);
    let record = history.get(&key).cloned().unwrap_or_default();
    let percent = compute_today_percent(tasks, &record);
    let status = status_for(percent);

    SummaryResponse {
        date: key,
        task_count: tasks.len(),
        completed_count: completed_count(tasks, &record),
        percent,
        status,
        status_text: status.label(),
        logo: logo_stage(percent),
        streak: compute_streak(tasks, history, today),
        reminder_due: reminder_due(percent, tasks.len()),
        last_7_days: build_series(tasks, history, today, DEFAULT_WINDOW),
    }
}

fn weekday_label(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "M",
        Weekday::Tue | Weekday::Thu => "T",
        Weekday::Wed => "W",
        Weekday::Fri => "F",
        Weekday::Sat | Weekday::Sun => "S",
    }
}
