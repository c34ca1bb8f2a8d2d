use crate::models::{DayRecord, LogoStage, ProgressStatus, Task};

/// A day qualifies for the streak and the chart highlight at this percentage.
pub const QUALIFYING_PERCENT: u8 = 85;

/// Percentage of the live `tasks` marked done in `record`, rounded to nearest.
/// Entries for tasks no longer in the list are ignored.
pub fn percent_for(tasks: &[Task], record: &DayRecord) -> u8 {
    if tasks.is_empty() {
        return 0;
    }
    let done = completed_count(tasks, record);
    ((done as f64 / tasks.len() as f64) * 100.0).round() as u8
}

pub fn compute_today_percent(tasks: &[Task], today: &DayRecord) -> u8 {
    percent_for(tasks, today)
}

pub fn completed_count(tasks: &[Task], record: &DayRecord) -> usize {
    tasks
        .iter()
        .filter(|task| record.get(task.as_str()).copied().unwrap_or(false))
        .count()
}

pub fn qualifies(percent: u8) -> bool {
    percent >= QUALIFYING_PERCENT
}

pub fn status_for(percent: u8) -> ProgressStatus {
    if qualifies(percent) {
        ProgressStatus::Excellent
    } else {
        ProgressStatus::KeepPushing
    }
}

pub fn logo_stage(percent: u8) -> LogoStage {
    match percent {
        100..=u8::MAX => LogoStage::Complete,
        85..=99 => LogoStage::Three,
        50..=84 => LogoStage::Two,
        _ => LogoStage::One,
    }
}

/// Whether a periodic reminder should nudge the user.
pub fn reminder_due(percent: u8, task_count: usize) -> bool {
    task_count > 0 && percent < 100
}
