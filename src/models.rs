use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A habit name. Unique and non-empty within the live task list.
pub type Task = String;

/// Completion flags for one calendar day, keyed by task name.
pub type DayRecord = BTreeMap<Task, bool>;

/// Every recorded day, keyed by `YYYY-MM-DD`.
pub type History = BTreeMap<String, DayRecord>;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    Empty,
    Duplicate,
}

impl RejectReason {
    pub fn message(self) -> &'static str {
        match self {
            RejectReason::Empty => "task name must not be empty",
            RejectReason::Duplicate => "task already exists",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Added(Task),
    Rejected(RejectReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStatus {
    Excellent,
    KeepPushing,
}

impl ProgressStatus {
    pub fn label(self) -> &'static str {
        match self {
            ProgressStatus::Excellent => "Excellent execution",
            ProgressStatus::KeepPushing => "Keep pushing",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogoStage {
    One,
    Two,
    Three,
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CelebrationCue {
    pub confetti: bool,
    pub sound: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub date: String,
    pub percent: u8,
    pub label: String,
    pub qualifies: bool,
}

#[derive(Debug, Deserialize)]
pub struct AddTaskRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteTaskRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub task: String,
    #[serde(default)]
    pub completed: bool,
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SeriesQuery {
    pub days: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct TasksResponse {
    pub tasks: Vec<Task>,
}

#[derive(Debug, Serialize)]
pub struct DayRecordResponse {
    pub date: String,
    pub record: DayRecord,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub date: String,
    pub task_count: usize,
    pub completed_count: usize,
    pub percent: u8,
    pub status: ProgressStatus,
    pub status_text: &'static str,
    pub logo: LogoStage,
    pub streak: u32,
    pub reminder_due: bool,
    pub last_7_days: Vec<SeriesPoint>,
}

#[derive(Debug, Serialize)]
pub struct TodayResponse {
    #[serde(flatten)]
    pub summary: SummaryResponse,
    pub celebration: CelebrationCue,
}
