use crate::errors::AppError;
use crate::export::{EXPORT_FILENAME, export_csv};
use crate::models::{
    AddOutcome, AddTaskRequest, DATE_FORMAT, DayRecordResponse, DeleteTaskRequest, RejectReason,
    SeriesPoint, SeriesQuery, TasksResponse, ToggleRequest, TodayResponse,
};
use crate::state::AppState;
use crate::stats::{DEFAULT_WINDOW, build_series, build_summary_at};
use crate::store::{TaskStore, date_key};
use crate::ui::render_index;
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Redirect},
    Form, Json,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use tokio::task::block_in_place;
use tracing::{info, warn};

const MAX_SERIES_WINDOW: usize = 366;

#[derive(Debug, Deserialize)]
pub struct IndexQuery {
    pub error: Option<String>,
}

pub async fn index(State(state): State<AppState>, Query(query): Query<IndexQuery>) -> Html<String> {
    let today = today();
    let store = state.store.lock().await;
    let response = today_response(&state, &store, today).await;
    let notice = query.error.as_deref().map(|code| match code {
        "empty" => RejectReason::Empty.message(),
        "duplicate" => RejectReason::Duplicate.message(),
        _ => "something went wrong",
    });
    Html(render_index(
        &response,
        store.tasks(),
        &store.day_record(today),
        notice,
    ))
}

pub async fn list_tasks(State(state): State<AppState>) -> Json<TasksResponse> {
    let store = state.store.lock().await;
    Json(TasksResponse {
        tasks: store.tasks().to_vec(),
    })
}

pub async fn add_task(
    State(state): State<AppState>,
    Json(payload): Json<AddTaskRequest>,
) -> Result<(StatusCode, Json<TasksResponse>), AppError> {
    let mut store = state.store.lock().await;
    match apply_add(&mut store, &payload.name)? {
        AddOutcome::Added(_) => Ok((
            StatusCode::CREATED,
            Json(TasksResponse {
                tasks: store.tasks().to_vec(),
            }),
        )),
        AddOutcome::Rejected(reason) => Err(reason.into()),
    }
}

pub async fn add_task_form(
    State(state): State<AppState>,
    Form(payload): Form<AddTaskRequest>,
) -> Result<Redirect, AppError> {
    let mut store = state.store.lock().await;
    let target = match apply_add(&mut store, &payload.name)? {
        AddOutcome::Added(_) => "/",
        AddOutcome::Rejected(RejectReason::Empty) => "/?error=empty",
        AddOutcome::Rejected(RejectReason::Duplicate) => "/?error=duplicate",
    };
    Ok(Redirect::to(target))
}

pub async fn delete_task(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<StatusCode, AppError> {
    let mut store = state.store.lock().await;
    apply_delete(&mut store, &name)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_task_form(
    State(state): State<AppState>,
    Form(payload): Form<DeleteTaskRequest>,
) -> Result<Redirect, AppError> {
    let mut store = state.store.lock().await;
    apply_delete(&mut store, &payload.name)?;
    Ok(Redirect::to("/"))
}

pub async fn toggle(
    State(state): State<AppState>,
    Json(payload): Json<ToggleRequest>,
) -> Result<Json<TodayResponse>, AppError> {
    let date = match payload.date.as_deref() {
        Some(raw) => parse_date(raw)?,
        None => today(),
    };
    let mut store = state.store.lock().await;
    apply_toggle(&mut store, date, &payload.task, payload.completed)?;
    Ok(Json(today_response(&state, &store, today()).await))
}

pub async fn toggle_form(
    State(state): State<AppState>,
    Form(payload): Form<ToggleRequest>,
) -> Result<Redirect, AppError> {
    let mut store = state.store.lock().await;
    apply_toggle(&mut store, today(), &payload.task, payload.completed)?;
    Ok(Redirect::to("/"))
}

pub async fn get_day(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<DayRecordResponse>, AppError> {
    let date = parse_date(&date)?;
    let store = state.store.lock().await;
    Ok(Json(DayRecordResponse {
        date: date_key(date),
        record: store.day_record(date),
    }))
}

pub async fn get_today(State(state): State<AppState>) -> Json<TodayResponse> {
    let store = state.store.lock().await;
    Json(today_response(&state, &store, today()).await)
}

pub async fn get_series(
    State(state): State<AppState>,
    Query(query): Query<SeriesQuery>,
) -> Result<Json<Vec<SeriesPoint>>, AppError> {
    let window = query.days.unwrap_or(DEFAULT_WINDOW);
    if window == 0 || window > MAX_SERIES_WINDOW {
        return Err(AppError::bad_request(format!(
            "days must be between 1 and {MAX_SERIES_WINDOW}"
        )));
    }
    let store = state.store.lock().await;
    Ok(Json(build_series(
        store.tasks(),
        store.history(),
        today(),
        window,
    )))
}

pub async fn export(State(state): State<AppState>) -> impl IntoResponse {
    let store = state.store.lock().await;
    let csv = export_csv(store.history());
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILENAME}\""),
            ),
        ],
        csv,
    )
}

// Store writes block on the filesystem and must go through `block_in_place`.
fn apply_add(store: &mut TaskStore, name: &str) -> Result<AddOutcome, AppError> {
    let outcome = block_in_place(|| store.add_task(name))?;
    match &outcome {
        AddOutcome::Added(task) => info!("added task {task:?}"),
        AddOutcome::Rejected(reason) => warn!("rejected task {name:?}: {}", reason.message()),
    }
    Ok(outcome)
}

fn apply_delete(store: &mut TaskStore, name: &str) -> Result<(), AppError> {
    if block_in_place(|| store.delete_task(name))? {
        info!("deleted task {name:?}");
    }
    Ok(())
}

fn apply_toggle(
    store: &mut TaskStore,
    date: NaiveDate,
    task: &str,
    completed: bool,
) -> Result<(), AppError> {
    block_in_place(|| store.set_completion(date, task, completed))?;
    Ok(())
}

async fn today_response(state: &AppState, store: &TaskStore, today: NaiveDate) -> TodayResponse {
    let summary = build_summary_at(today, store.tasks(), store.history());
    let celebration = state
        .session
        .lock()
        .await
        .observe(summary.percent, summary.task_count);
    TodayResponse {
        summary,
        celebration,
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| AppError::bad_request("date must be formatted as YYYY-MM-DD"))
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
