use crate::handlers;
use crate::state::AppState;
use axum::{routing::{delete, get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/tasks/add", post(handlers::add_task_form))
        .route("/tasks/delete", post(handlers::delete_task_form))
        .route("/tasks/toggle", post(handlers::toggle_form))
        .route("/api/tasks", get(handlers::list_tasks).post(handlers::add_task))
        .route("/api/tasks/:name", delete(handlers::delete_task))
        .route("/api/toggle", post(handlers::toggle))
        .route("/api/history/:date", get(handlers::get_day))
        .route("/api/today", get(handlers::get_today))
        .route("/api/series", get(handlers::get_series))
        .route("/api/export.csv", get(handlers::export))
        .with_state(state)
}
