//! Server-rendered pages and form handlers.
//!
//! Forms follow post/redirect/get: a successful mutation redirects back to its page with a
//! `?notice=<code>` flash; a validation failure re-renders the page with the submitted
//! values and an error notice.

pub mod render;

use std::str::FromStr;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use chrono::Local;
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::{CreateStreamRequest, CreateTextRequest, EntityId, GrowthInput, Theme};
use crate::AppState;
use render::{NavItem, Notice, PageContext};

/// Success messages carried across a redirect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeCode {
    StreamAdded,
    StreamDeleted,
    StreamCompleted,
    StreamUpcoming,
    GoalAdded,
    GoalDeleted,
    GoalCompleted,
    GoalReopened,
    IdeaSaved,
    IdeaDeleted,
    IdeaUsed,
    IdeaUnused,
    GrowthSaved,
    ThemeLight,
    ThemeDark,
}

impl NoticeCode {
    const ALL: [NoticeCode; 15] = [
        NoticeCode::StreamAdded,
        NoticeCode::StreamDeleted,
        NoticeCode::StreamCompleted,
        NoticeCode::StreamUpcoming,
        NoticeCode::GoalAdded,
        NoticeCode::GoalDeleted,
        NoticeCode::GoalCompleted,
        NoticeCode::GoalReopened,
        NoticeCode::IdeaSaved,
        NoticeCode::IdeaDeleted,
        NoticeCode::IdeaUsed,
        NoticeCode::IdeaUnused,
        NoticeCode::GrowthSaved,
        NoticeCode::ThemeLight,
        NoticeCode::ThemeDark,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NoticeCode::StreamAdded => "stream-added",
            NoticeCode::StreamDeleted => "stream-deleted",
            NoticeCode::StreamCompleted => "stream-completed",
            NoticeCode::StreamUpcoming => "stream-upcoming",
            NoticeCode::GoalAdded => "goal-added",
            NoticeCode::GoalDeleted => "goal-deleted",
            NoticeCode::GoalCompleted => "goal-completed",
            NoticeCode::GoalReopened => "goal-reopened",
            NoticeCode::IdeaSaved => "idea-saved",
            NoticeCode::IdeaDeleted => "idea-deleted",
            NoticeCode::IdeaUsed => "idea-used",
            NoticeCode::IdeaUnused => "idea-unused",
            NoticeCode::GrowthSaved => "growth-saved",
            NoticeCode::ThemeLight => "theme-light",
            NoticeCode::ThemeDark => "theme-dark",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            NoticeCode::StreamAdded => "Stream added successfully!",
            NoticeCode::StreamDeleted => "Stream deleted",
            NoticeCode::StreamCompleted => "Stream marked as completed!",
            NoticeCode::StreamUpcoming => "Stream marked as upcoming",
            NoticeCode::GoalAdded => "Goal added!",
            NoticeCode::GoalDeleted => "Goal deleted",
            NoticeCode::GoalCompleted => "Goal completed! 👑",
            NoticeCode::GoalReopened => "Goal reopened",
            NoticeCode::IdeaSaved => "Idea saved!",
            NoticeCode::IdeaDeleted => "Idea deleted",
            NoticeCode::IdeaUsed => "Idea marked as used!",
            NoticeCode::IdeaUnused => "Idea marked as unused",
            NoticeCode::GrowthSaved => "Growth stats saved!",
            NoticeCode::ThemeLight => "Switched to light mode",
            NoticeCode::ThemeDark => "Switched to dark mode",
        }
    }
}

impl FromStr for NoticeCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|code| code.as_str() == s)
            .ok_or_else(|| format!("Unknown notice: {}", s))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct NoticeQuery {
    #[serde(default)]
    pub notice: Option<String>,
}

impl NoticeQuery {
    fn notice(&self) -> Option<Notice> {
        self.notice
            .as_deref()
            .and_then(|raw| raw.parse::<NoticeCode>().ok())
            .map(|code| Notice::success(code.message()))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ThemeForm {
    #[serde(default)]
    pub back: String,
}

/// Storage failures while serving a page, rendered as HTML instead of the JSON envelope.
#[derive(Debug)]
pub struct WebError(AppError);

impl From<AppError> for WebError {
    fn from(err: AppError) -> Self {
        WebError(err)
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        tracing::error!("Page request failed: {}", self.0);
        (self.0.status_code(), Html(render::error_page(&self.0))).into_response()
    }
}

type WebResult<T> = Result<T, WebError>;

async fn page_context(
    state: &AppState,
    active: NavItem,
    notice: Option<Notice>,
) -> Result<PageContext, AppError> {
    Ok(PageContext {
        active,
        theme: state.dashboard.theme.current().await?,
        notice,
    })
}

fn redirect_with(path: &str, code: Option<NoticeCode>) -> Response {
    match code {
        Some(code) => Redirect::to(&format!("{}?notice={}", path, code.as_str())).into_response(),
        None => Redirect::to(path).into_response(),
    }
}

fn rejected(html: String) -> Response {
    (StatusCode::BAD_REQUEST, Html(html)).into_response()
}

/// Redirect targets are limited to the sidebar pages; anything else goes to the dashboard.
fn safe_back_path(back: &str) -> &'static str {
    NavItem::ALL
        .iter()
        .map(NavItem::path)
        .find(|path| *path == back)
        .unwrap_or("/")
}

// ==================== DASHBOARD ====================

/// GET / - Next upcoming stream and follower counters.
pub async fn dashboard_page(
    State(state): State<AppState>,
    Query(query): Query<NoticeQuery>,
) -> WebResult<Html<String>> {
    let ctx = page_context(&state, NavItem::Dashboard, query.notice()).await?;
    let summary = state
        .dashboard
        .aggregator
        .summary(Local::now().naive_local())
        .await?;
    Ok(Html(render::dashboard_page(&ctx, &summary)))
}

/// POST /theme - Switch theme and return to the page the toggle was pressed on.
pub async fn toggle_theme(
    State(state): State<AppState>,
    Form(form): Form<ThemeForm>,
) -> WebResult<Response> {
    let code = match state.dashboard.theme.toggle().await? {
        Theme::Light => NoticeCode::ThemeLight,
        Theme::Dark => NoticeCode::ThemeDark,
    };
    Ok(redirect_with(safe_back_path(&form.back), Some(code)))
}

// ==================== STREAMS ====================

/// GET /streams
pub async fn streams_page(
    State(state): State<AppState>,
    Query(query): Query<NoticeQuery>,
) -> WebResult<Html<String>> {
    let ctx = page_context(&state, NavItem::Streams, query.notice()).await?;
    let streams = state.dashboard.streams.list().await?;
    Ok(Html(render::streams_page(
        &ctx,
        &streams,
        &CreateStreamRequest::default(),
    )))
}

/// POST /streams
pub async fn add_stream(
    State(state): State<AppState>,
    Form(form): Form<CreateStreamRequest>,
) -> WebResult<Response> {
    match state.dashboard.streams.add(&form.title, &form.date).await {
        Ok(_) => Ok(redirect_with("/streams", Some(NoticeCode::StreamAdded))),
        Err(e) if e.is_validation() => {
            let ctx = page_context(&state, NavItem::Streams, Some(Notice::error(e.message()))).await?;
            let streams = state.dashboard.streams.list().await?;
            Ok(rejected(render::streams_page(&ctx, &streams, &form)))
        }
        Err(e) => Err(e.into()),
    }
}

/// POST /streams/:id/toggle
pub async fn toggle_stream(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> WebResult<Response> {
    let code = state
        .dashboard
        .streams
        .toggle_complete(id)
        .await?
        .map(|stream| {
            if stream.completed {
                NoticeCode::StreamCompleted
            } else {
                NoticeCode::StreamUpcoming
            }
        });
    Ok(redirect_with("/streams", code))
}

/// POST /streams/:id/delete
pub async fn delete_stream(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> WebResult<Response> {
    let removed = state.dashboard.streams.delete(id).await?;
    Ok(redirect_with(
        "/streams",
        removed.then_some(NoticeCode::StreamDeleted),
    ))
}

// ==================== GOALS ====================

/// GET /goals
pub async fn goals_page(
    State(state): State<AppState>,
    Query(query): Query<NoticeQuery>,
) -> WebResult<Html<String>> {
    let ctx = page_context(&state, NavItem::Goals, query.notice()).await?;
    let goals = state.dashboard.goals.list().await?;
    Ok(Html(render::goals_page(&ctx, &goals, "")))
}

/// POST /goals
pub async fn add_goal(
    State(state): State<AppState>,
    Form(form): Form<CreateTextRequest>,
) -> WebResult<Response> {
    match state.dashboard.goals.add(&form.text).await {
        Ok(_) => Ok(redirect_with("/goals", Some(NoticeCode::GoalAdded))),
        Err(e) if e.is_validation() => {
            let ctx = page_context(&state, NavItem::Goals, Some(Notice::error(e.message()))).await?;
            let goals = state.dashboard.goals.list().await?;
            Ok(rejected(render::goals_page(&ctx, &goals, &form.text)))
        }
        Err(e) => Err(e.into()),
    }
}

/// POST /goals/:id/toggle
pub async fn toggle_goal(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> WebResult<Response> {
    let code = state
        .dashboard
        .goals
        .toggle_complete(id)
        .await?
        .map(|goal| {
            if goal.completed {
                NoticeCode::GoalCompleted
            } else {
                NoticeCode::GoalReopened
            }
        });
    Ok(redirect_with("/goals", code))
}

/// POST /goals/:id/delete
pub async fn delete_goal(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> WebResult<Response> {
    let removed = state.dashboard.goals.delete(id).await?;
    Ok(redirect_with("/goals", removed.then_some(NoticeCode::GoalDeleted)))
}

// ==================== IDEAS ====================

/// GET /ideas
pub async fn ideas_page(
    State(state): State<AppState>,
    Query(query): Query<NoticeQuery>,
) -> WebResult<Html<String>> {
    let ctx = page_context(&state, NavItem::Ideas, query.notice()).await?;
    let ideas = state.dashboard.ideas.list().await?;
    Ok(Html(render::ideas_page(&ctx, &ideas, "")))
}

/// POST /ideas
pub async fn add_idea(
    State(state): State<AppState>,
    Form(form): Form<CreateTextRequest>,
) -> WebResult<Response> {
    match state.dashboard.ideas.add(&form.text).await {
        Ok(_) => Ok(redirect_with("/ideas", Some(NoticeCode::IdeaSaved))),
        Err(e) if e.is_validation() => {
            let ctx = page_context(&state, NavItem::Ideas, Some(Notice::error(e.message()))).await?;
            let ideas = state.dashboard.ideas.list().await?;
            Ok(rejected(render::ideas_page(&ctx, &ideas, &form.text)))
        }
        Err(e) => Err(e.into()),
    }
}

/// POST /ideas/:id/toggle
pub async fn toggle_idea(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> WebResult<Response> {
    let code = state
        .dashboard
        .ideas
        .toggle_used(id)
        .await?
        .map(|idea| {
            if idea.used {
                NoticeCode::IdeaUsed
            } else {
                NoticeCode::IdeaUnused
            }
        });
    Ok(redirect_with("/ideas", code))
}

/// POST /ideas/:id/delete
pub async fn delete_idea(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> WebResult<Response> {
    let removed = state.dashboard.ideas.delete(id).await?;
    Ok(redirect_with("/ideas", removed.then_some(NoticeCode::IdeaDeleted)))
}

// ==================== GROWTH ====================

/// GET /growth
pub async fn growth_page(
    State(state): State<AppState>,
    Query(query): Query<NoticeQuery>,
) -> WebResult<Html<String>> {
    let ctx = page_context(&state, NavItem::Growth, query.notice()).await?;
    let current = state.dashboard.growth.current_values().await?;
    Ok(Html(render::growth_page(
        &ctx,
        &current,
        &GrowthInput::default(),
    )))
}

/// POST /growth
pub async fn record_growth(
    State(state): State<AppState>,
    Form(form): Form<GrowthInput>,
) -> WebResult<Response> {
    match state.dashboard.growth.record_snapshot(&form).await {
        Ok(_) => Ok(redirect_with("/growth", Some(NoticeCode::GrowthSaved))),
        Err(e) if e.is_validation() => {
            let ctx = page_context(&state, NavItem::Growth, Some(Notice::error(e.message()))).await?;
            let current = state.dashboard.growth.current_values().await?;
            Ok(rejected(render::growth_page(&ctx, &current, &form)))
        }
        Err(e) => Err(e.into()),
    }
}
