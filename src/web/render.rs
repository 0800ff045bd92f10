//! HTML rendering.
//!
//! Pure functions from domain state to markup. All user text goes through `escape_html`.

use std::borrow::Cow;

use chrono::NaiveDateTime;

use crate::errors::AppError;
use crate::models::{
    CreateStreamRequest, DashboardSummary, EntityId, Goal, GrowthCurrent, GrowthInput, Idea,
    Platform, Stream, Theme,
};

const STYLE: &str = r#"
:root { --bg: #0f0f14; --panel: #1a1a24; --text: #f2f2f7; --text-secondary: #9a9ab0; --accent: #9146ff; }
body.light { --bg: #f5f5fa; --panel: #ffffff; --text: #1a1a24; --text-secondary: #5a5a70; }
body { margin: 0; display: flex; min-height: 100vh; background: var(--bg); color: var(--text); font-family: system-ui, sans-serif; }
.sidebar { width: 220px; padding: 24px 16px; background: var(--panel); display: flex; flex-direction: column; gap: 8px; }
.sidebar a { color: var(--text-secondary); text-decoration: none; padding: 8px 12px; border-radius: 8px; }
.sidebar a.active { color: var(--text); background: var(--accent); }
main { flex: 1; padding: 32px; }
ul { list-style: none; padding: 0; }
li { display: flex; justify-content: space-between; align-items: center; padding: 12px 16px; margin-bottom: 8px; background: var(--panel); border-radius: 8px; }
.done { text-decoration: line-through; opacity: 0.6; }
.item-meta { font-size: 13px; color: var(--text-secondary); margin-top: 4px; }
.item-actions { display: flex; gap: 6px; }
.item-actions form { margin: 0; }
.badge { font-size: 11px; padding: 2px 8px; border-radius: 999px; margin-left: 6px; }
.badge.completed { background: #2e7d32; color: #fff; }
.badge.upcoming { background: var(--accent); color: #fff; }
.stats { display: flex; gap: 16px; }
.stat { background: var(--panel); border-radius: 8px; padding: 16px 24px; }
.stat .value { font-size: 28px; font-weight: bold; }
.notification { padding: 12px 16px; border-radius: 8px; margin-bottom: 16px; background: #2e7d32; color: #fff; }
.notification.error { background: #c62828; }
.empty-state { color: var(--text-secondary); padding: 16px; }
.btn-small { border: 0; border-radius: 6px; padding: 6px 10px; cursor: pointer; color: #fff; background: var(--accent); }
.btn-small.success { background: #2e7d32; }
.btn-small.secondary { background: #5a5a70; }
.btn-small.danger { background: #c62828; }
"#;

/// Sidebar entries, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavItem {
    Dashboard,
    Streams,
    Goals,
    Ideas,
    Growth,
}

impl NavItem {
    pub const ALL: [NavItem; 5] = [
        NavItem::Dashboard,
        NavItem::Streams,
        NavItem::Goals,
        NavItem::Ideas,
        NavItem::Growth,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            NavItem::Dashboard => "/",
            NavItem::Streams => "/streams",
            NavItem::Goals => "/goals",
            NavItem::Ideas => "/ideas",
            NavItem::Growth => "/growth",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            NavItem::Dashboard => "Dashboard",
            NavItem::Streams => "Stream Planner",
            NavItem::Goals => "Goals",
            NavItem::Ideas => "Idea Bank",
            NavItem::Growth => "Growth Tracker",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Transient message shown at the top of a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

/// Per-request page chrome: which nav entry is active, the theme, an optional notice.
#[derive(Debug, Clone)]
pub struct PageContext {
    pub active: NavItem,
    pub theme: Theme,
    pub notice: Option<Notice>,
}

/// Escape text for element content and double- or single-quoted attribute values.
pub fn escape_html(raw: &str) -> Cow<'_, str> {
    html_escape::encode_quoted_attribute(raw)
}

/// `Jan 10, 2025, 07:00 PM`
pub fn format_date(date: &NaiveDateTime) -> String {
    date.format("%b %-d, %Y, %I:%M %p").to_string()
}

pub fn layout(ctx: &PageContext, body: &str) -> String {
    let nav: String = NavItem::ALL
        .iter()
        .map(|item| {
            let class = if *item == ctx.active {
                r#" class="active""#
            } else {
                ""
            };
            format!(r#"<a href="{}"{}>{}</a>"#, item.path(), class, item.label())
        })
        .collect();

    let notice = ctx
        .notice
        .as_ref()
        .map(|notice| {
            let class = match notice.kind {
                NoticeKind::Success => "notification success",
                NoticeKind::Error => "notification error",
            };
            format!(
                r#"<div class="{}">{}</div>"#,
                class,
                escape_html(&notice.message)
            )
        })
        .unwrap_or_default();

    let body_class = match ctx.theme {
        Theme::Light => r#" class="light""#,
        Theme::Dark => "",
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} - Creator Dashboard</title>
<style>{style}</style>
</head>
<body{body_class}>
<nav class="sidebar">
{nav}
<form method="post" action="/theme"><input type="hidden" name="back" value="{back}"><button type="submit" class="btn-small secondary">Toggle theme</button></form>
</nav>
<main>
{notice}
<h1>{title}</h1>
{body}
</main>
</body>
</html>
"#,
        title = ctx.active.label(),
        style = STYLE,
        body_class = body_class,
        nav = nav,
        back = ctx.active.path(),
        notice = notice,
        body = body,
    )
}

/// Toggle and delete buttons for one list entry.
fn item_actions(base: &str, id: EntityId, flagged: bool, flag_label: &str) -> String {
    let (class, label) = if flagged {
        ("secondary", "Undo")
    } else {
        ("success", flag_label)
    };
    format!(
        r#"<div class="item-actions">
<form method="post" action="{base}/{id}/toggle"><button type="submit" class="btn-small {class}">{label}</button></form>
<form method="post" action="{base}/{id}/delete"><button type="submit" class="btn-small danger">Delete</button></form>
</div>"#
    )
}

fn done_class(done: bool) -> &'static str {
    if done {
        r#" class="done""#
    } else {
        ""
    }
}

pub fn stream_list(streams: &[Stream]) -> String {
    if streams.is_empty() {
        return r#"<div class="empty-state">No streams scheduled yet. Add your first stream!</div>"#
            .to_string();
    }

    let items: String = streams
        .iter()
        .map(|s| {
            let (badge_class, badge) = if s.completed {
                ("completed", "Completed")
            } else {
                ("upcoming", "Upcoming")
            };
            format!(
                r#"<li><div class="item-text"><strong{done}>{title}</strong><div class="item-meta">{date} <span class="badge {badge_class}">{badge}</span></div></div>{actions}</li>"#,
                done = done_class(s.completed),
                title = escape_html(&s.title),
                date = format_date(&s.date),
                badge_class = badge_class,
                badge = badge,
                actions = item_actions("/streams", s.id, s.completed, "Complete"),
            )
        })
        .collect();

    format!(r#"<ul id="streamList">{}</ul>"#, items)
}

pub fn goal_list(goals: &[Goal]) -> String {
    if goals.is_empty() {
        return r#"<div class="empty-state">No goals yet. Start adding your objectives!</div>"#
            .to_string();
    }

    let items: String = goals
        .iter()
        .map(|g| {
            let badge = if g.completed {
                r#"<span class="badge completed">Completed</span>"#
            } else {
                ""
            };
            format!(
                r#"<li><div class="item-text"><span{}>{}</span>{}</div>{}</li>"#,
                done_class(g.completed),
                escape_html(&g.text),
                badge,
                item_actions("/goals", g.id, g.completed, "✓"),
            )
        })
        .collect();

    format!(r#"<ul id="goalList">{}</ul>"#, items)
}

pub fn idea_list(ideas: &[Idea]) -> String {
    if ideas.is_empty() {
        return r#"<div class="empty-state">No ideas yet. Start brainstorming your next content!</div>"#
            .to_string();
    }

    let items: String = ideas
        .iter()
        .map(|i| {
            let badge = if i.used {
                r#"<span class="badge completed">Used</span>"#
            } else {
                ""
            };
            format!(
                r#"<li><div class="item-text"><span{}>{}</span>{}</div>{}</li>"#,
                done_class(i.used),
                escape_html(&i.text),
                badge,
                item_actions("/ideas", i.id, i.used, "Used"),
            )
        })
        .collect();

    format!(r#"<ul id="ideaList">{}</ul>"#, items)
}

pub fn growth_stats(current: &GrowthCurrent) -> String {
    let cards: String = Platform::ALL
        .iter()
        .map(|platform| {
            format!(
                r#"<div class="stat"><div class="label">{}</div><div class="value" id="{}Stat">{}</div></div>"#,
                platform.label(),
                platform.key(),
                current.get(*platform)
            )
        })
        .collect();

    format!(r#"<div class="stats">{}</div>"#, cards)
}

pub fn dashboard_page(ctx: &PageContext, summary: &DashboardSummary) -> String {
    let next = match &summary.next_stream {
        Some(stream) => format!(
            "<strong>{}</strong><br><small>{}</small>",
            escape_html(&stream.title),
            format_date(&stream.date)
        ),
        None => "No upcoming streams scheduled.".to_string(),
    };

    let body = format!(
        r#"<section><h2>Next Stream</h2><div id="todayStream">{}</div></section>
<section><h2>Followers</h2>{}</section>"#,
        next,
        growth_stats(&summary.growth)
    );
    layout(ctx, &body)
}

pub fn streams_page(ctx: &PageContext, streams: &[Stream], form: &CreateStreamRequest) -> String {
    let body = format!(
        r#"<form method="post" action="/streams">
<input type="text" name="title" placeholder="Stream title" value="{}">
<input type="datetime-local" name="date" value="{}">
<button type="submit" class="btn-small">Add Stream</button>
</form>
{}"#,
        escape_html(&form.title),
        escape_html(&form.date),
        stream_list(streams)
    );
    layout(ctx, &body)
}

pub fn goals_page(ctx: &PageContext, goals: &[Goal], text: &str) -> String {
    let body = format!(
        r#"<form method="post" action="/goals">
<input type="text" name="text" placeholder="New goal" value="{}">
<button type="submit" class="btn-small">Add Goal</button>
</form>
{}"#,
        escape_html(text),
        goal_list(goals)
    );
    layout(ctx, &body)
}

pub fn ideas_page(ctx: &PageContext, ideas: &[Idea], text: &str) -> String {
    let body = format!(
        r#"<form method="post" action="/ideas">
<input type="text" name="text" placeholder="Content idea" value="{}">
<button type="submit" class="btn-small">Save Idea</button>
</form>
{}"#,
        escape_html(text),
        idea_list(ideas)
    );
    layout(ctx, &body)
}

pub fn growth_page(ctx: &PageContext, current: &GrowthCurrent, form: &GrowthInput) -> String {
    let inputs: String = Platform::ALL
        .iter()
        .map(|platform| {
            format!(
                r#"<input type="number" min="0" name="{}" placeholder="{} followers" value="{}">"#,
                platform.key(),
                platform.label(),
                escape_html(form.field(*platform).unwrap_or_default())
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let body = format!(
        r#"{}
<form method="post" action="/growth">
{}
<button type="submit" class="btn-small">Save Stats</button>
</form>"#,
        growth_stats(current),
        inputs
    );
    layout(ctx, &body)
}

/// Standalone error page, rendered without reading the theme.
pub fn error_page(error: &AppError) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>Error - Creator Dashboard</title></head>
<body><h1>Something went wrong</h1><p>{}</p><p><a href="/">Back to dashboard</a></p></body>
</html>
"#,
        escape_html(&error.message())
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::parse_stream_date;

    fn ctx(active: NavItem) -> PageContext {
        PageContext {
            active,
            theme: Theme::Dark,
            notice: None,
        }
    }

    fn stream(id: EntityId, title: &str, completed: bool) -> Stream {
        Stream {
            id,
            title: title.to_string(),
            date: parse_stream_date("2025-01-10T19:00").unwrap(),
            completed,
        }
    }

    #[test]
    fn test_escape_html() {
        let escaped = escape_html(r#"<script>alert("x") & 'y'</script>"#);
        assert!(escaped.starts_with("&lt;script&gt;alert(&quot;x&quot;) &amp; "));
        assert!(escaped.ends_with("&lt;/script&gt;"));
        assert!(!escaped.contains('\''));
        assert_eq!(escape_html("Launch night"), "Launch night");
    }

    #[test]
    fn test_format_date() {
        let date = parse_stream_date("2025-01-10T19:00").unwrap();
        assert_eq!(format_date(&date), "Jan 10, 2025, 07:00 PM");
        let date = parse_stream_date("2025-03-05T09:05").unwrap();
        assert_eq!(format_date(&date), "Mar 5, 2025, 09:05 AM");
    }

    #[test]
    fn test_empty_lists_show_empty_state() {
        assert!(stream_list(&[]).contains("empty-state"));
        assert!(goal_list(&[]).contains("empty-state"));
        assert!(idea_list(&[]).contains("empty-state"));
    }

    #[test]
    fn test_stream_list_actions_and_escaping() {
        let html = stream_list(&[stream(7, "<b>Launch</b>", false), stream(8, "Recap", true)]);

        assert!(html.contains(r#"action="/streams/7/toggle""#));
        assert!(html.contains(r#"action="/streams/8/delete""#));
        assert!(html.contains("&lt;b&gt;Launch&lt;/b&gt;"));
        assert!(!html.contains("<b>Launch</b>"));
        assert!(html.contains(">Complete<"));
        assert!(html.contains(">Undo<"));
        assert!(html.contains("Jan 10, 2025, 07:00 PM"));
    }

    #[test]
    fn test_layout_highlights_active_nav_and_theme() {
        let mut page_ctx = ctx(NavItem::Goals);
        page_ctx.theme = Theme::Light;
        page_ctx.notice = Some(Notice::error("Please enter a goal"));

        let html = layout(&page_ctx, "<p>body</p>");
        assert!(html.contains(r#"<a href="/goals" class="active">Goals</a>"#));
        assert!(html.contains(r#"<a href="/streams">Stream Planner</a>"#));
        assert!(html.contains(r#"<body class="light">"#));
        assert!(html.contains(r#"<div class="notification error">Please enter a goal</div>"#));
        assert!(html.contains(r#"name="back" value="/goals""#));
    }

    #[test]
    fn test_dashboard_page_without_streams() {
        let summary = DashboardSummary {
            next_stream: None,
            growth: GrowthCurrent {
                twitch: 100,
                youtube: 0,
                tiktok: 5,
            },
        };

        let html = dashboard_page(&ctx(NavItem::Dashboard), &summary);
        assert!(html.contains("No upcoming streams scheduled."));
        assert!(html.contains(r#"id="twitchStat">100<"#));
        assert!(html.contains(r#"id="tiktokStat">5<"#));
    }
}
