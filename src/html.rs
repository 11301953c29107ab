// ABOUTME: Server-rendered HTML pages for the browser interface
// ABOUTME: Plain format! markup with every user-supplied value escaped
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Minimal HTML rendering
//!
//! Pages are assembled with `format!`; user content goes through [`text`] or
//! [`attr`] before it is interpolated.

use crate::auth::SessionUser;
use crate::database::logs::LogHistoryRow;
use crate::models::{Exercise, Program, WeekSplit, Weekday};
use crate::services::provisioning::ProgramLayout;
use std::borrow::Cow;
// `write!` into a `String` cannot fail, so its `fmt::Result` is discarded throughout
use std::fmt::Write;

/// Exercise rows rendered on the log form
pub const LOG_FORM_ROWS: usize = 6;
/// Set columns per exercise row on the log form
pub const LOG_FORM_SETS: usize = 5;

const STYLE: &str = "body{font-family:sans-serif;margin:2rem;max-width:60rem}\
table{border-collapse:collapse}td,th{border:1px solid #ccc;padding:.25rem .5rem}\
nav a{margin-right:1rem}input[type=number]{width:5rem}";

/// Escape text content
#[must_use]
pub fn text(value: &str) -> Cow<'_, str> {
    html_escape::encode_text(value)
}

/// Escape a double-quoted attribute value
#[must_use]
pub fn attr(value: &str) -> Cow<'_, str> {
    html_escape::encode_double_quoted_attribute(value)
}

/// Wrap a body in the shared layout
#[must_use]
pub fn page(title: &str, user: Option<&SessionUser>, body: &str) -> String {
    let account = user.map_or_else(
        || r#"<a href="/login">Login</a><a href="/register">Register</a>"#.to_owned(),
        |user| {
            format!(
                r#"<span>Signed in as {}</span> <a href="/logout">Logout</a>"#,
                text(&user.user_name)
            )
        },
    );

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>{title} - Apelog</title>
    <style>{STYLE}</style>
</head>
<body>
    <nav>
        <a href="/">Home</a><a href="/create">Programs</a><a href="/display">History</a>
        <a href="/design">Design</a><a href="/dashboard/">Dashboard</a>
        {account}
    </nav>
    <h1>{title}</h1>
    {body}
</body>
</html>"#,
        title = text(title),
    )
}

/// Landing page
#[must_use]
pub fn index_page(user: Option<&SessionUser>) -> String {
    let body = if user.is_some() {
        r#"<p>Pick a program under <a href="/create">Programs</a> to log a session,
or open the <a href="/dashboard/">dashboard</a>.</p>"#
    } else {
        r#"<p>Track programs, log sets, and chart your volume. <a href="/login">Log in</a> to start.</p>"#
    };
    page("Apelog", user, body)
}

/// Login form
#[must_use]
pub fn login_page() -> String {
    let body = r#"<form method="post" action="/login">
    <label>Username <input name="username"></label>
    <label>Password <input type="password" name="password"></label>
    <button type="submit">Login</button>
</form>"#;
    page("Login", None, body)
}

/// Registration form
#[must_use]
pub fn register_page() -> String {
    let body = r#"<form method="post" action="/register">
    <label>Username <input name="username"></label>
    <label>Password <input type="password" name="password"></label>
    <label>Confirm <input type="password" name="confirm_password"></label>
    <button type="submit">Register</button>
</form>"#;
    page("Register", None, body)
}

/// Program creation form plus the list of programs
#[must_use]
pub fn create_page(user: &SessionUser, programs: &[Program]) -> String {
    let mut body = String::from(
        r#"<form method="post" action="/create_program">
    <label>Name <input name="program_name" required></label>
    <label>Start date <input type="date" name="start_date" required></label>
    <label>Weeks <input type="number" name="weeks" min="1" value="4"></label>
    <fieldset><legend>Training days</legend>"#,
    );
    for (index, day) in ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"].iter().enumerate() {
        let _ = write!(
            body,
            r#"<label><input type="checkbox" name="training_days[]" value="{}"> {day}</label>"#,
            index + 1
        );
    }
    body.push_str(r#"</fieldset><button type="submit">Create program</button></form><h2>Programs</h2><ul>"#);

    for program in programs {
        let _ = write!(
            body,
            r#"<li>{} <a href="/log/{}">log a session</a></li>"#,
            text(&program.name),
            program.id
        );
    }
    body.push_str("</ul>");
    page("Programs", Some(user), &body)
}

/// A user's log history
#[must_use]
pub fn display_page(user: &SessionUser, rows: &[LogHistoryRow]) -> String {
    if rows.is_empty() {
        return page("History", Some(user), "<p>No logs yet.</p>");
    }

    let mut body = String::from(
        "<table><tr><th>When</th><th>Program</th><th>Week</th><th>Session</th>\
         <th>Exercise</th><th>Load</th><th>Sets</th><th>Reps</th><th>RIR</th></tr>",
    );
    for row in rows {
        let _ = write!(
            body,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td>\
             <td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            row.timestamp.format("%Y-%m-%d %H:%M"),
            text(row.program_name.as_deref().unwrap_or("-")),
            row.week_number.map_or_else(|| "-".to_owned(), |w| w.to_string()),
            text(row.session_name.as_deref().unwrap_or("-")),
            text(&row.exercise_name),
            row.load,
            row.sets,
            text(&row.reps),
            row.rir,
        );
    }
    body.push_str("</table>");
    page("History", Some(user), &body)
}

/// Each program's mesocycle, weeks, and sessions
#[must_use]
pub fn design_page(user: &SessionUser, layouts: &[ProgramLayout]) -> String {
    let mut body = String::new();
    if layouts.is_empty() {
        body.push_str(r#"<p>No programs yet. <a href="/create">Create one</a>.</p>"#);
    }

    for layout in layouts {
        let _ = write!(body, "<h2>{}</h2>", text(&layout.program.name));
        let Some(meso) = &layout.meso_cycle else {
            body.push_str("<p>No mesocycle.</p>");
            continue;
        };
        let _ = write!(
            body,
            "<p>Starts {} - {} weeks</p><ul>",
            meso.start_date, meso.total_weeks
        );
        for week in &layout.weeks {
            let _ = write!(
                body,
                "<li>Week {} (days {})<ul>",
                week.week.week_number,
                split_names(&week.week.week_split)
            );
            for session in &week.sessions {
                let _ = write!(
                    body,
                    "<li>{}: {}</li>",
                    session.day_of_week.name(),
                    text(&session.name)
                );
            }
            body.push_str("</ul></li>");
        }
        body.push_str("</ul>");
    }
    page("Design", Some(user), &body)
}

fn split_names(split: &WeekSplit) -> String {
    if split.is_empty() {
        return "none".to_owned();
    }
    split.days().map(Weekday::name).collect::<Vec<_>>().join(", ")
}

/// Log entry form for one program
#[must_use]
pub fn log_form_page(
    user: &SessionUser,
    program: &Program,
    training_days: &WeekSplit,
    total_weeks: i64,
    exercises: &[Exercise],
) -> String {
    let mut body = format!(
        r#"<form method="post" action="/submit-log">
    <input type="hidden" name="user_id" value="{}">
    <input type="hidden" name="program_id" value="{}">
    <label>Week <input type="number" name="week_number" min="1" max="{total_weeks}" value="1"></label>
    <label>Day <select name="session_day">"#,
        user.user_id, program.id
    );
    for day in training_days.days() {
        let _ = write!(body, r#"<option value="{day}">{}</option>"#, day.name());
    }
    body.push_str(
        r#"</select></label>
    <label>Session name <input name="session_name"></label>
    <datalist id="exercises">"#,
    );
    for exercise in exercises {
        let _ = write!(body, r#"<option value="{}">"#, attr(&exercise.name));
    }
    body.push_str("</datalist><table><tr><th>Exercise</th><th>Load</th><th>Sets</th><th>RIR</th><th>Reps per set</th></tr>");

    for row in 0..LOG_FORM_ROWS {
        body.push_str(
            r#"<tr><td><input name="exercise_name[]" list="exercises"></td>
<td><input type="number" step="any" name="load[]"></td>
<td><input type="number" name="sets[]"></td>
<td><input type="number" name="rir[]"></td><td>"#,
        );
        for _ in 0..LOG_FORM_SETS {
            let _ = write!(body, r#"<input type="number" name="reps[{row}][]">"#);
        }
        body.push_str("</td></tr>");
    }
    body.push_str(r#"</table><button type="submit">Save</button></form>"#);

    page(&format!("Log: {}", program.name), Some(user), &body)
}

/// Dashboard shell; the filters and table are driven by the JSON API
#[must_use]
pub fn dashboard_page(user: &SessionUser) -> String {
    let body = r#"<form id="filters">
    <label>Program <select id="program"><option value="">All programs</option></select></label>
    <label>Week <select id="week"><option value="all">All weeks</option></select></label>
    <label>Session <select id="session"><option value="all">All sessions</option></select></label>
    <label>Exercise <select id="exercise"><option value="">All exercises</option></select></label>
    <label>Metric <select id="metric">
        <option value="volume">Volume</option><option value="load">Load</option><option value="reps">Reps per set</option>
    </select></label>
</form>
<p id="message"></p>
<table id="series"></table>
<script>
const $ = (id) => document.getElementById(id);
const api = (path, params) => fetch(`/dashboard/api/${path}?` + new URLSearchParams(params)).then((r) => r.json());
const fill = (select, keep, items) => {
    select.length = keep;
    for (const [value, label] of items) select.add(new Option(label, value));
};
const params = () => ({ program: $("program").value, week: $("week").value, session: $("session").value,
    exercise: $("exercise").value, metric: $("metric").value });
async function refreshSeries() {
    const report = await api("series", params());
    $("message").textContent = report.message || "";
    const table = $("series");
    table.innerHTML = "<tr><th>Week</th><th>Exercise</th><th>Set</th><th>Value</th></tr>";
    for (const p of report.points) {
        const tr = table.insertRow();
        for (const v of [p.week_number, p.exercise, p.set_position ?? "", p.value]) tr.insertCell().textContent = v;
    }
}
async function refreshExercises() {
    fill($("exercise"), 1, (await api("exercises", params())).map((n) => [n, n]));
    await refreshSeries();
}
async function refreshSessions() {
    const program = $("program").value;
    fill($("session"), 1, program ? (await api("sessions", params())).map((s) => [s.day_of_week, s.name]) : []);
    await refreshExercises();
}
async function refreshWeeks() {
    const program = $("program").value;
    fill($("week"), 1, program ? (await api("weeks", { program })).map((w) => [w, `Week ${w}`]) : []);
    await refreshSessions();
}
$("program").onchange = refreshWeeks;
$("week").onchange = refreshSessions;
$("session").onchange = refreshExercises;
$("exercise").onchange = refreshSeries;
$("metric").onchange = refreshSeries;
api("programs", {}).then((programs) => { fill($("program"), 1, programs.map((p) => [p.id, p.name])); refreshWeeks(); });
</script>"#;
    page("Dashboard", Some(user), body)
}
