// ABOUTME: Dashboard shell page and the JSON endpoints behind its cascading filters
// ABOUTME: Query strings carry program, week, session, exercise, and metric selectors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::database::reports::ReportFilter;
use crate::errors::{AppError, AppResult};
use crate::html;
use crate::middleware::{AuthenticatedUser, RequestId};
use crate::resources::ServerResources;
use crate::services::{provisioning, reporting};
use apelog_analytics::{Metric, SessionFilter, WeekFilter};
use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Raw dashboard selectors as the browser sends them
///
/// Every field is optional text; blank program and exercise mean "any", blank
/// week and session mean `all`.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    /// Program id
    #[serde(default)]
    pub program: Option<String>,
    /// Week number or `all`
    #[serde(default)]
    pub week: Option<String>,
    /// Weekday index or `all`
    #[serde(default)]
    pub session: Option<String>,
    /// Exercise name
    #[serde(default)]
    pub exercise: Option<String>,
    /// `volume`, `load`, or `reps`
    #[serde(default)]
    pub metric: Option<String>,
}

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(|raw| raw.trim()).filter(|raw| !raw.is_empty())
}

impl DashboardQuery {
    /// Program id, if one is selected
    ///
    /// # Errors
    ///
    /// Returns `InvalidFormat` for a non-numeric id
    pub fn program_id(&self) -> AppResult<Option<i64>> {
        non_blank(self.program.as_ref())
            .map(|raw| {
                raw.parse()
                    .map_err(|_| AppError::invalid_format("program", raw))
            })
            .transpose()
    }

    /// Program id for endpoints that cannot answer without one
    ///
    /// # Errors
    ///
    /// Returns `MissingRequiredField` or `InvalidFormat`
    pub fn required_program_id(&self) -> AppResult<i64> {
        self.program_id()?
            .ok_or_else(|| AppError::missing_field("program"))
    }

    /// Week selector
    ///
    /// # Errors
    ///
    /// Returns `InvalidFormat` for a value that is neither a number nor `all`
    pub fn week(&self) -> AppResult<WeekFilter> {
        self.week.as_deref().unwrap_or_default().parse()
    }

    /// Session selector
    ///
    /// # Errors
    ///
    /// Returns `InvalidFormat` for a value that is neither a weekday nor `all`
    pub fn session(&self) -> AppResult<SessionFilter> {
        self.session.as_deref().unwrap_or_default().parse()
    }

    /// Metric selector, volume when omitted
    ///
    /// # Errors
    ///
    /// Returns `InvalidFormat` for an unknown metric
    pub fn metric(&self) -> AppResult<Metric> {
        non_blank(self.metric.as_ref()).map_or(Ok(Metric::Volume), str::parse)
    }

    /// Combined filter for log queries
    ///
    /// # Errors
    ///
    /// Returns `InvalidFormat` when any selector is malformed
    pub fn report_filter(&self) -> AppResult<ReportFilter> {
        Ok(ReportFilter {
            program_id: self.program_id()?,
            week: self.week()?,
            session: self.session()?,
            exercise: non_blank(self.exercise.as_ref()).map(str::to_owned),
        })
    }
}

/// Dashboard routes
pub struct DashboardRoutes;

impl DashboardRoutes {
    /// Create all dashboard routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/dashboard", get(Self::handle_shell))
            .route("/dashboard/", get(Self::handle_shell))
            .route("/dashboard/api/programs", get(Self::handle_programs))
            .route("/dashboard/api/weeks", get(Self::handle_weeks))
            .route("/dashboard/api/sessions", get(Self::handle_sessions))
            .route("/dashboard/api/exercises", get(Self::handle_exercises))
            .route("/dashboard/api/series", get(Self::handle_series))
            .with_state(resources)
    }

    async fn handle_shell(AuthenticatedUser(user): AuthenticatedUser) -> Html<String> {
        Html(html::dashboard_page(&user))
    }

    async fn handle_programs(
        State(resources): State<Arc<ServerResources>>,
        AuthenticatedUser(_): AuthenticatedUser,
        request_id: RequestId,
    ) -> Result<Response, AppError> {
        let programs = provisioning::list_programs(&resources.database).await;
        json_or_tagged(&request_id, programs)
    }

    async fn handle_weeks(
        State(resources): State<Arc<ServerResources>>,
        AuthenticatedUser(_): AuthenticatedUser,
        request_id: RequestId,
        Query(query): Query<DashboardQuery>,
    ) -> Result<Response, AppError> {
        let weeks = async {
            let program_id = query.required_program_id()?;
            reporting::week_options(&resources.database, program_id).await
        }
        .await;
        json_or_tagged(&request_id, weeks)
    }

    async fn handle_sessions(
        State(resources): State<Arc<ServerResources>>,
        AuthenticatedUser(_): AuthenticatedUser,
        request_id: RequestId,
        Query(query): Query<DashboardQuery>,
    ) -> Result<Response, AppError> {
        let sessions = async {
            let program_id = query.required_program_id()?;
            reporting::session_options(&resources.database, program_id, query.week()?).await
        }
        .await;
        json_or_tagged(&request_id, sessions)
    }

    async fn handle_exercises(
        State(resources): State<Arc<ServerResources>>,
        AuthenticatedUser(_): AuthenticatedUser,
        request_id: RequestId,
        Query(query): Query<DashboardQuery>,
    ) -> Result<Response, AppError> {
        let names = async {
            let filter = query.report_filter()?;
            reporting::exercise_options(&resources.database, &filter).await
        }
        .await;
        json_or_tagged(&request_id, names)
    }

    async fn handle_series(
        State(resources): State<Arc<ServerResources>>,
        AuthenticatedUser(_): AuthenticatedUser,
        request_id: RequestId,
        Query(query): Query<DashboardQuery>,
    ) -> Result<Response, AppError> {
        let report = async {
            let filter = query.report_filter()?;
            reporting::series(&resources.database, &filter, query.metric()?).await
        }
        .await;
        json_or_tagged(&request_id, report)
    }
}

/// Render a result as JSON, stamping failures with the request ID
fn json_or_tagged<T: Serialize>(
    request_id: &RequestId,
    result: AppResult<T>,
) -> Result<Response, AppError> {
    result
        .map(|value| Json(value).into_response())
        .map_err(|e| request_id.tag(e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;

    fn query(program: &str, week: &str, session: &str) -> DashboardQuery {
        DashboardQuery {
            program: Some(program.to_owned()),
            week: Some(week.to_owned()),
            session: Some(session.to_owned()),
            ..DashboardQuery::default()
        }
    }

    #[test]
    fn test_blank_selectors_mean_everything() {
        let filter = DashboardQuery::default().report_filter().unwrap();
        assert_eq!(filter.program_id, None);
        assert_eq!(filter.week, WeekFilter::All);
        assert_eq!(filter.session, SessionFilter::All);
        assert_eq!(filter.exercise, None);
        assert_eq!(DashboardQuery::default().metric().unwrap(), Metric::Volume);
    }

    #[test]
    fn test_specific_selectors() {
        let filter = query("4", "2", "all").report_filter().unwrap();
        assert_eq!(filter.program_id, Some(4));
        assert_eq!(filter.week, WeekFilter::Number(2));
        assert_eq!(filter.session, SessionFilter::All);
    }

    #[test]
    fn test_malformed_selectors() {
        let error = query("four", "all", "all").report_filter().unwrap_err();
        assert_eq!(error.code, ErrorCode::InvalidFormat);

        let error = query("", "all", "all").required_program_id().unwrap_err();
        assert_eq!(error.code, ErrorCode::MissingRequiredField);
    }
}
