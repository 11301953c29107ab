// ABOUTME: Log batch ingestion: resolves week and session, upserts exercises, writes logs
// ABOUTME: The whole batch is one transaction, so a failure leaves no partial rows behind

use crate::database::logs::{self, NewLog};
use crate::database::{exercises, users, Database};
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::models::{Log, LogBatch, TrainingSession, TrainingWeek};
use crate::services::provisioning::{resolve_session, resolve_week};
use chrono::Utc;
use tracing::debug;

/// What a committed batch wrote
#[derive(Debug, Clone, PartialEq)]
pub struct BatchReceipt {
    /// Week the logs were attached to
    pub week: TrainingWeek,
    /// Session the logs were attached to
    pub session: TrainingSession,
    /// Rows written, in submission order
    pub written: Vec<Log>,
    /// Entries dropped for blank or zero values
    pub skipped: usize,
}

/// Persist a log submission
///
/// Entries with a blank name, or a load, set count, or RIR that is blank or
/// zero, are skipped. Week and session rows are created on demand. Everything
/// the batch writes, including new exercises, commits together or not at all.
///
/// # Errors
///
/// Returns `InvalidReference` for an unknown user, a program without a
/// mesocycle, or a missing week 1; `InvalidInput` for a week number below 1;
/// or a database error
pub async fn submit_batch(database: &Database, batch: LogBatch) -> AppResult<BatchReceipt> {
    let mut tx = database.begin().await?;

    if users::get_user(&mut tx, batch.user_id).await?.is_none() {
        return Err(AppError::invalid_reference(format!(
            "User {} not found",
            batch.user_id
        )));
    }

    let (meso, week) = resolve_week(&mut tx, batch.program_id, batch.week_number).await?;
    let session = resolve_session(
        &mut tx,
        &week,
        batch.session_day,
        batch.session_name.as_deref(),
    )
    .await?;

    let timestamp = Utc::now();
    let mut written = Vec::with_capacity(batch.entries.len());
    let mut skipped = 0;

    for entry in batch.entries {
        if !entry.is_complete() {
            debug!(exercise = %entry.exercise_name, "Skipping entry with blank or zero values");
            skipped += 1;
            continue;
        }
        let (Some(load), Some(sets), Some(rir)) = (entry.load, entry.sets, entry.rir) else {
            skipped += 1;
            continue;
        };

        let exercise = exercises::upsert_exercise(&mut tx, &entry.exercise_name).await?;
        let log = logs::insert_log(
            &mut tx,
            NewLog {
                user_id: batch.user_id,
                program_id: Some(batch.program_id),
                mesocycle_id: Some(meso.id),
                exercise_id: exercise.id,
                training_week_id: Some(week.id),
                training_session_id: Some(session.id),
                load,
                sets,
                reps: entry.reps,
                rir,
                timestamp,
            },
        )
        .await?;
        written.push(log);
    }

    tx.commit().await?;
    AppLogger::log_batch_committed(
        batch.user_id,
        batch.program_id,
        week.week_number,
        written.len(),
        skipped,
    );

    Ok(BatchReceipt {
        week,
        session,
        written,
        skipped,
    })
}
