//! Anchoring a relative schedule onto calendar dates.
//!
//! Plain day arithmetic from a project start date: day offset `n` maps to
//! `project_start + n days`. Working calendars are not modelled.

use chrono::{Duration, NaiveDate};
use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::relative::{Schedule, ScheduleResult};

/// Errors that can occur while anchoring a schedule.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    #[error("Day offset {offset} for task {task_id} is outside the supported date range")]
    OutOfRange { task_id: String, offset: i64 },
}

/// A scheduled task placed on the calendar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatedSchedule {
    pub task_id: String,
    pub start_date: NaiveDate,
    /// Last day the task occupies (inclusive).
    pub end_date: NaiveDate,
    pub duration_days: i64,
}

fn offset_date(
    project_start: NaiveDate,
    task_id: &str,
    offset: i64,
) -> Result<NaiveDate, DateError> {
    Duration::try_days(offset)
        .and_then(|days| project_start.checked_add_signed(days))
        .ok_or_else(|| DateError::OutOfRange {
            task_id: task_id.to_string(),
            offset,
        })
}

/// Place one schedule on the calendar.
pub fn anchor_task(
    project_start: NaiveDate,
    schedule: &Schedule,
) -> Result<DatedSchedule, DateError> {
    Ok(DatedSchedule {
        task_id: schedule.task_id.clone(),
        start_date: offset_date(project_start, &schedule.task_id, schedule.relative_start)?,
        end_date: offset_date(project_start, &schedule.task_id, schedule.relative_end)?,
        duration_days: schedule.duration,
    })
}

/// Place every schedule in `result` on the calendar.
pub fn anchor_schedule(
    project_start: NaiveDate,
    result: &ScheduleResult,
) -> Result<FxHashMap<String, DatedSchedule>, DateError> {
    result
        .schedules
        .iter()
        .map(|(id, schedule)| Ok((id.clone(), anchor_task(project_start, schedule)?)))
        .collect()
}

/// Last calendar day covered by the timeline.
pub fn project_end_date(
    project_start: NaiveDate,
    result: &ScheduleResult,
) -> Result<NaiveDate, DateError> {
    offset_date(project_start, "<project>", result.total_days - 1)
}
