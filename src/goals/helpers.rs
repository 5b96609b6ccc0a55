use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::clock::Clock;
use crate::data::{new_id, validate_description, validate_title};
use crate::internal_error::{InternalError, InternalResult};
use crate::storage::{read_collection, write_collection, CollectionKey, Storage};

use super::data::*;
use super::progress::refresh_derived;

fn local_to_utc(naive: NaiveDateTime) -> InternalResult<DateTime<Utc>> {
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| InternalError::validation("deadline does not exist in local time"))
}

/// Accepts RFC 3339, `YYYY-MM-DDTHH:MM` or a bare `YYYY-MM-DD` (end of that day),
/// the latter two in local time. Deadlines in the past are rejected.
pub fn parse_deadline(raw: &str, now: DateTime<Local>) -> InternalResult<DateTime<Utc>> {
    let raw = raw.trim();

    let deadline = if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        dt.with_timezone(&Utc)
    } else if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M") {
        local_to_utc(naive)?
    } else if let Some(naive) = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(23, 59, 59))
    {
        local_to_utc(naive)?
    } else {
        return Err(InternalError::validation(format!("invalid deadline {:?}", raw)));
    };

    if deadline < now.with_timezone(&Utc) {
        return Err(InternalError::validation("deadline cannot be in the past"));
    }

    Ok(deadline)
}

fn optional_deadline(raw: Option<String>, now: DateTime<Local>) -> InternalResult<Option<DateTime<Utc>>> {
    match raw {
        Some(raw) if !raw.trim().is_empty() => parse_deadline(&raw, now).map(Some),
        _ => Ok(None),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

pub fn get_goals(storage: &dyn Storage) -> Vec<Goal> {
    read_collection(storage, CollectionKey::Goals)
}

pub fn get_goal(storage: &dyn Storage, goal_id: &str) -> InternalResult<Goal> {
    get_goals(storage)
        .into_iter()
        .find(|g| g.id == goal_id)
        .ok_or_else(|| InternalError::not_found("goal", goal_id))
}

pub fn add_goal(storage: &mut dyn Storage, clock: &dyn Clock, new_goal: NewGoal) -> InternalResult<Goal> {
    let now = clock.now();
    let goal = Goal {
        id: new_id(),
        title: validate_title(&new_goal.title)?,
        description: validate_description(new_goal.description)?,
        deadline: optional_deadline(new_goal.deadline, now)?,
        priority: new_goal.priority,
        reward: non_blank(new_goal.reward),
        step_by_step: new_goal.step_by_step,
        completed: false,
        progress: 0,
        task_blocks: vec![],
        created_at: now.with_timezone(&Utc),
        updated_at: now.with_timezone(&Utc),
    };

    let mut goals = get_goals(storage);
    goals.push(goal.clone());
    write_collection(storage, CollectionKey::Goals, &goals);

    tracing::info!(goal_id = %goal.id, step_by_step = goal.step_by_step, "created goal");

    Ok(goal)
}

/// Read-modify-write of a single goal: loads the whole collection, applies `f`
/// to the matching goal, re-derives progress and completion, stamps
/// `updatedAt` and writes the whole collection back. Nothing is written if `f`
/// fails.
pub fn modify_goal<F, R>(
    storage: &mut dyn Storage,
    clock: &dyn Clock,
    goal_id: &str,
    f: F,
) -> InternalResult<Goal>
where
    F: FnOnce(&mut Goal) -> InternalResult<R>,
{
    let mut goals = get_goals(storage);
    let goal = goals
        .iter_mut()
        .find(|g| g.id == goal_id)
        .ok_or_else(|| InternalError::not_found("goal", goal_id))?;

    f(goal)?;
    refresh_derived(goal);
    goal.updated_at = clock.now_utc();

    let updated = goal.clone();
    write_collection(storage, CollectionKey::Goals, &goals);

    tracing::debug!(goal_id, progress = updated.progress, completed = updated.completed, "updated goal");

    Ok(updated)
}

pub fn update_goal(
    storage: &mut dyn Storage,
    clock: &dyn Clock,
    goal_id: &str,
    update: GoalUpdate,
) -> InternalResult<Goal> {
    let now = clock.now();

    modify_goal(storage, clock, goal_id, |goal| {
        if let Some(title) = update.title {
            goal.title = validate_title(&title)?;
        }
        if let Some(description) = update.description {
            goal.description = validate_description(Some(description))?;
        }
        if let Some(deadline) = update.deadline {
            goal.deadline = optional_deadline(Some(deadline), now)?;
        }
        if let Some(priority) = update.priority {
            goal.priority = priority;
        }
        if let Some(reward) = update.reward {
            goal.reward = non_blank(Some(reward));
        }

        Ok(())
    })
}

pub fn delete_goal(storage: &mut dyn Storage, goal_id: &str) -> InternalResult<()> {
    let mut goals = get_goals(storage);
    let before = goals.len();
    goals.retain(|g| g.id != goal_id);

    if goals.len() == before {
        return Err(InternalError::not_found("goal", goal_id));
    }

    write_collection(storage, CollectionKey::Goals, &goals);
    tracing::info!(goal_id, "deleted goal");

    Ok(())
}
