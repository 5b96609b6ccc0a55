use chrono::Datelike;

use crate::clock::Clock;
use crate::data::{new_id, validate_description, validate_title};
use crate::internal_error::{InternalError, InternalResult};
use crate::storage::{read_collection, write_collection, Storage};

use super::data::*;
use super::recurrence::apply_reset;

fn not_found<T: RecurringTask>(id: &str) -> InternalError {
    match T::KIND {
        TaskKind::Daily => InternalError::not_found("daily task", id),
        TaskKind::Weekly => InternalError::not_found("weekly task", id),
    }
}

/// All tasks of one kind, with completion cleared first if a new window began.
pub fn get_tasks<T: RecurringTask>(storage: &mut dyn Storage, clock: &dyn Clock) -> Vec<T> {
    let mut tasks: Vec<T> = read_collection(storage, T::KIND.collection_key());
    apply_reset(storage, clock, &mut tasks);
    tasks
}

pub fn get_task<T: RecurringTask>(storage: &mut dyn Storage, clock: &dyn Clock, id: &str) -> InternalResult<T> {
    get_tasks::<T>(storage, clock)
        .into_iter()
        .find(|t| t.fields().id == id)
        .ok_or_else(|| not_found::<T>(id))
}

pub fn add_task<T: RecurringTask>(storage: &mut dyn Storage, clock: &dyn Clock, new: T::New) -> InternalResult<T> {
    let mut tasks = get_tasks::<T>(storage, clock);
    let now = clock.now_utc();

    let fields = {
        let requested = T::new_fields(&new);
        TaskFields {
            id: new_id(),
            title: validate_title(&requested.title)?,
            description: validate_description(requested.description.clone())?,
            completed: false,
            streak: 0,
            is_reward_trigger: requested.is_reward_trigger,
            reward_note: requested.reward_note.clone(),
            scheduled_time: requested.scheduled_time.clone().filter(|t| !t.trim().is_empty()),
            order: tasks.len(),
            created_at: now,
            updated_at: now,
        }
    };

    let task = T::from_new(fields, new);
    tasks.push(task.clone());
    write_collection(storage, T::KIND.collection_key(), &tasks);

    tracing::info!(kind = T::KIND.as_str(), task_id = %task.fields().id, "created recurring task");

    Ok(task)
}

/// Read-modify-write of one task, stamping `updatedAt`. Nothing is written if
/// `f` fails.
fn modify_task<T, F>(storage: &mut dyn Storage, clock: &dyn Clock, id: &str, f: F) -> InternalResult<T>
where
    T: RecurringTask,
    F: FnOnce(&mut T) -> InternalResult<()>,
{
    let mut tasks = get_tasks::<T>(storage, clock);
    let task = tasks
        .iter_mut()
        .find(|t| t.fields().id == id)
        .ok_or_else(|| not_found::<T>(id))?;

    f(task)?;
    task.fields_mut().updated_at = clock.now_utc();

    let updated = task.clone();
    write_collection(storage, T::KIND.collection_key(), &tasks);

    Ok(updated)
}

pub fn update_task<T: RecurringTask>(
    storage: &mut dyn Storage,
    clock: &dyn Clock,
    id: &str,
    update: TaskUpdate,
) -> InternalResult<T> {
    modify_task(storage, clock, id, |task: &mut T| {
        if let Some(day) = update.day_of_week {
            task.set_day_of_week(day)?;
        }

        let fields = task.fields_mut();
        if let Some(title) = update.title {
            fields.title = validate_title(&title)?;
        }
        if let Some(description) = update.description {
            fields.description = validate_description(Some(description))?;
        }
        if let Some(is_reward_trigger) = update.is_reward_trigger {
            fields.is_reward_trigger = Some(is_reward_trigger);
        }
        if let Some(reward_note) = update.reward_note {
            fields.reward_note = Some(reward_note).filter(|n| !n.trim().is_empty());
        }
        if let Some(scheduled_time) = update.scheduled_time {
            fields.scheduled_time = Some(scheduled_time).filter(|t| !t.trim().is_empty());
        }
        if let Some(order) = update.order {
            fields.order = order;
        }

        Ok(())
    })
}

/// Flips completion; the streak follows (+1 on completing, -1 floored at zero
/// on un-completing).
pub fn toggle_task<T: RecurringTask>(storage: &mut dyn Storage, clock: &dyn Clock, id: &str) -> InternalResult<T> {
    let task = modify_task(storage, clock, id, |task: &mut T| {
        let fields = task.fields_mut();
        fields.completed = !fields.completed;
        fields.streak = if fields.completed {
            fields.streak + 1
        } else {
            fields.streak.saturating_sub(1)
        };

        Ok(())
    })?;

    tracing::debug!(
        kind = T::KIND.as_str(),
        task_id = id,
        completed = task.fields().completed,
        streak = task.fields().streak,
        "toggled recurring task"
    );

    Ok(task)
}

/// Removes a task. Siblings keep their `order`.
pub fn delete_task<T: RecurringTask>(storage: &mut dyn Storage, clock: &dyn Clock, id: &str) -> InternalResult<()> {
    let mut tasks = get_tasks::<T>(storage, clock);
    let before = tasks.len();
    tasks.retain(|t| t.fields().id != id);

    if tasks.len() == before {
        return Err(not_found::<T>(id));
    }

    write_collection(storage, T::KIND.collection_key(), &tasks);
    tracing::info!(kind = T::KIND.as_str(), task_id = id, "deleted recurring task");

    Ok(())
}

pub fn get_today_weekly_tasks(storage: &mut dyn Storage, clock: &dyn Clock) -> Vec<WeeklyTask> {
    let today = DayOfWeek::from(clock.now().weekday());

    get_tasks::<WeeklyTask>(storage, clock)
        .into_iter()
        .filter(|t| t.day_of_week == today)
        .collect()
}
