//! Completed/total counts for the dashboard.

use rocket::serde::json::Json;
use rocket::{get, State};
use serde::Serialize;

use crate::clock::Clock;
use crate::data::{SharedClock, SharedStorage};
use crate::goals::data::Goal;
use crate::goals::helpers::get_goals;
use crate::internal_error::InternalResult;
use crate::storage::Storage;
use crate::tasks::data::{DailyTask, RecurringTask, WeeklyTask};
use crate::tasks::helpers::{get_tasks, get_today_weekly_tasks};

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct TaskStatistics {
    pub daily_completed: usize,
    pub daily_total: usize,
    pub weekly_completed: usize,
    pub weekly_total: usize,
    pub today_weekly_completed: usize,
    pub today_weekly_total: usize,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct GoalStatistics {
    pub total_goals: usize,
    pub completed_goals: usize,
    pub total_task_blocks: usize,
    pub average_progress: u8,
}

fn count_completed<T: RecurringTask>(tasks: &[T]) -> usize {
    tasks.iter().filter(|t| t.fields().completed).count()
}

pub fn get_task_statistics(storage: &mut dyn Storage, clock: &dyn Clock) -> TaskStatistics {
    let daily: Vec<DailyTask> = get_tasks(storage, clock);
    let weekly: Vec<WeeklyTask> = get_tasks(storage, clock);
    let today_weekly = get_today_weekly_tasks(storage, clock);

    TaskStatistics {
        daily_completed: count_completed(&daily),
        daily_total: daily.len(),
        weekly_completed: count_completed(&weekly),
        weekly_total: weekly.len(),
        today_weekly_completed: count_completed(&today_weekly),
        today_weekly_total: today_weekly.len(),
    }
}

pub fn summarize_goals(goals: &[Goal]) -> GoalStatistics {
    if goals.is_empty() {
        return GoalStatistics::default();
    }

    let progress_sum: usize = goals.iter().map(|g| g.progress as usize).sum();

    GoalStatistics {
        total_goals: goals.len(),
        completed_goals: goals.iter().filter(|g| g.completed).count(),
        total_task_blocks: goals.iter().map(|g| g.task_blocks.len()).sum(),
        average_progress: ((progress_sum * 2 + goals.len()) / (goals.len() * 2)) as u8,
    }
}

#[get("/get_task_statistics")]
pub fn task_statistics(
    storage: &State<SharedStorage>,
    clock: &State<SharedClock>,
) -> InternalResult<Json<TaskStatistics>> {
    let mut storage = storage.lock()?;

    Ok(Json(get_task_statistics(&mut *storage, &**clock.inner())))
}

#[get("/get_goal_statistics")]
pub fn goal_statistics(storage: &State<SharedStorage>) -> InternalResult<Json<GoalStatistics>> {
    let storage = storage.lock()?;

    Ok(Json(summarize_goals(&get_goals(&*storage))))
}
