use chrono::{DateTime, Utc, Weekday};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::internal_error::{InternalError, InternalResult};
use crate::storage::CollectionKey;

pub type TaskID = String;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    Daily,
    Weekly,
}

impl TaskKind {
    pub fn collection_key(&self) -> CollectionKey {
        match self {
            TaskKind::Daily => CollectionKey::DailyTasks,
            TaskKind::Weekly => CollectionKey::WeeklyTasks,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskKind::Daily => "daily",
            TaskKind::Weekly => "weekly",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl From<Weekday> for DayOfWeek {
    fn from(day: Weekday) -> DayOfWeek {
        match day {
            Weekday::Mon => DayOfWeek::Monday,
            Weekday::Tue => DayOfWeek::Tuesday,
            Weekday::Wed => DayOfWeek::Wednesday,
            Weekday::Thu => DayOfWeek::Thursday,
            Weekday::Fri => DayOfWeek::Friday,
            Weekday::Sat => DayOfWeek::Saturday,
            Weekday::Sun => DayOfWeek::Sunday,
        }
    }
}

/// Fields shared by daily and weekly tasks.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskFields {
    pub id: TaskID,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub completed: bool,
    #[serde(default)]
    pub streak: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_reward_trigger: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reward_note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_time: Option<String>,
    pub order: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DailyTask {
    #[serde(flatten)]
    pub task: TaskFields,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyTask {
    #[serde(flatten)]
    pub task: TaskFields,
    pub day_of_week: DayOfWeek,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_reward_trigger: Option<bool>,
    #[serde(default)]
    pub reward_note: Option<String>,
    #[serde(default)]
    pub scheduled_time: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewWeeklyTask {
    #[serde(flatten)]
    pub task: NewTask,
    pub day_of_week: DayOfWeek,
}

/// Partial update; `None` leaves a field untouched.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct TaskUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_reward_trigger: Option<bool>,
    #[serde(default)]
    pub reward_note: Option<String>,
    #[serde(default)]
    pub scheduled_time: Option<String>,
    #[serde(default)]
    pub order: Option<usize>,
    #[serde(default)]
    pub day_of_week: Option<DayOfWeek>,
}

/// A task that lives in one of the recurring collections.
pub trait RecurringTask: Serialize + DeserializeOwned + Clone {
    const KIND: TaskKind;

    /// Creation payload accepted for this kind.
    type New;

    fn new_fields(new: &Self::New) -> &NewTask;
    fn from_new(task: TaskFields, new: Self::New) -> Self;

    fn fields(&self) -> &TaskFields;
    fn fields_mut(&mut self) -> &mut TaskFields;

    fn set_day_of_week(&mut self, day: DayOfWeek) -> InternalResult<()>;
}

impl RecurringTask for DailyTask {
    const KIND: TaskKind = TaskKind::Daily;
    type New = NewTask;

    fn new_fields(new: &NewTask) -> &NewTask {
        new
    }

    fn from_new(task: TaskFields, _new: NewTask) -> DailyTask {
        DailyTask { task }
    }

    fn fields(&self) -> &TaskFields {
        &self.task
    }

    fn fields_mut(&mut self) -> &mut TaskFields {
        &mut self.task
    }

    fn set_day_of_week(&mut self, _day: DayOfWeek) -> InternalResult<()> {
        Err(InternalError::validation("daily tasks have no day of week"))
    }
}

impl RecurringTask for WeeklyTask {
    const KIND: TaskKind = TaskKind::Weekly;
    type New = NewWeeklyTask;

    fn new_fields(new: &NewWeeklyTask) -> &NewTask {
        &new.task
    }

    fn from_new(task: TaskFields, new: NewWeeklyTask) -> WeeklyTask {
        WeeklyTask {
            task,
            day_of_week: new.day_of_week,
        }
    }

    fn fields(&self) -> &TaskFields {
        &self.task
    }

    fn fields_mut(&mut self) -> &mut TaskFields {
        &mut self.task
    }

    fn set_day_of_week(&mut self, day: DayOfWeek) -> InternalResult<()> {
        self.day_of_week = day;
        Ok(())
    }
}

#[derive(Deserialize, Debug)]
pub struct TaskRequest {
    pub id: TaskID,
}

#[derive(Deserialize, Debug)]
pub struct UpdateTaskRequest {
    pub id: TaskID,
    pub update: TaskUpdate,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn weekly_task_uses_flat_camel_case_layout() {
        let raw = json!({
            "id": "1",
            "title": "Swim",
            "completed": true,
            "streak": 2,
            "scheduledTime": "07:00",
            "order": 0,
            "createdAt": "2024-01-01T08:00:00Z",
            "updatedAt": "2024-01-01T08:00:00Z",
            "dayOfWeek": "monday"
        });

        let task: WeeklyTask = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(task.day_of_week, DayOfWeek::Monday);
        assert_eq!(task.task.scheduled_time.as_deref(), Some("07:00"));
        assert_eq!(serde_json::to_value(&task).unwrap(), raw);
    }
}
