use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type GoalID = String;
pub type TaskBlockID = String;
pub type SubtaskID = String;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    #[default]
    Single,
    Grouped,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Subtask {
    pub id: SubtaskID,
    pub title: String,
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_reward_trigger: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reward_note: Option<String>,
    #[serde(default)]
    pub locked: bool,
    pub order: usize,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskBlock {
    pub id: TaskBlockID,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: BlockKind,
    pub completed: bool,
    #[serde(default)]
    pub locked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_reward_trigger: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reward_note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtasks: Option<Vec<Subtask>>,
    pub order: usize,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: GoalID,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reward: Option<String>,
    #[serde(default)]
    pub step_by_step: bool,
    pub completed: bool,
    pub progress: u8,
    #[serde(default)]
    pub task_blocks: Vec<TaskBlock>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Completed and total work units of a goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Progress {
    pub completed: u64,
    pub total: u64,
}

impl Progress {
    /// Rounded half-up percentage; zero when there is nothing to complete.
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }

        ((self.completed * 200 + self.total) / (self.total * 2)) as u8
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewGoal {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub deadline: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub reward: Option<String>,
    #[serde(default)]
    pub step_by_step: bool,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct GoalUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub deadline: Option<String>,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub reward: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewSubtask {
    pub title: String,
    #[serde(default)]
    pub is_reward_trigger: Option<bool>,
    #[serde(default)]
    pub reward_note: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewTaskBlock {
    pub title: String,
    #[serde(rename = "type", default)]
    pub kind: BlockKind,
    #[serde(default)]
    pub is_reward_trigger: Option<bool>,
    #[serde(default)]
    pub reward_note: Option<String>,
    #[serde(default)]
    pub subtasks: Vec<NewSubtask>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct GoalRequest {
    pub goal_id: GoalID,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGoalRequest {
    pub goal_id: GoalID,
    pub update: GoalUpdate,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AddTaskBlockRequest {
    pub goal_id: GoalID,
    pub block: NewTaskBlock,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct TaskBlockRequest {
    pub goal_id: GoalID,
    pub block_id: TaskBlockID,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AddSubtaskRequest {
    pub goal_id: GoalID,
    pub block_id: TaskBlockID,
    pub subtask: NewSubtask,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SubtaskRequest {
    pub goal_id: GoalID,
    pub block_id: TaskBlockID,
    pub subtask_id: SubtaskID,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct EditTaskBlockRequest {
    pub goal_id: GoalID,
    pub block_id: TaskBlockID,
    pub title: String,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct EditSubtaskRequest {
    pub goal_id: GoalID,
    pub block_id: TaskBlockID,
    pub subtask_id: SubtaskID,
    pub title: String,
}
