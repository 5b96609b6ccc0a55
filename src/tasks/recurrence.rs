//! Clears completion flags once per recurrence window.
//!
//! Each kind keeps one `TaskConfiguration` whose `updatedAt` marks the last
//! reset check. A list call compares it with the clock: daily tasks go stale
//! when the local calendar date changes, weekly tasks when the ISO week does.

use chrono::{DateTime, Datelike, Local, Utc};
use serde::{Deserialize, Serialize};

use super::data::{RecurringTask, TaskKind};
use crate::clock::Clock;
use crate::storage::{read_collection, write_collection, CollectionKey, Storage};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskConfiguration {
    #[serde(rename = "type")]
    pub kind: TaskKind,
    pub updated_at: DateTime<Utc>,
}

pub fn is_stale(kind: TaskKind, last_check: DateTime<Utc>, now: DateTime<Local>) -> bool {
    let last_check = last_check.with_timezone(&Local);

    match kind {
        TaskKind::Daily => last_check.date_naive() != now.date_naive(),
        TaskKind::Weekly => last_check.iso_week() != now.iso_week(),
    }
}

pub fn get_configuration(storage: &dyn Storage, kind: TaskKind) -> Option<TaskConfiguration> {
    read_collection::<TaskConfiguration>(storage, CollectionKey::TaskConfigurations)
        .into_iter()
        .find(|config| config.kind == kind)
}

fn save_configuration(storage: &mut dyn Storage, config: TaskConfiguration) {
    let mut configs: Vec<TaskConfiguration> = read_collection(storage, CollectionKey::TaskConfigurations);
    configs.retain(|c| c.kind != config.kind);
    configs.push(config);

    write_collection(storage, CollectionKey::TaskConfigurations, &configs);
}

/// Applies the reset policy to a freshly read collection, persisting both the
/// tasks and the configuration when a window boundary was crossed. Returns
/// whether a reset happened.
///
/// A kind without a configuration is treated as fresh; its configuration is
/// recorded now so the next boundary can be detected.
pub fn apply_reset<T: RecurringTask>(storage: &mut dyn Storage, clock: &dyn Clock, tasks: &mut [T]) -> bool {
    let now = clock.now();
    let kind = T::KIND;

    let config = match get_configuration(storage, kind) {
        Some(config) => config,
        None => {
            save_configuration(
                storage,
                TaskConfiguration {
                    kind,
                    updated_at: now.with_timezone(&Utc),
                },
            );
            return false;
        }
    };

    if !is_stale(kind, config.updated_at, now) {
        return false;
    }

    let now = now.with_timezone(&Utc);
    for task in tasks.iter_mut() {
        let fields = task.fields_mut();
        fields.completed = false;
        fields.updated_at = now;
    }

    write_collection(storage, kind.collection_key(), tasks);
    save_configuration(storage, TaskConfiguration { kind, updated_at: now });

    tracing::info!(kind = kind.as_str(), tasks = tasks.len(), "reset recurring tasks for new window");

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn local(y: i32, m: u32, d: u32, h: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn utc(dt: DateTime<Local>) -> DateTime<Utc> {
        dt.with_timezone(&Utc)
    }

    #[test]
    fn daily_window_is_the_calendar_day() {
        let morning = local(2024, 1, 1, 8);
        assert!(!is_stale(TaskKind::Daily, utc(morning), local(2024, 1, 1, 23)));
        assert!(is_stale(TaskKind::Daily, utc(morning), local(2024, 1, 2, 0)));
        assert!(is_stale(TaskKind::Daily, utc(morning), local(2024, 2, 1, 8)));
        assert!(is_stale(TaskKind::Daily, utc(morning), local(2025, 1, 1, 8)));
    }

    #[test]
    fn weekly_window_is_the_iso_week() {
        // 2024-01-01 is a Monday.
        let monday = local(2024, 1, 1, 8);
        assert!(!is_stale(TaskKind::Weekly, utc(monday), local(2024, 1, 7, 22)));
        assert!(is_stale(TaskKind::Weekly, utc(monday), local(2024, 1, 8, 1)));
        // Same week number, different year.
        assert!(is_stale(TaskKind::Weekly, utc(monday), local(2024, 12, 30, 8)));
    }
}
