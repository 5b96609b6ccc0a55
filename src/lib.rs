use rocket::fs::FileServer;
use rocket::{catchers, routes, Build, Rocket};

use std::path::Path;

pub mod clock;
pub mod data;
pub mod goals;
pub mod internal_error;
pub mod statistics;
pub mod storage;
pub mod tasks;

use data::{SharedClock, SharedStorage};
use goals::endpoints as goal_endpoints;
use tasks::endpoints as task_endpoints;

/// Builds the server around an already opened store. Static UI files are only
/// mounted when `web_root` names an existing directory.
pub fn build_rocket(storage: SharedStorage, clock: SharedClock, web_root: Option<&Path>) -> Rocket<Build> {
    let rocket = rocket::build()
        .manage(storage)
        .manage(clock)
        .mount(
            "/api",
            routes![
                goal_endpoints::get_goals_endpoint,
                goal_endpoints::get_goal_endpoint,
                goal_endpoints::add_goal_endpoint,
                goal_endpoints::update_goal_endpoint,
                goal_endpoints::delete_goal_endpoint,
                goal_endpoints::add_task_block,
                goal_endpoints::toggle_task_block,
                goal_endpoints::delete_task_block,
                goal_endpoints::edit_task_block,
                goal_endpoints::add_subtask,
                goal_endpoints::toggle_subtask,
                goal_endpoints::delete_subtask,
                goal_endpoints::edit_subtask,
                task_endpoints::get_daily_tasks,
                task_endpoints::get_daily_task,
                task_endpoints::add_daily_task,
                task_endpoints::update_daily_task,
                task_endpoints::toggle_daily_task,
                task_endpoints::delete_daily_task,
                task_endpoints::get_weekly_tasks,
                task_endpoints::get_weekly_task,
                task_endpoints::get_today_weekly,
                task_endpoints::add_weekly_task,
                task_endpoints::update_weekly_task,
                task_endpoints::toggle_weekly_task,
                task_endpoints::delete_weekly_task,
                statistics::task_statistics,
                statistics::goal_statistics,
            ],
        )
        .register("/api", catchers![internal_error::json_catcher]);

    match web_root {
        Some(root) if root.is_dir() => rocket.mount("/", FileServer::from(root).rank(15)),
        Some(root) => {
            tracing::warn!(web_root = %root.display(), "web root is not a directory, serving the API only");
            rocket
        }
        None => rocket,
    }
}
