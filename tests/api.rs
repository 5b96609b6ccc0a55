//! End-to-end tests driving the JSON API through rocket's local client.

use chrono::{Duration, Local, TimeZone};
use rocket::http::Status;
use rocket::local::blocking::Client;
use serde_json::{json, Value};

use std::sync::{Arc, Mutex};

use rgoals::clock::FixedClock;
use rgoals::data::{SharedClock, SharedStorage};
use rgoals::goals::data::Goal;
use rgoals::storage::MemoryStorage;
use rgoals::tasks::data::{DailyTask, WeeklyTask};

fn client_at(clock: Arc<FixedClock>) -> Client {
    let storage: SharedStorage = Arc::new(Mutex::new(MemoryStorage::new()));
    let clock: SharedClock = clock;

    Client::tracked(rgoals::build_rocket(storage, clock, None)).unwrap()
}

fn monday() -> Arc<FixedClock> {
    Arc::new(FixedClock::new(Local.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap()))
}

fn post(client: &Client, uri: &str, body: Value) -> (Status, Value) {
    let response = client.post(uri.to_string()).json(&body).dispatch();
    let status = response.status();
    let body = response.into_json::<Value>().unwrap_or(Value::Null);
    (status, body)
}

fn post_goal(client: &Client, uri: &str, body: Value) -> Goal {
    let response = client.post(uri.to_string()).json(&body).dispatch();
    assert_eq!(response.status(), Status::Ok, "{}", uri);
    response.into_json::<Goal>().unwrap()
}

#[test]
fn step_by_step_goal_flow() {
    let client = client_at(monday());

    let goal = post_goal(
        &client,
        "/api/add_goal",
        json!({ "title": "Ship it", "priority": "high", "stepByStep": true }),
    );
    let goal = post_goal(
        &client,
        "/api/add_task_block",
        json!({ "goalId": goal.id, "block": { "title": "A" } }),
    );
    let goal = post_goal(
        &client,
        "/api/add_task_block",
        json!({ "goalId": goal.id, "block": { "title": "B" } }),
    );
    let (a, b) = (goal.task_blocks[0].id.clone(), goal.task_blocks[1].id.clone());
    assert!(goal.task_blocks[1].locked);

    let (status, body) = post(
        &client,
        "/api/toggle_task_block",
        json!({ "goalId": goal.id, "blockId": b }),
    );
    assert_eq!(status, Status::BadRequest);
    assert!(body["error"].as_str().unwrap().contains("locked"));

    let goal = post_goal(&client, "/api/toggle_task_block", json!({ "goalId": goal.id, "blockId": a }));
    assert!(!goal.task_blocks[1].locked);
    assert_eq!(goal.progress, 50);

    let goal = post_goal(&client, "/api/toggle_task_block", json!({ "goalId": goal.id, "blockId": b }));
    assert!(goal.completed);
    assert_eq!(goal.progress, 100);

    let stored = client
        .get(format!("/api/get_goal/{}", goal.id))
        .dispatch()
        .into_json::<Goal>()
        .unwrap();
    assert_eq!(stored, goal);
}

#[test]
fn grouped_blocks_and_subtasks() {
    let client = client_at(monday());

    let goal = post_goal(&client, "/api/add_goal", json!({ "title": "Move house" }));
    let goal = post_goal(
        &client,
        "/api/add_task_block",
        json!({
            "goalId": goal.id,
            "block": {
                "title": "Pack",
                "type": "grouped",
                "subtasks": [{ "title": "Books" }, { "title": "Kitchen" }, { "title": "Clothes" }]
            }
        }),
    );
    let block = goal.task_blocks[0].clone();
    let subtasks = block.subtasks.clone().unwrap();

    let goal = post_goal(
        &client,
        "/api/toggle_subtask",
        json!({ "goalId": goal.id, "blockId": block.id, "subtaskId": subtasks[0].id }),
    );
    assert_eq!(goal.progress, 33);

    let goal = post_goal(
        &client,
        "/api/edit_subtask",
        json!({ "goalId": goal.id, "blockId": block.id, "subtaskId": subtasks[1].id, "title": "Pots" }),
    );
    assert_eq!(goal.task_blocks[0].subtasks.as_ref().unwrap()[1].title, "Pots");

    let goal = post_goal(
        &client,
        "/api/delete_subtask",
        json!({ "goalId": goal.id, "blockId": block.id, "subtaskId": subtasks[1].id }),
    );
    let remaining = goal.task_blocks[0].subtasks.as_ref().unwrap();
    assert_eq!(remaining.len(), 2);
    assert_eq!(remaining[1].order, 1);
    assert_eq!(goal.progress, 50);

    let goal = post_goal(
        &client,
        "/api/add_subtask",
        json!({ "goalId": goal.id, "blockId": block.id, "subtask": { "title": "Garage" } }),
    );
    assert_eq!(goal.progress, 33);
}

#[test]
fn goal_errors_map_to_statuses() {
    let client = client_at(monday());

    let response = client.get("/api/get_goal/missing").dispatch();
    assert_eq!(response.status(), Status::NotFound);

    let (status, _) = post(&client, "/api/add_goal", json!({ "title": "   " }));
    assert_eq!(status, Status::BadRequest);

    let (status, _) = post(
        &client,
        "/api/add_goal",
        json!({ "title": "Old", "deadline": "2023-12-31" }),
    );
    assert_eq!(status, Status::BadRequest);

    let (status, _) = post(&client, "/api/delete_goal", json!({ "goalId": "missing" }));
    assert_eq!(status, Status::NotFound);
}

#[test]
fn goal_update_and_delete() {
    let client = client_at(monday());

    let goal = post_goal(&client, "/api/add_goal", json!({ "title": "Learn piano", "deadline": "2024-06-01" }));
    let goal = post_goal(
        &client,
        "/api/update_goal",
        json!({ "goalId": goal.id, "update": { "reward": "Concert tickets", "deadline": "" } }),
    );
    assert_eq!(goal.reward.as_deref(), Some("Concert tickets"));
    assert_eq!(goal.deadline, None);

    let (status, _) = post(&client, "/api/delete_goal", json!({ "goalId": goal.id }));
    assert_eq!(status, Status::Ok);

    let goals = client.get("/api/get_goals").dispatch().into_json::<Vec<Goal>>().unwrap();
    assert!(goals.is_empty());
}

#[test]
fn daily_task_streaks_and_reset() {
    let clock = monday();
    let client = client_at(clock.clone());

    let task = client
        .post("/api/add_daily_task")
        .json(&json!({ "title": "Drink water", "scheduledTime": "09:00" }))
        .dispatch()
        .into_json::<DailyTask>()
        .unwrap();

    let toggle = |expected_completed: bool, expected_streak: u32| {
        let toggled = client
            .post("/api/toggle_daily_task")
            .json(&json!({ "id": task.task.id }))
            .dispatch()
            .into_json::<DailyTask>()
            .unwrap();
        assert_eq!(toggled.task.completed, expected_completed);
        assert_eq!(toggled.task.streak, expected_streak);
    };

    toggle(true, 1);
    toggle(false, 0);
    toggle(true, 1);

    clock.advance(Duration::days(1));
    let tasks = client
        .get("/api/get_daily_tasks")
        .dispatch()
        .into_json::<Vec<DailyTask>>()
        .unwrap();
    assert!(!tasks[0].task.completed);
    assert_eq!(tasks[0].task.streak, 1);

    let stats = client.get("/api/get_task_statistics").dispatch().into_json::<Value>().unwrap();
    assert_eq!(stats["dailyCompleted"], 0);
    assert_eq!(stats["dailyTotal"], 1);

    let (status, _) = post(&client, "/api/toggle_daily_task", json!({ "id": "missing" }));
    assert_eq!(status, Status::NotFound);
}

#[test]
fn weekly_tasks_for_today() {
    let clock = monday();
    let client = client_at(clock.clone());

    for (title, day) in [("Swim", "monday"), ("Climb", "wednesday")] {
        let response = client
            .post("/api/add_weekly_task")
            .json(&json!({ "title": title, "dayOfWeek": day }))
            .dispatch();
        assert_eq!(response.status(), Status::Ok);
    }

    let today = client
        .get("/api/get_today_weekly_tasks")
        .dispatch()
        .into_json::<Vec<WeeklyTask>>()
        .unwrap();
    assert_eq!(today.len(), 1);
    assert_eq!(today[0].task.title, "Swim");

    clock.advance(Duration::days(2));
    let today = client
        .get("/api/get_today_weekly_tasks")
        .dispatch()
        .into_json::<Vec<WeeklyTask>>()
        .unwrap();
    assert_eq!(today.len(), 1);
    assert_eq!(today[0].task.title, "Climb");

    let (status, _) = post(
        &client,
        "/api/update_weekly_task",
        json!({ "id": today[0].task.id, "update": { "dayOfWeek": "sunday" } }),
    );
    assert_eq!(status, Status::Ok);

    let stats = client.get("/api/get_task_statistics").dispatch().into_json::<Value>().unwrap();
    assert_eq!(stats["weeklyTotal"], 2);
    assert_eq!(stats["todayWeeklyTotal"], 0);
}

#[test]
fn rejected_bodies_get_json_errors() {
    let client = client_at(monday());

    let (status, body) = post(&client, "/api/add_goal", json!({ "priority": "high" }));
    assert_eq!(status, Status::UnprocessableEntity);
    assert!(body["error"].is_string());

    let (status, body) = post(
        &client,
        "/api/add_weekly_task",
        json!({ "title": "Swim", "dayOfWeek": "funday" }),
    );
    assert_eq!(status, Status::UnprocessableEntity);
    assert!(body["error"].is_string());

    let response = client.get("/api/no_such_route").dispatch();
    assert_eq!(response.status(), Status::NotFound);
    let body = response.into_json::<Value>().unwrap();
    assert_eq!(body["error"], "not found");
}

#[test]
fn poisoned_store_is_a_server_error() {
    let storage: SharedStorage = Arc::new(Mutex::new(MemoryStorage::new()));
    let clock: SharedClock = monday();

    let poisoner = storage.clone();
    let _ = std::thread::spawn(move || {
        let _guard = poisoner.lock().unwrap();
        panic!("handler crashed while holding the store");
    })
    .join();
    assert!(storage.is_poisoned());

    let client = Client::tracked(rgoals::build_rocket(storage, clock, None)).unwrap();
    let response = client.get("/api/get_goals").dispatch();
    assert_eq!(response.status(), Status::InternalServerError);
    let body = response.into_json::<Value>().unwrap();
    assert!(body["error"].as_str().unwrap().contains("storage unavailable"));
}
