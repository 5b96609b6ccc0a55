use rocket::serde::json::Json;
use rocket::{get, post, State};

use crate::data::{SharedClock, SharedStorage};
use crate::internal_error::InternalResult;

use super::data::*;
use super::helpers::*;

#[get("/get_daily_tasks")]
pub fn get_daily_tasks(
    storage: &State<SharedStorage>,
    clock: &State<SharedClock>,
) -> InternalResult<Json<Vec<DailyTask>>> {
    let mut storage = storage.lock()?;

    Ok(Json(get_tasks(&mut *storage, &**clock.inner())))
}

#[get("/get_daily_task/<id>")]
pub fn get_daily_task(
    id: &str,
    storage: &State<SharedStorage>,
    clock: &State<SharedClock>,
) -> InternalResult<Json<DailyTask>> {
    let mut storage = storage.lock()?;

    get_task(&mut *storage, &**clock.inner(), id).map(Json)
}

#[post("/add_daily_task", format = "json", data = "<new_task>")]
pub fn add_daily_task(
    new_task: Json<NewTask>,
    storage: &State<SharedStorage>,
    clock: &State<SharedClock>,
) -> InternalResult<Json<DailyTask>> {
    let mut storage = storage.lock()?;

    add_task::<DailyTask>(&mut *storage, &**clock.inner(), new_task.into_inner()).map(Json)
}

#[post("/update_daily_task", format = "json", data = "<update_task_request>")]
pub fn update_daily_task(
    update_task_request: Json<UpdateTaskRequest>,
    storage: &State<SharedStorage>,
    clock: &State<SharedClock>,
) -> InternalResult<Json<DailyTask>> {
    let mut storage = storage.lock()?;
    let request = update_task_request.into_inner();

    update_task::<DailyTask>(&mut *storage, &**clock.inner(), &request.id, request.update).map(Json)
}

#[post("/toggle_daily_task", format = "json", data = "<toggle_task_request>")]
pub fn toggle_daily_task(
    toggle_task_request: Json<TaskRequest>,
    storage: &State<SharedStorage>,
    clock: &State<SharedClock>,
) -> InternalResult<Json<DailyTask>> {
    let mut storage = storage.lock()?;

    toggle_task::<DailyTask>(&mut *storage, &**clock.inner(), &toggle_task_request.id).map(Json)
}

#[post("/delete_daily_task", format = "json", data = "<delete_task_request>")]
pub fn delete_daily_task(
    delete_task_request: Json<TaskRequest>,
    storage: &State<SharedStorage>,
    clock: &State<SharedClock>,
) -> InternalResult<()> {
    let mut storage = storage.lock()?;

    delete_task::<DailyTask>(&mut *storage, &**clock.inner(), &delete_task_request.id)
}

#[get("/get_weekly_tasks")]
pub fn get_weekly_tasks(
    storage: &State<SharedStorage>,
    clock: &State<SharedClock>,
) -> InternalResult<Json<Vec<WeeklyTask>>> {
    let mut storage = storage.lock()?;

    Ok(Json(get_tasks(&mut *storage, &**clock.inner())))
}

#[get("/get_weekly_task/<id>")]
pub fn get_weekly_task(
    id: &str,
    storage: &State<SharedStorage>,
    clock: &State<SharedClock>,
) -> InternalResult<Json<WeeklyTask>> {
    let mut storage = storage.lock()?;

    get_task(&mut *storage, &**clock.inner(), id).map(Json)
}

#[get("/get_today_weekly_tasks")]
pub fn get_today_weekly(
    storage: &State<SharedStorage>,
    clock: &State<SharedClock>,
) -> InternalResult<Json<Vec<WeeklyTask>>> {
    let mut storage = storage.lock()?;

    Ok(Json(get_today_weekly_tasks(&mut *storage, &**clock.inner())))
}

#[post("/add_weekly_task", format = "json", data = "<new_task>")]
pub fn add_weekly_task(
    new_task: Json<NewWeeklyTask>,
    storage: &State<SharedStorage>,
    clock: &State<SharedClock>,
) -> InternalResult<Json<WeeklyTask>> {
    let mut storage = storage.lock()?;

    add_task::<WeeklyTask>(&mut *storage, &**clock.inner(), new_task.into_inner()).map(Json)
}

#[post("/update_weekly_task", format = "json", data = "<update_task_request>")]
pub fn update_weekly_task(
    update_task_request: Json<UpdateTaskRequest>,
    storage: &State<SharedStorage>,
    clock: &State<SharedClock>,
) -> InternalResult<Json<WeeklyTask>> {
    let mut storage = storage.lock()?;
    let request = update_task_request.into_inner();

    update_task::<WeeklyTask>(&mut *storage, &**clock.inner(), &request.id, request.update).map(Json)
}

#[post("/toggle_weekly_task", format = "json", data = "<toggle_task_request>")]
pub fn toggle_weekly_task(
    toggle_task_request: Json<TaskRequest>,
    storage: &State<SharedStorage>,
    clock: &State<SharedClock>,
) -> InternalResult<Json<WeeklyTask>> {
    let mut storage = storage.lock()?;

    toggle_task::<WeeklyTask>(&mut *storage, &**clock.inner(), &toggle_task_request.id).map(Json)
}

#[post("/delete_weekly_task", format = "json", data = "<delete_task_request>")]
pub fn delete_weekly_task(
    delete_task_request: Json<TaskRequest>,
    storage: &State<SharedStorage>,
    clock: &State<SharedClock>,
) -> InternalResult<()> {
    let mut storage = storage.lock()?;

    delete_task::<WeeklyTask>(&mut *storage, &**clock.inner(), &delete_task_request.id)
}
