use rocket::serde::json::Json;
use rocket::{get, post, State};

use crate::data::{SharedClock, SharedStorage};
use crate::internal_error::InternalResult;

use super::data::*;
use super::helpers::*;
use super::progress;

#[get("/get_goals")]
pub fn get_goals_endpoint(storage: &State<SharedStorage>) -> InternalResult<Json<Vec<Goal>>> {
    let storage = storage.lock()?;

    Ok(Json(get_goals(&*storage)))
}

#[get("/get_goal/<goal_id>")]
pub fn get_goal_endpoint(goal_id: &str, storage: &State<SharedStorage>) -> InternalResult<Json<Goal>> {
    let storage = storage.lock()?;

    get_goal(&*storage, goal_id).map(Json)
}

#[post("/add_goal", format = "json", data = "<new_goal>")]
pub fn add_goal_endpoint(
    new_goal: Json<NewGoal>,
    storage: &State<SharedStorage>,
    clock: &State<SharedClock>,
) -> InternalResult<Json<Goal>> {
    let mut storage = storage.lock()?;

    add_goal(&mut *storage, &**clock.inner(), new_goal.into_inner()).map(Json)
}

#[post("/update_goal", format = "json", data = "<update_goal_request>")]
pub fn update_goal_endpoint(
    update_goal_request: Json<UpdateGoalRequest>,
    storage: &State<SharedStorage>,
    clock: &State<SharedClock>,
) -> InternalResult<Json<Goal>> {
    let mut storage = storage.lock()?;
    let request = update_goal_request.into_inner();

    update_goal(&mut *storage, &**clock.inner(), &request.goal_id, request.update).map(Json)
}

#[post("/delete_goal", format = "json", data = "<delete_goal_request>")]
pub fn delete_goal_endpoint(
    delete_goal_request: Json<GoalRequest>,
    storage: &State<SharedStorage>,
) -> InternalResult<()> {
    let mut storage = storage.lock()?;

    delete_goal(&mut *storage, &delete_goal_request.goal_id)
}

#[post("/add_task_block", format = "json", data = "<add_task_block_request>")]
pub fn add_task_block(
    add_task_block_request: Json<AddTaskBlockRequest>,
    storage: &State<SharedStorage>,
    clock: &State<SharedClock>,
) -> InternalResult<Json<Goal>> {
    let mut storage = storage.lock()?;
    let AddTaskBlockRequest { goal_id, block } = add_task_block_request.into_inner();

    modify_goal(&mut *storage, &**clock.inner(), &goal_id, |goal| {
        progress::add_task_block(goal, block)
    })
    .map(Json)
}

#[post("/toggle_task_block", format = "json", data = "<toggle_task_block_request>")]
pub fn toggle_task_block(
    toggle_task_block_request: Json<TaskBlockRequest>,
    storage: &State<SharedStorage>,
    clock: &State<SharedClock>,
) -> InternalResult<Json<Goal>> {
    let mut storage = storage.lock()?;
    let request = toggle_task_block_request.into_inner();

    modify_goal(&mut *storage, &**clock.inner(), &request.goal_id, |goal| {
        progress::toggle_task_block(goal, &request.block_id)
    })
    .map(Json)
}

#[post("/delete_task_block", format = "json", data = "<delete_task_block_request>")]
pub fn delete_task_block(
    delete_task_block_request: Json<TaskBlockRequest>,
    storage: &State<SharedStorage>,
    clock: &State<SharedClock>,
) -> InternalResult<Json<Goal>> {
    let mut storage = storage.lock()?;
    let request = delete_task_block_request.into_inner();

    modify_goal(&mut *storage, &**clock.inner(), &request.goal_id, |goal| {
        progress::delete_task_block(goal, &request.block_id)
    })
    .map(Json)
}

#[post("/edit_task_block", format = "json", data = "<edit_task_block_request>")]
pub fn edit_task_block(
    edit_task_block_request: Json<EditTaskBlockRequest>,
    storage: &State<SharedStorage>,
    clock: &State<SharedClock>,
) -> InternalResult<Json<Goal>> {
    let mut storage = storage.lock()?;
    let request = edit_task_block_request.into_inner();

    modify_goal(&mut *storage, &**clock.inner(), &request.goal_id, |goal| {
        progress::edit_task_block(goal, &request.block_id, &request.title)
    })
    .map(Json)
}

#[post("/add_subtask", format = "json", data = "<add_subtask_request>")]
pub fn add_subtask(
    add_subtask_request: Json<AddSubtaskRequest>,
    storage: &State<SharedStorage>,
    clock: &State<SharedClock>,
) -> InternalResult<Json<Goal>> {
    let mut storage = storage.lock()?;
    let AddSubtaskRequest {
        goal_id,
        block_id,
        subtask,
    } = add_subtask_request.into_inner();

    modify_goal(&mut *storage, &**clock.inner(), &goal_id, |goal| {
        progress::add_subtask(goal, &block_id, subtask)
    })
    .map(Json)
}

#[post("/toggle_subtask", format = "json", data = "<toggle_subtask_request>")]
pub fn toggle_subtask(
    toggle_subtask_request: Json<SubtaskRequest>,
    storage: &State<SharedStorage>,
    clock: &State<SharedClock>,
) -> InternalResult<Json<Goal>> {
    let mut storage = storage.lock()?;
    let request = toggle_subtask_request.into_inner();

    modify_goal(&mut *storage, &**clock.inner(), &request.goal_id, |goal| {
        progress::toggle_subtask(goal, &request.block_id, &request.subtask_id)
    })
    .map(Json)
}

#[post("/delete_subtask", format = "json", data = "<delete_subtask_request>")]
pub fn delete_subtask(
    delete_subtask_request: Json<SubtaskRequest>,
    storage: &State<SharedStorage>,
    clock: &State<SharedClock>,
) -> InternalResult<Json<Goal>> {
    let mut storage = storage.lock()?;
    let request = delete_subtask_request.into_inner();

    modify_goal(&mut *storage, &**clock.inner(), &request.goal_id, |goal| {
        progress::delete_subtask(goal, &request.block_id, &request.subtask_id)
    })
    .map(Json)
}

#[post("/edit_subtask", format = "json", data = "<edit_subtask_request>")]
pub fn edit_subtask(
    edit_subtask_request: Json<EditSubtaskRequest>,
    storage: &State<SharedStorage>,
    clock: &State<SharedClock>,
) -> InternalResult<Json<Goal>> {
    let mut storage = storage.lock()?;
    let request = edit_subtask_request.into_inner();

    modify_goal(&mut *storage, &**clock.inner(), &request.goal_id, |goal| {
        progress::edit_subtask(goal, &request.block_id, &request.subtask_id, &request.title)
    })
    .map(Json)
}
