//! Progress, completion and step-by-step locking for a goal's task blocks.
//!
//! Everything here is a pure transformation of a `Goal` held in memory; the
//! caller is responsible for persisting the result. Every mutator finishes with
//! `refresh_derived` so `progress` and `completed` never drift.

use super::data::*;
use crate::data::{new_id, validate_title};
use crate::internal_error::{InternalError, InternalResult};

/// An item in an ordered unlock chain: task blocks within a goal, or subtasks
/// within a grouped block.
trait Sequenced {
    fn order(&self) -> usize;
    fn set_order(&mut self, order: usize);
    fn unlock(&mut self);
    fn is_done(&self) -> bool;
}

impl Sequenced for TaskBlock {
    fn order(&self) -> usize {
        self.order
    }

    fn set_order(&mut self, order: usize) {
        self.order = order;
    }

    fn unlock(&mut self) {
        self.locked = false;
    }

    fn is_done(&self) -> bool {
        self.completed
    }
}

impl Sequenced for Subtask {
    fn order(&self) -> usize {
        self.order
    }

    fn set_order(&mut self, order: usize) {
        self.order = order;
    }

    fn unlock(&mut self) {
        self.locked = false;
    }

    fn is_done(&self) -> bool {
        self.completed
    }
}

fn unlock_next<T: Sequenced>(items: &mut [T], order: usize) {
    if let Some(next) = items.iter_mut().find(|item| item.order() == order + 1) {
        next.unlock();
    }
}

/// Restores contiguous ordering after a removal. Under step-by-step the new head
/// and anything whose new predecessor is already done are unlocked; nothing is
/// ever re-locked.
fn relink<T: Sequenced>(items: &mut [T], step_by_step: bool) {
    for (order, item) in items.iter_mut().enumerate() {
        item.set_order(order);
    }

    if !step_by_step {
        return;
    }

    if let Some(first) = items.first_mut() {
        first.unlock();
    }
    for k in 1..items.len() {
        if items[k - 1].is_done() {
            items[k].unlock();
        }
    }
}

fn block_is_completed(block: &TaskBlock) -> bool {
    match block.kind {
        BlockKind::Single => block.completed,
        BlockKind::Grouped => match &block.subtasks {
            Some(subtasks) if !subtasks.is_empty() => subtasks.iter().all(|s| s.completed),
            _ => false,
        },
    }
}

fn block_units(block: &TaskBlock) -> Progress {
    match block.kind {
        BlockKind::Single => Progress {
            completed: block.completed as u64,
            total: 1,
        },
        BlockKind::Grouped => {
            let subtasks = block.subtasks.as_deref().unwrap_or(&[]);
            Progress {
                completed: subtasks.iter().filter(|s| s.completed).count() as u64,
                total: subtasks.len() as u64,
            }
        }
    }
}

pub fn compute_units(task_blocks: &[TaskBlock]) -> Progress {
    task_blocks
        .iter()
        .map(block_units)
        .fold(Progress::default(), |acc, units| Progress {
            completed: acc.completed + units.completed,
            total: acc.total + units.total,
        })
}

pub fn compute_progress(task_blocks: &[TaskBlock]) -> u8 {
    compute_units(task_blocks).percent()
}

pub fn compute_completed(task_blocks: &[TaskBlock]) -> bool {
    !task_blocks.is_empty() && task_blocks.iter().all(block_is_completed)
}

pub fn refresh_derived(goal: &mut Goal) {
    for block in goal.task_blocks.iter_mut() {
        if block.kind == BlockKind::Grouped {
            block.completed = block_is_completed(block);
        }
    }

    goal.progress = compute_progress(&goal.task_blocks);
    goal.completed = compute_completed(&goal.task_blocks);
}

fn block_index(goal: &Goal, block_id: &str) -> InternalResult<usize> {
    goal.task_blocks
        .iter()
        .position(|b| b.id == block_id)
        .ok_or_else(|| InternalError::not_found("task block", block_id))
}

fn find_block_mut<'a>(goal: &'a mut Goal, block_id: &str) -> InternalResult<&'a mut TaskBlock> {
    let index = block_index(goal, block_id)?;
    Ok(&mut goal.task_blocks[index])
}

fn subtasks_mut<'a>(block: &'a mut TaskBlock, subtask_id: &str) -> InternalResult<&'a mut Vec<Subtask>> {
    match block.subtasks.as_mut() {
        Some(subtasks) if !subtasks.is_empty() => Ok(subtasks),
        _ => Err(InternalError::not_found("subtask", subtask_id)),
    }
}

fn build_subtask(new: NewSubtask, order: usize, step_by_step: bool) -> InternalResult<Subtask> {
    Ok(Subtask {
        id: new_id(),
        title: validate_title(&new.title)?,
        completed: false,
        is_reward_trigger: new.is_reward_trigger,
        reward_note: new.reward_note,
        locked: step_by_step && order > 0,
        order,
    })
}

pub fn add_task_block(goal: &mut Goal, new: NewTaskBlock) -> InternalResult<TaskBlockID> {
    let title = validate_title(&new.title)?;
    let order = goal.task_blocks.len();
    let step_by_step = goal.step_by_step;

    let subtasks = match new.kind {
        BlockKind::Single => None,
        BlockKind::Grouped => Some(
            new.subtasks
                .into_iter()
                .enumerate()
                .map(|(index, subtask)| build_subtask(subtask, index, step_by_step))
                .collect::<InternalResult<Vec<Subtask>>>()?,
        ),
    };

    let block = TaskBlock {
        id: new_id(),
        title,
        kind: new.kind,
        completed: false,
        locked: step_by_step && order > 0,
        is_reward_trigger: new.is_reward_trigger,
        reward_note: new.reward_note,
        subtasks,
        order,
    };
    let id = block.id.clone();

    goal.task_blocks.push(block);
    refresh_derived(goal);

    Ok(id)
}

pub fn add_subtask(goal: &mut Goal, block_id: &str, new: NewSubtask) -> InternalResult<SubtaskID> {
    let step_by_step = goal.step_by_step;
    let block = find_block_mut(goal, block_id)?;

    if block.kind != BlockKind::Grouped {
        return Err(InternalError::validation("only grouped task blocks have subtasks"));
    }

    let subtasks = block.subtasks.get_or_insert_with(Vec::new);
    let subtask = build_subtask(new, subtasks.len(), step_by_step)?;
    let id = subtask.id.clone();
    subtasks.push(subtask);

    refresh_derived(goal);

    Ok(id)
}

pub fn toggle_task_block(goal: &mut Goal, block_id: &str) -> InternalResult<()> {
    let step_by_step = goal.step_by_step;
    let block = find_block_mut(goal, block_id)?;

    if block.locked {
        return Err(InternalError::validation("task block is locked"));
    }
    if block.kind == BlockKind::Grouped {
        return Err(InternalError::validation(
            "grouped task blocks complete through their subtasks",
        ));
    }

    block.completed = !block.completed;
    let (completed, order) = (block.completed, block.order);

    if completed && step_by_step {
        unlock_next(&mut goal.task_blocks, order);
    }

    refresh_derived(goal);

    Ok(())
}

pub fn toggle_subtask(goal: &mut Goal, block_id: &str, subtask_id: &str) -> InternalResult<()> {
    let step_by_step = goal.step_by_step;
    let block = find_block_mut(goal, block_id)?;

    if block.locked {
        return Err(InternalError::validation("task block is locked"));
    }

    let block_was_completed = block_is_completed(block);
    let subtasks = subtasks_mut(block, subtask_id)?;
    let subtask = subtasks
        .iter_mut()
        .find(|s| s.id == subtask_id)
        .ok_or_else(|| InternalError::not_found("subtask", subtask_id))?;

    if subtask.locked {
        return Err(InternalError::validation("subtask is locked"));
    }

    subtask.completed = !subtask.completed;
    let (completed, order) = (subtask.completed, subtask.order);

    if completed && step_by_step {
        unlock_next(subtasks, order);
    }

    block.completed = block_is_completed(block);
    let (block_completed, block_order) = (block.completed, block.order);

    if step_by_step && block_completed && !block_was_completed {
        unlock_next(&mut goal.task_blocks, block_order);
    }

    refresh_derived(goal);

    Ok(())
}

pub fn delete_task_block(goal: &mut Goal, block_id: &str) -> InternalResult<()> {
    let index = block_index(goal, block_id)?;

    goal.task_blocks.remove(index);
    relink(&mut goal.task_blocks, goal.step_by_step);
    refresh_derived(goal);

    Ok(())
}

pub fn delete_subtask(goal: &mut Goal, block_id: &str, subtask_id: &str) -> InternalResult<()> {
    let step_by_step = goal.step_by_step;
    let block = find_block_mut(goal, block_id)?;
    let block_was_completed = block_is_completed(block);
    let subtasks = subtasks_mut(block, subtask_id)?;
    let index = subtasks
        .iter()
        .position(|s| s.id == subtask_id)
        .ok_or_else(|| InternalError::not_found("subtask", subtask_id))?;

    subtasks.remove(index);
    relink(subtasks, step_by_step);

    block.completed = block_is_completed(block);
    let (block_completed, block_order) = (block.completed, block.order);

    if step_by_step && block_completed && !block_was_completed {
        unlock_next(&mut goal.task_blocks, block_order);
    }

    refresh_derived(goal);

    Ok(())
}

pub fn edit_task_block(goal: &mut Goal, block_id: &str, title: &str) -> InternalResult<()> {
    let title = validate_title(title)?;
    find_block_mut(goal, block_id)?.title = title;

    Ok(())
}

pub fn edit_subtask(goal: &mut Goal, block_id: &str, subtask_id: &str, title: &str) -> InternalResult<()> {
    let title = validate_title(title)?;
    let block = find_block_mut(goal, block_id)?;
    let subtask = subtasks_mut(block, subtask_id)?
        .iter_mut()
        .find(|s| s.id == subtask_id)
        .ok_or_else(|| InternalError::not_found("subtask", subtask_id))?;

    subtask.title = title;

    Ok(())
}
