//! Then steps for pull request linking BDD scenarios.

use super::world::{LinkWorld, task_gid};
use asana_pr_linker::linking::services::RunError;
use eyre::WrapErr;
use rstest_bdd_macros::then;

#[then("the run succeeds")]
fn run_succeeds(world: &LinkWorld) -> Result<(), eyre::Report> {
    let report = world.last_report()?;
    if report.failed_task_count() != 0 {
        return Err(eyre::eyre!(
            "expected no failed tasks, found {}",
            report.failed_task_count()
        ));
    }
    Ok(())
}

#[then("the run fails with remote failures")]
fn run_fails_with_remote_failures(world: &LinkWorld) -> Result<(), eyre::Report> {
    match world.last_result.as_ref() {
        Some(Err(RunError::RemoteFailures { total_tasks, .. })) if *total_tasks > 0 => Ok(()),
        other => Err(eyre::eyre!("expected propagated remote failures, got {other:?}")),
    }
}

#[then(r#"task "{gid}" is in section "{section}" of project "{project}""#)]
fn task_is_in_section(
    world: &LinkWorld,
    gid: String,
    section: String,
    project: String,
) -> Result<(), eyre::Report> {
    let expected = world.section(&project, &section)?;
    let actual = world
        .tracker
        .section_of(&task_gid(&gid)?, &world.project(&project)?)
        .wrap_err("read task placement")?;
    if actual.as_ref() != Some(&expected) {
        return Err(eyre::eyre!(
            "expected task {gid} in {project}/{section}, found {actual:?}"
        ));
    }
    Ok(())
}

#[then(r#"the comment on task "{gid}" is "{text}""#)]
fn comment_text_is(world: &LinkWorld, gid: String, text: String) -> Result<(), eyre::Report> {
    let comments = world
        .tracker
        .comments_on(&task_gid(&gid)?)
        .wrap_err("read comments")?;
    if comments != [text.clone()] {
        return Err(eyre::eyre!(
            "expected exactly the comment {text:?}, found {comments:?}"
        ));
    }
    Ok(())
}

#[then(r#"task "{gid}" has {count:usize} comments"#)]
fn task_has_comments(world: &LinkWorld, gid: String, count: usize) -> Result<(), eyre::Report> {
    let comments = world
        .tracker
        .comments_on(&task_gid(&gid)?)
        .wrap_err("read comments")?;
    if comments.len() != count {
        return Err(eyre::eyre!(
            "expected {count} comments on task {gid}, found {comments:?}"
        ));
    }
    Ok(())
}

#[then(r#"the target outcomes are "{outcomes}""#)]
fn target_outcomes_are(world: &LinkWorld, outcomes: String) -> Result<(), eyre::Report> {
    let report = world.last_report()?;
    let actual: Vec<&str> = report
        .tasks
        .iter()
        .flat_map(|task| task.targets.iter().map(|target| target.outcome.as_str()))
        .collect();
    let expected: Vec<&str> = outcomes.split(',').map(str::trim).collect();
    if actual != expected {
        return Err(eyre::eyre!(
            "expected target outcomes {expected:?}, found {actual:?}"
        ));
    }
    Ok(())
}

#[then("no tracker changes were made")]
fn no_tracker_changes(world: &LinkWorld) -> Result<(), eyre::Report> {
    let mutations = world.tracker.mutations().wrap_err("read recorded calls")?;
    if !mutations.is_empty() {
        return Err(eyre::eyre!("expected no mutating calls, found {mutations:?}"));
    }
    Ok(())
}
