//! Given steps for pull request linking BDD scenarios.

use super::world::{LinkWorld, task_gid};
use asana_pr_linker::linking::domain::{ProjectGid, ProjectRef, SectionGid, SectionRef};
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given(r#"an Asana project "{name}" with sections "{sections}""#)]
fn project_with_sections(
    world: &mut LinkWorld,
    name: String,
    sections: String,
) -> Result<(), eyre::Report> {
    let project_gid = world.allocate_gid();
    let mut seeded = Vec::new();
    for section_name in sections.split(',').map(str::trim) {
        let section_gid = world.allocate_gid();
        seeded.push(SectionRef::new(section_gid.clone(), section_name));
        world.sections.insert(
            (name.clone(), section_name.to_owned()),
            SectionGid::new(section_gid.as_str()),
        );
    }
    world
        .tracker
        .add_project(ProjectRef::new(project_gid.clone(), name.clone()), seeded)
        .wrap_err("seed project")?;
    world.projects.insert(name, ProjectGid::new(project_gid));
    Ok(())
}

#[given(r#"task "{gid}" sits in "{section}" of project "{project}""#)]
fn task_in_section(
    world: &mut LinkWorld,
    gid: String,
    section: String,
    project: String,
) -> Result<(), eyre::Report> {
    let task = task_gid(&gid)?;
    let project_gid = world.project(&project)?;
    let section_gid = world.section(&project, &section)?;
    world.tracker.add_task(task.clone()).wrap_err("seed task")?;
    world
        .tracker
        .add_membership(&task, &project_gid, Some(section_gid))
        .wrap_err("seed membership")?;
    Ok(())
}

#[given(r#"the pull request description links task "{gid}" after "{phrase}""#)]
fn description_links_task(world: &mut LinkWorld, gid: String, phrase: String) {
    world
        .body_lines
        .push(format!("{phrase} [Task {gid}](https://app.asana.com/0/0/{gid})"));
}

#[given(r#"the pull request description contains a malformed Asana link after "{phrase}""#)]
fn description_contains_malformed_link(world: &mut LinkWorld, phrase: String) {
    world
        .body_lines
        .push(format!("{phrase} [Broken](https://app.asana.com/1/999/task)"));
}

#[given(r#"the action targets section "{section}" of project "{project}""#)]
fn action_targets(
    world: &mut LinkWorld,
    section: String,
    project: String,
) -> Result<(), eyre::Report> {
    world.add_target(&project, &section)
}

#[given(r#"the comment template "{template}""#)]
fn comment_template(world: &mut LinkWorld, template: String) {
    world.set_comment(&template);
}

#[given("duplicate comment detection is enabled")]
fn duplicate_detection_enabled(world: &mut LinkWorld) {
    world.skip_duplicates();
}

#[given("failure propagation is enabled")]
fn failure_propagation_enabled(world: &mut LinkWorld) {
    world.config.propagate_failures = true;
}

#[given(r#"comments on task "{gid}" fail"#)]
fn comments_fail(world: &mut LinkWorld, gid: String) -> Result<(), eyre::Report> {
    world
        .tracker
        .fail_comments_for(task_gid(&gid)?)
        .wrap_err("inject comment failure")?;
    Ok(())
}
