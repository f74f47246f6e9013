//! When steps for pull request linking BDD scenarios.

use super::world::LinkWorld;
use eyre::WrapErr;
use rstest_bdd_macros::when;

#[when("the action runs")]
fn action_runs(world: &mut LinkWorld) -> Result<(), eyre::Report> {
    world.run()
}

#[when("the action runs again")]
fn action_runs_again(world: &mut LinkWorld) -> Result<(), eyre::Report> {
    world.tracker.clear_calls().wrap_err("reset recorded calls")?;
    world.run()
}
