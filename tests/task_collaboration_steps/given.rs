//! Given steps for task collaboration BDD scenarios.

use super::world::{CollaborationWorld, build_registration, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given(r#"a registered user named "{name}""#)]
fn a_registered_user_named(
    world: &mut CollaborationWorld,
    name: String,
) -> Result<(), eyre::Report> {
    let user = run_async(world.registration.register(build_registration(&name)))
        .wrap_err("register scenario user")?;
    world.users.insert(name, user);
    Ok(())
}

#[given("the default categories have been seeded")]
fn default_categories_seeded(world: &mut CollaborationWorld) -> Result<(), eyre::Report> {
    let created = run_async(world.seeder.ensure_defaults()).wrap_err("seed default categories")?;
    if created != 5 {
        return Err(eyre::eyre!("expected 5 seeded categories, got {created}"));
    }
    Ok(())
}
