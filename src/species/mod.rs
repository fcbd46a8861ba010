//! Species behaviors
//!
//! Each species is a component implementing [`Agent`]: a closed state enum
//! driven by a per-frame `tick`. The simulation ticks every live agent once
//! per frame through [`tick_entity`].

mod env;
pub mod firefly;
pub mod predator;
pub mod prey;

pub use env::{Agent, Env, Fate, Outcome};
pub use firefly::{Attractor, Firefly, FireflyConfig, FireflyState};
pub use predator::{Predator, PredatorConfig, PredatorState};
pub use prey::{Prey, PreyConfig, PreyState};

use hecs::Entity;

use crate::core::random::SimRng;
use crate::ecs::{Tint, Transform, World};
use crate::input::Input;
use crate::physics::Contact;

/// Tick one agent of species `A` and write its components back.
///
/// Returns `None` when the entity is gone or is not an `A`.
pub fn tick_entity<A: Agent>(
    world: &mut World,
    entity: Entity,
    config: &A::Config,
    dt: f32,
    rng: &mut SimRng,
    contacts: &[Contact],
    input: &Input,
) -> Option<Outcome> {
    let mut agent = A::clone(&*world.get::<A>(entity).ok()?);
    let mut transform = *world.get::<Transform>(entity).ok()?;
    let mut tint = *world.get::<Tint>(entity).ok()?;

    let outcome = {
        let mut env = Env {
            dt,
            world: &*world,
            rng,
            contacts,
            input,
        };
        agent.tick(config, &mut transform, &mut tint, &mut env)
    };

    *world.get_mut::<A>(entity).ok()? = agent;
    *world.get_mut::<Transform>(entity).ok()? = transform;
    *world.get_mut::<Tint>(entity).ok()? = tint;
    Some(outcome)
}
