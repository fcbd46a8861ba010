//! The ecosystem game: spawns agents, runs the sensor pass and ticks every
//! species once per step.

use glam::Vec2;
use hecs::Entity;

use super::spawner::Spawner;
use crate::core::{DestroyCause, EngineContext, Game, SimConfig, SimEvent};
use crate::ecs::Species;
use crate::physics::Sensors;
use crate::renderer::RenderFrame;
use crate::species::{Agent, Fate, Firefly, Outcome, Predator, Prey, tick_entity};

/// Prey, predators and fireflies sharing one arena
pub struct Ecosystem {
    config: SimConfig,
    spawner: Spawner,
    sensors: Sensors,
}

impl Ecosystem {
    pub fn new(config: SimConfig) -> Self {
        let spawner = Spawner::new(config.spawner.clone());
        Self {
            config,
            spawner,
            sensors: Sensors::new(),
        }
    }

    /// Create one agent of `species` at `position`
    pub fn spawn(&self, ctx: &mut EngineContext, species: Species, position: Vec2) -> Entity {
        match species {
            Species::Prey => spawn_agent::<Prey>(ctx, &self.config.prey, position),
            Species::Predator => spawn_agent::<Predator>(ctx, &self.config.predator, position),
            Species::Firefly => spawn_agent::<Firefly>(ctx, &self.config.firefly, position),
        }
    }

    /// Render-ready snapshot of the current world
    pub fn snapshot(&self, ctx: &EngineContext) -> RenderFrame {
        RenderFrame::capture(&ctx.world, ctx.time.elapsed_seconds())
    }
}

impl Game for Ecosystem {
    fn init(&mut self, ctx: &mut EngineContext) {
        log::info!("Initializing ecosystem: {}", self.config.name);
        for request in self.spawner.initial(&mut ctx.rng) {
            self.spawn(ctx, request.species, request.position);
        }
        log::info!(
            "Spawned {} prey, {} predators, {} fireflies",
            ctx.world.count(Species::Prey),
            ctx.world.count(Species::Predator),
            ctx.world.count(Species::Firefly)
        );
    }

    fn update(&mut self, ctx: &mut EngineContext) {
        self.sensors.detect(&ctx.world, &self.config.arena);

        tick_species::<Prey>(ctx, &self.sensors, &self.config.prey);
        tick_species::<Predator>(ctx, &self.sensors, &self.config.predator);
        tick_species::<Firefly>(ctx, &self.sensors, &self.config.firefly);

        // New arrivals start ticking next frame
        let dt = ctx.time.delta_seconds();
        for request in self.spawner.tick(dt, &mut ctx.rng) {
            self.spawn(ctx, request.species, request.position);
        }
    }

    fn shutdown(&mut self, ctx: &mut EngineContext) {
        log::info!(
            "Ecosystem ended with {} prey, {} predators, {} fireflies",
            ctx.world.count(Species::Prey),
            ctx.world.count(Species::Predator),
            ctx.world.count(Species::Firefly)
        );
        self.sensors.clear();
    }
}

fn spawn_agent<A: Agent>(ctx: &mut EngineContext, config: &A::Config, position: Vec2) -> Entity {
    let (agent, transform, tint, collider) = A::spawn(config, position, &mut ctx.rng);
    let entity = ctx.world.spawn((agent, transform, tint, collider, A::SPECIES));
    log::debug!("spawned {} {entity:?} at {position}", A::SPECIES);
    ctx.events.push(SimEvent::Spawned {
        entity,
        species: A::SPECIES,
        position,
    });
    entity
}

/// Tick every live agent of one species, in registry order.
///
/// Agents destroyed earlier in the step are skipped.
fn tick_species<A: Agent>(ctx: &mut EngineContext, sensors: &Sensors, config: &A::Config) {
    let dt = ctx.time.delta_seconds();
    for entity in ctx.world.entities_with::<A>() {
        let contacts = sensors.contacts_for(entity);
        let Some(outcome) = tick_entity::<A>(
            &mut ctx.world,
            entity,
            config,
            dt,
            &mut ctx.rng,
            contacts,
            &ctx.input,
        ) else {
            continue;
        };
        apply_outcome(ctx, entity, A::SPECIES, outcome);
    }
}

fn apply_outcome(ctx: &mut EngineContext, entity: Entity, species: Species, outcome: Outcome) {
    for change in &outcome.changes {
        log::debug!("{species} {entity:?}: {} -> {}", change.from, change.to);
        ctx.events.push(SimEvent::StateChanged {
            entity,
            species,
            from: change.from,
            to: change.to,
        });
    }

    if let Some(prey) = outcome.kill {
        if ctx.world.despawn(prey).is_ok() {
            log::debug!("{species} {entity:?} ate prey {prey:?}");
            ctx.events.push(SimEvent::Killed {
                predator: entity,
                prey,
            });
            ctx.events.push(SimEvent::Destroyed {
                entity: prey,
                species: Species::Prey,
                cause: DestroyCause::Eaten,
            });
        }
    }

    if let Fate::Destroy(cause) = outcome.fate {
        if ctx.world.despawn(entity).is_ok() {
            log::debug!("{species} {entity:?} destroyed: {}", cause.label());
            ctx.events.push(SimEvent::Destroyed {
                entity,
                species,
                cause,
            });
        }
    }
}
