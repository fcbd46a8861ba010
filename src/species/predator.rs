//! Predator: rests, hunts the nearest prey, and shrinks away once it has
//! eaten its fill.

use glam::{Vec2, Vec4};
use hecs::Entity;
use serde::{Deserialize, Serialize};

use super::env::{Agent, Env, Fate, Outcome};
use crate::ai::{AgentState, Countdown, StateMachine, Transition, seek};
use crate::core::DestroyCause;
use crate::core::random::SimRng;
use crate::ecs::{Collider, Species, Tint, Transform};
use crate::renderer::color;

/// Predator tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredatorConfig {
    pub rest_duration: f32,
    pub move_speed: f32,
    /// Distance at which the target is caught
    pub attack_range: f32,
    /// Kills before the predator starts dying
    pub kills_to_die: u32,
    /// Scale lost per second while dying
    pub shrink_speed: f32,
    pub start_scale: f32,
    /// Scale at which a dying predator disappears
    pub vanish_scale: f32,
    pub rest_color: Vec4,
    pub hunt_color: Vec4,
    pub collider_radius: f32,
}

impl Default for PredatorConfig {
    fn default() -> Self {
        Self {
            rest_duration: 2.0,
            move_speed: 2.0,
            attack_range: 0.4,
            kills_to_die: 2,
            shrink_speed: 1.0,
            start_scale: 0.7,
            vanish_scale: 0.05,
            rest_color: color::BLACK,
            hunt_color: color::RED,
            collider_radius: 0.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredatorState {
    Rest,
    Hunt { target: Entity },
    Dying,
}

impl AgentState for PredatorState {
    fn name(&self) -> &'static str {
        match self {
            Self::Rest => "Rest",
            Self::Hunt { .. } => "Hunt",
            Self::Dying => "Dying",
        }
    }

    fn is_terminal(&self) -> bool {
        matches!(self, Self::Dying)
    }
}

/// Predator behavior component
#[derive(Debug, Clone)]
pub struct Predator {
    fsm: StateMachine<PredatorState>,
    rest_timer: Countdown,
    kills: u32,
}

impl Predator {
    pub fn state(&self) -> PredatorState {
        *self.fsm.current()
    }

    /// Whether the predator is chasing prey right now
    pub fn is_hunting(&self) -> bool {
        matches!(self.fsm.current(), PredatorState::Hunt { .. })
    }

    pub fn target(&self) -> Option<Entity> {
        match self.fsm.current() {
            PredatorState::Hunt { target } => Some(*target),
            _ => None,
        }
    }

    pub fn kills(&self) -> u32 {
        self.kills
    }

    fn rest(&mut self, config: &PredatorConfig) -> Transition<PredatorState> {
        self.rest_timer.reset(config.rest_duration);
        Transition::To(PredatorState::Rest)
    }
}

impl Agent for Predator {
    type Config = PredatorConfig;

    const SPECIES: Species = Species::Predator;

    fn spawn(
        config: &PredatorConfig,
        position: Vec2,
        _rng: &mut SimRng,
    ) -> (Self, Transform, Tint, Collider) {
        let predator = Self {
            fsm: StateMachine::new(PredatorState::Rest),
            rest_timer: Countdown::new(config.rest_duration),
            kills: 0,
        };
        (
            predator,
            Transform::from_position(position).with_scale(config.start_scale),
            Tint(config.rest_color),
            Collider::new(config.collider_radius),
        )
    }

    fn tick(
        &mut self,
        config: &PredatorConfig,
        transform: &mut Transform,
        tint: &mut Tint,
        env: &mut Env<'_>,
    ) -> Outcome {
        let dt = env.dt;
        let mut outcome = Outcome::live();
        self.fsm.tick(dt);

        let transition = match self.state() {
            PredatorState::Rest => {
                if self.rest_timer.tick(dt) {
                    match env.nearest_prey(transform.position) {
                        Some((target, _)) => Transition::To(PredatorState::Hunt { target }),
                        None => {
                            self.rest_timer.reset(config.rest_duration);
                            Transition::None
                        }
                    }
                } else {
                    Transition::None
                }
            }
            PredatorState::Hunt { target } => match env.prey_position(target) {
                // Eaten by someone else or faded away
                None => self.rest(config),
                Some(prey) => {
                    transform.translate(seek(transform.position, prey, config.move_speed, dt));
                    if transform.distance_to(prey) <= config.attack_range {
                        outcome.kill = Some(target);
                        self.kills += 1;
                        log::debug!("predator made kill {}/{}", self.kills, config.kills_to_die);
                        if self.kills >= config.kills_to_die {
                            Transition::To(PredatorState::Dying)
                        } else {
                            self.rest(config)
                        }
                    } else {
                        Transition::None
                    }
                }
            },
            PredatorState::Dying => {
                transform.scale -= config.shrink_speed * dt;
                if transform.scale <= config.vanish_scale {
                    transform.scale = transform.scale.max(0.0);
                    outcome.fate = Fate::Destroy(DestroyCause::Sated);
                }
                Transition::None
            }
        };
        outcome.record(self.fsm.apply(transition));

        tint.0 = match self.state() {
            PredatorState::Rest => config.rest_color,
            PredatorState::Hunt { .. } | PredatorState::Dying => config.hunt_color,
        };
        outcome
    }

    fn state_name(&self) -> &'static str {
        self.fsm.current_state_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::species::Prey;
    use crate::species::prey::PreyConfig;
    use crate::species::testing::Harness;

    fn spawn(harness: &mut Harness, config: &PredatorConfig) -> (Predator, Transform, Tint) {
        let (predator, transform, tint, _) = Predator::spawn(config, Vec2::ZERO, &mut harness.rng);
        (predator, transform, tint)
    }

    #[test]
    fn test_predator_rests_then_hunts_nearest_prey() {
        let mut harness = Harness::new(1);
        let prey_config = PreyConfig::default();
        let far = harness.spawn::<Prey>(&prey_config, Vec2::new(4.0, 0.0));
        let near = harness.spawn::<Prey>(&prey_config, Vec2::new(-1.0, 1.0));

        let config = PredatorConfig::default();
        let (mut predator, mut transform, mut tint) = spawn(&mut harness, &config);
        assert_eq!(tint.0, color::BLACK);

        predator.tick(&config, &mut transform, &mut tint, &mut harness.env(1.0, &[]));
        assert_eq!(predator.state(), PredatorState::Rest);

        let outcome = predator.tick(&config, &mut transform, &mut tint, &mut harness.env(1.0, &[]));
        assert_eq!(predator.target(), Some(near));
        assert_ne!(predator.target(), Some(far));
        assert_eq!(outcome.changes[0].to, "Hunt");
        assert_eq!(tint.0, color::RED);
    }

    #[test]
    fn test_predator_ties_go_to_first_scanned() {
        let mut harness = Harness::new(2);
        let prey_config = PreyConfig::default();
        let first = harness.spawn::<Prey>(&prey_config, Vec2::new(2.0, 0.0));
        harness.spawn::<Prey>(&prey_config, Vec2::new(-2.0, 0.0));

        let config = PredatorConfig {
            rest_duration: 0.0,
            ..Default::default()
        };
        let (mut predator, mut transform, mut tint) = spawn(&mut harness, &config);
        predator.tick(&config, &mut transform, &mut tint, &mut harness.env(0.1, &[]));

        assert_eq!(predator.target(), Some(first));
    }

    #[test]
    fn test_predator_without_prey_keeps_resting() {
        let mut harness = Harness::new(3);
        let config = PredatorConfig::default();
        let (mut predator, mut transform, mut tint) = spawn(&mut harness, &config);

        for _ in 0..10 {
            predator.tick(&config, &mut transform, &mut tint, &mut harness.env(0.5, &[]));
            assert_eq!(predator.state(), PredatorState::Rest);
        }
        assert_eq!(transform.position, Vec2::ZERO);
    }

    #[test]
    fn test_predator_returns_to_rest_when_target_vanishes() {
        let mut harness = Harness::new(4);
        let target = harness.spawn::<Prey>(&PreyConfig::default(), Vec2::new(5.0, 0.0));

        let config = PredatorConfig {
            rest_duration: 0.0,
            ..Default::default()
        };
        let (mut predator, mut transform, mut tint) = spawn(&mut harness, &config);
        predator.tick(&config, &mut transform, &mut tint, &mut harness.env(0.1, &[]));
        assert!(predator.is_hunting());

        harness.world.despawn(target).unwrap();
        predator.tick(&config, &mut transform, &mut tint, &mut harness.env(0.1, &[]));
        assert_eq!(predator.state(), PredatorState::Rest);
    }

    #[test]
    fn test_predator_moves_toward_target() {
        let mut harness = Harness::new(5);
        harness.spawn::<Prey>(&PreyConfig::default(), Vec2::new(5.0, 0.0));

        let config = PredatorConfig {
            rest_duration: 0.0,
            ..Default::default()
        };
        let (mut predator, mut transform, mut tint) = spawn(&mut harness, &config);
        predator.tick(&config, &mut transform, &mut tint, &mut harness.env(0.1, &[]));
        predator.tick(&config, &mut transform, &mut tint, &mut harness.env(0.5, &[]));

        assert!((transform.position - Vec2::new(1.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_predator_dies_after_kill_quota() {
        let mut harness = Harness::new(6);
        let prey_config = PreyConfig::default();
        let config = PredatorConfig {
            rest_duration: 0.0,
            kills_to_die: 2,
            ..Default::default()
        };
        let (mut predator, mut transform, mut tint) = spawn(&mut harness, &config);

        for _ in 0..2 {
            let prey = harness.spawn::<Prey>(&prey_config, Vec2::new(0.2, 0.0));
            // Rest expires immediately, then the catch
            predator.tick(&config, &mut transform, &mut tint, &mut harness.env(0.1, &[]));
            let outcome = predator.tick(&config, &mut transform, &mut tint, &mut harness.env(0.1, &[]));
            assert_eq!(outcome.kill, Some(prey));
            harness.world.despawn(prey).unwrap();
        }
        assert_eq!(predator.kills(), 2);
        assert_eq!(predator.state(), PredatorState::Dying);

        // Fresh prey nearby: never hunted again
        harness.spawn::<Prey>(&prey_config, Vec2::new(0.1, 0.0));
        let mut destroyed = false;
        for _ in 0..100 {
            let outcome = predator.tick(&config, &mut transform, &mut tint, &mut harness.env(0.05, &[]));
            assert_eq!(outcome.kill, None);
            assert!(!predator.is_hunting());
            if outcome.is_destroyed() {
                assert_eq!(outcome.fate, Fate::Destroy(DestroyCause::Sated));
                destroyed = true;
                break;
            }
        }
        assert!(destroyed);
        assert!(transform.scale <= config.vanish_scale);
    }
}
