//! Firefly: drifts around, now and then blinks, and trails after hunting
//! predators or the host's lure. Burns out after a few flashes.

use glam::{Vec2, Vec4};
use hecs::Entity;
use serde::{Deserialize, Serialize};

use super::env::{Agent, Env, Fate, Outcome};
use crate::ai::{AgentState, Countdown, StateMachine, Transition, Wander, seek};
use crate::animation::Sequence;
use crate::core::DestroyCause;
use crate::core::random::{SimRng, roll};
use crate::ecs::{Collider, Species, Tint, Transform};
use crate::physics::ContactTag;
use crate::renderer::color;

/// Firefly tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FireflyConfig {
    pub move_speed: f32,
    /// Seconds between heading changes (min, max)
    pub direction_interval: (f32, f32),
    pub scale: f32,
    /// Completed flashes before the firefly burns out
    pub max_flashes: u32,
    pub normal_color: Vec4,
    pub flash_color: Vec4,
    /// Seconds between flash rolls while wandering
    pub flash_interval: f32,
    /// A roll succeeds one time in this many
    pub flash_roll_sides: u32,
    /// On/off cycles per flash
    pub blink_count: u32,
    /// Seconds per half cycle
    pub blink_step: f32,
    pub chase_speed: f32,
    /// Hunting predators farther than this are ignored
    pub attract_radius: f32,
    /// Chasers stop closing in at this distance
    pub follow_distance: f32,
    pub chase_color: Vec4,
    pub collider_radius: f32,
}

impl Default for FireflyConfig {
    fn default() -> Self {
        Self {
            move_speed: 1.5,
            direction_interval: (0.5, 1.0),
            scale: 0.5,
            max_flashes: 3,
            normal_color: color::YELLOW,
            flash_color: color::WHITE,
            flash_interval: 6.0,
            flash_roll_sides: 3,
            blink_count: 2,
            blink_step: 0.1,
            chase_speed: 3.0,
            attract_radius: 10.0,
            follow_distance: 0.5,
            chase_color: color::WHITE,
            collider_radius: 0.25,
        }
    }
}

/// What a chasing firefly follows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attractor {
    Predator(Entity),
    Lure,
}

/// Blink animation: alternating lit and unlit half cycles
#[derive(Debug, Clone, PartialEq)]
pub struct Blink {
    sequence: Sequence,
}

impl Blink {
    fn new(config: &FireflyConfig) -> Self {
        let steps = config.blink_count as usize * 2;
        Self {
            sequence: Sequence::new(std::iter::repeat_n(config.blink_step, steps)),
        }
    }

    /// Even phases are lit
    fn is_lit(&self) -> bool {
        !self.sequence.is_finished() && self.sequence.phase() % 2 == 0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FireflyState {
    Wander,
    Flash(Blink),
    Chase(Attractor),
}

impl AgentState for FireflyState {
    fn name(&self) -> &'static str {
        match self {
            Self::Wander => "Wander",
            Self::Flash(_) => "Flash",
            Self::Chase(_) => "Chase",
        }
    }
}

/// Firefly behavior component
#[derive(Debug, Clone)]
pub struct Firefly {
    fsm: StateMachine<FireflyState>,
    wander: Wander,
    flash_timer: Countdown,
    flashes: u32,
}

impl Firefly {
    pub fn state(&self) -> &FireflyState {
        self.fsm.current()
    }

    pub fn flashes(&self) -> u32 {
        self.flashes
    }

    pub fn is_flashing(&self) -> bool {
        matches!(self.fsm.current(), FireflyState::Flash(_))
    }

    /// What the firefly is following, if anything
    pub fn attractor(&self) -> Option<Attractor> {
        match self.fsm.current() {
            FireflyState::Chase(attractor) => Some(*attractor),
            _ => None,
        }
    }

    /// Drift, roll for a flash, then look for something to chase
    fn roam(
        &mut self,
        config: &FireflyConfig,
        transform: &mut Transform,
        env: &mut Env<'_>,
    ) -> Transition<FireflyState> {
        let delta = self.wander.step(config.move_speed, env.dt, env.rng);
        transform.translate(delta);

        let expired = self.flash_timer.tick(env.dt);
        if expired || env.input.is_flash_just_pressed() {
            if roll(env.rng, config.flash_roll_sides) {
                return Transition::To(FireflyState::Flash(Blink::new(config)));
            }
            if expired {
                self.flash_timer.reset(config.flash_interval);
            }
        }

        if env.input.lure().is_some() {
            Transition::To(FireflyState::Chase(Attractor::Lure))
        } else if let Some((predator, _)) =
            env.nearest_hunting_predator(transform.position, config.attract_radius)
        {
            Transition::To(FireflyState::Chase(Attractor::Predator(predator)))
        } else {
            Transition::None
        }
    }

    /// Where the attractor is now, or `None` once it no longer attracts
    fn attractor_position(
        config: &FireflyConfig,
        from: Vec2,
        attractor: Attractor,
        env: &Env<'_>,
    ) -> Option<Vec2> {
        match attractor {
            Attractor::Lure => env.input.lure(),
            Attractor::Predator(predator) => env
                .hunting_predator_position(predator)
                .filter(|position| position.distance(from) <= config.attract_radius),
        }
    }
}

impl Agent for Firefly {
    type Config = FireflyConfig;

    const SPECIES: Species = Species::Firefly;

    fn spawn(
        config: &FireflyConfig,
        position: Vec2,
        rng: &mut SimRng,
    ) -> (Self, Transform, Tint, Collider) {
        let firefly = Self {
            fsm: StateMachine::new(FireflyState::Wander),
            wander: Wander::new(config.direction_interval, rng),
            flash_timer: Countdown::new(config.flash_interval),
            flashes: 0,
        };
        (
            firefly,
            Transform::from_position(position).with_scale(config.scale),
            Tint(config.normal_color),
            Collider::new(config.collider_radius),
        )
    }

    fn tick(
        &mut self,
        config: &FireflyConfig,
        transform: &mut Transform,
        tint: &mut Tint,
        env: &mut Env<'_>,
    ) -> Outcome {
        let dt = env.dt;
        let mut outcome = Outcome::live();
        self.fsm.tick(dt);

        if matches!(self.fsm.current(), FireflyState::Wander) {
            for contact in env.contacts {
                if contact.tag == ContactTag::BoundaryWall {
                    self.wander.bounce(contact.normal, env.rng);
                }
            }
        }

        let transition = match self.fsm.current_mut() {
            FireflyState::Wander => self.roam(config, transform, env),
            FireflyState::Flash(blink) => {
                blink.sequence.advance(dt);
                if blink.sequence.is_finished() {
                    self.flashes += 1;
                    self.flash_timer.reset(config.flash_interval);
                    if self.flashes >= config.max_flashes {
                        outcome.fate = Fate::Destroy(DestroyCause::BurnedOut);
                        Transition::None
                    } else {
                        Transition::To(FireflyState::Wander)
                    }
                } else {
                    Transition::None
                }
            }
            FireflyState::Chase(attractor) => {
                let attractor = *attractor;
                match Self::attractor_position(config, transform.position, attractor, env) {
                    None => Transition::To(FireflyState::Wander),
                    Some(target) => {
                        if transform.distance_to(target) > config.follow_distance {
                            let to_follow = target
                                + (transform.position - target).normalize_or_zero()
                                    * config.follow_distance;
                            transform.translate(seek(
                                transform.position,
                                to_follow,
                                config.chase_speed,
                                dt,
                            ));
                        }
                        Transition::None
                    }
                }
            }
        };
        outcome.record(self.fsm.apply(transition));

        tint.0 = match self.fsm.current() {
            FireflyState::Wander => config.normal_color,
            FireflyState::Flash(blink) if blink.is_lit() => config.flash_color,
            FireflyState::Flash(_) => config.normal_color,
            FireflyState::Chase(_) => config.chase_color,
        };
        outcome
    }

    fn state_name(&self) -> &'static str {
        self.fsm.current_state_name()
    }
}
