//! Prey: wanders and shrinks, pulses when it bumps into other prey, and
//! pops then fades away once it has shrunk to its death floor.

use glam::{Vec2, Vec4};
use serde::{Deserialize, Serialize};

use super::env::{Agent, Env, Fate, Outcome};
use crate::ai::{AgentState, Countdown, StateMachine, Transition, Wander};
use crate::animation::{Sequence, inverse_lerp, lerp, lerp_color};
use crate::core::DestroyCause;
use crate::core::random::{SimRng, uniform};
use crate::ecs::{Collider, Species, Tint, Transform};
use crate::physics::ContactTag;
use crate::renderer::color::hsv_to_rgb;

/// Prey tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreyConfig {
    pub move_speed: f32,
    /// Seconds between heading changes (min, max)
    pub direction_interval: (f32, f32),
    pub start_scale: f32,
    pub min_scale_before_death: f32,
    pub shrink_rate_per_second: f32,
    /// Scale gained from each completed pulse
    pub pulse_scale_boost: f32,
    pub pulse_max_scale_multiplier: f32,
    pub pulse_up_time: f32,
    pub pulse_hold_time: f32,
    pub pulse_down_time: f32,
    pub pulse_cooldown_duration: f32,
    /// Color of a prey at its death floor
    pub dead_color: Vec4,
    /// Hue range of the per-instance base color
    pub base_hue: (f32, f32),
    pub base_saturation: (f32, f32),
    pub base_value: (f32, f32),
    pub death_pop_scale_multiplier: f32,
    pub death_pop_duration: f32,
    pub death_fade_duration: f32,
    /// Sensor radius at scale 1
    pub collider_radius: f32,
}

impl Default for PreyConfig {
    fn default() -> Self {
        Self {
            move_speed: 0.4,
            direction_interval: (1.5, 3.0),
            start_scale: 1.0,
            min_scale_before_death: 0.3,
            shrink_rate_per_second: 0.02,
            pulse_scale_boost: 0.05,
            pulse_max_scale_multiplier: 3.0,
            pulse_up_time: 0.15,
            pulse_hold_time: 0.1,
            pulse_down_time: 0.15,
            pulse_cooldown_duration: 1.0,
            dead_color: Vec4::new(0.2, 0.2, 0.25, 1.0),
            base_hue: (0.55, 0.75),
            base_saturation: (0.6, 1.0),
            base_value: (0.7, 1.0),
            death_pop_scale_multiplier: 2.0,
            death_pop_duration: 0.3,
            death_fade_duration: 0.3,
            collider_radius: 0.5,
        }
    }
}

// ============================================================================
// States
// ============================================================================

/// Scale spike: ramp up, hold, ramp down to slightly above where it started.
#[derive(Debug, Clone, PartialEq)]
pub struct PulseAnimation {
    sequence: Sequence,
    start: f32,
    peak: f32,
    settle: f32,
}

impl PulseAnimation {
    fn new(scale: f32, config: &PreyConfig) -> Self {
        Self {
            sequence: Sequence::new([
                config.pulse_up_time,
                config.pulse_hold_time,
                config.pulse_down_time,
            ]),
            start: scale,
            peak: scale * config.pulse_max_scale_multiplier,
            settle: scale + config.pulse_scale_boost,
        }
    }

    /// Advance and return the scale for this frame
    fn advance(&mut self, dt: f32) -> f32 {
        self.sequence.advance(dt);
        let t = self.sequence.progress();
        match self.sequence.phase() {
            0 => lerp(self.start, self.peak, t),
            1 => self.peak,
            2 => lerp(self.peak, self.settle, t),
            _ => self.settle,
        }
    }

    fn is_finished(&self) -> bool {
        self.sequence.is_finished()
    }
}

/// Death pop then fade. Yields (scale, alpha) each frame.
#[derive(Debug, Clone, PartialEq)]
pub struct DeathAnimation {
    sequence: Sequence,
    start: f32,
    peak: f32,
}

impl DeathAnimation {
    fn new(scale: f32, config: &PreyConfig) -> Self {
        Self {
            sequence: Sequence::new([config.death_pop_duration, config.death_fade_duration]),
            start: scale,
            peak: scale * config.death_pop_scale_multiplier,
        }
    }

    fn advance(&mut self, dt: f32) -> (f32, f32) {
        self.sequence.advance(dt);
        let t = self.sequence.progress();
        match self.sequence.phase() {
            0 => (lerp(self.start, self.peak, t), 1.0),
            1 => (self.peak, lerp(1.0, 0.0, t)),
            _ => (self.peak, 0.0),
        }
    }

    fn is_finished(&self) -> bool {
        self.sequence.is_finished()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PreyState {
    Wander,
    Pulse(PulseAnimation),
    Dying(DeathAnimation),
}

impl AgentState for PreyState {
    fn name(&self) -> &'static str {
        match self {
            Self::Wander => "Wander",
            Self::Pulse(_) => "Pulse",
            Self::Dying(_) => "Dying",
        }
    }

    fn is_terminal(&self) -> bool {
        matches!(self, Self::Dying(_))
    }
}

/// Slack for f32 drift when a shrink lands on the floor
const FLOOR_EPSILON: f32 = 1e-4;

/// Shrink by `amount`, never below `floor`.
///
/// Accumulated rounding leaves the scale a hair above the floor on the frame
/// it should arrive, so anything that close snaps onto it.
fn shrink(scale: f32, amount: f32, floor: f32) -> f32 {
    let scale = scale - amount;
    if scale - floor <= FLOOR_EPSILON {
        floor
    } else {
        scale
    }
}

// ============================================================================
// Agent
// ============================================================================

/// Prey behavior component
#[derive(Debug, Clone)]
pub struct Prey {
    fsm: StateMachine<PreyState>,
    wander: Wander,
    pulse_cooldown: Countdown,
    /// Color at full life, rolled once at spawn
    base_color: Vec4,
    /// Opacity; only drops while fading out
    alpha: f32,
}

impl Prey {
    pub fn state(&self) -> &PreyState {
        self.fsm.current()
    }

    pub fn is_pulsing(&self) -> bool {
        matches!(self.fsm.current(), PreyState::Pulse(_))
    }

    pub fn is_dying(&self) -> bool {
        matches!(self.fsm.current(), PreyState::Dying(_))
    }

    pub fn base_color(&self) -> Vec4 {
        self.base_color
    }

    /// Current heading
    pub fn direction(&self) -> Vec2 {
        self.wander.direction()
    }

    pub fn pulse_cooldown(&self) -> f32 {
        self.pulse_cooldown.remaining()
    }

    fn can_pulse(&self) -> bool {
        matches!(self.fsm.current(), PreyState::Wander) && self.pulse_cooldown.is_expired()
    }

    /// Faded toward `dead_color` as the prey shrinks toward its death floor
    fn color(&self, config: &PreyConfig, scale: f32) -> Vec4 {
        let life = inverse_lerp(config.min_scale_before_death, config.start_scale, scale);
        let mut color = lerp_color(config.dead_color, self.base_color, life);
        color.w = if self.is_dying() { self.alpha } else { 1.0 };
        color
    }
}

impl Agent for Prey {
    type Config = PreyConfig;

    const SPECIES: Species = Species::Prey;

    fn spawn(
        config: &PreyConfig,
        position: Vec2,
        rng: &mut SimRng,
    ) -> (Self, Transform, Tint, Collider) {
        let base_color = hsv_to_rgb(
            uniform(rng, config.base_hue),
            uniform(rng, config.base_saturation),
            uniform(rng, config.base_value),
        );
        let prey = Self {
            fsm: StateMachine::new(PreyState::Wander),
            wander: Wander::new(config.direction_interval, rng),
            pulse_cooldown: Countdown::expired(),
            base_color,
            alpha: 1.0,
        };
        let transform = Transform::from_position(position).with_scale(config.start_scale);
        let tint = Tint(prey.color(config, config.start_scale));
        (prey, transform, tint, Collider::new(config.collider_radius))
    }

    fn tick(
        &mut self,
        config: &PreyConfig,
        transform: &mut Transform,
        tint: &mut Tint,
        env: &mut Env<'_>,
    ) -> Outcome {
        let dt = env.dt;
        let mut outcome = Outcome::live();
        self.fsm.tick(dt);
        self.pulse_cooldown.tick(dt);

        let mut touched_prey = false;
        for contact in env.contacts {
            match contact.tag {
                ContactTag::BoundaryWall => {
                    self.wander.bounce(contact.normal, env.rng);
                }
                ContactTag::Agent(Species::Prey) => touched_prey = true,
                ContactTag::Agent(_) => {}
            }
        }
        if touched_prey && self.can_pulse() {
            let pulse = PulseAnimation::new(transform.scale, config);
            outcome.record(self.fsm.transition(PreyState::Pulse(pulse)));
        }

        let transition = match self.fsm.current_mut() {
            PreyState::Wander => {
                transform.scale = shrink(
                    transform.scale,
                    config.shrink_rate_per_second * dt,
                    config.min_scale_before_death,
                );
                transform.translate(self.wander.step(config.move_speed, dt, env.rng));
                Transition::None
            }
            PreyState::Pulse(pulse) => {
                transform.scale = pulse.advance(dt);
                if pulse.is_finished() {
                    self.pulse_cooldown.reset(config.pulse_cooldown_duration);
                    Transition::To(PreyState::Wander)
                } else {
                    Transition::None
                }
            }
            PreyState::Dying(death) => {
                let (scale, alpha) = death.advance(dt);
                transform.scale = scale;
                self.alpha = alpha;
                if death.is_finished() {
                    outcome.fate = Fate::Destroy(DestroyCause::Faded);
                }
                Transition::None
            }
        };
        outcome.record(self.fsm.apply(transition));

        if !self.is_dying() && transform.scale <= config.min_scale_before_death {
            let death = DeathAnimation::new(transform.scale, config);
            self.alpha = 1.0;
            outcome.record(self.fsm.transition(PreyState::Dying(death)));
        }

        tint.0 = self.color(config, transform.scale);
        outcome
    }

    fn state_name(&self) -> &'static str {
        self.fsm.current_state_name()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{Contact, ContactPhase};
    use crate::species::testing::Harness;

    fn prey_contact() -> Contact {
        Contact {
            other: None,
            tag: ContactTag::Agent(Species::Prey),
            phase: ContactPhase::Stay,
            normal: Vec2::X,
        }
    }

    fn spawn(harness: &mut Harness, config: &PreyConfig) -> (Prey, Transform, Tint) {
        let (prey, transform, tint, _) = Prey::spawn(config, Vec2::ZERO, &mut harness.rng);
        (prey, transform, tint)
    }

    #[test]
    fn test_prey_spawns_wandering_at_full_color() {
        let mut harness = Harness::new(1);
        let config = PreyConfig::default();
        let (prey, transform, tint) = spawn(&mut harness, &config);

        assert_eq!(prey.state_name(), "Wander");
        assert_eq!(transform.scale, config.start_scale);
        assert_eq!(tint.0, prey.base_color());
        assert_eq!(tint.alpha(), 1.0);
    }

    /// Ticks until the prey starts dying, with no contacts
    fn ticks_until_dying(seed: u64, dt: f32) -> u32 {
        let mut harness = Harness::new(seed);
        let config = PreyConfig::default();
        let (mut prey, mut transform, mut tint) = spawn(&mut harness, &config);
        let mut ticks = 0;
        while !prey.is_dying() {
            let before = transform.scale;
            prey.tick(&config, &mut transform, &mut tint, &mut harness.env(dt, &[]));
            assert!(transform.scale <= before, "scale must not grow while wandering");
            assert!(transform.scale >= config.min_scale_before_death);
            ticks += 1;
            assert!(ticks <= 10_000, "prey never reached its death floor");
        }
        ticks
    }

    #[test]
    fn test_prey_reaches_death_floor_after_35_seconds() {
        assert_eq!(ticks_until_dying(2, 0.25), 140);
        assert_eq!(ticks_until_dying(2, 1.0), 35);
        assert_eq!(ticks_until_dying(2, 0.5), 70);
    }

    #[test]
    fn test_shrink_snaps_onto_floor() {
        assert_eq!(shrink(0.300_01, 0.0, 0.3), 0.3);
        assert_eq!(shrink(0.305, 0.005, 0.3), 0.3);
        assert!((shrink(0.31, 0.005, 0.3) - 0.305).abs() < 1e-6);
        assert_eq!(shrink(0.301, 0.01, 0.3), 0.3);
    }

    #[test]
    fn test_prey_pulse_ramps_holds_and_settles() {
        let mut harness = Harness::new(3);
        let config = PreyConfig {
            shrink_rate_per_second: 0.0,
            ..Default::default()
        };
        let (mut prey, mut transform, mut tint) = spawn(&mut harness, &config);
        let contacts = [prey_contact()];

        let outcome = prey.tick(&config, &mut transform, &mut tint, &mut harness.env(0.0, &contacts));
        assert!(prey.is_pulsing());
        assert_eq!(outcome.changes[0].to, "Pulse");

        // End of ramp up: at peak
        prey.tick(&config, &mut transform, &mut tint, &mut harness.env(0.15, &[]));
        assert!((transform.scale - 3.0).abs() < 1e-4);

        // Holding
        prey.tick(&config, &mut transform, &mut tint, &mut harness.env(0.05, &[]));
        assert!((transform.scale - 3.0).abs() < 1e-4);

        // Finish: settles at start + boost, back to wander with cooldown armed
        let outcome = prey.tick(&config, &mut transform, &mut tint, &mut harness.env(1.0, &[]));
        assert_eq!(prey.state_name(), "Wander");
        assert_eq!(outcome.changes[0].to, "Wander");
        assert!((transform.scale - 1.05).abs() < 1e-6);
        assert!((prey.pulse_cooldown() - config.pulse_cooldown_duration).abs() < 1e-6);
    }

    #[test]
    fn test_prey_pulse_respects_cooldown() {
        let mut harness = Harness::new(4);
        let config = PreyConfig::default();
        let (mut prey, mut transform, mut tint) = spawn(&mut harness, &config);
        let contacts = [prey_contact()];
        let dt = 0.05;

        let mut time = 0.0_f32;
        let mut last_pulse_end = None;
        for _ in 0..200 {
            let outcome = prey.tick(&config, &mut transform, &mut tint, &mut harness.env(dt, &contacts));
            time += dt;
            for change in &outcome.changes {
                if change.to == "Pulse" {
                    if let Some(end) = last_pulse_end {
                        let gap: f32 = time - end;
                        assert!(
                            gap >= config.pulse_cooldown_duration - 1e-3,
                            "pulse restarted after only {gap}s"
                        );
                    }
                }
                if change.from == "Pulse" && change.to == "Wander" {
                    last_pulse_end = Some(time);
                }
            }
        }
        assert!(last_pulse_end.is_some(), "constant contact should pulse at least once");
    }

    #[test]
    fn test_prey_dying_is_terminal_and_fades_out() {
        let mut harness = Harness::new(5);
        let config = PreyConfig::default();
        let (mut prey, mut transform, mut tint) = spawn(&mut harness, &config);
        transform.scale = config.min_scale_before_death;

        prey.tick(&config, &mut transform, &mut tint, &mut harness.env(0.0, &[]));
        assert!(prey.is_dying());

        let contacts = [prey_contact()];
        let mut last_alpha = 1.0;
        let mut destroyed = false;
        for _ in 0..20 {
            let outcome = prey.tick(&config, &mut transform, &mut tint, &mut harness.env(0.05, &contacts));
            assert!(prey.is_dying(), "dying must never return to wander or pulse");
            assert!(tint.alpha() <= last_alpha);
            last_alpha = tint.alpha();
            if outcome.is_destroyed() {
                assert_eq!(outcome.fate, Fate::Destroy(DestroyCause::Faded));
                destroyed = true;
                break;
            }
        }
        assert!(destroyed);
        assert!((transform.scale - 0.6).abs() < 1e-5, "popped to floor x 2");
        assert_eq!(tint.alpha(), 0.0);
    }

    #[test]
    fn test_prey_color_dims_with_scale() {
        let mut harness = Harness::new(6);
        let config = PreyConfig::default();
        let (prey, _, _) = spawn(&mut harness, &config);

        let at_floor = prey.color(&config, config.min_scale_before_death);
        assert!((at_floor - config.dead_color).abs().max_element() < 1e-6);

        let halfway = prey.color(&config, 0.65);
        let expected = config.dead_color.lerp(prey.base_color(), 0.5);
        assert!((halfway.truncate() - expected.truncate()).abs().max_element() < 1e-5);
        assert_eq!(halfway.w, 1.0);
    }

    #[test]
    fn test_prey_turns_back_from_wall() {
        let mut harness = Harness::new(7);
        let config = PreyConfig::default();
        let (mut prey, mut transform, mut tint) = spawn(&mut harness, &config);
        prey.wander.set_direction(Vec2::X);

        let wall = [Contact {
            other: None,
            tag: ContactTag::BoundaryWall,
            phase: ContactPhase::Enter,
            normal: Vec2::X,
        }];
        prey.tick(&config, &mut transform, &mut tint, &mut harness.env(0.1, &wall));

        assert_eq!(prey.direction(), -Vec2::X);
        assert!(transform.position.x < 0.0);
    }
}
