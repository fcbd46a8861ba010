//! Core Engine struct and main simulation loop

use std::time::Instant;

use crate::core::Time;
use crate::core::debug::DebugInfo;
use crate::core::events::EventQueue;
use crate::core::random::{SimRng, sim_rng};
use crate::ecs::World;
use crate::input::Input;

/// Engine configuration
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Run title, shown in logs
    pub title: String,
    /// Seconds simulated per step
    pub fixed_timestep: f32,
    /// Simulated seconds to run for (`None` until the game quits)
    pub duration: Option<f32>,
    /// Simulated seconds between population reports (0 disables them)
    pub report_interval: f32,
    /// RNG seed (`None` seeds from entropy)
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            title: String::from("Ecosystem"),
            fixed_timestep: 1.0 / 60.0,
            duration: None,
            report_interval: 5.0,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Create a new config with a title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set seconds per step
    pub fn with_timestep(mut self, seconds: f32) -> Self {
        self.fixed_timestep = seconds;
        self
    }

    /// Stop after this many simulated seconds
    pub fn with_duration(mut self, seconds: f32) -> Self {
        self.duration = Some(seconds);
        self
    }

    /// Set the population report interval
    pub fn with_report_interval(mut self, seconds: f32) -> Self {
        self.report_interval = seconds;
        self
    }

    /// Seed the simulation RNG
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check that the loop can run with these settings
    ///
    /// # Errors
    ///
    /// Returns the first setting the engine cannot run with
    pub fn validate(&self) -> Result<(), EngineError> {
        if !(self.fixed_timestep.is_finite() && self.fixed_timestep > 0.0) {
            return Err(EngineError::InvalidTimestep(self.fixed_timestep));
        }
        if let Some(duration) = self.duration {
            if !(duration.is_finite() && duration >= 0.0) {
                return Err(EngineError::InvalidDuration(duration));
            }
        }
        if !(self.report_interval.is_finite() && self.report_interval >= 0.0) {
            return Err(EngineError::InvalidReportInterval(self.report_interval));
        }
        Ok(())
    }
}

/// Game trait that users implement
pub trait Game: 'static {
    /// Called once before the first step
    fn init(&mut self, engine: &mut EngineContext);

    /// Called every step for simulation updates
    fn update(&mut self, engine: &mut EngineContext);

    /// Called when the run ends
    fn shutdown(&mut self, _engine: &mut EngineContext) {}
}

/// Context passed to game callbacks
pub struct EngineContext {
    /// Time tracking
    pub time: Time,
    /// Input state
    pub input: Input,
    /// ECS world
    pub world: World,
    /// Lifecycle events, readable one step after they are pushed
    pub events: EventQueue,
    /// Debug information and stats
    pub debug: DebugInfo,
    /// Simulation random source
    pub rng: SimRng,
    /// Should the engine quit
    should_quit: bool,
}

impl EngineContext {
    /// Fresh context at time zero; `seed` as in [`EngineConfig::seed`]
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            time: Time::new(),
            input: Input::new(),
            world: World::new(),
            events: EventQueue::new(),
            debug: DebugInfo::new(),
            rng: sim_rng(seed),
            should_quit: false,
        }
    }

    /// Request engine shutdown
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Check if engine should quit
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}

/// Main engine struct
pub struct Engine<G: Game> {
    config: EngineConfig,
    game: G,
    context: EngineContext,
    initialized: bool,
    /// Simulated time of the next population report
    next_report: f64,
}

impl<G: Game> Engine<G> {
    /// Create a new engine with the given game
    pub fn new(config: EngineConfig, game: G) -> Self {
        let context = EngineContext::new(config.seed);
        let next_report = f64::from(config.report_interval);
        Self {
            config,
            game,
            context,
            initialized: false,
            next_report,
        }
    }

    fn init(&mut self) {
        if !self.initialized {
            self.game.init(&mut self.context);
            self.initialized = true;
            log::info!("Engine initialized successfully");
        }
    }

    /// Advance the simulation by one fixed step
    pub fn step(&mut self) {
        self.init();
        let started = Instant::now();

        // Update time
        self.context.time.advance(self.config.fixed_timestep);

        // Last step's events become readable
        self.context.events.swap();
        self.context.debug.record_events(self.context.events.iter());

        // Update game logic
        self.game.update(&mut self.context);

        // Clear per-frame input state
        self.context.input.update();

        self.context.debug.record_step(started.elapsed());
        self.report();
    }

    fn report(&mut self) {
        if self.config.report_interval <= 0.0 {
            return;
        }
        let elapsed = self.context.time.elapsed_seconds();
        if elapsed >= self.next_report {
            for line in self.context.debug.get_all_lines() {
                log::info!("[{elapsed:.1}s] {line}");
            }
            self.next_report += f64::from(self.config.report_interval);
        }
    }

    fn is_done(&self) -> bool {
        if self.context.should_quit() {
            return true;
        }
        match self.config.duration {
            // Half a step of slack absorbs float drift in the clock
            Some(duration) => {
                self.context.time.elapsed_seconds() + f64::from(self.config.fixed_timestep) / 2.0
                    >= f64::from(duration)
            }
            None => false,
        }
    }

    /// Run until the configured duration elapses or the game quits
    ///
    /// # Errors
    ///
    /// Returns an error if the engine config is invalid
    pub fn run(&mut self) -> Result<(), EngineError> {
        let _ = env_logger::try_init();
        self.config.validate()?;
        log::info!("Starting engine: {}", self.config.title);

        self.init();
        while !self.is_done() {
            self.step();
        }

        // Fold the final step's events into the totals
        self.context.events.swap();
        self.context.debug.record_events(self.context.events.iter());

        log::info!("Shutting down after {:.1}s", self.context.time.elapsed_seconds());
        self.game.shutdown(&mut self.context);
        log::info!("{}", self.context.debug.population.format_stats());
        Ok(())
    }

    /// Engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The shared context
    pub fn context(&self) -> &EngineContext {
        &self.context
    }

    /// The shared context, mutably (for feeding input between steps)
    pub fn context_mut(&mut self) -> &mut EngineContext {
        &mut self.context
    }

    /// The game being run
    pub fn game(&self) -> &G {
        &self.game
    }
}

/// Errors that stop the engine from running
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Timestep is not a positive number
    InvalidTimestep(f32),
    /// Duration is negative or not a number
    InvalidDuration(f32),
    /// Report interval is negative or not a number
    InvalidReportInterval(f32),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTimestep(v) => write!(f, "Invalid timestep: {v} (must be > 0)"),
            Self::InvalidDuration(v) => write!(f, "Invalid duration: {v} (must be >= 0)"),
            Self::InvalidReportInterval(v) => {
                write!(f, "Invalid report interval: {v} (must be >= 0)")
            }
        }
    }
}

impl std::error::Error for EngineError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counter {
        inits: u32,
        updates: u32,
        shutdowns: u32,
        quit_after: Option<u32>,
    }

    impl Game for Counter {
        fn init(&mut self, _engine: &mut EngineContext) {
            self.inits += 1;
        }

        fn update(&mut self, engine: &mut EngineContext) {
            self.updates += 1;
            if self.quit_after == Some(self.updates) {
                engine.quit();
            }
        }

        fn shutdown(&mut self, _engine: &mut EngineContext) {
            self.shutdowns += 1;
        }
    }

    #[test]
    fn test_run_for_duration() {
        let config = EngineConfig::default()
            .with_timestep(0.1)
            .with_duration(1.0)
            .with_seed(1);
        let mut engine = Engine::new(config, Counter::default());
        engine.run().unwrap();

        assert_eq!(engine.game().inits, 1);
        assert_eq!(engine.game().updates, 10);
        assert_eq!(engine.game().shutdowns, 1);
        assert_eq!(engine.context().time.frame_count(), 10);
    }

    #[test]
    fn test_quit_stops_run() {
        let game = Counter {
            quit_after: Some(3),
            ..Default::default()
        };
        let mut engine = Engine::new(EngineConfig::default(), game);
        engine.run().unwrap();

        assert_eq!(engine.game().updates, 3);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut engine = Engine::new(
            EngineConfig::default().with_timestep(0.0),
            Counter::default(),
        );
        assert_eq!(engine.run(), Err(EngineError::InvalidTimestep(0.0)));
        assert_eq!(engine.game().inits, 0);

        let config = EngineConfig::default().with_duration(-1.0);
        assert_eq!(config.validate(), Err(EngineError::InvalidDuration(-1.0)));
    }

    #[test]
    fn test_step_clears_input_flags() {
        let mut engine = Engine::new(EngineConfig::default(), Counter::default());
        engine.context_mut().input.press_flash();
        engine.step();

        assert!(!engine.context().input.is_flash_just_pressed());
        assert_eq!(engine.game().inits, 1);
    }
}
