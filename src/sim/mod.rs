//! Deterministic game core
//!
//! Everything gameplay-related lives here. This module must stay
//! deterministic:
//! - Tick-driven only (no wall clock)
//! - Seeded RNG only
//! - No rendering or DOM dependencies

pub mod actor;
pub mod bounds;
pub mod clock;
pub mod round;
pub mod scheduler;
pub mod tokens;

pub use actor::{ActorConfig, ActorPose, KinematicActor, SteerOutcome};
pub use bounds::Rect;
pub use clock::TickClock;
pub use round::{Controls, Round, RoundOutcome, Token};
pub use scheduler::{
    Dispatch, EventClass, EventScheduler, Fired, ListenerId, SchedulerConfig, SchedulerPhase,
    Trigger,
};
pub use tokens::{count_addition_triples, find_solution, generate, is_valid_token_set};
