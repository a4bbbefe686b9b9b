//! Round orchestration
//!
//! Ties the pieces together for one captcha round:
//! - generated token values placed as square tokens in the arena
//! - the craft collecting tokens it overlaps into the `a + b = c` slots
//! - checking the equation once all slots are filled
//! - the single completion notification
//!
//! `Round` is the gameplay context the scheduler's callbacks run against.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::actor::{ActorConfig, KinematicActor, SteerOutcome};
use super::bounds::Rect;
use super::scheduler::{EventScheduler, ListenerId, Trigger};
use super::tokens;
use crate::consts::{COMPLETION_MESSAGE, EQUATION_SLOTS, PLACEMENT_ATTEMPTS};
use crate::error::RoundError;
use crate::platform::{CompletionSink, KeyCode};
use crate::settings::Settings;

/// A collectible token
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub id: u32,
    pub value: u32,
    /// Footprint, arena-local
    pub bounds: Rect,
}

/// What a round update did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    /// Nothing collected
    Playing,
    /// A token went into the given slot
    Collected { value: u32, slot: usize },
    /// Equation solved; the round is over
    Solved,
    /// Equation wrong; the round restarted with new tokens
    Wrong,
}

/// Listener ids for the installed controls
#[derive(Debug, Clone, Copy)]
pub struct Controls {
    pub round_tick: ListenerId,
    pub turn_left: ListenerId,
    pub turn_right: ListenerId,
    pub thrust: ListenerId,
    pub drag: ListenerId,
}

pub struct Round {
    settings: Settings,
    rng: Pcg32,
    actor: KinematicActor,
    /// Values as generated, in generation order
    values: Vec<u32>,
    tokens: Vec<Token>,
    slots: Vec<u32>,
    /// Top-left of the arena in page coordinates
    arena_origin: Vec2,
    completed: bool,
    restarts: u32,
    last_outcome: RoundOutcome,
    next_token_id: u32,
    sink: Box<dyn CompletionSink>,
}

impl Round {
    pub fn new(
        settings: Settings,
        seed: u64,
        arena_origin: Vec2,
        sink: Box<dyn CompletionSink>,
    ) -> Result<Self, RoundError> {
        let mut round = Self {
            actor: KinematicActor::new(ActorConfig::from_settings(&settings)),
            rng: Pcg32::seed_from_u64(seed),
            settings,
            values: Vec::new(),
            tokens: Vec::new(),
            slots: Vec::with_capacity(EQUATION_SLOTS),
            arena_origin,
            completed: false,
            restarts: 0,
            last_outcome: RoundOutcome::Playing,
            next_token_id: 1,
            sink,
        };
        round.deal()?;
        log::info!("Round started with seed {}: {:?}", seed, round.values);
        Ok(round)
    }

    /// Fresh values and placement, craft back at the start
    ///
    /// Everything is built aside and committed only once every token is
    /// placed; on error the round is left as it was.
    fn deal(&mut self) -> Result<(), RoundError> {
        let mut actor = self.actor.clone();
        actor.reset();
        let craft = actor.bounds();

        let values = tokens::generate(
            &mut self.rng,
            self.settings.token_count,
            self.settings.token_bound,
            self.settings.max_attempts,
        )?;
        let mut dealt: Vec<Token> = Vec::with_capacity(values.len());
        for (id, &value) in (self.next_token_id..).zip(&values) {
            let bounds = self.place_token(value, craft, &dealt)?;
            dealt.push(Token { id, value, bounds });
        }

        self.next_token_id += dealt.len() as u32;
        self.actor = actor;
        self.values = values;
        self.tokens = dealt;
        self.slots.clear();
        Ok(())
    }

    /// Random spot clear of the craft (with a token's width of margin) and
    /// every token placed so far
    fn place_token(
        &mut self,
        value: u32,
        craft: Rect,
        placed: &[Token],
    ) -> Result<Rect, RoundError> {
        let size = Vec2::splat(self.settings.token_size);
        let arena = self.settings.arena_size();
        let keep_out = Rect::new(craft.min - size, craft.max + size);

        // One pixel clear of every edge
        let max = arena - size - Vec2::ONE;
        if max.x <= 1.0 || max.y <= 1.0 {
            return Err(RoundError::Placement { value, attempts: 0 });
        }

        for _ in 0..PLACEMENT_ATTEMPTS {
            let origin = Vec2::new(
                self.rng.random_range(1.0..max.x),
                self.rng.random_range(1.0..max.y),
            );
            let candidate = Rect::from_origin_size(origin, size);
            if candidate.intersects(&keep_out)
                || placed.iter().any(|t| t.bounds.intersects(&candidate))
            {
                continue;
            }
            return Ok(candidate);
        }
        Err(RoundError::Placement {
            value,
            attempts: PLACEMENT_ATTEMPTS,
        })
    }

    /// Start over with new tokens (the completion flag survives)
    pub fn restart(&mut self) -> Result<(), RoundError> {
        self.deal()?;
        self.restarts += 1;
        log::info!("Round restarted ({}): {:?}", self.restarts, self.values);
        Ok(())
    }

    /// One round tick: collect the first token the craft overlaps and judge
    /// the equation once the slots are full
    pub fn update(&mut self) -> Result<RoundOutcome, RoundError> {
        if self.completed {
            return Ok(RoundOutcome::Solved);
        }
        // Full slots only survive a restart that failed; judge again
        if self.slots.len() >= EQUATION_SLOTS {
            return self.judge();
        }

        let craft = self.actor.bounds();
        let Some(idx) = self.tokens.iter().position(|t| t.bounds.intersects(&craft)) else {
            return Ok(RoundOutcome::Playing);
        };

        let token = self.tokens.remove(idx);
        self.slots.push(token.value);
        let slot = self.slots.len() - 1;
        log::info!("Collected {} into slot {}", token.value, slot);

        if self.slots.len() < EQUATION_SLOTS {
            return Ok(RoundOutcome::Collected {
                value: token.value,
                slot,
            });
        }
        self.judge()
    }

    fn judge(&mut self) -> Result<RoundOutcome, RoundError> {
        let (a, b, c) = (self.slots[0], self.slots[1], self.slots[2]);
        if u64::from(a) + u64::from(b) == u64::from(c) {
            log::info!("Solved {} + {} = {}", a, b, c);
            self.complete();
            Ok(RoundOutcome::Solved)
        } else {
            log::info!("Wrong: {} + {} != {}", a, b, c);
            self.restart()?;
            Ok(RoundOutcome::Wrong)
        }
    }

    /// Notify the host, once
    fn complete(&mut self) {
        if self.completed {
            return;
        }
        self.completed = true;
        self.sink.notify(COMPLETION_MESSAGE);
    }

    /// Steer toward a page-coordinate contact point
    pub fn steer(&mut self, page_pos: Vec2) -> SteerOutcome {
        self.actor.steer_toward(page_pos - self.arena_origin)
    }

    pub fn actor(&self) -> &KinematicActor {
        &self.actor
    }

    pub fn actor_mut(&mut self) -> &mut KinematicActor {
        &mut self.actor
    }

    pub fn values(&self) -> &[u32] {
        &self.values
    }

    /// Tokens still in the arena
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Collected values, in slot order
    pub fn slots(&self) -> &[u32] {
        &self.slots
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn restarts(&self) -> u32 {
        self.restarts
    }

    pub fn last_outcome(&self) -> RoundOutcome {
        self.last_outcome
    }

    /// Wire the round into a scheduler: round tick, arrow keys, drag steering
    ///
    /// Touch contacts share the pointer track, so one pointer listener covers
    /// both.
    pub fn install_controls(scheduler: &mut EventScheduler<Round>) -> Controls {
        let round_tick = scheduler.register(Trigger::Tick, true, |round: &mut Round, _, _| {
            match round.update() {
                Ok(outcome) => round.last_outcome = outcome,
                // The round is unchanged; the restart is retried next tick
                Err(e) => log::warn!("Restart failed: {}", e),
            }
        });
        let turn_left = scheduler.register(
            Trigger::Key(KeyCode::ARROW_LEFT),
            true,
            |round: &mut Round, _, _| {
                let step = round.actor.min_turn_step();
                round.actor.rotate(-step);
            },
        );
        let turn_right = scheduler.register(
            Trigger::Key(KeyCode::ARROW_RIGHT),
            true,
            |round: &mut Round, _, _| {
                let step = round.actor.min_turn_step();
                round.actor.rotate(step);
            },
        );
        let thrust = scheduler.register(
            Trigger::Key(KeyCode::ARROW_UP),
            true,
            |round: &mut Round, _, _| {
                let distance = round.actor.min_thrust_distance();
                round.actor.move_forward(distance);
            },
        );
        let drag = scheduler.register(Trigger::Pointer, true, |round: &mut Round, _, fired| {
            if let Some(pos) = fired.position {
                round.steer(pos);
            }
        });

        Controls {
            round_tick,
            turn_left,
            turn_right,
            thrust,
            drag,
        }
    }
}
