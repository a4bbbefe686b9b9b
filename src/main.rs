//! Token Pilot entry point
//!
//! Handles platform-specific initialization and runs the tick loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;

    use token_pilot::Settings;
    use token_pilot::platform::web::{DomInputSource, ParentFrameNotifier, arena_rect};
    use token_pilot::sim::{EventScheduler, Round, SchedulerConfig, TickClock};

    /// Id of the element the arena is laid out in
    const ARENA_ID: &str = "arena";

    /// Game instance holding all state
    struct Game {
        scheduler: EventScheduler<Round>,
        round: Round,
        clock: TickClock,
        last_time: f64,
        /// Kept alive for its DOM listeners
        _input: DomInputSource,
    }

    impl Game {
        /// Run whatever ticks this frame owes
        fn update(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                time - self.last_time
            } else {
                0.0
            };
            self.last_time = time;

            for _ in 0..self.clock.advance(dt) {
                self.scheduler.tick(&mut self.round);
            }
        }
    }

    pub fn run() -> Result<(), Box<dyn std::error::Error>> {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Token Pilot starting...");

        let settings = Settings::load(ARENA_ID);
        let arena = arena_rect(ARENA_ID)?;
        let seed = settings.seed.unwrap_or(js_sys::Date::now() as u64);

        let round = Round::new(
            settings.clone(),
            seed,
            arena.min,
            Box::new(ParentFrameNotifier::new("*")),
        )?;

        let mut scheduler = EventScheduler::new(SchedulerConfig::from_settings(&settings, arena));
        let mut input = DomInputSource::new()?;
        scheduler.attach(&mut input)?;
        Round::install_controls(&mut scheduler);

        let game = Rc::new(RefCell::new(Game {
            scheduler,
            round,
            clock: TickClock::new(settings.tick_interval_ms),
            last_time: 0.0,
            _input: input,
        }));

        setup_auto_pause(game.clone());
        request_animation_frame(game);

        log::info!("Token Pilot running!");
        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        game.borrow_mut().update(time);
        request_animation_frame(game);
    }

    /// Pause while the tab is hidden; resume through the debounce window
    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        let document_clone = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let mut g = game.borrow_mut();
            if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                g.scheduler.pause();
                log::info!("Auto-paused (tab hidden)");
            } else {
                g.scheduler.resume();
                // Drop the time spent hidden
                g.last_time = 0.0;
            }
        });
        let _ = document
            .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_game::run() {
        log::error!("Token Pilot failed to start: {}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Token Pilot (native) starting...");
    log::info!("Native mode runs a scripted round - serve the wasm build for the real game");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);
    if let Err(e) = headless::run(seed) {
        log::error!("Scripted round failed: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Scripted round: drag the craft onto each token of the solution in turn
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use glam::Vec2;

    use token_pilot::Settings;
    use token_pilot::platform::{HostEvent, RecordingSink, ScriptedInput};
    use token_pilot::sim::{EventScheduler, Rect, Round, SchedulerConfig, Token, find_solution};

    const MAX_TICKS: u64 = 100_000;

    /// Page offset of the pretend arena element
    const ARENA_ORIGIN: Vec2 = Vec2::new(40.0, 120.0);

    /// How far past the token center the contact is held
    ///
    /// Aiming at the center itself lets the nose close in until every turn
    /// step swings the bearing by more than a step, and the craft spins.
    const OVERSHOOT: f32 = 40.0;

    /// Ticks between re-aims at the same token
    const REAIM_TICKS: u64 = 120;

    pub fn run(seed: u64) -> Result<u64, Box<dyn std::error::Error>> {
        let settings = Settings::default();
        let arena = Rect::from_origin_size(ARENA_ORIGIN, settings.arena_size());
        let sink = RecordingSink::new();

        let mut round = Round::new(settings.clone(), seed, ARENA_ORIGIN, Box::new(sink.clone()))?;
        let mut scheduler = EventScheduler::new(SchedulerConfig::from_settings(&settings, arena));
        let mut input = ScriptedInput::new();
        scheduler.attach(&mut input)?;
        Round::install_controls(&mut scheduler);

        let mut chasing = None;
        let mut aimed_at = 0;
        while !round.is_completed() && scheduler.ticks() < MAX_TICKS {
            if let Some(token) = next_target(&round) {
                if chasing != Some(token.id) || scheduler.ticks() >= aimed_at + REAIM_TICKS {
                    chasing = Some(token.id);
                    aimed_at = scheduler.ticks();
                    let aim = aim_point(round.actor().center(), token, settings.arena_size());
                    input.emit(HostEvent::PointerUp);
                    input.emit(HostEvent::PointerDown(ARENA_ORIGIN + aim));
                }
            }
            scheduler.tick(&mut round);
        }
        input.emit(HostEvent::PointerUp);
        scheduler.detach(&mut input);

        log::info!(
            "Finished after {} ticks, {} restarts, last outcome {:?}, notifications {:?}",
            scheduler.ticks(),
            round.restarts(),
            round.last_outcome(),
            sink.messages()
        );
        if !round.is_completed() {
            return Err(format!("round not solved within {} ticks", MAX_TICKS).into());
        }
        Ok(scheduler.ticks())
    }

    /// The token the next slot needs
    ///
    /// Once a wrong token has been picked up on the way the equation is lost;
    /// any token then fills the slots so the round restarts.
    fn next_target(round: &Round) -> Option<Token> {
        let tokens = round.tokens();
        let wanted = find_solution(round.values())
            .map(|(a, b, c)| [a, b, c][round.slots().len().min(2)])
            .and_then(|value| tokens.iter().find(|t| t.value == value));
        wanted.or_else(|| tokens.first()).copied()
    }

    /// Arena-local contact point: past the token along the line from the craft
    fn aim_point(craft: Vec2, token: Token, arena: Vec2) -> Vec2 {
        let center = token.bounds.center();
        let dir = (center - craft).normalize_or_zero();
        (center + dir * OVERSHOOT).clamp(Vec2::ONE, arena - Vec2::ONE)
    }

}
