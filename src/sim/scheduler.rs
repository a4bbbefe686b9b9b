//! Input/event scheduler
//!
//! Host input never reaches gameplay directly. Events are queued by an
//! [`InputSource`], drained at the start of each tick to arm or disarm
//! listeners and track the active contact point, and only then are callbacks
//! dispatched, on the tick timeline.
//!
//! Dispatch order for a running tick:
//! 1. every tick listener, in registration order
//! 2. every armed key/drag listener, from a snapshot taken before the pass
//!
//! Non-repeating tick listeners are removed after their first firing.
//! Non-repeating key/drag listeners fire once per press and stay registered.
//!
//! Callbacks get a [`Dispatch`] handle instead of the scheduler itself. Any
//! register/unregister/pause/resume made through it is queued and applied to
//! the live listener set once the pass completes.

use glam::Vec2;

use super::bounds::Rect;
use crate::error::PlatformError;
use crate::platform::{HostEvent, InputQueue, InputSource, KeyCode};
use crate::settings::Settings;

/// Listener id, unique for the lifetime of one scheduler
pub type ListenerId = u64;

/// Broad listener class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventClass {
    Key,
    Pointer,
    Touch,
    Tick,
}

/// What activates a listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    /// Every running tick
    Tick,
    /// While the given key is held
    Key(KeyCode),
    /// While a mouse or touch contact is held inside the arena
    Pointer,
    /// Same contact as `Pointer`; touch and mouse share one contact track
    Touch,
}

impl Trigger {
    pub fn class(self) -> EventClass {
        match self {
            Trigger::Tick => EventClass::Tick,
            Trigger::Key(_) => EventClass::Key,
            Trigger::Pointer => EventClass::Pointer,
            Trigger::Touch => EventClass::Touch,
        }
    }

    pub fn key_code(self) -> Option<KeyCode> {
        match self {
            Trigger::Key(code) => Some(code),
            _ => None,
        }
    }

    fn is_drag(self) -> bool {
        matches!(self, Trigger::Pointer | Trigger::Touch)
    }
}

/// Arguments handed to a firing callback
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fired {
    pub id: ListenerId,
    pub class: EventClass,
    pub code: Option<KeyCode>,
    /// Tracked contact position (page coordinates), if a contact is held
    pub position: Option<Vec2>,
}

/// Listener callback: gameplay context, deferred scheduler access, firing info
pub type Callback<C> = Box<dyn FnMut(&mut C, &mut Dispatch<'_, C>, Fired)>;

struct Registration<C> {
    id: ListenerId,
    trigger: Trigger,
    repeating: bool,
    /// Activation marker for key/drag listeners
    armed: bool,
    /// One-shot key/drag listener already fired during the current press
    fired_this_press: bool,
    callback: Callback<C>,
}

impl<C> Registration<C> {
    fn new(id: ListenerId, trigger: Trigger, repeating: bool, callback: Callback<C>) -> Self {
        Self {
            id,
            trigger,
            repeating,
            armed: false,
            fired_this_press: false,
            callback,
        }
    }

    /// Arm unless a one-shot already fired during this press
    fn arm(&mut self) {
        if !self.fired_this_press {
            self.armed = true;
        }
    }

    /// Input released: disarm and allow the next press to arm again
    fn disarm(&mut self) {
        self.armed = false;
        self.fired_this_press = false;
    }
}

enum Pending<C> {
    Register(Registration<C>),
    Unregister(ListenerId),
    Pause,
    Resume,
}

/// Scheduler access from inside a callback
///
/// Ids returned by [`Dispatch::register`] are final; the listener itself goes
/// live once the current pass completes.
pub struct Dispatch<'a, C> {
    next_id: &'a mut ListenerId,
    pending: &'a mut Vec<Pending<C>>,
}

impl<C> Dispatch<'_, C> {
    pub fn register<F>(&mut self, trigger: Trigger, repeating: bool, callback: F) -> ListenerId
    where
        F: FnMut(&mut C, &mut Dispatch<'_, C>, Fired) + 'static,
    {
        let id = allocate_id(self.next_id);
        self.pending.push(Pending::Register(Registration::new(
            id,
            trigger,
            repeating,
            Box::new(callback),
        )));
        id
    }

    pub fn unregister(&mut self, id: ListenerId) {
        self.pending.push(Pending::Unregister(id));
    }

    pub fn pause(&mut self) {
        self.pending.push(Pending::Pause);
    }

    pub fn resume(&mut self) {
        self.pending.push(Pending::Resume);
    }
}

fn allocate_id(next_id: &mut ListenerId) -> ListenerId {
    let id = *next_id;
    *next_id += 1;
    id
}

/// Run state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerPhase {
    Running,
    Paused,
    /// Resumed but still inside the debounce window
    Resuming { remaining_ms: u32 },
}

/// Scheduler timing and arena
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SchedulerConfig {
    pub tick_interval_ms: u32,
    pub resume_debounce_ms: u32,
    /// Arena rectangle in page coordinates; contacts outside it are ignored
    pub arena: Rect,
}

impl SchedulerConfig {
    pub fn from_settings(settings: &Settings, arena: Rect) -> Self {
        Self {
            tick_interval_ms: settings.tick_interval_ms,
            resume_debounce_ms: settings.resume_debounce_ms,
            arena,
        }
    }
}

/// Tick-driven input scheduler over a gameplay context `C`
pub struct EventScheduler<C> {
    config: SchedulerConfig,
    registrations: Vec<Registration<C>>,
    next_id: ListenerId,
    phase: SchedulerPhase,
    /// Single tracked contact (mouse or one touch)
    contact: Option<Vec2>,
    queue: InputQueue,
    pending: Vec<Pending<C>>,
    ticks: u64,
}

impl<C> EventScheduler<C> {
    pub fn new(config: SchedulerConfig) -> Self {
        Self {
            config,
            registrations: Vec::new(),
            next_id: 1,
            phase: SchedulerPhase::Running,
            contact: None,
            queue: InputQueue::new(),
            pending: Vec::new(),
            ticks: 0,
        }
    }

    /// Subscribe to a host input source
    pub fn attach(&self, source: &mut dyn InputSource) -> Result<(), PlatformError> {
        source.subscribe(self.queue.clone())
    }

    pub fn detach(&self, source: &mut dyn InputSource) {
        source.unsubscribe();
    }

    pub fn register<F>(&mut self, trigger: Trigger, repeating: bool, callback: F) -> ListenerId
    where
        F: FnMut(&mut C, &mut Dispatch<'_, C>, Fired) + 'static,
    {
        let id = allocate_id(&mut self.next_id);
        self.registrations
            .push(Registration::new(id, trigger, repeating, Box::new(callback)));
        log::debug!("Registered listener {} ({:?}, repeating={})", id, trigger, repeating);
        id
    }

    /// Remove a listener; unknown ids are ignored
    pub fn unregister(&mut self, id: ListenerId) {
        self.registrations.retain(|r| r.id != id);
    }

    pub fn pause(&mut self) {
        if self.phase != SchedulerPhase::Paused {
            log::debug!("Scheduler paused");
        }
        self.phase = SchedulerPhase::Paused;
    }

    /// Leave the paused state through the debounce window
    ///
    /// Restarts the window when already resuming; no-op while running.
    pub fn resume(&mut self) {
        if self.phase == SchedulerPhase::Running {
            return;
        }
        self.phase = if self.config.resume_debounce_ms == 0 {
            SchedulerPhase::Running
        } else {
            SchedulerPhase::Resuming {
                remaining_ms: self.config.resume_debounce_ms,
            }
        };
        log::debug!("Scheduler resuming: {:?}", self.phase);
    }

    pub fn phase(&self) -> SchedulerPhase {
        self.phase
    }

    pub fn is_registered(&self, id: ListenerId) -> bool {
        self.registrations.iter().any(|r| r.id == id)
    }

    pub fn is_armed(&self, id: ListenerId) -> bool {
        self.registrations.iter().any(|r| r.id == id && r.armed)
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    /// Tracked contact position in page coordinates
    pub fn tracked_position(&self) -> Option<Vec2> {
        self.contact
    }

    /// Ticks processed so far, including suppressed ones
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Apply one host event to listener arming and contact tracking
    ///
    /// Runs regardless of the pause state.
    pub fn handle_event(&mut self, event: HostEvent) {
        match event {
            HostEvent::KeyDown(code) => {
                // Host key-repeat lands here too; armed listeners stay as they are
                for r in &mut self.registrations {
                    if r.trigger == Trigger::Key(code) {
                        r.arm();
                    }
                }
            }
            HostEvent::KeyUp(code) => {
                for r in &mut self.registrations {
                    if r.trigger == Trigger::Key(code) {
                        r.disarm();
                    }
                }
            }
            HostEvent::PointerDown(pos) => self.press(pos),
            HostEvent::TouchStart { pos, contacts } if contacts <= 1 => self.press(pos),
            HostEvent::PointerMove(pos) => self.drag(pos),
            HostEvent::TouchMove { pos, contacts } if contacts <= 1 => self.drag(pos),
            HostEvent::PointerUp | HostEvent::TouchEnd => self.release(),
            HostEvent::TouchStart { contacts, .. } | HostEvent::TouchMove { contacts, .. } => {
                log::trace!("Ignoring touch with {} contacts", contacts);
            }
        }
    }

    fn press(&mut self, pos: Vec2) {
        if self.contact.is_some() || !self.config.arena.contains(pos) {
            return;
        }
        self.contact = Some(pos);
        for r in &mut self.registrations {
            if r.trigger.is_drag() {
                r.arm();
            }
        }
    }

    fn drag(&mut self, pos: Vec2) {
        if self.contact.is_some() && self.config.arena.contains(pos) {
            self.contact = Some(pos);
        }
    }

    fn release(&mut self) {
        self.contact = None;
        for r in &mut self.registrations {
            if r.trigger.is_drag() {
                r.disarm();
            }
        }
    }

    /// Advance one tick: drain host input, then dispatch if running
    ///
    /// Returns how many callbacks fired.
    pub fn tick(&mut self, ctx: &mut C) -> usize {
        self.ticks += 1;
        for event in self.queue.drain() {
            self.handle_event(event);
        }

        match self.phase {
            SchedulerPhase::Paused => return 0,
            SchedulerPhase::Resuming { remaining_ms } => {
                let remaining_ms = remaining_ms.saturating_sub(self.config.tick_interval_ms.max(1));
                if remaining_ms > 0 {
                    self.phase = SchedulerPhase::Resuming { remaining_ms };
                    return 0;
                }
                // Window elapsed on this tick: it fires
                log::debug!("Scheduler running");
                self.phase = SchedulerPhase::Running;
            }
            SchedulerPhase::Running => {}
        }

        let tick_ids: Vec<ListenerId> = self
            .registrations
            .iter()
            .filter(|r| r.trigger == Trigger::Tick)
            .map(|r| r.id)
            .collect();
        let mut fired = self.run_pass(ctx, &tick_ids);

        // A tick listener may have paused us
        if self.phase != SchedulerPhase::Running {
            return fired;
        }

        let armed_ids: Vec<ListenerId> = self
            .registrations
            .iter()
            .filter(|r| r.trigger != Trigger::Tick && r.armed)
            .map(|r| r.id)
            .collect();
        fired += self.run_pass(ctx, &armed_ids);
        fired
    }

    fn run_pass(&mut self, ctx: &mut C, ids: &[ListenerId]) -> usize {
        let position = self.contact;
        let mut fired = 0;
        let mut spent = Vec::new();
        {
            let Self {
                registrations,
                next_id,
                pending,
                ..
            } = self;
            for &id in ids {
                let Some(reg) = registrations.iter_mut().find(|r| r.id == id) else {
                    continue;
                };
                let info = Fired {
                    id,
                    class: reg.trigger.class(),
                    code: reg.trigger.key_code(),
                    position,
                };
                let mut dispatch = Dispatch {
                    next_id: &mut *next_id,
                    pending: &mut *pending,
                };
                (reg.callback)(&mut *ctx, &mut dispatch, info);
                fired += 1;
                if reg.repeating {
                    continue;
                }
                if reg.trigger == Trigger::Tick {
                    spent.push(id);
                } else {
                    // One firing per press; re-arms on the next one
                    reg.armed = false;
                    reg.fired_this_press = true;
                }
            }
        }
        if !spent.is_empty() {
            self.registrations.retain(|r| !spent.contains(&r.id));
        }
        self.apply_pending();
        fired
    }

    fn apply_pending(&mut self) {
        for op in std::mem::take(&mut self.pending) {
            match op {
                Pending::Register(reg) => self.registrations.push(reg),
                Pending::Unregister(id) => self.unregister(id),
                Pending::Pause => self.pause(),
                Pending::Resume => self.resume(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::ScriptedInput;

    /// Records every firing
    #[derive(Default)]
    struct Log {
        fired: Vec<Fired>,
    }

    fn config(tick_interval_ms: u32, resume_debounce_ms: u32) -> SchedulerConfig {
        SchedulerConfig {
            tick_interval_ms,
            resume_debounce_ms,
            arena: Rect::new(Vec2::new(100.0, 100.0), Vec2::new(500.0, 400.0)),
        }
    }

    fn record(log: &mut Log, _: &mut Dispatch<'_, Log>, fired: Fired) {
        log.fired.push(fired);
    }

    #[test]
    fn test_ids_are_fresh_and_increasing() {
        let mut s = EventScheduler::<Log>::new(config(20, 0));
        let a = s.register(Trigger::Tick, true, record);
        let b = s.register(Trigger::Key(KeyCode::ARROW_UP), true, record);
        s.unregister(b);
        let c = s.register(Trigger::Pointer, true, record);
        assert!(a < b && b < c);
    }

    #[test]
    fn test_one_shot_tick_fires_once_and_is_removed() {
        let mut s = EventScheduler::new(config(20, 0));
        let mut log = Log::default();
        let id = s.register(Trigger::Tick, false, record);

        assert_eq!(s.tick(&mut log), 1);
        assert!(!s.is_registered(id));
        assert_eq!(s.tick(&mut log), 0);
        assert_eq!(log.fired.len(), 1);
    }

    #[test]
    fn test_repeating_tick_fires_every_tick() {
        let mut s = EventScheduler::new(config(20, 0));
        let mut log = Log::default();
        let id = s.register(Trigger::Tick, true, record);

        for _ in 0..3 {
            s.tick(&mut log);
        }
        assert_eq!(log.fired.len(), 3);
        assert!(s.is_registered(id));
    }

    #[test]
    fn test_tick_listeners_fire_in_registration_order() {
        let mut s = EventScheduler::new(config(20, 0));
        let mut log = Log::default();
        let ids: Vec<_> = (0..4).map(|_| s.register(Trigger::Tick, true, record)).collect();

        s.tick(&mut log);
        let order: Vec<_> = log.fired.iter().map(|f| f.id).collect();
        assert_eq!(order, ids);
    }

    #[test]
    fn test_unregister_unknown_id_is_ignored() {
        let mut s = EventScheduler::<Log>::new(config(20, 0));
        s.register(Trigger::Tick, true, record);
        s.unregister(999);
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn test_pause_then_resume_suppresses_debounce_window() {
        // 60ms window at 20ms per tick: three silent ticks
        let mut s = EventScheduler::new(config(20, 60));
        let mut log = Log::default();
        s.register(Trigger::Tick, true, record);

        s.pause();
        assert_eq!(s.tick(&mut log), 0);
        assert_eq!(s.tick(&mut log), 0);

        s.resume();
        let per_tick: Vec<usize> = (0..4).map(|_| s.tick(&mut log)).collect();
        assert_eq!(per_tick, vec![0, 0, 1, 1]);
        assert_eq!(s.phase(), SchedulerPhase::Running);
    }

    #[test]
    fn test_window_not_a_multiple_of_interval_rounds_up() {
        // 50ms at 20ms: elapsed on the third tick
        let mut s = EventScheduler::new(config(20, 50));
        let mut log = Log::default();
        s.register(Trigger::Tick, true, record);

        s.pause();
        s.resume();
        let per_tick: Vec<usize> = (0..3).map(|_| s.tick(&mut log)).collect();
        assert_eq!(per_tick, vec![0, 0, 1]);
    }

    #[test]
    fn test_resume_while_resuming_restarts_window() {
        let mut s = EventScheduler::new(config(20, 40));
        let mut log = Log::default();
        s.register(Trigger::Tick, true, record);

        s.pause();
        s.resume();
        s.tick(&mut log);
        assert_eq!(s.phase(), SchedulerPhase::Resuming { remaining_ms: 20 });
        s.resume();
        assert_eq!(s.phase(), SchedulerPhase::Resuming { remaining_ms: 40 });
        assert_eq!(s.tick(&mut log), 0);
        assert!(log.fired.is_empty());
        assert_eq!(s.tick(&mut log), 1);
    }

    #[test]
    fn test_pause_mid_resume_discards_countdown() {
        let mut s = EventScheduler::<Log>::new(config(20, 100));
        s.pause();
        s.resume();
        s.pause();
        assert_eq!(s.phase(), SchedulerPhase::Paused);
    }

    #[test]
    fn test_resume_while_running_is_noop() {
        let mut s = EventScheduler::<Log>::new(config(20, 100));
        s.resume();
        assert_eq!(s.phase(), SchedulerPhase::Running);
    }

    #[test]
    fn test_key_listener_fires_only_while_held() {
        let mut s = EventScheduler::new(config(20, 0));
        let mut input = ScriptedInput::new();
        s.attach(&mut input).unwrap();
        let mut log = Log::default();
        let id = s.register(Trigger::Key(KeyCode::ARROW_LEFT), true, record);

        s.tick(&mut log);
        assert!(log.fired.is_empty());

        input.emit(HostEvent::KeyDown(KeyCode::ARROW_LEFT));
        // Host key-repeat
        input.emit(HostEvent::KeyDown(KeyCode::ARROW_LEFT));
        input.emit(HostEvent::KeyDown(KeyCode::ARROW_RIGHT));
        assert_eq!(s.tick(&mut log), 1);
        assert_eq!(s.tick(&mut log), 1);
        assert_eq!(log.fired[0].code, Some(KeyCode::ARROW_LEFT));
        assert_eq!(log.fired[0].class, EventClass::Key);

        input.emit(HostEvent::KeyUp(KeyCode::ARROW_LEFT));
        assert_eq!(s.tick(&mut log), 0);
        assert!(s.is_registered(id));
        assert!(!s.is_armed(id));
    }

    #[test]
    fn test_input_is_observed_while_paused() {
        let mut s = EventScheduler::new(config(20, 0));
        let mut input = ScriptedInput::new();
        s.attach(&mut input).unwrap();
        let mut log = Log::default();
        let id = s.register(Trigger::Key(KeyCode::ARROW_UP), true, record);

        s.pause();
        input.emit(HostEvent::KeyDown(KeyCode::ARROW_UP));
        assert_eq!(s.tick(&mut log), 0);
        assert!(s.is_armed(id));

        s.resume();
        assert_eq!(s.tick(&mut log), 1);
    }

    #[test]
    fn test_drag_tracks_single_contact_inside_arena() {
        let mut s = EventScheduler::new(config(20, 0));
        let mut log = Log::default();
        let pointer = s.register(Trigger::Pointer, true, record);
        let touch = s.register(Trigger::Touch, true, record);

        // Outside the arena: nothing armed
        s.handle_event(HostEvent::PointerDown(Vec2::new(50.0, 50.0)));
        assert_eq!(s.tracked_position(), None);
        assert!(!s.is_armed(pointer));

        // Touch start arms both drag listeners
        s.handle_event(HostEvent::TouchStart {
            pos: Vec2::new(200.0, 200.0),
            contacts: 1,
        });
        assert!(s.is_armed(pointer) && s.is_armed(touch));

        // Second contact and out-of-bounds moves are ignored
        s.handle_event(HostEvent::TouchStart {
            pos: Vec2::new(300.0, 300.0),
            contacts: 2,
        });
        s.handle_event(HostEvent::TouchMove {
            pos: Vec2::new(310.0, 310.0),
            contacts: 2,
        });
        s.handle_event(HostEvent::PointerMove(Vec2::new(600.0, 200.0)));
        assert_eq!(s.tracked_position(), Some(Vec2::new(200.0, 200.0)));

        s.handle_event(HostEvent::TouchMove {
            pos: Vec2::new(250.0, 220.0),
            contacts: 1,
        });
        s.tick(&mut log);
        assert_eq!(log.fired.len(), 2);
        assert!(log.fired.iter().all(|f| f.position == Some(Vec2::new(250.0, 220.0))));

        s.handle_event(HostEvent::TouchEnd);
        assert_eq!(s.tracked_position(), None);
        assert_eq!(s.tick(&mut log), 0);
    }

    #[test]
    fn test_move_without_contact_is_ignored() {
        let mut s = EventScheduler::<Log>::new(config(20, 0));
        s.handle_event(HostEvent::PointerMove(Vec2::new(200.0, 200.0)));
        assert_eq!(s.tracked_position(), None);
    }

    #[test]
    fn test_one_shot_key_listener_fires_once_per_press() {
        let mut s = EventScheduler::new(config(20, 0));
        let mut log = Log::default();
        let id = s.register(Trigger::Key(KeyCode::ARROW_DOWN), false, record);

        s.handle_event(HostEvent::KeyDown(KeyCode::ARROW_DOWN));
        assert_eq!(s.tick(&mut log), 1);
        // Held, including host key-repeat
        s.handle_event(HostEvent::KeyDown(KeyCode::ARROW_DOWN));
        assert_eq!(s.tick(&mut log), 0);
        assert!(s.is_registered(id));
        assert!(!s.is_armed(id));

        s.handle_event(HostEvent::KeyUp(KeyCode::ARROW_DOWN));
        s.handle_event(HostEvent::KeyDown(KeyCode::ARROW_DOWN));
        assert_eq!(s.tick(&mut log), 1);
        assert_eq!(log.fired.len(), 2);
    }

    #[test]
    fn test_one_shot_drag_listener_fires_once_per_press() {
        let mut s = EventScheduler::new(config(20, 0));
        let mut log = Log::default();
        let id = s.register(Trigger::Pointer, false, record);

        s.handle_event(HostEvent::PointerDown(Vec2::new(200.0, 200.0)));
        assert_eq!(s.tick(&mut log), 1);
        s.handle_event(HostEvent::PointerMove(Vec2::new(220.0, 200.0)));
        assert_eq!(s.tick(&mut log), 0);

        s.handle_event(HostEvent::PointerUp);
        s.handle_event(HostEvent::PointerDown(Vec2::new(300.0, 250.0)));
        assert_eq!(s.tick(&mut log), 1);
        assert_eq!(log.fired[1].position, Some(Vec2::new(300.0, 250.0)));
        assert!(s.is_registered(id));
    }

    #[derive(Default)]
    struct Mutating {
        victim: Option<ListenerId>,
        spawned: Vec<ListenerId>,
        calls: Vec<&'static str>,
    }

    #[test]
    fn test_mutation_during_pass_is_deferred() {
        let mut s = EventScheduler::new(config(20, 0));
        let mut ctx = Mutating::default();

        s.register(Trigger::Tick, true, |ctx: &mut Mutating, d, _| {
            ctx.calls.push("first");
            if let Some(victim) = ctx.victim.take() {
                d.unregister(victim);
            }
            let id = d.register(Trigger::Tick, false, |ctx: &mut Mutating, _, _| {
                ctx.calls.push("spawned");
            });
            ctx.spawned.push(id);
        });
        let victim = s.register(Trigger::Tick, true, |ctx: &mut Mutating, _, _| {
            ctx.calls.push("victim");
        });
        ctx.victim = Some(victim);

        // Victim still fires in the pass that removed it; spawned waits
        s.tick(&mut ctx);
        assert_eq!(ctx.calls, vec!["first", "victim"]);
        assert!(!s.is_registered(victim));
        assert!(s.is_registered(ctx.spawned[0]));

        ctx.calls.clear();
        s.tick(&mut ctx);
        assert_eq!(ctx.calls, vec!["first", "spawned"]);
        assert!(!s.is_registered(ctx.spawned[0]));
        assert!(ctx.spawned[1] > ctx.spawned[0]);
    }

    #[test]
    fn test_pause_from_callback_skips_input_pass() {
        let mut s = EventScheduler::new(config(20, 0));
        let mut log = Log::default();
        s.register(Trigger::Tick, false, |log: &mut Log, d, fired| {
            log.fired.push(fired);
            d.pause();
        });
        s.register(Trigger::Key(KeyCode::ARROW_UP), true, record);
        s.handle_event(HostEvent::KeyDown(KeyCode::ARROW_UP));

        assert_eq!(s.tick(&mut log), 1);
        assert_eq!(s.phase(), SchedulerPhase::Paused);
        assert_eq!(s.tick(&mut log), 0);
    }

    #[test]
    fn test_independent_instances() {
        let mut a = EventScheduler::new(config(20, 0));
        let mut b = EventScheduler::new(config(20, 0));
        let mut log = Log::default();
        a.register(Trigger::Tick, true, record);
        b.pause();

        assert_eq!(a.tick(&mut log), 1);
        assert_eq!(b.tick(&mut log), 0);
        assert!(b.is_empty());
    }
}
