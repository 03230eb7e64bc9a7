use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo::events::EventListener;
use gloo::timers::callback::{Interval, Timeout};
use web_sys::Element;

use crate::app_router::{self, RouteWatcher};
use crate::config::load_tour_config;
use crate::dom::BrowserDom;
use crate::persisted_store;
use wayfinder_core::{
    guide_by_id, ActiveStep, Capabilities, Foreground, GuideDescriptor, Progression,
    ProgressionState, Rect, StepKey, StoreError, TargetTracker, TourConfig, TourHost, TourUser,
};

#[derive(Clone, Debug, PartialEq)]
pub struct TourSnapshot {
    pub active: Option<ActiveStep>,
    pub target: Option<Rect>,
    pub state: ProgressionState,
    pub config: TourConfig,
}

struct ArmedClick {
    key: StepKey,
    element: Element,
    fired: Rc<Cell<bool>>,
    _listener: EventListener,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AdvanceTrigger {
    Click,
    Route,
}

struct TourRuntimeState {
    initialized: bool,
    config: TourConfig,
    progression: Progression,
    tracker: TargetTracker,
    route: String,
    user: Option<TourUser>,
    capabilities: Capabilities,
    poll_timer: Option<Interval>,
    armed_click: Option<ArmedClick>,
    advance_timer: Option<Timeout>,
    route_watcher: Option<RouteWatcher>,
    hooks: Vec<(u64, Rc<dyn Fn()>)>,
    next_hook_id: u64,
    last_key: Option<StepKey>,
}

impl TourRuntimeState {
    fn new() -> Self {
        let config = TourConfig::default();
        Self {
            initialized: false,
            config,
            progression: Progression::new(f64::from(config.advance_cooldown_ms)),
            tracker: TargetTracker::new(),
            route: String::new(),
            user: None,
            capabilities: Capabilities::default(),
            poll_timer: None,
            armed_click: None,
            advance_timer: None,
            route_watcher: None,
            hooks: Vec::new(),
            next_hook_id: 0,
            last_key: None,
        }
    }

    fn sync_step(&mut self) {
        let step = self.progression.active_step();
        let key = step.map(|step| step.key);
        if key == self.last_key {
            return;
        }
        self.last_key = key;
        self.tracker.clear();
        self.disarm();
        self.restart_poll(step.is_some());
    }

    fn disarm(&mut self) {
        self.armed_click = None;
        self.advance_timer = None;
    }

    fn schedule_advance(&mut self, key: StepKey, trigger: AdvanceTrigger, delay_ms: u32) {
        self.advance_timer = Some(Timeout::new(delay_ms, move || {
            fire_advance(key, trigger);
        }));
    }

    fn restart_poll(&mut self, active: bool) {
        self.poll_timer = None;
        if active {
            self.poll_timer = Some(Interval::new(self.config.poll_interval_ms, poll_now));
        }
    }
}

thread_local! {
    static STATE: RefCell<TourRuntimeState> = RefCell::new(TourRuntimeState::new());
}

// Navigations are queued and replayed once the runtime borrow is released,
// since pushing a route dispatches the route event synchronously.
#[derive(Default)]
struct BrowserHost {
    navigations: Vec<String>,
}

impl TourHost for BrowserHost {
    fn now_ms(&self) -> f64 {
        js_sys::Date::now()
    }

    fn navigate(&mut self, path: &str) {
        self.navigations.push(path.to_string());
    }

    fn has_completed_tour(&self, user_id: &str) -> Result<bool, StoreError> {
        persisted_store::has_completed(user_id).inspect_err(|err| {
            gloo::console::warn!("tour: completion read failed", err.to_string());
        })
    }

    fn mark_tour_completed(&mut self, user_id: &str) -> Result<(), StoreError> {
        persisted_store::mark_completed(user_id, js_sys::Date::now()).inspect_err(|err| {
            gloo::console::warn!("tour: completion write failed", err.to_string());
        })
    }
}

fn transition<F>(apply: F) -> bool
where
    F: FnOnce(&mut TourRuntimeState, &mut BrowserHost) -> bool,
{
    let mut host = BrowserHost::default();
    let changed = STATE.with(|slot| {
        let mut guard = slot.borrow_mut();
        let state = &mut *guard;
        let changed = apply(state, &mut host);
        if changed {
            state.sync_step();
        }
        changed
    });
    for path in host.navigations {
        app_router::navigate(&path);
    }
    if changed {
        poll_now();
        notify();
    }
    changed
}

pub fn init() {
    let first = STATE.with(|slot| {
        let mut state = slot.borrow_mut();
        if state.initialized {
            return false;
        }
        let config = load_tour_config();
        state.initialized = true;
        state.config = config;
        state.progression = Progression::new(f64::from(config.advance_cooldown_ms));
        state.route = app_router::current_route();
        true
    });
    if !first {
        return;
    }
    let watcher = app_router::watch_routes(Rc::new(|route: String| set_route(&route)));
    STATE.with(|slot| {
        slot.borrow_mut().route_watcher = watcher;
    });
    gloo::console::log!("tour: runtime ready", app_router::current_route());
}

pub fn set_user(user: Option<TourUser>) {
    STATE.with(|slot| {
        slot.borrow_mut().user = user;
    });
}

pub fn set_capabilities(capabilities: Capabilities) {
    STATE.with(|slot| {
        slot.borrow_mut().capabilities = capabilities;
    });
}

pub fn start_tour(force: bool) -> bool {
    let started = transition(|state, host| {
        state
            .progression
            .start_tour(state.user.as_ref(), state.capabilities, force, host)
    });
    if started {
        let steps = STATE.with(|slot| slot.borrow().progression.tour_steps().len());
        gloo::console::log!("tour: started", steps as u32);
    }
    started
}

pub fn next_step() -> bool {
    let advanced = transition(|state, host| state.progression.next_step(host));
    if advanced && foreground() == Foreground::None {
        gloo::console::log!("tour: completed");
    }
    advanced
}

pub fn prev_step() -> bool {
    transition(|state, _| state.progression.prev_step())
}

pub fn end_tour() -> bool {
    let ended = transition(|state, host| state.progression.end_tour(host));
    if ended {
        gloo::console::log!("tour: dismissed");
    }
    ended
}

pub fn start_guide(guide: &'static GuideDescriptor) -> bool {
    let started = transition(|state, host| state.progression.start_guide(guide, host));
    if started {
        gloo::console::log!("guide: started", guide.id);
    }
    started
}

pub fn start_guide_by_id(id: &str) -> bool {
    match guide_by_id(id) {
        Some(guide) => start_guide(guide),
        None => {
            gloo::console::warn!("guide: unknown id", id.to_string());
            false
        }
    }
}

pub fn next_guide_step() -> bool {
    transition(|state, host| state.progression.next_guide_step(host))
}

pub fn stop_guide() -> bool {
    let stopped = transition(|state, _| state.progression.stop_guide());
    if stopped {
        gloo::console::log!("guide: stopped");
    }
    stopped
}

pub fn advance_from(key: StepKey) -> bool {
    transition(|state, host| state.progression.advance_from(key, host))
}

pub fn forget_completion() {
    let user_id = STATE.with(|slot| slot.borrow().user.as_ref().map(|user| user.id.clone()));
    let Some(user_id) = user_id else {
        return;
    };
    if let Err(err) = persisted_store::clear_completed(&user_id) {
        gloo::console::warn!("tour: completion reset failed", err.to_string());
    }
}

// A pending post-click advance survives the route change; its key guards it.
pub fn set_route(route: &str) {
    let key = STATE.with(|slot| {
        let mut state = slot.borrow_mut();
        if state.route == route {
            return None;
        }
        state.route = route.to_string();
        state.armed_click = None;
        let active = state.progression.active_step().is_some();
        state.restart_poll(active);
        Some(state.progression.step_key())
    });
    let Some(key) = key else {
        return;
    };
    let route = route.to_string();
    if !transition(move |state, host| state.progression.on_route_change(&route, host)) {
        retry_when_unlocked(key, AdvanceTrigger::Route);
        poll_now();
        notify();
    }
}

pub fn foreground() -> Foreground {
    STATE.with(|slot| slot.borrow().progression.foreground())
}

pub fn snapshot() -> TourSnapshot {
    STATE.with(|slot| {
        let state = slot.borrow();
        let active = state.progression.active_step();
        let target = active.and_then(|step| state.tracker.rect_for(step.key));
        TourSnapshot {
            active,
            target,
            state: state.progression.state(),
            config: state.config,
        }
    })
}

fn poll_now() {
    let dom = BrowserDom::new();
    let outcome = STATE.with(|slot| {
        let mut guard = slot.borrow_mut();
        let state = &mut *guard;
        let step = state.progression.active_step();
        state.tracker.poll(step.as_ref(), &state.route, &dom)
    });
    if let Some(anchor_id) = outcome.scroll_into_view.as_deref() {
        dom.scroll_into_view(anchor_id);
    }
    if let Some((key, anchor_id)) = outcome.arm_click.as_ref() {
        arm_click(*key, anchor_id, &dom);
    }
    if outcome.rect_changed {
        notify();
    }
}

fn arm_click(key: StepKey, anchor_id: &str, dom: &BrowserDom) {
    let Some(element) = dom.element(anchor_id) else {
        return;
    };
    STATE.with(|slot| {
        let mut state = slot.borrow_mut();
        if let Some(armed) = state.armed_click.as_ref() {
            if armed.key == key && (armed.fired.get() || armed.element == element) {
                return;
            }
        }
        let fired = Rc::new(Cell::new(false));
        let listener = {
            let fired = fired.clone();
            EventListener::once(&element, "click", move |_| {
                fired.set(true);
                schedule_click_advance(key);
            })
        };
        state.armed_click = Some(ArmedClick {
            key,
            element,
            fired,
            _listener: listener,
        });
    });
}

fn schedule_click_advance(key: StepKey) {
    STATE.with(|slot| {
        let mut state = slot.borrow_mut();
        if state.progression.step_key() != key {
            return;
        }
        let delay = state.config.click_advance_delay_ms;
        state.schedule_advance(key, AdvanceTrigger::Click, delay);
    });
}

fn fire_advance(key: StepKey, trigger: AdvanceTrigger) {
    let advanced = transition(|state, host| {
        if state.progression.step_key() != key {
            return false;
        }
        match trigger {
            AdvanceTrigger::Click => state.progression.advance_from(key, host),
            AdvanceTrigger::Route => state.progression.on_route_change(&state.route, host),
        }
    });
    if !advanced {
        retry_when_unlocked(key, trigger);
    }
}

// An advance refused by the cooldown is retried once the lock expires.
fn retry_when_unlocked(key: StepKey, trigger: AdvanceTrigger) {
    STATE.with(|slot| {
        let mut state = slot.borrow_mut();
        if state.progression.step_key() != key {
            return;
        }
        if trigger == AdvanceTrigger::Route && !state.progression.route_satisfies_next(&state.route)
        {
            return;
        }
        let wait = state.progression.cooldown_remaining_ms(js_sys::Date::now());
        if wait <= 0.0 {
            return;
        }
        state.schedule_advance(key, trigger, wait.ceil() as u32 + 1);
    });
}

fn notify() {
    let hooks = STATE.with(|slot| {
        slot.borrow()
            .hooks
            .iter()
            .map(|(_, hook)| hook.clone())
            .collect::<Vec<_>>()
    });
    for hook in hooks {
        hook();
    }
}

pub struct TourSubscription {
    id: u64,
}

impl Drop for TourSubscription {
    fn drop(&mut self) {
        STATE.with(|slot| {
            match slot.try_borrow_mut() {
                Ok(mut state) => state.hooks.retain(|(id, _)| *id != self.id),
                Err(_) => gloo::console::warn!("tour: subscription dropped while runtime busy"),
            }
        });
    }
}

pub fn subscribe(hook: Rc<dyn Fn()>) -> TourSubscription {
    STATE.with(|slot| {
        let mut state = slot.borrow_mut();
        let id = state.next_hook_id;
        state.next_hook_id = id.wrapping_add(1);
        state.hooks.push((id, hook));
        TourSubscription { id }
    })
}
