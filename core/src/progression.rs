use std::fmt;

use crate::catalog::{
    build_tour_steps, AdvancePolicy, Capabilities, GuideDescriptor, Side, TourStep, TourUser,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    Unavailable,
    Read(String),
    Write(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Unavailable => f.write_str("completion storage unavailable"),
            StoreError::Read(detail) => write!(f, "completion read failed: {detail}"),
            StoreError::Write(detail) => write!(f, "completion write failed: {detail}"),
        }
    }
}

impl std::error::Error for StoreError {}

/// Capabilities the surrounding application lends to the progression machine.
pub trait TourHost {
    fn now_ms(&self) -> f64;
    fn navigate(&mut self, path: &str);
    fn has_completed_tour(&self, user_id: &str) -> Result<bool, StoreError>;
    fn mark_tour_completed(&mut self, user_id: &str) -> Result<(), StoreError>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ModeKind {
    Tour,
    Guide,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Foreground {
    None,
    Tour,
    Guide,
}

/// Identifies one activation of one step. Any transition issues a fresh key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StepKey(u64);

#[derive(Clone, Copy, Debug)]
enum Mode {
    Idle,
    Tour,
    Guide {
        guide: &'static GuideDescriptor,
        index: usize,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgressionState {
    pub tour_active: bool,
    pub tour_index: usize,
    pub tour_len: usize,
    pub guide: Option<(&'static str, usize)>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActiveStep {
    pub mode: ModeKind,
    pub key: StepKey,
    pub index: usize,
    pub total: usize,
    pub title: &'static str,
    pub content: &'static str,
    pub target_id: Option<&'static str>,
    pub position: Option<Side>,
    pub advance: AdvancePolicy,
    pub required_route: Option<&'static str>,
    pub transparent_backdrop: bool,
}

impl ActiveStep {
    pub fn is_last(&self) -> bool {
        self.index + 1 >= self.total
    }

    pub fn requires_click(&self) -> bool {
        self.advance == AdvancePolicy::ClickThrough
    }
}

#[derive(Debug)]
pub struct Progression {
    mode: Mode,
    tour_steps: Vec<TourStep>,
    tour_index: usize,
    tour_user: Option<String>,
    cooldown_ms: f64,
    advance_locked_until: Option<f64>,
    generation: u64,
}

impl Progression {
    pub fn new(cooldown_ms: f64) -> Self {
        Self {
            mode: Mode::Idle,
            tour_steps: Vec::new(),
            tour_index: 0,
            tour_user: None,
            cooldown_ms: cooldown_ms.max(0.0),
            advance_locked_until: None,
            generation: 0,
        }
    }

    pub fn foreground(&self) -> Foreground {
        match self.mode {
            Mode::Idle => Foreground::None,
            Mode::Tour if self.tour_index < self.tour_steps.len() => Foreground::Tour,
            Mode::Guide { guide, index } if index < guide.steps.len() => Foreground::Guide,
            _ => Foreground::None,
        }
    }

    pub fn state(&self) -> ProgressionState {
        let guide = match self.mode {
            Mode::Guide { guide, index } => Some((guide.id, index)),
            _ => None,
        };
        ProgressionState {
            tour_active: matches!(self.mode, Mode::Tour),
            tour_index: self.tour_index,
            tour_len: self.tour_steps.len(),
            guide,
        }
    }

    pub fn step_key(&self) -> StepKey {
        StepKey(self.generation)
    }

    pub fn tour_steps(&self) -> &[TourStep] {
        &self.tour_steps
    }

    pub fn active_step(&self) -> Option<ActiveStep> {
        let key = self.step_key();
        match self.mode {
            Mode::Idle => None,
            Mode::Tour => {
                let step = self.tour_steps.get(self.tour_index)?;
                Some(ActiveStep {
                    mode: ModeKind::Tour,
                    key,
                    index: self.tour_index,
                    total: self.tour_steps.len(),
                    title: step.title,
                    content: step.content,
                    target_id: step.target_id,
                    position: Some(step.position),
                    advance: step.advance,
                    required_route: step.required_route,
                    transparent_backdrop: step.transparent_backdrop,
                })
            }
            Mode::Guide { guide, index } => {
                let step = guide.steps.get(index)?;
                Some(ActiveStep {
                    mode: ModeKind::Guide,
                    key,
                    index,
                    total: guide.steps.len(),
                    title: guide.title,
                    content: step.content,
                    target_id: step.target_id,
                    position: step.position,
                    advance: AdvancePolicy::Auto,
                    required_route: None,
                    transparent_backdrop: false,
                })
            }
        }
    }

    pub fn start_tour<H: TourHost>(
        &mut self,
        user: Option<&TourUser>,
        capabilities: Capabilities,
        force: bool,
        host: &mut H,
    ) -> bool {
        let Some(user) = user else {
            return false;
        };
        // An unreadable flag counts as not completed.
        if !force && host.has_completed_tour(&user.id).unwrap_or(false) {
            return false;
        }
        let steps = build_tour_steps(user.role, capabilities);
        if steps.is_empty() {
            return false;
        }
        self.tour_steps = steps;
        self.tour_index = 0;
        self.tour_user = Some(user.id.clone());
        self.mode = Mode::Tour;
        self.advance_locked_until = None;
        self.bump();
        host.navigate(user.role.home_route());
        true
    }

    pub fn next_step<H: TourHost>(&mut self, host: &mut H) -> bool {
        if !matches!(self.mode, Mode::Tour) {
            return false;
        }
        if !self.take_advance(host.now_ms()) {
            return false;
        }
        if self.tour_index + 1 < self.tour_steps.len() {
            self.tour_index += 1;
        } else {
            self.finish_tour(host);
        }
        self.bump();
        true
    }

    pub fn prev_step(&mut self) -> bool {
        if !matches!(self.mode, Mode::Tour) || self.tour_index == 0 {
            return false;
        }
        self.tour_index = (self.tour_index - 1).min(self.tour_steps.len().saturating_sub(1));
        self.bump();
        true
    }

    pub fn end_tour<H: TourHost>(&mut self, host: &mut H) -> bool {
        if !matches!(self.mode, Mode::Tour) {
            return false;
        }
        self.finish_tour(host);
        self.bump();
        true
    }

    pub fn start_guide<H: TourHost>(
        &mut self,
        guide: &'static GuideDescriptor,
        host: &mut H,
    ) -> bool {
        let Some(first) = guide.steps.first() else {
            return false;
        };
        self.mode = Mode::Guide { guide, index: 0 };
        self.advance_locked_until = None;
        self.bump();
        if let Some(route) = first.route {
            host.navigate(route);
        }
        true
    }

    pub fn next_guide_step<H: TourHost>(&mut self, host: &mut H) -> bool {
        let Mode::Guide { guide, index } = self.mode else {
            return false;
        };
        if !self.take_advance(host.now_ms()) {
            return false;
        }
        let next = index + 1;
        match guide.steps.get(next) {
            Some(step) => {
                self.mode = Mode::Guide { guide, index: next };
                self.bump();
                if let Some(route) = step.route {
                    host.navigate(route);
                }
            }
            None => {
                self.mode = Mode::Idle;
                self.bump();
            }
        }
        true
    }

    pub fn stop_guide(&mut self) -> bool {
        if !matches!(self.mode, Mode::Guide { .. }) {
            return false;
        }
        self.mode = Mode::Idle;
        self.bump();
        true
    }

    pub fn on_route_change<H: TourHost>(&mut self, route: &str, host: &mut H) -> bool {
        if !self.route_satisfies_next(route) {
            return false;
        }
        self.next_step(host)
    }

    /// True while the tour runs and `route` opens the gate of the step after the current one.
    pub fn route_satisfies_next(&self, route: &str) -> bool {
        if !matches!(self.mode, Mode::Tour) {
            return false;
        }
        self.tour_steps
            .get(self.tour_index + 1)
            .and_then(|step| step.required_route)
            .is_some_and(|required| route.contains(required))
    }

    pub fn cooldown_remaining_ms(&self, now_ms: f64) -> f64 {
        self.advance_locked_until
            .map_or(0.0, |until| (until - now_ms).max(0.0))
    }

    /// Advances only while `key` still names the active step.
    pub fn advance_from<H: TourHost>(&mut self, key: StepKey, host: &mut H) -> bool {
        if key != self.step_key() {
            return false;
        }
        match self.foreground() {
            Foreground::Tour => self.next_step(host),
            Foreground::Guide => self.next_guide_step(host),
            Foreground::None => false,
        }
    }

    fn take_advance(&mut self, now_ms: f64) -> bool {
        if let Some(until) = self.advance_locked_until {
            if now_ms < until {
                return false;
            }
        }
        self.advance_locked_until = Some(now_ms + self.cooldown_ms);
        true
    }

    fn finish_tour<H: TourHost>(&mut self, host: &mut H) {
        self.mode = Mode::Idle;
        if let Some(user_id) = self.tour_user.as_deref() {
            let _ = host.mark_tour_completed(user_id);
        }
    }

    fn bump(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }
}

impl Default for Progression {
    fn default() -> Self {
        Self::new(f64::from(crate::config::DEFAULT_ADVANCE_COOLDOWN_MS))
    }
}
