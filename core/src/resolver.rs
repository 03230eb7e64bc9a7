use crate::geometry::{Rect, Size};
use crate::progression::{ActiveStep, ModeKind, StepKey};

pub const MOBILE_ANCHOR_PREFIX: &str = "mobile-";

pub trait AnchorLookup {
    fn anchor_rect(&self, id: &str) -> Option<Rect>;
    fn viewport(&self) -> Size;
}

#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedTarget {
    pub anchor_id: String,
    pub rect: Rect,
}

pub fn route_allows(step: &ActiveStep, route: &str) -> bool {
    match (step.mode, step.required_route) {
        (ModeKind::Tour, Some(required)) => route.contains(required),
        _ => true,
    }
}

pub fn mobile_anchor_id(target_id: &str) -> String {
    format!("{MOBILE_ANCHOR_PREFIX}{target_id}")
}

pub fn resolve_target(
    step: &ActiveStep,
    route: &str,
    lookup: &impl AnchorLookup,
) -> Option<ResolvedTarget> {
    if !route_allows(step, route) {
        return None;
    }
    let target_id = step.target_id?;
    if let Some(rect) = usable_rect(lookup, target_id) {
        return Some(ResolvedTarget {
            anchor_id: target_id.to_string(),
            rect,
        });
    }
    if step.mode != ModeKind::Tour {
        return None;
    }
    let anchor_id = mobile_anchor_id(target_id);
    let rect = usable_rect(lookup, &anchor_id)?;
    Some(ResolvedTarget { anchor_id, rect })
}

fn usable_rect(lookup: &impl AnchorLookup, id: &str) -> Option<Rect> {
    lookup.anchor_rect(id).filter(|rect| rect.width > 0.0)
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PollOutcome {
    pub rect_changed: bool,
    pub scroll_into_view: Option<String>,
    pub arm_click: Option<(StepKey, String)>,
}

#[derive(Clone, Debug, Default)]
pub struct TargetTracker {
    key: Option<StepKey>,
    target: Option<ResolvedTarget>,
    scroll_pending: bool,
}

impl TargetTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rect(&self) -> Option<Rect> {
        self.target.as_ref().map(|target| target.rect)
    }

    pub fn rect_for(&self, key: StepKey) -> Option<Rect> {
        if self.key != Some(key) {
            return None;
        }
        self.rect()
    }

    pub fn clear(&mut self) -> bool {
        let had_target = self.target.is_some();
        self.key = None;
        self.target = None;
        self.scroll_pending = false;
        had_target
    }

    pub fn poll(
        &mut self,
        step: Option<&ActiveStep>,
        route: &str,
        lookup: &impl AnchorLookup,
    ) -> PollOutcome {
        let Some(step) = step else {
            return PollOutcome {
                rect_changed: self.clear(),
                ..PollOutcome::default()
            };
        };
        if self.key != Some(step.key) {
            self.key = Some(step.key);
            self.scroll_pending = false;
        }
        let previous = self.target.take();
        let resolved = resolve_target(step, route, lookup);
        let mut outcome = PollOutcome {
            rect_changed: previous != resolved,
            ..PollOutcome::default()
        };
        if let Some(target) = resolved.as_ref() {
            if target.rect.is_vertically_offscreen(lookup.viewport().height) {
                if !self.scroll_pending {
                    self.scroll_pending = true;
                    outcome.scroll_into_view = Some(target.anchor_id.clone());
                }
            } else {
                self.scroll_pending = false;
            }
            if step.requires_click() {
                outcome.arm_click = Some((step.key, target.anchor_id.clone()));
            }
        }
        self.target = resolved;
        outcome
    }
}
