#![allow(dead_code)]

use std::collections::{HashMap, HashSet};

use wayfinder_core::{AnchorLookup, Rect, Size, StoreError, TourHost};

#[derive(Default)]
pub struct MemoryHost {
    pub now: f64,
    pub navigations: Vec<String>,
    pub completed: HashSet<String>,
    pub mark_calls: usize,
    pub fail_reads: bool,
    pub fail_writes: bool,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick(&mut self, ms: f64) {
        self.now += ms;
    }

    pub fn last_navigation(&self) -> Option<&str> {
        self.navigations.last().map(String::as_str)
    }
}

impl TourHost for MemoryHost {
    fn now_ms(&self) -> f64 {
        self.now
    }

    fn navigate(&mut self, path: &str) {
        self.navigations.push(path.to_string());
    }

    fn has_completed_tour(&self, user_id: &str) -> Result<bool, StoreError> {
        if self.fail_reads {
            return Err(StoreError::Read("denied".to_string()));
        }
        Ok(self.completed.contains(user_id))
    }

    fn mark_tour_completed(&mut self, user_id: &str) -> Result<(), StoreError> {
        self.mark_calls += 1;
        if self.fail_writes {
            return Err(StoreError::Write("quota".to_string()));
        }
        self.completed.insert(user_id.to_string());
        Ok(())
    }
}

pub struct FakeDom {
    pub anchors: HashMap<String, Rect>,
    pub viewport: Size,
}

impl FakeDom {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            anchors: HashMap::new(),
            viewport: Size::new(width, height),
        }
    }

    pub fn mount(&mut self, id: &str, rect: Rect) {
        self.anchors.insert(id.to_string(), rect);
    }

    pub fn unmount(&mut self, id: &str) {
        self.anchors.remove(id);
    }
}

impl AnchorLookup for FakeDom {
    fn anchor_rect(&self, id: &str) -> Option<Rect> {
        self.anchors.get(id).copied()
    }

    fn viewport(&self) -> Size {
        self.viewport
    }
}
