use crate::geometry::Size;
use crate::progression::ModeKind;

pub const DEFAULT_POLL_INTERVAL_MS: u32 = 500;
pub const DEFAULT_ADVANCE_COOLDOWN_MS: u32 = 600;
pub const DEFAULT_CLICK_ADVANCE_DELAY_MS: u32 = 300;
pub const DEFAULT_RING_PADDING: f64 = 8.0;

pub const CARD_GAP: f64 = 20.0;
pub const EDGE_PADDING: f64 = 16.0;
pub const BOTTOM_FLIP_THRESHOLD: f64 = 200.0;
pub const GUIDE_LEFT_MARGIN: f64 = 20.0;
pub const CORNER_INSET: f64 = 24.0;
pub const TOUR_CARD_SIZE: Size = Size::new(448.0, 200.0);
pub const GUIDE_CARD_SIZE: Size = Size::new(320.0, 200.0);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacementConfig {
    pub gap: f64,
    pub edge_padding: f64,
    pub bottom_flip_threshold: f64,
    pub guide_left_margin: f64,
    pub corner_inset: f64,
    pub tour_card: Size,
    pub guide_card: Size,
}

impl PlacementConfig {
    pub fn default_card(&self, mode: ModeKind) -> Size {
        match mode {
            ModeKind::Tour => self.tour_card,
            ModeKind::Guide => self.guide_card,
        }
    }
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            gap: CARD_GAP,
            edge_padding: EDGE_PADDING,
            bottom_flip_threshold: BOTTOM_FLIP_THRESHOLD,
            guide_left_margin: GUIDE_LEFT_MARGIN,
            corner_inset: CORNER_INSET,
            tour_card: TOUR_CARD_SIZE,
            guide_card: GUIDE_CARD_SIZE,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TourConfig {
    pub poll_interval_ms: u32,
    pub advance_cooldown_ms: u32,
    pub click_advance_delay_ms: u32,
    pub ring_padding: f64,
    pub placement: PlacementConfig,
}

impl Default for TourConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            advance_cooldown_ms: DEFAULT_ADVANCE_COOLDOWN_MS,
            click_advance_delay_ms: DEFAULT_CLICK_ADVANCE_DELAY_MS,
            ring_padding: DEFAULT_RING_PADDING,
            placement: PlacementConfig::default(),
        }
    }
}
