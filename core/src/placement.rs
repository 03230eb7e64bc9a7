use crate::catalog::Side;
use crate::config::PlacementConfig;
use crate::geometry::{Rect, Size};
use crate::progression::ModeKind;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transform {
    Above,
    Below,
    LeftOf,
    RightOf,
}

impl Transform {
    pub fn css(self) -> &'static str {
        match self {
            Transform::Above => "translate(-50%, -100%)",
            Transform::Below => "translate(-50%, 0)",
            Transform::LeftOf => "translate(-100%, -50%)",
            Transform::RightOf => "translate(0, -50%)",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CardStyle {
    Centered,
    Corner { inset: f64 },
    Anchored { left: f64, top: f64, transform: Transform },
}

impl CardStyle {
    pub fn to_css(&self) -> String {
        match self {
            CardStyle::Centered => {
                "position: fixed; left: 50%; top: 50%; transform: translate(-50%, -50%);"
                    .to_string()
            }
            CardStyle::Corner { inset } => {
                format!("position: fixed; right: {inset}px; bottom: {inset}px;")
            }
            CardStyle::Anchored {
                left,
                top,
                transform,
            } => format!(
                "position: fixed; left: {}px; top: {}px; transform: {};",
                left.round(),
                top.round(),
                transform.css()
            ),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub style: CardStyle,
    pub arrow: Option<Side>,
}

impl Placement {
    fn detached(style: CardStyle) -> Self {
        Self { style, arrow: None }
    }
}

pub fn place(
    target: Option<Rect>,
    card: Size,
    declared: Option<Side>,
    mode: ModeKind,
    viewport: Size,
    config: &PlacementConfig,
) -> Placement {
    let Some(target) = target else {
        return match mode {
            ModeKind::Tour => Placement::detached(CardStyle::Centered),
            ModeKind::Guide => Placement::detached(CardStyle::Corner {
                inset: config.corner_inset,
            }),
        };
    };
    if mode == ModeKind::Tour && declared == Some(Side::Center) {
        return Placement::detached(CardStyle::Centered);
    }
    let side = resolve_side(target, card, declared, mode, viewport, config);
    let gap = config.gap;
    let pad = config.edge_padding;
    let (left, top, transform) = match side {
        Side::Top => (
            clamp_axis(target.center_x(), card.width, viewport.width, pad),
            target.top() - gap,
            Transform::Above,
        ),
        Side::Bottom => (
            clamp_axis(target.center_x(), card.width, viewport.width, pad),
            target.bottom() + gap,
            Transform::Below,
        ),
        Side::Left => (
            target.left() - gap,
            clamp_axis(target.center_y(), card.height, viewport.height, pad),
            Transform::LeftOf,
        ),
        Side::Right => (
            target.right() + gap,
            clamp_axis(target.center_y(), card.height, viewport.height, pad),
            Transform::RightOf,
        ),
        Side::Center => return Placement::detached(CardStyle::Centered),
    };
    Placement {
        style: CardStyle::Anchored {
            left,
            top,
            transform,
        },
        arrow: Some(side),
    }
}

/// Starting side plus the three single-shot flips, applied in order.
pub fn resolve_side(
    target: Rect,
    card: Size,
    declared: Option<Side>,
    mode: ModeKind,
    viewport: Size,
    config: &PlacementConfig,
) -> Side {
    let mut side = match (mode, declared) {
        (ModeKind::Tour, declared) => declared.unwrap_or_default(),
        (ModeKind::Guide, Some(side)) if side != Side::Center => side,
        (ModeKind::Guide, _) => {
            if target.left() >= card.width + config.guide_left_margin {
                Side::Left
            } else {
                Side::Top
            }
        }
    };
    if side == Side::Bottom && viewport.height - target.bottom() < config.bottom_flip_threshold {
        side = Side::Top;
    }
    if side == Side::Right && target.right() + config.gap + card.width > viewport.width {
        side = Side::Left;
    }
    if side == Side::Left && target.left() - config.gap < card.width {
        side = Side::Bottom;
    }
    side
}

// The lower bound wins when the card is wider than the viewport.
fn clamp_axis(center: f64, extent: f64, limit: f64, padding: f64) -> f64 {
    let half = extent * 0.5;
    center.min(limit - padding - half).max(padding + half)
}
