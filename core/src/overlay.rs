use crate::catalog::Side;
use crate::config::TourConfig;
use crate::geometry::{Rect, Size};
use crate::markup::{parse_markup, Span};
use crate::placement::{place, Placement};
use crate::progression::{ActiveStep, ModeKind, StepKey};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ring {
    pub rect: Rect,
    pub pulsing: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrimaryAction {
    Next,
    Finish,
    Done,
}

impl PrimaryAction {
    pub fn label(self) -> &'static str {
        match self {
            PrimaryAction::Next => "Next",
            PrimaryAction::Finish => "Finish",
            PrimaryAction::Done => "Done",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Controls {
    pub show_prev: bool,
    pub show_dismiss: bool,
    pub primary: Option<PrimaryAction>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct OverlayModel {
    pub mode: ModeKind,
    pub key: StepKey,
    pub backdrop: bool,
    pub ring: Option<Ring>,
    pub placement: Placement,
    pub title: &'static str,
    pub body: Vec<Span<'static>>,
    pub progress: String,
    pub controls: Controls,
}

impl OverlayModel {
    pub fn arrow(&self) -> Option<Side> {
        self.placement.arrow
    }

    pub fn dismiss_label(&self) -> &'static str {
        match self.mode {
            ModeKind::Tour => "Skip tour",
            ModeKind::Guide => "Close",
        }
    }
}

pub fn compose_overlay(
    step: &ActiveStep,
    target: Option<Rect>,
    measured_card: Option<Size>,
    viewport: Size,
    config: &TourConfig,
) -> OverlayModel {
    let card = measured_card
        .filter(|size| !size.is_empty())
        .unwrap_or_else(|| config.placement.default_card(step.mode));
    let placement = place(
        target,
        card,
        step.position,
        step.mode,
        viewport,
        &config.placement,
    );
    let ring = target.map(|rect| Ring {
        rect: rect.inflate(config.ring_padding),
        pulsing: step.requires_click(),
    });
    let controls = match step.mode {
        ModeKind::Tour => Controls {
            show_prev: step.index > 0,
            show_dismiss: !step.is_last(),
            primary: if step.requires_click() {
                None
            } else if step.is_last() {
                Some(PrimaryAction::Finish)
            } else {
                Some(PrimaryAction::Next)
            },
        },
        ModeKind::Guide => Controls {
            show_prev: false,
            show_dismiss: true,
            primary: Some(if step.is_last() {
                PrimaryAction::Done
            } else {
                PrimaryAction::Next
            }),
        },
    };
    OverlayModel {
        mode: step.mode,
        key: step.key,
        backdrop: step.mode == ModeKind::Tour && !step.transparent_backdrop,
        ring,
        placement,
        title: step.title,
        body: parse_markup(step.content),
        progress: format!("{} of {}", step.index + 1, step.total),
        controls,
    }
}
