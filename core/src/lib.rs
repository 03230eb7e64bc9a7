pub mod catalog;
pub mod completion;
pub mod config;
pub mod geometry;
pub mod markup;
pub mod overlay;
pub mod placement;
pub mod progression;
pub mod resolver;

pub use catalog::{
    build_tour_steps, guide_by_id, AdvancePolicy, Capabilities, GuideDescriptor, GuideStep, Role,
    RoleParseError, Side, TourStep, TourUser, GUIDES,
};
pub use completion::{completion_key, decode_record, encode_record, CompletionRecord};
pub use config::{PlacementConfig, TourConfig};
pub use geometry::{Rect, Size};
pub use markup::{parse_markup, Span};
pub use overlay::{compose_overlay, Controls, OverlayModel, PrimaryAction, Ring};
pub use placement::{place, resolve_side, CardStyle, Placement, Transform};
pub use progression::{
    ActiveStep, Foreground, ModeKind, Progression, ProgressionState, StepKey, StoreError, TourHost,
};
pub use resolver::{
    mobile_anchor_id, resolve_target, route_allows, AnchorLookup, PollOutcome, ResolvedTarget,
    TargetTracker,
};
