pub mod app_router;
mod config;
mod dom;
pub mod overlay_view;
mod persisted_store;
pub mod tour_runtime;

pub use overlay_view::TourOverlay;
pub use tour_runtime::{TourSnapshot, TourSubscription};
