//! # Breakscreen Core
//!
//! Core types, traits, and utilities shared by the Breakscreen designer
//! crates. Provides the fundamental abstractions for geometry, errors,
//! editing-rule constants, and the typed event bus used for
//! selection/history/group notifications.

pub mod constants;
pub mod error;
pub mod event_bus;
pub mod geometry;
pub mod types;

pub use error::{DesignerError, Result};
pub use event_bus::{
    DesignerEvent, EventBus, EventCategory, EventFilter, SubscriptionId,
};
pub use geometry::{Point, Rect, Size};
pub use types::{shared, Shared, WidgetId};
