//! # Event Bus Module
//!
//! Typed publish/subscribe for decoupled notification between the designer
//! engine and its consumers (toolbars, property panels, host shells):
//! - Publishers emit typed events without knowing subscribers
//! - Subscribers filter by category and receive events of interest
//! - Delivery is synchronous, on the publishing call stack
//!
//! ## Usage
//!
//! ```rust
//! use breakscreen_core::event_bus::{
//!     DesignerEvent, EventBus, EventCategory, EventFilter,
//! };
//!
//! let bus = EventBus::new();
//! let subscription = bus.subscribe(
//!     EventFilter::Categories(vec![EventCategory::Selection]),
//!     |event| {
//!         if let DesignerEvent::SelectionChanged { ids } = event {
//!             println!("selection: {:?}", ids);
//!         }
//!     },
//! );
//!
//! bus.publish(DesignerEvent::SelectionChanged { ids: vec![] });
//! bus.unsubscribe(subscription);
//! ```

mod bus;
mod events;

pub use bus::*;
pub use events::*;
