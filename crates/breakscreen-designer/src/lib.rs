//! # Breakscreen Designer
//!
//! The editing engine behind the break-screen Designer: a WYSIWYG editor
//! core for composing countdown-overlay layouts out of box, text, QR,
//! image, and group widgets.
//!
//! ## Core Components
//!
//! - **Widgets**: a closed variant set with type-specific behavior (QR
//!   widgets stay square, groups manage child ids and padded bounds)
//! - **Factory**: construction from serialized records, with a lenient
//!   fallback for unknown widget types
//! - **Commands**: every undoable mutation, with exact inverse state
//! - **Command manager**: bounded-depth undo/redo stack discipline
//! - **Selection manager**: ordered selection with reference-widget
//!   semantics and marquee (rubber-band) selection
//! - **Clipboard**: copy/cut/paste with fresh ids and group child-id
//!   remapping
//! - **Designer**: the orchestrator owning the widget collection and the
//!   public editing API the UI chrome calls
//!
//! ## Architecture
//!
//! ```text
//! Designer (public editing API, gesture state machine)
//!   ├── Canvas (widget store + selection + render-port mirroring)
//!   ├── CommandManager (undo/redo stacks)
//!   └── Clipboard (injected, shared across designers)
//!
//! RenderPort (abstract visual surface; HeadlessPort for tests/native)
//!
//! EventBus (selection / history / group notifications)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use breakscreen_core::{Point, Rect};
//! use breakscreen_designer::{factory, Designer};
//!
//! let mut designer = Designer::headless();
//! let id = designer
//!     .add_widget(factory::box_widget(Rect::new(10.0, 10.0, 200.0, 100.0)))
//!     .unwrap();
//!
//! designer.set_widget_position(&id, Point::new(40.0, 40.0));
//! assert!(designer.undo().is_ok());
//! ```

pub mod break_types;
pub mod canvas;
pub mod clipboard;
pub mod command_manager;
pub mod commands;
pub mod designer;
pub mod factory;
pub mod interaction;
pub mod layout;
pub mod render_port;
pub mod selection_manager;
pub mod widget;
pub mod widget_store;

pub use break_types::{default_layout, BreakTypeMeta};
pub use canvas::Canvas;
pub use clipboard::Clipboard;
pub use command_manager::CommandManager;
pub use commands::{
    Alignment, DesignerCommand, DistributeAxis, SizeDimension,
};
pub use designer::Designer;
pub use interaction::ResizeHandle;
pub use layout::{widgets_from_json, widgets_to_json, LayoutError, LayoutFile, LayoutMetadata};
pub use render_port::{HeadlessPort, PortElement, RenderPort};
pub use selection_manager::SelectionManager;
pub use widget::{
    BoxWidget, GroupWidget, ImageWidget, QrWidget, TextWidget, Widget, WidgetBehavior,
    WidgetData, WidgetKind, WidgetProperties,
};
pub use widget_store::WidgetStore;

// Re-export the core crate's common surface for convenience.
pub use breakscreen_core::{
    DesignerError, DesignerEvent, EventBus, EventCategory, EventFilter, Point, Rect, Result,
    Size, WidgetId,
};
