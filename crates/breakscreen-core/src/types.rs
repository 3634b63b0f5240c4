//! Type aliases for commonly used types.
//!
//! The designer is single-threaded by design: all mutation happens
//! synchronously inside one event handler. Shared state therefore uses
//! `Rc<RefCell<T>>`, never locks.

use std::cell::RefCell;
use std::rc::Rc;

/// A reference-counted, interior-mutable wrapper for single-threaded
/// sharing. Used for the clipboard handle the host injects into one or
/// more designers.
pub type Shared<T> = Rc<RefCell<T>>;

/// Wraps a value for single-threaded sharing.
pub fn shared<T>(value: T) -> Shared<T> {
    Rc::new(RefCell::new(value))
}

/// Widget identifier. Unique across the live widget collection; generated
/// in the `widget-{timestamp}-{random}` pattern.
pub type WidgetId = String;
