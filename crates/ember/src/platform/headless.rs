//! In-memory platform: a document model and a virtual clock.
//!
//! Used by the tests and the CLI; nothing here waits for real time.

mod clock;
mod document;
mod runtime;

pub use clock::VirtualClock;
pub use document::{ClipboardMode, Document, DocumentSnapshot, Element, ElementSnapshot};
pub use runtime::{HeadlessRuntime, RuntimeSnapshot};
