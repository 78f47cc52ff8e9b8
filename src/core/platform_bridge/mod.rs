//=========================================================================
// Platform Bridge
//=========================================================================
//
// Contract between the windowing layer and the logic thread.
//
// Components:
// - `interface`: message and error types crossing the thread boundary
// - `event_collector`: core-side draining of platform messages
//
//=========================================================================

//=== Module Declarations =================================================

mod event_collector;
mod interface;

//=== Public API ==========================================================

pub use event_collector::{EventCollector, TickControl};
pub use interface::{CoreEvent, PlatformError, PlatformEvent};
