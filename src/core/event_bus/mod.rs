//=========================================================================
// Event Bus
//=========================================================================
//
// Routes input, UI actions and scene notifications to their receivers.
//
// Architecture:
//   EventBus
//     ├─ subscribers: Vec<EventTarget>   (dispatch order)
//     ├─ queue: Vec<(target?, Event)>    (drained by update)
//     └─ directed: VecDeque               (synchronous fast path)
//
//=========================================================================

//=== Module Declarations =================================================

mod bus;
mod event;

//=== Public API ==========================================================

pub use bus::{EventBus, EventSink};
pub use event::{ActionId, Event, EventTarget};
