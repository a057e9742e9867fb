use std::time::Duration;

use crate::NavigationId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Hand `url` to the embedded frame. The frame loads it on its own; nothing
    /// about the outcome flows back into the view state.
    LoadFrame {
        navigation_id: NavigationId,
        url: String,
    },
    /// The target for `navigation_id` is gone; the frame may drop its content.
    UnloadFrame { navigation_id: NavigationId },
    /// Deliver `Msg::CloseCommitted` for `navigation_id` after `delay`.
    ScheduleCloseCommit {
        navigation_id: NavigationId,
        delay: Duration,
    },
}
