use crate::options::Settings;

/// Window events an animation subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    PointerMove,
    TouchMove,
    Click,
    Resize,
}

impl EventKind {
    pub fn name(self) -> &'static str {
        match self {
            EventKind::PointerMove => "pointermove",
            EventKind::TouchMove => "touchmove",
            EventKind::Click => "click",
            EventKind::Resize => "resize",
        }
    }

    /// Passive listeners promise never to call `preventDefault`.
    pub fn passive(self) -> bool {
        matches!(self, EventKind::PointerMove | EventKind::TouchMove)
    }

    pub fn moves_pointer(self) -> bool {
        !matches!(self, EventKind::Resize)
    }
}

/// Listeners to register for `settings`. Resize is always present.
pub fn subscriptions(settings: &Settings) -> Vec<EventKind> {
    let mut kinds = Vec::with_capacity(4);
    if settings.pointer {
        kinds.extend([EventKind::PointerMove, EventKind::TouchMove, EventKind::Click]);
    }
    kinds.push(EventKind::Resize);
    kinds
}
