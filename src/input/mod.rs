use egui::Pos2;

mod handler;
mod position;
mod router;

pub use handler::InputHandler;
pub use position::{OffsetNode, RawPosition, distance_to_body, resolve_position};
pub use router::dispatch;

/// User agent fragments that identify touch-first devices
const TOUCH_AGENTS: [&str; 8] = [
    "android",
    "webos",
    "iphone",
    "ipad",
    "ipod",
    "blackberry",
    "iemobile",
    "opera mini",
];

/// Which platform event family drives the board.
///
/// Computed once when a board is created and handed to whatever registers
/// the input listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeviceCapability {
    #[default]
    Mouse,
    Touch,
}

impl DeviceCapability {
    pub fn from_user_agent(user_agent: &str) -> Self {
        let user_agent = user_agent.to_ascii_lowercase();
        if TOUCH_AGENTS.iter().any(|agent| user_agent.contains(agent)) {
            DeviceCapability::Touch
        } else {
            DeviceCapability::Mouse
        }
    }

    /// DOM event names to listen to, with the phase each one maps onto
    pub fn listened_events(self) -> &'static [(&'static str, PointerPhase)] {
        match self {
            DeviceCapability::Mouse => &[
                ("mousedown", PointerPhase::Down),
                ("mousemove", PointerPhase::Move),
                ("mouseup", PointerPhase::Up),
                ("mouseleave", PointerPhase::Leave),
            ],
            DeviceCapability::Touch => &[
                ("touchstart", PointerPhase::Down),
                ("touchmove", PointerPhase::Move),
                ("touchend", PointerPhase::Up),
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    Leave,
}

/// The normalized stream every input source is turned into.
/// Positions are surface-local.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Pos2),
    Move(Pos2),
    Up,
    /// Pointer left the surface while tracking
    Leave,
}

impl PointerEvent {
    /// Pair a phase with its resolved position.
    /// Down and move need a position, up and leave do not.
    pub fn from_phase(phase: PointerPhase, position: Option<Pos2>) -> Option<Self> {
        match phase {
            PointerPhase::Down => position.map(PointerEvent::Down),
            PointerPhase::Move => position.map(PointerEvent::Move),
            PointerPhase::Up => Some(PointerEvent::Up),
            PointerPhase::Leave => Some(PointerEvent::Leave),
        }
    }
}
