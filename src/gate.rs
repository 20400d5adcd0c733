//! Tooltip activation gate.
//!
//! A two-state machine driven by pointer and touch events on the chart
//! surface. It only decides whether the resolved tooltip is displayed; the
//! resolver itself runs on every hover regardless.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GateState {
    #[default]
    Inactive,
    Active,
}

/// Input events from the host UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    /// Pointer moved; `inside` tells whether it is over the chart surface.
    Move { inside: bool },
    /// Touch started; `inside` tells whether it landed on the chart surface.
    Touch { inside: bool },
    /// Pointer left the chart surface.
    Leave,
    /// A click anywhere in the document outside the chart.
    ClickOutside,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TooltipGate {
    state: GateState,
}

impl TooltipGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == GateState::Active
    }

    pub fn activate(&mut self) {
        self.state = GateState::Active;
    }

    pub fn deactivate(&mut self) {
        self.state = GateState::Inactive;
    }

    /// Apply one event and return the resulting state.
    pub fn handle(&mut self, event: PointerEvent) -> GateState {
        match event {
            PointerEvent::Move { inside: true } | PointerEvent::Touch { inside: true } => {
                self.activate()
            }
            PointerEvent::Move { inside: false }
            | PointerEvent::Touch { inside: false }
            | PointerEvent::Leave
            | PointerEvent::ClickOutside => self.deactivate(),
        }
        log::trace!("tooltip gate {:?} -> {:?}", event, self.state);
        self.state
    }
}
