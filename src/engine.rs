//! Edge-triggered pointer event model over the acquisition stream.

use statig::{blocking::IntoStateMachineExt as _, prelude::*};

use crate::filter::PositionFilter;

/// One discrete pointer transition reported to the consumer. While contact
/// is held every accepted sample produces an event with `pressed == true`;
/// the release produces exactly one event with `pressed == false` carrying
/// the last position observed during the run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PointerEvent {
    pub x: i16,
    pub y: i16,
    pub pressed: bool,
}

#[derive(Clone, Copy, Debug)]
enum ContactEvent {
    Sample { x: i16, y: i16 },
    Released,
}

#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct EngineOutput {
    pub(crate) events: [Option<PointerEvent>; 2],
}

#[derive(Clone, Copy, Debug, Default)]
struct DispatchContext {
    events: [Option<PointerEvent>; 2],
}

impl DispatchContext {
    fn emit(&mut self, event: PointerEvent) {
        for slot in &mut self.events {
            if slot.is_none() {
                *slot = Some(event);
                return;
            }
        }
    }

    fn finish(self) -> EngineOutput {
        EngineOutput {
            events: self.events,
        }
    }
}

/// Per-instance contact tracker: owns the temporal filter and the last known
/// position, and turns the sample stream into press/move/release events.
pub(crate) struct ContactEngine {
    machine: statig::blocking::StateMachine<ContactHsm>,
}

impl ContactEngine {
    pub(crate) fn new(filter_depth: usize) -> Self {
        Self {
            machine: ContactHsm::new(filter_depth).state_machine(),
        }
    }

    /// Feed one calibrated sample taken while the detect line reports
    /// contact.
    pub(crate) fn sample(&mut self, x: i16, y: i16) -> EngineOutput {
        self.handle(ContactEvent::Sample { x, y })
    }

    /// Report that the detect line no longer shows contact.
    pub(crate) fn release(&mut self) -> EngineOutput {
        self.handle(ContactEvent::Released)
    }

    fn handle(&mut self, event: ContactEvent) -> EngineOutput {
        let mut context = DispatchContext::default();
        self.machine.handle_with_context(&event, &mut context);
        context.finish()
    }
}

struct ContactHsm {
    filter: PositionFilter,
    last_x: i16,
    last_y: i16,
}

impl ContactHsm {
    fn new(filter_depth: usize) -> Self {
        Self {
            filter: PositionFilter::new(filter_depth),
            last_x: 0,
            last_y: 0,
        }
    }

    fn track(&mut self, context: &mut DispatchContext, x: i16, y: i16) {
        let (filtered_x, filtered_y) = self.filter.push(x, y);
        self.last_x = filtered_x;
        self.last_y = filtered_y;
        context.emit(PointerEvent {
            x: filtered_x,
            y: filtered_y,
            pressed: true,
        });
    }
}

#[state_machine(initial = "State::idle()")]
impl ContactHsm {
    #[state]
    fn idle(&mut self, context: &mut DispatchContext, event: &ContactEvent) -> Outcome<State> {
        match event {
            ContactEvent::Sample { x, y } => {
                self.track(context, *x, *y);
                Transition(State::pressed())
            }
            // A run in which every sample was dropped never pressed, so it
            // must not report a release either.
            ContactEvent::Released => Handled,
        }
    }

    #[state]
    fn pressed(&mut self, context: &mut DispatchContext, event: &ContactEvent) -> Outcome<State> {
        match event {
            ContactEvent::Sample { x, y } => {
                self.track(context, *x, *y);
                Handled
            }
            ContactEvent::Released => {
                context.emit(PointerEvent {
                    x: self.last_x,
                    y: self.last_y,
                    pressed: false,
                });
                self.filter.reset();
                Transition(State::idle())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(output: EngineOutput, out: &mut std::vec::Vec<PointerEvent>) {
        for event in output.events.into_iter().flatten() {
            out.push(event);
        }
    }

    #[test]
    fn samples_emit_pressed_events_with_filtered_position() {
        let mut engine = ContactEngine::new(4);
        let mut events = std::vec::Vec::new();

        drain(engine.sample(10, 10), &mut events);
        drain(engine.sample(20, 20), &mut events);
        drain(engine.sample(30, 30), &mut events);

        assert_eq!(
            events,
            std::vec![
                PointerEvent {
                    x: 10,
                    y: 10,
                    pressed: true
                },
                PointerEvent {
                    x: 15,
                    y: 15,
                    pressed: true
                },
                PointerEvent {
                    x: 20,
                    y: 20,
                    pressed: true
                },
            ]
        );
    }

    #[test]
    fn release_emits_exactly_once_with_last_position() {
        let mut engine = ContactEngine::new(4);
        let mut events = std::vec::Vec::new();

        drain(engine.sample(10, 10), &mut events);
        drain(engine.sample(20, 20), &mut events);
        events.clear();

        drain(engine.release(), &mut events);
        assert_eq!(
            events,
            std::vec![PointerEvent {
                x: 15,
                y: 15,
                pressed: false
            }]
        );

        // A second release without a new contact emits nothing.
        events.clear();
        drain(engine.release(), &mut events);
        assert!(events.is_empty());
    }

    #[test]
    fn release_without_any_sample_emits_nothing() {
        let mut engine = ContactEngine::new(4);
        let mut events = std::vec::Vec::new();

        drain(engine.release(), &mut events);
        assert!(events.is_empty());
    }

    #[test]
    fn new_contact_does_not_inherit_filter_history() {
        let mut engine = ContactEngine::new(4);
        let mut events = std::vec::Vec::new();

        drain(engine.sample(10, 10), &mut events);
        drain(engine.sample(20, 20), &mut events);
        drain(engine.release(), &mut events);
        events.clear();

        // First sample of the next run must come through unaveraged.
        drain(engine.sample(100, 100), &mut events);
        assert_eq!(
            events,
            std::vec![PointerEvent {
                x: 100,
                y: 100,
                pressed: true
            }]
        );
    }

    #[test]
    fn one_release_per_run_across_many_runs() {
        let mut engine = ContactEngine::new(2);
        let mut events = std::vec::Vec::new();

        for run in 0..3i16 {
            drain(engine.sample(run * 10, run * 10), &mut events);
            drain(engine.release(), &mut events);
        }

        let releases: std::vec::Vec<_> = events.iter().filter(|ev| !ev.pressed).collect();
        assert_eq!(releases.len(), 3);
        assert_eq!(releases[2].x, 20);
    }
}
