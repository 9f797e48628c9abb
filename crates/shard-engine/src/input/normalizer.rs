use crate::backend::{EventSource, RawEvent};

use super::event::{InputEvent, InputKind};
use super::listeners::{ListenerRef, Listeners};
use super::types::ButtonState;

/// Input polling configuration.
#[derive(Debug, Clone)]
pub struct InputConfig {
    /// Minimum accumulated frame time, in seconds, before events are drained.
    pub poll_interval: f64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self { poll_interval: 1.0 / 60.0 }
    }
}

/// Whether the last tick drained the backend queue.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PollState {
    /// Accumulated time is below the poll interval.
    Idle,
    /// Accumulated time reached the interval; the queue is drained each tick.
    Polling,
}

/// Time-gated poller turning backend events into listener dispatches.
///
/// Each [`poll`](Self::poll) adds the frame delta to an accumulator. Below the
/// poll interval nothing is read. At or above it, raw events are popped one
/// at a time until the source is empty; each recognized event is translated
/// and dispatched to its listeners before the next pop.
///
/// The accumulator is never drawn down by a poll pass, so once the interval
/// has been reached every later tick drains the queue.
pub struct InputNormalizer {
    elapsed: f64,
    interval: f64,
    listeners: Listeners,
}

impl InputNormalizer {
    pub fn new(config: &InputConfig) -> Self {
        Self {
            elapsed: 0.0,
            interval: config.poll_interval,
            listeners: Listeners::new(),
        }
    }

    pub fn listeners(&self) -> &Listeners {
        &self.listeners
    }

    pub fn listeners_mut(&mut self) -> &mut Listeners {
        &mut self.listeners
    }

    pub fn subscribe(&mut self, kind: InputKind, listener: ListenerRef) {
        self.listeners.subscribe(kind, listener);
    }

    pub fn subscribe_all(&mut self, listener: ListenerRef) {
        self.listeners.subscribe_all(listener);
    }

    pub fn unsubscribe(&mut self, listener: &ListenerRef) {
        self.listeners.unsubscribe(listener);
    }

    /// Accumulated, unconsumed frame time in seconds.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn state(&self) -> PollState {
        if self.elapsed < self.interval { PollState::Idle } else { PollState::Polling }
    }

    /// Advances by `dt` seconds and drains `source` if the interval is reached.
    ///
    /// Returns the number of raw events popped, recognized or not.
    pub fn poll<S>(&mut self, dt: f64, source: &mut S) -> usize
    where
        S: EventSource + ?Sized,
    {
        self.elapsed += dt;

        let mut drained = 0;
        while self.elapsed >= self.interval {
            let Some(raw) = source.poll_event() else { break };
            drained += 1;

            if let Some(event) = normalize(&raw) {
                if event.kind == InputKind::KeyDown {
                    log::debug!("key down: {:?} (code {})", event.key, event.code);
                }
                self.listeners.dispatch(&event);
            }
        }

        drained
    }
}

/// Translates a raw backend event into its abstract form.
///
/// Returns `None` for kinds the input layer does not model.
pub fn normalize(raw: &RawEvent) -> Option<InputEvent> {
    match *raw {
        RawEvent::PointerMotion { x, y } => {
            Some(InputEvent::pointer(InputKind::PointerMove, x, y, None))
        }

        RawEvent::PointerButton { button, state, x, y } => {
            let kind = match state {
                ButtonState::Pressed => InputKind::PointerDown,
                ButtonState::Released => InputKind::PointerUp,
            };
            Some(InputEvent::pointer(kind, x, y, Some(button)))
        }

        RawEvent::PointerWheel { x, y } => {
            Some(InputEvent::pointer(InputKind::PointerWheel, x, y, None))
        }

        RawEvent::Key { key, state, code, .. } => {
            let kind = match state {
                ButtonState::Pressed => InputKind::KeyDown,
                ButtonState::Released => InputKind::KeyUp,
            };
            Some(InputEvent::key(kind, key, code))
        }

        RawEvent::Text(_)
        | RawEvent::Focused(_)
        | RawEvent::Resized { .. }
        | RawEvent::CloseRequested => None,
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    use super::*;
    use crate::input::{listener, Key, MouseButton};

    const FRAME: f64 = 1.0 / 60.0;

    fn recorder(n: &mut InputNormalizer) -> Rc<RefCell<Vec<InputEvent>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = Rc::clone(&seen);
        n.subscribe_all(listener(move |e: &InputEvent| s.borrow_mut().push(*e)));
        seen
    }

    fn motion(x: f32) -> RawEvent {
        RawEvent::PointerMotion { x, y: 0.0 }
    }

    #[test]
    fn nothing_is_drained_below_the_interval() {
        let mut n = InputNormalizer::new(&InputConfig::default());
        let seen = recorder(&mut n);
        let mut queue: VecDeque<RawEvent> = VecDeque::from([motion(1.0)]);

        assert_eq!(n.poll(0.5 * FRAME, &mut queue), 0);
        assert_eq!(n.state(), PollState::Idle);
        assert_eq!(queue.len(), 1);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn half_frames_start_draining_on_second_tick() {
        let mut n = InputNormalizer::new(&InputConfig::default());
        let seen = recorder(&mut n);
        let mut queue: VecDeque<RawEvent> = VecDeque::from([motion(1.0), motion(2.0)]);

        assert_eq!(n.poll(0.5 * FRAME, &mut queue), 0);
        assert_eq!(n.poll(0.5 * FRAME, &mut queue), 2);
        assert_eq!(n.state(), PollState::Polling);
        assert_eq!(seen.borrow().len(), 2);
        assert!(queue.is_empty());
    }

    #[test]
    fn backlog_drains_in_arrival_order_within_one_tick() {
        let mut n = InputNormalizer::new(&InputConfig::default());
        let seen = recorder(&mut n);
        let mut queue: VecDeque<RawEvent> = (0..5).map(|i| motion(i as f32)).collect();

        assert_eq!(n.poll(FRAME, &mut queue), 5);
        let xs: Vec<f32> = seen.borrow().iter().map(|e| e.x).collect();
        assert_eq!(xs, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn accumulator_is_not_reset_after_draining() {
        let mut n = InputNormalizer::new(&InputConfig::default());
        let mut queue: VecDeque<RawEvent> = VecDeque::new();

        n.poll(FRAME, &mut queue);
        queue.push_back(motion(3.0));
        assert_eq!(n.poll(0.0, &mut queue), 1);
        assert!(n.elapsed() >= FRAME);
    }

    #[test]
    fn release_maps_to_pointer_up_only() {
        let mut n = InputNormalizer::new(&InputConfig::default());
        let seen = recorder(&mut n);
        let mut queue: VecDeque<RawEvent> = VecDeque::from([RawEvent::PointerButton {
            button: MouseButton::Right,
            state: ButtonState::Released,
            x: 12.0,
            y: 34.0,
        }]);

        n.poll(FRAME, &mut queue);

        let seen = seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].kind, InputKind::PointerUp);
        assert_eq!(seen[0].button, Some(MouseButton::Right));
        assert_eq!((seen[0].x, seen[0].y), (12.0, 34.0));
    }

    #[test]
    fn every_recognized_kind_maps_to_its_abstract_kind() {
        let cases = [
            (motion(0.0), InputKind::PointerMove),
            (
                RawEvent::PointerButton { button: MouseButton::Left, state: ButtonState::Pressed, x: 0.0, y: 0.0 },
                InputKind::PointerDown,
            ),
            (RawEvent::PointerWheel { x: 0.0, y: -1.0 }, InputKind::PointerWheel),
            (
                RawEvent::Key { key: Key::W, state: ButtonState::Pressed, code: 26, repeat: false },
                InputKind::KeyDown,
            ),
            (
                RawEvent::Key { key: Key::W, state: ButtonState::Released, code: 26, repeat: false },
                InputKind::KeyUp,
            ),
        ];

        for (raw, kind) in cases {
            assert_eq!(normalize(&raw).map(|e| e.kind), Some(kind), "{raw:?}");
        }
    }

    #[test]
    fn key_events_carry_key_and_code() {
        let e = normalize(&RawEvent::Key {
            key: Key::Space,
            state: ButtonState::Pressed,
            code: 44,
            repeat: true,
        })
        .expect("key event");
        assert_eq!(e.key, Some(Key::Space));
        assert_eq!(e.code, 44);
        assert_eq!(e.button, None);
    }

    #[test]
    fn unrecognized_events_are_popped_but_not_dispatched() {
        let mut n = InputNormalizer::new(&InputConfig::default());
        let seen = recorder(&mut n);
        let mut queue: VecDeque<RawEvent> = VecDeque::from([
            RawEvent::Focused(true),
            RawEvent::Text("a".into()),
            motion(7.0),
        ]);

        assert_eq!(n.poll(FRAME, &mut queue), 3);
        assert_eq!(seen.borrow().len(), 1);
        assert_eq!(seen.borrow()[0].x, 7.0);
    }

    #[test]
    fn interleaved_kinds_dispatch_in_order() {
        let mut n = InputNormalizer::new(&InputConfig::default());
        let log = Rc::new(RefCell::new(Vec::new()));
        let (a, b) = (Rc::clone(&log), Rc::clone(&log));
        n.subscribe(InputKind::KeyDown, listener(move |_: &InputEvent| a.borrow_mut().push("down")));
        n.subscribe(InputKind::KeyUp, listener(move |_: &InputEvent| b.borrow_mut().push("up")));

        let key = |state| RawEvent::Key { key: Key::A, state, code: 4, repeat: false };
        let mut queue: VecDeque<RawEvent> = VecDeque::from([
            key(ButtonState::Pressed),
            key(ButtonState::Released),
            key(ButtonState::Pressed),
        ]);

        n.poll(FRAME, &mut queue);
        assert_eq!(*log.borrow(), vec!["down", "up", "down"]);
    }
}
