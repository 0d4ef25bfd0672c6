//! Touch multiplexer
//!
//! Translates one multi-pointer gesture batch into canonical per-pointer
//! [`TouchEvent`]s. The translation is stateless: every batch carries the
//! full set of tracked pointers, and the engine is keyed by pointer id,
//! never by the pointer's index in the batch.
//!
//! | action | triggering pointer | other pointers |
//! |---|---|---|
//! | `Down`, `PointerDown` | `Began` | - |
//! | `Move` | `Moved` | `Moved` |
//! | `Up`, `Cancel` | `Ended` | `Ended` |
//! | `PointerUp` | `Ended` | - |
//!
//! `Up` and `Cancel` finish the whole gesture, so every contact still in the
//! batch ends with them.

use relay_platform::{Pointer, TouchAction, TouchEvent, TouchSink};
use smallvec::SmallVec;

/// Events produced by one batch; four contacts fit inline
pub type TouchEvents = SmallVec<[TouchEvent; 4]>;

/// One platform gesture dispatch
#[derive(Clone, Copy, Debug)]
pub struct MotionBatch<'a> {
    /// What happened
    pub action: TouchAction,
    /// Index (into `pointers`) of the pointer that triggered the dispatch
    pub action_index: usize,
    /// Every currently tracked pointer, in platform enumeration order
    pub pointers: &'a [Pointer],
}

impl<'a> MotionBatch<'a> {
    pub fn new(action: TouchAction, action_index: usize, pointers: &'a [Pointer]) -> Self {
        Self {
            action,
            action_index,
            pointers,
        }
    }
}

/// Classify every pointer in `batch`
pub fn translate(batch: &MotionBatch<'_>) -> TouchEvents {
    let mut events = TouchEvents::new();

    match batch.action {
        TouchAction::Move => {
            events.extend(batch.pointers.iter().map(|p| TouchEvent::Moved {
                id: p.id,
                x: p.x,
                y: p.y,
            }));
            return events;
        }
        TouchAction::Up | TouchAction::Cancel => {
            events.extend(batch.pointers.iter().map(|p| TouchEvent::Ended { id: p.id }));
            return events;
        }
        _ => {}
    }

    let Some(trigger) = batch.pointers.get(batch.action_index) else {
        tracing::debug!(
            action = ?batch.action,
            index = batch.action_index,
            count = batch.pointers.len(),
            "triggering pointer index outside batch"
        );
        return events;
    };

    if batch.action.is_begin() {
        events.push(TouchEvent::Began {
            id: trigger.id,
            x: trigger.x,
            y: trigger.y,
        });
    } else if batch.action.is_end() {
        events.push(TouchEvent::Ended { id: trigger.id });
    }

    events
}

/// Forward one canonical event to the engine
pub fn deliver<S: TouchSink + ?Sized>(event: TouchEvent, sink: &mut S) {
    match event {
        TouchEvent::Began { id, x, y } => sink.touch_begin(id, x, y),
        TouchEvent::Moved { id, x, y } => sink.touch_move(id, x, y),
        TouchEvent::Ended { id } => sink.touch_end(id),
    }
}

/// Translate `batch` and deliver the result, returning the number of engine calls
pub fn dispatch<S: TouchSink + ?Sized>(batch: &MotionBatch<'_>, sink: &mut S) -> usize {
    let events = translate(batch);
    for event in &events {
        tracing::trace!(?event, "touch");
        deliver(*event, sink);
    }
    events.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingEngine;
    use crate::testing::EngineCall;

    fn p(id: i64, x: f32, y: f32) -> Pointer {
        Pointer::new(id, x, y)
    }

    #[test]
    fn test_down_begins_triggering_pointer_only() {
        let pointers = [p(1, 10.0, 10.0)];
        let events = translate(&MotionBatch::new(TouchAction::Down, 0, &pointers));
        assert_eq!(
            events.as_slice(),
            &[TouchEvent::Began {
                id: 1,
                x: 10.0,
                y: 10.0
            }]
        );
    }

    #[test]
    fn test_pointer_down_ignores_existing_contacts() {
        let pointers = [p(1, 10.0, 10.0), p(4, 50.0, 60.0)];
        let events = translate(&MotionBatch::new(TouchAction::PointerDown, 1, &pointers));
        assert_eq!(
            events.as_slice(),
            &[TouchEvent::Began {
                id: 4,
                x: 50.0,
                y: 60.0
            }]
        );
    }

    #[test]
    fn test_move_resends_every_pointer() {
        let pointers = [p(1, 11.0, 12.0), p(4, 51.0, 62.0), p(9, 0.0, 1.0)];
        let events = translate(&MotionBatch::new(TouchAction::Move, 2, &pointers));
        let ids: Vec<i64> = events.iter().map(TouchEvent::id).collect();
        assert_eq!(ids, vec![1, 4, 9]);
        assert!(events.iter().all(|e| matches!(e, TouchEvent::Moved { .. })));
        assert_eq!(events[1].position(), Some((51.0, 62.0)));
    }

    #[test]
    fn test_move_without_pointers_is_noop() {
        let events = translate(&MotionBatch::new(TouchAction::Move, 0, &[]));
        assert!(events.is_empty());
    }

    #[test]
    fn test_every_end_kind_resolves_to_end() {
        let pointers = [p(5, 2.0, 2.0)];
        for action in [TouchAction::Up, TouchAction::Cancel, TouchAction::PointerUp] {
            let events = translate(&MotionBatch::new(action, 0, &pointers));
            assert_eq!(events.as_slice(), &[TouchEvent::Ended { id: 5 }], "{action:?}");
        }
    }

    #[test]
    fn test_pointer_up_ends_triggering_pointer_only() {
        let pointers = [p(3, 1.0, 1.0), p(5, 2.0, 2.0)];
        let events = translate(&MotionBatch::new(TouchAction::PointerUp, 1, &pointers));
        assert_eq!(events.as_slice(), &[TouchEvent::Ended { id: 5 }]);
    }

    #[test]
    fn test_cancel_ends_every_contact() {
        let pointers = [p(3, 1.0, 1.0), p(5, 2.0, 2.0)];
        let events = translate(&MotionBatch::new(TouchAction::Cancel, 0, &pointers));
        assert_eq!(
            events.as_slice(),
            &[TouchEvent::Ended { id: 3 }, TouchEvent::Ended { id: 5 }]
        );
    }

    #[test]
    fn test_cancelled_ids_can_begin_again() {
        let mut engine = RecordingEngine::default();
        let both = [p(0, 1.0, 1.0), p(1, 2.0, 2.0)];
        dispatch(&MotionBatch::new(TouchAction::Down, 0, &both[..1]), &mut engine);
        dispatch(&MotionBatch::new(TouchAction::PointerDown, 1, &both), &mut engine);
        dispatch(&MotionBatch::new(TouchAction::Cancel, 0, &both), &mut engine);
        // The platform reuses both ids for the next gesture
        dispatch(&MotionBatch::new(TouchAction::Down, 0, &both[..1]), &mut engine);
        dispatch(&MotionBatch::new(TouchAction::PointerDown, 1, &both), &mut engine);

        assert_eq!(
            engine.calls,
            vec![
                EngineCall::TouchBegin(0, 1.0, 1.0),
                EngineCall::TouchBegin(1, 2.0, 2.0),
                EngineCall::TouchEnd(0),
                EngineCall::TouchEnd(1),
                EngineCall::TouchBegin(0, 1.0, 1.0),
                EngineCall::TouchBegin(1, 2.0, 2.0),
            ]
        );
    }

    #[test]
    fn test_index_outside_batch_emits_nothing() {
        let pointers = [p(1, 0.0, 0.0)];
        assert!(translate(&MotionBatch::new(TouchAction::Down, 3, &pointers)).is_empty());
        assert!(translate(&MotionBatch::new(TouchAction::PointerUp, 1, &pointers)).is_empty());
    }

    #[test]
    fn test_id_not_index_is_engine_key() {
        // Platform reorders pointers between batches
        let mut engine = RecordingEngine::default();
        dispatch(
            &MotionBatch::new(TouchAction::Down, 0, &[p(7, 1.0, 1.0)]),
            &mut engine,
        );
        dispatch(
            &MotionBatch::new(TouchAction::PointerDown, 0, &[p(2, 5.0, 5.0), p(7, 1.0, 1.0)]),
            &mut engine,
        );
        dispatch(
            &MotionBatch::new(TouchAction::PointerUp, 1, &[p(2, 5.0, 5.0), p(7, 1.0, 1.0)]),
            &mut engine,
        );
        assert_eq!(
            engine.calls,
            vec![
                EngineCall::TouchBegin(7, 1.0, 1.0),
                EngineCall::TouchBegin(2, 5.0, 5.0),
                EngineCall::TouchEnd(7),
            ]
        );
    }

    #[test]
    fn test_dispatch_counts_calls() {
        let mut engine = RecordingEngine::default();
        let pointers = [p(1, 0.0, 0.0), p(2, 0.0, 0.0)];
        assert_eq!(
            dispatch(&MotionBatch::new(TouchAction::Move, 0, &pointers), &mut engine),
            2
        );
        assert_eq!(
            dispatch(&MotionBatch::new(TouchAction::PointerUp, 0, &pointers), &mut engine),
            1
        );
        assert_eq!(
            dispatch(&MotionBatch::new(TouchAction::Cancel, 0, &pointers), &mut engine),
            2
        );
    }
}
