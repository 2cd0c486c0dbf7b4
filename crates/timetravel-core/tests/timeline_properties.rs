//! Property tests for the timeline state machine and the projector.
//!
//! Random sequences of navigation, edits and history refreshes are applied,
//! and after every step the position must be valid for the history length
//! and the displayed text must match the relationship equation.

use proptest::prelude::*;

use timetravel_core::{Position, Projector, Snapshot, Timeline};

#[derive(Debug, Clone)]
enum Op {
    Back,
    Forward,
    Jump(i64),
    Edit(String),
    Refresh(Vec<String>),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => Just(Op::Back),
        3 => Just(Op::Forward),
        3 => (-3i64..12).prop_map(Op::Jump),
        2 => "[a-z]{0,6}".prop_map(Op::Edit),
        1 => prop::collection::vec("[a-z]{0,6}", 0..6).prop_map(Op::Refresh),
    ]
}

fn position_is_valid(t: &Timeline) -> bool {
    match t.position() {
        Position::Current => true,
        Position::Viewing(i) => i < t.len(),
    }
}

fn expected_display<'a>(t: &'a Timeline, draft: &'a str) -> &'a str {
    match t.position().as_index() {
        -1 => draft,
        i => &t.snapshots()[i as usize].code,
    }
}

proptest! {
    #[test]
    fn invariants_hold_after_every_operation(
        initial in prop::collection::vec("[a-z]{0,6}", 0..6),
        ops in prop::collection::vec(op_strategy(), 0..40),
    ) {
        let mut timeline = Timeline::from_snapshots(initial.into_iter().map(Snapshot::new).collect());
        let mut projector = Projector::default();

        for op in ops {
            match op {
                Op::Back => { timeline.go_back(); }
                Op::Forward => { timeline.go_forward(); }
                Op::Jump(i) => { timeline.jump_to(i); }
                Op::Edit(text) => projector.on_editor_changed(text),
                Op::Refresh(codes) => timeline.replace(codes.into_iter().map(Snapshot::new).collect()),
            }
            prop_assert!(position_is_valid(&timeline));
            prop_assert_eq!(projector.display(&timeline), expected_display(&timeline, projector.live_draft()));
        }
    }

    #[test]
    fn forward_from_current_and_back_from_oldest_are_no_ops(len in 0usize..8) {
        let mut timeline = Timeline::from_snapshots((0..len).map(|i| Snapshot::new(i.to_string())).collect());
        prop_assert_eq!(timeline.go_forward(), Position::Current);

        if len > 0 {
            timeline.jump_to(0);
            prop_assert_eq!(timeline.go_back(), Position::Viewing(0));
        }
    }

    #[test]
    fn out_of_scale_jumps_change_nothing(len in 0usize..8, start in 0i64..8, target in prop_oneof![-100i64..0, 9i64..100]) {
        let mut timeline = Timeline::from_snapshots((0..len).map(|i| Snapshot::new(i.to_string())).collect());
        let before = timeline.jump_to(start);
        prop_assert_eq!(timeline.jump_to(target), before);
    }

    #[test]
    fn back_from_current_visits_every_snapshot_newest_first(len in 1usize..8) {
        let mut timeline = Timeline::from_snapshots((0..len).map(|i| Snapshot::new(i.to_string())).collect());
        let visited: Vec<Position> = (0..len).map(|_| timeline.go_back()).collect();
        let expected: Vec<Position> = (0..len).rev().map(Position::Viewing).collect();
        prop_assert_eq!(visited, expected);
    }
}

#[test]
fn saved_code_is_reachable_at_previous_length() {
    // save(code) then jump_to(previous length) shows the saved code.
    let mut timeline = Timeline::from_snapshots(vec![Snapshot::new("A"), Snapshot::new("B")]);
    let previous_len = timeline.len() as i64;

    let mut refreshed = timeline.snapshots().to_vec();
    refreshed.push(Snapshot::new("C"));
    timeline.replace(refreshed);

    let projector = Projector::new("draft");
    timeline.jump_to(previous_len);
    assert_eq!(projector.display(&timeline), "C");
}
