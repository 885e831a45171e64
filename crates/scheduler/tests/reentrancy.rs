//! Mutations made from inside a step, against the target being scanned and
//! against other targets.

mod common;

use std::cell::Cell;
use std::rc::Rc;

use action_scheduler::{Action, ActionContext, ActionId, ActionManager};
use common::{Counters, Key, Probe};

fn slot() -> Rc<Cell<Option<ActionId>>> {
    Rc::new(Cell::new(None))
}

#[test]
fn removing_a_later_action_drops_it_before_it_steps() {
    let manager: ActionManager<Key> = ActionManager::new();
    let first = Counters::new();
    let second = Counters::new();
    let victim = slot();

    let id = Rc::clone(&victim);
    manager.add_action(
        Probe::endless(&first).on_step(move |cx| {
            if let Some(id) = id.take() {
                cx.manager().remove_action(id);
            }
        }),
        &"A",
        false,
    );
    victim.set(Some(manager.add_action(Probe::endless(&second), &"A", false)));

    manager.update(0.1);

    assert_eq!(second.steps(), 0);
    assert_eq!(second.drops(), 1);
    assert_eq!(first.steps(), 1);
    assert_eq!(manager.number_of_running_actions_in_target(&"A"), 1);
}

#[test]
fn removing_an_earlier_action_does_not_skip_the_rest() {
    let manager: ActionManager<Key> = ActionManager::new();
    let counters: Vec<_> = (0..4).map(|_| Counters::new()).collect();
    let victim = slot();

    victim.set(Some(manager.add_action(Probe::endless(&counters[0]), &"A", false)));
    let id = Rc::clone(&victim);
    manager.add_action(
        Probe::endless(&counters[1]).on_step(move |cx| {
            if let Some(id) = id.take() {
                cx.manager().remove_action(id);
            }
        }),
        &"A",
        false,
    );
    manager.add_action(Probe::endless(&counters[2]), &"A", false);
    manager.add_action(Probe::endless(&counters[3]), &"A", false);

    manager.update(0.1);

    let steps: Vec<_> = counters.iter().map(|c| c.steps()).collect();
    assert_eq!(steps, vec![1, 1, 1, 1]);
    assert_eq!(counters[0].drops(), 1);

    manager.update(0.1);
    let steps: Vec<_> = counters.iter().map(|c| c.steps()).collect();
    assert_eq!(steps, vec![1, 2, 2, 2]);
}

#[test]
fn clearing_own_target_stops_the_scan_and_salvages_current() {
    let manager: ActionManager<Key> = ActionManager::new();
    let before = Counters::new();
    let current = Counters::new();
    let after = Counters::new();

    manager.add_action(Probe::endless(&before), &"A", false);
    manager.add_action(
        Probe::endless(&current).on_step(|cx| {
            let removed = cx.manager().remove_all_actions_from_target(cx.target());
            assert_eq!(removed, 3);
            assert!(cx.manager().has_target(cx.target()));
            assert_eq!(cx.manager().number_of_running_actions_in_target(cx.target()), 0);
        }),
        &"A",
        false,
    );
    manager.add_action(Probe::endless(&after), &"A", false);

    manager.update(0.1);

    assert_eq!(before.steps(), 1);
    assert_eq!(current.steps(), 1);
    assert_eq!(after.steps(), 0);
    assert_eq!(before.drops() + current.drops() + after.drops(), 3);
    assert!(!manager.has_target(&"A"));
}

#[test]
fn clearing_then_refilling_own_target_keeps_the_handle() {
    let manager: ActionManager<Key> = ActionManager::new();
    let current = Counters::new();
    let fresh = Counters::new();

    let spawn = Rc::clone(&fresh);
    manager.add_action(
        Probe::lasting(1, &current).on_step(move |cx| {
            cx.manager().remove_all_actions_from_target(cx.target());
            cx.manager()
                .add_action(Probe::endless(&spawn), cx.target(), false);
        }),
        &"A",
        false,
    );

    manager.update(0.1);

    assert_eq!(current.drops(), 1);
    assert_eq!(current.stops.get(), 0);
    assert!(manager.has_target(&"A"));
    assert_eq!(manager.number_of_running_actions_in_target(&"A"), 1);
    assert_eq!(fresh.steps(), 1);
}

#[test]
fn actions_appended_to_the_scanned_target_step_this_frame() {
    let manager: ActionManager<Key> = ActionManager::new();
    let parent = Counters::new();
    let child = Counters::new();

    let spawned = Rc::clone(&child);
    manager.add_action(
        Probe::lasting(1, &parent).on_step(move |cx| {
            cx.manager()
                .add_action(Probe::lasting(2, &spawned), cx.target(), false);
        }),
        &"A",
        false,
    );

    manager.update(0.1);

    assert_eq!(parent.drops(), 1);
    assert_eq!(child.starts.get(), 1);
    assert_eq!(child.steps(), 1);
    assert_eq!(manager.number_of_running_actions_in_target(&"A"), 1);
}

#[test]
fn actions_added_to_a_new_target_wait_for_the_next_frame() {
    let manager: ActionManager<Key> = ActionManager::new();
    let parent = Counters::new();
    let child = Counters::new();

    let spawned = Rc::clone(&child);
    manager.add_action(
        Probe::lasting(1, &parent).on_step(move |cx| {
            cx.manager()
                .add_action(Probe::endless(&spawned), &"fresh", false);
        }),
        &"A",
        false,
    );

    manager.update(0.1);
    assert_eq!(child.steps(), 0);

    manager.update(0.1);
    assert_eq!(child.steps(), 1);
}

#[test]
fn removals_on_other_targets_apply_immediately() {
    let manager: ActionManager<Key> = ActionManager::new();
    let done = Counters::new();
    let pending = Counters::new();
    let remover = Counters::new();

    manager.add_action(Probe::endless(&done), &"scanned", false);
    manager.add_action(
        Probe::lasting(1, &remover).on_step(|cx| {
            let manager = cx.manager();
            assert_eq!(manager.remove_all_actions_from_target(&"scanned"), 1);
            assert_eq!(manager.remove_all_actions_from_target(&"pending"), 1);
            assert!(!manager.has_target(&"scanned"));
            assert!(!manager.has_target(&"pending"));
        }),
        &"remover",
        false,
    );
    manager.add_action(Probe::endless(&pending), &"pending", false);

    manager.update(0.1);

    assert_eq!(done.steps(), 1);
    assert_eq!(pending.steps(), 0);
    assert_eq!(done.drops() + pending.drops(), 2);
    assert_eq!(manager.number_of_running_actions(), 0);
}

#[test]
fn pausing_an_unscanned_target_skips_it_this_frame() {
    let manager: ActionManager<Key> = ActionManager::new();
    let pauser = Counters::new();
    let other = Counters::new();

    manager.add_action(
        Probe::lasting(1, &pauser).on_step(|cx| {
            assert!(cx.manager().pause_target(&"other"));
        }),
        &"pauser",
        false,
    );
    manager.add_action(Probe::endless(&other), &"other", false);

    manager.update(0.1);
    assert_eq!(other.steps(), 0);

    manager.resume_target(&"other");
    manager.update(0.1);
    assert_eq!(other.steps(), 1);
}

#[test]
fn removal_from_stop_is_salvaged() {
    let manager = Rc::new(ActionManager::<Key>::new());
    let counters = Counters::new();
    let own = slot();

    let lookup = Rc::clone(&own);
    let handle = Rc::clone(&manager);
    own.set(Some(manager.add_action(
        Probe::lasting(1, &counters).on_stop(move || {
            if let Some(id) = lookup.get() {
                assert!(handle.remove_action(id));
            }
        }),
        &"A",
        false,
    )));

    manager.update(0.1);

    assert_eq!(counters.stops.get(), 1);
    assert_eq!(counters.drops(), 1);
    assert!(!manager.has_target(&"A"));
    assert!(manager.validate().is_ok());
}

#[test]
fn remove_everything_from_inside_a_step() {
    let manager: ActionManager<Key> = ActionManager::new();
    let counters: Vec<_> = (0..3).map(|_| Counters::new()).collect();

    manager.add_action(Probe::endless(&counters[0]), &"a", false);
    manager.add_action(
        Probe::endless(&counters[1]).on_step(|cx| {
            assert_eq!(cx.manager().remove_all_actions(), 3);
        }),
        &"b",
        false,
    );
    manager.add_action(Probe::endless(&counters[2]), &"c", false);

    manager.update(0.1);

    let steps: Vec<_> = counters.iter().map(|c| c.steps()).collect();
    let drops: Vec<_> = counters.iter().map(|c| c.drops()).collect();
    assert_eq!(steps, vec![1, 1, 0]);
    assert_eq!(drops, vec![1, 1, 1]);
    assert_eq!(manager.target_count(), 0);
}

#[test]
fn dropping_an_action_may_call_back_into_the_manager() {
    struct Cascade {
        manager: Rc<ActionManager<Key>>,
        next: Option<ActionId>,
    }

    impl Action<Key> for Cascade {
        fn start(&mut self, _target: &Key) {}
        fn step(&mut self, _dt: f32, _cx: &ActionContext<'_, Key>) {}
        fn is_done(&self) -> bool {
            false
        }
    }

    impl Drop for Cascade {
        fn drop(&mut self) {
            if let Some(id) = self.next.take() {
                self.manager.remove_action(id);
            }
        }
    }

    let manager = Rc::new(ActionManager::<Key>::new());
    let counters = Counters::new();
    let tail = manager.add_action(Probe::endless(&counters), &"tail", false);
    let head = manager.add_action(
        Cascade {
            manager: Rc::clone(&manager),
            next: Some(tail),
        },
        &"head",
        false,
    );

    assert!(manager.remove_action(head));

    assert_eq!(counters.drops(), 1);
    assert_eq!(manager.number_of_running_actions(), 0);
}

#[test]
fn inspecting_the_stepping_action_yields_nothing() {
    let manager: ActionManager<Key> = ActionManager::new();
    let counters = Counters::new();

    manager.add_action(
        Probe::lasting(1, &counters).tagged(9).on_step(|cx| {
            let manager = cx.manager();
            assert_eq!(manager.with_action(cx.id(), |_| ()), None);
            assert_eq!(manager.action_by_tag(9.into(), cx.target()), Some(cx.id()));
            assert_eq!(manager.number_of_running_actions_in_target(cx.target()), 1);
            assert!(manager.validate().is_ok());
        }),
        &"A",
        false,
    );

    manager.update(0.1);
    assert_eq!(counters.steps(), 1);
}
