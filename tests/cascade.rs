mod common;

use common::{counter, drain, wait_for, TestState};
use reactive_fsm::{
    state_enum, Action, MachineBuilder, MachineConfig, MachineEvent, RunError, RunState,
};
use std::sync::atomic::Ordering;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc::UnboundedReceiver;

state_enum! {
    enum Step {
        S0,
        S1,
        S2,
        S3,
        S4,
    }
}

fn chain() -> MachineBuilder<Step> {
    MachineBuilder::new(Step::S0)
        .add_automatic_chain(Step::ALL.iter().copied())
        .unwrap()
}

#[tokio::test]
async fn cascade_runs_each_entry_action_once_and_ends_in_last_state() {
    let (count, action) = counter();
    let mut b = chain();
    for state in Step::ALL {
        b = b.add_entry_action(*state, action.clone()).unwrap();
    }
    let machine = b.build().unwrap();

    let mut events = machine.subscribe();
    let summary = machine.start().unwrap().wait().await.unwrap();

    assert_eq!(count.load(Ordering::SeqCst), 5);
    assert_eq!(summary.final_state, Step::S4);
    assert_eq!(summary.history.len(), 4);
    assert_eq!(
        summary.history.get_path(),
        vec![&Step::S0, &Step::S1, &Step::S2, &Step::S3, &Step::S4]
    );
    assert_eq!(machine.run_state(), RunState::Quiescent);

    let events = drain(&mut events);
    assert_eq!(events.first(), Some(&MachineEvent::Started { state: Step::S0 }));
    assert_eq!(
        events.last(),
        Some(&MachineEvent::StateChanged {
            from: Step::S3,
            to: Step::S4
        })
    );
    assert_eq!(events.len(), 5);
}

#[tokio::test]
async fn scoped_entry_action_fires_only_for_actual_predecessor() {
    let (hits, action) = counter();
    let (misses, never) = counter();
    let machine = chain()
        .add_entry_action_from(Step::S1, Step::S0, action)
        .and_then(|b| b.add_entry_action_from(Step::S1, Step::S2, never.clone()))
        .and_then(|b| b.add_entry_action_from(Step::S1, Step::S3, never.clone()))
        .and_then(|b| b.add_entry_action_from(Step::S1, Step::S4, never))
        .and_then(|b| b.build())
        .unwrap();

    machine.start().unwrap().wait().await.unwrap();

    assert_eq!(hits.load(Ordering::SeqCst), 1);
    assert_eq!(misses.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn state_changed_precedes_next_hop_exit_actions() {
    let probe: Arc<Mutex<Option<UnboundedReceiver<MachineEvent<Step>>>>> = Default::default();
    let observed: Arc<Mutex<Vec<MachineEvent<Step>>>> = Default::default();

    let action = {
        let probe = Arc::clone(&probe);
        let observed = Arc::clone(&observed);
        Action::new(move || {
            if let Some(rx) = probe.lock().unwrap().as_mut() {
                while let Ok(event) = rx.try_recv() {
                    observed.lock().unwrap().push(event);
                }
            }
        })
    };
    let machine = chain()
        .add_exit_action(Step::S1, action)
        .and_then(|b| b.build())
        .unwrap();
    *probe.lock().unwrap() = Some(machine.subscribe());

    machine.start().unwrap().wait().await.unwrap();

    assert_eq!(
        *observed.lock().unwrap(),
        vec![
            MachineEvent::Started { state: Step::S0 },
            MachineEvent::StateChanged {
                from: Step::S0,
                to: Step::S1
            },
        ]
    );
}

#[tokio::test]
async fn start_returns_before_cascade_finishes() {
    let (release_tx, release_rx) = std::sync::mpsc::channel::<()>();
    let release_rx = Mutex::new(release_rx);
    let machine = chain()
        .add_entry_action(
            Step::S2,
            Action::new(move || {
                let _ = release_rx.lock().unwrap().recv();
            }),
        )
        .and_then(|b| b.build())
        .unwrap();

    let handle = machine.start().unwrap();
    assert_eq!(machine.run_state(), RunState::Running);
    assert!(!handle.is_finished());

    release_tx.send(()).unwrap();
    let summary = handle.wait().await.unwrap();
    assert_eq!(summary.final_state, Step::S4);
}

#[tokio::test]
async fn starting_twice_is_rejected() {
    let machine = chain().build().unwrap();

    let handle = machine.start().unwrap();
    assert!(matches!(machine.start(), Err(RunError::AlreadyStarted)));
    handle.wait().await.unwrap();
    assert!(matches!(machine.start(), Err(RunError::AlreadyStarted)));
}

#[tokio::test]
async fn every_subscriber_sees_the_same_events() {
    let machine = chain().build().unwrap();
    let subscribers: Vec<_> = (0..3)
        .map(|_| {
            let mut rx = machine.subscribe();
            tokio::spawn(async move {
                let mut seen = Vec::new();
                while let Some(event) = rx.recv().await {
                    let last = event.is_state_change_to(&Step::S4);
                    seen.push(event);
                    if last {
                        break;
                    }
                }
                seen
            })
        })
        .collect();
    assert_eq!(machine.subscriber_count(), 3);

    machine.start().unwrap();

    let mut results = Vec::new();
    for subscriber in subscribers {
        results.push(subscriber.await.unwrap());
    }
    assert_eq!(results[0].len(), 5);
    assert!(results.iter().all(|seen| *seen == results[0]));
}

#[tokio::test]
async fn faults_do_not_stop_the_cascade() {
    let (count, action) = counter();
    let mut b = chain();
    for state in Step::ALL {
        b = b
            .add_entry_action(*state, Action::new(|| panic!("entry failed")))
            .and_then(|b| b.add_exit_action(*state, Action::fallible(|| Err("exit failed".into()))))
            .and_then(|b| b.add_entry_action(*state, action.clone()))
            .unwrap();
    }
    let machine = b.build().unwrap();

    let mut events = machine.subscribe();
    let summary = machine.start().unwrap().wait().await.unwrap();

    // Five entry panics plus four exit errors (S4 is never exited).
    assert_eq!(summary.faults, 9);
    assert_eq!(count.load(Ordering::SeqCst), 5);
    assert_eq!(summary.final_state, Step::S4);

    let events = drain(&mut events);
    assert_eq!(events.iter().filter(|e| e.fault().is_some()).count(), 9);
    assert!(events.last().unwrap().is_state_change_to(&Step::S4));
}

#[tokio::test]
async fn long_cascade_delivers_every_event_to_a_late_reader() {
    let machine = MachineBuilder::new(0u32)
        .add_automatic_chain(0..=300)
        .and_then(|b| {
            (0..=300).try_fold(b, |b, state| {
                b.add_entry_action(state, Action::fallible(|| Err("unavailable".into())))
            })
        })
        .and_then(|b| b.build())
        .unwrap();

    let mut events = machine.subscribe();
    let summary = machine.start().unwrap().wait().await.unwrap();
    assert_eq!(summary.final_state, 300);
    assert_eq!(summary.faults, 301);

    // Nothing was read while the cascade ran.
    let mut started = 0;
    let mut changes = Vec::new();
    let mut faults = 0;
    while let Ok(event) = events.try_recv() {
        match event {
            MachineEvent::Started { state } => {
                assert_eq!(state, 0);
                started += 1;
            }
            MachineEvent::StateChanged { from, to } => changes.push((from, to)),
            MachineEvent::Fault(_) => faults += 1,
        }
    }

    assert_eq!(started, 1);
    assert_eq!(changes, (0..300).map(|s| (s, s + 1)).collect::<Vec<_>>());
    assert_eq!(faults, 301);
}

#[tokio::test]
async fn hop_limit_stops_cyclic_tables() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("reactive_fsm=debug")
        .try_init();

    let machine = MachineBuilder::new(TestState::FadingIn)
        .config(MachineConfig::from_toml_str("max_cascade_hops = 8").unwrap())
        .add_automatic_transition(TestState::FadingIn, TestState::Visible)
        .and_then(|b| b.add_automatic_transition(TestState::Visible, TestState::FadingOut))
        .and_then(|b| b.add_automatic_transition(TestState::FadingOut, TestState::FadingIn))
        .and_then(|b| b.build())
        .unwrap();

    let mut events = machine.subscribe();
    let result = machine.start().unwrap().wait().await;

    assert!(matches!(
        result,
        Err(RunError::HopLimitExceeded { limit: 8, .. })
    ));
    assert_eq!(machine.run_state(), RunState::Halted);
    let seen = wait_for(&mut events, |e| {
        e.is_state_change_to(&TestState::Visible)
    })
    .await;
    assert_eq!(seen.len(), 2);
}

#[test]
fn start_requires_a_runtime() {
    let machine = chain().build().unwrap();
    assert!(matches!(machine.start(), Err(RunError::NoRuntime)));
    assert_eq!(machine.run_state(), RunState::NotStarted);
}
