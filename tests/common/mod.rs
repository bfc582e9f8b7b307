#![allow(dead_code)]

use reactive_fsm::{state_enum, Action, MachineBuilder, MachineEvent};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;

state_enum! {
    pub enum TestState {
        NotStarted,
        Collapsed,
        FadingIn,
        Visible,
        FadingOut,
    }
}

/// A builder starting in `Collapsed`, like the widget this machine models.
pub fn builder() -> MachineBuilder<TestState> {
    MachineBuilder::new(TestState::Collapsed)
}

pub fn flag() -> (Arc<AtomicBool>, Action) {
    let flag = Arc::new(AtomicBool::new(false));
    let set = Arc::clone(&flag);
    (flag, Action::new(move || set.store(true, Ordering::SeqCst)))
}

pub fn counter() -> (Arc<AtomicUsize>, Action) {
    let count = Arc::new(AtomicUsize::new(0));
    let inc = Arc::clone(&count);
    let action = Action::new(move || {
        inc.fetch_add(1, Ordering::SeqCst);
    });
    (count, action)
}

pub type Log = Arc<Mutex<Vec<String>>>;

pub fn recorder(log: &Log, label: impl Into<String>) -> Action {
    let log = Arc::clone(log);
    let label = label.into();
    Action::new(move || log.lock().unwrap().push(label.clone()))
}

pub fn entries(log: &Log) -> Vec<String> {
    log.lock().unwrap().clone()
}

/// Receive events until one matches, failing the test after a timeout.
pub async fn wait_for<F>(
    rx: &mut UnboundedReceiver<MachineEvent<TestState>>,
    mut matches: F,
) -> Vec<MachineEvent<TestState>>
where
    F: FnMut(&MachineEvent<TestState>) -> bool,
{
    let mut seen = Vec::new();
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            let event = rx.recv().await.expect("event stream closed");
            let done = matches(&event);
            seen.push(event);
            if done {
                break;
            }
        }
    })
    .await
    .expect("timed out waiting for event");
    seen
}

/// Collect everything already published.
pub fn drain<S>(rx: &mut UnboundedReceiver<MachineEvent<S>>) -> Vec<MachineEvent<S>> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}
