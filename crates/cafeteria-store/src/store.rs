//! Store runtime
//!
//! Owns the state and drives effects:
//! - `send` applies an action and any immediate follow-ups synchronously
//! - futures produced by effects are polled cooperatively and their outputs
//!   re-enter through `send`
//! - every settled transition publishes a snapshot on a watch channel
//!
//! State is only mutated by the task that owns the [`Store`], so no locks
//! guard it. [`Store::spawn`] moves that ownership into a tokio task and
//! returns a [`StoreHandle`].

use crate::error::StoreError;
use crate::reducer::Reducer;
use futures::future::BoxFuture;
use futures::stream::{FuturesUnordered, StreamExt};
use std::collections::VecDeque;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, trace};

/// Action channel capacity for spawned stores
const ACTION_BUFFER: usize = 64;

/// Single-owner state container
pub struct Store<R: Reducer> {
    reducer: R,
    state: R::State,
    in_flight: FuturesUnordered<BoxFuture<'static, Option<R::Action>>>,
    publisher: watch::Sender<R::State>,
}

impl<R: Reducer> Store<R> {
    /// Create a store with an initial state
    #[must_use]
    pub fn new(reducer: R, initial: R::State) -> Self {
        let (publisher, _) = watch::channel(initial.clone());
        Self {
            reducer,
            state: initial,
            in_flight: FuturesUnordered::new(),
            publisher,
        }
    }

    /// Current state
    #[inline]
    #[must_use]
    pub fn state(&self) -> &R::State {
        &self.state
    }

    #[inline]
    #[must_use]
    pub fn reducer(&self) -> &R {
        &self.reducer
    }

    /// Observe published snapshots
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<R::State> {
        self.publisher.subscribe()
    }

    /// Number of effect futures not yet resolved
    #[inline]
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Apply an action, plus every immediate follow-up it produces
    pub fn send(&mut self, action: R::Action) {
        let mut queue = VecDeque::from([action]);

        while let Some(action) = queue.pop_front() {
            trace!(?action, "reduce");
            let (immediate, futures) = self.reducer.reduce(&mut self.state, action).flatten();
            queue.extend(immediate);
            if !futures.is_empty() {
                debug!(count = futures.len(), "scheduling effects");
            }
            self.in_flight.extend(futures);
        }

        self.publisher.send_replace(self.state.clone());
    }

    /// Drive effects until none remain
    pub async fn settle(&mut self) {
        while let Some(output) = self.in_flight.next().await {
            if let Some(action) = output {
                self.send(action);
            }
        }
    }

    /// Resolve the next effect, if any is pending; returns whether one ran
    pub async fn step(&mut self) -> bool {
        match self.in_flight.next().await {
            Some(output) => {
                if let Some(action) = output {
                    self.send(action);
                }
                true
            }
            None => false,
        }
    }

    /// Move the store into a background task
    ///
    /// The task stops when every [`StoreHandle`] is dropped; effects still
    /// pending at that point are dropped with it.
    #[must_use]
    pub fn spawn(self) -> StoreHandle<R::Action, R::State>
    where
        R: 'static,
    {
        let (sender, receiver) = mpsc::channel(ACTION_BUFFER);
        let state = self.subscribe();
        let task = tokio::spawn(run_store(self, receiver));
        StoreHandle {
            sender,
            state,
            task: Some(task),
        }
    }
}

impl<R: Reducer> std::fmt::Debug for Store<R>
where
    R::State: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state)
            .field("in_flight", &self.in_flight.len())
            .finish_non_exhaustive()
    }
}

/// Store task loop
async fn run_store<R: Reducer>(mut store: Store<R>, mut actions: mpsc::Receiver<R::Action>) {
    loop {
        tokio::select! {
            received = actions.recv() => match received {
                Some(action) => store.send(action),
                None => break,
            },
            Some(output) = store.in_flight.next(), if !store.in_flight.is_empty() => {
                if let Some(action) = output {
                    store.send(action);
                }
            }
        }
    }
    debug!(dropped = store.in_flight(), "store task stopped");
}

/// Handle to a spawned store
#[derive(Debug)]
pub struct StoreHandle<A, S> {
    sender: mpsc::Sender<A>,
    state: watch::Receiver<S>,
    task: Option<JoinHandle<()>>,
}

impl<A, S: Clone> StoreHandle<A, S> {
    /// Queue an action for the store task
    pub async fn send(&self, action: A) -> Result<(), StoreError> {
        self.sender
            .send(action)
            .await
            .map_err(|_| StoreError::Closed)
    }

    /// Latest published snapshot
    #[must_use]
    pub fn state(&self) -> S {
        self.state.borrow().clone()
    }

    /// Observe published snapshots
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<S> {
        self.state.clone()
    }

    /// Wait until a snapshot satisfies `predicate`
    pub async fn wait_for(&self, predicate: impl FnMut(&S) -> bool) -> Result<S, StoreError> {
        let mut receiver = self.state.clone();
        let snapshot = receiver
            .wait_for(predicate)
            .await
            .map_err(|_| StoreError::Closed)?;
        Ok((*snapshot).clone())
    }

    /// Stop the store task and wait for it to exit
    pub async fn shutdown(mut self) -> Result<(), StoreError> {
        let task = self.task.take();
        drop(self);
        if let Some(task) = task {
            task.await.map_err(|e| StoreError::TaskFailed(e.to_string()))?;
        }
        Ok(())
    }
}
