//! Effects returned by reducers
//!
//! An [`Effect`] describes work to run after a transition. Its results
//! re-enter the store as actions; the store never exposes a future's
//! output any other way.

use futures::future::{BoxFuture, FutureExt};
use std::fmt;
use std::future::Future;

/// Follow-up work produced by a transition
pub enum Effect<A> {
    /// Nothing to do
    None,
    /// Feed an action back immediately, before any pending future resolves
    Send(A),
    /// Async work resolving to at most one action
    Future(BoxFuture<'static, Option<A>>),
    /// Several effects run independently
    Batch(Vec<Effect<A>>),
}

impl<A: Send + 'static> Effect<A> {
    /// No effect
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        Self::None
    }

    /// Dispatch an action synchronously
    #[inline]
    #[must_use]
    pub fn send(action: A) -> Self {
        Self::Send(action)
    }

    /// Run a future and dispatch its output
    #[must_use]
    pub fn task<F>(future: F) -> Self
    where
        F: Future<Output = A> + Send + 'static,
    {
        Self::Future(future.map(Some).boxed())
    }

    /// Run a future whose output is discarded
    #[must_use]
    pub fn fire_and_forget<F>(future: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        Self::Future(future.map(|()| None).boxed())
    }

    /// Combine effects; `None` entries are dropped
    #[must_use]
    pub fn batch(effects: impl IntoIterator<Item = Effect<A>>) -> Self {
        let mut effects: Vec<_> = effects.into_iter().filter(|e| !e.is_none()).collect();
        match effects.len() {
            0 => Self::None,
            1 => effects.remove(0),
            _ => Self::Batch(effects),
        }
    }

    /// Combine with another effect
    #[must_use]
    pub fn merge(self, other: Effect<A>) -> Self {
        Self::batch([self, other])
    }

    #[inline]
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Lift a child's actions into a parent action type
    #[must_use]
    pub fn map<B, F>(self, f: F) -> Effect<B>
    where
        B: Send + 'static,
        F: Fn(A) -> B + Clone + Send + Sync + 'static,
    {
        match self {
            Self::None => Effect::None,
            Self::Send(action) => Effect::Send(f(action)),
            Self::Future(future) => Effect::Future(future.map(move |out| out.map(f)).boxed()),
            Self::Batch(effects) => {
                Effect::Batch(effects.into_iter().map(|e| e.map(f.clone())).collect())
            }
        }
    }

    /// Split into immediate actions and pending futures, preserving order
    #[must_use]
    pub fn flatten(self) -> (Vec<A>, Vec<BoxFuture<'static, Option<A>>>) {
        let mut actions = Vec::new();
        let mut futures = Vec::new();
        self.flatten_into(&mut actions, &mut futures);
        (actions, futures)
    }

    fn flatten_into(self, actions: &mut Vec<A>, futures: &mut Vec<BoxFuture<'static, Option<A>>>) {
        match self {
            Self::None => {}
            Self::Send(action) => actions.push(action),
            Self::Future(future) => futures.push(future),
            Self::Batch(effects) => {
                for effect in effects {
                    effect.flatten_into(actions, futures);
                }
            }
        }
    }

    /// Run everything to completion and collect the resulting actions
    ///
    /// Immediate actions come first, then future outputs in completion
    /// order. Intended for exercising a single transition in isolation.
    pub async fn collect(self) -> Vec<A> {
        let (mut actions, futures) = self.flatten();
        let outputs = futures::future::join_all(futures).await;
        actions.extend(outputs.into_iter().flatten());
        actions
    }
}

impl<A> Default for Effect<A> {
    fn default() -> Self {
        Self::None
    }
}

impl<A: fmt::Debug> fmt::Debug for Effect<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("Effect::None"),
            Self::Send(action) => f.debug_tuple("Effect::Send").field(action).finish(),
            Self::Future(_) => f.write_str("Effect::Future(..)"),
            Self::Batch(effects) => f.debug_tuple("Effect::Batch").field(effects).finish(),
        }
    }
}
