//! Reducer trait

use crate::effect::Effect;
use std::fmt::Debug;

/// Pure transition function for one feature
///
/// `reduce` mutates the state in place and describes any follow-up work as
/// an [`Effect`]. It must not block or await; async work belongs in the
/// returned effect.
pub trait Reducer: Send + Sync {
    /// State owned by the feature
    type State: Clone + Send + Sync + 'static;

    /// Closed set of inputs
    type Action: Debug + Send + 'static;

    /// Apply one action
    fn reduce(&self, state: &mut Self::State, action: Self::Action) -> Effect<Self::Action>;
}
