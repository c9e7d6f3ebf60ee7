// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Observable trait for hosts that carry a listener registry.
//!
//! Any type becomes observable by embedding an [`Events`] registry and
//! pointing the trait at it. The provided methods forward straight to the
//! registry and never call each other, so an implementor may shadow or alias
//! any of them (say, an inherent `on` or `emit`) without changing how the
//! others behave.

use crate::error::Result;
use crate::event::EventName;
use crate::registry::Events;
use crate::subscription::{Callback, Filter, Receiver};

/// Trait for hosts that support event subscriptions.
///
/// Implementors only provide [`events`](Self::events); subscribing,
/// unsubscribing and publishing come for free. Every operation returns the
/// host for chaining.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicU64, Ordering};
///
/// use concert::{Callback, Events, Filter, Observable};
/// use serde_json::{Value, json};
///
/// struct Counter {
///     value: AtomicU64,
///     events: Events<Counter>,
/// }
///
/// impl Observable for Counter {
///     type Arg = Value;
///
///     fn events(&self) -> &Events<Self> {
///         &self.events
///     }
/// }
///
/// impl Counter {
///     fn increment(&self) -> concert::Result<()> {
///         let value = self.value.fetch_add(1, Ordering::SeqCst) + 1;
///         self.publish("changed", &[json!(value)])?;
///         Ok(())
///     }
/// }
///
/// let counter = Counter { value: AtomicU64::new(0), events: Events::new() };
/// let seen = Arc::new(AtomicU64::new(0));
/// let seen_clone = seen.clone();
///
/// counter.subscribe(
///     "changed",
///     Callback::<Counter, Value>::new(move |this, args| {
///         assert!(this.host().is_some());
///         seen_clone.store(args[0].as_u64().unwrap_or_default(), Ordering::SeqCst);
///     }),
///     None,
/// );
///
/// counter.increment()?;
/// counter.increment()?;
/// assert_eq!(seen.load(Ordering::SeqCst), 2);
///
/// counter.unsubscribe(&Filter::any());
/// assert_eq!(counter.listener_count("changed"), 0);
/// # Ok::<(), concert::Error>(())
/// ```
pub trait Observable: Sized {
    /// Type of the arguments events carry.
    type Arg;

    /// Returns the host's listener registry.
    fn events(&self) -> &Events<Self, Self::Arg>;

    /// Binds `callback` to `name`.
    ///
    /// The listener runs as `receiver` if given, otherwise as the host the
    /// event is published on.
    fn subscribe(
        &self,
        name: impl Into<EventName>,
        callback: Callback<Self, Self::Arg>,
        receiver: impl Into<Option<Receiver>>,
    ) -> &Self {
        self.events().subscribe(name, callback, receiver);
        self
    }

    /// Binds `callback` to `name` for a single invocation.
    fn subscribe_once(
        &self,
        name: impl Into<EventName>,
        callback: Callback<Self, Self::Arg>,
        receiver: impl Into<Option<Receiver>>,
    ) -> &Self {
        self.events().subscribe_once(name, callback, receiver);
        self
    }

    /// Binds several `(name, callback)` pairs, all with the same receiver.
    fn subscribe_many<N, I>(&self, entries: I, receiver: impl Into<Option<Receiver>>) -> &Self
    where
        N: Into<EventName>,
        I: IntoIterator<Item = (N, Callback<Self, Self::Arg>)>,
    {
        self.events().subscribe_many(entries, receiver);
        self
    }

    /// Binds several `(name, callback)` pairs for a single invocation each.
    fn subscribe_once_many<N, I>(&self, entries: I, receiver: impl Into<Option<Receiver>>) -> &Self
    where
        N: Into<EventName>,
        I: IntoIterator<Item = (N, Callback<Self, Self::Arg>)>,
    {
        self.events().subscribe_once_many(entries, receiver);
        self
    }

    /// Removes the bindings selected by `filter`.
    fn unsubscribe(&self, filter: &Filter<Self, Self::Arg>) -> &Self {
        self.events().unsubscribe(filter);
        self
    }

    /// Unsubscribes several `(name, callback)` pairs.
    fn unsubscribe_many<N, I>(&self, entries: I, receiver: Option<&Receiver>) -> &Self
    where
        N: Into<EventName>,
        I: IntoIterator<Item = (N, Callback<Self, Self::Arg>)>,
    {
        self.events().unsubscribe_many(entries, receiver);
        self
    }

    /// Publishes `name` with `args`, invoking listeners as this host.
    ///
    /// # Errors
    ///
    /// Returns `Error::Callback` with the first error a listener returns;
    /// the remaining listeners are not invoked.
    fn publish(&self, name: impl Into<EventName>, args: &[Self::Arg]) -> Result<&Self>
    where
        Self::Arg: Clone + From<EventName>,
    {
        self.events().publish(self, name, args)?;
        Ok(self)
    }

    /// Returns the number of listeners bound to `name`.
    fn listener_count(&self, name: impl Into<EventName>) -> usize {
        self.events().listener_count(name)
    }
}
