// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Selection of bindings to unsubscribe.

use std::fmt;

use serde_json::Value;

use crate::event::EventName;
use crate::subscription::binding::Binding;
use crate::subscription::{Callback, Receiver};

/// Selects the bindings removed by an unsubscribe.
///
/// Every part of a filter is optional and the parts that are set must all
/// match:
///
/// | Filter | Removes |
/// |---|---|
/// | `Filter::any()` | every binding of every event |
/// | `Filter::event(name)` | every binding of `name` |
/// | `.callback(&cb)` | bindings whose callback is `cb`, including once-bindings |
/// | `.receiver(&r)` | bindings bound with receiver `r` |
///
/// An unset receiver means "any receiver", so a binding subscribed without a
/// receiver is removed by its callback alone.
///
/// # Examples
///
/// ```
/// use concert::{Callback, Emitter, Filter, Observable};
///
/// let emitter: Emitter = Emitter::new();
/// let cb = Callback::new(|_this, _args| {});
///
/// emitter.subscribe("change", cb.clone(), None);
/// emitter.unsubscribe(&Filter::event("change").callback(&cb));
///
/// assert_eq!(emitter.listener_count("change"), 0);
/// ```
pub struct Filter<H, A = Value> {
    event: Option<EventName>,
    callback: Option<Callback<H, A>>,
    receiver: Option<Receiver>,
}

impl<H, A> Filter<H, A> {
    /// Creates a filter matching every binding of every event.
    #[must_use]
    pub fn any() -> Self {
        Self {
            event: None,
            callback: None,
            receiver: None,
        }
    }

    /// Creates a filter matching every binding of one event.
    #[must_use]
    pub fn event(name: impl Into<EventName>) -> Self {
        Self {
            event: Some(name.into()),
            ..Self::any()
        }
    }

    /// Restricts the filter to bindings of this callback.
    #[must_use]
    pub fn callback(mut self, callback: &Callback<H, A>) -> Self {
        self.callback = Some(callback.clone());
        self
    }

    /// Restricts the filter to bindings with this receiver.
    #[must_use]
    pub fn receiver(mut self, receiver: &Receiver) -> Self {
        self.receiver = Some(receiver.clone());
        self
    }

    /// Restricts the filter to a receiver if one is given. `None` leaves an
    /// already set receiver in place.
    #[must_use]
    pub fn maybe_receiver(mut self, receiver: Option<&Receiver>) -> Self {
        if let Some(receiver) = receiver {
            self.receiver = Some(receiver.clone());
        }
        self
    }

    /// Returns the event name this filter is restricted to.
    #[must_use]
    pub fn event_name(&self) -> Option<&EventName> {
        self.event.as_ref()
    }

    /// Returns `true` if the filter selects whole events rather than
    /// individual bindings.
    #[must_use]
    pub fn is_unfiltered(&self) -> bool {
        self.callback.is_none() && self.receiver.is_none()
    }

    /// Returns `true` if the binding is selected.
    pub(crate) fn matches(&self, binding: &Binding<H, A>) -> bool {
        if let Some(callback) = &self.callback
            && binding.callback != *callback
        {
            return false;
        }
        if let Some(receiver) = &self.receiver
            && binding.receiver.as_ref() != Some(receiver)
        {
            return false;
        }
        true
    }
}

impl<H, A> Default for Filter<H, A> {
    fn default() -> Self {
        Self::any()
    }
}

impl<H, A> Clone for Filter<H, A> {
    fn clone(&self) -> Self {
        Self {
            event: self.event.clone(),
            callback: self.callback.clone(),
            receiver: self.receiver.clone(),
        }
    }
}

impl<H, A> fmt::Debug for Filter<H, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Filter")
            .field("event", &self.event)
            .field("callback", &self.callback)
            .field("receiver", &self.receiver)
            .finish()
    }
}
