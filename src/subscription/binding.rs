// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! A listener bound to one event name.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use crate::registry::Inner;
use crate::subscription::{Callback, Receiver};

/// Identifier of a binding, unique within a registry and everything derived
/// from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct BindingId(u64);

impl BindingId {
    pub(crate) fn new(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for BindingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Binding({})", self.0)
    }
}

/// A `(callback, receiver)` pair registered for an event.
///
/// Bindings are immutable once created; lists of them are shared between
/// snapshots and derived registries, so removal always builds a new list.
pub(crate) struct Binding<H, A> {
    pub(crate) id: BindingId,
    /// The callback as passed by the caller, also for once-bindings, so that
    /// unsubscribing by callback matches both kinds.
    pub(crate) callback: Callback<H, A>,
    pub(crate) receiver: Option<Receiver>,
    pub(crate) once: Option<OnceState<H, A>>,
}

impl<H, A> Binding<H, A> {
    pub(crate) fn new(id: BindingId, callback: Callback<H, A>, receiver: Option<Receiver>) -> Self {
        Self {
            id,
            callback,
            receiver,
            once: None,
        }
    }

    pub(crate) fn once(
        id: BindingId,
        callback: Callback<H, A>,
        receiver: Option<Receiver>,
        home: Weak<Inner<H, A>>,
    ) -> Self {
        Self {
            id,
            callback,
            receiver,
            once: Some(OnceState {
                fired: Arc::new(AtomicBool::new(false)),
                home,
            }),
        }
    }

    /// Returns `true` for a one-shot binding that has already run.
    pub(crate) fn is_spent(&self) -> bool {
        self.once.as_ref().is_some_and(OnceState::is_fired)
    }
}

impl<H, A> Clone for Binding<H, A> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            callback: self.callback.clone(),
            receiver: self.receiver.clone(),
            once: self.once.clone(),
        }
    }
}

impl<H, A> fmt::Debug for Binding<H, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("id", &self.id)
            .field("callback", &self.callback)
            .field("receiver", &self.receiver)
            .field("once", &self.once.is_some())
            .finish()
    }
}

/// Bookkeeping for a binding that may run at most once.
///
/// The guard is shared by every copy of the binding, including copies held
/// by derived registries and in-flight publish snapshots.
pub(crate) struct OnceState<H, A> {
    fired: Arc<AtomicBool>,
    /// The registry the binding was subscribed on.
    home: Weak<Inner<H, A>>,
}

impl<H, A> OnceState<H, A> {
    /// Marks the binding as fired. Returns `false` if it already was.
    pub(crate) fn claim(&self) -> bool {
        !self.fired.swap(true, Ordering::AcqRel)
    }

    pub(crate) fn is_fired(&self) -> bool {
        self.fired.load(Ordering::Acquire)
    }

    pub(crate) fn home(&self) -> Option<Arc<Inner<H, A>>> {
        self.home.upgrade()
    }
}

impl<H, A> Clone for OnceState<H, A> {
    fn clone(&self) -> Self {
        Self {
            fired: Arc::clone(&self.fired),
            home: Weak::clone(&self.home),
        }
    }
}
