// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Listener callbacks and their invocation context.
//!
//! This module provides the values a listener is made of:
//!
//! - [`Callback`] - A shared, comparable handle to a listener function
//! - [`Receiver`] - An explicit invocation context bound with a listener
//! - [`This`] - What a listener runs "as" when it is invoked

use std::any::Any;
use std::fmt;
use std::ptr;
use std::sync::Arc;

use serde_json::Value;

use crate::error::CallbackError;

/// Result returned by a listener.
pub type CallbackResult = std::result::Result<(), CallbackError>;

/// Type alias for the shared listener function.
type CallbackFn<H, A> = dyn Fn(This<'_, H>, &[A]) -> CallbackResult + Send + Sync;

/// Shared handle to a listener function.
///
/// A `Callback` is cheap to clone, and clones compare equal: equality is the
/// identity of the underlying function, not its behavior. Keep a clone of
/// the handle you subscribed with to unsubscribe it later.
///
/// # Examples
///
/// ```
/// use concert::{Callback, Emitter};
///
/// let a: Callback<Emitter> = Callback::new(|_this, _args| {});
/// let b: Callback<Emitter> = Callback::new(|_this, _args| {});
///
/// assert_eq!(a, a.clone());
/// assert_ne!(a, b);
/// ```
pub struct Callback<H, A = Value>(Arc<CallbackFn<H, A>>);

impl<H, A> Callback<H, A> {
    /// Creates a listener that cannot fail.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(This<'_, H>, &[A]) + Send + Sync + 'static,
    {
        Self::try_new(move |this, args| {
            f(this, args);
            Ok(())
        })
    }

    /// Creates a listener that may fail.
    ///
    /// An error returned by the listener aborts the publish that invoked it.
    pub fn try_new<F>(f: F) -> Self
    where
        F: Fn(This<'_, H>, &[A]) -> CallbackResult + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Invokes the listener.
    pub(crate) fn call(&self, this: This<'_, H>, args: &[A]) -> CallbackResult {
        (self.0)(this, args)
    }

    /// Returns `true` if both handles refer to the same listener function.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<H, A> Clone for Callback<H, A> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<H, A> PartialEq for Callback<H, A> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl<H, A> Eq for Callback<H, A> {}

impl<H, A> fmt::Debug for Callback<H, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Callback({:p})", Arc::as_ptr(&self.0).cast::<()>())
    }
}

/// Explicit invocation context for a listener.
///
/// A receiver wraps any shared value. Two receivers are equal only if they
/// wrap the same allocation, so unsubscribing by receiver requires a clone
/// of the receiver that was subscribed with.
///
/// # Examples
///
/// ```
/// use concert::Receiver;
///
/// let view = Receiver::new(String::from("sidebar"));
/// assert_eq!(view.downcast_ref::<String>().map(String::as_str), Some("sidebar"));
/// assert_eq!(view, view.clone());
/// assert_ne!(view, Receiver::new(String::from("sidebar")));
/// ```
#[derive(Clone)]
pub struct Receiver(Arc<dyn Any + Send + Sync>);

impl Receiver {
    /// Wraps a value as a receiver.
    pub fn new<T>(value: T) -> Self
    where
        T: Any + Send + Sync,
    {
        Self(Arc::new(value))
    }

    /// Wraps an already shared value as a receiver.
    ///
    /// Receivers built from clones of the same `Arc` compare equal.
    pub fn from_arc<T>(value: Arc<T>) -> Self
    where
        T: Any + Send + Sync,
    {
        Self(value)
    }

    /// Returns the wrapped value if it is of type `T`.
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        (*self.0).downcast_ref::<T>()
    }

    /// Returns `true` if both receivers wrap the same value.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for Receiver {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Receiver {}

impl fmt::Debug for Receiver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Receiver({:p})", Arc::as_ptr(&self.0).cast::<()>())
    }
}

/// The context a listener is invoked with.
///
/// Listeners bound without a receiver run as the host the event was
/// published on, which is not necessarily the host they were subscribed on
/// when registries are derived from one another.
pub enum This<'a, H> {
    /// The host the event was published on.
    Host(&'a H),
    /// The receiver the listener was bound with.
    Receiver(&'a Receiver),
}

impl<'a, H> This<'a, H> {
    /// Returns the host, if the listener runs as the publishing host.
    #[must_use]
    pub fn host(&self) -> Option<&'a H> {
        match *self {
            Self::Host(host) => Some(host),
            Self::Receiver(_) => None,
        }
    }

    /// Returns the receiver, if the listener was bound with one.
    #[must_use]
    pub fn receiver(&self) -> Option<&'a Receiver> {
        match *self {
            Self::Host(_) => None,
            Self::Receiver(receiver) => Some(receiver),
        }
    }

    /// Returns the receiver's value if the listener was bound with a
    /// receiver of type `T`.
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&'a T> {
        self.receiver().and_then(Receiver::downcast_ref)
    }

    /// Returns `true` if the listener runs as exactly this host.
    #[must_use]
    pub fn is_host(&self, host: &H) -> bool {
        self.host().is_some_and(|this| ptr::eq(this, host))
    }
}

impl<H> Clone for This<'_, H> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<H> Copy for This<'_, H> {}

impl<H> fmt::Debug for This<'_, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Host(host) => write!(f, "This::Host({:p})", *host),
            Self::Receiver(receiver) => f.debug_tuple("This::Receiver").field(receiver).finish(),
        }
    }
}
