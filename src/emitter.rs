// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! A ready-made observable host.

use std::fmt;

use serde_json::Value;

use crate::registry::{Events, RegistryConfig};
use crate::subscription::Observable;

/// A host that carries nothing but a listener registry.
///
/// Use it when there is no domain type to make observable, or as a field
/// that other types forward to.
///
/// # Examples
///
/// ```
/// use concert::{Callback, Emitter, Observable};
/// use serde_json::json;
///
/// let parent: Emitter = Emitter::new();
/// parent.subscribe("ping", Callback::new(|_this, _args| {}), None);
///
/// let child = parent.derive();
/// child.subscribe("ping", Callback::new(|_this, _args| {}), None);
///
/// assert_eq!(parent.listener_count("ping"), 1);
/// assert_eq!(child.listener_count("ping"), 2);
///
/// child.publish("ping", &[json!("hello")])?;
/// # Ok::<(), concert::Error>(())
/// ```
pub struct Emitter<A = Value> {
    events: Events<Emitter<A>, A>,
}

impl<A> Emitter<A> {
    /// Creates an emitter with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: Events::new(),
        }
    }

    /// Creates an emitter with the given registry configuration.
    #[must_use]
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            events: Events::with_config(config),
        }
    }

    /// Creates an emitter whose registry delegates to this one.
    ///
    /// See [`Events::derive`].
    #[must_use]
    pub fn derive(&self) -> Self {
        Self {
            events: self.events.derive(),
        }
    }
}

impl<A> Observable for Emitter<A> {
    type Arg = A;

    fn events(&self) -> &Events<Self, A> {
        &self.events
    }
}

impl<A> Default for Emitter<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> fmt::Debug for Emitter<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter")
            .field("events", &self.events)
            .finish()
    }
}
