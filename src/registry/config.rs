// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Registry configuration.

use serde::{Deserialize, Serialize};

use crate::event::EventName;

/// Configuration for a listener registry.
///
/// Derived registries inherit the configuration of the registry they
/// delegate to.
///
/// # Examples
///
/// ```
/// use concert::{EventName, RegistryConfig};
///
/// // The default reserves "all" as the catch-all event
/// let config = RegistryConfig::default();
/// assert_eq!(config.catch_all(), Some(&EventName::ALL));
///
/// // Use another name for the catch-all event
/// let config = RegistryConfig::default().with_catch_all("*");
/// assert_eq!(config.catch_all(), Some(&EventName::from("*")));
///
/// // Or disable it
/// let config = RegistryConfig::default().without_catch_all();
/// assert!(config.catch_all().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Event whose listeners receive every published event.
    catch_all: Option<EventName>,
}

impl RegistryConfig {
    /// Sets the catch-all event name.
    #[must_use]
    pub fn with_catch_all(mut self, name: impl Into<EventName>) -> Self {
        self.catch_all = Some(name.into());
        self
    }

    /// Disables catch-all delivery.
    #[must_use]
    pub fn without_catch_all(mut self) -> Self {
        self.catch_all = None;
        self
    }

    /// Returns the catch-all event name, if enabled.
    #[must_use]
    pub fn catch_all(&self) -> Option<&EventName> {
        self.catch_all.as_ref()
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            catch_all: Some(EventName::ALL),
        }
    }
}
