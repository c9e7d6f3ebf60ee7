// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Listener registries.
//!
//! - [`Events`] - The per-host registry of listeners
//! - [`RegistryConfig`] - Registry configuration (catch-all event name)

mod config;
mod events;

pub use config::RegistryConfig;
pub use events::Events;
pub(crate) use events::Inner;
