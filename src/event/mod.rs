// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Event naming.
//!
//! Events are identified by an [`EventName`]. One name is reserved:
//! [`EventName::ALL`] (`"all"`), whose listeners receive every published
//! event with the event name prepended to the arguments.
//!
//! # Examples
//!
//! ```
//! use concert::EventName;
//!
//! let name: EventName = "change".into();
//! assert!(!name.is_all());
//! assert!(EventName::ALL.is_all());
//! ```

mod name;

pub use name::EventName;
