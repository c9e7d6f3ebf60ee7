// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Subscription system.
//!
//! The subscription system consists of:
//!
//! - [`Callback`] - A listener function, compared by identity
//! - [`Receiver`] - An explicit context a listener runs as
//! - [`This`] - The context passed to a listener when it runs
//! - [`Filter`] - Selects the bindings an unsubscribe removes
//! - [`Observable`] - Trait that gives a host the four pub/sub operations
//!
//! # Usage
//!
//! ```
//! use concert::{Callback, Emitter, Filter, Observable, Receiver};
//! use serde_json::json;
//!
//! let emitter: Emitter = Emitter::new();
//! let view = Receiver::new("sidebar");
//!
//! let render = Callback::new(|this, args| {
//!     assert_eq!(this.downcast_ref::<&str>(), Some(&"sidebar"));
//!     assert_eq!(args, &[json!(1)]);
//! });
//!
//! emitter
//!     .subscribe("change", render.clone(), view.clone())
//!     .publish("change", &[json!(1)])?;
//!
//! emitter.unsubscribe(&Filter::any().receiver(&view));
//! assert_eq!(emitter.listener_count("change"), 0);
//! # Ok::<(), concert::Error>(())
//! ```

mod binding;
mod callback;
mod filter;
mod observable;

pub(crate) use binding::{Binding, BindingId};
pub use callback::{Callback, CallbackResult, Receiver, This};
pub use filter::Filter;
pub use observable::Observable;
