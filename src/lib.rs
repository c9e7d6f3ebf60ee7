// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `concert` - Observable behavior for any Rust type.
//!
//! This library gives a host type publish/subscribe behavior without a base
//! type to inherit from: embed an [`Events`] registry, implement
//! [`Observable`], and the host gains four operations.
//!
//! | Operation | Does |
//! |---|---|
//! | [`subscribe`](Observable::subscribe) | binds a listener to an event |
//! | [`subscribe_once`](Observable::subscribe_once) | binds a listener for one invocation |
//! | [`unsubscribe`](Observable::unsubscribe) | removes listeners selected by a [`Filter`] |
//! | [`publish`](Observable::publish) | invokes an event's listeners in subscription order |
//!
//! # Semantics
//!
//! - **Synchronous**: `publish` runs every listener on the calling thread
//!   before it returns. Listeners may subscribe, unsubscribe and publish
//!   reentrantly; a publish works on the listener lists as they were when it
//!   started.
//! - **Catch-all**: listeners of [`EventName::ALL`] (`"all"`) receive every
//!   published event, after the event's own listeners, with the event name
//!   prepended to the arguments.
//! - **Receivers**: a listener runs as the [`Receiver`] it was bound with, or
//!   otherwise as the host the event was published on (see [`This`]).
//! - **Fail-fast**: the first listener error aborts the publish and is
//!   returned as [`Error::Callback`].
//! - **Delegation**: a registry can be derived from another with
//!   [`Events::derive`]. The derived registry reads through to its parent,
//!   copies inherited lists before changing them and masks inherited lists
//!   it removes, so the parent is never modified.
//!
//! # Quick Start
//!
//! ```
//! use concert::{Callback, Events, Observable};
//! use serde_json::{Value, json};
//!
//! struct Document {
//!     title: String,
//!     events: Events<Document>,
//! }
//!
//! impl Observable for Document {
//!     type Arg = Value;
//!
//!     fn events(&self) -> &Events<Self> {
//!         &self.events
//!     }
//! }
//!
//! let doc = Document { title: "notes".into(), events: Events::new() };
//!
//! doc.subscribe(
//!     "saved",
//!     Callback::<Document, Value>::new(|this, args| {
//!         if let Some(doc) = this.host() {
//!             println!("{} saved {} bytes", doc.title, args[0]);
//!         }
//!     }),
//!     None,
//! );
//!
//! doc.subscribe(
//!     "all",
//!     Callback::<Document, Value>::new(|_this, args| println!("event {}", args[0])),
//!     None,
//! );
//!
//! doc.publish("saved", &[json!(512)])?;
//! # Ok::<(), concert::Error>(())
//! ```

mod emitter;
pub mod error;
pub mod event;
pub mod registry;
pub mod subscription;

pub use emitter::Emitter;
pub use error::{CallbackError, Error, Result};
pub use event::EventName;
pub use registry::{Events, RegistryConfig};
pub use subscription::{Callback, CallbackResult, Filter, Observable, Receiver, This};
