// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `concert` library.
//!
//! Only two things can go wrong: a caller hands over an argument that does
//! not describe an event, or a listener fails while an event is being
//! published. Unsubscribing something that was never bound and publishing an
//! event nobody listens to are both plain no-ops and have no error variant.

use thiserror::Error;

use crate::event::EventName;

/// Error type returned by a listener callback.
///
/// Any error that is `Send + Sync` can be returned from a callback with `?`
/// or `.into()`.
pub type CallbackError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// An argument does not identify an event or a listener.
    ///
    /// Raised by the dynamic conversions, e.g. building an [`EventName`]
    /// from a JSON `null`.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A listener failed while an event was being published.
    ///
    /// Dispatch stops at the failing listener; the ones bound after it are
    /// not invoked for that publish.
    #[error("listener for event `{event}` failed: {source}")]
    Callback {
        /// The event whose dispatch was interrupted.
        event: EventName,
        /// The error returned by the listener.
        #[source]
        source: CallbackError,
    },
}

impl Error {
    /// Creates an invalid argument error.
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Returns the event whose dispatch failed, if this is a callback error.
    #[must_use]
    pub fn event(&self) -> Option<&EventName> {
        match self {
            Self::Callback { event, .. } => Some(event),
            Self::InvalidArgument(_) => None,
        }
    }
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
