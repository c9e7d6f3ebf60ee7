// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Event name type.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Error;

/// Name of an event.
///
/// Names are compared by their string form. Scalars convert to the same
/// string they display as, so `0` and `"0"` name the same event and
/// `true` names the event `"true"`.
///
/// # Examples
///
/// ```
/// use concert::EventName;
///
/// let name = EventName::from("change");
/// assert_eq!(name.as_str(), "change");
///
/// // Scalars are stringified
/// assert_eq!(EventName::from(0), EventName::from("0"));
///
/// // The reserved catch-all name
/// assert_eq!(EventName::ALL.as_str(), "all");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventName(Cow<'static, str>);

impl EventName {
    /// The reserved catch-all event name, `"all"`.
    ///
    /// Listeners bound to it receive every published event with the event
    /// name prepended to the arguments.
    pub const ALL: Self = Self(Cow::Borrowed("all"));

    /// Creates an event name.
    #[must_use]
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if this is the reserved catch-all name.
    #[must_use]
    pub fn is_all(&self) -> bool {
        *self == Self::ALL
    }
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EventName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EventName {
    fn from(name: &str) -> Self {
        Self(Cow::Owned(name.to_owned()))
    }
}

impl From<String> for EventName {
    fn from(name: String) -> Self {
        Self(Cow::Owned(name))
    }
}

impl From<&String> for EventName {
    fn from(name: &String) -> Self {
        Self(Cow::Owned(name.clone()))
    }
}

impl From<&EventName> for EventName {
    fn from(name: &EventName) -> Self {
        name.clone()
    }
}

macro_rules! impl_from_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for EventName {
                fn from(value: $ty) -> Self {
                    Self(Cow::Owned(value.to_string()))
                }
            }
        )*
    };
}

impl_from_scalar!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, bool, char
);

impl TryFrom<Value> for EventName {
    type Error = Error;

    /// Converts a dynamic value into an event name.
    ///
    /// Strings, numbers and booleans are accepted.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` for `null`, arrays and objects.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(s) => Ok(Self::from(s)),
            Value::Number(n) => Ok(Self::from(n.to_string())),
            Value::Bool(b) => Ok(Self::from(b)),
            Value::Null => Err(Error::invalid_argument("event name must not be null")),
            Value::Array(_) | Value::Object(_) => Err(Error::invalid_argument(
                "event name must be a string, number or boolean",
            )),
        }
    }
}

impl TryFrom<&Value> for EventName {
    type Error = Error;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        Self::try_from(value.clone())
    }
}

impl From<EventName> for String {
    fn from(name: EventName) -> Self {
        name.0.into_owned()
    }
}

impl From<EventName> for Value {
    fn from(name: EventName) -> Self {
        Value::String(name.into())
    }
}
