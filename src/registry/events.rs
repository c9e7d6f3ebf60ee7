// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The listener registry.
//!
//! A registry maps event names to immutable, shared lists of bindings.
//! Every write builds a new list and swaps it in, so a list handed out to a
//! publish (or seen by a derived registry) never changes under its reader.
//!
//! Registries can be derived from one another. A derived registry reads
//! through to its parent for every name it holds no local state for, copies
//! an inherited list before changing it, and records a `Masked` tombstone
//! when it removes an inherited list so the parent's bindings stay hidden.

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::event::EventName;
use crate::registry::RegistryConfig;
use crate::subscription::{Binding, BindingId, Callback, Filter, Receiver, This};

type List<H, A> = Arc<[Binding<H, A>]>;

/// Local state for one event name.
enum Entry<H, A> {
    Bound(List<H, A>),
    /// Removed locally; inherited bindings stay hidden.
    Masked,
}

struct Table<H, A> {
    entries: HashMap<EventName, Entry<H, A>>,
    /// Set by a full clear of a derived registry: no name falls through to
    /// the parent any more.
    sealed: bool,
}

impl<H, A> Table<H, A> {
    fn new() -> Self {
        Self {
            entries: HashMap::new(),
            sealed: false,
        }
    }

    fn sealed() -> Self {
        Self {
            entries: HashMap::new(),
            sealed: true,
        }
    }
}

/// Drops one-shot bindings that already ran, possibly through another
/// registry holding a copy. An emptied list reads as absent.
fn live<H, A>(list: &List<H, A>) -> Option<List<H, A>> {
    if !list.iter().any(Binding::is_spent) {
        return Some(Arc::clone(list));
    }
    let live: List<H, A> = list
        .iter()
        .filter(|binding| !binding.is_spent())
        .cloned()
        .collect();
    (!live.is_empty()).then_some(live)
}

/// Shared state behind an [`Events`] handle.
pub(crate) struct Inner<H, A> {
    /// `None` until the first write that needs local state.
    table: RwLock<Option<Table<H, A>>>,
    parent: Option<Arc<Inner<H, A>>>,
    /// Shared along the delegation chain so ids never collide in a copied
    /// list.
    next_id: Arc<AtomicU64>,
    config: RegistryConfig,
}

impl<H, A> Inner<H, A> {
    fn next_id(&self) -> BindingId {
        BindingId::new(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    /// Effective list for `name`, without one-shot bindings that already ran.
    fn lookup(&self, name: &EventName) -> Option<List<H, A>> {
        self.lookup_stored(name).and_then(|list| live(&list))
    }

    fn lookup_stored(&self, name: &EventName) -> Option<List<H, A>> {
        let table = self.table.read();
        self.stored(table.as_ref(), name)
    }

    /// Resolves the list `name` falls on given this registry's table, as
    /// stored.
    fn stored(&self, table: Option<&Table<H, A>>, name: &EventName) -> Option<List<H, A>> {
        if let Some(table) = table {
            match table.entries.get(name) {
                Some(Entry::Bound(list)) => return Some(Arc::clone(list)),
                Some(Entry::Masked) => return None,
                None if table.sealed => return None,
                None => {}
            }
        }
        self.parent
            .as_ref()
            .and_then(|parent| parent.lookup_stored(name))
    }

    fn resolve(&self, table: Option<&Table<H, A>>, name: &EventName) -> Option<List<H, A>> {
        self.stored(table, name).and_then(|list| live(&list))
    }

    fn visible_names(&self) -> BTreeSet<EventName> {
        let table = self.table.read();
        self.collect_names(table.as_ref())
    }

    /// Names with at least one live binding given this registry's table.
    fn collect_names(&self, table: Option<&Table<H, A>>) -> BTreeSet<EventName> {
        let mut names = match (&self.parent, table) {
            (Some(_), Some(table)) if table.sealed => BTreeSet::new(),
            (Some(parent), _) => parent.visible_names(),
            (None, _) => BTreeSet::new(),
        };
        if let Some(table) = table {
            names.extend(table.entries.keys().cloned());
        }
        names.retain(|name| self.resolve(table, name).is_some());
        names
    }

    /// Appends a binding to the effective list of `name`, copying an
    /// inherited list first. Returns the new list length.
    fn append(&self, name: EventName, binding: Binding<H, A>) -> usize {
        let mut table = self.table.write();
        let mut list = self
            .resolve(table.as_ref(), &name)
            .map(|list| list.to_vec())
            .unwrap_or_default();
        list.push(binding);

        let len = list.len();
        table
            .get_or_insert_with(Table::new)
            .entries
            .insert(name, Entry::Bound(list.into()));
        len
    }

    /// Removes the bindings selected by `remove` from `name`, or from every
    /// visible event if `name` is `None`. Returns the number removed.
    fn remove_where<F>(&self, name: Option<&EventName>, remove: F) -> usize
    where
        F: Fn(&Binding<H, A>) -> bool,
    {
        let mut table = self.table.write();
        let names: Vec<EventName> = match name {
            Some(name) => vec![name.clone()],
            None => self.collect_names(table.as_ref()).into_iter().collect(),
        };

        let mut removed = 0;
        for name in names {
            let Some(list) = self.stored(table.as_ref(), &name) else {
                continue;
            };
            let matched = list.iter().filter(|binding| remove(*binding)).count();
            if matched == 0 {
                continue;
            }
            removed += matched;
            // Spent one-shot copies go with the rewrite.
            let kept: Vec<_> = list
                .iter()
                .filter(|binding| !binding.is_spent() && !remove(*binding))
                .cloned()
                .collect();

            let entries = &mut table.get_or_insert_with(Table::new).entries;
            if !kept.is_empty() {
                entries.insert(name, Entry::Bound(kept.into()));
            } else if self.parent.is_some() {
                entries.insert(name, Entry::Masked);
            } else {
                entries.remove(&name);
            }
        }
        removed
    }

    fn remove_binding(&self, name: &EventName, id: BindingId) -> bool {
        self.remove_where(Some(name), |binding| binding.id == id) > 0
    }

    /// Drops every binding of `name`, masking inherited ones.
    fn clear_event(&self, name: &EventName) {
        let mut table = self.table.write();
        if self.parent.is_some() {
            table
                .get_or_insert_with(Table::new)
                .entries
                .insert(name.clone(), Entry::Masked);
        } else if let Some(table) = table.as_mut() {
            table.entries.remove(name);
        }
    }

    /// Drops every binding, masking everything inherited.
    fn clear(&self) {
        let mut table = self.table.write();
        if self.parent.is_some() {
            *table = Some(Table::sealed());
        } else {
            *table = None;
        }
    }
}

/// Listener registry of a host.
///
/// `Events` is the state a host embeds to become observable (see
/// [`Observable`](crate::Observable)). It stores, per event name, the
/// ordered list of listeners bound to it. `H` is the host type listeners run
/// as by default and `A` the argument type events carry.
///
/// The registry is created lazily: until the first subscribe,
/// [`has_registry`](Self::has_registry) is `false`.
///
/// All operations take `&self` and complete before returning. No lock is
/// held while listeners run, so listeners may subscribe, unsubscribe and
/// publish on the same registry.
///
/// # Examples
///
/// ```
/// use concert::{Callback, Events};
///
/// struct Door;
///
/// let events: Events<Door, i32> = Events::new();
/// events.subscribe("open", Callback::new(|_this, args| assert_eq!(args, &[90])), None);
///
/// assert_eq!(events.listener_count("open"), 1);
/// ```
pub struct Events<H, A = Value> {
    inner: Arc<Inner<H, A>>,
}

impl<H, A> Events<H, A> {
    /// Creates an empty registry with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Creates an empty registry with the given configuration.
    #[must_use]
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                table: RwLock::new(None),
                parent: None,
                next_id: Arc::new(AtomicU64::new(1)),
                config,
            }),
        }
    }

    /// Creates a registry that delegates to this one.
    ///
    /// The derived registry sees every binding of this registry until it
    /// changes that event itself. Subscribing on it copies the inherited
    /// list, and unsubscribing masks it; this registry is never modified.
    ///
    /// # Examples
    ///
    /// ```
    /// use concert::{Callback, Events, Filter};
    ///
    /// struct Model;
    ///
    /// let parent: Events<Model, i32> = Events::new();
    /// parent.subscribe("change", Callback::new(|_, _| {}), None);
    ///
    /// let child = parent.derive();
    /// assert_eq!(child.listener_count("change"), 1);
    ///
    /// child.unsubscribe(&Filter::event("change"));
    /// assert_eq!(child.listener_count("change"), 0);
    /// assert_eq!(parent.listener_count("change"), 1);
    /// ```
    #[must_use]
    pub fn derive(&self) -> Self {
        Self {
            inner: Arc::new(Inner {
                table: RwLock::new(None),
                parent: Some(Arc::clone(&self.inner)),
                next_id: Arc::clone(&self.inner.next_id),
                config: self.inner.config.clone(),
            }),
        }
    }

    /// Returns the registry configuration.
    #[must_use]
    pub fn config(&self) -> &RegistryConfig {
        &self.inner.config
    }

    /// Returns `true` if this registry delegates to a parent.
    #[must_use]
    pub fn is_derived(&self) -> bool {
        self.inner.parent.is_some()
    }

    /// Binds `callback` to `name`.
    ///
    /// The listener runs as `receiver` if given, otherwise as the host the
    /// event is published on. Binding the same callback twice registers two
    /// independent listeners.
    pub fn subscribe(
        &self,
        name: impl Into<EventName>,
        callback: Callback<H, A>,
        receiver: impl Into<Option<Receiver>>,
    ) {
        let name = name.into();
        let binding = Binding::new(self.inner.next_id(), callback, receiver.into());
        let count = self.inner.append(name.clone(), binding);
        tracing::trace!(event = %name, listeners = count, "Subscribed listener");
    }

    /// Binds `callback` to `name` for a single invocation.
    ///
    /// The binding is removed before the callback runs, so a reentrant
    /// publish from inside the callback does not invoke it again. It can be
    /// unsubscribed beforehand with the same `callback` handle.
    pub fn subscribe_once(
        &self,
        name: impl Into<EventName>,
        callback: Callback<H, A>,
        receiver: impl Into<Option<Receiver>>,
    ) {
        let name = name.into();
        let binding = Binding::once(
            self.inner.next_id(),
            callback,
            receiver.into(),
            Arc::downgrade(&self.inner),
        );
        let count = self.inner.append(name.clone(), binding);
        tracing::trace!(event = %name, listeners = count, "Subscribed one-shot listener");
    }

    /// Binds several `(name, callback)` pairs, all with the same receiver.
    pub fn subscribe_many<N, I>(&self, entries: I, receiver: impl Into<Option<Receiver>>)
    where
        N: Into<EventName>,
        I: IntoIterator<Item = (N, Callback<H, A>)>,
    {
        let receiver = receiver.into();
        for (name, callback) in entries {
            self.subscribe(name, callback, receiver.clone());
        }
    }

    /// Binds several `(name, callback)` pairs for a single invocation each.
    pub fn subscribe_once_many<N, I>(&self, entries: I, receiver: impl Into<Option<Receiver>>)
    where
        N: Into<EventName>,
        I: IntoIterator<Item = (N, Callback<H, A>)>,
    {
        let receiver = receiver.into();
        for (name, callback) in entries {
            self.subscribe_once(name, callback, receiver.clone());
        }
    }

    /// Removes the bindings selected by `filter`.
    ///
    /// Removing bindings that do not exist is a no-op. Inherited bindings
    /// are masked in this registry rather than removed from the parent.
    pub fn unsubscribe(&self, filter: &Filter<H, A>) {
        match (filter.event_name(), filter.is_unfiltered()) {
            (None, true) => {
                if self.has_registry() || self.is_derived() {
                    self.inner.clear();
                    tracing::debug!(masked = self.is_derived(), "Cleared all listeners");
                }
            }
            (Some(name), true) => {
                self.inner.clear_event(name);
                tracing::trace!(event = %name, "Cleared event listeners");
            }
            (name, false) => {
                let removed = self
                    .inner
                    .remove_where(name, |binding| filter.matches(binding));
                tracing::trace!(event = ?name.map(EventName::as_str), removed, "Unsubscribed listeners");
            }
        }
    }

    /// Unsubscribes several `(name, callback)` pairs, each restricted to
    /// `receiver` if given.
    pub fn unsubscribe_many<N, I>(&self, entries: I, receiver: Option<&Receiver>)
    where
        N: Into<EventName>,
        I: IntoIterator<Item = (N, Callback<H, A>)>,
    {
        for (name, callback) in entries {
            self.unsubscribe(
                &Filter::event(name)
                    .callback(&callback)
                    .maybe_receiver(receiver),
            );
        }
    }

    /// Publishes `name` with `args` on behalf of `host`.
    ///
    /// Listeners of `name` run first, in subscription order, then the
    /// listeners of the catch-all event with `name` prepended to `args`.
    /// Publishing the catch-all event itself runs its listeners once, with
    /// `args` as given.
    ///
    /// The listener lists are captured when the publish starts: bindings
    /// added by a listener are not invoked by the publish in progress, and
    /// bindings removed by a listener still are, except one-shot bindings,
    /// which never run twice.
    ///
    /// # Errors
    ///
    /// Returns `Error::Callback` with the first error a listener returns.
    /// Listeners after the failing one are not invoked. The listener's own
    /// error is kept as is and comes back through
    /// [`std::error::Error::source`] (or by matching the `source` field).
    pub fn publish(&self, host: &H, name: impl Into<EventName>, args: &[A]) -> Result<()>
    where
        A: Clone + From<EventName>,
    {
        let name = name.into();
        let specific = self.inner.lookup(&name);
        let catch_all = self
            .inner
            .config
            .catch_all()
            .filter(|all| **all != name)
            .and_then(|all| self.inner.lookup(all).map(|list| (all, list)));

        if specific.is_none() && catch_all.is_none() {
            tracing::trace!(event = %name, "No listeners for event");
            return Ok(());
        }

        tracing::trace!(
            event = %name,
            listeners = specific.as_ref().map_or(0, |list| list.len()),
            catch_all = catch_all.as_ref().map_or(0, |(_, list)| list.len()),
            "Publishing event"
        );

        if let Some(list) = specific {
            self.dispatch(host, &name, &name, &list, args)?;
        }

        if let Some((all, list)) = catch_all {
            let mut prefixed = Vec::with_capacity(args.len() + 1);
            prefixed.push(A::from(name.clone()));
            prefixed.extend_from_slice(args);
            self.dispatch(host, &name, all, &list, &prefixed)?;
        }

        Ok(())
    }

    fn dispatch(
        &self,
        host: &H,
        event: &EventName,
        list_name: &EventName,
        list: &[Binding<H, A>],
        args: &[A],
    ) -> Result<()> {
        for binding in list {
            if let Some(once) = &binding.once {
                if !once.claim() {
                    continue;
                }
                if let Some(home) = once.home() {
                    home.remove_binding(list_name, binding.id);
                }
                self.inner.remove_binding(list_name, binding.id);
                tracing::trace!(event = %list_name, binding = %binding.id, "Released one-shot listener");
            }

            let this = binding
                .receiver
                .as_ref()
                .map_or(This::Host(host), This::Receiver);
            binding
                .callback
                .call(this, args)
                .map_err(|source| Error::Callback {
                    event: event.clone(),
                    source,
                })?;
        }
        Ok(())
    }

    /// Returns the number of listeners bound to `name`, inherited ones
    /// included.
    #[must_use]
    pub fn listener_count(&self, name: impl Into<EventName>) -> usize {
        self.inner.lookup(&name.into()).map_or(0, |list| list.len())
    }

    /// Returns the names of all events with at least one listener, sorted.
    #[must_use]
    pub fn event_names(&self) -> Vec<EventName> {
        self.inner.visible_names().into_iter().collect()
    }

    /// Returns `true` if no event has a listener.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.visible_names().is_empty()
    }

    /// Returns `true` once this registry holds local state.
    ///
    /// A fresh registry has none; it is created by the first subscribe (or,
    /// on a derived registry, by the first unsubscribe that has to mask
    /// something) and dropped again by a full clear of a root registry.
    #[must_use]
    pub fn has_registry(&self) -> bool {
        self.inner.table.read().is_some()
    }
}

impl<H, A> Default for Events<H, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H, A> fmt::Debug for Events<H, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = self.event_names();
        let listeners: usize = names.iter().map(|name| self.listener_count(name)).sum();
        f.debug_struct("Events")
            .field("event_count", &names.len())
            .field("listener_count", &listeners)
            .field("derived", &self.is_derived())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicU32;

    use parking_lot::Mutex;

    struct Host;

    type Recorder = Arc<Mutex<Vec<String>>>;

    fn recorder() -> Recorder {
        Arc::new(Mutex::new(Vec::new()))
    }

    fn record(log: &Recorder, label: &'static str) -> Callback<Host, String> {
        let log = log.clone();
        Callback::new(move |_, args| {
            log.lock().push(format!("{label}{args:?}"));
        })
    }

    fn counter() -> (Arc<AtomicU32>, Callback<Host, String>) {
        let count = Arc::new(AtomicU32::new(0));
        let count_clone = count.clone();
        let callback = Callback::new(move |_, _| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });
        (count, callback)
    }

    #[test]
    fn new_registry_is_lazy() {
        let events: Events<Host, String> = Events::new();
        assert!(!events.has_registry());
        assert!(events.is_empty());

        events.publish(&Host, "foo", &[]).unwrap();
        events.unsubscribe(&Filter::any());
        events.unsubscribe(&Filter::event("foo"));
        assert!(!events.has_registry());
    }

    #[test]
    fn subscribe_creates_registry() {
        let events: Events<Host, String> = Events::new();
        events.subscribe("foo", Callback::new(|_, _| {}), None);

        assert!(events.has_registry());
        assert_eq!(events.listener_count("foo"), 1);
        assert_eq!(events.event_names(), vec![EventName::from("foo")]);
    }

    #[test]
    fn publish_runs_in_subscription_order() {
        let log = recorder();
        let events: Events<Host, String> = Events::new();
        events.subscribe("foo", record(&log, "a"), None);
        events.subscribe("foo", record(&log, "b"), None);

        events.publish(&Host, "foo", &["x".to_string()]).unwrap();

        assert_eq!(*log.lock(), vec![r#"a["x"]"#, r#"b["x"]"#]);
    }

    #[test]
    fn catch_all_runs_after_specific_with_name_prepended() {
        let log = recorder();
        let events: Events<Host, String> = Events::new();
        events.subscribe(EventName::ALL, record(&log, "all"), None);
        events.subscribe("foo", record(&log, "foo"), None);

        events.publish(&Host, "foo", &["1".to_string()]).unwrap();

        assert_eq!(*log.lock(), vec![r#"foo["1"]"#, r#"all["foo", "1"]"#]);
    }

    #[test]
    fn publishing_catch_all_runs_its_listeners_once() {
        let (count, callback) = counter();
        let events: Events<Host, String> = Events::new();
        events.subscribe("all", callback, None);

        events.publish(&Host, "all", &[]).unwrap();

        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn catch_all_follows_config() {
        let log = recorder();
        let events: Events<Host, String> =
            Events::with_config(RegistryConfig::default().with_catch_all("*"));
        events.subscribe("*", record(&log, "star"), None);
        events.subscribe("all", record(&log, "all"), None);

        events.publish(&Host, "foo", &[]).unwrap();
        assert_eq!(*log.lock(), vec![r#"star["foo"]"#]);

        let disabled: Events<Host, String> =
            Events::with_config(RegistryConfig::default().without_catch_all());
        let (count, callback) = counter();
        disabled.subscribe("all", callback, None);
        disabled.publish(&Host, "foo", &[]).unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn once_runs_once_and_is_removed() {
        let (count, callback) = counter();
        let events: Events<Host, String> = Events::new();
        events.subscribe_once("foo", callback, None);

        events.publish(&Host, "foo", &[]).unwrap();
        events.publish(&Host, "foo", &[]).unwrap();

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(events.listener_count("foo"), 0);
    }

    #[test]
    fn once_survives_reentrant_publish() {
        let events: Arc<Events<Host, String>> = Arc::new(Events::new());
        let count = Arc::new(AtomicU32::new(0));

        let events_clone = events.clone();
        let count_clone = count.clone();
        events.subscribe_once(
            "foo",
            Callback::new(move |_, _| {
                count_clone.fetch_add(1, Ordering::SeqCst);
                events_clone.publish(&Host, "foo", &[]).unwrap();
            }),
            None,
        );

        events.publish(&Host, "foo", &[]).unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn listener_may_subscribe_during_publish() {
        let events: Arc<Events<Host, String>> = Arc::new(Events::new());
        let (late_count, late) = counter();

        let events_clone = events.clone();
        events.subscribe(
            "foo",
            Callback::new(move |_, _| {
                events_clone.subscribe("foo", late.clone(), None);
            }),
            None,
        );

        // The listener added mid-publish is not part of the running publish
        events.publish(&Host, "foo", &[]).unwrap();
        assert_eq!(late_count.load(Ordering::SeqCst), 0);
        assert_eq!(events.listener_count("foo"), 2);

        events.publish(&Host, "foo", &[]).unwrap();
        assert_eq!(late_count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn failing_listener_stops_dispatch() {
        let (count, after) = counter();
        let events: Events<Host, String> = Events::new();
        events.subscribe("foo", Callback::try_new(|_, _| Err("nope".into())), None);
        events.subscribe("foo", after, None);

        let err = events.publish(&Host, "foo", &[]).unwrap_err();

        assert!(matches!(&err, Error::Callback { event, .. } if event.as_str() == "foo"));
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn listener_error_comes_back_as_source() {
        use std::error::Error as _;

        #[derive(Debug, thiserror::Error)]
        #[error("disk full")]
        struct DiskFull;

        let events: Events<Host, String> = Events::new();
        events.subscribe("foo", Callback::try_new(|_, _| Err(DiskFull.into())), None);

        let err = events.publish(&Host, "foo", &[]).unwrap_err();

        assert!(err.source().is_some_and(|source| source.is::<DiskFull>()));
    }

    #[test]
    fn unsubscribe_by_callback_across_events() {
        let (count, callback) = counter();
        let events: Events<Host, String> = Events::new();
        events.subscribe("foo", callback.clone(), None);
        events.subscribe("bar", callback.clone(), None);
        events.subscribe_once("baz", callback.clone(), None);

        events.unsubscribe(&Filter::any().callback(&callback));

        assert!(events.is_empty());
        events.publish(&Host, "foo", &[]).unwrap();
        events.publish(&Host, "baz", &[]).unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn unsubscribe_emptied_list_is_removed() {
        let events: Events<Host, String> = Events::new();
        let callback = Callback::new(|_, _| {});
        events.subscribe("foo", callback.clone(), None);

        events.unsubscribe(&Filter::event("foo").callback(&callback));

        assert!(events.event_names().is_empty());
        assert!(events.has_registry());
    }

    #[test]
    fn full_clear_drops_root_registry() {
        let events: Events<Host, String> = Events::new();
        events.subscribe("foo", Callback::new(|_, _| {}), None);

        events.unsubscribe(&Filter::any());

        assert!(!events.has_registry());
    }

    #[test]
    fn derived_subscribe_copies_inherited_list() {
        let log = recorder();
        let parent: Events<Host, String> = Events::new();
        parent.subscribe("e", record(&log, "a"), None);

        let child = parent.derive();
        child.subscribe("e", record(&log, "b"), None);

        child.publish(&Host, "e", &[]).unwrap();
        parent.publish(&Host, "e", &[]).unwrap();

        assert_eq!(*log.lock(), vec!["a[]", "b[]", "a[]"]);
        assert_eq!(parent.listener_count("e"), 1);
        assert_eq!(child.listener_count("e"), 2);
    }

    #[test]
    fn derived_sees_later_parent_bindings_until_it_writes() {
        let parent: Events<Host, String> = Events::new();
        let child = parent.derive();

        parent.subscribe("e", Callback::new(|_, _| {}), None);
        assert_eq!(child.listener_count("e"), 1);
        assert!(!child.has_registry());
    }

    #[test]
    fn derived_unsubscribe_masks_inherited() {
        let (count, callback) = counter();
        let parent: Events<Host, String> = Events::new();
        parent.subscribe("e", callback.clone(), None);
        let child = parent.derive();

        child.unsubscribe(&Filter::event("e").callback(&callback));

        child.publish(&Host, "e", &[]).unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 0);
        parent.publish(&Host, "e", &[]).unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(child.event_names().is_empty());
    }

    #[test]
    fn derived_full_clear_masks_everything() {
        let parent: Events<Host, String> = Events::new();
        parent.subscribe("a", Callback::new(|_, _| {}), None);
        let child = parent.derive();

        child.unsubscribe(&Filter::any());
        parent.subscribe("b", Callback::new(|_, _| {}), None);

        assert!(child.has_registry());
        assert!(child.is_empty());
        assert_eq!(parent.event_names().len(), 2);
    }

    #[test]
    fn once_on_parent_fired_through_child_is_gone_everywhere() {
        let (count, callback) = counter();
        let parent: Events<Host, String> = Events::new();
        parent.subscribe_once("e", callback, None);
        let child = parent.derive();

        child.publish(&Host, "e", &[]).unwrap();
        parent.publish(&Host, "e", &[]).unwrap();

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(parent.listener_count("e"), 0);
        assert_eq!(child.listener_count("e"), 0);
    }

    #[test]
    fn once_fired_on_parent_leaves_no_trace_in_forked_child() {
        let (count, once) = counter();
        let parent: Events<Host, String> = Events::new();
        parent.subscribe_once("e", once, None);

        let child = parent.derive();
        let sibling = parent.derive();
        let other = Callback::new(|_, _| {});
        child.subscribe("e", other.clone(), None);
        child.unsubscribe(&Filter::event("e").callback(&other));
        assert_eq!(child.listener_count("e"), 1);

        parent.publish(&Host, "e", &[]).unwrap();

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(parent.listener_count("e"), 0);
        assert_eq!(child.listener_count("e"), 0);
        assert!(child.is_empty());
        assert!(child.event_names().is_empty());
        assert_eq!(sibling.listener_count("e"), 0);
        assert!(sibling.is_empty());

        child.publish(&Host, "e", &[]).unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn once_fired_through_sibling_leaves_forked_copy_clean() {
        let (once_count, once) = counter();
        let (plain_count, plain) = counter();
        let parent: Events<Host, String> = Events::new();
        parent.subscribe_once("e", once, None);

        let forked = parent.derive();
        forked.subscribe("e", plain, None);
        let sibling = parent.derive();
        assert_eq!(forked.listener_count("e"), 2);

        sibling.publish(&Host, "e", &[]).unwrap();

        assert_eq!(once_count.load(Ordering::SeqCst), 1);
        assert_eq!(parent.listener_count("e"), 0);
        assert_eq!(sibling.listener_count("e"), 0);
        assert_eq!(forked.listener_count("e"), 1);
        assert_eq!(forked.event_names(), vec![EventName::from("e")]);

        forked.publish(&Host, "e", &[]).unwrap();
        assert_eq!(once_count.load(Ordering::SeqCst), 1);
        assert_eq!(plain_count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn spent_copy_is_pruned_by_next_write() {
        let (_, once) = counter();
        let parent: Events<Host, String> = Events::new();
        parent.subscribe_once("e", once, None);
        let child = parent.derive();
        child.subscribe("e", Callback::new(|_, _| {}), None);

        parent.publish(&Host, "e", &[]).unwrap();
        child.subscribe("e", Callback::new(|_, _| {}), None);

        assert_eq!(child.listener_count("e"), 2);
    }

    #[test]
    fn derived_inherits_config() {
        let parent: Events<Host, String> =
            Events::with_config(RegistryConfig::default().without_catch_all());
        let child = parent.derive();

        assert!(child.is_derived());
        assert!(child.config().catch_all().is_none());
    }

    #[test]
    fn debug_shows_counts() {
        let events: Events<Host, String> = Events::new();
        events.subscribe("foo", Callback::new(|_, _| {}), None);
        events.subscribe("foo", Callback::new(|_, _| {}), None);

        let debug = format!("{events:?}");
        assert!(debug.contains("Events"));
        assert!(debug.contains("listener_count: 2"));
    }
}
