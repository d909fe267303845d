use core::{
    cell::RefCell,
    sync::atomic::{AtomicU64, Ordering},
};
use std::{
    collections::HashMap,
    sync::{Arc, Weak},
};
use tracing::debug;

use super::ObjectFactory;
use crate::{any::Object, binding::Binding, errors::ResolveErrorKind, Container};

static NEXT_SLOT: AtomicU64 = AtomicU64::new(0);

struct ThreadObject {
    factory: Weak<()>,
    object: Object,
}

thread_local! {
    static THREAD_OBJECTS: RefCell<HashMap<u64, ThreadObject>> = RefCell::new(HashMap::new());
}

/// Keeps one object per calling thread.
///
/// Objects live in thread-local storage keyed by the factory slot, so a cached lookup doesn't take
/// the container lock. Each entry holds a weak handle to its factory: the entry is removed when the
/// factory is dropped on the same thread, otherwise on the next cache miss on the entry's thread.
pub(crate) struct ThreadFactory {
    slot: u64,
    alive: Arc<()>,
}

impl ThreadFactory {
    #[inline]
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            slot: NEXT_SLOT.fetch_add(1, Ordering::Relaxed),
            alive: Arc::new(()),
        }
    }

    fn cached(&self) -> Option<Object> {
        THREAD_OBJECTS.with(|objects| objects.borrow().get(&self.slot).map(|entry| entry.object.clone()))
    }

    fn store(&self, object: Object) -> Object {
        THREAD_OBJECTS.with(|objects| {
            objects
                .borrow_mut()
                .entry(self.slot)
                .or_insert_with(|| ThreadObject {
                    factory: Arc::downgrade(&self.alive),
                    object,
                })
                .object
                .clone()
        })
    }
}

/// Removes entries of dropped factories from this thread's storage
fn purge_dropped() {
    // Objects are dropped after the borrow ends, their destructors may resolve services
    let dropped: Vec<ThreadObject> = THREAD_OBJECTS.with(|objects| {
        let mut objects = objects.borrow_mut();
        let slots: Vec<u64> = objects
            .iter()
            .filter(|(_, entry)| entry.factory.strong_count() == 0)
            .map(|(slot, _)| *slot)
            .collect();
        slots.iter().filter_map(|slot| objects.remove(slot)).collect()
    });
    if !dropped.is_empty() {
        debug!("Purged {} thread objects of dropped factories", dropped.len());
    }
}

impl ObjectFactory for ThreadFactory {
    fn get_object(&self, binding: &Binding, container: &Container) -> Result<Object, ResolveErrorKind> {
        if let Some(object) = self.cached() {
            debug!("Found in thread cache");
            return Ok(object);
        }
        debug!("Not found in thread cache");
        purge_dropped();

        let object = container.serialized(|| binding.activate(container))?;
        let object = self.store(object);
        debug!("Cached for thread");
        Ok(object)
    }
}

impl Drop for ThreadFactory {
    fn drop(&mut self) {
        // Thread-local storage may already be destroyed if the factory is dropped during thread teardown
        let removed = THREAD_OBJECTS
            .try_with(|objects| objects.borrow_mut().remove(&self.slot))
            .ok()
            .flatten();
        drop(removed);
    }
}
