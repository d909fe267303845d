use core::{
    marker::PhantomData,
    sync::atomic::{AtomicU64, Ordering},
};
use parking_lot::Mutex;
use std::{cell::RefCell, collections::BTreeMap, sync::Arc};

use crate::any::Object;

/// Key of a request-local slot, unique per request-local binding
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestKey(u64);

impl RequestKey {
    #[inline]
    #[must_use]
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);

        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Keyed storage scoped to one logical request, owned by the host
pub trait RequestStore: Send + Sync {
    fn get(&self, key: &RequestKey) -> Option<Object>;

    fn set(&self, key: RequestKey, value: Object);
}

/// Access to the ambient request of the caller.
///
/// Returns `None` when the caller isn't inside a request.
pub trait RequestAccessor: Send + Sync {
    fn current(&self) -> Option<Arc<dyn RequestStore>>;
}

/// Built-in request store.
///
/// # Examples
/// ```rust
/// use ioclite::RequestContext;
/// use std::sync::Arc;
///
/// let request = Arc::new(RequestContext::new());
/// {
///     let _guard = request.enter();
///     // Request-local bindings resolved here are cached in `request`
/// }
/// ```
#[derive(Default)]
pub struct RequestContext {
    map: Mutex<BTreeMap<RequestKey, Object>>,
}

impl RequestContext {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            map: Mutex::new(BTreeMap::new()),
        }
    }

    /// Makes the request current on this thread until the guard is dropped.
    /// Requests can be nested, the innermost one still entered is current.
    #[must_use]
    pub fn enter(self: &Arc<Self>) -> RequestGuard {
        CURRENT_REQUESTS.with(|requests| requests.borrow_mut().push(self.clone()));
        RequestGuard {
            request: self.clone(),
            _not_send: PhantomData,
        }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.lock().len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.lock().is_empty()
    }
}

impl RequestStore for RequestContext {
    #[inline]
    fn get(&self, key: &RequestKey) -> Option<Object> {
        self.map.lock().get(key).cloned()
    }

    #[inline]
    fn set(&self, key: RequestKey, value: Object) {
        self.map.lock().insert(key, value);
    }
}

thread_local! {
    static CURRENT_REQUESTS: RefCell<Vec<Arc<RequestContext>>> = const { RefCell::new(Vec::new()) };
}

/// Leaves the request entered with [`RequestContext::enter`] on drop.
/// Guards can be dropped in any order.
pub struct RequestGuard {
    request: Arc<RequestContext>,
    _not_send: PhantomData<*const ()>,
}

impl Drop for RequestGuard {
    fn drop(&mut self) {
        let _ = CURRENT_REQUESTS.try_with(|requests| {
            let mut requests = requests.borrow_mut();
            if let Some(index) = requests.iter().rposition(|request| Arc::ptr_eq(request, &self.request)) {
                requests.remove(index);
            }
        });
    }
}

/// Reads the innermost [`RequestContext`] entered on the calling thread
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRequestAccessor;

impl RequestAccessor for ThreadRequestAccessor {
    fn current(&self) -> Option<Arc<dyn RequestStore>> {
        CURRENT_REQUESTS.with(|requests| requests.borrow().last().cloned().map(|request| request as Arc<dyn RequestStore>))
    }
}

#[cfg(test)]
mod tests {
    use super::{RequestAccessor as _, RequestContext, RequestKey, RequestStore as _, ThreadRequestAccessor};
    use crate::any::Object;

    use std::sync::Arc;

    #[test]
    fn test_keys_unique() {
        assert_ne!(RequestKey::next(), RequestKey::next());
    }

    #[test]
    fn test_store() {
        let request = RequestContext::new();
        let key = RequestKey::next();
        let object = Object::new(Arc::new(1u8));

        assert!(request.get(&key).is_none());
        request.set(key, object.clone());

        assert!(request.get(&key).unwrap().ptr_eq(&object));
        assert_eq!(request.len(), 1);
    }

    #[test]
    fn test_enter_nested() {
        let outer = Arc::new(RequestContext::new());
        let inner = Arc::new(RequestContext::new());
        let key = RequestKey::next();
        let accessor = ThreadRequestAccessor;

        assert!(accessor.current().is_none());
        {
            let _outer_guard = outer.enter();
            {
                let _inner_guard = inner.enter();
                accessor.current().unwrap().set(key, Object::new(Arc::new(())));
            }
            assert!(accessor.current().unwrap().get(&key).is_none());
        }
        assert!(accessor.current().is_none());
        assert!(inner.get(&key).is_some());
        assert!(outer.is_empty());
    }

    #[test]
    fn test_guards_dropped_out_of_order() {
        let outer = Arc::new(RequestContext::new());
        let inner = Arc::new(RequestContext::new());
        let key = RequestKey::next();
        let accessor = ThreadRequestAccessor;

        let outer_guard = outer.enter();
        let inner_guard = inner.enter();
        drop(outer_guard);

        accessor.current().unwrap().set(key, Object::new(Arc::new(())));
        assert!(inner.get(&key).is_some());
        assert!(outer.is_empty());

        drop(inner_guard);
        assert!(accessor.current().is_none());
    }

    #[test]
    fn test_same_request_entered_twice() {
        let request = Arc::new(RequestContext::new());
        let accessor = ThreadRequestAccessor;

        let first = request.enter();
        let second = request.enter();
        drop(first);
        assert!(accessor.current().is_some());

        drop(second);
        assert!(accessor.current().is_none());
    }

    #[test]
    fn test_current_is_thread_bound() {
        let request = Arc::new(RequestContext::new());
        let _guard = request.enter();

        std::thread::scope(|scope| {
            scope.spawn(|| assert!(ThreadRequestAccessor.current().is_none()));
        });
        assert!(ThreadRequestAccessor.current().is_some());
    }
}
