use parking_lot::Mutex;
use tracing::{debug, error};

use super::ObjectFactory;
use crate::{
    any::Object, binding::Binding, config::RequestFallback, context::RequestKey, errors::ResolveErrorKind, Container,
};

/// Keeps one object per ambient request.
///
/// Outside of a request the object is kept in a slot shared by the whole container,
/// unless [`RequestFallback::Fail`] is configured.
pub(crate) struct RequestFactory {
    key: RequestKey,
    fallback: Mutex<Option<Object>>,
}

impl RequestFactory {
    #[inline]
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            key: RequestKey::next(),
            fallback: Mutex::new(None),
        }
    }
}

impl ObjectFactory for RequestFactory {
    fn get_object(&self, binding: &Binding, container: &Container) -> Result<Object, ResolveErrorKind> {
        container.serialized(|| {
            if let Some(request) = container.current_request() {
                if let Some(object) = request.get(&self.key) {
                    debug!("Found in request cache");
                    return Ok(object);
                }
                debug!("Not found in request cache");

                let object = binding.activate(container)?;
                request.set(self.key, object.clone());
                debug!("Cached for request");
                return Ok(object);
            }

            if container.config().request_fallback == RequestFallback::Fail {
                let err = ResolveErrorKind::NoRequestContext {
                    service: binding.service_type(),
                };
                error!("{}", err);
                return Err(err);
            }

            debug!("No request context, using shared slot");
            if let Some(object) = self.fallback.lock().as_ref() {
                return Ok(object.clone());
            }
            let object = binding.activate(container)?;
            Ok(self.fallback.lock().get_or_insert(object).clone())
        })
    }
}
