use parking_lot::Mutex;
use tracing::debug;

use super::ObjectFactory;
use crate::{any::Object, binding::Binding, errors::ResolveErrorKind, Container};

pub(crate) struct SingletonFactory {
    instance: Mutex<Option<Object>>,
}

impl SingletonFactory {
    #[inline]
    #[must_use]
    pub(crate) fn new(instance: Option<Object>) -> Self {
        Self {
            instance: Mutex::new(instance),
        }
    }
}

impl ObjectFactory for SingletonFactory {
    fn get_object(&self, binding: &Binding, container: &Container) -> Result<Object, ResolveErrorKind> {
        container.serialized(|| {
            if let Some(object) = self.instance.lock().as_ref() {
                debug!("Found in cache");
                return Ok(object.clone());
            }
            debug!("Not found in cache");

            // Slot stays unlocked while the object graph is built
            let object = binding.activate(container)?;
            let object = self.instance.lock().get_or_insert(object).clone();
            debug!("Cached");
            Ok(object)
        })
    }
}
