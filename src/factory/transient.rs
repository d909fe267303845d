use tracing::debug;

use super::ObjectFactory;
use crate::{any::Object, binding::Binding, errors::ResolveErrorKind, Container};

pub(crate) struct TransientFactory;

impl ObjectFactory for TransientFactory {
    fn get_object(&self, binding: &Binding, container: &Container) -> Result<Object, ResolveErrorKind> {
        let object = container.serialized(|| binding.activate(container))?;
        debug!("Created transient");
        Ok(object)
    }
}
