mod request;
mod singleton;
mod thread;
mod transient;

use crate::{any::Object, binding::Binding, errors::ResolveErrorKind, scope::ObjectScope, Container};

pub(crate) use request::RequestFactory;
pub(crate) use singleton::SingletonFactory;
pub(crate) use thread::ThreadFactory;
pub(crate) use transient::TransientFactory;

/// Lifecycle policy of a single binding.
///
/// A factory owns its cached state and is the only one that reads or writes it.
/// Construction goes through [`Container::serialized`], so at most one object is built at a time per container.
pub(crate) trait ObjectFactory: Send + Sync {
    fn get_object(&self, binding: &Binding, container: &Container) -> Result<Object, ResolveErrorKind>;
}

#[must_use]
pub(crate) fn object_factory(binding: &Binding) -> Box<dyn ObjectFactory> {
    match binding.scope {
        ObjectScope::Transient => Box::new(TransientFactory),
        ObjectScope::Singleton => Box::new(SingletonFactory::new(binding.instance.clone())),
        ObjectScope::ThreadLocal => Box::new(ThreadFactory::new()),
        ObjectScope::RequestLocal => Box::new(RequestFactory::new()),
    }
}
