use core::fmt::{self, Debug, Display, Formatter};
use std::sync::Arc;

use crate::{
    any::{Object, TypeInfo},
    errors::ResolveErrorKind,
    factory::{object_factory, ObjectFactory},
    injectable::{Implements, TypeDescriptor},
    scope::ObjectScope,
    Container,
};

type Upcast = fn(Object) -> Result<Object, ResolveErrorKind>;

fn upcast<Service, Plugin>(object: Object) -> Result<Object, ResolveErrorKind>
where
    Service: ?Sized + Send + Sync + 'static,
    Plugin: Implements<Service> + ?Sized,
{
    match object.downcast::<Plugin>() {
        Some(plugin) => Ok(Object::new(<Plugin as Implements<Service>>::upcast(plugin))),
        None => Err(ResolveErrorKind::IncorrectType {
            expected: TypeInfo::of::<Plugin>(),
            actual: object.type_info(),
        }),
    }
}

/// Mapping from a service type to a plugin type or a pre-built instance.
///
/// Created by [`crate::RegistryBuilder`], validated and frozen by [`Container::register`].
#[derive(Clone)]
pub struct Binding {
    pub(crate) service: TypeInfo,
    pub(crate) plugin: TypeDescriptor,
    pub(crate) name: Option<String>,
    pub(crate) instance: Option<Object>,
    pub(crate) scope: ObjectScope,
    upcast: Upcast,
}

impl Binding {
    #[must_use]
    pub(crate) fn new<Service, Plugin>(plugin: TypeDescriptor) -> Self
    where
        Service: ?Sized + Send + Sync + 'static,
        Plugin: Implements<Service> + ?Sized,
    {
        Self {
            service: TypeInfo::of::<Service>(),
            plugin,
            name: None,
            instance: None,
            scope: ObjectScope::Transient,
            upcast: upcast::<Service, Plugin>,
        }
    }

    #[must_use]
    pub(crate) fn with_instance<Service, Plugin>(instance: Arc<Plugin>) -> Self
    where
        Service: ?Sized + Send + Sync + 'static,
        Plugin: Implements<Service> + ?Sized,
    {
        Self {
            instance: Some(Object::new(<Plugin as Implements<Service>>::upcast(instance))),
            scope: ObjectScope::Singleton,
            ..Self::new::<Service, Plugin>(TypeDescriptor::opaque::<Plugin>())
        }
    }

    #[inline]
    #[must_use]
    pub const fn service_type(&self) -> TypeInfo {
        self.service
    }

    #[inline]
    #[must_use]
    pub const fn plugin_type(&self) -> TypeInfo {
        self.plugin.info()
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[inline]
    #[must_use]
    pub const fn instance(&self) -> Option<&Object> {
        self.instance.as_ref()
    }

    #[inline]
    #[must_use]
    pub const fn scope(&self) -> ObjectScope {
        self.scope
    }

    /// Returns `true` if both bindings can't be told apart by a resolve call
    #[must_use]
    pub(crate) fn conflicts_with(&self, other: &Binding) -> bool {
        self.service == other.service && self.name == other.name
    }

    /// Returns the pre-built instance or builds a new object graph of the plugin type as the service type
    pub(crate) fn activate(&self, container: &Container) -> Result<Object, ResolveErrorKind> {
        if let Some(instance) = &self.instance {
            return Ok(instance.clone());
        }
        let object = container.create_object_graph(&self.plugin)?;
        (self.upcast)(object)
    }
}

impl Display for Binding {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "bind::<{}>()", self.service)?;
        if self.instance.is_some() {
            write!(f, ".to_instance::<{}>(..)", self.plugin.info())?;
        } else {
            write!(f, ".to::<{}>()", self.plugin.info())?;
        }
        if let Some(name) = &self.name {
            write!(f, ".named({name:?})")?;
        }
        write!(f, ".{}", self.scope.declaration())
    }
}

impl Debug for Binding {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("service", &self.service.name)
            .field("plugin", &self.plugin.info().name)
            .field("name", &self.name)
            .field("instance", &self.instance)
            .field("scope", &self.scope)
            .finish()
    }
}

/// A binding paired with the factory implementing its scope
pub(crate) struct BindingRegistration {
    pub(crate) binding: Binding,
    pub(crate) factory: Box<dyn ObjectFactory>,
}

impl BindingRegistration {
    #[must_use]
    pub(crate) fn new(binding: Binding) -> Self {
        let factory = object_factory(&binding);
        Self { binding, factory }
    }

    #[inline]
    pub(crate) fn get_object(&self, container: &Container) -> Result<Object, ResolveErrorKind> {
        self.factory.get_object(&self.binding, container)
    }
}

impl Debug for BindingRegistration {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindingRegistration")
            .field("binding", &self.binding)
            .finish_non_exhaustive()
    }
}
