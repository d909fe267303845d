use core::marker::PhantomData;
use std::sync::Arc;

use crate::{
    binding::Binding,
    injectable::{Implements, Injectable, TypeDescriptor},
    scope::ObjectScope,
};

/// Declarative unit that produces bindings when loaded.
///
/// [`Registry::load`] is called once per [`crate::Container::register`] call.
/// Nothing is validated here, the container checks all bindings of a register call together.
///
/// # Examples
/// ```rust
/// use ioclite::{implements, Constructor, Injectable, Registry, RegistryBuilder};
///
/// trait Repo: Send + Sync {}
///
/// impl Injectable for dyn Repo {}
///
/// #[derive(Default)]
/// struct PgRepo;
///
/// impl Repo for PgRepo {}
///
/// impl Injectable for PgRepo {
///     fn constructor() -> Option<Constructor> {
///         Some(Constructor::from_default::<Self>())
///     }
/// }
///
/// implements!(PgRepo => dyn Repo);
///
/// struct AppRegistry;
///
/// impl Registry for AppRegistry {
///     fn load(&self, builder: &mut RegistryBuilder) {
///         builder.bind::<dyn Repo>().to::<PgRepo>().in_request_scope();
///     }
/// }
/// ```
pub trait Registry {
    fn load(&self, builder: &mut RegistryBuilder);
}

impl<F> Registry for F
where
    F: Fn(&mut RegistryBuilder),
{
    #[inline]
    fn load(&self, builder: &mut RegistryBuilder) {
        self(builder);
    }
}

#[derive(Default)]
pub struct RegistryBuilder {
    bindings: Vec<Binding>,
}

impl RegistryBuilder {
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { bindings: Vec::new() }
    }

    /// Starts a binding for the service type
    #[inline]
    #[must_use]
    pub fn bind<Service>(&mut self) -> BindingMap<'_, Service>
    where
        Service: ?Sized + Send + Sync + 'static,
    {
        BindingMap {
            builder: self,
            _service: PhantomData,
        }
    }

    #[inline]
    #[must_use]
    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    #[inline]
    pub(crate) fn into_bindings(self) -> Vec<Binding> {
        self.bindings
    }

    #[inline]
    fn push(&mut self, binding: Binding) -> &mut Binding {
        self.bindings.push(binding);
        let last = self.bindings.len() - 1;
        &mut self.bindings[last]
    }
}

pub struct BindingMap<'a, Service: ?Sized> {
    builder: &'a mut RegistryBuilder,
    _service: PhantomData<fn() -> Arc<Service>>,
}

impl<'a, Service> BindingMap<'a, Service>
where
    Service: ?Sized + Send + Sync + 'static,
{
    /// Binds the service type to a plugin type built by the container.
    /// The binding is in transient scope unless another one is chosen.
    #[inline]
    pub fn to<Plugin>(self) -> BindingOptions<'a>
    where
        Plugin: Injectable + Implements<Service> + ?Sized,
    {
        BindingOptions {
            binding: self
                .builder
                .push(Binding::new::<Service, Plugin>(TypeDescriptor::of::<Plugin>())),
        }
    }

    /// Binds the service type to a pre-built instance.
    /// The binding is in singleton scope, the only scope allowed for instances.
    #[inline]
    pub fn to_instance<Plugin>(self, instance: Arc<Plugin>) -> BindingOptions<'a>
    where
        Plugin: Implements<Service> + ?Sized,
    {
        BindingOptions {
            binding: self.builder.push(Binding::with_instance::<Service, Plugin>(instance)),
        }
    }
}

pub struct BindingOptions<'a> {
    binding: &'a mut Binding,
}

impl BindingOptions<'_> {
    #[inline]
    pub fn named(self, name: impl Into<String>) -> Self {
        self.binding.name = Some(name.into());
        self
    }

    #[inline]
    pub fn in_scope(self, scope: ObjectScope) -> Self {
        self.binding.scope = scope;
        self
    }

    #[inline]
    pub fn in_transient_scope(self) -> Self {
        self.in_scope(ObjectScope::Transient)
    }

    #[inline]
    pub fn in_singleton_scope(self) -> Self {
        self.in_scope(ObjectScope::Singleton)
    }

    #[inline]
    pub fn in_thread_scope(self) -> Self {
        self.in_scope(ObjectScope::ThreadLocal)
    }

    #[inline]
    pub fn in_request_scope(self) -> Self {
        self.in_scope(ObjectScope::RequestLocal)
    }
}
