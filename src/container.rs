use parking_lot::{ReentrantMutex, RwLock};
use std::sync::Arc;
use tracing::{debug, error, info, info_span};

use crate::{
    any::{Object, TypeInfo},
    binding::{Binding, BindingRegistration},
    config::Config,
    constructor::Arguments,
    context::{RequestAccessor, RequestStore, ThreadRequestAccessor},
    errors::{BindingInfo, RegisterErrorKind, ResolveErrorKind},
    injectable::{Injectable, TypeDescriptor},
    registry::{Registry, RegistryBuilder},
    resolver::BindingResolver,
    scope::ObjectScope,
};

/// Container of bindings.
///
/// Bindings are registered once at startup with [`Container::register`], after that the container
/// can be cloned and shared between threads to resolve services.
/// Every construction of an object is serialized across the container.
#[derive(Clone)]
pub struct Container {
    inner: Arc<ContainerInner>,
}

struct ContainerInner {
    registrations: RwLock<Vec<Arc<BindingRegistration>>>,
    resolver: BindingResolver,
    lock: ReentrantMutex<()>,
    requests: Arc<dyn RequestAccessor>,
    config: Config,
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl Container {
    /// Creates an empty container with the default config.
    /// Request-local bindings use requests entered with [`crate::RequestContext::enter`].
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    #[inline]
    #[must_use]
    pub fn with_config(config: Config) -> Self {
        Self::with_request_accessor(config, ThreadRequestAccessor)
    }

    /// Creates an empty container that gets the ambient request from the host
    #[must_use]
    pub fn with_request_accessor(config: Config, requests: impl RequestAccessor + 'static) -> Self {
        Self {
            inner: Arc::new(ContainerInner {
                registrations: RwLock::new(Vec::new()),
                resolver: BindingResolver,
                lock: ReentrantMutex::new(()),
                requests: Arc::new(requests),
                config,
            }),
        }
    }

    /// Loads the registries and registers their bindings.
    ///
    /// All bindings of the call are validated before any of them is registered,
    /// so in case of an error the container stays as it was.
    ///
    /// # Warning
    /// Registration is expected to happen once at startup, before the container is used to resolve services.
    ///
    /// # Errors
    /// - Returns [`RegisterErrorKind::NoRegistries`] if `registries` is empty
    /// - Returns [`RegisterErrorKind::EmptyName`] if a binding is named with an empty string
    /// - Returns [`RegisterErrorKind::InstanceInNonSingletonScope`] if an instance is bound in a scope other than singleton
    /// - Returns [`RegisterErrorKind::AbstractPluginType`] if an abstract plugin type is bound without an instance
    /// - Returns [`RegisterErrorKind::DuplicateDefaultBinding`] or [`RegisterErrorKind::DuplicateNamedBinding`]
    ///   if another binding for the same service type has the same name, or both have no name
    pub fn register(&self, registries: &[&dyn Registry]) -> Result<(), RegisterErrorKind> {
        let span = info_span!("register", registries = registries.len());
        let _guard = span.enter();

        if registries.is_empty() {
            let err = RegisterErrorKind::NoRegistries;
            error!("{}", err);
            return Err(err);
        }

        let registered: Vec<Binding> = self
            .inner
            .registrations
            .read()
            .iter()
            .map(|registration| registration.binding.clone())
            .collect();
        let mut accepted = Vec::new();

        for registry in registries {
            let mut builder = RegistryBuilder::new();
            registry.load(&mut builder);

            for binding in builder.into_bindings() {
                if let Err(err) = validate(&binding, registered.iter().chain(accepted.iter())) {
                    error!("{}", err);
                    return Err(err);
                }
                debug!(binding = %binding, "Accepted");
                accepted.push(binding);
            }
        }

        info!("Registered {} bindings", accepted.len());
        self.inner
            .registrations
            .write()
            .extend(accepted.into_iter().map(|binding| Arc::new(BindingRegistration::new(binding))));
        Ok(())
    }

    /// Resolves the default binding of the service type.
    /// An unregistered concrete type is built with its constructor.
    ///
    /// # Errors
    /// - Returns [`ResolveErrorKind::NoBinding`] if the type is abstract and has no bindings
    /// - Returns [`ResolveErrorKind::NoDefault`] if the type has several bindings, all of them named
    /// - Returns errors of the object graph construction unchanged
    pub fn resolve<S>(&self) -> Result<Arc<S>, ResolveErrorKind>
    where
        S: Injectable + ?Sized,
    {
        self.resolve_type(&TypeDescriptor::of::<S>(), None).and_then(downcast::<S>)
    }

    /// Resolves the binding of the service type with the name.
    ///
    /// # Errors
    /// - Returns [`ResolveErrorKind::UnknownName`] if no binding for the service type has the name
    /// - Returns the errors of [`Container::resolve`]
    pub fn resolve_named<S>(&self, name: &str) -> Result<Arc<S>, ResolveErrorKind>
    where
        S: Injectable + ?Sized,
    {
        self.resolve_type(&TypeDescriptor::of::<S>(), Some(name)).and_then(downcast::<S>)
    }

    /// Resolves the default binding of the service type, returning `None` on any error.
    ///
    /// # Warning
    /// All errors are swallowed, including errors of nested dependencies and constructors.
    /// Use [`Container::resolve`] to find out why a service can't be resolved.
    #[must_use]
    pub fn try_resolve<S>(&self) -> Option<Arc<S>>
    where
        S: Injectable + ?Sized,
    {
        swallow(self.resolve::<S>())
    }

    /// Resolves the service type by its descriptor
    ///
    /// # Errors
    /// - Returns [`ResolveErrorKind::EmptyName`] if the name is an empty string
    /// - Returns the errors of [`Container::resolve`] and [`Container::resolve_named`]
    pub fn resolve_type(&self, descriptor: &TypeDescriptor, name: Option<&str>) -> Result<Object, ResolveErrorKind> {
        let service = descriptor.info();
        let span = info_span!("resolve", service = service.name, name);
        let _guard = span.enter();

        if name == Some("") {
            let err = ResolveErrorKind::EmptyName;
            error!("{}", err);
            return Err(err);
        }

        // Read lock is released before the factory is called, factories resolve dependencies recursively
        let registrations = self
            .inner
            .resolver
            .resolve_bindings(&service, &self.inner.registrations.read());

        if registrations.is_empty() {
            if descriptor.is_abstract() {
                let err = ResolveErrorKind::NoBinding { service };
                error!("{}", err);
                return Err(err);
            }
            debug!("No bindings, creating object graph");
            return self.create_object_graph(descriptor);
        }

        let registration = self.inner.resolver.select(service, name, registrations)?;
        debug!(scope = %registration.binding.scope, "Binding found");
        registration.get_object(self)
    }

    /// Resolves the service type by its descriptor, returning `None` on any error
    #[must_use]
    pub fn try_resolve_type(&self, descriptor: &TypeDescriptor) -> Option<Object> {
        swallow(self.resolve_type(descriptor, None))
    }

    /// Builds a new instance of the concrete type.
    ///
    /// Parameters of the type constructor are resolved in order with [`Container::resolve_type`],
    /// so parameter types with bindings get instances according to their scopes.
    /// Dependency cycles aren't detected.
    ///
    /// # Errors
    /// - Returns [`ResolveErrorKind::AbstractType`] if the type is abstract
    /// - Returns errors of parameter resolution and of the constructor unchanged
    pub fn create_object_graph(&self, descriptor: &TypeDescriptor) -> Result<Object, ResolveErrorKind> {
        let Some(constructor) = descriptor.constructor() else {
            let err = ResolveErrorKind::AbstractType {
                type_info: descriptor.info(),
            };
            error!("{}", err);
            return Err(err);
        };

        if constructor.is_parameterless() {
            debug!(type_name = descriptor.info().name, "Constructing without dependencies");
            return constructor.invoke(Arguments::new(Vec::new()));
        }

        let mut arguments = Vec::with_capacity(constructor.parameters().len());
        for parameter in constructor.parameters() {
            arguments.push(self.resolve_type(parameter, None)?);
        }
        debug!(
            type_name = descriptor.info().name,
            dependencies = arguments.len(),
            "Constructing with dependencies"
        );
        constructor.invoke(Arguments::new(arguments))
    }

    /// Snapshot of the registered bindings in registration order
    #[must_use]
    pub fn bindings(&self) -> Vec<Binding> {
        self.inner
            .registrations
            .read()
            .iter()
            .map(|registration| registration.binding.clone())
            .collect()
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> Config {
        self.inner.config
    }
}

impl Container {
    /// Runs `f` holding the container construction lock.
    /// The lock is reentrant, so `f` can resolve dependencies on the same thread.
    #[inline]
    pub(crate) fn serialized<R>(&self, f: impl FnOnce() -> R) -> R {
        let _guard = self.inner.lock.lock();
        f()
    }

    #[inline]
    pub(crate) fn current_request(&self) -> Option<Arc<dyn RequestStore>> {
        self.inner.requests.current()
    }
}

fn validate<'a>(binding: &Binding, accepted: impl Iterator<Item = &'a Binding>) -> Result<(), RegisterErrorKind> {
    if binding.name() == Some("") {
        return Err(RegisterErrorKind::EmptyName { binding: binding.into() });
    }
    if binding.instance().is_some() && binding.scope() != ObjectScope::Singleton {
        return Err(RegisterErrorKind::InstanceInNonSingletonScope {
            scope: binding.scope(),
            binding: binding.into(),
        });
    }
    if binding.instance().is_none() && binding.plugin.is_abstract() {
        return Err(RegisterErrorKind::AbstractPluginType {
            service: binding.service_type(),
            plugin: binding.plugin_type(),
            binding: binding.into(),
        });
    }

    let mut conflicts: Vec<BindingInfo> = accepted
        .filter(|accepted| accepted.conflicts_with(binding))
        .map(BindingInfo::from)
        .collect();
    if conflicts.is_empty() {
        return Ok(());
    }
    conflicts.push(binding.into());

    let service = binding.service_type();
    Err(match binding.name() {
        Some(name) => RegisterErrorKind::DuplicateNamedBinding {
            service,
            name: name.into(),
            conflicts,
        },
        None => RegisterErrorKind::DuplicateDefaultBinding { service, conflicts },
    })
}

fn downcast<S>(object: Object) -> Result<Arc<S>, ResolveErrorKind>
where
    S: ?Sized + Send + Sync + 'static,
{
    object.downcast::<S>().ok_or_else(|| {
        let err = ResolveErrorKind::IncorrectType {
            expected: TypeInfo::of::<S>(),
            actual: object.type_info(),
        };
        error!("{}", err);
        err
    })
}

fn swallow<T>(result: Result<T, ResolveErrorKind>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            debug!(%err, "Resolve failed, returning nothing");
            None
        }
    }
}
