#[macro_use]
pub(crate) mod macros;

pub(crate) mod any;
pub(crate) mod binding;
pub(crate) mod config;
pub(crate) mod constructor;
pub(crate) mod container;
pub(crate) mod context;
pub(crate) mod errors;
pub(crate) mod factory;
pub(crate) mod injectable;
pub(crate) mod registry;
pub(crate) mod resolver;
pub(crate) mod scope;

pub use any::{Object, TypeInfo};
pub use binding::Binding;
pub use config::{Config, RequestFallback};
pub use constructor::{Arguments, Constructor, Parameters};
pub use container::Container;
pub use context::{RequestAccessor, RequestContext, RequestGuard, RequestKey, RequestStore, ThreadRequestAccessor};
pub use errors::{BindingInfo, InstantiateErrorKind, RegisterErrorKind, ResolveErrorKind};
pub use injectable::{Implements, Injectable, TypeDescriptor};
pub use registry::{BindingMap, BindingOptions, Registry, RegistryBuilder};
pub use scope::ObjectScope;
