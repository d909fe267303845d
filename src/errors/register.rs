use core::fmt::{self, Display, Formatter};

use crate::{any::TypeInfo, binding::Binding, scope::ObjectScope};

/// Snapshot of a binding for diagnostics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingInfo {
    pub service: TypeInfo,
    pub plugin: TypeInfo,
    pub name: Option<String>,
    pub scope: ObjectScope,
    /// Builder expression equivalent to the binding, e.g. `bind::<dyn Repo>().to::<PgRepo>().named("pg")`
    pub declaration: String,
}

impl From<&Binding> for BindingInfo {
    fn from(binding: &Binding) -> Self {
        Self {
            service: binding.service_type(),
            plugin: binding.plugin_type(),
            name: binding.name().map(Into::into),
            scope: binding.scope(),
            declaration: binding.to_string(),
        }
    }
}

impl Display for BindingInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "service type: {}, plugin type: {}, name: ", self.service, self.plugin)?;
        match &self.name {
            Some(name) => write!(f, "{name:?}")?,
            None => f.write_str("<default>")?,
        }
        write!(f, ", declared as `{}`", self.declaration)
    }
}

fn join(conflicts: &[BindingInfo]) -> String {
    conflicts
        .iter()
        .map(|conflict| format!("[{conflict}]"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(thiserror::Error, Debug)]
pub enum RegisterErrorKind {
    #[error("Registries not provided")]
    NoRegistries,
    #[error("Binding name can't be empty, omit the name to declare a default binding: {binding}")]
    EmptyName { binding: BindingInfo },
    #[error("Can only register an instance in singleton scope, got {scope} scope: {binding}")]
    InstanceInNonSingletonScope { scope: ObjectScope, binding: BindingInfo },
    #[error("Can't use abstract type {plugin} as a plugin type for {service} without an instance: {binding}")]
    AbstractPluginType {
        service: TypeInfo,
        plugin: TypeInfo,
        binding: BindingInfo,
    },
    #[error("Multiple default bindings for service type {service}: {}", join(.conflicts))]
    DuplicateDefaultBinding { service: TypeInfo, conflicts: Vec<BindingInfo> },
    #[error("Multiple bindings named {name:?} for service type {service}: {}", join(.conflicts))]
    DuplicateNamedBinding {
        service: TypeInfo,
        name: String,
        conflicts: Vec<BindingInfo>,
    },
}
