use std::sync::Arc;
use tracing::error;

use crate::{any::TypeInfo, binding::BindingRegistration, errors::ResolveErrorKind};

/// Picks the registration that satisfies a resolve request
#[derive(Default, Clone, Copy)]
pub(crate) struct BindingResolver;

impl BindingResolver {
    /// Returns all registrations bound to the service type
    #[must_use]
    pub(crate) fn resolve_bindings(&self, service: &TypeInfo, registrations: &[Arc<BindingRegistration>]) -> Vec<Arc<BindingRegistration>> {
        registrations
            .iter()
            .filter(|registration| registration.binding.service == *service)
            .cloned()
            .collect()
    }

    /// Selects the registration by name, or the default one if the name isn't specified.
    /// Without a name, a sole registration is selected even if it's named.
    /// `candidates` are expected to be bound to the service type and non-empty.
    pub(crate) fn select(
        &self,
        service: TypeInfo,
        name: Option<&str>,
        mut candidates: Vec<Arc<BindingRegistration>>,
    ) -> Result<Arc<BindingRegistration>, ResolveErrorKind> {
        if name.is_none() && candidates.len() == 1 {
            return Ok(candidates.swap_remove(0));
        }

        let (mut matched, rest): (Vec<_>, Vec<_>) = candidates
            .into_iter()
            .partition(|registration| registration.binding.name() == name);

        let err = match (matched.len(), name) {
            (1, _) => return Ok(matched.swap_remove(0)),
            (0, Some(name)) => ResolveErrorKind::UnknownName {
                service,
                name: name.into(),
            },
            (0, None) => ResolveErrorKind::NoDefault {
                service,
                names: rest
                    .iter()
                    .filter_map(|registration| registration.binding.name().map(Into::into))
                    .collect(),
            },
            (count, Some(name)) => ResolveErrorKind::AmbiguousName {
                service,
                name: name.into(),
                count,
            },
            (count, None) => ResolveErrorKind::AmbiguousDefault { service, count },
        };
        error!("{}", err);
        Err(err)
    }
}
