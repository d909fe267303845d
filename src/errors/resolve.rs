use super::instantiate::InstantiateErrorKind;
use crate::any::TypeInfo;

#[derive(thiserror::Error, Debug)]
pub enum ResolveErrorKind {
    #[error("Can't resolve abstract service type {service} with no binding")]
    NoBinding { service: TypeInfo },
    #[error("Can't create an instance of abstract type {type_info}")]
    AbstractType { type_info: TypeInfo },
    #[error("Unknown named service {service} with name {name:?}")]
    UnknownName { service: TypeInfo, name: String },
    #[error("Found {count} bindings named {name:?} for service type {service}, expected one")]
    AmbiguousName { service: TypeInfo, name: String, count: usize },
    #[error("Found {count} default bindings for service type {service}, expected one")]
    AmbiguousDefault { service: TypeInfo, count: usize },
    #[error("Service type {service} has only named bindings ({names:?}), resolve it by name")]
    NoDefault { service: TypeInfo, names: Vec<String> },
    #[error("Service name can't be empty")]
    EmptyName,
    #[error("No request context for request-local service type {service}")]
    NoRequestContext { service: TypeInfo },
    #[error("No argument left for constructor parameter of type {expected}")]
    MissingArgument { expected: TypeInfo },
    #[error("Incorrect type. Actual: {actual}, expected: {expected}")]
    IncorrectType { expected: TypeInfo, actual: TypeInfo },
    #[error(transparent)]
    Instantiate(#[from] InstantiateErrorKind),
}
