/// Config for a container
/// ## Fields
/// - `request_fallback`:
///   What a request-local binding does when it's resolved outside of a request.
///
///   Defaults to [`RequestFallback::Shared`]: the object is kept in a slot shared by the whole container,
///   so outside of a request the binding behaves like a singleton.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Config {
    pub request_fallback: RequestFallback,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RequestFallback {
    #[default]
    Shared,
    /// Fail with [`crate::ResolveErrorKind::NoRequestContext`]
    Fail,
}
