use core::fmt::{self, Display, Formatter};

/// Lifecycle policy of a binding
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum ObjectScope {
    /// New instance on every resolve
    #[default]
    Transient,
    /// One instance per container
    Singleton,
    /// One instance per calling thread
    ThreadLocal,
    /// One instance per ambient request context
    RequestLocal,
}

impl ObjectScope {
    #[inline]
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            ObjectScope::Transient => "transient",
            ObjectScope::Singleton => "singleton",
            ObjectScope::ThreadLocal => "thread",
            ObjectScope::RequestLocal => "request",
        }
    }

    /// Builder call that declares this scope, used in diagnostics
    #[inline]
    #[must_use]
    pub(crate) const fn declaration(&self) -> &'static str {
        match self {
            ObjectScope::Transient => "in_transient_scope()",
            ObjectScope::Singleton => "in_singleton_scope()",
            ObjectScope::ThreadLocal => "in_thread_scope()",
            ObjectScope::RequestLocal => "in_request_scope()",
        }
    }
}

impl Display for ObjectScope {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
