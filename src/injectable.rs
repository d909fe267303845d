use core::fmt::{self, Debug, Formatter};
use std::sync::Arc;

use crate::{any::TypeInfo, constructor::Constructor};

/// Metadata the container needs to build a type.
///
/// Concrete types override [`Injectable::constructor`] and return the constructor the container
/// calls to build them. Types that keep the default have no constructor and are abstract:
/// they can only be resolved through a binding.
///
/// # Examples
/// ```rust
/// use ioclite::{Constructor, Injectable};
/// use std::sync::Arc;
///
/// trait Clock: Send + Sync {}
///
/// // Abstract, resolvable only via a binding
/// impl Injectable for dyn Clock {}
///
/// struct Config;
///
/// impl Injectable for Config {
///     fn constructor() -> Option<Constructor> {
///         Some(Constructor::new(|()| Ok(Config)))
///     }
/// }
///
/// struct Service(Arc<Config>);
///
/// impl Injectable for Service {
///     fn constructor() -> Option<Constructor> {
///         Some(Constructor::new(|(config,): (Arc<Config>,)| Ok(Service(config))))
///     }
/// }
/// ```
pub trait Injectable: Send + Sync + 'static {
    #[inline]
    #[must_use]
    fn constructor() -> Option<Constructor> {
        None
    }
}

/// Conversion from a plugin type to a service type it can stand in for.
///
/// Every type implements it for itself. Use [`crate::implements!`] to declare trait object services.
pub trait Implements<Service: ?Sized>: Send + Sync + 'static {
    fn upcast(this: Arc<Self>) -> Arc<Service>;
}

impl<T> Implements<T> for T
where
    T: ?Sized + Send + Sync + 'static,
{
    #[inline]
    fn upcast(this: Arc<Self>) -> Arc<T> {
        this
    }
}

/// Runtime handle of a type: its info and a way to look up its constructor
#[derive(Clone, Copy)]
pub struct TypeDescriptor {
    info: TypeInfo,
    constructor: fn() -> Option<Constructor>,
}

impl TypeDescriptor {
    #[inline]
    #[must_use]
    pub fn of<T>() -> Self
    where
        T: Injectable + ?Sized,
    {
        Self {
            info: TypeInfo::of::<T>(),
            constructor: T::constructor,
        }
    }

    /// Descriptor of a type the container never constructs itself, used for pre-built instances
    #[inline]
    #[must_use]
    pub(crate) fn opaque<T>() -> Self
    where
        T: ?Sized + 'static,
    {
        fn no_constructor() -> Option<Constructor> {
            None
        }

        Self {
            info: TypeInfo::of::<T>(),
            constructor: no_constructor,
        }
    }

    #[inline]
    #[must_use]
    pub const fn info(&self) -> TypeInfo {
        self.info
    }

    #[inline]
    #[must_use]
    pub fn constructor(&self) -> Option<Constructor> {
        (self.constructor)()
    }

    #[inline]
    #[must_use]
    pub fn is_abstract(&self) -> bool {
        self.constructor().is_none()
    }
}

impl Debug for TypeDescriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor").field("type", &self.info.name).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::{Implements, Injectable, TypeDescriptor};
    use crate::{any::TypeInfo, constructor::Constructor};

    use std::sync::Arc;

    trait Shape: Send + Sync {
        fn sides(&self) -> u8;
    }

    impl Injectable for dyn Shape {}

    struct Square;

    impl Shape for Square {
        fn sides(&self) -> u8 {
            4
        }
    }

    impl Injectable for Square {
        fn constructor() -> Option<Constructor> {
            Some(Constructor::new(|()| Ok(Square)))
        }
    }

    implements!(Square => dyn Shape);

    #[test]
    fn test_abstract_by_default() {
        assert!(TypeDescriptor::of::<dyn Shape>().is_abstract());
        assert!(!TypeDescriptor::of::<Square>().is_abstract());
        assert!(TypeDescriptor::opaque::<Square>().is_abstract());
    }

    #[test]
    fn test_descriptor_info() {
        assert_eq!(TypeDescriptor::of::<Square>().info(), TypeInfo::of::<Square>());
    }

    #[test]
    fn test_upcast() {
        let square = Arc::new(Square);
        let shape = <Square as Implements<dyn Shape>>::upcast(square.clone());
        let same = <Square as Implements<Square>>::upcast(square.clone());

        assert_eq!(shape.sides(), 4);
        assert!(Arc::ptr_eq(&square, &same));
    }
}
