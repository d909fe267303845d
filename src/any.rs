use core::{
    any::{type_name, Any, TypeId},
    cmp::Ordering,
    fmt::{self, Debug, Display, Formatter},
    hash::{Hash, Hasher},
};
use std::sync::Arc;

#[derive(Debug, Clone, Copy)]
pub struct TypeInfo {
    pub name: &'static str,
    pub id: TypeId,
}

impl PartialEq for TypeInfo {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeInfo {}

impl PartialOrd for TypeInfo {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TypeInfo {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl Hash for TypeInfo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Display for TypeInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl TypeInfo {
    #[inline]
    #[must_use]
    pub fn of<T>() -> Self
    where
        T: ?Sized + 'static,
    {
        Self {
            name: type_name::<T>(),
            id: TypeId::of::<T>(),
        }
    }
}

/// Type-erased shared instance.
///
/// Holds an `Arc<T>` where `T` may be unsized (`dyn Trait`), so a service resolved
/// through a trait object binding and a concrete plugin share the same representation.
/// Clones share the underlying allocation.
#[derive(Clone)]
pub struct Object {
    type_info: TypeInfo,
    value: Arc<dyn Any + Send + Sync>,
}

impl Object {
    #[inline]
    #[must_use]
    pub fn new<T>(value: Arc<T>) -> Self
    where
        T: ?Sized + Send + Sync + 'static,
    {
        Self {
            type_info: TypeInfo::of::<T>(),
            value: Arc::new(value),
        }
    }

    /// Info of the type this object was created with
    #[inline]
    #[must_use]
    pub const fn type_info(&self) -> TypeInfo {
        self.type_info
    }

    #[inline]
    #[must_use]
    pub fn downcast<T>(&self) -> Option<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.value.downcast_ref::<Arc<T>>().cloned()
    }

    /// Returns `true` if both objects point to the same allocation
    #[inline]
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.value, &other.value)
    }
}

impl Debug for Object {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Object").field("type", &self.type_info.name).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::{Object, TypeInfo};

    use std::sync::Arc;

    trait Greeter: Send + Sync {
        fn greet(&self) -> &'static str;
    }

    struct English;

    impl Greeter for English {
        fn greet(&self) -> &'static str {
            "hello"
        }
    }

    #[test]
    fn test_type_info_eq_by_id() {
        assert_eq!(TypeInfo::of::<English>(), TypeInfo::of::<English>());
        assert_ne!(TypeInfo::of::<English>(), TypeInfo::of::<dyn Greeter>());
        assert!(TypeInfo::of::<dyn Greeter>().name.contains("Greeter"));
    }

    #[test]
    fn test_object_downcast_unsized() {
        let greeter: Arc<dyn Greeter> = Arc::new(English);
        let object = Object::new(greeter);

        assert_eq!(object.type_info(), TypeInfo::of::<dyn Greeter>());
        assert_eq!(object.downcast::<dyn Greeter>().unwrap().greet(), "hello");
        assert!(object.downcast::<English>().is_none());
    }

    #[test]
    fn test_object_ptr_eq() {
        let object = Object::new(Arc::new(English));
        let clone = object.clone();
        let other = Object::new(Arc::new(English));

        assert!(object.ptr_eq(&clone));
        assert!(!object.ptr_eq(&other));
    }
}
