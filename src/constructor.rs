use core::fmt::{self, Debug, Formatter};
use std::{sync::Arc, vec};

use crate::{
    any::{Object, TypeInfo},
    errors::{InstantiateErrorKind, ResolveErrorKind},
    injectable::{Injectable, TypeDescriptor},
};

type Invoke = dyn Fn(Arguments) -> Result<Object, ResolveErrorKind> + Send + Sync;

/// The constructor the container uses to build a concrete type.
///
/// Its parameter list is positional: the container resolves each parameter type in order
/// and passes the instances to the constructor function.
#[derive(Clone)]
pub struct Constructor {
    parameters: Vec<TypeDescriptor>,
    invoke: Arc<Invoke>,
}

impl Constructor {
    #[must_use]
    pub fn new<T, Params, F>(f: F) -> Self
    where
        T: Send + Sync + 'static,
        Params: Parameters,
        F: Fn(Params) -> Result<T, InstantiateErrorKind> + Send + Sync + 'static,
    {
        Self {
            parameters: Params::descriptors(),
            invoke: Arc::new(move |arguments| {
                let parameters = Params::from_arguments(arguments)?;
                let value = f(parameters)?;
                Ok(Object::new(Arc::new(value)))
            }),
        }
    }

    /// Zero-argument constructor that uses [`Default`]
    #[inline]
    #[must_use]
    pub fn from_default<T>() -> Self
    where
        T: Default + Send + Sync + 'static,
    {
        Self::new(|()| Ok(T::default()))
    }

    #[inline]
    #[must_use]
    pub fn parameters(&self) -> &[TypeDescriptor] {
        &self.parameters
    }

    #[inline]
    #[must_use]
    pub fn is_parameterless(&self) -> bool {
        self.parameters.is_empty()
    }

    #[inline]
    pub(crate) fn invoke(&self, arguments: Arguments) -> Result<Object, ResolveErrorKind> {
        (self.invoke)(arguments)
    }
}

impl Debug for Constructor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constructor").field("parameters", &self.parameters).finish_non_exhaustive()
    }
}

/// Resolved constructor arguments, consumed in declaration order
pub struct Arguments {
    values: vec::IntoIter<Object>,
}

impl Arguments {
    #[inline]
    #[must_use]
    pub(crate) fn new(values: Vec<Object>) -> Self {
        Self { values: values.into_iter() }
    }

    /// Takes the next argument
    ///
    /// # Errors
    /// - Returns [`ResolveErrorKind::MissingArgument`] if all arguments are taken
    /// - Returns [`ResolveErrorKind::IncorrectType`] if the next argument has another type
    pub fn take<T>(&mut self) -> Result<Arc<T>, ResolveErrorKind>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let expected = TypeInfo::of::<T>();
        let object = self.values.next().ok_or(ResolveErrorKind::MissingArgument { expected })?;
        object.downcast::<T>().ok_or(ResolveErrorKind::IncorrectType {
            expected,
            actual: object.type_info(),
        })
    }
}

/// Parameter list of a constructor: a tuple of `Arc<T>` where every `T` is [`Injectable`]
pub trait Parameters: Sized + 'static {
    #[must_use]
    fn descriptors() -> Vec<TypeDescriptor>;

    /// # Errors
    /// Returns an error if the arguments don't match the parameter list
    fn from_arguments(arguments: Arguments) -> Result<Self, ResolveErrorKind>;
}

macro_rules! impl_parameters {
    (
        [$($ty:ident),*]
    ) => {
        #[allow(non_snake_case, unused_mut, unused_variables)]
        impl<$($ty,)*> Parameters for ($(Arc<$ty>,)*)
        where
            $( $ty: Injectable + ?Sized, )*
        {
            #[inline]
            fn descriptors() -> Vec<TypeDescriptor> {
                vec![$(TypeDescriptor::of::<$ty>(),)*]
            }

            #[inline]
            fn from_arguments(mut arguments: Arguments) -> Result<Self, ResolveErrorKind> {
                Ok(($(arguments.take::<$ty>()?,)*))
            }
        }
    };
}

all_the_tuples!(impl_parameters);

#[cfg(test)]
mod tests {
    use super::{Arguments, Constructor, Parameters};
    use crate::{
        any::{Object, TypeInfo},
        errors::{InstantiateErrorKind, ResolveErrorKind},
        injectable::Injectable,
    };

    use std::sync::{
        atomic::{AtomicU8, Ordering},
        Arc,
    };

    #[derive(Default)]
    struct Engine;

    impl Injectable for Engine {
        fn constructor() -> Option<Constructor> {
            Some(Constructor::from_default::<Self>())
        }
    }

    struct Wheel(u8);

    impl Injectable for Wheel {}

    struct Car(Arc<Engine>, Arc<Wheel>);

    #[test]
    fn test_parameters_descriptors() {
        let descriptors = <(Arc<Engine>, Arc<Wheel>)>::descriptors();

        assert_eq!(descriptors.len(), 2);
        assert_eq!(descriptors[0].info(), TypeInfo::of::<Engine>());
        assert_eq!(descriptors[1].info(), TypeInfo::of::<Wheel>());
        assert!(<()>::descriptors().is_empty());
    }

    #[test]
    fn test_invoke_positional() {
        let constructor = Constructor::new(|(engine, wheel): (Arc<Engine>, Arc<Wheel>)| Ok(Car(engine, wheel)));
        assert!(!constructor.is_parameterless());

        let object = constructor
            .invoke(Arguments::new(vec![Object::new(Arc::new(Engine)), Object::new(Arc::new(Wheel(4)))]))
            .unwrap();
        let car = object.downcast::<Car>().unwrap();

        assert_eq!(car.1 .0, 4);
    }

    #[test]
    fn test_invoke_incorrect_type() {
        let constructor = Constructor::new(|(engine, wheel): (Arc<Engine>, Arc<Wheel>)| Ok(Car(engine, wheel)));

        let result = constructor.invoke(Arguments::new(vec![Object::new(Arc::new(Wheel(4))), Object::new(Arc::new(Engine))]));

        assert!(matches!(
            result,
            Err(ResolveErrorKind::IncorrectType { expected, actual })
                if expected == TypeInfo::of::<Engine>() && actual == TypeInfo::of::<Wheel>()
        ));
    }

    #[test]
    fn test_invoke_missing_argument() {
        let constructor = Constructor::new(|(engine,): (Arc<Engine>,)| Ok(Car(engine, Arc::new(Wheel(0)))));

        let result = constructor.invoke(Arguments::new(Vec::new()));

        assert!(matches!(result, Err(ResolveErrorKind::MissingArgument { .. })));
    }

    #[test]
    fn test_invoke_propagates_constructor_error() {
        let call_count = Arc::new(AtomicU8::new(0));
        let constructor = Constructor::new({
            let call_count = call_count.clone();
            move |()| {
                call_count.fetch_add(1, Ordering::SeqCst);
                Err::<Engine, _>(InstantiateErrorKind::Custom(anyhow::anyhow!("engine stalled")))
            }
        });

        let err = constructor.invoke(Arguments::new(Vec::new())).unwrap_err();

        assert!(matches!(err, ResolveErrorKind::Instantiate(_)));
        assert_eq!(err.to_string(), "engine stalled");
        assert_eq!(call_count.load(Ordering::SeqCst), 1);
    }
}
