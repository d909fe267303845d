#[rustfmt::skip]
macro_rules! all_the_tuples {
    ($name:ident) => {
        $name!([]);
        $name!([T1]);
        $name!([T1, T2]);
        $name!([T1, T2, T3]);
        $name!([T1, T2, T3, T4]);
        $name!([T1, T2, T3, T4, T5]);
        $name!([T1, T2, T3, T4, T5, T6]);
        $name!([T1, T2, T3, T4, T5, T6, T7]);
        $name!([T1, T2, T3, T4, T5, T6, T7, T8]);
        $name!([T1, T2, T3, T4, T5, T6, T7, T8, T9]);
        $name!([T1, T2, T3, T4, T5, T6, T7, T8, T9, T10]);
        $name!([T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11]);
        $name!([T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11, T12]);
    };
}

/// Declares that a plugin type can stand in for one or more service types.
///
/// # Syntax
/// ```text
/// implements!(Plugin => dyn Service [, dyn OtherService ...])
/// ```
///
/// # Examples
/// ```rust
/// use ioclite::{implements, Implements};
/// use std::sync::Arc;
///
/// trait UserRepo: Send + Sync {}
///
/// struct PostgresUserRepo;
///
/// impl UserRepo for PostgresUserRepo {}
///
/// implements!(PostgresUserRepo => dyn UserRepo);
///
/// let repo: Arc<dyn UserRepo> = <PostgresUserRepo as Implements<dyn UserRepo>>::upcast(Arc::new(PostgresUserRepo));
/// ```
#[macro_export]
macro_rules! implements {
    ($plugin:ty => $($service:ty),+ $(,)?) => {
        $(
            impl $crate::Implements<$service> for $plugin {
                #[inline]
                fn upcast(this: ::std::sync::Arc<Self>) -> ::std::sync::Arc<$service> {
                    this
                }
            }
        )+
    };
}
