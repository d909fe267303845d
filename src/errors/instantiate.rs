/// Error returned by a constructor.
///
/// Any [`anyhow::Error`] converts into it, so constructors can use `?` on their own fallible calls.
#[derive(thiserror::Error, Debug)]
pub enum InstantiateErrorKind {
    #[error(transparent)]
    Custom(#[from] anyhow::Error),
}
