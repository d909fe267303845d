mod instantiate;
mod register;
mod resolve;

pub use instantiate::InstantiateErrorKind;
pub use register::{BindingInfo, RegisterErrorKind};
pub use resolve::ResolveErrorKind;
