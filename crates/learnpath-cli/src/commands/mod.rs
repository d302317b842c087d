mod check;
mod generate;
mod introspect;

pub use check::{CheckArgs, run_check};
pub use generate::{GenerateArgs, run_generate};
pub use introspect::{IntrospectArgs, run_introspect};
