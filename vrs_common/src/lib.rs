mod helpers;
mod minor_units;
mod secret;

pub use helpers::{env_flag, parse_boolean_flag};
pub use minor_units::{MinorUnits, DEFAULT_CURRENCY_CODE};
pub use secret::Secret;
