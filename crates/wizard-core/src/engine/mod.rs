//! Motor del wizard: el hub que posee el estado canónico y cablea filtro,
//! validación y persistencia en cada transición.

mod builder;
mod core;

pub use builder::WizardBuilder;
pub use self::core::WizardEngine;
