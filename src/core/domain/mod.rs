//! Domain types.

mod document;
mod secret;
mod value;

pub use document::{ConfigDocument, Defaults, EnvironmentConfig};
pub use secret::{Delivery, KeyDelivery, KeyTarget, SecretDeclaration, Target};
pub use value::{render_field, SecretValue};
