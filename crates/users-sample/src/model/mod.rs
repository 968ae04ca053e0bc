//! User domain: the entity, its props and validation rules.

pub mod user;
pub mod validator;

pub use user::*;
pub use self::validator::*;
