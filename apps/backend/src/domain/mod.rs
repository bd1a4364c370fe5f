//! Domain layer: the user entity and the repository it is stored through.

pub mod user;
