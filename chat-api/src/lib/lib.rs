pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

pub use domain::friend;
pub use domain::profile;
pub use domain::status;
pub use domain::user;
pub use outbound::repositories;

#[cfg(test)]
pub(crate) mod testing;
