pub mod friend;
pub mod profile;
pub mod status;
pub mod user;
