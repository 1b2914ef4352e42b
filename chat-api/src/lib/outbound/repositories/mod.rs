pub mod friend;
pub mod profile;
pub mod status;
pub mod user;

pub use friend::PostgresFriendRepository;
pub use profile::PostgresProfileRepository;
pub use status::PostgresStatusRepository;
pub use user::PostgresUserRepository;
