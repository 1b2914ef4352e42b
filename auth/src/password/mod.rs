pub mod errors;
pub mod scrypt;

pub use errors::PasswordError;
pub use scrypt::HashingParameters;
pub use scrypt::PasswordHasher;
