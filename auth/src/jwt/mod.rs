pub mod claims;
pub mod errors;
pub mod service;

pub use claims::Claims;
pub use claims::TokenKind;
pub use claims::TokenPair;
pub use errors::JwtError;
pub use service::TokenService;
