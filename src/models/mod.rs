pub mod claims;
pub mod user;

pub use claims::ClaimSet;
pub use user::UserProfile;
