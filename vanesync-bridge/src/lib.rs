pub mod configs;
pub mod cover;
pub mod errors;
pub mod profiles;
pub mod transport;
