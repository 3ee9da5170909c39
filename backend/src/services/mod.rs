//! Business logic services
//!
//! Services encapsulate business logic and coordinate between
//! the stores and the auth core.

pub mod truck;
pub mod user;

pub use truck::TruckService;
pub use user::UserService;
