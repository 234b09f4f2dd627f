pub mod macros;
pub mod role;
pub mod square;
pub mod team;
pub mod timer;
pub mod user;

// Re-export all models for easy importing
pub use role::*;
pub use square::*;
pub use team::*;
pub use timer::*;
pub use user::*;
