pub mod roles;
pub mod shared;
pub mod squares;
pub mod teams;
pub mod timers;
