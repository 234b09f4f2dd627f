pub mod square;
pub mod user_context;

pub use square::SquareService;
pub use user_context::UserContext;
