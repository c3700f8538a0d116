pub mod places;
pub mod session;
