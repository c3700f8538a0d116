pub mod dto;
pub mod point;
pub mod place;
