pub mod catalog;
pub mod character;
pub mod debug;
