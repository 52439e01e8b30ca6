pub mod character;
pub mod shared;
