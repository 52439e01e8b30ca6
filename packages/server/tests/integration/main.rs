mod catalog;
mod character;
