pub mod convert;
pub mod function;
pub mod health;
