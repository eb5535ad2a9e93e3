pub mod compare;
pub mod radar;
