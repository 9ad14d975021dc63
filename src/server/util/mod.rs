pub mod date;
pub mod password;
pub mod token;
pub mod validate;
