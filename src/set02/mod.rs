pub mod c09;
pub mod c10;
pub mod c11;
pub mod c12;
