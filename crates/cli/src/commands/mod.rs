pub mod evaluate;
pub mod validate;
