pub mod codes;
pub mod selector;
