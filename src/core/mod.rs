pub mod format;
pub mod money;
pub mod product;
