pub mod columns;
pub mod loader;
pub mod reporting;
pub mod suppliers;
pub mod synthetic;
pub mod table;
