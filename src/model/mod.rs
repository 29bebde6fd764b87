pub mod classes;
pub mod profile;
pub mod records;

pub use classes::{AbcClass, Supplier, XyzClass};
pub use profile::{ReorderAlert, SkuProfile};
pub use records::{ConsumptionRecord, PriceEntry};
