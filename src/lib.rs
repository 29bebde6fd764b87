//! ABC-XYZ classification and replenishment policy for SKUs.
//!
//! Consumption history and prices go in; per-SKU value/variability classes,
//! safety stock, reorder point, EOQ and min/max levels come out. There is no
//! on-hand feed, so stock is assumed to be zero.

pub mod classification;
pub mod error;
pub mod io;
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod strategy;

pub use error::{ConfigError, PipelineError, PipelineResult};
pub use model::{
    AbcClass, ConsumptionRecord, PriceEntry, ReorderAlert, SkuProfile, Supplier, XyzClass,
};
pub use pipeline::{PolicyConfig, PolicyPipeline, PolicyRun};
pub use strategy::implementations::SupplierResolver;
