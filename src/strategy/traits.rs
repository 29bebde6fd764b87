// src/strategy/traits.rs

use crate::model::Supplier;
use std::fmt::Debug;

/// What a supplier rule is allowed to look at for one SKU.
#[derive(Debug, Clone, Copy)]
pub struct SkuContext<'a> {
    pub item_code: &'a str,
    pub item_name: &'a str,
}

/// One entry of the supplier precedence list.
///
/// Rules are evaluated top-down and the first one that matches decides the
/// supplier, so a rule's position in the list is its priority.
pub trait SupplierRule: Debug + Send + Sync {
    /// Supplier assigned when this rule matches.
    fn supplier(&self) -> Supplier;

    fn matches(&self, sku: &SkuContext<'_>) -> bool;
}
