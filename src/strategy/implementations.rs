// src/strategy/implementations.rs

use crate::model::Supplier;
use crate::pipeline::config::PolicyConfig;
use crate::strategy::traits::{SkuContext, SupplierRule};
use std::collections::HashSet;

/// True when `word` appears in `text` as a whole word, ignoring case.
///
/// Word characters are alphanumerics and `_`, so "HELICAL" and "HELI_X"
/// don't contain "heli" but "HELI PUMP" and "pump (heli)" do.
pub fn contains_word(text: &str, word: &str) -> bool {
    if word.is_empty() {
        return false;
    }
    let word = word.to_lowercase();
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .any(|token| token.to_lowercase() == word)
}

// =========================================================================
// 1. Reference List Rule
// =========================================================================

/// Matches SKUs whose code is in a supplier's reference list.
#[derive(Debug, Clone)]
pub struct ReferenceListRule {
    supplier: Supplier,
    codes: HashSet<String>,
}

impl ReferenceListRule {
    pub fn new(supplier: Supplier, codes: HashSet<String>) -> Self {
        Self { supplier, codes }
    }
}

impl SupplierRule for ReferenceListRule {
    fn supplier(&self) -> Supplier {
        self.supplier
    }

    fn matches(&self, sku: &SkuContext<'_>) -> bool {
        self.codes.contains(sku.item_code)
    }
}

// =========================================================================
// 2. Name Word Rule
// =========================================================================

/// Matches SKUs whose name carries a brand word, e.g. "heli".
#[derive(Debug, Clone)]
pub struct NameWordRule {
    supplier: Supplier,
    word: String,
}

impl NameWordRule {
    pub fn new(supplier: Supplier, word: impl Into<String>) -> Self {
        Self {
            supplier,
            word: word.into(),
        }
    }
}

impl SupplierRule for NameWordRule {
    fn supplier(&self) -> Supplier {
        self.supplier
    }

    fn matches(&self, sku: &SkuContext<'_>) -> bool {
        contains_word(sku.item_name, &self.word)
    }
}

// =========================================================================
// 3. Resolver
// =========================================================================

/// Ordered rule list with a fallback supplier.
#[derive(Debug)]
pub struct SupplierResolver {
    rules: Vec<Box<dyn SupplierRule>>,
    fallback: Supplier,
}

impl SupplierResolver {
    pub fn new(rules: Vec<Box<dyn SupplierRule>>, fallback: Supplier) -> Self {
        Self { rules, fallback }
    }

    /// HELI (list or name) > TVH (list) > NACIONAL.
    pub fn standard(heli_codes: HashSet<String>, tvh_codes: HashSet<String>) -> Self {
        let rules: Vec<Box<dyn SupplierRule>> = vec![
            Box::new(ReferenceListRule::new(Supplier::Heli, heli_codes)),
            Box::new(NameWordRule::new(Supplier::Heli, "heli")),
            Box::new(ReferenceListRule::new(Supplier::Tvh, tvh_codes)),
        ];
        Self::new(rules, Supplier::Nacional)
    }

    pub fn resolve(&self, sku: &SkuContext<'_>) -> Supplier {
        self.rules
            .iter()
            .find(|rule| rule.matches(sku))
            .map(|rule| rule.supplier())
            .unwrap_or(self.fallback)
    }
}

/// Lead time in days: site override, then the supplier default, then the
/// global default.
pub fn resolve_lead_time(config: &PolicyConfig, supplier: Supplier) -> u32 {
    config
        .lead_time_by_supplier
        .get(supplier.as_str())
        .or_else(|| config.lead_time_defaults.get(&supplier))
        .copied()
        .unwrap_or(config.lead_time_default)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(codes: &[&str]) -> HashSet<String> {
        codes.iter().map(|c| c.to_string()).collect()
    }

    fn sku<'a>(code: &'a str, name: &'a str) -> SkuContext<'a> {
        SkuContext {
            item_code: code,
            item_name: name,
        }
    }

    #[test]
    fn whole_word_match_only() {
        assert!(contains_word("HELI PUMP", "heli"));
        assert!(contains_word("filtro aceite heli", "heli"));
        assert!(contains_word("pump (Heli)", "heli"));
        assert!(contains_word("HELI-PUMP", "heli"));
        assert!(!contains_word("HELICAL GEAR", "heli"));
        assert!(!contains_word("HELI_PUMP", "heli"));
        assert!(!contains_word("", "heli"));
    }

    #[test]
    fn default_is_nacional() {
        let resolver = SupplierResolver::standard(HashSet::new(), HashSet::new());
        assert_eq!(resolver.resolve(&sku("P-1", "BOLT M8")), Supplier::Nacional);
    }

    #[test]
    fn tvh_list_overrides_default() {
        let resolver = SupplierResolver::standard(HashSet::new(), set(&["P-1"]));
        assert_eq!(resolver.resolve(&sku("P-1", "BOLT M8")), Supplier::Tvh);
    }

    #[test]
    fn heli_beats_tvh() {
        let resolver = SupplierResolver::standard(set(&["P-1"]), set(&["P-1", "P-2"]));
        assert_eq!(resolver.resolve(&sku("P-1", "BOLT")), Supplier::Heli);
        // name match wins over a TVH listing too
        assert_eq!(resolver.resolve(&sku("P-2", "HELI PUMP")), Supplier::Heli);
    }

    #[test]
    fn helical_name_is_not_heli() {
        let resolver = SupplierResolver::standard(HashSet::new(), HashSet::new());
        assert_eq!(resolver.resolve(&sku("G-1", "HELICAL GEAR")), Supplier::Nacional);
        assert_eq!(resolver.resolve(&sku("G-2", "HELI PUMP")), Supplier::Heli);
    }

    #[test]
    fn lead_time_uses_defaults() {
        let cfg = PolicyConfig::default();
        assert_eq!(resolve_lead_time(&cfg, Supplier::Heli), 90);
        assert_eq!(resolve_lead_time(&cfg, Supplier::Tvh), 45);
        assert_eq!(resolve_lead_time(&cfg, Supplier::Nacional), 3);
    }

    #[test]
    fn lead_time_override_then_default_then_global() {
        let mut cfg = PolicyConfig::default();
        cfg.lead_time_by_supplier.insert("TVH".into(), 60);
        cfg.lead_time_defaults.remove(&Supplier::Nacional);

        assert_eq!(resolve_lead_time(&cfg, Supplier::Tvh), 60);
        assert_eq!(resolve_lead_time(&cfg, Supplier::Heli), 90);
        assert_eq!(resolve_lead_time(&cfg, Supplier::Nacional), 15);
    }
}
