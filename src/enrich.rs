use crate::catalog::Catalog;
use crate::model::{Enrichment, ItemKind};

/// Platform fee is 10% of the production cost, at currency precision.
const PLATFORM_FEE_RATE: f64 = 0.1;

fn round_currency(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Derives weight, donation, and platform-fee figures for one line item.
/// Pure over the catalog tables: unknown kind/size combinations come back
/// as zeros, never as an error. The size is matched upper-case.
#[must_use]
pub fn enrich(
    catalog: &Catalog,
    kind: ItemKind,
    size: Option<&str>,
    quantity: u32,
    unit_cost: Option<f64>,
) -> Enrichment {
    let quantity = f64::from(quantity);
    let unit_weight = size.map_or(0.0, |size| catalog.weight(kind, &size.to_uppercase()));
    let donation_each = catalog.donation(kind);
    let platform_fee =
        unit_cost.map_or(0.0, |cost| round_currency(PLATFORM_FEE_RATE * cost * quantity));

    Enrichment {
        unit_weight,
        total_weight: unit_weight * quantity,
        donation_each,
        donation_total: donation_each * quantity,
        platform_fee,
    }
}

#[cfg(test)]
mod tests {
    use super::enrich;
    use crate::catalog::Catalog;
    use crate::model::ItemKind;

    #[test]
    fn enriches_hoodie_line() {
        let catalog = Catalog::default();
        let enriched = enrich(&catalog, ItemKind::Hoodie, Some("L"), 3, Some(29.5));
        assert_eq!(enriched.unit_weight, 19.5);
        assert_eq!(enriched.total_weight, 58.5);
        assert_eq!(enriched.donation_each, 10.5);
        assert_eq!(enriched.donation_total, 31.5);
        assert_eq!(enriched.platform_fee, 8.85);
    }

    #[test]
    fn lower_case_size_is_matched() {
        let catalog = Catalog::default();
        let enriched = enrich(&catalog, ItemKind::Tee, Some("m"), 1, Some(14.2));
        assert_eq!(enriched.unit_weight, 5.9);
    }

    #[test]
    fn unknown_kind_yields_zeros() {
        let catalog = Catalog::default();
        let enriched = enrich(&catalog, ItemKind::Other, Some("L"), 2, None);
        assert_eq!(enriched.unit_weight, 0.0);
        assert_eq!(enriched.total_weight, 0.0);
        assert_eq!(enriched.donation_total, 0.0);
        assert_eq!(enriched.platform_fee, 0.0);
    }

    #[test]
    fn missing_size_yields_zero_weight_but_keeps_donation() {
        let catalog = Catalog::default();
        let enriched = enrich(&catalog, ItemKind::Shorts, None, 2, Some(19.5));
        assert_eq!(enriched.unit_weight, 0.0);
        assert_eq!(enriched.donation_total, 10.0);
        assert_eq!(enriched.platform_fee, 3.9);
    }

    #[test]
    fn fee_rounds_to_currency_precision() {
        let catalog = Catalog::default();
        let enriched = enrich(&catalog, ItemKind::Sweatshirt, Some("S"), 3, Some(22.45));
        assert_eq!(enriched.platform_fee, 6.74);
    }
}
