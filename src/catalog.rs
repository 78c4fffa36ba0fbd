use std::collections::HashMap;

use crate::model::ItemKind;

/// Immutable lookup tables for enrichment. Built once at startup and
/// injected through `ScrapeOptions`; lookups never fail, a missing
/// combination is reported as zero downstream.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    weights: HashMap<ItemKind, HashMap<String, f64>>,
    donations: HashMap<ItemKind, f64>,
    unit_costs: HashMap<ItemKind, f64>,
}

/// Per-size garment weights in ounces, youth sizes included.
const WEIGHT_TABLE: [(ItemKind, [(&str, f64); 11]); 5] = [
    (
        ItemKind::Tee,
        [
            ("YS", 3.5),
            ("YM", 3.8),
            ("YL", 4.0),
            ("YXL", 4.5),
            ("S", 5.0),
            ("M", 5.9),
            ("L", 6.3),
            ("XL", 7.4),
            ("2XL", 8.2),
            ("3XL", 9.0),
            ("4XL", 9.8),
        ],
    ),
    (
        ItemKind::Sweatshirt,
        [
            ("YS", 7.7),
            ("YM", 8.7),
            ("YL", 9.7),
            ("YXL", 10.7),
            ("S", 11.7),
            ("M", 12.6),
            ("L", 14.1),
            ("XL", 16.3),
            ("2XL", 17.9),
            ("3XL", 19.4),
            ("4XL", 20.9),
        ],
    ),
    (
        ItemKind::Hoodie,
        [
            ("YS", 12.0),
            ("YM", 13.0),
            ("YL", 13.9),
            ("YXL", 14.7),
            ("S", 15.5),
            ("M", 17.0),
            ("L", 19.5),
            ("XL", 21.0),
            ("2XL", 22.5),
            ("3XL", 24.0),
            ("4XL", 25.5),
        ],
    ),
    (
        ItemKind::Sweatpants,
        [
            ("YS", 8.1),
            ("YM", 8.9),
            ("YL", 9.7),
            ("YXL", 10.4),
            ("S", 11.7),
            ("M", 12.6),
            ("L", 14.1),
            ("XL", 16.3),
            ("2XL", 17.9),
            ("3XL", 19.4),
            ("4XL", 20.9),
        ],
    ),
    (
        ItemKind::Shorts,
        [
            ("YS", 3.5),
            ("YM", 3.8),
            ("YL", 4.0),
            ("YXL", 4.5),
            ("S", 5.0),
            ("M", 5.9),
            ("L", 6.3),
            ("XL", 7.4),
            ("2XL", 8.2),
            ("3XL", 9.0),
            ("4XL", 9.8),
        ],
    ),
];

/// Fixed donation per unit sold, by kind.
const DONATION_TABLE: [(ItemKind, f64); 5] = [
    (ItemKind::Tee, 5.8),
    (ItemKind::Sweatshirt, 7.55),
    (ItemKind::Hoodie, 10.5),
    (ItemKind::Sweatpants, 10.5),
    (ItemKind::Shorts, 5.0),
];

/// Production unit cost, by kind.
const UNIT_COST_TABLE: [(ItemKind, f64); 5] = [
    (ItemKind::Tee, 14.2),
    (ItemKind::Sweatshirt, 22.45),
    (ItemKind::Hoodie, 29.5),
    (ItemKind::Sweatpants, 29.5),
    (ItemKind::Shorts, 19.5),
];

impl Default for Catalog {
    fn default() -> Self {
        let weights = WEIGHT_TABLE
            .iter()
            .map(|(kind, sizes)| {
                let by_size = sizes
                    .iter()
                    .map(|(size, weight)| ((*size).to_string(), *weight))
                    .collect::<HashMap<_, _>>();
                (*kind, by_size)
            })
            .collect();
        let donations = DONATION_TABLE.iter().copied().collect();
        let unit_costs = UNIT_COST_TABLE.iter().copied().collect();

        Self {
            weights,
            donations,
            unit_costs,
        }
    }
}

impl Catalog {
    /// Builds a catalog from caller-supplied tables, for deployments whose
    /// garment lineup differs from the defaults.
    #[must_use]
    pub fn new(
        weights: HashMap<ItemKind, HashMap<String, f64>>,
        donations: HashMap<ItemKind, f64>,
        unit_costs: HashMap<ItemKind, f64>,
    ) -> Self {
        Self {
            weights,
            donations,
            unit_costs,
        }
    }

    /// Per-unit weight for a kind/size pair; zero when either is unknown.
    /// Sizes are matched upper-case.
    #[must_use]
    pub fn weight(&self, kind: ItemKind, size: &str) -> f64 {
        self.weights
            .get(&kind)
            .and_then(|by_size| by_size.get(size))
            .copied()
            .unwrap_or(0.0)
    }

    /// Per-unit donation for a kind; zero when unknown.
    #[must_use]
    pub fn donation(&self, kind: ItemKind) -> f64 {
        self.donations.get(&kind).copied().unwrap_or(0.0)
    }

    /// Production cost per unit; `None` for kinds outside the catalog.
    #[must_use]
    pub fn unit_cost(&self, kind: ItemKind) -> Option<f64> {
        self.unit_costs.get(&kind).copied()
    }
}
