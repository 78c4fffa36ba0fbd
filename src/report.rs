use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::catalog::Catalog;
use crate::enrich::enrich;
use crate::model::{BuyerInfo, OrderRecord, Sheet};

/// Production sort order for sizes, youth before adult; unknown sizes sort
/// after everything known.
pub(crate) const SIZE_ORDER: [&str; 13] = [
    "YS", "YM", "YL", "YXL", "XS", "S", "M", "L", "XL", "2XL", "3XL", "4XL", "5XL",
];

pub(crate) fn size_rank(size: &str) -> usize {
    SIZE_ORDER
        .iter()
        .position(|known| *known == size)
        .unwrap_or(SIZE_ORDER.len())
}

static COLOR_WORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(Black|Green|Grey|Brown|White|Whtie|Back|Tan|Red|Blue|Orange|Yellow)")
        .expect("hardcoded color regex is valid")
});

/// Reduces a free-text color to its first known color word and repairs the
/// misspellings seen in production documents. Unmatched colors pass through.
pub(crate) fn normalize_color(raw: &str) -> String {
    match COLOR_WORDS.find(raw) {
        Some(color) => match color.as_str() {
            "Whtie" => "White".to_string(),
            "Back" => "Black".to_string(),
            other => other.to_string(),
        },
        None => raw.to_string(),
    }
}

/// Last whitespace-separated word of the item name; the production sheets
/// key on it instead of the full marketing name.
fn item_short_name(name: &str) -> String {
    name.split_whitespace()
        .next_back()
        .unwrap_or(name)
        .to_string()
}

fn render(value: Option<&str>, missing: &str) -> String {
    value.map_or_else(|| missing.to_string(), str::to_string)
}

fn buyer_columns(buyer: &BuyerInfo) -> [String; 7] {
    [
        render(buyer.email.as_deref(), "Unknown"),
        render(buyer.name.as_deref(), "Unknown"),
        render(buyer.street.as_deref(), "Unknown"),
        render(buyer.city.as_deref(), "Unknown"),
        render(buyer.state.as_deref(), "Unknown"),
        render(buyer.zipcode.as_deref(), "Unknown"),
        render(buyer.phone.as_deref(), "Phone not found"),
    ]
}

fn orders_sheet(records: &[OrderRecord], catalog: &Catalog) -> Sheet {
    let headers = [
        "order_number",
        "item",
        "total",
        "quantity",
        "cost",
        "size",
        "color",
        "design",
        "weight",
        "total_weight",
        "donation",
        "donation_total",
        "platform_fee",
        "email",
        "name",
        "street",
        "city",
        "state",
        "zipcode",
        "phone",
    ]
    .map(str::to_string)
    .to_vec();

    let mut rows = Vec::new();
    for record in records {
        let [email, name, street, city, state, zipcode, phone] = buyer_columns(&record.buyer);
        for item in &record.items {
            let derived = enrich(
                catalog,
                item.kind,
                item.size.as_deref(),
                item.quantity,
                catalog.unit_cost(item.kind),
            );
            rows.push(vec![
                record.number.clone(),
                item.name.clone(),
                item.total_price.to_string(),
                item.quantity.to_string(),
                catalog
                    .unit_cost(item.kind)
                    .map_or_else(|| "N/A".to_string(), |cost| cost.to_string()),
                render(item.size.as_deref(), "N/A"),
                render(item.color.as_deref(), "N/A"),
                render(item.design.as_deref(), "N/A"),
                derived.unit_weight.to_string(),
                derived.total_weight.to_string(),
                derived.donation_each.to_string(),
                derived.donation_total.to_string(),
                derived.platform_fee.to_string(),
                email.clone(),
                name.clone(),
                street.clone(),
                city.clone(),
                state.clone(),
                zipcode.clone(),
                phone.clone(),
            ]);
        }
    }

    Sheet {
        name: "orders",
        headers,
        rows,
    }
}

/// One detail row per line item: short item name, quantity, size,
/// normalized color, design.
fn production_detail_rows(records: &[OrderRecord]) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    for record in records {
        for item in &record.items {
            rows.push(vec![
                item_short_name(&item.name),
                item.quantity.to_string(),
                render(item.size.as_deref(), "N/A"),
                normalize_color(&render(item.color.as_deref(), "N/A")),
                render(item.design.as_deref(), "N/A"),
            ]);
        }
    }
    rows
}

fn production_detail_sheet(records: &[OrderRecord]) -> Sheet {
    Sheet {
        name: "production_detail",
        headers: ["item", "quantity", "size", "color", "design"]
            .map(str::to_string)
            .to_vec(),
        rows: production_detail_rows(records),
    }
}

/// Detail rows grouped by item/size/color/design with quantities summed,
/// sorted by item, color, size rank, design.
fn production_sorted_sheet(records: &[OrderRecord]) -> Sheet {
    let mut totals: BTreeMap<(String, String, String, String), u32> = BTreeMap::new();
    for row in production_detail_rows(records) {
        let [item, quantity, size, color, design] = match <[String; 5]>::try_from(row) {
            Ok(columns) => columns,
            Err(_) => continue,
        };
        let quantity: u32 = quantity.parse().unwrap_or(0);
        *totals.entry((item, size, color, design)).or_insert(0) += quantity;
    }

    let mut grouped = totals.into_iter().collect::<Vec<_>>();
    grouped.sort_by(|((item_a, size_a, color_a, design_a), _), ((item_b, size_b, color_b, design_b), _)| {
        item_a
            .cmp(item_b)
            .then_with(|| color_a.cmp(color_b))
            .then_with(|| size_rank(size_a).cmp(&size_rank(size_b)))
            .then_with(|| design_a.cmp(design_b))
    });

    let rows = grouped
        .into_iter()
        .map(|((item, size, color, design), quantity)| {
            vec![item, size, color, design, quantity.to_string()]
        })
        .collect();

    Sheet {
        name: "production_sorted",
        headers: ["item", "size", "color", "design", "quantity"]
            .map(str::to_string)
            .to_vec(),
        rows,
    }
}

/// Per-order shipping aggregate: summed item weight plus the first-seen
/// buyer fields for that order number.
fn shipping_sheet(records: &[OrderRecord], catalog: &Catalog) -> Sheet {
    let mut orders: BTreeMap<String, (f64, [String; 7])> = BTreeMap::new();
    for record in records {
        let order_weight: f64 = record
            .items
            .iter()
            .map(|item| {
                enrich(
                    catalog,
                    item.kind,
                    item.size.as_deref(),
                    item.quantity,
                    None,
                )
                .total_weight
            })
            .sum();

        orders
            .entry(record.number.clone())
            .and_modify(|(weight, _)| *weight += order_weight)
            .or_insert_with(|| (order_weight, buyer_columns(&record.buyer)));
    }

    let rows = orders
        .into_iter()
        .map(|(number, (weight, buyer))| {
            let [email, name, street, city, state, zipcode, phone] = buyer;
            vec![
                number,
                weight.to_string(),
                email,
                name,
                street,
                city,
                zipcode,
                state,
                phone,
            ]
        })
        .collect();

    Sheet {
        name: "shipping",
        headers: [
            "order_number",
            "total_weight",
            "email",
            "name",
            "street",
            "city",
            "zipcode",
            "state",
            "phone",
        ]
        .map(str::to_string)
        .to_vec(),
        rows,
    }
}

pub(crate) fn build_sheets(records: &[OrderRecord], catalog: &Catalog) -> Vec<Sheet> {
    vec![
        orders_sheet(records, catalog),
        production_detail_sheet(records),
        production_sorted_sheet(records),
        shipping_sheet(records, catalog),
    ]
}
