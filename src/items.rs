use regex::Regex;

use crate::model::{ItemKind, LineItem};
use crate::warning::{ScrapeWarning, WarningCode};

/// Leading words that qualify rather than name a product; the word after
/// them carries the kind ("Premium Hoodie", "Classic Tee").
const KIND_MODIFIERS: [&str; 3] = ["Classic", "Premium", "Fleece"];

/// Splits the item section on `$<amount>` price tokens and extracts one
/// `LineItem` per preceding chunk.
pub(crate) struct ItemParser {
    price: Regex,
    quantity: Regex,
    options: Regex,
    size: Regex,
    color: Regex,
    design: Regex,
}

impl ItemParser {
    pub(crate) fn new() -> Self {
        Self {
            price: Regex::new(r"\$\d+\.\d+").expect("hardcoded price regex is valid"),
            quantity: Regex::new(r"\n(\d+)\n").expect("hardcoded quantity regex is valid"),
            options: Regex::new(
                r"\n(Size: \w+\nColor:[\w()~ -]+(?:\nDesign:[\w()~ -]+)?)\n",
            )
            .expect("hardcoded options regex is valid"),
            size: Regex::new(r"Size: (\w+)").expect("hardcoded size regex is valid"),
            color: Regex::new(r"Color: ([\w()~ -]+)").expect("hardcoded color regex is valid"),
            design: Regex::new(r"Design: ([\w()~ -]+)").expect("hardcoded design regex is valid"),
        }
    }

    pub(crate) fn parse(
        &self,
        section: &str,
        warnings: &mut Vec<ScrapeWarning>,
    ) -> Vec<LineItem> {
        // The totals block opens with an "Items" heading; nothing after it
        // is a line item.
        let body = section.split("Items").next().unwrap_or(section).trim();

        let mut items = Vec::new();
        let mut chunk_start = 0;
        for price_token in self.price.find_iter(body) {
            let chunk = &body[chunk_start..price_token.start()];
            chunk_start = price_token.end();

            let total_price: f64 = price_token.as_str()[1..].parse().unwrap_or(0.0);
            if let Some(item) = self.parse_chunk(chunk, total_price, warnings) {
                items.push(item);
            }
        }

        items
    }

    fn parse_chunk(
        &self,
        chunk: &str,
        total_price: f64,
        warnings: &mut Vec<ScrapeWarning>,
    ) -> Option<LineItem> {
        let Some(name) = chunk
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .map(str::to_string)
        else {
            warnings.push(ScrapeWarning::new(
                WarningCode::ItemFieldMissing,
                "item chunk has no name line; chunk skipped",
            ));
            return None;
        };

        let quantity = self
            .quantity
            .captures(chunk)
            .and_then(|captures| captures[1].parse::<u32>().ok())
            .filter(|quantity| *quantity >= 1);
        let Some(quantity) = quantity else {
            warnings.push(
                ScrapeWarning::new(
                    WarningCode::ItemFieldMissing,
                    format!("no standalone quantity line for item '{name}'; chunk skipped"),
                ),
            );
            return None;
        };

        let (size, color, design) = match self.options.captures(chunk) {
            Some(captures) => {
                let options = captures[1].to_string();
                (
                    self.size
                        .captures(&options)
                        .map(|c| c[1].to_string()),
                    self.color
                        .captures(&options)
                        .map(|c| c[1].to_string()),
                    self.design
                        .captures(&options)
                        .map(|c| c[1].to_string()),
                )
            }
            None => {
                warnings.push(ScrapeWarning::new(
                    WarningCode::OptionsNotFound,
                    format!("size/color options not found for item '{name}'"),
                ));
                (None, None, None)
            }
        };

        let kind = classify_item(&name);
        if kind == ItemKind::Other && !has_modifier_prefix(&name) {
            warnings.push(ScrapeWarning::new(
                WarningCode::UnknownItemType,
                format!("unknown item type for '{name}'"),
            ));
        }

        Some(LineItem {
            name,
            kind,
            quantity,
            total_price,
            size,
            color,
            design,
        })
    }
}

/// Kind from the item name by case-insensitive substring match. Names with
/// no match fall through to `Other`; modifier-prefixed names ("Premium X")
/// name their product in the second word, so their `Other` is expected and
/// not worth a diagnostic.
pub(crate) fn classify_item(name: &str) -> ItemKind {
    let lowered = name.to_lowercase();
    for kind in ItemKind::KNOWN {
        if lowered.contains(&kind.as_str().to_lowercase()) {
            return kind;
        }
    }
    ItemKind::Other
}

/// True when the name opens with a known modifier word and carries a
/// product word after it.
pub(crate) fn has_modifier_prefix(name: &str) -> bool {
    let mut words = name.split_whitespace();
    words
        .next()
        .is_some_and(|first| KIND_MODIFIERS.contains(&first))
        && words.next().is_some()
}
