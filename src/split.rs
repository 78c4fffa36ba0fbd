use regex::Regex;

/// One order block separated into its metadata, item, and buyer parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SplitOrder {
    pub order_number: String,
    /// Text after the `Order #` anchor; feeds the item parser.
    pub item_section: String,
    /// Text after the first date-time stamp preceding the anchor; feeds the
    /// buyer parser. `None` when the stamp is missing from the block.
    pub buyer_section: Option<String>,
}

pub(crate) struct OrderSplitter {
    order_anchor: Regex,
    date_stamp: Regex,
}

impl OrderSplitter {
    pub(crate) fn new() -> Self {
        Self {
            order_anchor: Regex::new(r"Order #(\w+)")
                .expect("hardcoded order anchor regex is valid"),
            // e.g. "Jan 15, 2024, 09:12 AM"
            date_stamp: Regex::new(r"\n\w{3} \d{1,2}, \d{4}, \d{2}:\d{2} \w{2}\n")
                .expect("hardcoded date stamp regex is valid"),
        }
    }

    /// Splits on the first `Order #` anchor. `None` means the anchor is
    /// absent and the whole order must be abandoned; a missing date stamp
    /// only costs the buyer section.
    pub(crate) fn split(&self, block: &str) -> Option<SplitOrder> {
        let captures = self.order_anchor.captures(block)?;
        let order_number = captures[1].to_string();
        let anchor = captures.get(0).expect("capture 0 is the whole match");

        let details = &block[..anchor.start()];
        let buyer_section = self
            .date_stamp
            .find(details)
            .map(|stamp| details[stamp.end()..].to_string());

        Some(SplitOrder {
            order_number,
            item_section: block[anchor.end()..].to_string(),
            buyer_section,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::OrderSplitter;
    use pretty_assertions::assert_eq;

    #[test]
    fn splits_block_into_sections() {
        let splitter = OrderSplitter::new();
        let block = "Ship by\nJan 15, 2024, 09:12 AM\nBuyer\nJane Doe\nOrder #3290184\nTee\n2\n$28.40\n";

        let split = splitter.split(block).expect("block should split");
        assert_eq!(split.order_number, "3290184");
        assert_eq!(split.item_section, "\nTee\n2\n$28.40\n");
        assert_eq!(split.buyer_section.as_deref(), Some("Buyer\nJane Doe\n"));
    }

    #[test]
    fn first_anchor_wins_when_block_holds_trailing_text() {
        let splitter = OrderSplitter::new();
        let block = "x\nJan 2, 2024, 10:00 AM\nb\nOrder #A1\nitems\nOrder #B2\n";

        let split = splitter.split(block).expect("block should split");
        assert_eq!(split.order_number, "A1");
        assert!(split.item_section.contains("Order #B2"));
    }

    #[test]
    fn missing_anchor_is_a_structural_failure() {
        let splitter = OrderSplitter::new();
        assert!(splitter.split("no anchors here\n").is_none());
    }

    #[test]
    fn missing_date_stamp_drops_only_the_buyer_section() {
        let splitter = OrderSplitter::new();
        let split = splitter
            .split("details without stamp\nOrder #Z9\nTee\n")
            .expect("anchor should still split");
        assert_eq!(split.order_number, "Z9");
        assert_eq!(split.buyer_section, None);
    }
}
