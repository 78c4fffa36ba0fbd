/// Plain text extracted from a single PDF page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageText {
    pub page_number: u32,
    pub text: String,
}

/// Coarse product category derived from the item name; key into the
/// weight and donation tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Tee,
    Sweatshirt,
    Hoodie,
    Sweatpants,
    Shorts,
    Other,
}

impl ItemKind {
    /// Known kinds in classification priority order.
    pub const KNOWN: [Self; 5] = [
        Self::Tee,
        Self::Sweatshirt,
        Self::Hoodie,
        Self::Sweatpants,
        Self::Shorts,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tee => "Tee",
            Self::Sweatshirt => "Sweatshirt",
            Self::Hoodie => "Hoodie",
            Self::Sweatpants => "Sweatpants",
            Self::Shorts => "Shorts",
            Self::Other => "Other",
        }
    }
}

/// Buyer identity and shipping address. Fields that could not be recovered
/// from the document text are `None`; the CSV edge renders the report
/// sentinels (`Unknown`, `Phone not found`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuyerInfo {
    pub name: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zipcode: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// One purchased item line within an order.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    pub name: String,
    pub kind: ItemKind,
    pub quantity: u32,
    /// The `$`-tagged line total as printed in the document.
    pub total_price: f64,
    pub size: Option<String>,
    pub color: Option<String>,
    pub design: Option<String>,
}

/// A fully parsed order: every line item inherits this order's buyer.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    pub number: String,
    pub buyer: BuyerInfo,
    pub items: Vec<LineItem>,
}

/// Derived per-line-item figures from the catalog tables.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Enrichment {
    pub unit_weight: f64,
    pub total_weight: f64,
    pub donation_each: f64,
    pub donation_total: f64,
    pub platform_fee: f64,
}

/// One tabular report sheet, written as its own CSV file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    pub name: &'static str,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}
