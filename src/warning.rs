/// Diagnostic categories. Field-level codes never abort anything; order-level
/// codes abort only the order they name; `UnterminatedOrder` is batch-level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningCode {
    /// `Order #` anchor missing; the order block cannot be extracted.
    OrderAnchorMissing,
    /// Date-time stamp missing; the buyer section cannot be located.
    DateStampMissing,
    /// `Buyer` marker present but the section held no usable lines.
    BuyerSectionMissing,
    AddressNotFound,
    EmailNotFound,
    PhoneNotFound,
    /// Size/Color/Design block missing from an item chunk.
    OptionsNotFound,
    /// An item chunk is missing its name or quantity line and was skipped.
    ItemFieldMissing,
    UnknownItemType,
    /// An order parsed structurally but produced zero line items.
    NoItemsParsed,
    /// No unit cost for the item kind; platform fee reported as zero.
    FeeUnavailable,
    /// A document ended with buffered order text and no end sentence.
    UnterminatedOrder,
    /// A document in the batch could not be read; it was skipped.
    DocumentUnreadable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeWarning {
    pub code: WarningCode,
    pub message: String,
    pub document: Option<String>,
    pub order_number: Option<String>,
    pub page: Option<u32>,
}

impl ScrapeWarning {
    #[must_use]
    pub fn new(code: WarningCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            document: None,
            order_number: None,
            page: None,
        }
    }

    #[must_use]
    pub fn with_document(mut self, document: impl Into<String>) -> Self {
        self.document = Some(document.into());
        self
    }

    #[must_use]
    pub fn with_order(mut self, order_number: impl Into<String>) -> Self {
        self.order_number = Some(order_number.into());
        self
    }

    #[must_use]
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }
}
