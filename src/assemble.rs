use regex::Regex;

/// Fixed phrase closing one order's textual representation.
pub(crate) const END_SENTENCE: &str = "Thank you for your order!";

/// Reassembles complete order text blocks from a document's page stream.
///
/// The buffer is held in two parts: `committed` text plus an optional
/// `pending_tail`, the trailing `<qty>\n$<price>` run of the last appended
/// page. A `Some` tail means the page ended mid-item, before the item's
/// option fields; the paginated format then prints those fields at the top
/// of the next page, after the price they belong to. Splicing a deferred
/// fragment between `committed` and the tail restores the printed field
/// order. Only a run that ends the buffer is ever split off, so an
/// unrelated `number\n$price` earlier in an order can never become a
/// splice target.
pub(crate) struct OrderAssembler {
    committed: String,
    pending_tail: Option<String>,
    page_marker: Regex,
    tail: Regex,
    sku_header: Regex,
    size_header: Regex,
    color_header: Regex,
}

impl OrderAssembler {
    pub(crate) fn new() -> Self {
        Self {
            committed: String::new(),
            pending_tail: None,
            // Page-number token like " 3/19 ".
            page_marker: Regex::new(r"\s\d{1,3}/\d{1,3}\s")
                .expect("hardcoded page marker regex is valid"),
            tail: Regex::new(r"\d+\n\$\d+\.\d+\n*$").expect("hardcoded tail regex is valid"),
            sku_header: Regex::new(r"^SKU[\w :]+\nSize:[\w ]+\nColor:[\w ~]+\n")
                .expect("hardcoded SKU header regex is valid"),
            size_header: Regex::new(r"^Size:[\w ]+\nColor:[\w ~]+\n")
                .expect("hardcoded size header regex is valid"),
            color_header: Regex::new(r"^Color:[\w ~]+\n")
                .expect("hardcoded color header regex is valid"),
        }
    }

    /// True when the buffer ends in a quantity/price run and the next page
    /// is expected to open with the item's relocated option fields.
    pub(crate) fn pending_continuation(&self) -> bool {
        self.pending_tail.is_some()
    }

    /// Keeps only the text after the first page-number token.
    fn strip_page_marker<'a>(&self, text: &'a str) -> &'a str {
        match self.page_marker.find(text) {
            Some(found) => &text[found.end()..],
            None => text,
        }
    }

    /// Length of a deferred option-fragment header at the start of the page,
    /// most specific form first.
    fn deferred_fragment_len(&self, page_text: &str) -> Option<usize> {
        [&self.sku_header, &self.size_header, &self.color_header]
            .iter()
            .find_map(|header| header.find(page_text).map(|found| found.end()))
    }

    /// Folds one page into the buffer; returns a complete order block when
    /// the page brought the end sentence into the buffer.
    pub(crate) fn push_page(&mut self, raw_page: &str) -> Option<String> {
        let page_text = self.strip_page_marker(raw_page);

        let mut buffer = std::mem::take(&mut self.committed);
        let rest = if self.pending_continuation()
            && let Some(fragment_len) = self.deferred_fragment_len(page_text)
        {
            tracing::debug!(fragment_len, "relocating page-break option fragment");
            buffer.push_str(&page_text[..fragment_len]);
            &page_text[fragment_len..]
        } else {
            page_text
        };
        if let Some(tail) = self.pending_tail.take() {
            buffer.push_str(&tail);
        }
        buffer.push_str(rest);

        let completed = if buffer.contains(END_SENTENCE) {
            Some(std::mem::take(&mut buffer))
        } else {
            None
        };

        // Split a trailing qty/price run off into the pending tail.
        match self.tail.find(&buffer) {
            Some(found) => {
                let split_at = found.start();
                self.pending_tail = Some(buffer.split_off(split_at));
                self.committed = buffer;
            }
            None => self.committed = buffer,
        }

        completed
    }

    /// Ends the document; any leftover buffered text is an unterminated
    /// order that was never emitted.
    pub(crate) fn finish(mut self) -> Option<String> {
        let mut leftover = std::mem::take(&mut self.committed);
        if let Some(tail) = self.pending_tail.take() {
            leftover.push_str(&tail);
        }
        if leftover.trim().is_empty() {
            None
        } else {
            Some(leftover)
        }
    }
}
