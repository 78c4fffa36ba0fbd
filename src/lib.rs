mod assemble;
mod buyer;
mod catalog;
mod csv_out;
mod enrich;
mod error;
mod items;
mod model;
mod options;
mod pdf_reader;
mod report;
mod split;
mod warning;

use std::path::Path;

use crate::assemble::OrderAssembler;
use crate::buyer::BuyerParser;
use crate::csv_out::write_sheet;
use crate::items::ItemParser;
use crate::model::PageText;
use crate::pdf_reader::read_pdf_pages;
use crate::report::build_sheets;
use crate::split::OrderSplitter;

pub use catalog::Catalog;
pub use enrich::enrich;
pub use error::ScrapeError;
pub use model::{BuyerInfo, Enrichment, ItemKind, LineItem, OrderRecord, Sheet};
pub use options::{PageSelection, ScrapeOptions};
pub use warning::{ScrapeWarning, WarningCode};

#[derive(Debug, Clone, PartialEq)]
pub struct ScrapeReport {
    pub document_count: usize,
    pub order_count: usize,
    pub item_count: usize,
    pub warnings: Vec<ScrapeWarning>,
}

/// Parsers used across every order of a run; the regexes compile once here.
struct OrderParsers {
    splitter: OrderSplitter,
    buyer: BuyerParser,
    items: ItemParser,
}

impl OrderParsers {
    fn new() -> Self {
        Self {
            splitter: OrderSplitter::new(),
            buyer: BuyerParser::new(),
            items: ItemParser::new(),
        }
    }

    /// One reassembled order block → one record, or `None` on a structural
    /// failure. New warnings are tagged with the document and order.
    fn parse_block(
        &self,
        document: &str,
        block: &str,
        warnings: &mut Vec<ScrapeWarning>,
    ) -> Option<OrderRecord> {
        let tag_from = warnings.len();
        let record = self.parse_block_inner(block, warnings);
        let order_number = record.as_ref().map(|record| record.number.clone());
        for warning in &mut warnings[tag_from..] {
            warning.document = Some(document.to_string());
            if warning.order_number.is_none() {
                warning.order_number.clone_from(&order_number);
            }
        }
        record
    }

    fn parse_block_inner(
        &self,
        block: &str,
        warnings: &mut Vec<ScrapeWarning>,
    ) -> Option<OrderRecord> {
        let Some(split) = self.splitter.split(block) else {
            warnings.push(ScrapeWarning::new(
                WarningCode::OrderAnchorMissing,
                "order number anchor not found; order block abandoned",
            ));
            return None;
        };

        let buyer = match &split.buyer_section {
            Some(section) => self.buyer.parse(section, warnings),
            None => {
                warnings.push(ScrapeWarning::new(
                    WarningCode::DateStampMissing,
                    "date-time stamp not found; buyer details unavailable",
                ));
                BuyerInfo::default()
            }
        };

        let items = self.items.parse(&split.item_section, warnings);
        if items.is_empty() {
            warnings.push(ScrapeWarning::new(
                WarningCode::NoItemsParsed,
                "order parsed structurally but produced no line items",
            ));
        }
        // Unclassified items have no catalog cost; their platform fee will
        // be reported as zero.
        for item in items.iter().filter(|item| item.kind == ItemKind::Other) {
            warnings.push(ScrapeWarning::new(
                WarningCode::FeeUnavailable,
                format!("no unit cost for '{}'; platform fee reported as zero", item.name),
            ));
        }

        Some(OrderRecord {
            number: split.order_number,
            buyer,
            items,
        })
    }
}

/// Core engine: reassembles order blocks from a document's page stream and
/// parses each into a record. Strictly sequential; page order is
/// correctness-critical.
pub(crate) fn extract_orders_from_pages(
    document: &str,
    pages: &[PageText],
    warnings: &mut Vec<ScrapeWarning>,
) -> Vec<OrderRecord> {
    let parsers = OrderParsers::new();
    let mut assembler = OrderAssembler::new();
    let mut records = Vec::new();

    for page in pages {
        if let Some(block) = assembler.push_page(&page.text)
            && let Some(record) = parsers.parse_block(document, &block, warnings)
        {
            records.push(record);
        }
    }

    if let Some(leftover) = assembler.finish() {
        tracing::warn!(document, "document ended with unterminated order text");
        warnings.push(
            ScrapeWarning::new(
                WarningCode::UnterminatedOrder,
                format!(
                    "document ended with {} buffered characters and no end sentence; at least one order was lost",
                    leftover.len()
                ),
            )
            .with_document(document),
        );
    }

    records
}

fn document_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned())
}

/// Extracts all orders from one PDF document.
pub fn scrape_pdf(
    input_pdf: &Path,
    options: &ScrapeOptions,
) -> Result<(Vec<OrderRecord>, Vec<ScrapeWarning>), ScrapeError> {
    let document = document_name(input_pdf);
    tracing::info!(document, "scraping");

    let pages = read_pdf_pages(input_pdf, options.pages.as_ref())?;
    let mut warnings = Vec::new();
    let records = extract_orders_from_pages(&document, &pages, &mut warnings);
    Ok((records, warnings))
}

fn write_reports(
    records: &[OrderRecord],
    out_dir: &Path,
    options: &ScrapeOptions,
) -> Result<(), ScrapeError> {
    std::fs::create_dir_all(out_dir)?;
    for sheet in build_sheets(records, &options.catalog) {
        let path = write_sheet(out_dir, &sheet, options.delimiter)?;
        tracing::debug!(sheet = sheet.name, path = %path.display(), rows = sheet.rows.len(), "sheet written");
    }
    Ok(())
}

fn report_from(records: &[OrderRecord], documents: usize, warnings: Vec<ScrapeWarning>) -> ScrapeReport {
    ScrapeReport {
        document_count: documents,
        order_count: records.len(),
        item_count: records.iter().map(|record| record.items.len()).sum(),
        warnings,
    }
}

/// Extracts one PDF and writes all report sheets into `out_dir`.
pub fn scrape_pdf_to_csv(
    input_pdf: &Path,
    out_dir: &Path,
    options: &ScrapeOptions,
) -> Result<ScrapeReport, ScrapeError> {
    let (records, warnings) = scrape_pdf(input_pdf, options)?;
    write_reports(&records, out_dir, options)?;
    Ok(report_from(&records, 1, warnings))
}

/// Batch entry point: every `*.pdf` directly under `in_dir`, in name order,
/// combined into one set of report sheets. A document that fails to load is
/// skipped with a warning; it never halts the batch.
pub fn scrape_dir_to_csv(
    in_dir: &Path,
    out_dir: &Path,
    options: &ScrapeOptions,
) -> Result<ScrapeReport, ScrapeError> {
    let mut inputs = std::fs::read_dir(in_dir)?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
        })
        .collect::<Vec<_>>();
    inputs.sort();

    if inputs.is_empty() {
        return Err(ScrapeError::NoDocumentsFound(in_dir.to_path_buf()));
    }

    let mut records = Vec::new();
    let mut warnings = Vec::new();
    for input in &inputs {
        match scrape_pdf(input, options) {
            Ok((document_records, document_warnings)) => {
                records.extend(document_records);
                warnings.extend(document_warnings);
            }
            Err(error) => {
                let document = document_name(input);
                tracing::warn!(document, %error, "skipping unreadable document");
                warnings.push(
                    ScrapeWarning::new(
                        WarningCode::DocumentUnreadable,
                        format!("document skipped: {error}"),
                    )
                    .with_document(document),
                );
            }
        }
    }

    write_reports(&records, out_dir, options)?;
    Ok(report_from(&records, inputs.len(), warnings))
}

#[cfg(test)]
mod tests {
    use super::{extract_orders_from_pages, ScrapeWarning};
    use crate::assemble::END_SENTENCE;
    use crate::model::{BuyerInfo, ItemKind, PageText};
    use crate::warning::WarningCode;
    use pretty_assertions::assert_eq;

    fn page(page_number: u32, text: &str) -> PageText {
        PageText {
            page_number,
            text: text.to_string(),
        }
    }

    fn full_order_page() -> String {
        format!(
            "Order Confirmation 1/1\nShip by\nJan 15, 2024, 09:12 AM\nBuyer\nJane Doe\n123 Main St\nSpringfield, IL\n62704\nUnited States\njane@example.com\n+1 555-123-4567\nOrder #3290184\nFleece Hoodie\n3\nSize: L\nColor: Black\n$88.50\nItems\n{END_SENTENCE}\n"
        )
    }

    #[test]
    fn extracts_complete_single_page_order() {
        let mut warnings = Vec::new();
        let records =
            extract_orders_from_pages("a.pdf", &[page(1, &full_order_page())], &mut warnings);

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.number, "3290184");
        assert_eq!(record.buyer.name.as_deref(), Some("Jane Doe"));
        assert_eq!(record.buyer.zipcode.as_deref(), Some("62704"));
        assert_eq!(record.items.len(), 1);
        assert_eq!(record.items[0].kind, ItemKind::Hoodie);
        assert_eq!(record.items[0].quantity, 3);
        assert!(warnings.is_empty(), "{warnings:?}");
    }

    #[test]
    fn order_split_across_pages_is_reassembled() {
        let first = "Order Confirmation 1/2\nShip by\nJan 15, 2024, 09:12 AM\nBuyer\nJane Doe\n123 Main St\nSpringfield, IL\n62704\nUnited States\njane@example.com\n+1 555-123-4567\nOrder #77\nFleece Hoodie\n2\n$59.00\n";
        let second = format!("Order Confirmation 2/2\nSize: L\nColor: Black\nItems\n{END_SENTENCE}\n");

        let mut warnings = Vec::new();
        let records = extract_orders_from_pages(
            "b.pdf",
            &[page(1, first), page(2, &second)],
            &mut warnings,
        );

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].items.len(), 1);
        assert_eq!(records[0].items[0].size.as_deref(), Some("L"));
        assert_eq!(records[0].items[0].color.as_deref(), Some("Black"));
        assert!(warnings.is_empty(), "{warnings:?}");
    }

    #[test]
    fn unterminated_document_yields_no_orders_and_a_warning() {
        let mut warnings = Vec::new();
        let records = extract_orders_from_pages(
            "broken.pdf",
            &[page(1, "x 1/1\nOrder #9\nTee\n1\n$14.20\n")],
            &mut warnings,
        );

        assert!(records.is_empty());
        let warning = warnings
            .iter()
            .find(|w| w.code == WarningCode::UnterminatedOrder)
            .expect("reassembly defect should be surfaced");
        assert_eq!(warning.document.as_deref(), Some("broken.pdf"));
    }

    #[test]
    fn anchorless_block_is_abandoned_with_document_context() {
        let mut warnings = Vec::new();
        let records = extract_orders_from_pages(
            "c.pdf",
            &[page(1, &format!("x 1/1\nno anchor here\n{END_SENTENCE}\n"))],
            &mut warnings,
        );

        assert!(records.is_empty());
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].code, WarningCode::OrderAnchorMissing);
        assert_eq!(warnings[0].document.as_deref(), Some("c.pdf"));
    }

    #[test]
    fn itemless_order_is_kept_with_a_diagnostic() {
        let block = format!(
            "x 1/1\nShip by\nJan 15, 2024, 09:12 AM\nBuyer\nJane Doe\n123 Main St\nSpringfield, IL\n62704\nUnited States\njane@example.com\n+1 555-123-4567\nOrder #E8\nno line items printed\nItems\n{END_SENTENCE}\n"
        );
        let mut warnings = Vec::new();
        let records = extract_orders_from_pages("e.pdf", &[page(1, &block)], &mut warnings);

        assert_eq!(records.len(), 1);
        assert!(records[0].items.is_empty());
        let warning = warnings
            .iter()
            .find(|w| w.code == WarningCode::NoItemsParsed)
            .expect("empty item list should be diagnosed");
        assert_eq!(warning.order_number.as_deref(), Some("E8"));
        assert_eq!(warning.document.as_deref(), Some("e.pdf"));
    }

    #[test]
    fn missing_date_stamp_warns_and_defaults_the_buyer() {
        let block = format!(
            "x 1/1\nBuyer\nJane Doe\nOrder #F9\nTee\n1\nSize: M\nColor: Red\n$14.20\nItems\n{END_SENTENCE}\n"
        );
        let mut warnings = Vec::new();
        let records = extract_orders_from_pages("f.pdf", &[page(1, &block)], &mut warnings);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].buyer, BuyerInfo::default());
        assert_eq!(records[0].items.len(), 1);
        let warning = warnings
            .iter()
            .find(|w| w.code == WarningCode::DateStampMissing)
            .expect("missing stamp should be diagnosed");
        assert_eq!(warning.order_number.as_deref(), Some("F9"));
        assert_eq!(warning.document.as_deref(), Some("f.pdf"));
    }

    #[test]
    fn warnings_carry_the_order_number() {
        let block = format!(
            "x 1/1\nShip by\nJan 15, 2024, 09:12 AM\nBuyer\nJane Doe\n123 Main St\nSpringfield, IL\n62704\nUnited States\njane@example.com\n+1 555-123-4567\nOrder #55\nMystery Tee\n1\n$14.20\nItems\n{END_SENTENCE}\n"
        );
        let mut warnings = Vec::new();
        let records = extract_orders_from_pages("d.pdf", &[page(1, &block)], &mut warnings);

        assert_eq!(records.len(), 1);
        let warning: &ScrapeWarning = warnings
            .iter()
            .find(|w| w.code == WarningCode::OptionsNotFound)
            .expect("missing options should warn");
        assert_eq!(warning.order_number.as_deref(), Some("55"));
        assert_eq!(warning.document.as_deref(), Some("d.pdf"));
    }
}
