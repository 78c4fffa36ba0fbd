use regex::Regex;

use crate::model::BuyerInfo;
use crate::warning::{ScrapeWarning, WarningCode};

/// Extracts buyer identity and address fields from the buyer section of an
/// order block. Everything here is field-level: a miss costs the field, not
/// the order.
pub(crate) struct BuyerParser {
    address: Regex,
    email: Regex,
    email_rejoin_domain: Regex,
    email_rejoin_stub: Regex,
    phone: Regex,
}

impl BuyerParser {
    pub(crate) fn new() -> Self {
        Self {
            // "<city>,<state>" line, zipcode digits (dashes allowed, may be
            // wrapped across lines), then the fixed country line.
            address: Regex::new(r"([\w ]+),([a-zA-Z\s]+)\n*([\d\n-]{4,})\nUnited States")
                .expect("hardcoded address regex is valid"),
            email: Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,7}\b")
                .expect("hardcoded email regex is valid"),
            email_rejoin_domain: Regex::new(r"\n(\w+\.com\n)")
                .expect("hardcoded email domain rejoin regex is valid"),
            email_rejoin_stub: Regex::new(r"\n([com]+\n)")
                .expect("hardcoded email stub rejoin regex is valid"),
            phone: Regex::new(r"\+\d \d{3}-\d{3}-\d{4}")
                .expect("hardcoded phone regex is valid"),
        }
    }

    pub(crate) fn parse(
        &self,
        section: &str,
        warnings: &mut Vec<ScrapeWarning>,
    ) -> BuyerInfo {
        // Keep everything after the "Buyer" marker. The marker can open the
        // section (the date stamp directly precedes it) and is absent in
        // some layouts, in which case the whole section is scanned.
        let body = section
            .strip_prefix("Buyer\n")
            .or_else(|| section.split_once("\nBuyer\n").map(|(_, rest)| rest))
            .unwrap_or(section)
            .trim();

        let mut buyer = BuyerInfo::default();

        let Some(name) = body.lines().next().map(str::trim).filter(|l| !l.is_empty()) else {
            warnings.push(ScrapeWarning::new(
                WarningCode::BuyerSectionMissing,
                "buyer section held no usable lines",
            ));
            return buyer;
        };
        buyer.name = Some(name.to_string());

        let after_name = body
            .split_once(name)
            .map_or("", |(_, rest)| rest)
            .trim_start();
        buyer.street = after_name
            .lines()
            .next()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string);

        match self.address.captures(body) {
            Some(address) => {
                buyer.city = Some(address[1].trim().to_string());
                buyer.state = Some(address[2].trim().to_string());
                // Zipcodes wrapped across lines keep only digits and dashes.
                buyer.zipcode = Some(address[3].replace('\n', ""));
            }
            None => warnings.push(ScrapeWarning::new(
                WarningCode::AddressNotFound,
                "city/state/zipcode pattern not found in buyer section",
            )),
        }

        buyer.email = self.find_email(body, warnings);

        match self.phone.find(body) {
            Some(phone) => buyer.phone = Some(phone.as_str().to_string()),
            None => warnings.push(ScrapeWarning::new(
                WarningCode::PhoneNotFound,
                "phone pattern not found in buyer section",
            )),
        }

        buyer
    }

    /// Email addresses are sometimes broken across a line by the page
    /// layout, orphaning the domain (or a bare "com") on its own line. One
    /// repair pass rejoins those lines, then the match is retried once.
    fn find_email(&self, body: &str, warnings: &mut Vec<ScrapeWarning>) -> Option<String> {
        if let Some(email) = self.email.find(body) {
            return Some(email.as_str().to_string());
        }

        let rejoined = self.email_rejoin_domain.replace_all(body, "$1");
        let rejoined = self.email_rejoin_stub.replace_all(&rejoined, "$1");
        if let Some(email) = self.email.find(&rejoined) {
            tracing::debug!("email recovered after rejoining a wrapped line");
            return Some(email.as_str().to_string());
        }

        warnings.push(ScrapeWarning::new(
            WarningCode::EmailNotFound,
            "email pattern not found in buyer section",
        ));
        None
    }
}
