//! Schema profiles for the two supported input layouts
//!
//! A profile maps one raw spreadsheet row into a `CustomerImportRecord`, or
//! declares the row garbage (skipped entirely, not a reported failure). The
//! two layouts are a generic contacts export (Google-style column names) and
//! the application's own downloadable template.

use chrono::{NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::services::price;
use crate::types::{
    parse_buy_type, parse_category, BuyPriceRanges, Category, CustomerImportRecord, PriceBound,
    RentPriceRange,
};

// =============================================================================
// TEMPLATE COLUMN LABELS
// =============================================================================
// Shared with template generation so the downloadable file is guaranteed to
// parse back through this profile.

pub const COL_NAME: &str = "고객명 (필수)";
pub const COL_PHONE: &str = "전화번호";
pub const COL_EMAIL: &str = "이메일";
pub const COL_CATEGORIES: &str = "고객분류 (실거주, 매도, 매수, 일반 - 쉼표로 구분)";
pub const COL_BUY_TYPES: &str = "매수유형 (매매, 월세, 전세 - 쉼표로 구분)";
pub const COL_SALE_MIN: &str = "매매가 최소";
pub const COL_SALE_MAX: &str = "매매가 최대";
pub const COL_JEONSE_MIN: &str = "전세가 최소";
pub const COL_JEONSE_MAX: &str = "전세가 최대";
pub const COL_DEPOSIT_MIN: &str = "월세보증금 최소";
pub const COL_DEPOSIT_MAX: &str = "월세보증금 최대";
pub const COL_RENT_MIN: &str = "월세 최소";
pub const COL_RENT_MAX: &str = "월세 최대";
pub const COL_BUSINESS_NUMBER: &str = "사업자번호";
pub const COL_BUDGET: &str = "예산";
pub const COL_PREFERRED_AREA: &str = "선호지역";
pub const COL_LAST_CONTACT: &str = "최근연락일";
pub const COL_ADDRESS: &str = "주소";
pub const COL_NOTES: &str = "메모";

/// Header order of the downloadable template
pub const TEMPLATE_COLUMNS: &[&str] = &[
    COL_NAME,
    COL_PHONE,
    COL_EMAIL,
    COL_CATEGORIES,
    COL_BUY_TYPES,
    COL_SALE_MIN,
    COL_SALE_MAX,
    COL_JEONSE_MIN,
    COL_JEONSE_MAX,
    COL_DEPOSIT_MIN,
    COL_DEPOSIT_MAX,
    COL_RENT_MIN,
    COL_RENT_MAX,
    COL_BUSINESS_NUMBER,
    COL_BUDGET,
    COL_PREFERRED_AREA,
    COL_LAST_CONTACT,
    COL_ADDRESS,
    COL_NOTES,
];

// =============================================================================
// ROW VIEW
// =============================================================================

/// One CSV row with header-based field access
pub struct RowView<'a> {
    headers: &'a csv::StringRecord,
    record: &'a csv::StringRecord,
}

impl<'a> RowView<'a> {
    pub fn new(headers: &'a csv::StringRecord, record: &'a csv::StringRecord) -> Self {
        Self { headers, record }
    }

    /// Field value for the first header starting with `label`, trimmed.
    /// Prefix matching tolerates the annotated template headers
    /// ("고객명 (필수)" matches a lookup for "고객명 (필수)" or exported
    /// variants that drop trailing annotations are still found by their
    /// own full label). Missing column or missing cell yields "".
    pub fn get(&self, label: &str) -> &'a str {
        for (i, header) in self.headers.iter().enumerate() {
            if header.trim().starts_with(label) {
                return self.record.get(i).unwrap_or("").trim();
            }
        }
        ""
    }

    /// First non-empty value among `labels`
    pub fn first_of(&self, labels: &[&str]) -> &'a str {
        labels
            .iter()
            .map(|label| self.get(label))
            .find(|v| !v.is_empty())
            .unwrap_or("")
    }

    fn is_blank(&self) -> bool {
        self.record.iter().all(|f| f.trim().is_empty())
    }
}

// =============================================================================
// SCHEMA PROFILE
// =============================================================================

/// Which input layout an import run uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SchemaKind {
    /// Generic contacts export (first/last name, numbered phone columns)
    Contacts,
    /// The application's own downloadable template
    Template,
}

impl SchemaKind {
    pub fn profile(self) -> &'static dyn SchemaProfile {
        match self {
            SchemaKind::Contacts => &ContactsProfile,
            SchemaKind::Template => &TemplateProfile,
        }
    }
}

/// Maps one raw row into a record, or `None` to skip it as garbage
pub trait SchemaProfile: Send + Sync {
    fn name(&self) -> &'static str;

    /// Whether uploads under this profile carry the template's notice line
    fn has_notice_line(&self) -> bool;

    /// `index` is the 0-based data-row index (header excluded)
    fn map_row(&self, row: &RowView<'_>, index: usize) -> Option<CustomerImportRecord>;
}

/// Outcome of mapping a whole file
#[derive(Debug)]
pub struct MappedRows {
    pub records: Vec<CustomerImportRecord>,
    /// Rows dropped by the garbage-row filter (blank or missing required
    /// identifying fields) — excluded from the report total by design
    pub skipped: usize,
}

/// Parse decoded tabular text and map every row under `profile`
pub fn map_rows(profile: &dyn SchemaProfile, text: &str) -> anyhow::Result<MappedRows> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for (index, result) in reader.records().enumerate() {
        let record = result?;
        let row = RowView::new(&headers, &record);

        if row.is_blank() {
            skipped += 1;
            continue;
        }

        match profile.map_row(&row, index) {
            Some(mapped) => records.push(mapped),
            None => {
                debug!(
                    "row {} skipped by {} profile (missing required fields)",
                    index + 2,
                    profile.name()
                );
                skipped += 1;
            }
        }
    }

    Ok(MappedRows { records, skipped })
}

// =============================================================================
// SHARED FIELD CLEANUP
// =============================================================================

/// Best-effort phone cleanup: keep the digits, drop separators
fn clean_phone(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, '-' | '(' | ')' | '.') && !c.is_whitespace())
        .collect()
}

/// Comma-separated enum tokens: split, trim, drop empties and unknowns
fn parse_tokens<T: Copy + PartialEq>(raw: &str, parse: fn(&str) -> Option<T>) -> Vec<T> {
    let mut out = Vec::new();
    for token in raw.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        match parse(token) {
            Some(value) if !out.contains(&value) => out.push(value),
            Some(_) => {}
            None => debug!("unrecognized token '{}' discarded", token),
        }
    }
    out
}

fn parse_contact_date(raw: &str) -> Option<NaiveDate> {
    for format in ["%Y-%m-%d", "%Y.%m.%d", "%Y/%m/%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Some(date);
        }
    }
    None
}

// =============================================================================
// CONTACTS-EXPORT PROFILE
// =============================================================================

const FIRST_NAME: &str = "First Name";
const MIDDLE_NAME: &str = "Middle Name";
const LAST_NAME: &str = "Last Name";
const PHONE_COLUMNS: &[&str] = &["Phone 1 - Value", "Phone 2 - Value", "Phone 3 - Value"];
const EMAIL_COLUMNS: &[&str] = &["E-mail 1 - Value", "E-mail 2 - Value"];
const ADDRESS_COLUMNS: &[&str] = &["Address 1 - Formatted", "Address 1 - Street"];

/// Loose profile for generic contacts exports. Everything except name and
/// phone defaults; rows with no identifying fields at all are dropped.
pub struct ContactsProfile;

impl SchemaProfile for ContactsProfile {
    fn name(&self) -> &'static str {
        "contacts"
    }

    fn has_notice_line(&self) -> bool {
        false
    }

    fn map_row(&self, row: &RowView<'_>, index: usize) -> Option<CustomerImportRecord> {
        let first = row.get(FIRST_NAME);
        let middle = row.get(MIDDLE_NAME);
        let last = row.get(LAST_NAME);
        let phone_raw = row.first_of(PHONE_COLUMNS);

        // Garbage-row filter: nothing to identify the contact by
        if first.is_empty() && last.is_empty() && phone_raw.is_empty() {
            return None;
        }

        let name_parts: Vec<&str> = [first, middle, last]
            .into_iter()
            .filter(|p| !p.is_empty())
            .collect();
        let name = if name_parts.is_empty() {
            format!("고객{}", index + 1)
        } else {
            name_parts.join(" ")
        };

        let mut record = CustomerImportRecord::named(name);
        record.phone = clean_phone(phone_raw);
        record.email = row.first_of(EMAIL_COLUMNS).to_string();
        record.address = row.first_of(ADDRESS_COLUMNS).to_string();
        Some(record)
    }
}

// =============================================================================
// TEMPLATE PROFILE
// =============================================================================

/// Strict profile for the application's own template. The name column is
/// required; numeric columns run through the price-notation parser, where an
/// empty or unparseable cell means "unspecified", never zero.
pub struct TemplateProfile;

impl SchemaProfile for TemplateProfile {
    fn name(&self) -> &'static str {
        "template"
    }

    fn has_notice_line(&self) -> bool {
        true
    }

    fn map_row(&self, row: &RowView<'_>, _index: usize) -> Option<CustomerImportRecord> {
        let name = row.get(COL_NAME);
        if name.is_empty() {
            return None;
        }

        let mut categories = parse_tokens(row.get(COL_CATEGORIES), parse_category);
        if categories.is_empty() {
            categories = vec![Category::General];
        }
        let buy_types = parse_tokens(row.get(COL_BUY_TYPES), parse_buy_type);

        let price = |label: &str| price::parse(row.get(label));

        let last_contact_date = match parse_contact_date(row.get(COL_LAST_CONTACT)) {
            Some(date) => Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0).unwrap_or_default()),
            None => Utc::now(),
        };

        Some(CustomerImportRecord {
            name: name.to_string(),
            phone: clean_phone(row.get(COL_PHONE)),
            email: row.get(COL_EMAIL).to_string(),
            address: row.get(COL_ADDRESS).to_string(),
            notes: row.get(COL_NOTES).to_string(),
            categories,
            buy_types,
            buy_price_ranges: BuyPriceRanges {
                sale: PriceBound::new(price(COL_SALE_MIN), price(COL_SALE_MAX)),
                monthly_rent: RentPriceRange {
                    monthly_rent: PriceBound::new(price(COL_RENT_MIN), price(COL_RENT_MAX)),
                    deposit: PriceBound::new(price(COL_DEPOSIT_MIN), price(COL_DEPOSIT_MAX)),
                },
                jeonse: PriceBound::new(price(COL_JEONSE_MIN), price(COL_JEONSE_MAX)),
            },
            business_number: row.get(COL_BUSINESS_NUMBER).to_string(),
            budget: price(COL_BUDGET),
            preferred_area: row.get(COL_PREFERRED_AREA).to_string(),
            last_contact_date,
        })
    }
}
