//! Customer import record types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Customer category (고객분류)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "실거주")]
    Residence,
    #[serde(rename = "매도")]
    Seller,
    #[serde(rename = "매수")]
    Buyer,
    #[serde(rename = "일반")]
    General,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::Residence => "실거주",
            Category::Seller => "매도",
            Category::Buyer => "매수",
            Category::General => "일반",
        }
    }
}

pub fn parse_category(s: &str) -> Option<Category> {
    match s.trim() {
        "실거주" => Some(Category::Residence),
        "매도" => Some(Category::Seller),
        "매수" => Some(Category::Buyer),
        "일반" => Some(Category::General),
        _ => None,
    }
}

/// Buy type (매수유형)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuyType {
    #[serde(rename = "매매")]
    Sale,
    #[serde(rename = "월세")]
    MonthlyRent,
    #[serde(rename = "전세")]
    Jeonse,
}

impl BuyType {
    pub fn label(&self) -> &'static str {
        match self {
            BuyType::Sale => "매매",
            BuyType::MonthlyRent => "월세",
            BuyType::Jeonse => "전세",
        }
    }
}

pub fn parse_buy_type(s: &str) -> Option<BuyType> {
    match s.trim() {
        "매매" => Some(BuyType::Sale),
        "월세" => Some(BuyType::MonthlyRent),
        "전세" => Some(BuyType::Jeonse),
        _ => None,
    }
}

/// Inclusive price bound pair. `None` means "unspecified", which is distinct
/// from zero — downstream range matching treats the two differently.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBound {
    pub min: Option<i64>,
    pub max: Option<i64>,
}

impl PriceBound {
    pub fn new(min: Option<i64>, max: Option<i64>) -> Self {
        Self { min, max }
    }
}

/// 월세 carries two independent bound pairs: the monthly rent itself and the
/// deposit (보증금).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentPriceRange {
    pub monthly_rent: PriceBound,
    pub deposit: PriceBound,
}

/// Price envelope per buy type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyPriceRanges {
    pub sale: PriceBound,
    pub monthly_rent: RentPriceRange,
    pub jeonse: PriceBound,
}

/// One prospective customer row, normalized from either input schema
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerImportRecord {
    pub name: String,
    /// Digits-only; may be empty
    pub phone: String,
    pub email: String,
    pub address: String,
    pub notes: String,
    /// Non-empty; defaults to {일반}
    pub categories: Vec<Category>,
    /// May be empty
    pub buy_types: Vec<BuyType>,
    pub buy_price_ranges: BuyPriceRanges,
    pub business_number: String,
    pub budget: Option<i64>,
    pub preferred_area: String,
    pub last_contact_date: DateTime<Utc>,
}

impl CustomerImportRecord {
    /// A record with every optional field empty, categories defaulted to
    /// {일반} and the last-contact date stamped "now".
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: String::new(),
            email: String::new(),
            address: String::new(),
            notes: String::new(),
            categories: vec![Category::General],
            buy_types: Vec::new(),
            buy_price_ranges: BuyPriceRanges::default(),
            business_number: String::new(),
            budget: None,
            preferred_area: String::new(),
            last_contact_date: Utc::now(),
        }
    }
}
