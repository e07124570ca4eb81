//! Domain Value Objects
//!
//! Immutable value types for the inventory domain.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::value::RawValue;
use std::fmt;

use crate::error::{InventoryError, InventoryResult};

/// URL prefix every stored image reference starts with
pub const IMAGE_URL_PREFIX: &str = "/images/";

/// Item name: non-empty after trimming, at most 100 characters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemName(String);

impl ItemName {
    pub const MAX_LENGTH: usize = 100;

    pub fn new(raw: impl AsRef<str>) -> InventoryResult<Self> {
        let name = raw.as_ref().trim();
        if name.is_empty() {
            return Err(InventoryError::Validation("Name is required.".to_string()));
        }
        if name.chars().count() > Self::MAX_LENGTH {
            return Err(InventoryError::Validation(format!(
                "Name must be at most {} characters.",
                Self::MAX_LENGTH
            )));
        }
        Ok(Self(name.to_string()))
    }

    /// Create from database values (assumes already validated)
    pub fn from_db(stored: impl Into<String>) -> Self {
        Self(stored.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unit price held as integer cents
///
/// Accepted range is 0.01 to 1,000,000 with at most two fractional digits.
/// On the wire it is a JSON number (`12.5`); a numeric string is also
/// accepted when decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(i64);

impl Price {
    pub const MIN_CENTS: i64 = 1;
    pub const MAX_CENTS: i64 = 100_000_000;

    pub fn from_cents(cents: i64) -> InventoryResult<Self> {
        if (Self::MIN_CENTS..=Self::MAX_CENTS).contains(&cents) {
            Ok(Self(cents))
        } else {
            Err(InventoryError::Validation(
                "Price must be between 0.01 and 1000000.".to_string(),
            ))
        }
    }

    /// Parse a plain decimal (`"12"`, `"12.5"`, `"12.50"`)
    pub fn parse(raw: &str) -> InventoryResult<Self> {
        let invalid = || {
            InventoryError::Validation(
                "Price must be a number with at most 2 decimal places.".to_string(),
            )
        };

        let text = raw.trim();
        let (whole, fraction) = text.split_once('.').unwrap_or((text, ""));
        let fraction = fraction.trim_end_matches('0');

        let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if (whole.is_empty() && fraction.is_empty() && !text.contains('0'))
            || !all_digits(whole)
            || !all_digits(fraction)
            || fraction.len() > 2
        {
            return Err(invalid());
        }

        // anything this long is out of range anyway
        let whole = whole.trim_start_matches('0');
        if whole.len() > 10 {
            return Self::from_cents(i64::MAX);
        }

        let whole_cents = if whole.is_empty() {
            0
        } else {
            whole.parse::<i64>().map_err(|_| invalid())? * 100
        };
        let fraction_cents = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => fraction.parse::<i64>().map_err(|_| invalid())?,
        };

        Self::from_cents(whole_cents + fraction_cents)
    }

    /// Create from database values (assumes already validated)
    pub fn from_db(cents: i64) -> Self {
        Self(cents)
    }

    pub fn cents(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.0 as f64 / 100.0)
    }
}

/// JSON price: a number or a string, both read as the literal token so
/// exponent forms like `1e3` are rejected the same way in either shape.
impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Box::<RawValue>::deserialize(deserializer)?;
        let token = raw.get();
        let text = if token.starts_with('"') {
            serde_json::from_str::<String>(token).map_err(serde::de::Error::custom)?
        } else {
            token.to_string()
        };
        Price::parse(&text).map_err(serde::de::Error::custom)
    }
}

/// Stock quantity: non-negative
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Quantity(i32);

impl Quantity {
    pub fn new(value: i32) -> InventoryResult<Self> {
        if value < 0 {
            return Err(InventoryError::Validation(
                "Quantity must be zero or greater.".to_string(),
            ));
        }
        Ok(Self(value))
    }

    pub fn parse(raw: &str) -> InventoryResult<Self> {
        let value = raw.trim().parse::<i32>().map_err(|_| {
            InventoryError::Validation("Quantity must be a whole number.".to_string())
        })?;
        Self::new(value)
    }

    /// Create from database values (assumes already validated)
    pub fn from_db(value: i32) -> Self {
        Self(value)
    }

    pub fn get(&self) -> i32 {
        self.0
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = i32::deserialize(deserializer)?;
        Quantity::new(value).map_err(serde::de::Error::custom)
    }
}

/// Reference to a stored image: `/images/<file name>`
///
/// The file name is a single path segment, so a reference can never point
/// outside the image directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn from_file_name(file_name: &str) -> InventoryResult<Self> {
        Self::parse(&format!("{IMAGE_URL_PREFIX}{file_name}"))
    }

    pub fn parse(raw: &str) -> InventoryResult<Self> {
        let invalid = || InventoryError::Internal(format!("Invalid image reference: {raw}"));

        let file_name = raw.strip_prefix(IMAGE_URL_PREFIX).ok_or_else(invalid)?;
        if file_name.is_empty()
            || file_name == "."
            || file_name == ".."
            || file_name
                .chars()
                .any(|c| c == '/' || c == '\\' || c.is_control())
        {
            return Err(invalid());
        }

        Ok(Self(raw.to_string()))
    }

    pub fn file_name(&self) -> &str {
        &self.0[IMAGE_URL_PREFIX.len()..]
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Column a listing search applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchField {
    #[default]
    ItemName,
    SupplierName,
}

impl SearchField {
    pub const fn as_str(&self) -> &'static str {
        match self {
            SearchField::ItemName => "ItemName",
            SearchField::SupplierName => "SupplierName",
        }
    }

    pub fn parse(raw: &str) -> InventoryResult<Self> {
        if raw.eq_ignore_ascii_case("ItemName") {
            Ok(SearchField::ItemName)
        } else if raw.eq_ignore_ascii_case("SupplierName") {
            Ok(SearchField::SupplierName)
        } else {
            Err(InventoryError::Validation(
                "searchField must be 'ItemName' or 'SupplierName'.".to_string(),
            ))
        }
    }
}

/// Paging window, clamped to page >= 1 and size 1..=100
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page_number: i32,
    page_size: i32,
}

impl PageRequest {
    pub const DEFAULT_PAGE_SIZE: i32 = 10;
    pub const MAX_PAGE_SIZE: i32 = 100;

    pub fn new(page_number: Option<i32>, page_size: Option<i32>) -> Self {
        Self {
            page_number: page_number.unwrap_or(1).max(1),
            page_size: page_size
                .unwrap_or(Self::DEFAULT_PAGE_SIZE)
                .clamp(1, Self::MAX_PAGE_SIZE),
        }
    }

    pub fn page_number(&self) -> i32 {
        self.page_number
    }

    pub fn page_size(&self) -> i32 {
        self.page_size
    }

    /// Rows to skip
    pub fn offset(&self) -> i64 {
        i64::from(self.page_number - 1) * i64::from(self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_parse() {
        assert_eq!(Price::parse("12").unwrap().cents(), 1200);
        assert_eq!(Price::parse("12.5").unwrap().cents(), 1250);
        assert_eq!(Price::parse("12.50").unwrap().cents(), 1250);
        assert_eq!(Price::parse("12.500").unwrap().cents(), 1250);
        assert_eq!(Price::parse("0.01").unwrap().cents(), 1);
        assert_eq!(Price::parse(".5").unwrap().cents(), 50);
        assert_eq!(Price::parse("1000000").unwrap().cents(), 100_000_000);
    }

    #[test]
    fn test_price_rejects() {
        for raw in ["", ".", "abc", "-1", "1e3", "12.345", "1,5", "0", "0.00", "1000000.01"] {
            assert!(
                matches!(Price::parse(raw), Err(InventoryError::Validation(_))),
                "{raw:?} should be rejected"
            );
        }
        assert!(Price::parse("99999999999999999999").is_err());
    }

    #[test]
    fn test_price_json() {
        let price: Price = serde_json::from_str("19.99").unwrap();
        assert_eq!(price.cents(), 1999);
        assert_eq!(serde_json::to_string(&price).unwrap(), "19.99");

        let price: Price = serde_json::from_str("\"5\"").unwrap();
        assert_eq!(price.to_string(), "5.00");

        assert!(serde_json::from_str::<Price>("0.001").is_err());
    }

    #[test]
    fn test_price_json_rejects_exponent() {
        for raw in ["1e3", "1E3", "1.5e2", "\"1e3\"", "null", "true"] {
            assert!(
                serde_json::from_str::<Price>(raw).is_err(),
                "{raw} should be rejected"
            );
        }
        let price: Price = serde_json::from_str("1000.0").unwrap();
        assert_eq!(price.cents(), 100_000);
    }

    #[test]
    fn test_quantity() {
        assert_eq!(Quantity::parse("0").unwrap().get(), 0);
        assert_eq!(Quantity::parse(" 42 ").unwrap().get(), 42);
        assert!(Quantity::parse("-1").is_err());
        assert!(Quantity::parse("1.5").is_err());
        assert!(serde_json::from_str::<Quantity>("-3").is_err());
    }

    #[test]
    fn test_item_name() {
        assert_eq!(ItemName::new("  Widget ").unwrap().as_str(), "Widget");
        assert!(ItemName::new("   ").is_err());
        assert!(ItemName::new("x".repeat(101)).is_err());
    }

    #[test]
    fn test_image_ref() {
        let image = ImageRef::parse("/images/abc.png").unwrap();
        assert_eq!(image.file_name(), "abc.png");

        for raw in ["/images/", "/images/..", "/images/a/b.png", "/other/a.png", "a.png"] {
            assert!(ImageRef::parse(raw).is_err(), "{raw:?} should be rejected");
        }
    }

    #[test]
    fn test_search_field() {
        assert_eq!(SearchField::parse("itemname").unwrap(), SearchField::ItemName);
        assert_eq!(
            SearchField::parse("SupplierName").unwrap(),
            SearchField::SupplierName
        );
        assert!(SearchField::parse("Price").is_err());
    }

    #[test]
    fn test_page_request_clamps() {
        let page = PageRequest::new(Some(0), Some(1000));
        assert_eq!(page.page_number(), 1);
        assert_eq!(page.page_size(), 100);

        let page = PageRequest::new(Some(3), Some(20));
        assert_eq!(page.offset(), 40);

        assert_eq!(PageRequest::default().page_size(), 10);
    }

    #[test]
    fn test_page_offset_does_not_overflow_i32() {
        let page = PageRequest::new(Some(i32::MAX), Some(100));
        assert_eq!(page.offset(), (i64::from(i32::MAX) - 1) * 100);
        assert!(page.offset() > i64::from(i32::MAX));
    }
}
