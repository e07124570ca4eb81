//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::domain::entities::{Item, LeastStockItem, Page, Supplier, SupplierStock};
use crate::domain::value_objects::{Price, Quantity};

/// Item as returned to clients
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemResponse {
    #[serde(rename = "itemID")]
    pub item_id: i64,
    pub name: String,
    pub price: Price,
    pub quantity: i32,
    pub image_path: Option<String>,
    #[serde(rename = "supplierID")]
    pub supplier_id: i64,
    pub supplier_name: Option<String>,
}

impl From<Item> for ItemResponse {
    fn from(item: Item) -> Self {
        Self {
            item_id: item.item_id.get(),
            name: item.name.as_str().to_string(),
            price: item.price,
            quantity: item.quantity.get(),
            image_path: item.image.map(|image| image.as_str().to_string()),
            supplier_id: item.supplier_id.get(),
            supplier_name: item.supplier_name,
        }
    }
}

/// One page of a listing
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub items: Vec<T>,
    pub total_count: i64,
}

impl From<Page<Item>> for PageResponse<ItemResponse> {
    fn from(page: Page<Item>) -> Self {
        Self {
            items: page.items.into_iter().map(ItemResponse::from).collect(),
            total_count: page.total_count,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SupplierResponse {
    #[serde(rename = "userID")]
    pub user_id: i64,
    pub username: String,
}

impl From<Supplier> for SupplierResponse {
    fn from(supplier: Supplier) -> Self {
        Self {
            user_id: supplier.user_id.get(),
            username: supplier.username,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LeastStockItemResponse {
    pub name: String,
    pub quantity: i32,
}

impl From<LeastStockItem> for LeastStockItemResponse {
    fn from(row: LeastStockItem) -> Self {
        Self {
            name: row.name,
            quantity: row.quantity,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierStockResponse {
    pub username: String,
    pub total_quantity: i64,
}

impl From<SupplierStock> for SupplierStockResponse {
    fn from(row: SupplierStock) -> Self {
        Self {
            username: row.username,
            total_quantity: row.total_quantity,
        }
    }
}

/// Body of the supplier price/quantity update
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierItemUpdateRequest {
    #[serde(alias = "Price")]
    pub price: Price,
    #[serde(alias = "Quantity")]
    pub quantity: Quantity,
}

/// Query string of the item listings
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub page_number: Option<i32>,
    pub page_size: Option<i32>,
    pub search_term: Option<String>,
    pub search_field: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{ImageRef, ItemName};
    use kernel::id::{ItemId, UserId};

    #[test]
    fn test_item_response_shape() {
        let item = Item {
            item_id: ItemId::new(7),
            name: ItemName::new("Widget").unwrap(),
            price: Price::parse("12.5").unwrap(),
            quantity: Quantity::new(3).unwrap(),
            image: Some(ImageRef::from_file_name("a.png").unwrap()),
            supplier_id: UserId::new(2),
            supplier_name: Some("bob".to_string()),
        };

        let json = serde_json::to_value(ItemResponse::from(item)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "itemID": 7,
                "name": "Widget",
                "price": 12.5,
                "quantity": 3,
                "imagePath": "/images/a.png",
                "supplierID": 2,
                "supplierName": "bob"
            })
        );
    }

    #[test]
    fn test_supplier_update_request_rejects_bad_values() {
        let ok: SupplierItemUpdateRequest =
            serde_json::from_str(r#"{"price": 9.99, "quantity": 4}"#).unwrap();
        assert_eq!(ok.price.cents(), 999);

        assert!(
            serde_json::from_str::<SupplierItemUpdateRequest>(r#"{"price": 0, "quantity": 4}"#)
                .is_err()
        );
        assert!(
            serde_json::from_str::<SupplierItemUpdateRequest>(r#"{"price": 1, "quantity": -4}"#)
                .is_err()
        );
        assert!(
            serde_json::from_str::<SupplierItemUpdateRequest>(r#"{"price": 1e3, "quantity": 4}"#)
                .is_err()
        );
    }
}
