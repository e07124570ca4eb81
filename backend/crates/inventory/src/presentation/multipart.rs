//! Item Form Parsing
//!
//! Item create and update accept `multipart/form-data` with the fields
//! `name`, `price`, `quantity`, `supplierId` and an optional file `image`.
//! Field names are matched case-insensitively.

use axum::extract::Multipart;
use kernel::id::UserId;

use crate::domain::entities::{ImageUpload, ItemDraft};
use crate::domain::value_objects::{ItemName, Price, Quantity};
use crate::error::{InventoryError, InventoryResult};

/// Parsed item form
#[derive(Debug)]
pub struct ItemForm {
    pub draft: ItemDraft,
    pub image: Option<ImageUpload>,
}

#[derive(Default)]
struct RawItemForm {
    name: Option<String>,
    price: Option<String>,
    quantity: Option<String>,
    supplier_id: Option<String>,
    image: Option<ImageUpload>,
}

fn multipart_error(e: axum::extract::multipart::MultipartError) -> InventoryError {
    InventoryError::Validation(e.body_text())
}

fn required(value: Option<String>, field: &str) -> InventoryResult<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| InventoryError::Validation(format!("The {field} field is required.")))
}

/// Read every part of the form and validate it into an [`ItemForm`]
pub async fn read_item_form(mut multipart: Multipart) -> InventoryResult<ItemForm> {
    let mut raw = RawItemForm::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_ascii_lowercase();
        match name.as_str() {
            "name" => raw.name = Some(field.text().await.map_err(multipart_error)?),
            "price" => raw.price = Some(field.text().await.map_err(multipart_error)?),
            "quantity" => raw.quantity = Some(field.text().await.map_err(multipart_error)?),
            "supplierid" => raw.supplier_id = Some(field.text().await.map_err(multipart_error)?),
            "image" => {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await.map_err(multipart_error)?;
                // browsers send an empty part when no file was picked
                if !bytes.is_empty() {
                    raw.image = Some(ImageUpload::new(file_name, content_type, bytes.to_vec()));
                }
            }
            other => {
                tracing::debug!(field = other, "Ignoring unknown form field");
            }
        }
    }

    let name = ItemName::new(required(raw.name, "Name")?)?;
    let price = Price::parse(&required(raw.price, "Price")?)?;
    let quantity = Quantity::parse(&required(raw.quantity, "Quantity")?)?;
    let supplier_id = required(raw.supplier_id, "SupplierId")?
        .trim()
        .parse::<UserId>()
        .map_err(|_| InventoryError::Validation("SupplierId must be a number.".to_string()))?;

    if let Some(image) = &raw.image {
        image.ensure_png()?;
    }

    Ok(ItemForm {
        draft: ItemDraft {
            name,
            price,
            quantity,
            supplier_id,
        },
        image: raw.image,
    })
}
