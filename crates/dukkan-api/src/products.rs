//! # Product Endpoints
//!
//! Remote operations for the product catalog.
//!
//! ## Multipart Shape
//! Products are the one resource created over `multipart/form-data`, because
//! an image can ride along with the fields:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    POST /Product/addproduct                             │
//! │                                                                         │
//! │  Name          "شاي العروسة"        (required)                          │
//! │  BuyingPrice   "25.5"               (required)                          │
//! │  SellingPrice  "30"                 (required)                          │
//! │  Stock         "100"                (required)                          │
//! │  Description   "عبوة 250 جرام"      (only when present)                 │
//! │  ImageUrl      <binary part>        (only when an image was chosen)     │
//! │                                                                         │
//! │  Updates PATCH /Product/updateproduct with the same parts plus Id;     │
//! │  the image part is only attached when the operator picked a new file.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Uploads are checked client-side first: `image/*` only, at most 5 MB.

use reqwest::multipart::Form;
use tracing::debug;

use dukkan_core::types::{ListQuery, Product};
use dukkan_core::validation::{validate_name, validate_price};
use dukkan_core::ValidationError;

use crate::client::{ApiGateway, ImageUpload};
use crate::envelope::Page;
use crate::error::ApiResult;

/// Fields the operator fills in when creating or editing a product.
#[derive(Debug, Clone, Default)]
pub struct ProductInput {
    pub name: String,
    pub buying_price: f64,
    pub selling_price: f64,
    pub stock: i64,
    pub description: Option<String>,
}

impl ProductInput {
    /// Client-side checks, run before any bytes leave the machine.
    pub fn validate(&self) -> ApiResult<()> {
        validate_name(&self.name)?;
        validate_price(self.buying_price)?;
        validate_price(self.selling_price)?;
        if self.stock < 0 {
            return Err(ValidationError::MustBePositive {
                field: "stock".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

/// Remote API for products.
///
/// ## Usage
/// ```rust,ignore
/// let products = ProductsApi::new(gateway.clone());
/// let page = products.list(&ListQuery::default()).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductsApi {
    gateway: ApiGateway,
}

impl ProductsApi {
    pub fn new(gateway: ApiGateway) -> Self {
        ProductsApi { gateway }
    }

    /// Fetches one page of the catalog.
    pub async fn list(&self, query: &ListQuery) -> ApiResult<Page<Product>> {
        self.gateway.get_page("/Product/getallproducts", query).await
    }

    /// Fetches a single product by id.
    pub async fn get_by_id(&self, id: &str) -> ApiResult<Product> {
        self.gateway.get_json(&format!("/Product/{id}")).await
    }

    /// Creates a product, optionally with an image.
    ///
    /// ## Returns
    /// The created product and the server message for the toast.
    pub async fn add(
        &self,
        input: &ProductInput,
        image: Option<ImageUpload>,
    ) -> ApiResult<(Product, String)> {
        debug!(name = %input.name, "Adding product");
        let form = build_product_form(input, image, None)?;
        self.gateway.post_multipart("/Product/addproduct", form).await
    }

    /// Updates a product. A `None` image keeps the stored one.
    ///
    /// The backend acknowledges updates with a boolean, so only the server
    /// message comes back.
    pub async fn update(
        &self,
        id: &str,
        input: &ProductInput,
        image: Option<ImageUpload>,
    ) -> ApiResult<String> {
        debug!(%id, "Updating product");
        let form = build_product_form(input, image, Some(id))?;
        let (_, message): (bool, String) = self
            .gateway
            .patch_multipart("/Product/updateproduct", form)
            .await?;
        Ok(message)
    }

    /// Deletes a product.
    pub async fn delete(&self, id: &str) -> ApiResult<String> {
        debug!(%id, "Deleting product");
        self.gateway.delete_message(&format!("/Product/{id}")).await
    }
}

/// Assembles the multipart form shared by add and update.
fn build_product_form(
    input: &ProductInput,
    image: Option<ImageUpload>,
    id: Option<&str>,
) -> ApiResult<Form> {
    input.validate()?;

    let mut form = Form::new();
    if let Some(id) = id {
        form = form.text("Id", id.to_string());
    }
    form = form
        .text("Name", input.name.trim().to_string())
        .text("BuyingPrice", input.buying_price.to_string())
        .text("SellingPrice", input.selling_price.to_string())
        .text("Stock", input.stock.to_string());

    if let Some(description) = input.description.as_deref() {
        if !description.trim().is_empty() {
            form = form.text("Description", description.trim().to_string());
        }
    }

    if let Some(image) = image {
        image.validate()?;
        form = form.part("ImageUrl", image.into_part()?);
    }

    Ok(form)
}
