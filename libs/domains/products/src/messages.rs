//! Client-facing messages returned in the response envelope.

pub const PRODUCT_CREATED: &str = "Product was successfully created.";
pub const PRODUCT_UPDATED: &str = "Product was successfully updated.";
pub const PRODUCT_DELETED: &str = "Product was successfully deleted.";
pub const PRODUCT_EXISTS: &str = "Product with that name already exists.";
pub const PRODUCT_NOT_FOUND: &str = "Product with that id was not found.";
pub const QUANTITY_NEGATIVE: &str = "Quantity cannot be negative.";
