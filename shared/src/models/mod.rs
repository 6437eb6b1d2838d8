//! Data models for the Caja backend
//!
//! Persisted entities (products, sales) and their request payloads.
//! All monetary amounts use [`rust_decimal::Decimal`], serialized as
//! JSON floats so the documents on disk stay plain JSON.

mod product;
mod sale;

pub use product::{Product, ProductCreate};
pub use sale::{DailyTotal, Sale, SaleDraft, SaleItem, SaleItemDraft};
