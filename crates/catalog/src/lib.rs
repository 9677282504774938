//! Product catalog module.
//!
//! Holds the per-request snapshot of in-skill products together with the
//! user's entitlement state, and the async boundary to the monetization
//! backend that produces it. Lookups are pure; the fetch is the only IO.

pub mod catalog;
pub mod product;
pub mod service;

pub use catalog::{is_entitled, speakable_list, ProductCatalog};
pub use product::{EntitlementStatus, Product, Purchasability, ReferenceName};
pub use service::{fetch_catalog, CatalogError, CatalogService, FetchPolicy, InMemoryCatalogService};
