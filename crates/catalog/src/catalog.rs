use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use premium_hello_core::ProductId;

use crate::product::{Product, ReferenceName};
use crate::service::CatalogError;

/// Products available to one user in one locale at one point in time.
///
/// Invariant: at most one product per known reference name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCatalog", into = "RawCatalog")]
pub struct ProductCatalog {
    products: Vec<Product>,
}

/// Wire shape returned by the monetization backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCatalog {
    #[serde(default)]
    in_skill_products: Vec<Product>,
}

impl TryFrom<RawCatalog> for ProductCatalog {
    type Error = CatalogError;

    fn try_from(raw: RawCatalog) -> Result<Self, Self::Error> {
        ProductCatalog::new(raw.in_skill_products)
    }
}

impl From<ProductCatalog> for RawCatalog {
    fn from(catalog: ProductCatalog) -> Self {
        RawCatalog {
            in_skill_products: catalog.products,
        }
    }
}

impl ProductCatalog {
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for product in &products {
            let name = product.reference_name();
            if name.is_known() && !seen.insert(name.clone()) {
                return Err(CatalogError::DuplicateReference(name.to_string()));
            }
        }
        Ok(Self { products })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse the backend's `{"inSkillProducts": [...]}` document.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        serde_json::from_str(json).map_err(|e| CatalogError::Malformed(e.to_string()))
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn find_by_reference_name(&self, name: &ReferenceName) -> Option<&Product> {
        self.products.iter().find(|p| p.reference_name() == name)
    }

    pub fn find_by_id(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.product_id() == id)
    }

    /// Products the user could buy right now.
    pub fn purchasable_subset(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.is_offerable()).collect()
    }

    /// Products the user already owns.
    pub fn entitled_subset(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.is_entitled()).collect()
    }
}

/// `false` for an absent product.
pub fn is_entitled(product: Option<&Product>) -> bool {
    product.is_some_and(Product::is_entitled)
}

/// Display names as a spoken list: `"A"`, `"A and B"`, `"A, B and C"`.
pub fn speakable_list(products: &[&Product]) -> String {
    let names: Vec<&str> = products.iter().map(|p| p.display_name()).collect();
    match names.split_last() {
        None => String::new(),
        Some((last, [])) => (*last).to_string(),
        Some((last, rest)) => format!("{} and {}", rest.join(", "), last),
    }
}
