//! Product catalog loaded from YAML at startup.
//!
//! ```yaml
//! products:
//!   - id: consult-30
//!     title: Consultation (30 min block)
//!     price: "45.00"
//! ```

use std::collections::HashMap;
use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

/// Errors loading the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid catalog: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("duplicate product id in catalog: {0}")]
    DuplicateProduct(String),
}

/// A product customers can add to the cart.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Product {
    pub id: String,
    pub title: String,
    pub price: Decimal,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    products: Vec<Product>,
}

/// Products keyed by ID, in file order for listing.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Load the catalog from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the file cannot be read or parsed, or if a
    /// product ID appears twice.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&raw)
    }

    /// Parse a catalog from YAML text.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the text is not a valid catalog.
    pub fn from_yaml(raw: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_yaml::from_str(raw)?;
        Self::from_products(file.products)
    }

    /// Build a catalog from products.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateProduct` if a product ID appears twice.
    pub fn from_products(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(products.len());
        for (position, product) in products.iter().enumerate() {
            if index.insert(product.id.clone(), position).is_some() {
                return Err(CatalogError::DuplicateProduct(product.id.clone()));
            }
        }
        Ok(Self { products, index })
    }

    /// Look up a product by ID.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Product> {
        self.index.get(id).and_then(|&i| self.products.get(i))
    }

    /// All products in file order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const YAML: &str = r#"
products:
  - id: consult-30
    title: Consultation (30 min)
    price: "45.00"
  - id: followup-15
    title: Follow-up (15 min)
    price: "20.50"
"#;

    #[test]
    fn test_parse_catalog() {
        let catalog = Catalog::from_yaml(YAML).unwrap();

        assert_eq!(catalog.products().len(), 2);
        let product = catalog.get("followup-15").unwrap();
        assert_eq!(product.title, "Follow-up (15 min)");
        assert_eq!(product.price, Decimal::new(2050, 2));
        assert!(catalog.get("missing").is_none());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let yaml = r#"
products:
  - { id: a, title: A, price: "1" }
  - { id: a, title: A again, price: "2" }
"#;
        let err = Catalog::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateProduct(id) if id == "a"));
    }

    #[test]
    fn test_missing_file() {
        let err = Catalog::load(Path::new("/nonexistent/catalog.yaml")).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }

    #[test]
    fn test_bundled_catalog_parses() {
        let raw = include_str!("../catalog.yaml");
        assert!(!Catalog::from_yaml(raw).unwrap().products().is_empty());
    }
}
