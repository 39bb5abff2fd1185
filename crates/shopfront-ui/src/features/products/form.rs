//! Product form state and validation.
//!
//! # Design
//! - Keep form inputs as strings for lossless editing; convert to API types
//!   only on submit.
//! - One rule table per field, evaluated before submission; a failed rule
//!   blocks the network call entirely.
//! - The minimum-one-image rule is list-level, independent of per-row URL
//!   validity.

use crate::core::logic::is_http_url;
use shopfront_api_models::{NewProduct, Product};

const NAME_MIN_CHARS: usize = 3;
const DESCRIPTION_MIN_CHARS: usize = 10;

/// One row of the dynamic image URL sub-list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageField {
    /// Image URL as typed.
    pub url: String,
}

/// Mutable product form state.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ProductFormState {
    /// Product name input.
    pub name: String,
    /// Description input.
    pub description: String,
    /// Price input, kept raw until submit.
    pub price: String,
    /// Selected category id; empty when unselected.
    pub category_id: String,
    /// Dynamic image URL rows.
    pub images: Vec<ImageField>,
}

/// Per-field validation failures.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct FormErrors {
    /// Name rule failure.
    pub name: Option<String>,
    /// Description rule failure.
    pub description: Option<String>,
    /// Price rule failure.
    pub price: Option<String>,
    /// Category rule failure.
    pub category: Option<String>,
    /// List-level image rule failure.
    pub images: Option<String>,
    /// Per-row image URL failures, aligned with the image rows.
    pub image_urls: Vec<Option<String>>,
}

impl FormErrors {
    /// Whether every rule passed.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.category.is_none()
            && self.images.is_none()
            && self.image_urls.iter().all(Option::is_none)
    }
}

impl ProductFormState {
    /// Pre-populate the form from an existing record.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.to_string(),
            category_id: product.category.id.clone(),
            images: product
                .images
                .iter()
                .map(|url| ImageField { url: url.clone() })
                .collect(),
        }
    }

    /// Append an image row unless the input is blank. Returns whether a row
    /// was added so the caller can clear its input box.
    pub fn add_image(&mut self, url: &str) -> bool {
        let trimmed = url.trim();
        if trimmed.is_empty() {
            return false;
        }
        self.images.push(ImageField {
            url: trimmed.to_string(),
        });
        true
    }

    /// Remove an image row; out-of-range indices are ignored.
    pub fn remove_image(&mut self, index: usize) {
        if index < self.images.len() {
            self.images.remove(index);
        }
    }

    /// Evaluate the field rules and build the submission payload.
    ///
    /// # Errors
    /// Returns the per-field failures when any rule is violated; no payload
    /// is produced and no network call should be made.
    pub fn submit(&self) -> Result<NewProduct, FormErrors> {
        let mut errors = FormErrors::default();

        let name = self.name.trim();
        if name.chars().count() < NAME_MIN_CHARS {
            errors.name = Some(format!(
                "Name must be at least {NAME_MIN_CHARS} characters long"
            ));
        }

        let description = self.description.trim();
        if description.chars().count() < DESCRIPTION_MIN_CHARS {
            errors.description = Some(format!(
                "Description must be at least {DESCRIPTION_MIN_CHARS} characters long"
            ));
        }

        let price = self.price.trim().parse::<f64>().ok().filter(|value| {
            value.is_finite() && *value > 0.0
        });
        if price.is_none() {
            errors.price = Some("Price must be a positive number".to_string());
        }

        let category_id = self.category_id.trim();
        if category_id.is_empty() {
            errors.category = Some("Please select a category".to_string());
        }

        if self.images.is_empty() {
            errors.images = Some("Please add at least one image URL".to_string());
        }
        errors.image_urls = self
            .images
            .iter()
            .map(|image| {
                if is_http_url(&image.url) {
                    None
                } else {
                    Some("Please enter a valid URL".to_string())
                }
            })
            .collect();

        if !errors.is_clean() {
            return Err(errors);
        }
        let Some(price) = price else {
            return Err(errors);
        };

        Ok(NewProduct {
            name: name.to_string(),
            description: description.to_string(),
            price,
            category_id: category_id.to_string(),
            images: self
                .images
                .iter()
                .map(|image| image.url.trim().to_string())
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{ImageField, ProductFormState};
    use shopfront_api_models::{Product, ProductCategory};

    fn valid_form() -> ProductFormState {
        ProductFormState {
            name: "Red Mug".to_string(),
            description: "A mug, in red, 330ml.".to_string(),
            price: "12.50".to_string(),
            category_id: "c1".to_string(),
            images: vec![
                ImageField {
                    url: "https://a".to_string(),
                },
                ImageField {
                    url: "https://b".to_string(),
                },
            ],
        }
    }

    #[test]
    fn image_rows_flatten_into_the_payload() {
        let payload = valid_form().submit().expect("valid form");
        assert_eq!(payload.images, vec!["https://a", "https://b"]);
        assert!((payload.price - 12.5).abs() < f64::EPSILON);
        assert_eq!(payload.category_id, "c1");
    }

    #[test]
    fn loading_a_product_expands_images_into_rows() {
        let product = Product {
            id: "p1".to_string(),
            slug: "red-mug".to_string(),
            name: "Red Mug".to_string(),
            description: "A mug, in red, 330ml.".to_string(),
            price: 12.5,
            images: vec!["https://a".to_string(), "https://b".to_string()],
            category: ProductCategory {
                id: "c1".to_string(),
                name: "Kitchen".to_string(),
            },
        };
        let form = ProductFormState::from_product(&product);
        assert_eq!(
            form.images,
            vec![
                ImageField {
                    url: "https://a".to_string()
                },
                ImageField {
                    url: "https://b".to_string()
                },
            ]
        );
        assert_eq!(form.price, "12.5");
        // Round trip back to the flat wire shape.
        let payload = form.submit().expect("valid form");
        assert_eq!(payload.images, vec!["https://a", "https://b"]);
    }

    #[test]
    fn short_name_and_description_are_rejected() {
        let mut form = valid_form();
        form.name = "ab".to_string();
        form.description = "too short".to_string();
        let errors = form.submit().expect_err("invalid form");
        assert_eq!(
            errors.name.as_deref(),
            Some("Name must be at least 3 characters long")
        );
        assert_eq!(
            errors.description.as_deref(),
            Some("Description must be at least 10 characters long")
        );
    }

    #[test]
    fn price_must_parse_and_be_positive() {
        for bad in ["", "0", "-1", "free", "NaN"] {
            let mut form = valid_form();
            form.price = bad.to_string();
            let errors = form.submit().expect_err("invalid price");
            assert!(errors.price.is_some(), "price {bad:?} should be rejected");
        }
    }

    #[test]
    fn unselected_category_blocks_submission() {
        let mut form = valid_form();
        form.category_id = String::new();
        let errors = form.submit().expect_err("invalid form");
        assert_eq!(errors.category.as_deref(), Some("Please select a category"));
    }

    #[test]
    fn empty_image_list_hits_the_list_level_rule() {
        let mut form = valid_form();
        form.remove_image(1);
        form.remove_image(0);
        let errors = form.submit().expect_err("invalid form");
        assert_eq!(
            errors.images.as_deref(),
            Some("Please add at least one image URL")
        );
        assert!(errors.image_urls.is_empty());
    }

    #[test]
    fn row_level_url_rule_is_independent_of_the_minimum() {
        let mut form = valid_form();
        form.images[1].url = "not-a-url".to_string();
        let errors = form.submit().expect_err("invalid form");
        assert_eq!(errors.images, None);
        assert_eq!(errors.image_urls.len(), 2);
        assert_eq!(errors.image_urls[0], None);
        assert_eq!(
            errors.image_urls[1].as_deref(),
            Some("Please enter a valid URL")
        );
    }

    #[test]
    fn blank_image_input_is_not_appended() {
        let mut form = valid_form();
        assert!(!form.add_image("   "));
        assert_eq!(form.images.len(), 2);
        assert!(form.add_image(" https://c "));
        assert_eq!(form.images[2].url, "https://c");
    }
}
