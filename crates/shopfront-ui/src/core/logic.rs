//! Pure UI helpers extracted from components for non-wasm testing.

/// Human-friendly price label with a currency prefix.
#[must_use]
pub fn format_price(price: f64) -> String {
    format!("${price:.2}")
}

/// Whether a value has the shape of an http(s) URL.
///
/// Matches the form-level rule for image entries; full URL parsing is left
/// to the browser.
#[must_use]
pub fn is_http_url(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .is_some_and(|rest| !rest.is_empty())
}

/// Parse a `page` query parameter, clamping to the first page on junk input.
#[must_use]
pub fn parse_page(raw: Option<&str>) -> u32 {
    raw.and_then(|value| value.trim().parse::<u32>().ok())
        .map_or(1, |page| page.max(1))
}

/// Build the paginated products path from listing arguments.
#[must_use]
pub fn products_path(offset: u32, limit: u32, category_id: Option<&str>) -> String {
    category_id.filter(|id| !id.is_empty()).map_or_else(
        || format!("/products?offset={offset}&limit={limit}"),
        |id| {
            let encoded = urlencoding::encode(id);
            format!("/products?offset={offset}&limit={limit}&categoryId={encoded}")
        },
    )
}

/// Build the product search path for a free-text term.
#[must_use]
pub fn search_path(term: &str) -> String {
    let encoded = urlencoding::encode(term);
    format!("/products/search?searchedText={encoded}")
}

#[cfg(test)]
mod tests {
    use super::{format_price, is_http_url, parse_page, products_path, search_path};

    #[test]
    fn price_formats_with_two_decimals() {
        assert_eq!(format_price(12.5), "$12.50");
        assert_eq!(format_price(3.0), "$3.00");
    }

    #[test]
    fn url_shape_check_requires_scheme_and_host() {
        assert!(is_http_url("https://img.example/a.png"));
        assert!(is_http_url("http://img.example"));
        assert!(!is_http_url("https://"));
        assert!(!is_http_url("ftp://img.example"));
        assert!(!is_http_url("img.example/a.png"));
        assert!(!is_http_url(""));
    }

    #[test]
    fn page_parsing_clamps_to_one() {
        assert_eq!(parse_page(None), 1);
        assert_eq!(parse_page(Some("3")), 3);
        assert_eq!(parse_page(Some("0")), 1);
        assert_eq!(parse_page(Some("junk")), 1);
    }

    #[test]
    fn products_path_appends_category_filter() {
        assert_eq!(products_path(0, 8, None), "/products?offset=0&limit=8");
        assert_eq!(products_path(0, 8, Some("")), "/products?offset=0&limit=8");
        assert_eq!(
            products_path(16, 8, Some("c 1")),
            "/products?offset=16&limit=8&categoryId=c%201"
        );
    }

    #[test]
    fn search_path_encodes_the_term() {
        assert_eq!(
            search_path("red mug"),
            "/products/search?searchedText=red%20mug"
        );
    }
}
