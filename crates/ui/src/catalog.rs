//! Product-name resolution for cart controls

/// Known catalog products, in the storefront's display order. The second
/// column is the stable identifier the per-product controls are keyed by.
pub const PRODUCTS: &[(&str, &str)] = &[
    ("Sauce Labs Backpack", "sauce-labs-backpack"),
    ("Sauce Labs Bike Light", "sauce-labs-bike-light"),
    ("Sauce Labs Bolt T-Shirt", "sauce-labs-bolt-t-shirt"),
    ("Sauce Labs Fleece Jacket", "sauce-labs-fleece-jacket"),
    ("Sauce Labs Onesie", "sauce-labs-onesie"),
    ("Test.allTheThings() T-Shirt (Red)", "test.allthethings()-t-shirt-(red)"),
];

/// Resolve a display name to its control identifier.
///
/// Known names come from the table; unknown names fall back to the same
/// lowercase/hyphenation transform the storefront applies. Both the add
/// and remove paths derive their selectors from this one function.
pub fn product_slug(name: &str) -> String {
    for (known, slug) in PRODUCTS {
        if *known == name {
            return (*slug).to_string();
        }
    }
    name.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

/// Display name for a known slug, if any.
pub fn display_name(slug: &str) -> Option<&'static str> {
    PRODUCTS
        .iter()
        .find(|(_, known)| *known == slug)
        .map(|(name, _)| *name)
}

/// Position of a product in the display order; unknown names sort last.
pub fn display_rank(name: &str) -> usize {
    PRODUCTS
        .iter()
        .position(|(known, _)| *known == name)
        .unwrap_or(PRODUCTS.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_names_use_the_table() {
        assert_eq!(product_slug("Sauce Labs Backpack"), "sauce-labs-backpack");
        assert_eq!(
            product_slug("Test.allTheThings() T-Shirt (Red)"),
            "test.allthethings()-t-shirt-(red)"
        );
    }

    #[test]
    fn unknown_names_fall_back_deterministically() {
        assert_eq!(product_slug("Wool  Hiking Socks"), "wool-hiking-socks");
        assert_eq!(product_slug("Wool  Hiking Socks"), product_slug("Wool  Hiking Socks"));
    }

    #[test]
    fn display_name_inverts_known_slugs() {
        for (name, slug) in PRODUCTS {
            assert_eq!(display_name(slug), Some(*name));
        }
        assert_eq!(display_name("no-such-product"), None);
    }
}
