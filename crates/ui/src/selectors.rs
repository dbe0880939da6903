//! Stable element identifiers for the storefront
//!
//! Shared by the page objects and the simulator so the two cannot drift.

// Login page
pub const USERNAME: &str = r#"[data-test="username"]"#;
pub const PASSWORD: &str = r#"[data-test="password"]"#;
pub const LOGIN_BUTTON: &str = r#"[data-test="login-button"]"#;
pub const ERROR_MESSAGE: &str = r#"[data-test="error"]"#;

// Inventory page
pub const TITLE: &str = r#"[data-test="title"]"#;
pub const CART_BADGE: &str = r#"[data-test="shopping-cart-badge"]"#;
pub const CART_LINK: &str = r#"[data-test="shopping-cart-link"]"#;
pub const MENU_BUTTON: &str = "#react-burger-menu-btn";
pub const LOGOUT_LINK: &str = "#logout_sidebar_link";

// Cart page
pub const ITEM_NAME: &str = r#"[data-test="inventory-item-name"]"#;
pub const CHECKOUT: &str = r#"[data-test="checkout"]"#;
pub const CONTINUE_SHOPPING: &str = r#"[data-test="continue-shopping"]"#;

// Checkout pages
pub const FIRST_NAME: &str = r#"[data-test="firstName"]"#;
pub const LAST_NAME: &str = r#"[data-test="lastName"]"#;
pub const POSTAL_CODE: &str = r#"[data-test="postalCode"]"#;
pub const CONTINUE: &str = r#"[data-test="continue"]"#;
pub const FINISH: &str = r#"[data-test="finish"]"#;
pub const CANCEL: &str = r#"[data-test="cancel"]"#;
pub const COMPLETE_HEADER: &str = r#"[data-test="complete-header"]"#;
pub const COMPLETE_TEXT: &str = r#"[data-test="complete-text"]"#;
pub const BACK_HOME: &str = r#"[data-test="back-to-products"]"#;

/// Add-to-cart control for a product slug.
pub fn add_to_cart(slug: &str) -> String {
    format!(r#"[data-test="add-to-cart-{}"]"#, slug)
}

/// Remove-from-cart control for a product slug.
pub fn remove_from_cart(slug: &str) -> String {
    format!(r#"[data-test="remove-{}"]"#, slug)
}

/// Inverse of `add_to_cart`: the slug, if the selector is an add control.
pub fn parse_add_to_cart(selector: &str) -> Option<&str> {
    selector
        .strip_prefix(r#"[data-test="add-to-cart-"#)?
        .strip_suffix(r#""]"#)
}

/// Inverse of `remove_from_cart`.
pub fn parse_remove(selector: &str) -> Option<&str> {
    selector
        .strip_prefix(r#"[data-test="remove-"#)?
        .strip_suffix(r#""]"#)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_remove_selectors_round_trip() {
        let add = add_to_cart("sauce-labs-backpack");
        assert_eq!(parse_add_to_cart(&add), Some("sauce-labs-backpack"));

        let remove = remove_from_cart("sauce-labs-backpack");
        assert_eq!(parse_remove(&remove), Some("sauce-labs-backpack"));
    }

    #[test]
    fn parse_rejects_other_selectors() {
        assert_eq!(parse_add_to_cart(CART_BADGE), None);
        assert_eq!(parse_remove(LOGIN_BUTTON), None);
    }
}
