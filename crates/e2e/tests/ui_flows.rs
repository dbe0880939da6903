//! Integration tests for the page objects against the simulated storefront

use std::sync::Arc;

use storecheck_common::{CheckoutStage, ContactDetails, Error};
use storecheck_ui::pages::inventory::PAGE_TITLE;
use storecheck_ui::pages::login::{BAD_CREDENTIALS_MESSAGE, LOCKED_OUT_MESSAGE};
use storecheck_ui::{CartPage, CheckoutPage, InventoryPage, LoginPage, PageDriver, SimDriver};

const BACKPACK: &str = "Sauce Labs Backpack";
const BIKE_LIGHT: &str = "Sauce Labs Bike Light";
const BOLT_TSHIRT: &str = "Sauce Labs Bolt T-Shirt";

async fn signed_in_driver() -> Arc<dyn PageDriver> {
    let driver: Arc<dyn PageDriver> = Arc::new(SimDriver::new());
    let login = LoginPage::new(driver.clone());
    login.open().await.unwrap();
    login.sign_in("standard_user", "secret_sauce").await.unwrap();
    driver
}

#[tokio::test]
async fn successful_sign_in_lands_on_inventory() {
    let driver = signed_in_driver().await;
    let inventory = InventoryPage::new(driver.clone());
    assert_eq!(inventory.title().await.unwrap(), PAGE_TITLE);
    assert!(LoginPage::new(driver).error_message().await.unwrap().is_none());
}

#[tokio::test]
async fn locked_out_user_sees_error_and_stays_on_login() {
    let driver: Arc<dyn PageDriver> = Arc::new(SimDriver::new());
    let login = LoginPage::new(driver);
    login.open().await.unwrap();
    login.sign_in("locked_out_user", "secret_sauce").await.unwrap();

    assert_eq!(
        login.error_message().await.unwrap().as_deref(),
        Some(LOCKED_OUT_MESSAGE)
    );
    assert!(login.is_open().await.unwrap());
}

#[tokio::test]
async fn credential_mismatch_sets_the_error_indicator() {
    let driver: Arc<dyn PageDriver> = Arc::new(SimDriver::new());
    let login = LoginPage::new(driver);
    login.open().await.unwrap();
    login.sign_in("invalid_user", "wrong_password").await.unwrap();

    assert_eq!(
        login.error_message().await.unwrap().as_deref(),
        Some(BAD_CREDENTIALS_MESSAGE)
    );
}

#[tokio::test]
async fn cart_count_is_zero_without_a_badge() {
    let driver = signed_in_driver().await;
    assert_eq!(InventoryPage::new(driver).cart_count().await.unwrap(), 0);
}

#[tokio::test]
async fn count_increments_once_per_distinct_product() {
    let driver = signed_in_driver().await;
    let inventory = InventoryPage::new(driver);

    inventory.add_to_cart(BACKPACK).await.unwrap();
    assert_eq!(inventory.cart_count().await.unwrap(), 1);

    // Same product again: no-op, observed as an unchanged count.
    inventory.add_to_cart(BACKPACK).await.unwrap();
    assert_eq!(inventory.cart_count().await.unwrap(), 1);

    inventory.add_to_cart(BIKE_LIGHT).await.unwrap();
    assert_eq!(inventory.cart_count().await.unwrap(), 2);
}

#[tokio::test]
async fn cart_lists_items_in_display_order() {
    let driver = signed_in_driver().await;
    let inventory = InventoryPage::new(driver.clone());

    // Added out of display order on purpose.
    inventory.add_to_cart(BOLT_TSHIRT).await.unwrap();
    inventory.add_to_cart(BACKPACK).await.unwrap();
    inventory.go_to_cart().await.unwrap();

    let names = CartPage::new(driver).item_names().await.unwrap();
    assert_eq!(names, vec![BACKPACK.to_string(), BOLT_TSHIRT.to_string()]);
}

#[tokio::test]
async fn removing_from_the_cart_page_updates_the_listing() {
    let driver = signed_in_driver().await;
    let inventory = InventoryPage::new(driver.clone());
    inventory.add_to_cart(BACKPACK).await.unwrap();
    inventory.add_to_cart(BIKE_LIGHT).await.unwrap();
    inventory.go_to_cart().await.unwrap();

    let cart = CartPage::new(driver);
    cart.remove_item(BACKPACK).await.unwrap();
    assert_eq!(cart.item_names().await.unwrap(), vec![BIKE_LIGHT.to_string()]);
}

#[tokio::test]
async fn navigation_preserves_cart_state() {
    let driver = signed_in_driver().await;
    let inventory = InventoryPage::new(driver.clone());
    let cart = CartPage::new(driver);

    inventory.add_to_cart(BACKPACK).await.unwrap();
    inventory.add_to_cart(BIKE_LIGHT).await.unwrap();

    inventory.go_to_cart().await.unwrap();
    assert_eq!(cart.item_names().await.unwrap().len(), 2);

    cart.continue_shopping().await.unwrap();
    assert_eq!(inventory.cart_count().await.unwrap(), 2);
}

#[tokio::test]
async fn full_checkout_flow_reaches_the_confirmation_banner() {
    let driver = signed_in_driver().await;
    let inventory = InventoryPage::new(driver.clone());
    inventory.add_to_cart(BACKPACK).await.unwrap();
    inventory.go_to_cart().await.unwrap();
    CartPage::new(driver.clone()).proceed_to_checkout().await.unwrap();

    let mut checkout = CheckoutPage::new(driver.clone());
    checkout
        .submit_information(&ContactDetails::new("John", "Doe", "12345"))
        .await
        .unwrap();
    checkout.finish().await.unwrap();
    assert_eq!(checkout.stage(), CheckoutStage::Complete);
    checkout.assert_complete().await.unwrap();

    // A completed order empties the cart.
    checkout.back_to_products().await.unwrap();
    assert_eq!(InventoryPage::new(driver).cart_count().await.unwrap(), 0);
}

#[tokio::test]
async fn empty_information_fields_are_rejected_before_the_page_is_touched() {
    let driver = signed_in_driver().await;
    let inventory = InventoryPage::new(driver.clone());
    inventory.add_to_cart(BACKPACK).await.unwrap();
    inventory.go_to_cart().await.unwrap();
    CartPage::new(driver.clone()).proceed_to_checkout().await.unwrap();

    let mut checkout = CheckoutPage::new(driver);
    let result = checkout
        .submit_information(&ContactDetails::new("John", "Doe", ""))
        .await;
    match result {
        Err(Error::StateTransition { .. }) => {}
        other => panic!("expected StateTransition, got {:?}", other),
    }
    assert_eq!(checkout.stage(), CheckoutStage::Information);

    // The machine did not advance, so finishing is also rejected.
    assert!(checkout.finish().await.is_err());
}

#[tokio::test]
async fn cancel_returns_to_the_cart_with_items_intact() {
    let driver = signed_in_driver().await;
    let inventory = InventoryPage::new(driver.clone());
    inventory.add_to_cart(BACKPACK).await.unwrap();
    inventory.go_to_cart().await.unwrap();
    CartPage::new(driver.clone()).proceed_to_checkout().await.unwrap();

    let mut checkout = CheckoutPage::new(driver.clone());
    checkout
        .submit_information(&ContactDetails::new("John", "Doe", "12345"))
        .await
        .unwrap();
    checkout.cancel().await.unwrap();

    assert_eq!(checkout.stage(), CheckoutStage::Cart);
    let names = CartPage::new(driver).item_names().await.unwrap();
    assert_eq!(names, vec![BACKPACK.to_string()]);
}

#[tokio::test]
async fn assert_complete_fails_before_the_order_is_placed() {
    let driver = signed_in_driver().await;
    let inventory = InventoryPage::new(driver.clone());
    inventory.add_to_cart(BACKPACK).await.unwrap();
    inventory.go_to_cart().await.unwrap();
    CartPage::new(driver.clone()).proceed_to_checkout().await.unwrap();

    let checkout = CheckoutPage::new(driver);
    match checkout.assert_complete().await {
        Err(Error::Assertion(message)) => {
            assert!(message.contains("information"), "got: {}", message)
        }
        other => panic!("expected Assertion, got {:?}", other),
    }
}

#[tokio::test]
async fn sign_out_ends_the_session_and_clears_the_cart() {
    let driver = signed_in_driver().await;
    let inventory = InventoryPage::new(driver.clone());
    inventory.add_to_cart(BACKPACK).await.unwrap();
    inventory.sign_out().await.unwrap();

    let login = LoginPage::new(driver.clone());
    assert!(login.is_open().await.unwrap());

    login.sign_in("standard_user", "secret_sauce").await.unwrap();
    assert_eq!(InventoryPage::new(driver).cart_count().await.unwrap(), 0);
}
