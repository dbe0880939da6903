//! Storefront UI scenarios
//!
//! Each scenario signs in through its own fresh driver; the cart and the
//! checkout flow are exercised through the page objects only.

use std::sync::Arc;

use anyhow::ensure;

use storecheck_common::ContactDetails;
use storecheck_ui::pages::checkout::DISPATCHED_TEXT;
use storecheck_ui::pages::inventory::PAGE_TITLE;
use storecheck_ui::pages::login::{BAD_CREDENTIALS_MESSAGE, LOCKED_OUT_MESSAGE};
use storecheck_ui::{CartPage, CheckoutPage, InventoryPage, LoginPage, PageDriver};

use crate::fixtures;
use crate::scenario::{Project, Scenario, ScenarioContext};

async fn sign_in_standard(ctx: &ScenarioContext) -> anyhow::Result<Arc<dyn PageDriver>> {
    let driver = ctx.page_driver().await?;
    let login = LoginPage::new(driver.clone());
    login.open().await?;
    login
        .sign_in(fixtures::STANDARD_USER.username, fixtures::STANDARD_USER.password)
        .await?;

    let inventory = InventoryPage::new(driver.clone());
    ensure!(
        inventory.title().await? == PAGE_TITLE,
        "sign-in must land on the product listing"
    );
    Ok(driver)
}

pub fn scenarios() -> Vec<Scenario> {
    vec![
        Scenario::new("ui-sign-in-standard-user", Project::Ui, &["smoke"], |ctx| async move {
            let driver = sign_in_standard(&ctx).await?;
            let login = LoginPage::new(driver);
            ensure!(
                login.error_message().await?.is_none(),
                "no error indicator after a successful sign-in"
            );
            Ok(())
        }),
        Scenario::new("ui-sign-in-locked-out", Project::Ui, &["regression"], |ctx| async move {
            let driver = ctx.page_driver().await?;
            let login = LoginPage::new(driver);
            login.open().await?;
            login
                .sign_in(fixtures::LOCKED_OUT_USER.username, fixtures::LOCKED_OUT_USER.password)
                .await?;

            let message = login.error_message().await?;
            ensure!(
                message.as_deref() == Some(LOCKED_OUT_MESSAGE),
                "locked-out account must leave the error indicator visible, got {:?}",
                message
            );
            ensure!(login.is_open().await?, "failed sign-in stays on the login page");
            Ok(())
        }),
        Scenario::new(
            "ui-sign-in-bad-credentials",
            Project::Ui,
            &["regression"],
            |ctx| async move {
                let driver = ctx.page_driver().await?;
                let login = LoginPage::new(driver);
                login.open().await?;
                login.sign_in("invalid_user", "wrong_password").await?;

                let message = login.error_message().await?;
                ensure!(
                    message.as_deref() == Some(BAD_CREDENTIALS_MESSAGE),
                    "credential mismatch must leave the error indicator visible, got {:?}",
                    message
                );
                Ok(())
            },
        ),
        Scenario::new("ui-sign-out", Project::Ui, &["smoke"], |ctx| async move {
            let driver = sign_in_standard(&ctx).await?;
            let inventory = InventoryPage::new(driver.clone());
            inventory.sign_out().await?;

            let login = LoginPage::new(driver);
            ensure!(login.is_open().await?, "sign-out must return to the login page");
            Ok(())
        }),
        Scenario::new(
            "ui-sign-in-after-sign-out",
            Project::Ui,
            &["regression"],
            |ctx| async move {
                let driver = sign_in_standard(&ctx).await?;
                InventoryPage::new(driver.clone()).sign_out().await?;

                let login = LoginPage::new(driver.clone());
                ensure!(login.is_open().await?);
                login
                    .sign_in(fixtures::STANDARD_USER.username, fixtures::STANDARD_USER.password)
                    .await?;
                ensure!(InventoryPage::new(driver).title().await? == PAGE_TITLE);
                Ok(())
            },
        ),
        Scenario::new("ui-add-to-cart-badge", Project::Ui, &["regression"], |ctx| async move {
            let driver = sign_in_standard(&ctx).await?;
            let inventory = InventoryPage::new(driver);

            ensure!(inventory.cart_count().await? == 0, "cart starts empty");
            inventory.add_to_cart(fixtures::BACKPACK).await?;
            ensure!(inventory.cart_count().await? == 1, "badge must read 1 after one add");
            Ok(())
        }),
        Scenario::new("ui-add-multiple-items", Project::Ui, &["regression"], |ctx| async move {
            let driver = sign_in_standard(&ctx).await?;
            let inventory = InventoryPage::new(driver.clone());

            inventory.add_to_cart(fixtures::BACKPACK).await?;
            inventory.add_to_cart(fixtures::BIKE_LIGHT).await?;
            inventory.add_to_cart(fixtures::BOLT_TSHIRT).await?;
            ensure!(inventory.cart_count().await? == 3);

            inventory.go_to_cart().await?;
            let names = CartPage::new(driver).item_names().await?;
            ensure!(names.len() == 3);
            for expected in [fixtures::BACKPACK, fixtures::BIKE_LIGHT, fixtures::BOLT_TSHIRT] {
                ensure!(
                    names.iter().any(|n| n == expected),
                    "cart must list {}",
                    expected
                );
            }
            Ok(())
        }),
        Scenario::new("ui-remove-from-cart", Project::Ui, &["regression"], |ctx| async move {
            let driver = sign_in_standard(&ctx).await?;
            let inventory = InventoryPage::new(driver.clone());

            inventory.add_to_cart(fixtures::BACKPACK).await?;
            inventory.add_to_cart(fixtures::BIKE_LIGHT).await?;
            ensure!(inventory.cart_count().await? == 2);

            inventory.go_to_cart().await?;
            let cart = CartPage::new(driver);
            cart.remove_item(fixtures::BACKPACK).await?;

            let names = cart.item_names().await?;
            ensure!(names == vec![fixtures::BIKE_LIGHT.to_string()]);
            Ok(())
        }),
        Scenario::new("ui-full-checkout", Project::Ui, &["smoke"], |ctx| async move {
            let driver = sign_in_standard(&ctx).await?;
            let inventory = InventoryPage::new(driver.clone());

            inventory.add_to_cart(fixtures::BACKPACK).await?;
            ensure!(inventory.cart_count().await? == 1);
            inventory.go_to_cart().await?;

            CartPage::new(driver.clone()).proceed_to_checkout().await?;

            let mut checkout = CheckoutPage::new(driver);
            checkout
                .submit_information(&ContactDetails::new("John", "Doe", "12345"))
                .await?;
            checkout.finish().await?;

            checkout.assert_complete().await?;
            ensure!(
                checkout.completion_text().await? == DISPATCHED_TEXT,
                "confirmation body text must match"
            );
            Ok(())
        }),
        Scenario::new("ui-continue-shopping", Project::Ui, &["regression"], |ctx| async move {
            let driver = sign_in_standard(&ctx).await?;
            let inventory = InventoryPage::new(driver.clone());

            inventory.add_to_cart(fixtures::BACKPACK).await?;
            inventory.go_to_cart().await?;
            CartPage::new(driver.clone()).continue_shopping().await?;

            let inventory = InventoryPage::new(driver);
            ensure!(inventory.title().await? == PAGE_TITLE);
            ensure!(inventory.cart_count().await? == 1, "cart survives the round trip");
            Ok(())
        }),
        Scenario::new(
            "ui-cart-persists-across-navigation",
            Project::Ui,
            &["regression"],
            |ctx| async move {
                let driver = sign_in_standard(&ctx).await?;
                let inventory = InventoryPage::new(driver.clone());
                let cart = CartPage::new(driver.clone());

                inventory.add_to_cart(fixtures::BACKPACK).await?;
                inventory.add_to_cart(fixtures::BIKE_LIGHT).await?;

                inventory.go_to_cart().await?;
                ensure!(cart.item_names().await?.len() == 2);

                cart.continue_shopping().await?;
                ensure!(inventory.cart_count().await? == 2);

                inventory.go_to_cart().await?;
                ensure!(cart.item_names().await?.len() == 2);
                Ok(())
            },
        ),
    ]
}
