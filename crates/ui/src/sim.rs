//! In-memory storefront simulator
//!
//! Implements the storefront's page contract behind `PageDriver` without a
//! browser: the same selectors, error banners, and state transitions, held
//! in memory. Used for hermetic suite runs and for testing the page
//! objects themselves.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use storecheck_common::{CartState, Error, Result};

use crate::catalog;
use crate::driver::{DriverConfig, DriverFactory, PageDriver};
use crate::pages::checkout::{COMPLETE_BANNER, DISPATCHED_TEXT};
use crate::pages::inventory::PAGE_TITLE;
use crate::pages::login::{BAD_CREDENTIALS_MESSAGE, LOCKED_OUT_MESSAGE};
use crate::selectors;

/// Accounts the storefront knows about
const KNOWN_USERS: &[&str] = &[
    "standard_user",
    "problem_user",
    "performance_glitch_user",
    "error_user",
    "visual_user",
];

const LOCKED_OUT_USER: &str = "locked_out_user";
const VALID_PASSWORD: &str = "secret_sauce";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum SimPage {
    #[default]
    Login,
    Inventory,
    Cart,
    CheckoutInformation,
    CheckoutOverview,
    CheckoutComplete,
}

#[derive(Debug, Default)]
struct SimState {
    authed: bool,
    page: SimPage,
    menu_open: bool,
    fields: HashMap<&'static str, String>,
    cart: CartState,
    error: Option<String>,
}

impl SimState {
    fn attempt_login(&mut self) {
        let username = self.fields.get(selectors::USERNAME).cloned().unwrap_or_default();
        let password = self.fields.get(selectors::PASSWORD).cloned().unwrap_or_default();

        if username == LOCKED_OUT_USER && password == VALID_PASSWORD {
            self.error = Some(LOCKED_OUT_MESSAGE.to_string());
        } else if KNOWN_USERS.contains(&username.as_str()) && password == VALID_PASSWORD {
            self.authed = true;
            self.page = SimPage::Inventory;
            self.error = None;
            self.fields.clear();
        } else {
            self.error = Some(BAD_CREDENTIALS_MESSAGE.to_string());
        }
    }

    fn submit_checkout_information(&mut self) {
        let field = |state: &SimState, key| state.fields.get(key).cloned().unwrap_or_default();
        if field(self, selectors::FIRST_NAME).is_empty() {
            self.error = Some("Error: First Name is required".to_string());
        } else if field(self, selectors::LAST_NAME).is_empty() {
            self.error = Some("Error: Last Name is required".to_string());
        } else if field(self, selectors::POSTAL_CODE).is_empty() {
            self.error = Some("Error: Postal Code is required".to_string());
        } else {
            self.error = None;
            self.page = SimPage::CheckoutOverview;
        }
    }
}

/// Simulated storefront behind the page contract
#[derive(Default)]
pub struct SimDriver {
    state: Mutex<SimState>,
}

impl SimDriver {
    pub fn new() -> Self {
        Self::default()
    }

    fn no_element(selector: &str) -> Error {
        Error::Driver(format!("no interactable element matches {}", selector))
    }
}

#[async_trait]
impl PageDriver for SimDriver {
    async fn goto(&self, path: &str) -> Result<()> {
        if path != "/" {
            return Err(Error::Driver(format!("unknown route: {}", path)));
        }
        let mut st = self.state.lock();
        st.page = if st.authed {
            SimPage::Inventory
        } else {
            SimPage::Login
        };
        st.menu_open = false;
        st.error = None;
        Ok(())
    }

    async fn click(&self, selector: &str) -> Result<()> {
        let mut st = self.state.lock();
        match selector {
            s if s == selectors::LOGIN_BUTTON && st.page == SimPage::Login => {
                st.attempt_login();
            }
            s if s == selectors::MENU_BUTTON && st.authed => {
                st.menu_open = true;
            }
            s if s == selectors::LOGOUT_LINK && st.menu_open => {
                // Session end clears everything, the cart included.
                *st = SimState::default();
            }
            s if s == selectors::CART_LINK && st.authed && st.page == SimPage::Inventory => {
                st.page = SimPage::Cart;
            }
            s if s == selectors::CHECKOUT && st.page == SimPage::Cart => {
                st.page = SimPage::CheckoutInformation;
                st.error = None;
            }
            s if s == selectors::CONTINUE_SHOPPING && st.page == SimPage::Cart => {
                st.page = SimPage::Inventory;
            }
            s if s == selectors::CONTINUE && st.page == SimPage::CheckoutInformation => {
                st.submit_checkout_information();
            }
            s if s == selectors::FINISH && st.page == SimPage::CheckoutOverview => {
                st.page = SimPage::CheckoutComplete;
                st.cart.clear();
            }
            s if s == selectors::CANCEL && st.page == SimPage::CheckoutOverview => {
                st.page = SimPage::Cart;
            }
            s if s == selectors::BACK_HOME && st.page == SimPage::CheckoutComplete => {
                st.page = SimPage::Inventory;
            }
            s => {
                if let Some(slug) = selectors::parse_add_to_cart(s) {
                    if st.page != SimPage::Inventory {
                        return Err(Self::no_element(selector));
                    }
                    let name = catalog::display_name(slug)
                        .ok_or_else(|| Self::no_element(selector))?;
                    // Re-clicking an already-added product is a no-op; the
                    // count is observed unchanged.
                    st.cart.add(name);
                } else if let Some(slug) = selectors::parse_remove(s) {
                    if st.page != SimPage::Inventory && st.page != SimPage::Cart {
                        return Err(Self::no_element(selector));
                    }
                    let name = catalog::display_name(slug)
                        .ok_or_else(|| Self::no_element(selector))?;
                    if !st.cart.remove(name) {
                        // The remove control only exists for items in the
                        // cart.
                        return Err(Self::no_element(selector));
                    }
                } else {
                    return Err(Self::no_element(selector));
                }
            }
        }
        Ok(())
    }

    async fn fill(&self, selector: &str, value: &str) -> Result<()> {
        let mut st = self.state.lock();
        let key = match st.page {
            SimPage::Login if selector == selectors::USERNAME => selectors::USERNAME,
            SimPage::Login if selector == selectors::PASSWORD => selectors::PASSWORD,
            SimPage::CheckoutInformation if selector == selectors::FIRST_NAME => {
                selectors::FIRST_NAME
            }
            SimPage::CheckoutInformation if selector == selectors::LAST_NAME => {
                selectors::LAST_NAME
            }
            SimPage::CheckoutInformation if selector == selectors::POSTAL_CODE => {
                selectors::POSTAL_CODE
            }
            _ => return Err(Self::no_element(selector)),
        };
        st.fields.insert(key, value.to_string());
        Ok(())
    }

    async fn text(&self, selector: &str) -> Result<String> {
        let st = self.state.lock();
        match selector {
            s if s == selectors::TITLE && st.page == SimPage::Inventory => {
                Ok(PAGE_TITLE.to_string())
            }
            s if s == selectors::CART_BADGE && st.authed && st.cart.count() > 0 => {
                Ok(st.cart.count().to_string())
            }
            s if s == selectors::ERROR_MESSAGE => st
                .error
                .clone()
                .ok_or_else(|| Self::no_element(selector)),
            s if s == selectors::COMPLETE_HEADER && st.page == SimPage::CheckoutComplete => {
                Ok(COMPLETE_BANNER.to_string())
            }
            s if s == selectors::COMPLETE_TEXT && st.page == SimPage::CheckoutComplete => {
                Ok(DISPATCHED_TEXT.to_string())
            }
            _ => Err(Self::no_element(selector)),
        }
    }

    async fn texts(&self, selector: &str) -> Result<Vec<String>> {
        let st = self.state.lock();
        if selector == selectors::ITEM_NAME && st.page == SimPage::Cart {
            // Display order, not insertion order.
            let mut names: Vec<String> = st.cart.items().map(str::to_string).collect();
            names.sort_by_key(|name| catalog::display_rank(name));
            return Ok(names);
        }
        Err(Self::no_element(selector))
    }

    async fn is_visible(&self, selector: &str) -> Result<bool> {
        let st = self.state.lock();
        let visible = match selector {
            s if s == selectors::ERROR_MESSAGE => st.error.is_some(),
            s if s == selectors::CART_BADGE => st.authed && st.cart.count() > 0,
            s if s == selectors::COMPLETE_HEADER => st.page == SimPage::CheckoutComplete,
            s if s == selectors::LOGIN_BUTTON => st.page == SimPage::Login,
            s if s == selectors::TITLE => st.page == SimPage::Inventory,
            s if s == selectors::CHECKOUT => st.page == SimPage::Cart,
            s if s == selectors::FINISH || s == selectors::CANCEL => {
                st.page == SimPage::CheckoutOverview
            }
            _ => false,
        };
        Ok(visible)
    }

    async fn screenshot(&self) -> Result<Vec<u8>> {
        // Textual snapshot: the simulator has no pixels to render.
        let st = self.state.lock();
        let dump = format!(
            "page: {:?}\nauthed: {}\ncart: {:?}\nerror: {:?}\n",
            st.page,
            st.authed,
            st.cart.items().collect::<Vec<_>>(),
            st.error
        );
        Ok(dump.into_bytes())
    }

    async fn close(&self) -> Result<Option<PathBuf>> {
        Ok(None)
    }
}

/// Factory producing fresh simulators
pub struct SimDriverFactory;

#[async_trait]
impl DriverFactory for SimDriverFactory {
    async fn create(&self, _config: DriverConfig) -> Result<Arc<dyn PageDriver>> {
        Ok(Arc::new(SimDriver::new()))
    }
}
