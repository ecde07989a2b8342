//! Klarna checkout API client.
//!
//! Creates checkout orders against the Klarna playground or production
//! API. The response carries either an embeddable `html_snippet` or a
//! `redirect_url`; a response with neither gives the storefront nothing
//! to render and is treated as a provider failure.

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use mealkit_core::{Cart, CurrencyCode, CustomerInfo};

use crate::config::KlarnaConfig;

/// Errors that can occur when interacting with the Klarna API.
#[derive(Debug, Error)]
pub enum KlarnaError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The order response carried neither an HTML snippet nor a redirect URL.
    #[error("Order response contained nothing to render")]
    MissingRenderTarget,
}

/// Klarna checkout API client.
#[derive(Clone)]
pub struct KlarnaClient {
    client: reqwest::Client,
    api_url: String,
    username: String,
    password: SecretString,
}

impl KlarnaClient {
    /// Create a new Klarna API client with basic-auth credentials baked in.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &KlarnaConfig) -> Result<Self, KlarnaError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "Content-Type",
            HeaderValue::from_static("application/json"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    /// Create a checkout order for a cart.
    ///
    /// Line amounts are sent in minor units (öre for SEK), recomputed
    /// server-side from the cart.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails, the API rejects the order, or
    /// the response gives the storefront nothing to render.
    pub async fn create_order(
        &self,
        cart: &Cart,
        customer: &CustomerInfo,
    ) -> Result<KlarnaOrder, KlarnaError> {
        let url = format!("{}/checkout/v3/orders", self.api_url);
        let body = CreateOrderRequest::from_cart(cart, customer);

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.username, Some(self.password.expose_secret()))
            .json(&body)
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(KlarnaError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let order: KlarnaOrder = response
            .json()
            .await
            .map_err(|e| KlarnaError::Parse(e.to_string()))?;

        order.require_render_target()
    }
}

/// Request body for creating a checkout order.
#[derive(Debug, Serialize)]
struct CreateOrderRequest {
    purchase_currency: &'static str,
    order_amount: i64,
    order_lines: Vec<OrderLine>,
    billing_address: BillingAddress,
}

impl CreateOrderRequest {
    fn from_cart(cart: &Cart, customer: &CustomerInfo) -> Self {
        let order_lines: Vec<OrderLine> = cart
            .items()
            .iter()
            .map(|item| OrderLine {
                name: item.name.clone(),
                quantity: item.quantity,
                unit_price: item.price.minor_units(),
                total_amount: item.price.minor_units() * i64::from(item.quantity),
            })
            .collect();
        let order_amount = order_lines.iter().map(|line| line.total_amount).sum();

        Self {
            purchase_currency: CurrencyCode::default().code(),
            order_amount,
            order_lines,
            billing_address: BillingAddress {
                given_name: customer.first_name.clone(),
                family_name: customer.last_name.clone(),
                email: customer.email.clone(),
                street_address: customer.address.clone(),
                postal_code: customer.postal_code.clone(),
                city: customer.city.clone(),
                country: customer.country.clone(),
                phone: customer.phone.clone(),
            },
        }
    }
}

/// One cart line in Klarna's wire format, amounts in minor units.
#[derive(Debug, Serialize)]
struct OrderLine {
    name: String,
    quantity: u32,
    unit_price: i64,
    total_amount: i64,
}

/// Billing address in Klarna's wire format.
#[derive(Debug, Serialize)]
struct BillingAddress {
    given_name: String,
    family_name: String,
    email: String,
    street_address: String,
    postal_code: String,
    city: String,
    country: String,
    phone: String,
}

/// A created checkout order.
#[derive(Debug, Clone, Deserialize)]
pub struct KlarnaOrder {
    /// Klarna's own order reference.
    pub order_id: Option<String>,
    /// Embeddable checkout widget markup.
    pub html_snippet: Option<String>,
    /// Hosted checkout page to send the customer to.
    pub redirect_url: Option<String>,
}

impl KlarnaOrder {
    /// Reject an order the storefront cannot act on.
    ///
    /// # Errors
    ///
    /// Returns `KlarnaError::MissingRenderTarget` when the response carries
    /// neither an HTML snippet nor a redirect URL.
    pub fn require_render_target(self) -> Result<Self, KlarnaError> {
        if self.html_snippet.is_none() && self.redirect_url.is_none() {
            return Err(KlarnaError::MissingRenderTarget);
        }
        Ok(self)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    use mealkit_core::{CartItem, MealId, Price};

    fn customer() -> CustomerInfo {
        CustomerInfo {
            first_name: "Astrid".to_string(),
            last_name: "Lind".to_string(),
            email: "astrid@example.com".to_string(),
            address: "Storgatan 1".to_string(),
            postal_code: "11122".to_string(),
            city: "Stockholm".to_string(),
            country: "SE".to_string(),
            phone: "+46701234567".to_string(),
        }
    }

    #[test]
    fn test_order_request_amounts_in_minor_units() {
        let cart = Cart::from_items(vec![CartItem {
            id: MealId::new(),
            name: "Veggie Box".to_string(),
            image: None,
            price: Price::from_amount(Decimal::new(12950, 2)),
            quantity: 2,
        }]);

        let request = CreateOrderRequest::from_cart(&cart, &customer());

        assert_eq!(request.purchase_currency, "SEK");
        assert_eq!(request.order_lines.len(), 1);
        assert_eq!(request.order_lines[0].unit_price, 12950);
        assert_eq!(request.order_lines[0].total_amount, 25900);
        assert_eq!(request.order_amount, 25900);
    }

    #[test]
    fn test_order_response_with_snippet_parses() {
        let json = r#"{
            "order_id": "abc123",
            "html_snippet": "<div id=\"klarna-checkout\"></div>"
        }"#;

        let order: KlarnaOrder = serde_json::from_str(json).unwrap();
        assert_eq!(order.order_id.as_deref(), Some("abc123"));
        assert!(order.html_snippet.is_some());
        assert!(order.redirect_url.is_none());
    }

    #[test]
    fn test_order_response_with_redirect_parses() {
        let json = r#"{ "redirect_url": "https://checkout.example.com/abc" }"#;

        let order: KlarnaOrder = serde_json::from_str(json).unwrap();
        assert!(order.order_id.is_none());
        assert!(order.redirect_url.is_some());
    }

    #[test]
    fn test_order_without_render_target_is_rejected() {
        let json = r#"{ "order_id": "abc123" }"#;

        let order: KlarnaOrder = serde_json::from_str(json).unwrap();
        assert!(matches!(
            order.require_render_target(),
            Err(KlarnaError::MissingRenderTarget)
        ));
    }

    #[test]
    fn test_order_with_snippet_passes_render_check() {
        let order = KlarnaOrder {
            order_id: Some("abc123".to_string()),
            html_snippet: Some("<div></div>".to_string()),
            redirect_url: None,
        };
        let order = order.require_render_target().unwrap();
        assert!(order.html_snippet.is_some());
    }

    #[test]
    fn test_order_with_redirect_passes_render_check() {
        let order = KlarnaOrder {
            order_id: None,
            html_snippet: None,
            redirect_url: Some("https://checkout.example.com/abc".to_string()),
        };
        assert!(order.require_render_target().is_ok());
    }
}
