//! Payment provider client for checkout-session creation.
//!
//! Sends a priced order to the provider's test API and returns the hosted
//! checkout redirect URL. The client never mutates local state: the caller
//! owns the debit/compensate sequencing around this call.

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::Deserialize;
use thiserror::Error;

use sandbar_core::CheckoutResult;

use crate::config::PaymentConfig;

/// Errors that can occur when creating a checkout session.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to build the client or parse the response.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// A created checkout session.
#[derive(Debug, Deserialize)]
struct Session {
    /// Hosted payment page the client is redirected to.
    url: String,
}

/// Payment provider API client.
#[derive(Clone)]
pub struct PaymentClient {
    mode: Mode,
}

#[derive(Clone)]
enum Mode {
    /// Real provider test API.
    Http {
        client: reqwest::Client,
        api_url: String,
        success_url: String,
        cancel_url: String,
    },
    /// No provider call; checkout redirects straight to the success URL.
    /// Used in tests and local runs without provider credentials. With
    /// `decline` set, every session creation fails as the provider would
    /// decline it, so callers can exercise their failure handling.
    Mock { success_url: String, decline: bool },
}

impl PaymentClient {
    /// Create a new payment client from configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build or if provider
    /// credentials are missing in non-mock mode.
    pub fn new(config: &PaymentConfig) -> Result<Self, PaymentError> {
        if config.mock {
            return Ok(Self {
                mode: Mode::Mock {
                    success_url: config.success_url.clone(),
                    decline: config.mock_decline,
                },
            });
        }

        let api_url = config
            .api_url
            .as_ref()
            .ok_or_else(|| PaymentError::Parse("payment API URL not configured".to_string()))?;
        let api_key = config
            .api_key
            .as_ref()
            .ok_or_else(|| PaymentError::Parse("payment API key not configured".to_string()))?;

        let mut headers = HeaderMap::new();
        let auth_value = format!("Bearer {}", api_key.expose_secret());
        headers.insert(
            "Authorization",
            HeaderValue::from_str(&auth_value)
                .map_err(|e| PaymentError::Parse(format!("Invalid API key format: {e}")))?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            mode: Mode::Http {
                client,
                api_url: api_url.trim_end_matches('/').to_string(),
                success_url: config.success_url.clone(),
                cancel_url: config.cancel_url.clone(),
            },
        })
    }

    /// Create a checkout session for a priced order.
    ///
    /// Returns the redirect URL of the hosted payment page.
    ///
    /// # Errors
    ///
    /// Returns error if the provider call fails or responds with a
    /// non-success status.
    pub async fn create_session(&self, order: &CheckoutResult) -> Result<String, PaymentError> {
        match &self.mode {
            Mode::Mock { decline: true, .. } => Err(PaymentError::Api {
                status: 402,
                message: "mock provider declined the session".to_string(),
            }),
            Mode::Mock {
                success_url,
                decline: false,
            } => Ok(success_url.clone()),
            Mode::Http {
                client,
                api_url,
                success_url,
                cancel_url,
            } => {
                let url = format!("{api_url}/checkout/sessions");
                let body = session_body(order, success_url, cancel_url);

                let response = client.post(&url).json(&body).send().await?;
                let status = response.status();

                if !status.is_success() {
                    let message = response.text().await.unwrap_or_default();
                    return Err(PaymentError::Api {
                        status: status.as_u16(),
                        message,
                    });
                }

                let session: Session = response
                    .json()
                    .await
                    .map_err(|e| PaymentError::Parse(e.to_string()))?;
                Ok(session.url)
            }
        }
    }
}

/// Build the session-creation request body from a priced order.
fn session_body(
    order: &CheckoutResult,
    success_url: &str,
    cancel_url: &str,
) -> serde_json::Value {
    let line_items: Vec<serde_json::Value> = order
        .line_items
        .iter()
        .map(|item| {
            serde_json::json!({
                "price_data": {
                    "currency": "usd",
                    "product_data": { "name": item.name },
                    "unit_amount": item.unit_cost.minor_units(),
                },
                "quantity": item.qty,
            })
        })
        .collect();

    serde_json::json!({
        "mode": "payment",
        "payment_method_types": ["card"],
        "line_items": line_items,
        "success_url": success_url,
        "cancel_url": cancel_url,
    })
}
