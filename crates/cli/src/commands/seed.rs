//! Seed the data directory with a demo catalog and demo users.
//!
//! Writes `products.json` (always refreshed) and `users.json` (kept
//! unless `--force`, so existing carts and balances survive a reseed).
//! Each demo user gets a random bearer token; the storefront has no
//! token-issuance endpoint, so this is where API credentials come from.

use std::path::Path;

use chrono::Utc;
use rand::{Rng, distr::Alphanumeric};
use tracing::info;
use uuid::Uuid;

use sandbar_core::{Address, AddressId, Money, Product, ProductId, User, UserId};

/// Length of generated bearer tokens.
const TOKEN_LEN: usize = 32;

/// Run the seed command.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or a file cannot
/// be written.
pub async fn run(data_dir: &Path, force: bool) -> Result<(), Box<dyn std::error::Error>> {
    tokio::fs::create_dir_all(data_dir).await?;

    let products_path = data_dir.join("products.json");
    let products = demo_catalog();
    tokio::fs::write(&products_path, serde_json::to_vec_pretty(&products)?).await?;
    info!(count = products.len(), path = %products_path.display(), "catalog written");

    let users_path = data_dir.join("users.json");
    if users_path.exists() && !force {
        info!(path = %users_path.display(), "users.json exists, keeping it (use --force to overwrite)");
        return Ok(());
    }

    let users = demo_users();
    tokio::fs::write(&users_path, serde_json::to_vec_pretty(&users)?).await?;
    info!(count = users.len(), path = %users_path.display(), "users written");
    for user in &users {
        // Tokens are only ever visible here; the API never returns them.
        info!(
            username = %user.username,
            token = user.token.as_deref().unwrap_or(""),
            balance = %user.balance,
            "demo user ready"
        );
    }

    Ok(())
}

/// Generate a random bearer token.
fn generate_token() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LEN)
        .map(char::from)
        .collect()
}

fn product(name: &str, category: &str, cost: i64, rating: u8, image: &str) -> Product {
    Product {
        id: ProductId::new(Uuid::new_v4().simple().to_string()),
        name: name.to_owned(),
        category: category.to_owned(),
        cost: Money::from_minor(cost),
        rating,
        image_url: image.to_owned(),
    }
}

fn demo_catalog() -> Vec<Product> {
    vec![
        product(
            "Tan Leatherette Weekender Duffle",
            "Fashion",
            100,
            4,
            "https://crio-directus-assets.s3.ap-south-1.amazonaws.com/66166973f9e6.png",
        ),
        product(
            "The Minimalist Slim Leather Watch",
            "Fashion",
            250,
            5,
            "https://crio-directus-assets.s3.ap-south-1.amazonaws.com/5b478a4bb1d7.png",
        ),
        product(
            "YONEX Smash Badminton Racquet",
            "Sports",
            100,
            5,
            "https://crio-directus-assets.s3.ap-south-1.amazonaws.com/64b930f7c911.png",
        ),
        product(
            "Stylecon 9 Seater RHS Sofa Set",
            "Home & Living",
            380,
            4,
            "https://crio-directus-assets.s3.ap-south-1.amazonaws.com/e5fecf459f91.png",
        ),
        product(
            "Centaur Rocking Chair",
            "Home & Living",
            220,
            3,
            "https://crio-directus-assets.s3.ap-south-1.amazonaws.com/1f8adf7b0cf1.png",
        ),
    ]
}

fn demo_users() -> Vec<User> {
    vec![
        User {
            id: UserId::new(Uuid::new_v4().simple().to_string()),
            username: "crio.do".to_owned(),
            balance: Money::from_minor(5000),
            cart: Vec::new(),
            addresses: vec![Address {
                id: AddressId::new(Uuid::new_v4().simple().to_string()),
                street: "221B Baker Street, London".to_owned(),
            }],
            token: Some(generate_token()),
            created_at: Utc::now(),
        },
        User {
            id: UserId::new(Uuid::new_v4().simple().to_string()),
            username: "bobby".to_owned(),
            balance: Money::from_minor(500),
            cart: Vec::new(),
            addresses: Vec::new(),
            token: Some(generate_token()),
            created_at: Utc::now(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_tokens_are_unique_and_sized() {
        let a = generate_token();
        let b = generate_token();
        assert_eq!(a.len(), TOKEN_LEN);
        assert_eq!(b.len(), TOKEN_LEN);
        assert_ne!(a, b);
    }

    #[test]
    fn test_demo_catalog_has_unique_ids() {
        let catalog = demo_catalog();
        let mut ids: Vec<&str> = catalog.iter().map(|p| p.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), catalog.len());
    }
}
