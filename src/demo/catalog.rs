// Seed data for the demo backend
//
// A small but realistic catalog: a handful of users with category
// preferences and ~25 products spread over seven categories. Ids are short
// stable strings so logs stay readable.

use crate::api::Product;

/// A registered user as the demo backend stores it
#[derive(Debug, Clone)]
pub struct DemoUser {
    pub id: String,
    pub username: String,
    pub email: String,
    /// Plain text - the demo never leaves localhost
    pub password: String,
    pub preferences: Vec<String>,
}

/// A recorded interaction
#[derive(Debug, Clone)]
pub struct StoredInteraction {
    pub user_id: String,
    pub product_id: String,
    pub kind: String,
}

/// In-memory backing store for the demo server
#[derive(Debug, Default)]
pub struct DemoStore {
    pub users: Vec<DemoUser>,
    pub products: Vec<Product>,
    pub interactions: Vec<StoredInteraction>,
}

impl DemoStore {
    /// Store populated with the seed users and catalog
    pub fn seeded() -> Self {
        let users = SEED_USERS
            .iter()
            .enumerate()
            .map(|(i, (username, prefs))| DemoUser {
                id: format!("u{:03}", i + 1),
                username: username.to_string(),
                email: format!("{}@example.com", username),
                password: "password123".to_string(),
                preferences: prefs.iter().map(|p| p.to_string()).collect(),
            })
            .collect();

        let products = SEED_PRODUCTS
            .iter()
            .enumerate()
            .map(|(i, (name, description, category, price))| Product {
                id: format!("p{:03}", i + 1),
                name: name.to_string(),
                description: description.to_string(),
                category: category.to_string(),
                price: *price,
                image_url: format!(
                    "https://via.placeholder.com/300x300?text={}",
                    name.replace(' ', "+")
                ),
                recommendation_score: None,
            })
            .collect();

        Self {
            users,
            products,
            interactions: Vec::new(),
        }
    }

    pub fn user(&self, id: &str) -> Option<&DemoUser> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn user_by_email(&self, email: &str) -> Option<&DemoUser> {
        self.users.iter().find(|u| u.email.eq_ignore_ascii_case(email))
    }

    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Distinct categories in catalog order
    pub fn categories(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for product in &self.products {
            if !seen.contains(&product.category) {
                seen.push(product.category.clone());
            }
        }
        seen
    }

    /// Case-insensitive substring search over name and description,
    /// exact category match, capped at `limit`
    pub fn search(&self, search: Option<&str>, category: Option<&str>, limit: usize) -> Vec<Product> {
        let needle = search.map(str::to_lowercase);
        self.products
            .iter()
            .filter(|p| category.map_or(true, |c| p.category == c))
            .filter(|p| {
                needle.as_deref().map_or(true, |n| {
                    p.name.to_lowercase().contains(n) || p.description.to_lowercase().contains(n)
                })
            })
            .take(limit)
            .cloned()
            .collect()
    }
}

const SEED_USERS: &[(&str, &[&str])] = &[
    ("alice", &["Electronics", "Books"]),
    ("bob", &["Clothing", "Sports"]),
    ("charlie", &["Home & Garden", "Electronics"]),
    ("diana", &["Beauty", "Clothing"]),
];

const SEED_PRODUCTS: &[(&str, &str, &str, f64)] = &[
    ("Laptop Pro 15", "High-performance laptop for professionals", "Electronics", 1299.99),
    ("Smartphone X", "Latest smartphone with amazing camera", "Electronics", 899.99),
    ("Wireless Headphones", "Noise-cancelling wireless headphones", "Electronics", 249.99),
    ("Smart Watch", "Fitness tracking smartwatch", "Electronics", 399.99),
    ("Tablet 10\"", "Portable tablet for work and play", "Electronics", 499.99),
    ("Python Programming Guide", "Complete guide to Python programming", "Books", 49.99),
    ("Data Science Handbook", "Master data science techniques", "Books", 59.99),
    ("Machine Learning Basics", "Introduction to ML algorithms", "Books", 44.99),
    ("Web Development 101", "Learn modern web development", "Books", 39.99),
    ("Cotton T-Shirt", "Comfortable cotton t-shirt", "Clothing", 24.99),
    ("Denim Jeans", "Classic blue denim jeans", "Clothing", 59.99),
    ("Winter Jacket", "Warm winter jacket", "Clothing", 129.99),
    ("Running Shoes", "Lightweight running shoes", "Clothing", 89.99),
    ("Yoga Mat", "Non-slip yoga mat", "Sports", 29.99),
    ("Dumbbell Set", "Adjustable dumbbell set", "Sports", 149.99),
    ("Basketball", "Official size basketball", "Sports", 34.99),
    ("Tennis Racket", "Professional tennis racket", "Sports", 119.99),
    ("Coffee Maker", "Automatic coffee maker", "Home & Garden", 79.99),
    ("Plant Pot Set", "Set of ceramic plant pots", "Home & Garden", 39.99),
    ("LED Desk Lamp", "Adjustable LED desk lamp", "Home & Garden", 49.99),
    ("Facial Cream", "Moisturizing facial cream", "Beauty", 34.99),
    ("Makeup Kit", "Complete makeup kit", "Beauty", 89.99),
    ("Hair Dryer", "Professional hair dryer", "Beauty", 69.99),
    ("Building Blocks Set", "Creative building blocks", "Toys", 44.99),
    ("Board Game Collection", "Family board game", "Toys", 29.99),
];
