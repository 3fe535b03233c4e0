/// A generated product row.
#[derive(Debug, Clone)]
pub struct ProductSeed {
    pub name: String,
    pub price: f64,
    pub description: String,
    pub category: String,
    pub stock: i32,
}

/// How much fake data to generate.
#[derive(Debug, Clone)]
pub struct SeedConfig {
    pub products: usize,
    /// Categories products are spread across
    pub categories: Vec<String>,
}

impl SeedConfig {
    pub fn new(products: usize) -> Self {
        Self {
            products,
            ..Default::default()
        }
    }
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            products: 50,
            categories: [
                "Electronics",
                "Books",
                "Home",
                "Garden",
                "Clothing",
                "Sports",
                "Toys",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }
}
