//! Built-in demo catalog data.

use shopfront_core::{CategoryId, Price, ProductId};

use crate::models::{Category, Product};

struct ProductSeed {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    cents: u32,
    old_cents: Option<u32>,
    rating: f32,
    review_count: u32,
    category: &'static str,
    image: &'static str,
    in_stock: bool,
}

const PRODUCTS: &[ProductSeed] = &[
    ProductSeed {
        id: "1",
        name: "Wireless Bluetooth Headphones",
        description: "Experience crystal-clear audio with these comfortable wireless headphones. Features 20-hour battery life, touch controls, and noise cancellation.",
        cents: 7999,
        old_cents: Some(9999),
        rating: 4.5,
        review_count: 2547,
        category: "electronics",
        image: "https://images.unsplash.com/photo-1505740420928-5e560c06d30e?auto=format&fit=crop&w=600&q=80",
        in_stock: true,
    },
    ProductSeed {
        id: "2",
        name: "Smartphone - Latest Model",
        description: "The latest smartphone featuring a 6.5\" AMOLED display, 5G connectivity, 128GB storage, and an advanced camera system.",
        cents: 89999,
        old_cents: None,
        rating: 4.8,
        review_count: 1243,
        category: "electronics",
        image: "https://images.unsplash.com/photo-1511707171634-5f897ff02ff9?auto=format&fit=crop&w=600&q=80",
        in_stock: true,
    },
    ProductSeed {
        id: "3",
        name: "Smart Fitness Watch",
        description: "Track your fitness goals with this waterproof smart watch. Monitors heart rate, sleep, steps, and includes GPS tracking.",
        cents: 14999,
        old_cents: Some(19999),
        rating: 4.6,
        review_count: 958,
        category: "electronics",
        image: "https://images.unsplash.com/photo-1579586337278-3befd40fd17a?auto=format&fit=crop&w=600&q=80",
        in_stock: true,
    },
    ProductSeed {
        id: "4",
        name: "Ergonomic Office Chair",
        description: "Comfortable ergonomic chair with adjustable height, lumbar support, and breathable mesh back for your home office.",
        cents: 19999,
        old_cents: None,
        rating: 4.2,
        review_count: 647,
        category: "home",
        image: "https://images.unsplash.com/photo-1581539250439-c96689b516dd?auto=format&fit=crop&w=600&q=80",
        in_stock: true,
    },
    ProductSeed {
        id: "5",
        name: "Stainless Steel Water Bottle",
        description: "Keep your drinks hot or cold for up to 24 hours with this vacuum-insulated stainless steel water bottle.",
        cents: 2499,
        old_cents: None,
        rating: 4.7,
        review_count: 2103,
        category: "kitchen",
        image: "https://images.unsplash.com/photo-1602143407151-7111542de6e8?auto=format&fit=crop&w=600&q=80",
        in_stock: true,
    },
    ProductSeed {
        id: "6",
        name: "Smart Home Security Camera",
        description: "HD security camera with motion detection, two-way audio, night vision, and cloud storage for your home security needs.",
        cents: 8999,
        old_cents: Some(11999),
        rating: 4.4,
        review_count: 872,
        category: "electronics",
        image: "https://images.unsplash.com/photo-1558000143-a78f8299c0b5?auto=format&fit=crop&w=600&q=80",
        in_stock: true,
    },
    ProductSeed {
        id: "7",
        name: "Organic Cotton T-Shirt",
        description: "Comfortable, eco-friendly t-shirt made from 100% organic cotton with a classic fit.",
        cents: 1999,
        old_cents: None,
        rating: 4.3,
        review_count: 492,
        category: "clothing",
        image: "https://images.unsplash.com/photo-1521572163474-6864f9cf17ab?auto=format&fit=crop&w=600&q=80",
        in_stock: true,
    },
    ProductSeed {
        id: "8",
        name: "Cast Iron Dutch Oven",
        description: "Versatile enameled cast iron dutch oven perfect for slow cooking, baking, and more. Suitable for all cooking surfaces.",
        cents: 8999,
        old_cents: None,
        rating: 4.9,
        review_count: 1078,
        category: "kitchen",
        image: "https://images.unsplash.com/photo-1585837575652-267c041d77d4?auto=format&fit=crop&w=600&q=80",
        in_stock: false,
    },
];

const CATEGORIES: &[(&str, &str, &str)] = &[
    (
        "electronics",
        "Electronics",
        "https://images.unsplash.com/photo-1550009158-9ebf69173e03?auto=format&fit=crop&w=600&q=80",
    ),
    (
        "clothing",
        "Clothing",
        "https://images.unsplash.com/photo-1567401893414-76b7b1e5a7a5?auto=format&fit=crop&w=600&q=80",
    ),
    (
        "home",
        "Home & Kitchen",
        "https://images.unsplash.com/photo-1583847268964-b28dc8f51f92?auto=format&fit=crop&w=600&q=80",
    ),
    (
        "books",
        "Books",
        "https://images.unsplash.com/photo-1512820790803-83ca734da794?auto=format&fit=crop&w=600&q=80",
    ),
    (
        "kitchen",
        "Kitchen",
        "https://images.unsplash.com/photo-1556911220-bff31c812dba?auto=format&fit=crop&w=600&q=80",
    ),
];

pub(super) fn products() -> Vec<Product> {
    PRODUCTS
        .iter()
        .map(|seed| Product {
            id: ProductId::new(seed.id),
            name: seed.name.to_string(),
            description: seed.description.to_string(),
            price: Price::from_cents(seed.cents),
            old_price: seed.old_cents.map(Price::from_cents),
            rating: seed.rating,
            review_count: seed.review_count,
            category: CategoryId::new(seed.category),
            image: seed.image.to_string(),
            in_stock: seed.in_stock,
        })
        .collect()
}

pub(super) fn categories() -> Vec<Category> {
    CATEGORIES
        .iter()
        .map(|(id, name, image)| Category {
            id: CategoryId::new(*id),
            name: (*name).to_string(),
            image: (*image).to_string(),
        })
        .collect()
}
