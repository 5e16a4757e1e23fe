//! Sample stock used by `autodealer seed` and by tests

use super::types::{CarDraft, CarStatus};

struct Stock {
    brand: &'static str,
    model: &'static str,
    year: i32,
    price: f64,
    mileage: u64,
    color: &'static str,
    status: CarStatus,
    description: Option<&'static str>,
    image: &'static str,
}

const STOCK: [Stock; 10] = [
    Stock {
        brand: "Toyota",
        model: "Camry",
        year: 2023,
        price: 2_500_000.0,
        mileage: 15_000,
        color: "White",
        status: CarStatus::Available,
        description: Some("Excellent condition"),
        image: "https://images.unsplash.com/photo-1621007947382-bb3c3994e3fb?w=500&h=400",
    },
    Stock {
        brand: "BMW",
        model: "X5",
        year: 2022,
        price: 5_000_000.0,
        mileage: 25_000,
        color: "Black",
        status: CarStatus::Available,
        description: Some("Premium class"),
        image: "https://images.unsplash.com/photo-1556821552-5f63b1016170?w=500&h=400",
    },
    Stock {
        brand: "Mercedes-Benz",
        model: "E-Class",
        year: 2023,
        price: 4_500_000.0,
        mileage: 10_000,
        color: "Silver",
        status: CarStatus::Available,
        description: None,
        image: "https://images.unsplash.com/photo-1611818913239-14602d56c0ba?w=500&h=400",
    },
    Stock {
        brand: "Audi",
        model: "A4",
        year: 2021,
        price: 3_200_000.0,
        mileage: 45_000,
        color: "Blue",
        status: CarStatus::Sold,
        description: None,
        image: "https://images.unsplash.com/photo-1606611013016-969c19d14444?w=500&h=400",
    },
    Stock {
        brand: "Volkswagen",
        model: "Passat",
        year: 2020,
        price: 2_200_000.0,
        mileage: 60_000,
        color: "Red",
        status: CarStatus::Available,
        description: None,
        image: "https://images.unsplash.com/photo-1552820728-8ac41f1ce891?w=500&h=400",
    },
    Stock {
        brand: "Mazda",
        model: "CX-5",
        year: 2022,
        price: 2_800_000.0,
        mileage: 30_000,
        color: "Orange",
        status: CarStatus::Reserved,
        description: None,
        image: "https://images.unsplash.com/photo-1581092918056-0c4c3acd3789?w=500&h=400",
    },
    Stock {
        brand: "Honda",
        model: "Accord",
        year: 2023,
        price: 2_600_000.0,
        mileage: 5_000,
        color: "White",
        status: CarStatus::Available,
        description: None,
        image: "https://images.unsplash.com/photo-1609687626917-11acb9c3ecc8?w=500&h=400",
    },
    Stock {
        brand: "Hyundai",
        model: "Sonata",
        year: 2022,
        price: 2_100_000.0,
        mileage: 35_000,
        color: "Green",
        status: CarStatus::Available,
        description: None,
        image: "https://images.unsplash.com/photo-1606407945410-796b0347e7a3?w=500&h=400",
    },
    Stock {
        brand: "Kia",
        model: "Optima",
        year: 2021,
        price: 2_000_000.0,
        mileage: 50_000,
        color: "Grey",
        status: CarStatus::Available,
        description: None,
        image: "https://images.unsplash.com/photo-1626668712015-fca050dff33b?w=500&h=400",
    },
    Stock {
        brand: "Nissan",
        model: "Qashqai",
        year: 2023,
        price: 2_400_000.0,
        mileage: 8_000,
        color: "Black",
        status: CarStatus::Available,
        description: None,
        image: "https://images.unsplash.com/photo-1609687626917-11acb9c3ecc8?w=500&h=400",
    },
];

/// Drafts for the showroom sample stock, in display order
#[must_use]
pub fn sample_stock() -> Vec<CarDraft> {
    STOCK
        .iter()
        .map(|s| CarDraft {
            brand: Some(s.brand.to_string()),
            model: Some(s.model.to_string()),
            year: Some(s.year),
            price: Some(s.price),
            mileage: Some(s.mileage),
            color: Some(s.color.to_string()),
            status: Some(s.status),
            description: s.description.map(str::to_string),
            image_url: Some(s.image.to_string()),
        })
        .collect()
}
