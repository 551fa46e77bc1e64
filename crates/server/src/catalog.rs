//! Product catalog and locality data.
//!
//! The catalog is seeded with the fixed product list and can be replaced
//! by a JSON document in the data directory (written by `dabeeha-cli
//! seed`), so the storefront works with no upstream at all. Locality data
//! covers the greater Cairo delivery area: the districts customers can
//! pick at checkout and the designated slaughter meeting points.

use rust_decimal::Decimal;

use dabeeha_core::{Category, Fulfillment, GeoPoint, Money, ProductId};

use crate::models::Product;
use crate::store::{Store, StoreError, keys};

/// Default reference point: downtown Cairo.
pub const CAIRO: GeoPoint = GeoPoint::new(30.0444, 31.2357);

/// A named place with coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Locality {
    pub name: &'static str,
    pub location: GeoPoint,
}

/// Districts customers can choose as their delivery locality.
pub const DISTRICTS: &[Locality] = &[
    Locality { name: "New Cairo", location: GeoPoint::new(30.0074, 31.4913) },
    Locality { name: "Maadi", location: GeoPoint::new(29.9602, 31.2569) },
    Locality { name: "Zamalek", location: GeoPoint::new(30.0631, 31.2222) },
    Locality { name: "Heliopolis", location: GeoPoint::new(30.0900, 31.3200) },
    Locality { name: "Nasr City", location: GeoPoint::new(30.0500, 31.3500) },
    Locality { name: "Dokki", location: GeoPoint::new(30.0390, 31.2120) },
    Locality { name: "Mohandessin", location: GeoPoint::new(30.0550, 31.2000) },
    Locality { name: "Sheikh Zayed", location: GeoPoint::new(30.0400, 30.9800) },
    Locality { name: "6th of October", location: GeoPoint::new(29.9700, 30.9400) },
    Locality { name: "Downtown", location: GeoPoint::new(30.0444, 31.2357) },
];

/// Designated slaughter meeting points for alive hand-offs.
pub const MEETING_POINTS: &[Locality] = &[
    Locality { name: "Basateen Public Abattoir (Authorized)", location: GeoPoint::new(29.9800, 31.2700) },
    Locality { name: "Warraq District Slaughter Point", location: GeoPoint::new(30.1200, 31.2100) },
    Locality { name: "Mounib Designated Abattoir", location: GeoPoint::new(29.9900, 31.2100) },
    Locality { name: "Al-Marg Central Point", location: GeoPoint::new(30.1500, 31.3300) },
    Locality { name: "Hub Farm Point - New Cairo (Tagamoa)", location: GeoPoint::new(30.0100, 31.5000) },
    Locality { name: "Hub Farm Point - 6th of October", location: GeoPoint::new(29.9600, 30.9300) },
    Locality { name: "Zamalek Designated Support Point", location: GeoPoint::new(30.0631, 31.2222) },
];

/// Look up a district by its exact name.
#[must_use]
pub fn district(name: &str) -> Option<&'static Locality> {
    DISTRICTS.iter().find(|d| d.name == name)
}

/// Names of all known districts, for checkout validation.
#[must_use]
pub fn district_names() -> Vec<&'static str> {
    DISTRICTS.iter().map(|d| d.name).collect()
}

/// Resolve the reference point for meeting-point ranking.
///
/// Preference order: the customer's GPS fix, then the centroid of the
/// chosen district, then downtown Cairo.
#[must_use]
pub fn reference_point(gps: Option<GeoPoint>, district_name: Option<&str>) -> GeoPoint {
    gps.or_else(|| district_name.and_then(district).map(|d| d.location))
        .unwrap_or(CAIRO)
}

/// The product catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Load the catalog from the store, falling back to the built-in seed.
    ///
    /// # Errors
    ///
    /// Returns an error if a stored catalog document exists but is corrupt.
    pub async fn load(store: &Store) -> Result<Self, StoreError> {
        let products = match store.get::<Vec<Product>>(keys::CATALOG).await? {
            Some(products) => {
                tracing::info!(count = products.len(), "catalog loaded from store");
                products
            }
            None => seed_products(),
        };
        Ok(Self { products })
    }

    /// A catalog holding exactly the built-in seed.
    #[must_use]
    pub fn seeded() -> Self {
        Self {
            products: seed_products(),
        }
    }

    /// All products.
    #[must_use]
    pub fn all(&self) -> &[Product] {
        &self.products
    }

    /// Products filtered by category; `None` means everything.
    #[must_use]
    pub fn by_category(&self, category: Option<Category>) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| category.is_none_or(|c| p.category == c))
            .collect()
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }
}

fn pounds(amount: i64) -> Money {
    Money::new(Decimal::from(amount))
}

/// The built-in product seed.
#[must_use]
pub fn seed_products() -> Vec<Product> {
    vec![
        Product {
            id: ProductId::new("1"),
            name: "Rahmani Sheep".into(),
            category: Category::Sheep,
            fulfillment: Fulfillment::Alive,
            weight_range: "45-55kg".into(),
            price: pounds(8_500),
            description: "High quality Rahmani sheep, known for rich meat and low fat content. \
                          Raised in Delta farms."
                .into(),
            image_url: "https://picsum.photos/seed/sheep1/600/400".into(),
            origin: "Sharkia, Egypt".into(),
        },
        Product {
            id: ProductId::new("2"),
            name: "Baladi Calf".into(),
            category: Category::Calf,
            fulfillment: Fulfillment::Alive,
            weight_range: "350-400kg".into(),
            price: pounds(65_000),
            description: "Traditional Egyptian Baladi calf. Excellent growth and meat quality."
                .into(),
            image_url: "https://picsum.photos/seed/calf1/600/400".into(),
            origin: "Monufia, Egypt".into(),
        },
        Product {
            id: ProductId::new("3"),
            name: "Premium Lamb Leg".into(),
            category: Category::Sheep,
            fulfillment: Fulfillment::Slaughtered,
            weight_range: "2-3kg".into(),
            price: pounds(1_200),
            description: "Freshly slaughtered and expertly cut lamb leg. Vacuum sealed for \
                          freshness."
                .into(),
            image_url: "https://picsum.photos/seed/meat1/600/400".into(),
            origin: "Cairo Abattoir".into(),
        },
        Product {
            id: ProductId::new("4"),
            name: "Barki Sheep".into(),
            category: Category::Sheep,
            fulfillment: Fulfillment::Alive,
            weight_range: "40-50kg".into(),
            price: pounds(9_200),
            description: "Desert-raised Barki sheep from Marsa Matrouh. Renowned for its unique \
                          taste."
                .into(),
            image_url: "https://picsum.photos/seed/sheep2/600/400".into(),
            origin: "Marsa Matrouh, Egypt".into(),
        },
        Product {
            id: ProductId::new("5"),
            name: "Beef Tenderloin".into(),
            category: Category::Calf,
            fulfillment: Fulfillment::Slaughtered,
            weight_range: "1.5-2kg".into(),
            price: pounds(1_800),
            description: "The most tender cut of the calf. Selected from young premium cattle."
                .into(),
            image_url: "https://picsum.photos/seed/meat2/600/400".into(),
            origin: "Cairo Abattoir".into(),
        },
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use dabeeha_core::rank_by_distance;

    #[test]
    fn test_seed_has_five_products_with_unique_ids() {
        let products = seed_products();
        assert_eq!(products.len(), 5);
        let mut ids: Vec<_> = products.iter().map(|p| p.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 5);
    }

    #[test]
    fn test_category_filter() {
        let catalog = Catalog::seeded();
        let calves = catalog.by_category(Some(Category::Calf));
        assert_eq!(calves.len(), 2);
        assert!(calves.iter().all(|p| p.category == Category::Calf));
        assert_eq!(catalog.by_category(None).len(), 5);
    }

    #[test]
    fn test_get_by_id() {
        let catalog = Catalog::seeded();
        assert_eq!(
            catalog.get(&ProductId::new("2")).unwrap().name,
            "Baladi Calf"
        );
        assert!(catalog.get(&ProductId::new("99")).is_none());
    }

    #[test]
    fn test_reference_point_preference_order() {
        let gps = GeoPoint::new(29.97, 31.28);
        assert_eq!(reference_point(Some(gps), Some("Maadi")), gps);
        assert_eq!(
            reference_point(None, Some("Maadi")),
            district("Maadi").unwrap().location
        );
        assert_eq!(reference_point(None, Some("Atlantis")), CAIRO);
        assert_eq!(reference_point(None, None), CAIRO);
    }

    #[test]
    fn test_nearest_meeting_point_from_maadi() {
        let origin = district("Maadi").unwrap().location;
        let ranked = rank_by_distance(origin, MEETING_POINTS, |p| p.location);

        for window in ranked.windows(2) {
            assert!(window[0].1 <= window[1].1);
        }
        // Basateen is the closest designated point to Maadi.
        assert_eq!(ranked[0].0.name, "Basateen Public Abattoir (Authorized)");
    }
}
