//! Fixed tables the mock engine draws from.

/// A product the mock store sells.
#[derive(Debug, Clone, Copy)]
pub struct Product {
    pub sku: &'static str,
    pub name: &'static str,
    pub price_cents: i64,
}

pub const PRODUCTS: &[Product] = &[
    Product {
        sku: "TEE-CLS-BLK-M",
        name: "Classic Cotton T-Shirt (Black, M)",
        price_cents: 2499,
    },
    Product {
        sku: "HOOD-ZIP-GRY-L",
        name: "Zip Hoodie (Heather Grey, L)",
        price_cents: 5900,
    },
    Product {
        sku: "JEAN-SLM-IND-32",
        name: "Slim Fit Jeans (Indigo, 32)",
        price_cents: 6850,
    },
    Product {
        sku: "SNK-RUN-WHT-10",
        name: "Everyday Running Sneakers (White, 10)",
        price_cents: 8900,
    },
    Product {
        sku: "BAG-CNV-TOTE",
        name: "Canvas Tote Bag",
        price_cents: 1899,
    },
    Product {
        sku: "MUG-CER-12OZ",
        name: "Ceramic Mug 12oz",
        price_cents: 1450,
    },
    Product {
        sku: "EAR-WLS-BLK",
        name: "Wireless Earbuds (Black)",
        price_cents: 7999,
    },
    Product {
        sku: "CHG-USBC-65W",
        name: "65W USB-C Charger",
        price_cents: 3499,
    },
    Product {
        sku: "LMP-DSK-LED",
        name: "LED Desk Lamp",
        price_cents: 4299,
    },
    Product {
        sku: "SCF-WOL-NVY",
        name: "Merino Wool Scarf (Navy)",
        price_cents: 3900,
    },
    Product {
        sku: "BTL-STL-750",
        name: "Insulated Steel Bottle 750ml",
        price_cents: 2799,
    },
    Product {
        sku: "SOK-CRW-3PK",
        name: "Crew Socks 3-Pack",
        price_cents: 1500,
    },
];

/// A parcel carrier and how its tracking numbers look.
#[derive(Debug, Clone, Copy)]
pub struct Carrier {
    pub name: &'static str,
    pub number_prefix: &'static str,
    pub number_digits: usize,
    pub tracking_url: &'static str,
}

pub const CARRIERS: &[Carrier] = &[
    Carrier {
        name: "UPS",
        number_prefix: "1Z",
        number_digits: 16,
        tracking_url: "https://www.ups.com/track?tracknum=",
    },
    Carrier {
        name: "FedEx",
        number_prefix: "",
        number_digits: 12,
        tracking_url: "https://www.fedex.com/fedextrack/?trknbr=",
    },
    Carrier {
        name: "USPS",
        number_prefix: "9400",
        number_digits: 18,
        tracking_url: "https://tools.usps.com/go/TrackConfirmAction?tLabels=",
    },
    Carrier {
        name: "DHL",
        number_prefix: "",
        number_digits: 10,
        tracking_url: "https://www.dhl.com/us-en/home/tracking.html?tracking-id=",
    },
];

/// Destination cities: (city, region, postcode).
pub const CITIES: &[(&str, &str, &str)] = &[
    ("Portland", "OR", "97205"),
    ("Austin", "TX", "78701"),
    ("Chicago", "IL", "60601"),
    ("Denver", "CO", "80202"),
    ("Columbus", "OH", "43215"),
    ("Atlanta", "GA", "30303"),
    ("Seattle", "WA", "98101"),
    ("Nashville", "TN", "37203"),
    ("Phoenix", "AZ", "85004"),
    ("Boston", "MA", "02108"),
];

pub const STREETS: &[&str] = &[
    "Maple Ave",
    "Oak Street",
    "Cedar Lane",
    "Harbor Blvd",
    "Pine Road",
    "Elm Court",
    "Lakeview Drive",
    "Mill Street",
];

/// Carrier sort hubs parcels pass through.
pub const HUBS: &[&str] = &[
    "Louisville, KY",
    "Memphis, TN",
    "Indianapolis, IN",
    "Ontario, CA",
    "Dallas, TX",
    "Newark, NJ",
    "Salt Lake City, UT",
];

/// Where every order ships from.
pub const WAREHOUSE: &str = "Reno, NV";
