//! Static location tables: the Nepal cities the store is seeded with and
//! the world cities used for global rankings.

// ---

/// A city to seed into the store.
#[derive(Debug, Clone, Copy)]
pub struct SeedCity {
    pub name: &'static str,
    pub province: &'static str,
    pub lat: f64,
    pub lon: f64,
}

/// A city sampled for the global rankings.
#[derive(Debug, Clone, Copy)]
pub struct WorldCity {
    pub name: &'static str,
    pub country: &'static str,
    pub lat: f64,
    pub lon: f64,
}

const fn nepal(name: &'static str, province: &'static str, lat: f64, lon: f64) -> SeedCity {
    SeedCity {
        name,
        province,
        lat,
        lon,
    }
}

const fn world(name: &'static str, country: &'static str, lat: f64, lon: f64) -> WorldCity {
    WorldCity {
        name,
        country,
        lat,
        lon,
    }
}

const BAGMATI: &str = "Bagmati Province";
const GANDAKI: &str = "Gandaki Province";
const LUMBINI: &str = "Lumbini Province";
const KOSHI: &str = "Koshi Province";
const MADESH: &str = "Madesh Province";
const KARNALI: &str = "Karnali Province";
const SUDURPASHCHIM: &str = "Sudurpashchim Province";

pub const NEPAL_CITIES: [SeedCity; 34] = [
    nepal("Kathmandu", BAGMATI, 27.7172, 85.3240),
    nepal("Lalitpur", BAGMATI, 27.6588, 85.3247),
    nepal("Bhaktapur", BAGMATI, 27.6710, 85.4298),
    nepal("Chitwan", BAGMATI, 27.5291, 84.3542),
    nepal("Hetauda", BAGMATI, 27.4287, 85.0324),
    nepal("Bharatpur", BAGMATI, 27.6977, 84.4354),
    nepal("Pokhara", GANDAKI, 28.2096, 83.9856),
    nepal("Gorkha", GANDAKI, 28.0000, 84.6333),
    nepal("Baglung", GANDAKI, 28.2677, 83.5899),
    nepal("Mustang", GANDAKI, 28.9942, 83.8821),
    nepal("Butwal", LUMBINI, 27.7000, 83.4500),
    nepal("Bhairahawa", LUMBINI, 27.5000, 83.4167),
    nepal("Tansen", LUMBINI, 27.8667, 83.5500),
    nepal("Ghorahi", LUMBINI, 28.0333, 82.5000),
    nepal("Nepalgunj", LUMBINI, 28.0500, 81.6167),
    nepal("Tulsipur", LUMBINI, 28.1333, 82.2833),
    nepal("Biratnagar", KOSHI, 26.4525, 87.2718),
    nepal("Dharan", KOSHI, 26.8147, 87.2799),
    nepal("Itahari", KOSHI, 26.6667, 87.2833),
    nepal("Janakpur", KOSHI, 26.7288, 85.9266),
    nepal("Namche Bazaar", KOSHI, 27.8036, 86.7120),
    nepal("Taplejung", KOSHI, 27.3500, 87.6667),
    nepal("Birgunj", MADESH, 27.0167, 84.8667),
    nepal("Rajbiraj", MADESH, 26.5417, 86.7500),
    nepal("Kalaiya", MADESH, 27.0333, 85.0000),
    nepal("Gaur", MADESH, 26.7667, 85.2833),
    nepal("Surkhet", KARNALI, 28.6000, 81.6167),
    nepal("Jumla", KARNALI, 29.2742, 82.1839),
    nepal("Dunai", KARNALI, 28.9667, 82.9000),
    nepal("Manma", KARNALI, 29.4000, 81.8833),
    nepal("Dhangadi", SUDURPASHCHIM, 28.6931, 80.5898),
    nepal("Mahendranagar", SUDURPASHCHIM, 28.9644, 80.1789),
    nepal("Tikapur", SUDURPASHCHIM, 28.5167, 81.1167),
    nepal("Dadeldhura", SUDURPASHCHIM, 29.3000, 80.5833),
];

pub const WORLD_CITIES: [WorldCity; 20] = [
    world("Zurich", "Switzerland", 47.3769, 8.5417),
    world("Helsinki", "Finland", 60.1699, 24.9384),
    world("Oslo", "Norway", 59.9139, 10.7522),
    world("Stockholm", "Sweden", 59.3293, 18.0686),
    world("Copenhagen", "Denmark", 55.6761, 12.5683),
    world("Reykjavik", "Iceland", 64.1466, -21.9426),
    world("Wellington", "New Zealand", -41.2865, 174.7762),
    world("Sydney", "Australia", -33.8688, 151.2093),
    world("Vancouver", "Canada", 49.2827, -123.1207),
    world("Montreal", "Canada", 45.5017, -73.5673),
    world("Delhi", "India", 28.7041, 77.1025),
    world("Mumbai", "India", 19.0760, 72.8777),
    world("Beijing", "China", 39.9042, 116.4074),
    world("Shanghai", "China", 31.2304, 121.4737),
    world("Dhaka", "Bangladesh", 23.8103, 90.4125),
    world("Lahore", "Pakistan", 31.5804, 74.3587),
    world("Karachi", "Pakistan", 24.8607, 67.0011),
    world("Cairo", "Egypt", 30.0444, 31.2357),
    world("Lagos", "Nigeria", 6.5244, 3.3792),
    world("Mexico City", "Mexico", 19.4326, -99.1332),
];
