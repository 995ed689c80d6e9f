//! Fake value provider used inside factory definitions

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore, SeedableRng};

use crate::config::factory_config;

const FIRST_NAMES: &[&str] = &[
    "Alice", "Bob", "Charlie", "Diana", "Eve", "Frank", "Grace", "Henry", "Ivy", "Jack",
    "Kate", "Liam", "Mia", "Noah", "Olivia", "Peter", "Quinn", "Ruby", "Sam", "Tina",
    "Uma", "Victor", "Willow", "Xander", "Yara", "Zoe", "Aaron", "Bella", "Connor", "Delia",
];

const LAST_NAMES: &[&str] = &[
    "Anderson", "Brown", "Davis", "Evans", "Fisher", "Garcia", "Harris", "Johnson", "King", "Lopez",
    "Miller", "Nelson", "Oliveira", "Parker", "Quinn", "Roberts", "Smith", "Taylor", "Underwood", "Valdez",
    "Williams", "Xavier", "Young", "Zhang", "Adams", "Bell", "Clark", "Duncan", "Edwards", "Ford",
];

const COMPANY_PREFIXES: &[&str] = &[
    "Acme", "Global", "United", "Premium", "Elite", "Advanced", "Dynamic", "Smart",
];

const COMPANY_SUFFIXES: &[&str] = &[
    "Corp", "Inc", "LLC", "Solutions", "Systems", "Technologies", "Enterprises", "Group",
];

const WORDS: &[&str] = &[
    "alpha", "bravo", "cedar", "delta", "ember", "falcon", "harbor", "island", "juniper", "kestrel",
    "lumen", "meadow", "nimbus", "orbit", "prairie", "quartz", "river", "summit", "tundra", "vertex",
];

const DOMAINS: &[&str] = &["example.com", "test.org", "demo.net", "sample.io", "fake.dev"];

const STREETS: &[&str] = &[
    "Main St", "Oak Ave", "Elm Dr", "Park Blvd", "Cedar Ln", "Maple Way", "Pine St", "River Rd",
    "Hill Ave", "Lake Dr", "Forest Ln", "Garden St", "Valley Rd", "Spring Ave", "Sunset Blvd",
];

const CITIES: &[&str] = &[
    "Springfield", "Riverside", "Franklin", "Georgetown", "Fairview", "Madison", "Arlington", "Salem",
    "Richmond", "Columbia", "Austin", "Denver", "Phoenix", "Portland", "Seattle", "Boston",
];

const COUNTRIES: &[&str] = &[
    "United States", "Canada", "United Kingdom", "Germany", "France", "Italy", "Spain", "Netherlands",
    "Australia", "Japan", "South Korea", "Brazil", "Mexico", "India", "Portugal", "Ireland",
];

const SUBJECTS: &[&str] = &["The user", "The system", "The application", "The service", "The platform"];
const VERBS: &[&str] = &["creates", "updates", "processes", "manages", "handles", "provides"];
const OBJECTS: &[&str] = &["data", "information", "content", "resources", "functionality", "capabilities"];

/// Random value generator owned by a single factory.
///
/// Every factory constructs its own `Faker`. When the global
/// [`FactoryConfig`](crate::FactoryConfig) carries a seed the generator is
/// deterministic, otherwise it is seeded from entropy. Cloning forks a new
/// generator seeded from this one's stream, so cloned factories never replay
/// the values of the original.
pub struct Faker {
    rng: Mutex<StdRng>,
}

impl Faker {
    pub fn new() -> Self {
        match factory_config().seed {
            Some(seed) => Self::seeded(seed),
            None => Self {
                rng: Mutex::new(StdRng::from_entropy()),
            },
        }
    }

    /// Create a deterministic generator
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    fn pick(&self, options: &[&'static str]) -> &'static str {
        options.choose(&mut *self.rng.lock()).copied().unwrap_or_default()
    }

    /// Pick one element of `options`, `None` when the slice is empty
    pub fn random_element<'a, T>(&self, options: &'a [T]) -> Option<&'a T> {
        options.choose(&mut *self.rng.lock())
    }

    /// Random integer in the inclusive range `min..=max`
    pub fn number_between(&self, min: i64, max: i64) -> i64 {
        if min >= max {
            return min;
        }
        self.rng.lock().gen_range(min..=max)
    }

    /// Random float in `min..=max` rounded to `decimals` places
    pub fn random_float(&self, decimals: u32, min: f64, max: f64) -> f64 {
        let raw = if min >= max {
            min
        } else {
            self.rng.lock().gen_range(min..=max)
        };
        let factor = 10f64.powi(decimals as i32);
        (raw * factor).round() / factor
    }

    /// Random boolean that is `true` with the given probability (clamped to `0..=1`)
    pub fn boolean(&self, probability: f64) -> bool {
        self.rng.lock().gen_bool(probability.clamp(0.0, 1.0))
    }

    pub fn first_name(&self) -> String {
        self.pick(FIRST_NAMES).to_string()
    }

    pub fn last_name(&self) -> String {
        self.pick(LAST_NAMES).to_string()
    }

    pub fn name(&self) -> String {
        format!("{} {}", self.first_name(), self.last_name())
    }

    pub fn user_name(&self) -> String {
        format!(
            "{}{}",
            self.first_name().to_lowercase(),
            self.number_between(1, 999)
        )
    }

    pub fn email(&self) -> String {
        format!(
            "{}.{}{:03}@{}",
            self.first_name().to_lowercase(),
            self.last_name().to_lowercase(),
            self.number_between(1, 999),
            self.pick(DOMAINS)
        )
    }

    pub fn company(&self) -> String {
        format!("{} {}", self.pick(COMPANY_PREFIXES), self.pick(COMPANY_SUFFIXES))
    }

    pub fn word(&self) -> String {
        self.pick(WORDS).to_string()
    }

    pub fn sentence(&self) -> String {
        format!(
            "{} {} {}.",
            self.pick(SUBJECTS),
            self.pick(VERBS),
            self.pick(OBJECTS)
        )
    }

    /// Lowercase words joined by dashes
    pub fn slug(&self) -> String {
        let words = self.number_between(2, 4);
        (0..words)
            .map(|_| self.word())
            .collect::<Vec<_>>()
            .join("-")
    }

    pub fn street_address(&self) -> String {
        format!("{} {}", self.number_between(1, 9999), self.pick(STREETS))
    }

    pub fn city(&self) -> String {
        self.pick(CITIES).to_string()
    }

    pub fn postcode(&self) -> String {
        format!("{:05}", self.number_between(10000, 99999))
    }

    pub fn country(&self) -> String {
        self.pick(COUNTRIES).to_string()
    }

    /// Random v4 UUID drawn from this generator
    pub fn uuid(&self) -> String {
        let mut bytes = [0u8; 16];
        self.rng.lock().fill_bytes(&mut bytes);
        uuid::Builder::from_random_bytes(bytes)
            .into_uuid()
            .to_string()
    }

    /// Random 40-character hex digest
    pub fn sha1(&self) -> String {
        let mut bytes = [0u8; 20];
        self.rng.lock().fill_bytes(&mut bytes);
        hex::encode(bytes)
    }

    /// Random instant in `[from, to]`; returns `from` when the range is empty
    pub fn date_time_between(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> DateTime<Utc> {
        let span = (to - from).num_seconds();
        if span <= 0 {
            return from;
        }
        from + Duration::seconds(self.rng.lock().gen_range(0..=span))
    }

    /// Random instant within the last year
    pub fn date_time(&self) -> DateTime<Utc> {
        let now = Utc::now();
        self.date_time_between(now - Duration::days(365), now)
    }
}

impl Default for Faker {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Faker {
    fn clone(&self) -> Self {
        Self::seeded(self.rng.lock().next_u64())
    }
}

impl std::fmt::Debug for Faker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Faker").finish_non_exhaustive()
    }
}
