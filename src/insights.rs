//! Insight rules engine.
//!
//! Pure derivation from a [`WeatherReading`] to a list of advisory records
//! plus a coarse risk level. No I/O, no state: calling twice with the same
//! reading yields the same output in the same order.
//!
//! Each rule group is an ordered table of `(predicate, rule)` pairs. Groups
//! marked as ladders stop at the first match; independent groups let every
//! matching rule fire. Advisory content lives in a single lookup keyed by
//! [`Rule`], so thresholds and wording can be reviewed separately.

use serde::Serialize;

use crate::models::{RiskLevel, WeatherReading};

// ---

/// One advisory derived from a reading. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InsightRecord {
    pub icon: &'static str,
    pub title: &'static str,
    pub message: &'static str,
}

/// Normalized rule inputs. Condition matching is case-insensitive substring
/// match on the category, wind is pre-converted to km/h.
#[derive(Debug)]
struct RuleInput {
    // ---
    temp: f64,
    condition: String,
    humidity: u8,
    wind_kmh: f64,
    visibility: u32,
}

impl RuleInput {
    fn from_reading(reading: &WeatherReading) -> Self {
        // ---
        Self {
            temp: reading.main.temp,
            condition: reading.condition().to_lowercase(),
            humidity: reading.main.humidity,
            wind_kmh: reading.wind.speed * 3.6,
            visibility: reading.visibility,
        }
    }

    fn condition_has(&self, needle: &str) -> bool {
        self.condition.contains(needle)
    }
}

// ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rule {
    // ---
    ExtremeHeat,
    Hot,
    Freezing,
    Cold,
    Ideal,
    Rain,
    Snow,
    Thunderstorm,
    HighHumidity,
    LowHumidity,
    StrongWind,
    PoorVisibility,
    LightClothing,
    LayerUp,
    Waterproof,
    CasualWear,
    OutdoorActivity,
    IndoorActivity,
    BeatTheHeat,
    Normal,
}

impl Rule {
    /// Static advisory content for each rule.
    fn record(self) -> InsightRecord {
        // ---
        match self {
            Self::ExtremeHeat => InsightRecord {
                icon: "🔥",
                title: "Extreme Heat Alert",
                message: "Stay hydrated and avoid prolonged sun exposure. Wear light, breathable clothing.",
            },
            Self::Hot => InsightRecord {
                icon: "☀️",
                title: "Hot Weather",
                message: "It's hot outside! Drink plenty of water and use sunscreen if going out.",
            },
            Self::Freezing => InsightRecord {
                icon: "🥶",
                title: "Freezing Temperature",
                message: "Bundle up! Wear warm layers, gloves, and a hat. Watch for icy conditions.",
            },
            Self::Cold => InsightRecord {
                icon: "❄️",
                title: "Cold Weather",
                message: "It's chilly. Wear a jacket and warm clothes when heading outside.",
            },
            Self::Ideal => InsightRecord {
                icon: "🌤️",
                title: "Perfect Weather",
                message: "Ideal temperature for outdoor activities! Great day to go for a walk.",
            },
            Self::Rain => InsightRecord {
                icon: "☔",
                title: "Rainy Conditions",
                message: "Don't forget your umbrella! Roads may be slippery, drive carefully.",
            },
            Self::Snow => InsightRecord {
                icon: "⛄",
                title: "Snowy Weather",
                message: "Watch for snow accumulation. Drive slowly and give yourself extra time.",
            },
            Self::Thunderstorm => InsightRecord {
                icon: "⚡",
                title: "Thunderstorm Warning",
                message: "Stay indoors if possible. Avoid using electronic devices during the storm.",
            },
            Self::HighHumidity => InsightRecord {
                icon: "💧",
                title: "High Humidity",
                message: "The air feels heavy. Stay in air-conditioned spaces when possible.",
            },
            Self::LowHumidity => InsightRecord {
                icon: "🏜️",
                title: "Low Humidity",
                message: "Dry air detected. Use moisturizer and stay hydrated.",
            },
            Self::StrongWind => InsightRecord {
                icon: "💨",
                title: "Strong Winds",
                message: "High winds expected. Secure loose objects and be cautious when driving.",
            },
            Self::PoorVisibility => InsightRecord {
                icon: "🌫️",
                title: "Poor Visibility",
                message: "Foggy or misty conditions. Use headlights and drive carefully.",
            },
            Self::LightClothing => InsightRecord {
                icon: "👕",
                title: "Clothing Tip",
                message: "Wear light, loose-fitting clothes in light colors. Don't forget sunglasses!",
            },
            Self::LayerUp => InsightRecord {
                icon: "🧥",
                title: "Clothing Tip",
                message: "Layer up! Wear a warm coat, scarf, and gloves.",
            },
            Self::Waterproof => InsightRecord {
                icon: "🌂",
                title: "Clothing Tip",
                message: "Waterproof jacket recommended. Wear closed-toe shoes.",
            },
            Self::CasualWear => InsightRecord {
                icon: "👔",
                title: "Clothing Tip",
                message: "Comfortable casual wear is perfect. Maybe bring a light jacket.",
            },
            Self::OutdoorActivity => InsightRecord {
                icon: "🚴",
                title: "Activity Suggestion",
                message: "Great weather for outdoor activities like cycling, jogging, or picnics!",
            },
            Self::IndoorActivity => InsightRecord {
                icon: "📚",
                title: "Activity Suggestion",
                message: "Perfect day to stay indoors. How about reading a book or watching movies?",
            },
            Self::BeatTheHeat => InsightRecord {
                icon: "🏊",
                title: "Activity Suggestion",
                message: "Beat the heat! Visit a pool or stay in air-conditioned places.",
            },
            Self::Normal => InsightRecord {
                icon: "✨",
                title: "Weather Update",
                message: "Conditions are normal. Have a great day!",
            },
        }
    }
}

// ---

type Check = fn(&RuleInput) -> bool;

/// Mutually exclusive temperature bands, highest priority first.
const TEMPERATURE_BANDS: &[(Check, Rule)] = &[
    (|c| c.temp > 35.0, Rule::ExtremeHeat),
    (|c| c.temp > 30.0, Rule::Hot),
    (|c| c.temp < 0.0, Rule::Freezing),
    (|c| c.temp < 10.0, Rule::Cold),
    (|c| c.temp >= 20.0 && c.temp <= 25.0, Rule::Ideal),
];

/// Independent condition and hazard checks; every match fires.
const HAZARD_CHECKS: &[(Check, Rule)] = &[
    (
        |c| c.condition_has("rain") || c.condition_has("drizzle"),
        Rule::Rain,
    ),
    (|c| c.condition_has("snow"), Rule::Snow),
    (|c| c.condition_has("thunderstorm"), Rule::Thunderstorm),
];

/// Mutually exclusive humidity bands.
const HUMIDITY_BANDS: &[(Check, Rule)] = &[
    (|c| c.humidity > 80, Rule::HighHumidity),
    (|c| c.humidity < 30, Rule::LowHumidity),
];

const WIND_CHECKS: &[(Check, Rule)] = &[(|c| c.wind_kmh > 40.0, Rule::StrongWind)];

const VISIBILITY_CHECKS: &[(Check, Rule)] = &[(|c| c.visibility < 1000, Rule::PoorVisibility)];

/// Clothing ladder, first match wins.
const CLOTHING_LADDER: &[(Check, Rule)] = &[
    (|c| c.temp > 30.0, Rule::LightClothing),
    (|c| c.temp < 10.0, Rule::LayerUp),
    (|c| c.condition_has("rain"), Rule::Waterproof),
    (|c| c.temp >= 15.0 && c.temp <= 25.0, Rule::CasualWear),
];

/// Activity ladder, first match wins.
const ACTIVITY_LADDER: &[(Check, Rule)] = &[
    (
        |c| c.temp >= 20.0 && c.temp <= 28.0 && !c.condition_has("rain"),
        Rule::OutdoorActivity,
    ),
    (|c| c.condition_has("rain"), Rule::IndoorActivity),
    (|c| c.temp > 32.0, Rule::BeatTheHeat),
];

fn first_match(ladder: &[(Check, Rule)], input: &RuleInput) -> Option<Rule> {
    ladder
        .iter()
        .find(|(check, _)| check(input))
        .map(|&(_, rule)| rule)
}

fn all_matches(checks: &[(Check, Rule)], input: &RuleInput, fired: &mut Vec<Rule>) {
    fired.extend(
        checks
            .iter()
            .filter(|(check, _)| check(input))
            .map(|&(_, rule)| rule),
    );
}

// ---

/// Derive the ordered advisory list for a reading. Always non-empty: when no
/// rule fires, a single generic record is returned.
pub fn generate(reading: &WeatherReading) -> Vec<InsightRecord> {
    // ---
    let input = RuleInput::from_reading(reading);
    let mut fired = Vec::new();

    fired.extend(first_match(TEMPERATURE_BANDS, &input));
    all_matches(HAZARD_CHECKS, &input, &mut fired);
    fired.extend(first_match(HUMIDITY_BANDS, &input));
    all_matches(WIND_CHECKS, &input, &mut fired);
    all_matches(VISIBILITY_CHECKS, &input, &mut fired);
    fired.extend(first_match(CLOTHING_LADDER, &input));
    fired.extend(first_match(ACTIVITY_LADDER, &input));

    if fired.is_empty() {
        fired.push(Rule::Normal);
    }

    fired.into_iter().map(Rule::record).collect()
}

/// Coarse severity classification, independent of [`generate`].
pub fn risk_level(reading: &WeatherReading) -> RiskLevel {
    // ---
    let c = RuleInput::from_reading(reading);

    if c.temp > 38.0 || c.temp < -5.0 || c.condition_has("thunderstorm") || c.wind_kmh > 50.0 {
        RiskLevel::High
    } else if c.temp > 33.0 || c.temp < 5.0 || c.condition_has("rain") || c.wind_kmh > 35.0 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}
