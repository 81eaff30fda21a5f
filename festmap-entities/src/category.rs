use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

/// The fixed set of booth categories.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case")]
pub enum BoothCategory {
    Food,
    Beverage,
    Game,
    Experience,
    Shop,
    Goods,
    #[default]
    Info,
    Stage,
    Photo,
}

impl BoothCategory {
    /// Parses a category key, falling back to [`BoothCategory::Info`]
    /// for unknown keys.
    pub fn from_key(key: &str) -> Self {
        key.trim().to_lowercase().parse().unwrap_or_default()
    }
}

/// Ordinal crowding indicator.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case")]
pub enum CongestionLevel {
    Low,
    Medium,
    High,
    VeryHigh,
}
