use serde::Serialize;
use utoipa::ToSchema;

/// Emoji token shown next to each forecast day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionToken {
    Clear,
    Rain,
    Storm,
    Snow,
    PartlyCloudy,
}

impl ConditionToken {
    pub fn emoji(self) -> &'static str {
        match self {
            Self::Clear => "☀️",
            Self::Rain => "🌧️",
            Self::Storm => "⛈️",
            Self::Snow => "❄️",
            Self::PartlyCloudy => "⛅",
        }
    }
}

/// Icon category for the large current-conditions icon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ConditionIcon {
    Sun,
    Rain,
    Thunder,
    Snow,
    Wind,
    Cloud,
    CloudSun,
}

/// Ordered rules; the first whose needle occurs in the lowercased text wins.
type Rules<T> = &'static [(&'static [&'static str], T)];

const TOKEN_RULES: Rules<ConditionToken> = &[
    (&["sunny", "clear"], ConditionToken::Clear),
    (&["rain", "shower"], ConditionToken::Rain),
    (&["thunder"], ConditionToken::Storm),
    (&["snow"], ConditionToken::Snow),
];

const ICON_RULES: Rules<ConditionIcon> = &[
    (&["sunny", "clear"], ConditionIcon::Sun),
    (&["rain", "shower"], ConditionIcon::Rain),
    (&["thunder"], ConditionIcon::Thunder),
    (&["snow"], ConditionIcon::Snow),
    (&["wind"], ConditionIcon::Wind),
    (&["cloud"], ConditionIcon::Cloud),
];

fn first_match<T: Copy>(rules: Rules<T>, text: &str) -> Option<T> {
    let text = text.to_lowercase();
    rules
        .iter()
        .find(|(needles, _)| needles.iter().any(|needle| text.contains(needle)))
        .map(|(_, value)| *value)
}

/// Classify condition text into a forecast token
pub fn classify_token(text: &str) -> ConditionToken {
    first_match(TOKEN_RULES, text).unwrap_or(ConditionToken::PartlyCloudy)
}

/// Classify condition text into a current-conditions icon
pub fn classify_icon(text: &str) -> ConditionIcon {
    first_match(ICON_RULES, text).unwrap_or(ConditionIcon::CloudSun)
}
