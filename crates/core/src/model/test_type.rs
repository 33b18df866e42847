use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The personality frameworks the question service knows about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TestType {
    Mbti,
    Disc,
    Big5,
    Enneagram,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unsupported test type: {raw}")]
pub struct ParseTestTypeError {
    pub raw: String,
}

/// Card colour family used on the home screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorTheme {
    Blue,
    Green,
    Purple,
    Pink,
}

impl ColorTheme {
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            ColorTheme::Blue => "theme-blue",
            ColorTheme::Green => "theme-green",
            ColorTheme::Purple => "theme-purple",
            ColorTheme::Pink => "theme-pink",
        }
    }
}

/// One scored dimension of a framework.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraitInfo {
    pub code: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

/// Static presentation data for a test type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TestTypeProfile {
    pub title: &'static str,
    pub description: &'static str,
    pub features: &'static [&'static str],
    pub estimated_time: &'static str,
    pub theme: ColorTheme,
    /// RGB accent for charts.
    pub accent: (u8, u8, u8),
    pub traits: &'static [TraitInfo],
    /// Trait codes in chart order; opposing traits sit across from each other.
    pub chart_order: &'static [&'static str],
}

/// Colours cycled through when rendering per-trait score cards.
pub const TRAIT_PALETTE: [&str; 9] = [
    "#3b82f6", "#a855f7", "#22c55e", "#eab308", "#ef4444", "#ec4899", "#06b6d4", "#6366f1",
    "#10b981",
];

const MBTI_TRAITS: &[TraitInfo] = &[
    TraitInfo { code: "E", name: "Extraversion", description: "Draws energy from the outer world" },
    TraitInfo { code: "I", name: "Introversion", description: "Draws energy from the inner world" },
    TraitInfo { code: "S", name: "Sensing", description: "Focuses on concrete facts and details" },
    TraitInfo { code: "N", name: "Intuition", description: "Focuses on possibilities and the future" },
    TraitInfo { code: "T", name: "Thinking", description: "Decides by logic and objective analysis" },
    TraitInfo { code: "F", name: "Feeling", description: "Decides by values and feelings" },
    TraitInfo { code: "J", name: "Judging", description: "Prefers plans and structure" },
    TraitInfo { code: "P", name: "Perceiving", description: "Prefers keeping options open" },
];

const DISC_TRAITS: &[TraitInfo] = &[
    TraitInfo { code: "D", name: "Dominance", description: "Direct, decisive, enjoys challenges" },
    TraitInfo { code: "I", name: "Influence", description: "Optimistic, friendly, sociable" },
    TraitInfo { code: "S", name: "Steadiness", description: "Patient, reliable, cooperative" },
    TraitInfo { code: "C", name: "Conscientiousness", description: "Accurate, analytical, quality-minded" },
];

const BIG5_TRAITS: &[TraitInfo] = &[
    TraitInfo { code: "O", name: "Openness", description: "Openness to new experience" },
    TraitInfo { code: "C", name: "Conscientiousness", description: "Self-discipline and goal focus" },
    TraitInfo { code: "E", name: "Extraversion", description: "Sociability and energy level" },
    TraitInfo { code: "A", name: "Agreeableness", description: "Cooperation and trust" },
    TraitInfo { code: "N", name: "Neuroticism", description: "Emotional stability and stress response" },
];

const ENNEAGRAM_TRAITS: &[TraitInfo] = &[
    TraitInfo { code: "1", name: "Reformer", description: "Rational, idealistic, principled" },
    TraitInfo { code: "2", name: "Helper", description: "Caring, generous, empathetic" },
    TraitInfo { code: "3", name: "Achiever", description: "Adaptable, ambitious, image-aware" },
    TraitInfo { code: "4", name: "Individualist", description: "Romantic, expressive, unique" },
    TraitInfo { code: "5", name: "Investigator", description: "Curious, independent, analytical" },
    TraitInfo { code: "6", name: "Loyalist", description: "Responsible, anxious, loyal" },
    TraitInfo { code: "7", name: "Enthusiast", description: "Optimistic, versatile, playful" },
    TraitInfo { code: "8", name: "Challenger", description: "Confident, decisive, protective" },
    TraitInfo { code: "9", name: "Peacemaker", description: "Accepting, trusting, seeks harmony" },
];

const MBTI: TestTypeProfile = TestTypeProfile {
    title: "MBTI Personality Type",
    description: "Myers-Briggs type indicator: your cognitive preferences and behaviour patterns.",
    features: &["16 personality types", "Cognitive preference analysis", "Career suggestions"],
    estimated_time: "20-25 min",
    theme: ColorTheme::Blue,
    accent: (59, 130, 246),
    traits: MBTI_TRAITS,
    chart_order: &["E", "S", "T", "J", "I", "N", "F", "P"],
};

const DISC: TestTypeProfile = TestTypeProfile {
    title: "DISC Behaviour Style",
    description: "DISC behavioural assessment: communication style and work preferences.",
    features: &["4 behaviour styles", "Communication analysis", "Teamwork suggestions"],
    estimated_time: "15-20 min",
    theme: ColorTheme::Green,
    accent: (34, 197, 94),
    traits: DISC_TRAITS,
    chart_order: &["D", "I", "S", "C"],
};

const BIG5: TestTypeProfile = TestTypeProfile {
    title: "Big Five Traits",
    description: "Five-factor model: a research-based trait assessment.",
    features: &["5 core traits", "Research-based scoring", "Growth suggestions"],
    estimated_time: "18-25 min",
    theme: ColorTheme::Purple,
    accent: (245, 158, 11),
    traits: BIG5_TRAITS,
    chart_order: &["O", "E", "A", "N", "C"],
};

const ENNEAGRAM: TestTypeProfile = TestTypeProfile {
    title: "Enneagram",
    description: "Nine types: your core motivations and fears.",
    features: &["9 personality types", "Core motivation analysis", "Growth direction"],
    estimated_time: "15-20 min",
    theme: ColorTheme::Pink,
    accent: (239, 68, 68),
    traits: ENNEAGRAM_TRAITS,
    chart_order: &["1", "3", "5", "7", "9", "2", "4", "6", "8"],
};

impl TestType {
    pub const ALL: [TestType; 4] = [
        TestType::Mbti,
        TestType::Disc,
        TestType::Big5,
        TestType::Enneagram,
    ];

    /// Lower-case identifier used in routes, API paths and snapshots.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            TestType::Mbti => "mbti",
            TestType::Disc => "disc",
            TestType::Big5 => "big5",
            TestType::Enneagram => "enneagram",
        }
    }

    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            TestType::Mbti => "MBTI",
            TestType::Disc => "DISC",
            TestType::Big5 => "Big5",
            TestType::Enneagram => "Enneagram",
        }
    }

    #[must_use]
    pub fn profile(self) -> &'static TestTypeProfile {
        match self {
            TestType::Mbti => &MBTI,
            TestType::Disc => &DISC,
            TestType::Big5 => &BIG5,
            TestType::Enneagram => &ENNEAGRAM,
        }
    }

    #[must_use]
    pub fn traits(self) -> &'static [TraitInfo] {
        self.profile().traits
    }

    #[must_use]
    pub fn trait_info(self, code: &str) -> Option<&'static TraitInfo> {
        self.traits()
            .iter()
            .find(|info| info.code.eq_ignore_ascii_case(code))
    }

    /// Chart label for a trait, e.g. `Extraversion (E)` or `Type 3`.
    #[must_use]
    pub fn chart_label(self, code: &str) -> String {
        match (self, self.trait_info(code)) {
            (TestType::Enneagram, _) => format!("Type {code}"),
            (_, Some(info)) => format!("{} ({})", info.name, info.code),
            (_, None) => code.to_string(),
        }
    }
}

impl fmt::Display for TestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for TestType {
    type Err = ParseTestTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        TestType::ALL
            .into_iter()
            .find(|ty| ty.slug() == normalized)
            .ok_or_else(|| ParseTestTypeError { raw: s.to_string() })
    }
}

impl TryFrom<String> for TestType {
    type Error = ParseTestTypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TestType> for String {
    fn from(value: TestType) -> Self {
        value.slug().to_string()
    }
}
