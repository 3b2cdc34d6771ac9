use serde::{Deserialize, Serialize};

/// Lowercases a label and folds the French accents: `"Mariée"` → `"mariee"`.
fn fold_label(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'à' | 'â' | 'ä' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'î' | 'ï' => 'i',
            'ô' | 'ö' => 'o',
            'ù' | 'û' | 'ü' => 'u',
            'ç' => 'c',
            other => other,
        })
        .collect()
}

/// Civil status of the taxpayer, driving splitting and family quotients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CivilStatus {
    Single,
    Married,
    SingleParent,
}

impl CivilStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Married => "married",
            Self::SingleParent => "single_parent",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match fold_label(s).as_str() {
            "single" | "celibataire" => Some(Self::Single),
            "married" | "marie" | "mariee" => Some(Self::Married),
            "single_parent" | "single-parent" | "monoparental" => Some(Self::SingleParent),
            _ => None,
        }
    }

    /// Number of adults whose wealth exemptions apply.
    pub fn adults(&self) -> u32 {
        match self {
            Self::Married => 2,
            Self::Single | Self::SingleParent => 1,
        }
    }

    /// True for the statuses that benefit from family rate relief.
    pub fn has_family_relief(&self) -> bool {
        matches!(self, Self::Married | Self::SingleParent)
    }
}

/// Church membership used for the ecclesiastical tax.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confession {
    #[default]
    None,
    Catholic,
    Protestant,
    ChristCatholic,
}

impl Confession {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Catholic => "catholic",
            Self::Protestant => "protestant",
            Self::ChristCatholic => "christ_catholic",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match fold_label(s).as_str() {
            "" | "none" | "aucune" => Some(Self::None),
            "catholic" | "catholique" => Some(Self::Catholic),
            "protestant" => Some(Self::Protestant),
            "christ_catholic" | "christ-catholic" | "catholic-christian" | "catholique-chretien" => {
                Some(Self::ChristCatholic)
            }
            _ => None,
        }
    }
}
