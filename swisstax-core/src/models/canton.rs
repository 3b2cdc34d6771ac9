use std::fmt;

use serde::{Deserialize, Serialize};

/// The 26 Swiss cantons, identified by their official two-letter code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Canton {
    Aargau,
    AppenzellAusserrhoden,
    AppenzellInnerrhoden,
    BaselLandschaft,
    BaselStadt,
    Bern,
    Fribourg,
    Geneva,
    Glarus,
    Graubunden,
    Jura,
    Lucerne,
    Neuchatel,
    Nidwalden,
    Obwalden,
    Schaffhausen,
    Schwyz,
    Solothurn,
    StGallen,
    Thurgau,
    Ticino,
    Uri,
    Valais,
    Vaud,
    Zug,
    Zurich,
}

impl Canton {
    pub const ALL: [Canton; 26] = [
        Self::Aargau,
        Self::AppenzellAusserrhoden,
        Self::AppenzellInnerrhoden,
        Self::BaselLandschaft,
        Self::BaselStadt,
        Self::Bern,
        Self::Fribourg,
        Self::Geneva,
        Self::Glarus,
        Self::Graubunden,
        Self::Jura,
        Self::Lucerne,
        Self::Neuchatel,
        Self::Nidwalden,
        Self::Obwalden,
        Self::Schaffhausen,
        Self::Schwyz,
        Self::Solothurn,
        Self::StGallen,
        Self::Thurgau,
        Self::Ticino,
        Self::Uri,
        Self::Valais,
        Self::Vaud,
        Self::Zug,
        Self::Zurich,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Self::Aargau => "AG",
            Self::AppenzellAusserrhoden => "AR",
            Self::AppenzellInnerrhoden => "AI",
            Self::BaselLandschaft => "BL",
            Self::BaselStadt => "BS",
            Self::Bern => "BE",
            Self::Fribourg => "FR",
            Self::Geneva => "GE",
            Self::Glarus => "GL",
            Self::Graubunden => "GR",
            Self::Jura => "JU",
            Self::Lucerne => "LU",
            Self::Neuchatel => "NE",
            Self::Nidwalden => "NW",
            Self::Obwalden => "OW",
            Self::Schaffhausen => "SH",
            Self::Schwyz => "SZ",
            Self::Solothurn => "SO",
            Self::StGallen => "SG",
            Self::Thurgau => "TG",
            Self::Ticino => "TI",
            Self::Uri => "UR",
            Self::Valais => "VS",
            Self::Vaud => "VD",
            Self::Zug => "ZG",
            Self::Zurich => "ZH",
        }
    }

    /// Parses a two-letter canton code, case-insensitively.
    pub fn parse(code: &str) -> Option<Self> {
        let code = code.trim();
        Self::ALL
            .into_iter()
            .find(|canton| canton.code().eq_ignore_ascii_case(code))
    }
}

impl fmt::Display for Canton {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl TryFrom<String> for Canton {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| format!("unknown canton code '{value}'"))
    }
}

impl From<Canton> for String {
    fn from(canton: Canton) -> Self {
        canton.code().to_string()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_accepts_lowercase_codes() {
        assert_eq!(Canton::parse("ge"), Some(Canton::Geneva));
        assert_eq!(Canton::parse(" VD "), Some(Canton::Vaud));
    }

    #[test]
    fn parse_rejects_unknown_codes() {
        assert_eq!(Canton::parse("XX"), None);
        assert_eq!(Canton::parse(""), None);
    }

    #[test]
    fn codes_are_unique() {
        let mut codes: Vec<_> = Canton::ALL.iter().map(Canton::code).collect();
        codes.sort_unstable();
        codes.dedup();

        assert_eq!(codes.len(), 26);
    }

    #[test]
    fn code_round_trips_through_parse() {
        for canton in Canton::ALL {
            assert_eq!(Canton::parse(canton.code()), Some(canton));
        }
    }
}
