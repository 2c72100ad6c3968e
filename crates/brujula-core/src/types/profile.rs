use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Branding of the assistant. Both profiles share the same engine and differ
/// only in name, greeting and tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssistantProfile {
    #[default]
    Brujula,
    TausePro,
}

impl AssistantProfile {
    pub fn id(&self) -> &'static str {
        match self {
            AssistantProfile::Brujula => "brujula",
            AssistantProfile::TausePro => "tause_pro",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            AssistantProfile::Brujula => "Brújula",
            AssistantProfile::TausePro => "Tause Pro",
        }
    }

    pub fn greeting(&self) -> &'static str {
        match self {
            AssistantProfile::Brujula => {
                "¡Hola! Soy Brújula, tu guía de marketing. Cuéntame tu región o tu industria y te oriento."
            }
            AssistantProfile::TausePro => {
                "Bienvenido a Tause Pro. Analicemos tu estrategia: ¿en qué mercado y sector trabajas?"
            }
        }
    }

    /// Short lead-in used when the assistant answers
    pub fn tone(&self) -> &'static str {
        match self {
            AssistantProfile::Brujula => "Te cuento lo que veo",
            AssistantProfile::TausePro => "Análisis estratégico",
        }
    }
}

impl std::fmt::Display for AssistantProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

impl std::str::FromStr for AssistantProfile {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "brujula" | "brújula" => Ok(AssistantProfile::Brujula),
            "tause_pro" | "tausepro" | "tause" => Ok(AssistantProfile::TausePro),
            _ => Err(ParseError::UnknownProfile(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_profile() {
        assert_eq!("tause-pro".parse::<AssistantProfile>().unwrap(), AssistantProfile::TausePro);
        assert_eq!("Brújula".parse::<AssistantProfile>().unwrap(), AssistantProfile::Brujula);
        assert!("hermes".parse::<AssistantProfile>().is_err());
    }

    #[test]
    fn test_profile_serde_uses_id() {
        let json = serde_json::to_string(&AssistantProfile::TausePro).unwrap();
        assert_eq!(json, format!("\"{}\"", AssistantProfile::TausePro.id()));
    }
}
