//! Known OAuth providers.

/// Providers with built-in endpoint presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    Google,
    Microsoft,
}

impl ProviderKind {
    /// Get the provider identifier string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Google => "google",
            ProviderKind::Microsoft => "microsoft",
        }
    }

    /// Look up a provider by its identifier string.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "google" => Some(ProviderKind::Google),
            "microsoft" => Some(ProviderKind::Microsoft),
            _ => None,
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_kind_as_str() {
        assert_eq!(ProviderKind::Google.as_str(), "google");
        assert_eq!(ProviderKind::Microsoft.as_str(), "microsoft");
    }

    #[test]
    fn test_provider_kind_from_name() {
        assert_eq!(ProviderKind::from_name("google"), Some(ProviderKind::Google));
        assert_eq!(ProviderKind::from_name("microsoft"), Some(ProviderKind::Microsoft));
        assert_eq!(ProviderKind::from_name("Google"), None);
        assert_eq!(ProviderKind::from_name("github"), None);
    }
}
