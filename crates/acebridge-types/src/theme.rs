// ABOUTME: Static alias table of the engine's bundled themes
// ABOUTME: Maps typed themes to engine identifiers like "ace/theme/chrome" and back

use serde::{Deserialize, Serialize};

/// Theme bundled with the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Theme {
    Ambiance,
    Chaos,
    #[default]
    Chrome,
    Clouds,
    CloudsMidnight,
    Cobalt,
    CrimsonEditor,
    Dawn,
    Dracula,
    Dreamweaver,
    Eclipse,
    Github,
    Gruvbox,
    IdleFingers,
    Iplastic,
    Katzenmilch,
    KrTheme,
    Kuroir,
    Merbivore,
    MerbivoreSoft,
    MonoIndustrial,
    Monokai,
    PastelOnDark,
    SolarizedDark,
    SolarizedLight,
    Sqlserver,
    Terminal,
    Textmate,
    Tomorrow,
    TomorrowNight,
    TomorrowNightBlue,
    TomorrowNightBright,
    TomorrowNightEighties,
    Twilight,
    VibrantInk,
    Xcode,
}

impl Theme {
    /// Every theme in the table, in display order
    pub const ALL: &'static [Theme] = &[
        Theme::Ambiance,
        Theme::Chaos,
        Theme::Chrome,
        Theme::Clouds,
        Theme::CloudsMidnight,
        Theme::Cobalt,
        Theme::CrimsonEditor,
        Theme::Dawn,
        Theme::Dracula,
        Theme::Dreamweaver,
        Theme::Eclipse,
        Theme::Github,
        Theme::Gruvbox,
        Theme::IdleFingers,
        Theme::Iplastic,
        Theme::Katzenmilch,
        Theme::KrTheme,
        Theme::Kuroir,
        Theme::Merbivore,
        Theme::MerbivoreSoft,
        Theme::MonoIndustrial,
        Theme::Monokai,
        Theme::PastelOnDark,
        Theme::SolarizedDark,
        Theme::SolarizedLight,
        Theme::Sqlserver,
        Theme::Terminal,
        Theme::Textmate,
        Theme::Tomorrow,
        Theme::TomorrowNight,
        Theme::TomorrowNightBlue,
        Theme::TomorrowNightBright,
        Theme::TomorrowNightEighties,
        Theme::Twilight,
        Theme::VibrantInk,
        Theme::Xcode,
    ];

    /// Engine identifier for this theme
    pub fn alias(self) -> &'static str {
        match self {
            Theme::Ambiance => "ace/theme/ambiance",
            Theme::Chaos => "ace/theme/chaos",
            Theme::Chrome => "ace/theme/chrome",
            Theme::Clouds => "ace/theme/clouds",
            Theme::CloudsMidnight => "ace/theme/clouds_midnight",
            Theme::Cobalt => "ace/theme/cobalt",
            Theme::CrimsonEditor => "ace/theme/crimson_editor",
            Theme::Dawn => "ace/theme/dawn",
            Theme::Dracula => "ace/theme/dracula",
            Theme::Dreamweaver => "ace/theme/dreamweaver",
            Theme::Eclipse => "ace/theme/eclipse",
            Theme::Github => "ace/theme/github",
            Theme::Gruvbox => "ace/theme/gruvbox",
            Theme::IdleFingers => "ace/theme/idle_fingers",
            Theme::Iplastic => "ace/theme/iplastic",
            Theme::Katzenmilch => "ace/theme/katzenmilch",
            Theme::KrTheme => "ace/theme/kr_theme",
            Theme::Kuroir => "ace/theme/kuroir",
            Theme::Merbivore => "ace/theme/merbivore",
            Theme::MerbivoreSoft => "ace/theme/merbivore_soft",
            Theme::MonoIndustrial => "ace/theme/mono_industrial",
            Theme::Monokai => "ace/theme/monokai",
            Theme::PastelOnDark => "ace/theme/pastel_on_dark",
            Theme::SolarizedDark => "ace/theme/solarized_dark",
            Theme::SolarizedLight => "ace/theme/solarized_light",
            Theme::Sqlserver => "ace/theme/sqlserver",
            Theme::Terminal => "ace/theme/terminal",
            Theme::Textmate => "ace/theme/textmate",
            Theme::Tomorrow => "ace/theme/tomorrow",
            Theme::TomorrowNight => "ace/theme/tomorrow_night",
            Theme::TomorrowNightBlue => "ace/theme/tomorrow_night_blue",
            Theme::TomorrowNightBright => "ace/theme/tomorrow_night_bright",
            Theme::TomorrowNightEighties => "ace/theme/tomorrow_night_eighties",
            Theme::Twilight => "ace/theme/twilight",
            Theme::VibrantInk => "ace/theme/vibrant_ink",
            Theme::Xcode => "ace/theme/xcode",
        }
    }

    /// Whether the theme paints a dark background
    pub fn is_dark(self) -> bool {
        matches!(
            self,
            Theme::Ambiance
                | Theme::Chaos
                | Theme::CloudsMidnight
                | Theme::Cobalt
                | Theme::Dracula
                | Theme::Gruvbox
                | Theme::IdleFingers
                | Theme::KrTheme
                | Theme::Merbivore
                | Theme::MerbivoreSoft
                | Theme::MonoIndustrial
                | Theme::Monokai
                | Theme::PastelOnDark
                | Theme::SolarizedDark
                | Theme::Terminal
                | Theme::TomorrowNight
                | Theme::TomorrowNightBlue
                | Theme::TomorrowNightBright
                | Theme::TomorrowNightEighties
                | Theme::Twilight
                | Theme::VibrantInk
        )
    }

    /// Look up a theme by its engine identifier
    pub fn from_alias(alias: &str) -> Option<Theme> {
        Self::ALL.iter().copied().find(|theme| theme.alias() == alias)
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.alias())
    }
}

impl From<Theme> for &'static str {
    fn from(theme: Theme) -> Self {
        theme.alias()
    }
}

impl TryFrom<String> for Theme {
    type Error = String;

    fn try_from(alias: String) -> Result<Self, Self::Error> {
        Theme::from_alias(&alias).ok_or_else(|| format!("unknown theme alias '{alias}'"))
    }
}

impl std::str::FromStr for Theme {
    type Err = String;

    fn from_str(alias: &str) -> Result<Self, Self::Err> {
        Theme::from_alias(alias).ok_or_else(|| format!("unknown theme alias '{alias}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_round_trip_for_every_theme() {
        for theme in Theme::ALL {
            assert_eq!(Theme::from_alias(theme.alias()), Some(*theme));
        }
    }

    #[test]
    fn test_default_is_chrome() {
        assert_eq!(Theme::default(), Theme::Chrome);
        assert!(!Theme::Chrome.is_dark());
        assert!(Theme::Monokai.is_dark());
    }

    #[test]
    fn test_unknown_alias() {
        assert_eq!(Theme::from_alias("ace/theme/neon"), None);
        assert!(Theme::try_from("chrome".to_string()).is_err());
    }
}
