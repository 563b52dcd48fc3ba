use crate::errors::ConfigError;
use crate::models::Window;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Which window property a rule looks at.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    Class,
    Instance,
    Title,
}

impl Attribute {
    fn value<'w>(self, window: &'w Window) -> Option<&'w str> {
        match self {
            Self::Class => window.class.as_deref(),
            Self::Instance => window.instance.as_deref(),
            Self::Title => window.title.as_deref(),
        }
    }
}

/// Compile a pattern that has to match the whole attribute value.
fn matcher(pattern: &str) -> Result<Regex, ConfigError> {
    Regex::new(&format!("^(?:{pattern})$")).map_err(|source| ConfigError::InvalidMatcher {
        pattern: pattern.to_string(),
        source,
    })
}

/// An entry of the floating blacklist: windows whose attribute matches float.
#[derive(Debug, Clone)]
pub struct FloatRule {
    pub attribute: Attribute,
    matcher: Regex,
}

impl FloatRule {
    /// # Errors
    ///
    /// `ConfigError::InvalidMatcher` if `pattern` is not a valid regex.
    pub fn new(attribute: Attribute, pattern: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            attribute,
            matcher: matcher(pattern)?,
        })
    }

    #[must_use]
    pub fn matches(&self, window: &Window) -> bool {
        self.attribute
            .value(window)
            .is_some_and(|value| self.matcher.is_match(value))
    }
}

/// Selecting by class and/or title, lets the user decide whether a window floats
/// and which group it starts on. Takes precedence over every other hint.
#[derive(Debug, Clone, Default)]
pub struct WindowRule {
    class: Option<Regex>,
    title: Option<Regex>,
    pub floating: Option<bool>,
    pub group: Option<String>,
}

impl WindowRule {
    /// # Errors
    ///
    /// `ConfigError::InvalidMatcher` if a pattern is not a valid regex.
    pub fn new(
        class: Option<&str>,
        title: Option<&str>,
        floating: Option<bool>,
        group: Option<String>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            class: class.map(matcher).transpose()?,
            title: title.map(matcher).transpose()?,
            floating,
            group,
        })
    }

    /// Score the similarity between a window and this rule. Zero means no match.
    ///
    /// Multiple rules might match a class but the most specific one should apply:
    /// title matches score higher than class matches.
    #[must_use]
    pub fn score(&self, window: &Window) -> u8 {
        let class = self.class.as_ref().map(|re| {
            [window.class.as_deref(), window.instance.as_deref()]
                .into_iter()
                .flatten()
                .any(|value| re.is_match(value))
        });
        let title = self
            .title
            .as_ref()
            .map(|re| window.title.as_deref().is_some_and(|value| re.is_match(value)));
        match (class, title) {
            (Some(false), _) | (_, Some(false)) | (None, None) => 0,
            (Some(true), None) => 1,
            (None, Some(true)) => 2,
            (Some(true), Some(true)) => 3,
        }
    }
}

/// The highest scoring rule for `window`, the earliest one on ties.
#[must_use]
pub fn best_rule<'r>(rules: &'r [WindowRule], window: &Window) -> Option<&'r WindowRule> {
    rules
        .iter()
        .map(|rule| (rule.score(window), rule))
        .filter(|(score, _)| *score > 0)
        .fold(None, |best: Option<(u8, &'r WindowRule)>, (score, rule)| match best {
            Some((top, _)) if top >= score => best,
            _ => Some((score, rule)),
        })
        .map(|(_, rule)| rule)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WindowHandle;

    fn window(class: &str, title: &str) -> Window {
        let mut window = Window::new(WindowHandle(1), Some(title.to_string()), None);
        window.class = Some(class.to_string());
        window
    }

    #[test]
    fn float_rules_match_the_whole_value() {
        let rule = FloatRule::new(Attribute::Class, "confirm").expect("valid regex");
        assert!(rule.matches(&window("confirm", "x")));
        assert!(!rule.matches(&window("confirmreset", "x")));
        let rule = FloatRule::new(Attribute::Title, "pinentry.*").expect("valid regex");
        assert!(rule.matches(&window("x", "pinentry-gtk")));
    }

    #[test]
    fn invalid_patterns_are_config_errors() {
        assert!(matches!(
            FloatRule::new(Attribute::Class, "("),
            Err(ConfigError::InvalidMatcher { .. })
        ));
    }

    #[test]
    fn title_rules_beat_class_rules() {
        let rules = vec![
            WindowRule::new(Some("firefox"), None, Some(false), None).expect("valid"),
            WindowRule::new(None, Some("Library"), Some(true), None).expect("valid"),
        ];
        let best = best_rule(&rules, &window("firefox", "Library"));
        assert_eq!(best.and_then(|r| r.floating), Some(true));
        let best = best_rule(&rules, &window("firefox", "Home"));
        assert_eq!(best.and_then(|r| r.floating), Some(false));
        assert!(best_rule(&rules, &window("kitty", "Home")).is_none());
    }

    #[test]
    fn a_failing_part_rejects_the_rule() {
        let rule = WindowRule::new(Some("firefox"), Some("Library"), None, None).expect("valid");
        assert_eq!(rule.score(&window("firefox", "Home")), 0);
        assert_eq!(rule.score(&window("firefox", "Library")), 3);
    }
}
