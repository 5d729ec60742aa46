//! Responsive scopes and their media queries.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Viewport width thresholds, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Breakpoints {
    /// Widest mobile viewport.
    pub mobile_max: u32,
    /// Narrowest tablet viewport.
    pub tablet_min: u32,
    /// Widest tablet viewport.
    pub tablet_max: u32,
    /// Narrowest desktop viewport.
    pub desktop_min: u32,
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self {
            mobile_max: 767,
            tablet_min: 768,
            tablet_max: 1024,
            desktop_min: 1025,
        }
    }
}

/// A responsive bucket of CSS rules.
///
/// Scopes sort in emission order: rules for `Common` come first and are not
/// wrapped; every other scope renders inside its media query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Scope {
    /// All viewport widths.
    Common,
    /// Mobile viewports only.
    MobileOnly,
    /// Tablet and wider.
    Tablet,
    /// Tablet viewports only.
    TabletOnly,
    /// Desktop viewports.
    Desktop,
}

impl Scope {
    /// All scopes in emission order.
    pub const ALL: [Scope; 5] = [
        Scope::Common,
        Scope::MobileOnly,
        Scope::Tablet,
        Scope::TabletOnly,
        Scope::Desktop,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Scope::Common => "common",
            Scope::MobileOnly => "mobile_only",
            Scope::Tablet => "tablet",
            Scope::TabletOnly => "tablet_only",
            Scope::Desktop => "desktop",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Scope::ALL.into_iter().find(|s| s.as_str() == name)
    }

    /// Returns the media query condition for this scope, `None` for `Common`.
    pub fn media_query(self, breakpoints: &Breakpoints) -> Option<String> {
        match self {
            Scope::Common => None,
            Scope::MobileOnly => Some(format!("(max-width: {}px)", breakpoints.mobile_max)),
            Scope::Tablet => Some(format!("(min-width: {}px)", breakpoints.tablet_min)),
            Scope::TabletOnly => Some(format!(
                "(min-width: {}px) and (max-width: {}px)",
                breakpoints.tablet_min, breakpoints.tablet_max
            )),
            Scope::Desktop => Some(format!("(min-width: {}px)", breakpoints.desktop_min)),
        }
    }

    /// Wraps a block of rules for this scope.
    pub fn wrap(self, body: &str, breakpoints: &Breakpoints) -> String {
        match self.media_query(breakpoints) {
            None => body.to_string(),
            Some(query) => format!("@media {} {{{}}}", query, body),
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
