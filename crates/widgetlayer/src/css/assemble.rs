//! Stylesheet assembly: per-widget rules merged into one stylesheet.

use std::collections::BTreeMap;

use super::prepare::prepare_css;
use super::rules::CompiledRules;
use super::scope::{Breakpoints, Scope};

/// Rules of many widgets merged per scope.
///
/// Merging concatenates: duplicate rules are kept so the browser's last-wins
/// cascade sees them in widget order. Merging is associative, so areas can be
/// aggregated separately and combined later.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleAggregate {
    rules: BTreeMap<Scope, Vec<String>>,
}

impl StyleAggregate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one widget's compiled rules.
    pub fn push(&mut self, compiled: &CompiledRules) {
        for (scope, rules) in compiled.iter() {
            self.rules
                .entry(scope)
                .or_default()
                .extend(rules.iter().cloned());
        }
    }

    /// Appends another aggregate after this one.
    pub fn merge(mut self, other: StyleAggregate) -> Self {
        for (scope, rules) in other.rules {
            self.rules.entry(scope).or_default().extend(rules);
        }
        self
    }

    /// Rules collected for a scope.
    pub fn get(&self, scope: Scope) -> &[String] {
        self.rules.get(&scope).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.rules.values().all(Vec::is_empty)
    }

    /// Renders the stylesheet: scopes in emission order, each non-common scope
    /// inside its media query, then sanitized and minified.
    ///
    /// Returns the empty string when there are no rules.
    pub fn to_css(&self, breakpoints: &Breakpoints) -> String {
        let mut css = String::new();
        for scope in Scope::ALL {
            let rules = self.get(scope);
            if rules.is_empty() {
                continue;
            }
            css.push_str(&scope.wrap(&rules.concat(), breakpoints));
        }

        if css.is_empty() {
            return css;
        }
        prepare_css(&css)
    }
}

impl<'a> FromIterator<&'a CompiledRules> for StyleAggregate {
    fn from_iter<I: IntoIterator<Item = &'a CompiledRules>>(iter: I) -> Self {
        let mut aggregate = StyleAggregate::new();
        for compiled in iter {
            aggregate.push(compiled);
        }
        aggregate
    }
}

/// Assembles compiled widget rules, in the given order, into one stylesheet.
///
/// Works the same for a single widget, which is how inline styles are built.
pub fn assemble(compiled: &[CompiledRules], breakpoints: &Breakpoints) -> String {
    compiled
        .iter()
        .collect::<StyleAggregate>()
        .to_css(breakpoints)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compiled(entries: &[(Scope, &str)]) -> CompiledRules {
        let mut compiled = CompiledRules::default();
        for (scope, rule) in entries {
            compiled
                .rules
                .entry(*scope)
                .or_default()
                .push(rule.to_string());
        }
        compiled
    }

    #[test]
    fn test_assemble_empty() {
        assert_eq!(assemble(&[], &Breakpoints::default()), "");
        assert_eq!(
            assemble(&[CompiledRules::default()], &Breakpoints::default()),
            ""
        );
    }

    #[test]
    fn test_assemble_scope_order_and_wrapping() {
        let a = compiled(&[
            (Scope::Desktop, ".brick .a{height:7rem}"),
            (Scope::Common, ".brick .a{order:0}"),
            (Scope::MobileOnly, ".brick .a{display:none}"),
        ]);
        let b = compiled(&[
            (Scope::Common, ".brick .b{order:2}"),
            (Scope::TabletOnly, ".brick .b{order:5}"),
            (Scope::Tablet, ".brick .b{display:flex}"),
        ]);

        let css = assemble(&[a, b], &Breakpoints::default());
        assert_eq!(
            css,
            ".brick .a{order:0}.brick .b{order:2}\
             @media (max-width:767px){.brick .a{display:none}}\
             @media (min-width:768px){.brick .b{display:flex}}\
             @media (min-width:768px) and (max-width:1024px){.brick .b{order:5}}\
             @media (min-width:1025px){.brick .a{height:7rem}}"
        );
    }

    #[test]
    fn test_duplicates_are_preserved() {
        let a = compiled(&[(Scope::Common, ".x{a:b}")]);
        let css = assemble(&[a.clone(), a], &Breakpoints::default());
        assert_eq!(css, ".x{a:b}.x{a:b}");
    }

    #[test]
    fn test_merge_equals_single_pass() {
        let a = compiled(&[(Scope::Common, ".a{order:0}"), (Scope::Tablet, ".a{x:y}")]);
        let b = compiled(&[(Scope::Tablet, ".b{x:y}")]);
        let c = compiled(&[(Scope::Common, ".c{order:4}"), (Scope::Desktop, ".c{z:w}")]);

        let split = [&a, &b]
            .into_iter()
            .collect::<StyleAggregate>()
            .merge([&c].into_iter().collect());
        let whole: StyleAggregate = [&a, &b, &c].into_iter().collect();
        assert_eq!(split, whole);
    }

    #[test]
    fn test_custom_breakpoints() {
        let bp = Breakpoints {
            desktop_min: 1200,
            ..Breakpoints::default()
        };
        let css = assemble(&[compiled(&[(Scope::Desktop, ".a{b:c}")])], &bp);
        assert_eq!(css, "@media (min-width:1200px){.a{b:c}}");
    }
}
