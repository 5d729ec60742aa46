//! Rule compiler: widget settings to scoped CSS rules.
//!
//! Each recognized setting maps to zero or more declarations tagged with a
//! [`Scope`]:
//!
//! | Setting | Value | Declarations | Scope |
//! |---------|-------|--------------|-------|
//! | vertical alignment | `middle` | `display:flex`, `flex-direction:column`, `justify-content:center` | tablet |
//! | vertical alignment | `bottom` | `display:flex`, `flex-direction:column`, `justify-content:flex-end` | tablet |
//! | text alignment | `center` / `right` | `text-align:<value>` | common |
//! | hide on mobile | checked | `display:none` | mobile_only |
//! | push down (mobile) | checked | `order:<2(p+1)+1>` | mobile_only |
//! | push down (tablet) | checked | `order:<2(p+1)+1>` | tablet_only |
//!
//! # Ordering
//!
//! Every widget gets `order:<2p>` in the common scope, where `p` is its
//! position. Pushing a widget down gives it `2(p+1)+1`: one past the default
//! order of the next widget, and below the default of the one after that.
//! Odd slots stay free for widgets injected between stored ones.

use std::collections::BTreeMap;

use crate::escape::css_ident;
use crate::hooks::Hooks;
use crate::registry::builtin::{HIDE_ON_MOBILE, PUSH_DOWN, PUSH_DOWN_TABLET, TEXT_ALIGN, VERT_ALIGN};
use crate::registry::OptionSpecs;
use crate::resolve::WidgetOccurrence;

use super::scope::Scope;

/// Default flex order of the widget at `position`.
pub fn default_order(position: usize) -> usize {
    2 * position
}

/// Flex order of a pushed-down widget at `position`.
pub fn pushed_down_order(position: usize) -> usize {
    2 * (position + 1) + 1
}

/// Where the declarations of a bucket end up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BucketTarget {
    /// Declarations for the widget itself, wrapped in its selector.
    Widget(Scope),
    /// Complete rules appended verbatim to a scope, e.g. rules a widget
    /// needs to apply to its next sibling.
    Raw(Scope),
}

/// The rule buckets of one widget before selector wrapping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleSet {
    buckets: BTreeMap<BucketTarget, Vec<String>>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a declaration (`property:value`) for the widget.
    pub fn push(&mut self, scope: Scope, declaration: impl Into<String>) -> &mut Self {
        self.bucket(BucketTarget::Widget(scope)).push(declaration.into());
        self
    }

    /// Adds a complete rule (`selector{...}`) to a scope as-is.
    pub fn push_raw(&mut self, scope: Scope, rule: impl Into<String>) -> &mut Self {
        self.bucket(BucketTarget::Raw(scope)).push(rule.into());
        self
    }

    /// Declarations for the widget in a scope.
    pub fn declarations(&self, scope: Scope) -> &[String] {
        self.get(BucketTarget::Widget(scope))
    }

    /// Raw rules redirected into a scope.
    pub fn raw(&self, scope: Scope) -> &[String] {
        self.get(BucketTarget::Raw(scope))
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.values().all(Vec::is_empty)
    }

    /// Wraps widget declarations in `selector{...}` and merges raw rules after them.
    pub fn into_compiled(self, selector: &str) -> CompiledRules {
        let mut compiled = CompiledRules::default();
        // Widget buckets sort before raw buckets, so redirected rules land last.
        for (target, entries) in self.buckets {
            if entries.is_empty() {
                continue;
            }
            match target {
                BucketTarget::Widget(scope) => {
                    let rule = format!("{}{{{}}}", selector, entries.join(";"));
                    compiled.rules.entry(scope).or_default().push(rule);
                }
                BucketTarget::Raw(scope) => {
                    compiled.rules.entry(scope).or_default().extend(entries);
                }
            }
        }
        compiled
    }

    fn bucket(&mut self, target: BucketTarget) -> &mut Vec<String> {
        self.buckets.entry(target).or_default()
    }

    fn get(&self, target: BucketTarget) -> &[String] {
        self.buckets.get(&target).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Complete CSS rules of one or more widgets, per scope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompiledRules {
    pub(crate) rules: BTreeMap<Scope, Vec<String>>,
}

impl CompiledRules {
    /// Rules in a scope, in insertion order.
    pub fn get(&self, scope: Scope) -> &[String] {
        self.rules.get(&scope).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterates over non-empty scopes in emission order.
    pub fn iter(&self) -> impl Iterator<Item = (Scope, &[String])> {
        self.rules
            .iter()
            .filter(|(_, rules)| !rules.is_empty())
            .map(|(scope, rules)| (*scope, rules.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.rules.values().all(Vec::is_empty)
    }
}

/// Returns the selector targeting one widget inside the layer container.
pub fn widget_selector(container_class: &str, widget_id: &str) -> String {
    format!(".{} .{}", css_ident(container_class), css_ident(widget_id))
}

/// Builds the rule buckets of one widget from its settings and the rules hook chain.
pub fn build_rule_set(occurrence: &WidgetOccurrence, specs: &OptionSpecs, hooks: &Hooks) -> RuleSet {
    let position = occurrence.position;
    let mut rules = RuleSet::new();
    rules.push(Scope::Common, format!("order:{}", default_order(position)));

    for spec in specs.recognized(&occurrence.instance, &occurrence.id_base) {
        let Some(value) = occurrence
            .instance
            .get_str(&spec.setting)
            .filter(|v| !v.is_empty())
        else {
            continue;
        };

        match spec.setting.as_str() {
            VERT_ALIGN => {
                let justify = match value.as_str() {
                    "middle" => "center",
                    "bottom" => "flex-end",
                    _ => continue,
                };
                rules
                    .push(Scope::Tablet, "display:flex")
                    .push(Scope::Tablet, "flex-direction:column")
                    .push(Scope::Tablet, format!("justify-content:{}", justify));
            }
            TEXT_ALIGN => {
                if matches!(value.as_str(), "center" | "right") {
                    rules.push(Scope::Common, format!("text-align:{}", value));
                }
            }
            HIDE_ON_MOBILE => {
                rules.push(Scope::MobileOnly, "display:none");
            }
            PUSH_DOWN => {
                rules.push(
                    Scope::MobileOnly,
                    format!("order:{}", pushed_down_order(position)),
                );
            }
            PUSH_DOWN_TABLET => {
                rules.push(
                    Scope::TabletOnly,
                    format!("order:{}", pushed_down_order(position)),
                );
            }
            _ => {}
        }
    }

    hooks.apply_rules(rules, occurrence)
}

/// Compiles one widget into complete, scoped CSS rules.
pub fn compile_rules(
    occurrence: &WidgetOccurrence,
    specs: &OptionSpecs,
    hooks: &Hooks,
    container_class: &str,
) -> CompiledRules {
    build_rule_set(occurrence, specs, hooks)
        .into_compiled(&widget_selector(container_class, &occurrence.id))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::instance::Instance;
    use crate::registry::builtin::base_options;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn pushed_down_sorts_between_next_two(position in 0usize..10_000) {
            let pushed = pushed_down_order(position);
            prop_assert!(pushed > default_order(position + 1));
            prop_assert!(pushed < default_order(position + 2));
        }

        #[test]
        fn every_widget_gets_its_default_order(position in 0usize..500, push in prop::bool::ANY) {
            let mut instance = Instance::new();
            if push {
                instance.insert(PUSH_DOWN, "yes");
            }
            let occurrence = WidgetOccurrence::new("text-1", "a", position, "text", instance);
            let specs = OptionSpecs::from_raw(base_options());
            let rules = build_rule_set(&occurrence, &specs, &Hooks::new());

            prop_assert_eq!(
                rules.declarations(Scope::Common)[0].clone(),
                format!("order:{}", 2 * position)
            );
            prop_assert_eq!(rules.declarations(Scope::MobileOnly).len(), usize::from(push));
        }
    }
}
