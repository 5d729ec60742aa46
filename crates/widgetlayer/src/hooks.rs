//! Extension points.
//!
//! Add-ons customize the widget layer through ordered filter chains. Every
//! chain receives the current value plus context and returns the new value;
//! filters run in registration order, each seeing the previous one's output.
//!
//! | Chain | Value | Context |
//! |-------|-------|---------|
//! | options | option contributions | none |
//! | rules | [`RuleSet`] of one widget | [`WidgetOccurrence`] |
//! | classes | class tokens of one widget | [`WidgetOccurrence`] |
//! | before / after content | wrapper markup | [`WidgetOccurrence`] |
//! | custom form | field markup | [`CustomField`] |
//! | custom update | sanitized value | setting name, submitted instance |
//!
//! # Example
//!
//! ```rust
//! use widgetlayer::{Hooks, Scope};
//!
//! let mut hooks = Hooks::new();
//! hooks.on_rules(|mut rules, occurrence| {
//!     if occurrence.id_base == "calendar" {
//!         rules.push(Scope::Desktop, "min-height:20rem");
//!     }
//!     rules
//! });
//! ```

use std::fmt;
use std::sync::Arc;

use crate::css::RuleSet;
use crate::instance::Instance;
use crate::registry::RawOptionSpec;
use crate::resolve::WidgetOccurrence;

type OptionsFilter = Arc<dyn Fn(Vec<RawOptionSpec>) -> Vec<RawOptionSpec> + Send + Sync>;
type RulesFilter = Arc<dyn Fn(RuleSet, &WidgetOccurrence) -> RuleSet + Send + Sync>;
type ClassesFilter = Arc<dyn Fn(Vec<String>, &WidgetOccurrence) -> Vec<String> + Send + Sync>;
type ContentFilter = Arc<dyn Fn(String, &WidgetOccurrence) -> String + Send + Sync>;
type CustomFormFilter = Arc<dyn Fn(String, &CustomField<'_>) -> String + Send + Sync>;
type CustomUpdateFilter = Arc<dyn Fn(String, &str, &Instance) -> String + Send + Sync>;

/// A custom-type setting being rendered in the settings form.
#[derive(Debug, Clone, Copy)]
pub struct CustomField<'a> {
    /// Setting name.
    pub setting: &'a str,
    /// Form field id attribute.
    pub id: &'a str,
    /// Form field name attribute.
    pub name: &'a str,
    /// Currently stored value.
    pub value: &'a str,
}

/// Registered filter chains.
#[derive(Clone, Default)]
pub struct Hooks {
    options: Vec<OptionsFilter>,
    rules: Vec<RulesFilter>,
    classes: Vec<ClassesFilter>,
    before_content: Vec<ContentFilter>,
    after_content: Vec<ContentFilter>,
    custom_form: Vec<CustomFormFilter>,
    custom_update: Vec<CustomUpdateFilter>,
}

impl Hooks {
    /// Creates an empty set of hooks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Filters the option contributions before they are validated.
    pub fn on_options<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(Vec<RawOptionSpec>) -> Vec<RawOptionSpec> + Send + Sync + 'static,
    {
        self.options.push(Arc::new(f));
        self
    }

    /// Filters the CSS rule buckets of each widget.
    pub fn on_rules<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(RuleSet, &WidgetOccurrence) -> RuleSet + Send + Sync + 'static,
    {
        self.rules.push(Arc::new(f));
        self
    }

    /// Filters the class tokens of each widget.
    pub fn on_classes<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(Vec<String>, &WidgetOccurrence) -> Vec<String> + Send + Sync + 'static,
    {
        self.classes.push(Arc::new(f));
        self
    }

    /// Filters markup inserted right after the widget's opening tag.
    pub fn on_before_content<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(String, &WidgetOccurrence) -> String + Send + Sync + 'static,
    {
        self.before_content.push(Arc::new(f));
        self
    }

    /// Filters markup inserted right before the widget's closing tag.
    pub fn on_after_content<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(String, &WidgetOccurrence) -> String + Send + Sync + 'static,
    {
        self.after_content.push(Arc::new(f));
        self
    }

    /// Provides form markup for custom-type settings.
    ///
    /// The returned markup is inserted unescaped.
    pub fn on_custom_form<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(String, &CustomField<'_>) -> String + Send + Sync + 'static,
    {
        self.custom_form.push(Arc::new(f));
        self
    }

    /// Sanitizes submitted values of custom-type settings.
    pub fn on_custom_update<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(String, &str, &Instance) -> String + Send + Sync + 'static,
    {
        self.custom_update.push(Arc::new(f));
        self
    }

    pub(crate) fn apply_options(&self, options: Vec<RawOptionSpec>) -> Vec<RawOptionSpec> {
        self.options.iter().fold(options, |acc, f| f(acc))
    }

    pub(crate) fn apply_rules(&self, rules: RuleSet, occurrence: &WidgetOccurrence) -> RuleSet {
        self.rules.iter().fold(rules, |acc, f| f(acc, occurrence))
    }

    pub(crate) fn apply_classes(
        &self,
        classes: Vec<String>,
        occurrence: &WidgetOccurrence,
    ) -> Vec<String> {
        self.classes.iter().fold(classes, |acc, f| f(acc, occurrence))
    }

    pub(crate) fn apply_before_content(&self, occurrence: &WidgetOccurrence) -> String {
        self.before_content
            .iter()
            .fold(String::new(), |acc, f| f(acc, occurrence))
    }

    pub(crate) fn apply_after_content(&self, occurrence: &WidgetOccurrence) -> String {
        self.after_content
            .iter()
            .fold(String::new(), |acc, f| f(acc, occurrence))
    }

    pub(crate) fn apply_custom_form(&self, field: &CustomField<'_>) -> String {
        self.custom_form
            .iter()
            .fold(String::new(), |acc, f| f(acc, field))
    }

    pub(crate) fn apply_custom_update(&self, setting: &str, submitted: &Instance) -> String {
        self.custom_update
            .iter()
            .fold(String::new(), |acc, f| f(acc, setting, submitted))
    }
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("options", &self.options.len())
            .field("rules", &self.rules.len())
            .field("classes", &self.classes.len())
            .field("before_content", &self.before_content.len())
            .field("after_content", &self.after_content.len())
            .field("custom_form", &self.custom_form.len())
            .field("custom_update", &self.custom_update.len())
            .finish()
    }
}
