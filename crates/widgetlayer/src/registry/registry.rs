//! Ordered option catalog and its per-request memo.

use once_cell::unsync::OnceCell;

use super::builtin::base_options;
use super::spec::{OptionSpec, RawOptionSpec};
use crate::hooks::Hooks;
use crate::instance::Instance;

/// Validated option specs keyed by setting name, in registration order.
///
/// When two contributions share a setting name, the later one replaces the
/// earlier one's value while keeping the earlier position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionSpecs {
    specs: Vec<OptionSpec>,
}

impl OptionSpecs {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates contributions into a catalog.
    pub fn from_raw(raw: impl IntoIterator<Item = RawOptionSpec>) -> Self {
        let mut specs = Self::new();
        for entry in raw {
            if let Some(spec) = OptionSpec::from_raw(entry) {
                specs.insert(spec);
            }
        }
        specs
    }

    /// Inserts a spec, replacing an existing one with the same setting name in place.
    pub fn insert(&mut self, spec: OptionSpec) {
        match self.specs.iter_mut().find(|s| s.setting == spec.setting) {
            Some(existing) => *existing = spec,
            None => self.specs.push(spec),
        }
    }

    /// Looks up a spec by setting name.
    pub fn get(&self, setting: &str) -> Option<&OptionSpec> {
        self.specs.iter().find(|s| s.setting == setting)
    }

    /// Iterates over all specs in order.
    pub fn iter(&self) -> impl Iterator<Item = &OptionSpec> {
        self.specs.iter()
    }

    /// Iterates over the specs that apply to widgets with this id base.
    pub fn applicable<'a>(&'a self, id_base: &'a str) -> impl Iterator<Item = &'a OptionSpec> {
        self.specs.iter().filter(move |s| s.applies_to_base(id_base))
    }

    /// Returns the specs both stored in `instance` and applicable to `id_base`.
    ///
    /// Settings stored for widget types a spec excludes are not recognized.
    pub fn recognized<'a>(&'a self, instance: &Instance, id_base: &str) -> Vec<&'a OptionSpec> {
        self.specs
            .iter()
            .filter(|s| s.applies_to_base(id_base) && instance.contains(&s.setting))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

/// Computes the option catalog once and keeps it for the rest of the request.
///
/// The catalog is the theme's base list, filtered through the options hook
/// chain, followed by contributions from configuration. A long-lived process
/// must call [`SettingsRegistry::invalidate`] whenever hooks or stored
/// contributions change.
#[derive(Debug, Default)]
pub struct SettingsRegistry {
    contributed: Vec<RawOptionSpec>,
    cache: OnceCell<OptionSpecs>,
}

impl SettingsRegistry {
    /// Creates a registry with extra contributions appended after the hook chain.
    pub fn new(contributed: Vec<RawOptionSpec>) -> Self {
        Self {
            contributed,
            cache: OnceCell::new(),
        }
    }

    /// Returns the memoized catalog, building it on first use.
    pub fn specs(&self, hooks: &Hooks) -> &OptionSpecs {
        self.cache.get_or_init(|| {
            let mut raw = hooks.apply_options(base_options());
            raw.extend(self.contributed.iter().cloned());
            let specs = OptionSpecs::from_raw(raw);
            tracing::debug!("Built widget option catalog with {} entries", specs.len());
            specs
        })
    }

    /// Drops the memoized catalog so the next access rebuilds it.
    pub fn invalidate(&mut self) {
        self.cache.take();
    }

    /// Returns true if the catalog has been built.
    pub fn is_built(&self) -> bool {
        self.cache.get().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::builtin::{TEXT_ALIGN, TEXT_WIDGET_TITLE, WIDTH};
    use crate::registry::OptionType;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_later_duplicate_replaces_in_place() {
        let specs = OptionSpecs::from_raw(vec![
            RawOptionSpec::new("a").kind(OptionType::Text).label("first"),
            RawOptionSpec::new("b").kind(OptionType::Text),
            RawOptionSpec::new("a").kind(OptionType::Checkbox).label("second"),
        ]);
        let keys: Vec<&str> = specs.iter().map(|s| s.key.as_str()).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(specs.get("a").unwrap().label, "second");
        assert_eq!(specs.get("a").unwrap().option_type, OptionType::Checkbox);
    }

    #[test]
    fn test_recognized_respects_applicability() {
        let specs = OptionSpecs::from_raw(base_options());
        let instance = Instance::new()
            .with(TEXT_WIDGET_TITLE, "large")
            .with(TEXT_ALIGN, "center")
            .with("unrelated", "x");

        let for_text: Vec<&str> = specs
            .recognized(&instance, "text")
            .iter()
            .map(|s| s.setting.as_str())
            .collect();
        assert_eq!(for_text, vec![TEXT_WIDGET_TITLE, TEXT_ALIGN]);

        let for_calendar: Vec<&str> = specs
            .recognized(&instance, "calendar")
            .iter()
            .map(|s| s.setting.as_str())
            .collect();
        assert_eq!(for_calendar, vec![TEXT_ALIGN]);
    }

    #[test]
    fn test_registry_memoizes_until_invalidated() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let mut hooks = Hooks::new();
        hooks.on_options(move |options| {
            counter.fetch_add(1, Ordering::SeqCst);
            options
        });

        let mut registry = SettingsRegistry::default();
        assert!(!registry.is_built());
        registry.specs(&hooks);
        registry.specs(&hooks);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        registry.invalidate();
        assert!(!registry.is_built());
        registry.specs(&hooks);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_malformed_contribution_does_not_break_catalog() {
        let mut hooks = Hooks::new();
        hooks.on_options(|mut options| {
            options.push(RawOptionSpec::new("addon_without_type"));
            options.push(RawOptionSpec::new(""));
            options
        });

        let registry = SettingsRegistry::default();
        let specs = registry.specs(&hooks);
        assert_eq!(specs.len(), base_options().len() + 1);
        assert_eq!(
            specs.get("addon_without_type").unwrap().option_type,
            OptionType::Custom
        );
        assert!(specs.get(WIDTH).is_some());
    }

    #[test]
    fn test_contributed_options_follow_hooked_ones() {
        let registry = SettingsRegistry::new(vec![
            RawOptionSpec::new("from_config").kind(OptionType::Text)
        ]);
        let specs = registry.specs(&Hooks::new());
        assert_eq!(specs.iter().last().unwrap().key, "from_config");
    }
}
