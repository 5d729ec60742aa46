//! The widget layer: configuration, storage, hooks and the settings catalog
//! wired together behind the operations a page render needs.

use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;
use once_cell::unsync::OnceCell;
use regex::Regex;

use crate::classes::compile_classes;
use crate::config::LayerConfig;
use crate::css::{assemble, compile_rules, CompiledRules, StyleAggregate};
use crate::error::Result;
use crate::escape::esc_attr;
use crate::extensions::{self, Extension, DIVIDER_ID_BASE};
use crate::form::{FormRenderer, FormTarget};
use crate::hooks::Hooks;
use crate::instance::Instance;
use crate::media::{MediaLibrary, NoMedia};
use crate::registry::{OptionSpecs, SettingsRegistry};
use crate::resolve::{find_occurrence, resolve, WidgetOccurrence};
use crate::store::WidgetStore;
use crate::update::sanitize_instance;

static CLASS_ATTR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)(?:^|\s)class\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("valid regex")
});

/// How the current page is being rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderContext {
    /// The page is a live customization preview. Styles are then emitted
    /// inline per widget instead of in the aggregated stylesheet.
    pub live_preview: bool,
}

impl RenderContext {
    /// A regular page view.
    pub fn page() -> Self {
        Self::default()
    }

    /// A live customization preview.
    pub fn preview() -> Self {
        Self { live_preview: true }
    }
}

/// Wrapper markup of one widget as handed over by the page renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WidgetParams {
    pub widget_id: String,
    pub before_widget: String,
    pub after_widget: String,
    /// `<style>` element to print before the widget (live preview only).
    pub inline_style: Option<String>,
}

impl WidgetParams {
    pub fn new(
        widget_id: impl Into<String>,
        before_widget: impl Into<String>,
        after_widget: impl Into<String>,
    ) -> Self {
        Self {
            widget_id: widget_id.into(),
            before_widget: before_widget.into(),
            after_widget: after_widget.into(),
            inline_style: None,
        }
    }
}

/// A configured widget layer over a widget store.
///
/// # Example
///
/// ```rust
/// use widgetlayer::{Instance, LayerConfig, RenderContext, Snapshot, WidgetLayer};
///
/// let store = Snapshot::new()
///     .place("home-widgetlayer-1", "text-2")
///     .store("text", 2, Instance::new().with("bayleaf_text_align", "center"));
/// let layer = WidgetLayer::new(LayerConfig::default(), store);
///
/// assert_eq!(
///     layer.aggregated_stylesheet(&RenderContext::page()),
///     ".brick .text-2{order:0;text-align:center}"
/// );
/// assert_eq!(layer.occurrence_classes("text-2"), "brick-0");
/// ```
pub struct WidgetLayer<S> {
    config: LayerConfig,
    store: S,
    hooks: Hooks,
    registry: SettingsRegistry,
    media: Arc<dyn MediaLibrary + Send + Sync>,
    forms: OnceCell<FormRenderer>,
}

impl<S: fmt::Debug> fmt::Debug for WidgetLayer<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetLayer")
            .field("config", &self.config)
            .field("store", &self.store)
            .field("hooks", &self.hooks)
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

impl<S: WidgetStore> WidgetLayer<S> {
    /// Creates a layer without hooks and with an empty media library.
    pub fn new(config: LayerConfig, store: S) -> Self {
        let registry = SettingsRegistry::new(config.options.clone());
        Self {
            config,
            store,
            hooks: Hooks::new(),
            registry,
            media: Arc::new(NoMedia),
            forms: OnceCell::new(),
        }
    }

    /// Replaces all hook chains.
    pub fn with_hooks(mut self, hooks: Hooks) -> Self {
        self.hooks = hooks;
        self.registry.invalidate();
        self
    }

    /// Registers an extension's filters after the existing ones.
    pub fn with_extension(mut self, extension: impl Extension) -> Self {
        extension.register(&mut self.hooks);
        self.registry.invalidate();
        self
    }

    /// Registers the theme's built-in extensions.
    ///
    /// The featured image extension resolves images through the media library
    /// set at this point, so call [`with_media`](Self::with_media) first.
    pub fn with_builtin_extensions(mut self) -> Self {
        for extension in extensions::builtin(Arc::clone(&self.media)) {
            extension.register(&mut self.hooks);
        }
        self.registry.invalidate();
        self
    }

    pub fn with_media(mut self, media: impl MediaLibrary + Send + Sync + 'static) -> Self {
        self.media = Arc::new(media);
        self
    }

    pub fn config(&self) -> &LayerConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn hooks(&self) -> &Hooks {
        &self.hooks
    }

    /// Mutable access to the hook chains. Drops the memoized option catalog.
    pub fn hooks_mut(&mut self) -> &mut Hooks {
        self.registry.invalidate();
        &mut self.hooks
    }

    /// The option catalog, built on first use.
    pub fn option_specs(&self) -> &OptionSpecs {
        self.registry.specs(&self.hooks)
    }

    /// Drops the memoized option catalog.
    pub fn invalidate(&mut self) {
        self.registry.invalidate();
    }

    /// All widgets of the tracked areas, in canonical order.
    pub fn occurrences(&self) -> Vec<WidgetOccurrence> {
        resolve(&self.store, &self.config.areas)
    }

    fn find(&self, widget_id: &str) -> Option<WidgetOccurrence> {
        find_occurrence(&self.store, &self.config.areas, widget_id)
    }

    fn compile(&self, occurrence: &WidgetOccurrence) -> CompiledRules {
        compile_rules(
            occurrence,
            self.option_specs(),
            &self.hooks,
            &self.config.container_class,
        )
    }

    /// The stylesheet for all tracked widgets.
    ///
    /// Empty during a live preview, where every widget carries its own
    /// inline style instead.
    pub fn aggregated_stylesheet(&self, context: &RenderContext) -> String {
        if context.live_preview {
            return String::new();
        }

        let occurrences = self.occurrences();
        let aggregate: StyleAggregate = occurrences
            .iter()
            .map(|occurrence| self.compile(occurrence))
            .collect::<Vec<_>>()
            .iter()
            .collect();
        let css = aggregate.to_css(&self.config.breakpoints);
        tracing::debug!(
            "Assembled widget layer stylesheet from {} widgets ({} bytes)",
            occurrences.len(),
            css.len()
        );
        css
    }

    /// Space-separated classes of a tracked widget, or an empty string.
    pub fn occurrence_classes(&self, widget_id: &str) -> String {
        match self.find(widget_id) {
            Some(occurrence) => self.classes(&occurrence),
            None => String::new(),
        }
    }

    fn classes(&self, occurrence: &WidgetOccurrence) -> String {
        compile_classes(occurrence, self.option_specs(), &self.hooks).join(" ")
    }

    /// The stylesheet of a single tracked widget, or an empty string.
    pub fn inline_style(&self, widget_id: &str) -> String {
        match self.find(widget_id) {
            Some(occurrence) => self.occurrence_style(&occurrence),
            None => String::new(),
        }
    }

    fn occurrence_style(&self, occurrence: &WidgetOccurrence) -> String {
        assemble(&[self.compile(occurrence)], &self.config.breakpoints)
    }

    /// Injects classes and extra markup into a tracked widget's wrapper.
    ///
    /// The container class token inside the first `class` attribute of
    /// `before_widget` that carries it becomes `<container> <widget id>
    /// <classes>`. Widgets outside the tracked areas are returned unchanged.
    pub fn decorate(&self, params: WidgetParams, context: &RenderContext) -> WidgetParams {
        let Some(occurrence) = self.find(&params.widget_id) else {
            return params;
        };

        let marker = &self.config.container_class;
        let mut tokens = esc_attr(&occurrence.id);
        let classes = self.classes(&occurrence);
        if !classes.is_empty() {
            tokens.push(' ');
            tokens.push_str(&classes);
        }

        let mut before = append_after_class_token(&params.before_widget, marker, &tokens);
        let mut after = params.after_widget;

        if occurrence.id_base == DIVIDER_ID_BASE {
            before = before.replacen("<section", "<span aria-hidden=\"true\"", 1);
            after = "</span>".to_string();
        }

        before.push_str(&self.hooks.apply_before_content(&occurrence));
        after.insert_str(0, &self.hooks.apply_after_content(&occurrence));

        let inline_style = if context.live_preview {
            let css = self.occurrence_style(&occurrence);
            (!css.is_empty()).then(|| format!("<style>{}</style>", css))
        } else {
            params.inline_style
        };

        WidgetParams {
            widget_id: params.widget_id,
            before_widget: before,
            after_widget: after,
            inline_style,
        }
    }

    /// Sanitizes submitted settings of a widget and merges them into its
    /// stored instance.
    pub fn sanitize(&self, id_base: &str, old: &Instance, submitted: &Instance) -> Instance {
        sanitize_instance(
            self.option_specs(),
            id_base,
            old,
            submitted,
            &self.hooks,
            self.media.as_ref(),
        )
    }

    /// Renders the settings form section of a widget.
    pub fn render_form(&self, target: &FormTarget, instance: &Instance) -> Result<String> {
        let forms = self.forms.get_or_try_init(FormRenderer::new)?;
        forms.render(
            self.option_specs(),
            target,
            instance,
            &self.hooks,
            self.media.as_ref(),
        )
    }
}

/// Inserts ` <extra>` after the first whole `token` found in a `class`
/// attribute of `markup`. Text outside class attributes is never touched.
fn append_after_class_token(markup: &str, token: &str, extra: &str) -> String {
    let found = CLASS_ATTR.captures_iter(markup).find_map(|caps| {
        let value = caps.get(1).or_else(|| caps.get(2))?;
        class_token_end(value.as_str(), token).map(|end| value.start() + end)
    });
    match found {
        Some(at) => {
            let mut out = markup.to_string();
            out.insert_str(at, &format!(" {}", extra));
            out
        }
        None => markup.to_string(),
    }
}

/// Byte offset just past the first whitespace-delimited `token` in `classes`.
fn class_token_end(classes: &str, token: &str) -> Option<usize> {
    if token.is_empty() {
        return None;
    }
    classes.match_indices(token).find_map(|(start, _)| {
        let end = start + token.len();
        let open = classes[..start].chars().next_back().map_or(true, char::is_whitespace);
        let close = classes[end..].chars().next().map_or(true, char::is_whitespace);
        (open && close).then_some(end)
    })
}
