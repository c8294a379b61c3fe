//! `t` directive: keeps an element's text in sync with a translation

use super::{assert_context, BindingValue};
use crate::core::TOptions;
use crate::host::{ComponentInstance, Directive, DirectiveBinding, Element};
use crate::i18n::{logger, I18nContext};
use serde_json::Value;
use std::rc::Rc;

pub struct TranslateDirective;

impl TranslateDirective {
    pub const NAME: &'static str = "t";
}

fn translate(el: &mut Element, value: &BindingValue, context: &I18nContext) {
    let (path, language, args) = value.parts();

    if path.is_none() && language.is_none() && args.is_none() {
        logger::warn("v-t: invalid value");
        return;
    }

    let Some(path) = path else {
        logger::warn("v-t: \"path\" is required");
        return;
    };

    if language.is_some() {
        logger::deprecate("v-t: \"language\" is deprecated. Use the \"lng\" property in args.");
    }

    let mut options = TOptions::new();
    if let Some(lng) = language {
        options.insert("lng".to_string(), Value::String(lng.to_string()));
    }
    if let Some(args) = args {
        options.extend(args.iter().map(|(k, v)| (k.clone(), v.clone())));
    }

    let engine = context.i18n().engine();
    el.set_text_content(engine.t(path, &options));
    el.i18n_language = Some(engine.language());
}

impl Directive for TranslateDirective {
    fn bind(&self, el: &mut Element, binding: &DirectiveBinding, vm: &Rc<ComponentInstance>) {
        if let Some(context) = assert_context(vm) {
            translate(el, &binding.value, context);
        }
    }

    fn update(&self, el: &mut Element, binding: &DirectiveBinding, vm: &Rc<ComponentInstance>) {
        let Some(context) = assert_context(vm) else {
            return;
        };

        let language = context.i18n().language();
        let same_language = el.i18n_language() == Some(language.as_str());
        let same_value = binding.old_value.as_ref() == Some(&binding.value);
        if same_language && same_value {
            return;
        }

        translate(el, &binding.value, context);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::AdapterOptions;
    use crate::engine::MemoryEngine;
    use crate::host::{ComponentDefinition, Framework, ManualScheduler};
    use crate::i18n::{install, I18n};
    use crate::test_support::capture_warnings;
    use serde_json::json;

    struct Fixture {
        engine: MemoryEngine,
        framework: Framework,
        vm: Rc<ComponentInstance>,
        _i18n: Rc<I18n>,
    }

    fn fixture() -> Fixture {
        let engine = MemoryEngine::builder()
            .resource_bundle(
                "en",
                "translation",
                json!({ "title": "Welcome", "greeting": "Hello {{name}}" }),
            )
            .resource_bundle(
                "de",
                "translation",
                json!({ "title": "Willkommen", "greeting": "Hallo {{name}}" }),
            )
            .build();
        let i18n = I18n::new(
            Rc::new(engine.clone()),
            AdapterOptions::default(),
            Rc::new(ManualScheduler::new()),
        );
        let mut framework = Framework::new();
        install(&mut framework).unwrap();
        let vm = framework.create_instance(ComponentDefinition::named("app").with_i18n(&i18n), None);
        Fixture {
            engine,
            framework,
            vm,
            _i18n: i18n,
        }
    }

    fn args(value: serde_json::Value) -> TOptions {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn test_bind_sets_text_from_path() {
        let f = fixture();
        let mut el = Element::new("h1");
        f.framework
            .bind_directive("t", &mut el, &DirectiveBinding::new("title".into()), &f.vm);

        assert_eq!(el.text_content(), "Welcome");
        assert_eq!(el.i18n_language(), Some("en"));
    }

    #[test]
    fn test_bind_with_args() {
        let f = fixture();
        let mut el = Element::new("p");
        let binding = DirectiveBinding::new(BindingValue::detailed("greeting", args(json!({ "name": "Ada" }))));
        f.framework.bind_directive("t", &mut el, &binding, &f.vm);
        assert_eq!(el.text_content(), "Hello Ada");

        let binding = DirectiveBinding::new(BindingValue::detailed(
            "greeting",
            args(json!({ "name": "Ada", "lng": "de" })),
        ));
        f.framework.bind_directive("t", &mut el, &binding, &f.vm);
        assert_eq!(el.text_content(), "Hallo Ada");
    }

    #[test]
    fn test_language_field_is_deprecated_but_applied() {
        let f = fixture();
        let mut el = Element::new("p");
        let binding = DirectiveBinding::new(BindingValue::Detailed {
            path: Some("title".into()),
            language: Some("de".into()),
            args: None,
        });

        let (_, logs) = capture_warnings(|| f.framework.bind_directive("t", &mut el, &binding, &f.vm));

        assert_eq!(el.text_content(), "Willkommen");
        assert_eq!(logs.len(), 1);
        assert!(logs[0].starts_with("[i18n-bridge deprecated]: v-t: \"language\" is deprecated"));
    }

    #[test]
    fn test_invalid_values_leave_element_untouched() {
        let f = fixture();
        let mut el = Element::new("p");

        let (_, logs) = capture_warnings(|| {
            f.framework
                .bind_directive("t", &mut el, &DirectiveBinding::new(BindingValue::default()), &f.vm);
            let no_path = BindingValue::Detailed {
                path: None,
                language: None,
                args: Some(args(json!({ "name": "Ada" }))),
            };
            f.framework
                .bind_directive("t", &mut el, &DirectiveBinding::new(no_path), &f.vm);
        });

        assert_eq!(
            logs,
            vec![
                "[i18n-bridge warn]: v-t: invalid value",
                "[i18n-bridge warn]: v-t: \"path\" is required",
            ]
        );
        assert_eq!(el.mutations(), 0);
    }

    #[test]
    fn test_missing_context_warns() {
        let f = fixture();
        let orphan = f.framework.create_instance(ComponentDefinition::named("orphan"), None);
        let mut el = Element::new("p");

        let (_, logs) = capture_warnings(|| {
            f.framework
                .bind_directive("t", &mut el, &DirectiveBinding::new("title".into()), &orphan)
        });

        assert_eq!(logs, vec!["[i18n-bridge warn]: No i18n instance found in the component"]);
        assert_eq!(el.mutations(), 0);
    }

    #[test]
    fn test_update_skips_when_nothing_changed() {
        let f = fixture();
        let mut el = Element::new("p");
        let binding = DirectiveBinding::new("title".into());
        f.framework.bind_directive("t", &mut el, &binding, &f.vm);
        assert_eq!(el.mutations(), 1);

        let unchanged = binding.next("title".into());
        f.framework.update_directive("t", &mut el, &unchanged, &f.vm);
        f.framework.update_directive("t", &mut el, &unchanged.next("title".into()), &f.vm);
        assert_eq!(el.mutations(), 1);
    }

    #[test]
    fn test_update_compares_detailed_values_structurally() {
        let f = fixture();
        let mut el = Element::new("p");
        let value = BindingValue::detailed("greeting", args(json!({ "name": "Ada" })));
        let binding = DirectiveBinding::new(value.clone());
        f.framework.bind_directive("t", &mut el, &binding, &f.vm);

        f.framework
            .update_directive("t", &mut el, &binding.next(value.clone()), &f.vm);
        assert_eq!(el.mutations(), 1);

        let changed = BindingValue::detailed("greeting", args(json!({ "name": "Bob" })));
        f.framework
            .update_directive("t", &mut el, &binding.next(changed), &f.vm);
        assert_eq!(el.mutations(), 2);
        assert_eq!(el.text_content(), "Hello Bob");
    }

    #[test]
    fn test_update_retranslates_after_language_change() {
        let f = fixture();
        let mut el = Element::new("p");
        let binding = DirectiveBinding::new("title".into());
        f.framework.bind_directive("t", &mut el, &binding, &f.vm);

        f.engine.change_language("de");
        f.framework
            .update_directive("t", &mut el, &binding.next("title".into()), &f.vm);

        assert_eq!(el.text_content(), "Willkommen");
        assert_eq!(el.i18n_language(), Some("de"));
        assert_eq!(el.mutations(), 2);
    }
}
