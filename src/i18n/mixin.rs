//! Installation mixin: gives every component instance its i18n context
//!
//! Runs once per instance, before the instance is handed to its creator:
//! 1. pick the root adapter (explicit on the definition, else the parent's)
//! 2. compute the component namespace
//! 3. deep-merge inline resources (and explicit `messages`)
//! 4. resolve instance options: explicit, inherited from the parent, or
//!    just the component namespace when only inline resources exist
//! 5. insert merged resources into the engine store, one bundle per language
//! 6. bind the translator and subscribe the instance to `loaded_at`

use super::context::{I18nContext, InstanceOptions};
use super::{logger, I18n};
use crate::core::{deep_merge, AdapterOptions, ComponentNamespace, Result};
use crate::host::{ComponentInstance, Mixin};
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use std::rc::Rc;

pub struct InstallMixin;

/// Namespace from the component's name or tag; a random id otherwise
pub fn default_component_namespace(vm: &ComponentInstance) -> ComponentNamespace {
    let definition = vm.definition();
    let declared = [&definition.name, &definition.tag]
        .into_iter()
        .flatten()
        .find(|ns| !ns.is_empty());

    match declared {
        Some(namespace) => ComponentNamespace {
            namespace: namespace.clone(),
            load_namespace: true,
        },
        None => ComponentNamespace {
            namespace: format!("{:016x}", fastrand::u64(..)),
            load_namespace: false,
        },
    }
}

fn component_namespace(options: &AdapterOptions, vm: &ComponentInstance) -> ComponentNamespace {
    match &options.component_namespace {
        Some(namespace_fn) => namespace_fn(vm),
        None => default_component_namespace(vm),
    }
}

fn parse_inline_resource(resource: &str) -> Result<Value> {
    Ok(serde_json::from_str(resource)?)
}

/// Deep-merge every parseable inline resource object; others are skipped with a warning
fn merge_inline_resources(resources: &[String], namespace: &str) -> Value {
    let mut merged = Value::Object(Map::new());
    for (index, resource) in resources.iter().enumerate() {
        match parse_inline_resource(resource) {
            Ok(value @ Value::Object(_)) => deep_merge(&mut merged, value),
            Ok(_) => logger::warn(&format!(
                "inline resource #{} of '{}' is not an object keyed by language",
                index, namespace
            )),
            Err(e) => logger::warn(&format!(
                "skipping inline resource #{} of '{}': {}",
                index, namespace, e
            )),
        }
    }
    merged
}

impl Mixin for InstallMixin {
    fn before_create(&self, vm: &Rc<ComponentInstance>) {
        let definition = vm.definition();
        let parent_context = vm.parent().and_then(|parent| parent.i18n());

        let i18n: Rc<I18n> = match (&definition.i18n, parent_context) {
            (Some(own), _) => own.clone(),
            (None, Some(inherited)) => inherited.i18n().clone(),
            (None, None) => return,
        };
        let engine = i18n.engine();

        let ComponentNamespace {
            namespace,
            load_namespace,
        } = component_namespace(i18n.options(), vm);

        let mut inline = merge_inline_resources(&definition.inline_resources, &namespace);

        let options = if let Some(explicit) = &definition.i18n_options {
            let namespaces = explicit
                .namespaces
                .clone()
                .unwrap_or_else(|| engine.default_ns())
                .into_vec();

            if let Some(messages) = &explicit.messages {
                deep_merge(&mut inline, Value::Object(messages.clone()));
            }

            let mut lookup = namespaces.clone();
            lookup.push(namespace.clone());
            engine.load_namespaces(&namespaces);

            Some(InstanceOptions {
                lng: explicit.lng.clone(),
                key_prefix: explicit.key_prefix.clone(),
                namespaces: lookup,
            })
        } else if let Some(inherited) = parent_context.and_then(|p| p.options()) {
            let mut options = inherited.clone();
            options.namespaces.insert(0, namespace.clone());
            Some(options)
        } else if !definition.inline_resources.is_empty() {
            Some(InstanceOptions {
                namespaces: vec![namespace.clone()],
                ..InstanceOptions::default()
            })
        } else {
            None
        };

        if load_namespace && i18n.options().load_component_namespace {
            engine.load_namespaces(&[namespace.clone()]);
        }

        if let Value::Object(languages) = inline {
            for (lng, bundle) in languages {
                log::debug!("Adding inline resources for '{}' in namespace '{}'", lng, namespace);
                engine.add_resource_bundle(&lng, &namespace, bundle, false, true);
            }
        }

        let context = I18nContext::new(i18n.clone(), namespace, options);
        let weak_vm = Rc::downgrade(vm);
        let subscription = i18n.subscribe(Rc::new(move |_: &DateTime<Utc>| {
            if let Some(vm) = weak_vm.upgrade() {
                vm.force_update();
            }
        }));
        context.set_subscription(subscription);
        vm.attach_i18n(context);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Namespaces;
    use crate::engine::{Engine, MemoryEngine};
    use crate::host::{ComponentDefinition, Framework, ManualScheduler};
    use crate::i18n::{install, I18nOptions};
    use crate::test_support::capture_warnings;
    use crate::TOptions;
    use serde_json::json;

    struct Fixture {
        engine: MemoryEngine,
        i18n: Rc<I18n>,
        framework: Framework,
    }

    fn fixture_with(options: AdapterOptions) -> Fixture {
        let engine = MemoryEngine::builder()
            .resource_bundle("en", "translation", json!({ "title": "Welcome" }))
            .resource_bundle("en", "common", json!({ "save": "Save", "form": { "save": "Save form" } }))
            .resource_bundle("de", "common", json!({ "save": "Speichern" }))
            .build();
        let i18n = I18n::new(
            Rc::new(engine.clone()),
            options,
            Rc::new(ManualScheduler::new()),
        );
        let mut framework = Framework::new();
        install(&mut framework).unwrap();
        Fixture {
            engine,
            i18n,
            framework,
        }
    }

    fn fixture() -> Fixture {
        fixture_with(AdapterOptions::default())
    }

    fn namespaces(list: &[&str]) -> Option<Namespaces> {
        Some(Namespaces::Many(list.iter().map(|s| s.to_string()).collect()))
    }

    #[test]
    fn test_instance_without_adapter_has_no_context() {
        let f = fixture();
        let vm = f.framework.create_instance(ComponentDefinition::named("orphan"), None);
        assert!(vm.i18n().is_none());

        let (text, logs) = capture_warnings(|| vm.t("title", &TOptions::new()));
        assert_eq!(text, "title");
        assert_eq!(logs, vec!["[i18n-bridge warn]: No i18n instance found in the component"]);
    }

    #[test]
    fn test_root_translates_through_shared_engine() {
        let f = fixture();
        let root = f
            .framework
            .create_instance(ComponentDefinition::named("app").with_i18n(&f.i18n), None);

        let context = root.i18n().unwrap();
        assert_eq!(context.namespace(), "app");
        assert!(context.options().is_none());
        assert_eq!(root.t("title", &TOptions::new()), "Welcome");
    }

    #[test]
    fn test_child_inherits_adapter_from_parent() {
        let f = fixture();
        let root = f
            .framework
            .create_instance(ComponentDefinition::named("app").with_i18n(&f.i18n), None);
        let child = f
            .framework
            .create_instance(ComponentDefinition::named("child"), Some(&root));

        assert!(Rc::ptr_eq(child.i18n().unwrap().i18n(), &f.i18n));
        assert_eq!(child.t("title", &TOptions::new()), "Welcome");
    }

    #[test]
    fn test_explicit_options_resolve_namespaces_and_prefix() {
        let f = fixture();
        let definition = ComponentDefinition::named("editor")
            .with_i18n(&f.i18n)
            .with_i18n_options(I18nOptions {
                key_prefix: Some("form".to_string()),
                namespaces: Some(Namespaces::One("common".to_string())),
                ..I18nOptions::default()
            });
        let vm = f.framework.create_instance(definition, None);

        let options = vm.i18n().unwrap().options().unwrap();
        assert_eq!(options.namespaces, vec!["common", "editor"]);
        assert_eq!(f.engine.loaded_namespaces(), vec!["common"]);

        assert_eq!(vm.t("save", &TOptions::new()), "Save form");
        assert_eq!(vm.t("common:save", &TOptions::new()), "Save");
    }

    #[test]
    fn test_explicit_options_default_to_engine_namespaces() {
        let f = fixture();
        let definition = ComponentDefinition::named("page")
            .with_i18n(&f.i18n)
            .with_i18n_options(I18nOptions {
                lng: Some("de".to_string()),
                ..I18nOptions::default()
            });
        let vm = f.framework.create_instance(definition, None);

        let options = vm.i18n().unwrap().options().unwrap();
        assert_eq!(options.namespaces, vec!["translation", "page"]);
        assert_eq!(options.lng.as_deref(), Some("de"));
        assert_eq!(vm.t("common:save", &TOptions::new()), "Speichern");
    }

    #[test]
    fn test_child_prepends_own_namespace_to_inherited_list() {
        let f = fixture();
        // parent namespaces resolve to ["a", "b"]: explicit ["a"] plus its own name
        let parent = f.framework.create_instance(
            ComponentDefinition::named("b")
                .with_i18n(&f.i18n)
                .with_i18n_options(I18nOptions {
                    namespaces: namespaces(&["a"]),
                    ..I18nOptions::default()
                }),
            None,
        );
        assert_eq!(parent.i18n().unwrap().options().unwrap().namespaces, vec!["a", "b"]);

        let child = f
            .framework
            .create_instance(ComponentDefinition::named("child"), Some(&parent));
        assert_eq!(
            child.i18n().unwrap().options().unwrap().namespaces,
            vec!["child", "a", "b"]
        );
    }

    #[test]
    fn test_inline_resources_are_deep_merged_then_inserted() {
        let f = fixture();
        let definition = ComponentDefinition::named("card")
            .with_i18n(&f.i18n)
            .with_inline_resource(r#"{ "en": { "a": { "x": "1" } } }"#)
            .with_inline_resource(r#"{ "en": { "a": { "y": "2" } }, "de": { "a": { "x": "eins" } } }"#);
        let vm = f.framework.create_instance(definition, None);

        assert_eq!(
            f.engine.get_resource_bundle("en", "card"),
            Some(json!({ "a": { "x": "1", "y": "2" } }))
        );
        assert_eq!(vm.i18n().unwrap().options().unwrap().namespaces, vec!["card"]);
        assert_eq!(vm.t("a.y", &TOptions::new()), "2");

        let mut de = TOptions::new();
        de.insert("lng".to_string(), json!("de"));
        assert_eq!(vm.t("a.x", &de), "eins");
    }

    #[test]
    fn test_store_insert_overwrites_previous_bundle_keys() {
        let f = fixture();
        f.engine
            .add_resource_bundle("en", "card", json!({ "a": { "x": "old", "z": "kept?" } }), false, true);

        let definition = ComponentDefinition::named("card")
            .with_i18n(&f.i18n)
            .with_inline_resource(r#"{ "en": { "a": { "x": "new" } } }"#);
        f.framework.create_instance(definition, None);

        assert_eq!(
            f.engine.get_resource_bundle("en", "card"),
            Some(json!({ "a": { "x": "new" } }))
        );
    }

    #[test]
    fn test_messages_merge_with_inline_resources() {
        let f = fixture();
        let messages = json!({ "en": { "a": { "y": "from messages" } } });
        let definition = ComponentDefinition::named("card")
            .with_i18n(&f.i18n)
            .with_inline_resource(r#"{ "en": { "a": { "x": "inline" } } }"#)
            .with_i18n_options(I18nOptions {
                messages: messages.as_object().cloned(),
                namespaces: namespaces(&["common"]),
                ..I18nOptions::default()
            });
        let vm = f.framework.create_instance(definition, None);

        assert_eq!(
            f.engine.get_resource_bundle("en", "card"),
            Some(json!({ "a": { "x": "inline", "y": "from messages" } }))
        );
        assert_eq!(vm.t("card:a.y", &TOptions::new()), "from messages");
    }

    #[test]
    fn test_malformed_inline_resource_is_skipped() {
        let f = fixture();
        let definition = ComponentDefinition::named("card")
            .with_i18n(&f.i18n)
            .with_inline_resource("{ not json")
            .with_inline_resource(r#"["en"]"#)
            .with_inline_resource(r#"{ "en": { "ok": "yes" } }"#);

        let (vm, logs) = capture_warnings(|| f.framework.create_instance(definition, None));

        assert_eq!(logs.len(), 2);
        assert!(logs[0].contains("skipping inline resource #0 of 'card'"));
        assert!(logs[1].contains("inline resource #1 of 'card' is not an object"));
        assert_eq!(vm.t("ok", &TOptions::new()), "yes");
    }

    #[test]
    fn test_component_namespace_loaded_when_enabled() {
        let options = AdapterOptions {
            load_component_namespace: true,
            ..AdapterOptions::default()
        };
        let f = fixture_with(options);
        f.framework
            .create_instance(ComponentDefinition::named("profile").with_i18n(&f.i18n), None);
        f.framework
            .create_instance(ComponentDefinition::default().with_i18n(&f.i18n), None);

        assert_eq!(f.engine.loaded_namespaces(), vec!["profile"]);
    }

    #[test]
    fn test_tag_used_when_name_missing_and_random_fallback() {
        let f = fixture();
        let tagged = ComponentDefinition {
            tag: Some("my-widget".to_string()),
            ..ComponentDefinition::default()
        }
        .with_i18n(&f.i18n);
        let vm = f.framework.create_instance(tagged, None);
        assert_eq!(vm.i18n().unwrap().namespace(), "my-widget");

        let anonymous = f
            .framework
            .create_instance(ComponentDefinition::default().with_i18n(&f.i18n), None);
        let namespace = default_component_namespace(&anonymous);
        assert!(!namespace.load_namespace);
        assert_eq!(namespace.namespace.len(), 16);
    }

    #[test]
    fn test_custom_namespace_function() {
        let options = AdapterOptions::default().with_component_namespace(|vm| ComponentNamespace {
            namespace: format!("ns-{}", vm.definition().name.clone().unwrap_or_default()),
            load_namespace: false,
        });
        let f = fixture_with(options);
        let vm = f
            .framework
            .create_instance(ComponentDefinition::named("menu").with_i18n(&f.i18n), None);
        assert_eq!(vm.i18n().unwrap().namespace(), "ns-menu");
    }

    #[test]
    fn test_language_change_rerenders_live_instances_only() {
        let f = fixture();
        let root = f
            .framework
            .create_instance(ComponentDefinition::named("app").with_i18n(&f.i18n), None);
        let child = f
            .framework
            .create_instance(ComponentDefinition::named("child"), Some(&root));

        f.engine.change_language("de");
        assert_eq!(root.render_count(), 1);
        assert_eq!(child.render_count(), 1);

        child.destroy();
        f.engine.add_resource("de", "translation", "title", "Willkommen");
        assert_eq!(root.render_count(), 2);
        assert_eq!(child.render_count(), 1);
        assert_eq!(root.t("title", &TOptions::new()), "Willkommen");
    }

    #[test]
    fn test_dropped_instances_release_subscriptions() {
        let f = fixture();
        let root = f
            .framework
            .create_instance(ComponentDefinition::named("app").with_i18n(&f.i18n), None);
        assert_eq!(f.i18n.data().subscriber_count(), 1);

        for _ in 0..1000 {
            let child = f
                .framework
                .create_instance(ComponentDefinition::named("row"), Some(&root));
            assert!(child.i18n().is_some());
        }
        assert_eq!(f.i18n.data().subscriber_count(), 1);

        f.i18n.reset_data(Utc::now());
        assert_eq!(f.i18n.data().subscriber_count(), 1);

        drop(root);
        assert_eq!(f.i18n.data().subscriber_count(), 0);
    }
}
