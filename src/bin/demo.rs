//! i18n-bridge - Demo CLI
//!
//! Walks through the adapter end to end against the in-memory engine:
//! component contexts, the `t` and `waitForT` directives, the `i18next`
//! interpolation component and re-rendering on language change.
//!
//! Usage: `i18n-bridge-demo [adapter-options.toml]`

use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::Duration;

use serde_json::json;

use i18n_bridge::core::{AdapterOptions, Namespaces, Result, TOptions};
use i18n_bridge::directives::BindingValue;
use i18n_bridge::engine::MemoryEngine;
use i18n_bridge::host::{ComponentDefinition, DirectiveBinding, Element, Framework, TokioScheduler, VNode};
use i18n_bridge::i18n::{install, I18n, I18nOptions, VERSION};

fn engine() -> MemoryEngine {
    MemoryEngine::builder()
        .fallback_language("en")
        .initialized(false)
        .deferred_off()
        .resource_bundle(
            "en",
            "translation",
            json!({ "welcome": "Welcome, {{name}}", "status": { "ready": "Ready" } }),
        )
        .resource_bundle(
            "fr",
            "translation",
            json!({ "welcome": "Bienvenue, {{name}}", "status": { "ready": "Prêt" } }),
        )
        .resource_bundle(
            "en",
            "common",
            json!({ "unread": "You have #$?0?$# unread messages in #$?folder?$#" }),
        )
        .resource_bundle(
            "fr",
            "common",
            json!({ "unread": "Vous avez #$?0?$# messages non lus dans #$?folder?$#" }),
        )
        .build()
}

fn args(value: serde_json::Value) -> TOptions {
    value.as_object().cloned().unwrap_or_default()
}

fn main() -> Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("==============================================");
    println!("   i18n-bridge v{} - Demo CLI", VERSION);
    println!("==============================================\n");

    // 1. Adapter options
    println!("[1/5] Loading adapter options...");
    let options = match std::env::args().nth(1) {
        Some(path) => {
            println!("      From: {}", path);
            AdapterOptions::load(path)?
        }
        None => {
            println!("      Using defaults");
            AdapterOptions::default()
        }
    };
    println!("      bindI18n:  {:?}", options.bind_i18n);
    println!("      bindStore: {:?}\n", options.bind_store);
    let wait_delay = Duration::from_millis(options.wait_unsubscribe_delay_ms);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    let local = tokio::task::LocalSet::new();

    local.block_on(&runtime, async move {
        // 2. Engine, adapter and plugin
        println!("[2/5] Installing the adapter...");
        let engine = engine();
        let i18n = I18n::new(Rc::new(engine.clone()), options, Rc::new(TokioScheduler));
        let mut framework = Framework::new();
        if let Err(e) = install(&mut framework) {
            eprintln!("      Install failed: {}", e);
            return;
        }
        if let Err(e) = install(&mut framework) {
            println!("      Second install rejected: {}", e);
        }
        println!("      Language: {}\n", i18n.language());

        // 3. Component tree
        println!("[3/5] Creating components...");
        let root = framework.create_instance(
            ComponentDefinition::named("app")
                .with_i18n(&i18n)
                .with_i18n_options(I18nOptions {
                    namespaces: Some(Namespaces::from(vec!["translation".to_string(), "common".to_string()])),
                    ..I18nOptions::default()
                }),
            None,
        );
        let inbox = framework.create_instance(
            ComponentDefinition::named("inbox")
                .with_inline_resource(r#"{ "en": { "title": "Inbox" }, "fr": { "title": "Boîte de réception" } }"#),
            Some(&root),
        );
        if let Some(context) = inbox.i18n() {
            println!("      inbox namespace: {}", context.namespace());
            if let Some(options) = context.options() {
                println!("      inbox lookup:    {:?}", options.namespaces);
            }
        }
        println!("      inbox title:     {}\n", inbox.t("title", &TOptions::new()));

        // 4. Directives and interpolation component
        println!("[4/5] Binding directives...");
        let mut banner = Element::new("div");
        framework.bind_directive("waitForT", &mut banner, &DirectiveBinding::default(), &root);
        println!("      waitForT hidden before init: {}", banner.hidden());

        engine.init();
        framework.update_directive("waitForT", &mut banner, &DirectiveBinding::default(), &root);
        println!("      waitForT hidden after init:  {}", banner.hidden());
        println!("      'initialized' listeners:     {}", engine.listener_count("initialized"));

        let mut heading = Element::new("h1");
        let binding = DirectiveBinding::new(BindingValue::detailed("welcome", args(json!({ "name": "Ada" }))));
        framework.bind_directive("t", &mut heading, &binding, &inbox);
        println!("      v-t:      {}", heading.text_content());

        let render_unread = || {
            framework.render(
                "i18next",
                &args(json!({ "path": "common:unread", "tag": "p" })),
                BTreeMap::new(),
                vec![
                    VNode::element("strong", "3"),
                    VNode::element("em", "Inbox").with_attr("place", "folder"),
                ],
                &inbox,
            )
        };
        if let Some(node) = render_unread() {
            println!("      i18next:  {}\n", node.text_content());
        }

        // 5. Language change
        println!("[5/5] Switching language to fr...");
        let before = (root.render_count(), inbox.render_count());
        engine.change_language("fr");
        framework.update_directive("t", &mut heading, &binding.next(binding.value.clone()), &inbox);
        println!("      renders app/inbox: {:?} -> {:?}", before, (root.render_count(), inbox.render_count()));
        println!("      inbox title: {}", inbox.t("title", &TOptions::new()));
        println!("      v-t:         {}", heading.text_content());
        if let Some(node) = render_unread() {
            println!("      i18next:     {}", node.text_content());
        }

        i18n.reset_data(chrono::Utc::now());
        tokio::time::sleep(wait_delay + Duration::from_millis(10)).await;
        println!("      'initialized' listeners after {:?}: {}", wait_delay, engine.listener_count("initialized"));

        inbox.destroy();
        root.destroy();
        println!("\n  Loaded at: {}", i18n.loaded_at().to_rfc3339());
    });

    println!("\n==============================================");
    println!("   Demo complete");
    println!("==============================================\n");
    Ok(())
}
