//! Element directives: `t` (text translation) and `waitForT` (hide until the engine is ready)

mod translate;
mod wait;

pub use translate::TranslateDirective;
pub use wait::WaitDirective;

use crate::core::TOptions;
use crate::host::ComponentInstance;
use crate::i18n::{logger, I18nContext};
use serde_json::Value;

/// Value bound to the `t` directive
#[derive(Debug, Clone, PartialEq)]
pub enum BindingValue {
    /// Bare key
    PathOnly(String),
    Detailed {
        path: Option<String>,
        /// Deprecated: pass `lng` in `args`
        language: Option<String>,
        args: Option<TOptions>,
    },
}

impl Default for BindingValue {
    fn default() -> Self {
        BindingValue::Detailed {
            path: None,
            language: None,
            args: None,
        }
    }
}

impl From<&str> for BindingValue {
    fn from(path: &str) -> Self {
        BindingValue::PathOnly(path.to_string())
    }
}

impl BindingValue {
    pub fn detailed(path: &str, args: TOptions) -> Self {
        BindingValue::Detailed {
            path: Some(path.to_string()),
            language: None,
            args: Some(args),
        }
    }

    /// Classify a dynamic value: strings are paths, objects carry
    /// `path`/`language`/`args`, anything else is empty
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::String(path) => BindingValue::PathOnly(path.clone()),
            Value::Object(fields) => BindingValue::Detailed {
                path: fields.get("path").and_then(Value::as_str).map(str::to_string),
                language: fields.get("language").and_then(Value::as_str).map(str::to_string),
                args: fields.get("args").and_then(Value::as_object).cloned(),
            },
            _ => BindingValue::default(),
        }
    }

    /// `(path, language, args)` with empty strings treated as absent
    pub(crate) fn parts(&self) -> (Option<&str>, Option<&str>, Option<&TOptions>) {
        fn non_empty(s: &str) -> Option<&str> {
            (!s.is_empty()).then_some(s)
        }

        match self {
            BindingValue::PathOnly(path) => (non_empty(path), None, None),
            BindingValue::Detailed {
                path,
                language,
                args,
            } => (
                path.as_deref().and_then(non_empty),
                language.as_deref().and_then(non_empty),
                args.as_ref(),
            ),
        }
    }
}

/// The component's i18n context, or a warning when it has none
fn assert_context(vm: &ComponentInstance) -> Option<&I18nContext> {
    let context = vm.i18n();
    if context.is_none() {
        logger::warn("No i18n instance found in the component");
    }
    context
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_classifies_shapes() {
        assert_eq!(BindingValue::from_json(&json!("title")), BindingValue::PathOnly("title".into()));
        assert_eq!(
            BindingValue::from_json(&json!({ "path": "greeting", "args": { "name": "Ada" } })),
            BindingValue::detailed("greeting", json!({ "name": "Ada" }).as_object().cloned().unwrap())
        );
        assert_eq!(BindingValue::from_json(&json!(42)), BindingValue::default());
    }

    #[test]
    fn test_parts_treat_empty_strings_as_missing() {
        assert_eq!(BindingValue::from("").parts(), (None, None, None));
        let value = BindingValue::Detailed {
            path: Some(String::new()),
            language: Some("de".into()),
            args: None,
        };
        assert_eq!(value.parts(), (None, Some("de"), None));
    }
}
