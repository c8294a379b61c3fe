//! Global registry: plugins, mixins, components and directives

use super::{ComponentDefinition, ComponentInstance, Element, VNode};
use crate::core::{Error, Result, TOptions};
use crate::directives::BindingValue;
use std::collections::{BTreeMap, HashSet};
use std::rc::Rc;

/// Hook run on every component instance before it is handed out
pub trait Mixin {
    fn before_create(&self, vm: &Rc<ComponentInstance>);
}

/// Value of a directive binding and the one it replaces
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DirectiveBinding {
    pub value: BindingValue,
    pub old_value: Option<BindingValue>,
}

impl DirectiveBinding {
    pub fn new(value: BindingValue) -> Self {
        Self {
            value,
            old_value: None,
        }
    }

    /// Binding for a later update: the current value becomes the old one
    pub fn next(&self, value: BindingValue) -> Self {
        Self {
            value,
            old_value: Some(self.value.clone()),
        }
    }
}

pub trait Directive {
    /// Element inserted
    fn bind(&self, el: &mut Element, binding: &DirectiveBinding, vm: &Rc<ComponentInstance>);

    /// Binding value or owning component changed
    fn update(&self, el: &mut Element, binding: &DirectiveBinding, vm: &Rc<ComponentInstance>);
}

/// Inputs of a stateless render function
pub struct RenderContext<'a> {
    pub props: &'a TOptions,
    /// Attributes forwarded to the root element
    pub data: BTreeMap<String, String>,
    pub children: Vec<VNode>,
    pub parent: &'a Rc<ComponentInstance>,
}

pub trait FunctionalComponent {
    fn render(&self, ctx: RenderContext<'_>) -> VNode;
}

pub trait Plugin {
    fn name(&self) -> &'static str;

    fn install(&self, framework: &mut Framework);
}

/// The host framework's global registry
#[derive(Default)]
pub struct Framework {
    installed: HashSet<&'static str>,
    mixins: Vec<Rc<dyn Mixin>>,
    components: BTreeMap<String, Rc<dyn FunctionalComponent>>,
    directives: BTreeMap<String, Rc<dyn Directive>>,
}

impl Framework {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a plugin once; a second attempt fails and changes nothing
    pub fn use_plugin(&mut self, plugin: &dyn Plugin) -> Result<()> {
        let name = plugin.name();
        if !self.installed.insert(name) {
            return Err(Error::AlreadyInstalled(name));
        }
        plugin.install(self);
        log::info!("Installed plugin: {}", name);
        Ok(())
    }

    pub fn is_installed(&self, name: &str) -> bool {
        self.installed.contains(name)
    }

    pub fn mixin(&mut self, mixin: Rc<dyn Mixin>) {
        self.mixins.push(mixin);
    }

    pub fn component(&mut self, name: &str, component: Rc<dyn FunctionalComponent>) {
        self.components.insert(name.to_string(), component);
    }

    pub fn directive(&mut self, name: &str, directive: Rc<dyn Directive>) {
        self.directives.insert(name.to_string(), directive);
    }

    pub fn get_component(&self, name: &str) -> Option<Rc<dyn FunctionalComponent>> {
        self.components.get(name).cloned()
    }

    pub fn get_directive(&self, name: &str) -> Option<Rc<dyn Directive>> {
        self.directives.get(name).cloned()
    }

    /// Create an instance and run every mixin on it
    pub fn create_instance(
        &self,
        definition: ComponentDefinition,
        parent: Option<&Rc<ComponentInstance>>,
    ) -> Rc<ComponentInstance> {
        let vm = ComponentInstance::new(Rc::new(definition), parent.cloned());
        for mixin in &self.mixins {
            mixin.before_create(&vm);
        }
        vm
    }

    /// Render a registered component; `None` if no component has that name
    pub fn render(
        &self,
        name: &str,
        props: &TOptions,
        data: BTreeMap<String, String>,
        children: Vec<VNode>,
        parent: &Rc<ComponentInstance>,
    ) -> Option<VNode> {
        let component = self.get_component(name)?;
        Some(component.render(RenderContext {
            props,
            data,
            children,
            parent,
        }))
    }

    /// Run a directive's `bind`; `false` if no directive has that name
    pub fn bind_directive(
        &self,
        name: &str,
        el: &mut Element,
        binding: &DirectiveBinding,
        vm: &Rc<ComponentInstance>,
    ) -> bool {
        match self.get_directive(name) {
            Some(directive) => {
                directive.bind(el, binding, vm);
                true
            }
            None => false,
        }
    }

    /// Run a directive's `update`; `false` if no directive has that name
    pub fn update_directive(
        &self,
        name: &str,
        el: &mut Element,
        binding: &DirectiveBinding,
        vm: &Rc<ComponentInstance>,
    ) -> bool {
        match self.get_directive(name) {
            Some(directive) => {
                directive.update(el, binding, vm);
                true
            }
            None => false,
        }
    }
}
