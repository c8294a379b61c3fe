//! Host framework surface
//!
//! The pieces of a component framework the adapter hooks into:
//! - component definitions and instances, with a mixin hook at creation
//! - mounted elements (for directives) and virtual nodes (for render functions)
//! - a registry for plugins, components and directives
//! - a scheduler for next-tick and timer work

mod element;
mod instance;
mod registry;
mod scheduler;

pub use element::{Element, ElementNode, VNode};
pub use instance::{ComponentDefinition, ComponentInstance};
pub use registry::{
    Directive, DirectiveBinding, Framework, FunctionalComponent, Mixin, Plugin, RenderContext,
};
pub use scheduler::{ManualScheduler, Scheduler, Task, TokioScheduler};
