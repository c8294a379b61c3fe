//! `waitForT` directive: keeps an element hidden until the engine is initialized

use super::assert_context;
use crate::engine::{Listener, ListenerId};
use crate::host::{ComponentInstance, Directive, DirectiveBinding, Element};
use std::cell::Cell;
use std::rc::{Rc, Weak};
use std::time::Duration;

const INITIALIZED: &str = "initialized";

pub struct WaitDirective;

impl WaitDirective {
    pub const NAME: &'static str = "waitForT";
}

/// Drop the `initialized` listener if the component and its context are still around
fn unsubscribe(vm: &Weak<ComponentInstance>, listener: &Cell<Option<ListenerId>>) {
    let Some(vm) = vm.upgrade() else {
        return;
    };
    // A destroyed component has no context to unsubscribe through; its listener stays registered
    let Some(context) = vm.i18n() else {
        log::debug!("Component gone before waitForT cleanup; listener left in place");
        return;
    };
    if let Some(id) = listener.take() {
        context.i18n().engine().off(INITIALIZED, id);
    }
}

impl Directive for WaitDirective {
    fn bind(&self, el: &mut Element, _binding: &DirectiveBinding, vm: &Rc<ComponentInstance>) {
        let Some(context) = assert_context(vm) else {
            return;
        };
        let engine = context.i18n().engine();

        if engine.is_initialized() {
            el.set_hidden(false);
            return;
        }
        el.set_hidden(true);

        let listener_id: Rc<Cell<Option<ListenerId>>> = Rc::default();
        let weak_vm = Rc::downgrade(vm);
        let slot = listener_id.clone();

        let on_initialized: Listener = Rc::new(move |_: &str| {
            let Some(vm) = weak_vm.upgrade() else {
                return;
            };
            vm.force_update();

            let Some(context) = vm.i18n() else {
                return;
            };
            let i18n = context.i18n();
            if i18n.engine().supports_sync_off() {
                unsubscribe(&weak_vm, &slot);
            } else {
                // Engines that cannot drop a listener mid-dispatch get a delayed cleanup
                let (weak_vm, slot) = (weak_vm.clone(), slot.clone());
                i18n.scheduler().set_timeout(
                    Duration::from_millis(i18n.options().wait_unsubscribe_delay_ms),
                    Box::new(move || unsubscribe(&weak_vm, &slot)),
                );
            }
        });

        listener_id.set(Some(engine.on(INITIALIZED, on_initialized)));
    }

    fn update(&self, el: &mut Element, _binding: &DirectiveBinding, vm: &Rc<ComponentInstance>) {
        if let Some(context) = vm.i18n() {
            if context.i18n().engine().is_initialized() {
                el.set_hidden(false);
            }
        }
    }
}
