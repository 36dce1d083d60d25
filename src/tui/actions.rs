//! Navigation intents handed to screens.

use std::cell::RefCell;
use std::rc::Rc;

use crate::tui::nav::{Route, Router};

/// The five navigation intents available to screens, bound to one router.
///
/// Screens receive `&MainActions` and never see the router itself. The
/// bundle holds no state of its own, so any number of bundles built from the
/// same router behave identically.
#[derive(Clone)]
pub struct MainActions {
    router: Rc<RefCell<Router>>,
}

impl MainActions {
    pub fn new(router: &Rc<RefCell<Router>>) -> Self {
        Self {
            router: Rc::clone(router),
        }
    }

    pub fn up_press(&self) {
        self.router.borrow_mut().navigate_up();
    }

    pub fn goto_add_task(&self) {
        self.router.borrow_mut().navigate_to(Route::AddTask);
    }

    pub fn goto_all_task(&self) {
        self.router.borrow_mut().navigate_to(Route::AllTask);
    }

    pub fn goto_task_details(&self, id: u64) {
        self.router.borrow_mut().navigate_to(Route::TaskDetails { id });
    }

    pub fn goto_settings(&self) {
        self.router.borrow_mut().navigate_to(Route::Settings);
    }
}
