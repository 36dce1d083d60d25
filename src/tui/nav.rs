//! Route table and back stack for the terminal user interface.
//!
//! Screens are addressed by [`Route`], a closed enum, so an unknown route
//! cannot be constructed. The untyped boundary (a [`RouteName`] plus
//! [`NavArgs`], as received from the command line) is checked by
//! [`Route::resolve`] before anything is pushed.

use clap::ValueEnum;
use thiserror::Error;
use tracing::debug;

/// Argument key carrying a task id.
pub const ID: &str = "id";

/// Route names as they appear at the untyped boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RouteName {
    Home,
    AddTask,
    AllTask,
    TaskDetails,
    Settings,
}

impl RouteName {
    pub fn as_str(self) -> &'static str {
        match self {
            RouteName::Home => "home",
            RouteName::AddTask => "add_task",
            RouteName::AllTask => "all_task",
            RouteName::TaskDetails => "task_details",
            RouteName::Settings => "settings",
        }
    }
}

/// A screen destination together with its arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    AddTask,
    AllTask,
    TaskDetails { id: u64 },
    Settings,
}

/// Optional arguments accompanying a [`RouteName`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavArgs {
    pub id: Option<u64>,
}

/// A navigation request broke the route contract.
///
/// This is a programming error: callers propagate it rather than recover.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum NavError {
    #[error("'{arg}' shouldn't be null for route '{route}'")]
    MissingArgument {
        route: &'static str,
        arg: &'static str,
    },
}

impl Route {
    pub fn name(&self) -> RouteName {
        match self {
            Route::Home => RouteName::Home,
            Route::AddTask => RouteName::AddTask,
            Route::AllTask => RouteName::AllTask,
            Route::TaskDetails { .. } => RouteName::TaskDetails,
            Route::Settings => RouteName::Settings,
        }
    }

    /// Path form, with the task id appended as a segment for details.
    pub fn path(&self) -> String {
        match self {
            Route::TaskDetails { id } => format!("{}/{}", RouteName::TaskDetails.as_str(), id),
            other => other.name().as_str().to_string(),
        }
    }

    /// Build a typed route from a name and arguments.
    pub fn resolve(name: RouteName, args: &NavArgs) -> Result<Route, NavError> {
        Ok(match name {
            RouteName::Home => Route::Home,
            RouteName::AddTask => Route::AddTask,
            RouteName::AllTask => Route::AllTask,
            RouteName::TaskDetails => Route::TaskDetails {
                id: args.id.ok_or(NavError::MissingArgument {
                    route: RouteName::TaskDetails.as_str(),
                    arg: ID,
                })?,
            },
            RouteName::Settings => Route::Settings,
        })
    }
}

/// Back stack of visited routes. The bottom entry is always [`Route::Home`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Router {
    back_stack: Vec<Route>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    pub fn new() -> Self {
        Self {
            back_stack: vec![Route::Home],
        }
    }

    /// The route currently on screen.
    pub fn current(&self) -> Route {
        self.back_stack.last().copied().unwrap_or(Route::Home)
    }

    pub fn back_stack(&self) -> &[Route] {
        &self.back_stack
    }

    pub fn navigate_to(&mut self, route: Route) {
        debug!(route = %route.path(), depth = self.back_stack.len() + 1, "navigate");
        self.back_stack.push(route);
    }

    /// Resolve an untyped request and push it. On error the stack is untouched.
    pub fn navigate(&mut self, name: RouteName, args: &NavArgs) -> Result<(), NavError> {
        let route = Route::resolve(name, args)?;
        self.navigate_to(route);
        Ok(())
    }

    /// Pop one entry. Returns `false` at the root, where this is a no-op.
    pub fn navigate_up(&mut self) -> bool {
        if self.back_stack.len() <= 1 {
            return false;
        }
        self.back_stack.pop();
        debug!(route = %self.current().path(), "navigate up");
        true
    }
}
