//! The read-only route tree.
//!
//! Warrant never inspects a host router's internals directly. The host
//! projects whatever it knows about its routes into this small visitor tree
//! once, at startup, and the walker reads it without mutating anything:
//!
//! - a [`Layer`] is one mounted entry: optional [`Route`] metadata plus a
//!   [`Handle`] that may or may not be a requirement;
//! - a [`Route`] carries the path, the method flags and nested sub-layers
//!   (mounted sub-routers, or several middleware on one path);
//! - a layer without route metadata is a pathless mount, applying to every
//!   path and method.
//!
//! [`RouteTable`] is a small builder for assembling such trees by hand — in
//! host adapters and in tests.

use std::sync::Arc;

use http::Method;
use indexmap::IndexMap;
use warrant_require::Requirement;

/// The handler slot of a layer.
#[derive(Debug, Clone, Default)]
pub enum Handle {
    /// A warrant requirement; contributes validation and documentation.
    Requirement(Arc<Requirement>),
    /// Any other handler or middleware; contributes nothing.
    #[default]
    Opaque,
}

impl Handle {
    /// The requirement behind this handle, if it is one.
    #[must_use]
    pub fn as_requirement(&self) -> Option<&Arc<Requirement>> {
        match self {
            Self::Requirement(requirement) => Some(requirement),
            Self::Opaque => None,
        }
    }
}

impl From<Requirement> for Handle {
    fn from(requirement: Requirement) -> Self {
        Self::Requirement(Arc::new(requirement))
    }
}

/// Route metadata attached to a layer.
#[derive(Debug, Clone, Default)]
pub struct Route {
    /// Mount path; `None` marks a malformed entry the walker skips.
    pub path: Option<String>,
    /// Method flags; only methods flagged `true` apply.
    pub methods: IndexMap<String, bool>,
    /// Nested layers: mounted sub-routers or stacked middleware.
    pub stack: Vec<Layer>,
}

/// One entry of a router's layer tree.
#[derive(Debug, Clone, Default)]
pub struct Layer {
    /// Route metadata; `None` for pathless mounts.
    pub route: Option<Route>,
    /// The handler mounted at this layer.
    pub handle: Handle,
}

impl Layer {
    /// A pathless mount: applies to every path and method.
    #[must_use]
    pub fn mounted(handle: impl Into<Handle>) -> Self {
        Self {
            route: None,
            handle: handle.into(),
        }
    }

    /// A route entry for one method and path.
    #[must_use]
    pub fn route(method: &str, path: &str, handle: impl Into<Handle>) -> Self {
        Self {
            route: Some(Route {
                path: Some(path.to_owned()),
                methods: IndexMap::from([(method.to_lowercase(), true)]),
                stack: Vec::new(),
            }),
            handle: handle.into(),
        }
    }

    /// A route entry whose handlers live in a nested stack.
    #[must_use]
    pub fn route_stack(method: &str, path: &str, handles: Vec<Handle>) -> Self {
        Self {
            route: Some(Route {
                path: Some(path.to_owned()),
                methods: IndexMap::from([(method.to_lowercase(), true)]),
                stack: handles.into_iter().map(Layer::mounted).collect(),
            }),
            handle: Handle::Opaque,
        }
    }
}

/// Builder assembling a layer tree the way routes are registered.
///
/// # Example
///
/// ```rust
/// use warrant_docs::RouteTable;
/// use warrant_require::{header, requires};
/// use warrant_schema::Schema;
///
/// let table = RouteTable::new()
///     .mount(header("authorization", Schema::string()))
///     .get("/pets", requires().query("limit", Schema::integer()));
/// assert_eq!(table.layers().len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    layers: Vec<Layer>,
}

impl RouteTable {
    /// An empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mounts a requirement on every path and method (`use` semantics).
    #[must_use]
    pub fn mount(mut self, requirement: Requirement) -> Self {
        self.layers.push(Layer::mounted(requirement));
        self
    }

    /// Mounts a requirement on one path, for every method.
    #[must_use]
    pub fn mount_at(mut self, path: &str, requirement: Requirement) -> Self {
        self.layers.push(Layer {
            route: Some(Route {
                path: Some(path.to_owned()),
                methods: IndexMap::from([(crate::extract::USE_METHOD_KEY.to_owned(), true)]),
                stack: Vec::new(),
            }),
            handle: requirement.into(),
        });
        self
    }

    /// Registers a requirement for one method and path.
    #[must_use]
    pub fn route(mut self, method: &Method, path: &str, requirement: Requirement) -> Self {
        self.layers
            .push(Layer::route(method.as_str(), path, requirement));
        self
    }

    /// Registers several requirements on one method and path, in order.
    #[must_use]
    pub fn route_many(
        mut self,
        method: &Method,
        path: &str,
        requirements: Vec<Requirement>,
    ) -> Self {
        self.layers.push(Layer::route_stack(
            method.as_str(),
            path,
            requirements.into_iter().map(Handle::from).collect(),
        ));
        self
    }

    /// `GET` route shorthand.
    #[must_use]
    pub fn get(self, path: &str, requirement: Requirement) -> Self {
        self.route(&Method::GET, path, requirement)
    }

    /// `POST` route shorthand.
    #[must_use]
    pub fn post(self, path: &str, requirement: Requirement) -> Self {
        self.route(&Method::POST, path, requirement)
    }

    /// `PUT` route shorthand.
    #[must_use]
    pub fn put(self, path: &str, requirement: Requirement) -> Self {
        self.route(&Method::PUT, path, requirement)
    }

    /// `DELETE` route shorthand.
    #[must_use]
    pub fn delete(self, path: &str, requirement: Requirement) -> Self {
        self.route(&Method::DELETE, path, requirement)
    }

    /// `PATCH` route shorthand.
    #[must_use]
    pub fn patch(self, path: &str, requirement: Requirement) -> Self {
        self.route(&Method::PATCH, path, requirement)
    }

    /// The assembled layers.
    #[must_use]
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Consumes the table, yielding its layers.
    #[must_use]
    pub fn into_layers(self) -> Vec<Layer> {
        self.layers
    }
}
