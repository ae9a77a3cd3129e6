//! The route tree and its builder handles.
//!
//! A [`RouteTree`] owns every [`Group`] in a flat arena. Registration goes
//! through a [`GroupMut`] handle, which is consumed by each call and handed back
//! (or swapped for the child/parent handle by [`GroupMut::group`] and
//! [`GroupMut::end`]), so a whole tree can be described in one expression:
//!
//! ```
//! use micro_route::RouteTree;
//!
//! let mut tree = RouteTree::new();
//! tree.root_mut()
//!     .middleware(|_req, _res, _stop| {})
//!     .get("/", |_req, res| {
//!         res.send("home");
//!     })
//!     .group("/api")
//!     .get("/users", |_req, res| {
//!         res.json("[]");
//!     })
//!     .end()
//!     .post("/login", |_req, _res| {});
//!
//! let paths: Vec<_> = tree.routes().iter().map(|route| route.path().to_owned()).collect();
//! assert_eq!(paths, ["/", "/api/users", "/login"]);
//! ```

mod error;
mod resolve;
mod route;

pub use error::RouteError;
pub use resolve::ResolvedRoute;
pub use route::IntoRoutes;
pub use route::join_routes;

use crate::entry::{Entry, Group, GroupId, HttpEntry, MiddlewareEntry};
use crate::handler::{Handler, Middleware};
use http::Method;
use micro_route_http::protocol::{Request, Response, SUPPORTED_METHODS, supported_method};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error};

/// Arena of groups, rooted at [`GroupId`] zero.
#[derive(Debug, Clone)]
pub struct RouteTree {
    groups: Vec<Group>,
}

impl RouteTree {
    /// Creates a tree whose root group has an empty route.
    pub fn new() -> Self {
        Self::with_prefix("")
    }

    /// Creates a tree whose root group carries `prefix`, prepended to every route.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self { groups: vec![Group::new(GroupId::ROOT, prefix.into(), None)] }
    }

    pub fn root(&self) -> &Group {
        &self.groups[GroupId::ROOT.0]
    }

    pub fn root_id(&self) -> GroupId {
        GroupId::ROOT
    }

    pub fn group(&self, id: GroupId) -> Option<&Group> {
        self.groups.get(id.0)
    }

    /// Every group of the tree, the root first, then in creation order.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn root_mut(&mut self) -> GroupMut<'_> {
        GroupMut { tree: self, id: GroupId::ROOT }
    }

    pub fn group_mut(&mut self, id: GroupId) -> Option<GroupMut<'_>> {
        (id.0 < self.groups.len()).then(|| GroupMut { tree: self, id })
    }

    /// Flattens the tree into one [`ResolvedRoute`] per HTTP entry, in
    /// depth-first insertion order.
    pub fn routes(&self) -> Vec<ResolvedRoute> {
        let routes = resolve::collect_routes(self);
        debug!(count = routes.len(), "route chains resolved");
        routes
    }

    fn add_group(&mut self, parent: GroupId, route: String) -> GroupId {
        let id = GroupId(self.groups.len());
        self.groups.push(Group::new(id, route, Some(parent)));
        self.groups[parent.0].push(Entry::Group(id));
        id
    }

    fn entries_mut(&mut self, id: GroupId) -> &mut Group {
        &mut self.groups[id.0]
    }
}

impl Default for RouteTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Mutable handle on one group of a [`RouteTree`].
///
/// Registration methods take the handle by value and return it, so calls
/// chain. Handles only exist for groups of the tree they borrow.
pub struct GroupMut<'t> {
    tree: &'t mut RouteTree,
    id: GroupId,
}

macro_rules! method_route {
    ($method:ident, $upper_case_method:ident) => {
        #[doc = concat!("Registers `handler` for HTTP ", stringify!($upper_case_method), " requests on `route`.")]
        pub fn $method<R, H>(self, route: R, handler: H) -> Self
        where
            R: IntoRoutes,
            H: Fn(&Request, &mut Response) + Send + Sync + 'static,
        {
            self.add_http(Method::$upper_case_method, route.into_routes(), Arc::new(handler))
        }
    };
}

impl<'t> GroupMut<'t> {
    method_route!(get, GET);
    method_route!(post, POST);
    method_route!(put, PUT);
    method_route!(delete, DELETE);
    method_route!(patch, PATCH);
    method_route!(options, OPTIONS);
    method_route!(head, HEAD);

    /// Registers `handler` on `route` for every supported method.
    pub fn all<R, H>(self, route: R, handler: H) -> Self
    where
        R: IntoRoutes,
        H: Fn(&Request, &mut Response) + Send + Sync + 'static,
    {
        let routes = route.into_routes();
        let handler: Arc<dyn Handler> = Arc::new(handler);
        SUPPORTED_METHODS
            .iter()
            .fold(self, |group, method| group.add_http(method.clone(), routes.clone(), Arc::clone(&handler)))
    }

    /// Registers `handler` under a method given by name or as [`Method`].
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::InvalidMethod`] when the method is not one of the
    /// supported ones. Nothing is registered in that case.
    pub fn on<M, R, H>(self, method: M, route: R, handler: H) -> Result<Self, RouteError>
    where
        M: AsRef<str>,
        R: IntoRoutes,
        H: Fn(&Request, &mut Response) + Send + Sync + 'static,
    {
        self.on_handler(method, route, Arc::new(handler))
    }

    /// Registers an already shared handler for `method`.
    ///
    /// # Errors
    ///
    /// Same as [`GroupMut::on`].
    pub fn on_handler<M, R>(self, method: M, route: R, handler: Arc<dyn Handler>) -> Result<Self, RouteError>
    where
        M: AsRef<str>,
        R: IntoRoutes,
    {
        let method = method.as_ref();
        let Some(method) = supported_method(method) else {
            error!(method, group = self.id.0, "rejected route registration");
            return Err(RouteError::invalid_method(method));
        };
        Ok(self.add_http(method, route.into_routes(), handler))
    }

    /// Appends a child group and returns the handle on the child.
    pub fn group(self, route: impl Into<String>) -> GroupMut<'t> {
        let route = route.into();
        let id = self.tree.add_group(self.id, route.clone());
        debug!(route = %route, parent = self.id.0, group = id.0, "group registered");
        GroupMut { tree: self.tree, id }
    }

    /// Alias of [`GroupMut::group`].
    pub fn route(self, route: impl Into<String>) -> GroupMut<'t> {
        self.group(route)
    }

    /// Appends a middleware running before every entry registered after it in
    /// this group and its sub-groups.
    pub fn middleware<M>(self, middleware: M) -> Self
    where
        M: Fn(&mut Request, &mut Response, &mut bool) + Send + Sync + 'static,
    {
        self.add_middleware(Arc::new(middleware))
    }

    /// Alias of [`GroupMut::middleware`].
    pub fn r#use<M>(self, middleware: M) -> Self
    where
        M: Fn(&mut Request, &mut Response, &mut bool) + Send + Sync + 'static,
    {
        self.middleware(middleware)
    }

    /// Appends an already shared middleware.
    pub fn add_middleware(self, middleware: Arc<dyn Middleware>) -> Self {
        self.tree.entries_mut(self.id).push(Entry::Middleware(MiddlewareEntry::new(middleware)));
        debug!(group = self.id.0, "middleware registered");
        self
    }

    /// Returns the handle on the parent group, or this handle on the root.
    pub fn end(self) -> GroupMut<'t> {
        let parent = self.tree.groups[self.id.0].parent();
        match parent {
            Some(parent) => GroupMut { tree: self.tree, id: parent },
            None => self,
        }
    }

    pub fn id(&self) -> GroupId {
        self.id
    }

    /// Read access to the group behind this handle.
    pub fn get_ref(&self) -> &Group {
        &self.tree.groups[self.id.0]
    }

    fn add_http(self, method: Method, routes: Vec<String>, handler: Arc<dyn Handler>) -> Self {
        let group = self.tree.entries_mut(self.id);
        for route in routes {
            debug!(method = %method, route = %route, group = self.id.0, "route registered");
            group.push(Entry::Http(HttpEntry::new(route, method.clone(), Arc::clone(&handler))));
        }
        self
    }
}

impl fmt::Debug for GroupMut<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroupMut").field("id", &self.id).field("group", self.get_ref()).finish()
    }
}
