//! Nodes of the route tree.

use crate::handler::{Handler, Middleware};
use http::Method;
use micro_route_http::protocol::{Request, Response};
use std::fmt;
use std::sync::Arc;

/// Index of a [`Group`] inside its [`RouteTree`](crate::RouteTree).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupId(pub(crate) usize);

impl GroupId {
    pub(crate) const ROOT: GroupId = GroupId(0);

    #[inline]
    pub fn is_root(self) -> bool {
        self == Self::ROOT
    }
}

/// What kind of node an [`Entry`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Middleware,
    Http,
    Group,
}

/// One child of a [`Group`].
///
/// Sub-groups are owned by the tree's arena; the entry only refers to them.
#[derive(Debug, Clone)]
pub enum Entry {
    Middleware(MiddlewareEntry),
    Http(HttpEntry),
    Group(GroupId),
}

impl Entry {
    pub fn kind(&self) -> EntryKind {
        match self {
            Entry::Middleware(_) => EntryKind::Middleware,
            Entry::Http(_) => EntryKind::Http,
            Entry::Group(_) => EntryKind::Group,
        }
    }

    pub fn as_http(&self) -> Option<&HttpEntry> {
        match self {
            Entry::Http(http) => Some(http),
            _ => None,
        }
    }

    pub fn as_middleware(&self) -> Option<&MiddlewareEntry> {
        match self {
            Entry::Middleware(middleware) => Some(middleware),
            _ => None,
        }
    }

    pub fn as_group(&self) -> Option<GroupId> {
        match self {
            Entry::Group(id) => Some(*id),
            _ => None,
        }
    }
}

#[derive(Clone)]
pub struct MiddlewareEntry {
    middleware: Arc<dyn Middleware>,
}

impl MiddlewareEntry {
    pub(crate) fn new(middleware: Arc<dyn Middleware>) -> Self {
        Self { middleware }
    }

    pub fn middleware(&self) -> &Arc<dyn Middleware> {
        &self.middleware
    }

    #[inline]
    pub fn call(&self, req: &mut Request, res: &mut Response, stop: &mut bool) {
        self.middleware.handle(req, res, stop);
    }
}

impl fmt::Debug for MiddlewareEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MiddlewareEntry").finish_non_exhaustive()
    }
}

/// A route pattern bound to a method and a handler.
#[derive(Clone)]
pub struct HttpEntry {
    route: String,
    method: Method,
    handler: Arc<dyn Handler>,
}

impl HttpEntry {
    pub(crate) fn new(route: String, method: Method, handler: Arc<dyn Handler>) -> Self {
        Self { route, method, handler }
    }

    pub fn route(&self) -> &str {
        &self.route
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn handler(&self) -> &Arc<dyn Handler> {
        &self.handler
    }

    #[inline]
    pub fn call(&self, req: &Request, res: &mut Response) {
        self.handler.handle(req, res);
    }
}

impl fmt::Debug for HttpEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpEntry").field("route", &self.route).field("method", &self.method).finish_non_exhaustive()
    }
}

/// A path prefix owning an ordered list of children.
///
/// Children keep their insertion order, which is the order middleware runs
/// and routes take precedence in. A group without parent is the root.
#[derive(Debug, Clone)]
pub struct Group {
    id: GroupId,
    route: String,
    parent: Option<GroupId>,
    children: Vec<Entry>,
}

impl Group {
    pub(crate) fn new(id: GroupId, route: String, parent: Option<GroupId>) -> Self {
        Self { id, route, parent, children: Vec::new() }
    }

    pub fn id(&self) -> GroupId {
        self.id
    }

    pub fn route(&self) -> &str {
        &self.route
    }

    pub fn parent(&self) -> Option<GroupId> {
        self.parent
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn children(&self) -> &[Entry] {
        &self.children
    }

    pub(crate) fn push(&mut self, entry: Entry) {
        self.children.push(entry);
    }
}
