//! Declarative route tree for micro-route.
//!
//! Routes, groups and middleware are registered through chained calls on a
//! [`GroupMut`] handle, then the built [`RouteTree`] is flattened with
//! [`RouteTree::routes`] into [`ResolvedRoute`]s an external matcher can
//! dispatch to. The request and response types come from
//! [`micro_route_http`] and are re-exported here.

mod entry;
mod handler;

pub mod router;

pub use entry::Entry;
pub use entry::EntryKind;
pub use entry::Group;
pub use entry::GroupId;
pub use entry::HttpEntry;
pub use entry::MiddlewareEntry;
pub use handler::Handler;
pub use handler::Middleware;
pub use router::GroupMut;
pub use router::IntoRoutes;
pub use router::ResolvedRoute;
pub use router::RouteError;
pub use router::RouteTree;
pub use router::join_routes;

pub use micro_route_http::protocol::{CookieOptions, Json, ParsedBody, Request, RequestError, Response, SUPPORTED_METHODS};
