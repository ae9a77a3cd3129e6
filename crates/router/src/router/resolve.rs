use super::RouteTree;
use super::route::join_routes;
use crate::entry::{Entry, GroupId};
use crate::handler::{Handler, Middleware};
use http::Method;
use micro_route_http::protocol::{Request, Response};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// An HTTP entry with its full path and the middleware chain running before it.
#[derive(Clone)]
pub struct ResolvedRoute {
    method: Method,
    path: String,
    middlewares: Vec<Arc<dyn Middleware>>,
    handler: Arc<dyn Handler>,
}

impl ResolvedRoute {
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The joined routes of every ancestor group and of the entry itself.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn middlewares(&self) -> &[Arc<dyn Middleware>] {
        &self.middlewares
    }

    pub fn handler(&self) -> &Arc<dyn Handler> {
        &self.handler
    }

    /// Runs the middleware chain, then the handler.
    ///
    /// Returns `false` when a middleware set the stop flag, in which case
    /// neither the remaining middlewares nor the handler were invoked.
    pub fn run(&self, req: &mut Request, res: &mut Response) -> bool {
        let mut stop = false;
        for (index, middleware) in self.middlewares.iter().enumerate() {
            middleware.handle(req, res, &mut stop);
            if stop {
                debug!(method = %self.method, path = %self.path, middleware = index, "route chain stopped");
                return false;
            }
        }

        self.handler.handle(req, res);
        true
    }
}

impl fmt::Debug for ResolvedRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedRoute")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("middlewares", &self.middlewares.len())
            .finish_non_exhaustive()
    }
}

pub(super) fn collect_routes(tree: &RouteTree) -> Vec<ResolvedRoute> {
    let mut routes = Vec::new();
    let mut prefixes = Vec::new();
    walk(tree, tree.root_id(), &mut prefixes, Vec::new(), &mut routes);
    routes
}

fn walk<'t>(
    tree: &'t RouteTree,
    id: GroupId,
    prefixes: &mut Vec<&'t str>,
    mut chain: Vec<Arc<dyn Middleware>>,
    routes: &mut Vec<ResolvedRoute>,
) {
    let Some(group) = tree.group(id) else {
        return;
    };

    prefixes.push(group.route());
    for entry in group.children() {
        match entry {
            Entry::Middleware(middleware) => chain.push(Arc::clone(middleware.middleware())),
            Entry::Http(http) => {
                let path = join_routes(prefixes.iter().copied().chain([http.route()]));
                routes.push(ResolvedRoute {
                    method: http.method().clone(),
                    path,
                    middlewares: chain.clone(),
                    handler: Arc::clone(http.handler()),
                });
            }
            Entry::Group(child) => walk(tree, *child, prefixes, chain.clone(), routes),
        }
    }
    prefixes.pop();
}
