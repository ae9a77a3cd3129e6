//! Callbacks stored in the route tree.
//!
//! Both traits are implemented for plain closures, so most code never names
//! them; they exist so the tree can store callbacks behind `Arc<dyn _>` and
//! share one callback between several entries.

use micro_route_http::protocol::{Request, Response};

/// The terminal callback of an HTTP entry.
#[cfg_attr(test, mockall::automock)]
pub trait Handler: Send + Sync {
    fn handle(&self, req: &Request, res: &mut Response);
}

impl<F> Handler for F
where
    F: Fn(&Request, &mut Response) + Send + Sync,
{
    #[inline]
    fn handle(&self, req: &Request, res: &mut Response) {
        (self)(req, res);
    }
}

/// A callback that runs before the handlers registered after it.
///
/// Setting `stop` to `true` halts the chain: no later middleware and no handler
/// is invoked. The request is mutable so values can be handed downstream
/// through its [`ExtraData`](micro_route_http::protocol::ExtraData).
#[cfg_attr(test, mockall::automock)]
pub trait Middleware: Send + Sync {
    fn handle(&self, req: &mut Request, res: &mut Response, stop: &mut bool);
}

impl<F> Middleware for F
where
    F: Fn(&mut Request, &mut Response, &mut bool) + Send + Sync,
{
    #[inline]
    fn handle(&self, req: &mut Request, res: &mut Response, stop: &mut bool) {
        (self)(req, res, stop);
    }
}
