use micro_route::{CookieOptions, Json, Request, Response, RouteTree};
use serde::Serialize;
use serde_json::json;
use tracing::{Level, error, info, warn};
use tracing_subscriber::FmtSubscriber;

#[derive(Serialize)]
struct User {
    name: String,
    zip: String,
}

fn main() {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::DEBUG).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let mut tree = RouteTree::new();
    tree.root_mut()
        .middleware(|req, _res, _stop| {
            let agent = req.header("User-Agent").unwrap_or("unknown").to_owned();
            req.extra_mut().set("agent", agent);
        })
        .get("/", |req, res| {
            res.send(format!("hello from {}", req.extra().get("agent").unwrap_or(&json!("?"))));
        })
        .group("/api")
        .middleware(|req, res, stop| {
            if req.cookie("sid").is_none() {
                res.status(401).json(json!({"error": "login required"}));
                *stop = true;
            }
        })
        .post("/users", |req, res| {
            let form = req.body().as_form().cloned().unwrap_or_default();
            let user = User {
                name: form.get("name").and_then(|v| v.as_str()).unwrap_or_default().to_owned(),
                zip: form.get("zip").and_then(|v| v.as_str()).unwrap_or_default().to_owned(),
            };
            res.status(201).json(Json(user));
        })
        .end()
        .post("/login", |_req, res| {
            res.cookie("sid", "s3cr3t", CookieOptions::new().path("/").http_only(true)).redirect(302, "/");
        });

    let routes = tree.routes();
    for route in &routes {
        info!(method = %route.method(), path = route.path(), middlewares = route.middlewares().len(), "route");
    }

    let requests = [
        vec![("REQUEST_METHOD", "GET"), ("REQUEST_URI", "/?lang=en"), ("HTTP_USER_AGENT", "curl/8.0")],
        vec![("REQUEST_METHOD", "POST"), ("REQUEST_URI", "/api/users"), ("CONTENT_TYPE", "application/x-www-form-urlencoded")],
        vec![
            ("REQUEST_METHOD", "POST"),
            ("REQUEST_URI", "/api/users"),
            ("CONTENT_TYPE", "application/x-www-form-urlencoded"),
            ("HTTP_COOKIE", "sid=s3cr3t"),
        ],
        vec![("REQUEST_METHOD", "POST"), ("REQUEST_URI", "/login")],
    ];

    for vars in requests {
        let mut req = match Request::from_vars(vars, "name=hello&zip=world") {
            Ok(req) => req,
            Err(e) => {
                error!(cause = %e, "invalid request");
                continue;
            }
        };

        // exact path comparison stands in for a real matcher
        let Some(route) = routes.iter().find(|route| route.method() == req.method() && route.path() == req.path()) else {
            warn!(path = req.path(), "no route matched");
            continue;
        };

        let mut res = Response::new();
        let completed = route.run(&mut req, &mut res);
        res.end();

        let dump = serde_json::to_string(&res.dump()).expect("dump is serializable");
        info!(path = req.path(), completed, dump = %dump, "request handled");
    }
}
