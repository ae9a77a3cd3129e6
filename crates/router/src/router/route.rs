/// One or several route patterns given to a registration call.
///
/// A single pattern registers one entry; a sequence registers one entry per
/// pattern, all sharing the method and handler.
pub trait IntoRoutes {
    fn into_routes(self) -> Vec<String>;
}

impl IntoRoutes for &str {
    fn into_routes(self) -> Vec<String> {
        vec![self.to_owned()]
    }
}

impl IntoRoutes for String {
    fn into_routes(self) -> Vec<String> {
        vec![self]
    }
}

impl IntoRoutes for &String {
    fn into_routes(self) -> Vec<String> {
        vec![self.clone()]
    }
}

impl<S: AsRef<str>> IntoRoutes for &[S] {
    fn into_routes(self) -> Vec<String> {
        self.iter().map(|route| route.as_ref().to_owned()).collect()
    }
}

impl<S: AsRef<str>, const N: usize> IntoRoutes for [S; N] {
    fn into_routes(self) -> Vec<String> {
        self.iter().map(|route| route.as_ref().to_owned()).collect()
    }
}

impl<S: AsRef<str>> IntoRoutes for Vec<S> {
    fn into_routes(self) -> Vec<String> {
        self.iter().map(|route| route.as_ref().to_owned()).collect()
    }
}

/// Joins route segments with `/`.
///
/// Every run of consecutive slashes, whether inside a segment or produced by
/// the join, collapses into a single `/` (`//a///b` becomes `/a/b`). No other
/// normalization happens: `..` segments and trailing slashes are kept.
///
/// # Example
/// ```
/// use micro_route::join_routes;
///
/// assert_eq!(join_routes(["/a", "/b"]), "/a/b");
/// assert_eq!(join_routes(["/a/", "/b"]), "/a/b");
/// assert_eq!(join_routes(["", "users", "{id}/"]), "/users/{id}/");
/// ```
pub fn join_routes<I>(parts: I) -> String
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut joined = String::new();
    for (index, part) in parts.into_iter().enumerate() {
        if index > 0 {
            push_collapsed(&mut joined, "/");
        }
        push_collapsed(&mut joined, part.as_ref());
    }
    joined
}

fn push_collapsed(target: &mut String, part: &str) {
    for ch in part.chars() {
        if ch == '/' && target.ends_with('/') {
            continue;
        }
        target.push(ch);
    }
}
