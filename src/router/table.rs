//! Static route table and path matching.

use std::borrow::Cow;

/// Login page path; the guard's target for unauthenticated access.
pub const LOGIN_PATH: &str = "/login";
pub const REGISTER_PATH: &str = "/register";
/// Landing page for authenticated users.
pub const DASHBOARD_PATH: &str = "/dashboard";

/// Screen a route renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Login,
    Register,
    Dashboard,
    Profile,
    Users,
    Notes,
    NoteEditor,
    NoteDetail,
    UserNotes,
}

/// What a matched route does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    View(View),
    /// Unconditional redirect applied before the guard runs.
    Redirect(&'static str),
}

/// A single route descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Pattern, with `:name` for parameter segments.
    pub path: &'static str,
    pub name: &'static str,
    pub target: Target,
    pub requires_auth: bool,
}

impl Route {
    const fn view(path: &'static str, name: &'static str, view: View, requires_auth: bool) -> Self {
        Self {
            path,
            name,
            target: Target::View(view),
            requires_auth,
        }
    }

    const fn redirect(path: &'static str, name: &'static str, to: &'static str) -> Self {
        Self {
            path,
            name,
            target: Target::Redirect(to),
            requires_auth: false,
        }
    }

    /// Match `segments` against this route's pattern.
    ///
    /// Returns the decoded parameters and the number of static segments that
    /// matched, used to rank competing routes.
    fn matches(&self, segments: &[&str]) -> Option<(Vec<(String, String)>, usize)> {
        let pattern = split_segments(self.path);
        if pattern.len() != segments.len() {
            return None;
        }

        let mut params = Vec::new();
        let mut static_count = 0;
        for (expected, actual) in pattern.iter().zip(segments) {
            if let Some(name) = expected.strip_prefix(':') {
                params.push((name.to_string(), decode_segment(actual)));
            } else if expected == actual {
                static_count += 1;
            } else {
                return None;
            }
        }
        Some((params, static_count))
    }
}

/// A concrete path matched against the table.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<'a> {
    pub route: &'a Route,
    /// Normalized path: no query, fragment or trailing slash.
    pub path: String,
    pub params: Vec<(String, String)>,
}

impl Resolved<'_> {
    /// Value of the path parameter `name`.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Immutable list of routes, built once at startup.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    /// The application's route table.
    pub fn default_routes() -> Self {
        Self::new(vec![
            Route::redirect("/", "Root", LOGIN_PATH),
            Route::view(LOGIN_PATH, "Login", View::Login, false),
            Route::view(REGISTER_PATH, "Register", View::Register, false),
            Route::view(DASHBOARD_PATH, "Dashboard", View::Dashboard, true),
            Route::view("/profile", "Profile", View::Profile, true),
            Route::view("/users", "Users", View::Users, true),
            Route::view("/notes", "Notes", View::Notes, true),
            Route::view("/notes/new", "NewNote", View::NoteEditor, true),
            Route::view("/notes/:id", "NoteDetail", View::NoteDetail, true),
            Route::view("/user/:userId/:username", "UserNotes", View::UserNotes, false),
        ])
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Look up a route by name.
    pub fn by_name(&self, name: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.name == name)
    }

    /// Match a concrete path. Static segments win over parameters; among equal
    /// matches the earlier route wins.
    pub fn resolve(&self, path: &str) -> Option<Resolved<'_>> {
        let path = normalize(path);
        let segments = split_segments(&path);

        let mut best: Option<(&Route, Vec<(String, String)>, usize)> = None;
        for route in &self.routes {
            if let Some((params, score)) = route.matches(&segments) {
                if best.as_ref().map_or(true, |(_, _, s)| score > *s) {
                    best = Some((route, params, score));
                }
            }
        }

        best.map(|(route, params, _)| Resolved {
            route,
            path,
            params,
        })
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::default_routes()
    }
}

/// Strip query and fragment, ensure a leading slash, drop a trailing slash.
pub fn normalize(path: &str) -> String {
    let end = path.find(|c| c == '?' || c == '#').unwrap_or(path.len());
    let trimmed = path[..end].trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

fn split_segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

fn decode_segment(raw: &str) -> String {
    urlencoding::decode(raw)
        .unwrap_or(Cow::Borrowed(raw))
        .into_owned()
}
