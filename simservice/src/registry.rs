//! Method registry mapping route names to verbs, required parameters and
//! handlers.

use std::collections::HashMap;

use http::Method as Verb;
use tracing::debug;

/// Handler capability for a registered method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Create,
    Delete,
    Insert,
    Consensus,
}

/// A registered method.
#[derive(Debug, Clone)]
pub struct Method {
    /// Route name (request path without the leading `/`).
    pub name: String,
    /// Required HTTP verb.
    pub verb: Verb,
    /// Parameter keys that must be present, checked in order.
    pub required: Vec<&'static str>,
    /// Handler to run.
    pub route: Route,
}

impl Method {
    pub fn new(
        name: impl Into<String>,
        verb: Verb,
        required: &[&'static str],
        route: Route,
    ) -> Self {
        Self {
            name: name.into(),
            verb,
            required: required.to_vec(),
            route,
        }
    }
}

/// Route table. Populated before serving and read-only afterwards.
#[derive(Debug, Default, Clone)]
pub struct Registry {
    methods: HashMap<String, Method>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The four standard store routes.
    pub fn standard() -> Self {
        let mut reg = Self::new();
        reg.register(Method::new("create", Verb::POST, &["name"], Route::Create));
        reg.register(Method::new(
            "insert",
            Verb::POST,
            &["name", "id", "content"],
            Route::Insert,
        ));
        reg.register(Method::new(
            "consensus",
            Verb::GET,
            &["name"],
            Route::Consensus,
        ));
        reg.register(Method::new("delete", Verb::DELETE, &["name"], Route::Delete));
        reg
    }

    /// Insert a method, replacing any previous one with the same name.
    pub fn register(&mut self, method: Method) {
        debug!(name = %method.name, verb = %method.verb, required = ?method.required, "registering method");
        self.methods.insert(method.name.clone(), method);
    }

    /// Look up a method by route name.
    pub fn lookup(&self, name: &str) -> Option<&Method> {
        self.methods.get(name)
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_routes() {
        let reg = Registry::standard();
        assert_eq!(reg.len(), 4);

        let create = reg.lookup("create").unwrap();
        assert_eq!(create.verb, Verb::POST);
        assert_eq!(create.required, vec!["name"]);
        assert_eq!(create.route, Route::Create);

        let insert = reg.lookup("insert").unwrap();
        assert_eq!(insert.required, vec!["name", "id", "content"]);

        assert_eq!(reg.lookup("consensus").unwrap().verb, Verb::GET);
        assert_eq!(reg.lookup("delete").unwrap().verb, Verb::DELETE);
    }

    #[test]
    fn test_lookup_missing() {
        let reg = Registry::standard();
        assert!(reg.lookup("nope").is_none());
        assert!(reg.lookup("").is_none());
        assert!(reg.lookup("/create").is_none());
    }

    #[test]
    fn test_last_registration_wins() {
        let mut reg = Registry::new();
        assert!(reg.is_empty());
        reg.register(Method::new("create", Verb::POST, &["name"], Route::Create));
        reg.register(Method::new("create", Verb::PUT, &[], Route::Delete));
        assert_eq!(reg.len(), 1);

        let m = reg.lookup("create").unwrap();
        assert_eq!(m.verb, Verb::PUT);
        assert!(m.required.is_empty());
        assert_eq!(m.route, Route::Delete);
    }
}
