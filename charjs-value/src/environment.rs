use crate::Value;
use charjs_source::{Error, Result};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// A scope frame: local bindings plus an optional link to the enclosing frame.
///
/// Cloning an `Environment` is cheap and yields a handle to the same frame.
#[derive(Clone)]
pub struct Environment(Rc<Frame>);

struct Frame {
    bindings: RefCell<HashMap<String, Value>>,
    parent: Option<Environment>,
}

impl Environment {
    /// Creates a root frame without parent.
    pub fn new_global() -> Self {
        Self(Rc::new(Frame {
            bindings: RefCell::new(HashMap::new()),
            parent: None,
        }))
    }

    /// Creates a new frame enclosed by `self`.
    pub fn child(&self) -> Self {
        Self(Rc::new(Frame {
            bindings: RefCell::new(HashMap::new()),
            parent: Some(self.clone()),
        }))
    }

    pub fn parent(&self) -> Option<&Environment> {
        self.0.parent.as_ref()
    }

    /// Walks the chain from `self` outwards.
    fn frames(&self) -> impl Iterator<Item = &Environment> {
        std::iter::successors(Some(self), |env| env.parent())
    }

    /// Returns the value bound to `name` in the nearest frame, or `None` if unbound.
    pub fn get(&self, name: &str) -> Option<Value> {
        self.frames()
            .find_map(|env| env.0.bindings.borrow().get(name).cloned())
    }

    /// Like [`Self::get`] but fails with a reference error if unbound.
    pub fn lookup(&self, name: &str) -> Result<Value> {
        self.get(name).ok_or_else(|| Error::Reference {
            name: name.to_string(),
        })
    }

    /// Binds `name` in this frame, shadowing any outer binding.
    pub fn define(&self, name: impl Into<String>, value: Value) {
        self.0.bindings.borrow_mut().insert(name.into(), value);
    }

    /// Overwrites the nearest binding of `name`. Defines it in this frame if no frame binds it.
    pub fn assign(&self, name: &str, value: Value) {
        let owner = self
            .frames()
            .find(|env| env.0.bindings.borrow().contains_key(name))
            .unwrap_or(self);
        owner.0.bindings.borrow_mut().insert(name.to_string(), value);
    }

    /// Returns `true` if any frame in the chain binds `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.frames()
            .any(|env| env.0.bindings.borrow().contains_key(name))
    }

    /// Returns `true` if this frame itself binds `name`.
    pub fn contains_local(&self, name: &str) -> bool {
        self.0.bindings.borrow().contains_key(name)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new_global()
    }
}

impl fmt::Debug for Environment {
    /// Prints bound names only: values may refer back to this environment.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bindings = self.0.bindings.borrow();
        let mut names: Vec<_> = bindings.keys().collect();
        names.sort();
        f.debug_struct("Environment")
            .field("bindings", &names)
            .field("parent", &self.0.parent)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_walks_chain() {
        let global = Environment::new_global();
        global.define("a", Value::Number(1.0));
        let local = global.child().child();
        assert_eq!(local.lookup("a"), Ok(Value::Number(1.0)));
        assert_eq!(
            local.lookup("b"),
            Err(Error::Reference {
                name: "b".to_string()
            })
        );
    }

    #[test]
    fn test_define_shadows() {
        let global = Environment::new_global();
        global.define("a", Value::Number(1.0));
        let local = global.child();
        local.define("a", Value::Number(2.0));
        assert_eq!(local.lookup("a"), Ok(Value::Number(2.0)));
        assert_eq!(global.lookup("a"), Ok(Value::Number(1.0)));
    }

    #[test]
    fn test_assign_mutates_owner() {
        let global = Environment::new_global();
        global.define("a", Value::Number(1.0));
        let local = global.child();
        local.assign("a", Value::Number(2.0));
        assert_eq!(global.lookup("a"), Ok(Value::Number(2.0)));
        assert!(!local.contains_local("a"));

        // unbound names land in the current frame
        local.assign("b", Value::Null);
        assert!(local.contains_local("b"));
        assert!(!global.contains("b"));
    }

    #[test]
    fn test_debug_lists_names() {
        let global = Environment::new_global();
        global.define("b", Value::Null);
        global.define("a", Value::Null);
        assert_eq!(
            format!("{:?}", global),
            r#"Environment { bindings: ["a", "b"], parent: None }"#
        );
    }
}
