use charjs_source::Result;
use charjs_value::{Environment, Value};

/// A resolved assignment target.
///
/// Resolving evaluates everything left of the final name (the object and index expressions)
/// exactly once, so `get` followed by `set` does not repeat side effects.
#[derive(Debug, Clone)]
pub enum Reference {
    /// A variable, looked up through `env`.
    Binding { env: Environment, name: String },
    /// A property of an object or array.
    Member { object: Value, key: String },
}

impl Reference {
    pub fn get(&self) -> Result<Value> {
        match self {
            Reference::Binding { env, name } => env.lookup(name),
            Reference::Member { object, key } => object.get_property(key),
        }
    }

    /// Assigns to the nearest frame binding the variable, or the frame of `env` if none does.
    pub fn set(&self, value: Value) -> Result<()> {
        match self {
            Reference::Binding { env, name } => {
                env.assign(name, value);
                Ok(())
            }
            Reference::Member { object, key } => object.set_property(key, value),
        }
    }

    /// The `delete` operator. Variables cannot be deleted.
    pub fn delete(&self) -> Result<bool> {
        match self {
            Reference::Binding { .. } => Ok(false),
            Reference::Member { object, key } => {
                object.delete_property(key)?;
                Ok(true)
            }
        }
    }
}
