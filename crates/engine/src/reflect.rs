//! Reflection surface for foreign components
//!
//! Foreign extensions are compiled independently, so we only know their
//! members by name. Type metadata ([`TypeInfo`]) is published by the module,
//! live objects implement [`Reflect`].

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use rhud_sdk::Vector2;

use crate::error::ReflectError;
use crate::flags::MemberFlags;

/// Shared reference to a live foreign object
pub type ObjectRef = Arc<dyn Reflect>;

/// A boxed field or argument value
#[derive(Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i32),
    Float(f32),
    Vector2(Vector2),
    Str(String),
    Object(ObjectRef),
}

impl Value {
    /// Name of the variant, used in mismatch diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Vector2(_) => "Vector2",
            Value::Str(_) => "string",
            Value::Object(_) => "object",
        }
    }

    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_vector2(&self) -> Option<Vector2> {
        match self {
            Value::Vector2(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Bool(v) => write!(f, "Bool({})", v),
            Value::Int(v) => write!(f, "Int({})", v),
            Value::Float(v) => write!(f, "Float({})", v),
            Value::Vector2(v) => write!(f, "Vector2({}, {})", v.x, v.y),
            Value::Str(v) => write!(f, "Str({:?})", v),
            Value::Object(o) => write!(f, "Object({})", o.type_name()),
        }
    }
}

/// Field metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldInfo {
    pub name: String,
    pub flags: MemberFlags,
}

/// Method metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodInfo {
    pub name: String,
    pub flags: MemberFlags,
    pub arity: usize,
}

/// Type metadata published by a loaded module
#[derive(Debug, Clone, Default)]
pub struct TypeInfo {
    full_name: String,
    fields: Vec<FieldInfo>,
    methods: Vec<MethodInfo>,
}

impl TypeInfo {
    pub fn new(full_name: &str) -> Self {
        Self {
            full_name: full_name.to_string(),
            ..Default::default()
        }
    }

    pub fn with_field(mut self, name: &str, flags: MemberFlags) -> Self {
        self.fields.push(FieldInfo {
            name: name.to_string(),
            flags,
        });
        self
    }

    pub fn with_method(mut self, name: &str, flags: MemberFlags, arity: usize) -> Self {
        self.methods.push(MethodInfo {
            name: name.to_string(),
            flags,
            arity,
        });
        self
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn field(&self, name: &str, flags: MemberFlags) -> Option<&FieldInfo> {
        self.fields
            .iter()
            .find(|f| f.name == name && f.flags.matches(flags))
    }

    pub fn method(&self, name: &str, flags: MemberFlags) -> Option<&MethodInfo> {
        self.methods
            .iter()
            .find(|m| m.name == name && m.flags.matches(flags))
    }
}

/// Reflective access to a live object
pub trait Reflect: Send + Sync {
    /// Fully qualified runtime type name
    fn type_name(&self) -> &str;

    fn get_field(&self, field: &FieldInfo) -> Result<Value, ReflectError>;

    fn set_field(&self, field: &FieldInfo, value: Value) -> Result<(), ReflectError>;

    fn call(&self, method: &MethodInfo, args: &[Value]) -> Result<Value, ReflectError>;
}

/// Body of a method on a [`DynamicObject`]
pub type DynamicMethod =
    Arc<dyn Fn(&DynamicObject, &[Value]) -> Result<Value, ReflectError> + Send + Sync>;

/// Reflective object backed by name-keyed storage
///
/// Host bridges use this to expose objects from foreign modules.
pub struct DynamicObject {
    type_name: String,
    fields: RwLock<HashMap<String, Value>>,
    methods: HashMap<String, DynamicMethod>,
}

impl DynamicObject {
    pub fn new(type_name: &str) -> Self {
        Self {
            type_name: type_name.to_string(),
            fields: RwLock::new(HashMap::new()),
            methods: HashMap::new(),
        }
    }

    pub fn with_field(self, name: &str, value: Value) -> Self {
        self.fields.write().insert(name.to_string(), value);
        self
    }

    pub fn with_method<F>(mut self, name: &str, body: F) -> Self
    where
        F: Fn(&DynamicObject, &[Value]) -> Result<Value, ReflectError> + Send + Sync + 'static,
    {
        self.methods.insert(name.to_string(), Arc::new(body));
        self
    }

    /// Read a field by name, bypassing metadata
    pub fn field(&self, name: &str) -> Option<Value> {
        self.fields.read().get(name).cloned()
    }

    pub fn into_ref(self) -> ObjectRef {
        Arc::new(self)
    }
}

impl Reflect for DynamicObject {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn get_field(&self, field: &FieldInfo) -> Result<Value, ReflectError> {
        self.fields
            .read()
            .get(&field.name)
            .cloned()
            .ok_or_else(|| ReflectError::FieldNotFound {
                type_name: self.type_name.clone(),
                field: field.name.clone(),
            })
    }

    fn set_field(&self, field: &FieldInfo, value: Value) -> Result<(), ReflectError> {
        let mut fields = self.fields.write();
        let slot = fields
            .get_mut(&field.name)
            .ok_or_else(|| ReflectError::FieldNotFound {
                type_name: self.type_name.clone(),
                field: field.name.clone(),
            })?;

        // Fields keep their declared kind; null slots accept anything
        if !matches!(slot, Value::Null) && slot.kind() != value.kind() {
            return Err(ReflectError::TypeMismatch {
                member: field.name.clone(),
                expected: slot.kind(),
                found: value.kind(),
            });
        }

        *slot = value;
        Ok(())
    }

    fn call(&self, method: &MethodInfo, args: &[Value]) -> Result<Value, ReflectError> {
        if args.len() != method.arity {
            return Err(ReflectError::ArgumentCount {
                method: method.name.clone(),
                expected: method.arity,
                got: args.len(),
            });
        }

        let body = self
            .methods
            .get(&method.name)
            .cloned()
            .ok_or_else(|| ReflectError::MethodNotFound {
                type_name: self.type_name.clone(),
                method: method.name.clone(),
            })?;

        body(self, args)
    }
}
