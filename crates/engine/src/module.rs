//! Loaded extension modules

use std::collections::HashMap;

use crate::reflect::TypeInfo;

/// An extension module loaded into the host process, with its published types
#[derive(Debug, Clone)]
pub struct LoadedModule {
    name: String,
    types: HashMap<String, TypeInfo>,
}

impl LoadedModule {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            types: HashMap::new(),
        }
    }

    pub fn with_type(mut self, info: TypeInfo) -> Self {
        self.types.insert(info.full_name().to_string(), info);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resolve a type by its fully qualified name
    pub fn get_type(&self, full_name: &str) -> Option<&TypeInfo> {
        self.types.get(full_name)
    }
}
