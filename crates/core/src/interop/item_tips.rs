//! Adapter for the item tips extension
//!
//! ```text
//! ItemTipsMod (module)
//! ├── ItemTipsMod.ItemTipsModule   live component
//! │   └── _currentSettings         -> Settings
//! └── ItemTipsMod.Settings
//!     ├── Left: float              0.01 by default
//!     ├── Top: float               0.20 by default
//!     └── GetSize(int scale) -> Vector2
//! ```

use std::panic::{self, AssertUnwindSafe};

use rhud_engine::{
    FieldInfo, HostRuntime, LoadedModule, MemberFlags, MethodInfo, ObjectRef, ReflectError,
    TypeInfo, Value,
};
use rhud_sdk::names::item_tips;

use super::{Discovery, InteropError, LayoutSettings, SettingsSnapshot};

/// Settings holder of the live item tips component
pub struct ItemTipsSettings {
    settings: ObjectRef,
    left: FieldInfo,
    top: FieldInfo,
    get_size: MethodInfo,
}

impl std::fmt::Debug for ItemTipsSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItemTipsSettings")
            .field("type", &self.settings.type_name())
            .finish_non_exhaustive()
    }
}

/// Find the item tips settings holder in `host`
///
/// A missing module or a module that hasn't instantiated its component yet is
/// [`Discovery::Absent`]. Anything else going wrong inside a loaded module is
/// [`Discovery::FoundButInvalid`].
pub fn locate(host: &HostRuntime) -> Discovery<ItemTipsSettings> {
    let Some(module) = host
        .loaded_modules()
        .into_iter()
        .find(|m| m.name() == item_tips::MODULE)
    else {
        return Discovery::Absent;
    };

    match resolve(&module, host) {
        Ok(Some(settings)) => Discovery::Found(settings),
        Ok(None) => Discovery::Absent,
        Err(e) => Discovery::FoundButInvalid(e),
    }
}

fn resolve(
    module: &LoadedModule,
    host: &HostRuntime,
) -> Result<Option<ItemTipsSettings>, InteropError> {
    let module_type = get_type(module, item_tips::MODULE_TYPE)?;
    let settings_type = get_type(module, item_tips::SETTINGS_TYPE)?;

    // Exact runtime type, subclasses don't count
    let Some(instance) = host
        .active_components()
        .into_iter()
        .find(|c| c.type_name() == module_type.full_name())
    else {
        tracing::debug!(
            "{} loaded but no live {} yet",
            item_tips::MODULE,
            item_tips::MODULE_TYPE
        );
        return Ok(None);
    };

    let settings_field = get_field(module_type, item_tips::CURRENT_SETTINGS_FIELD)?;
    let left = get_field(settings_type, item_tips::LEFT_FIELD)?.clone();
    let top = get_field(settings_type, item_tips::TOP_FIELD)?.clone();
    let get_size = settings_type
        .method(
            item_tips::GET_SIZE_METHOD,
            MemberFlags::PUBLIC | MemberFlags::INSTANCE,
        )
        .ok_or_else(|| InteropError::MethodNotFound {
            type_name: settings_type.full_name().to_string(),
            method: item_tips::GET_SIZE_METHOD.to_string(),
        })?
        .clone();

    let value = guarded(&settings_field.name, || instance.get_field(settings_field))?;
    let settings = value
        .as_object()
        .cloned()
        .ok_or_else(|| InteropError::UnexpectedValue {
            member: settings_field.name.clone(),
            expected: "object",
            found: value.kind(),
        })?;

    if settings.type_name() != settings_type.full_name() {
        tracing::warn!(
            "{} holds a {}, expected {}",
            settings_field.name,
            settings.type_name(),
            settings_type.full_name()
        );
    }

    Ok(Some(ItemTipsSettings {
        settings,
        left,
        top,
        get_size,
    }))
}

fn get_type<'m>(module: &'m LoadedModule, name: &str) -> Result<&'m TypeInfo, InteropError> {
    module
        .get_type(name)
        .ok_or_else(|| InteropError::TypeNotFound {
            module: module.name().to_string(),
            type_name: name.to_string(),
        })
}

fn get_field<'t>(ty: &'t TypeInfo, name: &str) -> Result<&'t FieldInfo, InteropError> {
    ty.field(name, MemberFlags::ANY_INSTANCE)
        .ok_or_else(|| InteropError::FieldNotFound {
            type_name: ty.full_name().to_string(),
            field: name.to_string(),
        })
}

/// Call into foreign code, turning its panics into errors
fn guarded<T, F>(member: &str, f: F) -> Result<T, InteropError>
where
    F: FnOnce() -> Result<T, ReflectError>,
{
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result.map_err(InteropError::from),
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            Err(InteropError::Panicked {
                member: member.to_string(),
                message,
            })
        }
    }
}

impl ItemTipsSettings {
    fn read_f32(&self, field: &FieldInfo) -> Result<f32, InteropError> {
        let value = guarded(&field.name, || self.settings.get_field(field))?;
        value.as_f32().ok_or_else(|| InteropError::UnexpectedValue {
            member: field.name.clone(),
            expected: "float",
            found: value.kind(),
        })
    }

    fn write_f32(&self, field: &FieldInfo, value: f32) -> Result<(), InteropError> {
        guarded(&field.name, || {
            self.settings.set_field(field, Value::Float(value))
        })
    }
}

impl LayoutSettings for ItemTipsSettings {
    fn snapshot(&self, scale: i32) -> Result<SettingsSnapshot, InteropError> {
        let left = self.read_f32(&self.left)?;
        let top = self.read_f32(&self.top)?;

        let value = guarded(&self.get_size.name, || {
            self.settings.call(&self.get_size, &[Value::Int(scale)])
        })?;
        let size = value
            .as_vector2()
            .ok_or_else(|| InteropError::UnexpectedValue {
                member: self.get_size.name.clone(),
                expected: "Vector2",
                found: value.kind(),
            })?;

        Ok(SettingsSnapshot { left, top, size })
    }

    /// Both fields must hold floats before either is written. If the second
    /// write fails the first is rolled back, so the panel never ends up
    /// half-moved.
    fn write_position(&self, left: f32, top: f32) -> Result<(), InteropError> {
        let previous_left = self.read_f32(&self.left)?;
        self.read_f32(&self.top)?;

        self.write_f32(&self.left, left)?;
        if let Err(e) = self.write_f32(&self.top, top) {
            if let Err(rollback) = self.write_f32(&self.left, previous_left) {
                tracing::warn!("Could not restore {}: {}", self.left.name, rollback);
            }
            return Err(e);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{
        item_tips_component, item_tips_module, item_tips_settings, CountingObject,
    };
    use rhud_engine::{DynamicObject, Reflect};
    use rhud_sdk::Vector2;
    use std::sync::atomic::Ordering;
    use std::sync::Arc;

    #[test]
    fn test_absent_module() {
        let host = HostRuntime::new();
        assert!(matches!(locate(&host), Discovery::Absent));
    }

    #[test]
    fn test_module_without_instance_is_absent() {
        let host = HostRuntime::new();
        host.load_module(item_tips_module());
        assert!(matches!(locate(&host), Discovery::Absent));
    }

    #[test]
    fn test_module_missing_type_is_invalid() {
        let host = HostRuntime::new();
        host.load_module(LoadedModule::new(item_tips::MODULE));
        assert!(matches!(
            locate(&host),
            Discovery::FoundButInvalid(InteropError::TypeNotFound { .. })
        ));
    }

    #[test]
    fn test_other_component_types_ignored() {
        let host = HostRuntime::new();
        host.load_module(item_tips_module());
        host.spawn_component(DynamicObject::new("ItemTipsMod.ItemTipsModuleEx").into_ref());
        assert!(matches!(locate(&host), Discovery::Absent));
    }

    #[test]
    fn test_snapshot_and_write() {
        let host = HostRuntime::new();
        host.load_module(item_tips_module());
        let settings = item_tips_settings(Vector2::new(384.0, 120.0));
        host.spawn_component(item_tips_component(&settings));

        let found = locate(&host).found().unwrap();
        let snapshot = found.snapshot(1).unwrap();
        assert_eq!(snapshot.left, 0.01);
        assert_eq!(snapshot.top, 0.20);
        assert_eq!(snapshot.size, Vector2::new(384.0, 120.0));

        found.write_position(0.5, 0.25).unwrap();
        assert_eq!(settings.writes.load(Ordering::SeqCst), 2);
        assert_eq!(
            settings.field(item_tips::LEFT_FIELD).unwrap().as_f32(),
            Some(0.5)
        );
    }

    #[test]
    fn test_settings_of_wrong_kind() {
        let host = HostRuntime::new();
        host.load_module(item_tips_module());
        host.spawn_component(
            DynamicObject::new(item_tips::MODULE_TYPE)
                .with_field(item_tips::CURRENT_SETTINGS_FIELD, Value::Null)
                .into_ref(),
        );

        assert!(matches!(
            locate(&host),
            Discovery::FoundButInvalid(InteropError::UnexpectedValue { .. })
        ));
    }

    #[test]
    fn test_panicking_size_query_is_contained() {
        let host = HostRuntime::new();
        host.load_module(item_tips_module());
        let settings = DynamicObject::new(item_tips::SETTINGS_TYPE)
            .with_field(item_tips::LEFT_FIELD, Value::Float(0.01))
            .with_field(item_tips::TOP_FIELD, Value::Float(0.20))
            .with_method(item_tips::GET_SIZE_METHOD, |_, _| panic!("layout not ready"))
            .into_ref();
        host.spawn_component(
            DynamicObject::new(item_tips::MODULE_TYPE)
                .with_field(item_tips::CURRENT_SETTINGS_FIELD, Value::Object(settings))
                .into_ref(),
        );

        let found = locate(&host).found().unwrap();
        match found.snapshot(1) {
            Err(InteropError::Panicked { message, .. }) => {
                assert_eq!(message, "layout not ready")
            }
            other => panic!("expected panic error, got {:?}", other),
        }
    }

    /// Settings whose `Top` refuses writes
    struct FrozenTop(DynamicObject);

    impl Reflect for FrozenTop {
        fn type_name(&self) -> &str {
            self.0.type_name()
        }

        fn get_field(&self, field: &FieldInfo) -> Result<Value, ReflectError> {
            self.0.get_field(field)
        }

        fn set_field(&self, field: &FieldInfo, value: Value) -> Result<(), ReflectError> {
            if field.name == item_tips::TOP_FIELD {
                return Err(ReflectError::Invocation {
                    method: field.name.clone(),
                    reason: "read-only".to_string(),
                });
            }
            self.0.set_field(field, value)
        }

        fn call(&self, method: &MethodInfo, args: &[Value]) -> Result<Value, ReflectError> {
            self.0.call(method, args)
        }
    }

    fn spawn_with_settings(host: &HostRuntime, settings: ObjectRef) {
        host.load_module(item_tips_module());
        host.spawn_component(
            DynamicObject::new(item_tips::MODULE_TYPE)
                .with_field(item_tips::CURRENT_SETTINGS_FIELD, Value::Object(settings))
                .into_ref(),
        );
    }

    #[test]
    fn test_mistyped_top_blocks_both_writes() {
        let host = HostRuntime::new();
        let settings = Arc::new(CountingObject::new(
            DynamicObject::new(item_tips::SETTINGS_TYPE)
                .with_field(item_tips::LEFT_FIELD, Value::Float(0.01))
                .with_field(item_tips::TOP_FIELD, Value::Str("0.20".to_string())),
        ));
        spawn_with_settings(&host, settings.clone());

        let found = locate(&host).found().unwrap();
        assert!(matches!(
            found.write_position(0.5, 0.25),
            Err(InteropError::UnexpectedValue { .. })
        ));
        assert_eq!(settings.writes.load(Ordering::SeqCst), 0);
        assert_eq!(
            settings.field(item_tips::LEFT_FIELD).unwrap().as_f32(),
            Some(0.01)
        );
    }

    #[test]
    fn test_failed_top_write_restores_left() {
        let host = HostRuntime::new();
        let settings = Arc::new(FrozenTop(
            DynamicObject::new(item_tips::SETTINGS_TYPE)
                .with_field(item_tips::LEFT_FIELD, Value::Float(0.01))
                .with_field(item_tips::TOP_FIELD, Value::Float(0.20)),
        ));
        spawn_with_settings(&host, settings.clone());

        let found = locate(&host).found().unwrap();
        assert!(matches!(
            found.write_position(0.5, 0.25),
            Err(InteropError::Reflect(ReflectError::Invocation { .. }))
        ));
        assert_eq!(
            settings.0.field(item_tips::LEFT_FIELD).unwrap().as_f32(),
            Some(0.01)
        );
    }
}
