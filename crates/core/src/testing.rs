//! Fake host used by unit tests
//!
//! Builds the four intercepted host types, a recording HUD sharing one call
//! log with the host originals, and the foreign item tips module.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use rhud_engine::{
    DynamicObject, FieldInfo, HostRuntime, HostType, LoadedModule, MemberFlags, MethodInfo,
    ObjectRef, Reflect, ReflectError, TypeInfo, Value,
};
use rhud_sdk::names::{self, item_tips};
use rhud_sdk::{
    GameManager, GameUIRoot, ObjectHandle, PauseMenuController, PlayerController, Vector2,
};

use crate::hud::{FadeLevel, HudController};

pub const DEATH_DIRECTION: Vector2 = Vector2::new(-1.0, 0.5);

/// Something observable that happened, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    EditMode(bool),
    Fade(u8),
    PausedFade(u8),
    Original(&'static str),
}

type CallLog = Arc<Mutex<Vec<Call>>>;

/// HUD collaborator that records into the shared log
pub struct RecordingHud {
    editing: AtomicBool,
    log: CallLog,
}

impl HudController for RecordingHud {
    fn set_fade_level(&self, level: FadeLevel) {
        self.log.lock().push(Call::Fade(level.as_u8()));
    }

    fn set_paused_fade_level(&self, level: FadeLevel) {
        self.log.lock().push(Call::PausedFade(level.as_u8()));
    }

    fn set_edit_mode(&self, editing: bool) {
        self.editing.store(editing, Ordering::SeqCst);
        self.log.lock().push(Call::EditMode(editing));
    }

    fn is_editing(&self) -> bool {
        self.editing.load(Ordering::SeqCst)
    }
}

pub struct FakeHost {
    pub host: HostRuntime,
    pub hud: Arc<RecordingHud>,
    log: CallLog,
    args: Arc<Mutex<Vec<String>>>,
}

impl Default for FakeHost {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeHost {
    pub fn new() -> Self {
        Self::build(None)
    }

    /// Same host, minus one method
    pub fn without_method(type_name: &'static str, method: &'static str) -> Self {
        Self::build(Some((type_name, method)))
    }

    fn build(skip: Option<(&'static str, &'static str)>) -> Self {
        let log: CallLog = Arc::new(Mutex::new(Vec::new()));
        let args = Arc::new(Mutex::new(Vec::new()));
        let host = HostRuntime::new();

        let keep = |ty: &str, method: &str| skip != Some((ty, method));

        let mut game_manager = HostType::builder(names::GAME_MANAGER);
        for method in [names::PAUSE, names::UNPAUSE] {
            if keep(names::GAME_MANAGER, method) {
                let log = Arc::clone(&log);
                game_manager = game_manager.method(method, move |_: &mut GameManager, _: ()| {
                    log.lock().push(Call::Original(method));
                });
            }
        }
        host.register_type(game_manager.build());

        let mut pause_menu = HostType::builder(names::PAUSE_MENU_CONTROLLER);
        if keep(names::PAUSE_MENU_CONTROLLER, names::TOGGLE_VISIBILITY) {
            let log = Arc::clone(&log);
            let args = Arc::clone(&args);
            pause_menu = pause_menu.method(
                names::TOGGLE_VISIBILITY,
                move |_: &mut PauseMenuController, visible: bool| {
                    log.lock().push(Call::Original(names::TOGGLE_VISIBILITY));
                    args.lock().push(visible.to_string());
                },
            );
        }
        host.register_type(pause_menu.build());

        let mut ui_root = HostType::builder(names::GAME_UI_ROOT);
        for method in [names::HIDE_CORE_UI, names::SHOW_CORE_UI] {
            if keep(names::GAME_UI_ROOT, method) {
                let log = Arc::clone(&log);
                let args = Arc::clone(&args);
                ui_root = ui_root.method(method, move |_: &mut GameUIRoot, reason: String| {
                    log.lock().push(Call::Original(method));
                    args.lock().push(reason);
                });
            }
        }
        host.register_type(ui_root.build());

        let mut player = HostType::builder(names::PLAYER_CONTROLLER);
        if keep(names::PLAYER_CONTROLLER, names::DIE) {
            let log = Arc::clone(&log);
            let args = Arc::clone(&args);
            player = player.method_with_flags(
                names::DIE,
                MemberFlags::NON_PUBLIC | MemberFlags::INSTANCE,
                move |_: &mut PlayerController, direction: Vector2| {
                    log.lock().push(Call::Original(names::DIE));
                    args.lock().push(format!("{:?}", direction));
                },
            );
        }
        host.register_type(player.build());

        let hud = Arc::new(RecordingHud {
            editing: AtomicBool::new(false),
            log: Arc::clone(&log),
        });

        Self {
            host,
            hud,
            log,
            args,
        }
    }

    pub fn pause(&self) {
        let mut gm = GameManager::new(ObjectHandle(1));
        self.host
            .invoke::<GameManager, (), ()>(names::GAME_MANAGER, names::PAUSE, &mut gm, ())
            .unwrap();
    }

    pub fn unpause(&self) {
        let mut gm = GameManager::new(ObjectHandle(1));
        self.host
            .invoke::<GameManager, (), ()>(names::GAME_MANAGER, names::UNPAUSE, &mut gm, ())
            .unwrap();
    }

    pub fn toggle_pause_menu(&self, visible: bool) {
        let mut menu = PauseMenuController::new(ObjectHandle(2));
        self.host
            .invoke::<PauseMenuController, bool, ()>(
                names::PAUSE_MENU_CONTROLLER,
                names::TOGGLE_VISIBILITY,
                &mut menu,
                visible,
            )
            .unwrap();
    }

    pub fn hide_core_ui(&self, reason: &str) {
        let mut root = GameUIRoot::new(ObjectHandle(3));
        self.host
            .invoke::<GameUIRoot, String, ()>(
                names::GAME_UI_ROOT,
                names::HIDE_CORE_UI,
                &mut root,
                reason.to_string(),
            )
            .unwrap();
    }

    pub fn show_core_ui(&self, reason: &str) {
        let mut root = GameUIRoot::new(ObjectHandle(3));
        self.host
            .invoke::<GameUIRoot, String, ()>(
                names::GAME_UI_ROOT,
                names::SHOW_CORE_UI,
                &mut root,
                reason.to_string(),
            )
            .unwrap();
    }

    pub fn die(&self) {
        let mut player = PlayerController::new(ObjectHandle(4));
        self.host
            .invoke::<PlayerController, Vector2, ()>(
                names::PLAYER_CONTROLLER,
                names::DIE,
                &mut player,
                DEATH_DIRECTION,
            )
            .unwrap();
    }

    pub fn calls(&self) -> Vec<Call> {
        self.log.lock().clone()
    }

    pub fn clear_calls(&self) {
        self.log.lock().clear();
    }

    pub fn original_calls(&self, method: &str) -> usize {
        self.log
            .lock()
            .iter()
            .filter(|c| matches!(c, Call::Original(m) if *m == method))
            .count()
    }

    pub fn last_args(&self) -> Vec<String> {
        self.args.lock().clone()
    }
}

/// Reflect wrapper counting every access
pub struct CountingObject {
    inner: DynamicObject,
    pub reads: AtomicUsize,
    pub writes: AtomicUsize,
    pub calls: AtomicUsize,
}

impl CountingObject {
    pub fn new(inner: DynamicObject) -> Self {
        Self {
            inner,
            reads: AtomicUsize::new(0),
            writes: AtomicUsize::new(0),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn field(&self, name: &str) -> Option<Value> {
        self.inner.field(name)
    }

    pub fn accesses(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
            + self.writes.load(Ordering::SeqCst)
            + self.calls.load(Ordering::SeqCst)
    }
}

impl Reflect for CountingObject {
    fn type_name(&self) -> &str {
        self.inner.type_name()
    }

    fn get_field(&self, field: &FieldInfo) -> Result<Value, ReflectError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.get_field(field)
    }

    fn set_field(&self, field: &FieldInfo, value: Value) -> Result<(), ReflectError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.set_field(field, value)
    }

    fn call(&self, method: &MethodInfo, args: &[Value]) -> Result<Value, ReflectError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.call(method, args)
    }
}

/// The item tips module as the extension publishes it
pub fn item_tips_module() -> LoadedModule {
    LoadedModule::new(item_tips::MODULE)
        .with_type(TypeInfo::new(item_tips::MODULE_TYPE).with_field(
            item_tips::CURRENT_SETTINGS_FIELD,
            MemberFlags::NON_PUBLIC | MemberFlags::INSTANCE,
        ))
        .with_type(
            TypeInfo::new(item_tips::SETTINGS_TYPE)
                .with_field(item_tips::LEFT_FIELD, MemberFlags::PUBLIC | MemberFlags::INSTANCE)
                .with_field(item_tips::TOP_FIELD, MemberFlags::PUBLIC | MemberFlags::INSTANCE)
                .with_method(
                    item_tips::GET_SIZE_METHOD,
                    MemberFlags::PUBLIC | MemberFlags::INSTANCE,
                    1,
                ),
        )
}

/// Item tips settings reporting `size` at scale 1
pub fn item_tips_settings(size: Vector2) -> Arc<CountingObject> {
    let settings = DynamicObject::new(item_tips::SETTINGS_TYPE)
        .with_field(item_tips::LEFT_FIELD, Value::Float(0.01))
        .with_field(item_tips::TOP_FIELD, Value::Float(0.20))
        .with_method(item_tips::GET_SIZE_METHOD, move |_, args| match args {
            [Value::Int(scale)] => Ok(Value::Vector2(Vector2::new(
                size.x * *scale as f32,
                size.y * *scale as f32,
            ))),
            _ => Err(ReflectError::Invocation {
                method: item_tips::GET_SIZE_METHOD.to_string(),
                reason: "expected an integer scale".to_string(),
            }),
        });
    Arc::new(CountingObject::new(settings))
}

/// Main item tips component holding `settings`
pub fn item_tips_component(settings: &Arc<CountingObject>) -> Arc<CountingObject> {
    let settings: ObjectRef = settings.clone();
    Arc::new(CountingObject::new(
        DynamicObject::new(item_tips::MODULE_TYPE)
            .with_field(item_tips::CURRENT_SETTINGS_FIELD, Value::Object(settings)),
    ))
}
