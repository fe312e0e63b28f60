use dr_core::navigation::{NavStore, WizardNav};
use dr_core::pipeline::{DragSession, PipelineBoard};
use dr_core::types::{Deal, KpiSnapshot};
use leptos::prelude::*;

// ── Toasts ──

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

impl ToastLevel {
    pub fn css_class(&self) -> &'static str {
        match self {
            ToastLevel::Info => "toast-info",
            ToastLevel::Success => "toast-success",
            ToastLevel::Error => "toast-error",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub title: String,
    pub message: String,
    pub level: ToastLevel,
    pub duration_ms: u32,
    pub auto_dismiss: bool,
}

const TOAST_DURATION_MS: u32 = 5_000;

// ── localStorage-backed navigation store ──

/// `NavStore` over `window.localStorage`. Storage failures (private mode,
/// quota) are logged and otherwise ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageNavStore;

impl LocalStorageNavStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

impl NavStore for LocalStorageNavStore {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = Self::storage() {
            if storage.set_item(key, value).is_err() {
                leptos::logging::warn!("localStorage write failed for {key}");
            }
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(key);
        }
    }
}

// ── App state ──

#[derive(Clone, Copy)]
pub struct AppState {
    pub board: ReadSignal<PipelineBoard>,
    pub set_board: WriteSignal<PipelineBoard>,
    pub board_loading: ReadSignal<bool>,
    pub set_board_loading: WriteSignal<bool>,
    pub drag: ReadSignal<DragSession>,
    pub set_drag: WriteSignal<DragSession>,
    pub kpis: ReadSignal<Option<KpiSnapshot>>,
    pub set_kpis: WriteSignal<Option<KpiSnapshot>>,
    pub kpis_loading: ReadSignal<bool>,
    pub set_kpis_loading: WriteSignal<bool>,
    /// Deal shown in the detail panel.
    pub selected_deal: ReadSignal<Option<Deal>>,
    pub set_selected_deal: WriteSignal<Option<Deal>>,
    pub nav: ReadSignal<WizardNav>,
    pub set_nav: WriteSignal<WizardNav>,
    pub toasts: ReadSignal<Vec<Toast>>,
    pub set_toasts: WriteSignal<Vec<Toast>>,
    next_toast_id: StoredValue<u64>,
}

impl AppState {
    /// Queue a toast. Auto-dismissing toasts remove themselves after
    /// `duration_ms`.
    pub fn push_toast(&self, level: ToastLevel, title: impl Into<String>, message: impl Into<String>) {
        let id = self.next_toast_id.get_value();
        self.next_toast_id.set_value(id + 1);
        let toast = Toast {
            id,
            title: title.into(),
            message: message.into(),
            level,
            duration_ms: TOAST_DURATION_MS,
            auto_dismiss: level != ToastLevel::Error,
        };
        let (auto_dismiss, duration_ms) = (toast.auto_dismiss, toast.duration_ms);
        self.set_toasts.update(|toasts| toasts.push(toast));

        if auto_dismiss {
            let state = *self;
            leptos::task::spawn_local(async move {
                gloo_timers::future::TimeoutFuture::new(duration_ms).await;
                state.dismiss_toast(id);
            });
        }
    }

    pub fn error_toast(&self, title: impl Into<String>, message: impl Into<String>) {
        self.push_toast(ToastLevel::Error, title, message);
    }

    pub fn success_toast(&self, title: impl Into<String>, message: impl Into<String>) {
        self.push_toast(ToastLevel::Success, title, message);
    }

    pub fn dismiss_toast(&self, id: u64) {
        self.set_toasts.update(|toasts| toasts.retain(|t| t.id != id));
    }

    /// Change the seller wizard tab or seller id and persist it.
    pub fn update_nav(&self, f: impl FnOnce(&mut WizardNav, &dyn NavStore)) {
        self.set_nav.update(|nav| f(nav, &LocalStorageNavStore));
    }
}

pub fn provide_app_state() {
    let (board, set_board) = signal(PipelineBoard::default());
    let (board_loading, set_board_loading) = signal(true);
    let (drag, set_drag) = signal(DragSession::new());
    let (kpis, set_kpis) = signal(None::<KpiSnapshot>);
    let (kpis_loading, set_kpis_loading) = signal(true);
    let (selected_deal, set_selected_deal) = signal(None::<Deal>);
    let (nav, set_nav) = signal(WizardNav::restore(&LocalStorageNavStore));
    let (toasts, set_toasts) = signal(Vec::<Toast>::new());

    let state = AppState {
        board,
        set_board,
        board_loading,
        set_board_loading,
        drag,
        set_drag,
        kpis,
        set_kpis,
        kpis_loading,
        set_kpis_loading,
        selected_deal,
        set_selected_deal,
        nav,
        set_nav,
        toasts,
        set_toasts,
        next_toast_id: StoredValue::new(1),
    };

    provide_context(state);
}

pub fn use_app_state() -> AppState {
    expect_context::<AppState>()
}
