use std::rc::Rc;

use dioxus::document;
use dioxus::prelude::*;
use dioxus_primitives::toast::{use_toast, ToastOptions, ToastProvider};
use rastgele_core::events::{ManualPreferenceSource, PageEvents};
use rastgele_core::navigation::{BackAction, History, NavigationTracker};
use rastgele_core::saved::SavedArticles;
use rastgele_core::share::SharePayload;
use rastgele_core::status_bar::StatusBarAppearance;
use rastgele_core::theme::ThemeSyncSession;
use rastgele_core::{DevicePreference, ThemeSynchronizer};

use crate::appearance::{
    parse_appearance_message, APPEARANCE_UNWATCH_SCRIPT, APPEARANCE_WATCH_SCRIPT,
};
use crate::bootstrap_config::resolve_shell_config;
use crate::browser::{read_frame_report, FrameSurface, ShellNavigator};
use crate::frame::{BACK_KEY_UNWATCH_SCRIPT, BACK_KEY_WATCH_SCRIPT, FRAME_ID};
use crate::ui::{ProgressBar, MOBILE_UI_STYLES};
use crate::views::{ActionBar, SavedList};

#[derive(Clone, Copy, PartialEq, Eq)]
enum ShellView {
    Browser,
    Saved,
}

const TOAST_STYLES: &str = r#"
.toast-container {
    position: fixed;
    inset: auto 12px 12px 12px;
    z-index: 9999;
    pointer-events: none;
}
.toast-list {
    margin: 0;
    padding: 0;
    list-style: none;
    display: flex;
    flex-direction: column;
    gap: 8px;
}
.toast {
    pointer-events: auto;
    border-radius: 10px;
    border: 1px solid #d1d5db;
    background: #ffffff;
    box-shadow: 0 10px 30px rgba(17, 24, 39, 0.12);
    padding: 10px 12px;
    color: #111827;
    display: flex;
    gap: 10px;
    align-items: flex-start;
}
.toast[data-type='success'] { border-color: #10b981; }
.toast[data-type='error'] { border-color: #ef4444; }
.toast[data-type='info'] { border-color: #3b82f6; }
.toast-content { flex: 1; }
.toast-title { font-size: 13px; font-weight: 700; }
.toast-description { font-size: 12px; color: #4b5563; margin-top: 2px; }
.toast-close {
    border: 0;
    background: transparent;
    color: #6b7280;
    font-size: 16px;
    line-height: 1;
    padding: 0;
}
"#;

#[component]
pub fn App() -> Element {
    rsx! {
        ToastProvider {
            AppShell {}
        }
    }
}

#[component]
fn AppShell() -> Element {
    let config = use_hook(|| Rc::new(resolve_shell_config()));
    let article_client = use_hook(|| match config.article_client() {
        Ok(client) => Some(client),
        Err(error) => {
            tracing::warn!("Random article disabled: {}", error);
            None
        }
    });

    let preferences = use_hook(|| Rc::new(ManualPreferenceSource::new(DevicePreference::Light)));
    let page_events = use_hook(PageEvents::new);
    let history = use_signal(|| History::new(config.home_url.clone()));
    let tracker = use_signal(|| NavigationTracker::new(config.home_url.clone()));
    let pending = use_signal(|| None);
    let last_report = use_signal(|| None);
    let navigator = use_hook(|| {
        ShellNavigator::new(history, tracker, pending, last_report, page_events.clone())
    });
    let session = use_hook(|| {
        let synchronizer = ThemeSynchronizer::new(
            config.theme_strategy,
            config.theme_targets.clone(),
            preferences.current(),
        );
        Rc::new(ThemeSyncSession::start(
            synchronizer,
            preferences.as_ref(),
            &page_events,
        ))
    });

    let mut appearance = use_signal(|| preferences.current());
    let mut saved = use_signal(SavedArticles::new);
    let mut view = use_signal(|| ShellView::Browser);
    let mut loading = use_signal(|| false);
    let toasts = use_toast();

    use_future({
        let preferences = preferences.clone();
        move || {
            let preferences = preferences.clone();
            async move {
                let mut watcher = document::eval(APPEARANCE_WATCH_SCRIPT);
                loop {
                    match watcher.recv::<serde_json::Value>().await {
                        Ok(message) => {
                            if let Some(preference) = parse_appearance_message(&message) {
                                appearance.set(preference);
                                preferences.set(preference);
                            }
                        }
                        Err(error) => {
                            tracing::debug!("Appearance watcher stopped: {:?}", error);
                            break;
                        }
                    }
                }
            }
        }
    });

    // Key events inside the page frame never reach the shell's own
    // handlers, so back presses are caught on the window instead.
    use_future({
        let navigator = navigator.clone();
        move || {
            let navigator = navigator.clone();
            async move {
                let mut watcher = document::eval(BACK_KEY_WATCH_SCRIPT);
                loop {
                    match watcher.recv::<String>().await {
                        Ok(message) if message == "back" => {
                            if view() == ShellView::Saved {
                                view.set(ShellView::Browser);
                            } else if navigator.back_action() == BackAction::GoBack {
                                navigator.go_back();
                            }
                        }
                        Ok(message) => tracing::debug!("Ignoring key message {}", message),
                        Err(error) => {
                            tracing::debug!("Back key watcher stopped: {:?}", error);
                            break;
                        }
                    }
                }
            }
        }
    });

    use_drop({
        let session = session.clone();
        move || {
            if let Err(error) = session.detach_surface() {
                tracing::debug!("Failed to detach page surface: {}", error);
            }
            _ = document::eval(APPEARANCE_UNWATCH_SCRIPT);
            _ = document::eval(BACK_KEY_UNWATCH_SCRIPT);
        }
    });

    let on_frame_mounted = {
        let session = session.clone();
        let navigator = navigator.clone();
        move |_: Event<MountedData>| {
            match session.attach_surface(FrameSurface::new(navigator.clone())) {
                Ok(outcome) => tracing::debug!("Page surface attached: {:?}", outcome),
                Err(error) => tracing::warn!("Failed to attach page surface: {}", error),
            }
        }
    };

    let on_frame_loaded = {
        let navigator = navigator.clone();
        move |_: Event<ImageData>| {
            let navigator = navigator.clone();
            spawn(async move {
                let report = read_frame_report().await;
                navigator.finish_load(report);
            });
        }
    };

    let random_available = article_client.is_some();
    use_effect(move || {
        if !random_available {
            toasts.info(
                "Random article unavailable".to_string(),
                ToastOptions::new().description("Set RASTGELE_ARTICLE_API_URL to enable it"),
            );
        }
    });

    let on_random = {
        let navigator = navigator.clone();
        move |()| {
            let Some(client) = article_client.clone() else {
                return;
            };
            if loading() {
                return;
            }

            loading.set(true);
            let navigator = navigator.clone();
            spawn(async move {
                match client.random_article().await {
                    Ok(url) => {
                        tracing::info!("Opening random article {}", url);
                        view.set(ShellView::Browser);
                        navigator.open(&url);
                    }
                    Err(error) => {
                        tracing::error!("Random article request failed: {}", error);
                        let description = error.to_string();
                        toasts.error(
                            "Could not load a random article".to_string(),
                            ToastOptions::new().description(description.as_str()),
                        );
                    }
                }
                loading.set(false);
            });
        }
    };

    let on_back = {
        let navigator = navigator.clone();
        move |()| {
            navigator.go_back();
        }
    };

    let on_save = {
        let navigator = navigator.clone();
        move |()| {
            let Some(url) = navigator.current_url() else {
                toasts.info(
                    "Cannot save this page".to_string(),
                    ToastOptions::new().description("Its address is hidden from the app"),
                );
                return;
            };
            if saved.write().save(&url, "") {
                toasts.success(
                    "Saved".to_string(),
                    ToastOptions::new().description(url.as_str()),
                );
            } else {
                toasts.info(
                    "Already saved".to_string(),
                    ToastOptions::new().description(url.as_str()),
                );
            }
        }
    };

    let on_share = {
        let navigator = navigator.clone();
        move |()| {
            let Some(url) = navigator.current_url() else {
                tracing::debug!("Share skipped: page address is unknown");
                return;
            };
            let payload = SharePayload::for_page(&url, "");
            _ = document::eval(&payload.to_script());
        }
    };

    let on_open_saved = {
        let navigator = navigator.clone();
        move |url: String| {
            view.set(ShellView::Browser);
            navigator.open(&url);
        }
    };

    let preference = appearance();
    let status_bar = StatusBarAppearance::for_preference(preference);
    let progress = tracker.read().progress();
    let can_go_back = tracker.read().can_go_back();
    let home_url = config.home_url.clone();
    let current_url = tracker.read().current_url().map(ToString::to_string);
    let page_known = current_url.is_some();
    let is_saved = current_url
        .as_deref()
        .is_some_and(|url| saved.read().contains(url));
    let saved_articles = saved.read().list();
    let saved_count = saved_articles.len();

    rsx! {
        document::Style { {MOBILE_UI_STYLES} }
        document::Style { {TOAST_STYLES} }
        document::Meta { name: "theme-color", content: status_bar.background }
        document::Meta { name: "color-scheme", content: preference.as_str() }

        div {
            class: "shell",
            "data-theme": preference.as_str(),
            "data-status-bar": status_bar.style.as_str(),
            tabindex: "0",

            ProgressBar { fraction: progress }

            if view() == ShellView::Saved {
                SavedList {
                    articles: saved_articles,
                    on_open: on_open_saved,
                    on_remove: move |url: String| {
                        saved.write().remove(&url);
                    },
                    on_close: move |()| view.set(ShellView::Browser),
                }
            }

            iframe {
                id: FRAME_ID,
                class: "page-frame",
                style: if view() == ShellView::Saved { "display: none;" } else { "" },
                src: "{home_url}",
                onmounted: on_frame_mounted,
                onload: on_frame_loaded,
            }

            ActionBar {
                loading: loading(),
                random_available,
                can_go_back,
                page_known,
                is_saved,
                saved_count,
                on_random,
                on_back,
                on_save,
                on_share,
                on_show_saved: move |()| view.set(ShellView::Saved),
            }
        }
    }
}
