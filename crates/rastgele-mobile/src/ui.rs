//! Shell chrome: stylesheet, buttons and the page progress bar.

use dioxus::prelude::*;

/// Shared styles for the shell chrome.
pub const MOBILE_UI_STYLES: &str = r"
html, body, #main {
    margin: 0;
    height: 100%;
}

.shell {
    height: 100%;
    display: flex;
    flex-direction: column;
    background: var(--shell-bg);
    color: var(--shell-fg);
}

.shell[data-theme='light'] {
    --shell-bg: #ffffff;
    --shell-fg: #111827;
    --shell-muted: #6b7280;
    --shell-border: #e5e7eb;
}

.shell[data-theme='dark'] {
    --shell-bg: #000000;
    --shell-fg: #e5e7eb;
    --shell-muted: #9ca3af;
    --shell-border: #1f2937;
}

.progress-track {
    height: 3px;
    background: transparent;
}

.progress-bar {
    height: 100%;
    background: #007aff;
    transition: width 150ms ease, opacity 300ms ease;
}

.page-frame {
    flex: 1;
    width: 100%;
    border: 0;
}

.ui-button {
    border-radius: 5px;
    padding: 10px 12px;
    font-size: 16px;
    border: 1px solid transparent;
    transition: background-color 120ms ease, color 120ms ease, border-color 120ms ease;
}

.ui-button:disabled {
    opacity: 0.55;
}

.ui-button--block {
    width: 100%;
}

.ui-button--primary {
    background: #007aff;
    color: #ffffff;
    border-color: #007aff;
}

.ui-button--outline {
    background: transparent;
    color: var(--shell-fg);
    border-color: var(--shell-border);
}

.ui-button--ghost {
    background: transparent;
    color: var(--shell-fg);
    border-color: transparent;
}
";

/// Button variant mapping.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Outline,
    Ghost,
}

impl ButtonVariant {
    const fn class(self) -> &'static str {
        match self {
            Self::Primary => "ui-button--primary",
            Self::Outline => "ui-button--outline",
            Self::Ghost => "ui-button--ghost",
        }
    }
}

#[component]
pub fn UiButton(
    #[props(default)] variant: ButtonVariant,
    #[props(default)] block: bool,
    #[props(default)] disabled: bool,
    onclick: Option<EventHandler<MouseEvent>>,
    #[props(extends = GlobalAttributes)]
    #[props(extends = button)]
    attributes: Vec<Attribute>,
    children: Element,
) -> Element {
    let mut class_name = format!("ui-button {}", variant.class());
    if block {
        class_name.push_str(" ui-button--block");
    }

    rsx! {
        button {
            class: "{class_name}",
            disabled,
            onclick: move |event| {
                if let Some(handler) = &onclick {
                    handler.call(event);
                }
            },
            ..attributes,
            {children}
        }
    }
}

#[component]
pub fn ProgressBar(fraction: f64) -> Element {
    let width = (fraction.clamp(0.0, 1.0) * 100.0).round();
    let opacity = if fraction >= 1.0 { 0 } else { 1 };

    rsx! {
        div {
            class: "progress-track",
            div {
                class: "progress-bar",
                style: "width: {width}%; opacity: {opacity};",
            }
        }
    }
}
