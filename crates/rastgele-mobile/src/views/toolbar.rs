use dioxus::prelude::*;

use crate::ui::{ButtonVariant, UiButton};

/// Bottom bar: random article plus page actions.
#[component]
pub fn ActionBar(
    loading: bool,
    random_available: bool,
    can_go_back: bool,
    page_known: bool,
    is_saved: bool,
    saved_count: usize,
    on_random: EventHandler<()>,
    on_back: EventHandler<()>,
    on_save: EventHandler<()>,
    on_share: EventHandler<()>,
    on_show_saved: EventHandler<()>,
) -> Element {
    let save_label = if is_saved { "Kaydedildi" } else { "Kaydet" };

    rsx! {
        div {
            style: "padding: 10px; display: flex; flex-direction: column; gap: 8px;",
            UiButton {
                type: "button",
                block: true,
                variant: ButtonVariant::Primary,
                disabled: loading || !random_available,
                onclick: move |_| on_random.call(()),
                if loading {
                    "..."
                } else {
                    "RASTGELE"
                }
            }
            div {
                style: "display: flex; gap: 8px;",
                UiButton {
                    type: "button",
                    variant: ButtonVariant::Outline,
                    style: "flex: 1;",
                    disabled: !can_go_back,
                    onclick: move |_| on_back.call(()),
                    "Geri"
                }
                UiButton {
                    type: "button",
                    variant: ButtonVariant::Outline,
                    style: "flex: 1;",
                    disabled: !page_known || is_saved,
                    onclick: move |_| on_save.call(()),
                    "{save_label}"
                }
                UiButton {
                    type: "button",
                    variant: ButtonVariant::Outline,
                    style: "flex: 1;",
                    disabled: !page_known,
                    onclick: move |_| on_share.call(()),
                    "Paylaş"
                }
                UiButton {
                    type: "button",
                    variant: ButtonVariant::Ghost,
                    style: "flex: 1;",
                    onclick: move |_| on_show_saved.call(()),
                    "Liste ({saved_count})"
                }
            }
        }
    }
}
