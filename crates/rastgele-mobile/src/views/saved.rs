use dioxus::prelude::*;
use rastgele_core::SavedArticle;

use crate::ui::{ButtonVariant, UiButton};

#[component]
pub fn SavedList(
    articles: Vec<SavedArticle>,
    on_open: EventHandler<String>,
    on_remove: EventHandler<String>,
    on_close: EventHandler<()>,
) -> Element {
    rsx! {
        div {
            style: "flex: 1; display: flex; flex-direction: column; overflow: hidden;",
            div {
                style: "
                    padding: 12px 16px;
                    display: flex;
                    align-items: center;
                    justify-content: space-between;
                    border-bottom: 1px solid var(--shell-border);
                ",
                p {
                    style: "margin: 0; font-size: 16px; font-weight: 700;",
                    "Kaydedilenler"
                }
                UiButton {
                    type: "button",
                    variant: ButtonVariant::Ghost,
                    onclick: move |_| on_close.call(()),
                    "Kapat"
                }
            }

            if articles.is_empty() {
                div {
                    style: "
                        flex: 1;
                        display: flex;
                        align-items: center;
                        justify-content: center;
                        padding: 20px;
                        color: var(--shell-muted);
                        font-size: 14px;
                    ",
                    "Henüz kaydedilmiş yazı yok."
                }
            } else {
                div {
                    style: "flex: 1; overflow-y: auto; padding: 8px 16px;",
                    for article in articles {
                        SavedRow {
                            key: "{article.url}",
                            article: article.clone(),
                            on_open,
                            on_remove,
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn SavedRow(
    article: SavedArticle,
    on_open: EventHandler<String>,
    on_remove: EventHandler<String>,
) -> Element {
    let title = article.display_title().to_string();
    let saved_at = saved_time_label(article.saved_at);
    let open_url = article.url.clone();
    let remove_url = article.url.clone();

    rsx! {
        div {
            style: "
                padding: 10px 0;
                border-bottom: 1px solid var(--shell-border);
                display: flex;
                gap: 8px;
                align-items: center;
            ",
            button {
                r#type: "button",
                style: "
                    flex: 1;
                    text-align: left;
                    background: transparent;
                    border: 0;
                    padding: 0;
                    color: inherit;
                    min-width: 0;
                ",
                onclick: move |_| on_open.call(open_url.clone()),
                p {
                    style: "margin: 0; font-size: 14px; overflow: hidden; text-overflow: ellipsis; white-space: nowrap;",
                    "{title}"
                }
                p {
                    style: "margin: 2px 0 0 0; font-size: 12px; color: var(--shell-muted);",
                    "{saved_at}"
                }
            }
            UiButton {
                type: "button",
                variant: ButtonVariant::Outline,
                style: "padding: 6px 10px; font-size: 12px;",
                onclick: move |_| on_remove.call(remove_url.clone()),
                "Sil"
            }
        }
    }
}

fn saved_time_label(saved_at: i64) -> String {
    chrono::DateTime::from_timestamp(saved_at, 0)
        .map(|time| {
            time.with_timezone(&chrono::Local)
                .format("%H:%M")
                .to_string()
        })
        .unwrap_or_default()
}
