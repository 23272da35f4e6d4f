use maud::{DOCTYPE, Markup, PreEscaped, Render, html};
use serde::Serialize;

pub const CELL_CLASS: &str = "py-2 px-4 border-b border-gray-600 text-gray-200";
pub const PILL_CLASS: &str =
    "py-1 px-3 rounded-full border border-gray-600 hover:border-gray-400 text-cyan-400 text-sm";

pub fn layout(page_title: &str, tools: Markup, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="id" {
            head {
                meta charset="UTF-8" {}
                meta name="viewport" content="width=device-width, initial-scale=1.0" {}
                script src="https://cdn.jsdelivr.net/npm/@tailwindcss/browser@4" {}
                title { (page_title) }
            }
            body class="bg-gray-900 min-h-screen flex flex-col items-center justify-center text-white p-6" {
                div class="w-full max-w-4xl bg-gray-800 p-6 rounded-lg shadow-xl" {
                    div class="flex flex-row items-center justify-between gap-4" {
                        (title(page_title))
                        div class="flex flex-row items-center gap-2" {(tools)}
                    }
                    (body)
                }
            }
        }
    }
}

/// `tbody_id` lets client scripts re-render the rows in place.
pub fn render_table<const N: usize>(
    titles: [&'static str; N],
    tbody_id: &'static str,
    items: Vec<[Markup; N]>,
) -> Markup {
    html! {
        div class="overflow-x-auto" {
            table class="min-w-full bg-gray-800 rounded shadow-md" {
                thead class="bg-gray-700" {
                    tr {
                        @for title in titles {
                            th class="py-2 px-4 text-left font-semibold text-gray-300" {(title)}
                        }
                    }
                }
                tbody id=(tbody_id) data-cell-class=(CELL_CLASS) {
                    @for row in items {
                        tr class="hover:bg-gray-700" {
                            @for col in row {
                                td class=(CELL_CLASS) {(col)}
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Embeds `data` as a JSON script block readable with `JSON.parse(el.textContent)`.
pub fn json_island(
    id: &'static str,
    data: &(impl Serialize + ?Sized),
) -> serde_json::Result<Markup> {
    // `<` would let a value close the script element early
    let json = serde_json::to_string(data)?.replace('<', "\\u003c");
    Ok(html! {
        script type="application/json" id=(id) {(PreEscaped(json))}
    })
}

pub fn title(s: impl Render) -> Markup {
    html! {
        h1 class="text-2xl font-semibold mb-4" {(s)}
    }
}
