use crate::{
    data::Biodata,
    error::{MahasiswaResult, SerialiseRecordsSnafu},
    maud_conveniences::{PILL_CLASS, json_island, layout, render_table},
};
use maud::{Markup, PreEscaped, html};
use snafu::ResultExt;

const LIST_TITLE: &str = "📚 Biodata Mahasiswa";
const DETAIL_TITLE: &str = "🎓 Detail Mahasiswa";
const CACHE_ID: &str = "biodata-cache";

/// Client-side filter over the embedded records, matching nama, NIM and kelas case-insensitively.
const FILTER_SCRIPT: &str = r#"
(function () {
  const cache = JSON.parse(document.getElementById('biodata-cache').textContent);
  const rowsEl = document.getElementById('rows');
  const totalEl = document.getElementById('total');
  const metaEl = document.getElementById('meta');
  const qEl = document.getElementById('q');
  const cellClass = rowsEl.dataset.cellClass;

  function cell(child) {
    const td = document.createElement('td');
    td.className = cellClass;
    td.append(child);
    return td;
  }

  function render(data) {
    rowsEl.replaceChildren(...data.map(function (d) {
      const link = document.createElement('a');
      link.href = '/biodata/' + d.id;
      link.className = 'text-cyan-400 hover:underline';
      link.textContent = d.nama;
      const nim = document.createElement('strong');
      nim.textContent = d.nim;

      const tr = document.createElement('tr');
      tr.className = 'hover:bg-gray-700';
      tr.append(cell('#' + d.id), cell(link), cell(nim), cell(String(d.kelas)));
      return tr;
    }));
    totalEl.textContent = data.length;
  }

  qEl.addEventListener('input', function (e) {
    const q = e.target.value.toLowerCase().trim();
    const filtered = cache.filter(function (d) {
      return [d.nama, d.nim, d.kelas].some(function (v) {
        return String(v).toLowerCase().includes(q);
      });
    });
    render(filtered);
    metaEl.textContent = q ? 'Filter: "' + q + '" (' + filtered.length + ' cocok)' : 'Semua data';
  });
})();
"#;

pub fn list_page(records: &[Biodata]) -> MahasiswaResult<Markup> {
    let cache = json_island(CACHE_ID, records).context(SerialiseRecordsSnafu)?;

    let tools = html! {
        input id="q" class="w-64 bg-gray-900 text-gray-200 border border-gray-600 rounded-lg py-2 px-3 outline-none" placeholder="Cari nama / NIM / kelas…";
        a class=(PILL_CLASS) href="/biodata.json" {"JSON"}
    };

    let rows = records
        .iter()
        .map(|record| {
            [
                html! { "#" (record.id) },
                html! {
                    a href={"/biodata/" (record.id)} class="text-cyan-400 hover:underline" {(record.nama)}
                },
                html! { strong {(record.nim)} },
                html! { (record.kelas) },
            ]
        })
        .collect();

    let body = html! {
        (render_table(["ID", "Nama", "NIM", "Kelas"], "rows", rows))
        div class="flex flex-row justify-between items-center mt-3 text-sm text-gray-400" {
            div {
                span class="text-emerald-400" {"●"} " "
                span id="meta" {"Semua data"}
            }
            div {
                "Total: " span id="total" {(records.len())} " data"
            }
        }
        (cache)
        script {(PreEscaped(FILTER_SCRIPT))}
    };

    Ok(layout(LIST_TITLE, tools, body))
}

pub fn detail_page(record: &Biodata) -> MahasiswaResult<Markup> {
    let cache = json_island(CACHE_ID, record).context(SerialiseRecordsSnafu)?;

    let tools = html! {
        a class=(PILL_CLASS) href="/biodata" {"← Semua data"}
        a class=(PILL_CLASS) href={"/biodata/" (record.id) ".json"} {"JSON"}
    };

    let body = html! {
        dl class="grid grid-cols-[160px_1fr] gap-x-4 gap-y-2 mt-2" {
            dt class="text-gray-400" {"ID"}
            dd class="font-semibold" {"#" (record.id)}
            dt class="text-gray-400" {"Nama"}
            dd class="font-semibold" {(record.nama)}
            dt class="text-gray-400" {"NIM"}
            dd class="font-semibold" {(record.nim)}
            dt class="text-gray-400" {"Kelas"}
            dd class="font-semibold" {(record.kelas)}
        }
        (cache)
    };

    Ok(layout(DETAIL_TITLE, tools, body))
}

pub fn message_page(page_title: &str, message: &str) -> Markup {
    layout(
        page_title,
        html! {},
        html! {
            p class="text-gray-400" {(message)}
        },
    )
}
