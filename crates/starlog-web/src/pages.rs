// SPDX-FileCopyrightText: 2026 Starlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTML rendering for the four pages.
//!
//! Pages are assembled with `format!` over a shared shell; every
//! user-entered value passes through [`escape_html`] on the way out. The
//! result page carries a small script that attaches to the live feed and
//! prepends arriving rows with the same cell rules the server uses.

use starlog_core::display::{date_display, scope_display, star_display, strengths_display};
use starlog_core::{ExperienceDraft, ExperienceRecord, STRENGTH_VOCABULARY};

/// "Top 5" hashtags on the strength summary page.
const TOP_FIVE: [&str; 5] = ["#도전정신", "#창의력", "#성실함", "#공감능력", "#리더십"];

/// "Another 10" hashtags below them.
const ANOTHER_TEN: [&str; 10] = [
    "#끈기",
    "#책임감",
    "#팀워크",
    "#적응력",
    "#소통",
    "#유머감각",
    "#정직함",
    "#배려심",
    "#분석력",
    "#감성적 사고",
];

/// Escapes a value for interpolation into HTML text or attributes.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// GET /: the start page.
pub fn start_page() -> String {
    let body = r#"<div class="checkout-container">
<h1 class="checkout-title">경험정리 페이지</h1>
<a class="checkout-button" href="/my-strength"><span>→</span><span>시작하기</span></a>
<div class="checkout-footer">made by <span class="highlight">김이레</span></div>
</div>
"#;
    layout("경험정리 페이지", body)
}

/// GET /my-strength: the two static hashtag lists.
pub fn my_strength_page() -> String {
    let mut body = String::from(
        "<div class=\"strength-container\">\n<h1 class=\"strength-title\">내 강점</h1>\n",
    );

    body.push_str("<div class=\"section\">\n<h2 class=\"subtitle\">Top 5</h2>\n<div class=\"tags\">\n");
    for tag in TOP_FIVE {
        body.push_str(&format!("<span class=\"tag-bright\">{tag}</span>\n"));
    }
    body.push_str("</div>\n</div>\n");

    body.push_str(
        "<div class=\"section\">\n<h2 class=\"subtitle\">Another 10</h2>\n<div class=\"tags\">\n",
    );
    for tag in ANOTHER_TEN {
        body.push_str(&format!("<span class=\"tag-dim\">{tag}</span>\n"));
    }
    body.push_str("</div>\n</div>\n");

    body.push_str("<a class=\"next-btn\" href=\"/addexperience\">NEXT</a>\n</div>\n");
    layout("내 강점", &body)
}

/// GET and failed POST /addexperience: the form, with prior values and an
/// optional blocking message.
pub fn add_experience_page(draft: &ExperienceDraft, message: Option<&str>) -> String {
    let mut body = String::from(
        "<div class=\"addexp-wrap\">\n<header class=\"addexp-header\">\n\
         <h1 class=\"addexp-title\">경험 추가</h1>\n\
         <button class=\"addexp-add\" type=\"submit\" form=\"addexp\">ADD</button>\n\
         </header>\n",
    );

    if let Some(message) = message {
        body.push_str(&format!(
            "<div class=\"form-alert\" role=\"alert\">{}</div>\n",
            escape_html(message)
        ));
    }

    body.push_str("<form id=\"addexp\" class=\"addexp-form\" method=\"post\" action=\"/addexperience\">\n");

    body.push_str(&format!(
        "<div class=\"row-top\">\n\
         <input class=\"input-pill\" type=\"text\" name=\"title\" placeholder=\"경험 활동\" value=\"{}\">\n\
         <div class=\"date-group\">\n<span class=\"date-chip\">날짜</span>\n\
         <input class=\"input-pill date-input\" type=\"text\" inputmode=\"numeric\" name=\"date\" \
         placeholder=\"YYYY.MM.DD\" aria-label=\"날짜\" value=\"{}\">\n</div>\n</div>\n",
        escape_html(&draft.title),
        escape_html(&draft.date)
    ));

    body.push_str(&format!(
        "<textarea class=\"textarea-neon\" name=\"description\" rows=\"4\" placeholder=\"활동 내역\">{}</textarea>\n",
        escape_html(&draft.description)
    ));

    body.push_str("<fieldset class=\"scope-group\">\n<legend>교내/교외</legend>\n");
    for scope in ["교내", "교외"] {
        let checked = if draft.scope.as_deref() == Some(scope) {
            " checked"
        } else {
            ""
        };
        body.push_str(&format!(
            "<label><input type=\"radio\" name=\"scope\" value=\"{scope}\"{checked}> {scope}</label>\n"
        ));
    }
    body.push_str("</fieldset>\n");

    body.push_str("<fieldset class=\"strength-group\">\n<legend>사용한 강점</legend>\n<div class=\"strength-options\">\n");
    for option in STRENGTH_VOCABULARY {
        let checked = if draft.strengths.iter().any(|s| s == option) {
            " checked"
        } else {
            ""
        };
        body.push_str(&format!(
            "<label class=\"strength-option\">\
             <input type=\"checkbox\" name=\"strengths\" value=\"{option}\"{checked}> {option}</label>\n"
        ));
    }
    body.push_str("</div>\n</fieldset>\n");

    for (letter, name, value, placeholder) in [
        ("S", "star_s", &draft.star_s, "상황을 적어주세요"),
        ("T", "star_t", &draft.star_t, "과제를 적어주세요"),
        ("A", "star_a", &draft.star_a, "실행을 적어주세요"),
        ("R", "star_r", &draft.star_r, "결과를 적어주세요"),
    ] {
        body.push_str(&format!(
            "<div class=\"star-row\">\n<span class=\"star-badge\">{letter}</span>\n\
             <input class=\"star-input\" type=\"text\" name=\"{name}\" placeholder=\"{placeholder}\" value=\"{}\">\n\
             </div>\n",
            escape_html(value)
        ));
    }

    body.push_str(
        "<div class=\"submit-area\">\n<button class=\"btn-primary\" type=\"submit\">저장하기</button>\n</div>\n</form>\n",
    );
    body.push_str(FORM_SCRIPT);
    body.push_str("</div>\n");

    layout("경험 추가", &body)
}

/// GET /result: the experience table over the loaded rows.
pub fn result_page(rows: &[ExperienceRecord]) -> String {
    let mut body = String::from(
        "<div class=\"result-wrap\">\n<header class=\"result-header\">\n\
         <h1 class=\"result-title\">내 경험</h1>\n\
         <div class=\"result-actions\">\n\
         <a class=\"btn-ghost\" href=\"/\">홈</a>\n\
         <a class=\"btn-primary\" href=\"/addexperience\">ADD</a>\n\
         </div>\n</header>\n",
    );

    body.push_str(
        "<div class=\"result-table-wrap\">\n<table class=\"result-table\">\n<colgroup>\n\
         <col style=\"width:140px\">\n<col style=\"width:160px\">\n<col>\n<col style=\"width:240px\">\n\
         </colgroup>\n<thead>\n<tr>\n\
         <th>날짜</th>\n<th>교외 / 교내</th>\n<th>활동 내역</th>\n<th>내 강점</th>\n\
         </tr>\n</thead>\n<tbody id=\"experience-rows\">\n",
    );

    // The status row is cleared by the script once the live feed attaches.
    body.push_str("<tr id=\"live-status\"><td colspan=\"4\" class=\"td-center\">불러오는 중...</td></tr>\n");

    if rows.is_empty() {
        body.push_str(
            "<tr id=\"empty-row\"><td colspan=\"4\" class=\"td-center\">저장된 경험이 없습니다.</td></tr>\n",
        );
    }
    for row in rows {
        body.push_str(&result_row(row));
    }

    body.push_str("</tbody>\n</table>\n</div>\n");
    body.push_str(
        "<div class=\"result-footer\">\n<a class=\"btn-ghost\" href=\"/result\">새로고침</a>\n\
         <span class=\"hint\">※ SELECT RLS 정책이 필요합니다. (to anon using (true))</span>\n</div>\n",
    );
    body.push_str(RESULT_SCRIPT);
    body.push_str("</div>\n");

    layout("내 경험", &body)
}

/// One table row. The live-prepend script mirrors these cell rules.
fn result_row(record: &ExperienceRecord) -> String {
    let date = escape_html(&date_display(record.activity_on.as_deref()));
    let scope = escape_html(&scope_display(record));
    let strengths = escape_html(&strengths_display(record.strengths.as_deref()));

    let mut title_cell = format!(
        "<div class=\"cell-title\">{}</div>",
        escape_html(&record.title)
    );
    if let Some(description) = record.description.as_deref() {
        if !description.is_empty() {
            title_cell.push_str(&format!(
                "<div class=\"cell-desc\">{}</div>",
                escape_html(description)
            ));
        }
    }
    if has_star(record) {
        title_cell.push_str("<details class=\"cell-star\"><summary>STAR 보기</summary>");
        for (letter, value) in [
            ("S", record.star_s.as_deref()),
            ("T", record.star_t.as_deref()),
            ("A", record.star_a.as_deref()),
            ("R", record.star_r.as_deref()),
        ] {
            title_cell.push_str(&format!(
                "<div class=\"star-item\"><b>{letter}</b> {}</div>",
                escape_html(star_display(value))
            ));
        }
        title_cell.push_str("</details>");
    }

    format!(
        "<tr>\n<td>{date}</td>\n<td>{scope}</td>\n<td>{title_cell}</td>\n<td>{strengths}</td>\n</tr>\n"
    )
}

fn has_star(record: &ExperienceRecord) -> bool {
    [
        record.star_s.as_deref(),
        record.star_t.as_deref(),
        record.star_a.as_deref(),
        record.star_r.as_deref(),
    ]
    .iter()
    .any(|v| v.is_some_and(|s| !s.is_empty()))
}

/// Shared document shell.
fn layout(title: &str, body: &str) -> String {
    format!(
        "<!doctype html>\n<html lang=\"ko\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n{body}</body>\n</html>\n"
    )
}

/// Client script for the form page: caps the strength selection at three
/// by disabling the unchecked boxes, and locks the submit controls once a
/// submission is in flight.
const FORM_SCRIPT: &str = r#"<script>
(function () {
  var form = document.getElementById("addexp");
  var boxes = Array.prototype.slice.call(form.querySelectorAll('input[name="strengths"]'));
  function enforceCap() {
    var checked = boxes.filter(function (box) { return box.checked; }).length;
    boxes.forEach(function (box) {
      if (!box.checked) { box.disabled = checked >= 3; }
    });
  }
  boxes.forEach(function (box) { box.addEventListener("change", enforceCap); });
  enforceCap();
  form.addEventListener("submit", function () {
    Array.prototype.forEach.call(
      document.querySelectorAll('button[type="submit"]'),
      function (button) { button.disabled = true; }
    );
  });
})();
</script>
"#;

/// Client script for the result page: attaches to the live feed, clears
/// the status row, and prepends arriving rows without re-querying.
const RESULT_SCRIPT: &str = r#"<script>
(function () {
  var tbody = document.getElementById("experience-rows");

  function clearStatus() {
    var status = document.getElementById("live-status");
    if (status) { status.remove(); }
  }

  function esc(value) {
    return String(value).replace(/[&<>"']/g, function (c) {
      return { "&": "&amp;", "<": "&lt;", ">": "&gt;", '"': "&quot;", "'": "&#39;" }[c];
    });
  }

  function fmtDate(value) {
    if (!value) { return ""; }
    var m = String(value).match(/^(\d{4})-(\d{2})-(\d{2})/);
    return m ? m[1] + "." + m[2] + "." + m[3] : String(value);
  }

  function scopeOf(record) {
    if (record.scope) { return record.scope; }
    var title = typeof record.title === "string" ? record.title : "";
    if (title.indexOf("교내") !== -1) { return "교내"; }
    if (title.indexOf("교외") !== -1) { return "교외"; }
    return "—";
  }

  function rowHtml(record) {
    var title = '<div class="cell-title">' + esc(record.title || "") + '</div>';
    if (record.description) {
      title += '<div class="cell-desc">' + esc(record.description) + '</div>';
    }
    if (record.star_s || record.star_t || record.star_a || record.star_r) {
      title += '<details class="cell-star"><summary>STAR 보기</summary>';
      [["S", record.star_s], ["T", record.star_t], ["A", record.star_a], ["R", record.star_r]]
        .forEach(function (pair) {
          title += '<div class="star-item"><b>' + pair[0] + '</b> ' + esc(pair[1] || "-") + '</div>';
        });
      title += '</details>';
    }
    var strengths = Array.isArray(record.strengths) ? record.strengths.join(", ") : "";
    return '<td>' + esc(fmtDate(record.activity_on)) + '</td>'
      + '<td>' + esc(scopeOf(record)) + '</td>'
      + '<td>' + title + '</td>'
      + '<td>' + esc(strengths) + '</td>';
  }

  var source = new EventSource("/result/events");
  source.onopen = clearStatus;
  source.addEventListener("insert", function (event) {
    clearStatus();
    var empty = document.getElementById("empty-row");
    if (empty) { empty.remove(); }
    var tr = document.createElement("tr");
    tr.innerHTML = rowHtml(JSON.parse(event.data));
    tbody.insertBefore(tr, tbody.firstChild);
  });
  source.addEventListener("error", function () {
    clearStatus();
    source.close();
  });
  source.onerror = clearStatus;
})();
</script>
"#;

/// Shared stylesheet, inlined so every page is self-contained.
const STYLE: &str = r#"
:root{color-scheme:dark}
*{box-sizing:border-box}
body{margin:0;min-height:100vh;background:#0f1216;color:#e8edf2;font-family:"Apple SD Gothic Neo","Malgun Gothic","Noto Sans KR",sans-serif}
a{color:inherit;text-decoration:none}
.checkout-container{display:flex;flex-direction:column;align-items:center;justify-content:center;min-height:100vh;gap:28px}
.checkout-title{font-size:2.4rem;margin:0}
.checkout-button{display:inline-flex;gap:8px;padding:14px 28px;border-radius:999px;background:#4f8cff;color:#fff;font-weight:700}
.checkout-footer{color:#8b94a1}
.checkout-footer .highlight{color:#4f8cff;font-weight:700}
.strength-container{max-width:720px;margin:0 auto;padding:48px 24px}
.strength-title{font-size:2rem}
.section{margin:24px 0}
.subtitle{color:#8b94a1;font-size:1rem;margin:0 0 12px}
.tags{display:flex;flex-wrap:wrap;gap:10px}
.tag-bright{padding:8px 14px;border-radius:999px;background:#4f8cff;color:#fff}
.tag-dim{padding:8px 14px;border-radius:999px;background:#232a33;color:#aeb7c2}
.next-btn{display:inline-block;margin-top:24px;padding:12px 32px;border-radius:999px;background:#4f8cff;color:#fff;font-weight:700}
.addexp-wrap,.result-wrap{max-width:960px;margin:0 auto;padding:32px 24px}
.addexp-header,.result-header{display:flex;align-items:center;justify-content:space-between;margin-bottom:20px}
.addexp-title,.result-title{font-size:1.6rem;margin:0}
.addexp-add{padding:10px 22px;border-radius:999px;border:0;background:#4f8cff;color:#fff;font-weight:700;cursor:pointer}
.form-alert{margin-bottom:16px;padding:12px 16px;border-radius:10px;background:#3b1f24;color:#ff8c9a}
.addexp-form{display:flex;flex-direction:column;gap:16px}
.row-top{display:flex;gap:12px;flex-wrap:wrap}
.input-pill{flex:1;min-width:200px;padding:12px 16px;border-radius:999px;border:1px solid #2c3440;background:#161b22;color:inherit}
.date-group{display:flex;align-items:center;gap:8px}
.date-chip{padding:8px 14px;border-radius:999px;background:#232a33;color:#aeb7c2;white-space:nowrap}
.textarea-neon{width:100%;padding:12px 16px;border-radius:14px;border:1px solid #2c3440;background:#161b22;color:inherit;resize:vertical}
fieldset{border:1px solid #2c3440;border-radius:14px;padding:12px 16px}
legend{color:#8b94a1;padding:0 6px}
.scope-group label{margin-right:18px}
.strength-options{display:flex;flex-wrap:wrap;gap:10px}
.strength-option{padding:6px 10px;border-radius:999px;background:#161b22}
.star-row{display:flex;align-items:center;gap:10px}
.star-badge{width:32px;height:32px;display:inline-flex;align-items:center;justify-content:center;border-radius:50%;background:#4f8cff;color:#fff;font-weight:700}
.star-input{flex:1;padding:10px 14px;border-radius:999px;border:1px solid #2c3440;background:#161b22;color:inherit}
.submit-area{display:flex;justify-content:flex-end}
.btn-primary{padding:12px 28px;border-radius:999px;border:0;background:#4f8cff;color:#fff;font-weight:700;cursor:pointer}
.btn-ghost{padding:10px 20px;border-radius:999px;border:1px solid #2c3440;color:#aeb7c2;background:transparent;cursor:pointer}
.result-actions{display:flex;gap:10px;align-items:center}
.result-table-wrap{overflow-x:auto}
.result-table{width:100%;border-collapse:collapse}
.result-table th,.result-table td{padding:12px 14px;border-bottom:1px solid #2c3440;text-align:left;vertical-align:top}
.result-table th{color:#8b94a1;font-weight:600}
.td-center{text-align:center;color:#8b94a1}
.cell-title{font-weight:600}
.cell-desc{color:#aeb7c2;font-size:.92rem;margin-top:4px}
.cell-star{margin-top:6px;color:#aeb7c2}
.star-item{margin:4px 0}
.result-footer{display:flex;align-items:center;gap:14px;margin-top:18px}
.hint{color:#8b94a1;font-size:.85rem}
"#;
