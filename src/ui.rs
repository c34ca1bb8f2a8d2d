use crate::models::{DayRecord, LogoStage, Task, TodayResponse};

pub fn render_index(
    today: &TodayResponse,
    tasks: &[Task],
    record: &DayRecord,
    notice: Option<&str>,
) -> String {
    let summary = &today.summary;
    let celebrate = if today.celebration.confetti { " celebrate" } else { "" };
    INDEX_HTML
        .replace("{{DATE}}", &summary.date)
        .replace("{{PERCENT}}", &summary.percent.to_string())
        .replace("{{STATUS}}", summary.status_text)
        .replace("{{STREAK}}", &summary.streak.to_string())
        .replace("{{LOGO}}", &render_logo(summary.logo))
        .replace("{{CELEBRATE}}", celebrate)
        .replace("{{CHART}}", &render_chart(today))
        .replace("{{NOTICE}}", &escape_html(notice.unwrap_or("")))
        .replace("{{TASKS}}", &render_tasks(tasks, record))
}

fn render_tasks(tasks: &[Task], record: &DayRecord) -> String {
    if tasks.is_empty() {
        return r#"<li class="empty">No habits yet. Add one below.</li>"#.to_string();
    }
    tasks
        .iter()
        .map(|task| {
            let done = record.get(task.as_str()).copied().unwrap_or(false);
            let name = escape_html(task);
            format!(
                r#"<li class="task{done_class}">
  <form method="post" action="/tasks/toggle">
    <input type="hidden" name="task" value="{name}" />
    <input type="hidden" name="completed" value="{next}" />
    <button class="check" type="submit" aria-pressed="{done}">{mark}</button>
  </form>
  <span class="name">{name}</span>
  <form method="post" action="/tasks/delete" onsubmit="return confirm('Delete this habit?');">
    <input type="hidden" name="name" value="{name}" />
    <button class="delete" type="submit" aria-label="Delete">&times;</button>
  </form>
</li>"#,
                done_class = if done { " done" } else { "" },
                next = !done,
                mark = if done { "&#10003;" } else { "" },
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_chart(today: &TodayResponse) -> String {
    today
        .summary
        .last_7_days
        .iter()
        .map(|point| {
            format!(
                r#"<div class="bar{filled}" style="height: {percent}%" title="{date}: {percent}%"><span>{label}</span></div>"#,
                filled = if point.qualifies { " filled" } else { "" },
                percent = point.percent,
                date = point.date,
                label = point.label,
            )
        })
        .collect::<Vec<_>>()
        .join("")
}

fn render_logo(stage: LogoStage) -> String {
    let (active, class) = match stage {
        LogoStage::One => (1, "logo"),
        LogoStage::Two => (2, "logo"),
        LogoStage::Three => (3, "logo"),
        LogoStage::Complete => (3, "logo shiver"),
    };
    let marks: String = (1..=3)
        .map(|n| {
            if n <= active {
                r#"<i class="tri active"></i>"#
            } else {
                r#"<i class="tri"></i>"#
            }
        })
        .collect();
    format!(r#"<div class="{class}">{marks}</div>"#)
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '{' => out.push_str("&#123;"),
            '}' => out.push_str("&#125;"),
            _ => out.push(ch),
        }
    }
    out
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Ascend</title>
  <style>
    :root {
      --bg: #14161c;
      --card: #1e2129;
      --ink: #eef0f4;
      --muted: #8a90a0;
      --accent: #f2b134;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px;
    }

    .app {
      width: min(520px, 100%);
      background: var(--card);
      border-radius: 24px;
      padding: 28px;
      display: grid;
      gap: 22px;
    }

    .app.celebrate {
      box-shadow: 0 0 0 3px var(--accent);
    }

    header {
      display: flex;
      align-items: center;
      justify-content: space-between;
    }

    .logo {
      display: flex;
      gap: 4px;
    }

    .tri {
      width: 0;
      height: 0;
      border-left: 9px solid transparent;
      border-right: 9px solid transparent;
      border-bottom: 16px solid #3a3f4b;
    }

    .tri.active {
      border-bottom-color: var(--accent);
    }

    .shiver {
      animation: shiver 300ms infinite;
    }

    .progress {
      height: 10px;
      background: #2b2f3a;
      border-radius: 999px;
      overflow: hidden;
    }

    .progress div {
      height: 100%;
      background: var(--accent);
    }

    .meta {
      display: flex;
      justify-content: space-between;
      color: var(--muted);
    }

    ul {
      list-style: none;
      margin: 0;
      padding: 0;
      display: grid;
      gap: 8px;
    }

    .task {
      display: flex;
      align-items: center;
      gap: 12px;
    }

    .task .name {
      flex: 1;
    }

    .task.done .name {
      color: var(--muted);
      text-decoration: line-through;
    }

    button {
      cursor: pointer;
      border: none;
      border-radius: 8px;
      color: var(--ink);
      background: #2b2f3a;
    }

    .check {
      width: 28px;
      height: 28px;
    }

    .chart {
      display: flex;
      align-items: flex-end;
      gap: 8px;
      height: 120px;
    }

    .bar {
      flex: 1;
      min-height: 4px;
      background: #3a3f4b;
      border-radius: 6px 6px 0 0;
      position: relative;
    }

    .bar.filled {
      background: var(--accent);
    }

    .bar span {
      position: absolute;
      bottom: -20px;
      width: 100%;
      text-align: center;
      font-size: 0.75rem;
      color: var(--muted);
    }

    .notice {
      color: #e36a5c;
      min-height: 1.2em;
      margin: 0;
    }

    @keyframes shiver {
      50% {
        transform: translateX(1px) rotate(1deg);
      }
    }
  </style>
</head>
<body>
  <main class="app{{CELEBRATE}}">
    <header>
      <h1>Ascend</h1>
      {{LOGO}}
    </header>
    <section>
      <div class="progress"><div style="width: {{PERCENT}}%"></div></div>
      <p class="meta"><span><strong>{{PERCENT}}%</strong> {{STATUS}}</span><span>{{STREAK}} days</span></p>
    </section>
    <ul id="task-list">
{{TASKS}}
    </ul>
    <form method="post" action="/tasks/add">
      <input name="name" placeholder="New habit" autocomplete="off" />
      <button type="submit">Add</button>
    </form>
    <p class="notice">{{NOTICE}}</p>
    <section class="chart">{{CHART}}</section>
    <p class="meta"><span>{{DATE}}</span><a href="/api/export.csv">Export CSV</a></p>
  </main>
</body>
</html>
"#;
