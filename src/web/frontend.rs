//! Embedded HTML/CSS/JS frontend for the benchmarkinator web console.
//!
//! The entire SPA is compiled into the binary as a string constant.
//! No external assets, no build tools, no CDN dependencies.

/// The complete single-page console HTML.
pub const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Benchmarkinator</title>
<style>
:root {
  --bg: #f6f8fa;
  --surface: #ffffff;
  --border: #d0d7de;
  --text: #1f2328;
  --text-muted: #656d76;
  --accent: #0969da;
  --green: #1a7f37;
  --yellow: #9a6700;
  --red: #cf222e;
  --radius: 8px;
  --font: -apple-system, BlinkMacSystemFont, 'Segoe UI', Helvetica, Arial, sans-serif;
  --mono: 'SF Mono', 'Cascadia Code', 'Fira Code', monospace;
}
html.dark {
  --bg: #0d1117;
  --surface: #161b22;
  --border: #30363d;
  --text: #e6edf3;
  --text-muted: #8b949e;
  --accent: #58a6ff;
  --green: #3fb950;
  --yellow: #d29922;
  --red: #f85149;
}

* { margin: 0; padding: 0; box-sizing: border-box; }
body {
  background: var(--bg);
  color: var(--text);
  font-family: var(--font);
  font-size: 14px;
  line-height: 1.5;
}

/* Layout */
.app { display: flex; min-height: 100vh; }
aside {
  width: 220px;
  background: var(--surface);
  border-right: 1px solid var(--border);
  padding: 20px 12px;
  display: flex;
  flex-direction: column;
  gap: 4px;
}
aside h1 { font-size: 18px; margin: 0 8px 16px; }
aside button {
  text-align: left;
  background: none;
  border: none;
  color: var(--text);
  padding: 8px;
  border-radius: var(--radius);
  cursor: pointer;
  font: inherit;
}
aside button.active { background: var(--accent); color: #fff; }
aside button:disabled { color: var(--text-muted); cursor: not-allowed; }
aside .spacer { flex: 1; }
aside .user { color: var(--text-muted); font-size: 12px; padding: 8px; }
main { flex: 1; padding: 24px; max-width: 1200px; }
main h2 { font-size: 20px; margin-bottom: 16px; }

/* Cards & tables */
.cards { display: grid; grid-template-columns: repeat(auto-fill, minmax(180px, 1fr)); gap: 12px; margin-bottom: 24px; }
.card { background: var(--surface); border: 1px solid var(--border); border-radius: var(--radius); padding: 16px; }
.card .value { font-size: 28px; font-weight: 600; }
.card .label { color: var(--text-muted); }
table { width: 100%; border-collapse: collapse; background: var(--surface); border: 1px solid var(--border); border-radius: var(--radius); }
th, td { text-align: left; padding: 8px 12px; border-bottom: 1px solid var(--border); }
th { color: var(--text-muted); font-weight: 600; }
tr:nth-child(even) td { background: var(--bg); }
.tabs { display: flex; gap: 6px; margin-bottom: 16px; flex-wrap: wrap; }
.tabs button, .btn {
  background: var(--surface);
  border: 1px solid var(--border);
  color: var(--text);
  border-radius: var(--radius);
  padding: 6px 12px;
  cursor: pointer;
  font: inherit;
}
.tabs button.active, .btn.primary { background: var(--accent); border-color: var(--accent); color: #fff; }
.btn.danger { color: var(--red); }
.row { display: flex; gap: 8px; align-items: center; margin-bottom: 16px; flex-wrap: wrap; }
input, select, textarea {
  background: var(--surface);
  border: 1px solid var(--border);
  color: var(--text);
  border-radius: var(--radius);
  padding: 6px 8px;
  font: inherit;
}
textarea { font-family: var(--mono); width: 100%; min-height: 90px; }
.warning { color: var(--yellow); margin-bottom: 12px; }
.empty { color: var(--text-muted); padding: 24px; text-align: center; }
.bar { height: 10px; background: var(--accent); border-radius: 4px; }

/* Login */
.login { max-width: 340px; margin: 12vh auto; background: var(--surface); border: 1px solid var(--border); border-radius: var(--radius); padding: 24px; }
.login h1 { font-size: 20px; margin-bottom: 16px; }
.login input { width: 100%; margin-bottom: 12px; }
.login .error { color: var(--red); margin-bottom: 12px; min-height: 1em; }

/* Toasts */
#toasts { position: fixed; top: 16px; right: 16px; display: flex; flex-direction: column; gap: 8px; }
.toast { padding: 10px 14px; border-radius: var(--radius); color: #fff; min-width: 220px; }
.toast.success { background: var(--green); }
.toast.error { background: var(--red); }
.toast.warning { background: var(--yellow); }
.toast.info { background: var(--accent); }
</style>
</head>
<body>
<div id="root"></div>
<div id="toasts"></div>

<script>
// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------
let session = null;
let currentView = 'results';
let hardwareTab = 'cpu';
const ENDPOINTS = ['cpu', 'cpu/brand', 'cpu/family', 'gpu', 'gpu/manufacturer', 'gpu/brand',
  'gpu/model', 'gpu/vram_type', 'motherboard', 'motherboard/manufacturer', 'motherboard/chipset',
  'ram', 'disk', 'oses', 'config', 'benchmark', 'benchmark/target', 'benchmark_results'];

// ---------------------------------------------------------------------------
// API helpers
// ---------------------------------------------------------------------------
async function api(method, path, body) {
  const opts = { method, headers: {} };
  if (body) {
    opts.headers['Content-Type'] = 'application/json';
    opts.body = JSON.stringify(body);
  }
  const res = await fetch(path, opts);
  const data = await res.json();
  return { status: res.status, data };
}

function toast(t) {
  if (!t) return;
  const el = document.createElement('div');
  el.className = 'toast ' + t.kind;
  el.textContent = t.message;
  el.onclick = () => el.remove();
  document.getElementById('toasts').appendChild(el);
  if (t.duration_ms > 0) setTimeout(() => el.remove(), t.duration_ms);
}

function esc(s) {
  return String(s ?? '').replace(/[&<>"]/g, c => ({ '&': '&amp;', '<': '&lt;', '>': '&gt;', '"': '&quot;' }[c]));
}

function renderTable(table) {
  if (!table || table.rows.length === 0) return '<div class="empty">No records found.</div>';
  const head = table.headers.map(h => `<th>${esc(h)}</th>`).join('');
  const body = table.rows.map(r => '<tr>' + r.map(c => `<td>${esc(c)}</td>`).join('') + '</tr>').join('');
  return `<table><thead><tr>${head}</tr></thead><tbody>${body}</tbody></table>`;
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------
async function loadSession() {
  session = (await api('GET', '/api/session')).data;
  document.documentElement.className = session.theme_class;
  render();
}

async function login(e) {
  e.preventDefault();
  const username = document.getElementById('username').value;
  const password = document.getElementById('password').value;
  const { data } = await api('POST', '/api/session/login', { username, password });
  if (!data.success) {
    document.getElementById('login-error').textContent = data.error;
    return;
  }
  currentView = 'dashboard';
  await loadSession();
}

async function logout() {
  await api('POST', '/api/session/logout');
  currentView = 'results';
  await loadSession();
}

async function setApiKey() {
  const key = prompt(session.has_api_key ? 'New API key (empty to clear):' : 'API key:');
  if (key === null) return;
  const { data } = await api('POST', '/api/session/api_key', { api_key: key });
  toast(data.toast || { kind: 'error', message: data.error, duration_ms: 5000 });
  await loadSession();
}

async function toggleTheme() {
  const { data } = await api('POST', '/api/session/theme');
  document.documentElement.className = data.theme_class;
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------
function render() {
  const root = document.getElementById('root');
  if (!session.is_authenticated && currentView === 'login') {
    root.innerHTML = `
      <form class="login" onsubmit="login(event)">
        <h1>Benchmarkinator Login</h1>
        <div class="error" id="login-error"></div>
        <input id="username" placeholder="Username" autocomplete="username">
        <input id="password" type="password" placeholder="Password" autocomplete="current-password">
        <button class="btn primary" type="submit">Log in</button>
        <button class="btn" type="button" onclick="navigate('results')">View results</button>
      </form>`;
    return;
  }

  const nav = session.routes.map(r =>
    `<button data-view="${r.route}" class="${r.route === currentView ? 'active' : ''}"
      ${r.accessible ? '' : 'disabled'} onclick="navigate('${r.route}')">${esc(r.label)}</button>`).join('');
  const account = session.is_authenticated
    ? `<div class="user">${esc(session.user.username)} (${esc(session.user.role)})</div>
       <button onclick="logout()">Log out</button>`
    : `<button onclick="navigate('login')">Log in</button>`;

  root.innerHTML = `
    <div class="app">
      <aside>
        <h1>Benchmarkinator</h1>
        ${nav}
        <div class="spacer"></div>
        <button onclick="setApiKey()">${session.has_api_key ? 'Change' : 'Set'} API key</button>
        <button onclick="toggleTheme()">Toggle dark mode</button>
        ${account}
      </aside>
      <main id="main"></main>
    </div>`;
  loadView();
}

function navigate(view) {
  const route = session.routes.find(r => r.route === view);
  if (route && !route.accessible) view = 'login';
  currentView = view;
  render();
}

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------
async function loadView(query) {
  const main = document.getElementById('main');
  const path = '/api/views/' + currentView + (query ? '?' + query : '');
  const { status, data } = await api('GET', path);
  if (status === 401) return navigate('login');
  if (status !== 200) {
    main.innerHTML = `<div class="empty">${esc(data.error)}</div>`;
    return;
  }
  toast(data.error);
  switch (currentView) {
    case 'dashboard': return renderDashboard(main, data.data);
    case 'hardware': return renderHardware(main, data.data);
    case 'benchmarks': return renderBenchmarks(main, data.data);
    case 'configurations': return renderConfigurations(main, data.data);
    case 'results': return renderResults(main, data.data);
  }
}

function renderDashboard(main, d) {
  const cards = d.cards.map(c => `<div class="card" onclick="navigate('${c.route}')"><div class="value">${c.value}</div><div class="label">${esc(c.name)}</div></div>`).join('');
  const actions = d.quick_actions.map(a =>
    `<div class="card" onclick="navigate('${a.route}')"><b>${esc(a.name)}</b><div class="label">${esc(a.description)}</div></div>`).join('');
  main.innerHTML = `<h2>Dashboard</h2><div class="cards">${cards}</div><h2>Quick Actions</h2><div class="cards">${actions}</div>`;
}

function renderHardware(main, d) {
  const tabs = ['cpu', 'gpu', 'motherboard', 'ram', 'disk', 'os'].map(t =>
    `<button class="${t === hardwareTab ? 'active' : ''}" onclick="hardwareTab='${t}';loadView('tab=${t}')">${t.toUpperCase()}</button>`).join('');
  const warning = d.missing_prerequisites.length
    ? `<div class="warning">Create at least one ${esc(d.missing_prerequisites.join(', '))} first.</div>` : '';
  main.innerHTML = `<h2>Hardware</h2><div class="tabs">${tabs}</div>${warning}${renderTable(d.table)}${editor()}`;
}

function renderBenchmarks(main, d) {
  main.innerHTML = `<h2>Benchmarks</h2>${renderTable(d.table)}${editor()}`;
}

function renderConfigurations(main, d) {
  main.innerHTML = `<h2>Test Systems</h2>${renderTable(d.table)}${editor()}`;
}

function renderResults(main, d) {
  const opts = (items, label) => '<option value="">All</option>' +
    items.map(i => `<option value="${i.id}">${esc(label(i))}</option>`).join('');
  const max = Math.max(0, ...d.chart.map(r => r.score));
  const chart = d.chart.map(r =>
    `<tr><td>${esc(r.name)}</td><td>${r.score}</td><td style="width:40%"><div class="bar" style="width:${max ? r.score / max * 100 : 0}%"></div></td></tr>`).join('');
  main.innerHTML = `
    <h2>Benchmark Results</h2>
    <div class="row">
      <select id="f-benchmark">${opts(d.benchmarks, b => b.name)}</select>
      <select id="f-config">${opts(d.configurations, c => c.name)}</select>
      <input id="f-from" type="date"><input id="f-to" type="date">
      <button class="btn" onclick="filterResults()">Filter</button>
    </div>
    ${renderTable(d.table)}
    <h2 style="margin-top:24px">Performance Comparison</h2>
    <table><tbody>${chart}</tbody></table>
    <h2 style="margin-top:24px">Compare Configurations</h2>
    <div class="row">
      <select id="c-1">${opts(d.configurations, c => c.name)}</select>
      <select id="c-2">${opts(d.configurations, c => c.name)}</select>
      <button class="btn primary" onclick="compare()">Compare</button>
    </div>
    <div id="comparison"></div>
    ${session.is_authenticated ? editor() : ''}`;
}

function filterResults() {
  const q = [['benchmark', 'f-benchmark'], ['config', 'f-config'], ['from', 'f-from'], ['to', 'f-to']]
    .map(([k, id]) => [k, document.getElementById(id).value])
    .filter(([, v]) => v)
    .map(([k, v]) => k + '=' + encodeURIComponent(v)).join('&');
  loadView(q);
}

async function compare() {
  const c1 = document.getElementById('c-1').value;
  const c2 = document.getElementById('c-2').value;
  if (!c1 || !c2) return toast({ kind: 'warning', message: 'Pick two configurations', duration_ms: 5000 });
  const { status, data } = await api('GET', `/api/compare?config_id_1=${c1}&config_id_2=${c2}`);
  if (status !== 200) return toast(data.toast || { kind: 'error', message: data.error, duration_ms: 5000 });
  const rows = data.entries.map(e =>
    `<tr><td>${e.benchmark_id}</td><td>${e.config_1_result}</td><td>${e.config_2_result}</td><td>${e.percentage_change > 0 ? '+' : ''}${e.percentage_change.toFixed(2)}%</td></tr>`).join('');
  document.getElementById('comparison').innerHTML = rows
    ? `<table><thead><tr><th>Benchmark</th><th>Config ${c1}</th><th>Config ${c2}</th><th>Change</th></tr></thead><tbody>${rows}</tbody></table>`
    : '<div class="empty">No shared benchmarks.</div>';
}

// ---------------------------------------------------------------------------
// Mutations
// ---------------------------------------------------------------------------
function editor() {
  const opts = ENDPOINTS.map(e => `<option>${e}</option>`).join('');
  return `
    <h2 style="margin-top:24px">Edit Records</h2>
    <div class="row">
      <select id="m-endpoint">${opts}</select>
      <input id="m-id" placeholder="id (update/delete)" size="16">
    </div>
    <textarea id="m-body" placeholder='{"name": "..."}'></textarea>
    <div class="row" style="margin-top:8px">
      <button class="btn primary" onclick="save()">Save</button>
      <button class="btn danger" onclick="remove()">Delete</button>
    </div>`;
}

async function save() {
  const endpoint = document.getElementById('m-endpoint').value;
  const id = document.getElementById('m-id').value.trim();
  let body;
  try {
    body = JSON.parse(document.getElementById('m-body').value || '{}');
  } catch (e) {
    return toast({ kind: 'error', message: 'Invalid JSON: ' + e.message, duration_ms: 5000 });
  }
  const { data } = await api(id ? 'PUT' : 'POST', `/api/rest/${endpoint}${id ? '/' + id : ''}`, body);
  toast(data.toast || { kind: 'error', message: data.error, duration_ms: 5000 });
  if (data.success) loadView(currentView === 'hardware' ? 'tab=' + hardwareTab : '');
}

async function remove() {
  const endpoint = document.getElementById('m-endpoint').value;
  const id = document.getElementById('m-id').value.trim();
  if (!id) return toast({ kind: 'warning', message: 'Enter an id to delete', duration_ms: 5000 });
  if (!confirm(`Are you sure you want to delete this ${endpoint}?`)) return;
  const { data } = await api('DELETE', `/api/rest/${endpoint}/${id}`);
  toast(data.toast || { kind: 'error', message: data.error, duration_ms: 5000 });
  if (data.success) loadView(currentView === 'hardware' ? 'tab=' + hardwareTab : '');
}

loadSession();
</script>
</body>
</html>
"##;
