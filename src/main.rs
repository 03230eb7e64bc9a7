use std::rc::Rc;

use yew::prelude::*;

use wayfinder::app_router;
use wayfinder::tour_runtime;
use wayfinder::TourOverlay;
use wayfinder_core::{mobile_anchor_id, Capabilities, GuideDescriptor, Role, TourUser, GUIDES};

const DEMO_CSS: &str = r#"
body { margin: 0; font: 14px/1.5 system-ui, sans-serif; color: #0f172a; background: #f8fafc; }
.shell { display: flex; min-height: 100vh; }
.sidebar { width: 200px; padding: 16px; background: #1e293b; display: flex; flex-direction: column; gap: 4px; }
.sidebar a, .bottom-nav a { color: #cbd5e1; text-decoration: none; padding: 6px 10px; border-radius: 6px; }
.sidebar a.active, .bottom-nav a.active { background: #334155; color: #fff; }
.bottom-nav { display: none; position: fixed; left: 0; right: 0; bottom: 0; background: #1e293b; justify-content: space-around; padding: 8px; }
.main { flex: 1; padding: 24px 32px 96px; }
.topbar { display: flex; justify-content: space-between; align-items: center; margin-bottom: 24px; }
.help { display: flex; gap: 8px; flex-wrap: wrap; }
.panel { background: #fff; border-radius: 10px; padding: 16px; margin-bottom: 16px; box-shadow: 0 1px 3px rgba(15, 23, 42, 0.08); }
.grid { display: grid; grid-template-columns: repeat(7, 1fr); gap: 6px; }
.grid div { background: #e2e8f0; border-radius: 6px; padding: 12px 4px; text-align: center; }
.tall { height: 900px; }
button { border: 0; border-radius: 6px; padding: 6px 12px; cursor: pointer; background: #e2e8f0; }
@media (max-width: 720px) {
  .sidebar { display: none; }
  .bottom-nav { display: flex; }
  .main { padding: 16px 16px 96px; }
}
"#;

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

#[derive(Properties, PartialEq)]
struct AppProps {
    user: TourUser,
    capabilities: Capabilities,
}

struct NavEntry {
    id: &'static str,
    label: &'static str,
    path: &'static str,
}

const fn nav(id: &'static str, label: &'static str, path: &'static str) -> NavEntry {
    NavEntry { id, label, path }
}

fn nav_entries(role: Role, capabilities: Capabilities) -> Vec<NavEntry> {
    match role {
        Role::Admin => {
            let mut entries = vec![
                nav("nav-dashboard", "Dashboard", "/admin"),
                nav("nav-staff", "Staff", "/admin/staff"),
            ];
            if capabilities.scheduling {
                entries.push(nav("nav-rota", "Rota", "/admin/rota"));
            }
            entries.push(nav("nav-settings", "Settings", "/admin/settings"));
            entries.push(nav("nav-reports", "Reports", "/admin/reports"));
            entries
        }
        Role::Staff => vec![
            nav("nav-home", "Home", "/staff"),
            nav("nav-availability", "Availability", "/staff/availability"),
            nav("nav-time-off", "Time off", "/staff/time-off"),
        ],
    }
}

fn guides_for(role: Role) -> Vec<&'static GuideDescriptor> {
    let home = role.home_route();
    GUIDES
        .iter()
        .filter(|guide| {
            guide
                .steps
                .iter()
                .filter_map(|step| step.route)
                .any(|route| route.starts_with(home))
        })
        .collect()
}

fn nav_link(id: String, entry: &NavEntry, route: &str) -> Html {
    let path = entry.path;
    let onclick = Callback::from(move |event: MouseEvent| {
        event.prevent_default();
        app_router::navigate(path);
    });
    html! {
        <a
            {id}
            href={path}
            class={classes!((route == path).then_some("active"))}
            {onclick}
        >
            { entry.label }
        </a>
    }
}

fn page(route: &str) -> Html {
    match route {
        "/admin" => html! {
            <section id="dashboard-summary" class="panel">
                <h2>{ "This week" }</h2>
                <p>{ "42 shifts planned, 3 open, 2 pending requests." }</p>
            </section>
        },
        "/admin/staff" => html! {
            <section class="panel">
                <h2>{ "Staff" }</h2>
                <button id="staff-add-btn">{ "Add person" }</button>
                { " " }
                <button id="staff-bulk-btn">{ "Bulk add" }</button>
            </section>
        },
        "/admin/rota" => html! {
            <>
                <section id="rota-week-grid" class="panel">
                    <div class="grid">
                        { for WEEKDAYS.iter().map(|day| html! { <div>{ *day }</div> }) }
                    </div>
                </section>
                <button id="rota-publish-btn">{ "Publish" }</button>
            </>
        },
        "/admin/settings" => html! {
            <section id="settings-modules" class="panel">
                <h2>{ "Modules" }</h2>
                <label><input type="checkbox" />{ " Scheduling" }</label>
            </section>
        },
        "/admin/reports" => html! {
            <>
                <section class="panel tall">{ "Hours by week" }</section>
                <button id="reports-export">{ "Export" }</button>
            </>
        },
        "/staff" => html! {
            <section id="staff-next-shift" class="panel">
                <h2>{ "Next shift" }</h2>
                <p>{ "Thursday, 08:00 to 16:00" }</p>
            </section>
        },
        "/staff/availability" => html! {
            <section id="availability-calendar" class="panel">
                <div class="grid">
                    { for WEEKDAYS.iter().map(|day| html! { <div>{ *day }</div> }) }
                </div>
            </section>
        },
        "/staff/time-off" => html! {
            <>
                <button id="time-off-request-btn">{ "Request time off" }</button>
                <section id="time-off-form" class="panel">
                    <label>{ "From " }<input type="date" /></label>
                    { " " }
                    <label>{ "To " }<input type="date" /></label>
                </section>
            </>
        },
        _ => html! { <section class="panel">{ "Nothing here yet." }</section> },
    }
}

#[function_component(App)]
fn app(props: &AppProps) -> Html {
    let route = use_state(app_router::current_route);
    {
        let route = route.clone();
        use_effect_with((), move |_| {
            let watcher = app_router::watch_routes(Rc::new(move |next: String| route.set(next)));
            move || drop(watcher)
        });
    }
    use_effect_with((), |_| {
        if let Some(id) = app_router::query_param("guide") {
            tour_runtime::start_guide_by_id(&id);
        } else {
            tour_runtime::start_tour(false);
        }
        || ()
    });

    let role = props.user.role;
    let entries = nav_entries(role, props.capabilities);
    let current = (*route).clone();
    let sidebar = entries
        .iter()
        .map(|entry| nav_link(entry.id.to_string(), entry, &current))
        .collect::<Html>();
    let bottom_nav = entries
        .iter()
        .map(|entry| nav_link(mobile_anchor_id(entry.id), entry, &current))
        .collect::<Html>();
    let guide_buttons = guides_for(role)
        .into_iter()
        .map(|guide| {
            let onclick = Callback::from(move |_: MouseEvent| {
                tour_runtime::start_guide(guide);
            });
            html! { <button key={guide.id} {onclick}>{ guide.title }</button> }
        })
        .collect::<Html>();
    let replay = Callback::from(|_: MouseEvent| {
        tour_runtime::start_tour(true);
    });

    html! {
        <>
            <style>{ DEMO_CSS }</style>
            <div class="shell">
                <nav class="sidebar">{ sidebar }</nav>
                <main class="main">
                    <div class="topbar">
                        <strong>{ format!("Signed in as {} ({})", props.user.id, role) }</strong>
                        <div class="help">
                            <button onclick={replay}>{ "Replay tour" }</button>
                            { guide_buttons }
                        </div>
                    </div>
                    { page(&current) }
                </main>
                <nav class="bottom-nav">{ bottom_nav }</nav>
            </div>
            <TourOverlay />
        </>
    }
}

fn main() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
    let user = app_router::user_from_query();
    let capabilities = app_router::capabilities_from_query();
    gloo::console::log!("demo: signed in", user.id.clone(), user.role.as_str());
    tour_runtime::init();
    tour_runtime::set_user(Some(user.clone()));
    tour_runtime::set_capabilities(capabilities);
    yew::Renderer::<App>::with_props(AppProps { user, capabilities }).render();
}
