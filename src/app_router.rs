use std::rc::Rc;

use gloo::events::EventListener;
use wasm_bindgen::JsValue;
use web_sys::{Event, UrlSearchParams};

use wayfinder_core::{Capabilities, Role, TourUser};

pub(crate) const ROUTE_CHANGE_EVENT: &str = "wayfinder:routechange";

pub fn current_route() -> String {
    web_sys::window()
        .and_then(|window| window.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

pub fn navigate(path: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    if current_route() == path {
        return;
    }
    let Ok(history) = window.history() else {
        gloo::console::warn!("navigate: history unavailable", path);
        return;
    };
    let search = window.location().search().unwrap_or_default();
    let url = format!("{path}{search}");
    if history
        .push_state_with_url(&JsValue::NULL, "", Some(&url))
        .is_err()
    {
        gloo::console::warn!("navigate: push_state failed", path);
        return;
    }
    match Event::new(ROUTE_CHANGE_EVENT) {
        Ok(event) => {
            let _ = window.dispatch_event(&event);
        }
        Err(_) => gloo::console::warn!("navigate: route event rejected", path),
    }
}

pub struct RouteWatcher {
    _popstate: EventListener,
    _pushed: EventListener,
}

pub fn watch_routes(on_change: Rc<dyn Fn(String)>) -> Option<RouteWatcher> {
    let window = web_sys::window()?;
    let popstate = {
        let on_change = on_change.clone();
        EventListener::new(&window, "popstate", move |_| on_change(current_route()))
    };
    let pushed = EventListener::new(&window, ROUTE_CHANGE_EVENT, move |_| {
        on_change(current_route())
    });
    Some(RouteWatcher {
        _popstate: popstate,
        _pushed: pushed,
    })
}

pub fn query_param(name: &str) -> Option<String> {
    let search = web_sys::window()?.location().search().ok()?;
    let params = UrlSearchParams::new_with_str(&search).ok()?;
    params
        .get(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

pub fn user_from_query() -> TourUser {
    let role = query_param("role")
        .and_then(|raw| raw.parse::<Role>().ok())
        .unwrap_or(Role::Admin);
    let id = query_param("user").unwrap_or_else(|| format!("demo-{role}"));
    TourUser::new(id, role)
}

pub fn capabilities_from_query() -> Capabilities {
    let scheduling = !matches!(
        query_param("scheduling").as_deref(),
        Some("off" | "0" | "false")
    );
    Capabilities { scheduling }
}
