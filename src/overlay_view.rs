use std::rc::Rc;

use gloo::events::EventListener;
use web_sys::Element;
use yew::prelude::*;

use crate::dom;
use crate::tour_runtime;
use wayfinder_core::{
    compose_overlay, ModeKind, OverlayModel, Ring, Side, Size, Span, StepKey,
};

const OVERLAY_CSS: &str = r#"
.wf-backdrop { position: fixed; inset: 0; background: rgba(15, 23, 42, 0.45); pointer-events: none; z-index: 9000; }
.wf-ring { position: fixed; border: 2px solid #6366f1; border-radius: 10px; box-shadow: 0 0 0 4px rgba(99, 102, 241, 0.25); pointer-events: none; z-index: 9001; transition: all 120ms ease-out; }
.wf-ring--pulse { animation: wf-pulse 1.4s ease-in-out infinite; }
@keyframes wf-pulse { 0%, 100% { box-shadow: 0 0 0 4px rgba(99, 102, 241, 0.25); } 50% { box-shadow: 0 0 0 10px rgba(99, 102, 241, 0.1); } }
.wf-card { box-sizing: border-box; background: #fff; color: #0f172a; border-radius: 12px; padding: 16px 18px; box-shadow: 0 12px 32px rgba(15, 23, 42, 0.25); z-index: 9002; font: 14px/1.45 system-ui, sans-serif; }
.wf-card--tour { width: min(448px, calc(100vw - 32px)); }
.wf-card--guide { width: min(320px, calc(100vw - 32px)); }
.wf-arrow { position: absolute; color: #fff; font-size: 14px; line-height: 1; text-shadow: 0 1px 2px rgba(15, 23, 42, 0.2); }
.wf-arrow--top { bottom: -11px; left: 50%; transform: translateX(-50%); }
.wf-arrow--bottom { top: -11px; left: 50%; transform: translateX(-50%); }
.wf-arrow--left { right: -10px; top: 50%; transform: translateY(-50%); }
.wf-arrow--right { left: -10px; top: 50%; transform: translateY(-50%); }
.wf-card h3 { margin: 0 0 6px; font-size: 15px; }
.wf-card p { margin: 0 0 12px; }
.wf-footer { display: flex; align-items: center; gap: 8px; }
.wf-progress { flex: 1; color: #64748b; font-size: 12px; }
.wf-footer button { border: 0; border-radius: 6px; padding: 6px 12px; cursor: pointer; background: #e2e8f0; }
.wf-footer button.wf-primary { background: #6366f1; color: #fff; }
"#;

#[function_component(TourOverlay)]
pub fn tour_overlay() -> Html {
    let snapshot = use_state(tour_runtime::snapshot);
    {
        let snapshot = snapshot.clone();
        use_effect_with((), move |_| {
            let subscription = tour_runtime::subscribe(Rc::new(move || {
                snapshot.set(tour_runtime::snapshot());
            }));
            move || drop(subscription)
        });
    }
    let viewport = use_state(dom::viewport_size);
    {
        let viewport = viewport.clone();
        use_effect_with((), move |_| {
            let listener = web_sys::window().map(|window| {
                EventListener::new(&window, "resize", move |_| {
                    viewport.set(dom::viewport_size());
                })
            });
            move || drop(listener)
        });
    }
    let card_ref = use_node_ref();
    let measured = use_state(|| None::<(StepKey, Size)>);
    {
        let card_ref = card_ref.clone();
        let measured = measured.clone();
        let key = snapshot.active.map(|step| step.key);
        use_effect(move || {
            if let (Some(key), Some(element)) = (key, card_ref.cast::<Element>()) {
                let size = dom::element_size(&element);
                if !size.is_empty() && *measured != Some((key, size)) {
                    measured.set(Some((key, size)));
                }
            }
            || ()
        });
    }

    let Some(step) = snapshot.active else {
        return html! {};
    };
    let card_size = (*measured)
        .filter(|(key, _)| *key == step.key)
        .map(|(_, size)| size);
    let model = compose_overlay(
        &step,
        snapshot.target,
        card_size,
        *viewport,
        &snapshot.config,
    );

    html! {
        <div class="wf-overlay">
            <style>{ OVERLAY_CSS }</style>
            if model.backdrop {
                <div class="wf-backdrop" />
            }
            { model.ring.map(render_ring).unwrap_or_default() }
            { render_card(&model, card_ref) }
        </div>
    }
}

fn render_ring(ring: Ring) -> Html {
    let rect = ring.rect;
    let style = format!(
        "left: {}px; top: {}px; width: {}px; height: {}px;",
        rect.x.round(),
        rect.y.round(),
        rect.width.round(),
        rect.height.round()
    );
    html! {
        <div class={classes!("wf-ring", ring.pulsing.then_some("wf-ring--pulse"))} {style} />
    }
}

fn render_card(model: &OverlayModel, card_ref: NodeRef) -> Html {
    let mode_class = match model.mode {
        ModeKind::Tour => "wf-card--tour",
        ModeKind::Guide => "wf-card--guide",
    };
    let arrow = model.arrow().and_then(arrow_glyph).map(|(glyph, class)| {
        html! { <span class={classes!("wf-arrow", class)} aria-hidden="true">{ glyph }</span> }
    });
    let controls = model.controls;
    let mode = model.mode;
    let on_prev = Callback::from(|_: MouseEvent| {
        tour_runtime::prev_step();
    });
    let on_dismiss = Callback::from(move |_: MouseEvent| {
        match mode {
            ModeKind::Tour => tour_runtime::end_tour(),
            ModeKind::Guide => tour_runtime::stop_guide(),
        };
    });
    let primary = controls.primary.map(|action| {
        let onclick = Callback::from(move |_: MouseEvent| {
            match mode {
                ModeKind::Tour => tour_runtime::next_step(),
                ModeKind::Guide => tour_runtime::next_guide_step(),
            };
        });
        html! {
            <button type="button" class="wf-primary" {onclick}>{ action.label() }</button>
        }
    });
    html! {
        <div
            ref={card_ref}
            class={classes!("wf-card", mode_class)}
            style={model.placement.style.to_css()}
            role="dialog"
            aria-live="polite"
        >
            { arrow.unwrap_or_default() }
            <h3>{ model.title }</h3>
            <p>{ for model.body.iter().map(render_span) }</p>
            <div class="wf-footer">
                <span class="wf-progress">{ model.progress.clone() }</span>
                if controls.show_dismiss {
                    <button type="button" onclick={on_dismiss}>{ model.dismiss_label() }</button>
                }
                if controls.show_prev {
                    <button type="button" onclick={on_prev}>{ "Back" }</button>
                }
                { primary.unwrap_or_default() }
            </div>
        </div>
    }
}

fn render_span(span: &Span<'static>) -> Html {
    if span.bold {
        html! { <strong>{ span.text }</strong> }
    } else {
        html! { <>{ span.text }</> }
    }
}

// The arrow sits on the card edge facing the target.
fn arrow_glyph(side: Side) -> Option<(&'static str, &'static str)> {
    match side {
        Side::Top => Some(("\u{25BC}", "wf-arrow--top")),
        Side::Bottom => Some(("\u{25B2}", "wf-arrow--bottom")),
        Side::Left => Some(("\u{25B6}", "wf-arrow--left")),
        Side::Right => Some(("\u{25C0}", "wf-arrow--right")),
        Side::Center => None,
    }
}
