//! Spotlight cursor with a lagging trail

use super::capability::{is_interactive, PointerCapability};
use super::frame_loop::FrameLoop;
use super::trail::{LeadMarker, Point, TrailMarker, TrailState};
use gloo::events::EventListener;
use gloo::utils::{document, window};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{Element, MouseEvent};
use yew::prelude::*;

/// Marker colors; dark variants are keyed on the root `data-theme` attribute
pub const CURSOR_STYLES: &str = r"
.spotlight {
  border-radius: 50%;
  background: radial-gradient(circle, rgba(255, 255, 255, 1) 0%, rgba(255, 255, 255, 1) 30%, rgba(180, 220, 255, 1) 40%, rgba(100, 200, 255, 1) 50%, rgba(100, 200, 255, 0.3) 70%, rgba(100, 200, 255, 0.1) 85%, transparent 100%);
  transition: width 0.15s ease, height 0.15s ease, background 0.15s ease;
}
.spotlight.hovering {
  background: radial-gradient(circle, rgba(255, 255, 255, 1) 0%, rgba(255, 255, 255, 1) 30%, rgba(100, 220, 200, 1) 40%, rgba(50, 200, 180, 1) 50%, rgba(50, 200, 180, 0.3) 70%, rgba(50, 200, 180, 0.1) 85%, transparent 100%);
}
[data-theme='dark'] .spotlight {
  background: radial-gradient(circle, rgba(255, 255, 255, 1) 0%, rgba(255, 255, 255, 1) 30%, rgba(220, 220, 220, 1) 40%, rgba(200, 200, 200, 1) 50%, rgba(200, 200, 200, 0.3) 70%, rgba(200, 200, 200, 0.1) 85%, transparent 100%);
}
[data-theme='dark'] .spotlight.hovering {
  background: radial-gradient(circle, rgba(255, 255, 255, 1) 0%, rgba(255, 255, 255, 1) 30%, rgba(230, 230, 230, 1) 40%, rgba(210, 210, 210, 1) 50%, rgba(210, 210, 210, 0.3) 70%, rgba(210, 210, 210, 0.1) 85%, transparent 100%);
}
.spotlight-trail {
  border-radius: 50%;
  background: radial-gradient(circle, rgba(80, 190, 255, 0.28) 0%, rgba(80, 190, 255, 0.14) 25%, rgba(80, 190, 255, 0.04) 45%, transparent 65%);
}
.spotlight-trail.hovering {
  background: radial-gradient(circle, rgba(50, 200, 180, 0.28) 0%, rgba(50, 200, 180, 0.14) 25%, rgba(50, 200, 180, 0.04) 45%, transparent 65%);
}
[data-theme='dark'] .spotlight-trail {
  background: radial-gradient(circle, rgba(190, 190, 190, 0.20) 0%, rgba(190, 190, 190, 0.10) 25%, rgba(190, 190, 190, 0.03) 45%, transparent 65%);
}
[data-theme='dark'] .spotlight-trail.hovering {
  background: radial-gradient(circle, rgba(230, 230, 230, 0.20) 0%, rgba(230, 230, 230, 0.10) 25%, rgba(230, 230, 230, 0.03) 45%, transparent 65%);
}
";

const TRAIL_Z_INDEX: u32 = 9999;
const LEAD_Z_INDEX: u32 = 10000;

/// Everything needed to paint one frame
#[derive(Clone, Debug, PartialEq)]
pub struct CursorFrame {
    pub trail: Vec<TrailMarker>,
    pub lead: LeadMarker,
    pub hovering: bool,
}

impl CursorFrame {
    /// `None` means render nothing at all
    pub fn compose(capability: PointerCapability, state: &TrailState) -> Option<Self> {
        if capability.is_touch() {
            return None;
        }
        Some(Self {
            trail: state.markers(),
            lead: state.lead(),
            hovering: state.is_hovering(),
        })
    }
}

fn position_style(center: Point) -> String {
    format!(
        "position: fixed; left: {}px; top: {}px; pointer-events: none; transform: translate(-50%, -50%);",
        center.x, center.y
    )
}

pub fn trail_marker_style(marker: &TrailMarker) -> String {
    format!(
        "{} width: {size}px; height: {size}px; opacity: {}; z-index: {TRAIL_Z_INDEX}; transition: opacity 0.3s ease;",
        position_style(marker.center),
        marker.opacity,
        size = marker.size,
    )
}

/// Width/height changes still animate through the `.spotlight` transition
pub fn lead_marker_style(marker: &LeadMarker) -> String {
    format!(
        "{} width: {size}px; height: {size}px; opacity: {}; z-index: {LEAD_Z_INDEX};",
        position_style(marker.center),
        marker.opacity,
        size = marker.size,
    )
}

/// Window/body listeners, removed together when dropped
struct PointerListeners {
    _on_move: EventListener,
    _on_leave: Option<EventListener>,
}

impl PointerListeners {
    fn attach(state: &Rc<RefCell<TrailState>>) -> Self {
        let on_move = {
            let state = Rc::clone(state);
            EventListener::new(&window(), "mousemove", move |event| {
                let Some(event) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                let hovering = event
                    .target()
                    .and_then(|target| target.dyn_into::<Element>().ok())
                    .is_some_and(|element| is_interactive(&element));
                let point = Point::new(f64::from(event.client_x()), f64::from(event.client_y()));
                state.borrow_mut().pointer_moved(point, hovering);
            })
        };

        let on_leave = document().body().map(|body| {
            let state = Rc::clone(state);
            EventListener::new(&body, "mouseleave", move |_| {
                state.borrow_mut().pointer_left();
            })
        });

        Self {
            _on_move: on_move,
            _on_leave: on_leave,
        }
    }
}

#[derive(Properties, Clone, PartialEq)]
pub struct CustomCursorProps {
    #[prop_or_default]
    pub capability: PointerCapability,
}

#[function_component(CustomCursor)]
pub fn custom_cursor(props: &CustomCursorProps) -> Html {
    let state = use_mut_ref(TrailState::new);
    let redraw = use_force_update();
    let capability = props.capability;

    {
        let state = state.clone();
        use_effect_with(capability, move |capability| {
            let listeners = (!capability.is_touch()).then(|| PointerListeners::attach(&state));
            move || drop(listeners)
        });
    }

    {
        let state = state.clone();
        use_effect_with(capability, move |capability| {
            let frame_loop = (!capability.is_touch()).then(|| {
                FrameLoop::start(move |_| {
                    state.borrow_mut().tick();
                    redraw.force_update();
                })
            });
            move || drop(frame_loop)
        });
    }

    let Some(frame) = CursorFrame::compose(capability, &state.borrow()) else {
        return Html::default();
    };

    let hovering = frame.hovering.then_some("hovering");

    html! {
        <>
            { for frame.trail.iter().enumerate().map(|(index, marker)| html! {
                <div
                    key={index}
                    class={classes!("spotlight-trail", hovering)}
                    style={trail_marker_style(marker)}
                />
            }) }
            <div
                class={classes!("spotlight", hovering)}
                style={lead_marker_style(&frame.lead)}
            />
            <style>{ CURSOR_STYLES }</style>
        </>
    }
}
