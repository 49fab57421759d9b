use std::rc::Rc;

use web_sys::{HtmlCanvasElement, HtmlElement};
use yew::prelude::*;

use super::{attribution_panel::AttributionPanel, lens_hint::LensHint, map_controls::MapControls};
use crate::config::MapConfig;
use crate::map::MapSession;
use crate::util::cwarn;

#[function_component(App)]
pub fn app() -> Html {
    let config = use_memo((), |_| MapConfig::load());
    let container_ref = use_node_ref();
    let canvas_ref = use_node_ref();
    let session = use_mut_ref(|| None::<Rc<MapSession>>);
    let radius = use_state(|| config.lens.default_radius);

    // Mount the map once the container and canvas exist; dropping the
    // session on unmount detaches its listeners.
    {
        let container_ref = container_ref.clone();
        let canvas_ref = canvas_ref.clone();
        let session = session.clone();
        let config = config.clone();
        let radius = radius.clone();
        use_effect_with((), move |_| {
            let on_radius = Callback::from(move |r: f64| radius.set(r));
            match (
                container_ref.cast::<HtmlElement>(),
                canvas_ref.cast::<HtmlCanvasElement>(),
            ) {
                (Some(container), Some(canvas)) => {
                    match MapSession::mount(container, canvas, &config, on_radius) {
                        Ok(s) => *session.borrow_mut() = Some(Rc::new(s)),
                        Err(e) => cwarn(&format!("map setup failed: {e}")),
                    }
                }
                _ => cwarn("map setup failed: container or canvas not mounted"),
            }
            move || {
                session.borrow_mut().take();
            }
        });
    }

    let zoom = |delta: f64| {
        let session = session.clone();
        Callback::from(move |_: ()| {
            if let Some(s) = &*session.borrow() {
                s.zoom_by(delta);
            }
        })
    };
    let on_fullscreen = {
        let session = session.clone();
        Callback::from(move |_: ()| {
            if let Some(s) = &*session.borrow() {
                if let Err(e) = s.toggle_fullscreen() {
                    cwarn(&format!("full-screen toggle failed: {e}"));
                }
            }
        })
    };

    html! {
        <div id="map" ref={container_ref} style="position:relative; width:100vw; height:100vh; overflow:hidden; background:#dfe3e8;">
            <canvas ref={canvas_ref} style="display:block; width:100%; height:100%;"></canvas>
            <MapControls on_zoom_in={zoom(1.0)} on_zoom_out={zoom(-1.0)} on_fullscreen={on_fullscreen} />
            <AttributionPanel attributions={config.attributions()} />
            <LensHint radius={*radius} />
        </div>
    }
}
