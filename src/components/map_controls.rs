use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct MapControlsProps {
    pub on_zoom_in: Callback<()>,
    pub on_zoom_out: Callback<()>,
    pub on_fullscreen: Callback<()>,
}

#[function_component(MapControls)]
pub fn map_controls(props: &MapControlsProps) -> Html {
    let zi = {
        let cb = props.on_zoom_in.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let zo = {
        let cb = props.on_zoom_out.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let fs = {
        let cb = props.on_fullscreen.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {<>
        <div style="position:absolute; left:8px; top:8px; display:flex; flex-direction:column; gap:2px; background:rgba(255,255,255,0.6); border-radius:4px; padding:2px;">
            <button title="Zoom in" onclick={zi}> {"+"} </button>
            <button title="Zoom out" onclick={zo}> {"\u{2013}"} </button>
        </div>
        <div style="position:absolute; right:8px; top:8px; background:rgba(255,255,255,0.6); border-radius:4px; padding:2px;">
            <button title="Toggle full-screen" onclick={fs}> {"\u{2922}"} </button>
        </div>
    </>}
}
