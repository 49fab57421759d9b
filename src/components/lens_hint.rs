use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct LensHintProps {
    pub radius: f64,
}

#[function_component(LensHint)]
pub fn lens_hint(props: &LensHintProps) -> Html {
    html! {<div style="position:absolute; left:8px; bottom:8px; background:rgba(22,27,34,0.8); color:#e6edf3; border-radius:6px; padding:4px 8px; font-size:12px; pointer-events:none;">
        { format!("Lens radius {} px \u{b7} \u{2191}/\u{2193} to resize", props.radius) }
    </div>}
}
