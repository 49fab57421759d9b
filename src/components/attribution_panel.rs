use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct AttributionPanelProps {
    /// Attribution HTML snippets, already de-duplicated.
    pub attributions: Vec<String>,
}

#[function_component(AttributionPanel)]
pub fn attribution_panel(props: &AttributionPanelProps) -> Html {
    let open = use_state(|| true);
    let toggle = {
        let open = open.clone();
        Callback::from(move |_| open.set(!*open))
    };
    html! {<div style="position:absolute; right:8px; bottom:8px; display:flex; align-items:center; gap:4px; background:rgba(255,255,255,0.8); border-radius:4px; padding:2px 6px; font-size:12px;">
        { if *open {
            html! { <span>{ for props.attributions.iter().map(|a| Html::from_html_unchecked(AttrValue::from(a.clone()))) }</span> }
        } else { html!{} } }
        <button title="Attributions" onclick={toggle}>{ if *open { "\u{203a}" } else { "i" } }</button>
    </div>}
}
