use history_lens_map::components::App;

fn main() {
    yew::Renderer::<App>::new().render();
}
