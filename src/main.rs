use yew::prelude::*;

use canvas_gestures::components::CanvasView;

#[function_component(App)]
fn app() -> Html {
    html! { <CanvasView /> }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
