mod app;
mod auth;
mod components;
mod hooks;
mod pages;
mod services;

use app::App;

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    yew::Renderer::<App>::new().render();
}
