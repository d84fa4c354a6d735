//! Landing page of the consent popup

use wasm_bindgen::{JsCast, JsValue};
use web_sys::Window;
use yew::prelude::*;

/// Fragment (implicit grant) or query (code grant, error redirects) the provider appended
fn callback_params(window: &Window) -> Option<String> {
    let location = window.location();
    [location.hash().ok(), location.search().ok()]
        .into_iter()
        .flatten()
        .find(|params| params.len() > 1)
}

/// Hand the callback parameters to the window that opened the popup
fn forward_to_opener() -> Result<(), String> {
    let window = web_sys::window().ok_or("no browser window")?;
    let opener = window
        .opener()
        .ok()
        .filter(|opener| !opener.is_null() && !opener.is_undefined())
        .and_then(|opener| opener.dyn_into::<Window>().ok())
        .ok_or("this page was not opened as a sign-in popup")?;
    let params = callback_params(&window).ok_or("the provider returned no parameters")?;
    let origin = window
        .location()
        .origin()
        .map_err(|_| "unable to read the page origin")?;

    opener
        .post_message(&JsValue::from_str(&params), &origin)
        .map_err(|e| format!("postMessage failed: {e:?}"))?;
    let _ = window.close();
    Ok(())
}

#[function_component(OAuthCallback)]
pub fn oauth_callback() -> Html {
    let error = use_state(|| None::<String>);

    {
        let error = error.clone();
        use_effect_with((), move |_| {
            if let Err(message) = forward_to_opener() {
                gloo::console::warn!("OAuth callback:", message.clone());
                error.set(Some(message));
            }
        });
    }

    html! {
        <div class="min-h-screen flex items-center justify-center bg-gray-100 dark:bg-gray-900">
            <p class="text-gray-700 dark:text-gray-300">
                {error.as_deref().unwrap_or("Completing sign-in, you can close this window.")}
            </p>
        </div>
    }
}
