//! Browser popup for federated consent screens
//!
//! The popup is sent to the provider's authorization URL; the provider
//! redirects it to `/oauth/callback`, which posts its URL fragment or query
//! back to this window and closes itself.

use crate::services::config::current_origin;
use async_trait::async_trait;
use authscreen_core::{ProviderError, ProviderErrorCode, ProviderResult};
use authscreen_identity::{FederatedCredential, OAuthRequest, PopupHandler};
use futures::channel::oneshot;
use gloo::events::EventListener;
use gloo::timers::callback::Interval;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::MessageEvent;

const POPUP_NAME: &str = "authscreen-oauth";
const POPUP_FEATURES: &str = "width=500,height=650,popup=yes";
const CLOSED_POLL_MS: u32 = 500;

type Reply = Rc<RefCell<Option<oneshot::Sender<ProviderResult<String>>>>>;

/// Deliver `value` unless an earlier event already answered
fn respond(reply: &Reply, value: ProviderResult<String>) {
    if let Some(sender) = reply.borrow_mut().take() {
        let _ = sender.send(value);
    }
}

#[derive(Clone, Copy, Default)]
pub struct BrowserPopupHandler;

impl BrowserPopupHandler {
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait(?Send)]
impl PopupHandler for BrowserPopupHandler {
    async fn open_popup(&self, request: OAuthRequest) -> ProviderResult<FederatedCredential> {
        let window = web_sys::window()
            .ok_or_else(|| ProviderError::internal("no browser window available"))?;
        let origin = current_origin()
            .ok_or_else(|| ProviderError::internal("unable to read the page origin"))?;

        let popup = window
            .open_with_url_and_target_and_features(&request.auth_url, POPUP_NAME, POPUP_FEATURES)
            .map_err(|e| ProviderError::internal(format!("window.open failed: {e:?}")))?
            .ok_or_else(|| ProviderError::new("popup-blocked", "the browser blocked the popup"))?;
        gloo::console::log!("Opened consent popup for", request.provider.label());

        let (sender, receiver) = oneshot::channel();
        let reply: Reply = Rc::new(RefCell::new(Some(sender)));

        let _listener = {
            let reply = reply.clone();
            EventListener::new(&window, "message", move |event| {
                let Some(event) = event.dyn_ref::<MessageEvent>() else {
                    return;
                };
                if event.origin() != origin {
                    return;
                }
                if let Some(params) = event.data().as_string() {
                    respond(&reply, Ok(params));
                }
            })
        };

        let _closed_poll = {
            let reply = reply.clone();
            let popup = popup.clone();
            Interval::new(CLOSED_POLL_MS, move || {
                if popup.closed().unwrap_or(true) {
                    respond(
                        &reply,
                        Err(ProviderError::new(
                            ProviderErrorCode::PopupClosedByUser,
                            "the popup was closed before sign-in completed",
                        )),
                    );
                }
            })
        };

        let outcome = receiver.await.map_err(|_| {
            ProviderError::internal("popup listener dropped before a reply arrived")
        })?;
        let _ = popup.close();

        FederatedCredential::from_callback(&request, &outcome?)
    }
}
