//! Sign-in / sign-up card

use crate::components::LoadingSpinner;
use crate::hooks::use_auth_form;
use authscreen_core::{FederatedProvider, Screen};
use yew::prelude::*;

const INPUT_CLASS: &str = "w-full p-2 border rounded-lg focus:outline-none focus:ring-2 focus:ring-blue-400 dark:bg-gray-700 dark:border-gray-600 dark:text-gray-200";

fn provider_button_class(provider: FederatedProvider) -> &'static str {
    match provider {
        FederatedProvider::Google => {
            "w-full flex items-center justify-center bg-white text-gray-700 py-2 mb-2 rounded-lg border border-gray-300 hover:bg-gray-100 transition disabled:opacity-50"
        }
        FederatedProvider::Facebook => {
            "w-full flex items-center justify-center bg-blue-700 text-white py-2 mb-2 rounded-lg hover:bg-blue-800 transition disabled:opacity-50"
        }
        FederatedProvider::GitHub => {
            "w-full flex items-center justify-center bg-gray-900 text-white py-2 rounded-lg hover:bg-gray-800 transition disabled:opacity-50"
        }
    }
}

#[derive(Properties, PartialEq)]
struct ErrorBannerProps {
    message: Option<String>,
}

#[function_component(ErrorBanner)]
fn error_banner(props: &ErrorBannerProps) -> Html {
    match &props.message {
        Some(message) => html! {
            <div class="mb-4 p-2 bg-red-100 text-red-600 text-sm rounded-lg text-center" role="alert">
                {message}
            </div>
        },
        None => html! {},
    }
}

#[function_component(AuthComponent)]
pub fn auth_component() -> Html {
    let auth = use_auth_form();
    let data = auth.data();
    let pending = data.pending;

    let on_username_input = {
        let auth = auth.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            auth.set_username(input.value());
        })
    };

    let on_email_input = {
        let auth = auth.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            auth.set_email(input.value());
        })
    };

    let on_password_input = {
        let auth = auth.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            auth.set_password(input.value());
        })
    };

    let on_submit = {
        let auth = auth.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            auth.submit();
        })
    };

    let on_toggle = {
        let auth = auth.clone();
        Callback::from(move |_: MouseEvent| auth.toggle_mode())
    };

    let on_logout = {
        let auth = auth.clone();
        Callback::from(move |_: MouseEvent| auth.logout())
    };

    let body = match data.form.screen() {
        Screen::Welcome {
            greeting, error, ..
        } => html! {
            <>
                <ErrorBanner message={error} />
                <p class="text-center text-lg font-semibold mb-4 text-gray-800 dark:text-gray-200">{greeting}</p>
                <button
                    class="w-full bg-red-500 text-white py-2 rounded-lg hover:bg-red-600 transition disabled:opacity-50"
                    onclick={on_logout}
                    disabled={pending}
                >
                    {"Logout"}
                </button>
            </>
        },
        Screen::Form {
            mode,
            show_username,
            error,
            providers,
        } => {
            let submit_class = if mode.is_sign_up() {
                "w-full bg-blue-500 text-white py-2 rounded-lg hover:bg-blue-600 transition disabled:opacity-50"
            } else {
                "w-full bg-green-500 text-white py-2 rounded-lg hover:bg-green-600 transition disabled:opacity-50"
            };

            html! {
                <>
                    <ErrorBanner message={error} />
                    <form onsubmit={on_submit} class="space-y-3">
                        if show_username {
                            <input
                                type="text"
                                placeholder="Username"
                                class={INPUT_CLASS}
                                value={data.form.username.clone()}
                                oninput={on_username_input}
                            />
                        }
                        <input
                            type="email"
                            placeholder="Email"
                            class={INPUT_CLASS}
                            value={data.form.email.clone()}
                            oninput={on_email_input}
                        />
                        <input
                            type="password"
                            placeholder="Password"
                            class={INPUT_CLASS}
                            value={data.form.password.clone()}
                            oninput={on_password_input}
                        />
                        <button type="submit" class={submit_class} disabled={pending}>
                            {mode.title()}
                        </button>
                    </form>

                    <p class="text-center mt-3 text-gray-700 dark:text-gray-300">
                        {mode.toggle_prompt()}{" "}
                        <span class="text-blue-600 cursor-pointer hover:underline" onclick={on_toggle}>
                            {mode.toggle_label()}
                        </span>
                    </p>

                    <div class="flex items-center my-4">
                        <div class="flex-1 border-t"></div>
                        <span class="px-3 text-gray-500">{"OR"}</span>
                        <div class="flex-1 border-t"></div>
                    </div>

                    { for providers.iter().map(|&provider| {
                        let auth = auth.clone();
                        let onclick = Callback::from(move |_: MouseEvent| auth.social_sign_in(provider));
                        html! {
                            <button
                                key={provider.provider_id()}
                                class={provider_button_class(provider)}
                                onclick={onclick}
                                disabled={pending}
                            >
                                <span>{provider.label()}</span>
                            </button>
                        }
                    }) }
                </>
            }
        }
    };

    html! {
        <div class="w-full max-w-md bg-white dark:bg-gray-800 shadow-lg rounded-lg p-8">
            <h2 class="text-2xl font-bold text-center mb-6 text-gray-800 dark:text-gray-200">
                {data.form.mode.title()}
            </h2>
            {body}
            if pending {
                <LoadingSpinner text={Some("Please wait...".to_string())} />
            }
        </div>
    }
}
