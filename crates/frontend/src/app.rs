use crate::auth::{AuthComponent, AuthFormProvider};
use crate::pages::{Dashboard, OAuthCallback};
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Clone, Routable, PartialEq, Eq, Debug)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/dashboard")]
    Dashboard,
    #[at("/oauth/callback")]
    OAuthCallback,
    #[not_found]
    #[at("/404")]
    NotFound,
}

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <BrowserRouter>
            <Switch<Route> render={switch} />
        </BrowserRouter>
    }
}

fn switch(route: Route) -> Html {
    match route {
        Route::Home => html! {
            <div class="min-h-screen flex items-center justify-center bg-gray-100 dark:bg-gray-900 px-4">
                <AuthFormProvider>
                    <AuthComponent />
                </AuthFormProvider>
            </div>
        },
        Route::Dashboard => html! { <Dashboard /> },
        // The popup lands here; it must not build a second controller
        Route::OAuthCallback => html! { <OAuthCallback /> },
        Route::NotFound => html! { <Redirect<Route> to={Route::Home} /> },
    }
}
