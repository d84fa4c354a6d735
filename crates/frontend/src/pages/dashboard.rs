use crate::components::Alert;
use yew::prelude::*;

#[function_component(Dashboard)]
pub fn dashboard() -> Html {
    html! {
        <main class="flex min-h-screen items-center justify-center bg-gray-100 dark:bg-gray-900">
            <div class="w-96">
                <Alert title="Heads Up!">
                    {"This is an alert component from ShadCN UI."}
                </Alert>
            </div>
        </main>
    }
}
