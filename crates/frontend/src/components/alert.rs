//! Informational alert box

use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub struct AlertProps {
    pub title: AttrValue,
    #[prop_or_default]
    pub children: Children,
}

#[function_component(Alert)]
pub fn alert(props: &AlertProps) -> Html {
    html! {
        <div class="relative w-full rounded-lg border border-l-4 border-red-500 bg-white dark:bg-gray-800 p-4 flex gap-3" role="alert">
            <svg class="h-5 w-5 text-blue-500 shrink-0" fill="none" stroke="currentColor" viewBox="0 0 24 24">
                <circle cx="12" cy="12" r="10" stroke-width="2"></circle>
                <path stroke-linecap="round" stroke-width="2" d="M12 16v-4m0-4h.01"></path>
            </svg>
            <div>
                <h5 class="mb-1 font-medium leading-none tracking-tight text-gray-900 dark:text-gray-100">{props.title.clone()}</h5>
                <div class="text-sm text-gray-600 dark:text-gray-400">{props.children.clone()}</div>
            </div>
        </div>
    }
}
