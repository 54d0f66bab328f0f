mod api;
mod components;
mod errors;
mod models;
mod pages;
mod recorder;
mod session;
mod state;
mod text;

use leptos::mount::mount_to_body;
use leptos::prelude::*;
use leptos_router::components::{Redirect, Route, Router, Routes};
use leptos_router::path;

use pages::chat::ChatPage;
use pages::signin::SignInPage;
use pages::signup::SignUpPage;
use session::AuthSession;

/// Root application component: provides the auth-session context and wires
/// the routes. Unknown paths land on the sign-up page.
#[component]
fn App() -> impl IntoView {
    provide_context(AuthSession);

    view! {
        <Router>
            <Routes fallback=|| view! { <Redirect path="/signup" /> }>
                <Route path=path!("/") view=SignUpPage />
                <Route path=path!("/signup") view=SignUpPage />
                <Route path=path!("/signin") view=SignInPage />
                <Route path=path!("/chat") view=ChatPage />
            </Routes>
        </Router>
    }
}

fn main() {
    console_log::init_with_level(log::Level::Debug).expect("Failed to init logger");
    mount_to_body(App);
}
