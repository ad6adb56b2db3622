//! Login page driven by the provider's login flow: acquire the flow named in
//! the URL (or initialize a new one), render its fields and messages, submit
//! password credentials, and react to the provider's verdict.

use crate::app_lib::config::AppConfig;
use crate::components::{Alert, AlertKind, AppShell, Button, Messages, Spinner};
use crate::features::kratos::KratosClient;
use crate::features::session::{use_auth, ContextSessionSync};
use crate::flow::controller::{AcquireOutcome, FlowController, FlowKind, SubmitOutcome};
use crate::flow::error::FlowError;
use crate::flow::nodes::{FlowNodes, CSRF_TOKEN, IDENTIFIER, PASSWORD};
use crate::flow::params::FlowParams;
use crate::flow::payload::SubmissionPayload;
use crate::flow::types::FlowRecord;
use crate::routes::{current_params, hard_navigate};
use leptos::{ev::SubmitEvent, prelude::*};
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;
use std::cell::RefCell;
use std::rc::Rc;

type LoginController = FlowController<KratosClient, ContextSessionSync>;

#[derive(Clone)]
/// Captures login form input for the async action without borrowing signals.
struct LoginInput {
    csrf_token: String,
    identifier: String,
    password: String,
}

/// Renders the login form and drives the password login flow.
#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();
    let (flow, set_flow) = signal::<Option<FlowRecord>>(None);
    let (identifier, set_identifier) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error, set_error) = signal::<Option<FlowError>>(None);

    let config = AppConfig::load();
    let controller: Rc<RefCell<LoginController>> = Rc::new(RefCell::new(FlowController::new(
        FlowKind::Login,
        KratosClient::new(config.kratos_browser_url),
        ContextSessionSync::new(auth),
    )));

    let acquire_controller = Rc::clone(&controller);
    let acquire_action = Action::new_local(move |params: &FlowParams| {
        let params = params.clone();
        let controller = Rc::clone(&acquire_controller);
        async move {
            let mut controller = controller.borrow_mut();
            let outcome = controller.acquire(&params).await;
            let record = controller.flow().cloned();
            (outcome, record)
        }
    });

    let submit_controller = Rc::clone(&controller);
    let submit_action = Action::new_local(move |input: &LoginInput| {
        let input = input.clone();
        let controller = Rc::clone(&submit_controller);
        async move {
            let payload =
                SubmissionPayload::login(input.csrf_token, input.identifier, input.password);
            let mut controller = controller.borrow_mut();
            let outcome = controller.submit(payload).await;
            let record = controller.flow().cloned();
            (outcome, record)
        }
    });

    // One acquisition per mount; a restart hard-navigates into a new mount.
    acquire_action.dispatch(current_params());

    let acquire_navigate = navigate.clone();
    Effect::new(move |_| {
        if let Some((outcome, record)) = acquire_action.value().get() {
            match outcome {
                AcquireOutcome::Ready => {
                    if let Some(record) = record {
                        if identifier.get_untracked().is_empty() {
                            if let Some(value) = FlowNodes::project(&record).value_of(IDENTIFIER) {
                                set_identifier.set(value.to_string());
                            }
                        }
                        set_flow.set(Some(record));
                    }
                }
                AcquireOutcome::Restart => {
                    set_flow.set(None);
                    hard_navigate(FlowKind::Login.entry_path());
                }
                AcquireOutcome::NavigateHome => acquire_navigate("/", Default::default()),
                AcquireOutcome::Failed(err) => set_error.set(Some(err)),
            }
        }
    });

    let submit_navigate = navigate.clone();
    Effect::new(move |_| {
        if let Some((outcome, record)) = submit_action.value().get() {
            match outcome {
                SubmitOutcome::NavigateHome => submit_navigate("/", Default::default()),
                SubmitOutcome::FieldErrors => set_flow.set(record),
                SubmitOutcome::Restart => {
                    set_flow.set(None);
                    hard_navigate(FlowKind::Login.entry_path());
                }
                SubmitOutcome::NoSession => {}
                SubmitOutcome::Failed(err) => set_error.set(Some(err)),
            }
        }
    });

    let on_submit = move |event: SubmitEvent| {
        event.prevent_default();
        event.stop_propagation();

        if submit_action.pending().get_untracked() {
            return;
        }
        set_error.set(None);

        let csrf_token = flow
            .with_untracked(|record| {
                record.as_ref().and_then(|record| {
                    FlowNodes::project(record)
                        .value_of(CSRF_TOKEN)
                        .map(str::to_string)
                })
            })
            .unwrap_or_default();

        submit_action.dispatch(LoginInput {
            csrf_token,
            identifier: identifier.get_untracked(),
            password: password.get_untracked(),
        });
    };

    view! {
        <AppShell>
            <div class="max-w-sm mx-auto">
                {move || match flow.get() {
                    None => view! {
                        <div class="mt-10 flex justify-center">
                            <Spinner />
                        </div>
                    }
                    .into_any(),
                    Some(record) => {
                        let projected = FlowNodes::project(&record);
                        let csrf_value =
                            projected.value_of(CSRF_TOKEN).unwrap_or_default().to_string();
                        let identifier_messages = projected.messages_of(IDENTIFIER).to_vec();
                        let password_messages = projected.messages_of(PASSWORD).to_vec();
                        let form_messages = record.ui.messages.clone();
                        let action = record.ui.action.clone();
                        let method = record.ui.method.clone();

                        view! {
                            <form action=action method=method on:submit=on_submit>
                                <input type="hidden" name="csrf_token" value=csrf_value />
                                <div class="mb-5">
                                    <label
                                        class="block mb-2 text-sm font-medium text-gray-900"
                                        for="identifier"
                                    >
                                        "Email"
                                    </label>
                                    <input
                                        id="identifier"
                                        name="identifier"
                                        type="email"
                                        class="bg-gray-50 border border-gray-300 text-gray-900 text-sm rounded-lg focus:ring-blue-500 focus:border-blue-500 block w-full p-2.5"
                                        autocomplete="email"
                                        required
                                        prop:value=move || identifier.get()
                                        on:input=move |event| {
                                            set_identifier.set(event_target_value(&event))
                                        }
                                    />
                                    <Messages messages=identifier_messages />
                                </div>
                                <div class="mb-5">
                                    <label
                                        class="block mb-2 text-sm font-medium text-gray-900"
                                        for="password"
                                    >
                                        "Password"
                                    </label>
                                    <input
                                        id="password"
                                        name="password"
                                        type="password"
                                        class="bg-gray-50 border border-gray-300 text-gray-900 text-sm rounded-lg focus:ring-blue-500 focus:border-blue-500 block w-full p-2.5"
                                        autocomplete="current-password"
                                        required
                                        on:input=move |event| {
                                            set_password.set(event_target_value(&event))
                                        }
                                    />
                                    <Messages messages=password_messages />
                                </div>
                                <Messages messages=form_messages />
                                <div class="mt-6 flex items-center gap-4">
                                    <Button button_type="submit" disabled=submit_action.pending()>
                                        "Sign in"
                                    </Button>
                                    <A href="/" {..} class="text-sm text-gray-600 hover:text-blue-700">
                                        "Cancel"
                                    </A>
                                </div>
                            </form>
                        }
                        .into_any()
                    }
                }}
                {move || {
                    submit_action
                        .pending()
                        .get()
                        .then_some(view! { <div class="mt-4"><Spinner /></div> })
                }}
                {move || {
                    error
                        .get()
                        .map(|err| {
                            view! {
                                <div class="mt-4">
                                    <Alert kind=AlertKind::Error message=err.to_string() />
                                </div>
                            }
                        })
                }}
                <div class="mt-8 flex items-center gap-3 text-sm">
                    <A href="/register" {..} class="text-blue-700 hover:underline">
                        "Create new account"
                    </A>
                    <span class="text-gray-300">"|"</span>
                    <A href="/recovery" {..} class="text-blue-700 hover:underline">
                        "Recover your account"
                    </A>
                </div>
            </div>
        </AppShell>
    }
}
