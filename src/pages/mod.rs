use crate::components::ui::{
    Alert, AlertDescription, Button, ButtonSize, ButtonVariant, Card, CardContent, CardDescription,
    CardFooter, CardHeader, CardTitle, Input, Label, Spinner,
};
use crate::form::{self, FieldId, FieldMessage, FieldState};
use crate::state::AppContext;
use crate::storage::save_user_to_storage;
use crate::validate::{validate_sign_in, validate_sign_up};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

/// Fixed copy for the authentication-failure dialog. The underlying
/// error is never shown to the user.
const AUTH_ALERT_TITLE: &str = "Authentication error";
const AUTH_ALERT_MESSAGE: &str = "An error occurred while logging in, check your credentials.";

#[component]
pub fn SignInPage() -> impl IntoView {
    let email = FieldState::new();
    let password = FieldState::new();
    let fields = [(FieldId::Email, email), (FieldId::Password, password)];

    let loading: RwSignal<bool> = RwSignal::new(false);
    let auth_failed: RwSignal<bool> = RwSignal::new(false);

    let app_state = expect_context::<AppContext>();
    let navigate = StoredValue::new(use_navigate());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        // One in-flight attempt at a time; the button is disabled while
        // pending, this guards the Enter-key path too.
        if loading.get_untracked() {
            return;
        }

        form::clear_errors(&fields);

        let email_val = email.value.get_untracked();
        let password_val = password.value.get_untracked();

        let credentials = match validate_sign_in(&email_val, &password_val) {
            Ok(credentials) => credentials,
            Err(violations) => {
                form::apply_errors(&fields, &violations);
                return;
            }
        };

        let mut client = app_state.0.auth.get_untracked();
        loading.set(true);

        spawn_local(async move {
            match client.sign_in(&credentials).await {
                Ok(session) => {
                    client.set_token(session.token);
                    client.save_to_storage();
                    save_user_to_storage(&session.user);
                    app_state.0.auth.set(client);
                    app_state.0.current_user.set(Some(session.user));
                    let _ = window().location().set_href("/");
                }
                Err(_) => {
                    auth_failed.set(true);
                }
            }
            loading.set(false);
        });
    };

    // Enter in the email field hands focus to the password field
    // instead of submitting; Enter in the password field submits.
    let on_email_keydown = move |ev: web_sys::KeyboardEvent| {
        if ev.key() == "Enter" {
            ev.prevent_default();
            password.focus();
        }
    };

    let on_create_account = move |_: web_sys::MouseEvent| {
        navigate.with_value(|nav| nav("/signup", Default::default()));
    };

    view! {
        <div class="min-h-screen bg-background">
            <div class="mx-auto flex min-h-screen w-full max-w-sm flex-col justify-center px-4 py-10">
                <div class="mb-6 flex flex-col items-center gap-1">
                    <a href="/" class="text-sm font-medium text-foreground">"Trimly"</a>
                    <div class="text-xs text-muted-foreground">"Book your next cut."</div>
                </div>

                <Card>
                    <CardHeader>
                        <CardTitle class="text-lg">"Sign in"</CardTitle>
                        <CardDescription class="text-xs">"Use your email and password to continue."</CardDescription>
                    </CardHeader>

                    <CardContent>
                        // novalidate: the schema owns validation, not the browser.
                        <form class="flex flex-col gap-3" novalidate=true on:submit=on_submit>
                            <div class="flex flex-col gap-1.5">
                                <Label html_for=FieldId::Email.as_ref() class="text-xs">"Email"</Label>
                                <Input
                                    id=FieldId::Email.as_ref()
                                    name=FieldId::Email.as_ref()
                                    r#type="email"
                                    placeholder="you@example.com"
                                    autocomplete="email"
                                    bind_value=email.value
                                    invalid=email.invalid()
                                    node_ref=email.node
                                    class="h-8 text-sm"
                                    on:keydown=on_email_keydown
                                />
                                <FieldMessage field=email />
                            </div>

                            <div class="flex flex-col gap-1.5">
                                <Label html_for=FieldId::Password.as_ref() class="text-xs">"Password"</Label>
                                <Input
                                    id=FieldId::Password.as_ref()
                                    name=FieldId::Password.as_ref()
                                    r#type="password"
                                    placeholder="••••••••"
                                    autocomplete="current-password"
                                    bind_value=password.value
                                    invalid=password.invalid()
                                    node_ref=password.node
                                    class="h-8 text-sm"
                                />
                                <FieldMessage field=password />
                            </div>

                            <Button
                                class="w-full"
                                size=ButtonSize::Sm
                                attr:disabled=move || loading.get()
                            >
                                <span class="inline-flex items-center gap-2">
                                    <Show when=move || loading.get() fallback=|| ().into_view()>
                                        <Spinner />
                                    </Show>
                                    {move || if loading.get() { "Signing in..." } else { "Sign in" }}
                                </span>
                            </Button>
                        </form>

                        <div class="pt-2">
                            // Recovery flow is not wired up yet.
                            <Button
                                variant=ButtonVariant::Link
                                size=ButtonSize::Sm
                                class="px-0 text-xs text-muted-foreground"
                                on:click=move |_: web_sys::MouseEvent| {}
                            >
                                "Forgot my password"
                            </Button>
                        </div>
                    </CardContent>

                    <CardFooter>
                        <div class="text-xs text-muted-foreground">"No account?"</div>
                        <Button
                            variant=ButtonVariant::Link
                            size=ButtonSize::Sm
                            class="px-0 text-xs"
                            on:click=on_create_account
                        >
                            "Create an account"
                        </Button>
                    </CardFooter>
                </Card>
            </div>

            <Show when=move || auth_failed.get() fallback=|| ().into_view()>
                <div class="fixed inset-0 z-50 flex items-center justify-center bg-black/30 px-4">
                    <div class="w-full max-w-sm rounded-md border border-border bg-background p-4 shadow-lg">
                        <div class="mb-3 space-y-1">
                            <div class="text-sm font-medium text-destructive">{AUTH_ALERT_TITLE}</div>
                            <div class="text-xs text-muted-foreground">{AUTH_ALERT_MESSAGE}</div>
                        </div>

                        <div class="flex items-center justify-end pt-2">
                            <Button
                                size=ButtonSize::Sm
                                on:click=move |_| auth_failed.set(false)
                            >
                                "OK"
                            </Button>
                        </div>
                    </div>
                </div>
            </Show>
        </div>
    }
}

#[component]
pub fn SignUpPage() -> impl IntoView {
    let name = FieldState::new();
    let email = FieldState::new();
    let password = FieldState::new();
    let fields = [
        (FieldId::Name, name),
        (FieldId::Email, email),
        (FieldId::Password, password),
    ];

    let loading: RwSignal<bool> = RwSignal::new(false);
    let error: RwSignal<Option<String>> = RwSignal::new(None);
    let success: RwSignal<bool> = RwSignal::new(false);

    let app_state = expect_context::<AppContext>();

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        if loading.get_untracked() {
            return;
        }

        form::clear_errors(&fields);
        error.set(None);

        let name_val = name.value.get_untracked();
        let email_val = email.value.get_untracked();
        let password_val = password.value.get_untracked();

        let registration = match validate_sign_up(&name_val, &email_val, &password_val) {
            Ok(registration) => registration,
            Err(violations) => {
                form::apply_errors(&fields, &violations);
                return;
            }
        };

        let client = app_state.0.auth.get_untracked();
        loading.set(true);

        spawn_local(async move {
            match client.sign_up(&registration).await {
                Ok(_account) => {
                    // Account creation does not establish a session;
                    // ask the user to sign in.
                    success.set(true);
                }
                Err(e) => {
                    error.set(Some(e.to_string()));
                }
            }
            loading.set(false);
        });
    };

    view! {
        <div class="min-h-screen bg-background">
            <div class="mx-auto flex min-h-screen w-full max-w-sm flex-col justify-center px-4 py-10">
                <div class="mb-6 flex flex-col items-center gap-1">
                    <a href="/" class="text-sm font-medium text-foreground">"Trimly"</a>
                    <div class="text-xs text-muted-foreground">"Create your account."</div>
                </div>

                <Card>
                    <CardHeader>
                        <CardTitle class="text-lg">"Create account"</CardTitle>
                        <CardDescription class="text-xs">"A few details and you are in."</CardDescription>
                    </CardHeader>

                    <CardContent>
                        <Show
                            when=move || !success.get()
                            fallback=move || view! {
                                <Alert>
                                    <AlertDescription class="text-xs">
                                        "Account created. You can now "
                                        <a class="text-primary underline underline-offset-4" href="/signin">"sign in"</a>
                                        "."
                                    </AlertDescription>
                                </Alert>
                            }
                        >
                            <form class="flex flex-col gap-3" novalidate=true on:submit=on_submit>
                                <div class="flex flex-col gap-1.5">
                                    <Label html_for=FieldId::Name.as_ref() class="text-xs">"Name"</Label>
                                    <Input
                                        id=FieldId::Name.as_ref()
                                        name=FieldId::Name.as_ref()
                                        r#type="text"
                                        placeholder="Your name"
                                        autocomplete="name"
                                        bind_value=name.value
                                        invalid=name.invalid()
                                        node_ref=name.node
                                        class="h-8 text-sm"
                                    />
                                    <FieldMessage field=name />
                                </div>

                                <div class="flex flex-col gap-1.5">
                                    <Label html_for=FieldId::Email.as_ref() class="text-xs">"Email"</Label>
                                    <Input
                                        id=FieldId::Email.as_ref()
                                        name=FieldId::Email.as_ref()
                                        r#type="email"
                                        placeholder="you@example.com"
                                        autocomplete="email"
                                        bind_value=email.value
                                        invalid=email.invalid()
                                        node_ref=email.node
                                        class="h-8 text-sm"
                                    />
                                    <FieldMessage field=email />
                                </div>

                                <div class="flex flex-col gap-1.5">
                                    <Label html_for=FieldId::Password.as_ref() class="text-xs">"Password"</Label>
                                    <Input
                                        id=FieldId::Password.as_ref()
                                        name=FieldId::Password.as_ref()
                                        r#type="password"
                                        placeholder="••••••••"
                                        autocomplete="new-password"
                                        bind_value=password.value
                                        invalid=password.invalid()
                                        node_ref=password.node
                                        class="h-8 text-sm"
                                    />
                                    <FieldMessage field=password />
                                </div>

                                <Show when=move || error.get().is_some() fallback=|| ().into_view()>
                                    {move || {
                                        error.get().map(|e| {
                                            view! {
                                                <Alert class="border-destructive/30">
                                                    <AlertDescription class="text-destructive text-xs">
                                                        {e}
                                                    </AlertDescription>
                                                </Alert>
                                            }
                                        })
                                    }}
                                </Show>

                                <Button
                                    class="w-full"
                                    size=ButtonSize::Sm
                                    attr:disabled=move || loading.get()
                                >
                                    <span class="inline-flex items-center gap-2">
                                        <Show when=move || loading.get() fallback=|| ().into_view()>
                                            <Spinner />
                                        </Show>
                                        {move || if loading.get() { "Creating..." } else { "Create account" }}
                                    </span>
                                </Button>
                            </form>
                        </Show>
                    </CardContent>

                    <CardFooter>
                        <div class="text-xs text-muted-foreground">
                            "Already have an account? "
                            <a class="text-primary underline underline-offset-4" href="/signin">"Sign in"</a>
                        </div>
                    </CardFooter>
                </Card>
            </div>
        </div>
    }
}

#[component]
pub fn HomePage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();

    let on_sign_out = move |_: web_sys::MouseEvent| {
        let mut client = app_state.0.auth.get_untracked();
        client.logout();
        app_state.0.auth.set(client);
        app_state.0.current_user.set(None);
        let _ = window().location().set_href("/signin");
    };

    let display_name = move || {
        app_state
            .0
            .current_user
            .get()
            .map(|u| u.display_name())
            .unwrap_or_else(|| "account".to_string())
    };

    view! {
        <div class="min-h-screen bg-background">
            <div class="mx-auto flex min-h-screen w-full max-w-sm flex-col justify-center px-4 py-10">
                <Card>
                    <CardHeader>
                        <CardTitle class="text-lg">"Welcome back"</CardTitle>
                        <CardDescription class="text-xs">
                            {move || format!("Signed in as {}.", display_name())}
                        </CardDescription>
                    </CardHeader>

                    <CardContent>
                        <div class="text-sm text-muted-foreground">
                            "Your appointments will show up here."
                        </div>
                    </CardContent>

                    <CardFooter>
                        <Button
                            variant=ButtonVariant::Outline
                            size=ButtonSize::Sm
                            on:click=on_sign_out
                        >
                            "Sign out"
                        </Button>
                    </CardFooter>
                </Card>
            </div>
        </div>
    }
}

#[component]
pub fn RootPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let is_authenticated = move || app_state.0.auth.get().is_authenticated();

    view! {
        <Show when=is_authenticated fallback=move || view! { <SignInPage /> }>
            <HomePage />
        </Show>
    }
}
