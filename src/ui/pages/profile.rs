//! User profile page
//!
//! Shows the account of the signed-in user, lets them edit their contact
//! details and change their password. Password changes happen in a modal and
//! close it on success.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::core::User;
use crate::core::validation::{ChangePasswordForm, ProfileForm, ValidationErrors};
use crate::ui::common::{BaseModal, FormField, Spinner, SpinnerSize, TextAreaField, field_error};
use crate::ui::icon::{Icon, icons};
use crate::ui::notifications::use_notifications;
use crate::ui::session::use_session;

fn profile_form(user: &User) -> ProfileForm {
    ProfileForm {
        first_name: user.first_name.clone(),
        last_name: user.last_name.clone(),
        phone: user.phone.clone(),
        specialization: user.specialization.clone().unwrap_or_default(),
        bio: user.bio.clone().unwrap_or_default(),
    }
}

#[component]
pub fn ProfilePage() -> impl IntoView {
    let ctx = use_session();
    let toasts = use_notifications();
    let session = ctx.session;

    let first_name = RwSignal::new(String::new());
    let last_name = RwSignal::new(String::new());
    let phone = RwSignal::new(String::new());
    let specialization = RwSignal::new(String::new());
    let bio = RwSignal::new(String::new());
    let errors = RwSignal::new(ValidationErrors::new());
    let saving = RwSignal::new(false);
    let show_password_modal = RwSignal::new(false);

    // Fill the form from the session user whenever it changes
    Effect::new(move |_| {
        if let Some(form) = session.with(|s| s.user.as_ref().map(profile_form)) {
            first_name.set(form.first_name);
            last_name.set(form.last_name);
            phone.set(form.phone);
            specialization.set(form.specialization);
            bio.set(form.bio);
        }
    });

    let on_save = {
        let client = ctx.client();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            let form = ProfileForm {
                first_name: first_name.get_untracked(),
                last_name: last_name.get_untracked(),
                phone: phone.get_untracked(),
                specialization: specialization.get_untracked(),
                bio: bio.get_untracked(),
            };
            let update = match form.validate() {
                Ok(update) => update,
                Err(field_errors) => {
                    errors.set(field_errors);
                    return;
                }
            };
            errors.set(ValidationErrors::new());
            saving.set(true);

            let client = client.clone();
            spawn_local(async move {
                match client.update_profile(&update).await {
                    Ok(_) => toasts.success("Profil mis à jour"),
                    Err(e) => toasts.api_error(&e, "Mise à jour impossible"),
                }
                saving.set(false);
            });
        }
    };

    let user_field = move |f: fn(&User) -> String| move || session.with(|s| s.user.as_ref().map(f).unwrap_or_default());

    view! {
        <div class="space-y-6 max-w-3xl">
            <h1 class="text-2xl font-bold text-gray-900">"Mon profil"</h1>

            <div class="card flex items-center gap-4">
                <div class="w-16 h-16 rounded-full bg-primary-100 flex items-center justify-center">
                    <span class="text-xl text-primary-600 font-semibold">{user_field(User::initials)}</span>
                </div>
                <div>
                    <p class="text-lg font-semibold">{user_field(User::display_name)}</p>
                    <p class="text-sm text-gray-500">{user_field(|u| u.email.clone())}</p>
                    <p class="text-sm text-gray-500">
                        {user_field(|u| u.role.label().to_string())} " · "
                        {user_field(|u| u.location.label().to_string())}
                    </p>
                </div>
            </div>

            <form class="card space-y-4" on:submit=on_save novalidate=true>
                <h2 class="text-lg font-semibold">"Informations personnelles"</h2>
                <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                    <FormField label="Prénom" name="first_name" required=true value=first_name
                        error=field_error(errors, "first_name")/>
                    <FormField label="Nom" name="last_name" required=true value=last_name
                        error=field_error(errors, "last_name")/>
                    <FormField label="Téléphone" name="phone" input_type="tel" value=phone
                        error=field_error(errors, "phone")/>
                    <FormField label="Spécialisation" name="specialization" value=specialization/>
                </div>
                <TextAreaField label="Biographie" name="bio" value=bio/>
                <div class="flex justify-end">
                    <button type="submit" class="btn btn-primary" disabled=move || saving.get()>
                        {move || {
                            if saving.get() {
                                view! { <Spinner size=SpinnerSize::Small label="Enregistrement..."/> }.into_any()
                            } else {
                                view! { <span>"Enregistrer"</span> }.into_any()
                            }
                        }}
                    </button>
                </div>
            </form>

            <div class="card flex items-center justify-between">
                <div>
                    <h2 class="text-lg font-semibold">"Sécurité"</h2>
                    <p class="text-sm text-gray-500">"Modifiez votre mot de passe régulièrement."</p>
                </div>
                <button class="btn btn-secondary flex items-center gap-2" on:click=move |_| show_password_modal.set(true)>
                    <Icon name=icons::EDIT class="w-4 h-4"/>
                    <span>"Changer le mot de passe"</span>
                </button>
            </div>

            <ChangePasswordModal is_open=show_password_modal/>
        </div>
    }
}

#[component]
fn ChangePasswordModal(is_open: RwSignal<bool>) -> impl IntoView {
    let ctx = use_session();
    let toasts = use_notifications();

    let old_password = RwSignal::new(String::new());
    let new_password = RwSignal::new(String::new());
    let new_password_confirm = RwSignal::new(String::new());
    let errors = RwSignal::new(ValidationErrors::new());
    let loading = RwSignal::new(false);

    let reset = move || {
        old_password.set(String::new());
        new_password.set(String::new());
        new_password_confirm.set(String::new());
        errors.set(ValidationErrors::new());
    };

    let on_close = Callback::new(move |_| {
        reset();
        is_open.set(false);
    });

    let on_submit = {
        let client = ctx.client();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            let form = ChangePasswordForm {
                old_password: old_password.get_untracked(),
                new_password: new_password.get_untracked(),
                new_password_confirm: new_password_confirm.get_untracked(),
            };
            if let Err(field_errors) = form.validate() {
                errors.set(field_errors);
                return;
            }
            errors.set(ValidationErrors::new());
            loading.set(true);

            let client = client.clone();
            spawn_local(async move {
                match client.submit_password_change(&form).await {
                    Ok(()) => {
                        toasts.success("Mot de passe modifié");
                        on_close.run(());
                    }
                    Err(e) => toasts.api_error(&e, "Changement de mot de passe impossible"),
                }
                loading.set(false);
            });
        }
    };

    view! {
        <BaseModal title="Changer le mot de passe" is_open=is_open.into() on_close=on_close>
            <form class="space-y-4" on:submit=on_submit novalidate=true>
                <FormField label="Mot de passe actuel" name="old_password" input_type="password"
                    autocomplete="current-password" value=old_password error=field_error(errors, "old_password")/>
                <FormField label="Nouveau mot de passe" name="new_password" input_type="password"
                    autocomplete="new-password" value=new_password error=field_error(errors, "new_password")/>
                <FormField label="Confirmer le mot de passe" name="new_password_confirm" input_type="password"
                    autocomplete="new-password" value=new_password_confirm
                    error=field_error(errors, "new_password_confirm")/>
                <div class="flex justify-end gap-2 pt-4 border-t">
                    <button type="button" class="btn btn-secondary" on:click=move |_| on_close.run(())>
                        "Annuler"
                    </button>
                    <button type="submit" class="btn btn-primary" disabled=move || loading.get()>
                        {move || if loading.get() { "Modification..." } else { "Modifier" }}
                    </button>
                </div>
            </form>
        </BaseModal>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_support::sample_user;

    #[test]
    fn test_profile_form_from_user_validates() {
        let user = sample_user();
        let form = profile_form(&user);
        assert_eq!(form.first_name, user.first_name);
        let update = form.validate().unwrap();
        assert_eq!(update.first_name.as_deref(), Some(user.first_name.as_str()));
    }
}
