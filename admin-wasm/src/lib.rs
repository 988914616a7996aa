//! Admin page enhancements: the avatar crop-and-upload editor on the user
//! edit page and the live slug preview on the post forms.

pub mod crop;
pub mod slug;

#[cfg(target_arch = "wasm32")]
mod api;
#[cfg(target_arch = "wasm32")]
mod editor;

#[cfg(target_arch = "wasm32")]
const MOUNT_ID: &str = "avatar-editor";
#[cfg(target_arch = "wasm32")]
const TITLE_ID: &str = "post-title";
#[cfg(target_arch = "wasm32")]
const SLUG_ID: &str = "slug-preview";

/// Enhances whichever admin widgets the current page carries. Pages without
/// a mount point are left alone.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return;
    };
    mount_avatar_editor(&document);
    wire_slug_preview(&document);
}

/// Replaces the server-rendered fallback inside `#avatar-editor` with the editor.
#[cfg(target_arch = "wasm32")]
fn mount_avatar_editor(document: &web_sys::Document) {
    use leptos::prelude::*;
    use wasm_bindgen::JsCast;

    use crate::editor::AvatarEditor;

    let Some(mount) = document.get_element_by_id(MOUNT_ID) else {
        return;
    };

    let user_id = mount.get_attribute("data-user-id").unwrap_or_default();
    let avatar_url = mount
        .get_attribute("data-avatar-url")
        .filter(|url| !url.trim().is_empty());
    mount.set_inner_html("");

    let Ok(mount) = mount.dyn_into::<web_sys::HtmlElement>() else {
        return;
    };

    leptos::mount::mount_to(mount, move || {
        view! { <AvatarEditor user_id=user_id avatar_url=avatar_url/> }
    })
    .forget();
}

/// Keeps `#slug-preview` in step with `#post-title` as the title is typed.
#[cfg(target_arch = "wasm32")]
fn wire_slug_preview(document: &web_sys::Document) {
    use wasm_bindgen::JsCast;
    use wasm_bindgen::closure::Closure;
    use web_sys::HtmlInputElement;

    let title = document
        .get_element_by_id(TITLE_ID)
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok());
    let slug = document
        .get_element_by_id(SLUG_ID)
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok());
    let (Some(title), Some(slug)) = (title, slug) else {
        return;
    };

    let stored = slug.get_attribute("data-stored-slug").unwrap_or_default();
    let source = title.clone();
    let on_input = Closure::<dyn FnMut()>::new(move || {
        slug.set_value(&crate::slug::preview(&source.value(), &stored));
    });
    if title
        .add_event_listener_with_callback("input", on_input.as_ref().unchecked_ref())
        .is_ok()
    {
        on_input.forget();
    }
}
