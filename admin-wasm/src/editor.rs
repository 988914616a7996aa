use js_sys::{Function, Promise};
use leptos::ev;
use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement, HtmlInputElement, Url};

use crate::api::{self, ApiError, browser};
use crate::crop::{CropState, INITIAL_ZOOM, JPEG_QUALITY, MAX_ZOOM, MIN_ZOOM, ZOOM_STEP};

/// Edge of the on-page preview canvas.
const VIEW_SIZE: u32 = 280;

#[derive(Debug, Clone, PartialEq)]
enum Status {
    Idle,
    Uploading,
    Saved,
    Failed(String),
}

impl Status {
    fn hint(&self) -> String {
        match self {
            Self::Idle => "Upload a square image and adjust the crop.".to_string(),
            Self::Uploading => "Saving…".to_string(),
            Self::Saved => "Saved.".to_string(),
            Self::Failed(message) => message.clone(),
        }
    }
}

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, ApiError> {
    canvas
        .get_context("2d")
        .map_err(browser)?
        .ok_or_else(|| ApiError::Browser("Canvas not supported".to_string()))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| ApiError::Browser("Canvas not supported".to_string()))
}

fn draw(
    canvas: &HtmlCanvasElement,
    image: &HtmlImageElement,
    state: &CropState,
    size: u32,
) -> Result<(), ApiError> {
    let ctx = context_2d(canvas)?;
    let rect = state.rect();
    let size = f64::from(size);
    ctx.clear_rect(0.0, 0.0, size, size);
    ctx.draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
        image, rect.x, rect.y, rect.size, rect.size, 0.0, 0.0, size, size,
    )
    .map_err(browser)
}

/// Rasterizes the crop on an offscreen canvas and encodes it as JPEG.
async fn render_jpeg(image: &HtmlImageElement, state: &CropState) -> Result<Blob, ApiError> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| ApiError::Browser("No document".to_string()))?;
    let canvas = document
        .create_element("canvas")
        .map_err(browser)?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| ApiError::Browser("Canvas not supported".to_string()))?;

    let size = state.output_size();
    canvas.set_width(size);
    canvas.set_height(size);
    draw(&canvas, image, state, size)?;

    let promise = Promise::new(&mut |resolve: Function, reject: Function| {
        let callback = Closure::once_into_js(move |blob: JsValue| {
            let _ = resolve.call1(&JsValue::NULL, &blob);
        });
        if let Err(err) = canvas.to_blob_with_type_and_encoder_options(
            callback.unchecked_ref(),
            "image/jpeg",
            &JsValue::from_f64(JPEG_QUALITY),
        ) {
            let _ = reject.call1(&JsValue::NULL, &err);
        }
    });

    JsFuture::from(promise)
        .await
        .map_err(browser)?
        .dyn_into::<Blob>()
        .map_err(|_| ApiError::Browser("Failed to create blob".to_string()))
}

#[component]
pub(crate) fn AvatarEditor(user_id: String, avatar_url: Option<String>) -> impl IntoView {
    let saved_url = RwSignal::new(avatar_url);
    let image_src = RwSignal::new(None::<String>);
    let crop = RwSignal::new(None::<CropState>);
    let status = RwSignal::new(Status::Idle);
    let drag_from = RwSignal::new(None::<(f64, f64)>);

    let image_ref = NodeRef::<html::Img>::new();
    let canvas_ref = NodeRef::<html::Canvas>::new();

    let busy = move || status.get() == Status::Uploading;

    let discard_image = move || {
        if let Some(previous) = image_src.get_untracked() {
            let _ = Url::revoke_object_url(&previous);
        }
        image_src.set(None);
        crop.set(None);
    };

    Effect::new(move |_| {
        let Some(state) = crop.get() else {
            return;
        };
        let (Some(canvas), Some(image)) = (canvas_ref.get(), image_ref.get()) else {
            return;
        };
        if let Err(err) = draw(&canvas, &image, &state, VIEW_SIZE) {
            status.set(Status::Failed(err.to_string()));
        }
    });

    let on_file = move |ev: ev::Event| {
        let input: HtmlInputElement = event_target(&ev);
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };
        match Url::create_object_url_with_blob(&file) {
            Ok(url) => {
                discard_image();
                status.set(Status::Idle);
                image_src.set(Some(url));
            }
            Err(err) => status.set(Status::Failed(browser(err).to_string())),
        }
        input.set_value("");
    };

    let on_image_load = move |_: ev::Event| {
        if let Some(image) = image_ref.get_untracked() {
            crop.set(CropState::new(
                f64::from(image.natural_width()),
                f64::from(image.natural_height()),
            ));
        }
    };

    let on_zoom = move |ev: ev::Event| {
        if let Ok(zoom) = event_target_value(&ev).parse::<f64>() {
            crop.update(|state| {
                if let Some(state) = state {
                    state.set_zoom(zoom);
                }
            });
        }
    };

    let on_pointer_down = move |ev: ev::PointerEvent| {
        drag_from.set(Some((f64::from(ev.client_x()), f64::from(ev.client_y()))));
    };
    let on_pointer_move = move |ev: ev::PointerEvent| {
        let Some((last_x, last_y)) = drag_from.get_untracked() else {
            return;
        };
        let (x, y) = (f64::from(ev.client_x()), f64::from(ev.client_y()));
        drag_from.set(Some((x, y)));
        crop.update(|state| {
            if let Some(state) = state {
                state.drag(x - last_x, y - last_y, f64::from(VIEW_SIZE));
            }
        });
    };
    let on_pointer_up = move |_: ev::PointerEvent| drag_from.set(None);

    let on_save = {
        let user_id = user_id.clone();
        move |_: ev::MouseEvent| {
            if status.get_untracked() == Status::Uploading {
                return;
            }
            let (Some(state), Some(image)) = (crop.get_untracked(), image_ref.get_untracked())
            else {
                return;
            };
            status.set(Status::Uploading);

            let user_id = user_id.clone();
            spawn_local(async move {
                let uploaded = match render_jpeg(&image, &state).await {
                    Ok(jpeg) => api::upload_avatar(&user_id, &jpeg).await,
                    Err(err) => Err(err),
                };
                match uploaded {
                    Ok(url) => {
                        saved_url.set(Some(url));
                        discard_image();
                        status.set(Status::Saved);
                    }
                    Err(err) => status.set(Status::Failed(err.to_string())),
                }
            });
        }
    };

    let on_remove = move |_: ev::MouseEvent| {
        if status.get_untracked() == Status::Uploading {
            return;
        }
        status.set(Status::Uploading);

        let user_id = user_id.clone();
        let avatar_url = saved_url.get_untracked();
        spawn_local(async move {
            match api::remove_avatar(&user_id, avatar_url.as_deref()).await {
                Ok(()) => {
                    saved_url.set(None);
                    discard_image();
                    status.set(Status::Saved);
                }
                Err(err) => status.set(Status::Failed(err.to_string())),
            }
        });
    };

    view! {
        <div class="avatar-editor stack">
            <div class="row">
                <div class="current-admin">
                    {move || match saved_url.get() {
                        Some(url) => view! { <img class="avatar" src=url alt="Current avatar"/> }.into_any(),
                        None => view! { <span class="avatar avatar-fallback">"?"</span> }.into_any(),
                    }}
                    <p class="muted">{move || status.get().hint()}</p>
                </div>
                <div class="actions">
                    <label class="btn ghost small">
                        "Choose image"
                        <input type="file" accept="image/*" hidden on:change=on_file/>
                    </label>
                    <button
                        type="button"
                        class="btn ghost small"
                        disabled=move || busy() || saved_url.get().is_none()
                        on:click=on_remove
                    >
                        "Remove"
                    </button>
                </div>
            </div>
            <div
                class="stack"
                style:display=move || if image_src.get().is_some() { "block" } else { "none" }
            >
                <img node_ref=image_ref src=move || image_src.get() on:load=on_image_load hidden/>
                <canvas
                    node_ref=canvas_ref
                    width=VIEW_SIZE
                    height=VIEW_SIZE
                    on:pointerdown=on_pointer_down
                    on:pointermove=on_pointer_move
                    on:pointerup=on_pointer_up
                    on:pointerleave=on_pointer_up
                ></canvas>
                <label>
                    "Zoom"
                    <input
                        type="range"
                        min=MIN_ZOOM
                        max=MAX_ZOOM
                        step=ZOOM_STEP
                        prop:value=move || {
                            crop.get().map(|state| state.zoom()).unwrap_or(INITIAL_ZOOM).to_string()
                        }
                        on:input=on_zoom
                    />
                </label>
                <p class="muted">"Drag the image to position. Zoom for a tighter crop. Save to update."</p>
                <div class="actions">
                    <button
                        type="button"
                        class="btn small"
                        disabled=move || busy() || crop.get().is_none()
                        on:click=on_save
                    >
                        {move || if busy() { "Saving…" } else { "Save avatar" }}
                    </button>
                </div>
            </div>
        </div>
    }
}
