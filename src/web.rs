//! Browser widget: a `<canvas>` element wired to a [`StrokeRecorder`] and
//! exported to JavaScript as `HandwritingBoard`.

use std::cell::RefCell;
use std::rc::Rc;

use egui::pos2;
use js_sys::{JSON, Object, Promise, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;
use web_sys::{
    Blob, CanvasRenderingContext2d, Document, Element, Event, HtmlAnchorElement,
    HtmlCanvasElement, HtmlElement, MouseEvent, TouchEvent, Window,
};

use crate::config::BoardOptions;
use crate::error::BoardError;
use crate::export::{self, Encoded, ExportFormat};
use crate::input::{
    DeviceCapability, OffsetNode, PointerEvent, PointerPhase, RawPosition, dispatch,
    resolve_position,
};
use crate::mount::{MountTarget, resolve_mount};
use crate::recorder::StrokeRecorder;
use crate::renderer::CanvasSurface;

type SharedRecorder = Rc<RefCell<StrokeRecorder<CanvasSurface>>>;

fn to_js(err: BoardError) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("Missing window"))
}

fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("Missing document"))
}

impl Encoded for Blob {
    fn encoded_len(&self) -> usize {
        self.size() as usize
    }
}

/// An element walked through `offsetParent`
#[derive(Clone)]
struct DomNode {
    element: HtmlElement,
    body: Option<HtmlElement>,
}

impl OffsetNode for DomNode {
    fn offset_left(&self) -> f32 {
        self.element.offset_left() as f32
    }

    fn offset_top(&self) -> f32 {
        self.element.offset_top() as f32
    }

    fn offset_parent(&self) -> Option<Self> {
        let parent = self.element.offset_parent()?.dyn_into::<HtmlElement>().ok()?;
        Some(Self {
            element: parent,
            body: self.body.clone(),
        })
    }

    fn is_body(&self) -> bool {
        self.body.as_ref() == Some(&self.element)
    }
}

/// Touch events carry no element offset, only page coordinates
fn raw_position(event: &Event, capability: DeviceCapability) -> RawPosition {
    let mut raw = RawPosition::default();
    match capability {
        DeviceCapability::Mouse => {
            if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
                raw.offset = Some(pos2(mouse.offset_x() as f32, mouse.offset_y() as f32));
            }
        }
        DeviceCapability::Touch => {
            if let Some(touch) = event
                .dyn_ref::<TouchEvent>()
                .and_then(|touch| touch.changed_touches().get(0))
            {
                raw.page = Some(pos2(touch.page_x() as f32, touch.page_y() as f32));
            }
        }
    }
    raw
}

/// Split the JS options object into board options and the raw `el` value,
/// which may be an element rather than a selector.
fn read_options(options: &JsValue) -> Result<(BoardOptions, JsValue), JsValue> {
    if options.is_undefined() || options.is_null() {
        return Ok((BoardOptions::default(), JsValue::UNDEFINED));
    }
    let el = Reflect::get(options, &JsValue::from_str("el"))?;
    let copy = Object::assign(&Object::new(), options.unchecked_ref());
    Reflect::delete_property(&copy, &JsValue::from_str("el"))?;
    let json: String = JSON::stringify(&copy)?.into();
    let options = BoardOptions::from_json(&json).map_err(to_js)?;
    Ok((options, el))
}

fn create_canvas(
    window: &Window,
    document: &Document,
    options: &BoardOptions,
) -> Result<(HtmlCanvasElement, CanvasRenderingContext2d), JsValue> {
    let canvas = document
        .create_element("canvas")?
        .dyn_into::<HtmlCanvasElement>()?;
    if let Some(class) = &options.canvas_class {
        canvas.class_list().add_1(class)?;
    }

    // Backing store in device pixels, drawing in logical pixels.
    let dpr = window.device_pixel_ratio();
    canvas.style().set_css_text(&format!(
        "width:{}px;height:{}px;",
        options.width, options.height
    ));
    canvas.set_width((f64::from(options.width) * dpr) as u32);
    canvas.set_height((f64::from(options.height) * dpr) as u32);

    let ctx = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("Missing canvas context"))?
        .dyn_into::<CanvasRenderingContext2d>()?;
    ctx.scale(dpr, dpr)?;
    Ok((canvas, ctx))
}

#[wasm_bindgen]
pub struct HandwritingBoard {
    canvas: HtmlCanvasElement,
    recorder: SharedRecorder,
    capability: DeviceCapability,
    listeners: Vec<Closure<dyn FnMut(Event)>>,
}

impl HandwritingBoard {
    /// Register the listeners for the detected event family
    fn listen(&mut self, document: &Document) -> Result<(), JsValue> {
        for &(name, phase) in self.capability.listened_events() {
            let recorder = self.recorder.clone();
            let capability = self.capability;
            let node = DomNode {
                element: self.canvas.clone().into(),
                body: document.body(),
            };
            let listener = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
                let position = match phase {
                    PointerPhase::Down | PointerPhase::Move => {
                        resolve_position(&raw_position(&event, capability), &node)
                    }
                    PointerPhase::Up | PointerPhase::Leave => None,
                };
                let Some(pointer) = PointerEvent::from_phase(phase, position) else {
                    log::warn!("Ignoring {} without coordinates", event.type_());
                    return;
                };
                let mut state = recorder.borrow_mut();
                dispatch(&mut *state, pointer);
            });
            self.canvas
                .add_event_listener_with_callback(name, listener.as_ref().unchecked_ref())?;
            self.listeners.push(listener);
        }
        Ok(())
    }
}

#[wasm_bindgen]
impl HandwritingBoard {
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Result<HandwritingBoard, JsValue> {
        // Only the first board installs the logger.
        let _ = eframe::WebLogger::init(log::LevelFilter::Debug);

        let (options, el) = read_options(&options)?;
        let window = window()?;
        let document = document()?;
        let capability = DeviceCapability::from_user_agent(&window.navigator().user_agent()?);

        let (canvas, ctx) = create_canvas(&window, &document, &options)?;
        let surface = CanvasSurface::new(ctx, options.width, options.height);
        let style = options.line_style().map_err(to_js)?;

        let mut board = HandwritingBoard {
            canvas,
            recorder: Rc::new(RefCell::new(StrokeRecorder::new(surface, style))),
            capability,
            listeners: Vec::new(),
        };
        board.listen(&document)?;

        let target = if el.is_undefined() || el.is_null() {
            options.el.map(JsValue::from)
        } else {
            Some(el)
        };
        if let Some(target) = target {
            board.mount(target)?;
        }
        Ok(board)
    }

    /// Append the canvas to a selector or element
    pub fn mount(&self, el: JsValue) -> Result<(), JsValue> {
        let document = document()?;
        let target = match el.as_string() {
            Some(selector) => Some(MountTarget::Selector(selector)),
            None => el.dyn_into::<Element>().ok().map(MountTarget::Element),
        };
        let parent = resolve_mount(target, |selector| {
            document.query_selector(selector).ok().flatten()
        })
        .map_err(to_js)?;
        parent.append_child(&self.canvas)?;
        log::info!("Mounted handwriting board");
        Ok(())
    }

    pub fn undo(&self) {
        self.recorder.borrow_mut().undo();
    }

    pub fn redo(&self) {
        self.recorder.borrow_mut().redo();
    }

    pub fn reset(&self) {
        self.recorder.borrow_mut().reset();
    }

    /// Base64 data URL of the current picture
    #[wasm_bindgen(js_name = getImage)]
    pub fn get_image(
        &self,
        format: Option<String>,
        quality: Option<f64>,
    ) -> Result<String, JsValue> {
        let format = format.as_deref().map(ExportFormat::from_mime).unwrap_or_default();
        let quality = export::normalize_quality(quality.map(|q| q as f32));
        self.canvas.to_data_url_with_type_and_encoder_options(
            format.mime(),
            &JsValue::from_f64(f64::from(quality)),
        )
    }

    /// Resolves with a `Blob` of the current picture, rejects if the encoder
    /// produced nothing.
    #[wasm_bindgen(js_name = getImageBlob)]
    pub fn get_image_blob(&self, format: Option<String>, quality: Option<f64>) -> Promise {
        let format = format.as_deref().map(ExportFormat::from_mime).unwrap_or_default();
        let quality = export::normalize_quality(quality.map(|q| q as f32));

        let (sender, receiver) = futures::channel::oneshot::channel::<Option<Blob>>();
        let callback = Closure::once(move |blob: Option<Blob>| {
            let _ = sender.send(blob);
        });
        let requested = self.canvas.to_blob_with_type_and_encoder_options(
            callback.as_ref().unchecked_ref(),
            format.mime(),
            &JsValue::from_f64(f64::from(quality)),
        );

        future_to_promise(async move {
            requested?;
            // Keep the callback alive until the browser has called it.
            let _callback = callback;
            let blob = export::require_data(receiver.await.ok().flatten()).map_err(to_js)?;
            Ok(blob.into())
        })
    }

    /// Trigger a browser download of the current picture as PNG
    pub fn download(&self, file_name: Option<String>) -> Result<(), JsValue> {
        let anchor = document()?
            .create_element("a")?
            .dyn_into::<HtmlAnchorElement>()?;
        anchor.set_download(file_name.as_deref().unwrap_or(""));
        anchor.set_href(&self.get_image(None, None)?);
        anchor.click();
        Ok(())
    }
}
