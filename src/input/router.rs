use super::PointerEvent;
use crate::recorder::StrokeRecorder;
use crate::renderer::Surface;

/// Route a normalized pointer event to the recorder
pub fn dispatch<S: Surface>(recorder: &mut StrokeRecorder<S>, event: PointerEvent) {
    match event {
        PointerEvent::Down(point) => recorder.begin(point),
        PointerEvent::Move(point) => recorder.extend(point),
        PointerEvent::Up | PointerEvent::Leave => recorder.end(),
    }
}
