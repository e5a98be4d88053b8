use glam::Vec2;
use web_sys as web;

/// Synthetic id for the mouse/pointer fallback, outside the range DOM touch
/// identifiers use.
pub const POINTER_TOUCH_ID: i32 = -1;

/// Map a DOM `Touch`'s client coordinates into canvas backing pixels.
#[inline]
pub fn touch_canvas_px(touch: &web::Touch, canvas: &web::HtmlCanvasElement) -> Vec2 {
    client_to_canvas_px(
        touch.client_x() as f32,
        touch.client_y() as f32,
        canvas,
    )
}

/// Map a pointer event's client coordinates into canvas backing pixels.
#[inline]
pub fn pointer_canvas_px(ev: &web::PointerEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    client_to_canvas_px(ev.client_x() as f32, ev.client_y() as f32, canvas)
}

#[inline]
pub fn client_to_canvas_px(client_x: f32, client_y: f32, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    let x_css = client_x - rect.left() as f32;
    let y_css = client_y - rect.top() as f32;
    let w = rect.width() as f32;
    let h = rect.height() as f32;
    if w > 0.0 && h > 0.0 {
        Vec2::new(
            (x_css / w) * canvas.width() as f32,
            (y_css / h) * canvas.height() as f32,
        )
    } else {
        Vec2::new(client_x, client_y)
    }
}
