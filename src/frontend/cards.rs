use gloo_events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{Element, MouseEvent};

use super::{set_class, set_style, Media, Page};
use crate::{
    error::SetupError,
    pointer::{
        shine_position, tilt_transform, CardRect, FrameBatcher, NEUTRAL_SHINE, NEUTRAL_TILT,
        SHINE_PROPERTY,
    },
};

const CARD_3D_CLASS: &str = "price-card--3d";

fn apply_tilt(card: &Element, media: &Media, client_x: f64, client_y: f64) {
    if !media.snapshot().pointer_tilt() {
        return;
    }

    let bounds = card.get_bounding_client_rect();
    let rect = CardRect {
        left: bounds.left(),
        top: bounds.top(),
        width: bounds.width(),
        height: bounds.height(),
    };
    set_style(card, "transform", &tilt_transform(rect, client_x, client_y));
    set_style(card, SHINE_PROPERTY, &shine_position(rect, client_x));
}

fn reset_tilt(card: &Element) {
    set_style(card, "transform", NEUTRAL_TILT);
    set_style(card, "will-change", "auto");
    set_style(card, SHINE_PROPERTY, NEUTRAL_SHINE);
}

pub(super) fn install(page: &Page) -> Result<(), SetupError> {
    let cards = page.query_all(".price-card")?;

    for card in cards {
        set_class(&card, CARD_3D_CLASS, true);
        set_style(&card, SHINE_PROPERTY, NEUTRAL_SHINE);

        let target = card.clone();
        let reset_target = card.clone();
        let media = page.media.clone();
        let batcher = FrameBatcher::new(
            page.frames.clone(),
            move |x, y| apply_tilt(&target, &media, x, y),
            move || reset_tilt(&reset_target),
        );

        {
            let media = page.media.clone();
            let target = card.clone();
            EventListener::new(&card, "mouseenter", move |_| {
                if media.snapshot().pointer_tilt() {
                    set_style(&target, "will-change", "transform");
                }
            })
            .forget();
        }

        {
            let media = page.media.clone();
            let batcher = batcher.clone();
            EventListener::new(&card, "mousemove", move |event| {
                if !media.snapshot().pointer_tilt() {
                    return;
                }
                if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
                    batcher.pointer_move(f64::from(mouse.client_x()), f64::from(mouse.client_y()));
                }
            })
            .forget();
        }

        EventListener::new(&card, "mouseleave", move |_| batcher.pointer_leave()).forget();
    }

    Ok(())
}
