//! Keyboard shortcuts for the archive's video player.

use tracing::{error, info};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::HtmlMediaElement;

/// The playback surface the shortcuts drive.
pub trait MediaElement {
    fn paused(&self) -> bool;
    fn play(&self);
    fn pause(&self);
    fn current_time(&self) -> f64;
    fn set_current_time(&self, seconds: f64);
    /// NaN until metadata has loaded, infinite for live streams.
    fn duration(&self) -> f64;
}

impl MediaElement for HtmlMediaElement {
    fn paused(&self) -> bool {
        HtmlMediaElement::paused(self)
    }

    fn play(&self) {
        // The returned promise rejects when autoplay is refused; nothing to do about it here.
        if let Err(error) = HtmlMediaElement::play(self) {
            error!(message = "play failed", ?error);
        }
    }

    fn pause(&self) {
        if let Err(error) = HtmlMediaElement::pause(self) {
            error!(message = "pause failed", ?error);
        }
    }

    fn current_time(&self) -> f64 {
        HtmlMediaElement::current_time(self)
    }

    fn set_current_time(&self, seconds: f64) {
        HtmlMediaElement::set_current_time(self, seconds)
    }

    fn duration(&self) -> f64 {
        HtmlMediaElement::duration(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shortcut {
    TogglePlayback,
    SeekBackward,
    SeekForward,
}

impl Shortcut {
    /// Maps a `KeyboardEvent.code`.
    pub fn from_code(code: &str) -> Option<Shortcut> {
        match code {
            "Space" => Some(Shortcut::TogglePlayback),
            "ArrowLeft" => Some(Shortcut::SeekBackward),
            "ArrowRight" => Some(Shortcut::SeekForward),
            _ => None,
        }
    }

    /// Whether the browser's own handling of the key must be suppressed.
    pub fn suppresses_default(self) -> bool {
        matches!(self, Shortcut::TogglePlayback)
    }

    pub fn apply(self, media: &impl MediaElement, step: f64) {
        match self {
            Shortcut::TogglePlayback => {
                if media.paused() {
                    media.play();
                } else {
                    media.pause();
                }
            }
            Shortcut::SeekBackward => {
                media.set_current_time(seek_backward(media.current_time(), step));
            }
            Shortcut::SeekForward => {
                if let Some(target) = seek_forward(media.current_time(), step, media.duration()) {
                    media.set_current_time(target);
                }
            }
        }
    }
}

pub fn seek_backward(current: f64, step: f64) -> f64 {
    (current - step).max(0.0)
}

/// `None` while the duration is unknown; there is no end to clamp to yet.
pub fn seek_forward(current: f64, step: f64, duration: f64) -> Option<f64> {
    if duration.is_nan() {
        return None;
    }
    Some((current + step).min(duration))
}

/// Shortcut and fullscreen listeners for one video element.
pub struct VideoControls {
    document: web_sys::Document,

    // Saved here so the listeners live exactly as long as the controls.
    on_keydown: Closure<dyn FnMut(web_sys::KeyboardEvent)>,
    on_fullscreen_change: Closure<dyn FnMut(web_sys::Event)>,
}

impl VideoControls {
    pub fn attach(
        document: &web_sys::Document,
        video: Option<web_sys::HtmlVideoElement>,
        step: f64,
    ) -> Result<Option<VideoControls>, JsValue> {
        let video = match video {
            None => return Ok(None),
            Some(video) => video,
        };

        let on_fullscreen_change = {
            let document = document.clone();
            Closure::wrap(Box::new(move |_event: web_sys::Event| {
                info!(
                    message = "fullscreen toggle",
                    fullscreen = document.fullscreen_element().is_some()
                );
            }) as Box<dyn FnMut(web_sys::Event)>)
        };
        document.add_event_listener_with_callback(
            "fullscreenchange",
            on_fullscreen_change.as_ref().unchecked_ref(),
        )?;

        let on_keydown = Closure::wrap(Box::new(move |event: web_sys::KeyboardEvent| {
            let target = event
                .target()
                .and_then(|target| target.dyn_into::<web_sys::Node>().ok());
            // contains() is inclusive, so this also covers the video itself
            if !video.contains(target.as_ref()) {
                return;
            }
            let shortcut = match Shortcut::from_code(&event.code()) {
                None => return,
                Some(shortcut) => shortcut,
            };
            if shortcut.suppresses_default() {
                event.prevent_default();
            }
            let media: &HtmlMediaElement = &video;
            shortcut.apply(media, step);
        }) as Box<dyn FnMut(web_sys::KeyboardEvent)>);
        document.add_event_listener_with_callback("keydown", on_keydown.as_ref().unchecked_ref())?;

        Ok(Some(VideoControls {
            document: document.clone(),
            on_keydown,
            on_fullscreen_change,
        }))
    }
}

impl Drop for VideoControls {
    fn drop(&mut self) {
        let _ignore = self.document.remove_event_listener_with_callback(
            "keydown",
            self.on_keydown.as_ref().unchecked_ref(),
        );
        let _ignore = self.document.remove_event_listener_with_callback(
            "fullscreenchange",
            self.on_fullscreen_change.as_ref().unchecked_ref(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct FakeMedia {
        paused: Cell<bool>,
        time: Cell<f64>,
        duration: f64,
    }

    impl FakeMedia {
        fn at(time: f64, duration: f64) -> Self {
            Self {
                paused: Cell::new(true),
                time: Cell::new(time),
                duration,
            }
        }
    }

    impl MediaElement for FakeMedia {
        fn paused(&self) -> bool {
            self.paused.get()
        }
        fn play(&self) {
            self.paused.set(false)
        }
        fn pause(&self) {
            self.paused.set(true)
        }
        fn current_time(&self) -> f64 {
            self.time.get()
        }
        fn set_current_time(&self, seconds: f64) {
            self.time.set(seconds)
        }
        fn duration(&self) -> f64 {
            self.duration
        }
    }

    #[test]
    fn key_codes() {
        assert_eq!(Shortcut::from_code("Space"), Some(Shortcut::TogglePlayback));
        assert_eq!(Shortcut::from_code("ArrowLeft"), Some(Shortcut::SeekBackward));
        assert_eq!(Shortcut::from_code("ArrowRight"), Some(Shortcut::SeekForward));
        assert_eq!(Shortcut::from_code("KeyK"), None);
        assert_eq!(Shortcut::from_code(" "), None);
    }

    #[test]
    fn only_space_suppresses_default() {
        assert!(Shortcut::TogglePlayback.suppresses_default());
        assert!(!Shortcut::SeekBackward.suppresses_default());
        assert!(!Shortcut::SeekForward.suppresses_default());
    }

    #[test]
    fn space_toggles() {
        let media = FakeMedia::at(0.0, 60.0);
        Shortcut::TogglePlayback.apply(&media, 5.0);
        assert!(!media.paused());
        Shortcut::TogglePlayback.apply(&media, 5.0);
        assert!(media.paused());
    }

    #[test]
    fn seek_back_clamps_at_start() {
        let media = FakeMedia::at(2.0, 60.0);
        Shortcut::SeekBackward.apply(&media, 5.0);
        assert_eq!(media.current_time(), 0.0);

        let media = FakeMedia::at(30.0, 60.0);
        Shortcut::SeekBackward.apply(&media, 5.0);
        assert_eq!(media.current_time(), 25.0);
    }

    #[test]
    fn seek_forward_clamps_at_end() {
        let media = FakeMedia::at(58.0, 60.0);
        Shortcut::SeekForward.apply(&media, 5.0);
        assert_eq!(media.current_time(), 60.0);

        let media = FakeMedia::at(10.0, 60.0);
        Shortcut::SeekForward.apply(&media, 5.0);
        assert_eq!(media.current_time(), 15.0);
    }

    #[test]
    fn seek_forward_waits_for_metadata() {
        let media = FakeMedia::at(3.0, f64::NAN);
        Shortcut::SeekForward.apply(&media, 5.0);
        assert_eq!(media.current_time(), 3.0);
    }

    #[test]
    fn live_streams_have_no_end() {
        assert_eq!(seek_forward(100.0, 5.0, f64::INFINITY), Some(105.0));
    }
}
