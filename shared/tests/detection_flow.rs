use std::cell::Cell;
use std::rc::Rc;

use shared::api::{interpret_response, GENERIC_ERROR_MESSAGE};
use shared::{
    ClockTime, Command, DetectionFailure, DetectorState, Event, Generation, ImageSource,
    RequestState,
};

/// Counts live preview handles so tests can check release-on-replace.
#[derive(Clone, Debug, PartialEq)]
struct TestImage {
    name: &'static str,
    mime: &'static str,
    live_previews: Rc<Cell<usize>>,
}

struct TestPreview {
    url: String,
    live: Rc<Cell<usize>>,
}

impl Drop for TestPreview {
    fn drop(&mut self) {
        self.live.set(self.live.get() - 1);
    }
}

impl ImageSource for TestImage {
    type Preview = TestPreview;

    fn content_type(&self) -> String {
        self.mime.to_string()
    }

    fn create_preview(&self) -> TestPreview {
        self.live_previews.set(self.live_previews.get() + 1);
        TestPreview {
            url: format!("blob:{}", self.name),
            live: self.live_previews.clone(),
        }
    }
}

struct Harness {
    live: Rc<Cell<usize>>,
    state: DetectorState<TestImage>,
}

impl Harness {
    fn new() -> Self {
        Self {
            live: Rc::new(Cell::new(0)),
            state: DetectorState::new(),
        }
    }

    fn file(&self, name: &'static str, mime: &'static str) -> TestImage {
        TestImage {
            name,
            mime,
            live_previews: self.live.clone(),
        }
    }

    fn send(&mut self, event: Event<TestImage>) -> Option<Command<TestImage>> {
        let state = std::mem::take(&mut self.state);
        let (next, command) = state.reduce(event);
        self.state = next;
        command
    }

    fn select(&mut self, name: &'static str) {
        let file = self.file(name, "image/jpeg");
        assert!(self.send(Event::Select(file)).is_none());
    }

    fn submit(&mut self) -> Generation {
        match self.send(Event::Submit) {
            Some(Command::Detect { generation, .. }) => generation,
            None => panic!("submit did not issue a request"),
        }
    }

    fn respond(&mut self, generation: Generation, status: u16, body: &str) {
        let outcome = interpret_response(status, body);
        self.send(Event::Completed {
            generation,
            outcome,
        });
    }
}

const SUCCESS_BODY: &str =
    r#"{"time":{"hours":3,"seconds":5,"minutes":4},"confidence":0.87}"#;

#[test]
fn non_image_selection_leaves_state_untouched() {
    let mut h = Harness::new();
    h.select("clock.jpg");
    let generation = h.submit();
    h.respond(generation, 200, SUCCESS_BODY);

    let before_generation = h.state.generation();
    for mime in ["application/pdf", "text/plain", ""] {
        let file = h.file("notes", mime);
        assert!(h.send(Event::Select(file)).is_none());
    }

    assert_eq!(h.state.generation(), before_generation);
    assert_eq!(h.state.image().map(|i| i.name), Some("clock.jpg"));
    assert_eq!(h.state.request_state(), RequestState::Succeeded);
    assert!(h.state.result().is_some());
    assert_eq!(h.live.get(), 1);
}

#[test]
fn new_selection_clears_previous_outcome() {
    let mut h = Harness::new();
    h.select("first.jpg");
    let generation = h.submit();
    h.respond(generation, 400, r#"{"detail":"no clock found"}"#);
    assert_eq!(h.state.request_state(), RequestState::Failed);

    h.select("second.jpg");
    assert_eq!(h.state.request_state(), RequestState::Idle);
    assert!(h.state.error().is_none());
    assert!(h.state.result().is_none());
    assert_eq!(
        h.state.preview().map(|p| p.url.as_str()),
        Some("blob:second.jpg")
    );
}

#[test]
fn previews_are_released_when_replaced_or_cleared() {
    let mut h = Harness::new();
    for name in ["a.jpg", "b.jpg", "c.jpg"] {
        h.select(name);
        assert_eq!(h.live.get(), 1);
    }
    h.send(Event::Reset);
    assert_eq!(h.live.get(), 0);
    assert!(h.state.preview().is_none());
}

#[test]
fn second_submit_while_in_flight_is_ignored() {
    let mut h = Harness::new();
    h.select("clock.jpg");
    let generation = h.submit();

    assert!(h.send(Event::Submit).is_none());
    assert_eq!(h.state.generation(), generation);
    assert_eq!(h.state.request_state(), RequestState::InFlight);
    assert!(!h.state.can_submit());
}

#[test]
fn successful_detection_populates_result() {
    let mut h = Harness::new();
    h.select("clock.jpg");
    let generation = h.submit();
    h.respond(generation, 200, SUCCESS_BODY);

    let result = h.state.result().expect("result");
    assert_eq!(result.time, ClockTime::new(3, 4, 5));
    assert_eq!(result.confidence, 0.87);
    assert_eq!(h.state.request_state(), RequestState::Succeeded);
    assert!(h.state.error().is_none());
}

#[test]
fn string_detail_is_shown() {
    let mut h = Harness::new();
    h.select("clock.jpg");
    let generation = h.submit();
    h.respond(generation, 400, r#"{"detail":"no clock found"}"#);

    assert_eq!(h.state.error(), Some("no clock found"));
    assert!(h.state.result().is_none());
    assert_eq!(h.state.request_state(), RequestState::Failed);
}

#[test]
fn structured_detail_shows_message_only() {
    let mut h = Harness::new();
    h.select("clock.jpg");
    let generation = h.submit();
    h.respond(
        generation,
        400,
        r#"{"detail":{"message":"low confidence","technical_details":"hours hand missing"}}"#,
    );

    assert_eq!(h.state.error(), Some("low confidence"));
}

#[test]
fn unparsable_body_and_transport_failure_fall_back() {
    let mut h = Harness::new();
    h.select("clock.jpg");
    let generation = h.submit();
    h.respond(generation, 500, "Internal Server Error");
    assert_eq!(h.state.error(), Some(GENERIC_ERROR_MESSAGE));
    assert_eq!(h.state.request_state(), RequestState::Failed);

    let generation = h.submit();
    h.send(Event::Completed {
        generation,
        outcome: Err(DetectionFailure::Transport("Failed to fetch".into())),
    });
    assert_eq!(h.state.error(), Some(GENERIC_ERROR_MESSAGE));
    assert_eq!(h.state.request_state(), RequestState::Failed);

    let generation = h.submit();
    h.respond(generation, 200, "not json");
    assert_eq!(h.state.error(), Some(GENERIC_ERROR_MESSAGE));
    assert!(!h.state.is_loading());
}

#[test]
fn stale_response_is_not_applied_after_reselection() {
    let mut h = Harness::new();
    h.select("old.jpg");
    let stale = h.submit();

    h.select("new.jpg");
    h.respond(stale, 200, SUCCESS_BODY);

    assert!(h.state.result().is_none());
    assert!(h.state.error().is_none());
    assert_eq!(h.state.request_state(), RequestState::Idle);

    let current = h.submit();
    h.respond(stale, 400, r#"{"detail":"late"}"#);
    assert_eq!(h.state.request_state(), RequestState::InFlight);

    h.respond(current, 200, SUCCESS_BODY);
    assert_eq!(h.state.request_state(), RequestState::Succeeded);
    assert_eq!(h.state.image().map(|i| i.name), Some("new.jpg"));
}

#[test]
fn only_one_outcome_is_applied_per_generation() {
    let mut h = Harness::new();
    h.select("clock.jpg");
    let generation = h.submit();
    h.respond(generation, 200, SUCCESS_BODY);
    h.respond(generation, 400, r#"{"detail":"too late"}"#);

    assert_eq!(h.state.request_state(), RequestState::Succeeded);
    assert!(h.state.error().is_none());
}

#[test]
fn reset_always_returns_to_empty_idle() {
    let mut h = Harness::new();
    h.send(Event::Reset);
    assert_eq!(h.state.request_state(), RequestState::Idle);

    h.select("clock.jpg");
    let generation = h.submit();
    h.send(Event::Reset);
    h.respond(generation, 200, SUCCESS_BODY);

    assert!(h.state.image().is_none());
    assert!(h.state.preview().is_none());
    assert!(h.state.result().is_none());
    assert!(h.state.error().is_none());
    assert_eq!(h.state.request_state(), RequestState::Idle);
    assert_eq!(h.live.get(), 0);
}

#[test]
fn resubmit_after_failure_clears_error_while_in_flight() {
    let mut h = Harness::new();
    h.select("clock.jpg");
    let generation = h.submit();
    h.respond(generation, 400, r#"{"detail":"no clock found"}"#);
    assert_eq!(h.state.error(), Some("no clock found"));

    h.submit();
    assert!(h.state.error().is_none());
    assert!(h.state.result().is_none());
    assert_eq!(h.state.request_state(), RequestState::InFlight);
}

#[test]
fn resubmit_after_success_clears_result_while_in_flight() {
    let mut h = Harness::new();
    h.select("clock.jpg");
    let generation = h.submit();
    h.respond(generation, 200, SUCCESS_BODY);
    assert!(h.state.result().is_some());

    h.submit();
    assert!(h.state.result().is_none());
    assert!(h.state.error().is_none());
    assert_eq!(h.state.request_state(), RequestState::InFlight);
}

#[test]
fn timeout_fails_once_and_ignores_late_response() {
    let mut h = Harness::new();
    h.select("clock.jpg");
    let generation = h.submit();
    let timed_out = DetectionFailure::TimedOut(1500);
    let expected = timed_out.user_message();

    h.send(Event::Completed {
        generation,
        outcome: Err(timed_out),
    });
    assert_eq!(h.state.request_state(), RequestState::Failed);
    assert_eq!(h.state.error(), Some(expected.as_str()));

    h.respond(generation, 200, SUCCESS_BODY);
    assert_eq!(h.state.request_state(), RequestState::Failed);
    assert!(h.state.result().is_none());
    assert_eq!(h.state.error(), Some(expected.as_str()));
}

#[test]
fn dropping_a_new_image_over_the_preview_replaces_it() {
    let mut h = Harness::new();
    h.select("first.jpg");
    h.select("dropped.png");

    assert_eq!(h.state.image().map(|i| i.name), Some("dropped.png"));
    assert_eq!(
        h.state.preview().map(|p| p.url.as_str()),
        Some("blob:dropped.png")
    );
    assert_eq!(h.live.get(), 1);
}
