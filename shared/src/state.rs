use crate::api::{DetectionFailure, DetectionResult};
use derive_more::Display;

/// A picked file that can describe its content type and produce a preview.
///
/// The preview is released by dropping it, so the state never keeps more
/// than one alive.
pub trait ImageSource: Clone {
    type Preview;

    fn content_type(&self) -> String;
    fn create_preview(&self) -> Self::Preview;
}

pub fn is_image_content_type(content_type: &str) -> bool {
    content_type.trim().to_ascii_lowercase().starts_with("image/")
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
#[display(fmt = "gen#{}", _0)]
pub struct Generation(u64);

impl Generation {
    fn next(self) -> Self {
        Generation(self.0.wrapping_add(1))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    InFlight,
    Succeeded,
    Failed,
}

pub struct Selection<I: ImageSource> {
    pub image: I,
    pub preview: I::Preview,
}

pub enum Event<I> {
    Select(I),
    Submit,
    Completed {
        generation: Generation,
        outcome: Result<DetectionResult, DetectionFailure>,
    },
    Reset,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command<I> {
    Detect { generation: Generation, image: I },
}

/// All interaction state of the detection screen. Events go through
/// [`DetectorState::reduce`]; completions carry the [`Generation`] they were
/// issued for and are dropped once that generation is no longer current.
pub struct DetectorState<I: ImageSource> {
    selection: Option<Selection<I>>,
    request: RequestState,
    result: Option<DetectionResult>,
    error: Option<String>,
    generation: Generation,
}

impl<I: ImageSource> Default for DetectorState<I> {
    fn default() -> Self {
        Self {
            selection: None,
            request: RequestState::Idle,
            result: None,
            error: None,
            generation: Generation::default(),
        }
    }
}

impl<I: ImageSource> DetectorState<I> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn image(&self) -> Option<&I> {
        self.selection.as_ref().map(|s| &s.image)
    }

    pub fn preview(&self) -> Option<&I::Preview> {
        self.selection.as_ref().map(|s| &s.preview)
    }

    pub fn request_state(&self) -> RequestState {
        self.request
    }

    pub fn is_loading(&self) -> bool {
        self.request == RequestState::InFlight
    }

    pub fn result(&self) -> Option<&DetectionResult> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn can_submit(&self) -> bool {
        self.selection.is_some() && !self.is_loading()
    }

    pub fn reduce(self, event: Event<I>) -> (Self, Option<Command<I>>) {
        match event {
            Event::Select(image) => (self.select(image), None),
            Event::Submit => self.submit(),
            Event::Completed {
                generation,
                outcome,
            } => (self.complete(generation, outcome), None),
            Event::Reset => (self.reset(), None),
        }
    }

    fn select(mut self, image: I) -> Self {
        let content_type = image.content_type();
        if !is_image_content_type(&content_type) {
            log::warn!("Ignoring non-image selection ({:?})", content_type);
            return self;
        }

        // Old preview is dropped here, before the new one is stored.
        self.selection = None;
        let preview = image.create_preview();
        self.selection = Some(Selection { image, preview });
        self.result = None;
        self.error = None;
        self.request = RequestState::Idle;
        self.generation = self.generation.next();
        self
    }

    fn submit(mut self) -> (Self, Option<Command<I>>) {
        let image = self.selection.as_ref().map(|s| s.image.clone());
        let image = match image {
            Some(image) if !self.is_loading() => image,
            _ => return (self, None),
        };

        self.generation = self.generation.next();
        self.request = RequestState::InFlight;
        self.error = None;
        self.result = None;

        let command = Command::Detect {
            generation: self.generation,
            image,
        };
        (self, Some(command))
    }

    fn complete(
        mut self,
        generation: Generation,
        outcome: Result<DetectionResult, DetectionFailure>,
    ) -> Self {
        if generation != self.generation || self.request != RequestState::InFlight {
            log::debug!(
                "Discarding stale detection outcome for {} (current {})",
                generation,
                self.generation
            );
            return self;
        }

        match outcome {
            Ok(result) => {
                self.result = Some(result);
                self.error = None;
                self.request = RequestState::Succeeded;
            }
            Err(failure) => {
                self.result = None;
                self.error = Some(failure.user_message());
                self.request = RequestState::Failed;
            }
        }
        self
    }

    fn reset(mut self) -> Self {
        self.selection = None;
        self.result = None;
        self.error = None;
        self.request = RequestState::Idle;
        self.generation = self.generation.next();
        self
    }
}
