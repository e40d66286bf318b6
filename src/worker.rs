//! Line-delimited JSON protocol exposing the engine to a host process.
//!
//! One request per line on stdin, one response per line on stdout. The
//! vocabulary is the classic worker pair: `should_set_target_image` answered
//! by `did_set_target_image`, and `should_step` answered by `did_step`
//! carrying the step's SVG fragment. Everything runs synchronously; a bad
//! request gets an `error` response instead of silence.

use std::io::{self, BufRead, Write};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::bitmap::Bitmap;
use crate::error::Error;
use crate::model::{Model, StepConfig};
use crate::rng::Rng;
use crate::shapes::ShapeKind;
use crate::svg;

/// Raw bitmap payload; validated against its stated dimensions before use
#[derive(Debug, Deserialize)]
pub struct TargetImage {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u32>,
}

/// Step options as the host sends them: camelCase keys, numeric kind ids
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepOptions {
    pub alpha: u8,
    pub candidate_shapes_per_step: u32,
    pub shape_mutations_per_step: u32,
    pub shape_types: Vec<u8>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "id", content = "data", rename_all = "snake_case")]
pub enum Request {
    ShouldSetTargetImage(TargetImage),
    ShouldStep(StepOptions),
}

#[derive(Debug, Serialize)]
#[serde(tag = "id", content = "data", rename_all = "snake_case")]
pub enum Response {
    DidSetTargetImage,
    DidStep(String),
    Error(String),
}

/// A worker session: at most one model, created by the first set-target request
pub struct Session {
    model: Option<Model>,
    rng: Rng,
}

impl Session {
    pub fn new(seed: u64) -> Self {
        Self {
            model: None,
            rng: Rng::new(seed),
        }
    }

    /// Handle one request; contract violations come back as `Response::Error`
    pub fn handle(&mut self, request: Request) -> Response {
        match self.try_handle(request) {
            Ok(response) => response,
            Err(e) => Response::Error(e.to_string()),
        }
    }

    fn try_handle(&mut self, request: Request) -> Result<Response, Error> {
        match request {
            Request::ShouldSetTargetImage(image) => {
                let target = Bitmap::from_parts(image.width, image.height, image.data)?;
                let background = target.average_color();
                self.model = Some(Model::new(target, background)?);
                Ok(Response::DidSetTargetImage)
            }
            Request::ShouldStep(options) => {
                let model = self.model.as_mut().ok_or(Error::NoTargetImage)?;
                let mut shape_types = Vec::with_capacity(options.shape_types.len());
                for id in options.shape_types {
                    shape_types.push(ShapeKind::from_id(id).ok_or(Error::UnknownShapeKind(id))?);
                }
                let config = StepConfig {
                    alpha: options.alpha,
                    candidate_shapes_per_step: options.candidate_shapes_per_step,
                    shape_mutations_per_step: options.shape_mutations_per_step,
                    shape_types,
                };
                let result = model.step(&config, &mut self.rng)?;
                debug!("worker step done, score {:.6}", result.score);
                Ok(Response::DidStep(svg::export_shapes(&[result])))
            }
        }
    }
}

/// Serve requests from stdin until EOF
pub fn run_stdio(seed: u64) -> io::Result<()> {
    let mut session = Session::new(seed);
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let response = match serde_json::from_str::<Request>(&line) {
            Ok(request) => session.handle(request),
            Err(e) => Response::Error(format!("malformed request: {e}")),
        };
        let encoded = serde_json::to_string(&response).map_err(io::Error::from)?;
        writeln!(out, "{encoded}")?;
        out.flush()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red_image(width: u32, height: u32) -> TargetImage {
        TargetImage {
            width,
            height,
            data: vec![0xff0000ff; (width * height) as usize],
        }
    }

    fn step_options() -> StepOptions {
        StepOptions {
            alpha: 128,
            candidate_shapes_per_step: 10,
            shape_mutations_per_step: 10,
            shape_types: vec![0, 3],
        }
    }

    #[test]
    fn test_set_target_then_step() {
        let mut session = Session::new(42);
        let ack = session.handle(Request::ShouldSetTargetImage(red_image(8, 8)));
        assert!(matches!(ack, Response::DidSetTargetImage));

        let response = session.handle(Request::ShouldStep(step_options()));
        match response {
            Response::DidStep(fragment) => assert!(!fragment.is_empty()),
            other => panic!("expected did_step, got {other:?}"),
        }
    }

    #[test]
    fn test_step_before_target_is_an_error() {
        let mut session = Session::new(42);
        let response = session.handle(Request::ShouldStep(step_options()));
        assert!(matches!(response, Response::Error(_)));
    }

    #[test]
    fn test_bad_pixel_count_is_an_error() {
        let mut session = Session::new(42);
        let image = TargetImage {
            width: 4,
            height: 4,
            data: vec![0; 3],
        };
        let response = session.handle(Request::ShouldSetTargetImage(image));
        assert!(matches!(response, Response::Error(_)));
    }

    #[test]
    fn test_unknown_shape_id_is_an_error() {
        let mut session = Session::new(42);
        session.handle(Request::ShouldSetTargetImage(red_image(4, 4)));
        let mut options = step_options();
        options.shape_types = vec![9];
        let response = session.handle(Request::ShouldStep(options));
        assert!(matches!(response, Response::Error(_)));
    }

    #[test]
    fn test_request_json_shape() {
        let request: Request = serde_json::from_str(
            r#"{"id":"should_step","data":{"alpha":128,"candidateShapesPerStep":50,"shapeMutationsPerStep":100,"shapeTypes":[4]}}"#,
        )
        .unwrap();
        match request {
            Request::ShouldStep(options) => {
                assert_eq!(options.alpha, 128);
                assert_eq!(options.shape_types, vec![4]);
            }
            other => panic!("unexpected request {other:?}"),
        }
    }

    #[test]
    fn test_response_json_shape() {
        let encoded = serde_json::to_string(&Response::DidStep("<rect />".into())).unwrap();
        assert_eq!(encoded, r#"{"id":"did_step","data":"<rect />"}"#);
    }
}
